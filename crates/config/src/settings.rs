//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::{endpoints, voice};
use crate::ConfigError;

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    /// Development mode - relaxed validation, warnings only
    #[default]
    Development,
    /// Staging mode - stricter validation
    Staging,
    /// Production mode - all validations enforced
    Production,
}

impl RuntimeEnvironment {
    /// Check if strict validation should be applied
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Production | Self::Staging)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Dialogue behaviour
    #[serde(default)]
    pub advisor: AdvisorConfig,

    /// External advisory backend (remote responder mode only)
    #[serde(default)]
    pub backend: BackendConfig,

    /// Speech synthesis / recognition preferences
    #[serde(default)]
    pub voice: VoiceSettings,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_advisor()?;
        self.validate_backend()?;
        self.validate_voice()?;
        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        let server = &self.server;

        if server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                message: "Port cannot be 0".to_string(),
            });
        }

        if server.max_sessions == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.max_sessions".to_string(),
                message: "Max sessions must be at least 1".to_string(),
            });
        }

        if server.session_timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.session_timeout_seconds".to_string(),
                message: "Session timeout must be at least 1 second".to_string(),
            });
        }

        if self.environment.is_strict() && !server.cors_enabled {
            return Err(ConfigError::InvalidValue {
                field: "server.cors_enabled".to_string(),
                message: "CORS must be enabled outside development".to_string(),
            });
        }

        Ok(())
    }

    fn validate_advisor(&self) -> Result<(), ConfigError> {
        let code = self.advisor.default_language.trim().to_ascii_lowercase();
        if !matches!(code.as_str(), "en" | "hi") {
            return Err(ConfigError::InvalidValue {
                field: "advisor.default_language".to_string(),
                message: format!("Unsupported language '{}', expected 'en' or 'hi'", code),
            });
        }

        if let Some(path) = &self.advisor.knowledge_base_path {
            if path.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "advisor.knowledge_base_path".to_string(),
                    message: "Path cannot be empty when set".to_string(),
                });
            }
        }

        Ok(())
    }

    fn validate_backend(&self) -> Result<(), ConfigError> {
        if self.advisor.responder != ResponderMode::Remote {
            return Ok(());
        }

        let endpoint = self.backend.endpoint.trim();
        if endpoint.is_empty() {
            return Err(ConfigError::MissingField("backend.endpoint".to_string()));
        }
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "backend.endpoint".to_string(),
                message: format!("Expected an http(s) URL, got '{}'", endpoint),
            });
        }
        if self.backend.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "backend.timeout_ms".to_string(),
                message: "Timeout must be at least 1ms".to_string(),
            });
        }

        Ok(())
    }

    fn validate_voice(&self) -> Result<(), ConfigError> {
        let voice = &self.voice;

        if !(0.1..=10.0).contains(&voice.rate) {
            return Err(ConfigError::InvalidValue {
                field: "voice.rate".to_string(),
                message: format!("Must be between 0.1 and 10.0, got {}", voice.rate),
            });
        }

        if !(0.0..=2.0).contains(&voice.pitch) {
            return Err(ConfigError::InvalidValue {
                field: "voice.pitch".to_string(),
                message: format!("Must be between 0.0 and 2.0, got {}", voice.pitch),
            });
        }

        if let Err(e) = regex::Regex::new(&voice.preferred_name_pattern) {
            return Err(ConfigError::InvalidValue {
                field: "voice.preferred_name_pattern".to_string(),
                message: e.to_string(),
            });
        }

        for (field, chain) in [
            ("voice.english_chain", &voice.english_chain),
            ("voice.hindi_chain", &voice.hindi_chain),
        ] {
            if chain.iter().any(|tag| tag.trim().is_empty()) {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    message: "Fallback tags cannot be empty".to_string(),
                });
            }
        }

        Ok(())
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server host
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Maximum concurrent chat sessions
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,

    /// Idle time after which a session is dropped
    #[serde(default = "default_session_timeout")]
    pub session_timeout_seconds: u64,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// CORS allowed origins
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_max_sessions() -> usize {
    100
}
fn default_session_timeout() -> u64 {
    1800
}
fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_sessions: default_max_sessions(),
            session_timeout_seconds: default_session_timeout(),
            cors_enabled: true,
            cors_origins: Vec::new(),
        }
    }
}

/// Which component produces the reply text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResponderMode {
    /// Deterministic rule-based composer
    #[default]
    Rules,
    /// External advisory backend over HTTP
    Remote,
}

/// Dialogue behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisorConfig {
    /// Session language when the client does not pick one (`en` or `hi`)
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Reply source
    #[serde(default)]
    pub responder: ResponderMode,

    /// Optional YAML file replacing the built-in knowledge base
    #[serde(default)]
    pub knowledge_base_path: Option<String>,

    /// Emit the welcome messages when a session opens
    #[serde(default = "default_true")]
    pub greet_on_open: bool,
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            default_language: default_language(),
            responder: ResponderMode::Rules,
            knowledge_base_path: None,
            greet_on_open: true,
        }
    }
}

/// External advisory backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// POST endpoint accepting `{"question": ...}`
    #[serde(default = "default_backend_endpoint")]
    pub endpoint: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_backend_timeout")]
    pub timeout_ms: u64,
}

fn default_backend_endpoint() -> String {
    endpoints::ADVISORY_BACKEND.to_string()
}
fn default_backend_timeout() -> u64 {
    30_000
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            endpoint: default_backend_endpoint(),
            timeout_ms: default_backend_timeout(),
        }
    }
}

/// Speech preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceSettings {
    /// Speaking rate (1.0 = normal)
    #[serde(default = "default_rate")]
    pub rate: f32,

    /// Pitch (1.0 = normal)
    #[serde(default = "default_pitch")]
    pub pitch: f32,

    /// Regex over voice names preferred inside each fallback tier
    #[serde(default = "default_name_pattern")]
    pub preferred_name_pattern: String,

    /// Fallback chain for English replies. `xx-*` matches any region.
    #[serde(default = "default_english_chain")]
    pub english_chain: Vec<String>,

    /// Fallback chain for Hindi replies
    #[serde(default = "default_hindi_chain")]
    pub hindi_chain: Vec<String>,
}

fn default_rate() -> f32 {
    voice::DEFAULT_RATE
}
fn default_pitch() -> f32 {
    voice::DEFAULT_PITCH
}
fn default_name_pattern() -> String {
    voice::PREFERRED_NAME_PATTERN.to_string()
}
fn default_english_chain() -> Vec<String> {
    ["en-IN", "en-GB", "en-US", "en-*"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
fn default_hindi_chain() -> Vec<String> {
    ["hi-IN", "hi-*", "en-IN"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            rate: default_rate(),
            pitch: default_pitch(),
            preferred_name_pattern: default_name_pattern(),
            english_chain: default_english_chain(),
            hindi_chain: default_hindi_chain(),
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub log_json: bool,

    /// Enable the Prometheus endpoint
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
            metrics_enabled: true,
        }
    }
}

/// Load settings from files and environment
///
/// Priority: env vars > config/{env}.* > config/default.* > defaults
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    builder = builder.add_source(File::with_name("config/default").required(false));

    if let Some(env_name) = env {
        builder =
            builder.add_source(File::with_name(&format!("config/{}", env_name)).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix("AGRO_ADVISOR")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    tracing::debug!(
        environment = ?settings.environment,
        responder = ?settings.advisor.responder,
        "Settings loaded"
    );

    Ok(settings)
}
