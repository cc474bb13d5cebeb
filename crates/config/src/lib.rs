//! Configuration management for the agronomy advisor
//!
//! Supports loading configuration from:
//! - YAML/TOML files (`config/default.*`, `config/{env}.*`)
//! - Environment variables (AGRO_ADVISOR_ prefix, `__` separator)
//!
//! Agronomy thresholds that are part of the advisory contract (pH bands,
//! tolerance margins) live in [`constants`] and are not configurable.

pub mod constants;
pub mod settings;

pub use settings::{
    load_settings, AdvisorConfig, BackendConfig, ObservabilityConfig, ResponderMode,
    RuntimeEnvironment, ServerConfig, Settings, VoiceSettings,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
