//! Voice types shared between the voice adapter and speech platforms

use serde::{Deserialize, Serialize};

/// A synthesis voice as reported by the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceInfo {
    /// Platform voice name (e.g. "Microsoft Heera - English (India)")
    pub name: String,
    /// BCP-47 language tag (e.g. "en-IN")
    pub lang: String,
    /// Whether the platform marks this voice as its default
    #[serde(default)]
    pub default: bool,
}

impl VoiceInfo {
    pub fn new(name: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lang: lang.into(),
            default: false,
        }
    }

    /// Mark this voice as the platform default
    pub fn as_default(mut self) -> Self {
        self.default = true;
        self
    }

    /// Exact tag match, ignoring case and `_`/`-` differences
    pub fn matches_tag(&self, tag: &str) -> bool {
        normalize_tag(&self.lang) == normalize_tag(tag)
    }

    /// Primary-subtag match (`hi` matches `hi-IN`, `hi`, `hi_IN`)
    pub fn matches_primary(&self, primary: &str) -> bool {
        let lang = normalize_tag(&self.lang);
        let primary = primary.to_ascii_lowercase();
        lang == primary || lang.starts_with(&format!("{}-", primary))
    }
}

fn normalize_tag(tag: &str) -> String {
    tag.trim().replace('_', "-").to_ascii_lowercase()
}

/// How an utterance addresses the synthesizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VoiceTarget {
    /// A concrete voice chosen by the selection policy
    Voice { voice: VoiceInfo },
    /// No voice resolved; the platform picks one for the language tag
    Language { tag: String },
}

/// One spoken reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    pub text: String,
    pub target: VoiceTarget,
    /// Speaking rate (1.0 = normal)
    pub rate: f32,
    /// Pitch (1.0 = normal)
    pub pitch: f32,
}

/// Recognition session configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognitionConfig {
    /// BCP-47 language tag to recognise
    pub language_tag: String,
    /// Keep listening after the first result
    pub continuous: bool,
    /// Emit partial transcripts
    pub interim_results: bool,
    /// Number of alternatives per result
    pub max_alternatives: u32,
}

impl RecognitionConfig {
    /// Single result, final only, one alternative
    pub fn single_shot(language_tag: impl Into<String>) -> Self {
        Self {
            language_tag: language_tag.into(),
            continuous: false,
            interim_results: false,
            max_alternatives: 1,
        }
    }
}

/// Events reported by a recognition platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecognitionEvent {
    /// Final transcript
    Result { transcript: String },
    /// Platform error code (e.g. "no-speech", "not-allowed")
    Error { code: String },
    /// Session ended without a result
    End,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_matching() {
        let voice = VoiceInfo::new("Heera", "en_IN");
        assert!(voice.matches_tag("en-IN"));
        assert!(voice.matches_tag("EN-in"));
        assert!(!voice.matches_tag("en-GB"));
        assert!(voice.matches_primary("en"));
        assert!(!voice.matches_primary("e"));
    }

    #[test]
    fn test_single_shot_config() {
        let config = RecognitionConfig::single_shot("hi-IN");
        assert!(!config.continuous);
        assert!(!config.interim_results);
        assert_eq!(config.max_alternatives, 1);
    }

    #[test]
    fn test_recognition_event_json() {
        let event: RecognitionEvent =
            serde_json::from_str(r#"{"type":"error","code":"no-speech"}"#).unwrap();
        assert_eq!(
            event,
            RecognitionEvent::Error {
                code: "no-speech".to_string()
            }
        );
    }
}
