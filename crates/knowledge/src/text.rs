//! Localized text

use agro_advisor_core::Language;
use serde::{Deserialize, Serialize};

/// Text with an English original and an optional Hindi rendering
///
/// Lookups for a language without its own rendering fall back to English.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub en: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hi: Option<String>,
}

impl LocalizedText {
    pub fn new(en: impl Into<String>, hi: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            hi: Some(hi.into()),
        }
    }

    pub fn english_only(en: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            hi: None,
        }
    }

    pub fn get(&self, language: Language) -> &str {
        match language {
            Language::English => &self.en,
            Language::Hindi => self.hi.as_deref().unwrap_or(&self.en),
        }
    }
}
