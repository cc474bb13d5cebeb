//! Supported languages
//!
//! The advisor answers in English and Hindi. Anything else falls back to
//! English; there is no runtime translation.

use serde::{Deserialize, Serialize};

/// Writing script of a language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    Latin,
    Devanagari,
}

impl Script {
    /// Unicode block range for the script's letters
    pub fn contains(&self, c: char) -> bool {
        match self {
            Script::Latin => c.is_ascii_alphabetic(),
            Script::Devanagari => ('\u{0900}'..='\u{097F}').contains(&c),
        }
    }
}

/// Supported conversation language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "hi")]
    Hindi,
}

impl Language {
    /// ISO 639-1 code (`en` / `hi`)
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
        }
    }

    /// BCP-47 locale tag used for speech platforms
    pub fn locale_tag(&self) -> &'static str {
        match self {
            Language::English => "en-IN",
            Language::Hindi => "hi-IN",
        }
    }

    /// Upper-case tag used in the external backend question prefix
    pub fn backend_tag(&self) -> &'static str {
        match self {
            Language::English => "EN",
            Language::Hindi => "HI",
        }
    }

    /// Parse a language code, locale tag or English name.
    ///
    /// Accepts `en`, `EN`, `en-IN`, `en_GB`, `english`, `hi`, `hi-IN`, `hindi`.
    pub fn from_code(code: &str) -> Option<Self> {
        let lowered = code.trim().to_ascii_lowercase();
        let primary = lowered.split(['-', '_']).next().unwrap_or("");
        match primary {
            "en" | "english" => Some(Language::English),
            "hi" | "hindi" => Some(Language::Hindi),
            _ => None,
        }
    }

    /// Parse a language code, falling back to English when unsupported
    pub fn from_code_or_default(code: &str) -> Self {
        Self::from_code(code).unwrap_or_default()
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
