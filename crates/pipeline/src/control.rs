//! UI control states

use agro_advisor_core::Language;
use serde::{Deserialize, Serialize};

/// Enabled flag plus the label or tooltip shown on a control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlState {
    pub enabled: bool,
    pub label: String,
}

impl ControlState {
    pub fn enabled(label: impl Into<String>) -> Self {
        Self {
            enabled: true,
            label: label.into(),
        }
    }

    pub fn disabled(label: impl Into<String>) -> Self {
        Self {
            enabled: false,
            label: label.into(),
        }
    }

    /// Voice input button
    pub fn voice_input(available: bool, listening: bool, language: Language) -> Self {
        match (available, listening, language) {
            (false, _, Language::English) => {
                Self::disabled("Voice recognition not supported in this browser")
            },
            (false, _, Language::Hindi) => {
                Self::disabled("इस ब्राउज़र में आवाज़ पहचान उपलब्ध नहीं है")
            },
            (true, true, Language::English) => Self::enabled("Listening..."),
            (true, true, Language::Hindi) => Self::enabled("सुन रहा हूँ..."),
            (true, false, Language::English) => Self::enabled("Speak your question"),
            (true, false, Language::Hindi) => Self::enabled("अपना सवाल बोलें"),
        }
    }

    /// Stop-voice button
    pub fn stop_voice(available: bool, language: Language) -> Self {
        match (available, language) {
            (false, Language::English) => {
                Self::disabled("Voice output not supported in this browser")
            },
            (false, Language::Hindi) => Self::disabled("इस ब्राउज़र में आवाज़ आउटपुट उपलब्ध नहीं है"),
            (true, Language::English) => Self::enabled("Stop voice"),
            (true, Language::Hindi) => Self::enabled("आवाज़ रोकें"),
        }
    }
}
