//! Script-based language detection

use agro_advisor_core::{Language, Script};

/// Language of a turn
///
/// Any Devanagari character makes the turn Hindi; otherwise the caller's
/// selected language applies. Mixed text such as "pH 6.5 पर धान" is Hindi.
pub fn detect_language(text: &str, selected: Language) -> Language {
    if text.chars().any(|c| Script::Devanagari.contains(c)) {
        Language::Hindi
    } else {
        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_devanagari_is_hindi() {
        assert_eq!(
            detect_language("pH 6.5 पर कौन सी फसल", Language::English),
            Language::Hindi
        );
        assert_eq!(detect_language("सिंचाई", Language::English), Language::Hindi);
    }

    #[test]
    fn test_latin_keeps_selection() {
        assert_eq!(detect_language("pH 6.5", Language::English), Language::English);
        assert_eq!(detect_language("pH 6.5", Language::Hindi), Language::Hindi);
    }
}
