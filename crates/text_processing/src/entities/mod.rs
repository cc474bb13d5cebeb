//! Entity Extraction
//!
//! Pulls two entities out of free text, independently of intent:
//! - A pH reading: the first numeric token, kept only if it lies in [0, 14]
//! - A crop: the knowledge-base crop whose keyword occurs in the text
//!
//! # pH
//!
//! Only the first number scanned left to right is considered, so
//! "pH 6.5 for 2 acres" yields 6.5 and "2 acres at pH 6.5" yields 2. There is
//! no unit disambiguation. Devanagari digits are normalised first. A leading
//! minus sign is not part of the token, so "pH -2" reads as 2 and a negative
//! reading never reaches validation.
//!
//! # Crop keywords
//!
//! Latin keywords match by case-insensitive substring containment. Devanagari
//! keywords must stand as whole words, so "धान" is not found in "समाधान" and
//! "चना" is not found in "सूचना". When several keywords
//! occur, the longest one wins ("शिमला मिर्च" beats "मिर्च"); equal lengths
//! resolve to the keyword reached first in knowledge-base order.

use agro_advisor_config::constants::ph;
use agro_advisor_core::Language;
use agro_advisor_knowledge::{CropProfile, KnowledgeBase};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::hindi::normalize_digits;

static NUMBER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+(?:\.[0-9]+)?").unwrap());

/// A validated pH value in [0, 14]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhReading(f64);

impl PhReading {
    /// `None` when the value is not a finite number in [0, 14]
    pub fn new(value: f64) -> Option<Self> {
        if ph::is_valid(value) {
            Some(Self(value))
        } else {
            None
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Extract the first numeric token as a pH reading
///
/// # Examples
/// ```
/// use agro_advisor_text_processing::extract_ph;
/// assert_eq!(extract_ph("pH is 6.5 today").map(|p| p.value()), Some(6.5));
/// assert!(extract_ph("pH 14.1").is_none());
/// // the sign is not part of the token
/// assert_eq!(extract_ph("pH -2").map(|p| p.value()), Some(2.0));
/// assert!(extract_ph("no numbers here").is_none());
/// ```
pub fn extract_ph(text: &str) -> Option<PhReading> {
    let text = normalize_digits(text);
    let token = NUMBER_PATTERN.find(&text)?;

    let reading = token.as_str().parse::<f64>().ok().and_then(PhReading::new);
    if reading.is_none() {
        tracing::debug!(token = token.as_str(), "Numeric token rejected as pH");
    }
    reading
}

/// Find the crop mentioned in the text
///
/// Keywords of every language are checked regardless of `language`; a Hindi
/// crop name inside an English sentence still resolves.
pub fn extract_crop<'kb>(
    kb: &'kb KnowledgeBase,
    text: &str,
    language: Language,
) -> Option<&'kb CropProfile> {
    let lowered = text.to_lowercase();

    let mut best: Option<(usize, usize)> = None;
    for entry in kb.keyword_entries() {
        if !entry.occurs_in(&lowered) {
            continue;
        }
        let len = entry.keyword.chars().count();
        match best {
            Some((best_len, _)) if best_len >= len => {},
            _ => best = Some((len, entry.crop_index)),
        }
    }

    let crop = best.and_then(|(_, index)| kb.crops().get(index));
    if let Some(crop) = crop {
        tracing::debug!(crop = %crop.id, language = %language, "Crop extracted");
    }
    crop
}

/// Entities found in one turn
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedEntities {
    pub ph: Option<PhReading>,
    pub crop: Option<CropProfile>,
}

impl ExtractedEntities {
    pub fn has_ph(&self) -> bool {
        self.ph.is_some()
    }

    pub fn has_crop(&self) -> bool {
        self.crop.is_some()
    }
}

/// Entity extractor bound to a knowledge base
#[derive(Debug, Clone)]
pub struct EntityExtractor {
    kb: Arc<KnowledgeBase>,
}

impl EntityExtractor {
    pub fn new(kb: Arc<KnowledgeBase>) -> Self {
        Self { kb }
    }

    pub fn knowledge_base(&self) -> &Arc<KnowledgeBase> {
        &self.kb
    }

    pub fn extract(&self, text: &str, language: Language) -> ExtractedEntities {
        ExtractedEntities {
            ph: extract_ph(text),
            crop: extract_crop(&self.kb, text, language).cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agro_advisor_knowledge::LocalizedText;

    fn value(text: &str) -> Option<f64> {
        extract_ph(text).map(|p| p.value())
    }

    fn crop_id(kb: &KnowledgeBase, text: &str) -> Option<String> {
        extract_crop(kb, text, Language::English).map(|c| c.id.clone())
    }

    #[test]
    fn test_ph_in_sentence() {
        assert_eq!(value("pH is 6.5 today"), Some(6.5));
        assert_eq!(value("ph7"), Some(7.0));
        assert_eq!(value("Is rice ok at pH 7.8?"), Some(7.8));
    }

    #[test]
    fn test_ph_absent_without_number() {
        assert_eq!(value("what is ph"), None);
        assert_eq!(value(""), None);
        assert_eq!(value("मेरा पानी खारा है"), None);
    }

    #[test]
    fn test_ph_out_of_range() {
        assert_eq!(value("14.1"), None);
        assert_eq!(value("pH 15"), None);
        assert_eq!(value("14"), Some(14.0));
        assert_eq!(value("0"), Some(0.0));
    }

    #[test]
    fn test_only_first_number_used() {
        assert_eq!(value("pH 6.5 for 2 acres"), Some(6.5));
        // first token is out of range, later ones are not consulted
        assert_eq!(value("20 acres at pH 6.5"), None);
    }

    #[test]
    fn test_ph_devanagari_digits() {
        assert_eq!(value("मेरा pH ५.५ है"), Some(5.5));
    }

    #[test]
    fn test_ph_reading_bounds() {
        assert!(PhReading::new(-0.1).is_none());
        assert!(PhReading::new(f64::NAN).is_none());
        assert_eq!(PhReading::new(7.0).map(|p| p.value()), Some(7.0));
    }

    #[test]
    fn test_crop_by_synonym() {
        let kb = KnowledgeBase::builtin();
        assert_eq!(crop_id(&kb, "Is PADDY fine at 6?"), Some("rice".into()));
        assert_eq!(crop_id(&kb, "corn at pH 6"), Some("maize".into()));
        assert_eq!(crop_id(&kb, "गेहूं के लिए"), Some("wheat".into()));
        assert_eq!(crop_id(&kb, "tell me about the weather"), None);
    }

    #[test]
    fn test_negative_sign_is_ignored() {
        assert_eq!(value("pH -2"), Some(2.0));
        assert_eq!(value("pH -0.5"), Some(0.5));
    }

    #[test]
    fn test_hindi_words_containing_crop_names() {
        let kb = KnowledgeBase::builtin();
        let hindi = |text: &str| extract_crop(&kb, text, Language::Hindi).map(|c| c.id.clone());

        assert_eq!(hindi("pH 6.5 पर कौन सी आम फसलें अच्छी हैं?"), None);
        assert_eq!(hindi("मेरा pH 5 है, इसका समाधान बताइए"), None);
        assert_eq!(hindi("pH 8 की सूचना दीजिए"), None);
        assert_eq!(hindi("pH 6 पर किससे बचना चाहिए?"), None);
    }

    #[test]
    fn test_hindi_crop_names_as_words() {
        let kb = KnowledgeBase::builtin();
        let hindi = |text: &str| extract_crop(&kb, text, Language::Hindi).map(|c| c.id.clone());

        assert_eq!(hindi("धान के लिए pH 7.8 ठीक है?"), Some("rice".into()));
        assert_eq!(hindi("pH 6 पर चना?"), Some("pulses".into()));
        assert_eq!(hindi("क्या pH 7 पर दालें उगेंगी"), Some("pulses".into()));
        assert_eq!(hindi("आम के पेड़ के लिए pH 6.5"), Some("mango".into()));
    }

    #[test]
    fn test_longest_keyword_wins() {
        let kb = KnowledgeBase::builtin();
        assert_eq!(crop_id(&kb, "शिमला मिर्च उगाना है"), Some("capsicum".into()));
        assert_eq!(crop_id(&kb, "मिर्च उगाना है"), Some("chilli".into()));
    }

    #[test]
    fn test_equal_length_ties_follow_kb_order() {
        let profile = |id: &str, keyword: &str| CropProfile {
            id: id.to_string(),
            names: LocalizedText::english_only(id),
            ph_min: 6.0,
            ph_max: 7.0,
            note: LocalizedText::english_only(""),
            keywords: vec![keyword.to_string()],
        };
        let kb = KnowledgeBase::new(vec![profile("oats", "oats"), profile("rice", "rice")])
            .unwrap();

        assert_eq!(crop_id(&kb, "rice or oats?"), Some("oats".into()));
    }

    #[test]
    fn test_extractor_collects_both() {
        let extractor = EntityExtractor::new(Arc::new(KnowledgeBase::builtin()));
        let entities = extractor.extract("Is wheat ok at pH 5.5?", Language::English);

        assert!(entities.has_ph());
        assert_eq!(entities.crop.map(|c| c.id), Some("wheat".to_string()));

        let entities = extractor.extract("hello", Language::English);
        assert_eq!(entities, ExtractedEntities::default());
    }
}
