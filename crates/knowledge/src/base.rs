//! The assembled, validated knowledge base

use std::collections::HashMap;
use std::path::Path;

use agro_advisor_core::{Language, Script};

use crate::advisory::{builtin_advisories, AdvisoryTopic};
use crate::crops::{builtin_crops, CropProfile};
use crate::loader::KnowledgeFile;
use crate::quick::{builtin_quick_questions, QuickQuestion, QuickQuestionView};
use crate::text::LocalizedText;
use crate::{KnowledgeError, Result};

/// One keyword in scan order, pointing at the crop that owns it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordEntry {
    /// Lower-cased surface form
    pub keyword: String,
    /// Index into [`KnowledgeBase::crops`]
    pub crop_index: usize,
    /// Devanagari keywords only match a whole word; "धान" is not found
    /// inside "समाधान"
    pub whole_word: bool,
}

impl KeywordEntry {
    fn new(keyword: &str, crop_index: usize) -> Self {
        let keyword = keyword.to_lowercase();
        let whole_word = keyword.chars().any(|c| Script::Devanagari.contains(c));
        Self {
            keyword,
            crop_index,
            whole_word,
        }
    }

    /// Whether the keyword occurs in already lower-cased text
    pub fn occurs_in(&self, lowered: &str) -> bool {
        if !self.whole_word {
            return lowered.contains(self.keyword.as_str());
        }

        lowered.match_indices(self.keyword.as_str()).any(|(start, matched)| {
            let before = lowered[..start].chars().next_back();
            let after = lowered[start + matched.len()..].chars().next();
            !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
        })
    }
}

/// Letters, digits and Devanagari vowel signs belong to a word; spaces,
/// punctuation and the danda do not
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric()
        || matches!(c,
            '\u{0900}'..='\u{0903}'
            | '\u{093A}'..='\u{094F}'
            | '\u{0951}'..='\u{0957}'
            | '\u{0962}'..='\u{0963}')
}

/// Read-only agronomy tables
///
/// Crops keep their enumeration order; keyword entries are listed crop by
/// crop in that order, each crop's keywords in declaration order. This order
/// is the final tie-break for crop extraction.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    crops: Vec<CropProfile>,
    keywords: Vec<KeywordEntry>,
    advisories: HashMap<AdvisoryTopic, LocalizedText>,
    quick_questions: Vec<QuickQuestion>,
}

impl KnowledgeBase {
    /// Built-in tables
    pub fn builtin() -> Self {
        let crops = builtin_crops();
        let keywords = index_keywords(&crops);
        Self {
            crops,
            keywords,
            advisories: builtin_advisories(),
            quick_questions: builtin_quick_questions(),
        }
    }

    /// Built-in advisory texts with a custom crop table
    pub fn new(crops: Vec<CropProfile>) -> Result<Self> {
        Self::assemble(crops, builtin_advisories(), builtin_quick_questions())
    }

    /// Built-in tables overlaid with a knowledge file
    pub fn from_file(file: KnowledgeFile) -> Result<Self> {
        let crops = file.crops.unwrap_or_else(builtin_crops);

        let mut advisories = builtin_advisories();
        advisories.extend(file.advisories);

        let quick_questions = file.quick_questions.unwrap_or_else(builtin_quick_questions);

        Self::assemble(crops, advisories, quick_questions)
    }

    /// Load from a YAML path, or fall back to the built-in tables
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => {
                let kb = Self::from_file(KnowledgeFile::load(Path::new(path))?)?;
                tracing::info!(path, crops = kb.crops.len(), "Knowledge base loaded");
                Ok(kb)
            },
            None => {
                tracing::debug!("Using built-in knowledge base");
                Ok(Self::builtin())
            },
        }
    }

    fn assemble(
        mut crops: Vec<CropProfile>,
        advisories: HashMap<AdvisoryTopic, LocalizedText>,
        quick_questions: Vec<QuickQuestion>,
    ) -> Result<Self> {
        let mut ids: Vec<&str> = Vec::with_capacity(crops.len());
        for crop in crops.iter_mut() {
            crop.validate()?;
        }
        for crop in &crops {
            if ids.contains(&crop.id.as_str()) {
                return Err(KnowledgeError::DuplicateCrop(crop.id.clone()));
            }
            ids.push(crop.id.as_str());
        }

        let mut owners: HashMap<&str, &str> = HashMap::new();
        for crop in &crops {
            for keyword in &crop.keywords {
                if let Some(first) = owners.insert(keyword.as_str(), crop.id.as_str()) {
                    return Err(KnowledgeError::SharedKeyword {
                        keyword: keyword.clone(),
                        first: first.to_string(),
                        second: crop.id.clone(),
                    });
                }
            }
        }

        let keywords = index_keywords(&crops);
        Ok(Self {
            crops,
            keywords,
            advisories,
            quick_questions,
        })
    }

    /// Crops in enumeration order
    pub fn crops(&self) -> &[CropProfile] {
        &self.crops
    }

    pub fn crop(&self, id: &str) -> Option<&CropProfile> {
        self.crops.iter().find(|c| c.id == id)
    }

    pub fn keyword_entries(&self) -> &[KeywordEntry] {
        &self.keywords
    }

    /// Fixed text for a topic; languages without a rendering get English
    pub fn advisory(&self, topic: AdvisoryTopic, language: Language) -> &str {
        self.advisories
            .get(&topic)
            .map(|text| text.get(language))
            .unwrap_or_default()
    }

    pub fn quick_questions(&self) -> &[QuickQuestion] {
        &self.quick_questions
    }

    pub fn quick_question_views(&self, language: Language) -> Vec<QuickQuestionView> {
        self.quick_questions
            .iter()
            .enumerate()
            .map(|(i, q)| q.view(i, language))
            .collect()
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::builtin()
    }
}

fn index_keywords(crops: &[CropProfile]) -> Vec<KeywordEntry> {
    crops
        .iter()
        .enumerate()
        .flat_map(|(crop_index, crop)| {
            crop.keywords
                .iter()
                .map(move |keyword| KeywordEntry::new(keyword, crop_index))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(id: &str, range: (f64, f64), keywords: &[&str]) -> CropProfile {
        CropProfile {
            id: id.to_string(),
            names: LocalizedText::english_only(id),
            ph_min: range.0,
            ph_max: range.1,
            note: LocalizedText::english_only(""),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    #[test]
    fn test_builtin_passes_validation() {
        let kb = KnowledgeBase::new(builtin_crops()).unwrap();
        assert_eq!(kb.crops().len(), 15);
        assert_eq!(kb.keyword_entries(), KnowledgeBase::builtin().keyword_entries());
    }

    #[test]
    fn test_keyword_entries_follow_enumeration_order() {
        let kb = KnowledgeBase::new(vec![
            profile("wheat", (6.0, 7.5), &["Wheat", "गेहूं"]),
            profile("potato", (5.2, 6.5), &["potato"]),
        ])
        .unwrap();

        let entries: Vec<(&str, usize)> = kb
            .keyword_entries()
            .iter()
            .map(|e| (e.keyword.as_str(), e.crop_index))
            .collect();
        assert_eq!(entries, vec![("wheat", 0), ("गेहूं", 0), ("potato", 1)]);
    }

    #[test]
    fn test_devanagari_keywords_match_whole_words() {
        let entry = KeywordEntry::new("धान", 0);
        assert!(entry.whole_word);
        assert!(entry.occurs_in("धान की खेती"));
        assert!(entry.occurs_in("pH 6 पर धान।"));
        assert!(entry.occurs_in("धान"));
        assert!(!entry.occurs_in("इसका समाधान बताइए"));

        let entry = KeywordEntry::new("चना", 0);
        assert!(!entry.occurs_in("pH 8 की सूचना दीजिए"));
        assert!(!entry.occurs_in("किससे बचना चाहिए?"));
        assert!(entry.occurs_in("चना, मसूर"));
    }

    #[test]
    fn test_latin_keywords_match_substrings() {
        let entry = KeywordEntry::new("Paddy", 0);
        assert!(!entry.whole_word);
        assert!(entry.occurs_in("paddy fields"));
        assert!(entry.occurs_in("paddyland"));
    }

    #[test]
    fn test_duplicate_crop_rejected() {
        let result = KnowledgeBase::new(vec![
            profile("rice", (5.5, 7.0), &["rice"]),
            profile("rice", (5.5, 7.0), &["paddy"]),
        ]);
        assert!(matches!(result, Err(KnowledgeError::DuplicateCrop(id)) if id == "rice"));
    }

    #[test]
    fn test_shared_keyword_rejected() {
        let result = KnowledgeBase::new(vec![
            profile("chilli", (6.0, 7.0), &["pepper"]),
            profile("capsicum", (6.0, 7.0), &["Pepper"]),
        ]);
        match result {
            Err(KnowledgeError::SharedKeyword {
                keyword,
                first,
                second,
            }) => {
                assert_eq!(keyword, "pepper");
                assert_eq!(first, "chilli");
                assert_eq!(second, "capsicum");
            },
            other => panic!("unexpected: {:?}", other.map(|kb| kb.crops().len())),
        }
    }

    #[test]
    fn test_advisory_lookup() {
        let kb = KnowledgeBase::builtin();
        assert!(kb
            .advisory(AdvisoryTopic::Irrigation, Language::English)
            .starts_with("Irrigation tips"));
        assert!(kb
            .advisory(AdvisoryTopic::Irrigation, Language::Hindi)
            .starts_with("सिंचाई"));
    }

    #[test]
    fn test_file_overrides_single_topic() {
        let file = KnowledgeFile::from_yaml_str(
            "advisories:\n  irrigation: { en: \"Use drip.\" }\n",
        )
        .unwrap();
        let kb = KnowledgeBase::from_file(file).unwrap();

        assert_eq!(kb.advisory(AdvisoryTopic::Irrigation, Language::English), "Use drip.");
        // no Hindi rendering in the override
        assert_eq!(kb.advisory(AdvisoryTopic::Irrigation, Language::Hindi), "Use drip.");
        assert!(kb
            .advisory(AdvisoryTopic::Fertiliser, Language::English)
            .starts_with("Fertiliser basics"));
        assert_eq!(kb.crops().len(), 15);
    }

    #[test]
    fn test_load_without_path_is_builtin() {
        let kb = KnowledgeBase::load(None).unwrap();
        assert!(kb.crop("potato").is_some());
        assert_eq!(kb.quick_question_views(Language::English).len(), 6);
    }
}
