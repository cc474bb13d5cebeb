//! Intent Classification
//!
//! Maps a turn's text to exactly one [`IntentCategory`] using an ordered list
//! of rules. Rules are evaluated top to bottom and the first match wins; later
//! rules are never consulted. Topical intents come first, so
//! "irrigation tips at pH 9" is `Irrigation`, never `GenericPh`.
//!
//! Markers are checked in English and Hindi regardless of the turn language.
//! Latin markers match at a word start ("help" also matches "helper");
//! greeting markers must be whole words so "which" is not read as "hi".
//! Devanagari markers match as plain substrings.
//!
//! # Example
//!
//! ```
//! use agro_advisor_text_processing::intent::{IntentCategory, IntentClassifier};
//!
//! let classifier = IntentClassifier::new();
//! assert_eq!(
//!     classifier.classify("irrigation tips at pH 9", true, false),
//!     IntentCategory::Irrigation
//! );
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Intent categories, mutually exclusive per turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentCategory {
    Greeting,
    SiteHelp,
    SavedReadingHelp,
    Irrigation,
    Fertiliser,
    WaterProtection,
    ChartHelp,
    /// Crop and pH both present
    CropPhQuery,
    /// Crop present, no pH
    CropLookup,
    /// "Which crop" phrasing; normally with a pH, see the final rule
    BestCropForPh,
    /// pH keyword and value, no crop, no "which crop" phrasing
    GenericPh,
    /// pH keyword without a value
    PhExplain,
    HelpMenu,
    Fallback,
}

impl IntentCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntentCategory::Greeting => "greeting",
            IntentCategory::SiteHelp => "site_help",
            IntentCategory::SavedReadingHelp => "saved_reading_help",
            IntentCategory::Irrigation => "irrigation",
            IntentCategory::Fertiliser => "fertiliser",
            IntentCategory::WaterProtection => "water_protection",
            IntentCategory::ChartHelp => "chart_help",
            IntentCategory::CropPhQuery => "crop_ph_query",
            IntentCategory::CropLookup => "crop_lookup",
            IntentCategory::BestCropForPh => "best_crop_for_ph",
            IntentCategory::GenericPh => "generic_ph",
            IntentCategory::PhExplain => "ph_explain",
            IntentCategory::HelpMenu => "help_menu",
            IntentCategory::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for IntentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build a case-insensitive alternation over marker phrases
///
/// `whole_word` closes Latin markers with `\b` on both sides; otherwise only
/// the start is anchored to a word boundary.
fn marker_regex(latin: &[&str], devanagari: &[&str], whole_word: bool) -> Regex {
    let suffix = if whole_word { r"\b" } else { "" };
    let alternatives: Vec<String> = latin
        .iter()
        .map(|m| format!(r"\b{}{}", regex::escape(m), suffix))
        .chain(devanagari.iter().map(|m| regex::escape(m)))
        .collect();

    Regex::new(&format!("(?i)(?:{})", alternatives.join("|"))).unwrap()
}

static GREETING: Lazy<Regex> = Lazy::new(|| {
    marker_regex(
        &["hello", "hi", "hey", "namaste", "namaskar"],
        &["नमस्ते", "नमस्कार", "प्रणाम", "हेलो"],
        true,
    )
});

static SITE: Lazy<Regex> = Lazy::new(|| {
    marker_regex(
        &["website", "this site", "water health index"],
        &["वेबसाइट", "साइट"],
        false,
    )
});

static SAVED_READING: Lazy<Regex> = Lazy::new(|| {
    marker_regex(
        &["saved reading", "latest reading", "measure page"],
        &["सेव की गई रीडिंग", "सेव रीडिंग", "सहेजी गई रीडिंग", "मेज़र पेज", "मेजर पेज"],
        false,
    )
});

static IRRIGATION: Lazy<Regex> = Lazy::new(|| {
    marker_regex(
        &["irrigation", "irrigate", "watering", "drip", "sprinkler"],
        &["सिंचाई", "पानी देना", "पानी दें"],
        false,
    )
});

static FERTILISER: Lazy<Regex> = Lazy::new(|| {
    marker_regex(
        &["fertiliser", "fertilizer", "npk", "manure", "urea"],
        &["खाद", "उर्वरक", "यूरिया"],
        false,
    )
});

static WATER_PROTECTION: Lazy<Regex> = Lazy::new(|| {
    marker_regex(
        &[
            "protect water",
            "save water",
            "water protection",
            "conservation",
            "pollution",
            "care page",
        ],
        &["पानी बचा", "जल संरक्षण", "प्रदूषण", "पानी की रक्षा"],
        false,
    )
});

static CHART: Lazy<Regex> =
    Lazy::new(|| marker_regex(&["chart", "graph"], &["चार्ट", "ग्राफ"], false));

static WHICH_CROP: Lazy<Regex> = Lazy::new(|| {
    marker_regex(
        &["which crop", "what crop", "best crop", "suitable crop"],
        &["कौन सी फसल", "कौनसी फसल", "कौन-सी फसल", "सबसे अच्छी फसल"],
        false,
    )
});

static HELP: Lazy<Regex> = Lazy::new(|| {
    marker_regex(
        &["help", "what can you do"],
        &["मदद", "सहायता", "क्या कर सकते"],
        false,
    )
});

/// "ph" as a word of its own or glued to a number ("ph7"); not "graph"
static PH_KEYWORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bph(?:\b|[0-9])|पीएच").unwrap());

/// Condition a rule tests
#[derive(Debug, Clone)]
pub enum Predicate {
    /// Any marker phrase occurs in the text
    Markers(&'static Regex),
    /// A crop and a pH value were extracted
    CropAndPh,
    /// "Which crop" phrasing and a pH value
    WhichCropAndPh,
    /// A crop was extracted
    Crop,
    /// The pH keyword and a pH value
    PhKeywordAndValue,
    /// The pH keyword alone
    PhKeyword,
    /// "Which crop" phrasing alone
    WhichCrop,
}

impl Predicate {
    fn matches(&self, text: &str, has_ph: bool, has_crop: bool) -> bool {
        match self {
            Predicate::Markers(regex) => regex.is_match(text),
            Predicate::CropAndPh => has_crop && has_ph,
            Predicate::WhichCropAndPh => has_ph && WHICH_CROP.is_match(text),
            Predicate::Crop => has_crop,
            Predicate::PhKeywordAndValue => has_ph && PH_KEYWORD.is_match(text),
            Predicate::PhKeyword => PH_KEYWORD.is_match(text),
            Predicate::WhichCrop => WHICH_CROP.is_match(text),
        }
    }
}

/// One `(predicate, category)` pair
#[derive(Debug, Clone)]
pub struct IntentRule {
    pub category: IntentCategory,
    pub predicate: Predicate,
}

impl IntentRule {
    fn new(category: IntentCategory, predicate: Predicate) -> Self {
        Self {
            category,
            predicate,
        }
    }
}

/// Ordered, first-match-wins classifier
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    rules: Vec<IntentRule>,
}

impl IntentClassifier {
    pub fn new() -> Self {
        use IntentCategory::*;

        let rules = vec![
            IntentRule::new(Greeting, Predicate::Markers(&*GREETING)),
            IntentRule::new(SiteHelp, Predicate::Markers(&*SITE)),
            IntentRule::new(SavedReadingHelp, Predicate::Markers(&*SAVED_READING)),
            IntentRule::new(Irrigation, Predicate::Markers(&*IRRIGATION)),
            IntentRule::new(Fertiliser, Predicate::Markers(&*FERTILISER)),
            IntentRule::new(WaterProtection, Predicate::Markers(&*WATER_PROTECTION)),
            IntentRule::new(ChartHelp, Predicate::Markers(&*CHART)),
            IntentRule::new(CropPhQuery, Predicate::CropAndPh),
            IntentRule::new(BestCropForPh, Predicate::WhichCropAndPh),
            IntentRule::new(CropLookup, Predicate::Crop),
            IntentRule::new(GenericPh, Predicate::PhKeywordAndValue),
            IntentRule::new(PhExplain, Predicate::PhKeyword),
            IntentRule::new(HelpMenu, Predicate::Markers(&*HELP)),
            // "which crop?" without a value: the composer asks for the pH
            IntentRule::new(BestCropForPh, Predicate::WhichCrop),
        ];

        Self { rules }
    }

    pub fn rules(&self) -> &[IntentRule] {
        &self.rules
    }

    /// Classify one turn; `Fallback` when no rule matches
    pub fn classify(&self, text: &str, has_ph: bool, has_crop: bool) -> IntentCategory {
        let category = self
            .rules
            .iter()
            .find(|rule| rule.predicate.matches(text, has_ph, has_crop))
            .map(|rule| rule.category)
            .unwrap_or(IntentCategory::Fallback);

        tracing::debug!(%category, has_ph, has_crop, "Intent classified");
        category
    }
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}
