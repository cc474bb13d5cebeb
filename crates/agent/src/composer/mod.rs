//! Deterministic reply composer
//!
//! Maps a classified turn to reply text. Every combination of intent and
//! missing entities yields a reply; the composer never fails and never
//! consults anything but the knowledge base.
//!
//! | Intent          | pH      | crop    | Reply                         |
//! |-----------------|---------|---------|-------------------------------|
//! | `CropPhQuery`   | yes     | yes     | crop evaluation               |
//! | `CropPhQuery`   | no      | yes     | crop lookup                   |
//! | `CropPhQuery`   | any     | no      | ask for crop                  |
//! | `CropLookup`    | any     | yes/no  | crop lookup / ask for crop    |
//! | `BestCropForPh` | yes/no  | any     | recommendation / ask for pH   |
//! | `GenericPh`     | yes/no  | any     | band + amendment / pH explain |
//! | others          | any     | any     | fixed advisory block          |

pub mod bands;
pub mod templates;

use std::sync::Arc;

use agro_advisor_core::Language;
use agro_advisor_knowledge::{AdvisoryTopic, CropProfile, KnowledgeBase};
use agro_advisor_text_processing::{IntentCategory, PhReading};

pub use bands::{Amendment, PhBand, Recommendation, Suitability};

#[derive(Clone)]
pub struct ResponseComposer {
    kb: Arc<KnowledgeBase>,
}

impl ResponseComposer {
    pub fn new(kb: Arc<KnowledgeBase>) -> Self {
        Self { kb }
    }

    pub fn knowledge_base(&self) -> &Arc<KnowledgeBase> {
        &self.kb
    }

    pub fn compose(
        &self,
        intent: IntentCategory,
        ph: Option<PhReading>,
        crop: Option<&CropProfile>,
        language: Language,
    ) -> String {
        match intent {
            IntentCategory::CropPhQuery => match (crop, ph) {
                (Some(crop), Some(ph)) => self.crop_evaluation(crop, ph.value(), language),
                (Some(crop), None) => self.crop_lookup(crop, language),
                (None, _) => self.advisory(AdvisoryTopic::AskForCrop, language),
            },
            IntentCategory::CropLookup => match crop {
                Some(crop) => self.crop_lookup(crop, language),
                None => self.advisory(AdvisoryTopic::AskForCrop, language),
            },
            IntentCategory::BestCropForPh => match ph {
                Some(ph) => self.recommendation(ph.value(), language),
                None => self.advisory(AdvisoryTopic::AskForPh, language),
            },
            IntentCategory::GenericPh => match ph {
                Some(ph) => self.generic_ph(ph.value(), language),
                None => self.advisory(AdvisoryTopic::PhExplain, language),
            },
            IntentCategory::Greeting => self.advisory(AdvisoryTopic::Greeting, language),
            IntentCategory::SiteHelp => self.advisory(AdvisoryTopic::SiteHelp, language),
            IntentCategory::SavedReadingHelp => {
                self.advisory(AdvisoryTopic::SavedReadingHelp, language)
            },
            IntentCategory::Irrigation => self.advisory(AdvisoryTopic::Irrigation, language),
            IntentCategory::Fertiliser => self.advisory(AdvisoryTopic::Fertiliser, language),
            IntentCategory::WaterProtection => {
                self.advisory(AdvisoryTopic::WaterProtection, language)
            },
            IntentCategory::ChartHelp => self.advisory(AdvisoryTopic::ChartHelp, language),
            IntentCategory::PhExplain => self.advisory(AdvisoryTopic::PhExplain, language),
            IntentCategory::HelpMenu => self.advisory(AdvisoryTopic::HelpMenu, language),
            IntentCategory::Fallback => self.advisory(AdvisoryTopic::Fallback, language),
        }
    }

    pub fn advisory(&self, topic: AdvisoryTopic, language: Language) -> String {
        self.kb.advisory(topic, language).to_string()
    }

    /// Band description plus amendment advice for a bare reading
    pub fn generic_ph(&self, value: f64, language: Language) -> String {
        templates::generic_ph(value, PhBand::of(value), Amendment::for_ph(value), language)
    }

    /// Strong and caution crop lists for a reading
    pub fn recommendation(&self, value: f64, language: Language) -> String {
        let groups = Recommendation::for_ph(self.kb.crops(), value);

        let mut reply = templates::recommendation_header(value, PhBand::of(value), language);
        if groups.strong.is_empty() {
            reply.push_str(templates::few_matches(language));
        } else {
            let names = display_names(&groups.strong, language);
            reply.push_str(&templates::strong_matches(&names, language));
        }
        if !groups.caution.is_empty() {
            let names = display_names(&groups.caution, language);
            reply.push_str(&templates::caution_matches(&names, language));
        }
        reply.push_str(templates::local_advice_footer(language));
        reply
    }

    /// Range and note for a crop, followed by a verdict for the reading
    pub fn crop_evaluation(&self, crop: &CropProfile, value: f64, language: Language) -> String {
        let mut reply = self.crop_opening(crop, language);
        reply.push_str(&templates::crop_verdict(
            Suitability::evaluate(crop, value),
            value,
            language,
        ));
        reply
    }

    /// Range and note for a crop, asking for a reading
    pub fn crop_lookup(&self, crop: &CropProfile, language: Language) -> String {
        let mut reply = self.crop_opening(crop, language);
        reply.push_str(templates::crop_lookup_prompt(language));
        reply
    }

    fn crop_opening(&self, crop: &CropProfile, language: Language) -> String {
        templates::crop_opening(
            crop.display_name(language),
            crop.ph_min,
            crop.ph_max,
            crop.note(language),
            language,
        )
    }
}

fn display_names(crops: &[&CropProfile], language: Language) -> String {
    let names: Vec<String> = crops
        .iter()
        .map(|crop| templates::capitalize(crop.display_name(language)))
        .collect();
    let names: Vec<&str> = names.iter().map(String::as_str).collect();
    templates::join_names(&names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use agro_advisor_knowledge::LocalizedText;

    fn composer() -> ResponseComposer {
        ResponseComposer::new(Arc::new(KnowledgeBase::builtin()))
    }

    fn small_composer() -> ResponseComposer {
        let crop = |id: &str, min: f64, max: f64| CropProfile {
            id: id.to_string(),
            names: LocalizedText::english_only(id),
            ph_min: min,
            ph_max: max,
            note: LocalizedText::english_only(""),
            keywords: vec![id.to_string()],
        };
        let kb = KnowledgeBase::new(vec![crop("wheat", 6.0, 7.5), crop("potato", 5.2, 6.5)])
            .unwrap();
        ResponseComposer::new(Arc::new(kb))
    }

    fn reading(value: f64) -> Option<PhReading> {
        PhReading::new(value)
    }

    #[test]
    fn test_rice_too_alkaline() {
        let composer = composer();
        let kb = composer.knowledge_base().clone();
        let rice = kb.crop("rice");
        assert!(rice.is_some());

        let reply = composer.compose(
            IntentCategory::CropPhQuery,
            reading(7.8),
            rice,
            Language::English,
        );
        assert!(reply.starts_with("Rice prefers pH about 5.5 to 7.0."));
        assert!(reply.contains("Your pH 7.80 is more alkaline than ideal"));
    }

    #[test]
    fn test_margin_boundary() {
        let composer = composer();
        let kb = composer.knowledge_base().clone();
        let wheat = kb.crop("wheat");

        let inside = composer.compose(
            IntentCategory::CropPhQuery,
            reading(5.71),
            wheat,
            Language::English,
        );
        assert!(inside.contains("inside or close to the good range"));

        let outside = composer.compose(
            IntentCategory::CropPhQuery,
            reading(5.69),
            wheat,
            Language::English,
        );
        assert!(outside.contains("more acidic than its comfort zone"));
    }

    #[test]
    fn test_recommendation_lists_both_boundary_matches() {
        let reply = small_composer().compose(
            IntentCategory::BestCropForPh,
            reading(6.5),
            None,
            Language::English,
        );
        assert!(reply.starts_with("At pH 6.50, water/soil is near neutral"));
        assert!(reply.contains("Crops that usually match this pH well: Wheat, Potato.\n"));
        assert!(!reply.contains("These crops may still grow"));
        assert!(reply.ends_with("local agriculture-department advice."));
    }

    #[test]
    fn test_recommendation_without_strong_match() {
        let reply = small_composer().compose(
            IntentCategory::BestCropForPh,
            reading(4.8),
            None,
            Language::English,
        );
        assert!(reply.contains("Few common crops match this pH well"));
        assert!(!reply.contains("Wheat"));
        assert!(reply.contains("need variety choice or careful management: Potato."));
    }

    #[test]
    fn test_missing_entities_fall_back() {
        let composer = composer();
        let kb = composer.knowledge_base().clone();

        let reply = composer.compose(IntentCategory::CropPhQuery, reading(6.0), None, Language::English);
        assert_eq!(reply, kb.advisory(AdvisoryTopic::AskForCrop, Language::English));

        let reply = composer.compose(IntentCategory::CropLookup, None, None, Language::Hindi);
        assert_eq!(reply, kb.advisory(AdvisoryTopic::AskForCrop, Language::Hindi));

        let reply = composer.compose(IntentCategory::BestCropForPh, None, None, Language::English);
        assert_eq!(reply, kb.advisory(AdvisoryTopic::AskForPh, Language::English));

        let reply = composer.compose(IntentCategory::GenericPh, None, None, Language::English);
        assert_eq!(reply, kb.advisory(AdvisoryTopic::PhExplain, Language::English));

        let reply = composer.compose(IntentCategory::CropPhQuery, None, kb.crop("maize"), Language::English);
        assert!(reply.ends_with("Tell me your water pH and I will check whether it fits."));
    }

    #[test]
    fn test_generic_ph_amendments() {
        let composer = composer();

        let acidic = composer.compose(IntentCategory::GenericPh, reading(4.5), None, Language::English);
        assert!(acidic.starts_with("Your pH value 4.50 is strongly acidic"));
        assert!(acidic.contains("To raise pH"));

        let alkaline = composer.compose(IntentCategory::GenericPh, reading(8.6), None, Language::English);
        assert!(alkaline.contains("strongly alkaline"));
        assert!(alkaline.contains("To reduce alkalinity"));

        let neutral = composer.compose(IntentCategory::GenericPh, reading(7.5), None, Language::English);
        assert!(neutral.contains("slightly to moderately alkaline"));
        assert!(neutral.contains("already suitable for many crops"));
    }

    #[test]
    fn test_hindi_reply_uses_hindi_names() {
        let composer = composer();
        let kb = composer.knowledge_base().clone();
        let rice = kb.crop("rice");

        let reply = composer.compose(IntentCategory::CropPhQuery, reading(7.8), rice, Language::Hindi);
        assert!(reply.starts_with(kb.crop("rice").map(|c| c.display_name(Language::Hindi)).unwrap_or("")));
        assert!(reply.contains("क्षारीय"));
    }

    #[test]
    fn test_fallback_is_deterministic() {
        let composer = composer();
        let first = composer.compose(IntentCategory::Fallback, None, None, Language::English);
        let second = composer.compose(IntentCategory::Fallback, None, None, Language::English);
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }
}
