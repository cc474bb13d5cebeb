//! Crop profiles and the built-in crop table

use agro_advisor_config::constants::ph;
use agro_advisor_core::Language;
use serde::{Deserialize, Serialize};

use crate::text::LocalizedText;
use crate::KnowledgeError;

/// A crop and its comfortable pH range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropProfile {
    /// Canonical key, unique across the knowledge base
    pub id: String,
    /// Display name per language
    pub names: LocalizedText,
    /// Lower bound of the comfortable range (inclusive)
    pub ph_min: f64,
    /// Upper bound of the comfortable range (inclusive)
    pub ph_max: f64,
    /// Short growing note per language
    pub note: LocalizedText,
    /// Surface strings, any language, that resolve to this crop.
    /// Matched case-insensitively as substrings of the input.
    pub keywords: Vec<String>,
}

impl CropProfile {
    pub fn display_name(&self, language: Language) -> &str {
        self.names.get(language)
    }

    pub fn note(&self, language: Language) -> &str {
        self.note.get(language)
    }

    /// Reading lies within `[ph_min, ph_max]`
    pub fn contains(&self, value: f64) -> bool {
        value >= self.ph_min && value <= self.ph_max
    }

    /// Reading lies within `[ph_min - margin, ph_max + margin]`
    pub fn contains_with_margin(&self, value: f64, margin: f64) -> bool {
        value >= self.ph_min - margin && value <= self.ph_max + margin
    }

    /// Check range bounds and keywords; lower-cases keywords in place
    pub(crate) fn validate(&mut self) -> Result<(), KnowledgeError> {
        let invalid = |message: String| KnowledgeError::InvalidCrop {
            crop: self.id.clone(),
            message,
        };

        if self.id.trim().is_empty() {
            return Err(invalid("id cannot be empty".to_string()));
        }
        if !ph::is_valid(self.ph_min) || !ph::is_valid(self.ph_max) {
            return Err(invalid(format!(
                "pH range {}-{} outside {}-{}",
                self.ph_min,
                self.ph_max,
                ph::MIN,
                ph::MAX
            )));
        }
        if self.ph_min > self.ph_max {
            return Err(invalid(format!(
                "ph_min {} greater than ph_max {}",
                self.ph_min, self.ph_max
            )));
        }

        let mut keywords: Vec<String> = Vec::with_capacity(self.keywords.len());
        for keyword in &self.keywords {
            let keyword = keyword.trim().to_lowercase();
            if keyword.is_empty() {
                return Err(invalid("empty keyword".to_string()));
            }
            if !keywords.contains(&keyword) {
                keywords.push(keyword);
            }
        }
        if keywords.is_empty() {
            return Err(invalid("at least one keyword is required".to_string()));
        }
        self.keywords = keywords;

        Ok(())
    }
}

fn crop(
    id: &str,
    names: (&str, &str),
    range: (f64, f64),
    note: (&str, &str),
    keywords: &[&str],
) -> CropProfile {
    CropProfile {
        id: id.to_string(),
        names: LocalizedText::new(names.0, names.1),
        ph_min: range.0,
        ph_max: range.1,
        note: LocalizedText::new(note.0, note.1),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
    }
}

/// Built-in crop table, in enumeration order
pub fn builtin_crops() -> Vec<CropProfile> {
    vec![
        crop(
            "rice",
            ("Rice", "धान"),
            (5.5, 7.0),
            (
                "Rice (paddy) likes slightly acidic to neutral water and can stand standing water in fields.",
                "धान हल्के अम्लीय से उदासीन पानी को पसंद करता है और खेत में खड़ा पानी सह लेता है।",
            ),
            &["rice", "paddy", "धान", "चावल"],
        ),
        crop(
            "wheat",
            ("Wheat", "गेहूं"),
            (6.0, 7.5),
            (
                "Wheat prefers mild acidity to neutral pH and well-drained soil.",
                "गेहूं हल्की अम्लता से उदासीन pH और अच्छी जल निकासी वाली मिट्टी पसंद करता है।",
            ),
            &["wheat", "गेहूं", "गेहूँ"],
        ),
        crop(
            "maize",
            ("Maize", "मक्का"),
            (5.5, 7.5),
            (
                "Maize adapts well but prefers near-neutral pH with good fertility.",
                "मक्का कई हालात में उग जाता है, पर उपजाऊ मिट्टी और लगभग उदासीन pH में सबसे अच्छा रहता है।",
            ),
            &["maize", "corn", "मक्का", "भुट्टा"],
        ),
        crop(
            "sugarcane",
            ("Sugarcane", "गन्ना"),
            (6.0, 7.5),
            (
                "Sugarcane needs moist soil and slightly acidic to neutral pH.",
                "गन्ने को नम मिट्टी और हल्का अम्लीय से उदासीन pH चाहिए।",
            ),
            &["sugarcane", "गन्ना", "गन्ने"],
        ),
        crop(
            "cotton",
            ("Cotton", "कपास"),
            (5.8, 7.5),
            (
                "Cotton prefers warm climate and slightly acidic to neutral pH.",
                "कपास गर्म जलवायु और हल्के अम्लीय से उदासीन pH को पसंद करती है।",
            ),
            &["cotton", "कपास"],
        ),
        crop(
            "soybean",
            ("Soybean", "सोयाबीन"),
            (6.0, 7.5),
            (
                "Soybean fixes nitrogen and prefers near-neutral pH for good nodulation.",
                "सोयाबीन नाइट्रोजन स्थिर करती है और अच्छी गांठों के लिए लगभग उदासीन pH पसंद करती है।",
            ),
            &["soybean", "soyabean", "soya", "सोयाबीन"],
        ),
        crop(
            "mustard",
            ("Mustard", "सरसों"),
            (5.5, 7.5),
            (
                "Mustard tolerates mild acidity and neutral soils; good for rabi season.",
                "सरसों हल्की अम्लता और उदासीन मिट्टी सह लेती है; रबी मौसम के लिए अच्छी है।",
            ),
            &["mustard", "सरसों"],
        ),
        crop(
            "tomato",
            ("Tomato", "टमाटर"),
            (6.0, 7.0),
            (
                "Tomato likes slightly acidic soil and hates waterlogging.",
                "टमाटर हल्की अम्लीय मिट्टी पसंद करता है और जलभराव बिल्कुल नहीं सहता।",
            ),
            &["tomato", "टमाटर"],
        ),
        crop(
            "chilli",
            ("Chilli", "मिर्च"),
            (6.0, 7.0),
            (
                "Chilli likes warm climate, slightly acidic soils, and good drainage.",
                "मिर्च गर्म जलवायु, हल्की अम्लीय मिट्टी और अच्छी जल निकासी पसंद करती है।",
            ),
            &["chilli", "chili", "मिर्च", "मिर्ची"],
        ),
        crop(
            "capsicum",
            ("Capsicum", "शिमला मिर्च"),
            (6.0, 7.0),
            (
                "Capsicum behaves similar to chilli and prefers fertile, well-drained soil.",
                "शिमला मिर्च मिर्च जैसी ही है और उपजाऊ, अच्छी जल निकासी वाली मिट्टी पसंद करती है।",
            ),
            &["capsicum", "bell pepper", "शिमला मिर्च"],
        ),
        crop(
            "banana",
            ("Banana", "केला"),
            (5.5, 7.0),
            (
                "Banana needs plenty of moisture and slightly acidic to neutral soil.",
                "केले को भरपूर नमी और हल्की अम्लीय से उदासीन मिट्टी चाहिए।",
            ),
            &["banana", "केला", "केले"],
        ),
        crop(
            "mango",
            ("Mango", "आम"),
            (5.5, 7.5),
            (
                "Mango trees tolerate a wide pH, but best near neutral with good drainage.",
                "आम के पेड़ कई तरह का pH सह लेते हैं, पर अच्छी जल निकासी के साथ उदासीन के पास सबसे अच्छे रहते हैं।",
            ),
            &["mango", "आम का", "आम की", "आम के", "आमों"],
        ),
        crop(
            "pulses",
            ("Pulses", "दालें"),
            (6.0, 7.5),
            (
                "Pulses like gram, lentil, pigeon pea prefer mild acidity to neutral pH.",
                "चना, मसूर, अरहर जैसी दालें हल्की अम्लता से उदासीन pH पसंद करती हैं।",
            ),
            &[
                "pulses", "dal", "lentil", "gram", "दाल", "दालें", "चना", "चने", "मसूर", "अरहर",
            ],
        ),
        crop(
            "groundnut",
            ("Groundnut", "मूंगफली"),
            (5.5, 7.0),
            (
                "Groundnut loves loose, sandy soil and slightly acidic pH.",
                "मूंगफली को भुरभुरी, रेतीली मिट्टी और हल्का अम्लीय pH पसंद है।",
            ),
            &["groundnut", "peanut", "मूंगफली"],
        ),
        crop(
            "potato",
            ("Potato", "आलू"),
            (5.2, 6.5),
            (
                "Potato prefers more acidic soil compared to many field crops.",
                "आलू कई खेत की फसलों की तुलना में ज़्यादा अम्लीय मिट्टी पसंद करता है।",
            ),
            &["potato", "आलू"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_crops_are_valid() {
        for mut crop in builtin_crops() {
            crop.validate().unwrap();
        }
    }

    #[test]
    fn test_contains_is_inclusive() {
        let crops = builtin_crops();
        let potato = crops.iter().find(|c| c.id == "potato").unwrap();
        assert!(potato.contains(5.2));
        assert!(potato.contains(6.5));
        assert!(!potato.contains(6.51));
        assert!(potato.contains_with_margin(6.9, 0.5));
        assert!(!potato.contains_with_margin(7.1, 0.5));
    }

    #[test]
    fn test_validate_rejects_inverted_range() {
        let mut crop = crop("odd", ("Odd", "अजीब"), (7.0, 6.0), ("", ""), &["odd"]);
        assert!(matches!(
            crop.validate(),
            Err(KnowledgeError::InvalidCrop { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_out_of_scale() {
        let mut crop = crop("odd", ("Odd", "अजीब"), (6.0, 14.5), ("", ""), &["odd"]);
        assert!(crop.validate().is_err());
    }

    #[test]
    fn test_validate_normalizes_keywords() {
        let mut crop = crop("odd", ("Odd", "अजीब"), (6.0, 7.0), ("", ""), &[" Odd ", "odd"]);
        crop.validate().unwrap();
        assert_eq!(crop.keywords, vec!["odd"]);
    }
}
