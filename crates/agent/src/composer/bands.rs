//! pH bands, amendment direction and crop suitability

use agro_advisor_config::constants::{ph, tolerance};
use agro_advisor_knowledge::CropProfile;
use serde::{Deserialize, Serialize};

/// Six half-open bands over [0, 14]; each edge belongs to the band above
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhBand {
    /// `< 5.0`
    StronglyAcidic,
    /// `[5.0, 5.5)`
    Acidic,
    /// `[5.5, 6.0)`
    SlightlyAcidic,
    /// `[6.0, 7.5)`
    Favorable,
    /// `[7.5, 8.5)`
    SlightlyAlkaline,
    /// `>= 8.5`
    StronglyAlkaline,
}

impl PhBand {
    pub fn of(value: f64) -> Self {
        if value < ph::ACIDIC_FROM {
            PhBand::StronglyAcidic
        } else if value < ph::SLIGHTLY_ACIDIC_FROM {
            PhBand::Acidic
        } else if value < ph::FAVORABLE_FROM {
            PhBand::SlightlyAcidic
        } else if value < ph::SLIGHTLY_ALKALINE_FROM {
            PhBand::Favorable
        } else if value < ph::STRONGLY_ALKALINE_FROM {
            PhBand::SlightlyAlkaline
        } else {
            PhBand::StronglyAlkaline
        }
    }
}

/// Which way a reading should be corrected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Amendment {
    /// Below 6.0
    Raise,
    /// Above 7.5
    Lower,
    /// 6.0 to 7.5 inclusive
    Maintain,
}

impl Amendment {
    pub fn for_ph(value: f64) -> Self {
        if value < ph::RAISE_BELOW {
            Amendment::Raise
        } else if value > ph::LOWER_ABOVE {
            Amendment::Lower
        } else {
            Amendment::Maintain
        }
    }
}

/// A single crop judged against a reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Suitability {
    TooAcidic,
    TooAlkaline,
    /// Inside the range or within the grace margin
    Suitable,
}

impl Suitability {
    pub fn evaluate(crop: &CropProfile, value: f64) -> Self {
        if value < crop.ph_min - tolerance::CROP_MATCH {
            Suitability::TooAcidic
        } else if value > crop.ph_max + tolerance::CROP_MATCH {
            Suitability::TooAlkaline
        } else {
            Suitability::Suitable
        }
    }
}

/// Crops grouped for a recommendation list, in knowledge-base order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recommendation<'kb> {
    /// Reading inside `[min, max]`
    pub strong: Vec<&'kb CropProfile>,
    /// Reading inside `[min - 0.5, max + 0.5]` but not a strong match
    pub caution: Vec<&'kb CropProfile>,
}

impl<'kb> Recommendation<'kb> {
    pub fn for_ph(crops: &'kb [CropProfile], value: f64) -> Self {
        let strong = crops.iter().filter(|c| c.contains(value)).collect();
        let caution = crops
            .iter()
            .filter(|c| {
                !c.contains(value) && c.contains_with_margin(value, tolerance::RECOMMENDATION)
            })
            .collect();
        Self { strong, caution }
    }
}
