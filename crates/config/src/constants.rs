//! Centralized constants for the advisor
//!
//! Single source of truth for the agronomy thresholds used by the knowledge
//! base, the entity extractor and the response composer.

/// pH scale limits and qualitative band edges
///
/// Bands are half-open `[lower, upper)`; each edge belongs to the band above it.
pub mod ph {
    /// Lowest valid reading
    pub const MIN: f64 = 0.0;
    /// Highest valid reading
    pub const MAX: f64 = 14.0;

    /// Below this: strongly acidic
    pub const ACIDIC_FROM: f64 = 5.0;
    /// Below this: acidic
    pub const SLIGHTLY_ACIDIC_FROM: f64 = 5.5;
    /// Below this: slightly acidic
    pub const FAVORABLE_FROM: f64 = 6.0;
    /// Below this: near neutral / favorable
    pub const SLIGHTLY_ALKALINE_FROM: f64 = 7.5;
    /// Below this: slightly to moderately alkaline; at or above: strongly alkaline
    pub const STRONGLY_ALKALINE_FROM: f64 = 8.5;

    /// Readings below this get "raise pH" advice
    pub const RAISE_BELOW: f64 = FAVORABLE_FROM;
    /// Readings above this get "lower pH" advice
    pub const LOWER_ABOVE: f64 = SLIGHTLY_ALKALINE_FROM;

    pub fn is_valid(value: f64) -> bool {
        value.is_finite() && (MIN..=MAX).contains(&value)
    }
}

/// Tolerance margins around a crop's nominal pH range
pub mod tolerance {
    /// Grace zone when judging a single crop against a reading
    pub const CROP_MATCH: f64 = 0.3;
    /// Widened range for "caution" crops in a recommendation list
    pub const RECOMMENDATION: f64 = 0.5;
}

/// Default service endpoints
pub mod endpoints {
    /// Local advisory backend (question/answer JSON API)
    pub const ADVISORY_BACKEND: &str = "http://127.0.0.1:5000/ask";
}

/// Speech defaults
pub mod voice {
    pub const DEFAULT_RATE: f32 = 1.0;
    pub const DEFAULT_PITCH: f32 = 1.0;
    /// Voice names preferred within a fallback tier
    pub const PREFERRED_NAME_PATTERN: &str = "(?i)female|zira|neural";
}
