//! Text processing for farmer queries
//!
//! This crate turns raw (typed or transcribed) text into the signals the
//! response composer needs:
//! - **Entity Extraction**: a pH reading and a crop from the knowledge base
//! - **Intent Classification**: an ordered, first-match-wins rule cascade
//! - **Language Detection**: script-based, Devanagari means Hindi
//! - **Hindi Utilities**: Devanagari digit normalisation
//!
//! Nothing here fails: malformed input simply yields absent entities.
//!
//! # Example
//!
//! ```
//! use agro_advisor_knowledge::KnowledgeBase;
//! use agro_advisor_text_processing::{extract_crop, extract_ph, IntentCategory, IntentClassifier};
//! use agro_advisor_core::Language;
//!
//! let kb = KnowledgeBase::builtin();
//! let text = "Is rice ok at pH 7.8?";
//!
//! let ph = extract_ph(text);
//! let crop = extract_crop(&kb, text, Language::English);
//! let intent = IntentClassifier::new().classify(text, ph.is_some(), crop.is_some());
//!
//! assert_eq!(ph.map(|p| p.value()), Some(7.8));
//! assert_eq!(crop.map(|c| c.id.as_str()), Some("rice"));
//! assert_eq!(intent, IntentCategory::CropPhQuery);
//! ```

pub mod entities;
pub mod hindi;
pub mod intent;
pub mod language;

pub use entities::{extract_crop, extract_ph, EntityExtractor, ExtractedEntities, PhReading};
pub use intent::{IntentCategory, IntentClassifier, IntentRule, Predicate};
pub use language::detect_language;
