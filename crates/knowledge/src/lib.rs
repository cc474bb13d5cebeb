//! Agronomy Knowledge Base
//!
//! Process-wide, read-only tables the advisor answers from:
//! - Crop profiles: comfortable pH range, advisory note, localized names and
//!   the keywords that resolve to each crop
//! - Advisory text blocks: one pre-authored answer per topic and language
//! - Quick-question shortcuts shown beside the chat
//!
//! The built-in tables can be replaced by a YAML file at startup. The base is
//! validated once and never mutated afterwards; share it behind an `Arc`.
//!
//! # Example
//!
//! ```
//! use agro_advisor_knowledge::KnowledgeBase;
//!
//! let kb = KnowledgeBase::builtin();
//! let rice = kb.crop("rice").unwrap();
//! assert!(rice.contains(6.5));
//! ```

pub mod advisory;
pub mod base;
pub mod crops;
pub mod loader;
pub mod quick;
pub mod text;

pub use advisory::AdvisoryTopic;
pub use base::{KeywordEntry, KnowledgeBase};
pub use crops::CropProfile;
pub use loader::KnowledgeFile;
pub use quick::{QuickQuestion, QuickQuestionView};
pub use text::LocalizedText;

use thiserror::Error;

/// Knowledge base errors (load/validation time only)
#[derive(Error, Debug)]
pub enum KnowledgeError {
    #[error("Knowledge file not found: {0}: {1}")]
    FileNotFound(String, String),

    #[error("Failed to parse knowledge file: {0}")]
    Parse(String),

    #[error("Invalid crop '{crop}': {message}")]
    InvalidCrop { crop: String, message: String },

    #[error("Duplicate crop id: {0}")]
    DuplicateCrop(String),

    #[error("Keyword '{keyword}' is shared by '{first}' and '{second}'")]
    SharedKeyword {
        keyword: String,
        first: String,
        second: String,
    },
}

pub type Result<T> = std::result::Result<T, KnowledgeError>;
