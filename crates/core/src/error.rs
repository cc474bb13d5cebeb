//! Error types shared by the advisor crates

use thiserror::Error;

/// Core errors
///
/// None of these are fatal: callers degrade them to a disabled control or a
/// textual response.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Capability unavailable: {0}")]
    CapabilityUnavailable(String),

    #[error("Speech synthesis error: {0}")]
    Synthesis(String),

    #[error("Speech recognition error: {0}")]
    Recognition(String),

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, Error>;
