//! External advisory backend
//!
//! Some deployments answer from a separate question/answer service instead
//! of the rule-based composer. The wire contract is one JSON POST:
//!
//! ```text
//! → {"question": "LANG:EN | Which crops are good at pH 6.5?"}
//! ← {"answer": "..."}
//! ```
//!
//! Failures (timeout, non-2xx, unreachable, malformed body) are reported as
//! [`BackendError`]; the caller turns them into a localized message. There
//! are no automatic retries.

pub mod backend;

pub use backend::{format_question, AdvisoryBackend, AdvisoryBackendClient, AskRequest, AskResponse};

use thiserror::Error;

/// Backend errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout")]
    Timeout,

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            BackendError::Timeout
        } else {
            BackendError::Network(err.to_string())
        }
    }
}
