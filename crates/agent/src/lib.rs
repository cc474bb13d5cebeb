//! Agronomy dialogue engine
//!
//! Features:
//! - Deterministic reply composition from the knowledge base (pH bands,
//!   amendment advice, crop suitability, crop recommendation lists)
//! - Pluggable reply source: rule-based composer or external backend
//! - Two-state dialogue session with busy rejection, greeting on open,
//!   quick questions and voice input/output wiring

pub mod composer;
pub mod display;
pub mod responder;
pub mod session;

pub use composer::{Amendment, PhBand, Recommendation, ResponseComposer, Suitability};
pub use display::TranscriptDisplay;
pub use responder::{
    build_responder, RemoteResponder, Reply, ReplySource, Responder, RuleBasedResponder,
    TurnInput,
};
pub use session::{
    DialogueSession, SessionConfig, SessionControls, SessionEvent, SessionState, SubmitOutcome,
    TurnRecord,
};

use thiserror::Error;

/// Agent errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AgentError {
    #[error("Quick question {0} does not exist")]
    QuickQuestionNotFound(usize),

    #[error("Voice error: {0}")]
    Voice(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Initialization error: {0}")]
    Initialization(String),
}

impl From<agro_advisor_pipeline::PipelineError> for AgentError {
    fn from(err: agro_advisor_pipeline::PipelineError) -> Self {
        AgentError::Voice(err.to_string())
    }
}

impl From<agro_advisor_llm::BackendError> for AgentError {
    fn from(err: agro_advisor_llm::BackendError) -> Self {
        AgentError::Backend(err.to_string())
    }
}

impl From<agro_advisor_knowledge::KnowledgeError> for AgentError {
    fn from(err: agro_advisor_knowledge::KnowledgeError) -> Self {
        AgentError::Initialization(err.to_string())
    }
}
