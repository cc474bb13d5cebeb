//! Agronomy advisor HTTP server
//!
//! Exposes dialogue sessions to browser clients. Speech runs in the client;
//! the server tells it what to say and when to listen.

pub mod http;
pub mod metrics;
pub mod platform;
pub mod session;
pub mod state;

pub use http::create_router;
pub use metrics::{init_metrics, record_event, track_session};
pub use platform::{ClientRecognition, ClientSynthesis, Directive, DirectiveQueue};
pub use session::{Capabilities, ClientSession, SessionFactory, SessionManager};
pub use state::AppState;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Server errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Session limit of {0} reached")]
    Capacity(usize),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Initialization error: {0}")]
    Initialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ServerError> for StatusCode {
    fn from(err: ServerError) -> Self {
        match err {
            ServerError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            ServerError::Capacity(_) => StatusCode::SERVICE_UNAVAILABLE,
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Initialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let status = StatusCode::from(self);
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %message, "Request failed");
        }
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl From<agro_advisor_agent::AgentError> for ServerError {
    fn from(err: agro_advisor_agent::AgentError) -> Self {
        match err {
            agro_advisor_agent::AgentError::QuickQuestionNotFound(_) => {
                ServerError::InvalidRequest(err.to_string())
            },
            agro_advisor_agent::AgentError::Voice(_) => ServerError::InvalidRequest(err.to_string()),
            _ => ServerError::Initialization(err.to_string()),
        }
    }
}

impl From<agro_advisor_pipeline::PipelineError> for ServerError {
    fn from(err: agro_advisor_pipeline::PipelineError) -> Self {
        ServerError::Initialization(err.to_string())
    }
}

impl From<agro_advisor_knowledge::KnowledgeError> for ServerError {
    fn from(err: agro_advisor_knowledge::KnowledgeError) -> Self {
        ServerError::Initialization(err.to_string())
    }
}
