//! Prometheus metrics
//!
//! Counters follow each dialogue session's event stream, so every turn is
//! counted once however it was submitted.

use agro_advisor_agent::{ReplySource, SessionEvent};
use axum::extract::State;
use axum::http::StatusCode;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tokio::sync::broadcast::{self, error::RecvError};

use crate::state::AppState;
use crate::ServerError;

/// Install the global recorder
pub fn init_metrics() -> Result<PrometheusHandle, ServerError> {
    PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| ServerError::Internal(format!("Failed to install metrics recorder: {}", e)))
}

pub fn record_event(event: &SessionEvent) {
    match event {
        SessionEvent::TurnCompleted {
            intent,
            language,
            source,
            latency_ms,
        } => {
            metrics::counter!(
                "advisor_turns_total",
                "intent" => intent.as_str(),
                "language" => language.code()
            )
            .increment(1);
            metrics::histogram!("advisor_turn_latency_ms").record(*latency_ms as f64);

            if *source == ReplySource::BackendUnavailable {
                metrics::counter!("advisor_backend_failures_total").increment(1);
            }
        },
        SessionEvent::BusyRejected => {
            metrics::counter!("advisor_busy_rejections_total").increment(1);
        },
        _ => {},
    }
}

/// Record one session's events until it closes
pub async fn track_session(mut events: broadcast::Receiver<SessionEvent>) {
    loop {
        match events.recv().await {
            Ok(SessionEvent::Closed) | Err(RecvError::Closed) => break,
            Ok(event) => record_event(&event),
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Session metrics lagged");
            },
        }
    }
}

/// `GET /metrics`
pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .as_ref()
        .map(|handle| handle.render())
        .ok_or(StatusCode::NOT_FOUND)
}
