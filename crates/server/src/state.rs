//! Application state shared by all handlers

use std::sync::Arc;
use std::time::Duration;

use agro_advisor_agent::{build_responder, SessionConfig};
use agro_advisor_config::Settings;
use agro_advisor_knowledge::KnowledgeBase;
use metrics_exporter_prometheus::PrometheusHandle;

use crate::session::{SessionFactory, SessionManager};
use crate::ServerError;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub sessions: Arc<SessionManager>,
    /// `None` when metrics are disabled
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Load the knowledge base and responder named by `config`
    pub fn new(config: Settings) -> Result<Self, ServerError> {
        let kb = Arc::new(KnowledgeBase::load(
            config.advisor.knowledge_base_path.as_deref(),
        )?);
        let responder = build_responder(&config.advisor, &config.backend, kb.clone())?;

        let factory = SessionFactory {
            kb,
            responder,
            voice: config.voice.clone(),
            defaults: SessionConfig::from_advisor(&config.advisor),
        };
        let sessions = SessionManager::new(
            factory,
            config.server.max_sessions,
            Duration::from_secs(config.server.session_timeout_seconds),
        );

        tracing::info!(
            crops = sessions.knowledge_base().crops().len(),
            responder = sessions.responder_name(),
            "Application state initialized"
        );

        Ok(Self {
            config: Arc::new(config),
            sessions: Arc::new(sessions),
            metrics: None,
        })
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}
