//! Reply sources
//!
//! A turn is answered either by the local composer or by the external
//! advisory backend. Both sit behind [`Responder`] so the session does not
//! care which one is configured.

use std::sync::Arc;

use agro_advisor_config::{AdvisorConfig, BackendConfig, ResponderMode};
use agro_advisor_core::Language;
use agro_advisor_knowledge::{AdvisoryTopic, KnowledgeBase};
use agro_advisor_llm::{AdvisoryBackend, AdvisoryBackendClient};
use agro_advisor_text_processing::{ExtractedEntities, IntentCategory};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::composer::ResponseComposer;
use crate::AgentError;

/// Everything a responder may look at for one turn
#[derive(Debug, Clone)]
pub struct TurnInput {
    pub text: String,
    pub language: Language,
    pub intent: IntentCategory,
    pub entities: ExtractedEntities,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplySource {
    Rules,
    Backend,
    /// Backend call failed; the reply is the localized notice
    BackendUnavailable,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    pub source: ReplySource,
}

#[async_trait]
pub trait Responder: Send + Sync {
    async fn respond(&self, turn: &TurnInput) -> Reply;

    fn name(&self) -> &str;
}

/// Answers from the knowledge base alone
pub struct RuleBasedResponder {
    composer: ResponseComposer,
}

impl RuleBasedResponder {
    pub fn new(kb: Arc<KnowledgeBase>) -> Self {
        Self {
            composer: ResponseComposer::new(kb),
        }
    }

    pub fn composer(&self) -> &ResponseComposer {
        &self.composer
    }
}

#[async_trait]
impl Responder for RuleBasedResponder {
    async fn respond(&self, turn: &TurnInput) -> Reply {
        let text = self.composer.compose(
            turn.intent,
            turn.entities.ph,
            turn.entities.crop.as_ref(),
            turn.language,
        );
        Reply {
            text,
            source: ReplySource::Rules,
        }
    }

    fn name(&self) -> &str {
        "rules"
    }
}

/// Forwards the raw text to the external backend
///
/// Intent and entities are ignored. A failed call is answered with the
/// localized "unavailable" notice; it is never retried.
pub struct RemoteResponder {
    backend: Arc<dyn AdvisoryBackend>,
    kb: Arc<KnowledgeBase>,
}

impl RemoteResponder {
    pub fn new(backend: Arc<dyn AdvisoryBackend>, kb: Arc<KnowledgeBase>) -> Self {
        Self { backend, kb }
    }
}

#[async_trait]
impl Responder for RemoteResponder {
    async fn respond(&self, turn: &TurnInput) -> Reply {
        match self.backend.ask(turn.language, &turn.text).await {
            Ok(answer) => Reply {
                text: answer,
                source: ReplySource::Backend,
            },
            Err(e) => {
                tracing::warn!(
                    backend = self.backend.name(),
                    error = %e,
                    "Advisory backend failed"
                );
                Reply {
                    text: self
                        .kb
                        .advisory(AdvisoryTopic::BackendUnavailable, turn.language)
                        .to_string(),
                    source: ReplySource::BackendUnavailable,
                }
            },
        }
    }

    fn name(&self) -> &str {
        "remote"
    }
}

/// Pick the responder named by `advisor.responder`
pub fn build_responder(
    advisor: &AdvisorConfig,
    backend: &BackendConfig,
    kb: Arc<KnowledgeBase>,
) -> Result<Arc<dyn Responder>, AgentError> {
    match advisor.responder {
        ResponderMode::Rules => Ok(Arc::new(RuleBasedResponder::new(kb))),
        ResponderMode::Remote => {
            let client = AdvisoryBackendClient::from_config(backend)?;
            tracing::info!(endpoint = %client.endpoint(), "Using remote advisory backend");
            Ok(Arc::new(RemoteResponder::new(Arc::new(client), kb)))
        },
    }
}
