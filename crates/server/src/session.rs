//! Client sessions and the session registry

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use agro_advisor_agent::{DialogueSession, Responder, SessionConfig, TranscriptDisplay};
use agro_advisor_config::VoiceSettings;
use agro_advisor_core::{Language, SpeechRecognitionPlatform, SpeechSynthesisPlatform};
use agro_advisor_knowledge::KnowledgeBase;
use agro_advisor_pipeline::{RecognitionController, SynthesisController};
use parking_lot::{Mutex, RwLock};
use serde::Deserialize;
use tokio::sync::watch;

use crate::platform::{ClientRecognition, ClientSynthesis, Directive};
use crate::ServerError;

/// Speech engines the client has
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Capabilities {
    #[serde(default = "default_true")]
    pub synthesis: bool,
    #[serde(default = "default_true")]
    pub recognition: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            synthesis: true,
            recognition: true,
        }
    }
}

const CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

/// A dialogue session plus the plumbing that connects it to one HTTP client
pub struct ClientSession {
    pub id: String,
    pub dialogue: DialogueSession,
    pub transcript: Arc<TranscriptDisplay>,
    synthesis: Option<Arc<ClientSynthesis>>,
    recognition: Option<Arc<ClientRecognition>>,
    /// Held while recognition directives are produced and collected
    recognition_lock: Mutex<()>,
}

impl ClientSession {
    pub fn new(
        id: String,
        config: SessionConfig,
        capabilities: Capabilities,
        voice: &VoiceSettings,
        kb: Arc<KnowledgeBase>,
        responder: Arc<dyn Responder>,
    ) -> Result<Self, ServerError> {
        let transcript = Arc::new(TranscriptDisplay::new());

        let synthesis = capabilities
            .synthesis
            .then(|| Arc::new(ClientSynthesis::new()));
        let recognition = capabilities
            .recognition
            .then(|| Arc::new(ClientRecognition::new()));
        let synthesis_platform = synthesis
            .clone()
            .map(|s| s as Arc<dyn SpeechSynthesisPlatform>);
        let recognition_platform = recognition
            .clone()
            .map(|r| r as Arc<dyn SpeechRecognitionPlatform>);

        let synthesis_controller = SynthesisController::from_settings(synthesis_platform, voice)?;
        let dialogue = DialogueSession::new(
            id.clone(),
            config,
            kb,
            responder,
            synthesis_controller,
            RecognitionController::new(recognition_platform),
            transcript.clone(),
        );

        Ok(Self {
            id,
            dialogue,
            transcript,
            synthesis,
            recognition,
            recognition_lock: Mutex::new(()),
        })
    }

    /// Start listening; returns the directives for the client's recognizer
    pub fn start_listening(&self) -> Result<Vec<Directive>, ServerError> {
        let _lock = self.recognition_lock.lock();
        self.dialogue.start_listening()?;
        Ok(self
            .recognition
            .as_ref()
            .map(|r| r.take_directives())
            .unwrap_or_default())
    }

    /// Stop the reply being spoken
    pub fn stop_speaking(&self) -> Vec<Directive> {
        self.dialogue.stop_speaking();
        match self.synthesis {
            Some(_) => vec![Directive::CancelSpeech],
            None => Vec::new(),
        }
    }

    /// Client reported a new voice list
    pub fn update_voices(&self, voices: Vec<agro_advisor_core::VoiceInfo>) -> Result<(), ServerError> {
        let synthesis = self.synthesis.as_ref().ok_or_else(|| {
            ServerError::InvalidRequest("session was created without speech synthesis".to_string())
        })?;
        synthesis.set_voices(voices);
        self.dialogue.on_voices_changed();
        Ok(())
    }

    pub fn is_expired(&self, timeout: Duration) -> bool {
        self.dialogue.last_activity().elapsed() > timeout
    }

    pub fn close(&self) {
        let _lock = self.recognition_lock.lock();
        self.dialogue.close();
        if let Some(recognition) = &self.recognition {
            recognition.take_directives();
        }
    }
}

/// Everything needed to build sessions
#[derive(Clone)]
pub struct SessionFactory {
    pub kb: Arc<KnowledgeBase>,
    pub responder: Arc<dyn Responder>,
    pub voice: VoiceSettings,
    pub defaults: SessionConfig,
}

pub struct SessionManager {
    sessions: RwLock<HashMap<String, Arc<ClientSession>>>,
    factory: SessionFactory,
    max_sessions: usize,
    session_timeout: Duration,
}

impl SessionManager {
    pub fn new(factory: SessionFactory, max_sessions: usize, session_timeout: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            factory,
            max_sessions,
            session_timeout,
        }
    }

    pub fn knowledge_base(&self) -> &Arc<KnowledgeBase> {
        &self.factory.kb
    }

    pub fn responder_name(&self) -> &str {
        self.factory.responder.name()
    }

    /// Periodically drop sessions idle for longer than the timeout
    ///
    /// Send `true` on the returned channel to stop the task.
    pub fn start_cleanup_task(self: &Arc<Self>) -> watch::Sender<bool> {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let manager = Arc::clone(self);

        tokio::spawn(async move {
            let mut timer = tokio::time::interval(CLEANUP_INTERVAL);
            timer.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = timer.tick() => {
                        let removed = manager.cleanup_expired();
                        if removed > 0 {
                            tracing::info!(removed, remaining = manager.count(), "Expired sessions removed");
                        }
                    }
                    _ = shutdown_rx.changed() => {
                        if *shutdown_rx.borrow() {
                            tracing::debug!("Session cleanup task stopped");
                            break;
                        }
                    }
                }
            }
        });

        shutdown_tx
    }

    pub fn create(
        &self,
        language: Option<Language>,
        capabilities: Capabilities,
    ) -> Result<Arc<ClientSession>, ServerError> {
        let mut sessions = self.sessions.write();

        if sessions.len() >= self.max_sessions {
            self.cleanup_expired_internal(&mut sessions);
            if sessions.len() >= self.max_sessions {
                return Err(ServerError::Capacity(self.max_sessions));
            }
        }

        let id = uuid::Uuid::new_v4().to_string();
        let mut config = self.factory.defaults.clone();
        if let Some(language) = language {
            config = config.with_language(language);
        }
        let language = config.language;

        let session = Arc::new(ClientSession::new(
            id.clone(),
            config,
            capabilities,
            &self.factory.voice,
            self.factory.kb.clone(),
            self.factory.responder.clone(),
        )?);
        sessions.insert(id.clone(), session.clone());

        tracing::info!(
            session_id = %id,
            language = %language,
            synthesis = capabilities.synthesis,
            recognition = capabilities.recognition,
            "Created session"
        );
        Ok(session)
    }

    pub fn get(&self, id: &str) -> Option<Arc<ClientSession>> {
        self.sessions.read().get(id).cloned()
    }

    pub fn remove(&self, id: &str) -> bool {
        match self.sessions.write().remove(id) {
            Some(session) => {
                session.close();
                tracing::info!(session_id = %id, "Removed session");
                true
            },
            None => false,
        }
    }

    pub fn count(&self) -> usize {
        self.sessions.read().len()
    }

    /// Returns how many sessions were removed
    pub fn cleanup_expired(&self) -> usize {
        let mut sessions = self.sessions.write();
        self.cleanup_expired_internal(&mut sessions)
    }

    fn cleanup_expired_internal(&self, sessions: &mut HashMap<String, Arc<ClientSession>>) -> usize {
        let expired: Vec<String> = sessions
            .iter()
            .filter(|(_, s)| s.is_expired(self.session_timeout))
            .map(|(id, _)| id.clone())
            .collect();

        for id in &expired {
            if let Some(session) = sessions.remove(id) {
                session.close();
                tracing::debug!(session_id = %id, "Expired session");
            }
        }
        expired.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agro_advisor_agent::RuleBasedResponder;
    use agro_advisor_core::RecognitionEvent;

    fn manager(max_sessions: usize, timeout: Duration) -> SessionManager {
        let kb = Arc::new(KnowledgeBase::builtin());
        let factory = SessionFactory {
            responder: Arc::new(RuleBasedResponder::new(kb.clone())),
            kb,
            voice: VoiceSettings::default(),
            defaults: SessionConfig::default(),
        };
        SessionManager::new(factory, max_sessions, timeout)
    }

    #[test]
    fn test_create_and_get() {
        let manager = manager(10, Duration::from_secs(60));
        let session = manager
            .create(Some(Language::Hindi), Capabilities::default())
            .unwrap();

        let retrieved = manager.get(&session.id).unwrap();
        assert_eq!(retrieved.dialogue.language(), Language::Hindi);
        assert_eq!(manager.count(), 1);
    }

    #[test]
    fn test_capacity_limit() {
        let manager = manager(1, Duration::from_secs(60));
        manager.create(None, Capabilities::default()).unwrap();

        assert!(matches!(
            manager.create(None, Capabilities::default()),
            Err(ServerError::Capacity(1))
        ));
    }

    #[test]
    fn test_expired_sessions_make_room() {
        let manager = manager(1, Duration::ZERO);
        let first = manager.create(None, Capabilities::default()).unwrap();
        std::thread::sleep(Duration::from_millis(5));

        let second = manager.create(None, Capabilities::default()).unwrap();
        assert!(manager.get(&first.id).is_none());
        assert!(manager.get(&second.id).is_some());
    }

    #[tokio::test]
    async fn test_remove_closes_session() {
        let manager = manager(10, Duration::from_secs(60));
        let session = manager.create(None, Capabilities::default()).unwrap();

        let directives = session.start_listening().unwrap();
        assert!(matches!(
            directives.as_slice(),
            [Directive::StartRecognition { .. }]
        ));

        assert!(manager.remove(&session.id));
        assert!(!manager.remove(&session.id));

        // the transcript arrives after close and is dropped
        let late = RecognitionEvent::Result {
            transcript: "pH 6.5".to_string(),
        };
        assert!(session.dialogue.handle_recognition_event(late).await.is_none());
    }

    #[tokio::test]
    async fn test_directives_belong_to_their_request() {
        let manager = manager(10, Duration::from_secs(60));
        let session = manager.create(None, Capabilities::default()).unwrap();

        let outcome = session.dialogue.submit("pH 6.5").await;
        assert_eq!(Directive::for_outcome(&outcome).len(), 2);

        // nothing from the turn leaks into later requests
        assert_eq!(session.stop_speaking(), vec![Directive::CancelSpeech]);
        let directives = session.start_listening().unwrap();
        assert!(matches!(
            directives.as_slice(),
            [Directive::StartRecognition { .. }]
        ));
    }

    #[test]
    fn test_voices_require_synthesis() {
        let manager = manager(10, Duration::from_secs(60));
        let session = manager
            .create(
                None,
                Capabilities {
                    synthesis: false,
                    recognition: false,
                },
            )
            .unwrap();

        assert!(session.update_voices(Vec::new()).is_err());
        assert!(!session.dialogue.controls().stop_voice.enabled);
        assert!(session.stop_speaking().is_empty());
        assert!(session.start_listening().is_err());
    }
}
