//! Dialogue session
//!
//! One farmer, one chat window. A turn runs
//!
//! ```text
//! text ─▶ language ─▶ entities ─▶ intent ─▶ responder ─▶ display ─▶ speech
//! ```
//!
//! and the session is `Processing` for exactly that long. A submission that
//! arrives while a turn is outstanding is rejected with
//! [`SubmitOutcome::Busy`]; it is not queued.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use agro_advisor_config::AdvisorConfig;
use agro_advisor_core::{ChatDisplay, ChatMessage, Language, RecognitionEvent, Utterance};
use agro_advisor_knowledge::{AdvisoryTopic, KnowledgeBase, QuickQuestionView};
use agro_advisor_pipeline::{ControlState, RecognitionController, SynthesisController};
use agro_advisor_text_processing::{
    detect_language, EntityExtractor, IntentCategory, IntentClassifier,
};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::responder::{ReplySource, Responder, TurnInput};
use crate::AgentError;

/// Session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Language selected for the session; Devanagari input overrides it per turn
    pub language: Language,
    /// Show the welcome messages the first time the session is opened
    pub greet_on_open: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            language: Language::English,
            greet_on_open: true,
        }
    }
}

impl SessionConfig {
    pub fn from_advisor(config: &AdvisorConfig) -> Self {
        Self {
            language: Language::from_code_or_default(&config.default_language),
            greet_on_open: config.greet_on_open,
        }
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Ready for input
    Idle,
    /// A turn is being answered
    Processing,
}

/// Session events, broadcast to every subscriber in the order they happen
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Opened,
    TurnCompleted {
        intent: IntentCategory,
        language: Language,
        source: ReplySource,
        latency_ms: u64,
    },
    BusyRejected,
    ListeningStarted,
    SpeechStopped,
    Closed,
}

/// Everything that happened in one answered turn
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnRecord {
    pub text: String,
    pub language: Language,
    pub ph: Option<f64>,
    pub crop: Option<String>,
    pub intent: IntentCategory,
    pub reply: String,
    pub source: ReplySource,
    /// The utterance handed to the synthesis platform, if any
    pub utterance: Option<Utterance>,
    pub latency_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// Blank input; nothing was shown or spoken
    Ignored,
    /// Another turn is still outstanding
    Busy,
    Answered(TurnRecord),
}

/// Enabled/disabled state of the voice controls
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionControls {
    pub voice_input: ControlState,
    pub stop_voice: ControlState,
}

/// Resets the session to `Idle` when a turn ends, however it ends
struct TurnGuard<'a> {
    state: &'a Mutex<SessionState>,
}

impl Drop for TurnGuard<'_> {
    fn drop(&mut self) {
        *self.state.lock() = SessionState::Idle;
    }
}

pub struct DialogueSession {
    id: String,
    language: Language,
    greet_on_open: bool,
    greeted: AtomicBool,
    kb: Arc<KnowledgeBase>,
    extractor: EntityExtractor,
    classifier: IntentClassifier,
    responder: Arc<dyn Responder>,
    synthesis: SynthesisController,
    recognition: RecognitionController,
    display: Arc<dyn ChatDisplay>,
    state: Mutex<SessionState>,
    event_tx: broadcast::Sender<SessionEvent>,
    last_activity: Mutex<Instant>,
}

impl DialogueSession {
    pub fn new(
        id: impl Into<String>,
        config: SessionConfig,
        kb: Arc<KnowledgeBase>,
        responder: Arc<dyn Responder>,
        synthesis: SynthesisController,
        recognition: RecognitionController,
        display: Arc<dyn ChatDisplay>,
    ) -> Self {
        let (event_tx, _) = broadcast::channel(64);
        let id = id.into();
        tracing::debug!(
            session_id = %id,
            language = %config.language,
            responder = responder.name(),
            "Dialogue session created"
        );

        Self {
            id,
            language: config.language,
            greet_on_open: config.greet_on_open,
            greeted: AtomicBool::new(false),
            extractor: EntityExtractor::new(kb.clone()),
            classifier: IntentClassifier::new(),
            kb,
            responder,
            synthesis,
            recognition,
            display,
            state: Mutex::new(SessionState::Idle),
            event_tx,
            last_activity: Mutex::new(Instant::now()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> SessionState {
        *self.state.lock()
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn knowledge_base(&self) -> &Arc<KnowledgeBase> {
        &self.kb
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.event_tx.subscribe()
    }

    pub fn last_activity(&self) -> Instant {
        *self.last_activity.lock()
    }

    pub fn controls(&self) -> SessionControls {
        let language = self.language();
        SessionControls {
            voice_input: self.recognition.control_state(language),
            stop_voice: self.synthesis.control_state(language),
        }
    }

    pub fn quick_questions(&self) -> Vec<QuickQuestionView> {
        self.kb.quick_question_views(self.language())
    }

    /// Show the welcome messages, once per session
    ///
    /// Returns the messages shown by this call; empty on every later call.
    pub fn open(&self) -> Vec<ChatMessage> {
        self.touch();
        if !self.greet_on_open || self.greeted.swap(true, Ordering::SeqCst) {
            return Vec::new();
        }

        let language = self.language();
        let messages = vec![
            ChatMessage::assistant(self.kb.advisory(AdvisoryTopic::Welcome, language)),
            ChatMessage::assistant(self.kb.advisory(AdvisoryTopic::WelcomeExamples, language)),
        ];
        for message in &messages {
            self.display.show(message);
        }
        let _ = self.event_tx.send(SessionEvent::Opened);
        messages
    }

    /// Stop any speech and listening
    pub fn close(&self) {
        self.synthesis.stop();
        self.recognition.stop();
        let _ = self.event_tx.send(SessionEvent::Closed);
        tracing::debug!(session_id = %self.id, "Dialogue session closed");
    }

    /// Answer one farmer message
    pub async fn submit(&self, text: &str) -> SubmitOutcome {
        let text = text.trim();
        if text.is_empty() {
            return SubmitOutcome::Ignored;
        }

        let Some(_guard) = self.begin_turn() else {
            tracing::debug!(session_id = %self.id, "Submission rejected, turn in progress");
            let _ = self.event_tx.send(SessionEvent::BusyRejected);
            return SubmitOutcome::Busy;
        };
        self.touch();
        let started = Instant::now();

        self.display.show(&ChatMessage::user(text));

        let language = detect_language(text, self.language());
        let entities = self.extractor.extract(text, language);
        let intent = self
            .classifier
            .classify(text, entities.has_ph(), entities.has_crop());
        tracing::debug!(
            session_id = %self.id,
            intent = %intent,
            ph = ?entities.ph.map(|p| p.value()),
            crop = ?entities.crop.as_ref().map(|c| c.id.as_str()),
            "Turn classified"
        );

        let turn = TurnInput {
            text: text.to_string(),
            language,
            intent,
            entities,
        };
        let reply = self.responder.respond(&turn).await;

        self.display.show(&ChatMessage::assistant(reply.text.as_str()));
        let utterance = self.speak(&reply.text, language);

        let latency_ms = started.elapsed().as_millis() as u64;
        tracing::info!(
            session_id = %self.id,
            intent = %intent,
            language = %language,
            source = ?reply.source,
            latency_ms,
            "Turn completed"
        );
        let _ = self.event_tx.send(SessionEvent::TurnCompleted {
            intent,
            language,
            source: reply.source,
            latency_ms,
        });

        SubmitOutcome::Answered(TurnRecord {
            text: turn.text,
            language,
            ph: turn.entities.ph.map(|p| p.value()),
            crop: turn.entities.crop.map(|c| c.id),
            intent,
            reply: reply.text,
            source: reply.source,
            utterance,
            latency_ms,
        })
    }

    /// Submit a canned question as if it had been typed
    pub async fn submit_quick(&self, index: usize) -> Result<SubmitOutcome, AgentError> {
        let question = self
            .kb
            .quick_questions()
            .get(index)
            .map(|q| q.question.get(self.language()).to_string())
            .ok_or(AgentError::QuickQuestionNotFound(index))?;
        Ok(self.submit(&question).await)
    }

    /// Begin a single-shot recognition session in the session language
    pub fn start_listening(&self) -> Result<(), AgentError> {
        self.touch();
        self.recognition.start(self.language())?;
        let _ = self.event_tx.send(SessionEvent::ListeningStarted);
        Ok(())
    }

    /// Feed a recognition event; a final transcript is submitted as a turn
    pub async fn handle_recognition_event(&self, event: RecognitionEvent) -> Option<SubmitOutcome> {
        let transcript = self.recognition.handle_event(event)?;
        Some(self.submit(&transcript).await)
    }

    /// Cancel the reply being spoken
    pub fn stop_speaking(&self) {
        self.synthesis.stop();
        let _ = self.event_tx.send(SessionEvent::SpeechStopped);
    }

    /// Platform reported a new voice list
    pub fn on_voices_changed(&self) {
        self.synthesis.on_voices_changed();
        tracing::debug!(session_id = %self.id, "Voice list changed, selection cleared");
    }

    fn begin_turn(&self) -> Option<TurnGuard<'_>> {
        let mut state = self.state.lock();
        if *state == SessionState::Processing {
            return None;
        }
        *state = SessionState::Processing;
        Some(TurnGuard { state: &self.state })
    }

    fn speak(&self, text: &str, language: Language) -> Option<Utterance> {
        if !self.synthesis.is_available() {
            return None;
        }
        match self.synthesis.speak(text, language) {
            Ok(utterance) => Some(utterance),
            Err(e) => {
                tracing::warn!(session_id = %self.id, error = %e, "Failed to speak reply");
                None
            },
        }
    }

    fn touch(&self) {
        *self.last_activity.lock() = Instant::now();
    }
}
