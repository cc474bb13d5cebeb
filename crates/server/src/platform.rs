//! Speech platforms for HTTP clients
//!
//! Over HTTP the real speech engines live in the client. Every response
//! carries the [`Directive`]s produced by that request alone, for the client
//! to carry out in order: a turn's speech comes from its own
//! [`TurnRecord`], recognition starts are collected while the session's
//! recognition lock is held.

use agro_advisor_agent::{SubmitOutcome, TurnRecord};
use agro_advisor_core::{
    RecognitionConfig, SpeechRecognitionPlatform, SpeechSynthesisPlatform, Utterance, VoiceInfo,
};
use parking_lot::{Mutex, RwLock};
use serde::Serialize;

/// One instruction for the client's speech engines
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Directive {
    CancelSpeech,
    Speak { utterance: Utterance },
    StartRecognition { config: RecognitionConfig },
    AbortRecognition,
}

impl Directive {
    /// Speech for one answered turn: cancel whatever plays, then speak
    pub fn for_turn(record: &TurnRecord) -> Vec<Directive> {
        match &record.utterance {
            Some(utterance) => vec![
                Directive::CancelSpeech,
                Directive::Speak {
                    utterance: utterance.clone(),
                },
            ],
            None => Vec::new(),
        }
    }

    pub fn for_outcome(outcome: &SubmitOutcome) -> Vec<Directive> {
        match outcome {
            SubmitOutcome::Answered(record) => Self::for_turn(record),
            SubmitOutcome::Busy | SubmitOutcome::Ignored => Vec::new(),
        }
    }
}

/// Directives not yet delivered to the client
#[derive(Debug, Default)]
pub struct DirectiveQueue {
    pending: Mutex<Vec<Directive>>,
}

impl DirectiveQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, directive: Directive) {
        self.pending.lock().push(directive);
    }

    /// Take everything queued so far, oldest first
    pub fn drain(&self) -> Vec<Directive> {
        std::mem::take(&mut *self.pending.lock())
    }
}

/// Synthesis platform backed by the client's voice list
///
/// Speech itself is reported per turn through [`Directive::for_turn`].
#[derive(Debug, Default)]
pub struct ClientSynthesis {
    voices: RwLock<Vec<VoiceInfo>>,
}

impl ClientSynthesis {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the voice list reported by the client
    pub fn set_voices(&self, voices: Vec<VoiceInfo>) {
        *self.voices.write() = voices;
    }
}

impl SpeechSynthesisPlatform for ClientSynthesis {
    fn voices(&self) -> Vec<VoiceInfo> {
        self.voices.read().clone()
    }

    fn speak(&self, utterance: Utterance) -> agro_advisor_core::Result<()> {
        tracing::trace!(chars = utterance.text.chars().count(), "Utterance handed to client");
        Ok(())
    }

    fn cancel(&self) {}

    fn name(&self) -> &str {
        "http-client"
    }
}

/// Recognition platform that queues start/abort requests for the client
#[derive(Debug, Default)]
pub struct ClientRecognition {
    queue: DirectiveQueue,
}

impl ClientRecognition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take_directives(&self) -> Vec<Directive> {
        self.queue.drain()
    }
}

impl SpeechRecognitionPlatform for ClientRecognition {
    fn start(&self, config: &RecognitionConfig) -> agro_advisor_core::Result<()> {
        self.queue.push(Directive::StartRecognition {
            config: config.clone(),
        });
        Ok(())
    }

    fn abort(&self) {
        self.queue.push(Directive::AbortRecognition);
    }

    fn name(&self) -> &str {
        "http-client"
    }
}
