//! Speech recognition controller
//!
//! Single-shot sessions only: one final result, no interim results, one
//! alternative. Starting while a session is active aborts the old one first.
//! Platform errors are logged and end the session; there is no retry.

use std::sync::Arc;

use agro_advisor_core::{
    Error, Language, RecognitionConfig, RecognitionEvent, SpeechRecognitionPlatform,
};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::control::ControlState;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecognitionState {
    Inactive,
    Listening,
}

pub struct RecognitionController {
    platform: Option<Arc<dyn SpeechRecognitionPlatform>>,
    state: Mutex<RecognitionState>,
}

impl RecognitionController {
    /// `platform` is `None` when the host offers no recognition
    pub fn new(platform: Option<Arc<dyn SpeechRecognitionPlatform>>) -> Self {
        if platform.is_none() {
            tracing::warn!("Speech recognition unavailable; voice input disabled");
        }
        Self {
            platform,
            state: Mutex::new(RecognitionState::Inactive),
        }
    }

    pub fn is_available(&self) -> bool {
        self.platform.is_some()
    }

    pub fn state(&self) -> RecognitionState {
        *self.state.lock()
    }

    pub fn control_state(&self, language: Language) -> ControlState {
        ControlState::voice_input(
            self.is_available(),
            self.state() == RecognitionState::Listening,
            language,
        )
    }

    /// Begin a single-shot session in `language`
    pub fn start(&self, language: Language) -> Result<()> {
        let platform = self
            .platform
            .as_ref()
            .ok_or_else(|| Error::CapabilityUnavailable("speech recognition".to_string()))?;

        let mut state = self.state.lock();
        if *state == RecognitionState::Listening {
            platform.abort();
            tracing::debug!(platform = platform.name(), "Previous recognition aborted");
        }

        let config = RecognitionConfig::single_shot(language.locale_tag());
        if let Err(e) = platform.start(&config) {
            *state = RecognitionState::Inactive;
            tracing::warn!(platform = platform.name(), error = %e, "Recognition failed to start");
            return Err(e.into());
        }

        *state = RecognitionState::Listening;
        tracing::debug!(
            platform = platform.name(),
            language = %config.language_tag,
            "Recognition started"
        );
        Ok(())
    }

    /// Abort the active session, if any
    pub fn stop(&self) {
        let mut state = self.state.lock();
        if *state == RecognitionState::Listening {
            if let Some(platform) = &self.platform {
                platform.abort();
            }
            *state = RecognitionState::Inactive;
        }
    }

    /// Feed a platform event
    ///
    /// Returns the transcript to submit when a non-blank final result arrives
    /// for an active session. Every event ends the session.
    pub fn handle_event(&self, event: RecognitionEvent) -> Option<String> {
        let mut state = self.state.lock();
        let was_listening = *state == RecognitionState::Listening;
        *state = RecognitionState::Inactive;

        match event {
            RecognitionEvent::Result { transcript } => {
                if !was_listening {
                    tracing::debug!("Recognition result ignored, no active session");
                    return None;
                }
                let transcript = transcript.trim();
                if transcript.is_empty() {
                    return None;
                }
                tracing::debug!(chars = transcript.chars().count(), "Recognition result");
                Some(transcript.to_string())
            },
            RecognitionEvent::Error { code } => {
                tracing::warn!(code = %code, "Speech recognition error");
                None
            },
            RecognitionEvent::End => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MockRecognition {
        starts: Mutex<Vec<RecognitionConfig>>,
        aborts: Mutex<usize>,
        fail_start: bool,
    }

    impl SpeechRecognitionPlatform for MockRecognition {
        fn start(&self, config: &RecognitionConfig) -> agro_advisor_core::Result<()> {
            if self.fail_start {
                return Err(Error::Recognition("not-allowed".to_string()));
            }
            self.starts.lock().push(config.clone());
            Ok(())
        }

        fn abort(&self) {
            *self.aborts.lock() += 1;
        }

        fn name(&self) -> &str {
            "mock"
        }
    }

    fn controller(platform: Arc<MockRecognition>) -> RecognitionController {
        let platform: Arc<dyn SpeechRecognitionPlatform> = platform;
        RecognitionController::new(Some(platform))
    }

    #[test]
    fn test_single_shot_configuration() {
        let platform = Arc::new(MockRecognition::default());
        let recognition = controller(platform.clone());

        recognition.start(Language::English).unwrap();
        assert_eq!(recognition.state(), RecognitionState::Listening);

        let starts = platform.starts.lock();
        assert_eq!(starts.len(), 1);
        assert_eq!(starts[0].language_tag, "en-IN");
        assert!(!starts[0].interim_results);
        assert!(!starts[0].continuous);
        assert_eq!(starts[0].max_alternatives, 1);
    }

    #[test]
    fn test_result_is_returned_for_submission() {
        let recognition = controller(Arc::new(MockRecognition::default()));
        recognition.start(Language::Hindi).unwrap();

        let transcript = recognition.handle_event(RecognitionEvent::Result {
            transcript: " pH 6.5 पर कौन सी फसल ".to_string(),
        });
        assert_eq!(transcript.as_deref(), Some("pH 6.5 पर कौन सी फसल"));
        assert_eq!(recognition.state(), RecognitionState::Inactive);
    }

    #[test]
    fn test_error_ends_session_without_retry() {
        let platform = Arc::new(MockRecognition::default());
        let recognition = controller(platform.clone());
        recognition.start(Language::English).unwrap();

        let transcript = recognition.handle_event(RecognitionEvent::Error {
            code: "no-speech".to_string(),
        });
        assert!(transcript.is_none());
        assert_eq!(recognition.state(), RecognitionState::Inactive);
        assert_eq!(platform.starts.lock().len(), 1);
    }

    #[test]
    fn test_restart_aborts_previous() {
        let platform = Arc::new(MockRecognition::default());
        let recognition = controller(platform.clone());

        recognition.start(Language::English).unwrap();
        recognition.start(Language::English).unwrap();

        assert_eq!(*platform.aborts.lock(), 1);
        assert_eq!(platform.starts.lock().len(), 2);
    }

    #[test]
    fn test_stale_result_ignored() {
        let recognition = controller(Arc::new(MockRecognition::default()));
        recognition.start(Language::English).unwrap();
        recognition.stop();

        let transcript = recognition.handle_event(RecognitionEvent::Result {
            transcript: "hello".to_string(),
        });
        assert!(transcript.is_none());
    }

    #[test]
    fn test_start_failure_stays_inactive() {
        let recognition = controller(Arc::new(MockRecognition {
            fail_start: true,
            ..Default::default()
        }));

        assert!(recognition.start(Language::English).is_err());
        assert_eq!(recognition.state(), RecognitionState::Inactive);
    }

    #[test]
    fn test_unavailable_platform_disables_control() {
        let recognition = RecognitionController::new(None);

        let control = recognition.control_state(Language::English);
        assert!(!control.enabled);
        assert!(matches!(
            recognition.start(Language::English),
            Err(crate::PipelineError::Platform(Error::CapabilityUnavailable(_)))
        ));
    }
}
