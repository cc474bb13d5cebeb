//! Speech synthesis controller
//!
//! Utterances never queue. Every `speak` cancels whatever is playing and then
//! starts the new utterance, so the newest reply always pre-empts the last.

use std::sync::Arc;

use agro_advisor_config::VoiceSettings;
use agro_advisor_core::{Error, Language, SpeechSynthesisPlatform, Utterance, VoiceTarget};

use crate::control::ControlState;
use crate::profile::VoiceProfile;
use crate::selection::VoiceSelector;
use crate::Result;

pub struct SynthesisController {
    platform: Option<Arc<dyn SpeechSynthesisPlatform>>,
    profile: VoiceProfile,
    rate: f32,
    pitch: f32,
}

impl SynthesisController {
    /// `platform` is `None` when the host offers no synthesis
    pub fn new(
        platform: Option<Arc<dyn SpeechSynthesisPlatform>>,
        profile: VoiceProfile,
        rate: f32,
        pitch: f32,
    ) -> Self {
        if platform.is_none() {
            tracing::warn!("Speech synthesis unavailable; replies will be text only");
        }
        Self {
            platform,
            profile,
            rate,
            pitch,
        }
    }

    pub fn from_settings(
        platform: Option<Arc<dyn SpeechSynthesisPlatform>>,
        settings: &VoiceSettings,
    ) -> Result<Self> {
        let profile = VoiceProfile::new(VoiceSelector::from_settings(settings)?);
        Ok(Self::new(platform, profile, settings.rate, settings.pitch))
    }

    pub fn is_available(&self) -> bool {
        self.platform.is_some()
    }

    pub fn profile(&self) -> &VoiceProfile {
        &self.profile
    }

    pub fn control_state(&self, language: Language) -> ControlState {
        ControlState::stop_voice(self.is_available(), language)
    }

    /// Platform reported a new voice list
    pub fn on_voices_changed(&self) {
        self.profile.invalidate();
    }

    /// Build the utterance for `text` without playing it
    pub fn prepare(&self, text: &str, language: Language) -> Utterance {
        let voice = match &self.platform {
            Some(platform) => self.profile.resolve(language, || platform.voices()),
            None => None,
        };

        let target = match voice {
            Some(voice) => VoiceTarget::Voice { voice },
            None => VoiceTarget::Language {
                tag: language.locale_tag().to_string(),
            },
        };

        Utterance {
            text: text.to_string(),
            target,
            rate: self.rate,
            pitch: self.pitch,
        }
    }

    /// Cancel the in-flight utterance, then speak `text`
    pub fn speak(&self, text: &str, language: Language) -> Result<Utterance> {
        let platform = self
            .platform
            .as_ref()
            .ok_or_else(|| Error::CapabilityUnavailable("speech synthesis".to_string()))?;

        let utterance = self.prepare(text, language);

        platform.cancel();
        platform.speak(utterance.clone())?;

        tracing::debug!(
            platform = platform.name(),
            language = %language,
            chars = text.chars().count(),
            "Utterance started"
        );
        Ok(utterance)
    }

    /// Stop playback immediately
    pub fn stop(&self) {
        if let Some(platform) = &self.platform {
            platform.cancel();
            tracing::debug!(platform = platform.name(), "Speech stopped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agro_advisor_core::VoiceInfo;
    use parking_lot::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Cancel,
        Speak(String),
    }

    struct MockSynthesis {
        voices: Mutex<Vec<VoiceInfo>>,
        calls: Mutex<Vec<Call>>,
        voice_queries: Mutex<usize>,
    }

    impl MockSynthesis {
        fn new(voices: Vec<VoiceInfo>) -> Arc<Self> {
            Arc::new(Self {
                voices: Mutex::new(voices),
                calls: Mutex::new(Vec::new()),
                voice_queries: Mutex::new(0),
            })
        }
    }

    impl SpeechSynthesisPlatform for MockSynthesis {
        fn voices(&self) -> Vec<VoiceInfo> {
            *self.voice_queries.lock() += 1;
            self.voices.lock().clone()
        }

        fn speak(&self, utterance: Utterance) -> agro_advisor_core::Result<()> {
            self.calls.lock().push(Call::Speak(utterance.text));
            Ok(())
        }

        fn cancel(&self) {
            self.calls.lock().push(Call::Cancel);
        }

        fn name(&self) -> &str {
            "mock"
        }
    }

    fn controller(platform: Arc<MockSynthesis>) -> SynthesisController {
        let platform: Arc<dyn SpeechSynthesisPlatform> = platform;
        SynthesisController::from_settings(Some(platform), &VoiceSettings::default()).unwrap()
    }

    #[test]
    fn test_every_speak_cancels_first() {
        let platform = MockSynthesis::new(vec![VoiceInfo::new("Heera", "en-IN")]);
        let synth = controller(platform.clone());

        synth.speak("first", Language::English).unwrap();
        synth.speak("second", Language::English).unwrap();

        assert_eq!(
            *platform.calls.lock(),
            vec![
                Call::Cancel,
                Call::Speak("first".into()),
                Call::Cancel,
                Call::Speak("second".into()),
            ]
        );
    }

    #[test]
    fn test_utterance_parameters() {
        let platform = MockSynthesis::new(vec![VoiceInfo::new("Heera", "en-IN")]);
        let synth = controller(platform);

        let utterance = synth.speak("hello", Language::English).unwrap();
        assert_eq!(utterance.rate, 1.0);
        assert_eq!(utterance.pitch, 1.0);
        assert!(matches!(utterance.target, VoiceTarget::Voice { ref voice } if voice.name == "Heera"));
    }

    #[test]
    fn test_language_tag_when_no_voice() {
        let platform = MockSynthesis::new(Vec::new());
        let synth = controller(platform);

        let utterance = synth.speak("नमस्ते", Language::Hindi).unwrap();
        assert_eq!(
            utterance.target,
            VoiceTarget::Language {
                tag: "hi-IN".to_string()
            }
        );
    }

    #[test]
    fn test_voices_changed_reselects() {
        let platform = MockSynthesis::new(Vec::new());
        let synth = controller(platform.clone());

        let utterance = synth.speak("one", Language::Hindi).unwrap();
        assert!(matches!(utterance.target, VoiceTarget::Language { .. }));

        *platform.voices.lock() = vec![VoiceInfo::new("Kalpana", "hi-IN")];
        let utterance = synth.speak("two", Language::Hindi).unwrap();
        // still cached from before the change notification
        assert!(matches!(utterance.target, VoiceTarget::Language { .. }));

        synth.on_voices_changed();
        let utterance = synth.speak("three", Language::Hindi).unwrap();
        assert!(matches!(utterance.target, VoiceTarget::Voice { ref voice } if voice.name == "Kalpana"));
        assert_eq!(*platform.voice_queries.lock(), 2);
    }

    #[test]
    fn test_unavailable_platform() {
        let synth = SynthesisController::new(None, VoiceProfile::default(), 1.0, 1.0);

        assert!(!synth.is_available());
        assert!(!synth.control_state(Language::English).enabled);
        assert!(matches!(
            synth.speak("hello", Language::English),
            Err(crate::PipelineError::Platform(Error::CapabilityUnavailable(_)))
        ));
        // no-op
        synth.stop();
    }

    #[test]
    fn test_stop_cancels() {
        let platform = MockSynthesis::new(Vec::new());
        let synth = controller(platform.clone());
        synth.stop();
        assert_eq!(*platform.calls.lock(), vec![Call::Cancel]);
    }
}
