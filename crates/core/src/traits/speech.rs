//! Speech platform traits

use crate::{RecognitionConfig, Result, Utterance, VoiceInfo};

/// Speech synthesis platform
///
/// A shared, mutable singleton on the host: at most one utterance plays at a
/// time. Callers cancel before speaking; the platform does not queue.
///
/// # Example
///
/// ```ignore
/// let platform: Arc<dyn SpeechSynthesisPlatform> = Arc::new(BrowserSynthesis::new());
/// platform.cancel();
/// platform.speak(utterance)?;
/// ```
pub trait SpeechSynthesisPlatform: Send + Sync + 'static {
    /// Currently installed voices (may be empty until the platform loads them)
    fn voices(&self) -> Vec<VoiceInfo>;

    /// Start speaking an utterance
    fn speak(&self, utterance: Utterance) -> Result<()>;

    /// Stop the in-flight utterance, if any. Immediate, no drain.
    fn cancel(&self);

    /// Platform name for logging
    fn name(&self) -> &str;
}

/// Speech recognition platform
///
/// Results and errors are delivered back to the recognition controller as
/// [`crate::RecognitionEvent`]s by the host.
pub trait SpeechRecognitionPlatform: Send + Sync + 'static {
    /// Begin a recognition session with the given configuration
    fn start(&self, config: &RecognitionConfig) -> Result<()>;

    /// Abort the active session, if any
    fn abort(&self);

    /// Platform name for logging
    fn name(&self) -> &str;
}
