//! Voice I/O adapter
//!
//! Two independent capabilities, each treated as a shared platform resource
//! with acquire/cancel semantics:
//! - **Synthesis**: language-aware voice selection with a cached
//!   [`VoiceProfile`], and last-write-wins playback (every new utterance
//!   cancels the previous one first)
//! - **Recognition**: single-shot sessions whose final transcript is handed
//!   back for automatic submission; errors end the session without retry
//!
//! A missing platform never faults: the matching [`ControlState`] reports the
//! control as disabled with an explanatory label.

pub mod control;
pub mod profile;
pub mod recognition;
pub mod selection;
pub mod synthesis;

pub use control::ControlState;
pub use profile::VoiceProfile;
pub use recognition::{RecognitionController, RecognitionState};
pub use selection::{ChainTier, VoiceSelector};
pub use synthesis::SynthesisController;

use thiserror::Error;

/// Voice adapter errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error("Invalid voice configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Platform(#[from] agro_advisor_core::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
