//! Platform traits for the advisor
//!
//! The advisor's collaborators are reached through these traits so that
//! they can be swapped or mocked:
//!
//! ```text
//! Speech:
//!   - SpeechSynthesisPlatform: voices, speak, cancel
//!   - SpeechRecognitionPlatform: single-shot start, abort
//!
//! Display:
//!   - ChatDisplay: renders (sender, text) pairs in submission order
//! ```

mod display;
mod speech;

pub use display::ChatDisplay;
pub use speech::{SpeechRecognitionPlatform, SpeechSynthesisPlatform};
