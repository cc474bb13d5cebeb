//! Core traits and types for the agronomy advisor
//!
//! This crate provides foundational types used across all other crates:
//! - Supported languages (English, Hindi) and their locale tags
//! - Chat message types exchanged with the display collaborator
//! - Voice types (voices, utterances, recognition configuration and events)
//! - Platform traits for speech synthesis, speech recognition and display
//! - Error types

pub mod conversation;
pub mod error;
pub mod language;
pub mod traits;
pub mod voice_config;

pub use conversation::{ChatMessage, Sender};
pub use error::{Error, Result};
pub use language::{Language, Script};
pub use voice_config::{
    RecognitionConfig, RecognitionEvent, Utterance, VoiceInfo, VoiceTarget,
};

pub use traits::{ChatDisplay, SpeechRecognitionPlatform, SpeechSynthesisPlatform};
