//! Cached per-language voice choice
//!
//! The choice is computed lazily on first use after a voice-list change and
//! reused until the platform reports another change.

use std::collections::HashMap;

use agro_advisor_core::{Language, VoiceInfo};
use parking_lot::RwLock;

use crate::selection::VoiceSelector;

/// Language → selected voice (or none), invalidated on voice-list changes
#[derive(Debug)]
pub struct VoiceProfile {
    selector: VoiceSelector,
    cache: RwLock<HashMap<Language, Option<VoiceInfo>>>,
}

impl VoiceProfile {
    pub fn new(selector: VoiceSelector) -> Self {
        Self {
            selector,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn selector(&self) -> &VoiceSelector {
        &self.selector
    }

    /// Forget every cached choice
    pub fn invalidate(&self) {
        self.cache.write().clear();
        tracing::debug!("Voice profile invalidated");
    }

    /// Cached choice for `language`; `voices` is only called on a miss
    pub fn resolve<F>(&self, language: Language, voices: F) -> Option<VoiceInfo>
    where
        F: FnOnce() -> Vec<VoiceInfo>,
    {
        if let Some(choice) = self.cache.read().get(&language) {
            return choice.clone();
        }

        let choice = self.selector.select(&voices(), language);
        self.cache.write().insert(language, choice.clone());
        choice
    }

    /// Whether `language` has a cached entry
    pub fn is_cached(&self, language: Language) -> bool {
        self.cache.read().contains_key(&language)
    }
}

impl Default for VoiceProfile {
    fn default() -> Self {
        Self::new(VoiceSelector::default())
    }
}
