//! Synthesis voice selection policy
//!
//! Each language has an ordered fallback chain of tiers. The first tier with
//! at least one installed voice wins; inside a tier, a voice whose name
//! matches the preferred-name pattern beats the others. The platform default
//! is always the last tier.
//!
//! Default chains:
//! - English: `en-IN` → `en-GB` → `en-US` → any `en-*` → platform default
//! - Hindi: `hi-IN` → any `hi-*` → `en-IN` → platform default

use agro_advisor_config::VoiceSettings;
use agro_advisor_core::{Language, VoiceInfo};
use regex::Regex;

use crate::{PipelineError, Result};

/// One step of a fallback chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainTier {
    /// Exact locale tag, e.g. `hi-IN`
    Exact(String),
    /// Any region of a primary language, written `hi-*`
    Primary(String),
    /// Voice flagged default by the platform, else its first voice
    PlatformDefault,
}

impl ChainTier {
    /// Parse a configured tag: `xx-*` is a primary tier, `default` the
    /// platform default, anything else an exact tag.
    pub fn parse(tag: &str) -> Self {
        let tag = tag.trim();
        if tag.eq_ignore_ascii_case("default") {
            ChainTier::PlatformDefault
        } else if let Some(primary) = tag.strip_suffix("-*") {
            ChainTier::Primary(primary.to_ascii_lowercase())
        } else {
            ChainTier::Exact(tag.to_string())
        }
    }

    fn candidates<'a>(&self, voices: &'a [VoiceInfo]) -> Vec<&'a VoiceInfo> {
        match self {
            ChainTier::Exact(tag) => voices.iter().filter(|v| v.matches_tag(tag)).collect(),
            ChainTier::Primary(primary) => {
                voices.iter().filter(|v| v.matches_primary(primary)).collect()
            },
            ChainTier::PlatformDefault => voices
                .iter()
                .find(|v| v.default)
                .or_else(|| voices.first())
                .into_iter()
                .collect(),
        }
    }
}

/// Per-language fallback chains plus the preferred-name pattern
#[derive(Debug, Clone)]
pub struct VoiceSelector {
    english: Vec<ChainTier>,
    hindi: Vec<ChainTier>,
    preferred_name: Option<Regex>,
}

impl VoiceSelector {
    pub fn new(english: &[String], hindi: &[String], preferred_name: Option<&str>) -> Result<Self> {
        let preferred_name = preferred_name
            .filter(|p| !p.trim().is_empty())
            .map(Regex::new)
            .transpose()
            .map_err(|e| PipelineError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            english: build_chain(english),
            hindi: build_chain(hindi),
            preferred_name,
        })
    }

    pub fn from_settings(settings: &VoiceSettings) -> Result<Self> {
        Self::new(
            &settings.english_chain,
            &settings.hindi_chain,
            Some(&settings.preferred_name_pattern),
        )
    }

    pub fn chain(&self, language: Language) -> &[ChainTier] {
        match language {
            Language::English => &self.english,
            Language::Hindi => &self.hindi,
        }
    }

    /// Pick a voice for `language` from the installed voices
    pub fn select(&self, voices: &[VoiceInfo], language: Language) -> Option<VoiceInfo> {
        for tier in self.chain(language) {
            let candidates = tier.candidates(voices);
            if candidates.is_empty() {
                continue;
            }

            let preferred = self.preferred_name.as_ref().and_then(|pattern| {
                candidates
                    .iter()
                    .find(|voice| pattern.is_match(&voice.name))
                    .copied()
            });
            let chosen = preferred.unwrap_or(candidates[0]);

            tracing::debug!(
                language = %language,
                tier = ?tier,
                voice = %chosen.name,
                "Synthesis voice selected"
            );
            return Some(chosen.clone());
        }

        tracing::debug!(language = %language, voices = voices.len(), "No synthesis voice available");
        None
    }
}

impl Default for VoiceSelector {
    fn default() -> Self {
        let settings = VoiceSettings::default();
        Self {
            english: build_chain(&settings.english_chain),
            hindi: build_chain(&settings.hindi_chain),
            preferred_name: Regex::new(&settings.preferred_name_pattern).ok(),
        }
    }
}

/// Parse tags and make sure the chain ends with the platform default
fn build_chain(tags: &[String]) -> Vec<ChainTier> {
    let mut chain: Vec<ChainTier> = tags.iter().map(|t| ChainTier::parse(t)).collect();
    if chain.last() != Some(&ChainTier::PlatformDefault) {
        chain.retain(|t| *t != ChainTier::PlatformDefault);
        chain.push(ChainTier::PlatformDefault);
    }
    chain
}
