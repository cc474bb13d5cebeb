//! Knowledge file loading
//!
//! A YAML file with the same shape as the built-in tables. Missing sections
//! keep their built-in content, so a file may override only the crop table.
//!
//! ```yaml
//! version: "1.0"
//! crops:
//!   - id: rice
//!     names: { en: Rice, hi: धान }
//!     ph_min: 5.5
//!     ph_max: 7.0
//!     note: { en: "Rice likes slightly acidic water." }
//!     keywords: [rice, paddy, धान]
//! advisories:
//!   irrigation: { en: "Water early in the morning." }
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::advisory::AdvisoryTopic;
use crate::crops::CropProfile;
use crate::quick::QuickQuestion;
use crate::text::LocalizedText;
use crate::{KnowledgeError, Result};

/// Knowledge file format
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KnowledgeFile {
    /// Version for format compatibility
    #[serde(default)]
    pub version: Option<String>,
    /// Replaces the built-in crop table when present
    #[serde(default)]
    pub crops: Option<Vec<CropProfile>>,
    /// Overrides individual advisory topics
    #[serde(default)]
    pub advisories: HashMap<AdvisoryTopic, LocalizedText>,
    /// Replaces the built-in shortcuts when present
    #[serde(default)]
    pub quick_questions: Option<Vec<QuickQuestion>>,
}

impl KnowledgeFile {
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| KnowledgeError::Parse(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            KnowledgeError::FileNotFound(path.display().to_string(), e.to_string())
        })?;

        let file = Self::from_yaml_str(&content)?;
        tracing::info!(
            file = %path.display(),
            crops = file.crops.as_ref().map(|c| c.len()).unwrap_or(0),
            advisories = file.advisories.len(),
            "Loaded knowledge file"
        );
        Ok(file)
    }
}
