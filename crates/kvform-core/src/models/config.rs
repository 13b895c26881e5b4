//! Configuration structures for resolution and output.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{KvFormError, Result};

/// Main configuration for the kvform pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KvFormConfig {
    /// Resolution configuration.
    pub resolve: ResolveConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

/// Key/value resolution configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveConfig {
    /// Drop entries whose assembled key text is empty.
    ///
    /// Off by default; an empty key is a legitimate resolver output.
    pub skip_empty_keys: bool,

    /// Record absorbed anomalies as warnings on the resolution.
    pub collect_warnings: bool,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            skip_empty_keys: false,
            collect_warnings: true,
        }
    }
}

/// How field text containing the delimiter is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeparatorPolicy {
    /// Remove every delimiter character from the text.
    #[default]
    Strip,
    /// Keep the text and quote the field.
    Quote,
}

/// Tabular output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Field delimiter.
    pub delimiter: char,

    /// Header of the field-name column.
    pub key_header: String,

    /// Header of the field-value column.
    pub value_header: String,

    /// Delimiter handling inside field text.
    pub separator_policy: SeparatorPolicy,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            key_header: "Key".to_string(),
            value_header: "Value".to_string(),
            separator_policy: SeparatorPolicy::Strip,
        }
    }
}

impl KvFormConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| KvFormError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| KvFormError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
