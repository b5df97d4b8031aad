//! Configuration structures for the extraction engine.
//!
//! The original deployments of this system diverged into several
//! near-duplicate extractor variants with conflicting rule sets (different
//! amount keyword priorities, different date output formats, different
//! store scan depths). Those variants are expressed here as configuration
//! over a single engine, read once at startup and immutable afterwards.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ReciboError, Result};

/// Main configuration for the recibo pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReciboConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Output shaping configuration.
    pub output: OutputConfig,
}

/// Extraction configuration for the three field extractors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Store name matcher configuration.
    pub store: StoreConfig,

    /// Amount extractor configuration.
    pub amount: AmountConfig,

    /// Date extractor configuration.
    pub date: DateConfig,
}

/// Store name matcher configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Maximum number of lines scanned in the ordinary per-line alias pass.
    /// `None` scans the whole transcript. High-priority aliases are always
    /// scanned across the entire text regardless of this limit.
    pub scan_limit: Option<usize>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { scan_limit: None }
    }
}

/// Amount extractor configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AmountConfig {
    /// Keyword tiers in priority order. Tiers are tried in sequence; within
    /// a tier the last matching line wins (receipts restate the total near
    /// the bottom).
    pub keyword_tiers: Vec<Vec<String>>,

    /// Currency label used for the normalized output.
    pub currency: String,
}

impl AmountConfig {
    fn default_keyword_tiers() -> Vec<Vec<String>> {
        vec![
            vec!["balance due".to_string()],
            vec!["credit".to_string()],
            vec![
                "total".to_string(),
                "paid".to_string(),
                "amount".to_string(),
            ],
        ]
    }
}

impl Default for AmountConfig {
    fn default() -> Self {
        Self {
            keyword_tiers: Self::default_keyword_tiers(),
            currency: "CAD".to_string(),
        }
    }
}

/// Date extractor configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DateConfig {
    /// Output format style.
    pub style: DateStyle,
}

impl Default for DateConfig {
    fn default() -> Self {
        Self {
            style: DateStyle::AsMatched,
        }
    }
}

/// Output format for extracted dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateStyle {
    /// Timestamp-line matches keep their original slash style
    /// (`2024/01/15`, `01/15/2024`); structural-scan matches are
    /// normalized to `YYYY-MM-DD`. This mixed output replicates the
    /// historical behavior of the system.
    AsMatched,

    /// Every match is normalized to `YYYY-MM-DD`.
    Iso,
}

impl Default for DateStyle {
    fn default() -> Self {
        Self::AsMatched
    }
}

/// Output shaping configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Truncation limit when echoing the raw transcript alongside the
    /// extracted fields.
    pub max_raw_text: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { max_raw_text: 500 }
    }
}

impl ReciboConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| ReciboError::Config(e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| ReciboError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
