//! Decoding of analysis-service responses.

pub mod nanonets;
pub mod textract;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::models::config::ResolveConfig;
use crate::output::{FieldRow, rows_from_map};
use crate::resolve::{BlockIndex, KeyValueResolver, Resolution, ResolveStats, ResolveWarning};

pub use nanonets::predictions_to_rows;
pub use textract::{blocks_from_value, parse_blocks};

/// Supported response document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputFormat {
    /// Block graph from a form analysis (`Blocks` array).
    #[default]
    Textract,
    /// Labelled predictions (`result[].prediction[]`).
    Nanonets,
}

/// Output rows extracted from one response document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Extraction {
    /// Field rows in output order.
    pub rows: Vec<FieldRow>,
    /// Anomalies absorbed while resolving a block graph.
    pub warnings: Vec<ResolveWarning>,
    /// Resolution counters (zero for prediction responses).
    pub stats: ResolveStats,
}

impl From<Resolution> for Extraction {
    fn from(resolution: Resolution) -> Self {
        Self {
            rows: rows_from_map(resolution.fields),
            warnings: resolution.warnings,
            stats: resolution.stats,
        }
    }
}

/// Turn a response document into output rows.
///
/// Block graphs go through [`KeyValueResolver`], so repeated key text keeps
/// only its last value. Prediction responses keep one row per prediction.
pub fn load_fields(json: &str, format: InputFormat, config: &ResolveConfig) -> Result<Extraction> {
    match format {
        InputFormat::Textract => {
            let blocks = parse_blocks(json)?;
            let index = BlockIndex::build(&blocks);
            Ok(KeyValueResolver::new(&index)
                .with_config(config.clone())
                .resolve()
                .into())
        }
        InputFormat::Nanonets => Ok(Extraction {
            rows: predictions_to_rows(json)?,
            ..Extraction::default()
        }),
    }
}

/// Read a response document from disk and extract its rows.
pub fn read_fields(path: &Path, format: InputFormat, config: &ResolveConfig) -> Result<Extraction> {
    info!("Reading {:?} response from {}", format, path.display());
    let json = std::fs::read_to_string(path)?;
    load_fields(&json, format, config)
}
