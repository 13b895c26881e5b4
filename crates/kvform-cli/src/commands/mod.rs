//! Subcommands and helpers shared between them.

pub mod batch;
pub mod config;
pub mod resolve;

use std::path::{Path, PathBuf};

use tracing::debug;

use kvform_core::models::config::{KvFormConfig, OutputConfig};
use kvform_core::output::{format_text, to_csv_string, to_json};
use kvform_core::{FieldRow, InputFormat};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Two-column CSV table
    Csv,
    /// JSON array of key/value objects
    Json,
    /// key:value lines
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Text => "txt",
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum ResponseFormat {
    /// Form analysis response with a Blocks array
    Textract,
    /// Labelled predictions response
    Nanonets,
}

impl From<ResponseFormat> for InputFormat {
    fn from(format: ResponseFormat) -> Self {
        match format {
            ResponseFormat::Textract => InputFormat::Textract,
            ResponseFormat::Nanonets => InputFormat::Nanonets,
        }
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kvform")
        .join("config.json")
}

/// Load the explicit config file, else the default one if present, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<KvFormConfig> {
    if let Some(path) = config_path {
        return Ok(KvFormConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config from {}", default_path.display());
        Ok(KvFormConfig::from_file(&default_path)?)
    } else {
        Ok(KvFormConfig::default())
    }
}

pub fn format_fields(
    rows: &[FieldRow],
    format: OutputFormat,
    config: &OutputConfig,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Csv => Ok(to_csv_string(rows, config)?),
        OutputFormat::Json => Ok(to_json(rows)? + "\n"),
        OutputFormat::Text => Ok(format_text(rows)),
    }
}
