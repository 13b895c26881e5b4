//! Error types for the kvform-core library.
//!
//! Structural anomalies in a block graph (dangling ids, missing value edges,
//! duplicate keys) are not errors; they are absorbed by the resolver and
//! reported as [`crate::ResolveWarning`]s. Only input-contract violations,
//! unreadable configuration files and output failures surface here.

use thiserror::Error;

/// Main error type for the kvform library.
#[derive(Error, Debug)]
pub enum KvFormError {
    /// The supplied input does not match the expected block shape.
    #[error("invalid input: {0}")]
    Input(#[from] InputError),

    /// Serializing the resolved fields failed.
    #[error("output error: {0}")]
    Output(#[from] OutputError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Input-contract violations.
#[derive(Error, Debug)]
pub enum InputError {
    /// The document is not valid JSON or does not have the expected structure.
    #[error("malformed document: {0}")]
    Json(#[from] serde_json::Error),

    /// A block has an empty identifier.
    #[error("block at position {index} has no id")]
    MissingId { index: usize },

    /// The document parsed but lacks a required section.
    #[error("unexpected document shape: {0}")]
    Shape(String),
}

/// Errors raised while writing resolved fields.
#[derive(Error, Debug)]
pub enum OutputError {
    /// CSV writer failure.
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization failure.
    #[error("failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Output buffer was not valid UTF-8.
    #[error("output is not valid UTF-8")]
    Utf8,

    /// The configured delimiter cannot be used by the CSV writer.
    #[error("delimiter {0:?} is not a single-byte character")]
    Delimiter(char),
}

/// Result type for the kvform library.
pub type Result<T> = std::result::Result<T, KvFormError>;
