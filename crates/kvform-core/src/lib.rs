//! Core library for OCR form key/value resolution.
//!
//! This crate provides:
//! - A typed block model for OCR analysis results (words, lines, key/value sets)
//! - Decoding of analysis-service responses into blocks
//! - Block indexing and key/value pairing with text assembly
//! - Tabular serialization of the resolved fields (CSV, JSON, plain text)

pub mod error;
pub mod models;
pub mod output;
pub mod resolve;
pub mod wire;

pub use error::{InputError, KvFormError, OutputError, Result};
pub use models::block::{Block, BlockKind, EdgeType, EntityRole, Relationship};
pub use models::config::{KvFormConfig, OutputConfig, ResolveConfig, SeparatorPolicy};
pub use output::{FieldMap, FieldRow};
pub use resolve::{
    BlockIndex, KeyValueResolver, Resolution, ResolveStats, ResolveWarning, resolve_fields,
};
pub use wire::{Extraction, InputFormat, load_fields, read_fields};
