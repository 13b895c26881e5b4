//! Textract `AnalyzeDocument` (FORMS) response decoding.
//!
//! Accepts either the full response object (`{"Blocks": [...], ...}`) or a
//! bare array of block objects. Field names are PascalCase as returned by the
//! service.

use serde::Deserialize;
use serde_json::Value;
use tracing::trace;

use crate::error::InputError;
use crate::models::block::{Block, BlockKind, EdgeType, EntityRole, Relationship};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawBlock {
    #[serde(default)]
    id: Option<String>,
    block_type: String,
    #[serde(default)]
    entity_types: Option<Vec<String>>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    relationships: Option<Vec<RawRelationship>>,
    #[serde(default)]
    confidence: Option<f32>,
    #[serde(default)]
    page: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawRelationship {
    #[serde(rename = "Type")]
    kind: String,
    #[serde(rename = "Ids", default)]
    ids: Option<Vec<String>>,
}

/// Parse a response document into blocks.
pub fn parse_blocks(json: &str) -> Result<Vec<Block>, InputError> {
    let value: Value = serde_json::from_str(json)?;
    blocks_from_value(value)
}

/// Convert an already-parsed response document into blocks.
pub fn blocks_from_value(value: Value) -> Result<Vec<Block>, InputError> {
    let raw = match value {
        array @ Value::Array(_) => array,
        Value::Object(mut map) => map
            .remove("Blocks")
            .ok_or_else(|| InputError::Shape("response has no Blocks array".to_string()))?,
        other => {
            return Err(InputError::Shape(format!(
                "expected an object or array, found {}",
                json_type_name(&other)
            )));
        }
    };

    let raw: Vec<RawBlock> = serde_json::from_value(raw)?;
    raw.into_iter()
        .enumerate()
        .map(|(index, block)| convert(index, block))
        .collect()
}

fn convert(index: usize, raw: RawBlock) -> Result<Block, InputError> {
    let id = raw
        .id
        .filter(|id| !id.is_empty())
        .ok_or(InputError::MissingId { index })?;

    let text = raw.text.unwrap_or_default();
    let kind = match raw.block_type.as_str() {
        "KEY_VALUE_SET" => BlockKind::KeyValueSet {
            role: entity_role(raw.entity_types.as_deref().unwrap_or_default()),
        },
        "WORD" => BlockKind::Word { text },
        "LINE" => BlockKind::Line { text },
        _ => BlockKind::Other,
    };

    let relationships = raw
        .relationships
        .unwrap_or_default()
        .into_iter()
        .filter_map(|rel| {
            let edge = match rel.kind.as_str() {
                "VALUE" => EdgeType::Value,
                "CHILD" => EdgeType::Child,
                other => {
                    trace!("Dropping {} relationship on block {}", other, id);
                    return None;
                }
            };
            Some(Relationship {
                edge,
                ids: rel.ids.unwrap_or_default(),
            })
        })
        .collect();

    Ok(Block {
        id,
        kind,
        relationships,
        confidence: raw.confidence,
        page: raw.page,
    })
}

/// `KEY` takes precedence so a block is never both key and value.
fn entity_role(entity_types: &[String]) -> EntityRole {
    if entity_types.iter().any(|t| t == "KEY") {
        EntityRole::Key
    } else if entity_types.iter().any(|t| t == "VALUE") {
        EntityRole::Value
    } else {
        EntityRole::None
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
