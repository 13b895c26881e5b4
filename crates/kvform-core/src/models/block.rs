//! Typed OCR block graph.

use serde::{Deserialize, Serialize};

/// Role of a key/value set block within a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityRole {
    /// Field label.
    Key,
    /// Field value.
    Value,
    /// Unrecognized role; ignored for pairing.
    #[default]
    None,
}

/// What a block represents. Text only exists on words and lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockKind {
    /// Form key or value marker.
    KeyValueSet { role: EntityRole },
    /// Single recognized word.
    Word { text: String },
    /// Recognized line of text.
    Line { text: String },
    /// Any other block (page, table, cell, selection element, ...).
    Other,
}

/// Type of a relationship edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeType {
    /// Key block to its paired value block.
    Value,
    /// Container block to its constituent word/line blocks.
    Child,
}

/// A typed, directed edge from one block to one or more others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    /// Edge type.
    pub edge: EdgeType,
    /// Target block ids, in order.
    pub ids: Vec<String>,
}

impl Relationship {
    pub fn new(edge: EdgeType, ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            edge,
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }
}

/// A node in the OCR result graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Identifier, unique within one analysis result.
    pub id: String,

    /// Block kind (and role or text where applicable).
    pub kind: BlockKind,

    /// Outgoing edges, in source order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relationships: Vec<Relationship>,

    /// Recognition confidence (0 - 100) reported by the analysis service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,

    /// 1-based page number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

impl Block {
    /// Create a block with no relationships.
    pub fn new(id: impl Into<String>, kind: BlockKind) -> Self {
        Self {
            id: id.into(),
            kind,
            relationships: Vec::new(),
            confidence: None,
            page: None,
        }
    }

    pub fn word(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, BlockKind::Word { text: text.into() })
    }

    pub fn line(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, BlockKind::Line { text: text.into() })
    }

    pub fn key(id: impl Into<String>) -> Self {
        Self::new(id, BlockKind::KeyValueSet { role: EntityRole::Key })
    }

    pub fn value(id: impl Into<String>) -> Self {
        Self::new(id, BlockKind::KeyValueSet { role: EntityRole::Value })
    }

    pub fn other(id: impl Into<String>) -> Self {
        Self::new(id, BlockKind::Other)
    }

    /// Append a `Child` relationship.
    pub fn with_children(mut self, ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.relationships.push(Relationship::new(EdgeType::Child, ids));
        self
    }

    /// Append a `Value` relationship pointing at a single block.
    pub fn with_value(mut self, id: impl Into<String>) -> Self {
        let id: String = id.into();
        self.relationships.push(Relationship::new(EdgeType::Value, [id]));
        self
    }

    /// Set the recognition confidence (0 - 100).
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Set the 1-based page number.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Literal text for word and line blocks.
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            BlockKind::Word { text } | BlockKind::Line { text } => Some(text),
            _ => None,
        }
    }

    /// Entity role for key/value set blocks, `None` otherwise.
    pub fn role(&self) -> Option<EntityRole> {
        match self.kind {
            BlockKind::KeyValueSet { role } => Some(role),
            _ => None,
        }
    }

    pub fn is_key(&self) -> bool {
        self.role() == Some(EntityRole::Key)
    }

    pub fn is_value(&self) -> bool {
        self.role() == Some(EntityRole::Value)
    }

    /// First target of the first `Value` relationship.
    ///
    /// Extra targets on that edge are ignored.
    pub fn value_target(&self) -> Option<&str> {
        self.relationships
            .iter()
            .find(|r| r.edge == EdgeType::Value)
            .and_then(|r| r.ids.first())
            .map(String::as_str)
    }

    /// Ids of every `Child` relationship, in relationship then target order.
    pub fn child_ids(&self) -> impl Iterator<Item = &str> {
        self.relationships
            .iter()
            .filter(|r| r.edge == EdgeType::Child)
            .flat_map(|r| r.ids.iter().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_text_only_on_words_and_lines() {
        assert_eq!(Block::word("w", "Total").text(), Some("Total"));
        assert_eq!(Block::line("l", "Total due").text(), Some("Total due"));
        assert_eq!(Block::key("k").text(), None);
        assert_eq!(Block::other("p").text(), None);
    }

    #[test]
    fn test_value_target_uses_first_id_of_first_edge() {
        let mut block = Block::key("k");
        block.relationships.push(Relationship::new(EdgeType::Value, ["v1", "v2"]));
        block.relationships.push(Relationship::new(EdgeType::Value, ["v3"]));

        assert_eq!(block.value_target(), Some("v1"));
    }

    #[test]
    fn test_value_target_absent() {
        let block = Block::key("k").with_children(["w1"]);
        assert_eq!(block.value_target(), None);

        let mut empty_edge = Block::key("k2");
        empty_edge
            .relationships
            .push(Relationship::new(EdgeType::Value, Vec::<String>::new()));
        assert_eq!(empty_edge.value_target(), None);
    }

    #[test]
    fn test_child_ids_span_all_child_edges() {
        let block = Block::value("v")
            .with_children(["w1", "w2"])
            .with_value("ignored")
            .with_children(["w3"]);

        let ids: Vec<&str> = block.child_ids().collect();
        assert_eq!(ids, vec!["w1", "w2", "w3"]);
    }

    #[test]
    fn test_roles() {
        assert!(Block::key("k").is_key());
        assert!(Block::value("v").is_value());
        assert_eq!(Block::word("w", "x").role(), None);
        let unknown = Block::new("u", BlockKind::KeyValueSet { role: EntityRole::None });
        assert!(!unknown.is_key() && !unknown.is_value());
    }

    #[test]
    fn test_serde_shape() {
        let block = Block::word("w1", "Total").with_confidence(98.5).with_page(2);
        let json = serde_json::to_value(&block).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "id": "w1",
                "kind": {"type": "word", "text": "Total"},
                "confidence": 98.5,
                "page": 2
            })
        );
        let back: Block = serde_json::from_value(json).unwrap();
        assert_eq!(back, block);
    }
}
