//! Key/value pairing and text assembly.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use tracing::{debug, trace};

use crate::models::block::{Block, BlockKind};
use crate::models::config::ResolveConfig;
use crate::output::FieldMap;

use super::index::BlockIndex;

/// An anomaly the resolver absorbed instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolveWarning {
    /// Key block has no `Value` relationship.
    MissingValueEdge { key_id: String },
    /// `Value` edge target is not a known value block.
    DanglingValue { key_id: String, target_id: String },
    /// `Child` edge target is not in the index.
    DanglingChild { block_id: String, child_id: String },
    /// Block id appeared more than once; the last block was kept.
    DuplicateId { id: String },
    /// Two key blocks produced the same key text; the later value was kept.
    KeyCollision {
        key_text: String,
        previous_key_id: String,
        key_id: String,
    },
    /// Key text was empty and empty keys are configured to be dropped.
    EmptyKeySkipped { key_id: String },
}

impl fmt::Display for ResolveWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingValueEdge { key_id } => {
                write!(f, "key {} has no value relationship", key_id)
            }
            Self::DanglingValue { key_id, target_id } => {
                write!(f, "key {} points to unknown value {}", key_id, target_id)
            }
            Self::DanglingChild { block_id, child_id } => {
                write!(f, "block {} references unknown child {}", block_id, child_id)
            }
            Self::DuplicateId { id } => write!(f, "duplicate block id {}", id),
            Self::KeyCollision {
                key_text,
                previous_key_id,
                key_id,
            } => write!(
                f,
                "key text {:?} from {} overwrites the value from {}",
                key_text, key_id, previous_key_id
            ),
            Self::EmptyKeySkipped { key_id } => write!(f, "key {} has empty text", key_id),
        }
    }
}

/// Counters describing one resolution pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResolveStats {
    /// Blocks in the input collection.
    pub blocks: usize,
    /// Key-role blocks.
    pub keys: usize,
    /// Value-role blocks.
    pub values: usize,
    /// Key blocks successfully paired with a value block.
    pub paired: usize,
    /// Key blocks that produced no entry.
    pub skipped: usize,
}

/// Output of [`KeyValueResolver::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Resolution {
    /// Field name to field value, in first-insertion order.
    pub fields: FieldMap,
    /// Absorbed anomalies, in discovery order.
    pub warnings: Vec<ResolveWarning>,
    /// Pass counters.
    pub stats: ResolveStats,
}

/// Pairs key blocks with value blocks and assembles their text.
pub struct KeyValueResolver<'i, 'a> {
    index: &'i BlockIndex<'a>,
    config: ResolveConfig,
}

impl<'i, 'a> KeyValueResolver<'i, 'a> {
    /// Create a resolver with default settings.
    pub fn new(index: &'i BlockIndex<'a>) -> Self {
        Self {
            index,
            config: ResolveConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ResolveConfig) -> Self {
        self.config = config;
        self
    }

    /// Resolve every key block, in index order.
    ///
    /// Never fails: anomalies drop the affected entry (or overwrite an earlier
    /// one on key-text collision) and are recorded as warnings.
    pub fn resolve(&self) -> Resolution {
        let mut resolution = Resolution {
            stats: ResolveStats {
                blocks: self.index.len(),
                keys: self.index.keys().len(),
                values: self.index.value_count(),
                ..ResolveStats::default()
            },
            ..Resolution::default()
        };

        for id in self.index.duplicate_ids() {
            self.warn(&mut resolution, ResolveWarning::DuplicateId { id: (*id).to_string() });
        }

        // Key text -> id of the key block that last wrote it.
        let mut writers: HashMap<String, &str> = HashMap::new();

        for key in self.index.keys() {
            let Some(target_id) = key.value_target() else {
                resolution.stats.skipped += 1;
                self.warn(
                    &mut resolution,
                    ResolveWarning::MissingValueEdge {
                        key_id: key.id.clone(),
                    },
                );
                continue;
            };

            let Some(value) = self.index.value(target_id) else {
                resolution.stats.skipped += 1;
                self.warn(
                    &mut resolution,
                    ResolveWarning::DanglingValue {
                        key_id: key.id.clone(),
                        target_id: target_id.to_string(),
                    },
                );
                continue;
            };

            let key_text = self.assemble(key, &mut resolution);
            let value_text = self.assemble(value, &mut resolution);

            if key_text.is_empty() && self.config.skip_empty_keys {
                resolution.stats.skipped += 1;
                self.warn(
                    &mut resolution,
                    ResolveWarning::EmptyKeySkipped {
                        key_id: key.id.clone(),
                    },
                );
                continue;
            }

            if let Some(previous) = writers.insert(key_text.clone(), key.id.as_str()) {
                self.warn(
                    &mut resolution,
                    ResolveWarning::KeyCollision {
                        key_text: key_text.clone(),
                        previous_key_id: previous.to_string(),
                        key_id: key.id.clone(),
                    },
                );
            }

            trace!("Resolved {:?} -> {:?}", key_text, value_text);
            resolution.fields.insert(key_text, value_text);
            resolution.stats.paired += 1;
        }

        debug!(
            "Resolved {} fields from {} keys ({} skipped, {} warnings)",
            resolution.fields.len(),
            resolution.stats.keys,
            resolution.stats.skipped,
            resolution.warnings.len()
        );

        resolution
    }

    /// Assemble the text of a key or value block from its direct children.
    pub fn text_of(&self, block: &Block) -> String {
        join_fragments(self.fragments(block).into_iter().flatten())
    }

    fn assemble(&self, block: &Block, resolution: &mut Resolution) -> String {
        let mut parts = Vec::new();
        for (child_id, fragment) in block.child_ids().zip(self.fragments(block)) {
            match fragment {
                Some(text) => parts.push(text),
                None if self.index.get(child_id).is_none() => self.warn(
                    resolution,
                    ResolveWarning::DanglingChild {
                        block_id: block.id.clone(),
                        child_id: child_id.to_string(),
                    },
                ),
                None => {}
            }
        }
        join_fragments(parts)
    }

    /// One entry per child id: the child's text if it is a word or line.
    ///
    /// Only the block's own `Child` edges are followed; a child's children are
    /// never visited, so a cyclic graph cannot loop.
    fn fragments(&self, block: &Block) -> Vec<Option<&'a str>> {
        block
            .child_ids()
            .map(|id| {
                self.index.get(id).and_then(|child| match &child.kind {
                    BlockKind::Word { text } | BlockKind::Line { text } => Some(text.as_str()),
                    _ => None,
                })
            })
            .collect()
    }

    fn warn(&self, resolution: &mut Resolution, warning: ResolveWarning) {
        debug!("{}", warning);
        if self.config.collect_warnings {
            resolution.warnings.push(warning);
        }
    }
}

/// Join text fragments with single spaces and trim the result.
fn join_fragments<'s>(fragments: impl IntoIterator<Item = &'s str>) -> String {
    fragments
        .into_iter()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Index `blocks` and resolve them with default settings.
pub fn resolve_fields(blocks: &[Block]) -> FieldMap {
    let index = BlockIndex::build(blocks);
    KeyValueResolver::new(&index).resolve().fields
}
