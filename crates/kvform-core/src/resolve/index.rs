//! Identifier and role index over a flat block collection.

use std::collections::HashMap;

use tracing::debug;

use crate::models::block::Block;

/// Read-only views over a block collection, built once per resolution.
#[derive(Debug, Default)]
pub struct BlockIndex<'a> {
    by_id: HashMap<&'a str, &'a Block>,
    keys: Vec<&'a Block>,
    values: HashMap<&'a str, &'a Block>,
    duplicate_ids: Vec<&'a str>,
    len: usize,
}

impl<'a> BlockIndex<'a> {
    /// Index a block sequence. Never fails; a repeated id keeps the last block.
    pub fn build(blocks: &'a [Block]) -> Self {
        let mut index = Self {
            by_id: HashMap::with_capacity(blocks.len()),
            len: blocks.len(),
            ..Self::default()
        };

        for block in blocks {
            let id = block.id.as_str();
            if index.by_id.insert(id, block).is_some() {
                index.duplicate_ids.push(id);
            }

            if block.is_key() {
                index.keys.push(block);
            } else if block.is_value() {
                index.values.insert(id, block);
            }
        }

        debug!(
            "Indexed {} blocks: {} keys, {} values, {} duplicate ids",
            index.len,
            index.keys.len(),
            index.values.len(),
            index.duplicate_ids.len()
        );

        index
    }

    /// Look up any block by id.
    pub fn get(&self, id: &str) -> Option<&'a Block> {
        self.by_id.get(id).copied()
    }

    /// Look up a value-role block by id.
    pub fn value(&self, id: &str) -> Option<&'a Block> {
        self.values.get(id).copied()
    }

    /// Key-role blocks in input order.
    pub fn keys(&self) -> &[&'a Block] {
        &self.keys
    }

    /// Number of value-role blocks.
    pub fn value_count(&self) -> usize {
        self.values.len()
    }

    /// Ids that appeared more than once, once per repeat.
    pub fn duplicate_ids(&self) -> &[&'a str] {
        &self.duplicate_ids
    }

    /// Number of blocks in the source collection, duplicates included.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
