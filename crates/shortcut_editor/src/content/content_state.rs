// Copyright 2026 The Matrix.org Foundation C.I.C.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::HashSet;

use serde_json::{Map, Value};

use super::{BlockKey, BlockType, ContentBlock, StyleSet};
use crate::SelectionState;

/// The full document: an ordered, never-empty list of blocks.
///
/// `selection_before` and `selection_after` record the selection around
/// the transform that produced this value. They are not part of the
/// persisted snapshot and are ignored by equality.
#[derive(Clone, Debug)]
pub struct ContentState {
    pub(crate) blocks: Vec<ContentBlock>,
    pub(crate) entity_map: Map<String, Value>,
    pub(crate) selection_before: SelectionState,
    pub(crate) selection_after: SelectionState,
}

impl ContentState {
    /// A document with a single empty unstyled block.
    pub fn create_empty() -> Self {
        Self::from_blocks(vec![ContentBlock::empty(BlockKey::new("0"))])
    }

    /// One unstyled block per line of `text`.
    pub fn from_text(text: &str) -> Self {
        let blocks = text
            .split('\n')
            .enumerate()
            .map(|(i, line)| {
                ContentBlock::new(
                    BlockKey::new(to_base36(i)),
                    BlockType::Unstyled,
                    line.strip_suffix('\r').unwrap_or(line),
                    &StyleSet::new(),
                )
            })
            .collect();
        Self::from_blocks(blocks)
    }

    /// Build a document from blocks. An empty list yields one empty block.
    pub fn from_blocks(blocks: Vec<ContentBlock>) -> Self {
        let blocks = if blocks.is_empty() {
            vec![ContentBlock::empty(BlockKey::new("0"))]
        } else {
            blocks
        };
        let selection = SelectionState::collapsed(blocks[0].key().clone(), 0);
        Self {
            blocks,
            entity_map: Map::new(),
            selection_before: selection.clone(),
            selection_after: selection,
        }
    }

    pub(crate) fn with_entity_map(self, entity_map: Map<String, Value>) -> Self {
        Self { entity_map, ..self }
    }

    /// Replace the blocks, recording the selections around the change.
    pub(crate) fn with_blocks(
        &self,
        blocks: Vec<ContentBlock>,
        selection_before: SelectionState,
        selection_after: SelectionState,
    ) -> Self {
        Self {
            blocks,
            entity_map: self.entity_map.clone(),
            selection_before,
            selection_after,
        }
    }

    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }

    pub fn entity_map(&self) -> &Map<String, Value> {
        &self.entity_map
    }

    pub fn selection_before(&self) -> &SelectionState {
        &self.selection_before
    }

    pub fn selection_after(&self) -> &SelectionState {
        &self.selection_after
    }

    pub fn block_for_key(&self, key: &BlockKey) -> Option<&ContentBlock> {
        self.blocks.iter().find(|b| b.key() == key)
    }

    pub fn block_index(&self, key: &BlockKey) -> Option<usize> {
        self.blocks.iter().position(|b| b.key() == key)
    }

    pub fn block_before(&self, key: &BlockKey) -> Option<&ContentBlock> {
        let index = self.block_index(key)?;
        index.checked_sub(1).map(|i| &self.blocks[i])
    }

    pub fn block_after(&self, key: &BlockKey) -> Option<&ContentBlock> {
        let index = self.block_index(key)?;
        self.blocks.get(index + 1)
    }

    pub fn first_block(&self) -> &ContentBlock {
        &self.blocks[0]
    }

    pub fn last_block(&self) -> &ContentBlock {
        &self.blocks[self.blocks.len() - 1]
    }

    /// The text of all blocks joined by newlines.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(|b| b.text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn has_text(&self) -> bool {
        self.blocks.len() > 1 || !self.blocks[0].is_empty()
    }

    /// A key not used by any block of this document.
    pub fn generate_key(&self) -> BlockKey {
        let used: HashSet<&str> =
            self.blocks.iter().map(|b| b.key().as_str()).collect();
        (self.blocks.len()..)
            .map(to_base36)
            .find(|k| !used.contains(k.as_str()))
            .map(BlockKey::new)
            .unwrap_or_default()
    }
}

impl PartialEq for ContentState {
    fn eq(&self, other: &Self) -> bool {
        self.blocks == other.blocks && self.entity_map == other.entity_map
    }
}

impl Default for ContentState {
    fn default() -> Self {
        Self::create_empty()
    }
}

pub(crate) fn to_base36(mut n: usize) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut out = Vec::new();
    loop {
        out.push(DIGITS[n % 36]);
        n /= 36;
        if n == 0 {
            break;
        }
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}
