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

//! The raw snapshot format: a portable, JSON-compatible form of a
//! [`ContentState`].
//!
//! ```json
//! {
//!   "blocks": [{
//!     "key": "0", "text": "Hello", "type": "header-one", "depth": 0,
//!     "inlineStyleRanges": [{ "offset": 0, "length": 5, "style": "BOLD" }],
//!     "entityRanges": [], "data": {}
//!   }],
//!   "entityMap": {}
//! }
//! ```
//!
//! Offsets and lengths count Unicode scalar values. The entity map is
//! carried through untouched.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::IntoEnumIterator;

use crate::content::{BlockKey, BlockType, CharacterMetadata, ContentBlock, ContentState, InlineStyle};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDraftContentState {
    pub blocks: Vec<RawDraftContentBlock>,
    #[serde(default)]
    pub entity_map: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDraftContentBlock {
    /// Generated on import when missing or already taken.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub text: String,
    #[serde(rename = "type", default)]
    pub block_type: BlockType,
    #[serde(default)]
    pub depth: u32,
    #[serde(default)]
    pub inline_style_ranges: Vec<RawInlineStyleRange>,
    #[serde(default)]
    pub entity_ranges: Vec<RawEntityRange>,
    #[serde(default)]
    pub data: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInlineStyleRange {
    pub offset: usize,
    pub length: usize,
    pub style: InlineStyle,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntityRange {
    pub offset: usize,
    pub length: usize,
    pub key: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot is not valid raw content JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("snapshot contains no blocks")]
    NoBlocks,
    #[error(
        "block {block}: range at {offset} of length {length} runs past \
         the end of its {len} characters"
    )]
    RangeOutOfBounds {
        block: usize,
        offset: usize,
        length: usize,
        len: usize,
    },
    #[error("block {block}: entity {key} is missing from the entity map")]
    UnknownEntity { block: usize, key: u64 },
}

/// Export `content` to its raw form.
pub fn convert_to_raw(content: &ContentState) -> RawDraftContentState {
    RawDraftContentState {
        blocks: content.blocks().iter().map(block_to_raw).collect(),
        entity_map: content.entity_map().clone(),
    }
}

fn block_to_raw(block: &ContentBlock) -> RawDraftContentBlock {
    let inline_style_ranges = InlineStyle::iter()
        .flat_map(|style| {
            spans(block.characters(), |c| c.style.contains(&style))
                .into_iter()
                .map(move |(offset, length)| RawInlineStyleRange {
                    offset,
                    length,
                    style,
                })
        })
        .collect();

    let entity_ranges = block
        .runs()
        .into_iter()
        .filter_map(|run| {
            Some(RawEntityRange {
                offset: run.start,
                length: run.end - run.start,
                key: run.entity?,
            })
        })
        .fold(Vec::<RawEntityRange>::new(), |mut ranges, range| {
            // runs split on style too; join adjacent pieces of one entity
            match ranges.last_mut() {
                Some(last)
                    if last.key == range.key
                        && last.offset + last.length == range.offset =>
                {
                    last.length += range.length;
                }
                _ => ranges.push(range),
            }
            ranges
        });

    RawDraftContentBlock {
        key: Some(block.key().to_string()),
        text: block.text().to_string(),
        block_type: block.block_type(),
        depth: block.depth(),
        inline_style_ranges,
        entity_ranges,
        data: block.data().clone(),
    }
}

/// Maximal (offset, length) spans of characters matching `pred`.
fn spans(
    characters: &[CharacterMetadata],
    pred: impl Fn(&CharacterMetadata) -> bool,
) -> Vec<(usize, usize)> {
    let mut out: Vec<(usize, usize)> = Vec::new();
    for (i, c) in characters.iter().enumerate() {
        if !pred(c) {
            continue;
        }
        match out.last_mut() {
            Some((offset, length)) if *offset + *length == i => *length += 1,
            _ => out.push((i, 1)),
        }
    }
    out
}

/// Rebuild a document from its raw form, validating every range.
pub fn convert_from_raw(
    raw: &RawDraftContentState,
) -> Result<ContentState, SnapshotError> {
    if raw.blocks.is_empty() {
        return Err(SnapshotError::NoBlocks);
    }

    let mut used: HashSet<String> = HashSet::new();
    let mut next_generated = 0usize;
    let mut blocks = Vec::with_capacity(raw.blocks.len());

    for (index, raw_block) in raw.blocks.iter().enumerate() {
        let key = match &raw_block.key {
            Some(key) if !used.contains(key) => key.clone(),
            _ => loop {
                let candidate = crate::content::to_base36(next_generated);
                next_generated += 1;
                if !used.contains(&candidate)
                    && !raw.blocks.iter().any(|b| b.key.as_ref() == Some(&candidate))
                {
                    break candidate;
                }
            },
        };
        used.insert(key.clone());
        blocks.push(block_from_raw(index, BlockKey::new(key), raw_block, &raw.entity_map)?);
    }

    Ok(ContentState::from_blocks(blocks).with_entity_map(raw.entity_map.clone()))
}

fn block_from_raw(
    index: usize,
    key: BlockKey,
    raw: &RawDraftContentBlock,
    entity_map: &Map<String, Value>,
) -> Result<ContentBlock, SnapshotError> {
    let len = raw.text.chars().count();
    let check = |offset: usize, length: usize| {
        if offset.checked_add(length).map_or(true, |end| end > len) {
            Err(SnapshotError::RangeOutOfBounds {
                block: index,
                offset,
                length,
                len,
            })
        } else {
            Ok(())
        }
    };

    let mut characters = vec![CharacterMetadata::default(); len];
    for range in &raw.inline_style_ranges {
        check(range.offset, range.length)?;
        for c in &mut characters[range.offset..range.offset + range.length] {
            c.style.insert(range.style);
        }
    }
    for range in &raw.entity_ranges {
        check(range.offset, range.length)?;
        if !entity_map.contains_key(&range.key.to_string()) {
            return Err(SnapshotError::UnknownEntity {
                block: index,
                key: range.key,
            });
        }
        for c in &mut characters[range.offset..range.offset + range.length] {
            c.entity = Some(range.key);
        }
    }

    Ok(
        ContentBlock::from_parts(key, raw.block_type, raw.text.clone(), characters)
            .with_depth(raw.depth)
            .with_data(raw.data.clone()),
    )
}

/// Serialize `content` to the JSON string stored in local storage.
pub fn to_json(content: &ContentState) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string(&convert_to_raw(content))?)
}

/// Parse a stored JSON string back into a document.
pub fn from_json(json: &str) -> Result<ContentState, SnapshotError> {
    let raw: RawDraftContentState = serde_json::from_str(json)?;
    convert_from_raw(&raw)
}
