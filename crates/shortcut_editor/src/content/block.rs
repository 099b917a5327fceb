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

use serde_json::{Map, Value};

use super::{BlockKey, BlockType, CharacterMetadata, StyleSet};

/// One line/paragraph of the document.
///
/// `characters` always holds exactly one entry per `char` of `text`.
#[derive(Clone, Debug, PartialEq)]
pub struct ContentBlock {
    pub(crate) key: BlockKey,
    pub(crate) block_type: BlockType,
    pub(crate) text: String,
    pub(crate) characters: Vec<CharacterMetadata>,
    pub(crate) depth: u32,
    pub(crate) data: Map<String, Value>,
}

/// A maximal run of characters sharing the same metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleRun {
    /// Start offset within the block (chars).
    pub start: usize,
    /// End offset within the block (chars, exclusive).
    pub end: usize,
    pub text: String,
    pub style: StyleSet,
    pub entity: Option<u64>,
}

impl ContentBlock {
    /// An empty unstyled block.
    pub fn empty(key: BlockKey) -> Self {
        Self::new(key, BlockType::Unstyled, "", &StyleSet::new())
    }

    /// A block whose characters all carry `style`.
    pub fn new(
        key: BlockKey,
        block_type: BlockType,
        text: &str,
        style: &StyleSet,
    ) -> Self {
        let characters = text
            .chars()
            .map(|_| CharacterMetadata::styled(style))
            .collect();
        Self {
            key,
            block_type,
            text: text.to_string(),
            characters,
            depth: 0,
            data: Map::new(),
        }
    }

    pub(crate) fn from_parts(
        key: BlockKey,
        block_type: BlockType,
        text: String,
        characters: Vec<CharacterMetadata>,
    ) -> Self {
        debug_assert_eq!(text.chars().count(), characters.len());
        Self {
            key,
            block_type,
            text,
            characters,
            depth: 0,
            data: Map::new(),
        }
    }

    pub fn key(&self) -> &BlockKey {
        &self.key
    }

    pub fn block_type(&self) -> BlockType {
        self.block_type
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in chars.
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn characters(&self) -> &[CharacterMetadata] {
        &self.characters
    }

    /// Styles of the character at `offset`, empty if out of range.
    pub fn style_at(&self, offset: usize) -> StyleSet {
        self.characters
            .get(offset)
            .map(|c| c.style.clone())
            .unwrap_or_default()
    }

    pub fn entity_at(&self, offset: usize) -> Option<u64> {
        self.characters.get(offset)?.entity
    }

    /// The text between two char offsets (clamped).
    pub fn text_between(&self, start: usize, end: usize) -> String {
        let end = end.min(self.len());
        let start = start.min(end);
        self.text.chars().skip(start).take(end - start).collect()
    }

    pub fn with_type(&self, block_type: BlockType) -> Self {
        Self {
            block_type,
            ..self.clone()
        }
    }

    pub fn with_depth(&self, depth: u32) -> Self {
        Self {
            depth,
            ..self.clone()
        }
    }

    pub fn with_data(&self, data: Map<String, Value>) -> Self {
        Self {
            data,
            ..self.clone()
        }
    }

    /// Split the text and metadata at a char offset (clamped).
    pub(crate) fn split_contents(
        &self,
        offset: usize,
    ) -> (
        (String, Vec<CharacterMetadata>),
        (String, Vec<CharacterMetadata>),
    ) {
        let offset = offset.min(self.len());
        let byte = self.byte_offset(offset);
        let (head, tail) = self.text.split_at(byte);
        (
            (head.to_string(), self.characters[..offset].to_vec()),
            (tail.to_string(), self.characters[offset..].to_vec()),
        )
    }

    /// Replace the text and metadata, keeping key, type, depth and data.
    pub(crate) fn with_contents(
        &self,
        text: String,
        characters: Vec<CharacterMetadata>,
    ) -> Self {
        debug_assert_eq!(text.chars().count(), characters.len());
        Self {
            text,
            characters,
            ..self.clone()
        }
    }

    /// Apply `f` to the metadata of chars in `[start, end)`.
    pub(crate) fn map_characters(
        &self,
        start: usize,
        end: usize,
        f: impl Fn(&CharacterMetadata) -> CharacterMetadata,
    ) -> Self {
        let end = end.min(self.len());
        let characters = self
            .characters
            .iter()
            .enumerate()
            .map(|(i, c)| if i >= start && i < end { f(c) } else { c.clone() })
            .collect();
        Self {
            characters,
            ..self.clone()
        }
    }

    /// Group characters into maximal runs of identical metadata.
    pub fn runs(&self) -> Vec<StyleRun> {
        let mut runs: Vec<StyleRun> = Vec::new();
        for (i, (ch, meta)) in
            self.text.chars().zip(self.characters.iter()).enumerate()
        {
            match runs.last_mut() {
                Some(run)
                    if run.style == meta.style && run.entity == meta.entity =>
                {
                    run.text.push(ch);
                    run.end = i + 1;
                }
                _ => runs.push(StyleRun {
                    start: i,
                    end: i + 1,
                    text: ch.to_string(),
                    style: meta.style.clone(),
                    entity: meta.entity,
                }),
            }
        }
        runs
    }

    fn byte_offset(&self, offset: usize) -> usize {
        self.text
            .char_indices()
            .nth(offset)
            .map(|(b, _)| b)
            .unwrap_or(self.text.len())
    }
}
