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

//! The document value: blocks of styled text.
//!
//! | Type                  | Role                                           |
//! |-----------------------|------------------------------------------------|
//! | [`ContentState`]      | Ordered, non-empty list of blocks + entities   |
//! | [`ContentBlock`]      | One line/paragraph with a [`BlockType`]        |
//! | [`CharacterMetadata`] | Inline styles and entity of one character      |
//!
//! All offsets are counted in Unicode scalar values (`char`s), which is
//! also what the raw snapshot format uses.

mod block;
mod content_state;

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

pub use block::{ContentBlock, StyleRun};
pub use content_state::ContentState;
pub(crate) use content_state::to_base36;

/// Identifier of a block, unique within one [`ContentState`].
#[derive(
    Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct BlockKey(String);

impl BlockKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// The type tag of a block, stored as its kebab-case name in snapshots.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::AsRefStr,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum BlockType {
    #[default]
    Unstyled,
    HeaderOne,
    HeaderTwo,
    HeaderThree,
    HeaderFour,
    HeaderFive,
    HeaderSix,
    UnorderedListItem,
    OrderedListItem,
    Blockquote,
    CodeBlock,
    Atomic,
}

impl BlockType {
    pub fn is_header(&self) -> bool {
        matches!(
            self,
            Self::HeaderOne
                | Self::HeaderTwo
                | Self::HeaderThree
                | Self::HeaderFour
                | Self::HeaderFive
                | Self::HeaderSix
        )
    }

    pub fn is_list_item(&self) -> bool {
        matches!(self, Self::UnorderedListItem | Self::OrderedListItem)
    }
}

/// A character-range annotation independent of the block type.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum_macros::AsRefStr,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::EnumIter,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum InlineStyle {
    Bold,
    Italic,
    Underline,
    Code,
    Strikethrough,
    /// Custom colour annotation rendered as red text.
    Red,
}

/// The set of inline styles on one character.
pub type StyleSet = BTreeSet<InlineStyle>;

/// Per-character annotations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CharacterMetadata {
    pub style: StyleSet,
    /// Key into the content's entity map.
    pub entity: Option<u64>,
}

impl CharacterMetadata {
    pub fn styled(style: &StyleSet) -> Self {
        Self {
            style: style.clone(),
            entity: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn block_types_use_kebab_case_tags() {
        assert_eq!(BlockType::HeaderOne.as_ref(), "header-one");
        assert_eq!(BlockType::UnorderedListItem.to_string(), "unordered-list-item");
        assert_eq!(BlockType::from_str("code-block"), Ok(BlockType::CodeBlock));
        assert!(BlockType::from_str("header-seven").is_err());
    }

    #[test]
    fn block_type_serde_matches_strum() {
        let json = serde_json::to_string(&BlockType::Blockquote).unwrap();
        assert_eq!(json, "\"blockquote\"");
        let parsed: BlockType = serde_json::from_str("\"header-three\"").unwrap();
        assert_eq!(parsed, BlockType::HeaderThree);
    }

    #[test]
    fn inline_styles_use_upper_case_names() {
        assert_eq!(InlineStyle::Red.as_ref(), "RED");
        assert_eq!(
            serde_json::to_string(&InlineStyle::Strikethrough).unwrap(),
            "\"STRIKETHROUGH\""
        );
        assert_eq!(InlineStyle::from_str("UNDERLINE"), Ok(InlineStyle::Underline));
    }

    #[test]
    fn header_and_list_predicates() {
        assert!(BlockType::HeaderSix.is_header());
        assert!(!BlockType::Unstyled.is_header());
        assert!(BlockType::OrderedListItem.is_list_item());
        assert!(!BlockType::Blockquote.is_list_item());
    }
}
