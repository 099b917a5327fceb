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

//! Pure document transforms.
//!
//! Every function takes a [`ContentState`] by reference and returns a new
//! one; the input is never modified. The returned value records the range
//! it was given as `selection_before` and the resulting cursor as
//! `selection_after`, which [`EditorState::push`](crate::EditorState::push)
//! installs as the new selection.
//!
//! Offsets beyond the end of a block are clamped to its length. A range
//! naming a block key that is not in the document leaves the content
//! unchanged.

use crate::{
    BlockType, CharacterMetadata, ContentBlock, ContentState, InlineStyle,
    SelectionState, StyleSet,
};

/// Block indices and clamped offsets of a range.
struct ResolvedRange {
    start_index: usize,
    start_offset: usize,
    end_index: usize,
    end_offset: usize,
}

fn resolve(
    content: &ContentState,
    range: &SelectionState,
) -> Option<ResolvedRange> {
    let start_index = content.block_index(range.start_key())?;
    let end_index = content.block_index(range.end_key())?;
    let start_offset = range.start_offset().min(content.blocks[start_index].len());
    let end_offset = range.end_offset().min(content.blocks[end_index].len());

    // Stored direction can disagree with block order for ranges built
    // by hand; normalise here.
    if (end_index, end_offset) < (start_index, start_offset) {
        return Some(ResolvedRange {
            start_index: end_index,
            start_offset: end_offset,
            end_index: start_index,
            end_offset: start_offset,
        });
    }
    Some(ResolvedRange {
        start_index,
        start_offset,
        end_index,
        end_offset,
    })
}

fn unchanged(content: &ContentState, range: &SelectionState) -> ContentState {
    content.with_blocks(content.blocks.clone(), range.clone(), range.clone())
}

/// Delete the text covered by `range`, merging the first and last block
/// when it spans several.
pub fn remove_range(
    content: &ContentState,
    range: &SelectionState,
) -> ContentState {
    let Some(r) = resolve(content, range) else {
        return unchanged(content, range);
    };

    let start_block = &content.blocks[r.start_index];
    let end_block = &content.blocks[r.end_index];
    let ((head, head_chars), _) = start_block.split_contents(r.start_offset);
    let (_, (tail, tail_chars)) = end_block.split_contents(r.end_offset);

    let merged = start_block.with_contents(
        head + &tail,
        head_chars.into_iter().chain(tail_chars).collect(),
    );

    let mut blocks = Vec::with_capacity(content.blocks.len());
    blocks.extend_from_slice(&content.blocks[..r.start_index]);
    blocks.push(merged);
    blocks.extend_from_slice(&content.blocks[r.end_index + 1..]);

    let after = SelectionState::collapsed(
        start_block.key().clone(),
        r.start_offset,
    )
    .with_has_focus(range.has_focus);
    content.with_blocks(blocks, range.clone(), after)
}

/// Insert `text` at the start of `at`, replacing nothing. Every inserted
/// character carries `style` and no entity.
pub fn insert_text(
    content: &ContentState,
    at: &SelectionState,
    text: &str,
    style: &StyleSet,
) -> ContentState {
    let Some(r) = resolve(content, at) else {
        return unchanged(content, at);
    };
    let block = &content.blocks[r.start_index];
    let ((head, head_chars), (tail, tail_chars)) =
        block.split_contents(r.start_offset);

    let inserted = text.chars().count();
    let new_text = format!("{head}{text}{tail}");
    let new_chars = head_chars
        .into_iter()
        .chain(std::iter::repeat(CharacterMetadata::styled(style)).take(inserted))
        .chain(tail_chars)
        .collect();

    let mut blocks = content.blocks.clone();
    blocks[r.start_index] = block.with_contents(new_text, new_chars);

    let after = SelectionState::collapsed(
        block.key().clone(),
        r.start_offset + inserted,
    )
    .with_has_focus(at.has_focus);
    content.with_blocks(blocks, at.clone(), after)
}

/// Remove `range` then insert `text` in its place.
pub fn replace_text(
    content: &ContentState,
    range: &SelectionState,
    text: &str,
    style: &StyleSet,
) -> ContentState {
    let removed = remove_range(content, range);
    let cursor = removed.selection_after.clone();
    let inserted = insert_text(&removed, &cursor, text, style);
    let after = inserted.selection_after.clone();
    inserted.with_blocks(inserted.blocks.clone(), range.clone(), after)
}

/// Set the type of every block touched by `range`.
pub fn set_block_type(
    content: &ContentState,
    range: &SelectionState,
    block_type: BlockType,
) -> ContentState {
    let Some(r) = resolve(content, range) else {
        return unchanged(content, range);
    };
    let blocks = content
        .blocks
        .iter()
        .enumerate()
        .map(|(i, b)| {
            if i >= r.start_index && i <= r.end_index {
                b.with_type(block_type)
            } else {
                b.clone()
            }
        })
        .collect();
    content.with_blocks(blocks, range.clone(), range.clone())
}

/// Add `style` to every character in `range`.
pub fn apply_inline_style(
    content: &ContentState,
    range: &SelectionState,
    style: InlineStyle,
) -> ContentState {
    modify_inline_style(content, range, |meta| {
        let mut meta = meta.clone();
        meta.style.insert(style);
        meta
    })
}

/// Remove `style` from every character in `range`.
pub fn remove_inline_style(
    content: &ContentState,
    range: &SelectionState,
    style: InlineStyle,
) -> ContentState {
    modify_inline_style(content, range, |meta| {
        let mut meta = meta.clone();
        meta.style.remove(&style);
        meta
    })
}

fn modify_inline_style(
    content: &ContentState,
    range: &SelectionState,
    f: impl Fn(&CharacterMetadata) -> CharacterMetadata,
) -> ContentState {
    let Some(r) = resolve(content, range) else {
        return unchanged(content, range);
    };
    let blocks = content
        .blocks
        .iter()
        .enumerate()
        .map(|(i, b)| {
            if i < r.start_index || i > r.end_index {
                return b.clone();
            }
            let start = if i == r.start_index { r.start_offset } else { 0 };
            let end = if i == r.end_index { r.end_offset } else { b.len() };
            b.map_characters(start, end, &f)
        })
        .collect();
    content.with_blocks(blocks, range.clone(), range.clone())
}

/// Remove `range`, then split the block at the cursor. The new block
/// below keeps type and depth, except that headers continue as
/// unstyled text.
pub fn split_block(
    content: &ContentState,
    at: &SelectionState,
) -> ContentState {
    let removed = remove_range(content, at);
    let cursor = removed.selection_after.clone();
    let Some(r) = resolve(&removed, &cursor) else {
        return unchanged(content, at);
    };

    let block = &removed.blocks[r.start_index];
    let ((head, head_chars), (tail, tail_chars)) =
        block.split_contents(r.start_offset);
    let below_type = if block.block_type().is_header() {
        BlockType::Unstyled
    } else {
        block.block_type()
    };
    let below_key = removed.generate_key();
    let below = ContentBlock::from_parts(
        below_key.clone(),
        below_type,
        tail,
        tail_chars,
    )
    .with_depth(block.depth());

    let mut blocks = removed.blocks.clone();
    blocks[r.start_index] = block.with_contents(head, head_chars);
    blocks.insert(r.start_index + 1, below);

    let after =
        SelectionState::collapsed(below_key, 0).with_has_focus(at.has_focus);
    removed.with_blocks(blocks, at.clone(), after)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BlockKey;

    fn key(content: &ContentState, index: usize) -> BlockKey {
        content.blocks()[index].key().clone()
    }

    fn cursor(content: &ContentState, index: usize, offset: usize) -> SelectionState {
        SelectionState::collapsed(key(content, index), offset)
    }

    fn range(
        content: &ContentState,
        start: (usize, usize),
        end: (usize, usize),
    ) -> SelectionState {
        SelectionState::range(
            content,
            (key(content, start.0), start.1),
            (key(content, end.0), end.1),
        )
    }

    fn bold() -> StyleSet {
        StyleSet::from([InlineStyle::Bold])
    }

    #[test]
    fn removing_within_a_block() {
        let content = ContentState::from_text("abcdef");
        let result = remove_range(&content, &range(&content, (0, 1), (0, 4)));
        assert_eq!(result.plain_text(), "aef");
        assert_eq!(result.selection_after().start_offset(), 1);
    }

    #[test]
    fn removing_across_blocks_merges_them() {
        let content = ContentState::from_text("abc\ndef\nghi");
        let result = remove_range(&content, &range(&content, (0, 2), (2, 1)));
        assert_eq!(result.plain_text(), "abhi");
        assert_eq!(result.blocks().len(), 1);
        assert_eq!(result.first_block().key(), content.first_block().key());
    }

    #[test]
    fn removing_does_not_touch_the_input() {
        let content = ContentState::from_text("abc");
        let _ = remove_range(&content, &range(&content, (0, 0), (0, 3)));
        assert_eq!(content.plain_text(), "abc");
    }

    #[test]
    fn inserting_carries_style_and_moves_cursor() {
        let content = ContentState::from_text("ac");
        let result = insert_text(&content, &cursor(&content, 0, 1), "b", &bold());
        assert_eq!(result.plain_text(), "abc");
        assert_eq!(result.first_block().style_at(1), bold());
        assert!(result.first_block().style_at(0).is_empty());
        assert_eq!(result.selection_after().start_offset(), 2);
    }

    #[test]
    fn inserting_past_the_end_clamps() {
        let content = ContentState::from_text("ab");
        let result = insert_text(&content, &cursor(&content, 0, 10), "c", &StyleSet::new());
        assert_eq!(result.plain_text(), "abc");
        assert_eq!(result.selection_after().start_offset(), 3);
    }

    #[test]
    fn replacing_with_empty_text_deletes() {
        let content = ContentState::from_text("# x");
        let r = range(&content, (0, 0), (0, 2));
        let result = replace_text(&content, &r, "", &StyleSet::new());
        assert_eq!(result.plain_text(), "x");
        assert_eq!(result.selection_before(), &r);
        assert_eq!(result.selection_after().start_offset(), 0);
    }

    #[test]
    fn setting_block_type_covers_the_range() {
        let content = ContentState::from_text("a\nb\nc");
        let result = set_block_type(
            &content,
            &range(&content, (0, 0), (1, 1)),
            BlockType::Blockquote,
        );
        let types: Vec<BlockType> =
            result.blocks().iter().map(|b| b.block_type()).collect();
        assert_eq!(
            types,
            vec![BlockType::Blockquote, BlockType::Blockquote, BlockType::Unstyled]
        );
    }

    #[test]
    fn styling_across_blocks() {
        let content = ContentState::from_text("abc\ndef");
        let styled = apply_inline_style(
            &content,
            &range(&content, (0, 2), (1, 1)),
            InlineStyle::Underline,
        );
        let underline = StyleSet::from([InlineStyle::Underline]);
        assert!(styled.blocks()[0].style_at(1).is_empty());
        assert_eq!(styled.blocks()[0].style_at(2), underline);
        assert_eq!(styled.blocks()[1].style_at(0), underline);
        assert!(styled.blocks()[1].style_at(1).is_empty());

        let cleared = remove_inline_style(
            &styled,
            &range(&styled, (0, 0), (1, 3)),
            InlineStyle::Underline,
        );
        assert!(cleared.blocks().iter().all(|b| b.runs().len() == 1));
    }

    #[test]
    fn splitting_moves_the_tail_into_a_new_block() {
        let content = ContentState::from_text("hello");
        let result = split_block(&content, &cursor(&content, 0, 2));
        assert_eq!(result.plain_text(), "he\nllo");
        let after = result.selection_after();
        assert_eq!(after.start_key(), result.blocks()[1].key());
        assert_eq!(after.start_offset(), 0);
        assert_ne!(result.blocks()[0].key(), result.blocks()[1].key());
    }

    #[test]
    fn splitting_a_header_continues_unstyled() {
        let content = ContentState::from_text("title");
        let content = set_block_type(&content, &cursor(&content, 0, 0), BlockType::HeaderOne);
        let result = split_block(&content, &cursor(&content, 0, 5));
        assert_eq!(result.blocks()[0].block_type(), BlockType::HeaderOne);
        assert_eq!(result.blocks()[1].block_type(), BlockType::Unstyled);
    }

    #[test]
    fn splitting_a_list_item_keeps_the_type() {
        let content = ContentState::from_text("item");
        let content =
            set_block_type(&content, &cursor(&content, 0, 0), BlockType::UnorderedListItem);
        let result = split_block(&content, &cursor(&content, 0, 4));
        assert_eq!(result.blocks()[1].block_type(), BlockType::UnorderedListItem);
    }

    #[test]
    fn unknown_block_key_leaves_content_unchanged() {
        let content = ContentState::from_text("abc");
        let stray = SelectionState::collapsed(BlockKey::from("nope"), 0);
        let result = insert_text(&content, &stray, "x", &StyleSet::new());
        assert_eq!(result, content);
    }
}
