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

//! Rich text helpers layered on [`EditorState`]: style and block toggles
//! and the default key command table.

use std::str::FromStr;

use crate::commands::KeyCommand;
use crate::modifier;
use crate::{BlockType, ChangeType, EditorState, InlineStyle, SelectionState};

/// Toggle an inline style on the current selection.
///
/// - **Collapsed cursor**: toggles the style in the inline style override
///   so that the next inserted text will (or won't) carry it.
/// - **Range selection**: removes the style if every selected character
///   already has it, otherwise applies it to the whole range.
pub fn toggle_inline_style(state: &EditorState, style: InlineStyle) -> EditorState {
    let selection = state.selection();

    if selection.is_collapsed() {
        let mut current = state.current_inline_style();
        if !current.remove(&style) {
            current.insert(style);
        }
        return state.set_inline_style_override(current);
    }

    let content = state.current_content();
    let next = if range_has_style(state, style) {
        modifier::remove_inline_style(content, selection, style)
    } else {
        modifier::apply_inline_style(content, selection, style)
    };
    state.push(next, ChangeType::ChangeInlineStyle)
}

/// Set `block_type` on the selected blocks, or reset them to unstyled if
/// the first one already has it.
pub fn toggle_block_type(state: &EditorState, block_type: BlockType) -> EditorState {
    let type_to_set = if current_block_type(state) == block_type {
        BlockType::Unstyled
    } else {
        block_type
    };
    let content = modifier::set_block_type(
        state.current_content(),
        state.selection(),
        type_to_set,
    );
    state.push(content, ChangeType::ChangeBlockType)
}

/// Type of the block holding the selection start.
pub fn current_block_type(state: &EditorState) -> BlockType {
    state
        .current_content()
        .block_for_key(state.selection().start_key())
        .map(|b| b.block_type())
        .unwrap_or_default()
}

/// The library's handling of a named key command. Returns the new state,
/// or `None` when the command is not one it handles here.
pub fn handle_key_command(state: &EditorState, command: &str) -> Option<EditorState> {
    match KeyCommand::from_str(command).ok()? {
        KeyCommand::Bold => Some(toggle_inline_style(state, InlineStyle::Bold)),
        KeyCommand::Italic => Some(toggle_inline_style(state, InlineStyle::Italic)),
        KeyCommand::Underline => Some(toggle_inline_style(state, InlineStyle::Underline)),
        KeyCommand::Code => Some(toggle_inline_style(state, InlineStyle::Code)),
        KeyCommand::Strikethrough => {
            Some(toggle_inline_style(state, InlineStyle::Strikethrough))
        }
        KeyCommand::Backspace
        | KeyCommand::BackspaceWord
        | KeyCommand::BackspaceToStartOfLine => on_backspace(state),
        KeyCommand::Delete
        | KeyCommand::DeleteWord
        | KeyCommand::DeleteToEndOfBlock => on_delete(state),
        KeyCommand::SplitBlock | KeyCommand::Undo | KeyCommand::Redo => None,
    }
}

/// Backspace at the very start of a block: removes an atomic block just
/// above, or resets a styled block to unstyled. `None` otherwise.
pub fn on_backspace(state: &EditorState) -> Option<EditorState> {
    let selection = state.selection();
    if !selection.is_collapsed() || selection.start_offset() != 0 {
        return None;
    }

    let content = state.current_content();
    let key = selection.start_key();
    let block = content.block_for_key(key)?;

    if let Some(before) = content.block_before(key) {
        if before.block_type() == BlockType::Atomic {
            let target = SelectionState::range(
                content,
                (before.key().clone(), 0),
                (key.clone(), 0),
            );
            let retyped = modifier::set_block_type(content, &target, block.block_type());
            let removed = modifier::remove_range(&retyped, &target);
            return Some(state.push(removed, ChangeType::RemoveRange));
        }
    }

    try_to_remove_block_style(state)
        .map(|content| state.push(content, ChangeType::ChangeBlockType))
}

/// Delete at the very end of a block followed by an atomic block removes
/// that block. `None` otherwise.
pub fn on_delete(state: &EditorState) -> Option<EditorState> {
    let selection = state.selection();
    if !selection.is_collapsed() {
        return None;
    }

    let content = state.current_content();
    let key = selection.start_key();
    let block = content.block_for_key(key)?;
    if selection.start_offset() < block.len() {
        return None;
    }

    let after = content.block_after(key)?;
    if after.block_type() != BlockType::Atomic {
        return None;
    }
    let target = SelectionState::range(
        content,
        (key.clone(), block.len()),
        (after.key().clone(), after.len()),
    );
    let removed = modifier::remove_range(content, &target);
    Some(state.push(removed, ChangeType::RemoveRange))
}

fn try_to_remove_block_style(state: &EditorState) -> Option<crate::ContentState> {
    let selection = state.selection();
    if !selection.is_collapsed() || selection.anchor_offset != 0 {
        return None;
    }
    let content = state.current_content();
    let key = &selection.anchor_key;
    let block = content.block_for_key(key)?;
    let block_type = block.block_type();

    // Backspace into a non-empty code block above keeps the code block.
    if block_type == BlockType::CodeBlock {
        if let Some(before) = content.block_before(key) {
            if before.block_type() == BlockType::CodeBlock && !before.is_empty() {
                return None;
            }
        }
    }

    if block_type == BlockType::Unstyled {
        return None;
    }
    Some(modifier::set_block_type(content, selection, BlockType::Unstyled))
}

fn range_has_style(state: &EditorState, style: InlineStyle) -> bool {
    let content = state.current_content();
    let selection = state.selection();
    let (Some(start), Some(end)) = (
        content.block_index(selection.start_key()),
        content.block_index(selection.end_key()),
    ) else {
        return false;
    };
    let (start, end) = (start.min(end), start.max(end));

    let mut chars = content.blocks()[start..=end]
        .iter()
        .enumerate()
        .flat_map(|(i, block)| {
            let from = if i == 0 { selection.start_offset() } else { 0 };
            let to = if start + i == end {
                selection.end_offset()
            } else {
                block.len()
            };
            let to = to.min(block.len());
            block.characters()[from.min(to)..to].iter()
        })
        .peekable();

    chars.peek().is_some() && chars.all(|c| c.style.contains(&style))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ContentState, StyleSet};

    fn state_with(text: &str) -> EditorState {
        EditorState::create_with_content(ContentState::from_text(text))
    }

    fn select(state: &EditorState, start: (usize, usize), end: (usize, usize)) -> EditorState {
        let content = state.current_content();
        let sel = SelectionState::range(
            content,
            (content.blocks()[start.0].key().clone(), start.1),
            (content.blocks()[end.0].key().clone(), end.1),
        );
        state.accept_selection(sel)
    }

    #[test]
    fn toggling_at_a_cursor_sets_the_override() {
        let state = toggle_inline_style(&state_with(""), InlineStyle::Bold);
        assert_eq!(
            state.inline_style_override(),
            Some(&StyleSet::from([InlineStyle::Bold]))
        );
        let state = toggle_inline_style(&state, InlineStyle::Bold);
        assert_eq!(state.inline_style_override(), Some(&StyleSet::new()));
        assert!(!state.can_undo());
    }

    #[test]
    fn toggling_a_range_applies_then_removes() {
        let state = select(&state_with("aabbcc"), (0, 2), (0, 4));
        let state = toggle_inline_style(&state, InlineStyle::Bold);
        let block = state.current_content().first_block();
        assert!(block.style_at(2).contains(&InlineStyle::Bold));
        assert!(block.style_at(4).is_empty());
        assert_eq!(state.selection().end_offset(), 4);

        let state = toggle_inline_style(&state, InlineStyle::Bold);
        assert!(state
            .current_content()
            .first_block()
            .characters()
            .iter()
            .all(|c| c.style.is_empty()));
    }

    #[test]
    fn partially_styled_range_becomes_fully_styled() {
        let state = select(&state_with("abcd"), (0, 0), (0, 2));
        let state = toggle_inline_style(&state, InlineStyle::Italic);
        let state = select(&state, (0, 0), (0, 4));
        let state = toggle_inline_style(&state, InlineStyle::Italic);
        let block = state.current_content().first_block();
        assert!(block.characters().iter().all(|c| c.style.contains(&InlineStyle::Italic)));
    }

    #[test]
    fn toggling_block_type_twice_resets_to_unstyled() {
        let state = toggle_block_type(&state_with("x"), BlockType::Blockquote);
        assert_eq!(current_block_type(&state), BlockType::Blockquote);
        let state = toggle_block_type(&state, BlockType::Blockquote);
        assert_eq!(current_block_type(&state), BlockType::Unstyled);
    }

    #[test]
    fn key_command_bold_toggles_bold() {
        let state = select(&state_with("abc"), (0, 0), (0, 3));
        let state = handle_key_command(&state, "bold").unwrap();
        assert!(state.current_content().first_block().style_at(1).contains(&InlineStyle::Bold));
    }

    #[test]
    fn unknown_and_editing_commands_are_not_handled() {
        let state = state_with("abc");
        assert!(handle_key_command(&state, "split-block").is_none());
        assert!(handle_key_command(&state, "undo").is_none());
        assert!(handle_key_command(&state, "make-it-pretty").is_none());
    }

    #[test]
    fn backspace_at_start_of_header_resets_it() {
        let state = toggle_block_type(&state_with("title"), BlockType::HeaderOne);
        let state = state.accept_selection(state.selection().collapse_to_start());
        let state = handle_key_command(&state, "backspace").unwrap();
        assert_eq!(current_block_type(&state), BlockType::Unstyled);
        assert_eq!(state.plain_text(), "title");
    }

    #[test]
    fn backspace_inside_text_is_not_handled() {
        let state = select(&state_with("abc"), (0, 2), (0, 2));
        assert!(handle_key_command(&state, "backspace").is_none());
        let state = select(&state, (0, 0), (0, 0));
        assert!(handle_key_command(&state, "backspace").is_none());
    }

    #[test]
    fn backspace_below_an_atomic_block_removes_it() {
        let state = select(&state_with(" \nafter"), (0, 0), (0, 0));
        let state = toggle_block_type(&state, BlockType::Atomic);
        let state = select(&state, (1, 0), (1, 0));
        let state = on_backspace(&state).unwrap();
        let blocks = state.current_content().blocks();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text(), "after");
        assert_eq!(blocks[0].block_type(), BlockType::Unstyled);
    }

    #[test]
    fn delete_before_an_atomic_block_removes_it() {
        let state = select(&state_with("before\n "), (1, 0), (1, 0));
        let state = toggle_block_type(&state, BlockType::Atomic);
        let state = select(&state, (0, 6), (0, 6));
        let state = handle_key_command(&state, "delete").unwrap();
        assert_eq!(state.plain_text(), "before");
        assert!(handle_key_command(&state, "delete").is_none());
    }
}
