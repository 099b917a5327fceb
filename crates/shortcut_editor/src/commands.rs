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

//! Default editing behaviour: what the host surface does with input that
//! no handler consumed.
//!
//! Character deletion works on grapheme clusters and word deletion on
//! Unicode word boundaries, both via `unicode-segmentation`.

use std::str::FromStr;

use unicode_segmentation::UnicodeSegmentation;

use crate::modifier;
use crate::{BlockKey, ChangeType, EditorState, SelectionState};

/// Named editor commands, as produced by key bindings.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum_macros::AsRefStr,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[strum(serialize_all = "kebab-case")]
pub enum KeyCommand {
    Bold,
    Italic,
    Underline,
    Code,
    Strikethrough,
    Backspace,
    BackspaceWord,
    BackspaceToStartOfLine,
    Delete,
    DeleteWord,
    DeleteToEndOfBlock,
    SplitBlock,
    Undo,
    Redo,
}

/// Run the built-in behaviour for `command`. Returns `None` for unknown
/// commands and for the inline style commands, which only
/// [`rich_utils::handle_key_command`](crate::rich_utils::handle_key_command)
/// handles.
pub fn apply_default_key_command(
    state: &EditorState,
    command: &str,
) -> Option<EditorState> {
    let command = KeyCommand::from_str(command).ok()?;
    let next = match command {
        KeyCommand::Backspace => backspace(state),
        KeyCommand::BackspaceWord => backspace_word(state),
        KeyCommand::BackspaceToStartOfLine => backspace_to_start_of_line(state),
        KeyCommand::Delete => delete(state),
        KeyCommand::DeleteWord => delete_word(state),
        KeyCommand::DeleteToEndOfBlock => delete_to_end_of_block(state),
        KeyCommand::SplitBlock => split_block(state),
        KeyCommand::Undo => state.undo(),
        KeyCommand::Redo => state.redo(),
        KeyCommand::Bold
        | KeyCommand::Italic
        | KeyCommand::Underline
        | KeyCommand::Code
        | KeyCommand::Strikethrough => return None,
    };
    Some(next)
}

/// Insert typed characters at the selection using the current inline
/// style.
pub fn insert_characters(state: &EditorState, chars: &str) -> EditorState {
    let content = modifier::replace_text(
        state.current_content(),
        state.selection(),
        chars,
        &state.current_inline_style(),
    );
    state.push(content, ChangeType::InsertCharacters)
}

/// Enter key.
pub fn split_block(state: &EditorState) -> EditorState {
    let content = modifier::split_block(state.current_content(), state.selection());
    state.push(content, ChangeType::SplitBlock)
}

pub fn backspace(state: &EditorState) -> EditorState {
    remove_backward(state, |text| {
        text.graphemes(true).next_back().map_or(0, |g| g.chars().count())
    })
}

pub fn backspace_word(state: &EditorState) -> EditorState {
    remove_backward(state, |text| {
        removable_word_len(text.split_word_bounds().rev())
    })
}

pub fn backspace_to_start_of_line(state: &EditorState) -> EditorState {
    remove_backward(state, |text| text.chars().count())
}

pub fn delete(state: &EditorState) -> EditorState {
    remove_forward(state, |text| {
        text.graphemes(true).next().map_or(0, |g| g.chars().count())
    })
}

pub fn delete_word(state: &EditorState) -> EditorState {
    remove_forward(state, |text| removable_word_len(text.split_word_bounds()))
}

pub fn delete_to_end_of_block(state: &EditorState) -> EditorState {
    remove_forward(state, |text| text.chars().count())
}

fn remove_selected(state: &EditorState) -> EditorState {
    let content = modifier::remove_range(state.current_content(), state.selection());
    state.push(content, ChangeType::RemoveRange)
}

/// Remove `len(text_before_cursor)` chars before a collapsed cursor, or
/// join with the previous block at offset 0.
fn remove_backward(
    state: &EditorState,
    len: impl Fn(&str) -> usize,
) -> EditorState {
    let selection = state.selection();
    if !selection.is_collapsed() {
        return remove_selected(state);
    }
    let content = state.current_content();
    let key = selection.start_key();
    let Some(block) = content.block_for_key(key) else {
        return state.clone();
    };
    let offset = selection.start_offset().min(block.len());

    let target = if offset == 0 {
        let Some(before) = content.block_before(key) else {
            return state.clone();
        };
        range(state, (before.key(), before.len()), (key, 0))
    } else {
        let count = len(&block.text_between(0, offset)).max(1);
        range(state, (key, offset - count.min(offset)), (key, offset))
    };

    let removed = modifier::remove_range(content, &target);
    state.push(removed, ChangeType::BackspaceCharacter)
}

/// Remove `len(text_after_cursor)` chars after a collapsed cursor, or
/// join the next block at the end of this one.
fn remove_forward(
    state: &EditorState,
    len: impl Fn(&str) -> usize,
) -> EditorState {
    let selection = state.selection();
    if !selection.is_collapsed() {
        return remove_selected(state);
    }
    let content = state.current_content();
    let key = selection.start_key();
    let Some(block) = content.block_for_key(key) else {
        return state.clone();
    };
    let offset = selection.start_offset().min(block.len());

    let target = if offset == block.len() {
        let Some(after) = content.block_after(key) else {
            return state.clone();
        };
        range(state, (key, offset), (after.key(), 0))
    } else {
        let count = len(&block.text_between(offset, block.len())).max(1);
        range(state, (key, offset), (key, (offset + count).min(block.len())))
    };

    let removed = modifier::remove_range(content, &target);
    state.push(removed, ChangeType::DeleteCharacter)
}

fn range(
    state: &EditorState,
    start: (&BlockKey, usize),
    end: (&BlockKey, usize),
) -> SelectionState {
    SelectionState::range(
        state.current_content(),
        (start.0.clone(), start.1),
        (end.0.clone(), end.1),
    )
    .with_has_focus(state.selection().has_focus)
}

/// Chars covered by one word plus the separators between it and the
/// cursor, walking `segments` away from the cursor.
fn removable_word_len<'a>(segments: impl Iterator<Item = &'a str>) -> usize {
    let mut count = 0;
    for segment in segments {
        count += segment.chars().count();
        if segment.chars().any(char::is_alphanumeric) {
            break;
        }
    }
    count
}
