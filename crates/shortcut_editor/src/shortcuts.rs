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

//! Line-start formatting shortcuts.
//!
//! | Typed at line start | Effect                          |
//! |---------------------|---------------------------------|
//! | `"# "`              | block becomes `header-one`      |
//! | `"* "`              | toggle `BOLD` from the cursor   |
//! | `"** "`             | toggle `RED` from the cursor    |
//! | `"*** "`            | toggle `UNDERLINE` from the cursor |
//!
//! The text from the start of the line up to the cursor, plus the
//! character being typed, must equal a trigger exactly. Triggers sharing
//! the `*` prefix are told apart by full equality, tried longest first.

use crate::modifier;
use crate::rich_utils;
use crate::{BlockType, ChangeType, EditorState, InlineStyle, SelectionState};

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum_macros::AsRefStr,
    strum_macros::Display,
    strum_macros::EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Shortcut {
    Header,
    Bold,
    Red,
    Underline,
}

impl Shortcut {
    /// Longest trigger first.
    const BY_TRIGGER_LENGTH: [Shortcut; 4] = [
        Shortcut::Underline,
        Shortcut::Red,
        Shortcut::Bold,
        Shortcut::Header,
    ];

    pub fn trigger(&self) -> &'static str {
        match self {
            Self::Header => "# ",
            Self::Bold => "* ",
            Self::Red => "** ",
            Self::Underline => "*** ",
        }
    }

    /// The shortcut whose trigger is exactly `preceding_text`.
    pub fn matching(preceding_text: &str) -> Option<Self> {
        Self::BY_TRIGGER_LENGTH
            .into_iter()
            .find(|s| s.trigger() == preceding_text)
    }

    fn apply(&self, state: &EditorState) -> EditorState {
        match self {
            Self::Header => {
                let content = modifier::set_block_type(
                    state.current_content(),
                    state.selection(),
                    BlockType::HeaderOne,
                );
                state.push(content, ChangeType::ChangeBlockType)
            }
            Self::Bold => rich_utils::toggle_inline_style(state, InlineStyle::Bold),
            Self::Red => rich_utils::toggle_inline_style(state, InlineStyle::Red),
            Self::Underline => {
                rich_utils::toggle_inline_style(state, InlineStyle::Underline)
            }
        }
    }
}

/// Inspect `input` before it is inserted.
///
/// Returns the rewritten state when the line so far plus `input` forms a
/// trigger: the trigger text is removed and the formatting applied, and
/// `input` itself is never inserted. Returns `None` to let the input be
/// inserted normally.
pub fn handle_before_input(state: &EditorState, input: &str) -> Option<EditorState> {
    let selection = state.selection();
    let content = state.current_content();
    let key = selection.start_key();
    let block = content.block_for_key(key)?;
    let cursor = selection.start_offset().min(block.len());

    let preceding_text = block.text_between(0, cursor) + input;
    let shortcut = Shortcut::matching(&preceding_text)?;

    let trigger_range =
        SelectionState::range(content, (key.clone(), 0), (key.clone(), cursor))
            .with_has_focus(selection.has_focus);
    let without_trigger = modifier::replace_text(
        content,
        &trigger_range,
        "",
        &state.current_inline_style(),
    );
    let cleared = state.push(without_trigger, ChangeType::RemoveRange);

    log::debug!("applying {shortcut} shortcut in block {key}");
    Some(shortcut.apply(&cleared))
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::commands;
    use crate::{ContentState, StyleSet};

    /// Type `text` one char at a time, letting shortcuts intercept.
    fn type_chars(state: &EditorState, text: &str) -> EditorState {
        text.chars().fold(state.clone(), |state, ch| {
            let input = ch.to_string();
            handle_before_input(&state, &input)
                .unwrap_or_else(|| commands::insert_characters(&state, &input))
        })
    }

    fn first_block_type(state: &EditorState) -> BlockType {
        state.current_content().first_block().block_type()
    }

    #[test]
    fn triggers_are_matched_exactly() {
        assert_eq!(Shortcut::matching("# "), Some(Shortcut::Header));
        assert_eq!(Shortcut::matching("* "), Some(Shortcut::Bold));
        assert_eq!(Shortcut::matching("** "), Some(Shortcut::Red));
        assert_eq!(Shortcut::matching("*** "), Some(Shortcut::Underline));
        assert_eq!(Shortcut::matching("**** "), None);
        assert_eq!(Shortcut::matching(" * "), None);
        assert_eq!(Shortcut::matching("#"), None);
        assert_eq!(Shortcut::matching("x# "), None);
    }

    #[test]
    fn every_shortcut_matches_its_own_trigger() {
        for shortcut in Shortcut::iter() {
            assert_eq!(Shortcut::matching(shortcut.trigger()), Some(shortcut));
        }
    }

    #[test]
    fn hash_space_makes_a_header() {
        let state = type_chars(&EditorState::create_empty(), "# ");
        assert_eq!(state.plain_text(), "");
        assert_eq!(first_block_type(&state), BlockType::HeaderOne);
        assert!(state.current_inline_style().is_empty());
    }

    #[test]
    fn star_space_toggles_bold() {
        let state = type_chars(&EditorState::create_empty(), "* ");
        assert_eq!(state.plain_text(), "");
        assert_eq!(first_block_type(&state), BlockType::Unstyled);
        assert_eq!(state.current_inline_style(), StyleSet::from([InlineStyle::Bold]));
    }

    #[test]
    fn two_stars_space_toggles_red() {
        let state = type_chars(&EditorState::create_empty(), "** ");
        assert_eq!(state.plain_text(), "");
        assert_eq!(state.current_inline_style(), StyleSet::from([InlineStyle::Red]));
    }

    #[test]
    fn three_stars_space_toggles_underline() {
        let state = type_chars(&EditorState::create_empty(), "*** ");
        assert_eq!(state.plain_text(), "");
        assert_eq!(
            state.current_inline_style(),
            StyleSet::from([InlineStyle::Underline])
        );
    }

    #[test]
    fn text_typed_after_a_style_shortcut_carries_the_style() {
        let state = type_chars(&EditorState::create_empty(), "* hi");
        let block = state.current_content().first_block();
        assert_eq!(block.text(), "hi");
        assert!(block.characters().iter().all(|c| c.style == StyleSet::from([InlineStyle::Bold])));
    }

    #[test]
    fn trigger_not_at_line_start_is_inserted_literally() {
        let state = type_chars(&EditorState::create_empty(), "x# ");
        assert_eq!(state.plain_text(), "x# ");
        assert_eq!(first_block_type(&state), BlockType::Unstyled);
    }

    #[test]
    fn extra_character_invalidates_the_match() {
        let state = type_chars(&EditorState::create_empty(), "**** ");
        assert_eq!(state.plain_text(), "**** ");
        assert!(state.current_inline_style().is_empty());
    }

    #[test]
    fn trigger_on_a_later_line_only_affects_that_line() {
        let content = ContentState::from_text("keep\n");
        let second = content.blocks()[1].key().clone();
        let state = EditorState::create_with_content(content)
            .accept_selection(SelectionState::collapsed(second, 0));
        let state = type_chars(&state, "# ");
        let blocks = state.current_content().blocks();
        assert_eq!(blocks[0].block_type(), BlockType::Unstyled);
        assert_eq!(blocks[0].text(), "keep");
        assert_eq!(blocks[1].block_type(), BlockType::HeaderOne);
        assert_eq!(blocks[1].text(), "");
    }

    #[test]
    fn non_matching_input_is_not_handled() {
        let state = EditorState::create_empty();
        assert!(handle_before_input(&state, "a").is_none());
        assert!(handle_before_input(&state, " ").is_none());
    }

    #[test]
    fn undo_after_a_style_shortcut_restores_the_trigger_text() {
        let state = type_chars(&EditorState::create_empty(), "* ");
        let undone = state.undo();
        assert_eq!(undone.plain_text(), "*");
    }

    #[test]
    fn undo_after_header_shortcut_steps_back_through_both_changes() {
        let state = type_chars(&EditorState::create_empty(), "# ");
        let undone = state.undo();
        assert_eq!(first_block_type(&undone), BlockType::Unstyled);
        assert_eq!(undone.plain_text(), "");
        assert_eq!(undone.undo().plain_text(), "#");
    }
}
