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

//! The editor state value: content, selection, pending styles, history.
//!
//! An [`EditorState`] is never modified in place. Every transition
//! returns a new value, and the host keeps exactly one current value.

use crate::{ContentState, SelectionState, StyleSet};

const DEFAULT_MAX_UNDO_DEPTH: usize = 100;

/// Why the content changed. Consecutive character-level changes of the
/// same type are merged into one undo step.
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
pub enum ChangeType {
    InsertCharacters,
    BackspaceCharacter,
    DeleteCharacter,
    RemoveRange,
    SplitBlock,
    ChangeBlockType,
    ChangeInlineStyle,
    Undo,
    Redo,
}

impl ChangeType {
    fn is_character_level(&self) -> bool {
        matches!(
            self,
            Self::InsertCharacters
                | Self::BackspaceCharacter
                | Self::DeleteCharacter
        )
    }

    fn keeps_style_override(&self) -> bool {
        matches!(self, Self::ChangeBlockType | Self::SplitBlock)
    }
}

#[derive(Clone, Debug)]
pub struct EditorState {
    current_content: ContentState,
    selection: SelectionState,
    /// Styles for the next inserted characters at a collapsed cursor.
    inline_style_override: Option<StyleSet>,
    undo_stack: Vec<ContentState>,
    redo_stack: Vec<ContentState>,
    last_change_type: Option<ChangeType>,
    force_selection: bool,
    max_undo_depth: usize,
}

impl EditorState {
    pub fn create_empty() -> Self {
        Self::create_with_content(ContentState::create_empty())
    }

    /// A state with the cursor at the start of the first block.
    pub fn create_with_content(content: ContentState) -> Self {
        let selection =
            SelectionState::collapsed(content.first_block().key().clone(), 0);
        Self {
            current_content: content,
            selection,
            inline_style_override: None,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            last_change_type: None,
            force_selection: false,
            max_undo_depth: DEFAULT_MAX_UNDO_DEPTH,
        }
    }

    pub fn with_max_undo_depth(mut self, depth: usize) -> Self {
        self.max_undo_depth = depth;
        self.trim_undo_stack();
        self
    }

    pub fn current_content(&self) -> &ContentState {
        &self.current_content
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn inline_style_override(&self) -> Option<&StyleSet> {
        self.inline_style_override.as_ref()
    }

    pub fn last_change_type(&self) -> Option<ChangeType> {
        self.last_change_type
    }

    pub fn must_force_selection(&self) -> bool {
        self.force_selection
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// The text of all blocks joined by newlines.
    pub fn plain_text(&self) -> String {
        self.current_content.plain_text()
    }

    /// Install `content` as the current document.
    ///
    /// The selection becomes `content.selection_after()`. The previous
    /// content is pushed onto the undo stack unless this change continues
    /// a run of same-typed character edits from an unmoved cursor.
    pub fn push(&self, content: ContentState, change_type: ChangeType) -> Self {
        let mut next = self.clone();
        let mut content = content;

        let cursor_moved = self.selection != self.current_content.selection_after;
        let must_become_boundary = self.last_change_type != Some(change_type)
            || !change_type.is_character_level();

        if cursor_moved || must_become_boundary {
            next.undo_stack.push(self.current_content.clone());
            next.trim_undo_stack();
        } else {
            // Merged step: undo should return to before the whole run.
            content.selection_before =
                self.current_content.selection_before.clone();
        }
        next.redo_stack.clear();

        next.selection = content.selection_after.clone();
        next.current_content = content;
        next.last_change_type = Some(change_type);
        next.force_selection = change_type != ChangeType::InsertCharacters;
        if !change_type.keeps_style_override() {
            next.inline_style_override = None;
        }
        next
    }

    /// Adopt a selection reported by the host surface.
    pub fn accept_selection(&self, selection: SelectionState) -> Self {
        Self {
            selection,
            force_selection: false,
            inline_style_override: None,
            ..self.clone()
        }
    }

    /// Move the selection and ask the host to render it.
    pub fn force_selection(&self, selection: SelectionState) -> Self {
        Self {
            selection,
            force_selection: true,
            inline_style_override: None,
            ..self.clone()
        }
    }

    pub fn set_inline_style_override(&self, style: StyleSet) -> Self {
        Self {
            inline_style_override: Some(style),
            ..self.clone()
        }
    }

    /// The styles the next inserted character will carry.
    pub fn current_inline_style(&self) -> StyleSet {
        if let Some(style) = &self.inline_style_override {
            return style.clone();
        }

        let content = &self.current_content;
        let key = self.selection.start_key();
        let Some(block) = content.block_for_key(key) else {
            return StyleSet::new();
        };
        let offset = self.selection.start_offset().min(block.len());

        if self.selection.is_collapsed() {
            if offset > 0 {
                return block.style_at(offset - 1);
            }
            if !block.is_empty() {
                return block.style_at(0);
            }
            return self.look_upward_for_inline_style();
        }

        if offset < block.len() {
            return block.style_at(offset);
        }
        if offset > 0 {
            return block.style_at(block.len() - 1);
        }
        self.look_upward_for_inline_style()
    }

    /// Style of the last character of the closest non-empty block above
    /// the selection start.
    fn look_upward_for_inline_style(&self) -> StyleSet {
        let content = &self.current_content;
        let Some(index) = content.block_index(self.selection.start_key())
        else {
            return StyleSet::new();
        };
        content.blocks()[..index]
            .iter()
            .rev()
            .find(|b| !b.is_empty())
            .map(|b| b.style_at(b.len() - 1))
            .unwrap_or_default()
    }

    pub fn undo(&self) -> Self {
        let Some(previous) = self.undo_stack.last() else {
            return self.clone();
        };
        let mut next = self.clone();
        next.undo_stack.pop();
        next.redo_stack.push(self.current_content.clone());
        next.selection = self.current_content.selection_before.clone();
        next.current_content = previous.clone();
        next.last_change_type = Some(ChangeType::Undo);
        next.force_selection = true;
        next.inline_style_override = None;
        next
    }

    pub fn redo(&self) -> Self {
        let Some(following) = self.redo_stack.last() else {
            return self.clone();
        };
        let mut next = self.clone();
        next.redo_stack.pop();
        next.undo_stack.push(self.current_content.clone());
        next.trim_undo_stack();
        next.selection = following.selection_after.clone();
        next.current_content = following.clone();
        next.last_change_type = Some(ChangeType::Redo);
        next.force_selection = true;
        next.inline_style_override = None;
        next
    }

    fn trim_undo_stack(&mut self) {
        if self.undo_stack.len() > self.max_undo_depth {
            let excess = self.undo_stack.len() - self.max_undo_depth;
            self.undo_stack.drain(..excess);
        }
    }

    /// Return a debug tree representation of the document.
    pub fn to_tree(&self) -> String {
        let sel = &self.selection;
        let mut out = format!(
            "sel: ({}:{}, {}:{})\n",
            sel.start_key(),
            sel.start_offset(),
            sel.end_key(),
            sel.end_offset()
        );
        for block in self.current_content.blocks() {
            out.push_str(&format!(
                "├─ {} [{}]\n",
                block.block_type(),
                block.key()
            ));
            for run in block.runs() {
                let styles: Vec<&str> =
                    run.style.iter().map(|s| s.as_ref()).collect();
                if styles.is_empty() {
                    out.push_str(&format!("│  \"{}\"\n", run.text));
                } else {
                    out.push_str(&format!(
                        "│  \"{}\" [{}]\n",
                        run.text,
                        styles.join(", ")
                    ));
                }
            }
        }
        out
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::create_empty()
    }
}
