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

use crate::commands;
use crate::persistence::{load_content, save_content, PersistError};
use crate::render;
use crate::rich_utils;
use crate::shortcuts;
use crate::{EditorConfig, EditorState, SelectionState, Storage};

/// Whether a handler consumed an event. The host falls back to its
/// default behaviour on `NotHandled`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, strum_macros::AsRefStr, strum_macros::Display,
)]
#[strum(serialize_all = "kebab-case")]
pub enum HandleValue {
    Handled,
    NotHandled,
}

impl From<bool> for HandleValue {
    fn from(handled: bool) -> Self {
        if handled {
            Self::Handled
        } else {
            Self::NotHandled
        }
    }
}

/// The editor widget: one [`EditorState`] plus the storage it is saved
/// to and restored from.
pub struct ShortcutEditor<S: Storage> {
    config: EditorConfig,
    storage: S,
    state: EditorState,
    mounted: bool,
}

impl<S: Storage> ShortcutEditor<S> {
    pub fn new(storage: S) -> Self {
        Self::with_config(storage, EditorConfig::default())
    }

    pub fn with_config(storage: S, config: EditorConfig) -> Self {
        let state =
            EditorState::create_empty().with_max_undo_depth(config.max_undo_depth);
        Self {
            config,
            storage,
            state,
            mounted: false,
        }
    }

    /// Restore the saved snapshot, if any. Only the first call reads
    /// storage; a missing or unreadable snapshot leaves the empty
    /// document in place.
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        if let Some(content) = load_content(&self.storage, &self.config.storage_key) {
            log::debug!("restored {} blocks", content.blocks().len());
            self.state = EditorState::create_with_content(content)
                .with_max_undo_depth(self.config.max_undo_depth);
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn editor_state(&self) -> &EditorState {
        &self.state
    }

    /// Install a new state produced by the host.
    pub fn on_change(&mut self, state: EditorState) {
        self.state = state;
    }

    /// Adopt a selection reported by the host. Reporting the current
    /// selection again keeps pending inline styles.
    pub fn select(&mut self, selection: SelectionState) {
        if &selection != self.state.selection() {
            self.state = self.state.accept_selection(selection);
        }
    }

    /// Give the shortcut interceptor first look at typed text.
    pub fn handle_before_input(&mut self, chars: &str) -> HandleValue {
        match shortcuts::handle_before_input(&self.state, chars) {
            Some(state) => {
                self.state = state;
                HandleValue::Handled
            }
            None => HandleValue::NotHandled,
        }
    }

    /// Forward a named key command to [`rich_utils::handle_key_command`].
    pub fn handle_key_command(&mut self, command: &str) -> HandleValue {
        match rich_utils::handle_key_command(&self.state, command) {
            Some(state) => {
                self.state = state;
                HandleValue::Handled
            }
            None => HandleValue::NotHandled,
        }
    }

    /// The host's default behaviour for `command`.
    pub fn apply_default_key_command(&mut self, command: &str) -> HandleValue {
        match commands::apply_default_key_command(&self.state, command) {
            Some(state) => {
                self.state = state;
                HandleValue::Handled
            }
            None => HandleValue::NotHandled,
        }
    }

    /// The host's default insertion of typed text.
    pub fn insert_characters(&mut self, chars: &str) {
        self.state = commands::insert_characters(&self.state, chars);
    }

    /// Typed text as the host delivers it: the interceptor runs first,
    /// default insertion otherwise.
    pub fn type_text(&mut self, chars: &str) {
        if self.handle_before_input(chars) == HandleValue::NotHandled {
            self.insert_characters(chars);
        }
    }

    /// A key command as the host delivers it: the delegate runs first,
    /// the default behaviour otherwise.
    pub fn key_command(&mut self, command: &str) -> HandleValue {
        match self.handle_key_command(command) {
            HandleValue::Handled => HandleValue::Handled,
            HandleValue::NotHandled => self.apply_default_key_command(command),
        }
    }

    /// Write the current document to storage and return the
    /// acknowledgement to show the user.
    pub fn save(&mut self) -> Result<&str, PersistError> {
        save_content(
            &mut self.storage,
            &self.config.storage_key,
            self.state.current_content(),
        )?;
        Ok(&self.config.saved_message)
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// The placeholder to show, or `None` once the document has text.
    pub fn placeholder(&self) -> Option<&str> {
        if self.state.current_content().has_text() {
            None
        } else {
            Some(&self.config.placeholder)
        }
    }

    pub fn render_html(&self) -> String {
        render::content_to_html(self.state.current_content())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BlockType, InlineStyle, MemoryStorage, StyleSet};

    fn editor() -> ShortcutEditor<MemoryStorage> {
        let mut editor = ShortcutEditor::new(MemoryStorage::new());
        editor.mount();
        editor
    }

    #[test]
    fn handle_values_have_kebab_case_names() {
        assert_eq!(HandleValue::Handled.to_string(), "handled");
        assert_eq!(HandleValue::NotHandled.as_ref(), "not-handled");
        assert_eq!(HandleValue::from(false), HandleValue::NotHandled);
    }

    #[test]
    fn ordinary_input_is_not_handled() {
        let mut editor = editor();
        assert_eq!(editor.handle_before_input("a"), HandleValue::NotHandled);
        assert_eq!(editor.editor_state().plain_text(), "");
    }

    #[test]
    fn typed_header_shortcut_is_handled() {
        let mut editor = editor();
        editor.type_text("#");
        assert_eq!(editor.handle_before_input(" "), HandleValue::Handled);
        let block = editor.editor_state().current_content().first_block();
        assert_eq!(block.block_type(), BlockType::HeaderOne);
        assert_eq!(block.text(), "");
    }

    #[test]
    fn key_command_delegate_only_handles_library_commands() {
        let mut editor = editor();
        assert_eq!(editor.handle_key_command("bold"), HandleValue::Handled);
        assert_eq!(
            editor.editor_state().current_inline_style(),
            StyleSet::from([InlineStyle::Bold])
        );
        assert_eq!(editor.handle_key_command("split-block"), HandleValue::NotHandled);
        assert_eq!(editor.handle_key_command("no-such-command"), HandleValue::NotHandled);
    }

    #[test]
    fn key_command_falls_back_to_defaults() {
        let mut editor = editor();
        editor.type_text("ab");
        assert_eq!(editor.key_command("split-block"), HandleValue::Handled);
        assert_eq!(editor.editor_state().current_content().blocks().len(), 2);
        assert_eq!(editor.key_command("undo"), HandleValue::Handled);
        assert_eq!(editor.editor_state().plain_text(), "ab");
    }

    #[test]
    fn reselecting_the_cursor_keeps_pending_styles() {
        let mut editor = editor();
        editor.type_text("*");
        editor.type_text(" ");
        let cursor = editor.editor_state().selection().clone();
        editor.select(cursor);
        editor.type_text("b");
        let block = editor.editor_state().current_content().first_block();
        assert_eq!(block.style_at(0), StyleSet::from([InlineStyle::Bold]));

        let key = block.key().clone();
        editor.select(SelectionState::collapsed(key, 0));
        assert_eq!(editor.editor_state().inline_style_override(), None);
    }

    #[test]
    fn save_returns_the_acknowledgement() {
        let mut editor = editor();
        editor.type_text("hello");
        assert_eq!(editor.save().unwrap(), "Content saved!");
        let stored = editor.storage().get_item("editorState").unwrap().unwrap();
        assert!(stored.contains("\"text\":\"hello\""));
    }

    #[test]
    fn placeholder_disappears_once_there_is_text() {
        let mut editor = editor();
        assert_eq!(editor.placeholder(), Some("Press # , * , ** or *** and Space"));
        editor.type_text("x");
        assert_eq!(editor.placeholder(), None);
    }

    #[test]
    fn custom_config_changes_the_storage_key() {
        let config = EditorConfig::default().with_storage_key("draft");
        let mut editor = ShortcutEditor::with_config(MemoryStorage::new(), config);
        editor.mount();
        editor.type_text("x");
        editor.save().unwrap();
        assert!(editor.storage().get_item("draft").unwrap().is_some());
        assert!(editor.storage().get_item("editorState").unwrap().is_none());
    }
}
