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

//! Rich text editor model with line-start formatting shortcuts.
//!
//! The document is an immutable value ([`ContentState`]) changed only
//! through the pure transforms in [`modifier`]. [`EditorState`] pairs it
//! with a selection, pending inline styles and undo history.
//! [`ShortcutEditor`] is the widget: it intercepts typed input, turns the
//! triggers `"# "`, `"* "`, `"** "` and `"*** "` into formatting, and
//! saves/restores the document through an injected [`Storage`].

pub mod commands;
mod config;
mod content;
mod editor;
mod editor_state;
pub mod modifier;
mod persistence;
pub mod raw;
pub mod render;
pub mod rich_utils;
mod selection;
mod shortcuts;
mod storage;

pub use config::EditorConfig;
pub use content::{
    BlockKey, BlockType, CharacterMetadata, ContentBlock, ContentState,
    InlineStyle, StyleRun, StyleSet,
};
pub use editor::{HandleValue, ShortcutEditor};
pub use editor_state::{ChangeType, EditorState};
pub use persistence::{load_content, save_content, PersistError};
pub use raw::{convert_from_raw, convert_to_raw, RawDraftContentState, SnapshotError};
pub use selection::SelectionState;
pub use shortcuts::{handle_before_input, Shortcut};
pub use storage::{MemoryStorage, Storage, StorageError};

/// Storage key the editor content is saved under.
pub const STORAGE_KEY: &str = "editorState";
