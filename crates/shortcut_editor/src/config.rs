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

use crate::STORAGE_KEY;

/// Host-facing settings of a [`crate::ShortcutEditor`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditorConfig {
    /// Local storage key holding the saved snapshot.
    pub storage_key: String,
    pub heading: String,
    /// Shown while the document is empty.
    pub placeholder: String,
    /// Acknowledgement returned by a successful save.
    pub saved_message: String,
    pub max_undo_depth: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_string(),
            heading: "Demo Editor".to_string(),
            placeholder: "Press # , * , ** or *** and Space".to_string(),
            saved_message: "Content saved!".to_string(),
            max_undo_depth: 100,
        }
    }
}

impl EditorConfig {
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = heading.into();
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_saved_message(mut self, message: impl Into<String>) -> Self {
        self.saved_message = message.into();
        self
    }

    pub fn with_max_undo_depth(mut self, depth: usize) -> Self {
        self.max_undo_depth = depth;
        self
    }
}
