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

//! Browser bindings for `shortcut_editor`: a widget backed by
//! `localStorage` that renders into a `contenteditable` surface.

mod dom;
mod local_storage;
mod widget;

use wasm_bindgen::prelude::*;

pub use local_storage::LocalStorage;
pub use widget::ShortcutEditorWidget;

#[wasm_bindgen(start)]
pub fn start() {
    cfg_if::cfg_if! {
        if #[cfg(feature = "console_error_panic_hook")] {
            console_error_panic_hook::set_once();
        }
    }
    console_log::init_with_level(log::Level::Debug)
        .expect("failed to initialize logger");
}
