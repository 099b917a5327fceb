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

#![cfg(target_arch = "wasm32")]

use shortcut_editor::Storage;
use shortcut_editor_wasm::{LocalStorage, ShortcutEditorWidget};
use wasm_bindgen_test::*;
use web_sys::Element;

wasm_bindgen_test_configure!(run_in_browser);

fn type_chars(widget: &ShortcutEditorWidget, text: &str) {
    for ch in text.chars() {
        let ch = ch.to_string();
        if widget.before_input(&ch) == "not-handled" {
            widget.insert_characters(&ch);
        }
    }
}

#[wasm_bindgen_test]
fn local_storage_stores_and_overwrites() {
    let mut storage = LocalStorage::from_window();
    storage.set_item("shortcut-editor-test", "one").unwrap();
    storage.set_item("shortcut-editor-test", "two").unwrap();
    assert_eq!(
        storage.get_item("shortcut-editor-test").unwrap().as_deref(),
        Some("two")
    );
    assert_eq!(storage.get_item("shortcut-editor-missing").unwrap(), None);
}

#[wasm_bindgen_test]
fn saved_widget_content_is_restored() {
    LocalStorage::from_window()
        .set_item("shortcut-editor-widget", "")
        .unwrap();
    let widget = ShortcutEditorWidget::new(Some("shortcut-editor-widget".into()));
    widget.mount();
    type_chars(&widget, "# Title");
    assert!(widget.save().is_ok());

    let restored = ShortcutEditorWidget::new(Some("shortcut-editor-widget".into()));
    restored.mount();
    assert_eq!(restored.plain_text(), "Title");
    assert!(restored.content_html().starts_with("<h1"));
}

#[wasm_bindgen_test]
fn corrupted_snapshot_starts_empty() {
    let mut storage = LocalStorage::from_window();
    storage.set_item("shortcut-editor-corrupt", "[1, 2").unwrap();
    let widget = ShortcutEditorWidget::new(Some("shortcut-editor-corrupt".into()));
    widget.mount();
    assert_eq!(widget.plain_text(), "");
    assert!(widget.placeholder().is_some());
}

fn mounted_surface(id: &str, storage_key: &str) -> (ShortcutEditorWidget, Element) {
    LocalStorage::from_window().set_item(storage_key, "").unwrap();
    let document = web_sys::window().unwrap().document().unwrap();
    let container = document.create_element("div").unwrap();
    container.set_id(id);
    document.body().unwrap().append_child(&container).unwrap();

    let widget = ShortcutEditorWidget::new(Some(storage_key.into()));
    widget.mount_into(id).unwrap();
    let surface = container
        .query_selector(".shortcut-editor-surface")
        .unwrap()
        .unwrap();
    (widget, surface)
}

fn placeholder_content(surface: &Element) -> String {
    web_sys::window()
        .unwrap()
        .get_computed_style_with_pseudo_elt(surface, "::before")
        .unwrap()
        .unwrap()
        .get_property_value("content")
        .unwrap()
}

#[wasm_bindgen_test]
fn mounted_surface_shows_the_placeholder() {
    let (_widget, surface) = mounted_surface("editor-placeholder", "shortcut-editor-ui");
    assert_eq!(
        surface.get_attribute("data-placeholder").as_deref(),
        Some("Press # , * , ** or *** and Space")
    );
    let content = placeholder_content(&surface);
    assert!(!content.is_empty());
    assert_ne!(content, "none");
    assert_ne!(content, "normal");
}

#[wasm_bindgen_test]
fn mounted_heading_is_a_top_level_heading() {
    let (widget, _surface) = mounted_surface("editor-heading", "shortcut-editor-ui-heading");
    let document = web_sys::window().unwrap().document().unwrap();
    let heading = document
        .query_selector("#editor-heading h1")
        .unwrap()
        .unwrap();
    assert_eq!(heading.text_content(), Some(widget.heading()));
}
