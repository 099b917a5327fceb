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

use std::cell::RefCell;
use std::rc::Rc;

use shortcut_editor::{
    raw, BlockKey, EditorConfig, HandleValue, SelectionState, ShortcutEditor,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    CompositionEvent, Document, Element, HtmlElement, InputEvent, KeyboardEvent,
};

use crate::dom::{dom_point_to_position, place_caret};
use crate::local_storage::{describe, LocalStorage};

type Editor = ShortcutEditor<LocalStorage>;

const SURFACE_CLASS: &str = "shortcut-editor-surface";

/// Shows the surface's `data-placeholder` attribute while it is set.
const SURFACE_CSS: &str = "\
.shortcut-editor-header{display:flex;align-items:center;gap:1em}\
.shortcut-editor-surface{position:relative;min-height:1.5em}\
.shortcut-editor-surface[data-placeholder]::before{\
content:attr(data-placeholder);position:absolute;color:#9e9e9e;\
pointer-events:none;user-select:none}";

/// What the surface should do in response to a DOM event.
#[derive(Debug, PartialEq, Eq)]
enum SurfaceAction {
    Type(String),
    Paste(String),
    Command(&'static str),
}

#[derive(Clone, Copy, Debug, Default)]
struct Modifiers {
    ctrl: bool,
    meta: bool,
    alt: bool,
    shift: bool,
}

impl Modifiers {
    fn of(event: &KeyboardEvent) -> Self {
        Self {
            ctrl: event.ctrl_key(),
            meta: event.meta_key(),
            alt: event.alt_key(),
            shift: event.shift_key(),
        }
    }

    fn primary(&self) -> bool {
        self.ctrl || self.meta
    }
}

fn command_for_key(key: &str, m: Modifiers) -> Option<&'static str> {
    let command = match key {
        "Enter" => "split-block",
        "Backspace" if m.meta => "backspace-to-start-of-line",
        "Backspace" if m.ctrl || m.alt => "backspace-word",
        "Backspace" => "backspace",
        "Delete" if m.ctrl || m.alt => "delete-word",
        "Delete" => "delete",
        "b" | "B" if m.primary() => "bold",
        "i" | "I" if m.primary() => "italic",
        "u" | "U" if m.primary() => "underline",
        "z" | "Z" if m.primary() && m.shift => "redo",
        "z" | "Z" if m.primary() => "undo",
        "y" | "Y" if m.primary() => "redo",
        _ => return None,
    };
    Some(command)
}

fn action_for_input(input_type: &str, data: Option<String>) -> Option<SurfaceAction> {
    let command = match input_type {
        "insertText" | "insertReplacementText" => {
            return data.filter(|d| !d.is_empty()).map(SurfaceAction::Type)
        }
        "insertFromPaste" | "insertFromDrop" | "insertFromYank" => {
            return data.filter(|d| !d.is_empty()).map(SurfaceAction::Paste)
        }
        "insertParagraph" | "insertLineBreak" => "split-block",
        "deleteContentBackward" => "backspace",
        "deleteContentForward" => "delete",
        "deleteWordBackward" => "backspace-word",
        "deleteWordForward" => "delete-word",
        "deleteSoftLineBackward" | "deleteHardLineBackward" => {
            "backspace-to-start-of-line"
        }
        "deleteSoftLineForward" | "deleteHardLineForward" => {
            "delete-to-end-of-block"
        }
        "historyUndo" => "undo",
        "historyRedo" => "redo",
        "formatBold" => "bold",
        "formatItalic" => "italic",
        "formatUnderline" => "underline",
        "formatStrikeThrough" => "strikethrough",
        _ => return None,
    };
    Some(SurfaceAction::Command(command))
}

/// Input the browser must apply itself while an IME composition is in
/// progress. The composed text is committed on `compositionend`.
fn is_composition_input(input_type: &str, is_composing: bool) -> bool {
    is_composing
        || matches!(
            input_type,
            "insertCompositionText" | "deleteCompositionText" | "insertFromComposition"
        )
}

/// The text carried by an input event: `data` for typing, the
/// `text/plain` transfer data for paste and drop.
fn input_text(event: &InputEvent) -> Option<String> {
    event.data().or_else(|| {
        event
            .data_transfer()
            .and_then(|transfer| transfer.get_data("text/plain").ok())
    })
}

fn perform(editor: &Rc<RefCell<Editor>>, action: SurfaceAction) {
    let mut editor = editor.borrow_mut();
    match action {
        SurfaceAction::Type(text) => editor.type_text(&text),
        SurfaceAction::Paste(text) => {
            let text = text.replace("\r\n", "\n").replace('\r', "\n");
            for (i, line) in text.split('\n').enumerate() {
                if i > 0 {
                    editor.key_command("split-block");
                }
                if !line.is_empty() {
                    editor.insert_characters(line);
                }
            }
        }
        SurfaceAction::Command(command) => {
            if editor.key_command(command) == HandleValue::NotHandled {
                log::debug!("ignored key command {command}");
            }
        }
    }
}

/// Read the browser selection into the editor state.
fn sync_selection(editor: &Rc<RefCell<Editor>>, document: &Document) {
    let Some(selection) = web_sys::window()
        .and_then(|w| w.get_selection().ok().flatten())
    else {
        return;
    };
    let (Some(anchor_node), Some(focus_node)) =
        (selection.anchor_node(), selection.focus_node())
    else {
        return;
    };
    let anchor = dom_point_to_position(document, &anchor_node, selection.anchor_offset());
    let focus = dom_point_to_position(document, &focus_node, selection.focus_offset());
    let (Some((anchor_key, anchor_offset)), Some((focus_key, focus_offset))) =
        (anchor, focus)
    else {
        return;
    };

    let selection = {
        let editor = editor.borrow();
        let content = editor.editor_state().current_content();
        SelectionState::range(
            content,
            (BlockKey::new(anchor_key), anchor_offset),
            (BlockKey::new(focus_key), focus_offset),
        )
    };
    editor.borrow_mut().select(selection);
}

/// Redraw the surface from the editor state and restore the caret.
fn render(editor: &Rc<RefCell<Editor>>, surface: &HtmlElement) {
    let editor = editor.borrow();
    surface.set_inner_html(&editor.render_html());
    let placeholder = match editor.placeholder() {
        Some(text) => surface.set_attribute("data-placeholder", text),
        None => surface.remove_attribute("data-placeholder"),
    };
    let selection = editor.editor_state().selection();
    let caret = place_caret(
        surface,
        selection.focus_key.as_str(),
        selection.focus_offset,
    );
    if let Err(e) = placeholder.and(caret) {
        log::warn!("failed to update the editing surface: {}", describe(&e));
    }
}

fn create_element(document: &Document, tag: &str) -> Result<HtmlElement, JsValue> {
    Ok(document.create_element(tag)?.dyn_into::<HtmlElement>()?)
}

/// The editor widget as exposed to JavaScript.
#[wasm_bindgen]
pub struct ShortcutEditorWidget {
    editor: Rc<RefCell<Editor>>,
}

#[wasm_bindgen]
impl ShortcutEditorWidget {
    /// A widget saving to `localStorage` under `storage_key`, or under
    /// `"editorState"` when none is given.
    #[wasm_bindgen(constructor)]
    pub fn new(storage_key: Option<String>) -> Self {
        let mut config = EditorConfig::default();
        if let Some(key) = storage_key {
            config = config.with_storage_key(key);
        }
        Self {
            editor: Rc::new(RefCell::new(ShortcutEditor::with_config(
                LocalStorage::from_window(),
                config,
            ))),
        }
    }

    /// Restore the saved document. Only the first call has an effect.
    pub fn mount(&self) {
        self.editor.borrow_mut().mount();
    }

    /// Offer typed text to the shortcut interceptor. Returns
    /// `"handled"` or `"not-handled"`.
    pub fn before_input(&self, data: &str) -> String {
        self.editor.borrow_mut().handle_before_input(data).to_string()
    }

    pub fn insert_characters(&self, data: &str) {
        self.editor.borrow_mut().insert_characters(data);
    }

    /// The key command delegate alone.
    pub fn handle_key_command(&self, command: &str) -> String {
        self.editor.borrow_mut().handle_key_command(command).to_string()
    }

    /// The key command delegate, then the default behaviour.
    pub fn key_command(&self, command: &str) -> String {
        self.editor.borrow_mut().key_command(command).to_string()
    }

    pub fn select(
        &self,
        anchor_key: &str,
        anchor_offset: usize,
        focus_key: &str,
        focus_offset: usize,
    ) {
        let selection = {
            let editor = self.editor.borrow();
            SelectionState::range(
                editor.editor_state().current_content(),
                (BlockKey::from(anchor_key), anchor_offset),
                (BlockKey::from(focus_key), focus_offset),
            )
        };
        self.editor.borrow_mut().select(selection);
    }

    /// Save to local storage, returning the acknowledgement message.
    pub fn save(&self) -> Result<String, JsError> {
        let mut editor = self.editor.borrow_mut();
        let message = editor.save().map_err(JsError::from)?;
        Ok(message.to_string())
    }

    pub fn content_html(&self) -> String {
        self.editor.borrow().render_html()
    }

    pub fn plain_text(&self) -> String {
        self.editor.borrow().editor_state().plain_text()
    }

    pub fn raw_json(&self) -> Result<String, JsError> {
        raw::to_json(self.editor.borrow().editor_state().current_content())
            .map_err(JsError::from)
    }

    pub fn placeholder(&self) -> Option<String> {
        self.editor.borrow().placeholder().map(str::to_string)
    }

    pub fn heading(&self) -> String {
        self.editor.borrow().config().heading.clone()
    }

    /// Mount the widget and build its UI inside the element `element_id`:
    /// a heading with the "Save" button, then the editable surface.
    pub fn mount_into(&self, element_id: &str) -> Result<(), JsValue> {
        self.mount();

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let container: Element = document
            .get_element_by_id(element_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element #{element_id}")))?;

        let style = document.create_element("style")?;
        style.set_text_content(Some(SURFACE_CSS));
        let header = create_element(&document, "div")?;
        header.set_class_name("shortcut-editor-header");
        let heading = create_element(&document, "h1")?;
        heading.set_text_content(Some(&self.heading()));
        let button = create_element(&document, "button")?;
        button.set_text_content(Some("Save"));
        let surface = create_element(&document, "div")?;
        surface.set_content_editable("true");
        surface.set_class_name(SURFACE_CLASS);

        header.append_child(&heading)?;
        header.append_child(&button)?;
        container.append_child(&style)?;
        container.append_child(&header)?;
        container.append_child(&surface)?;

        let on_save = {
            let editor = Rc::clone(&self.editor);
            Closure::<dyn FnMut()>::new(move || {
                let result = editor.borrow_mut().save().map(str::to_string);
                let message = match result {
                    Ok(message) => message,
                    Err(e) => {
                        log::error!("save failed: {e}");
                        e.to_string()
                    }
                };
                if let Some(window) = web_sys::window() {
                    if let Err(e) = window.alert_with_message(&message) {
                        log::warn!("alert failed: {}", describe(&e));
                    }
                }
            })
        };
        button.add_event_listener_with_callback("click", on_save.as_ref().unchecked_ref())?;
        on_save.forget();

        let on_before_input = {
            let editor = Rc::clone(&self.editor);
            let surface = surface.clone();
            let document = document.clone();
            Closure::<dyn FnMut(InputEvent)>::new(move |event: InputEvent| {
                let input_type = event.input_type();
                if is_composition_input(&input_type, event.is_composing()) {
                    return;
                }
                event.prevent_default();
                let Some(action) = action_for_input(&input_type, input_text(&event)) else {
                    log::debug!("ignored input type {input_type}");
                    return;
                };
                sync_selection(&editor, &document);
                perform(&editor, action);
                render(&editor, &surface);
            })
        };
        surface.add_event_listener_with_callback(
            "beforeinput",
            on_before_input.as_ref().unchecked_ref(),
        )?;
        on_before_input.forget();

        let on_composition_start = {
            let editor = Rc::clone(&self.editor);
            let document = document.clone();
            Closure::<dyn FnMut(CompositionEvent)>::new(move |_: CompositionEvent| {
                sync_selection(&editor, &document);
            })
        };
        surface.add_event_listener_with_callback(
            "compositionstart",
            on_composition_start.as_ref().unchecked_ref(),
        )?;
        on_composition_start.forget();

        // The model selection is still the one synced at compositionstart.
        let on_composition_end = {
            let editor = Rc::clone(&self.editor);
            let surface = surface.clone();
            Closure::<dyn FnMut(CompositionEvent)>::new(move |event: CompositionEvent| {
                if let Some(text) = event.data().filter(|d| !d.is_empty()) {
                    perform(&editor, SurfaceAction::Type(text));
                }
                render(&editor, &surface);
            })
        };
        surface.add_event_listener_with_callback(
            "compositionend",
            on_composition_end.as_ref().unchecked_ref(),
        )?;
        on_composition_end.forget();

        let on_key_down = {
            let editor = Rc::clone(&self.editor);
            let surface = surface.clone();
            let document = document.clone();
            Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
                if event.is_composing() {
                    return;
                }
                let Some(command) = command_for_key(&event.key(), Modifiers::of(&event))
                else {
                    return;
                };
                event.prevent_default();
                sync_selection(&editor, &document);
                perform(&editor, SurfaceAction::Command(command));
                render(&editor, &surface);
            })
        };
        surface.add_event_listener_with_callback(
            "keydown",
            on_key_down.as_ref().unchecked_ref(),
        )?;
        on_key_down.forget();

        render(&self.editor, &surface);
        Ok(())
    }
}
