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

//! Mapping between DOM positions in the rendered surface and
//! (block key, char offset) positions in the document.
//!
//! Relies on every block element carrying `data-block-key`, as produced
//! by `shortcut_editor::render`.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Node};

const BLOCK_KEY_ATTRIBUTE: &str = "data-block-key";

/// The block element containing `node`, including `node` itself.
fn block_element(node: &Node) -> Option<Element> {
    let mut current = Some(node.clone());
    while let Some(n) = current {
        if let Some(element) = n.dyn_ref::<Element>() {
            if element.has_attribute(BLOCK_KEY_ATTRIBUTE) {
                return Some(element.clone());
            }
        }
        current = n.parent_node();
    }
    None
}

/// The document position of a DOM point, or `None` if the point is not
/// inside a rendered block.
pub(crate) fn dom_point_to_position(
    document: &Document,
    node: &Node,
    offset: u32,
) -> Option<(String, usize)> {
    let block = block_element(node)?;
    let key = block.get_attribute(BLOCK_KEY_ATTRIBUTE)?;
    let range = document.create_range().ok()?;
    range.set_start(&block, 0).ok()?;
    range.set_end(node, offset).ok()?;
    let before = String::from(range.to_string());
    Some((key, before.chars().count()))
}

fn find_block(node: &Node, key: &str) -> Option<Element> {
    if let Some(element) = node.dyn_ref::<Element>() {
        if element.get_attribute(BLOCK_KEY_ATTRIBUTE).as_deref() == Some(key) {
            return Some(element.clone());
        }
    }
    let mut child = node.first_child();
    while let Some(c) = child {
        if let Some(found) = find_block(&c, key) {
            return Some(found);
        }
        child = c.next_sibling();
    }
    None
}

/// The text node and UTF-16 offset at which `*remaining` chars of text
/// have been passed.
fn locate_text_point(node: &Node, remaining: &mut usize) -> Option<(Node, u32)> {
    if node.node_type() == Node::TEXT_NODE {
        let text = node.text_content().unwrap_or_default();
        let len = text.chars().count();
        if *remaining <= len {
            let utf16: usize = text.chars().take(*remaining).map(char::len_utf16).sum();
            return Some((node.clone(), utf16 as u32));
        }
        *remaining -= len;
        return None;
    }
    let mut child = node.first_child();
    while let Some(c) = child {
        if let Some(found) = locate_text_point(&c, remaining) {
            return Some(found);
        }
        child = c.next_sibling();
    }
    None
}

/// Put the browser caret at `offset` chars into block `key`.
pub(crate) fn place_caret(
    surface: &Element,
    key: &str,
    offset: usize,
) -> Result<(), JsValue> {
    let Some(window) = web_sys::window() else {
        return Ok(());
    };
    let Some(block) = find_block(surface, key) else {
        return Ok(());
    };
    let mut remaining = offset;
    let (node, node_offset) =
        locate_text_point(&block, &mut remaining).unwrap_or_else(|| (block.into(), 0));
    if let Some(selection) = window.get_selection()? {
        selection.collapse_with_offset(Some(&node), node_offset)?;
    }
    Ok(())
}
