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

//! HTML view of a [`ContentState`] for the editable surface.
//!
//! Every block becomes one element carrying its key in
//! `data-block-key`, so the host can map DOM positions back to blocks:
//! - `unstyled`            → `<div>`
//! - `header-one`…`six`    → `<h1>`…`<h6>`
//! - `*-list-item`         → `<li>`, consecutive items share a `<ul>`/`<ol>`
//! - `blockquote`          → `<blockquote>`
//! - `code-block`          → `<pre>`
//! - `atomic`              → `<figure>`
//!
//! Inline styles become a `style` attribute on a `<span>` per run.

use crate::{BlockType, ContentBlock, ContentState, InlineStyle, StyleSet};

fn block_tag(block_type: BlockType) -> &'static str {
    match block_type {
        BlockType::Unstyled => "div",
        BlockType::HeaderOne => "h1",
        BlockType::HeaderTwo => "h2",
        BlockType::HeaderThree => "h3",
        BlockType::HeaderFour => "h4",
        BlockType::HeaderFive => "h5",
        BlockType::HeaderSix => "h6",
        BlockType::UnorderedListItem | BlockType::OrderedListItem => "li",
        BlockType::Blockquote => "blockquote",
        BlockType::CodeBlock => "pre",
        BlockType::Atomic => "figure",
    }
}

fn list_tag(block_type: BlockType) -> Option<&'static str> {
    match block_type {
        BlockType::UnorderedListItem => Some("ul"),
        BlockType::OrderedListItem => Some("ol"),
        _ => None,
    }
}

/// CSS declarations for a set of inline styles. Underline and
/// strikethrough share one `text-decoration`.
pub fn inline_style_css(style: &StyleSet) -> String {
    let mut declarations = Vec::new();
    let mut decorations = Vec::new();
    for s in style {
        match s {
            InlineStyle::Bold => declarations.push("font-weight: bold"),
            InlineStyle::Italic => declarations.push("font-style: italic"),
            InlineStyle::Code => declarations.push("font-family: monospace"),
            InlineStyle::Red => declarations.push("color: red"),
            InlineStyle::Underline => decorations.push("underline"),
            InlineStyle::Strikethrough => decorations.push("line-through"),
        }
    }
    let mut css = declarations.join("; ");
    if !decorations.is_empty() {
        if !css.is_empty() {
            css.push_str("; ");
        }
        css.push_str("text-decoration: ");
        css.push_str(&decorations.join(" "));
    }
    css
}

pub fn content_to_html(content: &ContentState) -> String {
    let mut html = String::new();
    let mut open_list: Option<&'static str> = None;

    for block in content.blocks() {
        let list = list_tag(block.block_type());
        if open_list != list {
            if let Some(tag) = open_list {
                html.push_str(&format!("</{tag}>"));
            }
            if let Some(tag) = list {
                html.push_str(&format!("<{tag}>"));
            }
            open_list = list;
        }
        block_to_html(&mut html, block);
    }
    if let Some(tag) = open_list {
        html.push_str(&format!("</{tag}>"));
    }
    html
}

fn block_to_html(html: &mut String, block: &ContentBlock) {
    let tag = block_tag(block.block_type());
    html.push_str(&format!(
        "<{tag} data-block-key=\"{}\">",
        html_escape::encode_double_quoted_attribute(block.key().as_str())
    ));
    if block.is_empty() {
        html.push_str("<br>");
    }
    for run in block.runs() {
        let text = html_escape::encode_text(&run.text);
        if run.style.is_empty() {
            html.push_str(&format!("<span>{text}</span>"));
        } else {
            html.push_str(&format!(
                "<span style=\"{}\">{text}</span>",
                inline_style_css(&run.style)
            ));
        }
    }
    html.push_str(&format!("</{tag}>"));
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::modifier;
    use crate::{BlockKey, SelectionState};

    fn block(key: &str, block_type: BlockType, text: &str) -> ContentBlock {
        ContentBlock::new(BlockKey::from(key), block_type, text, &StyleSet::new())
    }

    #[test]
    fn every_block_type_has_an_element() {
        for block_type in BlockType::iter() {
            let html = content_to_html(&ContentState::from_blocks(vec![block(
                "k", block_type, "x",
            )]));
            let tag = block_tag(block_type);
            assert!(html.contains(&format!("<{tag} data-block-key=\"k\">")), "{html}");
        }
    }

    #[test]
    fn plain_paragraphs() {
        let html = content_to_html(&ContentState::from_text("a\n"));
        assert_eq!(
            html,
            "<div data-block-key=\"0\"><span>a</span></div>\
             <div data-block-key=\"1\"><br></div>"
        );
    }

    #[test]
    fn consecutive_list_items_share_a_list() {
        let content = ContentState::from_blocks(vec![
            block("a", BlockType::UnorderedListItem, "one"),
            block("b", BlockType::UnorderedListItem, "two"),
            block("c", BlockType::OrderedListItem, "three"),
            block("d", BlockType::Unstyled, "end"),
        ]);
        let html = content_to_html(&content);
        assert_eq!(html.matches("<ul>").count(), 1);
        assert_eq!(html.matches("<ol>").count(), 1);
        assert!(html.contains("two</span></li></ul><ol><li"));
        assert!(html.contains("three</span></li></ol><div"));
    }

    #[test]
    fn text_is_escaped() {
        let html = content_to_html(&ContentState::from_text("<b>&"));
        assert!(html.contains("<span>&lt;b&gt;&amp;</span>"), "{html}");
    }

    #[test]
    fn styled_runs_get_css() {
        let content = ContentState::from_text("abc");
        let key = content.first_block().key().clone();
        let content = modifier::apply_inline_style(
            &content,
            &SelectionState::range(&content, (key.clone(), 1), (key, 2)),
            InlineStyle::Red,
        );
        assert_eq!(
            content_to_html(&content),
            "<div data-block-key=\"0\"><span>a</span>\
             <span style=\"color: red\">b</span><span>c</span></div>"
        );
    }

    #[test]
    fn decorations_combine() {
        let style = StyleSet::from([
            InlineStyle::Bold,
            InlineStyle::Underline,
            InlineStyle::Strikethrough,
        ]);
        assert_eq!(
            inline_style_css(&style),
            "font-weight: bold; text-decoration: underline line-through"
        );
        assert_eq!(inline_style_css(&StyleSet::new()), "");
    }
}
