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

//! Selection management.

use crate::{BlockKey, ContentState};

/// The cursor or highlighted range, as (block key, char offset) pairs.
///
/// The anchor is where the selection started, the focus where it ends.
/// `is_backward` is set when the focus precedes the anchor in document
/// order, so that `start_*`/`end_*` can be derived without the content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionState {
    pub anchor_key: BlockKey,
    pub anchor_offset: usize,
    pub focus_key: BlockKey,
    pub focus_offset: usize,
    pub is_backward: bool,
    pub has_focus: bool,
}

impl SelectionState {
    /// A collapsed cursor.
    pub fn collapsed(key: BlockKey, offset: usize) -> Self {
        Self {
            anchor_key: key.clone(),
            anchor_offset: offset,
            focus_key: key,
            focus_offset: offset,
            is_backward: false,
            has_focus: false,
        }
    }

    /// A range selection. Direction is computed from the block order of
    /// `content`.
    pub fn range(
        content: &ContentState,
        anchor: (BlockKey, usize),
        focus: (BlockKey, usize),
    ) -> Self {
        let anchor_index = content.block_index(&anchor.0);
        let focus_index = content.block_index(&focus.0);
        let is_backward = match (anchor_index, focus_index) {
            (Some(a), Some(f)) if a != f => f < a,
            _ => focus.0 == anchor.0 && focus.1 < anchor.1,
        };
        Self {
            anchor_key: anchor.0,
            anchor_offset: anchor.1,
            focus_key: focus.0,
            focus_offset: focus.1,
            is_backward,
            has_focus: false,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor_key == self.focus_key
            && self.anchor_offset == self.focus_offset
    }

    pub fn start_key(&self) -> &BlockKey {
        if self.is_backward {
            &self.focus_key
        } else {
            &self.anchor_key
        }
    }

    pub fn start_offset(&self) -> usize {
        if self.is_backward {
            self.focus_offset
        } else {
            self.anchor_offset
        }
    }

    pub fn end_key(&self) -> &BlockKey {
        if self.is_backward {
            &self.anchor_key
        } else {
            &self.focus_key
        }
    }

    pub fn end_offset(&self) -> usize {
        if self.is_backward {
            self.anchor_offset
        } else {
            self.focus_offset
        }
    }

    pub fn with_anchor_offset(&self, offset: usize) -> Self {
        let mut next = Self {
            anchor_offset: offset,
            ..self.clone()
        };
        next.recompute_direction();
        next
    }

    pub fn with_focus_offset(&self, offset: usize) -> Self {
        let mut next = Self {
            focus_offset: offset,
            ..self.clone()
        };
        next.recompute_direction();
        next
    }

    pub fn with_has_focus(&self, has_focus: bool) -> Self {
        Self {
            has_focus,
            ..self.clone()
        }
    }

    /// A collapsed selection at the start of this one.
    pub fn collapse_to_start(&self) -> Self {
        Self {
            has_focus: self.has_focus,
            ..Self::collapsed(self.start_key().clone(), self.start_offset())
        }
    }

    // Only meaningful within one block; across blocks the stored
    // direction is kept.
    fn recompute_direction(&mut self) {
        if self.anchor_key == self.focus_key {
            self.is_backward = self.focus_offset < self.anchor_offset;
        }
    }
}
