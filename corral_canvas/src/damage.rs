// Copyright 2025 the Corral Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Repaint regions accumulated by canvas edits.

use alloc::vec::Vec;
use kurbo::Rect;

/// Rectangles touched since the last [`crate::Canvas::take_damage`].
#[derive(Clone, Debug, Default)]
pub struct Damage {
    /// Canvas-space rectangles that should be repainted.
    pub dirty_rects: Vec<Rect>,
}

impl Damage {
    /// Returns the union of all damage rects.
    pub fn union_rect(&self) -> Option<Rect> {
        crate::geometry::union_all(self.dirty_rects.iter().copied())
    }

    /// Returns `true` if nothing was touched.
    pub fn is_empty(&self) -> bool {
        self.dirty_rects.is_empty()
    }

    pub(crate) fn push_move(&mut self, old: Rect, new: Rect) {
        if old == new {
            return;
        }
        self.dirty_rects.push(old);
        self.dirty_rects.push(new);
    }
}
