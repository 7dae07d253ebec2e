// Copyright 2025 the Corral Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Corral Canvas: the element table that grouping regions are computed over.
//!
//! A node-graph canvas holds positioned, sized, rectangular elements. Some of
//! them are containers (grouping regions) that enclose others, some are
//! pass-through routing points, and the rest are plain nodes. This crate is
//! the storage side of that picture:
//!
//! - [`Canvas`]: one indexed table of [`Element`]s with generational
//!   [`ElementId`]s. No element holds a pointer to another or to the canvas;
//!   everything goes through ids.
//! - [`ElementKind`]: the tagged kind of an element.
//! - [`geometry`]: edge-inclusive overlap/containment tests, union, and
//!   epsilon comparison over [`kurbo::Rect`].
//! - [`Damage`]: repaint rectangles gathered from moves and resizes.
//!
//! Membership, hierarchy and auto-fit live in `corral_containment`, which
//! reads and repositions elements here but never creates or destroys them.
//!
//! ```rust
//! use kurbo::{Rect, Vec2};
//! use corral_canvas::{Canvas, Element, geometry};
//!
//! let mut canvas = Canvas::new();
//! let group = canvas.insert(Element::container(Rect::new(0.0, 0.0, 200.0, 150.0)));
//! let node = canvas.insert(Element::plain(Rect::new(10.0, 10.0, 60.0, 60.0)));
//!
//! let outer = canvas.bounds(group).unwrap();
//! assert!(geometry::contains_rect(outer, canvas.bounds(node).unwrap()));
//!
//! canvas.translate(node, Vec2::new(180.0, 0.0));
//! assert!(!geometry::contains_rect(outer, canvas.bounds(node).unwrap()));
//! assert!(geometry::overlaps(outer, canvas.bounds(node).unwrap()));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod canvas;
mod damage;
pub mod geometry;
mod types;

pub use canvas::Canvas;
pub use damage::Damage;
pub use types::{Element, ElementId, ElementKind};

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn element_id_serializes_as_pair() {
        let id = ElementId::from_raw(3, 7);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "[3,7]");
        let back: ElementId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
