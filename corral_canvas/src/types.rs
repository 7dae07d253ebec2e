// Copyright 2025 the Corral Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the canvas: element identifiers, kinds, and element geometry.

use kurbo::{Point, Rect, Size};

/// Identifier for an element on the canvas (generational).
///
/// Ordering is by slot, then generation. Everything that walks several
/// elements in Corral uses this order, so results never depend on hash order.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementId(pub(crate) u32, pub(crate) u32);

impl ElementId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    /// Rebuild an identifier from its raw parts, e.g. when a host restores ids
    /// from its own document format.
    pub const fn from_raw(slot: u32, generation: u32) -> Self {
        Self(slot, generation)
    }

    /// Slot index of this identifier.
    pub const fn slot(self) -> u32 {
        self.0
    }

    /// Generation of this identifier. Bumped each time a slot is reused.
    pub const fn generation(self) -> u32 {
        self.1
    }
}

/// What an element is, as far as grouping is concerned.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElementKind {
    /// An ordinary node.
    #[default]
    Plain,
    /// A grouping region that tracks the elements it encloses.
    Container,
    /// A routing point (reroute knot and similar) that only forwards connections.
    PassThrough,
}

/// A positioned, sized element.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    /// Top-left corner in canvas space.
    pub origin: Point,
    /// Extent in canvas units.
    pub size: Size,
    /// Element kind.
    pub kind: ElementKind,
    /// Whether the host currently has this element selected.
    pub selected: bool,
}

impl Element {
    /// Create an unselected element covering `rect`.
    pub fn new(kind: ElementKind, rect: Rect) -> Self {
        Self {
            origin: rect.origin(),
            size: rect.size(),
            kind,
            selected: false,
        }
    }

    /// Shorthand for a plain element.
    pub fn plain(rect: Rect) -> Self {
        Self::new(ElementKind::Plain, rect)
    }

    /// Shorthand for a container element.
    pub fn container(rect: Rect) -> Self {
        Self::new(ElementKind::Container, rect)
    }

    /// Shorthand for a pass-through element.
    pub fn pass_through(rect: Rect) -> Self {
        Self::new(ElementKind::PassThrough, rect)
    }

    /// Canvas-space bounds.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.size)
    }
}
