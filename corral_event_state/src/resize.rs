// Copyright 2025 the Corral Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag-to-resize state for rectangular regions.
//!
//! A resize starts when the configured [`ResizeChord`] is held on pointer-down
//! and the pointer lies inside one of eight anchor zones along the region's
//! border. While the drag is active every pointer-move produces a new origin
//! and size for the region; pointer-up on the same button ends the drag.
//!
//! ## Usage
//!
//! ```
//! use corral_event_state::resize::{Anchor, Modifiers, ResizeLimits, ResizeState, ResizeTarget};
//! use kurbo::{Point, Size};
//!
//! let mut state: ResizeState<u32> = ResizeState::new();
//! let target = ResizeTarget {
//!     key: 7,
//!     origin: Point::new(100.0, 100.0),
//!     size: Size::new(300.0, 200.0),
//!     horizontal_only: false,
//! };
//!
//! // Shift + primary button near the bottom-right corner.
//! let grab = Point::new(395.0, 295.0);
//! let anchor = state.on_down(None, None, Modifiers::SHIFT, target, grab, 1.0);
//! assert_eq!(anchor, Some(Anchor::BottomRight));
//!
//! // Drag the corner outwards.
//! let limits = ResizeLimits { min_size: Size::new(125.0, 80.0), snap: None };
//! let origin = Point::new(100.0, 100.0);
//! let size = Size::new(300.0, 200.0);
//! let update = state
//!     .on_move(None, Point::new(450.0, 350.0), origin, size, limits)
//!     .unwrap();
//! assert_eq!(update.size, Size::new(355.0, 255.0));
//! assert_eq!(update.origin, Point::new(100.0, 100.0));
//!
//! let finished = state.on_up(None, None).unwrap();
//! assert_eq!(finished.target, 7);
//! ```
//!
//! ## Edge conventions
//!
//! Anchors on the right or bottom edge set the size directly from the pointer
//! position. Anchors on the left or top edge change the size by the pointer's
//! offset from that edge and shift the origin by the same amount, so the
//! opposite edge stays put. Minimum size applies first, then grid snapping.

use alloc::collections::BTreeMap;
use core::num::NonZeroU64;
use kurbo::{Point, Rect, Size, Vec2};

/// Pointer identifier for tracking concurrent drags.
pub type PointerId = NonZeroU64;

/// Mouse button identifier. `1` is the primary button.
pub type Button = u8;

/// The primary (usually left) mouse button.
pub const PRIMARY_BUTTON: Button = 1;

/// Distance the dragged edge is kept from the pointer.
pub const EDGE_PADDING: f64 = 5.0;

const DEFAULT_POINTER: PointerId = NonZeroU64::MIN;

bitflags::bitflags! {
    /// Keyboard modifiers held during a pointer event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Modifiers: u8 {
        /// Shift key.
        const SHIFT = 0b0000_0001;
        /// Control key.
        const CTRL  = 0b0000_0010;
        /// Alt / Option key.
        const ALT   = 0b0000_0100;
        /// Meta / Command / Windows key.
        const META  = 0b0000_1000;
    }
}

/// Button plus modifiers that arm a resize on pointer-down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResizeChord {
    /// Button that must be pressed.
    pub button: Button,
    /// Modifiers that must all be held. Extra modifiers are allowed.
    pub modifiers: Modifiers,
}

impl Default for ResizeChord {
    fn default() -> Self {
        Self {
            button: PRIMARY_BUTTON,
            modifiers: Modifiers::SHIFT,
        }
    }
}

impl ResizeChord {
    /// Returns `true` if `button` with `held` modifiers satisfies this chord.
    pub fn matches(&self, button: Button, held: Modifiers) -> bool {
        button == self.button && held.contains(self.modifiers)
    }
}

/// One of the eight resize hit zones on a region's border.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// Top-left corner.
    TopLeft,
    /// Top edge.
    Top,
    /// Top-right corner.
    TopRight,
    /// Left edge.
    Left,
    /// Right edge.
    Right,
    /// Bottom-left corner.
    BottomLeft,
    /// Bottom edge.
    Bottom,
    /// Bottom-right corner.
    BottomRight,
}

impl Anchor {
    /// Returns `true` if dragging this anchor moves the left edge.
    pub fn moves_left(self) -> bool {
        matches!(self, Self::TopLeft | Self::Left | Self::BottomLeft)
    }

    /// Returns `true` if dragging this anchor moves the right edge.
    pub fn moves_right(self) -> bool {
        matches!(self, Self::TopRight | Self::Right | Self::BottomRight)
    }

    /// Returns `true` if dragging this anchor moves the top edge.
    pub fn moves_top(self) -> bool {
        matches!(self, Self::TopLeft | Self::Top | Self::TopRight)
    }

    /// Returns `true` if dragging this anchor moves the bottom edge.
    pub fn moves_bottom(self) -> bool {
        matches!(self, Self::BottomLeft | Self::Bottom | Self::BottomRight)
    }
}

/// Extents of the anchor hit zones at zoom 1.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnchorZones {
    /// Square corner zone size.
    pub corner: f64,
    /// Depth of the edge zones.
    pub side: f64,
}

impl Default for AnchorZones {
    fn default() -> Self {
        Self {
            corner: 40.0,
            side: 20.0,
        }
    }
}

impl AnchorZones {
    /// Zone scale for a view zoom: `1 / zoom` clamped to `[1, 4]`.
    ///
    /// Zooming out grows the zones (in canvas units) so they stay hit-testable
    /// on screen; zooming in never shrinks them below their configured size.
    pub fn scale_for_zoom(zoom: f64) -> f64 {
        if zoom > 0.0 {
            (1.0 / zoom).clamp(1.0, 4.0)
        } else {
            4.0
        }
    }

    /// Find the anchor under `local`, a point relative to the region's origin.
    ///
    /// Corners are checked before edges. With `horizontal_only` only the left
    /// and right edges are live (header regions have a fixed height).
    pub fn anchor_at(
        &self,
        local: Point,
        size: Size,
        zoom: f64,
        horizontal_only: bool,
    ) -> Option<Anchor> {
        let (w, h) = (size.width, size.height);
        if local.x < 0.0 || local.y < 0.0 || local.x > w || local.y > h {
            return None;
        }
        let scale = Self::scale_for_zoom(zoom);
        let corner = self.corner * scale;
        let side = self.side * scale;
        let (x, y) = (local.x, local.y);

        if !horizontal_only {
            if x > w - corner && y > h - corner {
                return Some(Anchor::BottomRight);
            }
            if x < corner && y < corner {
                return Some(Anchor::TopLeft);
            }
            if x < corner && y > h - corner {
                return Some(Anchor::BottomLeft);
            }
            if x > w - corner && y < corner {
                return Some(Anchor::TopRight);
            }
            if y < side {
                return Some(Anchor::Top);
            }
            if y > h - side {
                return Some(Anchor::Bottom);
            }
        }
        if x < side {
            return Some(Anchor::Left);
        }
        if x > w - side {
            return Some(Anchor::Right);
        }
        None
    }
}

/// Constraints applied on every drag update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizeLimits {
    /// Smallest permitted size.
    pub min_size: Size,
    /// Grid unit to snap the size to, if any.
    pub snap: Option<f64>,
}

/// Snap both dimensions of `size` to the nearest multiple of `unit`.
///
/// Non-positive units leave `size` unchanged.
pub fn snap_size(size: Size, unit: f64) -> Size {
    if unit > 0.0 {
        (size / unit).round() * unit
    } else {
        size
    }
}

/// Compute the rectangle produced by dragging `anchor` to `local`.
///
/// `local` is relative to `origin`. Returns `None` if the size would not change.
pub fn drag_anchor(
    anchor: Anchor,
    local: Point,
    origin: Point,
    size: Size,
    limits: ResizeLimits,
) -> Option<Rect> {
    let local = local.round();
    let mut next = size;
    if anchor.moves_left() {
        next.width -= local.x - EDGE_PADDING;
    }
    if anchor.moves_right() {
        next.width = local.x + EDGE_PADDING;
    }
    if anchor.moves_top() {
        next.height -= local.y - EDGE_PADDING;
    }
    if anchor.moves_bottom() {
        next.height = local.y + EDGE_PADDING;
    }

    next = Size::new(
        next.width.max(limits.min_size.width),
        next.height.max(limits.min_size.height),
    );
    if let Some(unit) = limits.snap {
        next = snap_size(next, unit);
    }
    if next == size {
        return None;
    }

    let delta = Vec2::new(next.width - size.width, next.height - size.height);
    let mut new_origin = origin;
    if anchor.moves_left() {
        new_origin.x -= delta.x;
    }
    if anchor.moves_top() {
        new_origin.y -= delta.y;
    }
    Some(Rect::from_origin_size(new_origin, next))
}

/// A region as seen at pointer-down.
#[derive(Clone, Debug, PartialEq)]
pub struct ResizeTarget<K> {
    /// Caller's key for the region.
    pub key: K,
    /// Canvas-space origin.
    pub origin: Point,
    /// Current size.
    pub size: Size,
    /// Only left/right anchors are live.
    pub horizontal_only: bool,
}

/// An active resize drag.
#[derive(Clone, Debug, PartialEq)]
pub struct ResizeDrag<K> {
    /// Region being resized.
    pub target: K,
    /// Anchor grabbed at pointer-down.
    pub anchor: Anchor,
    /// Button that started the drag.
    pub button: Button,
    /// Origin at pointer-down.
    pub start_origin: Point,
    /// Size at pointer-down.
    pub start_size: Size,
}

/// New geometry produced by a drag update.
#[derive(Clone, Debug, PartialEq)]
pub struct ResizeUpdate<K> {
    /// Region being resized.
    pub target: K,
    /// New canvas-space origin.
    pub origin: Point,
    /// New size.
    pub size: Size,
}

/// Resize drag state machine, one drag per pointer.
#[derive(Clone, Debug)]
pub struct ResizeState<K> {
    drags: BTreeMap<PointerId, ResizeDrag<K>>,
    /// Chord that arms a drag.
    pub chord: ResizeChord,
    /// Anchor zone extents.
    pub zones: AnchorZones,
}

impl<K: Clone + PartialEq> ResizeState<K> {
    /// Create a state with the default chord (primary button + Shift) and zones.
    pub fn new() -> Self {
        Self::with_config(ResizeChord::default(), AnchorZones::default())
    }

    /// Create a state with a custom chord and zones.
    pub fn with_config(chord: ResizeChord, zones: AnchorZones) -> Self {
        Self {
            drags: BTreeMap::new(),
            chord,
            zones,
        }
    }

    /// Handle pointer-down at canvas-space `position`.
    ///
    /// Starts a drag and returns its anchor if the chord is held and the
    /// pointer is inside an anchor zone of `target`. Pointer defaults to 1 and
    /// button to [`PRIMARY_BUTTON`].
    pub fn on_down(
        &mut self,
        pointer_id: Option<PointerId>,
        button: Option<Button>,
        modifiers: Modifiers,
        target: ResizeTarget<K>,
        position: Point,
        zoom: f64,
    ) -> Option<Anchor> {
        let pointer_id = pointer_id.unwrap_or(DEFAULT_POINTER);
        let button = button.unwrap_or(PRIMARY_BUTTON);
        if !self.chord.matches(button, modifiers) {
            return None;
        }
        let local = (position - target.origin).to_point();
        let anchor = self
            .zones
            .anchor_at(local, target.size, zoom, target.horizontal_only)?;
        self.drags.insert(
            pointer_id,
            ResizeDrag {
                target: target.key,
                anchor,
                button,
                start_origin: target.origin,
                start_size: target.size,
            },
        );
        Some(anchor)
    }

    /// Handle pointer-move at canvas-space `position` given the region's
    /// current `origin` and `size`.
    ///
    /// Returns the new geometry if the drag changes the size.
    pub fn on_move(
        &mut self,
        pointer_id: Option<PointerId>,
        position: Point,
        origin: Point,
        size: Size,
        limits: ResizeLimits,
    ) -> Option<ResizeUpdate<K>> {
        let pointer_id = pointer_id.unwrap_or(DEFAULT_POINTER);
        let drag = self.drags.get(&pointer_id)?;
        let local = (position - origin).to_point();
        let rect = drag_anchor(drag.anchor, local, origin, size, limits)?;
        Some(ResizeUpdate {
            target: drag.target.clone(),
            origin: rect.origin(),
            size: rect.size(),
        })
    }

    /// Handle pointer-up. Ends and returns the drag if `button` started it.
    ///
    /// Releasing a different button leaves the drag active.
    pub fn on_up(
        &mut self,
        pointer_id: Option<PointerId>,
        button: Option<Button>,
    ) -> Option<ResizeDrag<K>> {
        let pointer_id = pointer_id.unwrap_or(DEFAULT_POINTER);
        let button = button.unwrap_or(PRIMARY_BUTTON);
        if self.drags.get(&pointer_id)?.button != button {
            return None;
        }
        self.drags.remove(&pointer_id)
    }

    /// Abandon the drag for a pointer without committing. Geometry already
    /// applied stays as it is.
    pub fn cancel(&mut self, pointer_id: Option<PointerId>) -> Option<ResizeDrag<K>> {
        let pointer_id = pointer_id.unwrap_or(DEFAULT_POINTER);
        self.drags.remove(&pointer_id)
    }

    /// Abandon every drag on `target`, e.g. when it is deleted.
    pub fn cancel_target(&mut self, target: &K) -> bool {
        let before = self.drags.len();
        self.drags.retain(|_, d| d.target != *target);
        before != self.drags.len()
    }

    /// Returns `true` if the pointer has an active drag.
    pub fn is_dragging(&self, pointer_id: Option<PointerId>) -> bool {
        self.drags
            .contains_key(&pointer_id.unwrap_or(DEFAULT_POINTER))
    }

    /// Returns `true` if any pointer is dragging `target`.
    pub fn is_dragging_target(&self, target: &K) -> bool {
        self.drags.values().any(|d| d.target == *target)
    }

    /// The active drag for a pointer.
    pub fn get(&self, pointer_id: Option<PointerId>) -> Option<&ResizeDrag<K>> {
        self.drags.get(&pointer_id.unwrap_or(DEFAULT_POINTER))
    }

    /// Drop every active drag.
    pub fn clear(&mut self) {
        self.drags.clear();
    }
}

impl<K: Clone + PartialEq> Default for ResizeState<K> {
    fn default() -> Self {
        Self::new()
    }
}
