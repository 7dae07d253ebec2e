// Copyright 2025 the Corral Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag-resize and group-move handling.
//!
//! A resize drag runs pointer-down, pointer-move and pointer-up through
//! [`corral_event_state::resize::ResizeState`], applying new geometry to the
//! canvas on every move and committing membership on release. Group moves carry
//! a container's members along with it.

use alloc::vec::Vec;
use corral_canvas::{Canvas, ElementId};
use corral_event_state::movement::MoveStep;
use corral_event_state::resize::{
    Anchor, Button, Modifiers, PRIMARY_BUTTON, PointerId, ResizeLimits, ResizeTarget,
};
use hashbrown::HashSet;
use kurbo::{Point, Rect, Vec2};
use tracing::{debug, trace, warn};

use crate::cache::CacheStore;
use crate::config::ResizingMode;
use crate::engine::GroupingEngine;
use crate::error::{ContainmentError, ContainmentResult};
use crate::layout;
use crate::query::{Predicate, QueryFilter, content_rect, query};

/// One pointer event in canvas space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerInput {
    /// Pointer identity; `None` is the default pointer.
    pub pointer: Option<PointerId>,
    /// Button pressed or released.
    pub button: Button,
    /// Modifiers held.
    pub modifiers: Modifiers,
    /// Canvas-space position.
    pub position: Point,
}

impl PointerInput {
    /// Primary button of the default pointer, no modifiers.
    pub fn primary(position: Point) -> Self {
        Self {
            pointer: None,
            button: PRIMARY_BUTTON,
            modifiers: Modifiers::empty(),
            position,
        }
    }

    /// Replace the held modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Replace the button.
    #[must_use]
    pub fn with_button(mut self, button: Button) -> Self {
        self.button = button;
        self
    }

    /// Replace the pointer identity.
    #[must_use]
    pub fn with_pointer(mut self, pointer: PointerId) -> Self {
        self.pointer = Some(pointer);
        self
    }
}

impl<S: CacheStore> GroupingEngine<S> {
    /// Pointer pressed over container `id`.
    ///
    /// Starts a resize drag if the resize chord is held and the pointer is in
    /// an anchor zone. Header containers only expose their left and right
    /// sides.
    pub fn on_pointer_down(
        &mut self,
        canvas: &Canvas,
        id: ElementId,
        input: PointerInput,
    ) -> Option<Anchor> {
        let header = self.containers.get(id)?.is_header();
        let element = canvas.get(id)?;
        let target = ResizeTarget {
            key: id,
            origin: element.origin,
            size: element.size,
            horizontal_only: header,
        };
        let anchor = self.resize.on_down(
            input.pointer,
            Some(input.button),
            input.modifiers,
            target,
            input.position,
            canvas.zoom(),
        )?;
        self.feedback.clear();
        debug!(container = ?id, ?anchor, "resize drag started");
        Some(anchor)
    }

    /// Pointer moved during a drag.
    ///
    /// Applies the dragged geometry, clamped to the minimum size and snapped
    /// to the grid if configured, and returns the new bounds. When an
    /// alternate predicate is configured, [`GroupingEngine::feedback`] lists
    /// what would be captured under it.
    pub fn on_pointer_move(&mut self, canvas: &mut Canvas, input: PointerInput) -> Option<Rect> {
        let id = self.resize.get(input.pointer)?.target;
        let Some((origin, size)) = canvas.get(id).map(|e| (e.origin, e.size)) else {
            self.resize.cancel(input.pointer);
            self.feedback.clear();
            return None;
        };
        let header = self.containers.is_header(id);
        let limits = ResizeLimits {
            min_size: layout::min_size(header, &self.settings),
            snap: self.settings.snap_to_grid,
        };
        let update = self
            .resize
            .on_move(input.pointer, input.position, origin, size, limits)?;
        canvas.set_size(id, update.size);
        canvas.set_origin(id, update.origin);
        let bounds = Rect::from_origin_size(update.origin, update.size);

        if let Some(alt) = self.settings.alt_predicate
            && !header
        {
            let area = content_rect(bounds, self.settings.header_height);
            let filter = QueryFilter::new()
                .container(id)
                .exclude_pass_through(self.settings.exclude_pass_through);
            self.feedback = query(area, self.candidates(canvas), alt, filter);
        }
        trace!(container = ?id, ?bounds, "resize drag moved");
        Some(bounds)
    }

    /// Pointer released.
    ///
    /// Ends the drag if this button started it, then recomputes membership
    /// with the resize predicate, resolves the hierarchy, writes the cache and
    /// fits. Returns the container that was resized.
    pub fn on_pointer_up(&mut self, canvas: &mut Canvas, input: PointerInput) -> Option<ElementId> {
        let drag = self.resize.on_up(input.pointer, Some(input.button))?;
        let id = drag.target;
        self.feedback.clear();
        if !canvas.is_alive(id) || !self.containers.contains(id) {
            return None;
        }

        let exclude = self.settings.exclude_pass_through
            || self.settings.exclude_pass_through_when_resizing;
        if let Err(err) = self.refresh(canvas, id, self.settings.resize_predicate, exclude) {
            warn!(%err, "membership refresh after resize skipped");
        }
        if self.settings.resize_to_fit_on_release
            && self.settings.resizing_mode != ResizingMode::Disabled
        {
            self.resize_to_fit(canvas, id);
        } else {
            // Seed the content snapshot so the next tick does not refit.
            self.snapshot_content(canvas, id);
        }
        debug!(
            container = ?id,
            members = self.containers.members(id).len(),
            "resize drag committed"
        );
        Some(id)
    }

    /// Abandon the drag for a pointer. Geometry already applied stays.
    pub fn cancel_drag(&mut self, pointer: Option<PointerId>) -> bool {
        self.feedback.clear();
        self.resize.cancel(pointer).is_some()
    }

    /// Returns `true` if some pointer is drag-resizing `id`.
    pub fn is_resizing(&self, id: ElementId) -> bool {
        self.resize.is_dragging_target(&id)
    }

    /// Move containers by `delta`, carrying their members along.
    ///
    /// `moving` lists the registered containers the host is dragging; the
    /// engine translates them itself. The host moves every other selected
    /// element. Members are moved once per call even if several moving
    /// containers share them; selected members are left to the host. Holding
    /// Alt and Ctrl moves the containers alone. On the first delta of a
    /// gesture membership is refreshed first if configured.
    ///
    /// Returns the members the engine moved.
    pub fn on_move_delta(
        &mut self,
        canvas: &mut Canvas,
        moving: &[ElementId],
        delta: Vec2,
        modifiers: Modifiers,
    ) -> ContainmentResult<Vec<ElementId>> {
        for &id in moving {
            if !canvas.is_alive(id) {
                return Err(ContainmentError::StaleElement(id));
            }
            if !self.containers.contains(id) {
                return Err(ContainmentError::NotAContainer(id));
            }
        }

        let detached = modifiers.contains(Modifiers::ALT | Modifiers::CTRL);
        let mut seen: HashSet<ElementId> = moving.iter().copied().collect();
        let mut moved = Vec::new();
        for &id in moving {
            let exclude = self.settings.exclude_pass_through;
            if self.moves.on_delta(id, delta) == MoveStep::First
                && self.settings.refresh_on_move
                && let Err(err) = self.refresh(canvas, id, Predicate::FullyContained, exclude)
            {
                warn!(%err, "membership refresh before move skipped");
            }
            canvas.translate(id, delta);

            let group = self
                .containers
                .get(id)
                .is_some_and(|s| s.group_movement && !s.is_header());
            if detached || !group {
                continue;
            }
            let mut work: Vec<ElementId> =
                self.containers.members(id).iter().rev().copied().collect();
            while let Some(m) = work.pop() {
                if !seen.insert(m) || canvas.is_selected(m) || !canvas.is_alive(m) {
                    continue;
                }
                canvas.translate(m, delta);
                moved.push(m);
                if let Some(nested) = self.containers.get(m)
                    && nested.group_movement
                {
                    work.extend(nested.members().iter().rev().copied());
                }
            }
        }
        trace!(containers = moving.len(), members = moved.len(), "group moved");
        Ok(moved)
    }

    /// Close the move gestures of `moving`, e.g. on drag release.
    pub fn end_move(&mut self, moving: &[ElementId]) {
        for id in moving {
            self.moves.end(id);
        }
    }

    /// Returns `true` if `id` is mid-move.
    pub fn is_moving(&self, id: ElementId) -> bool {
        self.moves.is_moving(&id)
    }
}
