// Copyright 2025 the Corral Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element storage: insertion, removal, lookup, and repositioning.

use alloc::vec::Vec;
use kurbo::{Point, Rect, Size, Vec2};

use crate::damage::Damage;
use crate::types::{Element, ElementId, ElementKind};

/// All elements of one canvas, stored in a single indexed table.
///
/// Elements are addressed by generational [`ElementId`]s. Removing an element
/// frees its slot; a later insertion may reuse the slot with a bumped
/// generation, so stale ids never alias a new element.
///
/// ## Example
///
/// ```rust
/// use kurbo::Rect;
/// use corral_canvas::{Canvas, Element};
///
/// let mut canvas = Canvas::new();
/// let node = canvas.insert(Element::plain(Rect::new(0.0, 0.0, 50.0, 20.0)));
/// assert_eq!(canvas.bounds(node), Some(Rect::new(0.0, 0.0, 50.0, 20.0)));
///
/// canvas.remove(node);
/// assert!(!canvas.is_alive(node));
/// ```
pub struct Canvas {
    /// slots
    slots: Vec<Option<Slot>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    zoom: f64,
    damage: Damage,
}

impl core::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.slots.len();
        let alive = self.slots.iter().filter(|s| s.is_some()).count();
        f.debug_struct("Canvas")
            .field("slots_total", &total)
            .field("slots_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("zoom", &self.zoom)
            .finish_non_exhaustive()
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    element: Element,
}

impl Canvas {
    /// Create an empty canvas at zoom 1.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            zoom: 1.0,
            damage: Damage::default(),
        }
    }

    /// Insert an element and return its id.
    pub fn insert(&mut self, element: Element) -> ElementId {
        self.damage.dirty_rects.push(element.bounds());
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.slots[idx] = Some(Slot {
                generation,
                element,
            });
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ElementId uses 32-bit indices."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.slots.push(Some(Slot {
                generation,
                element,
            }));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ElementId uses 32-bit indices."
            )]
            ((self.slots.len() - 1) as u32, generation)
        };
        ElementId::new(idx, generation)
    }

    /// Remove an element, returning it if `id` was live.
    ///
    /// Grouping state is not touched here; hosts forward removals to
    /// the grouping engine themselves.
    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        if !self.is_alive(id) {
            return None;
        }
        let slot = self.slots[id.idx()].take()?;
        self.free_list.push(id.idx());
        self.damage.dirty_rects.push(slot.element.bounds());
        Some(slot.element)
    }

    /// Returns true if `id` refers to a live element.
    pub fn is_alive(&self, id: ElementId) -> bool {
        self.slots
            .get(id.idx())
            .and_then(|s| s.as_ref())
            .is_some_and(|s| s.generation == id.1)
    }

    /// Look up a live element.
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        let slot = self.slots.get(id.idx())?.as_ref()?;
        (slot.generation == id.1).then_some(&slot.element)
    }

    /// Canvas-space bounds of a live element.
    pub fn bounds(&self, id: ElementId) -> Option<Rect> {
        self.get(id).map(Element::bounds)
    }

    /// Kind of a live element.
    pub fn kind(&self, id: ElementId) -> Option<ElementKind> {
        self.get(id).map(|e| e.kind)
    }

    /// Move an element so its top-left corner sits at `origin`.
    pub fn set_origin(&mut self, id: ElementId, origin: Point) {
        if let Some(e) = self.element_opt_mut(id)
            && e.origin != origin
        {
            let old = e.bounds();
            e.origin = origin;
            let new = e.bounds();
            self.damage.push_move(old, new);
        }
    }

    /// Resize an element, keeping its origin.
    pub fn set_size(&mut self, id: ElementId, size: Size) {
        if let Some(e) = self.element_opt_mut(id)
            && e.size != size
        {
            let old = e.bounds();
            e.size = size;
            let new = e.bounds();
            self.damage.push_move(old, new);
        }
    }

    /// Replace both origin and size.
    pub fn set_bounds(&mut self, id: ElementId, bounds: Rect) {
        self.set_origin(id, bounds.origin());
        self.set_size(id, bounds.size());
    }

    /// Offset an element by `delta`.
    pub fn translate(&mut self, id: ElementId, delta: Vec2) {
        if let Some(origin) = self.get(id).map(|e| e.origin) {
            self.set_origin(id, origin + delta);
        }
    }

    /// Update the host selection flag.
    pub fn set_selected(&mut self, id: ElementId, selected: bool) {
        if let Some(e) = self.element_opt_mut(id) {
            e.selected = selected;
        }
    }

    /// Returns `true` if `id` is live and selected.
    pub fn is_selected(&self, id: ElementId) -> bool {
        self.get(id).is_some_and(|e| e.selected)
    }

    /// Ids of all selected elements, in id order.
    pub fn selection(&self) -> Vec<ElementId> {
        self.iter()
            .filter(|(_, e)| e.selected)
            .map(|(id, _)| id)
            .collect()
    }

    /// Iterate live elements in id order.
    pub fn iter(&self) -> impl Iterator<Item = (ElementId, &Element)> + '_ {
        self.slots.iter().enumerate().filter_map(|(idx, slot)| {
            let slot = slot.as_ref()?;
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ElementId uses 32-bit indices."
            )]
            let id = ElementId::new(idx as u32, slot.generation);
            Some((id, &slot.element))
        })
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Returns `true` if no element is live.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current view zoom factor (1.0 is unscaled).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Set the view zoom factor. Non-positive or non-finite values are ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() && zoom > 0.0 {
            self.zoom = zoom;
        }
    }

    /// Take the repaint regions accumulated since the last call.
    pub fn take_damage(&mut self) -> Damage {
        core::mem::take(&mut self.damage)
    }

    fn element_opt_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        let slot = self.slots.get_mut(id.idx())?.as_mut()?;
        if slot.generation != id.1 {
            return None;
        }
        Some(&mut slot.element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn liveness_insert_remove_reuse() {
        let mut canvas = Canvas::new();
        let a = canvas.insert(Element::plain(Rect::new(0.0, 0.0, 1.0, 1.0)));
        assert!(canvas.is_alive(a));

        let removed = canvas.remove(a);
        assert!(removed.is_some());
        assert!(!canvas.is_alive(a));
        assert!(canvas.remove(a).is_none(), "second remove is a no-op");

        let b = canvas.insert(Element::plain(Rect::new(0.0, 0.0, 1.0, 1.0)));
        assert!(canvas.is_alive(b));
        assert!(!canvas.is_alive(a));
        if a.0 == b.0 {
            assert!(b.1 > a.1, "generation must increase on reuse");
        }
        assert!(canvas.get(a).is_none(), "stale id must not alias the new element");
    }

    #[test]
    fn iteration_is_in_id_order() {
        let mut canvas = Canvas::new();
        let a = canvas.insert(Element::plain(Rect::new(0.0, 0.0, 1.0, 1.0)));
        let b = canvas.insert(Element::container(Rect::new(0.0, 0.0, 1.0, 1.0)));
        let c = canvas.insert(Element::pass_through(Rect::new(0.0, 0.0, 1.0, 1.0)));
        canvas.remove(b);
        let d = canvas.insert(Element::plain(Rect::new(0.0, 0.0, 1.0, 1.0)));
        let ids: Vec<_> = canvas.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![a, d, c]);
        assert_eq!(canvas.len(), 3);
        assert_eq!(canvas.kind(c), Some(ElementKind::PassThrough));
    }

    #[test]
    fn edits_record_damage() {
        let mut canvas = Canvas::new();
        let a = canvas.insert(Element::plain(Rect::new(0.0, 0.0, 10.0, 10.0)));
        let _ = canvas.take_damage();

        canvas.translate(a, Vec2::new(5.0, 0.0));
        canvas.set_size(a, Size::new(10.0, 10.0));
        let damage = canvas.take_damage();
        assert_eq!(damage.dirty_rects.len(), 2, "unchanged size adds nothing");
        assert_eq!(damage.union_rect(), Some(Rect::new(0.0, 0.0, 15.0, 10.0)));
        assert!(canvas.take_damage().is_empty());
    }

    #[test]
    fn selection_and_zoom() {
        let mut canvas = Canvas::new();
        let a = canvas.insert(Element::plain(Rect::new(0.0, 0.0, 1.0, 1.0)));
        let b = canvas.insert(Element::plain(Rect::new(0.0, 0.0, 1.0, 1.0)));
        canvas.set_selected(b, true);
        assert!(!canvas.is_selected(a));
        assert_eq!(canvas.selection(), vec![b]);

        canvas.set_zoom(0.5);
        canvas.set_zoom(0.0);
        canvas.set_zoom(f64::NAN);
        assert_eq!(canvas.zoom(), 0.5);
    }
}
