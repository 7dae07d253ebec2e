// Copyright 2025 the Corral Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host-facing grouping engine.

use alloc::vec::Vec;
use corral_canvas::{Canvas, ElementId, ElementKind, geometry};
use corral_event_state::movement::MoveState;
use corral_event_state::resize::ResizeState;
use hashbrown::{HashMap, HashSet};
use kurbo::{Point, Rect, Size};
use tracing::{debug, trace, warn};

use crate::cache::{CacheStore, MembershipCache, MemoryStore};
use crate::config::{ResizingMode, Settings};
use crate::error::{ContainmentError, ContainmentResult};
use crate::hierarchy::{ContainerState, Containers, Parents};
use crate::layout;
use crate::query::{Candidate, MemberKind, Predicate, QueryFilter, content_rect, query};
use crate::schedule::{Deferred, Scheduler};

/// Sort layer of top-level content containers. Nested containers sort one
/// step higher per nesting level; plain elements, headers and selected
/// containers sort at 0.
pub const CONTAINER_SORT_BASE: i32 = -1000;

/// Per-container choices made at registration.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ContainerOptions {
    /// Register as a header container. Ignored when the cache has an entry.
    pub header: bool,
    /// Predicate for the container's own refreshes; defaults to
    /// [`Settings::default_predicate`].
    pub predicate: Option<Predicate>,
    /// Override [`Settings::group_movement`] for this container.
    pub group_movement: Option<bool>,
}

/// What [`GroupingEngine::register_container`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Registration {
    /// Membership came from the cache; no spatial query was run.
    pub restored: bool,
    /// This is the first time this container was ever initialized. Hosts gate
    /// one-time behavior (such as assigning a starting style) on it.
    pub first_initialization: bool,
}

/// Summary of one [`GroupingEngine::tick`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Containers whose membership changed this tick.
    pub refreshed: Vec<ElementId>,
    /// Containers whose bounds changed this tick.
    pub resized: Vec<ElementId>,
    /// Container nesting changed since the last tick; hosts should re-sort.
    pub hierarchy_changed: bool,
    /// Dangling member ids dropped this tick.
    pub dropped_members: usize,
}

/// Grouping state for one canvas.
///
/// The engine owns the container registry, the membership cache, the frame
/// scheduler and the interaction state. The host owns the [`Canvas`] and hands
/// it in on each call. All work is synchronous; each container's pipeline
/// (query, hierarchy resolve, cache write, fit) completes before the next
/// container's starts.
///
/// ## Example
///
/// ```rust
/// use kurbo::Rect;
/// use corral_canvas::{Canvas, Element};
/// use corral_containment::{ContainerOptions, GroupingEngine, Settings};
///
/// let mut canvas = Canvas::new();
/// let group = canvas.insert(Element::container(Rect::new(0.0, 0.0, 300.0, 200.0)));
/// let node = canvas.insert(Element::plain(Rect::new(40.0, 60.0, 120.0, 100.0)));
///
/// let mut engine = GroupingEngine::new(Settings::default());
/// engine.register_container(&canvas, group, ContainerOptions::default()).unwrap();
/// engine.compute_membership(&canvas, group).unwrap();
/// assert_eq!(engine.members(group), &[node]);
///
/// engine.resize_to_fit(&mut canvas, group);
/// // 30 units of padding around the node, plus a 32-unit header bar.
/// assert_eq!(canvas.bounds(group), Some(Rect::new(10.0, -2.0, 150.0, 130.0)));
/// ```
pub struct GroupingEngine<S: CacheStore = MemoryStore> {
    pub(crate) settings: Settings,
    pub(crate) containers: Containers,
    pub(crate) cache: MembershipCache<S>,
    pub(crate) scheduler: Scheduler<Deferred>,
    pub(crate) resize: ResizeState<ElementId>,
    pub(crate) moves: MoveState<ElementId>,
    snapshots: HashMap<ElementId, Vec<(ElementId, Rect)>>,
    pub(crate) feedback: Vec<ElementId>,
    hierarchy_dirty: bool,
}

impl<S: CacheStore> core::fmt::Debug for GroupingEngine<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GroupingEngine")
            .field("settings", &self.settings)
            .field("containers", &self.containers.len())
            .field("scheduled", &self.scheduler.len())
            .field("feedback", &self.feedback.len())
            .finish_non_exhaustive()
    }
}

impl GroupingEngine {
    /// Create an engine backed by an in-memory cache.
    pub fn new(settings: Settings) -> Self {
        Self::with_store(settings, MemoryStore::new())
    }
}

impl Default for GroupingEngine {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl<S: CacheStore> GroupingEngine<S> {
    /// Create an engine over a host-provided cache store.
    pub fn with_store(settings: Settings, store: S) -> Self {
        let resize = ResizeState::with_config(settings.resize_chord, settings.anchor_zones);
        Self {
            settings,
            containers: Containers::new(),
            cache: MembershipCache::new(store),
            scheduler: Scheduler::new(),
            resize,
            moves: MoveState::new(),
            snapshots: HashMap::new(),
            feedback: Vec::new(),
            hierarchy_dirty: false,
        }
    }

    /// Current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the settings. Drags in flight keep their anchors.
    pub fn set_settings(&mut self, settings: Settings) {
        self.resize.chord = settings.resize_chord;
        self.resize.zones = settings.anchor_zones;
        self.settings = settings;
    }

    /// The container registry.
    pub fn containers(&self) -> &Containers {
        &self.containers
    }

    /// Recorded members of a container.
    pub fn members(&self, id: ElementId) -> &[ElementId] {
        self.containers.members(id)
    }

    /// The membership cache.
    pub fn cache(&self) -> &MembershipCache<S> {
        &self.cache
    }

    /// The membership cache, mutably.
    pub fn cache_mut(&mut self) -> &mut MembershipCache<S> {
        &mut self.cache
    }

    /// Deferred work waiting for a future tick.
    pub fn scheduler(&self) -> &Scheduler<Deferred> {
        &self.scheduler
    }

    /// Elements highlighted by the live query of an active drag-resize.
    pub fn feedback(&self) -> &[ElementId] {
        &self.feedback
    }

    /// Start tracking a container element.
    ///
    /// A cache hit restores membership and the header flag directly. On a miss
    /// a content container is seeded from the host selection (when it has one
    /// that does not include the container) and fitted on the next tick, or
    /// else detects its members on the next tick.
    pub fn register_container(
        &mut self,
        canvas: &Canvas,
        id: ElementId,
        options: ContainerOptions,
    ) -> ContainmentResult<Registration> {
        let element = canvas.get(id).ok_or(ContainmentError::StaleElement(id))?;
        if element.kind != ElementKind::Container {
            return Err(ContainmentError::NotAContainer(id));
        }

        let cached = self.cache.load(id, |m| canvas.is_alive(m));
        let header = cached.as_ref().map_or(options.header, |e| e.header);
        let state = ContainerState::new(
            header,
            options.predicate.unwrap_or(self.settings.default_predicate),
            options.group_movement.unwrap_or(self.settings.group_movement),
        );
        self.containers.insert(id, state);

        let restored = if let Some(entry) = cached {
            for &m in &entry.members {
                if canvas.kind(m) == Some(ElementKind::Container)
                    && !self.containers.contains(m)
                    && !self.cache.is_header(m)
                {
                    self.containers.expect_content(m);
                }
            }
            self.containers.set_members(id, entry.members);
            // Containers restored earlier may relate to this one.
            self.after_edit(id);
            true
        } else {
            if !header {
                let selection = canvas.selection();
                if !self.settings.ignore_selection_on_creation
                    && !selection.is_empty()
                    && !selection.contains(&id)
                {
                    let seeded: Vec<ElementId> = self
                        .expand_selection(canvas, &selection, id)
                        .into_iter()
                        .filter(|m| self.can_add(canvas, id, *m))
                        .collect();
                    self.containers.set_members(id, seeded);
                    self.after_edit(id);
                    self.scheduler.schedule(1, Deferred::Fit(id));
                } else if self.settings.detect_on_creation {
                    self.scheduler.schedule(1, Deferred::InitialDetect(id));
                }
            }
            self.write_cache(id);
            false
        };

        let first_initialization = self.cache.mark_initialized(id);
        self.snapshot_content(canvas, id);
        debug!(
            container = ?id,
            restored,
            first_initialization,
            members = self.containers.members(id).len(),
            "container registered"
        );
        Ok(Registration {
            restored,
            first_initialization,
        })
    }

    /// Recompute membership with the container's own predicate, then resolve
    /// the hierarchy and write the cache.
    ///
    /// Returns `true` if the major member set changed.
    pub fn compute_membership(
        &mut self,
        canvas: &Canvas,
        id: ElementId,
    ) -> ContainmentResult<bool> {
        let predicate = self
            .containers
            .get(id)
            .ok_or(ContainmentError::NotAContainer(id))?
            .predicate;
        self.refresh(canvas, id, predicate, self.settings.exclude_pass_through)
    }

    /// Re-run hierarchy resolution for one container and persist every
    /// container it touched. Returns `true` if nesting changed.
    pub fn resolve_hierarchy(&mut self, id: ElementId) -> bool {
        let mut touched = Parents::new();
        let changed = self.containers.resolve_touching(id, &mut touched);
        for c in touched {
            self.write_cache(c);
        }
        self.hierarchy_dirty |= changed;
        changed
    }

    /// Bounds the container should take to enclose its members.
    ///
    /// Member containers that themselves (transitively) contain this one are
    /// left out so two overlapping containers cannot push each other outwards.
    pub fn compute_fit_bounds(&self, canvas: &Canvas, id: ElementId) -> Option<Rect> {
        let current = canvas.bounds(id)?;
        let state = self.containers.get(id)?;
        let rects = state
            .members()
            .iter()
            .copied()
            .filter(|m| {
                !(self.containers.is_content_container(*m)
                    && self.containers.contains_transitively(*m, id))
            })
            .filter_map(|m| canvas.bounds(m));
        Some(layout::fit_bounds(
            current,
            rects,
            state.is_header(),
            &self.settings,
        ))
    }

    /// Commit fit bounds, ignoring changes within [`layout::FIT_EPSILON`].
    pub fn apply_fit(&mut self, canvas: &mut Canvas, id: ElementId, bounds: Rect) -> bool {
        let changed = layout::apply_fit(canvas, id, bounds);
        if changed {
            debug!(container = ?id, ?bounds, "fit applied");
        }
        changed
    }

    /// [`GroupingEngine::compute_fit_bounds`] followed by
    /// [`GroupingEngine::apply_fit`].
    pub fn resize_to_fit(&mut self, canvas: &mut Canvas, id: ElementId) -> bool {
        let Some(bounds) = self.compute_fit_bounds(canvas, id) else {
            return false;
        };
        let changed = self.apply_fit(canvas, id, bounds);
        self.snapshot_content(canvas, id);
        changed
    }

    /// Add elements to a content container.
    ///
    /// Self, dead ids and content containers are skipped, as are pass-through
    /// elements when they are excluded. Returns `true` if anything was added.
    pub fn add_members(
        &mut self,
        canvas: &Canvas,
        id: ElementId,
        members: &[ElementId],
    ) -> ContainmentResult<bool> {
        self.check_content_container(canvas, id)?;
        let mut changed = false;
        for &m in members {
            if m == id {
                warn!(container = ?id, "ignoring request to add a container to itself");
                continue;
            }
            if !self.can_add(canvas, id, m) {
                continue;
            }
            match self.containers.add_member(id, m) {
                Ok(added) => changed |= added,
                Err(err) => warn!(%err, "member refused"),
            }
        }
        if changed {
            self.after_edit(id);
        }
        Ok(changed)
    }

    /// Remove elements from a container. Returns `true` if anything was removed.
    pub fn remove_members(
        &mut self,
        id: ElementId,
        members: &[ElementId],
    ) -> ContainmentResult<bool> {
        if !self.containers.contains(id) {
            return Err(ContainmentError::NotAContainer(id));
        }
        let mut changed = false;
        for &m in members {
            changed |= self.containers.remove_member(id, m);
        }
        if changed {
            self.after_edit(id);
        }
        Ok(changed)
    }

    /// Remove every member of a container.
    pub fn clear_members(&mut self, id: ElementId) -> ContainmentResult<bool> {
        if !self.containers.contains(id) {
            return Err(ContainmentError::NotAContainer(id));
        }
        let changed = self.containers.set_members(id, []);
        if changed {
            self.after_edit(id);
        }
        Ok(changed)
    }

    /// Add the host selection, with selected containers expanded into their
    /// members.
    pub fn add_selected(&mut self, canvas: &Canvas, id: ElementId) -> ContainmentResult<bool> {
        let selection = canvas.selection();
        let members = self.expand_selection(canvas, &selection, id);
        self.add_members(canvas, id, &members)
    }

    /// Remove the host selection.
    pub fn remove_selected(&mut self, canvas: &Canvas, id: ElementId) -> ContainmentResult<bool> {
        let selection = canvas.selection();
        self.remove_members(id, &selection)
    }

    /// Turn a container into a header or back.
    ///
    /// A header loses its members and its height is pinned to the header bar.
    /// A content container is grown to the minimum content size. Containers
    /// listing `id` are re-resolved, since its major status flips.
    pub fn set_header(
        &mut self,
        canvas: &mut Canvas,
        id: ElementId,
        header: bool,
    ) -> ContainmentResult<bool> {
        let bounds = canvas.bounds(id).ok_or(ContainmentError::StaleElement(id))?;
        if !self.containers.contains(id) {
            return Err(ContainmentError::NotAContainer(id));
        }
        let parents = self.containers.parents_of(id);
        if !self.containers.set_header(id, header) {
            return Ok(false);
        }

        let size = if header {
            Size::new(
                bounds.width().max(self.settings.min_width),
                self.settings.header_height,
            )
        } else {
            layout::adjust_min_size(bounds.size(), false, &self.settings)
        };
        canvas.set_size(id, size);
        if header {
            self.scheduler.cancel_where(|d| d.target() == id);
        }
        self.write_cache(id);
        for p in parents {
            self.after_edit(p);
        }
        self.hierarchy_dirty = true;
        self.snapshot_content(canvas, id);
        debug!(container = ?id, header, "header flag changed");
        Ok(true)
    }

    /// Forget an element the host has deleted.
    ///
    /// A container is unregistered and its cache entry pruned; any other
    /// element is dropped from every member list. Returns `true` if grouping
    /// state changed.
    pub fn on_element_removed(&mut self, id: ElementId) -> bool {
        if self.containers.contains(id) {
            self.forget_container(id);
            return true;
        }
        self.containers.retain_expected(|m| m != id);
        let parents = self.containers.parents_of(id);
        for p in &parents {
            self.containers.remove_member(*p, id);
        }
        for p in &parents {
            self.after_edit(*p);
        }
        !parents.is_empty()
    }

    /// Drop members that no longer resolve to live elements and unregister
    /// containers that are gone. Returns the number of dropped member ids.
    pub fn remove_invalid_members(&mut self, canvas: &Canvas) -> usize {
        let ids: Vec<ElementId> = self.containers.ids().collect();
        let mut dropped = 0;
        self.containers.retain_expected(|m| canvas.is_alive(m));
        let mut edited = Vec::new();
        let mut vanished = Vec::new();
        for id in ids {
            if !canvas.is_alive(id) {
                vanished.push(id);
                continue;
            }
            let before = self.containers.members(id).len();
            if self.containers.retain_members(id, |m| canvas.is_alive(m)) {
                dropped += before - self.containers.members(id).len();
                edited.push(id);
            }
        }
        // Resolve only once every list is swept, so no pass sees a stale member.
        for id in vanished {
            debug!(container = ?id, "container vanished without notice");
            self.forget_container(id);
        }
        for id in edited {
            if self.containers.contains(id) {
                self.after_edit(id);
            }
        }
        if dropped > 0 {
            debug!(dropped, "dropped dangling members");
        }
        dropped
    }

    /// Advance one frame.
    ///
    /// Sweeps dangling members, runs deferred work that came due, then applies
    /// the resizing mode. Containers being drag-resized are neither refreshed
    /// nor auto-fitted; their deferred work waits for the release.
    pub fn tick(&mut self, canvas: &mut Canvas) -> FrameReport {
        let mut report = FrameReport {
            dropped_members: self.remove_invalid_members(canvas),
            ..FrameReport::default()
        };

        for action in self.scheduler.tick() {
            let id = action.target();
            if !self.containers.contains(id) || !canvas.is_alive(id) {
                continue;
            }
            if self.resize.is_dragging_target(&id) {
                // Held until the drag is released.
                self.scheduler.schedule(1, action);
                continue;
            }
            trace!(?action, "deferred action due");
            match action {
                Deferred::InitialDetect(_) => {
                    let predicate = self.settings.initial_predicate;
                    if self.refresh_logged(canvas, id, predicate) {
                        report.refreshed.push(id);
                    }
                    self.snapshot_content(canvas, id);
                }
                Deferred::Fit(_) => {
                    if self.resize_to_fit(canvas, id) {
                        report.resized.push(id);
                    }
                }
                Deferred::SecondPass(_) => {
                    let predicate = self.containers.get(id).map(|s| s.predicate);
                    if let Some(predicate) = predicate
                        && self.refresh_logged(canvas, id, predicate)
                    {
                        report.refreshed.push(id);
                    }
                    if self.resize_to_fit(canvas, id) {
                        report.resized.push(id);
                    }
                }
            }
        }

        let mode = self.settings.resizing_mode;
        if mode != ResizingMode::Disabled {
            let ids: Vec<ElementId> = self.containers.ids().collect();
            for id in ids {
                if self.containers.is_header(id) || self.resize.is_dragging_target(&id) {
                    continue;
                }
                let fit = match mode {
                    ResizingMode::Always => true,
                    _ => self.content_changed(canvas, id),
                };
                if !fit {
                    continue;
                }
                if self.resize_to_fit(canvas, id) && !report.resized.contains(&id) {
                    report.resized.push(id);
                }
                if mode == ResizingMode::Reactive && self.settings.two_pass_resize {
                    self.scheduler.schedule(
                        self.settings.two_pass_delay_frames,
                        Deferred::SecondPass(id),
                    );
                }
            }
        }

        report.hierarchy_changed = core::mem::take(&mut self.hierarchy_dirty);
        report
    }

    /// Pick and draw priority of an element; higher sorts on top.
    ///
    /// Headers, selected containers and non-containers are at 0. Content
    /// containers sit at [`CONTAINER_SORT_BASE`] plus their nesting depth, so
    /// nested containers stay pickable above their parents.
    pub fn sort_depth(&self, canvas: &Canvas, id: ElementId) -> i32 {
        if !self.containers.is_content_container(id) || canvas.is_selected(id) {
            return 0;
        }
        let depth = i32::try_from(self.containers.nesting_depth(id)).unwrap_or(i32::MAX);
        CONTAINER_SORT_BASE.saturating_add(depth)
    }

    /// Returns `true` if canvas-space `point` is on the header bar of `id`.
    pub fn is_in_header(&self, canvas: &Canvas, id: ElementId, point: Point) -> bool {
        let Some(bounds) = canvas.bounds(id) else {
            return false;
        };
        if !self.containers.contains(id) {
            return false;
        }
        let bar = Rect::new(
            bounds.x0,
            bounds.y0,
            bounds.x1,
            (bounds.y0 + self.settings.header_height).min(bounds.y1),
        );
        geometry::contains_point(bar, point)
    }

    /// Drop all state and clear the cache store, e.g. when the canvas closes.
    pub fn close(&mut self) {
        self.containers.clear();
        self.cache.clear();
        self.scheduler.clear();
        self.resize.clear();
        self.moves.clear();
        self.snapshots.clear();
        self.feedback.clear();
        self.hierarchy_dirty = false;
    }

    /// Query, replace the major members, resolve, and write the cache.
    pub(crate) fn refresh(
        &mut self,
        canvas: &Canvas,
        id: ElementId,
        predicate: Predicate,
        exclude_pass_through: bool,
    ) -> ContainmentResult<bool> {
        let bounds = canvas.bounds(id).ok_or(ContainmentError::StaleElement(id))?;
        let state = self
            .containers
            .get(id)
            .ok_or(ContainmentError::NotAContainer(id))?;
        if state.is_header() {
            return Ok(false);
        }

        let area = content_rect(bounds, self.settings.header_height);
        let filter = QueryFilter::new()
            .container(id)
            .exclude_pass_through(exclude_pass_through);
        let found = query(area, self.candidates(canvas), predicate, filter);
        let found_set: HashSet<ElementId> = found.iter().copied().collect();
        if found_set == self.containers.majors(id) {
            trace!(container = ?id, "membership unchanged");
            return Ok(false);
        }

        let nested = self.containers.nested(id);
        self.containers
            .set_members(id, found.into_iter().chain(nested));
        self.after_edit(id);
        debug!(
            container = ?id,
            ?predicate,
            members = self.containers.members(id).len(),
            "membership refreshed"
        );
        Ok(true)
    }

    fn refresh_logged(&mut self, canvas: &Canvas, id: ElementId, predicate: Predicate) -> bool {
        match self.refresh(canvas, id, predicate, self.settings.exclude_pass_through) {
            Ok(changed) => changed,
            Err(err) => {
                warn!(%err, "membership refresh skipped");
                false
            }
        }
    }

    pub(crate) fn candidates(&self, canvas: &Canvas) -> Vec<Candidate> {
        canvas
            .iter()
            .map(|(id, e)| {
                let kind = MemberKind::classify(e.kind, self.header_flag(id));
                Candidate::new(id, e.bounds(), kind)
            })
            .collect()
    }

    fn can_add(&self, canvas: &Canvas, container: ElementId, member: ElementId) -> bool {
        if member == container {
            return false;
        }
        match canvas.kind(member) {
            Some(ElementKind::Plain) => true,
            Some(ElementKind::PassThrough) => !self.settings.exclude_pass_through,
            Some(ElementKind::Container) => self.header_flag(member),
            None => false,
        }
    }

    /// Header flag of a container, falling back to the cache for containers
    /// that have not registered yet.
    fn header_flag(&self, id: ElementId) -> bool {
        match self.containers.get(id) {
            Some(state) => state.is_header(),
            None => self.cache.is_header(id),
        }
    }

    fn check_content_container(&self, canvas: &Canvas, id: ElementId) -> ContainmentResult<()> {
        if !canvas.is_alive(id) {
            return Err(ContainmentError::StaleElement(id));
        }
        match self.containers.get(id) {
            None => Err(ContainmentError::NotAContainer(id)),
            Some(state) if state.is_header() => Err(ContainmentError::HeaderContainer(id)),
            Some(_) => Ok(()),
        }
    }

    fn expand_selection(
        &self,
        canvas: &Canvas,
        selection: &[ElementId],
        container: ElementId,
    ) -> Vec<ElementId> {
        let mut out = Vec::new();
        for &s in selection {
            if s == container || !canvas.is_alive(s) {
                continue;
            }
            out.push(s);
            if self.containers.contains(s) {
                out.extend(
                    self.containers
                        .members(s)
                        .iter()
                        .copied()
                        .filter(|m| *m != container),
                );
            }
        }
        out
    }

    /// Resolve after a membership edit and persist everything it touched.
    fn after_edit(&mut self, id: ElementId) {
        let mut touched = Parents::new();
        touched.push(id);
        if self.containers.resolve_touching(id, &mut touched) {
            self.hierarchy_dirty = true;
        }
        for c in touched {
            self.write_cache(c);
        }
    }

    fn write_cache(&mut self, id: ElementId) {
        if let Some(state) = self.containers.get(id) {
            self.cache.save(id, state.members(), state.is_header());
        }
    }

    fn forget_container(&mut self, id: ElementId) {
        if let Some((_, parents)) = self.containers.remove(id) {
            for p in &parents {
                self.after_edit(*p);
            }
            self.hierarchy_dirty |= !parents.is_empty();
        }
        self.cache.prune(id);
        self.scheduler.cancel_where(|d| d.target() == id);
        self.resize.cancel_target(&id);
        self.moves.end(&id);
        self.snapshots.remove(&id);
        debug!(container = ?id, "container forgotten");
    }

    fn member_rects(&self, canvas: &Canvas, id: ElementId) -> Vec<(ElementId, Rect)> {
        self.containers
            .members(id)
            .iter()
            .filter_map(|m| canvas.bounds(*m).map(|r| (*m, r)))
            .collect()
    }

    pub(crate) fn snapshot_content(&mut self, canvas: &Canvas, id: ElementId) {
        if self.containers.contains(id) {
            let rects = self.member_rects(canvas, id);
            self.snapshots.insert(id, rects);
        }
    }

    fn content_changed(&self, canvas: &Canvas, id: ElementId) -> bool {
        self.snapshots
            .get(&id)
            .is_none_or(|snap| *snap != self.member_rects(canvas, id))
    }
}
