// Copyright 2025 the Corral Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Container registry and the container-of-container resolver.
//!
//! Each registered container records an ordered, duplicate-free member list.
//! Members split into two groups:
//!
//! - major members: plain elements, pass-through elements and header
//!   containers. These are what a container "holds".
//! - nested containers: registered content containers. These are never
//!   detected spatially; [`Containers::resolve`] adds and removes them by
//!   comparing major sets.
//!
//! Container `S` nests inside `C` when `majors(S) ⊊ majors(C)`. Equal sets keep
//! whichever direction already existed and otherwise stay unrelated, so the
//! relation is a strict order and cannot form a cycle. [`Containers::add_member`]
//! still checks for cycles and refuses the edit if one would appear.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use corral_canvas::ElementId;
use hashbrown::HashSet;
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::error::{ContainmentError, ContainmentResult};
use crate::query::Predicate;

/// Parent list of one container; almost always short.
pub type Parents = SmallVec<[ElementId; 4]>;

/// Grouping state of one container.
#[derive(Clone, Debug, PartialEq)]
pub struct ContainerState {
    members: Vec<ElementId>,
    header: bool,
    /// Predicate for this container's own refreshes.
    pub predicate: Predicate,
    /// Whether moving this container drags its members along.
    pub group_movement: bool,
}

impl ContainerState {
    /// Create a state with no members.
    pub fn new(header: bool, predicate: Predicate, group_movement: bool) -> Self {
        Self {
            members: Vec::new(),
            header,
            predicate,
            group_movement,
        }
    }

    /// Recorded members, in insertion order.
    pub fn members(&self) -> &[ElementId] {
        &self.members
    }

    /// Returns `true` for header containers.
    pub fn is_header(&self) -> bool {
        self.header
    }
}

/// Every container registered on one canvas.
///
/// Iteration is in ascending [`ElementId`] order.
#[derive(Clone, Debug, Default)]
pub struct Containers {
    states: BTreeMap<ElementId, ContainerState>,
    /// Content containers named in restored member lists that have not
    /// registered yet.
    expected: HashSet<ElementId>,
}

impl Containers {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a container.
    pub fn insert(&mut self, id: ElementId, state: ContainerState) -> Option<ContainerState> {
        self.expected.remove(&id);
        self.states.insert(id, state)
    }

    /// Record that `id` is a content container that will register later.
    ///
    /// Until it does, it is kept as a nested member and left out of major sets,
    /// exactly as it will be once registered.
    pub fn expect_content(&mut self, id: ElementId) {
        if !self.states.contains_key(&id) {
            self.expected.insert(id);
        }
    }

    /// Drop expected containers for which `keep` is false.
    pub fn retain_expected(&mut self, mut keep: impl FnMut(ElementId) -> bool) {
        self.expected.retain(|id| keep(*id));
    }

    /// Unregister a container and strip it from every member list.
    ///
    /// Returns the removed state and the containers that listed it.
    pub fn remove(&mut self, id: ElementId) -> Option<(ContainerState, Parents)> {
        self.expected.remove(&id);
        let state = self.states.remove(&id)?;
        let parents = self.parents_of(id);
        for p in &parents {
            self.remove_member(*p, id);
        }
        Some((state, parents))
    }

    /// State of a registered container.
    pub fn get(&self, id: ElementId) -> Option<&ContainerState> {
        self.states.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: ElementId) -> Option<&mut ContainerState> {
        self.states.get_mut(&id)
    }

    /// Returns `true` if `id` is registered.
    pub fn contains(&self, id: ElementId) -> bool {
        self.states.contains_key(&id)
    }

    /// Registered ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.states.keys().copied()
    }

    /// Number of registered containers.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Drop every container.
    pub fn clear(&mut self) {
        self.states.clear();
        self.expected.clear();
    }

    /// Members of `id`, or an empty slice if it is not registered.
    pub fn members(&self, id: ElementId) -> &[ElementId] {
        self.states.get(&id).map_or(&[], |s| s.members())
    }

    /// Returns `true` if `id` is a registered header container.
    pub fn is_header(&self, id: ElementId) -> bool {
        self.states.get(&id).is_some_and(ContainerState::is_header)
    }

    /// Returns `true` if `id` is a registered content (non-header) container.
    pub fn is_content_container(&self, id: ElementId) -> bool {
        self.states.get(&id).is_some_and(|s| !s.header)
    }

    /// Major members of `id`: everything except nested content containers.
    pub fn majors(&self, id: ElementId) -> HashSet<ElementId> {
        self.members(id)
            .iter()
            .copied()
            .filter(|m| !self.is_nested_kind(*m))
            .collect()
    }

    /// Content containers recorded as members of `id`, including expected ones.
    pub fn nested(&self, id: ElementId) -> Vec<ElementId> {
        self.members(id)
            .iter()
            .copied()
            .filter(|m| self.is_nested_kind(*m))
            .collect()
    }

    fn is_nested_kind(&self, id: ElementId) -> bool {
        self.is_content_container(id) || self.expected.contains(&id)
    }

    /// Containers that list `id` as a member, in ascending order.
    pub fn parents_of(&self, id: ElementId) -> Parents {
        self.states
            .iter()
            .filter(|(_, s)| s.members.contains(&id))
            .map(|(p, _)| *p)
            .collect()
    }

    /// Add `member` to `container`.
    ///
    /// Returns `Ok(false)` if it was already a member. Refuses self-containment,
    /// header containers, and any edit that would close a cycle.
    pub fn add_member(
        &mut self,
        container: ElementId,
        member: ElementId,
    ) -> ContainmentResult<bool> {
        if container == member {
            return Err(ContainmentError::SelfContainment(container));
        }
        let Some(state) = self.states.get(&container) else {
            return Err(ContainmentError::NotAContainer(container));
        };
        if state.header {
            return Err(ContainmentError::HeaderContainer(container));
        }
        if state.members.contains(&member) {
            return Ok(false);
        }
        if self.is_content_container(member) && self.contains_transitively(member, container) {
            return Err(ContainmentError::WouldCycle { container, member });
        }
        if let Some(state) = self.states.get_mut(&container) {
            state.members.push(member);
        }
        Ok(true)
    }

    /// Remove `member` from `container`. Returns `true` if it was a member.
    pub fn remove_member(&mut self, container: ElementId, member: ElementId) -> bool {
        let Some(state) = self.states.get_mut(&container) else {
            return false;
        };
        let before = state.members.len();
        state.members.retain(|m| *m != member);
        before != state.members.len()
    }

    /// Replace the member list of `container`, dropping duplicates and the
    /// container itself. Returns `true` if the list changed.
    pub fn set_members(
        &mut self,
        container: ElementId,
        members: impl IntoIterator<Item = ElementId>,
    ) -> bool {
        let Some(state) = self.states.get_mut(&container) else {
            return false;
        };
        let mut seen = HashSet::new();
        let next: Vec<ElementId> = members
            .into_iter()
            .filter(|m| *m != container && seen.insert(*m))
            .collect();
        if next == state.members {
            return false;
        }
        state.members = next;
        true
    }

    /// Keep only the members for which `keep` returns `true`.
    pub fn retain_members(
        &mut self,
        container: ElementId,
        mut keep: impl FnMut(ElementId) -> bool,
    ) -> bool {
        let Some(state) = self.states.get_mut(&container) else {
            return false;
        };
        let before = state.members.len();
        state.members.retain(|m| keep(*m));
        before != state.members.len()
    }

    pub(crate) fn set_header(&mut self, id: ElementId, header: bool) -> bool {
        match self.states.get_mut(&id) {
            Some(state) if state.header != header => {
                state.header = header;
                if header {
                    state.members.clear();
                }
                true
            }
            _ => false,
        }
    }

    /// Returns `true` if `descendant` is reachable from `ancestor` through
    /// member lists of content containers.
    pub fn contains_transitively(&self, ancestor: ElementId, descendant: ElementId) -> bool {
        let mut stack: Vec<ElementId> = Vec::from([ancestor]);
        let mut seen = HashSet::new();
        while let Some(c) = stack.pop() {
            if !seen.insert(c) {
                continue;
            }
            for m in self.members(c) {
                if *m == descendant {
                    return true;
                }
                if self.is_content_container(*m) {
                    stack.push(*m);
                }
            }
        }
        false
    }

    /// Length of the longest chain of containers listing `id`. Top-level
    /// containers are at depth 0.
    pub fn nesting_depth(&self, id: ElementId) -> usize {
        let mut visiting = HashSet::new();
        self.depth_inner(id, &mut visiting)
    }

    fn depth_inner(&self, id: ElementId, visiting: &mut HashSet<ElementId>) -> usize {
        if !visiting.insert(id) {
            return 0;
        }
        let depth = self
            .parents_of(id)
            .into_iter()
            .filter(|p| !self.is_header(*p))
            .map(|p| 1 + self.depth_inner(p, visiting))
            .max()
            .unwrap_or(0);
        visiting.remove(&id);
        depth
    }

    /// Bring `id`'s container-of-container relations in line with its
    /// current major set.
    ///
    /// Returns `true` if any member list changed.
    pub fn resolve(&mut self, id: ElementId) -> bool {
        let mut touched = Parents::new();
        self.resolve_touching(id, &mut touched)
    }

    /// [`Containers::resolve`], also reporting every container whose member
    /// list changed.
    pub(crate) fn resolve_touching(&mut self, id: ElementId, touched: &mut Parents) -> bool {
        if !self.is_content_container(id) {
            return false;
        }
        let own = self.majors(id);
        let before_parents = self.parents_of(id);

        let mut promote = Parents::new();
        let mut parents = Parents::new();
        if !own.is_empty() {
            for other in self.ids() {
                if other == id || !self.is_content_container(other) {
                    continue;
                }
                let theirs = self.majors(other);
                if theirs.is_empty() {
                    continue;
                }
                let sub = theirs.is_subset(&own);
                let sup = own.is_subset(&theirs);
                match (sub, sup) {
                    (true, false) => promote.push(other),
                    (false, true) => parents.push(other),
                    // Equal sets: keep an existing edge in either direction, never create one.
                    (true, true) if before_parents.contains(&other) => parents.push(other),
                    _ => {}
                }
            }
        }

        let mut changed = false;
        let mark = |touched: &mut Parents, c: ElementId| {
            if !touched.contains(&c) {
                touched.push(c);
            }
        };

        for p in &before_parents {
            if !parents.contains(p) && self.remove_member(*p, id) {
                changed = true;
                mark(touched, *p);
            }
        }

        for n in self.nested(id) {
            if !self.is_content_container(n) {
                // Re-validated when it registers.
                continue;
            }
            let theirs = self.majors(n);
            let keep = !theirs.is_empty() && theirs.is_subset(&own);
            if !keep && self.remove_member(id, n) {
                changed = true;
                mark(touched, id);
            }
        }

        for (container, member) in promote
            .iter()
            .map(|s| (id, *s))
            .chain(parents.iter().map(|p| (*p, id)))
        {
            match self.add_member(container, member) {
                Ok(true) => {
                    changed = true;
                    mark(touched, container);
                }
                Ok(false) => {}
                Err(err) => warn!(%err, "refused hierarchy edit"),
            }
        }

        if changed {
            debug!(container = ?id, touched = touched.len(), "hierarchy resolved");
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn id(n: u32) -> ElementId {
        ElementId::from_raw(n, 1)
    }

    fn content() -> ContainerState {
        ContainerState::new(false, Predicate::FullyContained, true)
    }

    /// Containers 100.. hold the given element ids 1.. as members.
    #[must_use]
    fn registry(sets: &[&[u32]]) -> Containers {
        let mut c = Containers::new();
        for (i, set) in sets.iter().enumerate() {
            let cid = id(100 + u32::try_from(i).unwrap());
            c.insert(cid, content());
            c.set_members(cid, set.iter().map(|n| id(*n)));
        }
        c
    }

    #[test]
    fn subset_promotes_not_reverse() {
        let (a, b) = (id(100), id(101));
        let mut c = registry(&[&[1, 2], &[1, 2, 3]]);
        assert!(c.resolve(a));
        assert!(c.members(b).contains(&a), "A nests under B");
        assert!(!c.members(a).contains(&b));

        // Resolving B afterwards agrees.
        assert!(!c.resolve(b), "nothing left to change");
        assert!(c.members(b).contains(&a));
        assert_eq!(c.nesting_depth(a), 1);
        assert_eq!(c.nesting_depth(b), 0);
    }

    #[test]
    fn superset_side_promotes_too() {
        let (a, b) = (id(100), id(101));
        let mut c = registry(&[&[1, 2], &[1, 2, 3]]);
        assert!(c.resolve(b));
        assert_eq!(c.nested(b), vec![a]);
        assert_eq!(c.majors(b).len(), 3, "nested containers are not majors");
    }

    #[test]
    fn disjoint_and_partial_overlap_stay_unrelated() {
        let mut c = registry(&[&[1, 2], &[3, 4], &[2, 3]]);
        for n in 100..103 {
            assert!(!c.resolve(id(n)));
        }
        for n in 100..103 {
            assert!(c.nested(id(n)).is_empty());
            assert!(c.parents_of(id(n)).is_empty());
        }
    }

    #[test]
    fn equal_sets_keep_existing_direction() {
        let (a, b) = (id(100), id(101));
        let mut c = registry(&[&[1, 2], &[1, 2]]);
        assert!(c.add_member(b, a).unwrap());

        assert!(!c.resolve(a));
        assert!(!c.resolve(b));
        assert!(!c.resolve(a));
        assert_eq!(c.nested(b), vec![a]);
        assert!(c.nested(a).is_empty(), "must not flip to B under A");
    }

    #[test]
    fn equal_sets_without_history_stay_unrelated() {
        let (a, b) = (id(100), id(101));
        let mut c = registry(&[&[1, 2], &[1, 2]]);
        assert!(!c.resolve(a));
        assert!(!c.resolve(b));
        assert!(c.nested(a).is_empty());
        assert!(c.nested(b).is_empty());
    }

    #[test]
    fn shrinking_parent_detaches_and_prunes() {
        let (a, b) = (id(100), id(101));
        let mut c = registry(&[&[1, 2], &[1, 2, 3]]);
        c.resolve(a);
        assert!(c.members(b).contains(&a));

        // B loses element 2: A is no longer a subset of B.
        c.set_members(b, [id(1), id(3), a]);
        assert!(c.resolve(b));
        assert!(!c.members(b).contains(&a));
    }

    #[test]
    fn growing_child_is_demoted_into_new_parent_only() {
        let (a, b, d) = (id(100), id(101), id(102));
        let mut c = registry(&[&[1], &[1, 2], &[5, 6, 7]]);
        c.resolve(a);
        assert_eq!(c.parents_of(a).as_slice(), &[b]);

        // A now holds 5 and 6: it leaves B and nests under D.
        c.set_members(a, [id(5), id(6)]);
        assert!(c.resolve(a));
        assert_eq!(c.parents_of(a).as_slice(), &[d]);
    }

    #[test]
    fn empty_container_is_only_detached() {
        let (a, b) = (id(100), id(101));
        let mut c = registry(&[&[1], &[1, 2]]);
        c.resolve(a);
        c.set_members(a, []);
        assert!(c.resolve(a));
        assert!(c.parents_of(a).is_empty());
        assert!(c.nested(b).is_empty());
    }

    #[test]
    fn add_member_guards() {
        let (a, b) = (id(100), id(101));
        let mut c = registry(&[&[1], &[1, 2]]);
        assert_eq!(
            c.add_member(a, a),
            Err(ContainmentError::SelfContainment(a))
        );
        assert_eq!(
            c.add_member(id(7), id(1)),
            Err(ContainmentError::NotAContainer(id(7)))
        );
        assert_eq!(c.add_member(a, id(1)), Ok(false), "already a member");
        assert_eq!(c.add_member(b, a), Ok(true));
        assert_eq!(
            c.add_member(a, b),
            Err(ContainmentError::WouldCycle {
                container: a,
                member: b
            })
        );

        c.insert(id(200), ContainerState::new(true, Predicate::Intersect, false));
        assert_eq!(
            c.add_member(id(200), id(1)),
            Err(ContainmentError::HeaderContainer(id(200)))
        );
    }

    #[test]
    fn header_members_count_as_majors() {
        let h = id(200);
        let mut c = registry(&[&[1, 200]]);
        c.insert(h, ContainerState::new(true, Predicate::FullyContained, true));
        assert!(c.majors(id(100)).contains(&h));
        assert!(c.nested(id(100)).is_empty());
        assert!(!c.resolve(h), "headers are leaves");
    }

    #[test]
    fn remove_strips_from_parents() {
        let (a, b) = (id(100), id(101));
        let mut c = registry(&[&[1], &[1, 2]]);
        c.resolve(a);
        let (_, parents) = c.remove(a).unwrap();
        assert_eq!(parents.as_slice(), &[b]);
        assert!(!c.members(b).contains(&a));
        assert!(c.remove(a).is_none());
    }

    #[test]
    fn three_level_depth() {
        let (a, b, d) = (id(100), id(101), id(102));
        let mut c = registry(&[&[1], &[1, 2], &[1, 2, 3]]);
        c.resolve(a);
        c.resolve(b);
        c.resolve(d);
        assert_eq!(c.nesting_depth(a), 2);
        assert_eq!(c.nesting_depth(b), 1);
        assert_eq!(c.nesting_depth(d), 0);
        assert!(c.contains_transitively(d, a));
        assert!(!c.contains_transitively(a, d));
    }

    #[test]
    fn expected_containers_are_nested_until_registered() {
        let (b, a) = (id(100), id(300));
        let mut c = registry(&[&[1, 2, 300]]);
        assert!(c.majors(b).contains(&a), "unknown ids count as majors");

        c.expect_content(a);
        assert_eq!(c.majors(b).len(), 2);
        assert_eq!(c.nested(b), vec![a]);
        assert!(!c.resolve(b), "unregistered children are not pruned");
        assert!(c.members(b).contains(&a));

        c.insert(a, content());
        c.set_members(a, [id(1)]);
        assert!(!c.resolve(a), "edge already recorded");
        assert_eq!(c.nesting_depth(a), 1);

        c.set_members(a, [id(3)]);
        assert!(c.resolve(b), "registered children are re-validated");
        assert!(c.nested(b).is_empty());
    }

    #[test]
    fn retain_expected_forgets_dead_ids() {
        let (b, a) = (id(100), id(300));
        let mut c = registry(&[&[1, 300]]);
        c.expect_content(a);
        c.retain_expected(|m| m != a);
        assert_eq!(c.majors(b).len(), 2);
    }

    #[test]
    fn set_members_dedups_and_drops_self() {
        let a = id(100);
        let mut c = registry(&[&[]]);
        assert!(c.set_members(a, [id(1), a, id(2), id(1)]));
        assert_eq!(c.members(a), &[id(1), id(2)]);
        assert!(!c.set_members(a, [id(1), id(2)]));
    }
}
