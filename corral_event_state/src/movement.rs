// Copyright 2025 the Corral Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Move gesture tracking.
//!
//! Hosts report each drag delta applied to a region. [`MoveState`] remembers
//! which regions are mid-gesture so the caller can do one-time work (such as
//! freezing membership) on the first delta, and accumulates the total offset.

use alloc::collections::BTreeMap;
use kurbo::Vec2;

/// Progress of a single region's move gesture.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MoveGesture {
    /// Sum of all deltas so far.
    pub total: Vec2,
    /// Number of deltas received.
    pub steps: u32,
}

/// Whether a delta opened a new gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveStep {
    /// First delta of a gesture.
    First,
    /// A later delta of the same gesture.
    Continue,
}

/// Move gestures in flight, keyed by region.
#[derive(Clone, Debug)]
pub struct MoveState<K> {
    gestures: BTreeMap<K, MoveGesture>,
}

impl<K: Ord> MoveState<K> {
    /// Create an empty state.
    pub fn new() -> Self {
        Self {
            gestures: BTreeMap::new(),
        }
    }

    /// Record a delta for `target`, opening a gesture if none is active.
    pub fn on_delta(&mut self, target: K, delta: Vec2) -> MoveStep {
        let mut step = MoveStep::Continue;
        let gesture = self.gestures.entry(target).or_insert_with(|| {
            step = MoveStep::First;
            MoveGesture::default()
        });
        gesture.total += delta;
        gesture.steps = gesture.steps.saturating_add(1);
        step
    }

    /// Close the gesture on `target` and return it.
    pub fn end(&mut self, target: &K) -> Option<MoveGesture> {
        self.gestures.remove(target)
    }

    /// Returns `true` if `target` is mid-gesture.
    pub fn is_moving(&self, target: &K) -> bool {
        self.gestures.contains_key(target)
    }

    /// The gesture in flight on `target`.
    pub fn get(&self, target: &K) -> Option<&MoveGesture> {
        self.gestures.get(target)
    }

    /// Close every gesture.
    pub fn clear(&mut self) {
        self.gestures.clear();
    }
}

impl<K: Ord> Default for MoveState<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_delta_opens_gesture() {
        let mut state: MoveState<u32> = MoveState::new();
        assert_eq!(state.on_delta(1, Vec2::new(2.0, 0.0)), MoveStep::First);
        assert_eq!(state.on_delta(1, Vec2::new(3.0, 1.0)), MoveStep::Continue);
        assert_eq!(state.on_delta(2, Vec2::new(1.0, 1.0)), MoveStep::First);

        let g = state.end(&1).unwrap();
        assert_eq!(g.total, Vec2::new(5.0, 1.0));
        assert_eq!(g.steps, 2);
        assert!(!state.is_moving(&1));
        assert!(state.is_moving(&2));

        assert_eq!(state.on_delta(1, Vec2::ZERO), MoveStep::First, "new gesture after end");
    }

    #[test]
    fn clear_drops_everything() {
        let mut state: MoveState<u32> = MoveState::default();
        state.on_delta(1, Vec2::ZERO);
        state.on_delta(2, Vec2::ZERO);
        state.clear();
        assert!(state.get(&1).is_none());
        assert!(state.end(&2).is_none());
    }
}
