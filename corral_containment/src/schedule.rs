// Copyright 2025 the Corral Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame-counted deferred actions.

use alloc::vec::Vec;
use corral_canvas::ElementId;

/// Work the engine defers to a later tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Deferred {
    /// One-shot detection for a freshly created container.
    InitialDetect(ElementId),
    /// Fit a container to its members.
    Fit(ElementId),
    /// Follow-up refresh and fit after a reactive fit.
    SecondPass(ElementId),
}

impl Deferred {
    /// Container the action applies to.
    pub fn target(self) -> ElementId {
        match self {
            Self::InitialDetect(id) | Self::Fit(id) | Self::SecondPass(id) => id,
        }
    }
}

/// A queue of `(frames remaining, action)` pairs, ticked once per frame.
///
/// Scheduling an action that is already queued re-arms it instead of adding
/// a second copy. Nothing runs on its own: [`Scheduler::tick`] hands back the
/// actions that came due and the caller runs them.
#[derive(Clone, Debug)]
pub struct Scheduler<A> {
    queue: Vec<(u32, A)>,
}

impl<A> Default for Scheduler<A> {
    fn default() -> Self {
        Self { queue: Vec::new() }
    }
}

impl<A: PartialEq> Scheduler<A> {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `action` after `frames` ticks. `0` is treated as `1`: the
    /// earliest an action can run is the next tick.
    pub fn schedule(&mut self, frames: u32, action: A) {
        let frames = frames.max(1);
        if let Some(slot) = self.queue.iter_mut().find(|(_, a)| *a == action) {
            slot.0 = frames;
        } else {
            self.queue.push((frames, action));
        }
    }

    /// Advance one frame and return the actions that came due, in the order
    /// they were first scheduled.
    pub fn tick(&mut self) -> Vec<A> {
        let mut due = Vec::new();
        let mut pending = Vec::with_capacity(self.queue.len());
        for (frames, action) in self.queue.drain(..) {
            if frames <= 1 {
                due.push(action);
            } else {
                pending.push((frames - 1, action));
            }
        }
        self.queue = pending;
        due
    }

    /// Drop a queued action. Returns `true` if it was queued.
    pub fn cancel(&mut self, action: &A) -> bool {
        let before = self.queue.len();
        self.queue.retain(|(_, a)| a != action);
        before != self.queue.len()
    }

    /// Drop every queued action matching `f`.
    pub fn cancel_where(&mut self, mut f: impl FnMut(&A) -> bool) {
        self.queue.retain(|(_, a)| !f(a));
    }

    /// Returns `true` if `action` is queued.
    pub fn is_scheduled(&self, action: &A) -> bool {
        self.queue.iter().any(|(_, a)| a == action)
    }

    /// Ticks until `action` runs, if queued.
    pub fn frames_remaining(&self, action: &A) -> Option<u32> {
        self.queue
            .iter()
            .find(|(_, a)| a == action)
            .map(|(f, _)| *f)
    }

    /// Number of queued actions.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns `true` if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.queue.clear();
    }
}
