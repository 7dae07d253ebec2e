// Copyright 2025 the Corral Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Corral Event State: small, pure state machines for grouping-region interaction.
//!
//! Nothing here knows about membership or layout. Each type takes pointer
//! positions, buttons and modifier state and answers "what should happen to the
//! region's rectangle", leaving the decision of what to recompute to the caller.
//!
//! - [`resize`]: eight-zone [`resize::Anchor`] detection scaled by zoom, the
//!   [`resize::ResizeChord`] that arms a drag, and [`resize::ResizeState`], the
//!   `Idle → Dragging(anchor) → Idle` machine with per-anchor edge math.
//! - [`movement`]: [`movement::MoveState`], tracking move gestures per target so
//!   callers know which delta is the first of a gesture.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod movement;
pub mod resize;
