// Copyright 2025 the Corral Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Corral Containment: which canvas elements a grouping region holds.
//!
//! A container is a rectangle on a [`corral_canvas::Canvas`] that groups the
//! elements inside it. This crate keeps that grouping current as the user
//! moves, resizes, creates and deletes things:
//!
//! - [`query`]: spatial membership tests under three [`Predicate`]s.
//! - [`Containers`]: member lists per container, and the resolver that nests
//!   one container inside another when its major members are a strict subset.
//! - [`layout`]: fit bounds around members, with padding, a header bar and
//!   minimum sizes.
//! - [`MembershipCache`]: per-container membership that survives reloads,
//!   behind the [`CacheStore`] seam.
//! - [`Scheduler`]: frame-counted deferred work such as the second fit pass.
//! - [`GroupingEngine`]: ties the above together and drives drag-resize and
//!   group-move interaction.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Rect, Vec2};
//! use corral_canvas::{Canvas, Element};
//! use corral_containment::{ContainerOptions, GroupingEngine, Settings};
//! use corral_event_state::resize::Modifiers;
//!
//! let mut canvas = Canvas::new();
//! let group = canvas.insert(Element::container(Rect::new(0.0, 0.0, 400.0, 300.0)));
//! let node = canvas.insert(Element::plain(Rect::new(50.0, 80.0, 150.0, 140.0)));
//!
//! let mut engine = GroupingEngine::new(Settings::default());
//! engine.register_container(&canvas, group, ContainerOptions::default()).unwrap();
//!
//! // Detection runs on the first tick after registration.
//! let report = engine.tick(&mut canvas);
//! assert_eq!(report.refreshed, [group]);
//! assert_eq!(engine.members(group), &[node]);
//!
//! // Moving the group carries the node along.
//! engine
//!     .on_move_delta(&mut canvas, &[group], Vec2::new(10.0, 0.0), Modifiers::empty())
//!     .unwrap();
//! assert_eq!(canvas.bounds(node).unwrap().x0, 60.0);
//! ```
//!
//! Logging goes through `tracing`: membership and hierarchy changes at
//! `debug`, per-frame detail at `trace`, refused edits and cache failures at
//! `warn`. Install a subscriber in the host to see them.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod cache;
mod config;
mod engine;
mod error;
mod hierarchy;
pub mod layout;
mod pointer;
pub mod query;
mod schedule;

pub use cache::{CacheEntry, CacheStore, MembershipCache, MemoryStore, SNAPSHOT_VERSION};
pub use config::{ResizingMode, Settings};
pub use engine::{
    CONTAINER_SORT_BASE, ContainerOptions, FrameReport, GroupingEngine, Registration,
};
pub use error::{
    CacheError, CacheResult, ConfigError, ConfigResult, ContainmentError, ContainmentResult,
};
pub use hierarchy::{ContainerState, Containers, Parents};
pub use pointer::PointerInput;
pub use query::{Predicate, QueryFilter};
pub use schedule::{Deferred, Scheduler};
