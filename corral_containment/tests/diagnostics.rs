// Copyright 2025 the Corral Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Degraded paths are logged, not fatal.

use corral_canvas::{Canvas, Element, ElementId};
use corral_containment::{
    CacheEntry, CacheError, CacheResult, CacheStore, ContainerOptions, ContainerState, Containers,
    GroupingEngine, Predicate, Settings,
};
use kurbo::Rect;
use tracing_test::traced_test;

/// A store whose backend is gone.
#[derive(Debug, Default)]
struct OfflineStore;

impl CacheStore for OfflineStore {
    fn load(&self, _: ElementId) -> CacheResult<Option<CacheEntry>> {
        Err(CacheError::Unavailable("backend offline".into()))
    }

    fn save(&mut self, _: ElementId, _: CacheEntry) -> CacheResult<()> {
        Err(CacheError::Unavailable("backend offline".into()))
    }

    fn remove(&mut self, _: ElementId) -> CacheResult<()> {
        Ok(())
    }

    fn clear(&mut self) -> CacheResult<()> {
        Ok(())
    }
}

#[test]
#[traced_test]
fn unavailable_cache_is_a_miss() {
    let mut canvas = Canvas::new();
    let group = canvas.insert(Element::container(Rect::new(0.0, 0.0, 400.0, 300.0)));
    let node = canvas.insert(Element::plain(Rect::new(50.0, 80.0, 150.0, 140.0)));

    let mut engine = GroupingEngine::with_store(Settings::default(), OfflineStore);
    let registration = engine
        .register_container(&canvas, group, ContainerOptions::default())
        .unwrap();
    assert!(!registration.restored);
    assert!(logs_contain("treating as miss"));

    engine.tick(&mut canvas);
    assert_eq!(engine.members(group), &[node]);
}

#[test]
#[traced_test]
fn self_containment_is_refused_with_a_warning() {
    let mut canvas = Canvas::new();
    let group = canvas.insert(Element::container(Rect::new(0.0, 0.0, 400.0, 300.0)));
    let mut engine = GroupingEngine::new(Settings::default());
    engine
        .register_container(&canvas, group, ContainerOptions::default())
        .unwrap();

    assert_eq!(engine.add_members(&canvas, group, &[group]), Ok(false));
    assert!(engine.members(group).is_empty());
    assert!(logs_contain("ignoring request to add a container to itself"));
}

#[test]
#[traced_test]
fn membership_changes_are_logged() {
    let mut canvas = Canvas::new();
    let group = canvas.insert(Element::container(Rect::new(0.0, 0.0, 400.0, 300.0)));
    canvas.insert(Element::plain(Rect::new(50.0, 80.0, 150.0, 140.0)));
    let mut engine = GroupingEngine::new(Settings::default());
    engine
        .register_container(&canvas, group, ContainerOptions::default())
        .unwrap();
    engine.tick(&mut canvas);
    assert!(logs_contain("container registered"));
    assert!(logs_contain("membership refreshed"));
}

#[test]
#[traced_test]
fn cyclic_nesting_is_refused_with_a_warning() {
    let id = |n| ElementId::from_raw(n, 1);
    let (a, b, c, x, y) = (id(10), id(11), id(12), id(1), id(2));
    let mut containers = Containers::new();
    for container in [a, b, c] {
        let state = ContainerState::new(false, Predicate::FullyContained, true);
        containers.insert(container, state);
    }
    // a holds c, c holds b: b taking a in would close the loop.
    containers.set_members(a, [x, c]);
    containers.set_members(c, [x, b]);
    containers.set_members(b, [x, y]);

    containers.resolve(a);
    assert!(!containers.members(b).contains(&a));
    assert!(logs_contain("refused hierarchy edit"));
}
