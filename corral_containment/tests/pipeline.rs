// Copyright 2025 the Corral Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Registration, deferred passes, and fit convergence across ticks.

use corral_canvas::{Canvas, Element, ElementId};
use corral_containment::{
    ContainerOptions, GroupingEngine, MemoryStore, Predicate, ResizingMode, Settings,
};
use kurbo::{Point, Rect, Vec2};

#[test]
fn restore_from_cache_skips_detection() {
    let mut canvas = Canvas::new();
    let group = canvas.insert(Element::container(Rect::new(0.0, 0.0, 400.0, 300.0)));
    let a = canvas.insert(Element::plain(Rect::new(50.0, 80.0, 150.0, 140.0)));
    let b = canvas.insert(Element::plain(Rect::new(200.0, 80.0, 300.0, 140.0)));

    let mut engine = GroupingEngine::new(Settings::default());
    let first = engine
        .register_container(&canvas, group, ContainerOptions::default())
        .unwrap();
    assert!(!first.restored);
    assert!(first.first_initialization);
    engine.tick(&mut canvas);
    assert_eq!(engine.members(group), &[a, b]);

    // Persist, then reopen the canvas with a fresh engine.
    let json = engine.cache().store().to_json().unwrap();
    let store = MemoryStore::from_json(&json).unwrap();
    let mut reopened = GroupingEngine::with_store(Settings::default(), store);

    // Move b out before registering; a restore must not re-query.
    canvas.translate(b, Vec2::new(1000.0, 0.0));
    let second = reopened
        .register_container(&canvas, group, ContainerOptions::default())
        .unwrap();
    assert!(second.restored);
    assert!(!second.first_initialization);
    assert_eq!(reopened.members(group), &[a, b]);
    assert!(reopened.scheduler().is_empty());
}

#[test]
fn restore_drops_deleted_members() {
    let mut canvas = Canvas::new();
    let group = canvas.insert(Element::container(Rect::new(0.0, 0.0, 400.0, 300.0)));
    let a = canvas.insert(Element::plain(Rect::new(50.0, 80.0, 150.0, 140.0)));
    let b = canvas.insert(Element::plain(Rect::new(200.0, 80.0, 300.0, 140.0)));

    let mut engine = GroupingEngine::new(Settings::default());
    engine
        .register_container(&canvas, group, ContainerOptions::default())
        .unwrap();
    engine.tick(&mut canvas);
    let store = engine.cache().store().clone();

    canvas.remove(a);
    let mut reopened = GroupingEngine::with_store(Settings::default(), store);
    reopened
        .register_container(&canvas, group, ContainerOptions::default())
        .unwrap();
    assert_eq!(reopened.members(group), &[b]);
}

#[test]
fn selection_seeds_new_container() {
    let mut canvas = Canvas::new();
    let a = canvas.insert(Element::plain(Rect::new(50.0, 80.0, 150.0, 140.0)));
    let b = canvas.insert(Element::plain(Rect::new(600.0, 80.0, 700.0, 140.0)));
    canvas.set_selected(a, true);
    canvas.set_selected(b, true);
    let group = canvas.insert(Element::container(Rect::new(0.0, 0.0, 10.0, 10.0)));

    let mut engine = GroupingEngine::new(Settings::default());
    engine
        .register_container(&canvas, group, ContainerOptions::default())
        .unwrap();
    assert_eq!(engine.members(group), &[a, b]);

    let report = engine.tick(&mut canvas);
    assert_eq!(report.resized, [group]);
    // Union of a and b, padded by 30 and topped by the 32-unit header bar.
    assert_eq!(canvas.bounds(group), Some(Rect::new(20.0, 18.0, 730.0, 170.0)));
}

#[test]
fn second_pass_captures_newly_enclosed_element() {
    let mut canvas = Canvas::new();
    let group = canvas.insert(Element::container(Rect::new(0.0, 0.0, 200.0, 160.0)));
    let a = canvas.insert(Element::plain(Rect::new(50.0, 100.0, 100.0, 150.0)));
    let b = canvas.insert(Element::plain(Rect::new(60.0, 162.0, 70.0, 172.0)));

    let mut engine = GroupingEngine::new(Settings::default());
    engine
        .register_container(&canvas, group, ContainerOptions::default())
        .unwrap();

    // Tick 1: detection by origin picks up a only.
    let report = engine.tick(&mut canvas);
    assert_eq!(report.refreshed, [group]);
    assert_eq!(engine.members(group), &[a]);
    assert!(report.resized.is_empty());

    // Nudging a triggers a reactive fit that grows the container over b.
    canvas.translate(a, Vec2::new(1.0, 0.0));
    let report = engine.tick(&mut canvas);
    assert_eq!(report.resized, [group]);
    assert_eq!(canvas.bounds(group), Some(Rect::new(21.0, 38.0, 131.0, 180.0)));
    assert_eq!(engine.members(group), &[a], "fit alone does not re-query");

    // The second pass is two frames out.
    let report = engine.tick(&mut canvas);
    assert!(report.refreshed.is_empty());
    let report = engine.tick(&mut canvas);
    assert_eq!(report.refreshed, [group]);
    assert_eq!(engine.members(group), &[a, b]);
    assert_eq!(canvas.bounds(group), Some(Rect::new(21.0, 38.0, 131.0, 202.0)));

    // Nothing left to do.
    let report = engine.tick(&mut canvas);
    assert!(report.refreshed.is_empty());
    assert!(report.resized.is_empty());
}

#[test]
fn fit_is_idempotent() {
    let mut canvas = Canvas::new();
    let group = canvas.insert(Element::container(Rect::new(0.0, 0.0, 400.0, 300.0)));
    canvas.insert(Element::plain(Rect::new(50.0, 80.0, 150.0, 140.0)));
    let mut engine = GroupingEngine::new(Settings {
        resizing_mode: ResizingMode::Always,
        ..Settings::default()
    });
    engine
        .register_container(&canvas, group, ContainerOptions::default())
        .unwrap();
    engine.compute_membership(&canvas, group).unwrap();

    assert!(engine.resize_to_fit(&mut canvas, group));
    let fitted = canvas.bounds(group).unwrap();
    assert!(!engine.resize_to_fit(&mut canvas, group));
    for _ in 0..3 {
        let report = engine.tick(&mut canvas);
        assert!(report.resized.is_empty());
    }
    assert_eq!(canvas.bounds(group), Some(fitted));
}

#[test]
fn disabled_mode_never_fits() {
    let mut canvas = Canvas::new();
    let group = canvas.insert(Element::container(Rect::new(0.0, 0.0, 400.0, 300.0)));
    let a = canvas.insert(Element::plain(Rect::new(50.0, 80.0, 150.0, 140.0)));
    let mut engine = GroupingEngine::new(Settings {
        resizing_mode: ResizingMode::Disabled,
        ..Settings::default()
    });
    engine
        .register_container(&canvas, group, ContainerOptions::default())
        .unwrap();
    engine.tick(&mut canvas);
    canvas.translate(a, Vec2::new(5.0, 5.0));
    engine.tick(&mut canvas);
    assert_eq!(canvas.bounds(group), Some(Rect::new(0.0, 0.0, 400.0, 300.0)));
}

#[test]
fn nested_groups_resolve_and_fit_around_each_other() {
    let mut canvas = Canvas::new();
    let outer = canvas.insert(Element::container(Rect::new(0.0, 0.0, 600.0, 400.0)));
    let inner = canvas.insert(Element::container(Rect::new(20.0, 40.0, 260.0, 260.0)));
    let a = canvas.insert(Element::plain(Rect::new(60.0, 120.0, 120.0, 160.0)));
    let b = canvas.insert(Element::plain(Rect::new(400.0, 120.0, 460.0, 160.0)));

    let options = ContainerOptions {
        predicate: Some(Predicate::FullyContained),
        ..ContainerOptions::default()
    };
    let mut engine = GroupingEngine::new(Settings {
        resizing_mode: ResizingMode::Disabled,
        ..Settings::default()
    });
    engine
        .register_container(&canvas, outer, options)
        .unwrap();
    engine
        .register_container(&canvas, inner, options)
        .unwrap();
    engine.compute_membership(&canvas, outer).unwrap();
    engine.compute_membership(&canvas, inner).unwrap();

    assert_eq!(engine.members(inner), &[a]);
    assert_eq!(engine.members(outer), &[a, b, inner]);
    let report = engine.tick(&mut canvas);
    assert!(report.hierarchy_changed);

    // Inner fits to a; outer fits to a, b and the fitted inner.
    engine.resize_to_fit(&mut canvas, inner);
    engine.resize_to_fit(&mut canvas, outer);
    let inner_bounds = canvas.bounds(inner).unwrap();
    let outer_bounds = canvas.bounds(outer).unwrap();
    assert_eq!(inner_bounds, Rect::new(30.0, 58.0, 150.0, 190.0));
    assert_eq!(outer_bounds, Rect::new(0.0, -4.0, 490.0, 220.0));
    assert!(engine.is_in_header(&canvas, outer, Point::new(10.0, 0.0)));
}

#[test]
fn removing_container_cleans_up() {
    let mut canvas = Canvas::new();
    let group = canvas.insert(Element::container(Rect::new(0.0, 0.0, 400.0, 300.0)));
    canvas.insert(Element::plain(Rect::new(50.0, 80.0, 150.0, 140.0)));
    let mut engine = GroupingEngine::new(Settings::default());
    engine
        .register_container(&canvas, group, ContainerOptions::default())
        .unwrap();
    assert!(!engine.scheduler().is_empty());

    canvas.remove(group);
    let report = engine.tick(&mut canvas);
    assert!(report.refreshed.is_empty());
    assert!(engine.containers().is_empty());
    assert!(engine.scheduler().is_empty());
    assert!(engine.cache().store().is_empty());
}

#[must_use]
fn nested_scene() -> (Canvas, [ElementId; 4]) {
    let mut canvas = Canvas::new();
    let outer = canvas.insert(Element::container(Rect::new(0.0, 0.0, 600.0, 400.0)));
    let inner = canvas.insert(Element::container(Rect::new(20.0, 40.0, 260.0, 260.0)));
    let a = canvas.insert(Element::plain(Rect::new(60.0, 120.0, 120.0, 160.0)));
    let b = canvas.insert(Element::plain(Rect::new(400.0, 120.0, 460.0, 160.0)));
    (canvas, [outer, inner, a, b])
}

fn fully_contained() -> ContainerOptions {
    ContainerOptions {
        predicate: Some(Predicate::FullyContained),
        ..ContainerOptions::default()
    }
}

#[must_use]
fn static_engine() -> GroupingEngine {
    GroupingEngine::new(Settings {
        resizing_mode: ResizingMode::Disabled,
        ..Settings::default()
    })
}

#[test]
fn removing_shared_member_unnests_equal_containers() {
    let (mut canvas, [outer, inner, a, b]) = nested_scene();
    let mut engine = static_engine();
    engine
        .register_container(&canvas, outer, fully_contained())
        .unwrap();
    engine
        .register_container(&canvas, inner, fully_contained())
        .unwrap();
    engine.compute_membership(&canvas, outer).unwrap();
    engine.compute_membership(&canvas, inner).unwrap();
    assert_eq!(engine.containers().nesting_depth(inner), 1);

    // Equal major sets keep the existing edge.
    canvas.remove(b);
    assert!(engine.on_element_removed(b));
    assert_eq!(engine.members(outer), &[a, inner]);
    assert_eq!(engine.containers().nesting_depth(inner), 1);

    // An emptied child no longer nests.
    canvas.remove(a);
    assert!(engine.on_element_removed(a));
    assert!(engine.members(outer).is_empty());
    assert_eq!(engine.containers().nesting_depth(inner), 0);
    let cached = engine.cache().load(outer, |_| true).unwrap();
    assert!(cached.members.is_empty());
}

#[test]
fn silent_removal_unnests_on_next_tick() {
    let (mut canvas, [outer, inner, a, b]) = nested_scene();
    let mut engine = static_engine();
    engine
        .register_container(&canvas, outer, fully_contained())
        .unwrap();
    engine
        .register_container(&canvas, inner, fully_contained())
        .unwrap();
    engine.compute_membership(&canvas, outer).unwrap();
    engine.compute_membership(&canvas, inner).unwrap();
    engine.tick(&mut canvas);

    canvas.remove(a);
    let report = engine.tick(&mut canvas);
    assert_eq!(report.dropped_members, 2);
    assert!(report.hierarchy_changed);
    assert_eq!(engine.members(outer), &[b]);
    assert_eq!(engine.containers().nesting_depth(inner), 0);
}

#[test]
fn restore_order_does_not_change_header_membership() {
    let mut canvas = Canvas::new();
    let group = canvas.insert(Element::container(Rect::new(0.0, 0.0, 400.0, 300.0)));
    let x = canvas.insert(Element::plain(Rect::new(50.0, 80.0, 150.0, 140.0)));
    let label = canvas.insert(Element::container(Rect::new(200.0, 80.0, 350.0, 112.0)));

    let mut engine = static_engine();
    engine
        .register_container(&canvas, group, fully_contained())
        .unwrap();
    let header = ContainerOptions {
        header: true,
        ..fully_contained()
    };
    engine
        .register_container(&canvas, label, header)
        .unwrap();
    engine.compute_membership(&canvas, group).unwrap();
    assert_eq!(engine.members(group), &[x, label]);

    // Reopen with the header container registering last.
    let store = engine.cache().store().clone();
    let mut reopened = GroupingEngine::with_store(engine.settings().clone(), store);
    reopened
        .register_container(&canvas, group, fully_contained())
        .unwrap();
    assert_eq!(reopened.compute_membership(&canvas, group), Ok(false));
    assert_eq!(reopened.members(group), &[x, label]);

    reopened
        .register_container(&canvas, label, header)
        .unwrap();
    assert_eq!(reopened.compute_membership(&canvas, group), Ok(false));
    assert_eq!(reopened.members(group), &[x, label]);
}

#[test]
fn restore_order_does_not_change_nesting() {
    let (canvas, [outer, inner, a, b]) = nested_scene();
    let mut engine = static_engine();
    engine
        .register_container(&canvas, outer, fully_contained())
        .unwrap();
    engine
        .register_container(&canvas, inner, fully_contained())
        .unwrap();
    engine.compute_membership(&canvas, outer).unwrap();
    engine.compute_membership(&canvas, inner).unwrap();
    assert_eq!(engine.members(outer), &[a, b, inner]);

    // Reopen parent first.
    let store = engine.cache().store().clone();
    let mut reopened = GroupingEngine::with_store(engine.settings().clone(), store);
    let registration = reopened
        .register_container(&canvas, outer, fully_contained())
        .unwrap();
    assert!(registration.restored);
    assert_eq!(reopened.containers().majors(outer).len(), 2);
    assert_eq!(reopened.compute_membership(&canvas, outer), Ok(false));
    assert_eq!(reopened.members(outer), &[a, b, inner]);

    reopened
        .register_container(&canvas, inner, fully_contained())
        .unwrap();
    assert_eq!(reopened.members(inner), &[a]);
    assert_eq!(reopened.members(outer), &[a, b, inner]);
    assert_eq!(reopened.containers().nesting_depth(inner), 1);
}

#[test]
fn empty_container_takes_default_size() {
    let mut canvas = Canvas::new();
    let small = canvas.insert(Element::container(Rect::new(10.0, 20.0, 110.0, 80.0)));
    let large = canvas.insert(Element::container(Rect::new(400.0, 0.0, 700.0, 200.0)));
    let mut engine = GroupingEngine::new(Settings {
        resizing_mode: ResizingMode::Always,
        ..Settings::default()
    });
    engine
        .register_container(&canvas, small, ContainerOptions::default())
        .unwrap();
    engine
        .register_container(&canvas, large, ContainerOptions::default())
        .unwrap();

    let report = engine.tick(&mut canvas);
    assert_eq!(report.resized, [small]);
    assert!(engine.members(small).is_empty());
    assert_eq!(canvas.bounds(small), Some(Rect::new(10.0, 20.0, 235.0, 170.0)));
    assert_eq!(canvas.bounds(large), Some(Rect::new(400.0, 0.0, 700.0, 200.0)));

    // Never shrinks back.
    assert!(!engine.resize_to_fit(&mut canvas, small));
    assert!(!engine.resize_to_fit(&mut canvas, large));
    let report = engine.tick(&mut canvas);
    assert!(report.resized.is_empty());
}
