// Copyright 2025 the Corral Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shift-drag a group's corner over a neighbor with live feedback, then
//! release to commit membership and fit.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p corral_demos --example drag_resize`

use corral_canvas::{Canvas, Element};
use corral_containment::{ContainerOptions, GroupingEngine, PointerInput, Settings};
use corral_event_state::resize::Modifiers;
use kurbo::{Point, Rect, Vec2};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

fn init_logging() {
    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer())
        .init();
}

fn main() {
    init_logging();

    let mut canvas = Canvas::new();
    let group = canvas.insert(Element::container(Rect::new(0.0, 0.0, 240.0, 180.0)));
    let a = canvas.insert(Element::plain(Rect::new(40.0, 70.0, 140.0, 120.0)));
    let b = canvas.insert(Element::plain(Rect::new(320.0, 70.0, 420.0, 120.0)));

    let settings = Settings {
        snap_to_grid: Some(16.0),
        ..Settings::default()
    };
    let mut engine = GroupingEngine::new(settings);
    engine
        .register_container(&canvas, group, ContainerOptions::default())
        .expect("live container");
    engine.tick(&mut canvas);
    println!("before: {:?} holds {:?}", canvas.bounds(group), engine.members(group));

    let start = Point::new(235.0, 175.0);
    let down = PointerInput::primary(start).with_modifiers(Modifiers::SHIFT);
    let anchor = engine.on_pointer_down(&canvas, group, down);
    println!("grabbed {anchor:?}");

    for step in 1..=4 {
        let position = start + Vec2::new(f64::from(step) * 60.0, 10.0);
        let bounds = engine.on_pointer_move(&mut canvas, PointerInput::primary(position));
        println!("drag {step}: {bounds:?}, would capture {:?}", engine.feedback());
        engine.tick(&mut canvas);
    }

    let released = engine.on_pointer_up(&mut canvas, PointerInput::primary(start));
    println!("released {released:?}");
    println!("after: {:?} holds {:?}", canvas.bounds(group), engine.members(group));
    assert!(
        engine.members(group).contains(&a) && engine.members(group).contains(&b),
        "release captures both nodes"
    );
}
