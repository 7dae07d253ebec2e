// Copyright 2025 the Corral Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two groups, one nested inside the other, kept fitted across frames.
//!
//! Run:
//! - `RUST_LOG=corral_containment=debug cargo run -p corral_demos --example nested_groups`

use corral_canvas::{Canvas, Element};
use corral_containment::{ContainerOptions, GroupingEngine, Settings};
use kurbo::{Rect, Vec2};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

fn init_logging() {
    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .init();
}

fn main() {
    init_logging();

    let mut canvas = Canvas::new();
    let outer = canvas.insert(Element::container(Rect::new(0.0, 0.0, 640.0, 420.0)));
    let inner = canvas.insert(Element::container(Rect::new(20.0, 40.0, 300.0, 300.0)));
    canvas.insert(Element::plain(Rect::new(60.0, 120.0, 180.0, 170.0)));
    let parse = canvas.insert(Element::plain(Rect::new(60.0, 200.0, 180.0, 250.0)));
    canvas.insert(Element::plain(Rect::new(420.0, 150.0, 540.0, 200.0)));
    canvas.insert(Element::pass_through(Rect::new(360.0, 170.0, 372.0, 182.0)));

    let mut engine = GroupingEngine::new(Settings::default());
    for id in [outer, inner] {
        engine
            .register_container(&canvas, id, ContainerOptions::default())
            .expect("live container");
    }

    let report = engine.tick(&mut canvas);
    println!("frame 1: {report:?}");
    println!("outer holds {:?}", engine.members(outer));
    println!("inner holds {:?}", engine.members(inner));
    println!(
        "sort depth: outer {}, inner {}",
        engine.sort_depth(&canvas, outer),
        engine.sort_depth(&canvas, inner)
    );

    // Drag a node; reactive mode refits, then a second pass follows.
    canvas.translate(parse, Vec2::new(0.0, 60.0));
    for frame in 2..=5 {
        let report = engine.tick(&mut canvas);
        println!("frame {frame}: {report:?}");
    }
    println!("inner bounds {:?}", canvas.bounds(inner));
    println!("outer bounds {:?}", canvas.bounds(outer));

    let snapshot = engine
        .cache()
        .store()
        .to_json()
        .expect("snapshot encodes");
    println!("cache snapshot: {snapshot}");
}
