// Copyright 2025 the Corral Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned rectangle helpers on top of [`kurbo::Rect`].
//!
//! All tests here are edge-inclusive: rectangles that share an edge overlap,
//! and a rectangle contains its own boundary.

use kurbo::{Point, Rect};

/// Returns `true` if `a` and `b` overlap or touch.
pub fn overlaps(a: Rect, b: Rect) -> bool {
    let (a, b) = (a.abs(), b.abs());
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}

/// Returns `true` if `inner` lies entirely within `outer`.
pub fn contains_rect(outer: Rect, inner: Rect) -> bool {
    let (outer, inner) = (outer.abs(), inner.abs());
    inner.x0 >= outer.x0 && inner.x1 <= outer.x1 && inner.y0 >= outer.y0 && inner.y1 <= outer.y1
}

/// Returns `true` if `point` lies within `rect`, boundary included.
pub fn contains_point(rect: Rect, point: Point) -> bool {
    let rect = rect.abs();
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

/// Grow `rect` by `amount` on every side.
pub fn expand(rect: Rect, amount: f64) -> Rect {
    rect.inflate(amount, amount)
}

/// Union of every rectangle in `rects`, or `None` if there are none.
pub fn union_all(rects: impl IntoIterator<Item = Rect>) -> Option<Rect> {
    let mut it = rects.into_iter();
    let first = it.next()?;
    Some(it.fold(first, |acc, r| acc.union(r)))
}

/// Returns `true` if every edge of `a` is within `epsilon` of the same edge of `b`.
pub fn approx_eq(a: Rect, b: Rect, epsilon: f64) -> bool {
    (a.x0 - b.x0).abs() <= epsilon
        && (a.y0 - b.y0).abs() <= epsilon
        && (a.x1 - b.x1).abs() <= epsilon
        && (a.y1 - b.y1).abs() <= epsilon
}
