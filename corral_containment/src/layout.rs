// Copyright 2025 the Corral Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fit bounds and size floors.

use corral_canvas::{Canvas, ElementId, geometry};
use kurbo::{Point, Rect, Size};

use crate::config::Settings;

/// Geometry changes at or below this distance are not applied.
pub const FIT_EPSILON: f64 = 0.1;

/// Smallest size a container may be given by hand.
///
/// Content containers reserve the header bar plus a minimum content height;
/// header containers only need the bar.
pub fn min_size(header: bool, settings: &Settings) -> Size {
    let content = if header {
        0.0
    } else {
        settings.min_content_height
    };
    Size::new(settings.min_width, settings.header_height + content)
}

/// Clamp `size` to [`min_size`].
pub fn adjust_min_size(size: Size, header: bool, settings: &Settings) -> Size {
    let floor = min_size(header, settings);
    Size::new(size.width.max(floor.width), size.height.max(floor.height))
}

/// Bounds a container should take to enclose `member_rects`.
///
/// The union of the member rectangles is padded (with the vertical floor on
/// sides that carry controls) and then extended upwards by the header bar.
/// With no members an undersized container falls back to the default size,
/// one dimension at a time, and never shrinks. Header containers keep their
/// width and pin their height to the header bar.
pub fn fit_bounds(
    current: Rect,
    member_rects: impl IntoIterator<Item = Rect>,
    header: bool,
    settings: &Settings,
) -> Rect {
    let current = current.abs();
    if header {
        let width = current.width().max(settings.min_width);
        return Rect::from_origin_size(current.origin(), (width, settings.header_height));
    }

    let Some(content) = geometry::union_all(member_rects) else {
        let mut size = current.size();
        if size.width < settings.min_width {
            size.width = settings.default_width;
        }
        if size.height < settings.min_content_height {
            size.height = settings.default_height;
        }
        return Rect::from_origin_size(current.origin(), size);
    };

    let padded = Rect::new(
        content.x0 - settings.padding_x,
        content.y0 - settings.top_padding(),
        content.x1 + settings.padding_x,
        content.y1 + settings.bottom_padding(),
    );
    Rect::new(
        padded.x0,
        padded.y0 - settings.header_height,
        padded.x1,
        padded.y1,
    )
}

fn differs(a: f64, b: f64) -> bool {
    (a - b).abs() > FIT_EPSILON
}

/// Commit `target` to element `id`, origin and size separately, skipping
/// whichever part is within [`FIT_EPSILON`]. Returns `true` if anything moved.
pub fn apply_fit(canvas: &mut Canvas, id: ElementId, target: Rect) -> bool {
    let Some(current) = canvas.bounds(id) else {
        return false;
    };
    let mut changed = false;
    let (size, want_size) = (current.size(), target.size());
    if differs(size.width, want_size.width) || differs(size.height, want_size.height) {
        canvas.set_size(id, want_size);
        changed = true;
    }
    let want_origin: Point = target.origin();
    if differs(current.x0, want_origin.x) || differs(current.y0, want_origin.y) {
        canvas.set_origin(id, want_origin);
        changed = true;
    }
    changed
}
