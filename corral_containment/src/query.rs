// Copyright 2025 the Corral Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spatial containment queries.
//!
//! [`query`] is a pure function over a container's content rectangle and a
//! list of [`Candidate`]s. It has no side effects and is cheap enough to run
//! on every pointer-move of a drag.

use alloc::vec::Vec;
use corral_canvas::{ElementId, ElementKind, geometry};
use kurbo::Rect;
use serde::{Deserialize, Serialize};

/// Slack added to every side of the query area so elements resting exactly on
/// the border do not flicker in and out.
pub const QUERY_EPSILON: f64 = 1.0;

/// How a candidate must relate to the query area to count as inside.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Predicate {
    /// The candidate's top-left corner lies in the area.
    PointInRect,
    /// The candidate's rectangle overlaps the area.
    Intersect,
    /// The candidate's rectangle lies entirely in the area.
    #[default]
    FullyContained,
}

impl Predicate {
    /// Test `rect` against `area`. No epsilon is applied here.
    pub fn test(self, area: Rect, rect: Rect) -> bool {
        match self {
            Self::PointInRect => geometry::contains_point(area, rect.origin()),
            Self::Intersect => geometry::overlaps(area, rect),
            Self::FullyContained => geometry::contains_rect(area, rect),
        }
    }
}

/// Kind of a query candidate, from the grouping point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// An ordinary node.
    Plain,
    /// A routing point.
    PassThrough,
    /// A container flagged as a header: an atomic label with no content region.
    HeaderContainer,
    /// A container with a content region.
    Container,
}

impl MemberKind {
    /// Classify a canvas element. `header` only matters for containers.
    pub fn classify(kind: ElementKind, header: bool) -> Self {
        match kind {
            ElementKind::Plain => Self::Plain,
            ElementKind::PassThrough => Self::PassThrough,
            ElementKind::Container if header => Self::HeaderContainer,
            ElementKind::Container => Self::Container,
        }
    }

    /// Returns `true` if members of this kind count toward a container's
    /// content bounds and subset comparisons.
    ///
    /// Content containers are the exception: they nest through the hierarchy
    /// resolver instead.
    pub fn is_major(self) -> bool {
        !matches!(self, Self::Container)
    }

    /// Returns `true` for routing points.
    pub fn is_pass_through(self) -> bool {
        matches!(self, Self::PassThrough)
    }
}

/// One element offered to [`query`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    /// Element id.
    pub id: ElementId,
    /// Canvas-space bounds.
    pub rect: Rect,
    /// Grouping kind.
    pub kind: MemberKind,
    /// `false` if the element has been deleted.
    pub live: bool,
}

impl Candidate {
    /// A live candidate.
    pub fn new(id: ElementId, rect: Rect, kind: MemberKind) -> Self {
        Self {
            id,
            rect,
            kind,
            live: true,
        }
    }
}

/// Exclusions applied by [`query`] on top of the predicate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QueryFilter {
    /// The querying container, which never matches itself.
    pub container: Option<ElementId>,
    /// Skip pass-through candidates.
    pub exclude_pass_through: bool,
}

impl QueryFilter {
    /// Create a filter that excludes nothing beyond the built-in rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Exclude the querying container itself.
    pub fn container(mut self, id: ElementId) -> Self {
        self.container = Some(id);
        self
    }

    /// Exclude pass-through candidates when `exclude` is set.
    pub fn exclude_pass_through(mut self, exclude: bool) -> Self {
        self.exclude_pass_through = exclude;
        self
    }

    /// Returns `true` if `candidate` may be tested at all.
    pub fn admits(&self, candidate: &Candidate) -> bool {
        candidate.live
            && Some(candidate.id) != self.container
            && candidate.kind != MemberKind::Container
            && !(self.exclude_pass_through && candidate.kind.is_pass_through())
    }
}

/// Content region of a container: its bounds minus the header bar.
pub fn content_rect(bounds: Rect, header_height: f64) -> Rect {
    let bounds = bounds.abs();
    let top = (bounds.y0 + header_height).min(bounds.y1);
    Rect::new(bounds.x0, top, bounds.x1, bounds.y1)
}

/// Ids of the candidates inside `area` under `predicate`, in input order.
///
/// `area` is grown by [`QUERY_EPSILON`] before testing. Content containers,
/// deleted elements and the querying container are never returned; pass-through
/// elements are dropped when the filter says so.
pub fn query<I>(
    area: Rect,
    candidates: I,
    predicate: Predicate,
    filter: QueryFilter,
) -> Vec<ElementId>
where
    I: IntoIterator<Item = Candidate>,
{
    let area = geometry::expand(area.abs(), QUERY_EPSILON);
    candidates
        .into_iter()
        .filter(|c| filter.admits(c) && predicate.test(area, c.rect))
        .map(|c| c.id)
        .collect()
}
