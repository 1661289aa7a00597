//! Geometry helpers for page-relative polygons.
//!
//! Provides:
//! - Geometric types (Point, Rect, Polygon)
//! - Bounding rectangles of alternating x,y coordinate lists
//! - Axis-aligned containment used to attribute words to regions

use serde::{Deserialize, Serialize};

/// Floating-point infinity for bounding box calculations.
pub const INF_F64: f64 = f64::MAX;

/// A 2D point (x, y).
pub type Point = (f64, f64);

/// A rectangle defined by (x0, y0, x1, y1) where (x0, y0) is the minimum
/// corner and (x1, y1) the maximum corner.
pub type Rect = (f64, f64, f64, f64);

/// An outline as an alternating `x0, y0, x1, y1, ...` coordinate list.
///
/// Only the axis-aligned bounding box of the outline is ever used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polygon(pub Vec<f64>);

impl Polygon {
    pub fn new(coords: Vec<f64>) -> Self {
        Self(coords)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn coords(&self) -> &[f64] {
        &self.0
    }

    /// Iterates complete (x, y) pairs; a dangling trailing x is ignored.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.0.chunks_exact(2).map(|p| (p[0], p[1]))
    }

    /// Bounding rectangle, or `None` when the polygon has no points.
    pub fn bbox(&self) -> Option<Rect> {
        if self.0.len() < 2 {
            return None;
        }
        Some(get_bound(self.points()))
    }
}

impl From<Vec<f64>> for Polygon {
    fn from(coords: Vec<f64>) -> Self {
        Self(coords)
    }
}

/// Computes a minimal rectangle that covers all the points.
pub fn get_bound<I: IntoIterator<Item = Point>>(pts: I) -> Rect {
    let mut x0 = INF_F64;
    let mut y0 = INF_F64;
    let mut x1 = -INF_F64;
    let mut y1 = -INF_F64;

    for (x, y) in pts {
        x0 = x0.min(x);
        y0 = y0.min(y);
        x1 = x1.max(x);
        y1 = y1.max(y);
    }

    (x0, y0, x1, y1)
}

/// Returns true if `inner` lies fully within `outer` (edges inclusive).
#[inline]
pub fn rect_contains(outer: Rect, inner: Rect) -> bool {
    outer.0 <= inner.0 && outer.2 >= inner.2 && outer.1 <= inner.1 && outer.3 >= inner.3
}

/// Checks whether a word polygon lies inside a region polygon.
///
/// This compares bounding boxes only, not true polygon containment.
/// Empty polygons never contain and are never contained.
pub fn is_polygon_inside(region: &Polygon, word: &Polygon) -> bool {
    match (region.bbox(), word.bbox()) {
        (Some(outer), Some(inner)) => rect_contains(outer, inner),
        _ => false,
    }
}
