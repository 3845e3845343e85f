//! Layout geometry: points, rectangles, and the travel bounds derived from
//! the focal graphic's live bounding boxes.
//!
//! `Bounds` is recomputed from scratch whenever layout may have changed
//! (startup and every resize). Nothing here is persisted; the tracker only
//! ever holds the most recent measurement.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use crate::consts::{
    ATTRACTOR_INFLUENCE_SCALE, MIN_ATTRACTOR_INFLUENCE_PX, MIN_RADIUS_PX, RADIUS_MARGIN_PX,
    RADIUS_SCALE,
};

/// A point in screen space (CSS pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length of the vector from the origin to this point.
    #[must_use]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }
}

/// An axis-aligned rectangle in screen space, as reported by the layout engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Midpoint of the rectangle.
    #[must_use]
    pub fn center(self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

/// Travel bounds for the movable group, derived from live layout.
///
/// `max_radius` is sized so the group's own bounding box never crosses the
/// outer boundary at any offset. `attractor_influence` scales with the
/// widget's visual size; it is stored for the overlay but not blended into
/// motion.
#[derive(Debug, Clone, Copy)]
pub struct Bounds {
    /// Screen-space center of the outer boundary.
    pub center: Point,
    /// Maximum offset the movable group may travel from center, in pixels.
    pub max_radius: f64,
    /// Influence radius associated with attractors, in pixels.
    pub attractor_influence: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            center: Point::default(),
            max_radius: MIN_RADIUS_PX,
            attractor_influence: MIN_ATTRACTOR_INFLUENCE_PX,
        }
    }
}

impl Bounds {
    /// Compute bounds from the outer boundary and inner movable-group boxes.
    #[must_use]
    pub fn compute(outer: Rect, inner: Rect) -> Self {
        let avail = outer.width.min(outer.height) / 2.0
            - inner.width.max(inner.height) / 2.0
            - RADIUS_MARGIN_PX;
        let max_radius = MIN_RADIUS_PX.max((avail * RADIUS_SCALE).round());

        let influence = MIN_ATTRACTOR_INFLUENCE_PX
            .max((outer.width.max(outer.height) * ATTRACTOR_INFLUENCE_SCALE).round());

        Self { center: outer.center(), max_radius, attractor_influence: influence }
    }
}

/// Holds the current travel bounds and recomputes them on layout change.
#[derive(Debug, Default)]
pub struct GeometryTracker {
    bounds: Bounds,
}

impl GeometryTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently computed bounds.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Recompute bounds from fresh measurements.
    ///
    /// If either source element could not be measured (`None`), the previous
    /// bounds are retained and this call is a no-op.
    pub fn recompute(&mut self, outer: Option<Rect>, inner: Option<Rect>) {
        if let (Some(outer), Some(inner)) = (outer, inner) {
            self.bounds = Bounds::compute(outer, inner);
        }
    }
}
