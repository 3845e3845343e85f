//! Pointer-damped motion: radial clamping of the pointer offset and
//! per-frame exponential smoothing toward it.
//!
//! The damper holds two offsets relative to the boundary center: `target`,
//! written synchronously on every pointer move, and `current`, advanced one
//! smoothing step per animation frame. The host writes `current` to the
//! movable group's transform. Neither offset is ever reset; both live for
//! the page session.

#[cfg(test)]
#[path = "motion_test.rs"]
mod motion_test;

use crate::consts::{MIN_POINTER_DIST, MOVEMENT_MULTIPLIER, SMOOTHING, TARGET_SCALE};
use crate::geom::{Bounds, Point};

/// Smoothed 2D tracking state for the movable group.
#[derive(Debug, Default)]
pub struct Damper {
    target: Point,
    current: Point,
}

impl Damper {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The offset the damper is converging toward.
    #[must_use]
    pub fn target(&self) -> Point {
        self.target
    }

    /// The offset as of the last frame step.
    #[must_use]
    pub fn current(&self) -> Point {
        self.current
    }

    /// Update the target from a pointer position.
    ///
    /// The offset from the boundary center is clamped radially to
    /// `bounds.max_radius`, so motion stays proportionally correct in every
    /// direction up to the boundary, then scaled by the target share and the
    /// movement multiplier.
    pub fn set_pointer(&mut self, pointer: Point, bounds: &Bounds) {
        let dx = pointer.x - bounds.center.x;
        let dy = pointer.y - bounds.center.y;
        let dist = dx.hypot(dy).max(MIN_POINTER_DIST);

        let clamped = dist.min(bounds.max_radius);
        let scale = (clamped / dist) * TARGET_SCALE * MOVEMENT_MULTIPLIER;
        self.target = Point::new(dx * scale, dy * scale);
    }

    /// Set the target directly, bypassing the pointer clamp.
    ///
    /// Used by the pre-reveal focus sequence; the next pointer move replaces it.
    pub fn nudge(&mut self, offset: Point) {
        self.target = offset;
    }

    /// Advance one animation frame: move `current` a smoothing step toward
    /// `target` and return the new value.
    pub fn step(&mut self) -> Point {
        self.current.x += (self.target.x - self.current.x) * SMOOTHING;
        self.current.y += (self.target.y - self.current.y) * SMOOTHING;
        self.current
    }
}
