#![allow(clippy::float_cmp)]

use super::*;
use crate::geom::{Bounds, Point, Rect};

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn test_bounds() -> Bounds {
    // outer 200x200 at origin, inner 40x40 -> center (100,100), radius 75.
    Bounds::compute(
        Rect::new(0.0, 0.0, 200.0, 200.0),
        Rect::new(80.0, 80.0, 40.0, 40.0),
    )
}

// --- set_pointer: radial clamp ---

#[test]
fn target_inside_radius_is_proportional() {
    let bounds = test_bounds();
    let mut d = Damper::new();
    // 30px right of center, well inside the 75px radius.
    d.set_pointer(Point::new(130.0, 100.0), &bounds);
    assert!(approx_eq(d.target().x, 30.0 * 0.95));
    assert!(approx_eq(d.target().y, 0.0));
}

#[test]
fn target_outside_radius_clamps_to_boundary() {
    let bounds = test_bounds();
    let mut d = Damper::new();
    // 1000px right of center: clamped to the radius, then scaled.
    d.set_pointer(Point::new(1100.0, 100.0), &bounds);
    assert!(approx_eq(d.target().x, 75.0 * 0.95));
    assert!(approx_eq(d.target().y, 0.0));
}

#[test]
fn radial_clamp_holds_in_every_direction() {
    let bounds = test_bounds();
    let limit = bounds.max_radius * 0.95 + EPSILON;
    let mut d = Damper::new();
    for i in 0..64 {
        let angle = f64::from(i) * std::f64::consts::TAU / 64.0;
        let far = Point::new(
            bounds.center.x + angle.cos() * 5000.0,
            bounds.center.y + angle.sin() * 5000.0,
        );
        d.set_pointer(far, &bounds);
        assert!(
            d.target().length() <= limit,
            "clamp exceeded at angle {angle}: |target| = {}",
            d.target().length()
        );
    }
}

#[test]
fn clamp_preserves_direction() {
    let bounds = test_bounds();
    let mut d = Damper::new();
    // Diagonal pointer far outside: target must stay on the same ray.
    d.set_pointer(Point::new(bounds.center.x + 300.0, bounds.center.y + 400.0), &bounds);
    let t = d.target();
    // 3-4-5 triangle: direction ratio must survive the clamp.
    assert!(approx_eq(t.y / t.x, 400.0 / 300.0));
    assert!(approx_eq(t.length(), 75.0 * 0.95));
}

#[test]
fn zero_displacement_is_safe() {
    let bounds = test_bounds();
    let mut d = Damper::new();
    // Pointer exactly on center: dist floors to 1, target collapses to zero.
    d.set_pointer(bounds.center, &bounds);
    assert!(approx_eq(d.target().x, 0.0));
    assert!(approx_eq(d.target().y, 0.0));
    assert!(d.target().x.is_finite());
    assert!(d.target().y.is_finite());
}

// --- nudge ---

#[test]
fn nudge_sets_target_directly() {
    let mut d = Damper::new();
    d.nudge(Point::new(-12.0, -6.0));
    assert_eq!(d.target(), Point::new(-12.0, -6.0));
}

#[test]
fn pointer_move_overrides_nudge() {
    let bounds = test_bounds();
    let mut d = Damper::new();
    d.nudge(Point::new(-12.0, -6.0));
    d.set_pointer(Point::new(130.0, 100.0), &bounds);
    assert!(approx_eq(d.target().x, 30.0 * 0.95));
}

// --- step: smoothing ---

#[test]
fn step_moves_fraction_toward_target() {
    let mut d = Damper::new();
    d.nudge(Point::new(100.0, 0.0));
    let p = d.step();
    assert!(approx_eq(p.x, 18.0));
    assert!(approx_eq(p.y, 0.0));
}

#[test]
fn convergence_within_25_frames() {
    let mut d = Damper::new();
    d.nudge(Point::new(100.0, -40.0));
    for _ in 0..25 {
        d.step();
    }
    let t = d.target();
    let c = d.current();
    let err = Point::new(t.x - c.x, t.y - c.y).length();
    assert!(err <= t.length() * 0.01, "residual error {err} above 1%");
}

#[test]
fn convergence_is_monotonic() {
    let mut d = Damper::new();
    d.nudge(Point::new(100.0, 0.0));
    let mut last_err = f64::INFINITY;
    for _ in 0..60 {
        let c = d.step();
        let err = (100.0 - c.x).abs();
        assert!(err <= last_err, "error increased: {err} > {last_err}");
        last_err = err;
    }
}

#[test]
fn current_never_overshoots_constant_target() {
    let mut d = Damper::new();
    d.nudge(Point::new(50.0, 0.0));
    for _ in 0..200 {
        let c = d.step();
        assert!(c.x <= 50.0 + EPSILON);
    }
}

#[test]
fn step_from_rest_stays_at_rest() {
    let mut d = Damper::new();
    let c = d.step();
    assert_eq!(c, Point::new(0.0, 0.0));
}
