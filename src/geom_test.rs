#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

// --- Point ---

#[test]
fn point_new() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
}

#[test]
fn point_length_pythagorean() {
    assert!(approx_eq(Point::new(3.0, 4.0).length(), 5.0));
}

#[test]
fn point_length_zero() {
    assert!(approx_eq(Point::default().length(), 0.0));
}

#[test]
fn point_length_negative_components() {
    assert!(approx_eq(Point::new(-3.0, -4.0).length(), 5.0));
}

// --- Rect ---

#[test]
fn rect_center() {
    let r = Rect::new(10.0, 20.0, 100.0, 50.0);
    assert_eq!(r.center(), Point::new(60.0, 45.0));
}

#[test]
fn rect_center_at_origin() {
    let r = Rect::new(-50.0, -50.0, 100.0, 100.0);
    assert_eq!(r.center(), Point::new(0.0, 0.0));
}

// --- Bounds::compute ---

#[test]
fn bounds_worked_example() {
    // outer 200x200, inner 40x40: avail = 100 - 20 - 1 = 79, radius = round(79 * 0.95) = 75.
    let outer = Rect::new(0.0, 0.0, 200.0, 200.0);
    let inner = Rect::new(80.0, 80.0, 40.0, 40.0);
    let b = Bounds::compute(outer, inner);
    assert_eq!(b.max_radius, 75.0);
}

#[test]
fn bounds_center_is_outer_midpoint() {
    let outer = Rect::new(100.0, 50.0, 200.0, 200.0);
    let inner = Rect::new(180.0, 130.0, 40.0, 40.0);
    let b = Bounds::compute(outer, inner);
    assert_eq!(b.center, Point::new(200.0, 150.0));
}

#[test]
fn bounds_uses_smaller_outer_dimension() {
    // Wide outer box: only the 200px height constrains travel.
    let outer = Rect::new(0.0, 0.0, 600.0, 200.0);
    let inner = Rect::new(0.0, 0.0, 40.0, 40.0);
    let b = Bounds::compute(outer, inner);
    assert_eq!(b.max_radius, 75.0);
}

#[test]
fn bounds_uses_larger_inner_dimension() {
    // Tall inner group: its 60px height is the constraining half-extent.
    let outer = Rect::new(0.0, 0.0, 200.0, 200.0);
    let inner = Rect::new(0.0, 0.0, 40.0, 60.0);
    let b = Bounds::compute(outer, inner);
    // avail = 100 - 30 - 1 = 69, round(69 * 0.95) = 66.
    assert_eq!(b.max_radius, 66.0);
}

#[test]
fn bounds_radius_floor() {
    // Inner group larger than the outer box: radius clamps to the floor, never negative.
    let outer = Rect::new(0.0, 0.0, 40.0, 40.0);
    let inner = Rect::new(0.0, 0.0, 60.0, 60.0);
    let b = Bounds::compute(outer, inner);
    assert_eq!(b.max_radius, 6.0);
}

#[test]
fn attractor_influence_scales_with_size() {
    let outer = Rect::new(0.0, 0.0, 400.0, 200.0);
    let inner = Rect::new(0.0, 0.0, 40.0, 40.0);
    let b = Bounds::compute(outer, inner);
    // round(400 * 1.2) = 480.
    assert_eq!(b.attractor_influence, 480.0);
}

#[test]
fn attractor_influence_floor() {
    let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
    let inner = Rect::new(0.0, 0.0, 20.0, 20.0);
    let b = Bounds::compute(outer, inner);
    // round(100 * 1.2) = 120 < 180 floor.
    assert_eq!(b.attractor_influence, 180.0);
}

// --- GeometryTracker ---

#[test]
fn tracker_starts_with_default_bounds() {
    let t = GeometryTracker::new();
    assert_eq!(t.bounds().max_radius, 6.0);
    assert_eq!(t.bounds().center, Point::new(0.0, 0.0));
}

#[test]
fn tracker_recompute_updates_bounds() {
    let mut t = GeometryTracker::new();
    t.recompute(
        Some(Rect::new(0.0, 0.0, 200.0, 200.0)),
        Some(Rect::new(80.0, 80.0, 40.0, 40.0)),
    );
    assert_eq!(t.bounds().max_radius, 75.0);
}

#[test]
fn tracker_missing_outer_retains_previous() {
    let mut t = GeometryTracker::new();
    t.recompute(
        Some(Rect::new(0.0, 0.0, 200.0, 200.0)),
        Some(Rect::new(80.0, 80.0, 40.0, 40.0)),
    );
    t.recompute(None, Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
    assert_eq!(t.bounds().max_radius, 75.0);
}

#[test]
fn tracker_missing_inner_retains_previous() {
    let mut t = GeometryTracker::new();
    t.recompute(
        Some(Rect::new(0.0, 0.0, 200.0, 200.0)),
        Some(Rect::new(80.0, 80.0, 40.0, 40.0)),
    );
    t.recompute(Some(Rect::new(0.0, 0.0, 999.0, 999.0)), None);
    assert_eq!(t.bounds().max_radius, 75.0);
}
