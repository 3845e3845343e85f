#![allow(clippy::float_cmp)]

use super::*;

fn monitor(total: usize) -> LoadMonitor {
    LoadMonitor::new(total, 0.0, MonitorConfig::default())
}

// --- construction ---

#[test]
fn zero_resources_counts_as_one() {
    let mut m = monitor(0);
    assert!(m.resource_settled());
    assert!(m.images_done());
}

#[test]
fn initial_display_has_seed_bump() {
    let mut m = monitor(4);
    assert_eq!(m.displayed_progress(0.0), 6.0);
}

// --- image phase ---

#[test]
fn image_progress_caps_at_85() {
    let mut m = monitor(4);
    for _ in 0..4 {
        m.resource_settled();
    }
    assert_eq!(m.image_progress(), 85.0);
}

#[test]
fn two_of_four_is_half_the_cap() {
    let mut m = monitor(4);
    m.resource_settled();
    m.resource_settled();
    assert_eq!(m.image_progress(), 42.5);
}

#[test]
fn settled_edge_fires_on_last_resource() {
    let mut m = monitor(3);
    assert!(!m.resource_settled());
    assert!(!m.resource_settled());
    assert!(m.resource_settled());
}

#[test]
fn extra_settles_saturate() {
    let mut m = monitor(2);
    m.resource_settled();
    m.resource_settled();
    assert!(!m.resource_settled());
    assert_eq!(m.loaded(), 2);
    assert_eq!(m.image_progress(), 85.0);
}

// --- gentle floor ---

#[test]
fn gentle_floor_starts_at_cap() {
    let m = monitor(4);
    assert_eq!(m.gentle_floor(0.0), 85.0);
}

#[test]
fn gentle_floor_creeps_to_95() {
    let m = monitor(4);
    assert_eq!(m.gentle_floor(6_000.0), 90.0);
    assert_eq!(m.gentle_floor(12_000.0), 95.0);
    // Clamped past the deadline.
    assert_eq!(m.gentle_floor(60_000.0), 95.0);
}

#[test]
fn gentle_floor_ignores_negative_elapsed() {
    let m = LoadMonitor::new(4, 1_000.0, MonitorConfig::default());
    assert_eq!(m.gentle_floor(500.0), 85.0);
}

// --- displayed progress ---

#[test]
fn displayed_is_min_of_image_and_gentle() {
    let mut m = monitor(4);
    m.resource_settled();
    m.resource_settled();
    // image 42.5, gentle 90 at t=6s: image wins the min.
    assert_eq!(m.displayed_progress(6_000.0), 42.5);
}

#[test]
fn displayed_tracks_gentle_once_images_done() {
    let mut m = monitor(2);
    m.resource_settled();
    m.resource_settled();
    // image 85, gentle 90 at t=6s: pinned at the image cap.
    assert_eq!(m.displayed_progress(6_000.0), 85.0);
}

#[test]
fn displayed_never_decreases() {
    let mut m = monitor(4);
    m.resource_settled();
    m.resource_settled();
    let high = m.displayed_progress(6_000.0);
    // A later tick with an earlier clock must not regress the bar.
    assert!(m.displayed_progress(0.0) >= high);
}

#[test]
fn displayed_is_100_after_completion() {
    let mut m = monitor(4);
    m.try_complete(CompletionPath::Fallback);
    assert_eq!(m.displayed_progress(0.0), 100.0);
}

// --- completion race ---

#[test]
fn first_completion_wins() {
    let mut m = monitor(4);
    assert!(m.try_complete(CompletionPath::Fallback));
    assert!(!m.try_complete(CompletionPath::Resources));
    assert!(!m.try_complete(CompletionPath::Fallback));
}

#[test]
fn settles_after_completion_are_noops() {
    let mut m = monitor(4);
    m.try_complete(CompletionPath::Fallback);
    assert!(!m.resource_settled());
    assert_eq!(m.loaded(), 0);
    assert_eq!(m.displayed_progress(99_999.0), 100.0);
}

#[test]
fn settle_delays_differ_per_path() {
    let m = monitor(1);
    assert_eq!(m.settle_delay_ms(CompletionPath::Resources), 650);
    assert_eq!(m.settle_delay_ms(CompletionPath::Fallback), 700);
}

// --- timed scenarios (simulated clock; the host owns real timers) ---

#[test]
fn fallback_wins_when_resources_arrive_late() {
    // Resources at t=13s against a 12s deadline: the fallback timer fires
    // first, finish lands at 12s + 700ms settle, and the late resource path
    // is refused.
    let mut m = monitor(3);

    // t=12_000: fallback timer.
    assert!(m.try_complete(CompletionPath::Fallback));
    let finish_at = 12_000.0 + f64::from(m.settle_delay_ms(CompletionPath::Fallback));
    assert_eq!(finish_at, 12_700.0);

    // t=13_000: all resources finally settle.
    assert!(!m.resource_settled());
    assert!(!m.try_complete(CompletionPath::Resources));
    assert!(m.completed());
}

#[test]
fn end_to_end_hung_resource_with_short_deadline() {
    // 3 images, 2 settle immediately, 1 hangs; 1000ms test deadline.
    let config = MonitorConfig { fallback_deadline_ms: 1_000.0, ..MonitorConfig::default() };
    let mut m = LoadMonitor::new(3, 0.0, config);

    assert!(!m.resource_settled());
    assert!(!m.resource_settled());
    assert!(!m.images_done());

    // Before the deadline nothing may complete; the bar sits below the cap.
    let shown = m.displayed_progress(900.0);
    assert!(shown < 100.0);
    assert!(!m.completed());

    // t=1000: deadline fires, finish scheduled inside the 1000..=1700 window.
    assert!(m.try_complete(CompletionPath::Fallback));
    let finish_at = 1_000.0 + f64::from(m.settle_delay_ms(CompletionPath::Fallback));
    assert!((1_000.0..=1_700.0).contains(&finish_at));
    assert_eq!(m.displayed_progress(1_000.0), 100.0);

    // The hung image settling later is a no-op.
    assert!(!m.resource_settled());
}

#[test]
fn resource_path_wins_when_everything_is_fast() {
    let mut m = monitor(2);
    m.resource_settled();
    assert!(m.resource_settled());
    // Fonts ready; resource path claims completion first.
    assert!(m.try_complete(CompletionPath::Resources));
    let finish_at = 100.0 + f64::from(m.settle_delay_ms(CompletionPath::Resources));
    assert_eq!(finish_at, 750.0);
    // The (cancelled) fallback can no longer fire.
    assert!(!m.try_complete(CompletionPath::Fallback));
}
