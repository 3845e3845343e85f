//! Shared tuning constants for the intro engine.
//!
//! Every value here is a behavior knob: changing one retunes the feel of the
//! tracking motion or the pacing of the load/reveal sequence without touching
//! any control flow.

// ── Tracking motion ─────────────────────────────────────────────

/// Scale applied to the clamped pointer offset when deriving the motion target.
pub const MOVEMENT_MULTIPLIER: f64 = 1.0;

/// Per-frame exponential smoothing factor (higher = snappier response).
pub const SMOOTHING: f64 = 0.18;

/// Share of the clamped offset actually used as the target.
pub const TARGET_SCALE: f64 = 0.95;

/// Minimum pointer distance used in the clamp ratio, guarding division by zero.
pub const MIN_POINTER_DIST: f64 = 1.0;

// ── Travel bounds ───────────────────────────────────────────────

/// Share of the available radius the movable group may occupy.
pub const RADIUS_SCALE: f64 = 0.95;

/// Safety margin in pixels subtracted from the available radius.
pub const RADIUS_MARGIN_PX: f64 = 1.0;

/// Floor for the computed travel radius, avoiding a degenerate zero-radius state.
pub const MIN_RADIUS_PX: f64 = 6.0;

/// Floor for the attractor influence radius in pixels.
pub const MIN_ATTRACTOR_INFLUENCE_PX: f64 = 180.0;

/// Attractor influence radius as a multiple of the widget's larger dimension.
pub const ATTRACTOR_INFLUENCE_SCALE: f64 = 1.2;

// ── Attractor marker color ──────────────────────────────────────

/// Reference fill color marking a page element as an attractor.
pub const ATTRACTOR_FILL_HEX: &str = "#5E9CEA";

/// Lowercase form accepted in computed styles.
pub const ATTRACTOR_FILL_HEX_LOWER: &str = "#5e9cea";

/// Prefix of the reference color's `rgb(...)` serialization.
pub const ATTRACTOR_FILL_RGB_PREFIX: &str = "rgb(94";

// ── Load progress ───────────────────────────────────────────────

/// Portion of the bar driven by image completion (the rest is fonts + settle).
pub const IMAGE_PHASE_CAP_PCT: f64 = 85.0;

/// Extra percentage the gentle floor creeps over the fallback window (to 95%).
pub const GENTLE_RANGE_PCT: f64 = 10.0;

/// Initial bump so the bar is never empty on first paint.
pub const INITIAL_PROGRESS_PCT: f64 = 6.0;

/// Period of the displayed-progress tick in milliseconds.
pub const PROGRESS_TICK_MS: u32 = 150;

/// Wall-clock deadline after which the reveal is forced, in milliseconds.
pub const FALLBACK_DEADLINE_MS: f64 = 12_000.0;

/// Visual-settle delay after the resource path completes, in milliseconds.
pub const SETTLE_AFTER_LOAD_MS: u32 = 650;

/// Visual-settle delay after the fallback path fires, in milliseconds.
pub const SETTLE_AFTER_FALLBACK_MS: u32 = 700;

// ── Debug overlay ───────────────────────────────────────────────

/// Keyboard key that toggles the debug overlay.
pub const DEBUG_TOGGLE_KEY: &str = "d";
