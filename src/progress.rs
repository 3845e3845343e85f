//! Load-progress monitoring: converts resource completion events and wall-clock
//! time into one monotonic displayed percentage and a single completion edge.
//!
//! The monitor itself is a pure state machine fed timestamps by the host; the
//! host owns the actual timers and the race between the two completion paths.
//! The core resilience contract is that the monitor can never get stuck: the
//! fallback path guarantees forward progress even if every resource signal
//! hangs forever, and load errors count the same as successes.

#[cfg(test)]
#[path = "progress_test.rs"]
mod progress_test;

use crate::consts::{
    FALLBACK_DEADLINE_MS, GENTLE_RANGE_PCT, IMAGE_PHASE_CAP_PCT, INITIAL_PROGRESS_PCT,
    PROGRESS_TICK_MS, SETTLE_AFTER_FALLBACK_MS, SETTLE_AFTER_LOAD_MS,
};

/// Which completion path won the race.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionPath {
    /// All resources settled and fonts became ready.
    Resources,
    /// The wall-clock deadline elapsed first.
    Fallback,
}

/// Timing knobs for the monitor. Production values come from [`crate::consts`];
/// tests shrink them.
#[derive(Debug, Clone, Copy)]
pub struct MonitorConfig {
    /// Deadline after which the fallback path fires, in milliseconds.
    pub fallback_deadline_ms: f64,
    /// Period of the displayed-progress tick, in milliseconds.
    pub tick_ms: u32,
    /// Visual-settle delay for the resource path, in milliseconds.
    pub settle_after_load_ms: u32,
    /// Visual-settle delay for the fallback path, in milliseconds.
    pub settle_after_fallback_ms: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            fallback_deadline_ms: FALLBACK_DEADLINE_MS,
            tick_ms: PROGRESS_TICK_MS,
            settle_after_load_ms: SETTLE_AFTER_LOAD_MS,
            settle_after_fallback_ms: SETTLE_AFTER_FALLBACK_MS,
        }
    }
}

/// Tracks resource completion against wall-clock time.
#[derive(Debug)]
pub struct LoadMonitor {
    total: usize,
    loaded: usize,
    displayed: f64,
    completed: bool,
    started_at_ms: f64,
    config: MonitorConfig,
}

impl LoadMonitor {
    /// Create a monitor for `total` resources starting at `started_at_ms`.
    ///
    /// A zero-resource set is treated as one so the image phase still
    /// contributes a well-defined fraction.
    #[must_use]
    pub fn new(total: usize, started_at_ms: f64, config: MonitorConfig) -> Self {
        Self {
            total: total.max(1),
            loaded: 0,
            displayed: INITIAL_PROGRESS_PCT,
            completed: false,
            started_at_ms,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> MonitorConfig {
        self.config
    }

    #[must_use]
    pub fn loaded(&self) -> usize {
        self.loaded
    }

    #[must_use]
    pub fn completed(&self) -> bool {
        self.completed
    }

    /// Record one resource settling (load or error; both count).
    ///
    /// Returns `true` on the edge where the last outstanding resource
    /// settles, which is the host's cue to resolve the resource path. Events
    /// after completion are no-ops.
    pub fn resource_settled(&mut self) -> bool {
        if self.completed || self.loaded >= self.total {
            return false;
        }
        self.loaded += 1;
        self.loaded >= self.total
    }

    /// Whether every tracked resource has settled.
    #[must_use]
    pub fn images_done(&self) -> bool {
        self.loaded >= self.total
    }

    /// Image-phase contribution, capped at [`IMAGE_PHASE_CAP_PCT`].
    #[must_use]
    pub fn image_progress(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let fraction = self.loaded as f64 / self.total as f64;
        fraction * IMAGE_PHASE_CAP_PCT
    }

    /// Time-based floor creeping from the image cap toward 95% over the
    /// fallback window, preventing a visually stalled bar.
    #[must_use]
    pub fn gentle_floor(&self, now_ms: f64) -> f64 {
        let elapsed = ((now_ms - self.started_at_ms) / self.config.fallback_deadline_ms).clamp(0.0, 1.0);
        IMAGE_PHASE_CAP_PCT + (elapsed * GENTLE_RANGE_PCT).round()
    }

    /// The percentage to display right now.
    ///
    /// Monotonically non-decreasing: seeded with the initial bump, raised to
    /// `min(image_progress, gentle_floor)` on every tick, pinned at 100 after
    /// completion.
    pub fn displayed_progress(&mut self, now_ms: f64) -> f64 {
        if self.completed {
            self.displayed = 100.0;
            return self.displayed;
        }
        let tick = self.image_progress().min(self.gentle_floor(now_ms));
        self.displayed = self.displayed.max(tick);
        self.displayed
    }

    /// Claim completion for `path`. The first caller wins; every later call
    /// returns `false` regardless of path.
    pub fn try_complete(&mut self, _path: CompletionPath) -> bool {
        if self.completed {
            return false;
        }
        self.completed = true;
        self.displayed = 100.0;
        true
    }

    /// Visual-settle delay between the winning path and the reveal.
    #[must_use]
    pub fn settle_delay_ms(&self, path: CompletionPath) -> u32 {
        match path {
            CompletionPath::Resources => self.config.settle_after_load_ms,
            CompletionPath::Fallback => self.config.settle_after_fallback_ms,
        }
    }
}
