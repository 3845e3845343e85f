//! Top-level intro engine: a single controller owning all mutable state.
//!
//! `IntroCore` contains no browser types and is exercised directly by native
//! tests. The host layer feeds it pointer, layout, keyboard, resource, and
//! clock inputs and applies its outputs (a per-frame transform, a progress
//! percentage, an optional debug scene, and the reveal plan) to the DOM.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use crate::attractor::{AttractorIndex, Candidate};
use crate::consts::DEBUG_TOGGLE_KEY;
use crate::geom::{GeometryTracker, Point, Rect};
use crate::motion::Damper;
use crate::progress::{CompletionPath, LoadMonitor, MonitorConfig};
use crate::reveal::{AnimationDriver, Keyframe, Sequencer};

/// Everything the host needs to draw one debug-overlay frame.
///
/// The overlay is rebuilt from scratch each frame; the element count is
/// small enough that diffing would buy nothing.
#[derive(Debug, Clone)]
pub struct DebugScene {
    /// One marker per attractor, in screen space.
    pub attractors: Vec<Point>,
    /// Current focal position: boundary center plus the damped offset.
    pub focus: Point,
    /// Center of the travel boundary circle.
    pub center: Point,
    /// Radius of the travel boundary circle.
    pub radius: f64,
}

/// Output of one animation frame.
#[derive(Debug, Clone)]
pub struct FrameUpdate {
    /// Offset to write to the movable group's transform.
    pub translate: Point,
    /// Present only while the debug overlay is enabled.
    pub debug: Option<DebugScene>,
}

/// Core engine state, constructed once at startup and passed by reference —
/// never a process-wide singleton.
pub struct IntroCore {
    pub geometry: GeometryTracker,
    pub damper: Damper,
    pub attractors: AttractorIndex,
    pub monitor: LoadMonitor,
    pub sequencer: Sequencer,
    debug_enabled: bool,
}

impl IntroCore {
    /// Create the engine for `total_resources` tracked resources.
    #[must_use]
    pub fn new(total_resources: usize, now_ms: f64, config: MonitorConfig) -> Self {
        Self {
            geometry: GeometryTracker::new(),
            damper: Damper::new(),
            attractors: AttractorIndex::new(),
            monitor: LoadMonitor::new(total_resources, now_ms, config),
            sequencer: Sequencer::new(),
            debug_enabled: false,
        }
    }

    // --- Layout inputs ---

    /// Recompute travel bounds from fresh measurements (startup and resize).
    pub fn on_resize(&mut self, outer: Option<Rect>, inner: Option<Rect>) {
        self.geometry.recompute(outer, inner);
    }

    /// Rebuild the attractor set from a document scan (resize and scroll).
    pub fn set_candidates<I>(&mut self, candidates: I)
    where
        I: IntoIterator<Item = Candidate>,
    {
        self.attractors.rebuild(candidates);
    }

    // --- Pointer / keyboard inputs ---

    /// Retarget the damper from a pointer position. O(1) per event.
    pub fn on_pointer_move(&mut self, pointer: Point) {
        let bounds = self.geometry.bounds();
        self.damper.set_pointer(pointer, &bounds);
    }

    /// Handle a key press. Returns the new overlay state when the key was the
    /// debug toggle, `None` otherwise.
    pub fn on_key(&mut self, key: &str) -> Option<bool> {
        if key == DEBUG_TOGGLE_KEY {
            self.debug_enabled = !self.debug_enabled;
            return Some(self.debug_enabled);
        }
        None
    }

    #[must_use]
    pub fn debug_enabled(&self) -> bool {
        self.debug_enabled
    }

    // --- Per-frame ---

    /// Advance one animation frame.
    pub fn on_frame(&mut self) -> FrameUpdate {
        let translate = self.damper.step();
        let debug = self.debug_enabled.then(|| {
            let bounds = self.geometry.bounds();
            DebugScene {
                attractors: self.attractors.attractors().iter().map(|a| a.position).collect(),
                focus: Point::new(bounds.center.x + translate.x, bounds.center.y + translate.y),
                center: bounds.center,
                radius: bounds.max_radius,
            }
        });
        FrameUpdate { translate, debug }
    }

    // --- Load / reveal plumbing ---

    /// Record one resource settling; `true` on the all-settled edge.
    pub fn resource_settled(&mut self) -> bool {
        self.monitor.resource_settled()
    }

    /// The percentage to display right now.
    pub fn displayed_progress(&mut self, now_ms: f64) -> f64 {
        self.monitor.displayed_progress(now_ms)
    }

    /// Claim completion for `path` and start the reveal.
    ///
    /// Returns the reveal plan only for the first successful claim; both the
    /// monitor's completion flag and the sequencer's state guard it, so the
    /// plan is handed out at most once no matter how timers interleave.
    pub fn complete(
        &mut self,
        path: CompletionPath,
        driver: &dyn AnimationDriver,
    ) -> Option<Vec<Keyframe>> {
        if !self.monitor.try_complete(path) {
            return None;
        }
        self.sequencer.begin(driver)
    }
}
