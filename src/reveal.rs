//! Reveal choreography: the ordered sequence of visual transitions from the
//! loading state to the page content.
//!
//! The sequencer owns a three-state lifecycle (`Idle → InProgress → Done`,
//! never back) and hands the host a timed plan of stage operations. Timing
//! comes from an [`AnimationDriver`] chosen once at startup: the timeline
//! driver overlaps stage tails the way a coordinated timeline would, the
//! fallback driver runs the same stages as strictly sequential delayed state
//! changes over a slightly longer wall clock. The end state is identical
//! either way.

#[cfg(test)]
#[path = "reveal_test.rs"]
mod reveal_test;

use crate::geom::Point;

/// Zoom factor applied to the focal graphic in the final stage.
pub const ZOOM_SCALE: f64 = 28.0;

/// Transform origin of the zoom, anchored off-center on the pupil.
pub const ZOOM_ORIGIN: &str = "50% 40.6%";

/// Zoom progress at which the masking overlay starts ramping.
const OVERLAY_RAMP_START: f64 = 0.6;

/// Slope of the overlay ramp over the back portion of the zoom.
const OVERLAY_RAMP_RATE: f64 = 2.5;

/// Where the reveal stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealState {
    /// Waiting for the completion edge.
    #[default]
    Idle,
    /// The choreography is running.
    InProgress,
    /// The choreography has finished; no transition back.
    Done,
}

/// One visual state change the host knows how to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOp {
    /// Fade out the progress bar.
    FadeBar { duration_ms: u32 },
    /// Shrink the pupil to zero scale.
    ShrinkPupil { duration_ms: u32 },
    /// Shrink the iris to zero scale.
    ShrinkIris { duration_ms: u32 },
    /// Scale the focal graphic up; the host ramps the masking overlay with
    /// [`overlay_opacity`] over this stage's progress.
    ZoomEye { duration_ms: u32 },
    /// Hide the loader container and reveal the content container, toggling
    /// both hidden-state markers together.
    SwapContainers,
    /// Reveal the primary navigation element.
    RevealNav { duration_ms: u32 },
    /// Reveal the page sections with a staggered per-item entrance.
    RevealSections { duration_ms: u32, base_delay_ms: u32, stagger_ms: u32 },
}

/// A stage operation scheduled at an offset from the start of the reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keyframe {
    pub at_ms: u32,
    pub op: StageOp,
}

impl Keyframe {
    /// When this keyframe's effect has fully played out, given how many
    /// sections the staggered entrance covers.
    #[must_use]
    pub fn end_ms(&self, section_count: u32) -> u32 {
        let tail = match self.op {
            StageOp::FadeBar { duration_ms }
            | StageOp::ShrinkPupil { duration_ms }
            | StageOp::ShrinkIris { duration_ms }
            | StageOp::ZoomEye { duration_ms }
            | StageOp::RevealNav { duration_ms } => duration_ms,
            StageOp::SwapContainers => 0,
            StageOp::RevealSections { duration_ms, base_delay_ms, stagger_ms } => {
                base_delay_ms + stagger_ms * section_count.saturating_sub(1) + duration_ms
            }
        };
        self.at_ms + tail
    }
}

/// Wall-clock length of a whole plan.
#[must_use]
pub fn plan_duration_ms(plan: &[Keyframe], section_count: u32) -> u32 {
    plan.iter().map(|k| k.end_ms(section_count)).max().unwrap_or(0)
}

/// Opacity of the masking overlay at zoom progress `p` (0..=1).
///
/// Zero through the front of the zoom, then a linear ramp to fully opaque
/// over the back portion, masking the scale discontinuity at the swap.
#[must_use]
pub fn overlay_opacity(p: f64) -> f64 {
    ((p - OVERLAY_RAMP_START) * OVERLAY_RAMP_RATE).clamp(0.0, 1.0)
}

/// A pre-reveal focus movement: a direct damper nudge at an offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntroMove {
    pub at_ms: u32,
    pub offset: Point,
}

/// Produces the timed plans for the intro focus sequence and the reveal.
///
/// Selected once at startup; call sites never branch on capability again.
pub trait AnimationDriver {
    /// Driver name for logging.
    fn name(&self) -> &'static str;

    /// Subtle focus movements played while resources load.
    fn intro(&self) -> Vec<IntroMove>;

    /// The six reveal stages, timed.
    fn plan(&self) -> Vec<Keyframe>;
}

/// Overlapping choreography: each stage starts before the previous tail ends.
#[derive(Debug, Default)]
pub struct TimelineDriver;

impl AnimationDriver for TimelineDriver {
    fn name(&self) -> &'static str {
        "timeline"
    }

    fn intro(&self) -> Vec<IntroMove> {
        vec![
            IntroMove { at_ms: 0, offset: Point::new(-12.0, -6.0) },
            IntroMove { at_ms: 600, offset: Point::new(8.0, 10.0) },
            IntroMove { at_ms: 1_300, offset: Point::new(0.0, 0.0) },
        ]
    }

    fn plan(&self) -> Vec<Keyframe> {
        vec![
            Keyframe { at_ms: 0, op: StageOp::FadeBar { duration_ms: 400 } },
            Keyframe { at_ms: 520, op: StageOp::ShrinkPupil { duration_ms: 450 } },
            Keyframe { at_ms: 690, op: StageOp::ShrinkIris { duration_ms: 450 } },
            Keyframe { at_ms: 840, op: StageOp::ZoomEye { duration_ms: 1_200 } },
            Keyframe { at_ms: 2_040, op: StageOp::SwapContainers },
            Keyframe { at_ms: 2_040, op: StageOp::RevealNav { duration_ms: 450 } },
            Keyframe {
                at_ms: 2_140,
                op: StageOp::RevealSections { duration_ms: 550, base_delay_ms: 0, stagger_ms: 80 },
            },
        ]
    }
}

/// Reduced-capability choreography: the same stages as fixed-duration delayed
/// state changes, strictly sequential and slightly longer overall.
#[derive(Debug, Default)]
pub struct FallbackDriver;

impl AnimationDriver for FallbackDriver {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn intro(&self) -> Vec<IntroMove> {
        // No intro animation; the loader just waits for completion.
        Vec::new()
    }

    fn plan(&self) -> Vec<Keyframe> {
        vec![
            Keyframe { at_ms: 0, op: StageOp::FadeBar { duration_ms: 600 } },
            Keyframe { at_ms: 420, op: StageOp::ShrinkPupil { duration_ms: 450 } },
            Keyframe { at_ms: 680, op: StageOp::ShrinkIris { duration_ms: 450 } },
            Keyframe { at_ms: 900, op: StageOp::ZoomEye { duration_ms: 1_200 } },
            Keyframe { at_ms: 2_100, op: StageOp::SwapContainers },
            Keyframe { at_ms: 2_100, op: StageOp::RevealNav { duration_ms: 550 } },
            Keyframe {
                at_ms: 2_100,
                op: StageOp::RevealSections { duration_ms: 550, base_delay_ms: 120, stagger_ms: 70 },
            },
        ]
    }
}

/// Owns the reveal lifecycle and gates it to run exactly once.
#[derive(Debug, Default)]
pub struct Sequencer {
    state: RevealState,
}

impl Sequencer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> RevealState {
        self.state
    }

    /// Start the reveal, returning the driver's plan.
    ///
    /// Only the first call (from `Idle`) yields a plan; every later call
    /// returns `None`.
    pub fn begin(&mut self, driver: &dyn AnimationDriver) -> Option<Vec<Keyframe>> {
        if self.state != RevealState::Idle {
            return None;
        }
        self.state = RevealState::InProgress;
        Some(driver.plan())
    }

    /// Mark the choreography finished. Only meaningful from `InProgress`.
    pub fn finish(&mut self) {
        if self.state == RevealState::InProgress {
            self.state = RevealState::Done;
        }
    }
}
