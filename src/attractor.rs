//! Attractor scanning: marked regions of the page recorded as points of
//! interest.
//!
//! An element qualifies as an attractor when its fill matches the reference
//! color, either verbatim in its `style`/`fill` attributes or approximately
//! in its computed style. The index is rebuilt wholesale on resize and
//! scroll; stale entries are discarded, never patched. Attractors feed only
//! the debug overlay today — they are deliberately not blended into the
//! motion target.

#[cfg(test)]
#[path = "attractor_test.rs"]
mod attractor_test;

use crate::consts::{ATTRACTOR_FILL_HEX, ATTRACTOR_FILL_HEX_LOWER, ATTRACTOR_FILL_RGB_PREFIX};
use crate::geom::{Point, Rect};

/// A candidate element as observed by the host's document scan.
#[derive(Debug, Clone, Default)]
pub struct Candidate {
    /// Raw `style` attribute, empty when absent.
    pub style_attr: String,
    /// Raw `fill` attribute, empty when absent.
    pub fill_attr: String,
    /// Computed fill, `None` when the style read failed (the candidate then
    /// only matches on its attributes).
    pub computed_fill: Option<String>,
    /// Bounding box, `None` when the element has no geometry.
    pub rect: Option<Rect>,
}

/// A recorded point of interest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attractor {
    /// Screen-space center of the source element.
    pub position: Point,
}

/// Whether a candidate's fill marks it as an attractor.
#[must_use]
pub fn matches_fill(style_attr: &str, fill_attr: &str, computed_fill: Option<&str>) -> bool {
    if style_attr.contains(ATTRACTOR_FILL_HEX) || fill_attr.contains(ATTRACTOR_FILL_HEX) {
        return true;
    }
    computed_fill.is_some_and(|fill| {
        fill.starts_with(ATTRACTOR_FILL_RGB_PREFIX) || fill.contains(ATTRACTOR_FILL_HEX_LOWER)
    })
}

/// The current set of attractors, rebuilt from scratch on each scan.
#[derive(Debug, Default)]
pub struct AttractorIndex {
    attractors: Vec<Attractor>,
}

impl AttractorIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The attractors found by the most recent scan.
    #[must_use]
    pub fn attractors(&self) -> &[Attractor] {
        &self.attractors
    }

    /// Replace the set with the attractors among `candidates`.
    ///
    /// Candidates without geometry are skipped; a missing computed fill only
    /// disables the approximate match for that candidate.
    pub fn rebuild<I>(&mut self, candidates: I)
    where
        I: IntoIterator<Item = Candidate>,
    {
        self.attractors.clear();
        for c in candidates {
            if !matches_fill(&c.style_attr, &c.fill_attr, c.computed_fill.as_deref()) {
                continue;
            }
            if let Some(rect) = c.rect {
                self.attractors.push(Attractor { position: rect.center() });
            }
        }
    }
}
