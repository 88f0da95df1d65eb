//! Hole-to-instrument matches.

use serde::{Deserialize, Serialize};

use super::reference::ReferenceItem;

/// A hole paired with a catalog item whose diameter is within tolerance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    /// Hole identifier
    pub hole_index: usize,
    /// Measured hole diameter (mm)
    pub hole_diameter: f64,
    /// Matched catalog item
    pub item: ReferenceItem,
    /// Absolute diameter difference (mm)
    pub diff: f64,
}

/// All candidates for a single hole, closest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoleCorrespondence {
    /// Hole identifier
    pub hole_index: usize,
    /// Measured hole diameter (mm)
    pub hole_diameter: f64,
    /// Matches for this hole sorted by `diff` ascending
    pub candidates: Vec<Match>,
}

impl HoleCorrespondence {
    /// The closest candidate, if the hole matched anything.
    #[must_use]
    pub fn best(&self) -> Option<&Match> {
        self.candidates.first()
    }
}
