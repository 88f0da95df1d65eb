//! Derived figures computed from matches and simulation output.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{AcousticsError, Result};
use crate::models::{HoleCorrespondence, HoleMeasurement, WaveSignal};

/// Label used for best matches whose item carries no culture.
pub const UNKNOWN_CULTURE: &str = "Unknown";

/// Counts best matches per culture.
///
/// Holes without a candidate are not counted.
#[must_use]
pub fn culture_distribution(correspondences: &[HoleCorrespondence]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for best in correspondences.iter().filter_map(HoleCorrespondence::best) {
        let culture = best
            .item
            .culture
            .clone()
            .unwrap_or_else(|| UNKNOWN_CULTURE.to_string());
        *counts.entry(culture).or_insert(0) += 1;
    }
    counts
}

/// Fundamental frequency of a circular opening, `speed / (2 · diameter)`.
///
/// Units: `diameter` in mm, `speed` in mm/s, result in Hz.
#[must_use]
pub fn natural_frequency(diameter_mm: f64, speed_mm_per_s: f64) -> f64 {
    speed_mm_per_s / (2.0 * diameter_mm)
}

/// A hole ranked by how close its natural frequency is to a target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResonanceRanking {
    /// Hole identifier
    pub hole_index: usize,
    /// Hole diameter (mm)
    pub diameter_mm: f64,
    /// Natural frequency of the hole (Hz)
    pub natural_frequency_hz: f64,
    /// Absolute distance to the target frequency (Hz)
    pub difference_hz: f64,
}

/// Ranks holes by `|natural_frequency - target_hz|`, closest first.
///
/// Ties keep hole order.
pub fn rank_by_natural_frequency(
    holes: &HoleMeasurement,
    target_hz: f64,
    speed_mm_per_s: f64,
) -> Result<Vec<ResonanceRanking>> {
    if !target_hz.is_finite() || target_hz <= 0.0 {
        return Err(AcousticsError::invalid_argument(format!(
            "target frequency must be positive, got {target_hz} Hz"
        )));
    }
    if !speed_mm_per_s.is_finite() || speed_mm_per_s <= 0.0 {
        return Err(AcousticsError::invalid_argument(format!(
            "medium speed must be positive, got {speed_mm_per_s} mm/s"
        )));
    }

    let mut rankings: Vec<ResonanceRanking> = holes
        .iter()
        .map(|(hole_index, diameter_mm)| {
            let natural_frequency_hz = natural_frequency(diameter_mm, speed_mm_per_s);
            ResonanceRanking {
                hole_index,
                diameter_mm,
                natural_frequency_hz,
                difference_hz: (natural_frequency_hz - target_hz).abs(),
            }
        })
        .collect();
    rankings.sort_by(|a, b| a.difference_hz.total_cmp(&b.difference_hz));

    Ok(rankings)
}

/// Keeps the rankings whose natural frequency is within `window_hz` of the
/// target. The window is inclusive.
pub fn within_window(
    rankings: Vec<ResonanceRanking>,
    window_hz: f64,
) -> Result<Vec<ResonanceRanking>> {
    if window_hz.is_nan() || window_hz < 0.0 {
        return Err(AcousticsError::invalid_argument(format!(
            "frequency window must be non-negative, got {window_hz} Hz"
        )));
    }
    Ok(rankings
        .into_iter()
        .filter(|r| r.difference_hz <= window_hz)
        .collect())
}

/// How different the hole outputs of one simulation are from each other.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutputSpread {
    /// Mean of the pairwise mean absolute differences
    pub mean: f64,
    /// Largest pairwise mean absolute difference
    pub max: f64,
    /// Smallest pairwise mean absolute difference
    pub min: f64,
    /// Number of pairs compared
    pub pairs: usize,
}

/// Compares every pair of hole signals by mean absolute difference.
///
/// Returns `None` with fewer than two signals.
#[must_use]
pub fn output_spread(per_hole: &BTreeMap<usize, WaveSignal>) -> Option<OutputSpread> {
    let signals: Vec<&WaveSignal> = per_hole.values().collect();

    let mut differences = Vec::new();
    for (i, a) in signals.iter().enumerate() {
        for b in &signals[i + 1..] {
            differences.push(a.mean_abs_difference(b));
        }
    }

    if differences.is_empty() {
        return None;
    }

    let sum: f64 = differences.iter().sum();
    Some(OutputSpread {
        mean: sum / differences.len() as f64,
        max: differences.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        min: differences.iter().copied().fold(f64::INFINITY, f64::min),
        pairs: differences.len(),
    })
}
