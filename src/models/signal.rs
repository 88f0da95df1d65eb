//! Sampled time grids and wave signals.
//!
//! Signals are plain sample vectors. Every operation on them is elementwise
//! over the sample axis; two signals combine only if they share a grid.

use serde::{Deserialize, Serialize};

use crate::error::{AcousticsError, Result};

/// Uniform sample times over `[0, duration]`, both endpoints included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeGrid {
    /// Total duration in seconds
    pub duration: f64,
    /// Sample times in seconds
    pub samples: Vec<f64>,
}

impl TimeGrid {
    /// Builds a grid of `sample_count` samples.
    ///
    /// A single sample sits at `t = 0`.
    pub fn uniform(sample_count: usize, duration: f64) -> Result<Self> {
        if sample_count == 0 {
            return Err(AcousticsError::invalid_argument(
                "sample_count must be at least 1",
            ));
        }
        if !duration.is_finite() || duration <= 0.0 {
            return Err(AcousticsError::invalid_argument(format!(
                "duration must be a positive number of seconds, got {duration}"
            )));
        }

        let samples = if sample_count == 1 {
            vec![0.0]
        } else {
            let step = duration / (sample_count - 1) as f64;
            (0..sample_count)
                .map(|i| {
                    if i == sample_count - 1 {
                        duration
                    } else {
                        i as f64 * step
                    }
                })
                .collect()
        };

        Ok(Self { duration, samples })
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false for a grid built by [`TimeGrid::uniform`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Real-valued signal sampled on a [`TimeGrid`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WaveSignal {
    samples: Vec<f64>,
}

impl WaveSignal {
    /// A signal of `len` zero samples.
    #[must_use]
    pub fn zeros(len: usize) -> Self {
        Self {
            samples: vec![0.0; len],
        }
    }

    /// Wraps existing samples.
    #[must_use]
    pub fn from_samples(samples: Vec<f64>) -> Self {
        Self { samples }
    }

    /// Sample values.
    #[must_use]
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the signal has no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Adds `other * scale` into this signal, sample by sample.
    ///
    /// Both signals must have the same length.
    pub fn add_scaled(&mut self, other: &WaveSignal, scale: f64) {
        debug_assert_eq!(self.samples.len(), other.samples.len());
        for (acc, value) in self.samples.iter_mut().zip(&other.samples) {
            *acc += value * scale;
        }
    }

    /// Largest absolute sample value.
    #[must_use]
    pub fn peak(&self) -> f64 {
        self.samples.iter().fold(0.0, |acc, v| acc.max(v.abs()))
    }

    /// Mean absolute difference to another signal of the same length.
    #[must_use]
    pub fn mean_abs_difference(&self, other: &WaveSignal) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let total: f64 = self
            .samples
            .iter()
            .zip(&other.samples)
            .map(|(a, b)| (a - b).abs())
            .sum();
        total / self.samples.len() as f64
    }

    /// Returns true if every sample is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.samples.iter().all(|v| v.is_finite())
    }
}
