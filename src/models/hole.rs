//! Measured hole diameters.

use serde::{Deserialize, Serialize};

use crate::error::{AcousticsError, Result};

/// Hole diameters (mm) measured on the reference dodecahedron.
///
/// The upper six faces come first, followed by the lower six.
pub const REFERENCE_HOLE_DIAMETERS_MM: [f64; 12] = [
    26.0, 21.5, 16.5, 21.0, 11.5, 17.0, 25.5, 10.5, 15.5, 22.0, 17.0, 22.0,
];

/// Ordered sequence of hole diameters in millimeters.
///
/// The position of a diameter in the sequence is the hole identifier, and every
/// array derived from a measurement keeps that positional correspondence.
///
/// # Validation
///
/// - At least one hole
/// - Every diameter is finite and strictly positive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct HoleMeasurement {
    diameters: Vec<f64>,
}

impl HoleMeasurement {
    /// Creates a measurement from a list of diameters.
    pub fn new(diameters: Vec<f64>) -> Result<Self> {
        if diameters.is_empty() {
            return Err(AcousticsError::invalid_argument(
                "hole measurement needs at least one diameter",
            ));
        }

        if let Some((index, diameter)) = diameters
            .iter()
            .enumerate()
            .find(|(_, d)| !d.is_finite() || **d <= 0.0)
        {
            return Err(AcousticsError::invalid_argument(format!(
                "hole {index} has invalid diameter {diameter} (must be a positive number of mm)"
            )));
        }

        Ok(Self { diameters })
    }

    /// The twelve diameters of the reference dodecahedron.
    #[must_use]
    pub fn reference() -> Self {
        Self {
            diameters: REFERENCE_HOLE_DIAMETERS_MM.to_vec(),
        }
    }

    /// Parses a comma or whitespace separated list such as `"26, 21.5 16.5"`.
    pub fn parse_list(input: &str) -> Result<Self> {
        let diameters = input
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<f64>().map_err(|_| {
                    AcousticsError::invalid_argument(format!("'{part}' is not a diameter"))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(diameters)
    }

    /// Diameters in hole order.
    #[must_use]
    pub fn diameters(&self) -> &[f64] {
        &self.diameters
    }

    /// Number of holes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.diameters.len()
    }

    /// Always false for a validated measurement; provided for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diameters.is_empty()
    }

    /// Iterates `(hole_index, diameter)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.diameters.iter().copied().enumerate()
    }
}

impl TryFrom<Vec<f64>> for HoleMeasurement {
    type Error = AcousticsError;

    fn try_from(value: Vec<f64>) -> Result<Self> {
        Self::new(value)
    }
}

impl From<HoleMeasurement> for Vec<f64> {
    fn from(value: HoleMeasurement) -> Self {
        value.diameters
    }
}
