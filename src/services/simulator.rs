//! Wave propagation from one hole of the dodecahedron to the others.
//!
//! A single [`WaveSimulator`] covers both propagation models:
//!
//! - [`SimulationModel::PlaneWave`]: a sinusoid delayed by the travel distance
//!   and damped by `1 / (1 + d² / R²)`.
//! - [`SimulationModel::Diffraction`]: the same wave, additionally shaped by
//!   the Airy envelope of the receiving hole, an exponential decay
//!   `exp(-d / 2R)` and the hole's size relative to the largest hole.
//!
//! `R` is the configured reference radius. Every non-excitation hole receives
//! one signal, and the interior signal is the sum of those signals scaled by
//! the interior coupling factor.
//!
//! All arithmetic is an explicit elementwise loop over the sample axis of a
//! shared [`TimeGrid`]; nothing relies on implicit broadcasting.
//!
//! # Example
//!
//! ```
//! use dodecasim::models::{GeometryPoint, Vec3};
//! use dodecasim::services::simulator::{SimulationRequest, SimulatorSettings, WaveSimulator};
//!
//! let points = vec![
//!     GeometryPoint::new(0, Vec3::ZERO),
//!     GeometryPoint::new(1, Vec3::new(343.0, 0.0, 0.0)),
//! ];
//! let simulator = WaveSimulator::new(SimulatorSettings::plane_wave()).unwrap();
//! let output = simulator
//!     .simulate(&points, &SimulationRequest::new(0, 1000.0))
//!     .unwrap();
//!
//! assert_eq!(output.wavelength, 343.0);
//! assert!(!output.per_hole.contains_key(&0));
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::constants::{
    DEFAULT_DURATION_S, DEFAULT_SAMPLE_COUNT, SPEED_OF_LIGHT_MM_PER_S, SPEED_OF_SOUND_MM_PER_S,
};
use crate::error::{AcousticsError, Result};
use crate::models::{GeometryPoint, TimeGrid, Vec3, WaveSignal};
use crate::services::bessel::airy_factor;

/// Propagation model used by the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SimulationModel {
    /// Distance-delayed sinusoid with bounded inverse-square damping
    #[default]
    PlaneWave,
    /// Plane wave plus circular-aperture diffraction at each receiving hole
    Diffraction,
}

impl SimulationModel {
    /// Stable identifier used in config files and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PlaneWave => "plane-wave",
            Self::Diffraction => "diffraction",
        }
    }
}

impl fmt::Display for SimulationModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SimulationModel {
    type Err = AcousticsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "plane-wave" | "plane_wave" | "plane" => Ok(Self::PlaneWave),
            "diffraction" => Ok(Self::Diffraction),
            other => Err(AcousticsError::invalid_argument(format!(
                "unknown model '{other}' (expected 'plane-wave' or 'diffraction')"
            ))),
        }
    }
}

/// Propagation medium, which fixes the wave speed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Medium {
    /// Sound in air
    Sound,
    /// Light
    Light,
    /// Any other speed, in mm/s
    Custom(f64),
}

impl Medium {
    /// Wave speed in mm/s.
    #[must_use]
    pub const fn speed_mm_per_s(self) -> f64 {
        match self {
            Self::Sound => SPEED_OF_SOUND_MM_PER_S,
            Self::Light => SPEED_OF_LIGHT_MM_PER_S,
            Self::Custom(speed) => speed,
        }
    }
}

impl FromStr for Medium {
    type Err = AcousticsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "sound" | "air" => Ok(Self::Sound),
            "light" => Ok(Self::Light),
            other => other.parse::<f64>().map(Self::Custom).map_err(|_| {
                AcousticsError::invalid_argument(format!(
                    "unknown medium '{other}' (expected 'sound', 'light' or a speed in mm/s)"
                ))
            }),
        }
    }
}

/// Tunable constants of a simulator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulatorSettings {
    /// Propagation model
    pub model: SimulationModel,
    /// Geometric scale `R` used by the distance attenuation (mm)
    pub reference_radius: f64,
    /// Fraction of each hole signal coupled back into the interior
    pub interior_coupling: f64,
}

impl SimulatorSettings {
    /// Plane-wave defaults: an 80 mm sphere radius and 0.3 coupling.
    #[must_use]
    pub const fn plane_wave() -> Self {
        Self {
            model: SimulationModel::PlaneWave,
            reference_radius: 80.0,
            interior_coupling: 0.3,
        }
    }

    /// Diffraction defaults: the 32 mm pentagon radius and 0.2 coupling.
    #[must_use]
    pub const fn diffraction() -> Self {
        Self {
            model: SimulationModel::Diffraction,
            reference_radius: 32.0,
            interior_coupling: 0.2,
        }
    }

    /// Defaults for the given model.
    #[must_use]
    pub const fn for_model(model: SimulationModel) -> Self {
        match model {
            SimulationModel::PlaneWave => Self::plane_wave(),
            SimulationModel::Diffraction => Self::diffraction(),
        }
    }

    fn validate(&self) -> Result<()> {
        if !self.reference_radius.is_finite() || self.reference_radius <= 0.0 {
            return Err(AcousticsError::invalid_argument(format!(
                "reference_radius must be positive, got {}",
                self.reference_radius
            )));
        }
        if !self.interior_coupling.is_finite() || self.interior_coupling < 0.0 {
            return Err(AcousticsError::invalid_argument(format!(
                "interior_coupling must be non-negative, got {}",
                self.interior_coupling
            )));
        }
        Ok(())
    }
}

impl Default for SimulatorSettings {
    fn default() -> Self {
        Self::plane_wave()
    }
}

/// Parameters of a single simulation call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    /// Hole the wave enters through
    pub excitation_index: usize,
    /// Excitation frequency (Hz)
    pub frequency_hz: f64,
    /// Wave speed in the medium (mm/s)
    pub medium_speed: f64,
    /// Number of time samples
    pub sample_count: usize,
    /// Time window (s)
    pub duration: f64,
}

impl SimulationRequest {
    /// Sound in air, 1000 samples over 10 ms.
    #[must_use]
    pub const fn new(excitation_index: usize, frequency_hz: f64) -> Self {
        Self {
            excitation_index,
            frequency_hz,
            medium_speed: SPEED_OF_SOUND_MM_PER_S,
            sample_count: DEFAULT_SAMPLE_COUNT,
            duration: DEFAULT_DURATION_S,
        }
    }

    /// Sets the medium speed from a medium.
    #[must_use]
    pub const fn with_medium(mut self, medium: Medium) -> Self {
        self.medium_speed = medium.speed_mm_per_s();
        self
    }

    /// Sets the medium speed (mm/s).
    #[must_use]
    pub const fn with_speed(mut self, medium_speed: f64) -> Self {
        self.medium_speed = medium_speed;
        self
    }

    /// Sets the sampling of the time window.
    #[must_use]
    pub const fn with_sampling(mut self, sample_count: usize, duration: f64) -> Self {
        self.sample_count = sample_count;
        self.duration = duration;
        self
    }
}

/// Everything a simulation produces.
///
/// `positions`, `interior` and `per_hole` together are the complete output
/// an external sink needs to persist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutput {
    /// Model that produced the output
    pub model: SimulationModel,
    /// Excitation hole
    pub excitation_index: usize,
    /// Excitation frequency (Hz)
    pub frequency_hz: f64,
    /// Wavelength in the medium (mm)
    pub wavelength: f64,
    /// Shared sample times
    pub time: TimeGrid,
    /// Signal coupled into the cavity interior
    pub interior: WaveSignal,
    /// Signal radiated at each non-excitation hole, keyed by hole index
    pub per_hole: BTreeMap<usize, WaveSignal>,
    /// Peak amplitude factor applied at each non-excitation hole
    pub amplitudes: BTreeMap<usize, f64>,
    /// Geometry the simulation ran on
    pub positions: Vec<GeometryPoint>,
}

/// Per-hole inputs of the diffraction model.
struct Aperture {
    normal: Vec3,
    diameter: f64,
}

/// Simulates wave propagation through the holes of a polyhedron.
#[derive(Debug, Clone)]
pub struct WaveSimulator {
    settings: SimulatorSettings,
}

impl WaveSimulator {
    /// Creates a simulator after validating its settings.
    pub fn new(settings: SimulatorSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    /// The simulator's settings.
    #[must_use]
    pub const fn settings(&self) -> &SimulatorSettings {
        &self.settings
    }

    /// Runs one simulation.
    ///
    /// # Errors
    ///
    /// Fails with `InvalidArgument`, before computing anything, when:
    /// - `positions` is empty or `excitation_index` is out of range
    /// - a point's `index` doesn't match its position in the slice
    /// - frequency, medium speed or duration is not a positive finite number
    /// - `sample_count` is zero
    /// - the diffraction model is selected and a point lacks a normal or a
    ///   positive diameter
    ///
    /// A hole that coincides with the excitation hole is not an error: its
    /// distance attenuation is 1 and its diffraction angle is taken as 0.
    pub fn simulate(
        &self,
        positions: &[GeometryPoint],
        request: &SimulationRequest,
    ) -> Result<SimulationOutput> {
        validate_request(positions, request)?;
        let apertures = match self.settings.model {
            SimulationModel::PlaneWave => None,
            SimulationModel::Diffraction => Some(collect_apertures(positions)?),
        };
        let time = TimeGrid::uniform(request.sample_count, request.duration)?;

        let wavelength = request.medium_speed / request.frequency_hz;
        let wavenumber = 2.0 * PI / wavelength;
        let angular_frequency = 2.0 * PI * request.frequency_hz;
        let source = positions[request.excitation_index].position;
        let max_diameter = apertures
            .as_ref()
            .map(|a| a.iter().map(|ap| ap.diameter).fold(0.0, f64::max));

        let mut interior = WaveSignal::zeros(time.len());
        let mut per_hole = BTreeMap::new();
        let mut amplitudes = BTreeMap::new();

        for (i, point) in positions.iter().enumerate() {
            if i == request.excitation_index {
                continue;
            }

            let r_vec = point.position - source;
            let distance = r_vec.norm();
            let ratio = distance / self.settings.reference_radius;
            let mut amplitude = 1.0 / (1.0 + ratio * ratio);

            if let (Some(apertures), Some(max_diameter)) = (&apertures, max_diameter) {
                let aperture = &apertures[i];
                let angle = incidence_angle(aperture.normal, r_vec, distance);
                let x = wavenumber * (aperture.diameter / 2.0) * angle.sin();

                amplitude *= airy_factor(x);
                amplitude *= (-distance / (2.0 * self.settings.reference_radius)).exp();
                amplitude *= aperture.diameter / max_diameter;
            }

            let phase_offset = wavenumber * distance;
            let samples = time
                .samples
                .iter()
                .map(|t| amplitude * (angular_frequency * t - phase_offset).sin())
                .collect();
            let signal = WaveSignal::from_samples(samples);

            interior.add_scaled(&signal, self.settings.interior_coupling);
            per_hole.insert(i, signal);
            amplitudes.insert(i, amplitude);
        }

        tracing::debug!(
            "Simulated {} model at {} Hz from hole {}: {} receiving holes, wavelength {:.3} mm",
            self.settings.model,
            request.frequency_hz,
            request.excitation_index,
            per_hole.len(),
            wavelength
        );

        Ok(SimulationOutput {
            model: self.settings.model,
            excitation_index: request.excitation_index,
            frequency_hz: request.frequency_hz,
            wavelength,
            time,
            interior,
            per_hole,
            amplitudes,
            positions: positions.to_vec(),
        })
    }
}

fn validate_request(positions: &[GeometryPoint], request: &SimulationRequest) -> Result<()> {
    if positions.is_empty() {
        return Err(AcousticsError::invalid_argument(
            "geometry must contain at least one point",
        ));
    }
    if request.excitation_index >= positions.len() {
        return Err(AcousticsError::invalid_argument(format!(
            "excitation index {} is out of range for {} holes",
            request.excitation_index,
            positions.len()
        )));
    }
    if let Some((i, point)) = positions
        .iter()
        .enumerate()
        .find(|(i, point)| point.index != *i)
    {
        return Err(AcousticsError::invalid_argument(format!(
            "geometry point at position {i} carries index {}",
            point.index
        )));
    }
    if !request.frequency_hz.is_finite() || request.frequency_hz <= 0.0 {
        return Err(AcousticsError::invalid_argument(format!(
            "frequency must be positive, got {} Hz",
            request.frequency_hz
        )));
    }
    if !request.medium_speed.is_finite() || request.medium_speed <= 0.0 {
        return Err(AcousticsError::invalid_argument(format!(
            "medium speed must be positive, got {} mm/s",
            request.medium_speed
        )));
    }
    Ok(())
}

fn collect_apertures(positions: &[GeometryPoint]) -> Result<Vec<Aperture>> {
    positions
        .iter()
        .map(|point| {
            let normal = point
                .normal
                .ok_or_else(|| {
                    AcousticsError::invalid_argument(format!(
                        "hole {} has no face normal (required by the diffraction model)",
                        point.index
                    ))
                })?
                .normalized()
                .ok_or_else(|| {
                    AcousticsError::invalid_argument(format!(
                        "hole {} has a zero-length face normal",
                        point.index
                    ))
                })?;

            let diameter = point.diameter_mm.ok_or_else(|| {
                AcousticsError::invalid_argument(format!(
                    "hole {} has no diameter (required by the diffraction model)",
                    point.index
                ))
            })?;
            if !diameter.is_finite() || diameter <= 0.0 {
                return Err(AcousticsError::invalid_argument(format!(
                    "hole {} has invalid diameter {diameter}",
                    point.index
                )));
            }

            Ok(Aperture { normal, diameter })
        })
        .collect()
}

/// Angle between a face normal and the direction of propagation.
///
/// A point on top of the source has no direction; its angle is 0.
fn incidence_angle(normal: Vec3, r_vec: Vec3, distance: f64) -> f64 {
    if distance == 0.0 {
        return 0.0;
    }
    let cos_angle = normal.dot(r_vec * (1.0 / distance)).clamp(-1.0, 1.0);
    cos_angle.acos()
}
