//! Application-wide constants.
//!
//! This module defines the application name plus the physical constants
//! shared by the simulator and the analysis helpers. Lengths are millimeters.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Dodecahedron Acoustics Simulator";

/// The binary name of the application (used in command examples, lowercase with hyphens).
pub const APP_BINARY_NAME: &str = "dodecasim";

/// Speed of sound in air, mm/s.
pub const SPEED_OF_SOUND_MM_PER_S: f64 = 343_000.0;

/// Speed of light, mm/s.
pub const SPEED_OF_LIGHT_MM_PER_S: f64 = 3.0e11;

/// Default number of samples in a simulated signal.
pub const DEFAULT_SAMPLE_COUNT: usize = 1000;

/// Default simulated time window, seconds.
pub const DEFAULT_DURATION_S: f64 = 0.01;

/// Default matching tolerance, mm.
pub const DEFAULT_TOLERANCE_MM: f64 = 0.5;
