//! CLI command handlers for dodecasim.
//!
//! This module provides headless, scriptable access to the matcher, the wave
//! simulator and the supporting analyses for automation and testing.

pub mod common;
pub mod config;
pub mod geometry;
pub mod matches;
pub mod resonance;
pub mod simulate;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use geometry::GeometryArgs;
pub use matches::MatchArgs;
pub use resonance::ResonanceArgs;
pub use simulate::SimulateArgs;
