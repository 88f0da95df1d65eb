//! Service layer for the matching and simulation engine.
//!
//! Every service here is a pure, synchronous computation over its inputs.

pub mod analysis;
pub mod bessel;
pub mod geometry;
pub mod matcher;
pub mod simulator;

// Re-export commonly used types and functions
pub use matcher::{best_matches_per_hole, find_matches};
pub use simulator::{
    Medium, SimulationModel, SimulationOutput, SimulationRequest, SimulatorSettings, WaveSimulator,
};
