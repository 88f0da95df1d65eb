//! Export of simulation results.
//!
//! The engine only produces data; this module persists it for external
//! plotting or analysis tools.

pub mod simulation_archive;

pub use simulation_archive::{
    read_simulation_archive, write_simulation_archive, SimulationArchive,
};
