//! Data models for hole measurements, reference catalogs, geometry and signals.
//!
//! Models are plain data. Every model is built fresh for a computation and
//! never mutated by the engine afterwards.

pub mod geometry;
pub mod hole;
pub mod matching;
pub mod reference;
pub mod signal;

// Re-export all model types
pub use geometry::{GeometryPoint, Vec3};
pub use hole::{HoleMeasurement, REFERENCE_HOLE_DIAMETERS_MM};
pub use matching::{HoleCorrespondence, Match};
pub use reference::{Catalog, ReferenceItem};
pub use signal::{TimeGrid, WaveSignal};
