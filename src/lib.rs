//! Dodecahedron Acoustics Library
//!
//! This library tests speculative acoustic hypotheses about the Roman
//! dodecahedron: matching its hole diameters against the tube diameters of
//! historical instruments, and simulating how a wave entering one hole
//! reaches the others.

// Module declarations
pub mod catalog;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
