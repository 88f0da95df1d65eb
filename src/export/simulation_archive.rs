//! JSON archive of a simulation run.
//!
//! The archive holds everything needed to replot a run without simulating
//! again: the settings, the geometry, the time grid, the interior signal and
//! every hole signal.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::services::simulator::{SimulationOutput, SimulationRequest, SimulatorSettings};

/// Serialized form of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationArchive {
    /// When the archive was written
    pub generated_at: DateTime<Utc>,
    /// Simulator constants
    pub settings: SimulatorSettings,
    /// Call parameters
    pub request: SimulationRequest,
    /// Simulation result
    pub output: SimulationOutput,
}

impl SimulationArchive {
    /// Wraps a finished run, stamped with the current time.
    #[must_use]
    pub fn new(
        settings: SimulatorSettings,
        request: SimulationRequest,
        output: SimulationOutput,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            settings,
            request,
            output,
        }
    }
}

/// Writes an archive as pretty JSON.
///
/// Uses temp file + rename so a failed write never leaves a truncated archive.
pub fn write_simulation_archive(path: &Path, archive: &SimulationArchive) -> Result<()> {
    let content =
        serde_json::to_string_pretty(archive).context("Failed to serialize simulation archive")?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .context(format!("Failed to create directory: {}", parent.display()))?;
    }

    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, content)
        .context(format!("Failed to write archive: {}", temp_path.display()))?;
    fs::rename(&temp_path, path)
        .context(format!("Failed to rename archive to: {}", path.display()))?;

    tracing::info!("Wrote simulation archive to {}", path.display());
    Ok(())
}

/// Reads an archive written by [`write_simulation_archive`].
pub fn read_simulation_archive(path: &Path) -> Result<SimulationArchive> {
    let content = fs::read_to_string(path)
        .context(format!("Failed to read archive: {}", path.display()))?;
    serde_json::from_str(&content).context(format!("Failed to parse archive: {}", path.display()))
}
