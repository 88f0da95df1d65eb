//! Wave simulation command.

use crate::cli::common::{load_config, load_holes, print_json, CliError, CliResult};
use crate::export::{write_simulation_archive, SimulationArchive};
use crate::services::analysis::{output_spread, OutputSpread};
use crate::services::geometry::build_geometry_for_model;
use crate::services::simulator::{
    Medium, SimulationModel, SimulationOutput, SimulationRequest, WaveSimulator,
};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Simulate wave propagation from one hole to the others
#[derive(Debug, Clone, Args)]
pub struct SimulateArgs {
    /// Propagation model (plane-wave or diffraction)
    #[arg(short, long, value_name = "MODEL", default_value = "plane-wave")]
    pub model: String,

    /// Index of the hole the wave enters through
    #[arg(short, long, value_name = "N", default_value_t = 0)]
    pub excitation: usize,

    /// Excitation frequency in Hz
    #[arg(short, long, value_name = "HZ", default_value_t = 1000.0)]
    pub frequency: f64,

    /// Propagation medium (sound, light, or a speed in mm/s)
    #[arg(long, value_name = "MEDIUM", default_value = "sound")]
    pub medium: String,

    /// Wave speed in mm/s (overrides --medium)
    #[arg(long, value_name = "MM_PER_S")]
    pub speed: Option<f64>,

    /// Number of time samples (defaults to the configured value)
    #[arg(long, value_name = "N")]
    pub samples: Option<usize>,

    /// Simulated time window in seconds (defaults to the configured value)
    #[arg(long, value_name = "S")]
    pub duration: Option<f64>,

    /// Reference radius in mm (defaults to the configured value for the model)
    #[arg(long, value_name = "MM")]
    pub reference_radius: Option<f64>,

    /// Interior coupling factor (defaults to the configured value for the model)
    #[arg(long, value_name = "C")]
    pub coupling: Option<f64>,

    /// Comma-separated hole diameters in mm (defaults to the reference dodecahedron)
    #[arg(long, value_name = "LIST")]
    pub holes: Option<String>,

    /// Write the full simulation archive (geometry and every signal) to a JSON file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output summary as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON summary of a simulation run
#[derive(Debug, Serialize)]
struct SimulationSummary {
    model: SimulationModel,
    excitation_index: usize,
    frequency_hz: f64,
    medium_speed_mm_per_s: f64,
    wavelength_mm: f64,
    sample_count: usize,
    duration_s: f64,
    reference_radius_mm: f64,
    interior_coupling: f64,
    holes: Vec<HoleSummary>,
    interior_peak: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    spread: Option<OutputSpread>,
    #[serde(skip_serializing_if = "Option::is_none")]
    archive: Option<String>,
}

/// Per-hole line of the summary
#[derive(Debug, Serialize)]
struct HoleSummary {
    hole_index: usize,
    distance_mm: f64,
    amplitude: f64,
    peak: f64,
}

impl SimulateArgs {
    /// Execute the simulate command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;
        let holes = load_holes(self.holes.as_deref())?;
        let model: SimulationModel = self.model.parse()?;

        let mut requested = config.simulation.settings_for(model);
        if let Some(radius) = self.reference_radius {
            requested.reference_radius = radius;
        }
        if let Some(coupling) = self.coupling {
            requested.interior_coupling = coupling;
        }

        let medium_speed = match self.speed {
            Some(speed) => speed,
            None => self.medium.parse::<Medium>()?.speed_mm_per_s(),
        };
        let request = SimulationRequest::new(self.excitation, self.frequency)
            .with_speed(medium_speed)
            .with_sampling(
                self.samples.unwrap_or(config.simulation.sample_count),
                self.duration.unwrap_or(config.simulation.duration_s),
            );

        let positions = build_geometry_for_model(model, &holes, &config.geometry)?;
        let simulator = WaveSimulator::new(requested)?;
        let settings = *simulator.settings();
        let output = simulator.simulate(&positions, &request)?;

        if let Some(path) = &self.output {
            let archive = SimulationArchive::new(settings, request, output.clone());
            write_simulation_archive(path, &archive).map_err(|e| {
                CliError::io(format!("Failed to write simulation archive: {e:#}"))
            })?;
        }

        let summary = SimulationSummary {
            model,
            excitation_index: request.excitation_index,
            frequency_hz: request.frequency_hz,
            medium_speed_mm_per_s: request.medium_speed,
            wavelength_mm: output.wavelength,
            sample_count: request.sample_count,
            duration_s: request.duration,
            reference_radius_mm: settings.reference_radius,
            interior_coupling: settings.interior_coupling,
            holes: hole_summaries(&output),
            interior_peak: output.interior.peak(),
            spread: output_spread(&output.per_hole),
            archive: self
                .output
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
        };

        if self.json {
            return print_json(&summary);
        }

        print_summary(&summary);
        Ok(())
    }
}

fn hole_summaries(output: &SimulationOutput) -> Vec<HoleSummary> {
    let source = output.positions[output.excitation_index].position;
    output
        .per_hole
        .iter()
        .map(|(&hole_index, signal)| HoleSummary {
            hole_index,
            distance_mm: output.positions[hole_index].position.distance(source),
            amplitude: output.amplitudes.get(&hole_index).copied().unwrap_or(0.0),
            peak: signal.peak(),
        })
        .collect()
}

fn print_summary(summary: &SimulationSummary) {
    println!(
        "{} model, excitation hole {} at {} Hz",
        summary.model, summary.excitation_index, summary.frequency_hz
    );
    println!(
        "Wavelength: {:.3} mm ({} samples over {} s)",
        summary.wavelength_mm, summary.sample_count, summary.duration_s
    );
    println!();
    println!("Hole | Distance (mm) | Amplitude | Peak");
    println!("{}", "-".repeat(42));
    for hole in &summary.holes {
        println!(
            "{:4} | {:13.2} | {:9.5} | {:.5}",
            hole.hole_index, hole.distance_mm, hole.amplitude, hole.peak
        );
    }
    println!();
    println!("Interior peak: {:.5}", summary.interior_peak);
    if let Some(spread) = &summary.spread {
        println!(
            "Output spread: mean {:.5}, min {:.5}, max {:.5} over {} pairs",
            spread.mean, spread.min, spread.max, spread.pairs
        );
    }
    if let Some(archive) = &summary.archive {
        println!("Archive written to {archive}");
    }
}
