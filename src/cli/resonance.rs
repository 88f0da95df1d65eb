//! Natural-frequency ranking command.

use crate::cli::common::{load_holes, print_json, CliResult};
use crate::services::analysis::{rank_by_natural_frequency, within_window, ResonanceRanking};
use crate::services::simulator::Medium;
use clap::Args;
use serde::Serialize;

/// Rank holes by how close their natural frequency is to a target
#[derive(Debug, Clone, Args)]
pub struct ResonanceArgs {
    /// Target frequency in Hz
    #[arg(short, long, value_name = "HZ")]
    pub target: f64,

    /// Comma-separated hole diameters in mm (defaults to the reference dodecahedron)
    #[arg(long, value_name = "LIST")]
    pub holes: Option<String>,

    /// Propagation medium (sound, light, or a speed in mm/s)
    #[arg(long, value_name = "MEDIUM", default_value = "sound")]
    pub medium: String,

    /// Wave speed in mm/s (overrides --medium)
    #[arg(long, value_name = "MM_PER_S")]
    pub speed: Option<f64>,

    /// Only keep holes whose natural frequency is within HZ of the target
    #[arg(long, value_name = "HZ")]
    pub within: Option<f64>,

    /// Only show the N closest holes
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ResonanceResponse<'a> {
    target_hz: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    window_hz: Option<f64>,
    medium_speed_mm_per_s: f64,
    rankings: &'a [ResonanceRanking],
}

impl ResonanceArgs {
    /// Execute the resonance command
    pub fn execute(&self) -> CliResult<()> {
        let holes = load_holes(self.holes.as_deref())?;
        let speed = match self.speed {
            Some(speed) => speed,
            None => self.medium.parse::<Medium>()?.speed_mm_per_s(),
        };

        let mut rankings = rank_by_natural_frequency(&holes, self.target, speed)?;
        if let Some(window) = self.within {
            rankings = within_window(rankings, window)?;
        }
        if let Some(top) = self.top {
            rankings.truncate(top);
        }

        if self.json {
            return print_json(&ResonanceResponse {
                target_hz: self.target,
                window_hz: self.within,
                medium_speed_mm_per_s: speed,
                rankings: &rankings,
            });
        }

        println!("Holes ranked by natural frequency against {} Hz", self.target);
        println!();
        println!("Rank | Hole | Diameter | Natural (Hz) | Diff (Hz)");
        println!("{}", "-".repeat(52));
        for (rank, r) in rankings.iter().enumerate() {
            println!(
                "{:4} | {:4} | {:8.1} | {:12.1} | {:9.1}",
                rank + 1,
                r.hole_index,
                r.diameter_mm,
                r.natural_frequency_hz,
                r.difference_hz
            );
        }

        Ok(())
    }
}
