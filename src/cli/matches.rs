//! Hole-to-instrument matching command.

use crate::cli::common::{load_catalog, load_config, load_holes, print_json, CliResult};
use crate::models::{HoleCorrespondence, Match};
use crate::services::analysis::culture_distribution;
use crate::services::matcher::{best_matches_per_hole, find_matches};
use clap::Args;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Match hole diameters against an instrument catalog
#[derive(Debug, Clone, Args)]
pub struct MatchArgs {
    /// Comma-separated hole diameters in mm (defaults to the reference dodecahedron)
    #[arg(long, value_name = "LIST")]
    pub holes: Option<String>,

    /// Instrument catalog JSON file (defaults to the configured or embedded catalog)
    #[arg(short, long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Maximum diameter difference in mm
    #[arg(short, long, value_name = "MM")]
    pub tolerance: Option<f64>,

    /// Group matches per hole, closest first
    #[arg(long)]
    pub best: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct MatchResponse<'a> {
    tolerance_mm: f64,
    matches: &'a [Match],
}

#[derive(Debug, Serialize)]
struct BestMatchResponse<'a> {
    tolerance_mm: f64,
    holes: &'a [HoleCorrespondence],
    cultures: BTreeMap<String, usize>,
}

impl MatchArgs {
    /// Execute the match command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;
        let holes = load_holes(self.holes.as_deref())?;
        let catalog = load_catalog(self.catalog.as_deref(), &config)?;
        let tolerance = self.tolerance.unwrap_or(config.matching.tolerance_mm);

        let matches = find_matches(&holes, &catalog, tolerance)?;

        if self.best {
            let correspondences = best_matches_per_hole(&matches, &holes);
            let cultures = culture_distribution(&correspondences);

            if self.json {
                return print_json(&BestMatchResponse {
                    tolerance_mm: tolerance,
                    holes: &correspondences,
                    cultures,
                });
            }

            println!("Best matches (tolerance ±{tolerance} mm)");
            println!();
            println!("Hole | Diameter | Instrument                | Culture   | Diff (mm) | Freq (Hz)");
            println!("{}", "-".repeat(84));
            for hole in &correspondences {
                match hole.best() {
                    Some(best) => println!(
                        "{:4} | {:8.1} | {:25} | {:9} | {:9.2} | {:9.1}",
                        hole.hole_index,
                        hole.hole_diameter,
                        best.item.name,
                        best.item.culture.as_deref().unwrap_or("-"),
                        best.diff,
                        best.item.frequency_hz
                    ),
                    None => println!(
                        "{:4} | {:8.1} | {:25} | {:9} | {:>9} | {:>9}",
                        hole.hole_index, hole.hole_diameter, "(no match)", "-", "-", "-"
                    ),
                }
            }

            if !cultures.is_empty() {
                println!();
                println!("By culture:");
                for (culture, count) in &cultures {
                    println!("  {culture}: {count}");
                }
            }
            return Ok(());
        }

        if self.json {
            return print_json(&MatchResponse {
                tolerance_mm: tolerance,
                matches: &matches,
            });
        }

        println!(
            "{} matches within ±{tolerance} mm ({} holes, {} instruments)",
            matches.len(),
            holes.len(),
            catalog.len()
        );
        for m in &matches {
            println!(
                "  hole {:2} ({:5.1} mm) ~ {} ({:.1} mm, {:.1} Hz) diff {:.2} mm",
                m.hole_index,
                m.hole_diameter,
                m.item.name,
                m.item.diameter_mm,
                m.item.frequency_hz,
                m.diff
            );
        }

        Ok(())
    }
}
