//! Geometry listing command.

use crate::cli::common::{load_config, load_holes, print_json, CliResult};
use crate::models::GeometryPoint;
use crate::services::geometry::build_geometry_for_model;
use crate::services::simulator::SimulationModel;
use clap::Args;
use serde::Serialize;

/// List the hole positions a simulation model runs on
#[derive(Debug, Clone, Args)]
pub struct GeometryArgs {
    /// Propagation model whose geometry to build (plane-wave or diffraction)
    #[arg(short, long, value_name = "MODEL", default_value = "plane-wave")]
    pub model: String,

    /// Comma-separated hole diameters in mm (defaults to the reference dodecahedron)
    #[arg(long, value_name = "LIST")]
    pub holes: Option<String>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON response for geometry command
#[derive(Debug, Serialize)]
struct GeometryResponse<'a> {
    /// Model the geometry belongs to
    model: SimulationModel,
    /// Number of points
    point_count: usize,
    /// Generated points
    points: &'a [GeometryPoint],
}

impl GeometryArgs {
    /// Execute the geometry command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;
        let holes = load_holes(self.holes.as_deref())?;
        let model: SimulationModel = self.model.parse()?;

        let points = build_geometry_for_model(model, &holes, &config.geometry)?;

        if self.json {
            return print_json(&GeometryResponse {
                model,
                point_count: points.len(),
                points: &points,
            });
        }

        println!("{} geometry ({} points)", model, points.len());
        println!();
        println!("Hole |        x |        y |        z | Diameter | Normal");
        println!("{}", "-".repeat(72));
        for point in &points {
            let diameter = point
                .diameter_mm
                .map_or_else(|| "-".to_string(), |d| format!("{d:.2}"));
            let normal = point.normal.map_or_else(
                || "-".to_string(),
                |n| format!("({:.3}, {:.3}, {:.3})", n.x, n.y, n.z),
            );
            println!(
                "{:4} | {:8.2} | {:8.2} | {:8.2} | {:>8} | {}",
                point.index,
                point.position.x,
                point.position.y,
                point.position.z,
                diameter,
                normal
            );
        }

        Ok(())
    }
}
