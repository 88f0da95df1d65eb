//! Configuration management CLI commands.

use crate::cli::common::{load_config, print_json, CliError, CliResult};
use crate::config::{Config, ModelConfig};
use crate::constants::APP_BINARY_NAME;
use crate::services::simulator::SimulationModel;
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
    /// Print the configuration file location
    Path,
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug, Default)]
pub struct ConfigSetArgs {
    /// Instrument catalog JSON file
    #[arg(long, value_name = "FILE", conflicts_with = "clear_catalog")]
    catalog: Option<PathBuf>,

    /// Go back to the embedded catalog
    #[arg(long)]
    clear_catalog: bool,

    /// Matching tolerance in mm
    #[arg(long, value_name = "MM")]
    tolerance: Option<f64>,

    /// Samples per simulated signal
    #[arg(long, value_name = "N")]
    samples: Option<usize>,

    /// Simulated time window in seconds
    #[arg(long, value_name = "S")]
    duration: Option<f64>,

    /// Model that --reference-radius and --coupling apply to
    #[arg(long, value_name = "MODEL")]
    model: Option<String>,

    /// Reference radius in mm for --model
    #[arg(long, value_name = "MM", requires = "model")]
    reference_radius: Option<f64>,

    /// Interior coupling factor for --model
    #[arg(long, value_name = "C", requires = "model")]
    coupling: Option<f64>,

    /// Sphere radius of the simplified geometry in mm
    #[arg(long, value_name = "MM")]
    sphere_radius: Option<f64>,

    /// Face centroid distance of the dodecahedron geometry in mm
    #[arg(long, value_name = "MM")]
    face_distance: Option<f64>,

    /// Scale applied to measured diameters on the dodecahedron geometry
    #[arg(long, value_name = "FACTOR")]
    diameter_scale: Option<f64>,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    config_file: Option<String>,
    #[serde(flatten)]
    config: &'a Config,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
            ConfigCommand::Path => {
                let path = Config::config_file_path().map_err(|e| {
                    CliError::io(format!("Failed to determine config path: {e:#}"))
                })?;
                println!("{}", path.display());
                Ok(())
            }
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;

        if self.json {
            let config_file = Config::config_file_path()
                .ok()
                .map(|p| p.to_string_lossy().to_string());
            print_json(&ConfigOutput {
                config_file,
                config: &config,
            })
        } else {
            output_human_readable(&config);
            Ok(())
        }
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if !self.has_changes() {
            return Err(CliError::validation(format!(
                "At least one configuration option must be specified (see `{APP_BINARY_NAME} config set --help`)"
            )));
        }

        let mut config = load_config()?;
        self.apply(&mut config)?;

        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");

        Ok(())
    }

    fn has_changes(&self) -> bool {
        self.catalog.is_some()
            || self.clear_catalog
            || self.tolerance.is_some()
            || self.samples.is_some()
            || self.duration.is_some()
            || self.reference_radius.is_some()
            || self.coupling.is_some()
            || self.sphere_radius.is_some()
            || self.face_distance.is_some()
            || self.diameter_scale.is_some()
    }

    /// Applies the requested changes and validates the result.
    fn apply(&self, config: &mut Config) -> CliResult<()> {
        if let Some(path) = &self.catalog {
            if !path.exists() {
                return Err(CliError::validation(format!(
                    "Catalog file does not exist: {}",
                    path.display()
                )));
            }
            config.paths.catalog = Some(path.clone());
        }
        if self.clear_catalog {
            config.paths.catalog = None;
        }

        if let Some(tolerance) = self.tolerance {
            config.matching.tolerance_mm = tolerance;
        }
        if let Some(samples) = self.samples {
            config.simulation.sample_count = samples;
        }
        if let Some(duration) = self.duration {
            config.simulation.duration_s = duration;
        }

        if self.reference_radius.is_some() || self.coupling.is_some() {
            let model: SimulationModel = self
                .model
                .as_deref()
                .ok_or_else(|| {
                    CliError::validation("--model is required with --reference-radius or --coupling")
                })?
                .parse()?;
            let constants: &mut ModelConfig = match model {
                SimulationModel::PlaneWave => &mut config.simulation.plane_wave,
                SimulationModel::Diffraction => &mut config.simulation.diffraction,
            };
            if let Some(radius) = self.reference_radius {
                constants.reference_radius_mm = radius;
            }
            if let Some(coupling) = self.coupling {
                constants.interior_coupling = coupling;
            }
        }

        if let Some(radius) = self.sphere_radius {
            config.geometry.sphere_radius_mm = radius;
        }
        if let Some(distance) = self.face_distance {
            config.geometry.face_center_distance_mm = distance;
        }
        if let Some(scale) = self.diameter_scale {
            config.geometry.diameter_scale = scale;
        }

        config
            .validate()
            .map_err(|e| CliError::validation(format!("Invalid configuration: {e:#}")))
    }
}

/// Output configuration in human-readable format
fn output_human_readable(config: &Config) {
    println!("Dodecasim Configuration");
    println!("=======================");
    println!();

    println!("Paths:");
    match &config.paths.catalog {
        Some(path) => println!("  Catalog: {}", path.display()),
        None => println!("  Catalog: (embedded)"),
    }
    println!();

    println!("Matching:");
    println!("  Tolerance: {} mm", config.matching.tolerance_mm);
    println!();

    println!("Simulation:");
    println!("  Samples: {}", config.simulation.sample_count);
    println!("  Duration: {} s", config.simulation.duration_s);
    for (name, model) in [
        ("Plane wave", &config.simulation.plane_wave),
        ("Diffraction", &config.simulation.diffraction),
    ] {
        println!(
            "  {name}: reference radius {} mm, coupling {}",
            model.reference_radius_mm, model.interior_coupling
        );
    }
    println!();

    println!("Geometry:");
    println!("  Sphere Radius: {} mm", config.geometry.sphere_radius_mm);
    println!(
        "  Face Center Distance: {} mm",
        config.geometry.face_center_distance_mm
    );
    println!("  Diameter Scale: {}", config.geometry.diameter_scale);
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::common::ExitCode;

    #[test]
    fn test_set_requires_an_option() {
        let args = ConfigSetArgs::default();
        assert!(!args.has_changes());
    }

    #[test]
    fn test_apply_model_constants() {
        let args = ConfigSetArgs {
            model: Some("diffraction".to_string()),
            reference_radius: Some(40.0),
            coupling: Some(0.1),
            ..Default::default()
        };
        let mut config = Config::new();
        args.apply(&mut config).unwrap();

        assert_eq!(config.simulation.diffraction.reference_radius_mm, 40.0);
        assert_eq!(config.simulation.diffraction.interior_coupling, 0.1);
        assert_eq!(config.simulation.plane_wave, Config::new().simulation.plane_wave);
    }

    #[test]
    fn test_apply_rejects_invalid_values() {
        let args = ConfigSetArgs {
            tolerance: Some(-1.0),
            ..Default::default()
        };
        let err = args.apply(&mut Config::new()).unwrap_err();
        assert_eq!(err.code, ExitCode::Validation);

        let args = ConfigSetArgs {
            model: Some("cymatic".to_string()),
            coupling: Some(0.1),
            ..Default::default()
        };
        assert!(args.apply(&mut Config::new()).is_err());
    }

    #[test]
    fn test_clear_catalog() {
        let args = ConfigSetArgs {
            clear_catalog: true,
            ..Default::default()
        };
        let mut config = Config::new();
        config.paths.catalog = Some(PathBuf::from("/tmp/whatever.json"));
        // Validation would reject the missing file, but clearing removes it first
        args.apply(&mut config).unwrap();
        assert!(config.paths.catalog.is_none());
    }
}
