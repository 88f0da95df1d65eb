//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::constants::{DEFAULT_DURATION_S, DEFAULT_SAMPLE_COUNT, DEFAULT_TOLERANCE_MM};
use crate::services::simulator::{SimulationModel, SimulatorSettings};

/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "DODECASIM_CONFIG_DIR";

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Instrument catalog JSON file (embedded catalog when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,
}

/// Matcher configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Maximum diameter difference for a match (mm)
    #[serde(default = "default_tolerance")]
    pub tolerance_mm: f64,
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE_MM
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            tolerance_mm: default_tolerance(),
        }
    }
}

/// Per-model simulator constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Reference radius used by distance attenuation (mm)
    pub reference_radius_mm: f64,
    /// Fraction of each hole signal coupled into the interior
    pub interior_coupling: f64,
}

impl ModelConfig {
    fn from_settings(settings: SimulatorSettings) -> Self {
        Self {
            reference_radius_mm: settings.reference_radius,
            interior_coupling: settings.interior_coupling,
        }
    }
}

/// Simulation configuration.
///
/// The plane-wave and diffraction models keep separate constants: the
/// simplified sphere is 80 mm across with 0.3 coupling, while the measured
/// artifact uses its 32 mm pentagon radius with 0.2 coupling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Samples per signal
    #[serde(default = "default_sample_count")]
    pub sample_count: usize,
    /// Simulated time window (s)
    #[serde(default = "default_duration")]
    pub duration_s: f64,
    /// Plane-wave model constants
    #[serde(default = "default_plane_wave")]
    pub plane_wave: ModelConfig,
    /// Diffraction model constants
    #[serde(default = "default_diffraction")]
    pub diffraction: ModelConfig,
}

fn default_sample_count() -> usize {
    DEFAULT_SAMPLE_COUNT
}

fn default_duration() -> f64 {
    DEFAULT_DURATION_S
}

fn default_plane_wave() -> ModelConfig {
    ModelConfig::from_settings(SimulatorSettings::plane_wave())
}

fn default_diffraction() -> ModelConfig {
    ModelConfig::from_settings(SimulatorSettings::diffraction())
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            sample_count: default_sample_count(),
            duration_s: default_duration(),
            plane_wave: default_plane_wave(),
            diffraction: default_diffraction(),
        }
    }
}

impl SimulationConfig {
    /// Simulator settings for a model.
    #[must_use]
    pub fn settings_for(&self, model: SimulationModel) -> SimulatorSettings {
        let constants = match model {
            SimulationModel::PlaneWave => &self.plane_wave,
            SimulationModel::Diffraction => &self.diffraction,
        };
        SimulatorSettings {
            model,
            reference_radius: constants.reference_radius_mm,
            interior_coupling: constants.interior_coupling,
        }
    }
}

/// Geometry provider configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryConfig {
    /// Scale of the simplified sphere sampling (mm)
    #[serde(default = "default_sphere_radius")]
    pub sphere_radius_mm: f64,
    /// Distance from the center to each face centroid (mm)
    #[serde(default = "default_face_center_distance")]
    pub face_center_distance_mm: f64,
    /// Factor applied to measured diameters on the face geometry
    #[serde(default = "default_diameter_scale")]
    pub diameter_scale: f64,
}

fn default_sphere_radius() -> f64 {
    80.0
}

fn default_face_center_distance() -> f64 {
    40.0
}

fn default_diameter_scale() -> f64 {
    1.5
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            sphere_radius_mm: default_sphere_radius(),
            face_center_distance_mm: default_face_center_distance(),
            diameter_scale: default_diameter_scale(),
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/dodecasim/config.toml`
/// - macOS: `~/Library/Application Support/dodecasim/config.toml`
/// - Windows: `%APPDATA%\dodecasim\config.toml`
///
/// `DODECASIM_CONFIG_DIR` overrides the directory.
///
/// # Validation
///
/// - `catalog` file must exist (if set)
/// - `tolerance_mm` must be non-negative
/// - radii, distances, scales and duration must be positive
/// - `sample_count` must be at least 1
/// - couplings must be non-negative
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// File system paths
    #[serde(default)]
    pub paths: PathConfig,
    /// Matcher settings
    #[serde(default)]
    pub matching: MatchingConfig,
    /// Simulator settings
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Geometry provider settings
    #[serde(default)]
    pub geometry: GeometryConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the config directory path.
    ///
    /// Honors `DODECASIM_CONFIG_DIR`, then falls back to the platform config
    /// directory.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join("dodecasim");

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::new());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from a specific file.
    pub fn load_from(config_path: &std::path::Path) -> Result<Self> {
        let content = fs::read_to_string(config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save(&self) -> Result<()> {
        self.validate()?;

        // Ensure config directory exists
        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir).context(format!(
            "Failed to create config directory: {}",
            config_dir.display()
        ))?;

        // Serialize to TOML
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let config_path = Self::config_file_path()?;
        let temp_path = config_path.with_extension("toml.tmp");

        // Write to temp file
        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        // Atomic rename
        fs::rename(&temp_path, &config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        tracing::debug!("Saved configuration to {}", config_path.display());
        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        if let Some(catalog) = &self.paths.catalog {
            if !catalog.exists() {
                anyhow::bail!("Catalog file does not exist: {}", catalog.display());
            }
        }

        let tolerance = self.matching.tolerance_mm;
        if tolerance.is_nan() || tolerance < 0.0 {
            anyhow::bail!("matching.tolerance_mm must be non-negative, got {tolerance}");
        }

        if self.simulation.sample_count == 0 {
            anyhow::bail!("simulation.sample_count must be at least 1");
        }
        ensure_positive("simulation.duration_s", self.simulation.duration_s)?;

        for (name, model) in [
            ("plane_wave", &self.simulation.plane_wave),
            ("diffraction", &self.simulation.diffraction),
        ] {
            ensure_positive(
                &format!("simulation.{name}.reference_radius_mm"),
                model.reference_radius_mm,
            )?;
            if !model.interior_coupling.is_finite() || model.interior_coupling < 0.0 {
                anyhow::bail!(
                    "simulation.{name}.interior_coupling must be non-negative, got {}",
                    model.interior_coupling
                );
            }
        }

        ensure_positive("geometry.sphere_radius_mm", self.geometry.sphere_radius_mm)?;
        ensure_positive(
            "geometry.face_center_distance_mm",
            self.geometry.face_center_distance_mm,
        )?;
        ensure_positive("geometry.diameter_scale", self.geometry.diameter_scale)?;

        Ok(())
    }
}

fn ensure_positive(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        anyhow::bail!("{name} must be a positive number, got {value}");
    }
    Ok(())
}
