//! Shared CLI plumbing: error type, exit codes and input loading.

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::catalog;
use crate::config::Config;
use crate::error::AcousticsError;
use crate::models::{Catalog, HoleMeasurement};

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command completed
    Success = 0,
    /// Invalid arguments or input data
    Validation = 1,
    /// File system or serialization failure
    Io = 2,
}

impl ExitCode {
    /// Numeric process exit code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error returned by CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Exit code to terminate with
    pub code: ExitCode,
    /// Message printed to stderr
    pub message: String,
}

impl CliError {
    /// Invalid input; exits with code 1.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::Validation,
            message: message.into(),
        }
    }

    /// I/O failure; exits with code 2.
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::Io,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

impl From<AcousticsError> for CliError {
    fn from(err: AcousticsError) -> Self {
        Self::validation(err.to_string())
    }
}

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Loads the configuration, falling back to defaults only when none exists.
pub fn load_config() -> CliResult<Config> {
    Config::load().map_err(config_error)
}

/// Maps a config load failure to an exit code.
///
/// A file that can't be read is an I/O failure; a file that reads but
/// doesn't parse or validate is a validation failure.
fn config_error(err: anyhow::Error) -> CliError {
    let message = format!("Failed to load configuration: {err:#}");
    if err.chain().any(|cause| cause.is::<std::io::Error>()) {
        CliError::io(message)
    } else {
        CliError::validation(message)
    }
}

/// Parses `--holes`, or returns the reference measurement when absent.
pub fn load_holes(holes: Option<&str>) -> CliResult<HoleMeasurement> {
    match holes {
        Some(list) => Ok(HoleMeasurement::parse_list(list)?),
        None => Ok(HoleMeasurement::reference()),
    }
}

/// Loads the catalog from `--catalog`, the configured path, or the embedded file.
pub fn load_catalog(explicit: Option<&Path>, config: &Config) -> CliResult<Catalog> {
    let path = explicit.or(config.paths.catalog.as_deref());
    catalog::load(path).map_err(|e| CliError::io(format!("Failed to load catalog: {e:#}")))
}

/// Prints a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ExitCode::Success.code(), 0);
        assert_eq!(CliError::validation("bad").code.code(), 1);
        assert_eq!(CliError::io("disk").code.code(), 2);
    }

    #[test]
    fn test_engine_errors_are_validation_failures() {
        let err: CliError = AcousticsError::invalid_argument("negative tolerance").into();
        assert_eq!(err.code, ExitCode::Validation);
        assert!(err.message.contains("negative tolerance"));
    }

    #[test]
    fn test_unreadable_config_is_io_failure() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        // A directory where the file should be can't be read as a file
        let path = temp_dir.path().join("config.toml");
        std::fs::create_dir(&path).unwrap();

        let err = config_error(Config::load_from(&path).unwrap_err());
        assert_eq!(err.code, ExitCode::Io);
    }

    #[test]
    fn test_invalid_config_is_validation_failure() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        std::fs::write(&path, "[matching]\ntolerance_mm = -1.0\n").unwrap();
        let err = config_error(Config::load_from(&path).unwrap_err());
        assert_eq!(err.code, ExitCode::Validation);

        std::fs::write(&path, "[matching\n").unwrap();
        let err = config_error(Config::load_from(&path).unwrap_err());
        assert_eq!(err.code, ExitCode::Validation);
    }

    #[test]
    fn test_load_holes_default_and_list() {
        assert_eq!(load_holes(None).unwrap(), HoleMeasurement::reference());
        assert_eq!(load_holes(Some("10,20")).unwrap().len(), 2);
        assert!(load_holes(Some("10,-20")).is_err());
    }
}
