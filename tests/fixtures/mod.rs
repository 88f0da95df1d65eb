//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use dodecasim::models::{Catalog, HoleMeasurement, ReferenceItem};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Path to the dodecasim binary
pub fn dodecasim_bin() -> &'static str {
    env!("CARGO_BIN_EXE_dodecasim")
}

/// Creates a Command with an isolated config directory.
///
/// Pass the same directory to several commands to share configuration
/// between them within one test.
pub fn isolated_command(args: &[&str], config_dir: &Path) -> Command {
    let mut cmd = Command::new(dodecasim_bin());
    cmd.env("DODECASIM_CONFIG_DIR", config_dir);
    cmd.env_remove("RUST_LOG");
    cmd.args(args);
    cmd
}

/// Runs a command and returns its output.
pub fn run(mut cmd: Command) -> Output {
    cmd.output().expect("Failed to execute command")
}

/// Asserts the exit code, printing stderr on failure.
pub fn assert_exit_code(output: &Output, expected: i32) {
    assert_eq!(
        output.status.code(),
        Some(expected),
        "Unexpected exit code. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Parses stdout as JSON.
pub fn stdout_json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("Should parse JSON output")
}

/// The two-item catalog used by the matching walkthrough: "A" at 26.2 mm
/// and "B" at 21.4 mm.
pub fn walkthrough_catalog() -> Catalog {
    Catalog::from_items(vec![
        ReferenceItem::new("A", 26.2, 100.0).with_culture("Alpha"),
        ReferenceItem::new("B", 21.4, 200.0),
    ])
    .expect("walkthrough catalog is valid")
}

/// The measurements used by the matching walkthrough.
pub fn walkthrough_holes() -> HoleMeasurement {
    HoleMeasurement::new(vec![26.0, 21.5, 16.5]).expect("walkthrough holes are valid")
}

/// Writes the walkthrough catalog as a catalog JSON file.
pub fn write_walkthrough_catalog(dir: &Path) -> PathBuf {
    let path = dir.join("catalog.json");
    let content = json!({
        "version": "1.0",
        "instruments": [
            { "name": "A", "diameter_mm": 26.2, "frequency_hz": 100.0, "culture": "Alpha" },
            { "name": "B", "diameter_mm": 21.4, "frequency_hz": 200.0 }
        ]
    });
    fs::write(
        &path,
        serde_json::to_string_pretty(&content).expect("serialize catalog"),
    )
    .expect("write catalog");
    path
}
