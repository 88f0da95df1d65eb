//! End-to-end tests for `dodecasim simulate`.

use dodecasim::export::read_simulation_archive;
use tempfile::TempDir;

mod fixtures;
use fixtures::*;

#[test]
fn test_simulate_plane_wave_summary() {
    let config_dir = TempDir::new().unwrap();
    let output = run(isolated_command(
        &["simulate", "--samples", "100", "--json"],
        config_dir.path(),
    ));
    assert_exit_code(&output, 0);

    let result = stdout_json(&output);
    assert_eq!(result["model"], "plane-wave");
    assert_eq!(result["excitation_index"], 0);
    assert_eq!(result["sample_count"], 100);
    assert!((result["wavelength_mm"].as_f64().unwrap() - 343.0).abs() < 1e-9);
    assert_eq!(result["reference_radius_mm"], 80.0);
    assert_eq!(result["interior_coupling"], 0.3);

    let holes = result["holes"].as_array().unwrap();
    assert_eq!(holes.len(), 11);
    assert!(holes.iter().all(|h| h["hole_index"] != 0));
    for hole in holes {
        let amplitude = hole["amplitude"].as_f64().unwrap();
        assert!(amplitude > 0.0 && amplitude <= 1.0);
    }

    assert_eq!(result["spread"]["pairs"], 55);
}

#[test]
fn test_simulate_diffraction_model() {
    let config_dir = TempDir::new().unwrap();
    let output = run(isolated_command(
        &[
            "simulate",
            "--model",
            "diffraction",
            "--excitation",
            "3",
            "--samples",
            "64",
            "--json",
        ],
        config_dir.path(),
    ));
    assert_exit_code(&output, 0);

    let result = stdout_json(&output);
    assert_eq!(result["model"], "diffraction");
    assert_eq!(result["reference_radius_mm"], 32.0);
    assert_eq!(result["interior_coupling"], 0.2);

    let holes = result["holes"].as_array().unwrap();
    assert_eq!(holes.len(), 11);
    assert!(holes.iter().all(|h| h["hole_index"] != 3));

    // Every face centroid sits 40 mm from the center, so no two are coincident
    for hole in holes {
        assert!(hole["distance_mm"].as_f64().unwrap() > 0.0);
    }
}

#[test]
fn test_simulate_excitation_out_of_range_fails() {
    let config_dir = TempDir::new().unwrap();
    let archive = config_dir.path().join("run.json");
    let output = run(isolated_command(
        &[
            "simulate",
            "--excitation",
            "12",
            "--output",
            archive.to_str().unwrap(),
        ],
        config_dir.path(),
    ));
    assert_exit_code(&output, 1);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("out of range"), "stderr: {stderr}");
    assert!(!archive.exists(), "no partial output may be written");
}

#[test]
fn test_simulate_rejects_bad_frequency_and_model() {
    let config_dir = TempDir::new().unwrap();

    let output = run(isolated_command(
        &["simulate", "--frequency", "0"],
        config_dir.path(),
    ));
    assert_exit_code(&output, 1);

    let output = run(isolated_command(
        &["simulate", "--model", "cymatic"],
        config_dir.path(),
    ));
    assert_exit_code(&output, 1);

    let output = run(isolated_command(
        &["simulate", "--medium", "vacuum"],
        config_dir.path(),
    ));
    assert_exit_code(&output, 1);
}

#[test]
fn test_simulate_diffraction_needs_twelve_holes() {
    let config_dir = TempDir::new().unwrap();
    let output = run(isolated_command(
        &["simulate", "--model", "diffraction", "--holes", "26,21.5,16.5"],
        config_dir.path(),
    ));
    assert_exit_code(&output, 1);
}

#[test]
fn test_simulate_light_medium() {
    let config_dir = TempDir::new().unwrap();
    let output = run(isolated_command(
        &["simulate", "--medium", "light", "--samples", "10", "--json"],
        config_dir.path(),
    ));
    assert_exit_code(&output, 0);

    let result = stdout_json(&output);
    assert_eq!(result["medium_speed_mm_per_s"], 3.0e11);
    assert!((result["wavelength_mm"].as_f64().unwrap() - 3.0e8).abs() < 1e-3);
}

#[test]
fn test_simulate_writes_archive() {
    let config_dir = TempDir::new().unwrap();
    let archive = config_dir.path().join("out").join("run.json");
    let output = run(isolated_command(
        &[
            "simulate",
            "--samples",
            "32",
            "--duration",
            "0.005",
            "--excitation",
            "5",
            "--output",
            archive.to_str().unwrap(),
        ],
        config_dir.path(),
    ));
    assert_exit_code(&output, 0);
    assert!(archive.exists());

    let loaded = read_simulation_archive(&archive).unwrap();
    assert_eq!(loaded.request.excitation_index, 5);
    assert_eq!(loaded.request.sample_count, 32);
    assert_eq!(loaded.output.positions.len(), 12);
    assert_eq!(loaded.output.per_hole.len(), 11);
    assert!(!loaded.output.per_hole.contains_key(&5));
    assert_eq!(loaded.output.interior.len(), 32);
    assert_eq!(loaded.output.time.samples.first(), Some(&0.0));
    assert!((loaded.output.time.samples[31] - 0.005).abs() < 1e-15);
}

#[test]
fn test_simulate_overrides_model_constants() {
    let config_dir = TempDir::new().unwrap();
    let output = run(isolated_command(
        &[
            "simulate",
            "--reference-radius",
            "50",
            "--coupling",
            "0",
            "--samples",
            "16",
            "--json",
        ],
        config_dir.path(),
    ));
    assert_exit_code(&output, 0);

    let result = stdout_json(&output);
    assert_eq!(result["reference_radius_mm"], 50.0);
    assert_eq!(result["interior_peak"], 0.0);
}
