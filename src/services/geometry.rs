//! Centralized geometry building service.
//!
//! This module generates the hole positions the simulator consumes. Two
//! providers exist:
//!
//! - [`sphere_sample_points`]: the simplified placement, taking vertices of the
//!   golden-ratio construction as sample points on a sphere.
//! - [`dodecahedron_face_geometry`]: the measured artifact, with one hole per
//!   pentagonal face at the face centroid, facing outward.
//!
//! [`build_geometry_for_model`] picks the provider matching a simulation model.

use std::f64::consts::PI;

use crate::config::GeometryConfig;
use crate::error::{AcousticsError, Result};
use crate::models::{GeometryPoint, HoleMeasurement, Vec3};
use crate::services::simulator::SimulationModel;

/// Golden ratio.
const PHI: f64 = 1.618_033_988_749_895;

/// Number of faces of a dodecahedron.
pub const FACE_COUNT: usize = 12;

/// Generates `count` sample points from the golden-ratio vertex construction.
///
/// The candidate points are `(±1, ±1, ±1)` on the diagonal together with the
/// cyclic permutations of `(0, ±φ, ±1/φ)`. They are sorted lexicographically,
/// deduplicated, and the first `count` are scaled by `radius`. All candidates
/// share the norm `√3`, so the points lie on a sphere of radius `radius·√3`.
///
/// # Errors
///
/// Returns `InvalidArgument` if `count` is zero or exceeds the 14 unique
/// candidates, or if `radius` isn't positive.
pub fn sphere_sample_points(count: usize, radius: f64) -> Result<Vec<GeometryPoint>> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(AcousticsError::invalid_argument(format!(
            "sphere radius must be positive, got {radius}"
        )));
    }

    let inv_phi = 1.0 / PHI;
    let mut candidates = Vec::new();
    for i in [-1.0, 1.0] {
        for j in [-1.0, 1.0] {
            for k in [-1.0, 1.0] {
                candidates.push(Vec3::new(i, i, i));
                candidates.push(Vec3::new(0.0, j * PHI, k * inv_phi));
                candidates.push(Vec3::new(j * PHI, k * inv_phi, 0.0));
                candidates.push(Vec3::new(k * inv_phi, 0.0, j * PHI));
            }
        }
    }

    candidates.sort_by(|a, b| {
        a.x.total_cmp(&b.x)
            .then(a.y.total_cmp(&b.y))
            .then(a.z.total_cmp(&b.z))
    });
    candidates.dedup();

    if count == 0 || count > candidates.len() {
        return Err(AcousticsError::invalid_argument(format!(
            "sphere sampling supports 1 to {} points, got {count}",
            candidates.len()
        )));
    }

    Ok(candidates
        .into_iter()
        .take(count)
        .enumerate()
        .map(|(index, p)| GeometryPoint::new(index, p * radius))
        .collect())
}

/// Outward unit normals of the twelve faces, z axis up.
///
/// Order: top face, the upper ring of five (azimuth 0°, 72°, …), bottom face,
/// then the lower ring of five offset by 36°. Adjacent faces meet at
/// `cos θ = 1/√5`.
#[must_use]
pub fn dodecahedron_face_normals() -> [Vec3; FACE_COUNT] {
    let ring_polar = (1.0 / 5.0_f64.sqrt()).acos();
    let ring = |polar: f64, azimuth_deg: f64| {
        let azimuth = azimuth_deg * PI / 180.0;
        Vec3::new(
            polar.sin() * azimuth.cos(),
            polar.sin() * azimuth.sin(),
            polar.cos(),
        )
    };

    let mut normals = [Vec3::ZERO; FACE_COUNT];
    normals[0] = Vec3::new(0.0, 0.0, 1.0);
    normals[6] = Vec3::new(0.0, 0.0, -1.0);
    for k in 0..5 {
        let step = 72.0 * k as f64;
        normals[1 + k] = ring(ring_polar, step);
        normals[7 + k] = ring(PI - ring_polar, step + 36.0);
    }
    normals
}

/// Builds the measured artifact's geometry: one hole per face.
///
/// Hole `i` sits at `normal_i * center_distance` with outward normal
/// `normal_i` and diameter `diameters[i] * diameter_scale`. The first six
/// measurements belong to the upper half, the last six to the lower half.
///
/// # Errors
///
/// Returns `InvalidArgument` unless there are exactly twelve measurements and
/// both `center_distance` and `diameter_scale` are positive.
pub fn dodecahedron_face_geometry(
    diameters: &HoleMeasurement,
    center_distance: f64,
    diameter_scale: f64,
) -> Result<Vec<GeometryPoint>> {
    if diameters.len() != FACE_COUNT {
        return Err(AcousticsError::invalid_argument(format!(
            "a dodecahedron has {FACE_COUNT} faces but {} diameters were given",
            diameters.len()
        )));
    }
    if !center_distance.is_finite() || center_distance <= 0.0 {
        return Err(AcousticsError::invalid_argument(format!(
            "face center distance must be positive, got {center_distance}"
        )));
    }
    if !diameter_scale.is_finite() || diameter_scale <= 0.0 {
        return Err(AcousticsError::invalid_argument(format!(
            "diameter scale must be positive, got {diameter_scale}"
        )));
    }

    Ok(dodecahedron_face_normals()
        .into_iter()
        .zip(diameters.iter())
        .map(|(normal, (index, diameter))| {
            GeometryPoint::new(index, normal * center_distance)
                .with_normal(normal)
                .with_diameter(diameter * diameter_scale)
        })
        .collect())
}

/// Builds the geometry a simulation model runs on.
///
/// The plane-wave model uses sphere samples (one per hole, each tagged with
/// its measured diameter); the diffraction model uses the face geometry.
pub fn build_geometry_for_model(
    model: SimulationModel,
    holes: &HoleMeasurement,
    config: &GeometryConfig,
) -> Result<Vec<GeometryPoint>> {
    match model {
        SimulationModel::PlaneWave => {
            let points = sphere_sample_points(holes.len(), config.sphere_radius_mm)?;
            Ok(points
                .into_iter()
                .zip(holes.diameters())
                .map(|(point, &diameter)| point.with_diameter(diameter))
                .collect())
        }
        SimulationModel::Diffraction => dodecahedron_face_geometry(
            holes,
            config.face_center_distance_mm,
            config.diameter_scale,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_sample_points_unique_on_sphere() {
        let points = sphere_sample_points(12, 80.0).unwrap();
        assert_eq!(points.len(), 12);

        let expected_radius = 80.0 * 3.0_f64.sqrt();
        for (i, point) in points.iter().enumerate() {
            assert_eq!(point.index, i);
            assert!((point.position.norm() - expected_radius).abs() < 1e-9);
        }

        for (i, a) in points.iter().enumerate() {
            for b in &points[i + 1..] {
                assert!(a.position.distance(b.position) > 1e-6);
            }
        }
    }

    #[test]
    fn test_sphere_sample_points_sorted_order() {
        let points = sphere_sample_points(12, 1.0).unwrap();
        let inv_phi = 1.0 / PHI;

        assert_eq!(points[0].position, Vec3::new(-PHI, -inv_phi, 0.0));
        assert_eq!(points[2].position, Vec3::new(-1.0, -1.0, -1.0));
        assert_eq!(points[11].position, Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_sphere_sample_points_limits() {
        assert!(sphere_sample_points(0, 80.0).is_err());
        assert!(sphere_sample_points(14, 80.0).is_ok());
        assert!(sphere_sample_points(15, 80.0).is_err());
        assert!(sphere_sample_points(12, 0.0).is_err());
    }

    #[test]
    fn test_face_normals_form_dodecahedron() {
        let normals = dodecahedron_face_normals();
        let adjacent_cos = 1.0 / 5.0_f64.sqrt();

        for a in &normals {
            assert!((a.norm() - 1.0).abs() < 1e-12);
            let neighbours = normals
                .iter()
                .filter(|b| (a.dot(**b) - adjacent_cos).abs() < 1e-9)
                .count();
            assert_eq!(neighbours, 5);
        }
    }

    #[test]
    fn test_face_geometry() {
        let holes = HoleMeasurement::reference();
        let points = dodecahedron_face_geometry(&holes, 40.0, 1.5).unwrap();

        assert_eq!(points.len(), 12);
        for point in &points {
            assert!((point.position.norm() - 40.0).abs() < 1e-9);
            let normal = point.normal.unwrap();
            assert!((normal.norm() - 1.0).abs() < 1e-12);
            // Outward normal is parallel to the centroid direction
            assert!((normal.dot(point.position) - 40.0).abs() < 1e-9);
        }

        assert_eq!(points[0].diameter_mm, Some(39.0));
        assert_eq!(points[6].diameter_mm, Some(25.5 * 1.5));
    }

    #[test]
    fn test_face_geometry_requires_twelve_holes() {
        let holes = HoleMeasurement::new(vec![26.0, 21.5]).unwrap();
        assert!(dodecahedron_face_geometry(&holes, 40.0, 1.5).is_err());

        let holes = HoleMeasurement::reference();
        assert!(dodecahedron_face_geometry(&holes, 0.0, 1.5).is_err());
        assert!(dodecahedron_face_geometry(&holes, 40.0, -1.0).is_err());
    }

    #[test]
    fn test_build_geometry_for_model() {
        let holes = HoleMeasurement::reference();
        let config = GeometryConfig::default();

        let plane = build_geometry_for_model(SimulationModel::PlaneWave, &holes, &config).unwrap();
        assert_eq!(plane.len(), 12);
        assert!(plane[0].normal.is_none());
        assert_eq!(plane[0].diameter_mm, Some(26.0));

        let faces =
            build_geometry_for_model(SimulationModel::Diffraction, &holes, &config).unwrap();
        assert_eq!(faces.len(), 12);
        assert!(faces.iter().all(|p| p.normal.is_some()));
    }
}
