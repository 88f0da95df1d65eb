//! Hole positions in 3D space.

use serde::{Deserialize, Serialize};
use std::ops::{Mul, Sub};

/// 3D vector in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
    /// Z component
    pub z: f64,
}

impl Vec3 {
    /// The origin.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Creates a vector from its components.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Dot product.
    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Euclidean norm.
    #[must_use]
    pub fn norm(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self - other).norm()
    }

    /// Unit vector in the same direction, or `None` for the zero vector.
    #[must_use]
    pub fn normalized(self) -> Option<Self> {
        let norm = self.norm();
        if norm > 0.0 && norm.is_finite() {
            Some(self * (1.0 / norm))
        } else {
            None
        }
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Position of one hole, plus the data the diffraction model needs.
///
/// `index` is the hole identifier. A geometry is a `Vec<GeometryPoint>` whose
/// element `i` carries `index == i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryPoint {
    /// Hole identifier
    pub index: usize,
    /// Hole center in millimeters
    pub position: Vec3,
    /// Outward unit normal of the face carrying the hole
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal: Option<Vec3>,
    /// Hole diameter in millimeters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diameter_mm: Option<f64>,
}

impl GeometryPoint {
    /// Creates a point with only a position.
    #[must_use]
    pub const fn new(index: usize, position: Vec3) -> Self {
        Self {
            index,
            position,
            normal: None,
            diameter_mm: None,
        }
    }

    /// Sets the face normal.
    #[must_use]
    pub const fn with_normal(mut self, normal: Vec3) -> Self {
        self.normal = Some(normal);
        self
    }

    /// Sets the hole diameter.
    #[must_use]
    pub const fn with_diameter(mut self, diameter_mm: f64) -> Self {
        self.diameter_mm = Some(diameter_mm);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_arithmetic() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);

        assert_eq!(b - a, Vec3::new(3.0, 3.0, 3.0));
        assert_eq!(a * 2.0, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(a.dot(b), 32.0);
    }

    #[test]
    fn test_vec3_norm_and_distance() {
        assert_eq!(Vec3::new(3.0, 4.0, 0.0).norm(), 5.0);
        assert_eq!(Vec3::ZERO.distance(Vec3::new(0.0, 0.0, 343.0)), 343.0);
    }

    #[test]
    fn test_vec3_normalized() {
        let unit = Vec3::new(0.0, 0.0, 5.0).normalized().unwrap();
        assert_eq!(unit, Vec3::new(0.0, 0.0, 1.0));
        assert!(Vec3::ZERO.normalized().is_none());
    }

    #[test]
    fn test_geometry_point_builder() {
        let point = GeometryPoint::new(3, Vec3::new(1.0, 0.0, 0.0))
            .with_normal(Vec3::new(1.0, 0.0, 0.0))
            .with_diameter(21.0);

        assert_eq!(point.index, 3);
        assert_eq!(point.normal, Some(Vec3::new(1.0, 0.0, 0.0)));
        assert_eq!(point.diameter_mm, Some(21.0));
    }
}
