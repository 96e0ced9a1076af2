//! Rounded 2D and 3D points.
//!
//! Points are plain `Copy` values. Constructors taking a [`Precision`] round
//! every coordinate so that later containment tests compare snapped values.

use super::Precision;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in a face's local 2D frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    /// Creates a point without rounding.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Creates a point rounded to `precision`.
    pub fn rounded(x: f64, y: f64, precision: Precision) -> Self {
        Self {
            x: precision.round(x),
            y: precision.round(y),
        }
    }

    /// Re-rounds an existing point.
    pub fn snap(self, precision: Precision) -> Self {
        Self::rounded(self.x, self.y, precision)
    }

    pub fn distance_to(&self, other: &Point2) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// True when both points lie within `tolerance` of each other.
    pub fn approx_eq(&self, other: &Point2, tolerance: f64) -> bool {
        self.distance_to(other) <= tolerance
    }

    /// Linear interpolation, `t = 0` yields `self`.
    pub fn lerp(&self, other: &Point2, t: f64) -> Point2 {
        Point2::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    pub fn midpoint(&self, other: &Point2) -> Point2 {
        self.lerp(other, 0.5)
    }
}

impl fmt::Display for Point2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A point in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    /// Creates a point without rounding.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Creates a point rounded to `precision`.
    pub fn rounded(x: f64, y: f64, z: f64, precision: Precision) -> Self {
        Self {
            x: precision.round(x),
            y: precision.round(y),
            z: precision.round(z),
        }
    }

    pub fn snap(self, precision: Precision) -> Self {
        Self::rounded(self.x, self.y, self.z, precision)
    }

    pub fn distance_to(&self, other: &Point3) -> f64 {
        (self.to_vector() - other.to_vector()).norm()
    }

    pub fn approx_eq(&self, other: &Point3, tolerance: f64) -> bool {
        self.distance_to(other) <= tolerance
    }

    pub fn to_vector(self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    pub fn from_vector(v: &Vector3<f64>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<[f64; 3]> for Point3 {
    fn from(c: [f64; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
