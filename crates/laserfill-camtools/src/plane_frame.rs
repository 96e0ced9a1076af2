//! Plane Frame
//!
//! Deterministic orthonormal basis `(origin, u, v, n)` for a planar face.
//! Faces are projected into `(u, v)` for the 2D stages and lifted back
//! afterwards.

use crate::contour::Contour;
use laserfill_core::{GeometryError, Point2, Point3, Precision, Result};
use nalgebra::Vector3;

/// Above this `|n·Z|` the seed axis switches from Z to Y.
const SEED_SWITCH: f64 = 0.9;

/// Orthonormal right-handed frame on a face plane.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneFrame {
    origin: Vector3<f64>,
    u: Vector3<f64>,
    v: Vector3<f64>,
    n: Vector3<f64>,
    precision: Precision,
}

impl PlaneFrame {
    /// Builds the frame for an orientation vector.
    ///
    /// The seed axis is `Z`, or `Y` when the normal is within `acos(0.9)` of
    /// `Z`; then `u = normalize(seed × n)` and `v = n × u`.
    pub fn new(orientation: Vector3<f64>, origin: Point3, precision: Precision) -> Result<Self> {
        let length = orientation.norm();
        if !length.is_finite() || length <= f64::EPSILON {
            return Err(GeometryError::degenerate("orientation vector has zero length"));
        }
        let n = orientation / length;

        let seed = if n.dot(&Vector3::z()).abs() > SEED_SWITCH {
            Vector3::y()
        } else {
            Vector3::z()
        };
        let u = seed.cross(&n).normalize();
        let v = n.cross(&u);

        Ok(Self {
            origin: origin.to_vector(),
            u,
            v,
            n,
            precision,
        })
    }

    /// Frame whose origin is the mean of every vertex in `contours`.
    pub fn from_contours(
        orientation: Vector3<f64>,
        contours: &[Contour],
        precision: Precision,
    ) -> Result<Self> {
        let (sum, count) = contours
            .iter()
            .flat_map(|c| c.vertices.iter())
            .fold((Vector3::zeros(), 0usize), |(sum, count), p| {
                (sum + p.to_vector(), count + 1)
            });
        if count == 0 {
            return Err(GeometryError::degenerate("batch has no vertices"));
        }
        let mean = sum / count as f64;
        Self::new(orientation, Point3::from_vector(&mean), precision)
    }

    pub fn origin(&self) -> Point3 {
        Point3::from_vector(&self.origin)
    }

    pub fn u(&self) -> Vector3<f64> {
        self.u
    }

    pub fn v(&self) -> Vector3<f64> {
        self.v
    }

    pub fn normal(&self) -> Vector3<f64> {
        self.n
    }

    /// `(dot(p - origin, u), dot(p - origin, v))`, rounded.
    pub fn project(&self, p: &Point3) -> Point2 {
        let d = p.to_vector() - self.origin;
        Point2::rounded(d.dot(&self.u), d.dot(&self.v), self.precision)
    }

    /// `origin + q.x * u + q.y * v + h * n`, rounded.
    pub fn lift(&self, q: &Point2, h: f64) -> Point3 {
        let w = self.origin + self.u * q.x + self.v * q.y + self.n * h;
        Point3::rounded(w.x, w.y, w.z, self.precision)
    }

    /// Signed distance of `p` from the plane along the normal.
    pub fn height_of(&self, p: &Point3) -> f64 {
        (p.to_vector() - self.origin).dot(&self.n)
    }
}

/// Estimates a unit normal for a planar vertex loop (Newell's method).
///
/// Counter-clockwise loops seen from above give `+Z`.
pub fn estimate_normal(points: &[Point3]) -> Result<Vector3<f64>> {
    let n = points.len();
    if n < 3 {
        return Err(GeometryError::degenerate(
            "need three vertices to estimate a normal",
        ));
    }

    let mut normal = Vector3::<f64>::zeros();
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        normal.x += (a.y - b.y) * (a.z + b.z);
        normal.y += (a.z - b.z) * (a.x + b.x);
        normal.z += (a.x - b.x) * (a.y + b.y);
    }

    let length = normal.norm();
    if length <= f64::EPSILON {
        return Err(GeometryError::degenerate("vertices are collinear"));
    }
    Ok(normal / length)
}
