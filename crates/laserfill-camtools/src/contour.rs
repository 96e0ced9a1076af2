//! Closed contours in world space and their projected 2D rings.

use laserfill_core::{AciColor, Point2, Point3};
use nalgebra::Vector3;

/// An assembled closed contour in world space.
///
/// Vertices are stored without repeating the first point at the end.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    pub vertices: Vec<Point3>,
    pub color: AciColor,
    /// Unit extrusion vector of the face the contour lies on.
    pub orientation: Vector3<f64>,
}

impl Contour {
    pub fn new(vertices: Vec<Point3>, color: AciColor, orientation: Vector3<f64>) -> Self {
        Self {
            vertices,
            color,
            orientation,
        }
    }
}

/// Axis-aligned bounding box in a local 2D frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point2,
    pub max: Point2,
}

impl Bounds {
    /// Bounding box of a point set, `None` when empty.
    pub fn of(points: &[Point2]) -> Option<Self> {
        let first = points.first()?;
        let mut bounds = Bounds {
            min: *first,
            max: *first,
        };
        for p in &points[1..] {
            bounds.min.x = bounds.min.x.min(p.x);
            bounds.min.y = bounds.min.y.min(p.y);
            bounds.max.x = bounds.max.x.max(p.x);
            bounds.max.y = bounds.max.y.max(p.y);
        }
        Some(bounds)
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

/// A contour projected into its face's 2D frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    points: Vec<Point2>,
    color: AciColor,
    signed_area: f64,
}

impl Ring {
    /// Builds a ring from already-rounded points. A repeated closing point is dropped.
    pub fn new(mut points: Vec<Point2>, color: AciColor) -> Self {
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        let signed_area = signed_area(&points);
        Self {
            points,
            color,
            signed_area,
        }
    }

    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    pub fn color(&self) -> AciColor {
        self.color
    }

    /// Shoelace area, positive for counter-clockwise rings.
    pub fn signed_area(&self) -> f64 {
        self.signed_area
    }

    pub fn area(&self) -> f64 {
        self.signed_area.abs()
    }

    pub fn is_counter_clockwise(&self) -> bool {
        self.signed_area > 0.0
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::of(&self.points)
    }

    /// Edges as `(start, end)` pairs including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (Point2, Point2)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }
}

pub(crate) fn signed_area(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let twice: f64 = (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum();
    twice / 2.0
}
