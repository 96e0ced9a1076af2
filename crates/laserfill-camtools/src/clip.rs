//! Planar clipping kernel shared by the fill and shutter stages.
//!
//! Rings are treated as implicitly closed point lists. Insideness uses the
//! even-odd rule; boundary proximity is decided with an explicit tolerance
//! so rounded coordinates on an edge never flip between inside and outside.

use laserfill_core::Point2;

/// Where a point lies relative to a ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Inside,
    Boundary,
    Outside,
}

/// Even-odd point-in-polygon test without tolerance.
pub fn point_in_ring(p: &Point2, ring: &[Point2]) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let a = ring[i];
        let b = ring[j];
        if (a.y > p.y) != (b.y > p.y) {
            let x = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if p.x < x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Shortest distance from `p` to segment `a..b`.
pub fn distance_to_segment(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    if len_sq <= f64::EPSILON {
        return p.distance_to(a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    p.distance_to(&Point2::new(a.x + t * dx, a.y + t * dy))
}

/// Shortest distance from `p` to the ring's boundary.
pub fn distance_to_boundary(p: &Point2, ring: &[Point2]) -> f64 {
    let n = ring.len();
    (0..n)
        .map(|i| distance_to_segment(p, &ring[i], &ring[(i + 1) % n]))
        .fold(f64::INFINITY, f64::min)
}

/// Classifies `p` against `ring`, treating anything within `tolerance` of an
/// edge as on the boundary.
pub fn locate(p: &Point2, ring: &[Point2], tolerance: f64) -> Location {
    if distance_to_boundary(p, ring) <= tolerance {
        Location::Boundary
    } else if point_in_ring(p, ring) {
        Location::Inside
    } else {
        Location::Outside
    }
}

/// Scan-line orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanAxis {
    /// Lines parallel to X, stepping in Y.
    X,
    /// Lines parallel to Y, stepping in X.
    Y,
}

impl ScanAxis {
    /// `(along, across)` coordinates of a point.
    pub fn split(self, p: &Point2) -> (f64, f64) {
        match self {
            Self::X => (p.x, p.y),
            Self::Y => (p.y, p.x),
        }
    }

    /// Inverse of [`ScanAxis::split`].
    pub fn join(self, along: f64, across: f64) -> Point2 {
        match self {
            Self::X => Point2::new(along, across),
            Self::Y => Point2::new(across, along),
        }
    }
}

/// Positions along a scan line where it crosses any of `rings`.
///
/// Edges are half-open in the across direction so a line through a vertex
/// counts it once. The result is sorted.
pub fn scanline_crossings(rings: &[&[Point2]], axis: ScanAxis, level: f64) -> Vec<f64> {
    let mut crossings = Vec::new();
    for ring in rings {
        let n = ring.len();
        for i in 0..n {
            let (a_along, a_across) = axis.split(&ring[i]);
            let (b_along, b_across) = axis.split(&ring[(i + 1) % n]);
            if (a_across <= level) != (b_across <= level) {
                let t = (level - a_across) / (b_across - a_across);
                crossings.push(a_along + t * (b_along - a_along));
            }
        }
    }
    crossings.sort_by(f64::total_cmp);
    crossings
}

/// Pairs sorted crossings into covered intervals, dropping any shorter than
/// `tolerance`. A trailing unpaired crossing is ignored.
pub fn pair_intervals(crossings: &[f64], tolerance: f64) -> Vec<(f64, f64)> {
    crossings
        .chunks_exact(2)
        .filter(|pair| pair[1] - pair[0] > tolerance)
        .map(|pair| (pair[0], pair[1]))
        .collect()
}

fn cross(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    ax * by - ay * bx
}

/// Parameters in `(0, 1)` where segment `a..b` meets the edges of `ring`.
///
/// Collinear overlaps contribute the overlapping edge's endpoints.
pub fn segment_crossings(a: &Point2, b: &Point2, ring: &[Point2], tolerance: f64) -> Vec<f64> {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len = dx.hypot(dy);
    if len <= tolerance {
        return Vec::new();
    }
    let t_eps = tolerance / len;
    let in_range = |t: f64| t > t_eps && t < 1.0 - t_eps;

    let n = ring.len();
    let mut params = Vec::new();
    for i in 0..n {
        let c = ring[i];
        let d = ring[(i + 1) % n];
        let (ex, ey) = (d.x - c.x, d.y - c.y);
        let (cx, cy) = (c.x - a.x, c.y - a.y);
        let denom = cross(dx, dy, ex, ey);

        if denom.abs() > f64::EPSILON * len * ex.hypot(ey).max(1.0) {
            let t = cross(cx, cy, ex, ey) / denom;
            let s = cross(cx, cy, dx, dy) / denom;
            if in_range(t) && (-t_eps..=1.0 + t_eps).contains(&s) {
                params.push(t);
            }
        } else if cross(cx, cy, dx, dy).abs() / len <= tolerance {
            for q in [c, d] {
                let t = ((q.x - a.x) * dx + (q.y - a.y) * dy) / (len * len);
                if in_range(t) {
                    params.push(t);
                }
            }
        }
    }
    params
}

/// Splits `a..b` at every crossing with `rings`, returning consecutive pieces.
pub fn split_segment(
    a: &Point2,
    b: &Point2,
    rings: &[&[Point2]],
    tolerance: f64,
) -> Vec<(Point2, Point2)> {
    let mut params: Vec<f64> = rings
        .iter()
        .flat_map(|ring| segment_crossings(a, b, ring, tolerance))
        .collect();
    params.sort_by(f64::total_cmp);

    let len = a.distance_to(b);
    let mut cuts = vec![0.0];
    for t in params {
        if let Some(&last) = cuts.last() {
            if (t - last) * len > tolerance {
                cuts.push(t);
            }
        }
    }
    if let Some(&last) = cuts.last() {
        if (1.0 - last) * len <= tolerance && cuts.len() > 1 {
            cuts.pop();
        }
    }
    cuts.push(1.0);

    cuts.windows(2)
        .map(|w| {
            let start = if w[0] == 0.0 { *a } else { a.lerp(b, w[0]) };
            let end = if w[1] == 1.0 { *b } else { a.lerp(b, w[1]) };
            (start, end)
        })
        .collect()
}
