//! Spiral (contour-parallel) fill
//!
//! Offsets the outer ring inward, first by half a pitch and then by a full
//! pitch per ring, until the offset vanishes. Rings are clipped against the
//! holes, rotated to start next to where the previous ring ended and joined
//! by short radial transitions.

use super::{FillParameters, FillSegment, InfillPattern};
use crate::clip;
use crate::contour::signed_area;
use crate::hierarchy::PolygonWithHoles;
use cavalier_contours::polyline::{PlineSource, PlineSourceMut, PlineVertex, Polyline};
use laserfill_core::{Point2, Precision, ShutterState};
use std::f64::consts::PI;
use std::panic;
use tracing::warn;

/// Inward offset rings joined by radial transitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpiralFill;

impl InfillPattern for SpiralFill {
    fn name(&self) -> &'static str {
        "spiral"
    }

    fn generate(
        &self,
        polygon: &PolygonWithHoles,
        pitch: f64,
        params: &FillParameters,
    ) -> Vec<FillSegment> {
        let Some(bounds) = polygon.outer.bounds() else {
            return Vec::new();
        };
        let boundary = prepare_polyline(polygon.outer.points(), params.precision.tolerance());
        if boundary.vertex_count() < 3 {
            return Vec::new();
        }

        let holes = polygon.hole_rings();
        let tolerance = params.precision.tolerance();
        let max_rings = (bounds.width().max(bounds.height()) / pitch).ceil() as usize + 2;

        let mut segments = Vec::new();
        let mut previous_end: Option<Point2> = None;
        let mut offset = pitch / 2.0;
        let mut pass = 0usize;

        while pass < max_rings {
            // Negative offset on a clockwise polyline moves inward.
            let offsets = match panic::catch_unwind(panic::AssertUnwindSafe(|| {
                boundary.parallel_offset(-offset)
            })) {
                Ok(offsets) => offsets,
                Err(_) => {
                    warn!(offset, "panic during parallel offset, stopping spiral");
                    break;
                }
            };
            if offsets.is_empty() {
                break;
            }

            for pline in &offsets {
                let mut ring = flatten_polyline(pline, params.arc_resolution, params.precision);
                if ring.len() < 3 {
                    continue;
                }
                if let Some(prev) = previous_end {
                    rotate_to_nearest(&mut ring, &prev);
                    if !prev.approx_eq(&ring[0], tolerance) {
                        segments.push(FillSegment::open(prev, ring[0], pass));
                    }
                }

                let n = ring.len();
                for i in 0..n {
                    let a = ring[i];
                    let b = ring[(i + 1) % n];
                    for (start, end) in clip::split_segment(&a, &b, &holes, tolerance) {
                        let mid = start.midpoint(&end);
                        let in_hole = holes.iter().any(|hole| {
                            clip::locate(&mid, hole, tolerance) == clip::Location::Inside
                        });
                        segments.push(FillSegment {
                            start,
                            end,
                            state: if in_hole {
                                ShutterState::Closed
                            } else {
                                ShutterState::Open
                            },
                            pass,
                        });
                    }
                }
                previous_end = Some(ring[0]);
            }

            offset += pitch;
            pass += 1;
        }

        segments
    }
}

/// Drops repeated vertices and forces clockwise orientation.
fn prepare_polyline(points: &[Point2], tolerance: f64) -> Polyline<f64> {
    let mut clean: Vec<Point2> = Vec::with_capacity(points.len());
    for p in points {
        match clean.last() {
            Some(last) if last.approx_eq(p, tolerance) => {}
            _ => clean.push(*p),
        }
    }
    if clean.len() > 1 {
        if let (Some(first), Some(last)) = (clean.first(), clean.last()) {
            if first.approx_eq(last, tolerance) {
                clean.pop();
            }
        }
    }

    if signed_area(&clean) > 0.0 {
        clean.reverse();
    }

    let mut polyline = Polyline::new();
    for p in clean {
        polyline.add_vertex(PlineVertex::new(p.x, p.y, 0.0));
    }
    polyline.set_is_closed(true);
    polyline
}

/// Closed polyline to points, bulged segments flattened at `resolution`
/// chords per full circle.
fn flatten_polyline(pline: &Polyline<f64>, resolution: u32, precision: Precision) -> Vec<Point2> {
    let count = pline.vertex_count();
    let mut points = Vec::with_capacity(count);

    for i in 0..count {
        let v1 = pline.at(i);
        let v2 = pline.at((i + 1) % count);
        points.push(Point2::rounded(v1.x, v1.y, precision));

        if v1.bulge.abs() <= 1e-9 {
            continue;
        }
        let (dx, dy) = (v2.x - v1.x, v2.y - v1.y);
        let chord = dx.hypot(dy);
        if chord <= 1e-9 {
            continue;
        }

        let sweep = 4.0 * v1.bulge.atan();
        // Signed distance from chord midpoint to centre, left of the chord for b > 0.
        let apothem = chord * (1.0 - v1.bulge * v1.bulge) / (4.0 * v1.bulge);
        let cx = (v1.x + v2.x) / 2.0 - dy / chord * apothem;
        let cy = (v1.y + v2.y) / 2.0 + dx / chord * apothem;
        let radius = (v1.x - cx).hypot(v1.y - cy);
        let start_angle = (v1.y - cy).atan2(v1.x - cx);

        let chords = ((resolution as f64 * sweep.abs() / (2.0 * PI)).ceil() as usize).max(1);
        for j in 1..chords {
            let angle = start_angle + sweep * j as f64 / chords as f64;
            points.push(Point2::rounded(
                cx + radius * angle.cos(),
                cy + radius * angle.sin(),
                precision,
            ));
        }
    }

    points.dedup();
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    points
}

/// Rotates a closed ring so it starts at the vertex nearest `target`.
fn rotate_to_nearest(ring: &mut [Point2], target: &Point2) {
    let nearest = ring
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.distance_to(target).total_cmp(&b.distance_to(target)))
        .map(|(i, _)| i)
        .unwrap_or(0);
    ring.rotate_left(nearest);
}
