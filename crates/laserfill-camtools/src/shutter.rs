//! Shutter annotation and path compaction
//!
//! [`ShutterAnnotator`] turns a raw fill into a continuous path whose
//! segments carry the beam state, splitting segments where they cross a
//! boundary. [`PathSimplifier`] then merges contiguous collinear runs.

use crate::clip;
use crate::fill::FillSegment;
use crate::hierarchy::PolygonWithHoles;
use laserfill_core::{Point2, ShutterState};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A shutter-annotated path segment in the face's 2D frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShutterSegment {
    pub start: Point2,
    pub end: Point2,
    pub state: ShutterState,
}

impl ShutterSegment {
    pub fn new(start: Point2, end: Point2, state: ShutterState) -> Self {
        Self { start, end, state }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    fn direction(&self) -> (f64, f64) {
        (self.end.x - self.start.x, self.end.y - self.start.y)
    }
}

/// Classifies every segment of a path as beam-on or beam-off.
#[derive(Debug, Clone)]
pub struct ShutterAnnotator {
    tolerance: f64,
}

impl ShutterAnnotator {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Inside or on the outer ring and not strictly inside any hole.
    pub fn allowed(&self, polygon: &PolygonWithHoles, p: &Point2) -> bool {
        polygon.covers(p, self.tolerance)
    }

    /// Materializes transits between raw segments and classifies the result.
    pub fn annotate(&self, polygon: &PolygonWithHoles, raw: &[FillSegment]) -> Vec<ShutterSegment> {
        let rings = polygon.rings();
        let mut path = Vec::with_capacity(raw.len() * 2);
        let mut cursor: Option<Point2> = None;

        for segment in raw {
            if let Some(prev) = cursor {
                if !prev.approx_eq(&segment.start, self.tolerance) {
                    self.classify_into(polygon, &rings, prev, segment.start, &mut path);
                }
            }
            self.classify_into(polygon, &rings, segment.start, segment.end, &mut path);
            cursor = Some(segment.end);
        }

        debug!(
            raw = raw.len(),
            annotated = path.len(),
            closed = path.iter().filter(|s| !s.state.is_open()).count(),
            "annotated shutter states"
        );
        path
    }

    fn classify_into(
        &self,
        polygon: &PolygonWithHoles,
        rings: &[&[Point2]],
        start: Point2,
        end: Point2,
        out: &mut Vec<ShutterSegment>,
    ) {
        if start.approx_eq(&end, self.tolerance) {
            return;
        }

        let samples = [start, start.midpoint(&end), end].map(|p| self.allowed(polygon, &p));
        let pieces = clip::split_segment(&start, &end, rings, self.tolerance);

        if pieces.len() == 1 {
            let state = if samples.iter().all(|ok| *ok) {
                ShutterState::Open
            } else {
                ShutterState::Closed
            };
            out.push(ShutterSegment::new(start, end, state));
            return;
        }

        for (a, b) in pieces {
            if a.approx_eq(&b, self.tolerance) {
                continue;
            }
            let state = if self.allowed(polygon, &a.midpoint(&b)) {
                ShutterState::Open
            } else {
                ShutterState::Closed
            };
            out.push(ShutterSegment::new(a, b, state));
        }
    }
}

/// Merges contiguous same-state segments that continue in the same direction.
#[derive(Debug, Clone)]
pub struct PathSimplifier {
    angular_tolerance: f64,
    tolerance: f64,
}

impl PathSimplifier {
    pub fn new(angular_tolerance: f64, tolerance: f64) -> Self {
        Self {
            angular_tolerance,
            tolerance,
        }
    }

    fn can_merge(&self, a: &ShutterSegment, b: &ShutterSegment) -> bool {
        if a.state != b.state || !a.end.approx_eq(&b.start, self.tolerance) {
            return false;
        }
        let (ax, ay) = a.direction();
        let (bx, by) = b.direction();
        let dot = ax * bx + ay * by;
        if dot <= 0.0 {
            return false;
        }
        let cross = ax * by - ay * bx;
        cross.abs().atan2(dot) <= self.angular_tolerance
    }

    fn merge_pass(&self, path: &[ShutterSegment]) -> Vec<ShutterSegment> {
        let mut merged: Vec<ShutterSegment> = Vec::with_capacity(path.len());
        for segment in path {
            match merged.last_mut() {
                Some(last) if self.can_merge(last, segment) => last.end = segment.end,
                _ => merged.push(*segment),
            }
        }
        merged
    }

    /// Repeats merge passes until nothing changes, so the result is a fixpoint.
    pub fn simplify(&self, path: &[ShutterSegment]) -> Vec<ShutterSegment> {
        let mut current = self.merge_pass(path);
        loop {
            let next = self.merge_pass(&current);
            if next.len() == current.len() {
                return next;
            }
            current = next;
        }
    }
}
