//! Edge Assembler
//!
//! Chains ordered line and arc edges into a closed contour. Arcs are
//! interpolated into chords; endpoints are kept exact so neighbouring edges
//! share vertices.

use laserfill_core::{GeometryError, Point3, Precision, Result};
use laserfill_settings::FillSettings;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Sweep direction of an arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArcDirection {
    #[default]
    CounterClockwise,
    Clockwise,
}

impl ArcDirection {
    pub fn reversed(self) -> Self {
        match self {
            Self::CounterClockwise => Self::Clockwise,
            Self::Clockwise => Self::CounterClockwise,
        }
    }
}

/// A boundary edge of a face.
///
/// Arc angles are in degrees, measured in the XY plane through `center`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Edge {
    Line {
        p1: Point3,
        p2: Point3,
    },
    Arc {
        center: Point3,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        #[serde(default)]
        direction: ArcDirection,
    },
}

impl Edge {
    pub fn line(p1: Point3, p2: Point3) -> Self {
        Self::Line { p1, p2 }
    }

    /// Counter-clockwise arc from `start_angle` to `end_angle`.
    pub fn arc(center: Point3, radius: f64, start_angle: f64, end_angle: f64) -> Self {
        Self::Arc {
            center,
            radius,
            start_angle,
            end_angle,
            direction: ArcDirection::CounterClockwise,
        }
    }

    pub fn start(&self) -> Point3 {
        match self {
            Self::Line { p1, .. } => *p1,
            Self::Arc {
                center,
                radius,
                start_angle,
                ..
            } => point_on_arc(center, *radius, start_angle.to_radians()),
        }
    }

    pub fn end(&self) -> Point3 {
        match self {
            Self::Line { p2, .. } => *p2,
            Self::Arc {
                center,
                radius,
                end_angle,
                ..
            } => point_on_arc(center, *radius, end_angle.to_radians()),
        }
    }

    /// The same edge walked the other way.
    pub fn reversed(&self) -> Self {
        match self {
            Self::Line { p1, p2 } => Self::Line { p1: *p2, p2: *p1 },
            Self::Arc {
                center,
                radius,
                start_angle,
                end_angle,
                direction,
            } => Self::Arc {
                center: *center,
                radius: *radius,
                start_angle: *end_angle,
                end_angle: *start_angle,
                direction: direction.reversed(),
            },
        }
    }

    /// True when the edge collapses to a point within `tolerance`.
    pub fn is_degenerate(&self, tolerance: f64) -> bool {
        match self {
            Self::Line { p1, p2 } => p1.approx_eq(p2, tolerance),
            Self::Arc { radius, .. } => !(radius.is_finite() && *radius > tolerance),
        }
    }

    /// Polyline through the edge, start and end included.
    ///
    /// Arcs get `max(1, ceil(resolution * |sweep| / 360))` chords.
    pub fn flatten(&self, resolution: u32) -> Vec<Point3> {
        match self {
            Self::Line { p1, p2 } => vec![*p1, *p2],
            Self::Arc {
                center,
                radius,
                start_angle,
                end_angle,
                direction,
            } => {
                let sweep = arc_sweep(*start_angle, *end_angle, *direction);
                let chords = ((resolution as f64 * sweep / 360.0).ceil() as usize).max(1);
                let sign = match direction {
                    ArcDirection::CounterClockwise => 1.0,
                    ArcDirection::Clockwise => -1.0,
                };

                let mut points = Vec::with_capacity(chords + 1);
                for i in 0..chords {
                    let angle = start_angle + sign * sweep * i as f64 / chords as f64;
                    points.push(point_on_arc(center, *radius, angle.to_radians()));
                }
                points.push(self.end());
                points
            }
        }
    }
}

/// Swept angle in degrees, in `(0, 360]`. Equal angles are a full circle.
pub fn arc_sweep(start_angle: f64, end_angle: f64, direction: ArcDirection) -> f64 {
    let delta = match direction {
        ArcDirection::CounterClockwise => end_angle - start_angle,
        ArcDirection::Clockwise => start_angle - end_angle,
    };
    let sweep = delta.rem_euclid(360.0);
    if sweep <= 1e-12 {
        360.0
    } else {
        sweep
    }
}

fn point_on_arc(center: &Point3, radius: f64, angle: f64) -> Point3 {
    Point3::new(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
        center.z,
    )
}

/// Whether the assembled chain reconnects to its first point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Closure {
    Closed,
    /// Closing gap exceeded the tolerance after walking `edge_index`.
    Open { gap: f64, edge_index: usize },
}

/// Result of walking an edge list.
///
/// Open chains are returned for inspection instead of being dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Assembly {
    /// Distinct vertices, first point not repeated.
    pub points: Vec<Point3>,
    pub closure: Closure,
    tolerance: f64,
}

impl Assembly {
    pub fn is_closed(&self) -> bool {
        matches!(self.closure, Closure::Closed)
    }

    /// The closed vertex list, or `OpenContour` for a chain that never reconnected.
    pub fn into_closed(self) -> Result<Vec<Point3>> {
        match self.closure {
            Closure::Closed => Ok(self.points),
            Closure::Open { gap, edge_index } => Err(GeometryError::OpenContour {
                gap,
                tolerance: self.tolerance,
                edge_index,
            }),
        }
    }
}

/// Chains edges into contours.
#[derive(Debug, Clone)]
pub struct EdgeAssembler {
    arc_resolution: u32,
    tolerance: f64,
    precision: Precision,
}

impl EdgeAssembler {
    pub fn new(arc_resolution: u32, closure_tolerance: f64, precision: Precision) -> Self {
        Self {
            arc_resolution: arc_resolution.max(1),
            tolerance: closure_tolerance.max(precision.tolerance()),
            precision,
        }
    }

    pub fn from_settings(settings: &FillSettings) -> Self {
        Self::new(
            settings.arc_resolution,
            settings.closure_tolerance,
            settings.precision,
        )
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Walks `edges` in order and returns the chained vertices.
    ///
    /// An edge whose end (rather than start) meets the current tail is
    /// walked backwards. Zero-length edges are skipped.
    pub fn assemble(&self, edges: &[Edge]) -> Result<Assembly> {
        let mut points: Vec<Point3> = Vec::new();
        let mut walked = 0usize;
        let mut last_edge = None;

        for (index, edge) in edges.iter().enumerate() {
            if edge.is_degenerate(self.tolerance) {
                debug!(edge = index, "skipping zero-length edge");
                continue;
            }

            let start = edge.start().snap(self.precision);
            let end = edge.end().snap(self.precision);

            let oriented = match (points.first().copied(), points.last().copied()) {
                (Some(head), Some(tail)) => {
                    if start.approx_eq(&tail, self.tolerance) {
                        edge.clone()
                    } else if end.approx_eq(&tail, self.tolerance) {
                        edge.reversed()
                    } else if walked == 1 && start.approx_eq(&head, self.tolerance) {
                        // First edge was listed backwards.
                        points.reverse();
                        edge.clone()
                    } else if walked == 1 && end.approx_eq(&head, self.tolerance) {
                        points.reverse();
                        edge.reversed()
                    } else {
                        warn!(
                            edge = index,
                            gap = start.distance_to(&tail).min(end.distance_to(&tail)),
                            "edge does not connect to the chain"
                        );
                        edge.clone()
                    }
                }
                _ => edge.clone(),
            };

            for p in oriented.flatten(self.arc_resolution) {
                self.push_distinct(&mut points, p.snap(self.precision));
            }
            walked += 1;
            last_edge = Some(index);
        }

        let Some(last_edge) = last_edge else {
            return Err(GeometryError::degenerate("contour has no usable edges"));
        };

        let mut closure = Closure::Closed;
        if let (Some(first), Some(last)) = (points.first().copied(), points.last().copied()) {
            if points.len() > 1 {
                let gap = first.distance_to(&last);
                if gap <= self.tolerance {
                    points.pop();
                } else {
                    closure = Closure::Open {
                        gap,
                        edge_index: last_edge,
                    };
                }
            }
        }

        if points.len() < 3 {
            return Err(GeometryError::degenerate_at(
                format!("contour resolves to {} distinct vertices", points.len()),
                last_edge,
            ));
        }

        if let Closure::Open { gap, edge_index } = closure {
            warn!(gap, edge = edge_index, "contour does not close");
        }

        Ok(Assembly {
            points,
            closure,
            tolerance: self.tolerance,
        })
    }

    fn push_distinct(&self, points: &mut Vec<Point3>, p: Point3) {
        match points.last() {
            Some(last) if last.approx_eq(&p, self.tolerance) => {}
            _ => points.push(p),
        }
    }
}

/// Splits an unordered edge soup into chains of connected edges.
///
/// Each chain is ordered and oriented so consecutive edges share an
/// endpoint, ready for [`EdgeAssembler::assemble`].
pub fn group_connected_edges(edges: &[Edge], tolerance: f64) -> Vec<Vec<Edge>> {
    let mut used = vec![false; edges.len()];
    let mut groups = Vec::new();

    for seed in 0..edges.len() {
        if used[seed] {
            continue;
        }
        used[seed] = true;
        let mut chain = vec![edges[seed].clone()];
        let head = edges[seed].start();
        let mut tail = edges[seed].end();

        while !tail.approx_eq(&head, tolerance) {
            let next = (0..edges.len()).find_map(|i| {
                if used[i] {
                    None
                } else if edges[i].start().approx_eq(&tail, tolerance) {
                    Some((i, edges[i].clone()))
                } else if edges[i].end().approx_eq(&tail, tolerance) {
                    Some((i, edges[i].reversed()))
                } else {
                    None
                }
            });

            match next {
                Some((i, edge)) => {
                    used[i] = true;
                    tail = edge.end();
                    chain.push(edge);
                }
                None => break,
            }
        }

        groups.push(chain);
    }

    debug!(edges = edges.len(), groups = groups.len(), "grouped edge soup");
    groups
}
