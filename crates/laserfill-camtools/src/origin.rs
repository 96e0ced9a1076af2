//! Job origin reduction
//!
//! After every batch of a job has completed, the toolpaths are referenced to
//! a common origin at the minimum X/Y of all segment endpoints and the
//! maximum emitted Z. The emitter approaches the work from a point offset by
//! the safety margins.

use crate::toolpath::{Toolpath, ToolpathSegment};
use laserfill_core::Point3;
use laserfill_settings::{OriginMargins, ZPolicy};
use serde::{Deserialize, Serialize};

/// Origin shift shared by all toolpaths of a job.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OriginOffset {
    pub origin: Point3,
    pub margins: OriginMargins,
}

impl OriginOffset {
    /// Reduces the origin over every segment, `None` when there are none.
    ///
    /// X and Y come from the endpoints. Z comes from the segment `z` the
    /// emitter moves to; under [`ZPolicy::FromFrame`] the endpoint heights
    /// count as well.
    pub fn from_toolpaths<'a>(
        toolpaths: impl IntoIterator<Item = &'a Toolpath>,
        margins: OriginMargins,
    ) -> Option<Self> {
        let mut points = toolpaths.into_iter().flat_map(|t| {
            let from_frame = matches!(t.z_policy, ZPolicy::FromFrame);
            t.segments.iter().flat_map(move |s| {
                let (z_start, z_end) = if from_frame {
                    (s.start.z.max(s.z), s.end.z.max(s.z))
                } else {
                    (s.z, s.z)
                };
                [
                    Point3::new(s.start.x, s.start.y, z_start),
                    Point3::new(s.end.x, s.end.y, z_end),
                ]
            })
        });

        let first = points.next()?;
        let origin = points.fold(first, |acc, p| {
            Point3::new(acc.x.min(p.x), acc.y.min(p.y), acc.z.max(p.z))
        });

        Some(Self { origin, margins })
    }

    /// Shifts a point into origin-relative coordinates.
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        Point3::new(p.x - self.origin.x, p.y - self.origin.y, p.z - self.origin.z)
    }

    pub fn apply(&self, segment: &ToolpathSegment) -> ToolpathSegment {
        ToolpathSegment {
            start: self.apply_point(&segment.start),
            end: self.apply_point(&segment.end),
            z: segment.z - self.origin.z,
            ..*segment
        }
    }

    /// Safe approach point in origin-relative coordinates.
    pub fn approach_point(&self) -> Point3 {
        Point3::new(
            -self.margins.margin_xy,
            -self.margins.margin_xy,
            -self.margins.margin_z,
        )
    }
}

/// Records `offset` as the pending origin of every toolpath.
pub fn attach_origin(toolpaths: &mut [Toolpath], offset: OriginOffset) {
    for toolpath in toolpaths {
        toolpath.pending_origin = Some(offset);
    }
}
