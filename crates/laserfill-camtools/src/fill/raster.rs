//! Raster fill
//!
//! Boustrophedon scan lines parallel to the longer side of the outer
//! bounding box. Each line is clipped against the outer ring and all holes
//! with even-odd crossing pairing, so a line through `m` holes yields `m + 1`
//! intervals.

use super::{FillParameters, FillSegment, InfillPattern};
use crate::clip::{self, ScanAxis};
use crate::hierarchy::PolygonWithHoles;

/// Back-and-forth parallel scan lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterFill;

impl RasterFill {
    /// Lines run along X unless the box is strictly taller than wide.
    pub fn scan_axis(polygon: &PolygonWithHoles) -> ScanAxis {
        match polygon.outer.bounds() {
            Some(b) if b.height() > b.width() => ScanAxis::Y,
            _ => ScanAxis::X,
        }
    }
}

impl InfillPattern for RasterFill {
    fn name(&self) -> &'static str {
        "raster"
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
        let axis = Self::scan_axis(polygon);
        let (_, across_min) = axis.split(&bounds.min);
        let (_, across_max) = axis.split(&bounds.max);

        let rings = polygon.rings();
        let tolerance = params.precision.tolerance();
        let mut segments = Vec::new();

        let mut line = 0usize;
        loop {
            let level = across_min + pitch / 2.0 + line as f64 * pitch;
            if level >= across_max {
                break;
            }
            let level = params.precision.round(level);

            let crossings = clip::scanline_crossings(&rings, axis, level);
            let mut intervals = clip::pair_intervals(&crossings, tolerance);

            let reverse = line % 2 == 1;
            if reverse {
                intervals.reverse();
            }

            for (lo, hi) in intervals {
                let (from, to) = if reverse { (hi, lo) } else { (lo, hi) };
                let start = axis.join(from, level).snap(params.precision);
                let end = axis.join(to, level).snap(params.precision);
                segments.push(FillSegment::open(start, end, line));
            }

            line += 1;
        }

        segments
    }
}
