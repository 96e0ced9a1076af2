//! Infill generation
//!
//! Synthesizes the raw laser path over a polygon-with-holes. Patterns are
//! selected through [`InfillPattern`]; the generator validates the spacing
//! and skips polygons too small to fill.
//!
//! The output is ordered by emission sequence. Gaps between consecutive
//! segments are transit moves that the shutter stage materializes.

pub mod raster;
pub mod spiral;

pub use raster::RasterFill;
pub use spiral::SpiralFill;

use crate::hierarchy::{NodeId, PolygonWithHoles};
use laserfill_core::{Point2, Precision, Result, ShutterState};
use laserfill_settings::{FillSettings, FillStrategy};
use tracing::{debug, warn};

/// One raw path segment in the face's 2D frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillSegment {
    pub start: Point2,
    pub end: Point2,
    pub state: ShutterState,
    /// Scan line or ring number the segment belongs to.
    pub pass: usize,
}

impl FillSegment {
    pub fn open(start: Point2, end: Point2, pass: usize) -> Self {
        Self {
            start,
            end,
            state: ShutterState::Open,
            pass,
        }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }
}

/// Non-fatal fill conditions.
#[derive(Debug, Clone, PartialEq)]
pub enum FillWarning {
    /// Nothing was emitted, either because the net area is below the fill
    /// threshold or because the polygon is narrower than the first pass.
    EmptyFill { node: NodeId, area: f64 },
}

impl std::fmt::Display for FillWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyFill { node, area } => {
                write!(f, "empty fill for contour {}: net area {}", node.0, area)
            }
        }
    }
}

/// Fill output for one polygon.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fill {
    pub segments: Vec<FillSegment>,
    pub warnings: Vec<FillWarning>,
}

impl Fill {
    fn empty(node: NodeId, area: f64) -> Self {
        Self {
            segments: Vec::new(),
            warnings: vec![FillWarning::EmptyFill { node, area }],
        }
    }
}

/// Spacing and resolution shared by all patterns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillParameters {
    pub voxel_diameter: f64,
    pub overlap: f64,
    pub arc_resolution: u32,
    pub min_area: f64,
    pub precision: Precision,
}

impl FillParameters {
    pub fn from_settings(settings: &FillSettings) -> Self {
        Self {
            voxel_diameter: settings.voxel_diameter,
            overlap: settings.overlap_fraction,
            arc_resolution: settings.arc_resolution,
            min_area: settings.min_fill_area,
            precision: settings.precision,
        }
    }

    /// `D * (1 - f)`, or `InvalidSpacing` when not strictly positive.
    pub fn pitch(&self) -> Result<f64> {
        laserfill_core::pitch(self.voxel_diameter, self.overlap)
    }
}

/// An infill strategy.
pub trait InfillPattern {
    fn name(&self) -> &'static str;

    /// Raw segments covering `polygon` at the given pitch.
    fn generate(
        &self,
        polygon: &PolygonWithHoles,
        pitch: f64,
        params: &FillParameters,
    ) -> Vec<FillSegment>;
}

/// Validates spacing and dispatches to the configured pattern.
#[derive(Debug, Clone)]
pub struct FillGenerator {
    params: FillParameters,
    strategy: FillStrategy,
}

impl FillGenerator {
    pub fn new(params: FillParameters, strategy: FillStrategy) -> Self {
        Self { params, strategy }
    }

    pub fn from_settings(settings: &FillSettings) -> Self {
        Self::new(FillParameters::from_settings(settings), settings.strategy)
    }

    pub fn params(&self) -> &FillParameters {
        &self.params
    }

    fn pattern(&self) -> Box<dyn InfillPattern> {
        match self.strategy {
            FillStrategy::Raster => Box::new(RasterFill),
            FillStrategy::Spiral => Box::new(SpiralFill),
        }
    }

    pub fn generate(&self, polygon: &PolygonWithHoles) -> Result<Fill> {
        let pitch = self.params.pitch()?;

        let area = polygon.net_area();
        if area < self.params.min_area {
            warn!(node = polygon.node.0, area, "polygon too small to fill");
            return Ok(Fill::empty(polygon.node, area));
        }

        let pattern = self.pattern();
        let segments = pattern.generate(polygon, pitch, &self.params);
        if segments.is_empty() {
            warn!(
                pattern = pattern.name(),
                node = polygon.node.0,
                area,
                pitch,
                "no fill pass fits inside polygon"
            );
            return Ok(Fill::empty(polygon.node, area));
        }
        debug!(
            pattern = pattern.name(),
            node = polygon.node.0,
            pitch,
            segments = segments.len(),
            "generated fill"
        );

        Ok(Fill {
            segments,
            warnings: Vec::new(),
        })
    }
}
