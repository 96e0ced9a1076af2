//! Toolpath assembly
//!
//! Lifts a simplified 2D shutter path back onto its face plane and attaches
//! feedrate and Z to every segment.

use crate::origin::OriginOffset;
use crate::plane_frame::PlaneFrame;
use crate::shutter::ShutterSegment;
use laserfill_core::{AciColor, Point3, ShutterState};
use laserfill_settings::{ColorSpeedTable, ToolpathSettings, ZPolicy};
use serde::{Deserialize, Serialize};

/// A single segment of a toolpath.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToolpathSegment {
    pub start: Point3,
    pub end: Point3,
    pub shutter: ShutterState,
    /// Feedrate in mm/s
    pub feedrate: f64,
    pub z: f64,
}

impl ToolpathSegment {
    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }
}

/// A complete toolpath for one polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Toolpath {
    pub color: AciColor,
    pub z_policy: ZPolicy,
    pub segments: Vec<ToolpathSegment>,
    /// Origin shift recorded for the emitter, not applied to `segments`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_origin: Option<OriginOffset>,
}

impl Toolpath {
    /// Gets the total length of the toolpath.
    pub fn total_length(&self) -> f64 {
        self.segments.iter().map(ToolpathSegment::length).sum()
    }

    /// Length travelled with the shutter open.
    pub fn exposed_length(&self) -> f64 {
        self.segments
            .iter()
            .filter(|s| s.shutter.is_open())
            .map(ToolpathSegment::length)
            .sum()
    }

    /// Segments with the pending origin applied, or unchanged when none is set.
    pub fn shifted_segments(&self) -> Vec<ToolpathSegment> {
        match &self.pending_origin {
            Some(origin) => self.segments.iter().map(|s| origin.apply(s)).collect(),
            None => self.segments.clone(),
        }
    }
}

/// Lifts annotated 2D paths into 3D toolpaths.
#[derive(Debug, Clone)]
pub struct ToolpathAssembler {
    z_policy: ZPolicy,
    speeds: ColorSpeedTable,
}

impl ToolpathAssembler {
    pub fn new(z_policy: ZPolicy, speeds: ColorSpeedTable) -> Self {
        Self { z_policy, speeds }
    }

    pub fn from_settings(settings: &ToolpathSettings) -> Self {
        Self::new(settings.z_policy, settings.color_speeds.clone())
    }

    pub fn assemble(
        &self,
        frame: &PlaneFrame,
        path: &[ShutterSegment],
        color: AciColor,
    ) -> Toolpath {
        let feedrate = self.speeds.speed_for(color);
        let segments = path
            .iter()
            .map(|segment| {
                let start = frame.lift(&segment.start, 0.0);
                let end = frame.lift(&segment.end, 0.0);
                let z = match self.z_policy {
                    ZPolicy::Constant { z } => z,
                    ZPolicy::FromFrame => start.z,
                };
                ToolpathSegment {
                    start,
                    end,
                    shutter: segment.state,
                    feedrate,
                    z,
                }
            })
            .collect();

        Toolpath {
            color,
            z_policy: self.z_policy,
            segments,
            pending_origin: None,
        }
    }
}
