//! Batch and job processing
//!
//! A batch is one planar face (or nested face group) described by a
//! [`PlaneDescriptor`]. Batches share no state and run in parallel; only the
//! origin reduction waits for all of them. A failing batch is reported and
//! skipped without affecting the others.

use crate::contour::{Contour, Ring};
use crate::edge_assembler::{group_connected_edges, Edge, EdgeAssembler};
use crate::fill::{FillGenerator, FillWarning};
use crate::hierarchy::{HierarchyResolver, NodeId};
use crate::origin::{attach_origin, OriginOffset};
use crate::plane_frame::{estimate_normal, PlaneFrame};
use crate::shutter::{PathSimplifier, ShutterAnnotator};
use crate::toolpath::{Toolpath, ToolpathAssembler};
use laserfill_core::{AciColor, BatchError, GeometryError, Point3};
use laserfill_settings::{Config, ConfigResult};
use nalgebra::Vector3;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// One boundary loop of a face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeLoop {
    #[serde(default)]
    pub color: AciColor,
    pub edges: Vec<Edge>,
    /// Edges arrive in arbitrary order and may hold several loops.
    #[serde(default)]
    pub unordered: bool,
}

impl EdgeLoop {
    pub fn new(color: AciColor, edges: Vec<Edge>) -> Self {
        Self {
            color,
            edges,
            unordered: false,
        }
    }
}

/// Input for one batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaneDescriptor {
    pub id: String,
    /// Face normal; estimated from the first contour when absent.
    #[serde(default)]
    pub orientation: Option<[f64; 3]>,
    pub loops: Vec<EdgeLoop>,
}

/// Result of one successful batch.
#[derive(Debug, Clone)]
pub struct BatchOutput {
    pub id: String,
    pub toolpaths: Vec<Toolpath>,
    pub warnings: Vec<FillWarning>,
    /// Contours filled as independent polygons because of deep nesting.
    pub deep_nesting: Vec<NodeId>,
}

/// Result of a whole job.
#[derive(Debug, Clone, Default)]
pub struct JobReport {
    pub outputs: Vec<BatchOutput>,
    pub failures: Vec<BatchError>,
    pub origin: Option<OriginOffset>,
}

impl JobReport {
    pub fn toolpaths(&self) -> impl Iterator<Item = &Toolpath> {
        self.outputs.iter().flat_map(|o| o.toolpaths.iter())
    }

    pub fn warnings(&self) -> impl Iterator<Item = (&str, &FillWarning)> {
        self.outputs
            .iter()
            .flat_map(|o| o.warnings.iter().map(move |w| (o.id.as_str(), w)))
    }
}

fn assemble_contours(
    descriptor: &PlaneDescriptor,
    assembler: &EdgeAssembler,
) -> Result<Vec<(Vec<Point3>, AciColor)>, BatchError> {
    let mut contours = Vec::new();
    for (index, edge_loop) in descriptor.loops.iter().enumerate() {
        let chains = if edge_loop.unordered {
            group_connected_edges(&edge_loop.edges, assembler.tolerance())
        } else {
            vec![edge_loop.edges.clone()]
        };
        for chain in chains {
            let points = assembler
                .assemble(&chain)
                .and_then(|assembly| assembly.into_closed())
                .map_err(|e| BatchError::new(descriptor.id.clone(), e).in_loop(index))?;
            contours.push((points, edge_loop.color));
        }
    }
    Ok(contours)
}

/// Runs one batch from edges to toolpaths.
pub fn run_batch(descriptor: &PlaneDescriptor, config: &Config) -> Result<BatchOutput, BatchError> {
    let fail = |source: GeometryError| BatchError::new(descriptor.id.clone(), source);
    let fill_settings = &config.fill;
    let precision = fill_settings.precision;

    let assembler = EdgeAssembler::from_settings(fill_settings);
    let assembled = assemble_contours(descriptor, &assembler)?;
    if assembled.is_empty() {
        return Err(fail(GeometryError::degenerate("batch has no contours")));
    }

    let orientation = match descriptor.orientation {
        Some([x, y, z]) => Vector3::new(x, y, z),
        None => estimate_normal(&assembled[0].0).map_err(fail)?,
    };

    let contours: Vec<Contour> = assembled
        .into_iter()
        .map(|(points, color)| Contour::new(points, color, orientation))
        .collect();
    let frame = PlaneFrame::from_contours(orientation, &contours, precision).map_err(fail)?;

    let rings: Vec<Ring> = contours
        .iter()
        .map(|c| Ring::new(c.vertices.iter().map(|p| frame.project(p)).collect(), c.color))
        .collect();

    let tolerance = assembler.tolerance();
    let hierarchy = HierarchyResolver::new(tolerance)
        .resolve(rings)
        .map_err(fail)?;

    let generator = FillGenerator::from_settings(fill_settings);
    let annotator = ShutterAnnotator::new(tolerance);
    let simplifier = PathSimplifier::new(fill_settings.angular_tolerance, tolerance);
    let toolpath_assembler = ToolpathAssembler::from_settings(&config.toolpath);

    let mut toolpaths = Vec::new();
    let mut warnings = Vec::new();
    for polygon in &hierarchy.polygons {
        let fill = generator.generate(polygon).map_err(fail)?;
        warnings.extend(fill.warnings);
        if fill.segments.is_empty() {
            continue;
        }
        let annotated = annotator.annotate(polygon, &fill.segments);
        let simplified = simplifier.simplify(&annotated);
        toolpaths.push(toolpath_assembler.assemble(&frame, &simplified, polygon.color()));
    }

    debug!(
        batch = %descriptor.id,
        polygons = hierarchy.polygons.len(),
        toolpaths = toolpaths.len(),
        "batch complete"
    );

    Ok(BatchOutput {
        id: descriptor.id.clone(),
        toolpaths,
        warnings,
        deep_nesting: hierarchy.deep_nesting,
    })
}

/// Validates `config`, runs every batch in parallel and attaches the job origin.
pub fn run_job(descriptors: &[PlaneDescriptor], config: &Config) -> ConfigResult<JobReport> {
    config.validate()?;

    info!(
        batches = descriptors.len(),
        strategy = %config.fill.strategy,
        "starting job"
    );

    let results: Vec<Result<BatchOutput, BatchError>> = descriptors
        .par_iter()
        .map(|descriptor| run_batch(descriptor, config))
        .collect();

    let mut report = JobReport::default();
    for result in results {
        match result {
            Ok(output) => report.outputs.push(output),
            Err(err) => {
                warn!("{}", err);
                report.failures.push(err);
            }
        }
    }

    report.origin = OriginOffset::from_toolpaths(report.toolpaths(), config.toolpath.origin_margins);
    if let Some(origin) = report.origin {
        for output in &mut report.outputs {
            attach_origin(&mut output.toolpaths, origin);
        }
    }

    info!(
        succeeded = report.outputs.len(),
        failed = report.failures.len(),
        "job complete"
    );
    Ok(report)
}
