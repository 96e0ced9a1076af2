//! # Laserfill CAM Tools
//!
//! Geometry and topology stages that turn planar face descriptions into
//! shutter-modulated laser toolpaths.
//!
//! ## Stages
//!
//! - **Edge Assembler**: Chains lines and arcs into closed contours
//! - **Plane Frame**: Orthonormal basis used to project faces to 2D and back
//! - **Hierarchy**: Containment forest and polygons-with-holes
//! - **Fill**: Raster and spiral infill patterns
//! - **Shutter**: Beam on/off classification and path compaction
//! - **Toolpath**: 3D segments with feedrate and Z
//!
//! ## Supporting Infrastructure
//!
//! - **Clip**: Point-in-polygon, scan-line crossings and boundary splitting
//! - **Origin**: Job-wide origin offset with safety margins
//! - **Pipeline**: Per-batch processing and parallel job execution

pub mod clip;
pub mod contour;
pub mod edge_assembler;
pub mod fill;
pub mod hierarchy;
pub mod origin;
pub mod pipeline;
pub mod plane_frame;
pub mod shutter;
pub mod toolpath;

// Re-export commonly used items
pub use contour::{Bounds, Contour, Ring};
pub use edge_assembler::{
    group_connected_edges, ArcDirection, Assembly, Closure, Edge, EdgeAssembler,
};
pub use fill::{Fill, FillGenerator, FillParameters, FillSegment, FillWarning, InfillPattern};
pub use hierarchy::{
    ContainmentForest, Hierarchy, HierarchyResolver, Hole, NodeId, PolygonWithHoles,
};
pub use origin::{attach_origin, OriginOffset};
pub use pipeline::{run_batch, run_job, BatchOutput, EdgeLoop, JobReport, PlaneDescriptor};
pub use plane_frame::{estimate_normal, PlaneFrame};
pub use shutter::{PathSimplifier, ShutterAnnotator, ShutterSegment};
pub use toolpath::{Toolpath, ToolpathAssembler, ToolpathSegment};
