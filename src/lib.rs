//! # Laserfill
//!
//! Planar face infill and shutter-modulated toolpath generation for laser
//! micro-machining.
//!
//! ## Architecture
//!
//! Laserfill is organized as a workspace with multiple crates:
//!
//! 1. **laserfill-core** - Points, precision, colors, geometry errors
//! 2. **laserfill-settings** - Fill and toolpath configuration
//! 3. **laserfill-camtools** - Contour assembly, hierarchy, infill, shutter, toolpaths
//! 4. **laserfill** - Command-line binary that reads descriptors and writes toolpaths

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub use laserfill_camtools::{
    run_batch, run_job, Edge, EdgeLoop, FillWarning, JobReport, OriginOffset, PlaneDescriptor,
    Toolpath, ToolpathSegment,
};
pub use laserfill_core::{AciColor, BatchError, GeometryError, Point2, Point3, ShutterState};
pub use laserfill_settings::{Config, FillStrategy, ZPolicy};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// A failed batch as written to the output document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureRecord {
    pub batch: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loop_index: Option<usize>,
    pub error: String,
}

/// A fill warning as written to the output document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarningRecord {
    pub batch: String,
    pub warning: String,
}

/// Serialized result of a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolpathDocument {
    pub version: String,
    pub origin: Option<OriginOffset>,
    pub toolpaths: Vec<Toolpath>,
    #[serde(default)]
    pub failures: Vec<FailureRecord>,
    #[serde(default)]
    pub warnings: Vec<WarningRecord>,
}

impl From<&JobReport> for ToolpathDocument {
    fn from(report: &JobReport) -> Self {
        Self {
            version: VERSION.to_string(),
            origin: report.origin,
            toolpaths: report.toolpaths().cloned().collect(),
            failures: report
                .failures
                .iter()
                .map(|f| FailureRecord {
                    batch: f.batch.clone(),
                    loop_index: f.loop_index,
                    error: f.source.to_string(),
                })
                .collect(),
            warnings: report
                .warnings()
                .map(|(batch, warning)| WarningRecord {
                    batch: batch.to_string(),
                    warning: warning.to_string(),
                })
                .collect(),
        }
    }
}

/// Reads a JSON array of plane descriptors.
pub fn load_descriptors(path: &Path) -> anyhow::Result<Vec<PlaneDescriptor>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read descriptors from {}", path.display()))?;
    let descriptors = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse descriptors in {}", path.display()))?;
    Ok(descriptors)
}

/// Writes a toolpath document as pretty JSON.
pub fn write_document(path: &Path, document: &ToolpathDocument) -> anyhow::Result<()> {
    let content =
        serde_json::to_string_pretty(document).context("Failed to serialize toolpaths")?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write toolpaths to {}", path.display()))?;
    Ok(())
}

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output on stderr, pretty or JSON formatted
/// - RUST_LOG environment variable support
pub fn init_logging(json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    if json {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(true)
            .json();

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .context("Failed to install JSON log subscriber")?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_line_number(true)
            .pretty();

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .context("Failed to install log subscriber")?;
    }

    Ok(())
}
