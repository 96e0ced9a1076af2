//! Error handling for Laserfill
//!
//! Geometry-local failures abort only the batch that produced them. They carry
//! enough context (offending edge or contour index) for a caller to skip or
//! repair the input, and [`BatchError`] adds the batch identifier on top.
//!
//! Non-fatal conditions such as an empty fill are not errors; they are
//! reported as warnings by the fill stage.

use thiserror::Error;

/// Geometry error type
///
/// Raised by contour assembly, frame construction, hierarchy inference and
/// fill spacing checks.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Zero orientation vector, collapsed edges or too few distinct vertices
    #[error("Degenerate geometry{}: {reason}", edge_suffix(.edge_index))]
    DegenerateGeometry {
        /// What collapsed.
        reason: String,
        /// Index of the offending edge, when one can be named.
        edge_index: Option<usize>,
    },

    /// The assembled chain does not reconnect to its first point
    #[error("Open contour: closing gap {gap} exceeds tolerance {tolerance} after edge {edge_index}")]
    OpenContour {
        /// Distance between the last and first point.
        gap: f64,
        /// Closure tolerance that was exceeded.
        tolerance: f64,
        /// Index of the last edge walked.
        edge_index: usize,
    },

    /// Containment relation contains a cycle
    #[error("Hierarchy inconsistency: containment cycle through contour {node}")]
    HierarchyInconsistency {
        /// Contour index at which the cycle was detected.
        node: usize,
    },

    /// Fill pitch is not strictly positive
    #[error("Invalid spacing: pitch {pitch} must be > 0")]
    InvalidSpacing {
        /// The computed pitch.
        pitch: f64,
    },
}

fn edge_suffix(edge_index: &Option<usize>) -> String {
    match edge_index {
        Some(index) => format!(" at edge {}", index),
        None => String::new(),
    }
}

impl GeometryError {
    /// Shorthand for a degenerate-geometry error without an edge index.
    pub fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            reason: reason.into(),
            edge_index: None,
        }
    }

    /// Shorthand for a degenerate-geometry error tied to an edge.
    pub fn degenerate_at(reason: impl Into<String>, edge_index: usize) -> Self {
        Self::DegenerateGeometry {
            reason: reason.into(),
            edge_index: Some(edge_index),
        }
    }
}

/// A geometry failure attributed to one processing batch.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Batch '{batch}' failed{}: {source}", loop_suffix(.loop_index))]
pub struct BatchError {
    /// Identifier of the failed batch.
    pub batch: String,
    /// Edge loop of the batch the failure came from, when one can be named.
    pub loop_index: Option<usize>,
    /// Underlying geometry failure.
    #[source]
    pub source: GeometryError,
}

fn loop_suffix(loop_index: &Option<usize>) -> String {
    match loop_index {
        Some(index) => format!(" in loop {}", index),
        None => String::new(),
    }
}

impl BatchError {
    /// Attributes a geometry error to a batch.
    pub fn new(batch: impl Into<String>, source: GeometryError) -> Self {
        Self {
            batch: batch.into(),
            loop_index: None,
            source,
        }
    }

    /// Narrows the failure down to one edge loop of the batch.
    pub fn in_loop(mut self, loop_index: usize) -> Self {
        self.loop_index = Some(loop_index);
        self
    }
}

/// Result type for geometry operations.
pub type Result<T> = std::result::Result<T, GeometryError>;
