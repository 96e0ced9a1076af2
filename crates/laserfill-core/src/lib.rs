//! # Laserfill Core
//!
//! Core value types and error kinds shared by every stage of the face-fill
//! pipeline. Points are rounded to a configured decimal precision when they
//! are created so that containment and clipping tests downstream never see
//! accumulated floating noise.

pub mod error;
pub mod spacing;
pub mod types;

pub use error::{BatchError, GeometryError, Result};
pub use spacing::pitch;
pub use types::{AciColor, Point2, Point3, Precision, PrecisionError, ShutterState};
