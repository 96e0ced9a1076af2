//! Value types shared across the pipeline.
//!
//! ## Modules
//!
//! - [`precision`]: Decimal rounding applied when coordinates are created
//! - [`point`]: Rounded 2D/3D points
//! - [`color`]: AutoCAD color index used to key feedrates
//! - [`shutter`]: Beam on/off state of a motion segment

pub mod color;
pub mod point;
pub mod precision;
pub mod shutter;

pub use color::AciColor;
pub use point::{Point2, Point3};
pub use precision::{Precision, PrecisionError};
pub use shutter::ShutterState;
