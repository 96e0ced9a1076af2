//! Fill spacing

use crate::error::{GeometryError, Result};

/// Distance between adjacent scan lines or rings, `D * (1 - f)`.
///
/// Fails with `InvalidSpacing` unless the result is finite and strictly
/// positive.
pub fn pitch(voxel_diameter: f64, overlap_fraction: f64) -> Result<f64> {
    let pitch = voxel_diameter * (1.0 - overlap_fraction);
    if pitch.is_finite() && pitch > 0.0 {
        Ok(pitch)
    } else {
        Err(GeometryError::InvalidSpacing { pitch })
    }
}
