//! Decimal precision used to round coordinates at creation.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Smallest tolerance handed out, regardless of the configured digits.
const MIN_TOLERANCE: f64 = 1e-9;

/// Requested precision is outside `0..=10`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Precision {0} out of range (valid: 0..={max})", max = Precision::MAX_DIGITS)]
pub struct PrecisionError(pub u8);

/// Number of decimal digits kept on every coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Precision(u8);

impl Precision {
    /// Largest supported number of digits.
    pub const MAX_DIGITS: u8 = 10;

    /// Creates a precision of `digits` decimal places.
    pub fn new(digits: u8) -> Result<Self, PrecisionError> {
        if digits > Self::MAX_DIGITS {
            return Err(PrecisionError(digits));
        }
        Ok(Self(digits))
    }

    /// Number of decimal digits.
    pub fn digits(self) -> u8 {
        self.0
    }

    /// Rounds a value to this precision.
    pub fn round(self, value: f64) -> f64 {
        if !value.is_finite() {
            return value;
        }
        let scale = 10f64.powi(self.0 as i32);
        let rounded = (value * scale).round() / scale;
        // Normalise negative zero so equal points compare and print equal.
        if rounded == 0.0 {
            0.0
        } else {
            rounded
        }
    }

    /// Distance below which two rounded coordinates are considered equal.
    pub fn tolerance(self) -> f64 {
        10f64.powi(-(self.0 as i32)).max(MIN_TOLERANCE)
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self(6)
    }
}

impl TryFrom<u8> for Precision {
    type Error = PrecisionError;

    fn try_from(digits: u8) -> Result<Self, Self::Error> {
        Self::new(digits)
    }
}

impl From<Precision> for u8 {
    fn from(precision: Precision) -> Self {
        precision.0
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} digits", self.0)
    }
}
