//! AutoCAD color index carried from the CAD entities to the toolpath.

use serde::{Deserialize, Serialize};
use std::fmt;

/// AutoCAD Color Index (1-255, 256 = BYLAYER).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AciColor(pub u16);

impl AciColor {
    pub const RED: Self = Self(1);
    pub const YELLOW: Self = Self(2);
    pub const GREEN: Self = Self(3);
    pub const CYAN: Self = Self(4);
    pub const BLUE: Self = Self(5);
    pub const MAGENTA: Self = Self(6);
    pub const WHITE: Self = Self(7);
    pub const BY_LAYER: Self = Self(256);
}

impl Default for AciColor {
    fn default() -> Self {
        Self::BY_LAYER
    }
}

impl fmt::Display for AciColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::BY_LAYER {
            write!(f, "BYLAYER")
        } else {
            write!(f, "ACI {}", self.0)
        }
    }
}
