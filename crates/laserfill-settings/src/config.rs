//! Configuration for the face-fill pipeline
//!
//! Provides configuration file handling and validation. Supports JSON and TOML
//! file formats; the path is always passed explicitly by the caller.
//!
//! Configuration is organized into logical sections:
//! - Fill settings (voxel pitch, overlap, arc resolution, precision, strategy)
//! - Toolpath settings (Z policy, origin safety margins, color to speed table)

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
use laserfill_core::{AciColor, Precision};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::debug;

/// Infill pattern selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillStrategy {
    /// Back-and-forth parallel scan lines
    Raster,
    /// Inward offset rings joined by radial transitions
    Spiral,
}

impl Default for FillStrategy {
    fn default() -> Self {
        Self::Raster
    }
}

impl fmt::Display for FillStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raster => write!(f, "raster"),
            Self::Spiral => write!(f, "spiral"),
        }
    }
}

impl std::str::FromStr for FillStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "raster" => Ok(Self::Raster),
            "spiral" => Ok(Self::Spiral),
            other => Err(ConfigError::out_of_range(
                "fill.strategy",
                other,
                "raster | spiral",
            )),
        }
    }
}

/// How the Z value attached to each toolpath segment is chosen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ZPolicy {
    /// Fixed Z for every segment
    Constant { z: f64 },
    /// Z of the lifted segment start point
    FromFrame,
}

impl Default for ZPolicy {
    fn default() -> Self {
        Self::FromFrame
    }
}

/// Safety margins applied around the job origin before emission
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OriginMargins {
    /// Clearance on X and Y
    pub margin_xy: f64,
    /// Clearance on Z
    pub margin_z: f64,
}

impl Default for OriginMargins {
    fn default() -> Self {
        Self {
            margin_xy: 0.01,
            margin_z: 0.1,
        }
    }
}

/// One color to feedrate entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorSpeed {
    pub color: AciColor,
    /// Feedrate in mm/s
    pub speed: f64,
}

/// Color to feedrate mapping with a fallback speed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorSpeedTable {
    /// Speed used when a color has no entry
    pub default_speed: f64,
    pub entries: Vec<ColorSpeed>,
}

impl ColorSpeedTable {
    /// Looks up the feedrate for a color.
    pub fn speed_for(&self, color: AciColor) -> f64 {
        self.entries
            .iter()
            .find(|entry| entry.color == color)
            .map(|entry| entry.speed)
            .unwrap_or(self.default_speed)
    }
}

impl Default for ColorSpeedTable {
    fn default() -> Self {
        // AutoCAD index colors used by the CAD layouts, in mm/s.
        let entries = [
            (1, 0.2),
            (2, 0.4),
            (3, 0.6),
            (4, 0.8),
            (256, 1.0),
            (5, 1.2),
            (6, 1.4),
            (7, 1.6),
            (8, 1.8),
            (9, 2.0),
        ]
        .into_iter()
        .map(|(color, speed)| ColorSpeed {
            color: AciColor(color),
            speed,
        })
        .collect();

        Self {
            default_speed: 1.0,
            entries,
        }
    }
}

/// Fill generation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FillSettings {
    /// Laser voxel (spot) diameter
    pub voxel_diameter: f64,
    /// Fraction of the voxel shared by adjacent passes, in `[0, 1)`
    pub overlap_fraction: f64,
    /// Chords per full circle when flattening arcs
    pub arc_resolution: u32,
    /// Decimal digits kept on every coordinate
    pub precision: Precision,
    pub strategy: FillStrategy,
    /// Largest gap accepted when closing a contour
    pub closure_tolerance: f64,
    /// Largest direction change (radians) merged by the path simplifier
    pub angular_tolerance: f64,
    /// Net area below which a polygon gets an empty fill
    pub min_fill_area: f64,
}

impl FillSettings {
    /// Distance between adjacent scan lines or rings.
    pub fn pitch(&self) -> laserfill_core::Result<f64> {
        laserfill_core::pitch(self.voxel_diameter, self.overlap_fraction)
    }
}

impl Default for FillSettings {
    fn default() -> Self {
        Self {
            voxel_diameter: 0.2,
            overlap_fraction: 0.5,
            arc_resolution: 30,
            precision: Precision::default(),
            strategy: FillStrategy::default(),
            closure_tolerance: 1e-5,
            angular_tolerance: 1e-6,
            min_fill_area: 1e-9,
        }
    }
}

/// Toolpath assembly settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ToolpathSettings {
    pub z_policy: ZPolicy,
    pub origin_margins: OriginMargins,
    pub color_speeds: ColorSpeedTable,
}

/// Complete pipeline configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub fill: FillSettings,
    pub toolpath: ToolpathSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Config = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        let fill = &self.fill;

        if !(fill.voxel_diameter.is_finite() && fill.voxel_diameter > 0.0) {
            return Err(ConfigError::out_of_range(
                "fill.voxel_diameter",
                fill.voxel_diameter,
                "> 0",
            ));
        }

        if !(0.0..1.0).contains(&fill.overlap_fraction) {
            return Err(ConfigError::out_of_range(
                "fill.overlap_fraction",
                fill.overlap_fraction,
                "0 <= f < 1",
            ));
        }

        if fill.arc_resolution < 3 {
            return Err(ConfigError::out_of_range(
                "fill.arc_resolution",
                fill.arc_resolution,
                ">= 3",
            ));
        }

        if !(fill.closure_tolerance.is_finite() && fill.closure_tolerance > 0.0) {
            return Err(ConfigError::out_of_range(
                "fill.closure_tolerance",
                fill.closure_tolerance,
                "> 0",
            ));
        }

        if !(fill.angular_tolerance.is_finite() && fill.angular_tolerance >= 0.0) {
            return Err(ConfigError::out_of_range(
                "fill.angular_tolerance",
                fill.angular_tolerance,
                ">= 0",
            ));
        }

        if !(fill.min_fill_area.is_finite() && fill.min_fill_area >= 0.0) {
            return Err(ConfigError::out_of_range(
                "fill.min_fill_area",
                fill.min_fill_area,
                ">= 0",
            ));
        }

        let pitch = fill
            .pitch()
            .map_err(|e| ConfigError::Inconsistent(e.to_string()))?;
        if fill.precision.tolerance() > pitch {
            return Err(ConfigError::Inconsistent(format!(
                "precision of {} is coarser than the fill pitch {}",
                fill.precision, pitch
            )));
        }

        let margins = &self.toolpath.origin_margins;
        if margins.margin_xy < 0.0 || margins.margin_z < 0.0 {
            return Err(ConfigError::Inconsistent(
                "origin margins must be >= 0".to_string(),
            ));
        }

        let speeds = &self.toolpath.color_speeds;
        if speeds.default_speed <= 0.0 {
            return Err(ConfigError::out_of_range(
                "toolpath.color_speeds.default_speed",
                speeds.default_speed,
                "> 0",
            ));
        }
        if let Some(entry) = speeds.entries.iter().find(|entry| entry.speed <= 0.0) {
            return Err(ConfigError::out_of_range(
                &format!("toolpath.color_speeds[{}]", entry.color.0),
                entry.speed,
                "> 0",
            ));
        }

        Ok(())
    }
}

enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}
