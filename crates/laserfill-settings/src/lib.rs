//! Laserfill Settings Crate
//!
//! Fill and toolpath configuration, validation and JSON/TOML persistence.

pub mod config;
pub mod error;

pub use config::{
    ColorSpeed, ColorSpeedTable, Config, FillSettings, FillStrategy, OriginMargins,
    ToolpathSettings, ZPolicy,
};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
