//! SheetSketch Settings Crate
//!
//! Handles application configuration and settings persistence.

pub mod config;
pub mod error;
pub mod persistence;

pub use config::{
    Config, EditorSettings, MaterialSettings, NormalizeSettings, PaintSettings, SketchSettings,
};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
pub use persistence::SettingsPersistence;
