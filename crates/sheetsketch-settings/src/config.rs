//! Configuration for SheetSketch
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML files; the format follows the file extension.
//!
//! Configuration is organized into sections:
//! - Sketch settings (scale, straightening tolerances, segment bound)
//! - Normalizer policy (leveling and equalization thresholds)
//! - Paint defaults
//! - Editor preferences
//! - Material blank size

use serde::{Deserialize, Serialize};
use std::path::Path;

use sheetsketch_core::{DEFAULT_MM_PER_PX, DEFAULT_SNAP_STEP, MAX_MM_PER_PX, MIN_MM_PER_PX};
use sheetsketch_designer::material::BlankSize;
use sheetsketch_designer::paint::{is_valid_hex, DEFAULT_PAINT_COLOR, DEFAULT_PAINT_LABEL};
use sheetsketch_designer::{
    NormalizePolicy, PipelineConfig, SessionConfig, DEFAULT_COALESCE_PX, DEFAULT_MAX_SEGMENTS,
    DEFAULT_MERGE_TOLERANCE_DEG, DEFAULT_TOLERANCE_PX, EDIT_MERGE_TOLERANCE_DEG,
};

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};

/// Stroke capture and straightening settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SketchSettings {
    /// Millimetres per pixel
    pub mm_per_px: f64,
    /// Douglas–Peucker tolerance in pixels
    pub tolerance_px: f64,
    /// Direction grid in degrees
    pub snap_step_deg: f64,
    /// Collinearity tolerance after snapping
    pub merge_tolerance_deg: f64,
    /// Collinearity tolerance after an edge edit
    pub edit_merge_tolerance_deg: f64,
    /// Maximum number of edges
    pub max_segments: usize,
    /// Minimum pointer movement between samples
    pub coalesce_px: f64,
}

impl Default for SketchSettings {
    fn default() -> Self {
        Self {
            mm_per_px: DEFAULT_MM_PER_PX,
            tolerance_px: DEFAULT_TOLERANCE_PX,
            snap_step_deg: DEFAULT_SNAP_STEP,
            merge_tolerance_deg: DEFAULT_MERGE_TOLERANCE_DEG,
            edit_merge_tolerance_deg: EDIT_MERGE_TOLERANCE_DEG,
            max_segments: DEFAULT_MAX_SEGMENTS,
            coalesce_px: DEFAULT_COALESCE_PX,
        }
    }
}

/// Normalizer thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeSettings {
    pub equalize_threshold: f64,
    pub level_epsilon_px: f64,
    pub regularize_patterns: bool,
}

impl Default for NormalizeSettings {
    fn default() -> Self {
        let policy = NormalizePolicy::default();
        Self {
            equalize_threshold: policy.equalize_threshold,
            level_epsilon_px: policy.level_epsilon_px,
            regularize_patterns: policy.regularize_patterns,
        }
    }
}

/// Paint marking defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaintSettings {
    pub default_color: String,
    pub default_label: String,
}

impl Default for PaintSettings {
    fn default() -> Self {
        Self {
            default_color: DEFAULT_PAINT_COLOR.to_string(),
            default_label: DEFAULT_PAINT_LABEL.to_string(),
        }
    }
}

/// Editor preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Allow free angle entry in the edge editor
    pub angle_edit_enabled: bool,
    pub default_quantity: u32,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            angle_edit_enabled: false,
            default_quantity: 1,
        }
    }
}

/// Stock blank used for material estimates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialSettings {
    pub blank_length_mm: u32,
    pub blank_width_mm: u32,
}

impl Default for MaterialSettings {
    fn default() -> Self {
        let blank = BlankSize::default();
        Self {
            blank_length_mm: blank.length_mm,
            blank_width_mm: blank.width_mm,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub sketch: SketchSettings,
    pub normalize: NormalizeSettings,
    pub paint: PaintSettings,
    pub editor: EditorSettings,
    pub material: MaterialSettings,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> ConfigResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|source| SettingsError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content).map_err(|source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        let sketch = &self.sketch;
        if !(MIN_MM_PER_PX..=MAX_MM_PER_PX).contains(&sketch.mm_per_px) {
            return Err(ConfigError::out_of_range("sketch.mm_per_px", sketch.mm_per_px));
        }
        if !(sketch.tolerance_px > 0.0) {
            return Err(ConfigError::out_of_range(
                "sketch.tolerance_px",
                sketch.tolerance_px,
            ));
        }
        if !(sketch.snap_step_deg > 0.0 && sketch.snap_step_deg <= 90.0) {
            return Err(ConfigError::out_of_range(
                "sketch.snap_step_deg",
                sketch.snap_step_deg,
            ));
        }
        for (key, value) in [
            ("sketch.merge_tolerance_deg", sketch.merge_tolerance_deg),
            ("sketch.edit_merge_tolerance_deg", sketch.edit_merge_tolerance_deg),
        ] {
            if !(0.0..90.0).contains(&value) {
                return Err(ConfigError::out_of_range(key, value));
            }
        }
        if sketch.max_segments == 0 {
            return Err(ConfigError::out_of_range("sketch.max_segments", 0));
        }
        if !(sketch.coalesce_px >= 0.0) {
            return Err(ConfigError::out_of_range("sketch.coalesce_px", sketch.coalesce_px));
        }

        let normalize = &self.normalize;
        if !(0.0..=1.0).contains(&normalize.equalize_threshold) {
            return Err(ConfigError::out_of_range(
                "normalize.equalize_threshold",
                normalize.equalize_threshold,
            ));
        }
        if !(normalize.level_epsilon_px >= 0.0) {
            return Err(ConfigError::out_of_range(
                "normalize.level_epsilon_px",
                normalize.level_epsilon_px,
            ));
        }

        if !is_valid_hex(&self.paint.default_color) {
            return Err(ConfigError::InvalidColor {
                key: "paint.default_color".to_string(),
                value: self.paint.default_color.clone(),
            });
        }

        if self.editor.default_quantity == 0 {
            return Err(ConfigError::out_of_range("editor.default_quantity", 0));
        }

        if self.material.blank_length_mm == 0 || self.material.blank_width_mm == 0 {
            return Err(ConfigError::out_of_range(
                "material",
                format!(
                    "{}x{}",
                    self.material.blank_length_mm, self.material.blank_width_mm
                ),
            ));
        }

        Ok(())
    }

    /// Straightening parameters for the designer pipeline
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            tolerance_px: self.sketch.tolerance_px,
            snap_step_deg: self.sketch.snap_step_deg,
            merge_tolerance_deg: self.sketch.merge_tolerance_deg,
            max_segments: self.sketch.max_segments,
            normalize: NormalizePolicy {
                equalize_threshold: self.normalize.equalize_threshold,
                level_epsilon_px: self.normalize.level_epsilon_px,
                regularize_patterns: self.normalize.regularize_patterns,
            },
        }
    }

    /// Initial state for a sketch session
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            pipeline: self.pipeline_config(),
            mm_per_px: self.sketch.mm_per_px,
            coalesce_px: self.sketch.coalesce_px,
            edit_merge_tolerance_deg: self.sketch.edit_merge_tolerance_deg,
            angle_edit_enabled: self.editor.angle_edit_enabled,
            default_quantity: self.editor.default_quantity,
            default_paint_color: self.paint.default_color.clone(),
            default_paint_label: self.paint.default_label.clone(),
        }
    }

    pub fn blank_size(&self) -> BlankSize {
        BlankSize::new(self.material.blank_length_mm, self.material.blank_width_mm)
    }
}
