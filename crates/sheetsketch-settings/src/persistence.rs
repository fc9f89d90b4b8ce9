//! Settings Persistence
//!
//! Locates the user configuration file and loads or saves it.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{ConfigResult, SettingsError, SettingsResult};

const APP_DIR: &str = "sheetsketch";
const CONFIG_FILE: &str = "config.toml";

/// Settings persistence layer
#[derive(Debug, Clone, Default)]
pub struct SettingsPersistence {
    config: Config,
}

impl SettingsPersistence {
    /// Create new persistence layer with default config
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from file
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let config = Config::load_from_file(path)?;
        Ok(Self { config })
    }

    /// Load settings, falling back to defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if !path.exists() {
            tracing::warn!(
                "No settings file at {}, using defaults",
                path.display()
            );
            return Ok(Self::new());
        }
        Self::load_from_file(path)
    }

    /// Save settings to file
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        self.config.save_to_file(path)?;
        tracing::info!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Get reference to config
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get mutable reference to config
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Validate settings
    pub fn validate(&self) -> ConfigResult<()> {
        self.config.validate()
    }

    /// Directory holding the user configuration
    pub fn config_dir() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .or_else(dirs::home_dir)
            .map(|base| base.join(APP_DIR))
            .ok_or_else(|| {
                SettingsError::NoConfigDirectory("no config or home directory".to_string())
            })
    }

    /// Default location of the configuration file
    pub fn default_path() -> SettingsResult<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Create the configuration directory if it is missing
    pub fn ensure_config_dir() -> SettingsResult<PathBuf> {
        let dir = Self::config_dir()?;
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}

impl From<Config> for SettingsPersistence {
    fn from(config: Config) -> Self {
        Self { config }
    }
}
