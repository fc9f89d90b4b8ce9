//! Error types for the settings crate.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or writing a settings file.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The settings file exists but could not be read.
    #[error("Cannot read settings file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The settings file could not be written.
    #[error("Cannot write settings file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Neither a config nor a home directory is known for this user.
    #[error("No configuration directory: {0}")]
    NoConfigDirectory(String),

    /// Other I/O failure, such as creating the settings directory.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed JSON settings: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed TOML settings: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Cannot encode settings as TOML: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    /// The file parsed but holds values the designer cannot use.
    #[error("Invalid settings: {0}")]
    Invalid(#[from] ConfigError),
}

/// Validation failures of a [`crate::Config`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Only `.json` and `.toml` files are understood.
    #[error("Unsupported settings file extension: {0}")]
    UnsupportedFormat(String),

    #[error("Value out of range for '{key}': {value}")]
    ValueOutOfRange { key: String, value: String },

    /// A colour is not a `#RRGGBB` string.
    #[error("Invalid colour for '{key}': {value}")]
    InvalidColor { key: String, value: String },
}

impl ConfigError {
    pub(crate) fn out_of_range(key: &str, value: impl ToString) -> Self {
        ConfigError::ValueOutOfRange {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

pub type SettingsResult<T> = Result<T, SettingsError>;

pub type ConfigResult<T> = Result<T, ConfigError>;
