//! Optional TOML settings file.
//!
//! ```toml
//! [logging]
//! level = "info"        # any EnvFilter directive
//! console = true        # log to stderr
//! file = "estimator.log"
//!
//! [tables]
//! tax_year = 2025
//! brackets = "data/tax_brackets.csv"
//! deductions = "data/standard_deductions.csv"
//! utah_rate = "0.0455"
//! ```
//!
//! Every key is optional. Command-line flags win over file values.

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// Settings file picked up from the working directory when `--config` is not given.
pub const DEFAULT_SETTINGS_FILE: &str = "tax-estimator.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub tables: TableSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSettings {
    pub level: String,
    pub console: bool,
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            console: true,
            file: None,
        }
    }
}

/// Where tax reference data comes from. With no bracket and deduction files
/// the built-in 2024 tables are used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableSettings {
    pub tax_year: Option<i32>,
    pub brackets: Option<PathBuf>,
    pub deductions: Option<PathBuf>,
    pub utah_rate: Option<Decimal>,
}

impl Settings {
    pub fn from_toml_str(s: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(s)?)
    }

    /// Load settings from `path`, which must exist. When `path` is `None`,
    /// [`DEFAULT_SETTINGS_FILE`] is read if present and defaults are used
    /// otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let path = match path {
            Some(path) => path,
            None => {
                let default = Path::new(DEFAULT_SETTINGS_FILE);
                if !default.is_file() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let contents = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }
}
