//! Guide configuration.
//!
//! Configuration is optional. A YAML or JSON file can name the dataset to
//! load, the language of user-facing messages, the log level and the tick
//! interval. Missing fields take their defaults.
//!
//! ```yaml
//! dataset: ./recipes
//! locale: english
//! log_level: debug
//! log_destination: both
//! tick_interval_ms: 1000
//! ```

use crate::logging::LogDestination;
use crate::store::{RecipeStore, StoreError};
use camino::{Utf8Path, Utf8PathBuf};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Language for user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Bengali,
    English,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML config: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON config: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(Utf8PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuideConfig {
    /// Dataset file or directory; the bundled dataset when unset
    pub dataset: Option<Utf8PathBuf>,
    pub locale: Locale,
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`
    pub log_level: String,
    /// `terminal`, `file` (./recipe_guide.log) or `both`
    pub log_destination: LogDestination,
    pub tick_interval_ms: u64,
}

impl Default for GuideConfig {
    fn default() -> Self {
        GuideConfig {
            dataset: None,
            locale: Locale::default(),
            log_level: "info".to_string(),
            log_destination: LogDestination::Terminal,
            tick_interval_ms: 1000,
        }
    }
}

impl GuideConfig {
    /// Reads a config file, choosing the parser by extension.
    pub fn from_path(path: &Utf8Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().map(str::to_ascii_lowercase).as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            Some("json") => Ok(serde_json::from_str(&content)?),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document is a valid, all-defaults config.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// The configured log level, falling back to `Info` when unparseable.
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    /// Loads the configured dataset, or the bundled one.
    pub fn open_store(&self) -> Result<RecipeStore, StoreError> {
        match &self.dataset {
            Some(path) if path.is_dir() => RecipeStore::from_dir(path),
            Some(path) => RecipeStore::from_path(path),
            None => RecipeStore::bundled(),
        }
    }
}
