//! Driver settings

use config::{Config, ConfigError, Environment, File};
use feature_prep::PreprocessConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable prefix, e.g. `ORDER_PREP__LOG_LEVEL=debug`
pub const ENV_PREFIX: &str = "ORDER_PREP";

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Settings read from an optional file overlaid by the environment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// `trace`, `debug`, `info`, `warn` or `error`
    pub log_level: String,
    /// Log line format
    pub log_format: LogFormat,
    /// Preprocessor configuration
    pub preprocess: PreprocessConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            preprocess: PreprocessConfig::default(),
        }
    }
}

impl Settings {
    /// Load settings from `path` (format from its extension) and
    /// `ORDER_PREP__*` variables
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(path, environment())
    }

    fn load_with(path: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        builder.add_source(env).build()?.try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX).separator("__")
}
