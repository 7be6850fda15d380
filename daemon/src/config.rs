//! Daemon configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;
use surety_types::{ActorId, RegistryParams};
use surety_utils::LogFormat;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to render config: {0}")]
    Render(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Everything needed to initialize a governance core.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuretyConfig {
    /// The only identity allowed to toggle the operational gate.
    pub administrator: ActorId,

    /// Airline registered at genesis.
    pub first_airline: ActorId,

    #[serde(default = "default_first_airline_name")]
    pub first_airline_name: String,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Registry constants; rendered last since TOML tables follow plain keys.
    #[serde(default)]
    pub params: RegistryParams,
}

fn default_first_airline_name() -> String {
    "First Airline".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl SuretyConfig {
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config
            .params
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        if config.administrator == config.first_airline {
            return Err(ConfigError::Invalid(
                "administrator and first_airline must differ".into(),
            ));
        }
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
