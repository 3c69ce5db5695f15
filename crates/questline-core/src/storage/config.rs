//! TOML-based application configuration.
//!
//! Stores user preferences that are not part of the replayable snapshot:
//! the gateway endpoint/model and the garden tuning constant.
//!
//! Configuration is stored at `~/.config/questline/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::StorageError;
use crate::garden::DEFAULT_GROWTH_PROBABILITY;

/// Decomposition/advice service settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GatewayConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
        }
    }
}

/// Garden tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GardenConfig {
    /// Probability that a completion grows a plant (0.0 - 1.0).
    #[serde(default = "default_growth_probability")]
    pub growth_probability: f64,
}

fn default_growth_probability() -> f64 {
    DEFAULT_GROWTH_PROBABILITY
}

impl Default for GardenConfig {
    fn default() -> Self {
        Self {
            growth_probability: default_growth_probability(),
        }
    }
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/questline/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub garden: GardenConfig,
}

impl Config {
    /// Load from the default location; a missing file yields the defaults.
    pub fn load() -> Result<Self, StorageError> {
        Self::load_from(&data_dir()?.join("config.toml"))
    }

    pub fn load_from(path: &Path) -> Result<Self, StorageError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|e| StorageError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&raw).map_err(|e| StorageError::ConfigParse(e.to_string()))
    }

    pub fn save(&self) -> Result<(), StorageError> {
        self.save_to(&data_dir()?.join("config.toml"))
    }

    pub fn save_to(&self, path: &Path) -> Result<(), StorageError> {
        let raw = toml::to_string_pretty(self)
            .map_err(|e| StorageError::ConfigParse(e.to_string()))?;
        std::fs::write(path, raw).map_err(|e| StorageError::WriteFailed {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn default_path() -> Result<PathBuf, StorageError> {
        Ok(data_dir()?.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = Config::default();
        assert!(config.gateway.endpoint.starts_with("https://"));
        assert!((0.6..=0.7).contains(&config.garden.growth_probability));
    }

    #[test]
    fn round_trips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        config.garden.growth_probability = 0.7;
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[gateway]\nmodel = \"custom\"\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.gateway.model, "custom");
        assert_eq!(config.gateway.endpoint, GatewayConfig::default().endpoint);
        assert_eq!(config.garden, GardenConfig::default());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, Config::default());
    }
}
