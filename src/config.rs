//! Engine configuration from environment variables or a TOML file.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub generation: GenerationSettings,
}

/// Tuning knobs for the schedule generation heuristic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationSettings {
    /// The greedy fallback strategy gives up on a group after
    /// `credits * attempts_per_credit` placement attempts.
    #[serde(default = "default_attempts_per_credit")]
    pub attempts_per_credit: u32,
}

fn default_attempts_per_credit() -> u32 {
    100
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            attempts_per_credit: default_attempts_per_credit(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(EngineConfig)` if the file exists and parses
    /// * `Err(ConfigError)` otherwise
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset or unparseable.
    ///
    /// # Environment Variables
    /// - `SCHEDULER_ATTEMPTS_PER_CREDIT` (optional, default: 100)
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(value) = std::env::var("SCHEDULER_ATTEMPTS_PER_CREDIT") {
            if let Ok(parsed) = value.parse() {
                config.generation.attempts_per_credit = parsed;
            }
        }
        config
    }
}
