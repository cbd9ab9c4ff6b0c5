//! Configuration for the workload driver.
//!
//! Supports YAML file and environment variable overrides.

use serde::Deserialize;
use std::path::Path;

/// Workload configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WorkloadConfig {
    /// Number of records to insert and delete.
    pub keys: usize,
    /// Seed for the key shuffles.
    pub seed: u64,
    /// Validate the whole tree after this many operations (0 disables).
    pub validate_every: usize,
    /// Look every key up between the insert and delete phases.
    pub lookups: bool,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            keys: 10_000,
            seed: 42,
            validate_every: 1_000,
            lookups: true,
        }
    }
}

impl WorkloadConfig {
    /// Load configuration from file and environment.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables
    /// 2. Config file
    /// 3. Defaults
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("RBTREE_CONFIG").unwrap_or_else(|_| "rbtree.yaml".to_string());

        let mut config = if Path::new(&config_path).exists() {
            Self::from_file(&config_path)?
        } else {
            Self::default()
        };

        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;

        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(keys) = env_override("RBTREE_KEYS")? {
            self.keys = keys;
        }
        if let Some(seed) = env_override("RBTREE_SEED")? {
            self.seed = seed;
        }
        if let Some(every) = env_override("RBTREE_VALIDATE_EVERY")? {
            self.validate_every = every;
        }
        Ok(())
    }
}

fn env_override<V: std::str::FromStr>(name: &str) -> Result<Option<V>, ConfigError> {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv(name.to_string(), raw)),
        Err(_) => Ok(None),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{0}': {1}")]
    FileRead(String, String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid value for {0}: '{1}'")]
    InvalidEnv(String, String),
}
