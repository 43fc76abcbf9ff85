//! Configuration for simulation runs.
//!
//! Supports loading configuration from:
//! 1. A YAML file (explicit path, or `<config dir>/qbell/config.yaml`)
//! 2. Environment variables (with `QBELL_` prefix)
//!
//! Precedence (highest to lowest):
//! 1. Environment variables
//! 2. Configuration file
//! 3. Default values

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Complete configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Simulation parameters.
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Parameters of a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Rotation angle in radians.
    #[serde(default = "default_theta")]
    pub theta: f64,

    /// Number of measurement shots.
    #[serde(default = "default_shots")]
    pub shots: u32,

    /// Seed for the shot sampler. Unset means OS entropy per run.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read.
    #[error("Cannot read configuration file {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// File is not valid YAML for this schema.
    #[error("Cannot parse configuration: {0}")]
    Parse(#[from] serde_yaml_ng::Error),

    /// A value is out of range.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

fn default_theta() -> f64 {
    PI / 4.0
}

fn default_shots() -> u32 {
    1024
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            theta: default_theta(),
            shots: default_shots(),
            seed: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Parse configuration from a YAML string.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml_ng::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&contents)
    }

    /// Default configuration file location, `<config dir>/qbell/config.yaml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("qbell").join("config.yaml"))
    }

    /// Load configuration with the following precedence:
    /// 1. The given file, else the default location if it exists, else defaults
    /// 2. Environment variable overrides
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(path) => {
                    debug!(path = %path.display(), "loading default configuration file");
                    Self::from_file(path)?
                }
                None => Self::default(),
            },
        };

        let config = config.merge_env();
        config.validate()?;
        Ok(config)
    }

    /// Apply `QBELL_*` environment variable overrides.
    pub fn merge_env(self) -> Self {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a variable lookup.
    ///
    /// Recognised keys: `QBELL_THETA`, `QBELL_SHOTS`, `QBELL_SEED`,
    /// `QBELL_LOG_LEVEL`. Unparseable values are logged and skipped.
    pub fn merge_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = lookup("QBELL_THETA") {
            match v.trim().parse() {
                Ok(theta) => self.simulation.theta = theta,
                Err(_) => warn!(value = %v, "ignoring unparseable QBELL_THETA"),
            }
        }
        if let Some(v) = lookup("QBELL_SHOTS") {
            match v.trim().parse() {
                Ok(shots) => self.simulation.shots = shots,
                Err(_) => warn!(value = %v, "ignoring unparseable QBELL_SHOTS"),
            }
        }
        if let Some(v) = lookup("QBELL_SEED") {
            match v.trim().parse() {
                Ok(seed) => self.simulation.seed = Some(seed),
                Err(_) => warn!(value = %v, "ignoring unparseable QBELL_SEED"),
            }
        }
        if let Some(v) = lookup("QBELL_LOG_LEVEL") {
            self.logging.level = v;
        }
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.simulation.shots == 0 {
            return Err(ConfigError::Invalid(
                "simulation.shots must be at least 1".to_string(),
            ));
        }
        if !self.simulation.theta.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "simulation.theta must be finite, got {}",
                self.simulation.theta
            )));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "Invalid log level: {}. Must be one of: {:?}",
                self.logging.level, valid_levels
            )));
        }

        Ok(())
    }
}
