// src/config.rs - Sampling and tolerance configuration
//! Tuning constants for the trajectory generator, loadable from TOML.
//!
//! The three constants (grid step, coincidence tolerance, velocity floor)
//! are deliberately configuration rather than embedded literals so the
//! sampling resolution can be tuned without touching the algorithm.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::motion::trajectory::{
    DEFAULT_POSITION_TOLERANCE, DEFAULT_TIME_STEP, DEFAULT_VELOCITY_FLOOR,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Top-level configuration for the motion crate.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub sampling: SamplingConfig,
    #[serde(default)]
    pub tolerance: ToleranceConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sampling: SamplingConfig::default(),
            tolerance: ToleranceConfig::default(),
        }
    }
}

/// Output grid settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SamplingConfig {
    /// Sample spacing in seconds.
    #[serde(default = "default_time_step")]
    pub time_step: f64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            time_step: default_time_step(),
        }
    }
}

/// Numeric tolerances of the generator.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToleranceConfig {
    /// Start/goal distances below this are treated as coincident.
    #[serde(default = "default_position_tolerance")]
    pub position: f64,
    /// Floor for a recomputed cruise velocity, guarding the blend-time
    /// division.
    #[serde(default = "default_velocity_floor")]
    pub velocity_floor: f64,
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            position: default_position_tolerance(),
            velocity_floor: default_velocity_floor(),
        }
    }
}

fn default_time_step() -> f64 {
    DEFAULT_TIME_STEP
}
fn default_position_tolerance() -> f64 {
    DEFAULT_POSITION_TOLERANCE
}
fn default_velocity_floor() -> f64 {
    DEFAULT_VELOCITY_FLOOR
}

impl Config {
    /// Load and validate a configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded motion configuration from {}", path);
        Ok(config)
    }

    /// Check that the constants are usable by the generator.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.sampling.time_step.is_finite() || self.sampling.time_step <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "sampling.time_step must be a positive number, got {}",
                self.sampling.time_step
            )));
        }
        if !self.tolerance.position.is_finite() || self.tolerance.position < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "tolerance.position must be non-negative, got {}",
                self.tolerance.position
            )));
        }
        if !self.tolerance.velocity_floor.is_finite() || self.tolerance.velocity_floor <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "tolerance.velocity_floor must be a positive number, got {}",
                self.tolerance.velocity_floor
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sampling.time_step, 0.02);
        assert_eq!(config.tolerance.position, 0.01);
        assert_eq!(config.tolerance.velocity_floor, 1e-6);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: Config = toml::from_str("[sampling]\ntime_step = 0.01\n").unwrap();
        assert_eq!(config.sampling.time_step, 0.01);
        assert_eq!(config.tolerance.position, 0.01);
    }

    #[test]
    fn rejects_non_positive_time_step() {
        let config: Config = toml::from_str("[sampling]\ntime_step = 0.0\n").unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
