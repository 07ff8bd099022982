//! Engine configuration and TOML loading.

use crate::aggregate::AggregationConfig;
use crate::error::{EngineError, EngineResult};
use crate::quantize::check_tick_size;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Construction parameters for a [`SimulationEngine`](super::SimulationEngine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub initial_cash: f64,
    /// Price grid width. Immutable for the lifetime of an engine.
    pub tick_size: f64,
}

impl EngineConfig {
    pub fn new(initial_cash: f64, tick_size: f64) -> Self {
        Self {
            initial_cash,
            tick_size,
        }
    }

    pub fn validate(&self) -> EngineResult<()> {
        if !self.initial_cash.is_finite() {
            return Err(EngineError::invalid_config("initial_cash", self.initial_cash));
        }
        check_tick_size(self.tick_size)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        Self::from_toml(&std::fs::read_to_string(path)?)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_cash: 100_000.0,
            tick_size: 10.0,
        }
    }
}

/// `[engine]` and `[aggregation]` sections of a run file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub engine: EngineConfig,
    pub aggregation: AggregationConfig,
}

impl RunConfig {
    pub fn validate(&self) -> EngineResult<()> {
        self.engine.validate()?;
        self.aggregation.validate()
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        Self::from_toml(&std::fs::read_to_string(path)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Invalid(#[from] EngineError),
}
