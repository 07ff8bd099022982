//! Aggregation settings.

use crate::error::{EngineError, EngineResult};
use crate::quantize::check_tick_size;
use serde::{Deserialize, Serialize};

/// Settings for one aggregation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Bucket width in milliseconds. Must be positive.
    pub bucket_ms: i64,
    /// Grid width used for `close_tick`. Must be positive.
    pub tick_size: f64,
    /// Minimum run count before run reductions are spread across threads.
    pub parallel_threshold: usize,
}

impl AggregationConfig {
    pub fn new(bucket_ms: i64, tick_size: f64) -> Self {
        Self {
            bucket_ms,
            tick_size,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> EngineResult<()> {
        if self.bucket_ms <= 0 {
            return Err(EngineError::invalid_config("bucket_ms", self.bucket_ms));
        }
        check_tick_size(self.tick_size)
    }
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            bucket_ms: 50,
            tick_size: 10.0,
            parallel_threshold: 4096,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_bucket() {
        for bucket_ms in [0, -50] {
            assert_eq!(
                AggregationConfig::new(bucket_ms, 1.0).validate().unwrap_err(),
                EngineError::InvalidConfig {
                    field: "bucket_ms",
                    value: bucket_ms.to_string(),
                }
            );
        }
    }

    #[test]
    fn rejects_bad_tick_size() {
        assert!(AggregationConfig::new(50, 0.0).validate().is_err());
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let config: AggregationConfig = toml::from_str("bucket_ms = 250").unwrap();
        assert_eq!(config.bucket_ms, 250);
        assert_eq!(config.tick_size, 10.0);
        assert_eq!(config.parallel_threshold, 4096);
    }
}
