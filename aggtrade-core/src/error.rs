//! Error taxonomy shared by the aggregation and simulation engines.

use thiserror::Error;

/// Failure surfaced by an engine call.
///
/// Every variant aborts the call that detected it before any state is
/// mutated. Nothing is retried internally.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("invalid config: `{field}` = {value}")]
    InvalidConfig { field: &'static str, value: String },

    #[error("malformed trade at index {index}: {reason}")]
    MalformedTrade { index: usize, reason: String },

    #[error(
        "timestamps must be non-decreasing: index {index} has {current_ms} after {previous_ms}"
    )]
    SequenceOrderViolation {
        index: usize,
        previous_ms: i64,
        current_ms: i64,
    },

    #[error("column `{column}` has length {actual}, expected {expected}")]
    LengthMismatch {
        column: &'static str,
        expected: usize,
        actual: usize,
    },
}

impl EngineError {
    pub(crate) fn invalid_config(field: &'static str, value: impl ToString) -> Self {
        Self::InvalidConfig {
            field,
            value: value.to_string(),
        }
    }

    /// Shift a per-trade index by `offset`, for errors raised inside a
    /// sub-range of a larger call.
    pub(crate) fn at_offset(self, offset: usize) -> Self {
        match self {
            Self::MalformedTrade { index, reason } => Self::MalformedTrade {
                index: index + offset,
                reason,
            },
            Self::SequenceOrderViolation {
                index,
                previous_ms,
                current_ms,
            } => Self::SequenceOrderViolation {
                index: index + offset,
                previous_ms,
                current_ms,
            },
            other => other,
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
