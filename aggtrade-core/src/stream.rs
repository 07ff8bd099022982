//! Trade-stream abstraction with a row backend and a columnar backend.
//!
//! Row-oriented input is any `Iterator<Item = Trade>`; columnar input is a
//! [`ColumnarBatch`], which also exposes its rows through [`BatchCursor`].
//! Code written against [`TradeSource`] runs unchanged on either backend.
//!
//! [`BatchCursor`]: crate::domain::BatchCursor

use crate::domain::{ColumnarBatch, Trade};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordered cursor over `(timestamp, price, quantity, side)` tuples.
pub trait TradeSource {
    /// Next trade in time order, or `None` when exhausted.
    fn next_trade(&mut self) -> Option<Trade>;

    /// Lower bound on the number of trades left.
    fn remaining_hint(&self) -> usize {
        0
    }
}

impl<I> TradeSource for I
where
    I: Iterator<Item = Trade>,
{
    #[inline]
    fn next_trade(&mut self) -> Option<Trade> {
        self.next()
    }

    fn remaining_hint(&self) -> usize {
        self.size_hint().0
    }
}

/// Input in either shape.
#[derive(Debug, Clone, Copy)]
pub enum TradeData<'a> {
    Rows(&'a [Trade]),
    Columnar(&'a ColumnarBatch),
}

impl TradeData<'_> {
    pub fn len(&self) -> usize {
        match self {
            TradeData::Rows(rows) => rows.len(),
            TradeData::Columnar(batch) => batch.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a> From<&'a [Trade]> for TradeData<'a> {
    fn from(rows: &'a [Trade]) -> Self {
        TradeData::Rows(rows)
    }
}

impl<'a> From<&'a Vec<Trade>> for TradeData<'a> {
    fn from(rows: &'a Vec<Trade>) -> Self {
        TradeData::Rows(rows)
    }
}

impl<'a> From<&'a ColumnarBatch> for TradeData<'a> {
    fn from(batch: &'a ColumnarBatch) -> Self {
        TradeData::Columnar(batch)
    }
}

/// Which variant of an engine to run. Both produce identical results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingMode {
    /// One trade at a time.
    Scalar,
    /// Whole-column transforms; `batch` is accepted as an alias.
    #[default]
    #[serde(alias = "batch")]
    Vectorized,
}

impl fmt::Display for ProcessingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessingMode::Scalar => write!(f, "scalar"),
            ProcessingMode::Vectorized => write!(f, "vectorized"),
        }
    }
}

impl FromStr for ProcessingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "scalar" | "row" => Ok(ProcessingMode::Scalar),
            "vectorized" | "batch" | "columnar" => Ok(ProcessingMode::Vectorized),
            other => Err(format!(
                "unknown processing mode '{other}'. Valid: scalar, vectorized (batch)"
            )),
        }
    }
}
