//! ColumnarBatch: the same trade stream stored as four parallel columns.

use super::trade::{Side, Trade};
use crate::error::{EngineError, EngineResult};
use std::ops::Range;

/// Column-oriented trade batch.
///
/// Index `i` across all four columns describes one logical trade. Column
/// lengths are checked at construction; timestamp order is not, the engines
/// check it on use.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnarBatch {
    timestamps: Vec<i64>,
    prices: Vec<f64>,
    quantities: Vec<f64>,
    sides: Vec<Side>,
}

impl ColumnarBatch {
    pub fn new(
        timestamps: Vec<i64>,
        prices: Vec<f64>,
        quantities: Vec<f64>,
        sides: Vec<Side>,
    ) -> EngineResult<Self> {
        let expected = timestamps.len();
        check_len("price", expected, prices.len())?;
        check_len("quantity", expected, quantities.len())?;
        check_len("side", expected, sides.len())?;
        Ok(Self {
            timestamps,
            prices,
            quantities,
            sides,
        })
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            timestamps: Vec::with_capacity(capacity),
            prices: Vec::with_capacity(capacity),
            quantities: Vec::with_capacity(capacity),
            sides: Vec::with_capacity(capacity),
        }
    }

    pub fn from_trades(trades: &[Trade]) -> Self {
        let mut batch = Self::with_capacity(trades.len());
        for trade in trades {
            batch.push(*trade);
        }
        batch
    }

    pub fn push(&mut self, trade: Trade) {
        self.timestamps.push(trade.timestamp_ms);
        self.prices.push(trade.price);
        self.quantities.push(trade.quantity);
        self.sides.push(trade.side);
    }

    pub fn to_trades(&self) -> Vec<Trade> {
        self.iter().collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Trade> {
        if index >= self.len() {
            return None;
        }
        Some(Trade {
            timestamp_ms: self.timestamps[index],
            price: self.prices[index],
            quantity: self.quantities[index],
            side: self.sides[index],
        })
    }

    /// Row cursor over the columnar backend.
    pub fn iter(&self) -> BatchCursor<'_> {
        BatchCursor {
            batch: self,
            pos: 0,
        }
    }

    /// Owned copy of the rows in `range`. Panics if the range is out of bounds.
    pub fn slice(&self, range: Range<usize>) -> Self {
        Self {
            timestamps: self.timestamps[range.clone()].to_vec(),
            prices: self.prices[range.clone()].to_vec(),
            quantities: self.quantities[range.clone()].to_vec(),
            sides: self.sides[range].to_vec(),
        }
    }

    pub fn timestamps(&self) -> &[i64] {
        &self.timestamps
    }

    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    pub fn quantities(&self) -> &[f64] {
        &self.quantities
    }

    pub fn sides(&self) -> &[Side] {
        &self.sides
    }

    /// Side column as storage codes (see [`Side::code`]).
    pub fn side_codes(&self) -> Vec<i32> {
        self.sides.iter().map(|s| s.code()).collect()
    }
}

impl<'a> IntoIterator for &'a ColumnarBatch {
    type Item = Trade;
    type IntoIter = BatchCursor<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Trade> for ColumnarBatch {
    fn from_iter<I: IntoIterator<Item = Trade>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut batch = Self::with_capacity(iter.size_hint().0);
        for trade in iter {
            batch.push(trade);
        }
        batch
    }
}

/// Sequential cursor yielding the rows of a [`ColumnarBatch`] in index order.
#[derive(Debug, Clone)]
pub struct BatchCursor<'a> {
    batch: &'a ColumnarBatch,
    pos: usize,
}

impl Iterator for BatchCursor<'_> {
    type Item = Trade;

    fn next(&mut self) -> Option<Trade> {
        let trade = self.batch.get(self.pos)?;
        self.pos += 1;
        Some(trade)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.batch.len() - self.pos;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BatchCursor<'_> {}

fn check_len(column: &'static str, expected: usize, actual: usize) -> EngineResult<()> {
    if expected != actual {
        return Err(EngineError::LengthMismatch {
            column,
            expected,
            actual,
        });
    }
    Ok(())
}
