//! Trade validation shared by the row and columnar paths.
//!
//! Per trade, malformed input (price, quantity, tick range, bucket range) is
//! checked before timestamp order, so the row path and the column path report
//! the same error for the same input.

use crate::aggregate::{checked_bucket_start, unbucketable_reason};
use crate::domain::{ColumnarBatch, Trade};
use crate::error::{EngineError, EngineResult};
use crate::quantize::{checked_floor_tick, out_of_range_reason};

/// Engine parameters a trade has to be representable under.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TradeRules {
    /// Grid the price is quantized onto.
    pub tick_size: f64,
    /// Bucket width, for aggregation.
    pub bucket_ms: Option<i64>,
}

impl TradeRules {
    pub fn fills(tick_size: f64) -> Self {
        Self {
            tick_size,
            bucket_ms: None,
        }
    }

    pub fn buckets(tick_size: f64, bucket_ms: i64) -> Self {
        Self {
            tick_size,
            bucket_ms: Some(bucket_ms),
        }
    }
}

fn malformed_reason(
    timestamp_ms: i64,
    price: f64,
    quantity: f64,
    rules: TradeRules,
) -> Option<String> {
    if !price.is_finite() || price <= 0.0 {
        return Some(format!("price {price} must be finite and positive"));
    }
    if !quantity.is_finite() || quantity <= 0.0 {
        return Some(format!("quantity {quantity} must be finite and positive"));
    }
    if checked_floor_tick(price, rules.tick_size).is_none() {
        return Some(out_of_range_reason(price, rules.tick_size));
    }
    match rules.bucket_ms {
        Some(bucket_ms) if checked_bucket_start(timestamp_ms, bucket_ms).is_none() => {
            Some(unbucketable_reason(timestamp_ms, bucket_ms))
        }
        _ => None,
    }
}

/// Validate one trade at position `index` of the current call.
pub(crate) fn check_trade(
    index: usize,
    previous_ms: Option<i64>,
    trade: &Trade,
    rules: TradeRules,
) -> EngineResult<()> {
    let malformed = malformed_reason(trade.timestamp_ms, trade.price, trade.quantity, rules);
    if let Some(reason) = malformed {
        return Err(EngineError::MalformedTrade { index, reason });
    }
    match previous_ms {
        Some(previous_ms) if trade.timestamp_ms < previous_ms => {
            Err(EngineError::SequenceOrderViolation {
                index,
                previous_ms,
                current_ms: trade.timestamp_ms,
            })
        }
        _ => Ok(()),
    }
}

/// Validate a whole batch with column scans. `previous_ms` is the last
/// timestamp seen before this batch, if any.
pub(crate) fn check_batch(
    batch: &ColumnarBatch,
    previous_ms: Option<i64>,
    rules: TradeRules,
) -> EngineResult<()> {
    let prices = batch.prices();
    let quantities = batch.quantities();
    let timestamps = batch.timestamps();

    let malformed = timestamps
        .iter()
        .zip(prices)
        .zip(quantities)
        .position(|((&t, &p), &q)| malformed_reason(t, p, q, rules).is_some());

    let leading = match (previous_ms, timestamps.first()) {
        (Some(prev), Some(&first)) if first < prev => Some(0),
        _ => None,
    };
    let out_of_order = leading.or_else(|| {
        timestamps
            .windows(2)
            .position(|w| w[1] < w[0])
            .map(|i| i + 1)
    });

    let first_bad = match (malformed, out_of_order) {
        (None, None) => return Ok(()),
        (Some(m), Some(o)) => m.min(o),
        (Some(m), None) => m,
        (None, Some(o)) => o,
    };
    let previous = if first_bad == 0 {
        previous_ms
    } else {
        Some(timestamps[first_bad - 1])
    };
    let trade = Trade::new(
        timestamps[first_bad],
        prices[first_bad],
        quantities[first_bad],
        batch.sides()[first_bad],
    );
    check_trade(first_bad, previous, &trade, rules)
}
