//! Aggregation engine: fixed-interval buckets over an ordered trade stream.
//!
//! Bucket assignment: `bucket_start_ms = floor(timestamp_ms / bucket_ms) * bucket_ms`,
//! half-open `[start, start + bucket_ms)`. Only non-empty buckets are emitted,
//! in ascending start order.
//!
//! Two variants share the summary math in [`RunTotals`]:
//! - [`aggregate_scalar`]: one pass over a [`TradeSource`] with a running
//!   accumulator flushed at each bucket boundary.
//! - [`aggregate_vectorized`]: bucket ids for the whole batch, run boundaries
//!   from adjacent-id comparison, one bulk reduction per run.

pub mod config;
pub mod scalar;
pub mod vectorized;

pub use config::AggregationConfig;
pub use scalar::{aggregate_scalar, ScalarAggregator};
pub use vectorized::aggregate_vectorized;

use crate::domain::{AggregatedTick, ColumnarBatch, Side};
use crate::error::{EngineError, EngineResult};
use crate::quantize::floor_tick;
use crate::stream::{ProcessingMode, TradeData};

/// Start of the bucket containing `timestamp_ms`.
///
/// Fails when the start would fall below `i64::MIN` (only possible for
/// timestamps within one bucket of it).
pub fn bucket_start(timestamp_ms: i64, bucket_ms: i64) -> EngineResult<i64> {
    if bucket_ms <= 0 {
        return Err(EngineError::invalid_config("bucket_ms", bucket_ms));
    }
    checked_bucket_start(timestamp_ms, bucket_ms).ok_or_else(|| EngineError::MalformedTrade {
        index: 0,
        reason: unbucketable_reason(timestamp_ms, bucket_ms),
    })
}

/// `bucket_ms` must be positive.
#[inline]
pub(crate) fn checked_bucket_start(timestamp_ms: i64, bucket_ms: i64) -> Option<i64> {
    timestamp_ms.div_euclid(bucket_ms).checked_mul(bucket_ms)
}

pub(crate) fn unbucketable_reason(timestamp_ms: i64, bucket_ms: i64) -> String {
    format!("timestamp {timestamp_ms} has no representable bucket start at bucket_ms {bucket_ms}")
}

/// Aggregate `data` with the selected variant.
pub fn aggregate(
    data: TradeData<'_>,
    mode: ProcessingMode,
    config: &AggregationConfig,
) -> EngineResult<Vec<AggregatedTick>> {
    match (mode, data) {
        (ProcessingMode::Scalar, TradeData::Rows(rows)) => {
            aggregate_scalar(rows.iter().copied(), config)
        }
        (ProcessingMode::Scalar, TradeData::Columnar(batch)) => {
            aggregate_scalar(batch.iter(), config)
        }
        (ProcessingMode::Vectorized, TradeData::Rows(rows)) => {
            aggregate_vectorized(&ColumnarBatch::from_trades(rows), config)
        }
        (ProcessingMode::Vectorized, TradeData::Columnar(batch)) => {
            aggregate_vectorized(batch, config)
        }
    }
}

/// Partial summary of one bucket. Sums start at 0.0 and are folded left to
/// right in both variants so that results are bit-identical.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RunTotals {
    pub bucket_start_ms: i64,
    pub trade_count: u64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub buy_volume: f64,
    pub sell_volume: f64,
    pub notional: f64,
}

impl RunTotals {
    pub fn open_with(bucket_start_ms: i64, first_price: f64) -> Self {
        Self {
            bucket_start_ms,
            trade_count: 0,
            open: first_price,
            high: first_price,
            low: first_price,
            close: first_price,
            volume: 0.0,
            buy_volume: 0.0,
            sell_volume: 0.0,
            notional: 0.0,
        }
    }

    #[inline]
    pub fn add(&mut self, price: f64, quantity: f64, side: Side) {
        self.trade_count += 1;
        self.high = self.high.max(price);
        self.low = self.low.min(price);
        self.close = price;
        self.volume += quantity;
        match side {
            Side::Buy => self.buy_volume += quantity,
            Side::Sell => self.sell_volume += quantity,
        }
        self.notional += price * quantity;
    }

    pub fn into_tick(self, tick_size: f64) -> AggregatedTick {
        AggregatedTick {
            bucket_start_ms: self.bucket_start_ms,
            trade_count: self.trade_count,
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
            close_tick: floor_tick(self.close, tick_size),
            volume: self.volume,
            buy_volume: self.buy_volume,
            sell_volume: self.sell_volume,
            notional: self.notional,
            vwap: self.notional / self.volume,
        }
    }
}
