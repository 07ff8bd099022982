//! AggregatedTick: summary of all trades falling into one time bucket.

use serde::{Deserialize, Serialize};

/// One record per non-empty bucket `[bucket_start_ms, bucket_start_ms + bucket_ms)`.
///
/// `open`/`close` come from the first/last trade of the bucket in index
/// order. Sums are left-to-right folds starting at 0.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregatedTick {
    pub bucket_start_ms: i64,
    pub trade_count: u64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    /// `close` on the tick grid: `floor(close / tick_size)`.
    pub close_tick: i64,
    pub volume: f64,
    pub buy_volume: f64,
    pub sell_volume: f64,
    pub notional: f64,
    pub vwap: f64,
}

impl AggregatedTick {
    /// Buy volume minus sell volume.
    pub fn volume_imbalance(&self) -> f64 {
        self.buy_volume - self.sell_volume
    }
}
