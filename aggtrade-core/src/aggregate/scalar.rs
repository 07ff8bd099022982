//! Scalar aggregator: consumes trades one at a time.

use super::{bucket_start, AggregationConfig, RunTotals};
use crate::domain::{AggregatedTick, Trade};
use crate::error::EngineResult;
use crate::stream::TradeSource;
use crate::validate::{check_trade, TradeRules};

/// Running aggregator holding the bucket currently being filled.
///
/// `push` may be called any number of times; `finish` flushes the open
/// bucket. A failed `push` leaves the aggregator as it was.
#[derive(Debug, Clone)]
pub struct ScalarAggregator {
    bucket_ms: i64,
    tick_size: f64,
    current: Option<RunTotals>,
    previous_ms: Option<i64>,
    consumed: usize,
    emitted: Vec<AggregatedTick>,
}

impl ScalarAggregator {
    pub fn new(config: &AggregationConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self {
            bucket_ms: config.bucket_ms,
            tick_size: config.tick_size,
            current: None,
            previous_ms: None,
            consumed: 0,
            emitted: Vec::new(),
        })
    }

    pub fn push(&mut self, trade: Trade) -> EngineResult<()> {
        let rules = TradeRules::buckets(self.tick_size, self.bucket_ms);
        check_trade(self.consumed, self.previous_ms, &trade, rules)?;

        let start = bucket_start(trade.timestamp_ms, self.bucket_ms)
            .map_err(|e| e.at_offset(self.consumed))?;
        match self.current.as_mut() {
            Some(totals) if totals.bucket_start_ms == start => {
                totals.add(trade.price, trade.quantity, trade.side);
            }
            _ => {
                if let Some(done) = self.current.take() {
                    self.emitted.push(done.into_tick(self.tick_size));
                }
                let mut totals = RunTotals::open_with(start, trade.price);
                totals.add(trade.price, trade.quantity, trade.side);
                self.current = Some(totals);
            }
        }

        self.previous_ms = Some(trade.timestamp_ms);
        self.consumed += 1;
        Ok(())
    }

    /// Buckets completed so far (the open bucket is not included).
    pub fn completed(&self) -> &[AggregatedTick] {
        &self.emitted
    }

    pub fn consumed(&self) -> usize {
        self.consumed
    }

    pub fn finish(mut self) -> Vec<AggregatedTick> {
        if let Some(done) = self.current.take() {
            self.emitted.push(done.into_tick(self.tick_size));
        }
        self.emitted
    }
}

/// Aggregate a time-ordered trade stream one trade at a time.
pub fn aggregate_scalar<S: TradeSource>(
    mut source: S,
    config: &AggregationConfig,
) -> EngineResult<Vec<AggregatedTick>> {
    let mut aggregator = ScalarAggregator::new(config)?;
    while let Some(trade) = source.next_trade() {
        aggregator.push(trade)?;
    }
    let consumed = aggregator.consumed();
    let ticks = aggregator.finish();
    tracing::trace!(trades = consumed, buckets = ticks.len(), "scalar aggregation done");
    Ok(ticks)
}
