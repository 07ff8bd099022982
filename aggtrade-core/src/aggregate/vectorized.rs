//! Vectorized aggregator: whole-batch bucket ids, run detection, bulk reduction.

use super::{bucket_start, AggregationConfig, RunTotals};
use crate::domain::{AggregatedTick, ColumnarBatch, Side};
use crate::error::EngineResult;
use crate::validate::{check_batch, TradeRules};
use rayon::prelude::*;
use std::ops::Range;

/// Aggregate a columnar batch in bulk.
///
/// "Last" fields come from the final index of each contiguous run, never
/// from an unordered grouping.
pub fn aggregate_vectorized(
    batch: &ColumnarBatch,
    config: &AggregationConfig,
) -> EngineResult<Vec<AggregatedTick>> {
    config.validate()?;
    check_batch(batch, None, TradeRules::buckets(config.tick_size, config.bucket_ms))?;
    if batch.is_empty() {
        return Ok(Vec::new());
    }

    let bucket_ids = bucket_ids(batch.timestamps(), config.bucket_ms)?;
    let runs = run_boundaries(&bucket_ids);

    let reduce = |run: &Range<usize>| {
        reduce_run(batch, bucket_ids[run.start], run.clone()).into_tick(config.tick_size)
    };
    let ticks: Vec<AggregatedTick> = if runs.len() >= config.parallel_threshold {
        runs.par_iter().map(reduce).collect()
    } else {
        runs.iter().map(reduce).collect()
    };

    tracing::debug!(
        trades = batch.len(),
        buckets = ticks.len(),
        bucket_ms = config.bucket_ms,
        "vectorized aggregation done"
    );
    Ok(ticks)
}

/// Per-element bucket start. Fails at the first timestamp whose bucket start
/// is not representable.
pub fn bucket_ids(timestamps: &[i64], bucket_ms: i64) -> EngineResult<Vec<i64>> {
    timestamps
        .iter()
        .enumerate()
        .map(|(i, &t)| bucket_start(t, bucket_ms).map_err(|e| e.at_offset(i)))
        .collect()
}

/// Contiguous index ranges sharing one bucket id, in index order.
pub fn run_boundaries(ids: &[i64]) -> Vec<Range<usize>> {
    if ids.is_empty() {
        return Vec::new();
    }
    let starts: Vec<usize> = std::iter::once(0)
        .chain((1..ids.len()).filter(|&i| ids[i] != ids[i - 1]))
        .collect();
    starts
        .iter()
        .enumerate()
        .map(|(k, &start)| {
            let end = starts.get(k + 1).copied().unwrap_or(ids.len());
            start..end
        })
        .collect()
}

fn reduce_run(batch: &ColumnarBatch, bucket_start_ms: i64, run: Range<usize>) -> RunTotals {
    let prices = &batch.prices()[run.clone()];
    let quantities = &batch.quantities()[run.clone()];
    let sides = &batch.sides()[run];

    let open = prices[0];
    let close = prices[prices.len() - 1];
    let high = prices.iter().copied().fold(open, f64::max);
    let low = prices.iter().copied().fold(open, f64::min);
    let volume = quantities.iter().fold(0.0, |acc, &q| acc + q);
    let buy_volume = side_volume(quantities, sides, Side::Buy);
    let sell_volume = side_volume(quantities, sides, Side::Sell);
    let notional = prices
        .iter()
        .zip(quantities)
        .fold(0.0, |acc, (&p, &q)| acc + p * q);

    RunTotals {
        bucket_start_ms,
        trade_count: prices.len() as u64,
        open,
        high,
        low,
        close,
        volume,
        buy_volume,
        sell_volume,
        notional,
    }
}

fn side_volume(quantities: &[f64], sides: &[Side], side: Side) -> f64 {
    quantities
        .iter()
        .zip(sides)
        .filter(|(_, s)| **s == side)
        .fold(0.0, |acc, (&q, _)| acc + q)
}
