//! `aggtrade bench`: wall-clock comparison of the two processing variants.

use aggtrade_core::aggregate::{aggregate_scalar, aggregate_vectorized};
use aggtrade_core::synthetic::{self, SyntheticConfig};
use aggtrade_core::{AggregationConfig, EngineConfig, SimulationEngine};
use anyhow::{bail, Result};
use std::time::{Duration, Instant};

struct Timing {
    label: &'static str,
    elapsed: Duration,
}

pub fn run_bench(ticks: usize, seed: u64, bucket_ms: i64, tick_size: f64) -> Result<()> {
    let aggregation = AggregationConfig::new(bucket_ms, tick_size);
    aggregation.validate()?;
    let engine_config = EngineConfig {
        tick_size,
        ..EngineConfig::default()
    };
    engine_config.validate()?;

    tracing::info!(ticks, seed, bucket_ms, tick_size, "generating synthetic trades");
    let shape = SyntheticConfig::for_tick_size(tick_size);
    let batch = synthetic::generate_with(ticks, seed, &shape);
    let rows = batch.to_trades();

    let (scalar_ticks, scalar_agg) = timed(|| aggregate_scalar(rows.iter().copied(), &aggregation));
    let scalar_ticks = scalar_ticks?;
    let (vector_ticks, vector_agg) = timed(|| aggregate_vectorized(&batch, &aggregation));
    let vector_ticks = vector_ticks?;
    if scalar_ticks != vector_ticks {
        bail!("aggregation mismatch between scalar and vectorized variants");
    }

    let mut one = SimulationEngine::new(engine_config.clone())?;
    let (scalar_state, scalar_sim) = timed(|| -> Result<_> {
        for trade in &rows {
            one.step_one(*trade)?;
        }
        Ok(one.snapshot())
    });
    let scalar_state = scalar_state?;

    let mut many = SimulationEngine::new(engine_config)?;
    let (batch_state, batch_sim) = timed(|| many.step_many(&batch));
    let batch_state = batch_state?;
    if scalar_state != batch_state {
        bail!("simulation mismatch between step_one and step_many");
    }

    println!("Trades:        {ticks}");
    println!("Buckets:       {}", vector_ticks.len());
    println!();
    println!("{:<24} {:>12} {:>16} {:>9}", "variant", "elapsed", "throughput", "speedup");
    println!("{}", "-".repeat(64));
    print_pair(
        ticks,
        Timing { label: "aggregate/scalar", elapsed: scalar_agg },
        Timing { label: "aggregate/vectorized", elapsed: vector_agg },
    );
    print_pair(
        ticks,
        Timing { label: "simulate/step_one", elapsed: scalar_sim },
        Timing { label: "simulate/step_many", elapsed: batch_sim },
    );
    println!();
    println!("Results identical across variants.");
    Ok(())
}

fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let out = f();
    (out, start.elapsed())
}

fn print_pair(n: usize, baseline: Timing, candidate: Timing) {
    let base_secs = baseline.elapsed.as_secs_f64();
    for timing in [&baseline, &candidate] {
        let secs = timing.elapsed.as_secs_f64();
        let speedup = if secs > 0.0 { base_secs / secs } else { f64::INFINITY };
        let throughput = if secs > 0.0 {
            format_throughput(n as f64 / secs)
        } else {
            "-".to_string()
        };
        println!(
            "{:<24} {:>10.3}ms {:>16} {:>8.2}x",
            timing.label,
            secs * 1e3,
            throughput,
            speedup
        );
    }
}

/// Trades per second with a K/M suffix.
pub fn format_throughput(per_sec: f64) -> String {
    if per_sec >= 1e6 {
        format!("{:.2}M/s", per_sec / 1e6)
    } else if per_sec >= 1e3 {
        format!("{:.1}K/s", per_sec / 1e3)
    } else {
        format!("{per_sec:.0}/s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn throughput_suffixes() {
        assert_eq!(format_throughput(2_500_000.0), "2.50M/s");
        assert_eq!(format_throughput(12_300.0), "12.3K/s");
        assert_eq!(format_throughput(42.0), "42/s");
    }

    #[test]
    fn small_bench_runs_and_agrees() {
        run_bench(5_000, 7, 50, 10.0).unwrap();
    }

    #[test]
    fn bench_rejects_bad_bucket() {
        assert!(run_bench(10, 7, 0, 10.0).is_err());
    }
}
