//! Criterion benchmarks for the scalar and vectorized/batch engine variants.
//!
//! Benchmarks:
//! 1. Aggregation: scalar cursor vs vectorized runs (sequential and parallel)
//! 2. Simulation: per-trade `step_one` vs one `step_many`
//! 3. Quantization: per-price vs whole-column

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use aggtrade_core::aggregate::{aggregate_scalar, aggregate_vectorized, AggregationConfig};
use aggtrade_core::synthetic;
use aggtrade_core::{quantize, quantize_slice, EngineConfig, SimulationEngine};

const SIZES: [usize; 3] = [10_000, 100_000, 1_000_000];

// ── 1. Aggregation ───────────────────────────────────────────────────

fn bench_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregation");

    for &n in &SIZES {
        let batch = synthetic::generate(n, 42);
        let rows = batch.to_trades();
        let config = AggregationConfig::new(50, 10.0);
        let parallel = AggregationConfig {
            parallel_threshold: 1,
            ..config.clone()
        };
        group.throughput(Throughput::Elements(n as u64));

        group.bench_with_input(BenchmarkId::new("scalar", n), &n, |b, _| {
            b.iter(|| aggregate_scalar(black_box(&rows).iter().copied(), &config));
        });
        group.bench_with_input(BenchmarkId::new("vectorized", n), &n, |b, _| {
            b.iter(|| aggregate_vectorized(black_box(&batch), &config));
        });
        group.bench_with_input(BenchmarkId::new("vectorized_parallel", n), &n, |b, _| {
            b.iter(|| aggregate_vectorized(black_box(&batch), &parallel));
        });
    }

    group.finish();
}

// ── 2. Simulation ────────────────────────────────────────────────────

fn bench_simulation(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulation");
    let config = EngineConfig::new(100_000.0, 10.0);

    for &n in &SIZES {
        let batch = synthetic::generate(n, 42);
        let rows = batch.to_trades();
        group.throughput(Throughput::Elements(n as u64));

        group.bench_with_input(BenchmarkId::new("step_one", n), &n, |b, _| {
            b.iter(|| {
                let mut engine = SimulationEngine::new(config.clone()).unwrap();
                for trade in black_box(&rows) {
                    let _ = engine.step_one(*trade);
                }
                black_box(engine.snapshot())
            });
        });
        group.bench_with_input(BenchmarkId::new("step_many", n), &n, |b, _| {
            b.iter(|| {
                let mut engine = SimulationEngine::new(config.clone()).unwrap();
                let _ = engine.step_many(black_box(&batch));
                black_box(engine.snapshot())
            });
        });
    }

    group.finish();
}

// ── 3. Quantization ──────────────────────────────────────────────────

fn bench_quantize(c: &mut Criterion) {
    let mut group = c.benchmark_group("quantize");
    let batch = synthetic::generate(100_000, 7);
    let prices = batch.prices();

    group.bench_function("per_price_100k", |b| {
        b.iter(|| {
            let ticks: Vec<i64> = black_box(prices)
                .iter()
                .map(|&p| quantize(p, 10.0).unwrap_or(0))
                .collect();
            black_box(ticks)
        });
    });
    group.bench_function("column_100k", |b| {
        b.iter(|| quantize_slice(black_box(prices), 10.0));
    });

    group.finish();
}

criterion_group!(benches, bench_aggregation, bench_simulation, bench_quantize);
criterion_main!(benches);
