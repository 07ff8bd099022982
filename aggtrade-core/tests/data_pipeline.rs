//! Loader-boundary round trip: synthetic data -> DataFrame -> engines.

use aggtrade_core::data::{batch_from_dataframe, batch_to_dataframe, ticks_to_dataframe};
use aggtrade_core::synthetic;
use aggtrade_core::{
    aggregate, EngineConfig, ProcessingMode, RunConfig, SimulationEngine, TradeData,
};

#[test]
fn dataframe_batch_feeds_both_engines_identically() {
    let generated = synthetic::generate(50_000, 42);
    let df = batch_to_dataframe(&generated).unwrap();
    let batch = batch_from_dataframe(&df).unwrap();
    assert_eq!(batch, generated);

    let config = RunConfig::default();
    let scalar = aggregate(TradeData::Columnar(&batch), ProcessingMode::Scalar, &config.aggregation)
        .unwrap();
    let vectorized = aggregate(
        TradeData::Columnar(&batch),
        ProcessingMode::Vectorized,
        &config.aggregation,
    )
    .unwrap();
    assert_eq!(scalar, vectorized);
    assert_eq!(scalar.len(), 1_000); // 50k trades at 1 ms spacing, 50 ms buckets

    let ticks_df = ticks_to_dataframe(&vectorized).unwrap();
    assert_eq!(ticks_df.height(), 1_000);

    let mut scalar_engine = SimulationEngine::new(config.engine.clone()).unwrap();
    let mut batch_engine = SimulationEngine::new(config.engine).unwrap();
    scalar_engine
        .run(TradeData::Columnar(&batch), ProcessingMode::Scalar)
        .unwrap();
    batch_engine
        .run(TradeData::Columnar(&batch), ProcessingMode::Vectorized)
        .unwrap();
    assert_eq!(scalar_engine.state(), batch_engine.state());
    assert_eq!(batch_engine.state().trades_applied, 50_000);
}

#[test]
fn run_config_loads_from_disk() {
    let path = std::env::temp_dir().join(format!("aggtrade-run-{}.toml", std::process::id()));
    std::fs::write(
        &path,
        "[engine]\ninitial_cash = 2500.0\ntick_size = 0.25\n\n[aggregation]\nbucket_ms = 1000\n",
    )
    .unwrap();
    let config = RunConfig::from_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(config.engine, EngineConfig::new(2_500.0, 0.25));
    assert_eq!(config.aggregation.bucket_ms, 1_000);
}
