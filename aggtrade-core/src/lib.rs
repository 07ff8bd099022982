//! aggtrade core: trade aggregation and account simulation for backtesting.
//!
//! This crate contains:
//! - Domain types (trades, columnar batches, aggregated ticks, account state)
//! - Tick quantizer (`floor(price / tick_size)`)
//! - Aggregation engine, scalar and vectorized
//! - Simulation engine, `step_one` and `step_many`
//! - polars DataFrame interop at the loader boundary
//! - Deterministic synthetic trade generator
//!
//! The scalar and vectorized/batch variants of each engine return identical
//! results for identical input, errors included.

pub mod aggregate;
pub mod data;
pub mod domain;
pub mod engine;
pub mod error;
pub mod quantize;
pub mod stream;
pub mod synthetic;
mod validate;

pub use aggregate::{aggregate, aggregate_scalar, aggregate_vectorized, AggregationConfig};
pub use domain::{AccountSnapshot, AccountState, AggregatedTick, ColumnarBatch, Side, Trade};
pub use engine::{EngineConfig, RunConfig, SimulationEngine};
pub use error::{EngineError, EngineResult};
pub use quantize::{quantize, quantize_slice};
pub use stream::{ProcessingMode, TradeData, TradeSource};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: public engine types can move to and be shared
    /// across worker threads.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<Trade>();
        require_sync::<Trade>();
        require_send::<ColumnarBatch>();
        require_sync::<ColumnarBatch>();
        require_send::<AggregatedTick>();
        require_sync::<AggregatedTick>();
        require_send::<AccountState>();
        require_sync::<AccountState>();
        require_send::<SimulationEngine>();
        require_sync::<SimulationEngine>();
        require_send::<AggregationConfig>();
        require_sync::<AggregationConfig>();
        require_send::<aggregate::ScalarAggregator>();
        require_sync::<aggregate::ScalarAggregator>();
        require_send::<EngineError>();
        require_sync::<EngineError>();
    }

    /// Independent engines never share state.
    #[test]
    fn engines_are_independent() {
        let config = EngineConfig::new(1_000.0, 1.0);
        let mut a = SimulationEngine::new(config.clone()).unwrap();
        let b = SimulationEngine::new(config).unwrap();
        a.step_one(Trade::buy(0, 10.0, 1.0)).unwrap();
        assert_eq!(a.state().position, 1.0);
        assert_eq!(b.state().position, 0.0);
    }
}
