//! Simulation engine: account state driven by replayed trades.
//!
//! Entry points:
//! - [`SimulationEngine::step_one`]: one trade per call.
//! - [`SimulationEngine::step_many`]: a whole [`ColumnarBatch`] per call, with
//!   validation and quantization done column-wise up front.
//!
//! [`ColumnarBatch`]: crate::domain::ColumnarBatch

pub mod config;
mod execution;
pub mod simulator;

pub use config::{ConfigError, EngineConfig, RunConfig};
pub use simulator::SimulationEngine;
