//! Deterministic synthetic trade generator for benchmarks and tests.

use crate::domain::{ColumnarBatch, Side};
use crate::engine::EngineConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Shape of the generated stream.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticConfig {
    pub base_price: f64,
    /// Standard deviation of the per-trade price step.
    pub step_std: f64,
    /// Mean of the exponential quantity distribution.
    pub mean_qty: f64,
    pub start_ms: i64,
    pub spacing_ms: i64,
    /// Lower bound for generated prices, one tick above zero.
    pub min_price: f64,
}

impl SyntheticConfig {
    /// Default stream shape with prices floored at one `tick_size`.
    pub fn for_tick_size(tick_size: f64) -> Self {
        Self {
            base_price: 42_000.0,
            step_std: 5.0,
            mean_qty: 0.05,
            start_ms: 1_609_459_200_000,
            spacing_ms: 1,
            min_price: tick_size,
        }
    }
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self::for_tick_size(EngineConfig::default().tick_size)
    }
}

/// `n` trades from the default config.
pub fn generate(n: usize, seed: u64) -> ColumnarBatch {
    generate_with(n, seed, &SyntheticConfig::default())
}

/// Random walk prices, exponential quantities, 50/50 sides, evenly spaced
/// timestamps. Same `(n, seed, config)` always yields the same batch.
pub fn generate_with(n: usize, seed: u64, config: &SyntheticConfig) -> ColumnarBatch {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut batch = ColumnarBatch::with_capacity(n);
    let mut price = config.base_price;

    for i in 0..n {
        price = (price + config.step_std * standard_normal(&mut rng)).max(config.min_price);
        let u: f64 = rng.gen_range(f64::EPSILON..1.0);
        let quantity = -config.mean_qty * u.ln();
        let side = if rng.gen_bool(0.5) { Side::Buy } else { Side::Sell };
        let timestamp_ms = config.start_ms + i as i64 * config.spacing_ms;
        batch.push(crate::domain::Trade::new(timestamp_ms, price, quantity, side));
    }

    batch
}

/// Box-Muller transform.
fn standard_normal(rng: &mut StdRng) -> f64 {
    let u1: f64 = rng.gen_range(f64::EPSILON..1.0);
    let u2: f64 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}
