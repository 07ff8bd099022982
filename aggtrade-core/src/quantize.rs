//! Tick quantizer: float price -> integer price tick.
//!
//! The rounding policy is floor division, `floor(price / tick_size)`, for
//! both the single-price and the whole-column path. Both paths go through
//! [`floor_tick`], so they agree on negative and exactly divisible inputs.

use crate::error::{EngineError, EngineResult};

/// Check that `tick_size` is usable as a grid width.
pub fn check_tick_size(tick_size: f64) -> EngineResult<()> {
    if !tick_size.is_finite() || tick_size <= 0.0 {
        return Err(EngineError::invalid_config("tick_size", tick_size));
    }
    Ok(())
}

/// 2^63. Quotients in `[-2^63, 2^63)` fit an `i64` exactly after flooring.
const TICK_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// `floor(price / tick_size)`, or `None` when the quotient is not finite or
/// falls outside the `i64` range.
#[inline]
pub(crate) fn checked_floor_tick(price: f64, tick_size: f64) -> Option<i64> {
    let ticks = (price / tick_size).floor();
    (-TICK_LIMIT..TICK_LIMIT)
        .contains(&ticks)
        .then_some(ticks as i64)
}

/// Unchecked form of [`checked_floor_tick`] for prices that already passed
/// validation against the same tick size.
#[inline]
pub(crate) fn floor_tick(price: f64, tick_size: f64) -> i64 {
    (price / tick_size).floor() as i64
}

pub(crate) fn out_of_range_reason(price: f64, tick_size: f64) -> String {
    format!("price {price} has no i64 tick index at tick_size {tick_size}")
}

fn quantize_at(index: usize, price: f64, tick_size: f64) -> EngineResult<i64> {
    if !price.is_finite() {
        return Err(EngineError::MalformedTrade {
            index,
            reason: format!("price {price} is not finite"),
        });
    }
    checked_floor_tick(price, tick_size).ok_or_else(|| EngineError::MalformedTrade {
        index,
        reason: out_of_range_reason(price, tick_size),
    })
}

/// Quantize one price.
pub fn quantize(price: f64, tick_size: f64) -> EngineResult<i64> {
    check_tick_size(tick_size)?;
    quantize_at(0, price, tick_size)
}

/// Quantize a whole price column with the same rounding as [`quantize`].
/// Fails at the first price that cannot be quantized.
pub fn quantize_slice(prices: &[f64], tick_size: f64) -> EngineResult<Vec<i64>> {
    check_tick_size(tick_size)?;
    prices
        .iter()
        .enumerate()
        .map(|(i, &p)| quantize_at(i, p, tick_size))
        .collect()
}

/// Grid price of a tick index.
#[inline]
pub fn tick_to_price(price_tick: i64, tick_size: f64) -> f64 {
    price_tick as f64 * tick_size
}
