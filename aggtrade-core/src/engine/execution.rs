//! The execution rule applied per trade.
//!
//! For a trade with `quantity`, `side` and quantized `price_tick`:
//!
//! ```text
//! fill_price = price_tick * tick_size
//! signed_qty = +quantity (BUY) | -quantity (SELL)
//! position  += signed_qty
//! cash      -= signed_qty * fill_price
//! ```
//!
//! The row path and the batch path both call [`apply_fill`], in index order.

use crate::domain::{AccountState, Side};
use crate::quantize::tick_to_price;

#[inline]
pub(crate) fn apply_fill(
    state: &mut AccountState,
    timestamp_ms: i64,
    price_tick: i64,
    quantity: f64,
    side: Side,
) {
    let fill_price = tick_to_price(price_tick, state.tick_size());
    let signed_qty = side.sign() * quantity;
    state.position += signed_qty;
    state.cash -= signed_qty * fill_price;
    match side {
        Side::Buy => state.buy_volume += quantity,
        Side::Sell => state.sell_volume += quantity,
    }
    state.last_price_tick = Some(price_tick);
    state.last_timestamp_ms = Some(timestamp_ms);
    state.trades_applied += 1;
}
