//! AccountState: cash and position of the single simulated account.

use serde::{Deserialize, Serialize};

/// Mutable account owned by one simulation engine.
///
/// `tick_size` is fixed at construction; everything else changes as trades
/// are applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccountState {
    pub cash: f64,
    pub position: f64,
    tick_size: f64,
    pub last_price_tick: Option<i64>,
    pub last_timestamp_ms: Option<i64>,
    pub trades_applied: u64,
    pub buy_volume: f64,
    pub sell_volume: f64,
}

impl AccountState {
    pub(crate) fn new(initial_cash: f64, tick_size: f64) -> Self {
        Self {
            cash: initial_cash,
            position: 0.0,
            tick_size,
            last_price_tick: None,
            last_timestamp_ms: None,
            trades_applied: 0,
            buy_volume: 0.0,
            sell_volume: 0.0,
        }
    }

    pub fn tick_size(&self) -> f64 {
        self.tick_size
    }

    /// Grid price of the last applied trade.
    pub fn last_fill_price(&self) -> Option<f64> {
        self.last_price_tick.map(|t| t as f64 * self.tick_size)
    }

    /// Cash plus the position marked at the last fill price.
    pub fn equity(&self) -> f64 {
        match self.last_fill_price() {
            Some(price) => self.cash + self.position * price,
            None => self.cash,
        }
    }

    pub fn snapshot(&self) -> AccountSnapshot {
        AccountSnapshot {
            cash: self.cash,
            position: self.position,
            last_price_tick: self.last_price_tick,
            last_timestamp_ms: self.last_timestamp_ms,
            trades_applied: self.trades_applied,
            equity: self.equity(),
        }
    }
}

/// Read-only copy of the account returned to callers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub cash: f64,
    pub position: f64,
    pub last_price_tick: Option<i64>,
    pub last_timestamp_ms: Option<i64>,
    pub trades_applied: u64,
    pub equity: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_account_equity_is_cash() {
        let state = AccountState::new(100_000.0, 10.0);
        assert_eq!(state.equity(), 100_000.0);
        assert_eq!(state.last_fill_price(), None);
    }

    #[test]
    fn equity_marks_position_at_last_grid_price() {
        let mut state = AccountState::new(1_000.0, 0.5);
        state.position = 2.0;
        state.cash = 800.0;
        state.last_price_tick = Some(200);
        assert_eq!(state.last_fill_price(), Some(100.0));
        assert_eq!(state.equity(), 1_000.0);
    }

    #[test]
    fn snapshot_serializes() {
        let state = AccountState::new(50.0, 1.0);
        let json = serde_json::to_string(&state.snapshot()).unwrap();
        let back: AccountSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state.snapshot());
    }
}
