//! Simulation engine: one account, two entry points.

use super::config::EngineConfig;
use super::execution::apply_fill;
use crate::domain::{AccountSnapshot, AccountState, ColumnarBatch, Trade};
use crate::error::{EngineError, EngineResult};
use crate::quantize::{floor_tick, quantize_slice};
use crate::stream::{ProcessingMode, TradeData};
use crate::validate::{check_batch, check_trade, TradeRules};

/// Caller-owned account simulator.
///
/// Every call either applies all of its trades or none of them: input is
/// validated before the state is touched. Timestamps must be non-decreasing
/// within a call and across calls.
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    config: EngineConfig,
    state: AccountState,
}

impl SimulationEngine {
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        let state = AccountState::new(config.initial_cash, config.tick_size);
        Ok(Self { config, state })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> &AccountState {
        &self.state
    }

    pub fn snapshot(&self) -> AccountSnapshot {
        self.state.snapshot()
    }

    /// Apply a single trade.
    pub fn step_one(&mut self, trade: Trade) -> EngineResult<AccountSnapshot> {
        let rules = TradeRules::fills(self.state.tick_size());
        if let Err(err) = check_trade(0, self.state.last_timestamp_ms, &trade, rules) {
            tracing::warn!(error = %err, "trade rejected");
            return Err(err);
        }
        let price_tick = floor_tick(trade.price, self.state.tick_size());
        apply_fill(
            &mut self.state,
            trade.timestamp_ms,
            price_tick,
            trade.quantity,
            trade.side,
        );
        Ok(self.state.snapshot())
    }

    /// Apply every row of `batch` in index order, as if by repeated
    /// [`step_one`](Self::step_one), or none of them.
    pub fn step_many(&mut self, batch: &ColumnarBatch) -> EngineResult<AccountSnapshot> {
        let rules = TradeRules::fills(self.state.tick_size());
        if let Err(err) = check_batch(batch, self.state.last_timestamp_ms, rules) {
            tracing::warn!(error = %err, rows = batch.len(), "batch rejected");
            return Err(err);
        }
        let price_ticks = quantize_slice(batch.prices(), self.state.tick_size())?;

        let mut next = self.state;
        for (i, &price_tick) in price_ticks.iter().enumerate() {
            apply_fill(
                &mut next,
                batch.timestamps()[i],
                price_tick,
                batch.quantities()[i],
                batch.sides()[i],
            );
        }
        self.state = next;

        tracing::debug!(
            rows = batch.len(),
            trades_applied = self.state.trades_applied,
            "batch applied"
        );
        Ok(self.state.snapshot())
    }

    /// Apply `data` with the selected variant. Scalar mode steps a staged
    /// copy trade by trade and commits only if every trade succeeds.
    pub fn run(
        &mut self,
        data: TradeData<'_>,
        mode: ProcessingMode,
    ) -> EngineResult<AccountSnapshot> {
        match (mode, data) {
            (ProcessingMode::Vectorized, TradeData::Columnar(batch)) => self.step_many(batch),
            (ProcessingMode::Vectorized, TradeData::Rows(rows)) => {
                self.step_many(&ColumnarBatch::from_trades(rows))
            }
            (ProcessingMode::Scalar, TradeData::Rows(rows)) => self.step_all(rows.iter().copied()),
            (ProcessingMode::Scalar, TradeData::Columnar(batch)) => self.step_all(batch.iter()),
        }
    }

    fn step_all(&mut self, trades: impl Iterator<Item = Trade>) -> EngineResult<AccountSnapshot> {
        let mut staged = self.clone();
        for (i, trade) in trades.enumerate() {
            staged.step_one(trade).map_err(|e: EngineError| e.at_offset(i))?;
        }
        *self = staged;
        Ok(self.state.snapshot())
    }
}
