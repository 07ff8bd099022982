//! Domain types: trades, columnar batches, aggregated ticks, account state.

pub mod account;
pub mod batch;
pub mod tick;
pub mod trade;

pub use account::{AccountSnapshot, AccountState};
pub use batch::{BatchCursor, ColumnarBatch};
pub use tick::AggregatedTick;
pub use trade::{Side, Trade};
