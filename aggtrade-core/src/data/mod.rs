//! Loader boundary: polars DataFrame interop. No file I/O happens here.

pub mod frame;
pub mod schema;

pub use frame::{batch_from_dataframe, batch_to_dataframe, ticks_to_dataframe};
pub use schema::{SchemaError, TradeSchema};
