//! Conversions between polars DataFrames and engine data.

use super::schema::{SchemaError, TradeSchema};
use crate::domain::{AggregatedTick, ColumnarBatch, Side};
use polars::prelude::*;

/// Build a [`ColumnarBatch`] from a frame in the canonical trade schema.
///
/// Rows keep their frame order; the engines check timestamp order on use.
pub fn batch_from_dataframe(df: &DataFrame) -> Result<ColumnarBatch, SchemaError> {
    TradeSchema::validate(df)?;

    let timestamps = df
        .column(TradeSchema::TIMESTAMP)?
        .as_materialized_series()
        .i64()?;
    let prices = df.column(TradeSchema::PRICE)?.as_materialized_series().f64()?;
    let quantities = df.column(TradeSchema::QTY)?.as_materialized_series().f64()?;
    let sides = df.column(TradeSchema::SIDE)?.as_materialized_series().i32()?;

    check_no_nulls(TradeSchema::TIMESTAMP, timestamps)?;
    check_no_nulls(TradeSchema::PRICE, prices)?;
    check_no_nulls(TradeSchema::QTY, quantities)?;
    check_no_nulls(TradeSchema::SIDE, sides)?;

    let sides = sides
        .into_no_null_iter()
        .enumerate()
        .map(|(row, code)| Side::from_code(code).ok_or(SchemaError::UnknownSide { code, row }))
        .collect::<Result<Vec<_>, _>>()?;

    let batch = ColumnarBatch::new(
        timestamps.into_no_null_iter().collect(),
        prices.into_no_null_iter().collect(),
        quantities.into_no_null_iter().collect(),
        sides,
    )?;
    tracing::debug!(rows = batch.len(), "batch built from dataframe");
    Ok(batch)
}

/// Canonical-schema frame holding the rows of `batch`.
pub fn batch_to_dataframe(batch: &ColumnarBatch) -> PolarsResult<DataFrame> {
    DataFrame::new(vec![
        Series::new(TradeSchema::TIMESTAMP.into(), batch.timestamps()).into(),
        Series::new(TradeSchema::PRICE.into(), batch.prices()).into(),
        Series::new(TradeSchema::QTY.into(), batch.quantities()).into(),
        Series::new(TradeSchema::SIDE.into(), batch.side_codes()).into(),
    ])
}

/// One row per aggregated tick.
pub fn ticks_to_dataframe(ticks: &[AggregatedTick]) -> PolarsResult<DataFrame> {
    fn column<T, F>(ticks: &[AggregatedTick], f: F) -> Vec<T>
    where
        F: Fn(&AggregatedTick) -> T,
    {
        ticks.iter().map(f).collect()
    }

    DataFrame::new(vec![
        Series::new("bucket_start_ms".into(), column(ticks, |t| t.bucket_start_ms)).into(),
        Series::new("trade_count".into(), column(ticks, |t| t.trade_count)).into(),
        Series::new("open".into(), column(ticks, |t| t.open)).into(),
        Series::new("high".into(), column(ticks, |t| t.high)).into(),
        Series::new("low".into(), column(ticks, |t| t.low)).into(),
        Series::new("close".into(), column(ticks, |t| t.close)).into(),
        Series::new("close_tick".into(), column(ticks, |t| t.close_tick)).into(),
        Series::new("volume".into(), column(ticks, |t| t.volume)).into(),
        Series::new("buy_volume".into(), column(ticks, |t| t.buy_volume)).into(),
        Series::new("sell_volume".into(), column(ticks, |t| t.sell_volume)).into(),
        Series::new("notional".into(), column(ticks, |t| t.notional)).into(),
        Series::new("vwap".into(), column(ticks, |t| t.vwap)).into(),
    ])
}

fn check_no_nulls<T: PolarsNumericType>(
    column: &str,
    values: &ChunkedArray<T>,
) -> Result<(), SchemaError> {
    if values.null_count() == 0 {
        return Ok(());
    }
    let row = values.into_iter().position(|v| v.is_none()).unwrap_or(0);
    Err(SchemaError::NullValue {
        column: column.to_string(),
        row,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Trade;

    fn sample_batch() -> ColumnarBatch {
        ColumnarBatch::from_trades(&[
            Trade::buy(1_000, 42_000.0, 0.5),
            Trade::sell(1_001, 41_999.5, 0.25),
            Trade::buy(1_050, 42_001.0, 1.0),
        ])
    }

    #[test]
    fn frame_round_trip_preserves_rows() {
        let batch = sample_batch();
        let df = batch_to_dataframe(&batch).unwrap();
        assert_eq!(df.height(), 3);
        assert_eq!(batch_from_dataframe(&df).unwrap(), batch);
    }

    #[test]
    fn rejects_unknown_side_codes() {
        let df = DataFrame::new(vec![
            Series::new("timestamp".into(), &[1i64, 2]).into(),
            Series::new("price".into(), &[1.0, 1.0]).into(),
            Series::new("qty".into(), &[1.0, 1.0]).into(),
            Series::new("side".into(), &[0i32, 7]).into(),
        ])
        .unwrap();
        assert!(matches!(
            batch_from_dataframe(&df).unwrap_err(),
            SchemaError::UnknownSide { code: 7, row: 1 }
        ));
    }

    #[test]
    fn rejects_nulls() {
        let df = DataFrame::new(vec![
            Series::new("timestamp".into(), &[1i64, 2]).into(),
            Series::new("price".into(), &[Some(1.0), None]).into(),
            Series::new("qty".into(), &[1.0, 1.0]).into(),
            Series::new("side".into(), &[0i32, 1]).into(),
        ])
        .unwrap();
        match batch_from_dataframe(&df).unwrap_err() {
            SchemaError::NullValue { column, row } => {
                assert_eq!(column, "price");
                assert_eq!(row, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn ticks_frame_has_one_row_per_tick() {
        let batch = sample_batch();
        let ticks = crate::aggregate::aggregate_vectorized(
            &batch,
            &crate::aggregate::AggregationConfig::new(50, 0.5),
        )
        .unwrap();
        let df = ticks_to_dataframe(&ticks).unwrap();
        assert_eq!(df.height(), ticks.len());
        assert_eq!(df.width(), 12);
    }
}
