use polars::prelude::*;

/// Canonical column layout for trade data handed over by a loader.
///
/// `timestamp` is epoch milliseconds, `side` uses [`Side::code`](crate::domain::Side::code).
pub struct TradeSchema;

impl TradeSchema {
    pub const TIMESTAMP: &'static str = "timestamp";
    pub const PRICE: &'static str = "price";
    pub const QTY: &'static str = "qty";
    pub const SIDE: &'static str = "side";

    /// Get the canonical trade schema
    pub fn schema() -> Schema {
        Schema::from_iter(vec![
            Field::new(Self::TIMESTAMP.into(), DataType::Int64),
            Field::new(Self::PRICE.into(), DataType::Float64),
            Field::new(Self::QTY.into(), DataType::Float64),
            Field::new(Self::SIDE.into(), DataType::Int32),
        ])
    }

    /// Select the canonical columns and cast them to the canonical types.
    /// Loaders with inferred CSV types go through this before collecting.
    pub fn normalize(frame: LazyFrame) -> LazyFrame {
        frame.select([
            col(Self::TIMESTAMP).cast(DataType::Int64),
            col(Self::PRICE).cast(DataType::Float64),
            col(Self::QTY).cast(DataType::Float64),
            col(Self::SIDE).cast(DataType::Int32),
        ])
    }

    /// Validate DataFrame against schema
    pub fn validate(df: &DataFrame) -> Result<(), SchemaError> {
        let expected = Self::schema();
        let actual = df.schema();

        for field in expected.iter_fields() {
            let actual_dtype = actual
                .get(field.name())
                .ok_or_else(|| SchemaError::MissingColumn(field.name().to_string()))?;
            if actual_dtype != field.dtype() {
                return Err(SchemaError::TypeMismatch {
                    column: field.name().to_string(),
                    expected: field.dtype().clone(),
                    actual: actual_dtype.clone(),
                });
            }
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Type mismatch in column {column}: expected {expected:?}, got {actual:?}")]
    TypeMismatch {
        column: String,
        expected: DataType,
        actual: DataType,
    },

    #[error("Null value in column {column} at row {row}")]
    NullValue { column: String, row: usize },

    #[error("Unknown side code {code} at row {row}")]
    UnknownSide { code: i32, row: usize },

    #[error(transparent)]
    Polars(#[from] PolarsError),

    #[error(transparent)]
    Engine(#[from] crate::error::EngineError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(side: Series) -> DataFrame {
        DataFrame::new(vec![
            Series::new("timestamp".into(), &[1_609_459_200_000i64, 1_609_459_200_001]).into(),
            Series::new("price".into(), &[42_000.0, 42_001.5]).into(),
            Series::new("qty".into(), &[0.5, 0.1]).into(),
            side.into(),
        ])
        .unwrap()
    }

    #[test]
    fn test_schema_has_all_required_columns() {
        let schema = TradeSchema::schema();
        for name in ["timestamp", "price", "qty", "side"] {
            assert!(schema.contains(name), "{name}");
        }
    }

    #[test]
    fn test_validate_accepts_valid_dataframe() {
        let df = frame(Series::new("side".into(), &[0i32, 1]));
        assert!(TradeSchema::validate(&df).is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_column() {
        let df = DataFrame::new(vec![
            Series::new("timestamp".into(), &[1i64]).into(),
            Series::new("price".into(), &[1.0]).into(),
        ])
        .unwrap();
        assert!(matches!(
            TradeSchema::validate(&df).unwrap_err(),
            SchemaError::MissingColumn(_)
        ));
    }

    #[test]
    fn test_validate_rejects_wrong_type() {
        let df = frame(Series::new("side".into(), &["BUY", "SELL"]));
        assert!(matches!(
            TradeSchema::validate(&df).unwrap_err(),
            SchemaError::TypeMismatch { .. }
        ));
    }

    #[test]
    fn test_normalize_casts_inferred_types() {
        let df = frame(Series::new("side".into(), &[0i64, 1]));
        assert!(TradeSchema::validate(&df).is_err());
        let normalized = TradeSchema::normalize(df.lazy()).collect().unwrap();
        assert!(TradeSchema::validate(&normalized).is_ok());
    }
}
