//! Data cleaning for product inventory tables.
//!
//! The cleaner normalizes column types and values in place:
//! - `restock_date` parsed as a calendar date (unparseable -> null)
//! - `current_stock` / `restock_threshold` coerced to numerics (invalid -> null)
//! - `our_price` coerced to numeric with nulls repaired to 0
//! - `category` capitalized
//!
//! Every transformation is row-preserving and idempotent; no row is added,
//! dropped, or reordered.

mod converters;

use anyhow::Result;
use polars::prelude::*;
use tracing::{debug, info};

/// Columns coerced to nullable numerics.
const NUMERIC_COLUMNS: [&str; 2] = ["current_stock", "restock_threshold"];

const DATE_COLUMN: &str = "restock_date";
const PRICE_COLUMN: &str = "our_price";
const CATEGORY_COLUMN: &str = "category";

/// Cleaner for product inventory records.
pub struct ProductCleaner;

impl ProductCleaner {
    /// Normalize column types and values, returning the cleaned frame and a
    /// log of the actions taken.
    ///
    /// `our_price` is the only column whose nulls are actively repaired;
    /// everywhere else a value that fails to parse becomes null and the row
    /// is retained.
    pub fn clean(&self, df: DataFrame) -> Result<(DataFrame, Vec<String>)> {
        let mut df = df;
        let mut cleaning_actions = Vec::new();

        info!("Cleaning {} product records...", df.height());

        // restock_date -> Date
        let dates = converters::coerce_date(df.column(DATE_COLUMN)?.as_materialized_series())?;
        let unparseable_dates = dates.null_count();
        df.replace(DATE_COLUMN, dates)?;
        cleaning_actions.push(format!(
            "Parsed '{}' as calendar dates ({} null after coercion)",
            DATE_COLUMN, unparseable_dates
        ));

        // stock counts -> Float64
        for col_name in NUMERIC_COLUMNS {
            let values = converters::coerce_numeric(df.column(col_name)?.as_materialized_series())?;
            let nulls = values.null_count();
            df.replace(col_name, values)?;
            cleaning_actions.push(format!(
                "Coerced '{}' to numeric ({} null after coercion)",
                col_name, nulls
            ));
            debug!("Coerced '{}' to numeric", col_name);
        }

        // our_price -> Float64 with nulls repaired to 0
        let prices = converters::coerce_numeric(df.column(PRICE_COLUMN)?.as_materialized_series())?;
        let repaired = prices.null_count();
        let prices = prices.fill_null(FillNullStrategy::Zero)?;
        df.replace(PRICE_COLUMN, prices)?;
        if repaired > 0 {
            cleaning_actions.push(format!(
                "Defaulted {} missing '{}' values to 0",
                repaired, PRICE_COLUMN
            ));
            debug!("Defaulted {} missing prices", repaired);
        } else {
            cleaning_actions.push(format!("No missing '{}' values found", PRICE_COLUMN));
        }

        // category -> capitalized text
        let categories =
            converters::capitalize_strings(df.column(CATEGORY_COLUMN)?.as_materialized_series())?;
        df.replace(CATEGORY_COLUMN, categories)?;
        cleaning_actions.push(format!("Capitalized '{}'", CATEGORY_COLUMN));

        Ok((df, cleaning_actions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame() -> DataFrame {
        df![
            "product_name" => ["Widget", "Gadget"],
            "category" => ["tools", "electronics"],
            "current_stock" => ["10", "bad"],
            "restock_threshold" => [Some("5"), None],
            "restock_date" => ["2024-01-01", "not-a-date"],
            "our_price" => [Some("9.99"), None],
        ]
        .unwrap()
    }

    #[test]
    fn test_clean_preserves_row_count() {
        let df = sample_frame();
        let rows = df.height();

        let (cleaned, _) = ProductCleaner.clean(df).unwrap();
        assert_eq!(cleaned.height(), rows);
    }

    #[test]
    fn test_clean_malformed_values_become_null() {
        let (cleaned, _) = ProductCleaner.clean(sample_frame()).unwrap();

        assert_eq!(cleaned.column("current_stock").unwrap().null_count(), 1);
        assert_eq!(cleaned.column("restock_threshold").unwrap().null_count(), 1);
        assert_eq!(cleaned.column("restock_date").unwrap().null_count(), 1);
    }

    #[test]
    fn test_clean_our_price_never_null() {
        let (cleaned, _) = ProductCleaner.clean(sample_frame()).unwrap();

        let prices = cleaned.column("our_price").unwrap();
        assert_eq!(prices.null_count(), 0);
        assert_eq!(prices.get(0).unwrap().try_extract::<f64>().unwrap(), 9.99);
        assert_eq!(prices.get(1).unwrap().try_extract::<f64>().unwrap(), 0.0);
    }

    #[test]
    fn test_clean_capitalizes_category() {
        let (cleaned, _) = ProductCleaner.clean(sample_frame()).unwrap();

        let categories = cleaned.column("category").unwrap();
        assert_eq!(categories.get(0).unwrap(), AnyValue::String("Tools"));
        assert_eq!(categories.get(1).unwrap(), AnyValue::String("Electronics"));
    }

    #[test]
    fn test_clean_is_idempotent() {
        let (once, _) = ProductCleaner.clean(sample_frame()).unwrap();
        let (twice, _) = ProductCleaner.clean(once.clone()).unwrap();

        assert!(once.equals_missing(&twice));
    }

    #[test]
    fn test_clean_missing_column_is_an_error() {
        let df = df!["product_name" => ["Widget"]].unwrap();
        assert!(ProductCleaner.clean(df).is_err());
    }

    #[test]
    fn test_clean_reports_actions() {
        let (_, actions) = ProductCleaner.clean(sample_frame()).unwrap();
        assert!(!actions.is_empty());
        assert!(actions.iter().any(|a| a.contains("restock_date")));
    }
}
