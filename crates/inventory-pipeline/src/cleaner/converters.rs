//! Per-column coercion functions for product records.

use crate::utils::{capitalize_word, is_numeric_dtype, parse_numeric_string};
use anyhow::Result;
use chrono::NaiveDate;
use polars::prelude::*;

/// Calendar formats accepted for restock dates.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Coerce a series to Float64 values.
///
/// String values that do not parse as numbers become null; numeric input is
/// cast with nulls preserved, so applying this twice is a no-op.
pub(crate) fn coerce_numeric(series: &Series) -> Result<Series> {
    if is_numeric_dtype(series.dtype()) {
        return Ok(series.cast(&DataType::Float64)?);
    }

    match series.dtype() {
        DataType::String => {
            let str_series = series.str()?;
            let mut result_vec: Vec<Option<f64>> = Vec::with_capacity(str_series.len());

            for opt_val in str_series.into_iter() {
                result_vec.push(opt_val.and_then(parse_numeric_string));
            }

            Ok(Series::new(series.name().clone(), result_vec))
        }
        _ => Ok(series.cast(&DataType::Float64)?),
    }
}

/// Coerce a series to the Date dtype.
///
/// Strings are parsed against the accepted calendar formats; anything
/// unparseable becomes null. Date input passes through untouched.
pub(crate) fn coerce_date(series: &Series) -> Result<Series> {
    match series.dtype() {
        DataType::Date => Ok(series.clone()),
        DataType::String => {
            let str_series = series.str()?;
            let mut days: Vec<Option<i32>> = Vec::with_capacity(str_series.len());

            for opt_val in str_series.into_iter() {
                days.push(opt_val.and_then(parse_calendar_date));
            }

            let day_series = Series::new(series.name().clone(), days);
            Ok(day_series.cast(&DataType::Date)?)
        }
        _ => Ok(series.cast(&DataType::Date)?),
    }
}

/// Parse a date string into days since the Unix epoch.
fn parse_calendar_date(raw: &str) -> Option<i32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .map(|date| date.signed_duration_since(NaiveDate::default()).num_days() as i32)
}

/// Capitalize every value of a string series.
///
/// Nulls are preserved; non-string input is returned unchanged.
pub(crate) fn capitalize_strings(series: &Series) -> Result<Series> {
    if series.dtype() != &DataType::String {
        return Ok(series.clone());
    }

    let str_series = series.str()?;
    let mut result_vec: Vec<Option<String>> = Vec::with_capacity(str_series.len());

    for opt_val in str_series.into_iter() {
        result_vec.push(opt_val.map(capitalize_word));
    }

    Ok(Series::new(series.name().clone(), result_vec))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_null_at(series: &Series, idx: usize) -> bool {
        matches!(series.get(idx).unwrap(), AnyValue::Null)
    }

    // ========================================================================
    // coerce_numeric() tests
    // ========================================================================

    #[test]
    fn test_coerce_numeric_basic() {
        let series = Series::new("current_stock".into(), &["10", "5", "3"]);
        let result = coerce_numeric(&series).unwrap();

        assert_eq!(result.dtype(), &DataType::Float64);
        assert_eq!(result.get(0).unwrap().try_extract::<f64>().unwrap(), 10.0);
        assert_eq!(result.get(2).unwrap().try_extract::<f64>().unwrap(), 3.0);
    }

    #[test]
    fn test_coerce_numeric_invalid_becomes_null() {
        let series = Series::new("current_stock".into(), &["10", "bad", ""]);
        let result = coerce_numeric(&series).unwrap();

        assert_eq!(result.get(0).unwrap().try_extract::<f64>().unwrap(), 10.0);
        assert!(is_null_at(&result, 1));
        assert!(is_null_at(&result, 2));
    }

    #[test]
    fn test_coerce_numeric_preserves_nulls() {
        let series = Series::new("restock_threshold".into(), &[Some("5"), None]);
        let result = coerce_numeric(&series).unwrap();

        assert_eq!(result.get(0).unwrap().try_extract::<f64>().unwrap(), 5.0);
        assert!(is_null_at(&result, 1));
    }

    #[test]
    fn test_coerce_numeric_already_numeric_is_noop() {
        let series = Series::new("restock_threshold".into(), &[Some(5i64), None]);
        let once = coerce_numeric(&series).unwrap();
        let twice = coerce_numeric(&once).unwrap();

        assert_eq!(once.dtype(), &DataType::Float64);
        assert!(once.equals_missing(&twice));
    }

    // ========================================================================
    // coerce_date() tests
    // ========================================================================

    #[test]
    fn test_coerce_date_iso_format() {
        let series = Series::new("restock_date".into(), &["2024-01-01"]);
        let result = coerce_date(&series).unwrap();

        assert_eq!(result.dtype(), &DataType::Date);
        // 2024-01-01 is 19723 days after the Unix epoch
        assert!(matches!(result.get(0).unwrap(), AnyValue::Date(19723)));
    }

    #[test]
    fn test_coerce_date_alternate_formats() {
        let series = Series::new("restock_date".into(), &["2024/01/01", "01/01/2024"]);
        let result = coerce_date(&series).unwrap();

        assert_eq!(result.dtype(), &DataType::Date);
        assert_eq!(result.null_count(), 0);
    }

    #[test]
    fn test_coerce_date_invalid_becomes_null() {
        let series = Series::new("restock_date".into(), &["not-a-date", "2024-13-45", ""]);
        let result = coerce_date(&series).unwrap();

        assert_eq!(result.dtype(), &DataType::Date);
        assert_eq!(result.null_count(), 3);
    }

    #[test]
    fn test_coerce_date_idempotent() {
        let series = Series::new("restock_date".into(), &[Some("2024-01-01"), None]);
        let once = coerce_date(&series).unwrap();
        let twice = coerce_date(&once).unwrap();

        assert!(once.equals_missing(&twice));
    }

    // ========================================================================
    // capitalize_strings() tests
    // ========================================================================

    #[test]
    fn test_capitalize_strings_mixed_case() {
        let series = Series::new("category".into(), &["electronics", "ELECTRONICS", "Tools"]);
        let result = capitalize_strings(&series).unwrap();

        let expected = Series::new("category".into(), &["Electronics", "Electronics", "Tools"]);
        assert!(result.equals(&expected));
    }

    #[test]
    fn test_capitalize_strings_preserves_nulls() {
        let series = Series::new("category".into(), &[Some("tools"), None]);
        let result = capitalize_strings(&series).unwrap();

        assert_eq!(result.get(0).unwrap(), AnyValue::String("Tools"));
        assert!(is_null_at(&result, 1));
    }

    #[test]
    fn test_capitalize_strings_idempotent() {
        let series = Series::new("category".into(), &["groceries", "HOME goods"]);
        let once = capitalize_strings(&series).unwrap();
        let twice = capitalize_strings(&once).unwrap();

        assert!(once.equals(&twice));
    }
}
