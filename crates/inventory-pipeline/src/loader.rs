//! CSV loading for product inventory files.

use crate::error::Result;
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::path::Path;
use tracing::{debug, warn};

/// Load a product inventory CSV into a DataFrame.
///
/// A path that does not resolve to a readable file yields an empty frame
/// rather than an error; the pipeline treats the empty table as its
/// early-exit signal. No schema validation happens here — missing or
/// misnamed columns surface downstream when a stage references them.
pub fn load_products(path: &Path) -> Result<DataFrame> {
    if !path.is_file() {
        warn!("Input file not found: {}", path.display());
        return Ok(DataFrame::empty());
    }

    let df = CsvReadOptions::default()
        .with_infer_schema_length(Some(100))
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    debug!(
        "Loaded {} rows x {} columns from {}",
        df.height(),
        df.width(),
        path.display()
    );

    Ok(df)
}
