//! CSV persistence for the cleaned and enriched dataset.

use crate::error::Result;
use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::info;

/// Write the table to a CSV file at `path`, header row included,
/// overwriting any existing file.
///
/// No atomic rename is performed; an interrupted write can leave a
/// truncated file behind.
pub fn write_products(df: &mut DataFrame, path: &Path) -> Result<PathBuf> {
    let mut file = File::create(path)?;

    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(b',')
        .with_quote_char(b'"')
        .finish(df)?;

    info!("Dataset saved: {}", path.display());
    Ok(path.to_path_buf())
}
