//! Markdown report generation for the enriched dataset.

use crate::error::Result;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Summary statistics computed over the enriched table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Total record count.
    pub total_products: usize,
    /// Arithmetic mean of `our_price` across all records.
    pub average_price: f64,
    /// Mean of `market_price` with nulls excluded. `None` when every value
    /// is null; rendered as NaN, never coerced to zero.
    pub average_market_price: Option<f64>,
}

/// Writes the human-readable summary report.
pub struct ReportGenerator {
    output_dir: PathBuf,
    file_name: String,
}

impl ReportGenerator {
    pub fn new(output_dir: PathBuf, file_name: impl Into<String>) -> Self {
        Self {
            output_dir,
            file_name: file_name.into(),
        }
    }

    /// Compute the summary statistics for the report header.
    pub fn build_summary(df: &DataFrame) -> Result<ReportSummary> {
        let average_price = df
            .column("our_price")?
            .f64()?
            .mean()
            .unwrap_or(f64::NAN);

        let average_market_price = df.column("market_price")?.f64()?.mean();

        Ok(ReportSummary {
            total_products: df.height(),
            average_price,
            average_market_price,
        })
    }

    /// Render the markdown document: title, summary block, then one line per
    /// record in table order. Null market prices render as `n/a`.
    pub fn render_markdown(df: &DataFrame, summary: &ReportSummary) -> Result<String> {
        let names = df.column("product_name")?.str()?;
        let our_prices = df.column("our_price")?.f64()?;
        let market_prices = df.column("market_price")?.f64()?;

        let mut doc = String::new();
        doc.push_str("# Product Report\n\n");
        doc.push_str("## Summary\n");
        doc.push_str(&format!("Total products: {}\n", summary.total_products));
        doc.push_str(&format!("Average price: ${:.2}\n", summary.average_price));
        match summary.average_market_price {
            Some(average) => {
                doc.push_str(&format!("Average market price: ${:.2}\n", average));
            }
            None => doc.push_str("Average market price: $NaN\n"),
        }
        doc.push_str("\n## Products\n");

        for idx in 0..df.height() {
            let name = names.get(idx).unwrap_or("unknown");
            let our_price = our_prices.get(idx).unwrap_or(0.0);
            let market_price = match market_prices.get(idx) {
                Some(price) => format!("${:.2}", price),
                None => "n/a".to_string(),
            };
            doc.push_str(&format!(
                "- {}: Our price ${:.2}, Market price {}\n",
                name, our_price, market_price
            ));
        }

        Ok(doc)
    }

    /// Write the report next to the cleaned dataset, creating the output
    /// directory if needed.
    pub fn write_report(&self, df: &DataFrame) -> Result<(PathBuf, ReportSummary)> {
        let summary = Self::build_summary(df)?;
        let doc = Self::render_markdown(df, &summary)?;

        fs::create_dir_all(&self.output_dir)?;
        let report_path = self.output_dir.join(&self.file_name);
        let mut file = File::create(&report_path)?;
        file.write_all(doc.as_bytes())?;

        info!("Report saved: {}", report_path.display());
        Ok((report_path, summary))
    }
}
