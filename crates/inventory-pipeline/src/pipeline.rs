//! Pipeline orchestration.
//!
//! Data flows strictly left to right through the stages exactly once:
//! clean -> enrich -> persist -> report. There is no branching, retry loop,
//! or fan-out; the only deviation is the early exit on an empty input table.

use crate::cleaner::ProductCleaner;
use crate::config::{ConfigValidationError, PipelineConfig};
use crate::error::{PipelineError, Result};
use crate::persist;
use crate::quotes::{EnrichmentStats, PriceEnricher, QuoteProvider};
use crate::reporting::{ReportGenerator, ReportSummary};
use polars::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Result of one pipeline run.
#[derive(Debug)]
pub struct PipelineResult {
    /// Whether the run completed.
    pub success: bool,
    /// Rows flowing through the pipeline (constant across clean and enrich).
    pub rows_processed: usize,
    /// Quote lookup outcome counts.
    pub enrichment: EnrichmentStats,
    /// Where the cleaned dataset was written; `None` on the empty-input path.
    pub cleaned_path: Option<PathBuf>,
    /// Where the report was written; `None` on the empty-input path.
    pub report_path: Option<PathBuf>,
    /// Human-readable log of cleaning actions.
    pub cleaning_actions: Vec<String>,
    /// Summary statistics from the report stage.
    pub summary: Option<ReportSummary>,
    /// Wall-clock duration of the run.
    pub duration_ms: u64,
}

/// The inventory processing pipeline.
///
/// Use [`Pipeline::builder()`] to configure output locations and the quote
/// provider.
///
/// # Example
///
/// ```rust,ignore
/// use inventory_pipeline::{Pipeline, PipelineConfig};
/// use inventory_pipeline::quotes::AlphaVantageProvider;
/// use std::sync::Arc;
///
/// let provider = Arc::new(AlphaVantageProvider::new(api_key)?);
///
/// let result = Pipeline::builder()
///     .config(PipelineConfig::builder().output_dir("output").build()?)
///     .quote_provider(provider)
///     .build()?
///     .process(dataframe)?;
/// ```
pub struct Pipeline {
    config: PipelineConfig,
    cleaner: ProductCleaner,
    enricher: Option<PriceEnricher>,
    reporter: ReportGenerator,
}

// Pipeline runs are handed off to worker threads by some hosts.
static_assertions::assert_impl_all!(Pipeline: Send);

impl Pipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// Run the table through clean -> enrich -> persist -> report.
    ///
    /// An empty input table short-circuits: the run is reported successful
    /// with zero rows and neither output file is written.
    pub fn process(&self, df: DataFrame) -> Result<PipelineResult> {
        let start_time = Instant::now();

        if df.height() == 0 {
            info!("No data to process");
            return Ok(PipelineResult {
                success: true,
                rows_processed: 0,
                enrichment: EnrichmentStats::default(),
                cleaned_path: None,
                report_path: None,
                cleaning_actions: Vec::new(),
                summary: None,
                duration_ms: start_time.elapsed().as_millis() as u64,
            });
        }

        info!("Step 1: Cleaning data...");
        let (df, cleaning_actions) = self
            .cleaner
            .clean(df)
            .map_err(|e| PipelineError::CleaningFailed(e.to_string()))?;

        info!("Step 2: Fetching market prices...");
        let (mut df, enrichment) = match &self.enricher {
            Some(enricher) => enricher.enrich(df)?,
            None => {
                warn!("No quote provider configured; market prices left empty");
                PriceEnricher::attach_empty(df)?
            }
        };

        info!("Step 3: Saving cleaned dataset...");
        std::fs::create_dir_all(&self.config.output_dir)?;
        let cleaned_path = persist::write_products(&mut df, &self.config.cleaned_path())?;

        info!("Step 4: Generating report...");
        let (report_path, summary) = self.reporter.write_report(&df)?;

        let result = PipelineResult {
            success: true,
            rows_processed: df.height(),
            enrichment,
            cleaned_path: Some(cleaned_path),
            report_path: Some(report_path),
            cleaning_actions,
            summary: Some(summary),
            duration_ms: start_time.elapsed().as_millis() as u64,
        };

        info!(
            "Pipeline completed in {}ms ({} rows)",
            result.duration_ms, result.rows_processed
        );

        Ok(result)
    }
}

/// Builder for creating a [`Pipeline`] instance.
#[derive(Default)]
pub struct PipelineBuilder {
    config: Option<PipelineConfig>,
    quote_provider: Option<Arc<dyn QuoteProvider>>,
}

impl PipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the quote provider used for market-price lookups.
    ///
    /// Use `Arc` so the provider can be shared and reused across multiple
    /// pipeline runs. Without a provider the enrichment stage attaches
    /// explicitly absent prices.
    pub fn quote_provider(mut self, provider: Arc<dyn QuoteProvider>) -> Self {
        self.quote_provider = Some(provider);
        self
    }

    /// Build the pipeline.
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> std::result::Result<Pipeline, ConfigValidationError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let reporter = ReportGenerator::new(
            config.output_dir.clone(),
            config.report_file_name.clone(),
        );

        Ok(Pipeline {
            cleaner: ProductCleaner,
            enricher: self.quote_provider.map(PriceEnricher::new),
            reporter,
            config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_builder_default() {
        let pipeline = Pipeline::builder().build().unwrap();
        assert!(pipeline.enricher.is_none());
        assert_eq!(pipeline.config.cleaned_file_name, "cleaned_products.csv");
    }

    #[test]
    fn test_pipeline_builder_invalid_config() {
        let result = Pipeline::builder()
            .config(PipelineConfig {
                cleaned_file_name: String::new(),
                ..PipelineConfig::default()
            })
            .build();

        assert!(result.is_err());
    }

    #[test]
    fn test_empty_table_short_circuits_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().join("output");

        let pipeline = Pipeline::builder()
            .config(
                PipelineConfig::builder()
                    .output_dir(&output_dir)
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();

        let result = pipeline.process(DataFrame::empty()).unwrap();

        assert!(result.success);
        assert_eq!(result.rows_processed, 0);
        assert!(result.cleaned_path.is_none());
        assert!(result.report_path.is_none());
        assert!(!output_dir.exists(), "no output directory should be created");
    }

    #[test]
    fn test_process_without_provider_nulls_market_prices() {
        let dir = tempfile::tempdir().unwrap();

        let pipeline = Pipeline::builder()
            .config(
                PipelineConfig::builder()
                    .output_dir(dir.path().join("output"))
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();

        let df = df![
            "product_name" => ["Widget"],
            "category" => ["tools"],
            "current_stock" => ["10"],
            "restock_threshold" => ["5"],
            "restock_date" => ["2024-01-01"],
            "our_price" => ["9.99"],
        ]
        .unwrap();

        let result = pipeline.process(df).unwrap();

        assert_eq!(result.rows_processed, 1);
        assert_eq!(result.enrichment, EnrichmentStats::default());
        assert!(result.cleaned_path.unwrap().exists());
        assert!(result.report_path.unwrap().exists());
        let summary = result.summary.unwrap();
        assert_eq!(summary.average_market_price, None);
    }
}
