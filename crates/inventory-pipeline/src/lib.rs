//! Product Inventory Pipeline Library
//!
//! A linear processing pipeline over product inventory tables built with
//! Rust and Polars.
//!
//! # Overview
//!
//! Each run flows a table of product records through five stages exactly
//! once:
//!
//! - **Load**: read a delimited inventory file; a missing file yields an
//!   empty table instead of an error
//! - **Clean**: parse dates, coerce numerics, default missing prices,
//!   capitalize categories (row-preserving and idempotent)
//! - **Enrich**: fetch the latest market price per distinct product from a
//!   quote provider; failed lookups become explicit nulls
//! - **Persist**: write the cleaned/enriched table back out as CSV
//! - **Report**: write a markdown summary with record counts and averages
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use inventory_pipeline::{loader, Pipeline, PipelineConfig};
//! use inventory_pipeline::quotes::AlphaVantageProvider;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! let df = loader::load_products(Path::new("products.csv"))?;
//!
//! let provider = Arc::new(AlphaVantageProvider::new(api_key)?);
//!
//! let result = Pipeline::builder()
//!     .config(PipelineConfig::builder().output_dir("output").build()?)
//!     .quote_provider(provider)
//!     .build()?
//!     .process(df)?;
//!
//! println!("Processed {} records", result.rows_processed);
//! ```
//!
//! # Quote Providers
//!
//! Market-data lookups go through the [`quotes::QuoteProvider`] trait, so
//! the pipeline's core logic is testable without network access. The
//! shipped implementation is [`quotes::AlphaVantageProvider`]; any type
//! mapping a symbol to an optional price can stand in for it.

pub mod cleaner;
pub mod config;
pub mod error;
pub mod loader;
pub mod persist;
pub mod pipeline;
pub mod quotes;
pub mod reporting;
pub mod utils;

// Re-exports for convenient access
pub use cleaner::ProductCleaner;
pub use config::{ConfigValidationError, PipelineConfig, PipelineConfigBuilder};
pub use error::{PipelineError, ResultExt};
pub use pipeline::{Pipeline, PipelineBuilder, PipelineResult};
pub use quotes::{EnrichmentStats, PriceEnricher, QuoteProvider};
pub use reporting::{ReportGenerator, ReportSummary};
