//! Report generation for the enriched dataset.

mod generator;

pub use generator::{ReportGenerator, ReportSummary};
