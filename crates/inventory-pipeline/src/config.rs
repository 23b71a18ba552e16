//! Configuration types for the inventory pipeline.
//!
//! The original tool hard-coded its output locations; here they live in an
//! explicit configuration structure built with the builder pattern so tests
//! can redirect all file output.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default file name for the cleaned and enriched dataset.
pub const DEFAULT_CLEANED_FILE: &str = "cleaned_products.csv";

/// Default file name for the summary report.
pub const DEFAULT_REPORT_FILE: &str = "report.md";

/// Configuration for the inventory pipeline.
///
/// Use [`PipelineConfig::builder()`] to create a configuration with a
/// fluent API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Directory both output files are written into.
    /// Default: "output"
    pub output_dir: PathBuf,

    /// File name of the cleaned/enriched CSV inside `output_dir`.
    /// Default: "cleaned_products.csv"
    pub cleaned_file_name: String,

    /// File name of the markdown report inside `output_dir`.
    /// Default: "report.md"
    pub report_file_name: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            cleaned_file_name: DEFAULT_CLEANED_FILE.to_string(),
            report_file_name: DEFAULT_REPORT_FILE.to_string(),
        }
    }
}

impl PipelineConfig {
    /// Create a new configuration builder.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        for (field, value) in [
            ("cleaned_file_name", &self.cleaned_file_name),
            ("report_file_name", &self.report_file_name),
        ] {
            if value.is_empty() || value.contains(['/', '\\']) {
                return Err(ConfigValidationError::InvalidFileName {
                    field: field.to_string(),
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }

    /// Full path of the cleaned dataset file.
    pub fn cleaned_path(&self) -> PathBuf {
        self.output_dir.join(&self.cleaned_file_name)
    }

    /// Full path of the report file.
    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(&self.report_file_name)
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid file name for '{field}': '{value}' (must be non-empty, without path separators)")]
    InvalidFileName { field: String, value: String },
}

/// Builder for [`PipelineConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct PipelineConfigBuilder {
    output_dir: Option<PathBuf>,
    cleaned_file_name: Option<String>,
    report_file_name: Option<String>,
}

impl PipelineConfigBuilder {
    /// Set the directory both output files are written into.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Set the file name of the cleaned/enriched CSV.
    pub fn cleaned_file_name(mut self, name: impl Into<String>) -> Self {
        self.cleaned_file_name = Some(name.into());
        self
    }

    /// Set the file name of the markdown report.
    pub fn report_file_name(mut self, name: impl Into<String>) -> Self {
        self.report_file_name = Some(name.into());
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `PipelineConfig` or an error if validation fails.
    pub fn build(self) -> Result<PipelineConfig, ConfigValidationError> {
        let config = PipelineConfig {
            output_dir: self.output_dir.unwrap_or_else(|| PathBuf::from("output")),
            cleaned_file_name: self
                .cleaned_file_name
                .unwrap_or_else(|| DEFAULT_CLEANED_FILE.to_string()),
            report_file_name: self
                .report_file_name
                .unwrap_or_else(|| DEFAULT_REPORT_FILE.to_string()),
        };

        config.validate()?;
        Ok(config)
    }
}
