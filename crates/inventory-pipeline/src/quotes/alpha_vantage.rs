//! Alpha Vantage quote provider implementation.
//!
//! This module provides the [`AlphaVantageProvider`] which implements the
//! [`QuoteProvider`] trait against the Alpha Vantage intraday time-series
//! endpoint (<https://www.alphavantage.co/>).

use super::QuoteProvider;
use anyhow::{anyhow, Result};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Default Alpha Vantage API endpoint.
const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";

/// Query function for intraday time series.
const TIME_SERIES_FUNCTION: &str = "TIME_SERIES_INTRADAY";

/// Default sampling interval for intraday quotes.
const DEFAULT_INTERVAL: &str = "5min";

/// Default timeout for API requests in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Built-in access credential, used when no key is supplied at startup.
pub const DEFAULT_API_KEY: &str = "RISSY9JLIY5NC3FN";

/// Top-level quote response.
///
/// A successful payload carries a `Time Series ({interval})` member; rate
/// limits and bad symbols come back as 200s with a `Note` or
/// `Error Message` instead.
#[derive(Debug, Deserialize)]
struct QuoteResponse {
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(flatten)]
    sections: BTreeMap<String, serde_json::Value>,
}

/// One intraday bar; only the closing price is consumed.
#[derive(Debug, Deserialize)]
struct IntradayBar {
    #[serde(rename = "4. close")]
    close: String,
}

/// Configuration for the Alpha Vantage provider.
#[derive(Debug, Clone)]
pub struct AlphaVantageConfig {
    /// Base URL for the API (useful for pointing tests at a fake endpoint).
    pub base_url: String,
    /// Sampling interval for intraday quotes (e.g. "5min").
    pub interval: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for AlphaVantageConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            interval: DEFAULT_INTERVAL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl AlphaVantageConfig {
    /// Create a new configuration builder.
    pub fn builder() -> AlphaVantageConfigBuilder {
        AlphaVantageConfigBuilder::default()
    }
}

/// Builder for [`AlphaVantageConfig`].
#[derive(Default)]
pub struct AlphaVantageConfigBuilder {
    base_url: Option<String>,
    interval: Option<String>,
    timeout_secs: Option<u64>,
}

impl AlphaVantageConfigBuilder {
    /// Set a custom base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the sampling interval.
    pub fn interval(mut self, interval: impl Into<String>) -> Self {
        self.interval = Some(interval.into());
        self
    }

    /// Set the request timeout in seconds.
    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> AlphaVantageConfig {
        AlphaVantageConfig {
            base_url: self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            interval: self.interval.unwrap_or_else(|| DEFAULT_INTERVAL.to_string()),
            timeout_secs: self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Alpha Vantage quote provider.
///
/// # Example
///
/// ```rust,ignore
/// use inventory_pipeline::quotes::{AlphaVantageConfig, AlphaVantageProvider};
///
/// // Simple usage with defaults
/// let provider = AlphaVantageProvider::new("your-api-key")?;
///
/// // With custom configuration
/// let config = AlphaVantageConfig::builder()
///     .interval("15min")
///     .timeout_secs(10)
///     .build();
/// let provider = AlphaVantageProvider::with_config("your-api-key", config)?;
/// ```
pub struct AlphaVantageProvider {
    api_key: String,
    config: AlphaVantageConfig,
    client: Client,
}

impl AlphaVantageProvider {
    /// Create a new provider with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(api_key, AlphaVantageConfig::default())
    }

    /// Create a new provider with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_config(api_key: impl Into<String>, config: AlphaVantageConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            api_key: api_key.into(),
            config,
            client,
        })
    }

    fn call_api(&self, symbol: &str) -> Result<QuoteResponse> {
        let response = self
            .client
            .get(&self.config.base_url)
            .query(&[
                ("function", TIME_SERIES_FUNCTION),
                ("symbol", symbol),
                ("interval", self.config.interval.as_str()),
                ("apikey", self.api_key.as_str()),
            ])
            .send()?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "Quote API error {}: {}",
                response.status(),
                response.text()?
            ));
        }

        Ok(response.json()?)
    }

    /// Pull the chronologically most recent closing price out of a response.
    ///
    /// Timestamps are `YYYY-MM-DD HH:MM:SS`, so the greatest key of the
    /// ordered map is the most recent entry.
    fn extract_latest_close(&self, symbol: &str, body: &QuoteResponse) -> Option<f64> {
        let series_key = format!("Time Series ({})", self.config.interval);

        let Some(section) = body.sections.get(&series_key) else {
            let detail = body
                .note
                .as_deref()
                .or(body.error_message.as_deref())
                .unwrap_or("Unknown error");
            warn!(
                "'{}' not found in quote response for {}: {}",
                series_key, symbol, detail
            );
            return None;
        };

        let bars: BTreeMap<String, IntradayBar> = match serde_json::from_value(section.clone()) {
            Ok(bars) => bars,
            Err(e) => {
                warn!("Malformed time series payload for {}: {}", symbol, e);
                return None;
            }
        };

        let (timestamp, bar) = bars.iter().next_back()?;

        match bar.close.parse::<f64>() {
            Ok(price) => {
                debug!("{}: close {} at {}", symbol, price, timestamp);
                Some(price)
            }
            Err(_) => {
                warn!(
                    "Unparseable closing price '{}' for {} at {}",
                    bar.close, symbol, timestamp
                );
                None
            }
        }
    }
}

impl QuoteProvider for AlphaVantageProvider {
    fn latest_price(&self, symbol: &str) -> Result<Option<f64>> {
        let body = self.call_api(symbol)?;
        Ok(self.extract_latest_close(symbol, &body))
    }

    fn name(&self) -> &str {
        "Alpha Vantage"
    }
}

// ============================================================================
// Tests
// ============================================================================
