//! Market-price enrichment for product tables.

use crate::error::{PipelineError, Result};
use crate::quotes::QuoteProvider;
use polars::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

const PRODUCT_COLUMN: &str = "product_name";
const MARKET_PRICE_COLUMN: &str = "market_price";

/// Outcome counts for an enrichment pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichmentStats {
    /// Distinct product names looked up.
    pub products: usize,
    /// Lookups that produced a price.
    pub resolved: usize,
    /// Lookups that failed or returned no data.
    pub unresolved: usize,
}

/// Attaches the latest market price to every product record.
///
/// Lookups are keyed by product identity, not by row: each distinct
/// `product_name` is resolved once, sequentially, and every row sharing
/// that name receives the same value.
pub struct PriceEnricher {
    provider: Arc<dyn QuoteProvider>,
}

impl PriceEnricher {
    pub fn new(provider: Arc<dyn QuoteProvider>) -> Self {
        Self { provider }
    }

    /// Look up one quote per distinct product name and attach the results
    /// as the `market_price` column.
    ///
    /// A lookup that errors or comes back empty nulls only that product's
    /// price; other products and the row count are unaffected.
    pub fn enrich(&self, df: DataFrame) -> Result<(DataFrame, EnrichmentStats)> {
        let mut df = df;
        let name_series = df
            .column(PRODUCT_COLUMN)
            .map_err(|_| PipelineError::ColumnNotFound(PRODUCT_COLUMN.to_string()))?
            .as_materialized_series()
            .clone();
        let names = name_series.str()?;

        info!(
            "Fetching market prices via {} for {} records...",
            self.provider.name(),
            df.height()
        );

        let mut prices: HashMap<String, Option<f64>> = HashMap::new();
        let mut stats = EnrichmentStats::default();

        for opt_name in names.into_iter() {
            let Some(name) = opt_name else { continue };
            if prices.contains_key(name) {
                continue;
            }

            let price = match self.provider.latest_price(name) {
                Ok(price) => price,
                Err(e) => {
                    warn!("Quote lookup failed for {}: {}", name, e);
                    None
                }
            };

            stats.products += 1;
            if price.is_some() {
                stats.resolved += 1;
            } else {
                stats.unresolved += 1;
            }
            prices.insert(name.to_string(), price);
        }

        let market: Vec<Option<f64>> = names
            .into_iter()
            .map(|opt_name| opt_name.and_then(|name| prices.get(name).copied().flatten()))
            .collect();

        df.with_column(Series::new(MARKET_PRICE_COLUMN.into(), market))?;

        info!(
            "Market prices: {} products, {} resolved, {} unresolved",
            stats.products, stats.resolved, stats.unresolved
        );

        Ok((df, stats))
    }

    /// Attach an all-null `market_price` column without performing lookups.
    ///
    /// Used when no quote provider is configured; the dataset keeps its
    /// full shape and every price is explicitly absent.
    pub fn attach_empty(df: DataFrame) -> Result<(DataFrame, EnrichmentStats)> {
        let mut df = df;
        let market: Vec<Option<f64>> = vec![None; df.height()];
        df.with_column(Series::new(MARKET_PRICE_COLUMN.into(), market))?;
        Ok((df, EnrichmentStats::default()))
    }
}
