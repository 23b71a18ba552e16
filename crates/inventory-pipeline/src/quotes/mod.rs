//! Market-data lookup and price enrichment.
//!
//! [`QuoteProvider`] is the narrow request/response contract the pipeline
//! depends on; [`AlphaVantageProvider`] is the production implementation and
//! [`PriceEnricher`] drives one sequential lookup per distinct product.

mod alpha_vantage;
mod enricher;
mod provider;

pub use alpha_vantage::{
    AlphaVantageConfig, AlphaVantageConfigBuilder, AlphaVantageProvider, DEFAULT_API_KEY,
};
pub use enricher::{EnrichmentStats, PriceEnricher};
pub use provider::QuoteProvider;
