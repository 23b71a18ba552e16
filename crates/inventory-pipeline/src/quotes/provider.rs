//! Quote provider trait for abstracting market-data lookups.
//!
//! The pipeline depends on the quote service only through this narrow
//! contract: symbol in, latest close price (or absence) out. Implementing
//! the trait against a fixed table is enough to exercise the whole pipeline
//! without network access.

use anyhow::Result;

/// Trait for services that can resolve a product's latest market price.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so a provider can be shared across
/// pipeline instances.
///
/// # Error Handling
///
/// `Ok(None)` means the provider answered but had no usable quote for the
/// symbol (rate limit, unknown symbol, empty series). Transport-level
/// failures are `Err`. The enricher treats both the same way: the product's
/// market price becomes null and processing continues.
pub trait QuoteProvider: Send + Sync {
    /// Fetch the most recent market price for a symbol.
    fn latest_price(&self, symbol: &str) -> Result<Option<f64>>;

    /// Get the provider name for logging and debugging.
    fn name(&self) -> &str;
}
