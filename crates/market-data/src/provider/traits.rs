//! Market data provider trait definitions.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{InfoBundle, Quote};

/// Trait for market data providers.
///
/// Implement this trait to add support for a new market data source, or to
/// stand in for one in tests.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use portfolio_export_market_data::{InfoBundle, MarketDataError, MarketDataProvider, Quote};
///
/// struct FixedProvider;
///
/// #[async_trait]
/// impl MarketDataProvider for FixedProvider {
///     fn id(&self) -> &'static str {
///         "FIXED"
///     }
///
///     async fn get_latest_close(&self, symbol: &str) -> Result<Quote, MarketDataError> {
///         Ok(Quote::new(symbol, chrono::Utc::now(), rust_decimal::Decimal::ONE, "FIXED"))
///     }
///
///     async fn get_info(&self, _symbol: &str) -> Result<InfoBundle, MarketDataError> {
///         Ok(InfoBundle::new())
///     }
/// }
/// ```
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider, e.g. "YAHOO".
    fn id(&self) -> &'static str;

    /// Fetch the most recent closing price from recent price history.
    async fn get_latest_close(&self, symbol: &str) -> Result<Quote, MarketDataError>;

    /// Fetch the supplementary fund info bundle.
    ///
    /// Every entry is optional; a symbol with no fund data yields an empty
    /// bundle rather than an error.
    async fn get_info(&self, symbol: &str) -> Result<InfoBundle, MarketDataError>;
}
