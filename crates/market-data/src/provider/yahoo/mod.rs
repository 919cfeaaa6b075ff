//! Yahoo Finance market data provider.
//!
//! Two call sequences per symbol:
//! - recent daily history through the `yahoo_finance_api` connector, whose
//!   last close becomes the holding's quote
//! - the quoteSummary endpoint (cookie + crumb authenticated) for the fund
//!   info bundle: category, ratings, expense ratio, yield, trailing returns

mod models;

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use reqwest::{header, StatusCode};
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use urlencoding::encode;
use yahoo_finance_api as yahoo;

use crate::errors::MarketDataError;
use crate::models::{InfoBundle, Quote};
use crate::provider::MarketDataProvider;

pub use models::{flatten_modules, normalize_value, INFO_MODULES};
use models::YahooQuoteSummaryResponse;

const PROVIDER_ID: &str = "YAHOO";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
const QUOTE_SUMMARY_URL: &str = "https://query1.finance.yahoo.com/v10/finance/quoteSummary";

/// Daily bars over the last month; only the most recent close is used.
const HISTORY_INTERVAL: &str = "1d";
const HISTORY_RANGE: &str = "1mo";

/// Default timeout for every Yahoo request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Cached Yahoo authentication data
#[derive(Debug, Clone)]
struct CrumbData {
    cookie: String,
    crumb: String,
}

/// Yahoo Finance market data provider.
pub struct YahooProvider {
    connector: yahoo::YahooConnector,
    client: reqwest::Client,
    crumb: RwLock<Option<CrumbData>>,
}

impl YahooProvider {
    /// Create a provider with the default request timeout.
    pub fn new() -> Result<Self, MarketDataError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a provider whose history and quoteSummary requests give up
    /// after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, MarketDataError> {
        let connector = yahoo::YahooConnector::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                MarketDataError::provider(
                    PROVIDER_ID,
                    format!("Failed to initialize Yahoo connector: {}", e),
                )
            })?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            connector,
            client,
            crumb: RwLock::new(None),
        })
    }

    // ========================================================================
    // Crumb/Cookie Authentication
    // ========================================================================

    async fn ensure_crumb(&self) -> Result<CrumbData, MarketDataError> {
        if let Some(crumb) = self.crumb.read().await.as_ref() {
            return Ok(crumb.clone());
        }
        self.fetch_crumb().await
    }

    async fn fetch_crumb(&self) -> Result<CrumbData, MarketDataError> {
        // Step 1: Get cookie from fc.yahoo.com
        let response = self
            .client
            .get("https://fc.yahoo.com")
            .send()
            .await
            .map_err(|e| {
                MarketDataError::provider(PROVIDER_ID, format!("Failed to get cookie: {}", e))
            })?;

        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.split_once(';').map(|(v, _)| v.to_string()))
            .ok_or_else(|| {
                MarketDataError::provider(PROVIDER_ID, "Failed to parse Yahoo cookie")
            })?;

        // Step 2: Get crumb using cookie
        let crumb = self
            .client
            .get("https://query1.finance.yahoo.com/v1/test/getcrumb")
            .header(header::COOKIE, &cookie)
            .send()
            .await
            .map_err(|e| {
                MarketDataError::provider(PROVIDER_ID, format!("Failed to get crumb: {}", e))
            })?
            .text()
            .await
            .map_err(|e| {
                MarketDataError::provider(PROVIDER_ID, format!("Failed to read crumb: {}", e))
            })?;

        let crumb_data = CrumbData { cookie, crumb };
        *self.crumb.write().await = Some(crumb_data.clone());
        Ok(crumb_data)
    }

    async fn clear_crumb(&self) {
        *self.crumb.write().await = None;
    }

    // ========================================================================
    // Conversion
    // ========================================================================

    fn map_connector_error(symbol: &str, error: yahoo::YahooError) -> MarketDataError {
        if matches!(error, yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult) {
            MarketDataError::SymbolNotFound(symbol.to_string())
        } else {
            MarketDataError::provider(PROVIDER_ID, error.to_string())
        }
    }

    fn to_quote(symbol: &str, timestamp: i64, close: f64) -> Result<Quote, MarketDataError> {
        let timestamp: DateTime<Utc> = Utc.timestamp_opt(timestamp, 0).single().ok_or_else(|| {
            MarketDataError::ValidationFailed {
                message: format!("Invalid timestamp: {}", timestamp),
            }
        })?;

        if !close.is_finite() {
            return Err(MarketDataError::ValidationFailed {
                message: format!("Close price for {} is not a number: {}", symbol, close),
            });
        }
        // Display gives the shortest round-trip form, e.g. 57.31 rather than 57.3099999...
        let close = Decimal::from_str(&close.to_string()).map_err(|_| {
            MarketDataError::ValidationFailed {
                message: format!("Failed to convert close price {} to Decimal", close),
            }
        })?;

        Ok(Quote::new(symbol, timestamp, close, PROVIDER_ID))
    }
}

// ============================================================================
// MarketDataProvider Implementation
// ============================================================================

#[async_trait]
impl MarketDataProvider for YahooProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_latest_close(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        debug!("Fetching recent history for {} from Yahoo", symbol);

        let response = self
            .connector
            .get_quote_range(symbol, HISTORY_INTERVAL, HISTORY_RANGE)
            .await
            .map_err(|e| Self::map_connector_error(symbol, e))?;

        let last = response.last_quote().map_err(|e| {
            warn!("No history returned for {}: {}", symbol, e);
            MarketDataError::NoDataForRange
        })?;

        Self::to_quote(symbol, last.timestamp, last.close)
    }

    async fn get_info(&self, symbol: &str) -> Result<InfoBundle, MarketDataError> {
        debug!("Fetching fund info for {} from Yahoo", symbol);

        let crumb = self.ensure_crumb().await?;
        let url = format!(
            "{}/{}?modules={}&crumb={}",
            QUOTE_SUMMARY_URL,
            encode(symbol),
            INFO_MODULES.join(","),
            encode(&crumb.crumb)
        );

        let response = self
            .client
            .get(&url)
            .header(header::COOKIE, &crumb.cookie)
            .send()
            .await
            .map_err(|e| {
                MarketDataError::provider(PROVIDER_ID, format!("Info request failed: {}", e))
            })?;

        match response.status() {
            StatusCode::UNAUTHORIZED => {
                self.clear_crumb().await;
                return Err(MarketDataError::provider(
                    PROVIDER_ID,
                    "Yahoo authentication expired",
                ));
            }
            StatusCode::NOT_FOUND => {
                debug!("No quoteSummary data for {}", symbol);
                return Ok(InfoBundle::new());
            }
            status if !status.is_success() => {
                return Err(MarketDataError::provider(
                    PROVIDER_ID,
                    format!("quoteSummary returned HTTP {}", status),
                ));
            }
            _ => {}
        }

        let data: YahooQuoteSummaryResponse = response.json().await.map_err(|e| {
            MarketDataError::provider(PROVIDER_ID, format!("Failed to parse info response: {}", e))
        })?;

        match data.quote_summary.into_first_result(symbol)? {
            Some(result) => Ok(flatten_modules(&result)),
            None => {
                debug!("Empty quoteSummary result for {}", symbol);
                Ok(InfoBundle::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_to_quote() {
        let quote = YahooProvider::to_quote("VTSAX", 1_700_000_000, 120.0).unwrap();
        assert_eq!(quote.symbol, "VTSAX");
        assert_eq!(quote.close, dec!(120));
        assert_eq!(quote.source, "YAHOO");
        assert_eq!(quote.timestamp.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_to_quote_keeps_short_decimal() {
        let quote = YahooProvider::to_quote("VXUS", 1_700_000_000, 57.31).unwrap();
        assert_eq!(quote.close, dec!(57.31));
    }

    #[test]
    fn test_to_quote_rejects_nan() {
        let err = YahooProvider::to_quote("VTSAX", 1_700_000_000, f64::NAN).unwrap_err();
        assert!(matches!(err, MarketDataError::ValidationFailed { .. }));
    }

    #[test]
    fn test_connector_error_mapping() {
        let err = YahooProvider::map_connector_error("NOPE", yahoo::YahooError::NoQuotes);
        assert!(matches!(err, MarketDataError::SymbolNotFound(ref s) if s == "NOPE"));

        let err = YahooProvider::map_connector_error("NOPE", yahoo::YahooError::NoResult);
        assert!(matches!(err, MarketDataError::SymbolNotFound(_)));
    }

    #[test]
    fn test_with_timeout_builds_provider() {
        let provider = YahooProvider::with_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(provider.id(), "YAHOO");
    }

    #[test]
    fn test_info_modules_cover_fund_fields() {
        assert!(INFO_MODULES.contains(&"fundProfile"));
        assert!(INFO_MODULES.contains(&"fundPerformance"));
        assert!(INFO_MODULES.contains(&"defaultKeyStatistics"));
    }
}
