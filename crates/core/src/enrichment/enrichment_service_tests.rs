//! Tests for MarketEnricher against a scripted provider.
//!
//! Contract points:
//! 1. The cash pseudo-holding is never looked up and is priced at 1
//! 2. Present bundle entries are copied, absent ones leave defaults
//! 3. Abort policy stops on the first failure, skip policy reports and continues
//! 4. A failed symbol is left exactly as it was
//! 5. Enrichment is idempotent for identical upstream data

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;

use portfolio_export_market_data::{InfoBundle, MarketDataError, MarketDataProvider, Quote};

use super::{EnrichmentSummary, FailurePolicy, MarketEnricher};
use crate::errors::{EnrichmentError, Error};
use crate::holdings::{HoldingRecord, Holdings};
use crate::ratings::star_string;

// =========================================================================
// Mock provider
// =========================================================================

#[derive(Default)]
struct MockProvider {
    closes: HashMap<String, Decimal>,
    infos: HashMap<String, InfoBundle>,
    unreachable: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl MockProvider {
    fn new() -> Self {
        Self::default()
    }

    fn with_fund(mut self, symbol: &str, close: Decimal, info: serde_json::Value) -> Self {
        self.closes.insert(symbol.to_string(), close);
        self.infos
            .insert(symbol.to_string(), serde_json::from_value(info).unwrap());
        self
    }

    fn with_unreachable(mut self, symbol: &str) -> Self {
        self.unreachable.insert(symbol.to_string());
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MarketDataProvider for MockProvider {
    fn id(&self) -> &'static str {
        "MOCK"
    }

    async fn get_latest_close(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        self.calls.lock().unwrap().push(format!("close:{symbol}"));
        if self.unreachable.contains(symbol) {
            return Err(MarketDataError::provider("MOCK", "connection refused"));
        }
        self.closes
            .get(symbol)
            .map(|close| Quote::new(symbol, Utc::now(), *close, "MOCK"))
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))
    }

    async fn get_info(&self, symbol: &str) -> Result<InfoBundle, MarketDataError> {
        self.calls.lock().unwrap().push(format!("info:{symbol}"));
        Ok(self.infos.get(symbol).cloned().unwrap_or_default())
    }
}

fn portfolio() -> Holdings {
    vec![
        HoldingRecord::new("Vanguard Total Stock", "VTSAX", dec!(10.5)),
        HoldingRecord::new("Cash", "CASH", dec!(500)),
        HoldingRecord::new("Vanguard Total Intl Stock", "VTIAX", dec!(20)),
    ]
    .into_iter()
    .collect()
}

fn full_provider() -> MockProvider {
    MockProvider::new()
        .with_fund(
            "VTSAX",
            dec!(120.00),
            json!({
                "categoryName": "Large Blend",
                "beta3Year": 1.02,
                "annualReportExpenseRatio": 0.0004,
                "morningStarOverallRating": 4,
                "morningStarRiskRating": 3,
                "yield": 0.015,
                "trailingReturns": {"oneYear": 0.21, "threeYear": 0.08, "fiveYear": 0.11}
            }),
        )
        .with_fund("VTIAX", dec!(33.10), json!({"categoryName": "Foreign Large Blend"}))
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn test_cash_is_never_looked_up() {
    let provider = Arc::new(full_provider());
    let enricher = MarketEnricher::new(provider.clone());
    let mut holdings = portfolio();

    enricher.enrich(&mut holdings).await.unwrap();

    let cash = holdings.get("CASH").unwrap();
    assert_eq!(cash.quote, Decimal::ONE);
    assert_eq!(cash.fund_type, "CASH");
    assert!(provider.calls().iter().all(|c| !c.ends_with(":CASH")));
}

#[tokio::test]
async fn test_calls_are_sequential_in_collection_order() {
    let provider = Arc::new(full_provider());
    let enricher = MarketEnricher::new(provider.clone());
    let mut holdings = portfolio();

    let summary = enricher.enrich(&mut holdings).await.unwrap();

    assert_eq!(
        provider.calls(),
        vec!["close:VTSAX", "info:VTSAX", "close:VTIAX", "info:VTIAX"]
    );
    assert_eq!(summary.enriched, vec!["VTSAX", "CASH", "VTIAX"]);
    assert!(summary.skipped.is_empty());
}

#[tokio::test]
async fn test_fields_are_merged() {
    let enricher = MarketEnricher::new(Arc::new(full_provider()));
    let mut holdings = portfolio();

    enricher.enrich(&mut holdings).await.unwrap();

    let vtsax = holdings.get("VTSAX").unwrap();
    assert_eq!(vtsax.quote, dec!(120.00));
    assert_eq!(vtsax.fund_type, "Large Blend");
    assert_eq!(vtsax.beta_5y, dec!(1.02));
    assert_eq!(vtsax.expense_ratio, dec!(0.0004));
    assert_eq!(vtsax.morningstar_rating, Some(4));
    assert_eq!(vtsax.morningstar_risk_rating, Some(3));
    assert_eq!(vtsax.yield_12m, dec!(0.015));
    assert_eq!(vtsax.return_5y, dec!(0.11));
    assert_eq!(star_string(vtsax.morningstar_rating), "★★★★");
    assert_eq!(vtsax.balance(), Some(dec!(1260.00)));
    assert_eq!(vtsax.estimated_annual_income(), Some(dec!(18.90)));

    // Only the category is known for VTIAX
    let vtiax = holdings.get("VTIAX").unwrap();
    assert_eq!(vtiax.quote, dec!(33.10));
    assert_eq!(vtiax.fund_type, "Foreign Large Blend");
    assert_eq!(vtiax.yield_12m, Decimal::ZERO);
    assert!(vtiax.morningstar_rating.is_none());
}

#[tokio::test]
async fn test_progress_reports_each_processed_holding() {
    let enricher = MarketEnricher::new(Arc::new(full_provider()));
    let mut holdings = portfolio();
    let mut lines = Vec::new();

    enricher
        .enrich_with_progress(&mut holdings, |record| {
            lines.push(format!("{} {}", record.symbol, record.quote))
        })
        .await
        .unwrap();

    assert_eq!(lines, vec!["VTSAX 120.00", "CASH 1", "VTIAX 33.10"]);
}

#[tokio::test]
async fn test_enrichment_is_idempotent() {
    let enricher = MarketEnricher::new(Arc::new(full_provider()));
    let mut holdings = portfolio();

    enricher.enrich(&mut holdings).await.unwrap();
    let first = holdings.clone();
    enricher.enrich(&mut holdings).await.unwrap();

    assert_eq!(holdings, first);
}

#[tokio::test]
async fn test_abort_policy_propagates_first_failure() {
    let provider = Arc::new(full_provider().with_unreachable("VTSAX"));
    let enricher = MarketEnricher::new(provider.clone());
    let mut holdings = portfolio();

    let err = enricher.enrich(&mut holdings).await.unwrap_err();

    match err {
        Error::Enrichment { symbol, source } => {
            assert_eq!(symbol, "VTSAX");
            assert!(matches!(
                source,
                EnrichmentError::MarketData(MarketDataError::ProviderError { .. })
            ));
        }
        other => panic!("unexpected error: {other}"),
    }
    // Nothing after the failing symbol was attempted
    assert_eq!(provider.calls(), vec!["close:VTSAX"]);
}

#[tokio::test]
async fn test_unknown_symbol_is_an_enrichment_error() {
    let enricher = MarketEnricher::new(Arc::new(MockProvider::new()));
    let mut holdings: Holdings = vec![HoldingRecord::new("Delisted Fund", "GONE", dec!(3))]
        .into_iter()
        .collect();

    let err = enricher.enrich(&mut holdings).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Enrichment failed for GONE: Symbol not found: GONE"
    );
}

#[tokio::test]
async fn test_skip_policy_reports_and_continues() {
    let enricher = MarketEnricher::new(Arc::new(full_provider().with_unreachable("VTSAX")))
        .with_failure_policy(FailurePolicy::Skip);
    let mut holdings = portfolio();

    let summary = enricher.enrich(&mut holdings).await.unwrap();

    assert_eq!(summary.enriched, vec!["CASH", "VTIAX"]);
    assert_eq!(summary.skipped.len(), 1);
    assert_eq!(summary.skipped[0].symbol, "VTSAX");
    assert!(summary.skipped[0].reason.contains("connection refused"));

    let vtsax = holdings.get("VTSAX").unwrap();
    assert_eq!(vtsax, &HoldingRecord::new("Vanguard Total Stock", "VTSAX", dec!(10.5)));
    assert_eq!(holdings.get("VTIAX").unwrap().quote, dec!(33.10));
}

#[tokio::test]
async fn test_malformed_info_leaves_record_untouched() {
    let provider = MockProvider::new().with_fund(
        "VTSAX",
        dec!(120.00),
        json!({"yield": 0.015, "morningStarOverallRating": "four"}),
    );
    let enricher =
        MarketEnricher::new(Arc::new(provider)).with_failure_policy(FailurePolicy::Skip);
    let mut holdings: Holdings =
        vec![HoldingRecord::new("Vanguard Total Stock", "VTSAX", dec!(10.5))]
            .into_iter()
            .collect();

    let summary = enricher.enrich(&mut holdings).await.unwrap();

    assert_eq!(
        summary,
        EnrichmentSummary {
            enriched: vec![],
            skipped: vec![super::SkippedSymbol {
                symbol: "VTSAX".to_string(),
                reason: "Field 'morningStarOverallRating' is not an integer".to_string(),
            }],
        }
    );
    let vtsax = holdings.get("VTSAX").unwrap();
    assert_eq!(vtsax.quote, Decimal::ZERO);
    assert_eq!(vtsax.yield_12m, Decimal::ZERO);
}

#[test]
fn test_default_policy_is_abort() {
    assert_eq!(FailurePolicy::default(), FailurePolicy::Abort);
}
