//! Yahoo Finance API response models.
//!
//! The quoteSummary endpoint returns one object per requested module. Fund
//! attributes are spread over several modules and most numeric values come
//! wrapped as `{"raw": 0.015, "fmt": "1.50%"}`, or as an empty object `{}`
//! when Yahoo has no data. The modules are kept as raw JSON and flattened
//! into an [`InfoBundle`] by [`flatten_modules`].

use serde::Deserialize;
use serde_json::{Map, Value};

use super::PROVIDER_ID;
use crate::errors::MarketDataError;
use crate::models::InfoBundle;

/// quoteSummary modules requested for the fund info bundle, in merge order.
/// Later modules win when two modules report the same key.
pub const INFO_MODULES: &[&str] = &[
    "summaryDetail",
    "defaultKeyStatistics",
    "fundProfile",
    "fundPerformance",
];

/// Main response wrapper for quoteSummary API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooQuoteSummaryResponse {
    pub quote_summary: YahooQuoteSummary,
}

/// Quote summary container
#[derive(Debug, Deserialize)]
pub struct YahooQuoteSummary {
    #[serde(default)]
    pub result: Option<Vec<Map<String, Value>>>,
    #[serde(default)]
    pub error: Option<YahooSummaryError>,
}

/// Error object Yahoo embeds in the response body
#[derive(Debug, Deserialize)]
pub struct YahooSummaryError {
    pub code: Option<String>,
    pub description: Option<String>,
}

impl YahooSummaryError {
    fn into_market_data_error(self, symbol: &str) -> MarketDataError {
        if self.code.as_deref() == Some("Not Found") {
            return MarketDataError::SymbolNotFound(symbol.to_string());
        }
        let message = self
            .description
            .or(self.code)
            .unwrap_or_else(|| "quoteSummary returned an unspecified error".to_string());
        MarketDataError::provider(PROVIDER_ID, message)
    }
}

impl YahooQuoteSummary {
    /// First result object, if Yahoo returned any.
    ///
    /// A response with no result but an embedded error is an error itself;
    /// one with neither is just empty.
    pub fn into_first_result(
        self,
        symbol: &str,
    ) -> Result<Option<Map<String, Value>>, MarketDataError> {
        if let Some(result) = self.result.and_then(|r| r.into_iter().next()) {
            return Ok(Some(result));
        }
        match self.error {
            Some(error) => Err(error.into_market_data_error(symbol)),
            None => Ok(None),
        }
    }
}

/// Collapse Yahoo's `{raw, fmt}` wrappers.
///
/// Returns `None` for values that carry no data: `null`, `{}`, a wrapper
/// whose `raw` is null, or a nested object whose entries all collapse away.
pub fn normalize_value(value: &Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::Object(map) if map.contains_key("raw") => {
            map.get("raw").filter(|raw| !raw.is_null()).cloned()
        }
        Value::Object(map) => {
            let nested: Map<String, Value> = map
                .iter()
                .filter_map(|(k, v)| normalize_value(v).map(|v| (k.clone(), v)))
                .collect();
            (!nested.is_empty()).then_some(Value::Object(nested))
        }
        other => Some(other.clone()),
    }
}

/// Merge the requested modules of one quoteSummary result into a flat bundle.
pub fn flatten_modules(result: &Map<String, Value>) -> InfoBundle {
    let mut bundle = InfoBundle::new();

    for module in INFO_MODULES {
        let Some(fields) = result.get(*module).and_then(Value::as_object) else {
            continue;
        };
        for (key, value) in fields {
            if key == "maxAge" {
                continue;
            }
            if let Some(value) = normalize_value(value) {
                bundle.insert(key.clone(), value);
            }
        }
    }

    // Newer responses only report the expense ratio under fundProfile's fee block
    if !bundle.contains(&["annualReportExpenseRatio"]) {
        if let Some(ratio) = bundle
            .get(&["feesExpensesInvestment", "annualReportExpenseRatio"])
            .cloned()
        {
            bundle.insert("annualReportExpenseRatio", ratio);
        }
    }

    bundle
}
