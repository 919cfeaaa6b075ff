use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Most recent closing price for a symbol
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Symbol the quote was fetched for
    pub symbol: String,

    /// Timestamp of the quote
    pub timestamp: DateTime<Utc>,

    /// Closing price (required)
    pub close: Decimal,

    /// Source of the quote (YAHOO, ...)
    pub source: String,
}

impl Quote {
    /// Create a new quote with minimal required fields
    pub fn new(
        symbol: impl Into<String>,
        timestamp: DateTime<Utc>,
        close: Decimal,
        source: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            timestamp,
            close,
            source: source.into(),
        }
    }
}
