//! Core error types for the portfolio exporter.
//!
//! Each stage of the pipeline has its own error enum; [`Error`] is the root
//! type every public operation returns.

use std::path::PathBuf;

use thiserror::Error;

use portfolio_export_market_data::MarketDataError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the exporter.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read holdings page: {0}")]
    Input(#[from] InputError),

    #[error("Failed to parse holdings: {0}")]
    Parse(#[from] ParseError),

    #[error("Enrichment failed for {symbol}: {source}")]
    Enrichment {
        symbol: String,
        #[source]
        source: EnrichmentError,
    },

    #[error("Failed to write report: {0}")]
    Output(#[from] OutputError),
}

impl Error {
    pub fn enrichment(symbol: impl Into<String>, source: impl Into<EnrichmentError>) -> Self {
        Error::Enrichment {
            symbol: symbol.into(),
            source: source.into(),
        }
    }
}

/// The input file or its expected HTML structure is unusable.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Holdings container '{0}' not found")]
    MissingContainer(String),

    #[error("Ticker element #{index} has no '{attribute}' attribute")]
    MissingAttribute { attribute: String, index: usize },

    #[error("Invalid CSS selector '{0}'")]
    InvalidSelector(String),
}

/// A value on the page could not be interpreted.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Quantity '{value}' for {symbol} is not a number")]
    Quantity { symbol: String, value: String },
}

/// Market data for one symbol could not be obtained or understood.
#[derive(Error, Debug)]
pub enum EnrichmentError {
    #[error(transparent)]
    MarketData(#[from] MarketDataError),

    #[error("Field '{key}' is not {expected}")]
    Malformed { key: String, expected: &'static str },
}

/// The report could not be written.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("{column} for {symbol} is out of range")]
    Overflow { symbol: String, column: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err: Error = ParseError::Quantity {
            symbol: "VTSAX".to_string(),
            value: "ten".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Failed to parse holdings: Quantity 'ten' for VTSAX is not a number"
        );

        let err: Error = InputError::MissingContainer("div.table__body".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Failed to read holdings page: Holdings container 'div.table__body' not found"
        );
    }

    #[test]
    fn test_enrichment_error_keeps_symbol_and_source() {
        let err = Error::enrichment("NOPE", MarketDataError::SymbolNotFound("NOPE".into()));
        assert_eq!(
            err.to_string(),
            "Enrichment failed for NOPE: Symbol not found: NOPE"
        );
        assert!(std::error::Error::source(&err).is_some());
    }
}
