//! Portfolio export core - holdings import, market data enrichment and
//! spreadsheet export.
//!
//! The pipeline is strictly sequential: [`import`] builds a [`Holdings`]
//! collection from a saved brokerage page, [`enrichment`] optionally merges
//! provider data into it, and [`report`] writes the summary spreadsheet.

pub mod constants;
pub mod enrichment;
pub mod errors;
pub mod holdings;
pub mod import;
pub mod ratings;
pub mod report;

// Re-export the pipeline entry points
pub use enrichment::{EnrichmentSummary, FailurePolicy, MarketEnricher, SkippedSymbol};
pub use holdings::{HoldingRecord, Holdings};
pub use import::{extract_holdings, extract_holdings_from_str, read_portfolio_page};
pub use report::{write_report, ReportFormat};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
