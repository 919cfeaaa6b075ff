//! Market data enrichment of extracted holdings.

mod enrichment_service;
mod info_fields;

#[cfg(test)]
mod enrichment_service_tests;

pub use enrichment_service::{EnrichmentSummary, FailurePolicy, MarketEnricher, SkippedSymbol};
pub use info_fields::{merge_info, HoldingField, InfoField, INFO_FIELDS};
