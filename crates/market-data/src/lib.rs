//! Portfolio Export Market Data Crate
//!
//! Provider-agnostic access to the market data the exporter needs for each
//! holding: the most recent closing price and a bundle of fund attributes.
//!
//! # Core Types
//!
//! - [`Quote`] - Latest closing price for a symbol
//! - [`InfoBundle`] - Optional fund attributes keyed by provider field name
//! - [`MarketDataProvider`] - Trait implemented by data sources
//! - [`YahooProvider`] - Yahoo Finance implementation

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;
pub use models::{InfoBundle, Quote};
pub use provider::yahoo::YahooProvider;
pub use provider::MarketDataProvider;
