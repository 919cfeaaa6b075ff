//! Holding records and the symbol-keyed collection passed between stages.

mod holdings_model;

pub use holdings_model::{HoldingRecord, Holdings};
