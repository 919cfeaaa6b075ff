//! Market data models
//!
//! - `quote` - Latest closing price for a symbol (Quote)
//! - `info` - Provider-sourced fund attributes (InfoBundle)

mod info;
mod quote;

pub use info::InfoBundle;
pub use quote::Quote;
