//! portfolio-export - turn a saved brokerage holdings page into a
//! "Portfolio Summary" spreadsheet.
//!
//! # Usage
//!
//! ```bash
//! # Quantities only
//! portfolio-export -i holdings.html
//!
//! # With Yahoo Finance prices and fund data, as CSV
//! portfolio-export -i holdings.html -o summary.csv --yahoo
//! ```

mod cli;
mod config;
mod main_lib;

use clap::Parser;

use cli::Cli;
use config::Config;
use main_lib::{init_tracing, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_tracing(&config);
    let cli = Cli::parse();
    run(&cli, &config).await
}
