use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use portfolio_export_core::{
    read_portfolio_page, write_report, EnrichmentSummary, FailurePolicy, MarketEnricher,
};
use portfolio_export_market_data::{MarketDataProvider, YahooProvider};

use crate::cli::Cli;
use crate::config::Config;

/// Logs go to stderr so they never interleave with the progress lines.
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);

    if config.log_format.eq_ignore_ascii_case("json") {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

pub async fn run(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    let provider: Option<Arc<dyn MarketDataProvider>> = if cli.use_yahoo() {
        Some(Arc::new(YahooProvider::with_timeout(config.request_timeout)?))
    } else {
        None
    };
    export(cli, provider).await
}

/// Import, optionally enrich through `provider`, then write the report.
///
/// An aborted enrichment returns before the report file is created.
pub async fn export(
    cli: &Cli,
    provider: Option<Arc<dyn MarketDataProvider>>,
) -> anyhow::Result<()> {
    println!("portfolio-export v{}", env!("CARGO_PKG_VERSION"));

    let mut holdings = read_portfolio_page(&cli.input)
        .with_context(|| format!("Cannot import holdings from {}", cli.input.display()))?;
    tracing::info!("Imported {} holdings", holdings.len());

    if let Some(provider) = provider {
        println!("Yahoo data");
        let policy = if cli.keep_going {
            FailurePolicy::Skip
        } else {
            FailurePolicy::Abort
        };
        let summary = MarketEnricher::new(provider)
            .with_failure_policy(policy)
            .enrich_with_progress(&mut holdings, |record| {
                println!("{} {}", record.symbol, record.quote)
            })
            .await?;
        print_skipped(&summary);
    }

    let format = cli.report_format();
    write_report(&holdings, &cli.output, format)
        .with_context(|| format!("Cannot write report to {}", cli.output.display()))?;
    println!("done");
    Ok(())
}

fn print_skipped(summary: &EnrichmentSummary) {
    if summary.skipped.is_empty() {
        return;
    }
    println!("Skipped {} symbols:", summary.skipped.len());
    for skipped in &summary.skipped {
        println!("  {}: {}", skipped.symbol, skipped.reason);
    }
}
