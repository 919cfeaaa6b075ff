//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use portfolio_export_core::constants::DEFAULT_OUTPUT_PATH;
use portfolio_export_core::ReportFormat;

/// Export a saved brokerage holdings page to a portfolio summary spreadsheet
#[derive(Parser, Debug)]
#[command(name = "portfolio-export")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Saved holdings page (HTML)
    #[arg(short, long, env = "PORTFOLIO_EXPORT_INPUT")]
    pub input: PathBuf,

    /// Report destination
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// Enrich holdings with Yahoo Finance data
    #[arg(short = 'y', long = "yahoo", overrides_with = "no_yahoo")]
    pub yahoo: bool,

    /// Do not contact Yahoo Finance (default)
    #[arg(long = "no-yahoo", overrides_with = "yahoo")]
    pub no_yahoo: bool,

    /// Report format; inferred from the output extension when omitted
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Skip symbols whose market data cannot be fetched instead of aborting
    #[arg(long)]
    pub keep_going: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Xlsx,
    Csv,
}

impl From<FormatArg> for ReportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Xlsx => ReportFormat::Xlsx,
            FormatArg::Csv => ReportFormat::Csv,
        }
    }
}

impl Cli {
    pub fn use_yahoo(&self) -> bool {
        self.yahoo && !self.no_yahoo
    }

    pub fn report_format(&self) -> ReportFormat {
        self.format
            .map(ReportFormat::from)
            .unwrap_or_else(|| ReportFormat::from_path(&self.output))
    }
}
