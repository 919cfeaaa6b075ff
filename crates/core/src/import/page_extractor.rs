//! Holdings extraction from a saved brokerage holdings page.
//!
//! The page layout is fixed: a `div.table__body` container holds, in
//! document order, one bold ticker element per holding (title = security
//! name, text = symbol) and one quantity cell per holding. The two
//! sequences are paired positionally.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use log::{debug, warn};
use rust_decimal::Decimal;
use scraper::{ElementRef, Html, Selector};

use crate::constants::{CASH_NAME, CASH_SYMBOL};
use crate::errors::{InputError, ParseError, Result};
use crate::holdings::{HoldingRecord, Holdings};

/// Container wrapping the holdings grid
pub const CONTAINER_SELECTOR: &str = "div.table__body";

/// Bold ticker element carrying the security name in its `title`
pub const TICKER_SELECTOR: &str = ".u-text-bold.qa-ticker";

/// Shares cell of each holdings row
pub const QUANTITY_SELECTOR: &str = ".table__column.table__column--right.pc-holdings-grid-cell--holding-shares.qa-holding-shares";

/// Read a saved holdings page from disk and extract its holdings.
pub fn read_portfolio_page(path: &Path) -> Result<Holdings> {
    let content = fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Read {} bytes from {}", content.len(), path.display());
    extract_holdings_from_str(&content)
}

/// Parse page source and extract its holdings. Newlines are stripped before
/// parsing.
pub fn extract_holdings_from_str(html: &str) -> Result<Holdings> {
    let document = Html::parse_document(&html.replace('\n', ""));
    extract_holdings(&document)
}

/// Extract holdings from an already parsed document.
pub fn extract_holdings(document: &Html) -> Result<Holdings> {
    let container_selector = selector(CONTAINER_SELECTOR)?;
    let ticker_selector = selector(TICKER_SELECTOR)?;
    let quantity_selector = selector(QUANTITY_SELECTOR)?;

    let container = document
        .select(&container_selector)
        .next()
        .ok_or_else(|| InputError::MissingContainer(CONTAINER_SELECTOR.to_string()))?;

    let tickers: Vec<ElementRef> = container.select(&ticker_selector).collect();
    let quantities: Vec<ElementRef> = container.select(&quantity_selector).collect();

    if tickers.len() != quantities.len() {
        warn!(
            "Found {} ticker elements but {} quantity cells; pairing the first {}",
            tickers.len(),
            quantities.len(),
            tickers.len().min(quantities.len())
        );
    }

    let mut holdings = Holdings::new();
    for (index, (ticker, quantity)) in tickers.iter().zip(quantities.iter()).enumerate() {
        let name = ticker
            .value()
            .attr("title")
            .ok_or_else(|| InputError::MissingAttribute {
                attribute: "title".to_string(),
                index,
            })?;

        let symbol = if name == CASH_NAME {
            CASH_SYMBOL.to_string()
        } else {
            element_text(ticker)
        };
        let quantity = parse_quantity(&symbol, &element_text(quantity))?;

        let mut record = HoldingRecord::new(name, symbol, quantity);
        if record.is_cash() {
            record.mark_as_cash();
        }
        if let Some(previous) = holdings.insert(record) {
            debug!("Duplicate holding {} replaced", previous.symbol);
        }
    }

    debug!("Extracted {} holdings", holdings.len());
    Ok(holdings)
}

/// Parse a quantity cell. Accepts plain and scientific notation.
pub fn parse_quantity(symbol: &str, text: &str) -> Result<Decimal> {
    let value = text.trim();
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .map_err(|_| {
            ParseError::Quantity {
                symbol: symbol.to_string(),
                value: text.to_string(),
            }
            .into()
        })
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|_| InputError::InvalidSelector(css.to_string()).into())
}

fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}
