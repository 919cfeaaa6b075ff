//! Import of holdings from a saved brokerage holdings page.

mod page_extractor;

pub use page_extractor::{
    extract_holdings, extract_holdings_from_str, parse_quantity, read_portfolio_page,
    CONTAINER_SELECTOR, QUANTITY_SELECTOR, TICKER_SELECTOR,
};
