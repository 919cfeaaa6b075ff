/// Reserved symbol of the cash pseudo-holding
pub const CASH_SYMBOL: &str = "CASH";

/// Security name the holdings page uses for the cash line
pub const CASH_NAME: &str = "Cash";

/// Fund type reported for the cash pseudo-holding
pub const CASH_FUND_TYPE: &str = "CASH";

/// Title of the single worksheet in the exported workbook
pub const REPORT_SHEET_TITLE: &str = "Portfolio Summary";

/// Default report destination
pub const DEFAULT_OUTPUT_PATH: &str = "output.xlsx";
