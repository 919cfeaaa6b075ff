use rust_decimal::Decimal;
use serde::Serialize;

use crate::errors::{OutputError, Result};
use crate::holdings::{HoldingRecord, Holdings};
use crate::ratings::{risk_label, star_string};

/// Header row of the summary, in output order.
pub const COLUMNS: [&str; 15] = [
    "Security",
    "Symbol",
    "Type",
    "Qty",
    "Quote",
    "Rating",
    "Risk",
    "1 yr return",
    "3 yr return",
    "5 yr return",
    "Beta",
    "Expense Ratio",
    "Yield",
    "Est Annual Income",
    "Balance",
];

/// A single typed spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Number(Decimal),
}

/// One output row, derived from a holding.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    pub security: String,
    pub symbol: String,
    pub fund_type: String,
    pub quantity: Decimal,
    pub quote: Decimal,
    pub rating: String,
    pub risk: String,
    pub return_1y: Decimal,
    pub return_3y: Decimal,
    pub return_5y: Decimal,
    pub beta: Decimal,
    pub expense_ratio: Decimal,
    pub yield_12m: Decimal,
    pub est_annual_income: Decimal,
    pub balance: Decimal,
}

impl ReportRow {
    /// Fails when a derived column does not fit a `Decimal`.
    pub fn from_holding(record: &HoldingRecord) -> Result<Self> {
        let overflow = |column| OutputError::Overflow {
            symbol: record.symbol.clone(),
            column,
        };
        let balance = record.balance().ok_or_else(|| overflow("Balance"))?;
        let est_annual_income = record
            .estimated_annual_income()
            .ok_or_else(|| overflow("Est Annual Income"))?;

        Ok(ReportRow {
            security: record.name.clone(),
            symbol: record.symbol.clone(),
            fund_type: record.fund_type.clone(),
            quantity: record.quantity,
            quote: record.quote,
            rating: star_string(record.morningstar_rating),
            risk: risk_label(record.morningstar_risk_rating).to_string(),
            return_1y: record.return_1y,
            return_3y: record.return_3y,
            return_5y: record.return_5y,
            beta: record.beta_5y,
            expense_ratio: record.expense_ratio,
            yield_12m: record.yield_12m,
            est_annual_income,
            balance,
        })
    }

    /// Cells in [`COLUMNS`] order.
    pub fn cells(&self) -> [Cell; 15] {
        [
            Cell::Text(self.security.clone()),
            Cell::Text(self.symbol.clone()),
            Cell::Text(self.fund_type.clone()),
            Cell::Number(self.quantity),
            Cell::Number(self.quote),
            Cell::Text(self.rating.clone()),
            Cell::Text(self.risk.clone()),
            Cell::Number(self.return_1y),
            Cell::Number(self.return_3y),
            Cell::Number(self.return_5y),
            Cell::Number(self.beta),
            Cell::Number(self.expense_ratio),
            Cell::Number(self.yield_12m),
            Cell::Number(self.est_annual_income),
            Cell::Number(self.balance),
        ]
    }
}

/// One row per holding, in collection order.
pub fn build_rows(holdings: &Holdings) -> Result<Vec<ReportRow>> {
    holdings.iter().map(ReportRow::from_holding).collect()
}
