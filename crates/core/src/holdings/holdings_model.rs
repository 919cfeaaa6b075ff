use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{CASH_FUND_TYPE, CASH_SYMBOL};

/// One security position read from the holdings page, plus the fields the
/// enrichment pass merges in.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct HoldingRecord {
    pub name: String,
    pub symbol: String,
    pub quantity: Decimal,

    /// Fund category; empty until enriched
    pub fund_type: String,
    /// Most recent price per unit; zero until enriched
    pub quote: Decimal,

    /// Filled from the provider's 3-year beta. The column has always been
    /// labelled as the 5-year figure.
    pub beta_5y: Decimal,
    pub expense_ratio: Decimal,
    pub yield_12m: Decimal,
    pub return_1y: Decimal,
    pub return_3y: Decimal,
    pub return_5y: Decimal,

    pub morningstar_rating: Option<i64>,
    pub morningstar_risk_rating: Option<i64>,
}

impl HoldingRecord {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, quantity: Decimal) -> Self {
        HoldingRecord {
            name: name.into(),
            symbol: symbol.into(),
            quantity,
            ..Default::default()
        }
    }

    pub fn is_cash(&self) -> bool {
        self.symbol == CASH_SYMBOL
    }

    /// Price the cash pseudo-holding at one unit per share.
    pub fn mark_as_cash(&mut self) {
        self.quote = Decimal::ONE;
        self.fund_type = CASH_FUND_TYPE.to_string();
    }

    /// quantity × quote, or `None` if the product overflows.
    pub fn balance(&self) -> Option<Decimal> {
        self.quantity.checked_mul(self.quote)
    }

    /// quantity × quote × yield_12m, or `None` if the product overflows.
    pub fn estimated_annual_income(&self) -> Option<Decimal> {
        self.balance()?.checked_mul(self.yield_12m)
    }
}

/// Holdings keyed by symbol, iterated in first-insertion order.
///
/// Inserting a symbol that is already present replaces the stored record
/// but keeps its original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Holdings {
    records: Vec<HoldingRecord>,
    index: HashMap<String, usize>,
}

impl Holdings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, returning the record it replaced if the symbol was
    /// already present.
    pub fn insert(&mut self, record: HoldingRecord) -> Option<HoldingRecord> {
        match self.index.get(&record.symbol) {
            Some(&pos) => Some(std::mem::replace(&mut self.records[pos], record)),
            None => {
                self.index.insert(record.symbol.clone(), self.records.len());
                self.records.push(record);
                None
            }
        }
    }

    pub fn get(&self, symbol: &str) -> Option<&HoldingRecord> {
        self.index.get(symbol).map(|&pos| &self.records[pos])
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.index.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.symbol.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HoldingRecord> {
        self.records.iter()
    }

    /// Mutable iteration. Symbols must not be changed through this, the
    /// index is keyed on them.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, HoldingRecord> {
        self.records.iter_mut()
    }
}

impl<'a> IntoIterator for &'a Holdings {
    type Item = &'a HoldingRecord;
    type IntoIter = std::slice::Iter<'a, HoldingRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Holdings {
    type Item = HoldingRecord;
    type IntoIter = std::vec::IntoIter<HoldingRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl FromIterator<HoldingRecord> for Holdings {
    fn from_iter<T: IntoIterator<Item = HoldingRecord>>(iter: T) -> Self {
        let mut holdings = Holdings::new();
        for record in iter {
            holdings.insert(record);
        }
        holdings
    }
}
