//! Mapping from provider info-bundle keys to holding record fields.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

use portfolio_export_market_data::InfoBundle;

use crate::errors::EnrichmentError;
use crate::holdings::HoldingRecord;

/// Record field an info-bundle entry is copied into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldingField {
    FundType,
    Beta5y,
    ExpenseRatio,
    MorningstarRating,
    MorningstarRiskRating,
    Yield12m,
    Return1y,
    Return3y,
    Return5y,
}

/// One copy-if-present rule.
#[derive(Debug, Clone, Copy)]
pub struct InfoField {
    pub path: &'static [&'static str],
    pub target: HoldingField,
}

/// Every bundle entry the exporter reads. Note that `beta3Year` feeds the
/// record's 5-year beta column.
pub const INFO_FIELDS: &[InfoField] = &[
    InfoField {
        path: &["categoryName"],
        target: HoldingField::FundType,
    },
    InfoField {
        path: &["beta3Year"],
        target: HoldingField::Beta5y,
    },
    InfoField {
        path: &["annualReportExpenseRatio"],
        target: HoldingField::ExpenseRatio,
    },
    InfoField {
        path: &["morningStarOverallRating"],
        target: HoldingField::MorningstarRating,
    },
    InfoField {
        path: &["morningStarRiskRating"],
        target: HoldingField::MorningstarRiskRating,
    },
    InfoField {
        path: &["yield"],
        target: HoldingField::Yield12m,
    },
    InfoField {
        path: &["trailingReturns", "oneYear"],
        target: HoldingField::Return1y,
    },
    InfoField {
        path: &["trailingReturns", "threeYear"],
        target: HoldingField::Return3y,
    },
    InfoField {
        path: &["trailingReturns", "fiveYear"],
        target: HoldingField::Return5y,
    },
];

impl InfoField {
    /// Dotted key used in error messages, e.g. `trailingReturns.oneYear`
    pub fn key(&self) -> String {
        self.path.join(".")
    }
}

impl HoldingField {
    /// Store `value` into the matching field of `record`.
    pub fn assign(
        self,
        record: &mut HoldingRecord,
        key: &str,
        value: &Value,
    ) -> Result<(), EnrichmentError> {
        match self {
            HoldingField::FundType => record.fund_type = as_text(key, value)?,
            HoldingField::Beta5y => record.beta_5y = as_decimal(key, value)?,
            HoldingField::ExpenseRatio => record.expense_ratio = as_decimal(key, value)?,
            HoldingField::MorningstarRating => {
                record.morningstar_rating = Some(as_integer(key, value)?)
            }
            HoldingField::MorningstarRiskRating => {
                record.morningstar_risk_rating = Some(as_integer(key, value)?)
            }
            HoldingField::Yield12m => record.yield_12m = as_decimal(key, value)?,
            HoldingField::Return1y => record.return_1y = as_decimal(key, value)?,
            HoldingField::Return3y => record.return_3y = as_decimal(key, value)?,
            HoldingField::Return5y => record.return_5y = as_decimal(key, value)?,
        }
        Ok(())
    }
}

/// Copy every present [`INFO_FIELDS`] entry of `bundle` into `record`.
///
/// Returns how many fields were copied. Absent entries leave the record
/// untouched; an entry of the wrong type is an error.
pub fn merge_info(
    record: &mut HoldingRecord,
    bundle: &InfoBundle,
) -> Result<usize, EnrichmentError> {
    let mut merged = 0;
    for field in INFO_FIELDS {
        if let Some(value) = bundle.get(field.path) {
            field.target.assign(record, &field.key(), value)?;
            merged += 1;
        }
    }
    Ok(merged)
}

fn malformed(key: &str, expected: &'static str) -> EnrichmentError {
    EnrichmentError::Malformed {
        key: key.to_string(),
        expected,
    }
}

fn as_text(key: &str, value: &Value) -> Result<String, EnrichmentError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| malformed(key, "a string"))
}

/// Numbers go through their shortest JSON text so 0.015 stays 0.015
/// instead of picking up binary noise.
fn as_decimal(key: &str, value: &Value) -> Result<Decimal, EnrichmentError> {
    let Value::Number(number) = value else {
        return Err(malformed(key, "a number"));
    };
    let text = number.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| malformed(key, "a number"))
}

fn as_integer(key: &str, value: &Value) -> Result<i64, EnrichmentError> {
    if let Some(n) = value.as_i64() {
        return Ok(n);
    }
    value
        .as_f64()
        .filter(|f| f.fract() == 0.0 && f.abs() <= i64::MAX as f64)
        .map(|f| f as i64)
        .ok_or_else(|| malformed(key, "an integer"))
}
