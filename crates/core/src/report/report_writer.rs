//! Writers for the summary report.
//!
//! The xlsx writer produces a single worksheet; the csv writer emits the same
//! header and rows with numbers in their decimal string form.

use std::path::Path;

use log::{debug, info};
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Workbook, Worksheet};

use super::report_model::{build_rows, Cell, ReportRow, COLUMNS};
use crate::constants::REPORT_SHEET_TITLE;
use crate::errors::{OutputError, Result};
use crate::holdings::Holdings;

/// Output container of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Xlsx,
    Csv,
}

impl ReportFormat {
    /// `.csv` (any case) selects CSV; everything else is written as xlsx.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => ReportFormat::Csv,
            _ => ReportFormat::Xlsx,
        }
    }
}

/// Write one row per holding, in collection order, to `path`.
pub fn write_report(holdings: &Holdings, path: &Path, format: ReportFormat) -> Result<()> {
    let rows = build_rows(holdings)?;
    match format {
        ReportFormat::Xlsx => write_xlsx(&rows, path)?,
        ReportFormat::Csv => write_csv(&rows, path)?,
    }
    info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

fn write_xlsx(rows: &[ReportRow], path: &Path) -> std::result::Result<(), OutputError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(REPORT_SHEET_TITLE)?;

    for (col, title) in COLUMNS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *title)?;
    }
    for (idx, row) in rows.iter().enumerate() {
        write_xlsx_row(worksheet, idx as u32 + 1, row)?;
    }

    debug!("Saving workbook to {}", path.display());
    workbook.save(path)?;
    Ok(())
}

fn write_xlsx_row(
    worksheet: &mut Worksheet,
    row_num: u32,
    row: &ReportRow,
) -> std::result::Result<(), OutputError> {
    for (col, cell) in row.cells().iter().enumerate() {
        let col = col as u16;
        match cell {
            Cell::Text(text) => {
                worksheet.write_string(row_num, col, text)?;
            }
            Cell::Number(value) => {
                worksheet.write_number(row_num, col, value.to_f64().unwrap_or_default())?;
            }
        }
    }
    Ok(())
}

fn write_csv(rows: &[ReportRow], path: &Path) -> std::result::Result<(), OutputError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(COLUMNS)?;
    for row in rows {
        let record: Vec<String> = row
            .cells()
            .iter()
            .map(|cell| match cell {
                Cell::Text(text) => text.clone(),
                Cell::Number(value) => value.normalize().to_string(),
            })
            .collect();
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}
