//! Spreadsheet export of the holdings summary.

mod report_model;
mod report_writer;

pub use report_model::{build_rows, Cell, ReportRow, COLUMNS};
pub use report_writer::{write_report, ReportFormat};
