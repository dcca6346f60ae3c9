//! Report exporters. Both renderers work from a finished `Report` only and
//! never touch the database, so re-exporting the same report always yields
//! the same labeled content.
//!
//! The content of each format is produced by a pure function
//! (`document_lines`, `sheet_cells`) and then handed to the container writer.

mod pdf;
mod spreadsheet;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::models::Report;

pub use pdf::export_pdf;
pub use spreadsheet::export_spreadsheet;

/// Name of the single worksheet in spreadsheet exports.
pub const SHEET_NAME: &str = "Report";

/// Value held by one spreadsheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

/// A cell at a zero-based (row, column) position; `(0, 0)` is `A1`.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetCell {
    pub row: u32,
    pub col: u16,
    pub value: CellValue,
}

impl SheetCell {
    fn text(row: u32, col: u16, text: impl Into<String>) -> Self {
        Self {
            row,
            col,
            value: CellValue::Text(text.into()),
        }
    }

    fn number(row: u32, col: u16, number: f64) -> Self {
        Self {
            row,
            col,
            value: CellValue::Number(number),
        }
    }
}

/// Two-decimal rendering used wherever an amount becomes text.
pub fn format_amount(value: f64) -> String {
    format!("{value:.2}")
}

/// One line per field, in document order.
pub fn document_lines(report: &Report) -> Vec<String> {
    let mut lines = Vec::with_capacity(report.sales_by_method.len() + 5);
    lines.push(report.title());
    lines.push("Sales:".to_string());
    for (method, total) in &report.sales_by_method {
        lines.push(format!("{method}: {}", format_amount(*total)));
    }
    lines.push(format!("Total Sales: {}", format_amount(report.total_sales)));
    lines.push(format!(
        "Total Purchases: {}",
        format_amount(report.total_purchases)
    ));
    lines.push(format!("Profit: {}", format_amount(report.profit)));
    lines
}

/// Fixed sheet layout: title in A1, a "Sales" header in A3, one row per
/// method from row 4, then the totals block.
pub fn sheet_cells(report: &Report) -> Vec<SheetCell> {
    let mut cells = vec![
        SheetCell::text(0, 0, report.title()),
        SheetCell::text(2, 0, "Sales"),
    ];

    let mut row = 3;
    for (method, total) in &report.sales_by_method {
        cells.push(SheetCell::text(row, 0, method.as_str()));
        cells.push(SheetCell::number(row, 1, *total));
        row += 1;
    }

    cells.push(SheetCell::text(row, 0, "Total Sales"));
    cells.push(SheetCell::number(row, 1, report.total_sales));
    row += 2;
    cells.push(SheetCell::text(row, 0, "Total Purchases"));
    cells.push(SheetCell::number(row, 1, report.total_purchases));
    row += 1;
    cells.push(SheetCell::text(row, 0, "Profit"));
    cells.push(SheetCell::number(row, 1, report.profit));

    cells
}

/// `report_<Label>.<extension>`
pub fn export_file_name(report: &Report, extension: &str) -> String {
    format!("report_{}.{extension}", report.period_label())
}

/// Create the export directory if needed and return the target file path.
fn prepare_target(dir: &Path, report: &Report, extension: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir).map_err(|err| Error::export(dir, err))?;
    Ok(dir.join(export_file_name(report, extension)))
}
