use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Workbook, XlsxError};
use tracing::info;

use crate::error::{Error, Result};
use crate::models::Report;

use super::{prepare_target, sheet_cells, CellValue, SHEET_NAME};

/// Write the report as a single-sheet XLSX workbook inside `dir` and return the
/// file path.
pub fn export_spreadsheet(report: &Report, dir: &Path) -> Result<PathBuf> {
    let path = prepare_target(dir, report, "xlsx")?;
    write_workbook(report, &path).map_err(|err| Error::export(&path, err))?;
    info!(path = %path.display(), "Exported spreadsheet report");
    Ok(path)
}

fn write_workbook(report: &Report, path: &Path) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;
    sheet.set_column_width(0, 40.0)?;
    sheet.set_column_width(1, 16.0)?;

    for cell in sheet_cells(report) {
        match cell.value {
            CellValue::Text(text) => {
                sheet.write_string(cell.row, cell.col, text.as_str())?;
            }
            CellValue::Number(number) => {
                sheet.write_number(cell.row, cell.col, number)?;
            }
        }
    }

    workbook.save(path)
}
