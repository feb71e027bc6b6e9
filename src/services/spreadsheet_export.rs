use rust_xlsxwriter::{Format, Workbook, XlsxError};
use thiserror::Error;

use crate::services::forecast_table::{Cell, ForecastTable};

#[derive(Error, Debug)]
pub enum SpreadsheetExportError {
    #[error("failed to write spreadsheet: {0}")]
    Xlsx(#[from] XlsxError),
    #[error("table has too many rows or columns for a worksheet")]
    TooLarge,
}

/// Writes the table as a single-sheet workbook to `output_path`.
pub fn write_spreadsheet(
    output_path: &str,
    sheet_name: &str,
    table: &ForecastTable,
) -> Result<(), SpreadsheetExportError> {
    let mut workbook = build_workbook(sheet_name, table)?;
    workbook.save(output_path)?;
    Ok(())
}

/// Returns the workbook as `.xlsx` bytes.
pub fn spreadsheet_bytes(
    sheet_name: &str,
    table: &ForecastTable,
) -> Result<Vec<u8>, SpreadsheetExportError> {
    let mut workbook = build_workbook(sheet_name, table)?;
    Ok(workbook.save_to_buffer()?)
}

fn build_workbook(sheet_name: &str, table: &ForecastTable) -> Result<Workbook, SpreadsheetExportError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (col, header) in table.headers.iter().enumerate() {
        worksheet.write_string_with_format(0, column(col)?, header, &header_format)?;
    }

    for (index, cells) in table.rows.iter().enumerate() {
        let row = u32::try_from(index + 1).map_err(|_| SpreadsheetExportError::TooLarge)?;
        for (col, cell) in cells.iter().enumerate() {
            let col = column(col)?;
            match cell {
                Cell::Text(text) => {
                    worksheet.write_string(row, col, text)?;
                }
                Cell::Integer(value) => {
                    worksheet.write_number(row, col, *value as f64)?;
                }
                Cell::Number { value, .. } => {
                    worksheet.write_number(row, col, *value)?;
                }
            }
        }
    }

    Ok(workbook)
}

fn column(index: usize) -> Result<u16, SpreadsheetExportError> {
    u16::try_from(index).map_err(|_| SpreadsheetExportError::TooLarge)
}
