//! XLSX sink with a styled header and auto-sized columns.

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use unicode_width::UnicodeWidthStr;

use crate::error::EngineResult;
use crate::models::DisplayTable;

use super::export_error;

/// Renders a display table as an XLSX workbook with a single sheet.
///
/// The header row is frozen and emphasized rows are bold. Cells in the
/// table's numeric columns are written as numbers; every other cell is
/// written as text, so ids like `"007"` keep their leading zeros.
///
/// # Errors
///
/// Returns [`EngineError::ExportError`](crate::error::EngineError::ExportError)
/// if the sheet name is not a valid worksheet name or the workbook cannot be
/// written.
pub fn xlsx_bytes(table: &DisplayTable, sheet_name: &str) -> EngineResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name).map_err(export_error)?;

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in table.headers.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, header.as_str(), &header_format)
            .map_err(export_error)?;
    }
    worksheet.set_freeze_panes(1, 0).map_err(export_error)?;

    let mut col_widths: Vec<usize> = table
        .headers
        .iter()
        .map(|h| UnicodeWidthStr::width(h.as_str()))
        .collect();

    let plain = Format::new().set_border(FormatBorder::Thin);
    let bold = Format::new().set_bold().set_border(FormatBorder::Thin);

    for (index, row) in table.rows.iter().enumerate() {
        let format = if row.emphasized { &bold } else { &plain };

        for (col, value) in row.cells.iter().enumerate() {
            let number = numeric_value(table, col, value);
            write_cell(worksheet, (index + 1) as u32, col as u16, value, number, format)?;

            if col >= col_widths.len() {
                col_widths.resize(col + 1, 0);
            }
            col_widths[col] = col_widths[col].max(UnicodeWidthStr::width(value.as_str()));
        }
    }

    for (col, width) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(col as u16, *width as f64 + 2.0)
            .map_err(export_error)?;
    }

    workbook.save_to_buffer().map_err(export_error)
}

fn numeric_value(table: &DisplayTable, col: usize, value: &str) -> Option<f64> {
    if !table.is_numeric(col) {
        return None;
    }
    value.parse::<f64>().ok().filter(|number| number.is_finite())
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &str,
    number: Option<f64>,
    format: &Format,
) -> EngineResult<()> {
    if value.is_empty() {
        return Ok(());
    }

    match number {
        Some(number) => {
            let format = format.clone().set_align(FormatAlign::Right);
            worksheet
                .write_with_format(row, col, number, &format)
                .map_err(export_error)?;
        }
        _ => {
            worksheet
                .write_with_format(row, col, value, format)
                .map_err(export_error)?;
        }
    }

    Ok(())
}
