//! Workbook for the delivery list.
//!
//! `Total` is written as a number with a currency format and a bold
//! `Total Geral` row closes the table.

use super::table::{raw_value, DELIVERY_COLUMNS};
use crate::aggregate::total;
use crate::error::Result;
use crate::types::DeliveryRecord;
use rust_xlsxwriter::*;

pub const SHEET_NAME: &str = "Entregas";
pub const CURRENCY_FORMAT: &str = "R$ #,##0.00";
pub const TOTAL_LABEL: &str = "Total Geral";

/// Column holding the `Total Geral` label.
const TOTAL_LABEL_COL: u16 = 2;
/// Column holding the amounts.
const TOTAL_COL: u16 = 3;

/// Builds the workbook and returns the xlsx bytes.
pub fn deliveries_workbook(rows: &[DeliveryRecord]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0x2C3E50))
        .set_font_color(Color::White)
        .set_align(FormatAlign::Center);
    let money_format = Format::new().set_num_format(CURRENCY_FORMAT);
    let total_label_format = Format::new().set_bold();
    let total_value_format = Format::new().set_bold().set_num_format(CURRENCY_FORMAT);

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, column) in DELIVERY_COLUMNS.iter().enumerate() {
        let col = col as u16;
        worksheet.set_column_width(col, column.sheet_width)?;
        worksheet.write_string_with_format(0, col, column.sheet_label, &header_format)?;
    }

    for (index, row) in rows.iter().enumerate() {
        let sheet_row = index as u32 + 1;
        for (col, column) in DELIVERY_COLUMNS.iter().enumerate() {
            let col = col as u16;
            if col == TOTAL_COL {
                worksheet.write_number_with_format(sheet_row, col, row.amount(), &money_format)?;
            } else {
                worksheet.write_string(sheet_row, col, raw_value(row, column.key))?;
            }
        }
    }

    let total_row = rows.len() as u32 + 1;
    worksheet.write_string_with_format(total_row, TOTAL_LABEL_COL, TOTAL_LABEL, &total_label_format)?;
    worksheet.write_number_with_format(total_row, TOTAL_COL, total(rows), &total_value_format)?;

    Ok(workbook.save_to_buffer()?)
}
