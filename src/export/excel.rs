use crate::error::{Result, SheetError};
use delivery_sheet_common::export::excel_core::deliveries_workbook;
use delivery_sheet_common::DeliveryRecord;
use std::path::Path;

pub fn generate_excel(rows: &[DeliveryRecord], output_path: &Path) -> Result<()> {
    let bytes = deliveries_workbook(rows).map_err(|e| SheetError::ExcelGeneration(e.to_string()))?;
    std::fs::write(output_path, bytes)?;
    Ok(())
}
