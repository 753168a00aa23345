use crate::error::Result;
use delivery_sheet_common::export::csv_core::deliveries_to_csv;
use delivery_sheet_common::DeliveryRecord;
use std::path::Path;

pub fn write_csv(rows: &[DeliveryRecord], output_path: &Path) -> Result<()> {
    std::fs::write(output_path, deliveries_to_csv(rows))?;
    Ok(())
}
