pub mod csv;
pub mod excel;
pub mod pdf;

use crate::cli::ExportFormat;
use crate::error::{Result, SheetError};
use delivery_sheet_common::export::export_file_name;
use delivery_sheet_common::Sheet;
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes the sheet's deliveries in `format` under `output_dir`.
///
/// Returns the written files. Costs are not exported.
pub fn export_sheet(sheet: &Sheet, format: &ExportFormat, output_dir: &Path) -> Result<Vec<PathBuf>> {
    let rows = sheet.deliveries();
    if rows.is_empty() {
        return Err(SheetError::NothingToExport);
    }
    std::fs::create_dir_all(output_dir)?;

    let path_for = |extension: &str| output_dir.join(export_file_name(sheet.title(), extension));
    let mut written = Vec::new();

    if matches!(format, ExportFormat::Csv | ExportFormat::All) {
        let path = path_for("csv");
        csv::write_csv(rows, &path)?;
        written.push(path);
    }
    if matches!(format, ExportFormat::Pdf | ExportFormat::All) {
        let path = path_for("pdf");
        pdf::generate_pdf(rows, &path, sheet.title())?;
        written.push(path);
    }
    if matches!(format, ExportFormat::Xlsx | ExportFormat::All) {
        let path = path_for("xlsx");
        excel::generate_excel(rows, &path)?;
        written.push(path);
    }

    for path in &written {
        info!("exported {}", path.display());
    }
    Ok(written)
}
