//! Column definitions and file naming shared by the exporters.

use crate::format::format_currency;
use crate::types::DeliveryRecord;

/// One exported column.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub key: &'static str,
    /// Header used by CSV and PDF (ASCII only, builtin PDF fonts)
    pub label: &'static str,
    /// Header used by the workbook
    pub sheet_label: &'static str,
    /// Workbook column width in characters
    pub sheet_width: f64,
    /// Share of the PDF table width
    pub pdf_weight: f32,
}

pub const DELIVERY_COLUMNS: [Column; 5] = [
    Column { key: "date", label: "Data", sheet_label: "Data", sheet_width: 12.0, pdf_weight: 0.11 },
    Column { key: "collection", label: "Coleta", sheet_label: "Coleta", sheet_width: 40.0, pdf_weight: 0.26 },
    Column { key: "destination", label: "Destino", sheet_label: "Destino", sheet_width: 40.0, pdf_weight: 0.26 },
    Column { key: "total", label: "Total", sheet_label: "Total", sheet_width: 15.0, pdf_weight: 0.14 },
    Column { key: "observation", label: "Observacao", sheet_label: "Observação", sheet_width: 50.0, pdf_weight: 0.23 },
];

/// Raw cell value, as stored.
pub fn raw_value<'a>(row: &'a DeliveryRecord, key: &str) -> &'a str {
    match key {
        "date" => &row.date,
        "collection" => &row.collection,
        "destination" => &row.destination,
        "total" => &row.total,
        "observation" => &row.observation,
        _ => "",
    }
}

/// Cell value as displayed in documents (totals as currency).
pub fn display_value(row: &DeliveryRecord, key: &str) -> String {
    match key {
        "total" => format_currency(&row.total),
        _ => raw_value(row, key).to_string(),
    }
}

/// Lowercases the title and joins words with `_`; empty titles become `planilha`.
///
/// Path separators become `-` so the name stays a single file.
pub fn slugify_title(title: &str) -> String {
    let slug = title
        .to_lowercase()
        .replace(['/', '\\'], "-")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    if slug.is_empty() {
        "planilha".to_string()
    } else {
        slug
    }
}

pub fn export_file_name(title: &str, extension: &str) -> String {
    format!("{}.{}", slugify_title(title), extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_title() {
        assert_eq!(slugify_title("Planilha de Entregas"), "planilha_de_entregas");
        assert_eq!(slugify_title("  Março   2024 "), "março_2024");
        assert_eq!(slugify_title("   "), "planilha");
        assert_eq!(slugify_title("Entregas 03/2024"), "entregas_03-2024");
        assert_eq!(export_file_name("", "csv"), "planilha.csv");
    }

    #[test]
    fn test_display_value_formats_total() {
        let row = DeliveryRecord {
            id: 1,
            total: "1234,5".into(),
            destination: "Centro".into(),
            ..Default::default()
        };
        assert_eq!(display_value(&row, "total"), "R$ 1.234,50");
        assert_eq!(display_value(&row, "destination"), "Centro");
        assert_eq!(raw_value(&row, "total"), "1234,5");
    }

    #[test]
    fn test_pdf_weights_fill_width() {
        let sum: f32 = DELIVERY_COLUMNS.iter().map(|c| c.pdf_weight).sum();
        assert!((sum - 1.0).abs() < 1e-4);
    }
}
