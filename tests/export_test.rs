//! CSV/PDF/Excel export integration tests

use calamine::{open_workbook, Data, Reader, Xlsx};
use delivery_sheet::cli::ExportFormat;
use delivery_sheet::error::SheetError;
use delivery_sheet::export::{csv, excel, export_sheet, pdf};
use delivery_sheet_common::{DeliveryRecord, ExtractedDelivery, Sheet};
use tempfile::tempdir;

fn create_test_row(index: usize) -> DeliveryRecord {
    DeliveryRecord {
        id: index as i64,
        date: "05/03".to_string(),
        collection: format!("Rua Coleta, {}", index),
        destination: format!("Av. Destino, {}", index * 10),
        total: "12,50".to_string(),
        observation: "Frágil".to_string(),
    }
}

fn sheet_with(rows: usize, title: &str) -> Sheet {
    let mut sheet = Sheet::new(title);
    sheet.append_deliveries(
        (0..rows)
            .map(|i| ExtractedDelivery {
                date: "2024-03-05".into(),
                collection: format!("Rua {}", i),
                destination: format!("Destino {}", i),
                total: "10".into(),
                observation: String::new(),
            })
            .collect(),
    );
    sheet
}

#[test]
fn test_csv_file_contents() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("entregas.csv");
    let rows: Vec<DeliveryRecord> = (1..=2).map(create_test_row).collect();

    csv::write_csv(&rows, &path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "Data,Coleta,Destino,Total,Observacao");
    assert_eq!(lines[1], r#""05/03","Rua Coleta, 1","Av. Destino, 10","12,50","Frágil""#);
}

#[test]
fn test_pdf_generation() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("entregas.pdf");
    let rows: Vec<DeliveryRecord> = (1..=3).map(create_test_row).collect();

    let result = pdf::generate_pdf(&rows, &path, "Planilha de Teste");
    assert!(result.is_ok(), "PDF generation failed: {:?}", result.err());

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_pdf_generation_many_pages() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("longa.pdf");
    let rows: Vec<DeliveryRecord> = (1..=100).map(create_test_row).collect();

    let result = pdf::generate_pdf(&rows, &path, "Planilha Longa");
    assert!(result.is_ok(), "PDF generation failed: {:?}", result.err());
    assert!(std::fs::metadata(&path).unwrap().len() > 0);
}

#[test]
fn test_excel_values_and_total() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("entregas.xlsx");
    let rows: Vec<DeliveryRecord> = (1..=3).map(create_test_row).collect();

    excel::generate_excel(&rows, &path).unwrap();

    let mut workbook: Xlsx<_> = open_workbook(&path).expect("cannot open xlsx");
    let range = workbook.worksheet_range("Entregas").expect("sheet missing");

    assert_eq!(range.get_value((0, 0)), Some(&Data::String("Data".into())));
    assert_eq!(range.get_value((0, 4)), Some(&Data::String("Observação".into())));
    assert_eq!(range.get_value((1, 1)), Some(&Data::String("Rua Coleta, 1".into())));
    assert_eq!(range.get_value((1, 3)), Some(&Data::Float(12.5)));
    assert_eq!(range.get_value((4, 2)), Some(&Data::String("Total Geral".into())));
    assert_eq!(range.get_value((4, 3)), Some(&Data::Float(37.5)));
}

#[test]
fn test_export_sheet_all_formats() {
    let dir = tempdir().expect("Failed to create temp dir");
    let sheet = sheet_with(2, "Entregas Março");

    let written = export_sheet(&sheet, &ExportFormat::All, dir.path()).unwrap();
    let names: Vec<String> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();

    assert_eq!(
        names,
        vec!["entregas_março.csv", "entregas_março.pdf", "entregas_março.xlsx"]
    );
    assert!(written.iter().all(|p| p.exists()));
}

#[test]
fn test_export_sheet_single_format_creates_dir() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("saida");
    let sheet = sheet_with(1, "");

    let written = export_sheet(&sheet, &ExportFormat::Csv, &output).unwrap();
    assert_eq!(written, vec![output.join("planilha.csv")]);
}

#[test]
fn test_export_empty_sheet_refused() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = export_sheet(&Sheet::default(), &ExportFormat::Pdf, dir.path());

    assert!(matches!(result, Err(SheetError::NothingToExport)));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
