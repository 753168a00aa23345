//! Batch extraction with a canned extractor

use async_trait::async_trait;
use delivery_sheet::error::SheetError;
use delivery_sheet::extractor::{import_receipts, ExtractionError, ReceiptExtractor, ReceiptImage};
use delivery_sheet_common::{ExtractedDelivery, Sheet};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Answers by file name; unknown files fail.
struct StubExtractor {
    answers: HashMap<String, Vec<ExtractedDelivery>>,
    calls: AtomicUsize,
}

impl StubExtractor {
    fn new(answers: Vec<(&str, Vec<ExtractedDelivery>)>) -> Self {
        Self {
            answers: answers
                .into_iter()
                .map(|(name, rows)| (name.to_string(), rows))
                .collect(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ReceiptExtractor for StubExtractor {
    async fn extract(&self, image: &ReceiptImage) -> Result<Vec<ExtractedDelivery>, ExtractionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answers
            .get(&image.file_name)
            .cloned()
            .ok_or_else(|| ExtractionError::Parse("sem JSON".into()))
    }
}

fn image(name: &str) -> ReceiptImage {
    ReceiptImage {
        file_name: name.to_string(),
        media_type: "image/jpeg".to_string(),
        bytes: vec![0xFF, 0xD8, 0xFF],
    }
}

fn candidate(destination: &str, total: &str) -> ExtractedDelivery {
    ExtractedDelivery {
        date: "2024-03-05".into(),
        collection: "Rua A".into(),
        destination: destination.into(),
        total: total.into(),
        observation: String::new(),
    }
}

#[tokio::test]
async fn test_two_images_append_all_rows() {
    let extractor = StubExtractor::new(vec![
        ("a.jpg", vec![candidate("X", "10"), candidate("Y", "5")]),
        ("b.jpg", vec![]),
    ]);
    let mut sheet = Sheet::default();

    let report = import_receipts(&mut sheet, &extractor, &[image("a.jpg"), image("b.jpg")], |_, _| {})
        .await
        .unwrap();

    assert_eq!(report.appended, 2);
    assert!(report.failures.is_empty());
    assert_eq!(sheet.deliveries().len(), 2);
    assert_eq!(sheet.deliveries()[0].date, "05/03");
    assert_ne!(sheet.deliveries()[0].id, sheet.deliveries()[1].id);
}

#[tokio::test]
async fn test_no_rows_is_an_error_and_appends_nothing() {
    let extractor = StubExtractor::new(vec![("a.jpg", vec![]), ("b.jpg", vec![])]);
    let mut sheet = Sheet::default();

    let err = import_receipts(&mut sheet, &extractor, &[image("a.jpg"), image("b.jpg")], |_, _| {})
        .await
        .unwrap_err();

    assert!(matches!(err, SheetError::NoValidData));
    assert!(sheet.deliveries().is_empty());
    assert_eq!(extractor.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_failed_image_is_reported_not_fatal() {
    let extractor = StubExtractor::new(vec![("b.jpg", vec![candidate("Z", "7")])]);
    let mut sheet = Sheet::default();

    let report = import_receipts(&mut sheet, &extractor, &[image("a.jpg"), image("b.jpg")], |_, _| {})
        .await
        .unwrap();

    assert_eq!(report.appended, 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].file_name, "a.jpg");
    assert!(matches!(report.failures[0].error, ExtractionError::Parse(_)));
}

#[tokio::test]
async fn test_missing_fields_get_placeholders() {
    let extractor = StubExtractor::new(vec![(
        "a.jpg",
        vec![ExtractedDelivery {
            date: "05/03".into(),
            ..Default::default()
        }],
    )]);
    let mut sheet = Sheet::default();

    import_receipts(&mut sheet, &extractor, &[image("a.jpg")], |_, _| {})
        .await
        .unwrap();

    let row = &sheet.deliveries()[0];
    assert_eq!(row.collection, "N/A");
    assert_eq!(row.destination, "N/A");
    assert_eq!(row.total, "0");
}

#[tokio::test]
async fn test_batch_appends_after_existing_rows() {
    let extractor = StubExtractor::new(vec![("a.jpg", vec![candidate("Novo", "1")])]);
    let mut sheet = Sheet::default();
    sheet.append_deliveries(vec![candidate("Antigo", "2")]);

    import_receipts(&mut sheet, &extractor, &[image("a.jpg")], |_, _| {})
        .await
        .unwrap();

    let destinations: Vec<&str> = sheet.deliveries().iter().map(|d| d.destination.as_str()).collect();
    assert_eq!(destinations, vec!["Antigo", "Novo"]);
    assert!(sheet.deliveries()[1].id > sheet.deliveries()[0].id);
}
