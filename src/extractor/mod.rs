//! Receipt extraction: turns photos of delivery labels into sheet rows.
//!
//! A [`ReceiptExtractor`] handles one image at a time; [`extract_batch`]
//! runs a whole selection sequentially and [`import_receipts`] appends the
//! result to the sheet.

mod gemini;

pub use gemini::GeminiExtractor;

use crate::error::{Result, SheetError};
use async_trait::async_trait;
use delivery_sheet_common::{ExtractedDelivery, Sheet};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Why a single image could not be extracted.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("falha na requisição: {0}")]
    Request(String),

    #[error("a API respondeu com status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("a resposta da IA veio vazia")]
    EmptyResponse,

    #[error("resposta da IA em formato inválido: {0}")]
    Parse(String),
}

/// Image bytes ready to upload.
#[derive(Debug, Clone)]
pub struct ReceiptImage {
    pub file_name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

#[async_trait]
pub trait ReceiptExtractor: Send + Sync {
    /// Zero or more delivery candidates found in one image.
    async fn extract(&self, image: &ReceiptImage) -> std::result::Result<Vec<ExtractedDelivery>, ExtractionError>;
}

#[derive(Debug)]
pub struct ImageFailure {
    pub file_name: String,
    pub error: ExtractionError,
}

#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Candidates from every image, in image order.
    pub rows: Vec<ExtractedDelivery>,
    pub failures: Vec<ImageFailure>,
}

/// Extracts every image in order, one request at a time.
///
/// A failing image is recorded and skipped. `on_progress` is called before
/// each image with its index.
pub async fn extract_batch<E, F>(
    extractor: &E,
    images: &[ReceiptImage],
    mut on_progress: F,
) -> BatchOutcome
where
    E: ReceiptExtractor + ?Sized,
    F: FnMut(usize, &ReceiptImage),
{
    let mut outcome = BatchOutcome::default();

    for (index, image) in images.iter().enumerate() {
        on_progress(index, image);
        match extractor.extract(image).await {
            Ok(rows) => {
                debug!("{}: {} rows", image.file_name, rows.len());
                outcome.rows.extend(rows);
            }
            Err(error) => {
                warn!("{}: {}", image.file_name, error);
                outcome.failures.push(ImageFailure {
                    file_name: image.file_name.clone(),
                    error,
                });
            }
        }
    }

    outcome
}

#[derive(Debug)]
pub struct ImportReport {
    pub appended: usize,
    pub failures: Vec<ImageFailure>,
}

/// Extracts `images` and appends every candidate to `sheet` as one batch.
///
/// Fails with [`SheetError::NoValidData`] when no image produced a row; the
/// sheet is left untouched in that case.
pub async fn import_receipts<E, F>(
    sheet: &mut Sheet,
    extractor: &E,
    images: &[ReceiptImage],
    on_progress: F,
) -> Result<ImportReport>
where
    E: ReceiptExtractor + ?Sized,
    F: FnMut(usize, &ReceiptImage),
{
    let outcome = extract_batch(extractor, images, on_progress).await;

    if outcome.rows.is_empty() {
        // A lone image that failed is reported as itself.
        if images.len() == 1 {
            if let Some(failure) = outcome.failures.into_iter().next() {
                return Err(SheetError::Extraction(failure.error));
            }
        }
        return Err(SheetError::NoValidData);
    }

    let appended = sheet.append_deliveries(outcome.rows);
    info!("{} deliveries appended from {} images", appended, images.len());

    Ok(ImportReport {
        appended,
        failures: outcome.failures,
    })
}
