use std::sync::Arc;

use tracing::{debug, error, info};

use crate::config::OcrConfig;
use crate::error::{DocdeskError, Result};
use crate::models::{ExtractionResult, FileKind, SourceDocument, TEXT_LAYER_CONFIDENCE};
use crate::ocr::OcrProvider;
use crate::pdf::{LopdfReader, TextLayerReader};

/// Turns uploaded PDFs and images into plain text.
///
/// PDFs go through the text-layer reader, images through the shared OCR
/// worker. The host application owns the service and must call
/// [`TextExtractionService::cleanup`] during its shutdown sequence so the
/// worker is released deterministically.
pub struct TextExtractionService {
    ocr: OcrProvider,
    text_layer: Arc<dyn TextLayerReader>,
}

impl TextExtractionService {
    pub fn new(ocr: OcrProvider, text_layer: Arc<dyn TextLayerReader>) -> Self {
        Self { ocr, text_layer }
    }

    /// Tesseract for images and lopdf for PDFs.
    pub fn from_config(config: &OcrConfig) -> Self {
        Self::new(OcrProvider::tesseract(config), Arc::new(LopdfReader))
    }

    pub async fn extract_text(&self, file: &SourceDocument) -> Result<ExtractionResult> {
        let kind = file.kind();
        info!("Processing file: {} ({})", file.name, file.mime_type.to_lowercase());

        match kind {
            FileKind::Pdf => self.extract_from_pdf(file).await,
            FileKind::Image => self.extract_from_image(file).await,
            FileKind::Unsupported(file_type) => Err(DocdeskError::UnsupportedFileType(file_type)),
        }
    }

    /// Whether the OCR worker is loaded.
    pub async fn is_ready(&self) -> bool {
        self.ocr.is_ready().await
    }

    /// Release the OCR worker. The next image extraction loads a new one.
    pub async fn cleanup(&self) {
        self.ocr.shutdown().await;
    }

    async fn extract_from_pdf(&self, file: &SourceDocument) -> Result<ExtractionResult> {
        info!("Starting PDF text extraction...");
        let reader = Arc::clone(&self.text_layer);
        let bytes = file.bytes.clone();

        let text = tokio::task::spawn_blocking(move || read_text_layer(reader.as_ref(), &bytes))
            .await
            .map_err(|e| {
                DocdeskError::TextLayerExtractionFailed(format!("PDF task panicked: {e}"))
            })?
            .map_err(|e| {
                error!("Error extracting text from PDF: {}", e);
                as_text_layer_failure(e)
            })?;

        Ok(ExtractionResult {
            text,
            confidence: TEXT_LAYER_CONFIDENCE,
        })
    }

    async fn extract_from_image(&self, file: &SourceDocument) -> Result<ExtractionResult> {
        info!("Starting image OCR extraction...");
        let recognition = self.ocr.recognize(file.bytes.clone()).await.map_err(|e| {
            error!("Error extracting text from image: {}", e);
            as_recognition_failure(e)
        })?;

        info!(
            confidence = recognition.confidence,
            "Image OCR completed"
        );
        Ok(ExtractionResult {
            text: recognition.text.trim().to_string(),
            confidence: recognition.confidence,
        })
    }
}

/// Concatenate every page's fragments in ascending page order. Fragments are
/// joined with single spaces and each page is followed by a blank line; the
/// whole result is trimmed. Any page failure aborts the read.
pub fn read_text_layer(reader: &dyn TextLayerReader, bytes: &[u8]) -> Result<String> {
    let document = reader.open(bytes)?;
    let total_pages = document.page_count();
    info!("Processing PDF with {} pages...", total_pages);

    let mut full_text = String::new();
    for page_number in 1..=total_pages {
        let fragments = document.page_fragments(page_number)?;
        full_text.push_str(&fragments.join(" "));
        full_text.push_str("\n\n");
        debug!("Extracted text from page {}/{}", page_number, total_pages);
    }

    Ok(full_text.trim().to_string())
}

fn as_text_layer_failure(err: DocdeskError) -> DocdeskError {
    match err {
        DocdeskError::TextLayerExtractionFailed(_) => err,
        other => DocdeskError::TextLayerExtractionFailed(other.to_string()),
    }
}

fn as_recognition_failure(err: DocdeskError) -> DocdeskError {
    match err {
        DocdeskError::OpticalRecognitionFailed(_) => err,
        other => DocdeskError::OpticalRecognitionFailed(other.to_string()),
    }
}
