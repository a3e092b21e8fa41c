use std::sync::Arc;

use tracing::info;
use validator::Validate;

use crate::db::DocumentStore;
use crate::error::{DocdeskError, Result};
use crate::models::{DocumentRecord, SourceDocument, UploadForm};

use super::TextExtractionService;

/// Validates an upload, attaches the extracted text, and persists the record.
pub struct UploadPipeline {
    extraction: Arc<TextExtractionService>,
    store: Arc<dyn DocumentStore>,
}

impl UploadPipeline {
    pub fn new(extraction: Arc<TextExtractionService>, store: Arc<dyn DocumentStore>) -> Self {
        Self { extraction, store }
    }

    /// Files the extractor does not handle are stored without text; any
    /// other extraction failure aborts the upload before anything is written.
    pub async fn submit(&self, form: UploadForm, file: &SourceDocument) -> Result<DocumentRecord> {
        form.validate()?;

        let record = DocumentRecord::new(&form, file);
        let record = match self.extraction.extract_text(file).await {
            Ok(extraction) => record.with_extraction(extraction),
            Err(DocdeskError::UnsupportedFileType(file_type)) => {
                info!(file_type = %file_type, "No text extraction for this file type");
                record
            }
            Err(e) => return Err(e),
        };

        self.store.insert(&record).await?;
        info!(
            id = %record.id,
            title = %record.title,
            department = %record.department,
            "Document submitted for processing"
        );
        Ok(record)
    }
}
