use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocdeskError {
    #[error("Unsupported file type: {0}. Only PDF and image files are supported for OCR.")]
    UnsupportedFileType(String),

    #[error("PDF text extraction failed: {0}")]
    TextLayerExtractionFailed(String),

    #[error("OCR failed: {0}")]
    OpticalRecognitionFailed(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DocdeskError {
    /// True for the three failures the extraction service itself produces.
    pub fn is_extraction_failure(&self) -> bool {
        matches!(
            self,
            DocdeskError::UnsupportedFileType(_)
                | DocdeskError::TextLayerExtractionFailed(_)
                | DocdeskError::OpticalRecognitionFailed(_)
        )
    }
}

impl From<validator::ValidationErrors> for DocdeskError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DocdeskError::Validation(errors.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DocdeskError>;
