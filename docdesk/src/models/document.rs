use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::{priority_label, Department, DocumentStatus, ExtractionResult, SourceDocument};

/// Metadata row persisted for every uploaded document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub file_path: String,
    pub file_type: String,
    pub department: Department,
    pub priority: u8,
    pub uploaded_by: String,
    pub status: DocumentStatus,
    pub extracted_text: Option<String>,
    pub ocr_confidence: Option<f32>,
    pub created_at: DateTime<Utc>,
}

impl DocumentRecord {
    pub fn new(form: &UploadForm, file: &SourceDocument) -> Self {
        let created_at = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: form.title.trim().to_string(),
            description: form.description.clone(),
            file_path: format!("{}.{}", created_at.timestamp_millis(), file.extension()),
            file_type: file.mime_type.clone(),
            department: form.department,
            priority: form.priority,
            uploaded_by: form.uploaded_by.clone(),
            status: DocumentStatus::Pending,
            extracted_text: None,
            ocr_confidence: None,
            created_at,
        }
    }

    pub fn with_extraction(mut self, extraction: ExtractionResult) -> Self {
        self.extracted_text = Some(extraction.text);
        self.ocr_confidence = Some(extraction.confidence);
        self
    }

    pub fn priority_label(&self) -> &'static str {
        priority_label(self.priority).unwrap_or("Unknown")
    }

    /// Case-insensitive substring match over title, description and department.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
            || self.department.as_str().to_lowercase().contains(&needle)
    }
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UploadForm {
    #[validate(custom(function = "validate_not_blank"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub department: Department,
    #[validate(range(min = 1, max = 5))]
    pub priority: u8,
    #[validate(custom(function = "validate_not_blank"))]
    pub uploaded_by: String,
}

impl UploadForm {
    pub fn new(title: impl Into<String>, department: Department, uploaded_by: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            department,
            priority: 1,
            uploaded_by: uploaded_by.into(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }
}
