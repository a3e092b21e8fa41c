use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Confidence reported for every text-layer extraction. It is a constant of
/// the extraction path, not a measure of how readable the text is.
pub const TEXT_LAYER_CONFIDENCE: f32 = 100.0;

const OCTET_STREAM: &str = "application/octet-stream";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractionResult {
    pub text: String,
    pub confidence: f32,
}

/// Extraction strategy for a declared media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Image,
    Unsupported(String),
}

impl FileKind {
    pub fn from_mime(mime_type: &str) -> Self {
        let mime_type = mime_type.to_lowercase();
        if mime_type == "application/pdf" {
            FileKind::Pdf
        } else if mime_type.starts_with("image/") {
            FileKind::Image
        } else {
            FileKind::Unsupported(mime_type)
        }
    }
}

/// An uploaded file: raw bytes plus the name and media type it arrived with.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl SourceDocument {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Read a file from disk. Without an explicit media type, the type is
    /// guessed from the extension and then from the leading bytes.
    pub async fn from_path(path: &Path, mime_type: Option<&str>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mime_type = match mime_type {
            Some(m) => m.to_string(),
            None => detect_mime_type(&name, &bytes),
        };

        Ok(Self {
            name,
            mime_type,
            bytes,
        })
    }

    pub fn kind(&self) -> FileKind {
        FileKind::from_mime(&self.mime_type)
    }

    /// Text after the last `.` of the name, or the whole name if it has none.
    pub fn extension(&self) -> &str {
        self.name
            .rsplit_once('.')
            .map_or(self.name.as_str(), |(_, ext)| ext)
    }
}

pub fn detect_mime_type(name: &str, bytes: &[u8]) -> String {
    if let Some(mime) = mime_guess::from_path(name).first() {
        return mime.essence_str().to_string();
    }
    if let Some(kind) = infer::get(bytes) {
        return kind.mime_type().to_string();
    }
    OCTET_STREAM.to_string()
}
