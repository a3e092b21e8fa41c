use leptess::LepTess;

use super::engine::{Recognition, RecognitionEngine, RecognitionWorker};
use crate::error::{DocdeskError, Result};

pub struct TesseractEngine {
    data_path: Option<String>,
}

impl TesseractEngine {
    pub fn new(data_path: Option<String>) -> Self {
        Self { data_path }
    }
}

impl RecognitionEngine for TesseractEngine {
    fn name(&self) -> &str {
        "tesseract"
    }

    fn create_worker(&self, languages: &str) -> Result<Box<dyn RecognitionWorker>> {
        let lt = LepTess::new(self.data_path.as_deref(), languages).map_err(|e| {
            DocdeskError::OpticalRecognitionFailed(format!("Tesseract not available: {e}"))
        })?;
        Ok(Box::new(TesseractWorker { lt }))
    }
}

struct TesseractWorker {
    lt: LepTess,
}

impl RecognitionWorker for TesseractWorker {
    fn recognize(&mut self, image: &[u8]) -> Result<Recognition> {
        self.lt.set_image_from_mem(image).map_err(|e| {
            DocdeskError::OpticalRecognitionFailed(format!("Failed to set image: {e}"))
        })?;
        let text = self.lt.get_utf8_text().map_err(|e| {
            DocdeskError::OpticalRecognitionFailed(format!("Failed to extract text: {e}"))
        })?;
        let confidence = self.lt.mean_text_conf() as f32;

        Ok(Recognition { text, confidence })
    }

    fn terminate(self: Box<Self>) -> Result<()> {
        // Dropping the handle ends the Tesseract API session.
        drop(self.lt);
        Ok(())
    }
}
