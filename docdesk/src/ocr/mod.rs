//! OCR (Optical Character Recognition) Module
//!
//! Recognizes text in uploaded images for the document desk.
//!
//! # Architecture
//!
//! - `RecognitionEngine` creates long-lived `RecognitionWorker`s for a set of
//!   languages; `TesseractEngine` implements both via leptess
//! - `OcrProvider` owns at most one worker, creates it on first use, and
//!   serializes every recognition call through a single lock
//!
//! # Lifecycle
//!
//! The worker stays loaded between calls. Hosts must call
//! `OcrProvider::shutdown` (or `TextExtractionService::cleanup`) during their
//! own teardown; dropping the provider releases a still-idle worker as a
//! fallback.
//!
//! # Usage
//!
//! ```rust,ignore
//! let ocr = OcrProvider::tesseract(&config.ocr);
//! let recognition = ocr.recognize(image_bytes).await?;
//! ocr.shutdown().await;
//! ```

mod engine;
mod provider;
mod tesseract;

pub use engine::{Recognition, RecognitionEngine, RecognitionWorker};
pub use provider::OcrProvider;
pub use tesseract::TesseractEngine;
