use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::engine::{Recognition, RecognitionEngine, RecognitionWorker};
use super::tesseract::TesseractEngine;
use crate::config::OcrConfig;
use crate::error::{DocdeskError, Result};

type WorkerSlot = Arc<Mutex<Option<Box<dyn RecognitionWorker>>>>;

/// Owns the shared recognition worker.
///
/// The worker is created on the first `recognize` call and reused until
/// `shutdown`. Creation and recognition both happen while holding the slot
/// lock, so concurrent callers queue behind each other and never create a
/// second worker.
pub struct OcrProvider {
    engine: Arc<dyn RecognitionEngine>,
    languages: String,
    worker: WorkerSlot,
}

impl OcrProvider {
    pub fn new(engine: Arc<dyn RecognitionEngine>, config: &OcrConfig) -> Self {
        Self {
            engine,
            languages: config.languages.clone(),
            worker: Arc::new(Mutex::new(None)),
        }
    }

    pub fn tesseract(config: &OcrConfig) -> Self {
        Self::new(
            Arc::new(TesseractEngine::new(config.data_path.clone())),
            config,
        )
    }

    pub fn languages(&self) -> &str {
        &self.languages
    }

    /// Whether a worker is currently loaded.
    pub async fn is_ready(&self) -> bool {
        self.worker.lock().await.is_some()
    }

    pub async fn recognize(&self, image: Vec<u8>) -> Result<Recognition> {
        let mut slot = Arc::clone(&self.worker).lock_owned().await;
        let engine = Arc::clone(&self.engine);
        let languages = self.languages.clone();

        tokio::task::spawn_blocking(move || {
            if slot.is_none() {
                info!(engine = engine.name(), languages = %languages, "Initializing OCR worker...");
                *slot = Some(engine.create_worker(&languages)?);
                info!("OCR worker initialized");
            }

            match slot.as_mut() {
                Some(worker) => worker.recognize(&image),
                None => Err(DocdeskError::Internal(
                    "OCR worker missing after initialization".to_string(),
                )),
            }
        })
        .await
        .map_err(|e| DocdeskError::OpticalRecognitionFailed(format!("OCR task panicked: {e}")))?
    }

    /// Terminate the worker if one is loaded. Safe to call repeatedly; a
    /// failed termination is logged and the handle is released regardless.
    pub async fn shutdown(&self) {
        let Some(worker) = self.worker.lock().await.take() else {
            return;
        };

        info!("Terminating OCR worker...");
        match tokio::task::spawn_blocking(move || worker.terminate()).await {
            Ok(Ok(())) => info!("OCR worker terminated"),
            Ok(Err(e)) => warn!("Failed to terminate OCR worker: {}", e),
            Err(e) => warn!("OCR worker termination task panicked: {}", e),
        }
    }
}

impl Drop for OcrProvider {
    fn drop(&mut self) {
        // A worker still inside a recognition call holds the lock; it is
        // released when that task finishes.
        if let Ok(mut slot) = self.worker.try_lock() {
            if let Some(worker) = slot.take() {
                debug!("Releasing OCR worker on drop");
                if let Err(e) = worker.terminate() {
                    warn!("Failed to terminate OCR worker on drop: {}", e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Counters {
        created: AtomicUsize,
        terminated: AtomicUsize,
    }

    struct StubEngine {
        counters: Arc<Counters>,
        fail_create: bool,
    }

    struct StubWorker {
        counters: Arc<Counters>,
    }

    impl RecognitionEngine for StubEngine {
        fn name(&self) -> &str {
            "stub"
        }

        fn create_worker(&self, _languages: &str) -> Result<Box<dyn RecognitionWorker>> {
            if self.fail_create {
                return Err(DocdeskError::OpticalRecognitionFailed(
                    "language data missing".to_string(),
                ));
            }
            self.counters.created.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(StubWorker {
                counters: Arc::clone(&self.counters),
            }))
        }
    }

    impl RecognitionWorker for StubWorker {
        fn recognize(&mut self, image: &[u8]) -> Result<Recognition> {
            Ok(Recognition {
                text: String::from_utf8_lossy(image).into_owned(),
                confidence: 91.0,
            })
        }

        fn terminate(self: Box<Self>) -> Result<()> {
            self.counters.terminated.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn provider(fail_create: bool) -> (OcrProvider, Arc<Counters>) {
        let counters = Arc::new(Counters::default());
        let engine = StubEngine {
            counters: Arc::clone(&counters),
            fail_create,
        };
        (
            OcrProvider::new(Arc::new(engine), &OcrConfig::default()),
            counters,
        )
    }

    #[tokio::test]
    async fn test_worker_is_lazy_and_reused() {
        let (ocr, counters) = provider(false);
        assert!(!ocr.is_ready().await);
        assert_eq!(counters.created.load(Ordering::SeqCst), 0);

        let first = ocr.recognize(b"first".to_vec()).await.unwrap();
        let second = ocr.recognize(b"second".to_vec()).await.unwrap();

        assert_eq!(first.text, "first");
        assert_eq!(second.text, "second");
        assert_eq!(counters.created.load(Ordering::SeqCst), 1);
        assert!(ocr.is_ready().await);
    }

    #[tokio::test]
    async fn test_shutdown_is_idempotent() {
        let (ocr, counters) = provider(false);
        ocr.shutdown().await;
        assert_eq!(counters.terminated.load(Ordering::SeqCst), 0);

        ocr.recognize(b"x".to_vec()).await.unwrap();
        ocr.shutdown().await;
        ocr.shutdown().await;
        assert_eq!(counters.terminated.load(Ordering::SeqCst), 1);
        assert!(!ocr.is_ready().await);
    }

    #[tokio::test]
    async fn test_failed_creation_leaves_slot_empty() {
        let (ocr, _) = provider(true);
        let err = ocr.recognize(b"x".to_vec()).await.unwrap_err();
        assert!(matches!(err, DocdeskError::OpticalRecognitionFailed(_)));
        assert!(!ocr.is_ready().await);
    }

    #[tokio::test]
    async fn test_drop_terminates_live_worker() {
        let (ocr, counters) = provider(false);
        ocr.recognize(b"x".to_vec()).await.unwrap();
        drop(ocr);
        assert_eq!(counters.terminated.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_languages_from_config() {
        let config = OcrConfig {
            languages: "eng+fra".to_string(),
            data_path: None,
        };
        let ocr = OcrProvider::tesseract(&config);
        assert_eq!(ocr.languages(), "eng+fra");
    }
}
