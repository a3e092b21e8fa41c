use crate::error::Result;

/// Raw recognizer output. `confidence` is on a 0-100 scale.
#[derive(Debug, Clone, PartialEq)]
pub struct Recognition {
    pub text: String,
    pub confidence: f32,
}

pub trait RecognitionEngine: Send + Sync {
    fn name(&self) -> &str;

    /// Load a worker for `languages`. This is the expensive step, so callers
    /// keep the returned worker around.
    fn create_worker(&self, languages: &str) -> Result<Box<dyn RecognitionWorker>>;
}

/// A loaded recognizer. Calls are blocking and must not overlap.
pub trait RecognitionWorker: Send {
    fn recognize(&mut self, image: &[u8]) -> Result<Recognition>;

    fn terminate(self: Box<Self>) -> Result<()>;
}
