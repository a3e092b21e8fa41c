use crate::error::Result;

pub trait TextLayerReader: Send + Sync {
    fn open(&self, bytes: &[u8]) -> Result<Box<dyn TextLayerDocument>>;
}

pub trait TextLayerDocument {
    fn page_count(&self) -> u32;

    /// Text fragments of one page in content-stream order. Pages are 1-based.
    fn page_fragments(&self, page_number: u32) -> Result<Vec<String>>;
}
