mod extractor;
mod pipeline;

pub use extractor::{read_text_layer, TextExtractionService};
pub use pipeline::UploadPipeline;
