pub mod backends;
pub mod traits;

pub use backends::jsonl::JsonlDocumentStore;
pub use backends::memory::MemoryDocumentStore;
pub use traits::*;
