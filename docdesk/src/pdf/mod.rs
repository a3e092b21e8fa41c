//! PDF text-layer access.
//!
//! Reads the text objects embedded in a PDF rather than its rendered pixels.
//! `TextLayerReader` opens a document from bytes; the resulting
//! `TextLayerDocument` hands out text fragments page by page, numbered from 1.

mod lopdf_reader;
mod reader;

pub use lopdf_reader::LopdfReader;
pub use reader::{TextLayerDocument, TextLayerReader};
