use std::collections::BTreeMap;

use lopdf::{Document, Object, ObjectId};

use super::reader::{TextLayerDocument, TextLayerReader};
use crate::error::{DocdeskError, Result};

/// Kerning adjustment (in thousandths of an em) wide enough to read as a
/// word gap inside a `TJ` array.
const TJ_WORD_GAP: f32 = -100.0;

/// Text-layer reader backed by lopdf.
///
/// Every text-show operator (`Tj`, `TJ`, `'`, `"`) on a page yields one
/// fragment, decoded with the encoding of the font selected by the most
/// recent `Tf`. Fragment text is kept as written.
#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfReader;

impl TextLayerReader for LopdfReader {
    fn open(&self, bytes: &[u8]) -> Result<Box<dyn TextLayerDocument>> {
        let document = Document::load_mem(bytes).map_err(|e| {
            DocdeskError::TextLayerExtractionFailed(format!("Failed to load PDF: {e}"))
        })?;
        let pages = document.get_pages();

        Ok(Box::new(LopdfDocument { document, pages }))
    }
}

struct LopdfDocument {
    document: Document,
    pages: BTreeMap<u32, ObjectId>,
}

impl TextLayerDocument for LopdfDocument {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_fragments(&self, page_number: u32) -> Result<Vec<String>> {
        let page_id = *self.pages.get(&page_number).ok_or_else(|| {
            DocdeskError::TextLayerExtractionFailed(format!("Page {page_number} not found"))
        })?;

        let encodings: BTreeMap<Vec<u8>, &str> = self
            .document
            .get_page_fonts(page_id)
            .into_iter()
            .map(|(name, font)| (name, font.get_font_encoding()))
            .collect();

        let content = self
            .document
            .get_and_decode_page_content(page_id)
            .map_err(|e| {
                DocdeskError::TextLayerExtractionFailed(format!(
                    "Failed to read page {page_number}: {e}"
                ))
            })?;

        let mut encoding: Option<&str> = None;
        let mut fragments = Vec::new();
        for operation in &content.operations {
            match operation.operator.as_str() {
                "Tf" => {
                    encoding = operation
                        .operands
                        .first()
                        .and_then(|font| font.as_name().ok())
                        .and_then(|name| encodings.get(name).copied());
                }
                // `'` takes only the string; `"` takes word and char spacing first.
                "Tj" | "'" | "\"" => {
                    if let Some(Object::String(bytes, _)) = operation.operands.last() {
                        fragments.push(Document::decode_text(encoding, bytes));
                    }
                }
                "TJ" => {
                    if let Some(Object::Array(items)) = operation.operands.first() {
                        fragments.push(decode_tj_array(encoding, items));
                    }
                }
                _ => {}
            }
        }

        Ok(fragments)
    }
}

fn decode_tj_array(encoding: Option<&str>, items: &[Object]) -> String {
    let mut text = String::new();
    for item in items {
        match item {
            Object::String(bytes, _) => text.push_str(&Document::decode_text(encoding, bytes)),
            Object::Integer(gap) if (*gap as f32) < TJ_WORD_GAP => text.push(' '),
            Object::Real(gap) if *gap < TJ_WORD_GAP => text.push(' '),
            _ => {}
        }
    }
    text
}
