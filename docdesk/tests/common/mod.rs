#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use docdesk::config::OcrConfig;
use docdesk::error::{DocdeskError, Result};
use docdesk::models::{Department, DocumentRecord, SourceDocument, UploadForm};
use docdesk::ocr::{OcrProvider, Recognition, RecognitionEngine, RecognitionWorker};
use docdesk::pdf::{LopdfReader, TextLayerDocument, TextLayerReader};
use docdesk::processing::TextExtractionService;

/// Operations for one text object that shows each fragment with its own
/// `Tj`, moving down a line between fragments.
pub fn text_object(fragments: &[&str]) -> Vec<Operation> {
    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 12.into()]),
        Operation::new("Td", vec![72.into(), 720.into()]),
    ];
    for (idx, fragment) in fragments.iter().enumerate() {
        if idx > 0 {
            operations.push(Operation::new("Td", vec![0.into(), (-20).into()]));
        }
        operations.push(Operation::new(
            "Tj",
            vec![Object::string_literal(*fragment)],
        ));
    }
    operations.push(Operation::new("ET", vec![]));
    operations
}

/// Build a PDF whose pages carry the given text fragments in a single text
/// object per page.
pub fn build_pdf(page_texts: &[&[&str]]) -> Vec<u8> {
    build_pdf_from_operations(page_texts.iter().map(|page| text_object(page)).collect())
}

/// Build a PDF with one page per content stream. Font `F1` is Courier with
/// WinAnsi encoding.
pub fn build_pdf_from_operations(page_operations: Vec<Vec<Operation>>) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let page_total = page_operations.len() as i64;
    let mut kids: Vec<Object> = Vec::new();
    for operations in page_operations {
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content stream"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        kids.push(page_id.into());
    }

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_total,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("serialize pdf");
    bytes
}

pub fn pdf_file(name: &str, page_texts: &[&[&str]]) -> SourceDocument {
    SourceDocument::new(name, "application/pdf", build_pdf(page_texts))
}

pub fn image_file(name: &str) -> SourceDocument {
    SourceDocument::new(name, "image/png", vec![0x89, b'P', b'N', b'G'])
}

#[derive(Default)]
pub struct EngineStats {
    created: AtomicUsize,
    recognized: AtomicUsize,
    terminated: AtomicUsize,
}

impl EngineStats {
    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    pub fn recognized(&self) -> usize {
        self.recognized.load(Ordering::SeqCst)
    }

    pub fn terminated(&self) -> usize {
        self.terminated.load(Ordering::SeqCst)
    }
}

/// Recognition engine with a fixed answer that counts lifecycle calls.
pub struct ScriptedEngine {
    pub stats: Arc<EngineStats>,
    text: String,
    confidence: f32,
    create_error: Option<String>,
    recognize_error: Option<String>,
}

impl ScriptedEngine {
    pub fn new(text: &str, confidence: f32) -> Self {
        Self {
            stats: Arc::new(EngineStats::default()),
            text: text.to_string(),
            confidence,
            create_error: None,
            recognize_error: None,
        }
    }

    pub fn unavailable(message: &str) -> Self {
        Self {
            create_error: Some(message.to_string()),
            ..Self::new("", 0.0)
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            recognize_error: Some(message.to_string()),
            ..Self::new("", 0.0)
        }
    }
}

struct ScriptedWorker {
    stats: Arc<EngineStats>,
    text: String,
    confidence: f32,
    recognize_error: Option<String>,
}

impl RecognitionEngine for ScriptedEngine {
    fn name(&self) -> &str {
        "scripted"
    }

    fn create_worker(&self, _languages: &str) -> Result<Box<dyn RecognitionWorker>> {
        if let Some(message) = &self.create_error {
            return Err(DocdeskError::Internal(message.clone()));
        }
        self.stats.created.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(ScriptedWorker {
            stats: Arc::clone(&self.stats),
            text: self.text.clone(),
            confidence: self.confidence,
            recognize_error: self.recognize_error.clone(),
        }))
    }
}

impl RecognitionWorker for ScriptedWorker {
    fn recognize(&mut self, _image: &[u8]) -> Result<Recognition> {
        self.stats.recognized.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.recognize_error {
            return Err(DocdeskError::Internal(message.clone()));
        }
        Ok(Recognition {
            text: self.text.clone(),
            confidence: self.confidence,
        })
    }

    fn terminate(self: Box<Self>) -> Result<()> {
        self.stats.terminated.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Delegates to lopdf and counts how many documents were opened.
#[derive(Default)]
pub struct CountingReader {
    opened: Arc<AtomicUsize>,
}

impl TextLayerReader for CountingReader {
    fn open(&self, bytes: &[u8]) -> Result<Box<dyn TextLayerDocument>> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        LopdfReader.open(bytes)
    }
}

pub struct Harness {
    pub service: Arc<TextExtractionService>,
    pub engine: Arc<EngineStats>,
    opened: Arc<AtomicUsize>,
}

impl Harness {
    pub fn pdfs_opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }
}

pub fn harness(engine: ScriptedEngine) -> Harness {
    let stats = Arc::clone(&engine.stats);
    let reader = CountingReader::default();
    let opened = Arc::clone(&reader.opened);
    let ocr = OcrProvider::new(Arc::new(engine), &OcrConfig::default());

    Harness {
        service: Arc::new(TextExtractionService::new(ocr, Arc::new(reader))),
        engine: stats,
        opened,
    }
}

pub fn record(title: &str, description: &str, department: Department) -> DocumentRecord {
    let form = UploadForm::new(title, department, "tester").with_description(description);
    let file = SourceDocument::new("upload.pdf", "application/pdf", Vec::new());
    DocumentRecord::new(&form, &file)
}
