#![allow(dead_code)]

use lopdf::{Dictionary, Document, Object, Stream};
use pdf_pipeline::*;
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn create_test_pdf(num_pages: usize) -> Document {
    let mut doc = Document::with_version("1.7");

    // Create page tree root ID
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for i in 0..num_pages {
        let content = format!("BT /F1 24 Tf 72 720 Td (Page {}) Tj ET", i + 1);
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(612),
                    Object::Integer(792),
                ]),
            ),
            ("Resources", Object::Dictionary(Dictionary::new())),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(num_pages as i64)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));

    doc.trailer.set("Root", catalog_id);

    doc
}

pub fn write_test_pdf(path: &Path, num_pages: usize) {
    let mut doc = create_test_pdf(num_pages);
    let mut writer = Vec::new();
    doc.save_to(&mut writer).unwrap();
    std::fs::write(path, writer).unwrap();
}

/// Copies the input byte for byte
#[derive(Default)]
pub struct IdentityRasterizer {
    pub calls: AtomicUsize,
}

impl Rasterizer for IdentityRasterizer {
    async fn rasterize(&self, input: &Path, output: &Path, _mode: ColorMode) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::fs::copy(input, output).await?;
        Ok(())
    }
}

/// Keeps only the first `len` bytes of the input
pub struct TruncatingRasterizer {
    pub len: usize,
}

impl Rasterizer for TruncatingRasterizer {
    async fn rasterize(&self, input: &Path, output: &Path, _mode: ColorMode) -> Result<()> {
        let bytes = tokio::fs::read(input).await?;
        let len = self.len.min(bytes.len());
        tokio::fs::write(output, &bytes[..len]).await?;
        Ok(())
    }
}

/// Appends `extra` bytes so the greyscale rendition is always larger
pub struct PaddingRasterizer {
    pub extra: usize,
}

impl Rasterizer for PaddingRasterizer {
    async fn rasterize(&self, input: &Path, output: &Path, _mode: ColorMode) -> Result<()> {
        let mut bytes = tokio::fs::read(input).await?;
        bytes.extend(std::iter::repeat_n(b'\n', self.extra));
        tokio::fs::write(output, bytes).await?;
        Ok(())
    }
}

/// Fails for inputs whose file name contains `needle`, copies otherwise
pub struct SelectiveFailureRasterizer {
    pub needle: &'static str,
}

impl Rasterizer for SelectiveFailureRasterizer {
    async fn rasterize(&self, input: &Path, output: &Path, _mode: ColorMode) -> Result<()> {
        let name = input.file_name().unwrap().to_string_lossy().into_owned();
        if name.contains(self.needle) {
            return Err(PipelineError::EngineFailed {
                input: input.to_owned(),
                code: Some(1),
                stderr: "simulated engine failure".to_string(),
            });
        }
        tokio::fs::copy(input, output).await?;
        Ok(())
    }
}

/// Records every progress event as a line of text
#[derive(Default)]
pub struct RecordingProgress {
    pub events: Mutex<Vec<String>>,
}

impl RecordingProgress {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl ProgressReporter for RecordingProgress {
    fn on_run_start(&self, total_files: usize) {
        self.events.lock().unwrap().push(format!("start {}", total_files));
    }

    fn on_file_start(&self, index: usize, total_files: usize, name: &str) {
        self.events
            .lock()
            .unwrap()
            .push(format!("file {}/{} {}", index, total_files, name));
    }

    fn on_file_complete(&self, index: usize, _total_files: usize, report: &FileReport) {
        self.events
            .lock()
            .unwrap()
            .push(format!("done {} {}", index, report.name));
    }

    fn on_file_error(&self, index: usize, _total_files: usize, failure: &FileFailure) {
        self.events
            .lock()
            .unwrap()
            .push(format!("error {} {}", index, failure.name));
    }

    fn on_run_complete(&self, summary: &RunSummary) {
        self.events
            .lock()
            .unwrap()
            .push(format!("complete {}/{}", summary.succeeded(), summary.total_files));
    }
}
