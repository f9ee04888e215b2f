//! Watermark stamping
//!
//! This module applies the stamp to a document:
//! 1. Validate the spec
//! 2. Build one appearance form shared by every page
//! 3. Add a centered, print-flagged watermark annotation to each page

mod io;

pub use io::{load_pdf, save_pdf};

use crate::geometry::trim_rect_for_page;
use crate::render::{
    attach_annotation, create_appearance_form, page_size_or_default, watermark_annotation,
};
use crate::spec::WatermarkSpec;
use crate::types::*;
use lopdf::Document;
use std::path::Path;

/// Stamp a source file and write the result to `destination`.
///
/// The source is only read. A missing source surfaces as an I/O error.
pub async fn stamp_file(
    source: impl AsRef<Path>,
    destination: impl AsRef<Path>,
    spec: &WatermarkSpec,
) -> Result<StampStatistics> {
    spec.validate()?;

    let doc = load_pdf(source).await?;
    let (doc, stats) = stamp(doc, spec).await?;
    save_pdf(doc, destination).await?;
    Ok(stats)
}

/// Stamp an in-memory document on a blocking worker
pub async fn stamp(mut doc: Document, spec: &WatermarkSpec) -> Result<(Document, StampStatistics)> {
    spec.validate()?;

    let spec = spec.clone();
    tokio::task::spawn_blocking(move || {
        let stats = stamp_document(&mut doc, &spec)?;
        Ok::<_, WatermarkError>((doc, stats))
    })
    .await?
}

/// Add the watermark annotation to every page of `doc`.
///
/// Any failure on a page fails the whole document.
pub fn stamp_document(doc: &mut Document, spec: &WatermarkSpec) -> Result<StampStatistics> {
    spec.validate()?;

    let appearance_id = create_appearance_form(doc, spec)?;
    let mut stats = StampStatistics {
        pages_stamped: 0,
        pages_with_default_size: 0,
    };

    for (page_number, page_id) in doc.get_pages() {
        let (page_size, defaulted) = page_size_or_default(doc, page_id)?;
        if defaulted {
            log::warn!(
                "Page {} has no MediaBox, assuming {} x {} pt",
                page_number,
                page_size.width,
                page_size.height
            );
            stats.pages_with_default_size += 1;
        }

        let rect = trim_rect_for_page(spec, page_size);
        let annot_id = doc.add_object(watermark_annotation(page_id, &rect, appearance_id));
        attach_annotation(doc, page_id, annot_id)?;

        log::trace!(
            "Stamped page {} at ({}, {}) {} x {}",
            page_number,
            rect.x,
            rect.y,
            rect.width,
            rect.height
        );
        stats.pages_stamped += 1;
    }

    Ok(stats)
}
