//! Page geometry lookup

use crate::constants::{DEFAULT_PAGE_HEIGHT_PT, DEFAULT_PAGE_WIDTH_PT};
use crate::types::{PageSize, Result};
use lopdf::{Dictionary, Document, Object, ObjectId};

/// Page tree depth after which we stop following `/Parent` links
const MAX_PAGE_TREE_DEPTH: usize = 32;

/// Size of a page in points, following `/MediaBox` inheritance up the page
/// tree. Returns `None` when no usable MediaBox exists.
pub fn get_page_size(doc: &Document, page_id: ObjectId) -> Result<Option<PageSize>> {
    let mut dict = doc.get_dictionary(page_id)?;

    for _ in 0..MAX_PAGE_TREE_DEPTH {
        if let Some(size) = media_box_size(doc, dict) {
            return Ok(Some(size));
        }
        match dict.get(b"Parent").and_then(Object::as_reference) {
            Ok(parent_id) => dict = doc.get_dictionary(parent_id)?,
            Err(_) => break,
        }
    }

    Ok(None)
}

/// Size of a page, falling back to US Letter
pub fn page_size_or_default(doc: &Document, page_id: ObjectId) -> Result<(PageSize, bool)> {
    Ok(match get_page_size(doc, page_id)? {
        Some(size) => (size, false),
        None => (
            PageSize {
                width: DEFAULT_PAGE_WIDTH_PT,
                height: DEFAULT_PAGE_HEIGHT_PT,
            },
            true,
        ),
    })
}

fn media_box_size(doc: &Document, dict: &Dictionary) -> Option<PageSize> {
    let media_box = match dict.get(b"MediaBox").ok()? {
        Object::Reference(id) => doc.get_object(*id).ok()?,
        obj => obj,
    };
    let values = media_box.as_array().ok()?;
    if values.len() != 4 {
        return None;
    }

    let llx = extract_number(&values[0])?;
    let lly = extract_number(&values[1])?;
    let urx = extract_number(&values[2])?;
    let ury = extract_number(&values[3])?;

    Some(PageSize {
        width: (urx - llx).abs(),
        height: (ury - lly).abs(),
    })
}

/// Extract numeric value from a PDF object
fn extract_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}
