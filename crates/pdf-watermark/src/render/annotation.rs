//! Watermark annotation objects

use crate::constants::ANNOTATION_FLAG_PRINT;
use crate::types::{Rect, Result, WatermarkError};
use lopdf::{Dictionary, Document, Object, ObjectId};

/// Build a `/Watermark` annotation at `rect` whose normal appearance is
/// `appearance_id`. The print flag and `/FixedPrint` keep the stamp on
/// printed output.
pub fn watermark_annotation(page_id: ObjectId, rect: &Rect, appearance_id: ObjectId) -> Dictionary {
    let mut appearance = Dictionary::new();
    appearance.set("N", Object::Reference(appearance_id));

    let fixed_print = Dictionary::from_iter(vec![("Type", Object::Name(b"FixedPrint".to_vec()))]);

    let mut annot = Dictionary::new();
    annot.set("Type", Object::Name(b"Annot".to_vec()));
    annot.set("Subtype", Object::Name(b"Watermark".to_vec()));
    annot.set("Rect", Object::Array(rect.to_pdf_array()));
    annot.set("P", Object::Reference(page_id));
    annot.set("F", Object::Integer(ANNOTATION_FLAG_PRINT));
    annot.set("FixedPrint", Object::Dictionary(fixed_print));
    annot.set("AP", Object::Dictionary(appearance));
    annot
}

/// Append an annotation to the page's `/Annots`, keeping existing entries.
/// An indirect `/Annots` array is copied inline onto the page first.
pub fn attach_annotation(doc: &mut Document, page_id: ObjectId, annot_id: ObjectId) -> Result<()> {
    let existing = doc.get_dictionary(page_id)?.get(b"Annots").ok().cloned();

    match existing {
        None => {
            doc.get_dictionary_mut(page_id)?
                .set("Annots", Object::Array(vec![Object::Reference(annot_id)]));
        }
        Some(Object::Array(mut annots)) => {
            annots.push(Object::Reference(annot_id));
            doc.get_dictionary_mut(page_id)?
                .set("Annots", Object::Array(annots));
        }
        // An indirect array may be shared by several pages, so the page gets
        // its own inline copy and the shared array is left untouched
        Some(Object::Reference(array_id)) => {
            let mut annots = doc.get_object(array_id)?.as_array()?.clone();
            annots.push(Object::Reference(annot_id));
            doc.get_dictionary_mut(page_id)?
                .set("Annots", Object::Array(annots));
        }
        Some(other) => {
            return Err(WatermarkError::MalformedPage(format!(
                "object {:?} has a non-array /Annots entry: {:?}",
                page_id, other
            )));
        }
    }

    Ok(())
}
