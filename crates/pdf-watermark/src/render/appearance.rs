//! Appearance stream for the watermark annotation
//!
//! The stamp text is drawn once into a Form XObject sized to the form
//! rectangle. The same form is reused as the appearance of the annotation on
//! every page of the document.

use crate::constants::{EXT_GSTATE_RESOURCE_NAME, FONT_RESOURCE_NAME, WATERMARK_GREY};
use crate::geometry::text_matrix;
use crate::spec::WatermarkSpec;
use crate::types::Result;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// Add the appearance form (and the font and graphics state it uses) to the
/// document. Returns the form's object ID.
pub fn create_appearance_form(doc: &mut Document, spec: &WatermarkSpec) -> Result<ObjectId> {
    let font_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(spec.font.base_font().as_bytes().to_vec())),
        ("Encoding", Object::Name(b"WinAnsiEncoding".to_vec())),
    ]));

    let gs_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"ExtGState".to_vec())),
        ("ca", Object::Real(spec.fill_opacity)),
    ]));

    let mut fonts = Dictionary::new();
    fonts.set(FONT_RESOURCE_NAME, Object::Reference(font_id));
    let mut ext_gstates = Dictionary::new();
    ext_gstates.set(EXT_GSTATE_RESOURCE_NAME, Object::Reference(gs_id));

    let mut resources = Dictionary::new();
    resources.set("Font", Object::Dictionary(fonts));
    resources.set("ExtGState", Object::Dictionary(ext_gstates));

    let mut form_dict = Dictionary::new();
    form_dict.set("Type", Object::Name(b"XObject".to_vec()));
    form_dict.set("Subtype", Object::Name(b"Form".to_vec()));
    form_dict.set("FormType", Object::Integer(1));
    form_dict.set("BBox", Object::Array(spec.form.to_pdf_array()));
    form_dict.set("Resources", Object::Dictionary(resources));

    let content = appearance_content(spec).encode()?;
    Ok(doc.add_object(Stream::new(form_dict, content)))
}

/// Content stream operations drawing the stamp text.
///
/// The rotation and offset live in the text matrix (`Tm`), so the glyphs are
/// placed independently of any `cm` in effect.
pub fn appearance_content(spec: &WatermarkSpec) -> Content {
    let matrix = text_matrix(spec)
        .iter()
        .map(|&v| Object::Real(v as f32))
        .collect::<Vec<_>>();

    Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new("BT", vec![]),
            Operation::new(
                "rg",
                vec![
                    Object::Real(WATERMARK_GREY),
                    Object::Real(WATERMARK_GREY),
                    Object::Real(WATERMARK_GREY),
                ],
            ),
            Operation::new(
                "gs",
                vec![Object::Name(EXT_GSTATE_RESOURCE_NAME.as_bytes().to_vec())],
            ),
            Operation::new("Tm", matrix),
            Operation::new(
                "Tf",
                vec![
                    Object::Name(FONT_RESOURCE_NAME.as_bytes().to_vec()),
                    Object::Real(spec.font_size_pt),
                ],
            ),
            Operation::new("Tj", vec![Object::string_literal(encode_text(&spec.text))]),
            Operation::new("ET", vec![]),
            Operation::new("Q", vec![]),
        ],
    }
}

/// WinAnsiEncoding bytes 0x80..=0x9F that differ from Latin-1
const WIN_ANSI_HIGH: [(char, u8); 27] = [
    ('\u{20AC}', 0x80),
    ('\u{201A}', 0x82),
    ('\u{0192}', 0x83),
    ('\u{201E}', 0x84),
    ('\u{2026}', 0x85),
    ('\u{2020}', 0x86),
    ('\u{2021}', 0x87),
    ('\u{02C6}', 0x88),
    ('\u{2030}', 0x89),
    ('\u{0160}', 0x8A),
    ('\u{2039}', 0x8B),
    ('\u{0152}', 0x8C),
    ('\u{017D}', 0x8E),
    ('\u{2018}', 0x91),
    ('\u{2019}', 0x92),
    ('\u{201C}', 0x93),
    ('\u{201D}', 0x94),
    ('\u{2022}', 0x95),
    ('\u{2013}', 0x96),
    ('\u{2014}', 0x97),
    ('\u{02DC}', 0x98),
    ('\u{2122}', 0x99),
    ('\u{0161}', 0x9A),
    ('\u{203A}', 0x9B),
    ('\u{0153}', 0x9C),
    ('\u{017E}', 0x9E),
    ('\u{0178}', 0x9F),
];

/// Encode text for a standard font declared with `/WinAnsiEncoding`.
/// Characters without a WinAnsi glyph become `?`.
fn encode_text(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

fn win_ansi_byte(c: char) -> u8 {
    match u32::from(c) {
        // C1 controls have no glyph; WinAnsi reuses these bytes
        0x80..=0x9F => b'?',
        code @ (0x00..=0x7F | 0xA0..=0xFF) => code as u8,
        _ => WIN_ANSI_HIGH
            .iter()
            .find(|(ch, _)| *ch == c)
            .map_or(b'?', |(_, byte)| *byte),
    }
}
