use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatermarkError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid watermark configuration: {0}")]
    Config(String),
    #[error("Malformed page: {0}")]
    MalformedPage(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, WatermarkError>;

/// Axis-aligned rectangle in PDF user space (points, origin bottom-left)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle anchored at the origin
    pub fn sized(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// `[llx lly urx ury]` as used by `/Rect` and `/BBox`
    pub fn to_pdf_array(&self) -> Vec<lopdf::Object> {
        vec![
            lopdf::Object::Real(self.x),
            lopdf::Object::Real(self.y),
            lopdf::Object::Real(self.right()),
            lopdf::Object::Real(self.top()),
        ]
    }
}

/// Standard Type1 fonts available to every PDF viewer without embedding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StandardFont {
    #[default]
    Courier,
    CourierBold,
    Helvetica,
    HelveticaBold,
    TimesRoman,
    TimesBold,
}

impl StandardFont {
    /// The `/BaseFont` name
    pub fn base_font(self) -> &'static str {
        match self {
            StandardFont::Courier => "Courier",
            StandardFont::CourierBold => "Courier-Bold",
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::TimesRoman => "Times-Roman",
            StandardFont::TimesBold => "Times-Bold",
        }
    }
}

/// Page size in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

/// Result of stamping a single document
#[derive(Debug, Clone, PartialEq)]
pub struct StampStatistics {
    /// Number of pages that received the watermark annotation
    pub pages_stamped: usize,
    /// Pages whose size could not be read and fell back to the default
    pub pages_with_default_size: usize,
}
