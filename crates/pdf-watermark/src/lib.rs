pub mod constants;
pub mod geometry;
pub mod render;
mod spec;
pub mod stamp;
mod types;

pub use geometry::{AffineTransform, centered_trim_rect, text_matrix, trim_rect_for_page};
pub use spec::WatermarkSpec;
pub use stamp::{load_pdf, save_pdf, stamp, stamp_document, stamp_file};
pub use types::*;
