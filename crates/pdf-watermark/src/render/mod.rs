//! PDF object construction for the watermark
//!
//! - Resolving page sizes (with MediaBox inheritance)
//! - Building the shared appearance form
//! - Creating and attaching the stamp annotations

mod annotation;
mod appearance;
mod page;

pub use annotation::{attach_annotation, watermark_annotation};
pub use appearance::{appearance_content, create_appearance_form};
pub use page::{get_page_size, page_size_or_default};
