//! Shared constants for watermark stamping
//!
//! Defaults mirror the stamp the batch tool has always produced: a large
//! grey Courier "COPY" rotated by sixty degrees.

use std::f64::consts::FRAC_PI_3;

// =============================================================================
// Default Page Dimensions
// =============================================================================

/// Default page width in points (US Letter: 8.5" × 11")
pub const DEFAULT_PAGE_WIDTH_PT: f32 = 612.0;

/// Default page height in points (US Letter)
pub const DEFAULT_PAGE_HEIGHT_PT: f32 = 792.0;

// =============================================================================
// Watermark Defaults
// =============================================================================

pub const DEFAULT_WATERMARK_TEXT: &str = "COPY";

pub const DEFAULT_FONT_SIZE_PT: f32 = 119.0;

pub const DEFAULT_FILL_OPACITY: f32 = 0.6;

/// Rotation applied after the translation (radians)
pub const DEFAULT_ROTATION_RAD: f64 = FRAC_PI_3;

pub const DEFAULT_X_OFFSET_PT: f64 = 50.0;
pub const DEFAULT_Y_OFFSET_PT: f64 = 25.0;

/// Visible extent of the annotation, centered on every page
pub const DEFAULT_TRIM_WIDTH_PT: f32 = 600.0;
pub const DEFAULT_TRIM_HEIGHT_PT: f32 = 600.0;

/// Drawing surface of the appearance stream
pub const DEFAULT_FORM_WIDTH_PT: f32 = 300.0;
pub const DEFAULT_FORM_HEIGHT_PT: f32 = 300.0;

// =============================================================================
// Rendering
// =============================================================================

/// Neutral grey fill, 128/255 on each RGB channel
pub const WATERMARK_GREY: f32 = 128.0 / 255.0;

/// Annotation flag bit 3: print the annotation when the page is printed
pub const ANNOTATION_FLAG_PRINT: i64 = 4;

/// Resource names inside the appearance stream
pub const FONT_RESOURCE_NAME: &str = "F1";
pub const EXT_GSTATE_RESOURCE_NAME: &str = "GS1";
