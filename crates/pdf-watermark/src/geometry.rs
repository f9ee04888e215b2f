//! Placement geometry for the watermark
//!
//! Everything here is pure arithmetic on the spec and the page size, so the
//! same inputs always produce bit-identical rectangles and matrices.

use crate::spec::WatermarkSpec;
use crate::types::{PageSize, Rect};

/// 2-D affine transform stored as
///
/// ```text
/// [ m00 m01 m02 ]
/// [ m10 m11 m12 ]
/// [  0   0   1  ]
/// ```
///
/// `translate` and `rotate` concatenate on the right, so the operation called
/// last is the first one applied to a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    m00: f64,
    m10: f64,
    m01: f64,
    m11: f64,
    m02: f64,
    m12: f64,
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl AffineTransform {
    pub fn identity() -> Self {
        Self {
            m00: 1.0,
            m10: 0.0,
            m01: 0.0,
            m11: 1.0,
            m02: 0.0,
            m12: 0.0,
        }
    }

    pub fn translation(tx: f64, ty: f64) -> Self {
        Self {
            m02: tx,
            m12: ty,
            ..Self::identity()
        }
    }

    pub fn rotation(angle_rad: f64) -> Self {
        let (sin, cos) = angle_rad.sin_cos();
        Self {
            m00: cos,
            m10: sin,
            m01: -sin,
            m11: cos,
            m02: 0.0,
            m12: 0.0,
        }
    }

    /// `self = self × other`
    pub fn concatenate(&mut self, other: &AffineTransform) -> &mut Self {
        let m00 = self.m00 * other.m00 + self.m01 * other.m10;
        let m01 = self.m00 * other.m01 + self.m01 * other.m11;
        let m02 = self.m00 * other.m02 + self.m01 * other.m12 + self.m02;
        let m10 = self.m10 * other.m00 + self.m11 * other.m10;
        let m11 = self.m10 * other.m01 + self.m11 * other.m11;
        let m12 = self.m10 * other.m02 + self.m11 * other.m12 + self.m12;
        *self = Self {
            m00,
            m10,
            m01,
            m11,
            m02,
            m12,
        };
        self
    }

    pub fn translate(&mut self, tx: f64, ty: f64) -> &mut Self {
        self.concatenate(&Self::translation(tx, ty))
    }

    pub fn rotate(&mut self, angle_rad: f64) -> &mut Self {
        self.concatenate(&Self::rotation(angle_rad))
    }

    /// `[a b c d e f]` in PDF operand order (`m00 m10 m01 m11 m02 m12`)
    pub fn matrix(&self) -> [f64; 6] {
        [self.m00, self.m10, self.m01, self.m11, self.m02, self.m12]
    }

    /// Map a point through the transform
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.m00 * x + self.m01 * y + self.m02,
            self.m10 * x + self.m11 * y + self.m12,
        )
    }
}

/// Rectangle of the given size centered on the page.
///
/// Only the page's width and height take part: the lower-left corner is
/// `(W/2 - w/2, H/2 - h/2)` regardless of the form rectangle's offset.
pub fn centered_trim_rect(page: PageSize, trim_width: f32, trim_height: f32) -> Rect {
    Rect::new(
        page.width / 2.0 - trim_width / 2.0,
        page.height / 2.0 - trim_height / 2.0,
        trim_width,
        trim_height,
    )
}

/// Text matrix for the stamp: identity, translated by the offset, then rotated.
pub fn text_matrix(spec: &WatermarkSpec) -> [f64; 6] {
    let mut transform = AffineTransform::identity();
    transform
        .translate(spec.x_offset_pt, spec.y_offset_pt)
        .rotate(spec.angle_rad);
    transform.matrix()
}

/// Trimming rectangle of the stamp annotation on a page of the given size
pub fn trim_rect_for_page(spec: &WatermarkSpec, page: PageSize) -> Rect {
    centered_trim_rect(page, spec.trim_width_pt, spec.trim_height_pt)
}
