use pdf_watermark::*;
use std::f64::consts::FRAC_PI_3;

const EPSILON: f64 = 1e-12;

fn assert_matrix_eq(actual: [f64; 6], expected: [f64; 6]) {
    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert!(
            (a - e).abs() < EPSILON,
            "element {} differs: {} vs {} (full: {:?})",
            i,
            a,
            e,
            actual
        );
    }
}

#[test]
fn test_trim_rect_is_centered() {
    let sizes = [(612.0, 792.0), (595.0, 842.0), (842.0, 595.0), (600.0, 600.0)];
    let trims = [(600.0, 600.0), (100.0, 50.0), (0.5, 0.25)];

    for &(w, h) in &sizes {
        for &(tw, th) in &trims {
            let rect = centered_trim_rect(PageSize { width: w, height: h }, tw, th);
            assert_eq!(rect.x, w / 2.0 - tw / 2.0);
            assert_eq!(rect.y, h / 2.0 - th / 2.0);
            assert_eq!(rect.width, tw);
            assert_eq!(rect.height, th);
        }
    }
}

#[test]
fn test_trim_rect_ignores_form_offset() {
    let page = PageSize {
        width: 612.0,
        height: 792.0,
    };
    let mut spec = WatermarkSpec::default();
    let baseline = trim_rect_for_page(&spec, page);

    spec.form = Rect::new(40.0, -15.0, 300.0, 300.0);
    assert_eq!(trim_rect_for_page(&spec, page), baseline);
    assert_eq!(baseline, Rect::new(6.0, 96.0, 600.0, 600.0));
}

#[test]
fn test_translate_then_rotate_matrix() {
    let mut spec = WatermarkSpec::default();
    spec.x_offset_pt = 50.0;
    spec.y_offset_pt = 25.0;
    spec.angle_rad = FRAC_PI_3;

    let (sin, cos) = FRAC_PI_3.sin_cos();
    assert_matrix_eq(text_matrix(&spec), [cos, sin, -sin, cos, 50.0, 25.0]);
    assert_matrix_eq(
        text_matrix(&spec),
        [0.5, 0.8660254037844386, -0.8660254037844386, 0.5, 50.0, 25.0],
    );
}

#[test]
fn test_rotate_then_translate_differs() {
    let mut translate_first = AffineTransform::identity();
    translate_first.translate(50.0, 25.0).rotate(FRAC_PI_3);

    let mut rotate_first = AffineTransform::identity();
    rotate_first.rotate(FRAC_PI_3).translate(50.0, 25.0);

    assert_ne!(translate_first.matrix(), rotate_first.matrix());

    // Rotating first moves the translation into the rotated frame
    let (sin, cos) = FRAC_PI_3.sin_cos();
    assert_matrix_eq(
        rotate_first.matrix(),
        [cos, sin, -sin, cos, 50.0 * cos - 25.0 * sin, 50.0 * sin + 25.0 * cos],
    );
}

#[test]
fn test_matrix_is_bit_reproducible() {
    let spec = WatermarkSpec::default();
    let page = PageSize {
        width: 612.0,
        height: 792.0,
    };

    let first = text_matrix(&spec);
    let first_rect = trim_rect_for_page(&spec, page);
    for _ in 0..100 {
        let again = text_matrix(&spec);
        for (a, b) in first.iter().zip(again.iter()) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
        let rect = trim_rect_for_page(&spec, page);
        assert_eq!(rect.x.to_bits(), first_rect.x.to_bits());
        assert_eq!(rect.y.to_bits(), first_rect.y.to_bits());
    }
}

#[test]
fn test_identity_and_apply() {
    let identity = AffineTransform::identity();
    assert_eq!(identity.matrix(), [1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
    assert_eq!(identity.apply(3.0, 4.0), (3.0, 4.0));

    let mut transform = AffineTransform::identity();
    transform.translate(10.0, 20.0);
    assert_eq!(transform.apply(1.0, 1.0), (11.0, 21.0));
}

#[test]
fn test_zero_angle_keeps_offset_only() {
    let mut spec = WatermarkSpec::default();
    spec.angle_rad = 0.0;
    assert_eq!(text_matrix(&spec), [1.0, 0.0, -0.0, 1.0, 50.0, 25.0]);
}
