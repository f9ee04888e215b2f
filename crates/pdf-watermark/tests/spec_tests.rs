use pdf_watermark::*;

#[test]
fn test_default_spec() {
    let spec = WatermarkSpec::default();
    assert_eq!(spec.text, "COPY");
    assert_eq!(spec.font, StandardFont::Courier);
    assert_eq!(spec.font_size_pt, 119.0);
    assert_eq!(spec.fill_opacity, 0.6);
    assert_eq!(spec.x_offset_pt, 50.0);
    assert_eq!(spec.y_offset_pt, 25.0);
    assert_eq!(spec.trim_width_pt, 600.0);
    assert_eq!(spec.trim_height_pt, 600.0);
    assert_eq!(spec.form, Rect::new(0.0, 0.0, 300.0, 300.0));
    assert!(spec.validate().is_ok());
}

#[test]
fn test_validation_empty_text() {
    for text in ["", "   "] {
        let spec = WatermarkSpec::with_text(text);
        match spec.validate() {
            Err(WatermarkError::Config(msg)) => assert!(msg.contains("text")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }
}

#[test]
fn test_validation_opacity_range() {
    let mut spec = WatermarkSpec::default();

    spec.fill_opacity = 0.0;
    assert!(spec.validate().is_ok());
    spec.fill_opacity = 1.0;
    assert!(spec.validate().is_ok());

    spec.fill_opacity = 1.5;
    assert!(spec.validate().is_err());
    spec.fill_opacity = -0.1;
    assert!(spec.validate().is_err());
    spec.fill_opacity = f32::NAN;
    assert!(spec.validate().is_err());
}

#[test]
fn test_validation_rectangles() {
    let mut spec = WatermarkSpec::default();
    spec.trim_width_pt = 0.0;
    assert!(spec.validate().is_err());

    let mut spec = WatermarkSpec::default();
    spec.form = Rect::new(0.0, 0.0, 300.0, -1.0);
    assert!(spec.validate().is_err());

    let mut spec = WatermarkSpec::default();
    spec.font_size_pt = 0.0;
    assert!(spec.validate().is_err());

    let mut spec = WatermarkSpec::default();
    spec.angle_rad = f64::INFINITY;
    assert!(spec.validate().is_err());
}

#[test]
fn test_standard_font_names() {
    assert_eq!(StandardFont::Courier.base_font(), "Courier");
    assert_eq!(StandardFont::HelveticaBold.base_font(), "Helvetica-Bold");
    assert_eq!(StandardFont::TimesRoman.base_font(), "Times-Roman");
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_save_and_load_spec() {
    use tempfile::NamedTempFile;

    let mut spec = WatermarkSpec::with_text("CONFIDENTIAL");
    spec.font = StandardFont::HelveticaBold;
    spec.fill_opacity = 0.25;
    spec.form = Rect::new(10.0, 10.0, 200.0, 150.0);

    let temp_file = NamedTempFile::new().unwrap();
    let path = temp_file.path();

    spec.save(path).await.unwrap();
    let loaded = WatermarkSpec::load(path).await.unwrap();

    assert_eq!(loaded, spec);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_partial_spec_uses_defaults() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    std::fs::write(temp_file.path(), r#"{ "text": "DRAFT", "fill_opacity": 0.3 }"#).unwrap();

    let loaded = WatermarkSpec::load(temp_file.path()).await.unwrap();
    assert_eq!(loaded.text, "DRAFT");
    assert_eq!(loaded.fill_opacity, 0.3);
    assert_eq!(loaded.font_size_pt, 119.0);
    assert_eq!(loaded.trim_width_pt, 600.0);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_invalid_json() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    std::fs::write(temp_file.path(), "not json").unwrap();

    match WatermarkSpec::load(temp_file.path()).await {
        Err(WatermarkError::Config(msg)) => assert!(msg.contains("Failed to parse spec")),
        other => panic!("Expected Config error, got {:?}", other),
    }
}
