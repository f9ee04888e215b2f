use crate::constants::*;
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters describing how the stamp is drawn on every page
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WatermarkSpec {
    // Text
    pub text: String,
    pub font: StandardFont,
    pub font_size_pt: f32,
    pub fill_opacity: f32,

    // Text matrix: translate by the offset, then rotate
    pub angle_rad: f64,
    pub x_offset_pt: f64,
    pub y_offset_pt: f64,

    // Visible extent, centered on the page
    pub trim_width_pt: f32,
    pub trim_height_pt: f32,

    // Drawing surface of the appearance stream
    pub form: Rect,
}

impl Default for WatermarkSpec {
    fn default() -> Self {
        Self {
            text: DEFAULT_WATERMARK_TEXT.to_string(),
            font: StandardFont::Courier,
            font_size_pt: DEFAULT_FONT_SIZE_PT,
            fill_opacity: DEFAULT_FILL_OPACITY,
            angle_rad: DEFAULT_ROTATION_RAD,
            x_offset_pt: DEFAULT_X_OFFSET_PT,
            y_offset_pt: DEFAULT_Y_OFFSET_PT,
            trim_width_pt: DEFAULT_TRIM_WIDTH_PT,
            trim_height_pt: DEFAULT_TRIM_HEIGHT_PT,
            form: Rect::sized(DEFAULT_FORM_WIDTH_PT, DEFAULT_FORM_HEIGHT_PT),
        }
    }
}

impl WatermarkSpec {
    /// Default stamp with different text
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Load a spec from a JSON file. Missing fields take their defaults.
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let spec = serde_json::from_slice(&bytes)
            .map_err(|e| WatermarkError::Config(format!("Failed to parse spec: {}", e)))?;
        Ok(spec)
    }

    /// Save the spec to a JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| WatermarkError::Config(format!("Failed to serialize spec: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the spec. Any failure here is a configuration error for the
    /// whole batch, never a per-document failure.
    pub fn validate(&self) -> Result<()> {
        if self.text.trim().is_empty() {
            return Err(WatermarkError::Config(
                "Watermark text must not be empty".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.fill_opacity) {
            return Err(WatermarkError::Config(format!(
                "Fill opacity must be between 0 and 1, got {}",
                self.fill_opacity
            )));
        }

        if !(self.font_size_pt.is_finite() && self.font_size_pt > 0.0) {
            return Err(WatermarkError::Config(format!(
                "Font size must be positive, got {}",
                self.font_size_pt
            )));
        }

        if !(self.angle_rad.is_finite() && self.x_offset_pt.is_finite() && self.y_offset_pt.is_finite())
        {
            return Err(WatermarkError::Config(
                "Rotation angle and offsets must be finite".to_string(),
            ));
        }

        check_extent("Trimming rectangle", self.trim_width_pt, self.trim_height_pt)?;
        check_extent("Form rectangle", self.form.width, self.form.height)?;
        if !(self.form.x.is_finite() && self.form.y.is_finite()) {
            return Err(WatermarkError::Config(
                "Form rectangle offset must be finite".to_string(),
            ));
        }

        Ok(())
    }
}

fn check_extent(what: &str, width: f32, height: f32) -> Result<()> {
    let valid = |v: f32| v.is_finite() && v > 0.0;
    if valid(width) && valid(height) {
        Ok(())
    } else {
        Err(WatermarkError::Config(format!(
            "{} must have a positive size, got {} x {}",
            what, width, height
        )))
    }
}
