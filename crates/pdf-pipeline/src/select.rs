//! Variant selection: keep whichever rendition is smaller on disk

use crate::layout::require_stage_input;
use crate::types::*;
use std::path::{Path, PathBuf};

/// The compared renditions of one document
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub watermarked: PathBuf,
    pub greyscale: PathBuf,
    pub watermarked_bytes: u64,
    pub greyscale_bytes: u64,
    pub chosen: Variant,
}

impl Selection {
    pub fn chosen_path(&self) -> &Path {
        match self.chosen {
            Variant::Watermarked => &self.watermarked,
            Variant::Greyscale => &self.greyscale,
        }
    }
}

/// Strictly smaller wins. On equal sizes the watermarked rendition wins,
/// since it keeps the original colors.
pub fn choose_variant(watermarked_bytes: u64, greyscale_bytes: u64) -> Variant {
    if greyscale_bytes < watermarked_bytes {
        Variant::Greyscale
    } else {
        Variant::Watermarked
    }
}

/// Check both renditions exist and decide which one to keep. The
/// watermarked input is checked first.
pub async fn compare_variants(watermarked: &Path, greyscale: &Path) -> Result<Selection> {
    let watermarked_bytes = require_stage_input(Stage::Watermarked, watermarked).await?;
    let greyscale_bytes = require_stage_input(Stage::Greyscale, greyscale).await?;

    Ok(Selection {
        watermarked: watermarked.to_owned(),
        greyscale: greyscale.to_owned(),
        watermarked_bytes,
        greyscale_bytes,
        chosen: choose_variant(watermarked_bytes, greyscale_bytes),
    })
}

/// Copy the chosen rendition to `destination`, overwriting it
pub async fn copy_selection(selection: &Selection, destination: &Path) -> Result<u64> {
    Ok(tokio::fs::copy(selection.chosen_path(), destination).await?)
}

/// Compare and copy in one step. The parent of `destination` must exist.
pub async fn select_smaller(
    watermarked: &Path,
    greyscale: &Path,
    destination: &Path,
) -> Result<Selection> {
    let selection = compare_variants(watermarked, greyscale).await?;
    copy_selection(&selection, destination).await?;
    Ok(selection)
}
