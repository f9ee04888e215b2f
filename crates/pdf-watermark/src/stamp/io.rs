//! Reading and writing stamped documents

use crate::types::*;
use lopdf::Document;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Parse a PDF file on the blocking pool
pub async fn load_pdf(path: impl AsRef<Path>) -> Result<Document> {
    let bytes = tokio::fs::read(path.as_ref()).await?;
    log::trace!("Read {} bytes from {}", bytes.len(), path.as_ref().display());
    let doc = tokio::task::spawn_blocking(move || Document::load_mem(&bytes)).await??;
    Ok(doc)
}

/// Serialize `doc` and move it into place at `path`.
///
/// The bytes go to a sibling `.partial` file first, so a failed save never
/// leaves a truncated document at `path`. An existing file is replaced.
pub async fn save_pdf(mut doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let bytes = tokio::task::spawn_blocking(move || {
        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)?;
        Ok::<_, WatermarkError>(buffer)
    })
    .await??;

    let staging = staging_path(path);
    if let Err(err) = tokio::fs::write(&staging, &bytes).await {
        let _ = tokio::fs::remove_file(&staging).await;
        return Err(err.into());
    }
    if let Err(err) = tokio::fs::rename(&staging, path).await {
        let _ = tokio::fs::remove_file(&staging).await;
        return Err(err.into());
    }
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("document"));
    name.push(".partial");
    path.with_file_name(name)
}
