use crate::types::*;
use pdf_watermark::WatermarkSpec;
use std::path::PathBuf;

/// Resolved configuration of one batch invocation
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub source_dir: PathBuf,
    pub destination_dir: PathBuf,
    pub watermark: WatermarkSpec,

    /// Log per-stage sizes and engine details at info level
    pub verbose: bool,

    /// Files processed concurrently; 1 processes them one at a time
    pub jobs: usize,

    /// Stop scheduling files after the first failure
    pub fail_fast: bool,
}

impl PipelineConfig {
    pub fn new(
        source_dir: impl Into<PathBuf>,
        destination_dir: impl Into<PathBuf>,
        watermark: WatermarkSpec,
    ) -> Self {
        Self {
            source_dir: source_dir.into(),
            destination_dir: destination_dir.into(),
            watermark,
            verbose: false,
            jobs: 1,
            fail_fast: false,
        }
    }

    /// Validate before any file is touched. Every error here aborts the
    /// whole batch.
    pub fn validate(&self) -> Result<()> {
        if !self.source_dir.is_dir() {
            return Err(PipelineError::Config(format!(
                "Source directory '{}' does not exist",
                self.source_dir.display()
            )));
        }

        if !self.destination_dir.is_dir() {
            return Err(PipelineError::Config(format!(
                "Destination directory '{}' does not exist",
                self.destination_dir.display()
            )));
        }

        if self.jobs == 0 {
            return Err(PipelineError::Config(
                "At least one job is required".to_string(),
            ));
        }

        self.watermark
            .validate()
            .map_err(|e| PipelineError::Config(e.to_string()))
    }
}
