//! Progress callbacks for batch runs
//!
//! The pipeline reports through [`ProgressReporter`] and knows nothing about
//! how the host renders progress. Methods default to no-ops so implementors
//! only override what they need. With more than one job, calls for
//! different files may interleave.

use crate::types::{FileFailure, FileReport, RunSummary};

pub trait ProgressReporter: Send + Sync {
    /// Called once, after the source directory has been listed
    fn on_run_start(&self, total_files: usize) {
        let _ = total_files;
    }

    /// `index` is 1-based in file-name order
    fn on_file_start(&self, index: usize, total_files: usize, name: &str) {
        let _ = (index, total_files, name);
    }

    fn on_file_complete(&self, index: usize, total_files: usize, report: &FileReport) {
        let _ = (index, total_files, report);
    }

    fn on_file_error(&self, index: usize, total_files: usize, failure: &FileFailure) {
        let _ = (index, total_files, failure);
    }

    fn on_run_complete(&self, summary: &RunSummary) {
        let _ = summary;
    }
}

/// Reporter that ignores every event
pub struct NoopProgress;

impl ProgressReporter for NoopProgress {}
