//! Batch orchestration
//!
//! Each document moves `Pending -> Watermarked -> Greyscaled -> Finished`,
//! or stops in `Failed`. Documents are independent: stage paths are keyed by
//! file name only, so a failed document never touches another's outputs.

use crate::config::PipelineConfig;
use crate::convert::{Rasterizer, desaturate};
use crate::layout::{StageDirectories, StageLayout};
use crate::progress::ProgressReporter;
use crate::select::{Selection, compare_variants, copy_selection};
use crate::types::*;
use futures::StreamExt;
use log::{debug, error, info, warn};
use pdf_watermark::{StampStatistics, stamp_file};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

pub struct Pipeline<R> {
    config: PipelineConfig,
    dirs: StageDirectories,
    rasterizer: R,
}

impl<R: Rasterizer> Pipeline<R> {
    pub fn new(config: PipelineConfig, rasterizer: R) -> Self {
        let dirs = StageDirectories::new(StageLayout::new(&config.destination_dir));
        Self {
            config,
            dirs,
            rasterizer,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn layout(&self) -> &StageLayout {
        self.dirs.layout()
    }

    /// Run every file in the source directory through the three stages.
    ///
    /// Configuration and directory-listing problems return `Err`. Otherwise
    /// per-file failures are collected in the summary, except with
    /// `fail_fast`: no new file is started after the first failure, files
    /// already in flight run to completion, and the first failure in
    /// file-name order is returned as [`PipelineError::Halted`].
    pub async fn run(&self, progress: &dyn ProgressReporter) -> Result<RunSummary> {
        if let Err(err) = self.config.validate() {
            error!("{}", err);
            return Err(err);
        }

        let files = list_source_files(&self.config.source_dir).await?;
        let total = files.len();
        info!(
            "Found {} file(s) in '{}'",
            total,
            self.config.source_dir.display()
        );
        progress.on_run_start(total);

        let started = Instant::now();
        let halted = AtomicBool::new(false);
        let halted = &halted;
        let mut outcomes: Vec<(usize, FileOutcome)> = Vec::with_capacity(total);

        let mut results = futures::stream::iter(files.iter().enumerate())
            .map(|(index, name)| async move {
                if halted.load(Ordering::SeqCst) {
                    return (index, None);
                }
                progress.on_file_start(index + 1, total, name);
                (index, Some(self.process_file(name).await))
            })
            .buffer_unordered(self.config.jobs.max(1));

        // Drained to the end so no in-flight file is cancelled mid-write
        while let Some((index, outcome)) = results.next().await {
            let Some(outcome) = outcome else {
                continue;
            };
            match &outcome {
                Ok(report) => progress.on_file_complete(index + 1, total, report),
                Err(failure) => progress.on_file_error(index + 1, total, failure),
            }

            if outcome.is_err() && self.config.fail_fast && !halted.swap(true, Ordering::SeqCst) {
                warn!("Stopping after first failure; files not yet started are skipped");
            }
            outcomes.push((index, outcome));
        }

        outcomes.sort_by_key(|(index, _)| *index);
        let mut summary = RunSummary {
            total_files: total,
            outcomes: outcomes.into_iter().map(|(_, outcome)| outcome).collect(),
            elapsed: started.elapsed(),
        };

        info!(
            "Finished {} of {} file(s), {} failed, {} skipped in {:.1?}",
            summary.succeeded(),
            total,
            summary.failed(),
            summary.skipped(),
            summary.elapsed
        );
        progress.on_run_complete(&summary);

        if self.config.fail_fast {
            if let Some(first) = summary.outcomes.iter().position(std::result::Result::is_err) {
                if let Err(failure) = summary.outcomes.swap_remove(first) {
                    return Err(PipelineError::Halted(Box::new(failure)));
                }
            }
        }
        Ok(summary)
    }

    /// Run one file from the source directory through all three stages.
    ///
    /// The failure is logged before it is returned.
    pub async fn process_file(&self, name: &str) -> FileOutcome {
        info!("Processing {}", name);
        let mut state = DocumentState::Pending;

        match self.advance(name, &mut state).await {
            Ok(report) => Ok(report),
            Err(error) => {
                let stage = state.next_stage().unwrap_or(Stage::Finished);
                let failure = FileFailure {
                    name: name.to_string(),
                    stage,
                    reached: state,
                    error,
                };
                error!("{}", failure);
                Err(failure)
            }
        }
    }

    async fn advance(&self, name: &str, state: &mut DocumentState) -> Result<FileReport> {
        let stats = self.watermark(name).await?;
        *state = DocumentState::Watermarked;

        self.greyscale(name).await?;
        *state = DocumentState::Greyscaled;

        let selection = self.finish(name).await?;
        *state = DocumentState::Finished;

        Ok(FileReport {
            name: name.to_string(),
            pages_stamped: stats.pages_stamped,
            watermarked_bytes: selection.watermarked_bytes,
            greyscale_bytes: selection.greyscale_bytes,
            chosen: selection.chosen,
            finished_path: self.layout().path_for(Stage::Finished, name),
        })
    }

    /// Stage 1: stamp `<source>/<name>` into the Watermarked directory
    pub async fn watermark(&self, name: &str) -> Result<StampStatistics> {
        info!("Watermarking {}", name);
        let source = self.config.source_dir.join(name);
        let destination = self.dirs.ensure(Stage::Watermarked).await?.join(name);

        let stats = stamp_file(&source, &destination, &self.config.watermark).await?;
        self.detail(format_args!(
            "{}: stamped {} page(s) -> {}",
            name,
            stats.pages_stamped,
            destination.display()
        ));
        Ok(stats)
    }

    /// Stage 2: greyscale rendition of the watermarked document
    pub async fn greyscale(&self, name: &str) -> Result<PathBuf> {
        info!("Removing color from {}", name);
        let output = desaturate(&self.dirs, &self.rasterizer, name).await?;
        self.detail(format_args!("{}: greyscale -> {}", name, output.display()));
        Ok(output)
    }

    /// Stage 3: copy the smaller rendition into the Finished directory
    pub async fn finish(&self, name: &str) -> Result<Selection> {
        info!("Copying {} to Finished", name);
        let layout = self.layout();
        let selection = compare_variants(
            &layout.path_for(Stage::Watermarked, name),
            &layout.path_for(Stage::Greyscale, name),
        )
        .await?;

        let destination = self.dirs.ensure(Stage::Finished).await?.join(name);
        copy_selection(&selection, &destination).await?;
        self.detail(format_args!(
            "{}: watermarked {} bytes, greyscale {} bytes, kept {}",
            name, selection.watermarked_bytes, selection.greyscale_bytes, selection.chosen
        ));
        Ok(selection)
    }

    fn detail(&self, message: std::fmt::Arguments<'_>) {
        if self.config.verbose {
            info!("{}", message);
        } else {
            debug!("{}", message);
        }
    }
}

async fn list_source_files(dir: &Path) -> Result<Vec<String>> {
    discover_files(dir)
        .await
        .inspect_err(|err| error!("Failed to list '{}': {}", dir.display(), err))
}

/// Files directly under `dir`, sorted by name. Symbolic links are followed;
/// subdirectories are not descended into. Every skipped entry is logged.
pub async fn discover_files(dir: &Path) -> Result<Vec<String>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut files = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => {}
            Ok(meta) if meta.is_dir() => {
                warn!("Skipping directory {}", path.display());
                continue;
            }
            Ok(_) => {
                warn!("Skipping {}: not a regular file", path.display());
                continue;
            }
            Err(err) => {
                warn!("Skipping {}: {}", path.display(), err);
                continue;
            }
        }
        match entry.file_name().into_string() {
            Ok(name) => files.push(name),
            Err(name) => warn!("Skipping file with non UTF-8 name: {:?}", name),
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, Log, Metadata, Record};
    use std::sync::Mutex;

    struct CaptureLogger(Mutex<Vec<(Level, String)>>);

    impl Log for CaptureLogger {
        fn enabled(&self, _metadata: &Metadata) -> bool {
            true
        }

        fn log(&self, record: &Record) {
            self.0
                .lock()
                .unwrap()
                .push((record.level(), record.args().to_string()));
        }

        fn flush(&self) {}
    }

    static CAPTURE: CaptureLogger = CaptureLogger(Mutex::new(Vec::new()));

    #[tokio::test]
    async fn listing_failure_is_logged_before_returning() {
        let _ = log::set_logger(&CAPTURE);
        log::set_max_level(log::LevelFilter::Trace);

        let dir = std::env::temp_dir().join(format!("empower-pdf-no-source-{}", std::process::id()));
        let result = list_source_files(&dir).await;

        assert!(matches!(result, Err(PipelineError::Io(_))));
        let records = CAPTURE.0.lock().unwrap();
        assert!(records.iter().any(|(level, message)| {
            *level == Level::Error && message.contains("Failed to list") && message.contains("empower-pdf-no-source")
        }));
    }
}
