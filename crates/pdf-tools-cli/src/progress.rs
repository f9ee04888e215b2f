//! Terminal progress for batch runs, rendered with indicatif

use indicatif::{ProgressBar, ProgressStyle};
use pdf_pipeline::{FileFailure, FileReport, ProgressReporter, RunSummary};
use std::time::Duration;

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

/// Progress bar plus one log line per file
pub struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    pub fn new(bar: ProgressBar) -> Self {
        Self { bar }
    }
}

/// Average time per finished file times the files left. `None` until the
/// first file has finished.
pub fn estimate_remaining(done: u64, total: u64, elapsed: Duration) -> Option<Duration> {
    if done == 0 || done > total {
        return None;
    }
    let per_file = elapsed.as_secs_f64() / done as f64;
    Some(Duration::from_secs_f64(per_file * (total - done) as f64))
}

pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
}

/// `Step:  3 of 12; Processing file: report.pdf.` with the step number
/// padded to the width of the total
pub fn step_line(index: usize, total: usize, name: &str) -> String {
    let width = total.to_string().len();
    format!("Step: {index:>width$} of {total}; Processing file: {name}.")
}

impl ProgressReporter for BarProgress {
    fn on_run_start(&self, total_files: usize) {
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  [{bar:42.green/238}] {pos:>3}/{len} files  \
             ⏱ {elapsed_precise}  ETA {eta_precise}  {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ");

        self.bar.set_length(total_files as u64);
        self.bar.set_style(style);
        self.bar.set_prefix("Processing");
        self.bar.enable_steady_tick(Duration::from_millis(120));
    }

    fn on_file_start(&self, index: usize, total_files: usize, name: &str) {
        let remaining = estimate_remaining(
            self.bar.position(),
            total_files as u64,
            self.bar.elapsed(),
        )
        .map_or_else(|| "unknown".to_string(), format_duration);

        log::info!(
            "{} Estimated time remaining: {}",
            step_line(index, total_files, name),
            remaining
        );
        self.bar.set_message(name.to_string());
    }

    fn on_file_complete(&self, index: usize, total_files: usize, report: &FileReport) {
        self.bar.println(format!(
            "  {} {:>3}/{:<3} {}  {}",
            green("✓"),
            index,
            total_files,
            report.name,
            dim(&format!(
                "kept {} ({} bytes, watermarked {} / greyscale {})",
                report.chosen,
                report.finished_bytes(),
                report.watermarked_bytes,
                report.greyscale_bytes
            )),
        ));
        self.bar.inc(1);
    }

    fn on_file_error(&self, index: usize, total_files: usize, failure: &FileFailure) {
        let error = failure.error.to_string();
        let msg = if error.chars().count() > 80 {
            format!("{}\u{2026}", error.chars().take(79).collect::<String>())
        } else {
            error
        };

        self.bar.println(format!(
            "  {} {:>3}/{:<3} {}  {}",
            red("✗"),
            index,
            total_files,
            failure.name,
            red(&format!("{} stage: {}", failure.stage, msg)),
        ));
        self.bar.inc(1);
    }

    fn on_run_complete(&self, summary: &RunSummary) {
        self.bar.finish_and_clear();

        if summary.is_success() {
            eprintln!(
                "{} {} file(s) processed in {}",
                green("✔"),
                bold(&summary.succeeded().to_string()),
                format_duration(summary.elapsed)
            );
        } else {
            eprintln!(
                "{} {}/{} file(s) processed  ({} failed, {} skipped)",
                red("✘"),
                bold(&summary.succeeded().to_string()),
                summary.total_files,
                red(&summary.failed().to_string()),
                summary.skipped()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_is_padded_to_total_width() {
        assert_eq!(
            step_line(3, 12, "report.pdf"),
            "Step:  3 of 12; Processing file: report.pdf."
        );
        assert_eq!(step_line(1, 1, "a.pdf"), "Step: 1 of 1; Processing file: a.pdf.");
    }

    #[test]
    fn remaining_time() {
        assert_eq!(estimate_remaining(0, 10, Duration::from_secs(5)), None);
        assert_eq!(
            estimate_remaining(2, 10, Duration::from_secs(10)),
            Some(Duration::from_secs(40))
        );
        assert_eq!(
            estimate_remaining(10, 10, Duration::from_secs(10)),
            Some(Duration::ZERO)
        );
    }

    #[test]
    fn duration_format() {
        assert_eq!(format_duration(Duration::from_secs(0)), "00:00:00");
        assert_eq!(format_duration(Duration::from_secs(3725)), "01:02:05");
    }
}
