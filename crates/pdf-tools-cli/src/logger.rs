use chrono::{DateTime, Local};
use indicatif::ProgressBar;
use log::{Level, LevelFilter, Metadata, Record};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

/// Log file written to the destination root of a batch run
pub const LOG_FILE_NAME: &str = "empower-pdf.log";

/// Writes `[HH:MM:SS LVL] message` lines to an optional log file.
///
/// With a log file only errors are mirrored to stderr. Without one every
/// enabled record goes to stderr. Terminal output is routed around the
/// progress bar so it does not tear the bar.
pub struct CliLogger {
    level: LevelFilter,
    file: Option<Mutex<File>>,
    bar: ProgressBar,
}

impl CliLogger {
    pub fn new(verbose: bool, bar: ProgressBar) -> Self {
        Self {
            level: if verbose {
                LevelFilter::Debug
            } else {
                LevelFilter::Info
            },
            file: None,
            bar,
        }
    }

    /// Append to `<dir>/empower-pdf.log`, creating it when missing
    pub fn with_log_file(mut self, dir: &Path) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join(LOG_FILE_NAME))?;
        self.file = Some(Mutex::new(file));
        Ok(self)
    }

    pub fn init(self) -> Result<(), log::SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }
}

fn level_label(level: Level) -> &'static str {
    match level {
        Level::Error => "ERR",
        Level::Warn => "WRN",
        Level::Info => "INF",
        Level::Debug => "DBG",
        Level::Trace => "VRB",
    }
}

pub fn format_line(timestamp: &DateTime<Local>, level: Level, message: &str) -> String {
    format!(
        "[{} {}] {}",
        timestamp.format("%H:%M:%S"),
        level_label(level),
        message
    )
}

impl log::Log for CliLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format_line(
            &Local::now(),
            record.level(),
            &format!("{}", record.args()),
        );

        match &self.file {
            Some(file) => {
                if let Ok(mut file) = file.lock() {
                    let _ = writeln!(file, "{}", line);
                }
                if record.level() == Level::Error {
                    self.bar.suspend(|| eprintln!("{}", line));
                }
            }
            None => self.bar.suspend(|| eprintln!("{}", line)),
        }
    }

    fn flush(&self) {
        if let Some(file) = &self.file {
            if let Ok(mut file) = file.lock() {
                let _ = file.flush();
            }
        }
    }
}
