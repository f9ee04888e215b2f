use pdf_watermark::WatermarkError;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Watermark error: {0}")]
    Watermark(#[from] WatermarkError),
    #[error("{stage} file '{}' does not exist (it is produced by the {stage} stage)", path.display())]
    MissingStageInput { stage: Stage, path: PathBuf },
    #[error("Failed to start rasterizer '{}': {source}", program.display())]
    EngineSpawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Rasterizer failed on '{}' (exit code {}): {stderr}", input.display(), exit_code_label(*code))]
    EngineFailed {
        input: PathBuf,
        code: Option<i32>,
        stderr: String,
    },
    #[error("Rasterizer timed out after {}s on '{}'", timeout.as_secs(), input.display())]
    EngineTimeout { input: PathBuf, timeout: Duration },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Run stopped after first failure: {0}")]
    Halted(#[source] Box<FileFailure>),
}

pub type Result<T> = std::result::Result<T, PipelineError>;

fn exit_code_label(code: Option<i32>) -> String {
    code.map_or_else(|| "unknown".to_string(), |c| c.to_string())
}

/// The three pipeline stages, each owning one subdirectory of the
/// destination root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Watermarked,
    Greyscale,
    Finished,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Watermarked, Stage::Greyscale, Stage::Finished];

    /// Subdirectory name under the destination root
    pub fn dir_name(self) -> &'static str {
        match self {
            Stage::Watermarked => "1_Watermarked",
            Stage::Greyscale => "2_Greyscale",
            Stage::Finished => "3_Finished",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Stage::Watermarked => 0,
            Stage::Greyscale => 1,
            Stage::Finished => 2,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Watermarked => "Watermarked",
            Stage::Greyscale => "Greyscale",
            Stage::Finished => "Finished",
        };
        f.write_str(name)
    }
}

/// Progress of one document through the pipeline. Transitions only move
/// forward; `Failed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentState {
    Pending,
    Watermarked,
    Greyscaled,
    Finished,
    Failed,
}

impl DocumentState {
    /// The stage that runs next from this state
    pub fn next_stage(self) -> Option<Stage> {
        match self {
            DocumentState::Pending => Some(Stage::Watermarked),
            DocumentState::Watermarked => Some(Stage::Greyscale),
            DocumentState::Greyscaled => Some(Stage::Finished),
            DocumentState::Finished | DocumentState::Failed => None,
        }
    }
}

/// Which rendition ended up in the Finished directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Watermarked,
    Greyscale,
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Watermarked => f.write_str("watermarked"),
            Variant::Greyscale => f.write_str("greyscale"),
        }
    }
}

/// Outcome of a document that went through all three stages
#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    pub name: String,
    pub pages_stamped: usize,
    pub watermarked_bytes: u64,
    pub greyscale_bytes: u64,
    pub chosen: Variant,
    pub finished_path: PathBuf,
}

impl FileReport {
    pub fn finished_bytes(&self) -> u64 {
        match self.chosen {
            Variant::Watermarked => self.watermarked_bytes,
            Variant::Greyscale => self.greyscale_bytes,
        }
    }
}

/// A document that stopped in `stage`
#[derive(Error, Debug)]
#[error("{name}: {stage} stage failed: {error}")]
pub struct FileFailure {
    pub name: String,
    pub stage: Stage,
    /// Last state the document reached before failing
    pub reached: DocumentState,
    #[source]
    pub error: PipelineError,
}

pub type FileOutcome = std::result::Result<FileReport, FileFailure>;

/// Aggregate result of one batch invocation
#[derive(Debug)]
pub struct RunSummary {
    /// Files discovered in the source directory
    pub total_files: usize,
    /// Outcomes in file-name order. Shorter than `total_files` when a
    /// fail-fast run stopped early.
    pub outcomes: Vec<FileOutcome>,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_err()).count()
    }

    /// Files never attempted
    pub fn skipped(&self) -> usize {
        self.total_files - self.outcomes.len()
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileFailure> {
        self.outcomes.iter().filter_map(|o| o.as_ref().err())
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0 && self.skipped() == 0
    }
}
