//! Stage directory layout under the destination root
//!
//! Every stage writes `<root>/<stage dir>/<name>` where `<name>` is the
//! source file name, so the three renditions of a document always share
//! one name.

use crate::types::{PipelineError, Result, Stage};
use std::path::{Path, PathBuf};
use tokio::sync::OnceCell;

/// Pure path arithmetic for the stage directories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageLayout {
    root: PathBuf,
}

impl StageLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn dir(&self, stage: Stage) -> PathBuf {
        self.root.join(stage.dir_name())
    }

    pub fn path_for(&self, stage: Stage, name: &str) -> PathBuf {
        self.dir(stage).join(name)
    }
}

/// Stage directories created on first use.
///
/// Each directory is created at most once per run. Concurrent first users
/// wait on the same initialisation, and an already existing directory is
/// accepted as is.
#[derive(Debug)]
pub struct StageDirectories {
    layout: StageLayout,
    created: [OnceCell<()>; 3],
}

impl StageDirectories {
    pub fn new(layout: StageLayout) -> Self {
        Self {
            layout,
            created: [OnceCell::new(), OnceCell::new(), OnceCell::new()],
        }
    }

    pub fn layout(&self) -> &StageLayout {
        &self.layout
    }

    /// Make sure the stage directory exists and return its path
    pub async fn ensure(&self, stage: Stage) -> Result<PathBuf> {
        let dir = self.layout.dir(stage);
        self.created[stage.index()]
            .get_or_try_init(|| async {
                tokio::fs::create_dir_all(&dir).await?;
                log::debug!("Created stage directory {}", dir.display());
                Ok::<_, PipelineError>(())
            })
            .await?;
        Ok(dir)
    }

    /// Whether `ensure` already ran successfully for the stage
    pub fn is_created(&self, stage: Stage) -> bool {
        self.created[stage.index()].initialized()
    }
}

/// Size of a stage input, or a precondition error naming the missing path
pub(crate) async fn require_stage_input(stage: Stage, path: &Path) -> Result<u64> {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_file() => Ok(meta.len()),
        Ok(_) => Err(PipelineError::MissingStageInput {
            stage,
            path: path.to_owned(),
        }),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            Err(PipelineError::MissingStageInput {
                stage,
                path: path.to_owned(),
            })
        }
        Err(err) => Err(err.into()),
    }
}
