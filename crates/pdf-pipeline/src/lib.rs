mod config;
pub mod convert;
pub mod layout;
mod pipeline;
pub mod progress;
pub mod select;
mod types;

pub use config::PipelineConfig;
pub use convert::{
    ColorMode, GhostscriptConfig, GhostscriptRasterizer, OutputTarget, Rasterizer, desaturate,
};
pub use layout::{StageDirectories, StageLayout};
pub use pipeline::{Pipeline, discover_files};
pub use progress::{NoopProgress, ProgressReporter};
pub use select::{Selection, choose_variant, select_smaller};
pub use types::*;
