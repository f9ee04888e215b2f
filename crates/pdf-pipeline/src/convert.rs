//! Greyscale conversion through an external rasterization engine
//!
//! The engine is reached through the [`Rasterizer`] capability so the
//! pipeline can run against Ghostscript in production and against a
//! deterministic fake in tests.

use crate::layout::{StageDirectories, require_stage_input};
use crate::types::*;
use std::ffi::OsString;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Default upper bound for one engine invocation
pub const DEFAULT_ENGINE_TIMEOUT: Duration = Duration::from_secs(300);

/// Target color model of the converted document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    #[default]
    Gray,
    Rgb,
    Cmyk,
}

impl ColorMode {
    /// `-sProcessColorModel` value
    pub fn process_color_model(self) -> &'static str {
        match self {
            ColorMode::Gray => "DeviceGray",
            ColorMode::Rgb => "DeviceRGB",
            ColorMode::Cmyk => "DeviceCMYK",
        }
    }

    /// `-sColorConversionStrategy` value
    pub fn conversion_strategy(self) -> &'static str {
        match self {
            ColorMode::Gray => "Gray",
            ColorMode::Rgb => "RGB",
            ColorMode::Cmyk => "CMYK",
        }
    }
}

/// Single-file-in, single-file-out document conversion
pub trait Rasterizer: Send + Sync {
    /// Convert `input` into a new document at `output`. Implementations must
    /// not touch `input` and must write nothing but `output`.
    fn rasterize(
        &self,
        input: &Path,
        output: &Path,
        mode: ColorMode,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// Where Ghostscript writes the converted document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputTarget {
    /// Stream through the child's own stdout, then write the bytes out
    #[default]
    Pipe,
    /// Let Ghostscript write the output path itself
    File,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GhostscriptConfig {
    pub program: PathBuf,
    /// `None` waits forever
    pub timeout: Option<Duration>,
    pub output: OutputTarget,
}

impl Default for GhostscriptConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from(default_program()),
            timeout: Some(DEFAULT_ENGINE_TIMEOUT),
            output: OutputTarget::Pipe,
        }
    }
}

/// Name of the console Ghostscript executable on this platform
pub fn default_program() -> &'static str {
    if cfg!(windows) { "gswin64c" } else { "gs" }
}

/// Ghostscript `pdfwrite` adapter
#[derive(Debug, Clone, Default)]
pub struct GhostscriptRasterizer {
    config: GhostscriptConfig,
}

impl GhostscriptRasterizer {
    pub fn new(config: GhostscriptConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GhostscriptConfig {
        &self.config
    }

    /// Command-line switches for one conversion. The input file is always
    /// the last argument.
    pub fn arguments(&self, input: &Path, output: &Path, mode: ColorMode) -> Vec<OsString> {
        let mut args: Vec<OsString> = [
            "-dQUIET",
            "-dSAFER",
            "-dBATCH",
            "-dNOPAUSE",
            "-dNOPROMPT",
        ]
        .iter()
        .map(OsString::from)
        .collect();

        args.push(format!("-sProcessColorModel={}", mode.process_color_model()).into());
        args.push(format!("-sColorConversionStrategy={}", mode.conversion_strategy()).into());
        args.push("-dOverrideICC".into());
        args.push("-sDEVICE=pdfwrite".into());

        let mut output_arg = OsString::from("-sOutputFile=");
        match self.config.output {
            OutputTarget::Pipe => output_arg.push("-"),
            OutputTarget::File => output_arg.push(output.as_os_str()),
        }
        args.push(output_arg);

        args.push("-q".into());
        args.push("-f".into());
        args.push(input.as_os_str().to_owned());
        args
    }
}

impl Rasterizer for GhostscriptRasterizer {
    async fn rasterize(&self, input: &Path, output: &Path, mode: ColorMode) -> Result<()> {
        let args = self.arguments(input, output, mode);
        log::debug!(
            "Running {} {}",
            self.config.program.display(),
            args.iter()
                .map(|a| a.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );

        let child = Command::new(&self.config.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| PipelineError::EngineSpawn {
                program: self.config.program.clone(),
                source,
            })?;

        // Dropping the wait future on timeout drops the child, which kills it
        let result = match self.config.timeout {
            Some(timeout) => tokio::time::timeout(timeout, child.wait_with_output())
                .await
                .map_err(|_| PipelineError::EngineTimeout {
                    input: input.to_owned(),
                    timeout,
                })??,
            None => child.wait_with_output().await?,
        };

        if !result.status.success() {
            return Err(PipelineError::EngineFailed {
                input: input.to_owned(),
                code: result.status.code(),
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }

        match self.config.output {
            OutputTarget::Pipe => {
                if result.stdout.is_empty() {
                    return Err(PipelineError::EngineFailed {
                        input: input.to_owned(),
                        code: result.status.code(),
                        stderr: "no document data on stdout".to_string(),
                    });
                }
                tokio::fs::write(output, &result.stdout).await?;
            }
            OutputTarget::File => {
                if tokio::fs::metadata(output).await.is_err() {
                    return Err(PipelineError::EngineFailed {
                        input: input.to_owned(),
                        code: result.status.code(),
                        stderr: format!("no output written to '{}'", output.display()),
                    });
                }
            }
        }

        Ok(())
    }
}

/// Greyscale stage for one document name.
///
/// Requires the Watermarked rendition; the engine is never invoked without
/// it. Returns the path of the greyscale rendition.
pub async fn desaturate<R: Rasterizer>(
    dirs: &StageDirectories,
    rasterizer: &R,
    name: &str,
) -> Result<PathBuf> {
    let input = dirs.layout().path_for(Stage::Watermarked, name);
    require_stage_input(Stage::Watermarked, &input).await?;

    let output = dirs.ensure(Stage::Greyscale).await?.join(name);
    rasterizer.rasterize(&input, &output, ColorMode::Gray).await?;
    Ok(output)
}
