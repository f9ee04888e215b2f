use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::{Args, Parser, Subcommand, ValueEnum};
use indicatif::ProgressBar;
use pdf_pipeline::{
    ColorMode, GhostscriptConfig, GhostscriptRasterizer, OutputTarget, Pipeline, PipelineConfig,
    Rasterizer,
};
use pdf_watermark::{StandardFont, WatermarkSpec};
use std::path::{Path, PathBuf};
use std::time::Duration;

mod logger;
mod progress;

use logger::CliLogger;
use progress::{BarProgress, format_duration};

#[derive(Parser)]
#[command(
    name = "empower-pdf",
    about = "Watermark and greyscale a folder of PDFs, keeping the smaller result",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process every file in a folder through all three stages
    Run(RunArgs),

    /// Stamp the watermark onto a single PDF
    Stamp {
        /// Input PDF file
        #[arg(short, long)]
        input: PathBuf,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        watermark: WatermarkArgs,
    },

    /// Produce a greyscale rendition of a single PDF with Ghostscript
    Greyscale {
        /// Input PDF file
        #[arg(short, long)]
        input: PathBuf,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Print the default watermark spec as JSON, or save it to a file
    Spec {
        /// Output JSON file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Folder holding the PDFs to process (not searched recursively)
    #[arg(short, long)]
    source: PathBuf,

    /// Existing folder that receives the stage folders and the log file
    #[arg(short, long)]
    destination: PathBuf,

    /// Log per-stage details
    #[arg(short, long)]
    verbose: bool,

    /// Files processed at the same time
    #[arg(long, default_value = "1")]
    jobs: usize,

    /// Stop after the first file that fails
    #[arg(long)]
    fail_fast: bool,

    #[command(flatten)]
    watermark: WatermarkArgs,

    #[command(flatten)]
    engine: EngineArgs,
}

#[derive(Args)]
struct WatermarkArgs {
    /// Watermark text [default: COPY]
    #[arg(short, long)]
    text: Option<String>,

    /// JSON watermark spec; --text and --font override its values
    #[arg(long)]
    spec: Option<PathBuf>,

    /// Standard PDF font for the watermark text
    #[arg(long, value_enum)]
    font: Option<FontArg>,
}

#[derive(Args)]
struct EngineArgs {
    /// Ghostscript executable [default: gs, or gswin64c on Windows]
    #[arg(long)]
    ghostscript: Option<PathBuf>,

    /// Seconds before a Ghostscript run is killed; 0 waits forever
    #[arg(long, default_value = "300")]
    timeout_secs: u64,

    /// How Ghostscript hands back the converted document
    #[arg(long, default_value = "pipe", value_enum)]
    output_mode: OutputModeArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum FontArg {
    Courier,
    CourierBold,
    Helvetica,
    HelveticaBold,
    TimesRoman,
    TimesBold,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputModeArg {
    Pipe,
    File,
}

impl From<FontArg> for StandardFont {
    fn from(arg: FontArg) -> Self {
        match arg {
            FontArg::Courier => Self::Courier,
            FontArg::CourierBold => Self::CourierBold,
            FontArg::Helvetica => Self::Helvetica,
            FontArg::HelveticaBold => Self::HelveticaBold,
            FontArg::TimesRoman => Self::TimesRoman,
            FontArg::TimesBold => Self::TimesBold,
        }
    }
}

impl From<OutputModeArg> for OutputTarget {
    fn from(arg: OutputModeArg) -> Self {
        match arg {
            OutputModeArg::Pipe => Self::Pipe,
            OutputModeArg::File => Self::File,
        }
    }
}

impl WatermarkArgs {
    async fn resolve(&self) -> Result<WatermarkSpec> {
        let mut spec = match &self.spec {
            Some(path) => WatermarkSpec::load(path)
                .await
                .with_context(|| format!("Failed to load watermark spec {}", path.display()))?,
            None => WatermarkSpec::default(),
        };
        if let Some(text) = &self.text {
            spec.text = text.clone();
        }
        if let Some(font) = self.font {
            spec.font = font.into();
        }
        Ok(spec)
    }
}

impl EngineArgs {
    fn rasterizer(&self) -> GhostscriptRasterizer {
        let defaults = GhostscriptConfig::default();
        GhostscriptRasterizer::new(GhostscriptConfig {
            program: self.ghostscript.clone().unwrap_or(defaults.program),
            timeout: (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs)),
            output: self.output_mode.into(),
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => run(args).await?,

        Commands::Stamp {
            input,
            output,
            watermark,
        } => {
            init_terminal_logger()?;
            let spec = watermark.resolve().await?;
            let stats = pdf_watermark::stamp_file(&input, &output, &spec).await?;
            println!(
                "Stamped {} page(s) → {}",
                stats.pages_stamped,
                output.display()
            );
            if stats.pages_with_default_size > 0 {
                println!(
                    "  {} page(s) had no MediaBox and used the default page size",
                    stats.pages_with_default_size
                );
            }
        }

        Commands::Greyscale {
            input,
            output,
            engine,
        } => {
            init_terminal_logger()?;
            engine
                .rasterizer()
                .rasterize(&input, &output, ColorMode::Gray)
                .await?;
            println!("Greyscale → {}", output.display());
        }

        Commands::Spec { output } => {
            let spec = WatermarkSpec::default();
            match output {
                Some(path) => {
                    spec.save(&path).await?;
                    println!("Saved default spec → {}", path.display());
                }
                None => println!("{}", serde_json::to_string_pretty(&spec)?),
            }
        }
    }

    Ok(())
}

fn init_terminal_logger() -> Result<()> {
    CliLogger::new(false, ProgressBar::hidden())
        .init()
        .context("Failed to install logger")
}

async fn run(args: RunArgs) -> Result<()> {
    let bar = ProgressBar::new(0);
    init_run_logger(&args.destination, args.verbose, bar.clone())?;

    let started = Local::now();
    log::info!(
        "Started at {}: '{}' -> '{}'",
        started.format("%H:%M:%S"),
        args.source.display(),
        args.destination.display()
    );

    let watermark = args.watermark.resolve().await?;
    let config = PipelineConfig {
        verbose: args.verbose,
        jobs: args.jobs,
        fail_fast: args.fail_fast,
        ..PipelineConfig::new(&args.source, &args.destination, watermark)
    };

    let pipeline = Pipeline::new(config, args.engine.rasterizer());
    let summary = pipeline.run(&BarProgress::new(bar)).await?;

    log::info!(
        "Finished at {}, total time {}",
        Local::now().format("%H:%M:%S"),
        format_duration(summary.elapsed)
    );
    log::logger().flush();

    if !summary.is_success() {
        bail!(
            "{} of {} file(s) did not finish",
            summary.total_files - summary.succeeded(),
            summary.total_files
        );
    }
    Ok(())
}

/// The log file lives in the destination root. A missing destination is
/// reported by the pipeline itself, so logging falls back to the terminal.
fn init_run_logger(destination: &Path, verbose: bool, bar: ProgressBar) -> Result<()> {
    let logger = CliLogger::new(verbose, bar);
    let logger = if destination.is_dir() {
        logger.with_log_file(destination).with_context(|| {
            format!(
                "Failed to open log file in {}",
                destination.display()
            )
        })?
    } else {
        logger
    };
    logger.init().context("Failed to install logger")
}
