//! hyphema CLI: estimate the blood-layer percentage of an eye image.

mod annotate;
mod report;

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use hyphema::{save_frame, AnalysisConfig, AnalysisError, Analyzer, HyphemaAnalysis};

use crate::report::{ErrorRecord, SuccessRecord};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "hyphema")]
#[command(about = "Estimate the percentage of the iris covered by a hyphema")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse one eye image and annotate it.
    Analyze(CliAnalyzeArgs),

    /// Print the default configuration as JSON.
    PrintConfig,
}

#[derive(Debug, Clone, Args)]
struct CliAnalyzeArgs {
    /// Path to the input image.
    #[arg(long)]
    image: PathBuf,

    /// Where to write the annotated image (defaults to overwriting the input).
    #[arg(long)]
    out: Option<PathBuf>,

    /// JSON configuration file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Smallest boundary radius passed to the circle detector (px).
    #[arg(long)]
    min_radius: Option<u32>,

    /// Intensity band half-width for region growing.
    #[arg(long)]
    tolerance: Option<u8>,

    /// Fraction of the peak transition signal a row must exceed.
    #[arg(long)]
    threshold_coefficient: Option<f64>,

    /// Close the highlighted region before writing.
    #[arg(long)]
    smooth_boundary: bool,

    /// Do not draw the percentage text.
    #[arg(long)]
    no_overlay: bool,
}

impl CliAnalyzeArgs {
    fn build_config(&self) -> CliResult<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::from_json_file(path)?,
            None => AnalysisConfig::default(),
        };
        if let Some(v) = self.min_radius {
            config.min_radius = v;
        }
        if let Some(v) = self.tolerance {
            config.region.tolerance = v;
        }
        if let Some(v) = self.threshold_coefficient {
            config.seed.threshold_coefficient = v;
        }
        if self.smooth_boundary {
            config.closing.enable = true;
        }
        Ok(config)
    }

    fn output_path(&self) -> &Path {
        self.out.as_deref().unwrap_or(&self.image)
    }
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze(args) => run_analyze(&args),
        Commands::PrintConfig => run_print_config(),
    }
}

// ── analyze ───────────────────────────────────────────────────────────

fn run_analyze(args: &CliAnalyzeArgs) -> CliResult<()> {
    let config = args.build_config()?;
    let analyzer = Analyzer::with_config(config);

    tracing::info!("Loading image: {}", args.image.display());

    let json = match analyze_and_write(&analyzer, args) {
        Ok(analysis) => {
            let out = args.output_path();
            tracing::info!(
                "Hyphema covers {}% of r={} circle at ({}, {})",
                analysis.percentage,
                analysis.circle.radius,
                analysis.circle.center_x,
                analysis.circle.center_y,
            );
            serde_json::to_string(&SuccessRecord::new(out, analysis.percentage))?
        }
        Err(err) => {
            tracing::warn!("analysis failed ({}): {}", err.code(), err);
            serde_json::to_string(&ErrorRecord::new(&err))?
        }
    };
    println!("{}", json);
    Ok(())
}

fn analyze_and_write(
    analyzer: &Analyzer,
    args: &CliAnalyzeArgs,
) -> Result<HyphemaAnalysis, AnalysisError> {
    let mut analysis = analyzer.analyze_file(&args.image)?;
    if !args.no_overlay {
        annotate::draw_percentage(&mut analysis.annotated, analysis.percentage);
    }
    let out = args.output_path();
    save_frame(out, &analysis.annotated)?;
    tracing::info!("Annotated image written to {}", out.display());
    Ok(analysis)
}

// ── print-config ──────────────────────────────────────────────────────

fn run_print_config() -> CliResult<()> {
    let json = serde_json::to_string_pretty(&AnalysisConfig::default())?;
    println!("{}", json);
    Ok(())
}
