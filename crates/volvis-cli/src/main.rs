//! volvis - volume field inspection CLI
//!
//! Loads AVS field volumes and exposes the sampling core from the shell:
//! statistics, point queries and whole-grid resampling.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use volvis_volume::{Dims, InterpolationMode, Vec3};

mod commands;

#[derive(Parser)]
#[command(name = "volvis")]
#[command(author, version, about = "Volume field inspection and resampling")]
#[command(long_about = "
Inspect, sample and resample scalar volumes stored as AVS field (.fld) files.

Interpolation modes: nearest, linear (trilinear), cubic (tricubic).
Gradient fields treat cubic as linear.

Examples:
  volvis info head.fld                         # Dimensions and intensity range
  volvis info head.fld --histogram 32 -g       # Histogram and gradient range
  volvis sample head.fld --at 10.5,20,7.25 -m cubic
  volvis sample head.fld --at 1,2,3 --at 4,5,6 -c render.yaml
  volvis resample head.fld -o small.fld --size 64x64x32
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Display volume dimensions and statistics
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Sample intensity and gradient at voxel-space positions
    #[command(visible_alias = "s")]
    Sample(SampleArgs),

    /// Resample a volume onto a new grid
    #[command(visible_alias = "r")]
    Resample(ResampleArgs),
}

#[derive(Args)]
struct InfoArgs {
    /// Input volume(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Show an intensity histogram with this many bins
    #[arg(long, value_name = "BINS", num_args = 0..=1, default_missing_value = "16")]
    histogram: Option<usize>,

    /// Build the gradient field and show its magnitude range
    #[arg(short, long)]
    gradient: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct SampleArgs {
    /// Input volume
    input: PathBuf,

    /// Query position x,y,z in voxel coordinates (repeatable)
    #[arg(long, required = true, allow_hyphen_values = true, value_parser = commands::parse_vec3)]
    at: Vec<Vec3>,

    /// Scalar interpolation mode (nearest, linear, cubic)
    #[arg(short, long)]
    mode: Option<InterpolationMode>,

    /// Gradient interpolation mode (nearest, linear)
    #[arg(long)]
    gradient_mode: Option<InterpolationMode>,

    /// YAML sampling config (scalar, gradient, cubic_param)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Cubic kernel shape parameter
    #[arg(long, allow_hyphen_values = true)]
    cubic_param: Option<f32>,

    /// Skip gradient reconstruction
    #[arg(long)]
    no_gradient: bool,
}

#[derive(Args)]
struct ResampleArgs {
    /// Input volume
    input: PathBuf,

    /// Output volume
    #[arg(short, long)]
    output: PathBuf,

    /// Target extent, e.g. 64x64x32 or 64,64,32
    #[arg(short, long, value_parser = commands::parse_dims)]
    size: Dims,

    /// Interpolation mode
    #[arg(short, long, default_value = "linear")]
    mode: InterpolationMode,

    /// Store one byte per voxel instead of u16 (values clamp to 255)
    #[arg(long)]
    byte: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Info(args) => commands::info::run(args, cli.verbose),
        Commands::Sample(args) => commands::sample::run(args, cli.verbose),
        Commands::Resample(args) => commands::resample::run(args, cli.verbose),
    }
}

/// Logs to stderr; `RUST_LOG` overrides the default filter.
fn init_logging(verbose: bool) {
    let default = if verbose { "volvis=debug" } else { "volvis=info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
