//! boxfit - letterbox and color remapping CLI
//!
//! Image data travels as raw little-endian `f32` RGB on stdin/stdout, so the
//! tool drops into shell pipelines next to whatever produces model inputs.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "boxfit")]
#[command(author, version, about = "Letterbox resize/restore and HSV color remapping")]
#[command(long_about = "
Prepares images for fixed-size model inputs and recolors them in HSV space.
Pixels are raw little-endian f32, interleaved RGB, row-major.

Examples:
  boxfit geometry --source 480x640 --target 320x320
  boxfit letterbox --source 480x640 --target 320x320 < img.f32 > canvas.f32
  boxfit restore --source 480x640 --target 320x320 < mask.f32 > crop.f32
  boxfit hue --shape 480x640 --color 120,0.6 < img.f32 > green.f32
  boxfit fill --shape 480x640 --color 200 < img.f32 > blue.f32
  boxfit -vv --config boxfit.yaml hue --shape 64x64 --color 30 < a.f32 > b.f32

Shapes are HEIGHTxWIDTH.
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,

    /// YAML file with letterbox and remap settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print letterbox geometry for a source/target pair
    #[command(visible_alias = "g")]
    Geometry(GeometryArgs),

    /// Resize and pad an image into the target canvas
    #[command(visible_alias = "lb")]
    Letterbox(LetterboxArgs),

    /// Crop a target-sized buffer back to the content region
    Restore(RestoreArgs),

    /// Move the dominant color toward a target hue/saturation/value
    Hue(HueArgs),

    /// Overwrite hue (and saturation) with constants
    Fill(FillArgs),
}

#[derive(Args)]
struct GeometryArgs {
    /// Source shape, HEIGHTxWIDTH
    #[arg(short, long)]
    source: String,

    /// Target shape, HEIGHTxWIDTH
    #[arg(short, long)]
    target: String,

    /// Machine-readable output (JSON)
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct LetterboxArgs {
    /// Source shape, HEIGHTxWIDTH
    #[arg(short, long)]
    source: String,

    /// Target shape, HEIGHTxWIDTH
    #[arg(short, long)]
    target: String,

    /// Filter: nearest, bilinear, area, bicubic, lanczos (overrides config)
    #[arg(short, long)]
    filter: Option<String>,
}

#[derive(Args)]
struct RestoreArgs {
    /// Source shape the canvas was made from, HEIGHTxWIDTH
    #[arg(short, long)]
    source: String,

    /// Target (canvas) shape, HEIGHTxWIDTH
    #[arg(short, long)]
    target: String,
}

#[derive(Args)]
struct HueArgs {
    /// Image shape, HEIGHTxWIDTH
    #[arg(long)]
    shape: String,

    /// Target color: H[,S[,V]]
    #[arg(short, long, allow_hyphen_values = true)]
    color: String,
}

#[derive(Args)]
struct FillArgs {
    /// Image shape, HEIGHTxWIDTH
    #[arg(long)]
    shape: String,

    /// Fill color: H[,S]
    #[arg(short, long, allow_hyphen_values = true)]
    color: String,
}

/// Installs the stderr log subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
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

    let config = config::CliConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Geometry(args) => commands::geometry::run(args, cli.verbose),
        Commands::Letterbox(args) => commands::letterbox::run(args, &config, cli.verbose),
        Commands::Restore(args) => commands::restore::run(args, cli.verbose),
        Commands::Hue(args) => commands::hue::run(args, &config, cli.verbose),
        Commands::Fill(args) => commands::fill::run(args, cli.verbose),
    }
}
