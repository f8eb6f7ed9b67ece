//! imgprep CLI - letterbox every image under a directory tree.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use imgprep::{process_folder, Config};

/// Resize every image under a directory tree onto a padded square canvas.
#[derive(Parser, Debug)]
#[command(name = "imgprep")]
#[command(version, about, long_about = None)]
struct Args {
    /// Input directory tree.
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output directory; the input subtree layout is recreated under it.
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Side length of the square output canvas.
    #[arg(
        short,
        long,
        default_value = "416",
        value_name = "INT",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    size: u32,

    /// Border fill color as blue,green,red samples.
    #[arg(long, default_value = "0,0,0", value_name = "B,G,R", value_parser = parse_pad_color)]
    pad_color: [u8; 3],

    /// Output JPEG quality (1-100).
    #[arg(short, long, default_value = "95", value_name = "INT")]
    quality: u8,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

fn parse_pad_color(raw: &str) -> std::result::Result<[u8; 3], String> {
    let samples: Vec<u8> = raw
        .split(',')
        .map(|part| part.trim().parse::<u8>().map_err(|err| err.to_string()))
        .collect::<std::result::Result<_, _>>()?;

    <[u8; 3]>::try_from(samples).map_err(|_| "expected three comma-separated samples".to_string())
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("imgprep={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if let Err(err) = run(&args) {
        tracing::error!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(args: &Args) -> Result<()> {
    if !args.input.is_dir() {
        anyhow::bail!("Input directory does not exist: {}", args.input.display());
    }

    let config = Config {
        target_size: args.size,
        pad_color: args.pad_color,
        quality: args.quality,
    };

    let summary =
        process_folder(&args.input, &args.output, &config).context("Failed to process folder")?;

    println!(
        "Successfully processed {} images ({} skipped) into {}",
        summary.processed,
        summary.skipped,
        args.output.display()
    );

    Ok(())
}
