//! cutout-clean - cleans up noisy RGBA cutouts.

mod cli;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, PathArgs};
use imageops_cutout::{inspect, load_rgba, run_stages, save_rgba, CleanupConfig, Stage};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let config = cli.command.config();
    match &cli.command {
        Commands::Run { paths, .. } => process(paths, &config, &Stage::ALL),
        Commands::Segment { paths, .. } => process(paths, &config, &[Stage::Segment]),
        Commands::Filter { paths } => process(paths, &config, &[Stage::Filter]),
        Commands::Refine { paths, .. } => process(paths, &config, &[Stage::Refine]),
        Commands::Inspect { input } => print_summary(input),
    }
}

/// Console logging; `RUST_LOG` takes precedence over the verbosity flags.
fn init_logging(cli: &Cli) {
    let default_level = match (cli.quiet, cli.verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn process(paths: &PathArgs, config: &CleanupConfig, stages: &[Stage]) -> Result<()> {
    info!(path = %paths.input.display(), "reading");
    let mut image = load_rgba(&paths.input)?;

    let report = run_stages(&mut image, config, stages)
        .with_context(|| format!("Failed to clean {}", paths.input.display()))?;

    save_rgba(&image, &paths.output)?;
    info!(
        path = %paths.output.display(),
        opaque_before = report.opaque_before,
        opaque_after = report.opaque_after,
        "saved cleaned image"
    );
    Ok(())
}

fn print_summary(input: &Path) -> Result<()> {
    let summary = inspect(input)?;

    match summary.format {
        Some(format) => println!("Format: {format:?}"),
        None => println!("Format: unknown"),
    }
    println!("Mode: {:?}", summary.color);
    println!("Size: {}x{}", summary.dimensions.0, summary.dimensions.1);

    if let Some(corners) = summary.corners {
        println!("Corner pixels:");
        for corner in corners {
            let (x, y) = corner.position;
            let [r, g, b, a] = corner.pixel.0;
            println!("({x}, {y}): ({r}, {g}, {b}, {a})");
        }
    }
    Ok(())
}
