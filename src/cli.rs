//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use imageops_cutout::{CleanupConfig, RefineOptions, DEFAULT_THRESHOLD};

/// Default input, relative to the working directory
pub const DEFAULT_INPUT: &str = "public/images/cutout.png";
/// Default output, relative to the working directory
pub const DEFAULT_OUTPUT: &str = "public/images/cutout_clean.png";

/// Clean up noisy RGBA cutouts
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run background removal, noise filtering and edge refinement
    Run {
        #[command(flatten)]
        paths: PathArgs,

        #[command(flatten)]
        segment: SegmentArgs,

        #[command(flatten)]
        refine: RefineArgs,
    },

    /// Only remove the background reachable from the corners
    Segment {
        #[command(flatten)]
        paths: PathArgs,

        #[command(flatten)]
        segment: SegmentArgs,
    },

    /// Only keep the largest connected region
    Filter {
        #[command(flatten)]
        paths: PathArgs,
    },

    /// Only erode and feather the alpha channel
    Refine {
        #[command(flatten)]
        paths: PathArgs,

        #[command(flatten)]
        refine: RefineArgs,
    },

    /// Print format, size and corner pixels of an image
    Inspect {
        /// Image to inspect
        #[arg(default_value = DEFAULT_INPUT, value_hint = clap::ValueHint::FilePath)]
        input: PathBuf,
    },
}

#[derive(Args, Debug, Clone)]
pub struct PathArgs {
    /// Input image
    #[arg(default_value = DEFAULT_INPUT, value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Output PNG, replaced atomically
    #[arg(default_value = DEFAULT_OUTPUT, value_hint = clap::ValueHint::FilePath)]
    pub output: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct SegmentArgs {
    /// Color distance below which a pixel counts as background (0 = exact match)
    #[arg(short, long, default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: u32,
}

#[derive(Args, Debug, Clone)]
pub struct RefineArgs {
    /// Number of 3x3 erosion passes over the alpha channel
    #[arg(long, default_value_t = 1)]
    pub erosion_iterations: u32,

    /// Keep the eroded alpha hard instead of feathering it
    #[arg(long)]
    pub no_feather: bool,
}

impl RefineArgs {
    pub const fn options(&self) -> RefineOptions {
        RefineOptions {
            erosion_iterations: self.erosion_iterations,
            feather: !self.no_feather,
        }
    }
}

impl Commands {
    /// Pipeline configuration assembled from the flags of this command.
    pub fn config(&self) -> CleanupConfig {
        let config = CleanupConfig::default();
        match self {
            Self::Run {
                segment, refine, ..
            } => config
                .with_threshold(segment.threshold)
                .with_refine(refine.options()),
            Self::Segment { segment, .. } => config.with_threshold(segment.threshold),
            Self::Refine { refine, .. } => config.with_refine(refine.options()),
            Self::Filter { .. } | Self::Inspect { .. } => config,
        }
    }
}
