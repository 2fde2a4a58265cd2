//! # imageops-cutout
//!
//! Cleanup of noisy RGBA cutouts: the leftovers of an automatic background
//! removal (fringe pixels, floating blobs, hard edges) are turned into a
//! clean, feathered foreground.
//!
//! The cleanup runs three stages over one raster, always in this order:
//!
//! - **Background removal**: flood fill from the four corners, clearing the
//!   alpha of every connected pixel close in color to a corner
//! - **Component filter**: keeps the largest 8-connected non-transparent
//!   region and clears every other one
//! - **Edge refinement**: erodes the alpha channel by one pixel and
//!   feathers it with a 3x3 Gaussian
//!
//! Only alpha is ever modified; RGB values pass through untouched.
//!
//! ## Example Usage
//!
//! ```no_run
//! use imageops_cutout::{clean_cutout, load_rgba, save_rgba, CleanupConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut image = load_rgba("cutout.png")?;
//! let report = clean_cutout(&mut image, &CleanupConfig::default().with_threshold(12))?;
//! println!("{} opaque pixels left", report.opaque_after);
//! save_rgba(&image, "cutout_clean.png")?;
//! # Ok(())
//! # }
//! ```

mod error;
mod imageops_cutout;
mod io;
mod utils;

#[cfg(test)]
mod test_utils;

pub use error::{AlphaMaskError, CleanupError, RasterIoError};
pub use imageops_cutout::alpha_channel::{ExtractAlpha, ModifyAlpha};
pub use imageops_cutout::background::{flood_background, RemoveBackground, SegmentReport};
pub use imageops_cutout::color::{
    color_distance, corner_positions, sample_corners, squared_color_distance, BackgroundPalette,
    CornerSample,
};
pub use imageops_cutout::components::{ComponentLabels, ComponentOutcome, KeepLargestComponent};
pub use imageops_cutout::morphology::{erode, gaussian_blur_3x3, opaque_area};
pub use imageops_cutout::pipeline::{
    clean_cutout, run_stages, CleanupConfig, CleanupReport, Stage, DEFAULT_THRESHOLD,
};
pub use imageops_cutout::refine::{RefineEdges, RefineOptions};
pub use io::{inspect, load_rgba, save_rgba, RasterSummary};

// Re-export imageproc::definitions::Image for convenience
pub use imageproc::definitions::Image;
