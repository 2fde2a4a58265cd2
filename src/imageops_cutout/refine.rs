use image::Rgba;
use imageproc::definitions::Image;
use tracing::debug;

use crate::error::CleanupError;
use crate::imageops_cutout::alpha_channel::{ExtractAlpha, ModifyAlpha};
use crate::imageops_cutout::morphology::{erode, gaussian_blur_3x3, opaque_area};
use crate::utils::validate_non_empty_image;

/// Parameters of the edge refinement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefineOptions {
    /// Number of 3x3 erosion passes over the alpha channel
    pub erosion_iterations: u32,
    /// Whether to smooth the eroded alpha with a 3x3 Gaussian
    pub feather: bool,
}

impl Default for RefineOptions {
    fn default() -> Self {
        Self {
            erosion_iterations: 1,
            feather: true,
        }
    }
}

/// Trait for softening the alpha boundary of RGBA cutouts
pub trait RefineEdges {
    /// Erodes the alpha channel to strip fringe pixels, then feathers it
    ///
    /// RGB values are copied through unchanged; only the alpha channel is
    /// recomputed.
    ///
    /// # Arguments
    ///
    /// * `options` - Erosion passes and whether to feather
    ///
    /// # Errors
    ///
    /// * `CleanupError::EmptyImage` - When the image has a zero dimension
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use imageops_cutout::{Image, RefineEdges, RefineOptions};
    /// use image::Rgba;
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let image: Image<Rgba<u8>> = Image::from_pixel(16, 16, Rgba([0, 0, 0, 255]));
    /// let refined = image.refine_edges(&RefineOptions::default())?;
    /// assert_eq!(refined.dimensions(), (16, 16));
    /// # Ok(())
    /// # }
    /// ```
    fn refine_edges(&self, options: &RefineOptions) -> Result<Image<Rgba<u8>>, CleanupError>;

    /// In-place variant of [`RefineEdges::refine_edges`]
    fn refine_edges_mut(&mut self, options: &RefineOptions) -> Result<&mut Self, CleanupError>;
}

impl RefineEdges for Image<Rgba<u8>> {
    fn refine_edges(&self, options: &RefineOptions) -> Result<Self, CleanupError> {
        let mut refined = self.clone();
        refined.refine_edges_mut(options)?;
        Ok(refined)
    }

    fn refine_edges_mut(&mut self, options: &RefineOptions) -> Result<&mut Self, CleanupError> {
        let (width, height) = self.dimensions();
        validate_non_empty_image(width, height)?;

        let alpha = self.alpha_mask();
        let eroded = erode(&alpha, options.erosion_iterations);
        debug!(
            before = opaque_area(&alpha),
            after = opaque_area(&eroded),
            "alpha eroded"
        );

        let refined = if options.feather {
            gaussian_blur_3x3(&eroded)
        } else {
            eroded
        };

        Ok(self.replace_alpha_mut(&refined)?)
    }
}
