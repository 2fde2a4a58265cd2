//! Background removal by flood fill from the image corners.
//!
//! Every pixel reachable from a corner through a chain of 4-adjacent pixels
//! whose color is close to one of the corner colors is treated as
//! background. The traversal is an iterative FIFO worklist over a dense
//! visited arena, so large rasters never recurse.

use std::collections::VecDeque;

use image::{Luma, Rgb, Rgba};
use imageproc::definitions::Image;
use tracing::debug;

use crate::error::CleanupError;
use crate::imageops_cutout::color::{corner_positions, squared_limit, BackgroundPalette};
use crate::utils::validate_non_empty_image;

/// Outcome of a background removal pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentReport {
    /// Number of pixels classified as background, seeds included
    pub removed: usize,
    /// Number of distinct corner seeds the flood started from
    pub seeds: usize,
    /// Number of pixels in the raster
    pub total: usize,
}

impl SegmentReport {
    /// The whole raster was classified as background.
    pub const fn is_everything(&self) -> bool {
        self.removed == self.total
    }

    /// Nothing beyond the seed corners was reachable.
    ///
    /// This happens when no corner neighbor is close to a corner color,
    /// typically because the foreground reaches every corner.
    pub const fn is_corners_only(&self) -> bool {
        self.removed == self.seeds
    }
}

/// Trait for removing the background of RGBA cutouts
pub trait RemoveBackground {
    /// Zeroes the alpha of every pixel in the background flood region
    ///
    /// RGB values are left as they are. The color test always runs on the
    /// unmodified RGB values, so the result does not depend on visiting
    /// order.
    ///
    /// # Arguments
    ///
    /// * `threshold` - Exclusive upper bound on the Euclidean RGB distance to
    ///   a corner color; 0 means exact match only
    ///
    /// # Errors
    ///
    /// * `CleanupError::EmptyImage` - When the image has a zero dimension
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use imageops_cutout::{Image, RemoveBackground};
    /// use image::Rgba;
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut image: Image<Rgba<u8>> = Image::from_pixel(10, 10, Rgba([255, 255, 255, 255]));
    /// let report = image.remove_background(10)?;
    /// assert!(report.is_everything());
    /// # Ok(())
    /// # }
    /// ```
    fn remove_background(&mut self, threshold: u32) -> Result<SegmentReport, CleanupError>;
}

impl RemoveBackground for Image<Rgba<u8>> {
    fn remove_background(&mut self, threshold: u32) -> Result<SegmentReport, CleanupError> {
        let (width, height) = self.dimensions();
        validate_non_empty_image(width, height)?;

        let (background, seeds) = flood(self, threshold);
        let mut removed = 0;
        for (pixel, Luma([flag])) in self.pixels_mut().zip(background.pixels()) {
            if *flag != 0 {
                pixel[3] = 0;
                removed += 1;
            }
        }

        let report = SegmentReport {
            removed,
            seeds,
            total: width as usize * height as usize,
        };
        debug!(removed = report.removed, total = report.total, threshold, "background removed");
        Ok(report)
    }
}

/// Computes the background flood region without modifying the image.
///
/// # Returns
///
/// A mask of the same size where 255 marks background and 0 everything else.
/// An image with a zero dimension yields an empty mask of the same size.
pub fn flood_background(image: &Image<Rgba<u8>>, threshold: u32) -> Image<Luma<u8>> {
    flood(image, threshold).0
}

/// Flood mask plus the number of distinct seeds.
fn flood(image: &Image<Rgba<u8>>, threshold: u32) -> (Image<Luma<u8>>, usize) {
    let (width, height) = image.dimensions();
    let mut mask: Image<Luma<u8>> = Image::new(width, height);
    let Some(palette) = BackgroundPalette::sample(image) else {
        return (mask, 0);
    };

    let limit = squared_limit(threshold);
    let w = width as usize;
    let h = height as usize;
    let index = |x: usize, y: usize| y * w + x;

    let mut visited = vec![false; w * h];
    let mut queue = VecDeque::new();
    for (x, y) in corner_positions(width, height) {
        let (x, y) = (x as usize, y as usize);
        if !visited[index(x, y)] {
            visited[index(x, y)] = true;
            queue.push_back((x, y));
        }
    }
    let seeds = queue.len();

    let pixels = image.as_raw();
    let color_at = |i: usize| Rgb([pixels[i * 4], pixels[i * 4 + 1], pixels[i * 4 + 2]]);

    let mask_data: &mut [u8] = &mut mask;
    while let Some((x, y)) = queue.pop_front() {
        mask_data[index(x, y)] = 255;

        let neighbors = [
            x.checked_sub(1).map(|nx| (nx, y)),
            (x + 1 < w).then_some((x + 1, y)),
            y.checked_sub(1).map(|ny| (x, ny)),
            (y + 1 < h).then_some((x, y + 1)),
        ];
        for (nx, ny) in neighbors.into_iter().flatten() {
            let i = index(nx, ny);
            if !visited[i] && palette.contains_within(color_at(i), limit) {
                visited[i] = true;
                queue.push_back((nx, ny));
            }
        }
    }

    (mask, seeds)
}
