//! Color distance and corner sampling primitives.

use image::{Rgb, Rgba};
use imageproc::definitions::Image;

/// Squared Euclidean distance between two colors in RGB space.
#[inline]
pub fn squared_color_distance(a: Rgb<u8>, b: Rgb<u8>) -> u32 {
    let Rgb([r1, g1, b1]) = a;
    let Rgb([r2, g2, b2]) = b;
    let dr = i32::from(r1) - i32::from(r2);
    let dg = i32::from(g1) - i32::from(g2);
    let db = i32::from(b1) - i32::from(b2);
    (dr * dr + dg * dg + db * db).unsigned_abs()
}

/// Euclidean distance between two colors in RGB space.
///
/// Alpha never takes part in the metric; callers pass the RGB part of a pixel.
#[inline]
pub fn color_distance(a: Rgb<u8>, b: Rgb<u8>) -> f64 {
    f64::from(squared_color_distance(a, b)).sqrt()
}

/// Corner coordinates in sampling order: top-left, top-right, bottom-left, bottom-right.
///
/// For single-row or single-column images some coordinates coincide.
pub const fn corner_positions(width: u32, height: u32) -> [(u32, u32); 4] {
    let right = width.saturating_sub(1);
    let bottom = height.saturating_sub(1);
    [(0, 0), (right, 0), (0, bottom), (right, bottom)]
}

#[inline]
pub(crate) fn rgb_of(pixel: Rgba<u8>) -> Rgb<u8> {
    let Rgba([red, green, blue, _]) = pixel;
    Rgb([red, green, blue])
}

/// Reference background colors sampled from the four corners of a raster
///
/// The palette keeps one entry per corner, in the order given by
/// [`corner_positions`]. Identical corner colors are kept as separate
/// entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackgroundPalette {
    colors: [Rgb<u8>; 4],
}

impl BackgroundPalette {
    /// Builds a palette from explicit colors.
    pub const fn new(colors: [Rgb<u8>; 4]) -> Self {
        Self { colors }
    }

    /// Samples the RGB part of the four corner pixels.
    ///
    /// Returns `None` for an image with a zero dimension.
    pub fn sample(image: &Image<Rgba<u8>>) -> Option<Self> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return None;
        }
        let colors = corner_positions(width, height).map(|(x, y)| rgb_of(*image.get_pixel(x, y)));
        Some(Self { colors })
    }

    pub const fn colors(&self) -> &[Rgb<u8>; 4] {
        &self.colors
    }

    /// Smallest squared distance from `color` to any palette entry.
    pub fn min_squared_distance(&self, color: Rgb<u8>) -> u32 {
        self.colors
            .iter()
            .map(|&reference| squared_color_distance(color, reference))
            .min()
            .unwrap_or(u32::MAX)
    }

    /// Whether `color` lies strictly closer than `threshold` to some palette entry.
    ///
    /// A threshold of 0 accepts exact matches only.
    pub fn is_background(&self, color: Rgb<u8>, threshold: u32) -> bool {
        self.contains_within(color, squared_limit(threshold))
    }

    /// Whether the squared distance to some palette entry is below `limit`.
    #[inline]
    pub(crate) fn contains_within(&self, color: Rgb<u8>, limit: u64) -> bool {
        u64::from(self.min_squared_distance(color)) < limit
    }
}

/// Exclusive upper bound on the squared distance for a threshold.
#[inline]
pub(crate) fn squared_limit(threshold: u32) -> u64 {
    let threshold = u64::from(threshold);
    (threshold * threshold).max(1)
}

/// A corner pixel together with where it was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CornerSample {
    pub position: (u32, u32),
    pub pixel: Rgba<u8>,
}

/// Reads the four corner pixels, alpha included.
///
/// Returns `None` for an image with a zero dimension.
pub fn sample_corners(image: &Image<Rgba<u8>>) -> Option<[CornerSample; 4]> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return None;
    }
    Some(
        corner_positions(width, height).map(|position| CornerSample {
            position,
            pixel: *image.get_pixel(position.0, position.1),
        }),
    )
}
