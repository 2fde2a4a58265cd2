//! 3x3 grayscale erosion and Gaussian smoothing for alpha masks.

use image::Luma;
use imageproc::definitions::Image;
use imageproc::morphology::{grayscale_erode, Mask};
use itertools::iproduct;

/// Grayscale erosion with a 3x3 all-ones structuring element
///
/// Each output pixel is the minimum of its 3x3 neighborhood. Neighbors
/// outside the image are ignored, which is the same as extending the image
/// with the maximum value: the image border on its own never erodes
/// anything. Each iteration applies the 3x3 minimum once more.
///
/// # Arguments
///
/// * `mask` - Single-channel image to erode
/// * `iterations` - Number of passes; 0 returns a copy
pub fn erode(mask: &Image<Luma<u8>>, iterations: u32) -> Image<Luma<u8>> {
    let (width, height) = mask.dimensions();
    if width == 0 || height == 0 {
        return mask.clone();
    }

    let square = Mask::square(1);
    let mut current = mask.clone();
    for _ in 0..iterations {
        current = grayscale_erode(&current, &square);
    }
    current
}

/// Binomial approximation of a 3x3 Gaussian, applied along each axis.
const GAUSSIAN_3: [u32; 3] = [1, 2, 1];

/// Smooths a mask with a 3x3 Gaussian kernel
///
/// The kernel is the separable `[1, 2, 1] / 4` pair, i.e. the 3x3 Gaussian
/// whose sigma is derived from the kernel size. Borders are mirrored without
/// repeating the edge pixel (`dcb|abcd|cba`). The computation is exact
/// integer arithmetic rounded half up, so results are reproducible bit for
/// bit.
pub fn gaussian_blur_3x3(mask: &Image<Luma<u8>>) -> Image<Luma<u8>> {
    let (width, height) = mask.dimensions();
    if width == 0 || height == 0 {
        return mask.clone();
    }

    // horizontal pass, weights sum to 4
    let index = |x: u32, y: u32| y as usize * width as usize + x as usize;
    let mut rows = vec![0u32; width as usize * height as usize];
    for (y, x) in iproduct!(0..height, 0..width) {
        rows[index(x, y)] = GAUSSIAN_3
            .iter()
            .zip([-1i64, 0, 1])
            .map(|(weight, dx)| weight * u32::from(mask.get_pixel(reflect_101(x, dx, width), y)[0]))
            .sum();
    }

    // vertical pass, weights sum to 16 overall
    Image::from_fn(width, height, |x, y| {
        let sum: u32 = GAUSSIAN_3
            .iter()
            .zip([-1i64, 0, 1])
            .map(|(weight, dy)| weight * rows[index(x, reflect_101(y, dy, height))])
            .sum();
        Luma([((sum + 8) / 16) as u8])
    })
}

/// Index of `position + offset` mirrored into `0..len` without repeating the edge.
#[inline]
fn reflect_101(position: u32, offset: i64, len: u32) -> u32 {
    if len == 1 {
        return 0;
    }
    let last = i64::from(len) - 1;
    let mut index = i64::from(position) + offset;
    if index < 0 {
        index = -index;
    }
    if index > last {
        index = 2 * last - index;
    }
    index as u32
}

/// Number of pixels with non-zero value.
pub fn opaque_area(mask: &Image<Luma<u8>>) -> usize {
    mask.iter().filter(|&&value| value != 0).count()
}
