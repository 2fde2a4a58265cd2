//! Test utilities for imageops-cutout
//!
//! This module provides common fixtures for testing the cleanup stages.
//! It is only compiled when running tests.

use image::{Luma, Rgba};
use imageproc::definitions::Image;

/// Creates a test RGBA image with predefined pixel values for testing.
///
/// This function creates a 2x2 test image with known pixel values including alpha:
/// - (0,0): [200, 150, 100, 255] (opaque)
/// - (1,0): [100, 200, 150, 128] (semi-transparent)
/// - (0,1): [150, 100, 200, 64]  (more transparent)
/// - (1,1): [50, 75, 25, 0]      (fully transparent)
pub fn create_test_rgba_image() -> Image<Rgba<u8>> {
    let mut image: Image<Rgba<u8>> = Image::new(2, 2);
    image.put_pixel(0, 0, Rgba([200, 150, 100, 255]));
    image.put_pixel(1, 0, Rgba([100, 200, 150, 128]));
    image.put_pixel(0, 1, Rgba([150, 100, 200, 64]));
    image.put_pixel(1, 1, Rgba([50, 75, 25, 0]));
    image
}

/// Creates a test alpha mask image with predefined alpha values for testing.
///
/// - (0,0): [255] (fully opaque)
/// - (1,0): [192] (mostly opaque)
/// - (0,1): [128] (semi-transparent)
/// - (1,1): [64]  (mostly transparent)
pub fn create_test_alpha_mask() -> Image<Luma<u8>> {
    let mut mask: Image<Luma<u8>> = Image::new(2, 2);
    mask.put_pixel(0, 0, Luma([255]));
    mask.put_pixel(1, 0, Luma([192]));
    mask.put_pixel(0, 1, Luma([128]));
    mask.put_pixel(1, 1, Luma([64]));
    mask
}

/// Creates an image with a `border`-pixel frame of `background` around a
/// rectangle of `foreground`.
pub fn create_framed_image(
    width: u32,
    height: u32,
    border: u32,
    background: Rgba<u8>,
    foreground: Rgba<u8>,
) -> Image<Rgba<u8>> {
    Image::from_fn(width, height, |x, y| {
        let inside = x >= border
            && y >= border
            && x + border < width
            && y + border < height;
        if inside {
            foreground
        } else {
            background
        }
    })
}

/// Creates an alpha mask from rows of characters: `#` is 255, `.` is 0 and
/// digits `1`-`9` are scaled alpha levels.
pub fn mask_from_rows(rows: &[&str]) -> Image<Luma<u8>> {
    let height = rows.len() as u32;
    let width = rows.first().map_or(0, |row| row.len()) as u32;
    Image::from_fn(width, height, |x, y| {
        let cell = rows[y as usize].as_bytes()[x as usize];
        let value = match cell {
            b'#' => 255,
            b'1'..=b'9' => (cell - b'0') * 25,
            _ => 0,
        };
        Luma([value])
    })
}

/// Creates an RGBA image whose alpha follows `mask` and whose RGB encodes
/// the pixel position, so any RGB change is detectable.
pub fn rgba_with_alpha(mask: &Image<Luma<u8>>) -> Image<Rgba<u8>> {
    Image::from_fn(mask.width(), mask.height(), |x, y| {
        Rgba([
            (x * 7 % 256) as u8,
            (y * 11 % 256) as u8,
            ((x + y) * 3 % 256) as u8,
            mask.get_pixel(x, y)[0],
        ])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_test_rgba_image_with_valid_input_creates_image() {
        let image = create_test_rgba_image();
        assert_eq!(image.dimensions(), (2, 2));
        assert_eq!(image.get_pixel(0, 0), &Rgba([200, 150, 100, 255]));
        assert_eq!(image.get_pixel(1, 1), &Rgba([50, 75, 25, 0]));
    }

    #[test]
    fn create_framed_image_places_foreground_inside_border() {
        let bg = Rgba([0, 0, 0, 255]);
        let fg = Rgba([255, 255, 255, 255]);
        let image = create_framed_image(5, 4, 1, bg, fg);

        assert_eq!(image.get_pixel(0, 0), &bg);
        assert_eq!(image.get_pixel(1, 1), &fg);
        assert_eq!(image.get_pixel(3, 2), &fg);
        assert_eq!(image.get_pixel(4, 2), &bg);
        assert_eq!(image.get_pixel(3, 3), &bg);
    }

    #[test]
    fn mask_from_rows_parses_levels() {
        let mask = mask_from_rows(&["#.", "4#"]);
        assert_eq!(mask.dimensions(), (2, 2));
        assert_eq!(mask.get_pixel(0, 0), &Luma([255]));
        assert_eq!(mask.get_pixel(1, 0), &Luma([0]));
        assert_eq!(mask.get_pixel(0, 1), &Luma([100]));
        assert_eq!(mask.get_pixel(1, 1), &Luma([255]));
    }
}
