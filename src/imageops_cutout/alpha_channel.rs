use image::{GenericImageView, Luma, Pixel, Primitive, Rgba};
use imageproc::{
    definitions::Image,
    map::{map_colors, map_colors2},
};

use crate::{error::AlphaMaskError, utils::validate_matching_dimensions};

/// Trait for reading the alpha channel of RGBA images as a grayscale mask
pub trait ExtractAlpha {
    type Subpixel: Primitive;

    /// Copies the alpha channel into a single-channel image
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use imageops_cutout::{ExtractAlpha, Image};
    /// use image::Rgba;
    ///
    /// let image: Image<Rgba<u8>> = Image::from_pixel(4, 4, Rgba([10, 20, 30, 200]));
    /// let alpha = image.alpha_mask();
    /// assert_eq!(alpha.get_pixel(0, 0)[0], 200);
    /// ```
    fn alpha_mask(&self) -> Image<Luma<Self::Subpixel>>;
}

/// Trait for modifying alpha channel of existing RGBA images
///
/// This trait provides functionality to replace the alpha channel
/// of RGBA images while preserving the RGB color channels.
pub trait ModifyAlpha {
    type Mask: GenericImageView<Pixel = Luma<Self::Subpixel>>;
    type Subpixel: Primitive;
    /// Replaces the alpha channel with the provided mask
    ///
    /// This consumes the original image.
    ///
    /// # Arguments
    ///
    /// * `mask` - The new alpha mask (grayscale image)
    ///
    /// # Returns
    ///
    /// RGBA image with replaced alpha channel
    ///
    /// # Errors
    ///
    /// * `AlphaMaskError::DimensionMismatch` - When image and mask dimensions don't match
    fn replace_alpha(self, mask: &Self::Mask) -> Result<Self, AlphaMaskError>
    where
        Self: Sized;

    /// Replaces the alpha channel with the provided mask in-place
    ///
    /// # Errors
    ///
    /// * `AlphaMaskError::DimensionMismatch` - When image and mask dimensions don't match
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use imageops_cutout::{Image, ModifyAlpha};
    /// use image::{Luma, Rgba};
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut rgba_image: Image<Rgba<u8>> = Image::new(10, 10);
    /// let new_mask: Image<Luma<u8>> = Image::new(10, 10);
    ///
    /// rgba_image.replace_alpha_mut(&new_mask)?;
    /// # Ok(())
    /// # }
    /// ```
    fn replace_alpha_mut(&mut self, mask: &Self::Mask) -> Result<&mut Self, AlphaMaskError>;
}

impl<S> ExtractAlpha for Image<Rgba<S>>
where
    Rgba<S>: Pixel<Subpixel = S>,
    Luma<S>: Pixel<Subpixel = S>,
    S: Primitive,
{
    type Subpixel = S;

    fn alpha_mask(&self) -> Image<Luma<S>> {
        map_colors(self, |Rgba([_, _, _, alpha])| Luma([alpha]))
    }
}

impl<S> ModifyAlpha for Image<Rgba<S>>
where
    Rgba<S>: Pixel<Subpixel = S>,
    Luma<S>: Pixel<Subpixel = S>,
    S: Primitive,
{
    type Mask = Image<Luma<S>>;
    type Subpixel = S;

    fn replace_alpha(self, mask: &Self::Mask) -> Result<Self, AlphaMaskError> {
        validate_dimensions(&self, mask)?;

        let result = map_colors2(&self, mask, |Rgba([red, green, blue, _]), Luma([alpha])| {
            Rgba([red, green, blue, alpha])
        });

        Ok(result)
    }

    fn replace_alpha_mut(&mut self, mask: &Self::Mask) -> Result<&mut Self, AlphaMaskError> {
        validate_dimensions(self, mask)?;

        self.pixels_mut()
            .zip(mask.pixels())
            .for_each(|(pixel, Luma([alpha]))| {
                pixel[3] = *alpha;
            });

        Ok(self)
    }
}

#[inline]
fn validate_dimensions<I1, I2>(image: &I1, mask: &I2) -> Result<(), AlphaMaskError>
where
    I1: GenericImageView,
    I2: GenericImageView,
{
    validate_matching_dimensions(image.dimensions(), mask.dimensions())
}
