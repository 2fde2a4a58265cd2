//! Internal utility functions for imageops-cutout.
//!
//! This module contains validation shared by the cleanup stages.

use crate::error::{AlphaMaskError, CleanupError};

/// Validates that an image has non-zero dimensions.
///
/// # Arguments
///
/// * `width` - The width of the image
/// * `height` - The height of the image
///
/// # Returns
///
/// `Ok(())` if the dimensions are valid, otherwise `CleanupError::EmptyImage`
pub fn validate_non_empty_image(width: u32, height: u32) -> Result<(), CleanupError> {
    if width == 0 || height == 0 {
        Err(CleanupError::EmptyImage { width, height })
    } else {
        Ok(())
    }
}

/// Validates that a mask has the same dimensions as the image it belongs to.
///
/// # Arguments
///
/// * `expected` - The image dimensions (width, height)
/// * `actual` - The mask dimensions (width, height)
///
/// # Returns
///
/// `Ok(())` if the dimensions match, otherwise `AlphaMaskError::DimensionMismatch`
pub fn validate_matching_dimensions(
    expected: (u32, u32),
    actual: (u32, u32),
) -> Result<(), AlphaMaskError> {
    if expected != actual {
        Err(AlphaMaskError::DimensionMismatch { expected, actual })
    } else {
        Ok(())
    }
}
