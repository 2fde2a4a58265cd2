use std::path::PathBuf;

use thiserror::Error;

/// Error type for alpha channel operations
///
/// This error type covers failures that can occur when writing a mask
/// back into the alpha channel of an RGBA raster.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlphaMaskError {
    /// Image and mask dimensions do not match
    ///
    /// This error occurs when attempting to replace the alpha channel
    /// with a mask whose dimensions don't align with the image.
    #[error("Image and mask dimensions do not match: expected {expected:?}, actual {actual:?}")]
    DimensionMismatch {
        /// Expected dimensions (width, height)
        expected: (u32, u32),
        /// Actual dimensions (width, height)
        actual: (u32, u32),
    },
}

/// Error type for the cleanup stages
///
/// Degenerate but valid outcomes (nothing classified as background, no
/// foreground component left) are reported through the stage reports,
/// never through this type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CleanupError {
    /// The raster has a zero width or height
    #[error("Image dimensions must be non-zero, got {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    /// Writing a stage result back into the alpha channel failed
    #[error(transparent)]
    AlphaMask(#[from] AlphaMaskError),
}

/// Error type for loading and persisting rasters
#[derive(Debug, Error)]
pub enum RasterIoError {
    /// The input path could not be opened or its format sniffed
    #[error("Failed to open {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input file is not a decodable image
    #[error("Failed to decode {}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The output path has no file name to write to
    #[error("Output path {} does not name a file", path.display())]
    InvalidOutputPath { path: PathBuf },

    /// Encoding the raster into the temporary output file failed
    #[error("Failed to encode {}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Moving the finished temporary file over the destination failed
    #[error("Failed to persist {}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
