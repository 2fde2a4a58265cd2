//! Loading and persisting rasters.
//!
//! Output is always written as PNG, losslessly and with its alpha channel.
//! The encoder writes to a hidden temporary file next to the destination,
//! which is renamed over the destination only once encoding succeeded.

use std::fs;
use std::path::{Path, PathBuf};

use image::{ColorType, ImageFormat, ImageReader, Rgba};
use imageproc::definitions::Image;
use tracing::debug;

use crate::error::RasterIoError;
use crate::imageops_cutout::color::{sample_corners, CornerSample};

/// Decodes an image file into an 8-bit RGBA raster.
///
/// # Errors
///
/// * `RasterIoError::Open` - When the file cannot be opened
/// * `RasterIoError::Decode` - When the content is not a decodable image
pub fn load_rgba(path: impl AsRef<Path>) -> Result<Image<Rgba<u8>>, RasterIoError> {
    let path = path.as_ref();
    let reader = open_reader(path)?;
    let decoded = reader.decode().map_err(|source| RasterIoError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(
        path = %path.display(),
        width = decoded.width(),
        height = decoded.height(),
        color = ?decoded.color(),
        "image loaded"
    );
    Ok(decoded.to_rgba8())
}

/// Writes an RGBA raster to `path` as PNG.
///
/// The destination is replaced atomically: on error it is left as it was
/// and the temporary file is removed.
///
/// # Errors
///
/// * `RasterIoError::InvalidOutputPath` - When `path` has no file name
/// * `RasterIoError::Encode` - When encoding fails
/// * `RasterIoError::Persist` - When the temporary file cannot be renamed
pub fn save_rgba(image: &Image<Rgba<u8>>, path: impl AsRef<Path>) -> Result<(), RasterIoError> {
    let path = path.as_ref();
    let temporary = temporary_path(path)?;

    if let Err(source) = image.save_with_format(&temporary, ImageFormat::Png) {
        let _ = fs::remove_file(&temporary);
        return Err(RasterIoError::Encode {
            path: path.to_path_buf(),
            source,
        });
    }

    if let Err(source) = fs::rename(&temporary, path) {
        let _ = fs::remove_file(&temporary);
        return Err(RasterIoError::Persist {
            path: path.to_path_buf(),
            source,
        });
    }

    debug!(path = %path.display(), "image saved");
    Ok(())
}

/// Sibling path `.<file name>.tmp` used while encoding.
fn temporary_path(path: &Path) -> Result<PathBuf, RasterIoError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| RasterIoError::InvalidOutputPath {
            path: path.to_path_buf(),
        })?;

    let mut name = std::ffi::OsString::from(".");
    name.push(file_name);
    name.push(".tmp");
    Ok(path.with_file_name(name))
}

fn open_reader(path: &Path) -> Result<ImageReader<std::io::BufReader<fs::File>>, RasterIoError> {
    ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|source| RasterIoError::Open {
            path: path.to_path_buf(),
            source,
        })
}

/// Basic facts about an image file
#[derive(Debug, Clone, PartialEq)]
pub struct RasterSummary {
    /// Container format detected from the content
    pub format: Option<ImageFormat>,
    /// Color type of the decoded image before any conversion
    pub color: ColorType,
    pub dimensions: (u32, u32),
    /// Corner pixels after conversion to RGBA, `None` for empty images
    pub corners: Option<[CornerSample; 4]>,
}

/// Decodes an image and reports its format, color type, size and corner pixels.
///
/// # Errors
///
/// Same as [`load_rgba`].
pub fn inspect(path: impl AsRef<Path>) -> Result<RasterSummary, RasterIoError> {
    let path = path.as_ref();
    let reader = open_reader(path)?;
    let format = reader.format();
    let decoded = reader.decode().map_err(|source| RasterIoError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let color = decoded.color();
    let rgba = decoded.to_rgba8();
    Ok(RasterSummary {
        format,
        color,
        dimensions: rgba.dimensions(),
        corners: sample_corners(&rgba),
    })
}
