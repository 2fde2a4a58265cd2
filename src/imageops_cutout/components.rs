//! Noise suppression by keeping the largest connected alpha region.

use image::{Luma, Rgba};
use imageproc::{
    definitions::Image,
    map::{map_colors, map_colors2},
    region_labelling::{connected_components, Connectivity},
};
use tracing::debug;

use crate::error::AlphaMaskError;
use crate::imageops_cutout::alpha_channel::{ExtractAlpha, ModifyAlpha};

/// Connected components of the non-transparent pixels of an alpha mask
///
/// Pixels with any non-zero alpha are labelled using 8-connectivity.
/// Label 0 is the transparent background, labels `1..=count()` are the
/// components in the order they are first met in a row-major scan.
#[derive(Debug, Clone)]
pub struct ComponentLabels {
    labels: Image<Luma<u32>>,
    /// Pixel count per label, index 0 being the background
    areas: Vec<u32>,
}

impl ComponentLabels {
    /// Labels the non-zero pixels of `alpha`.
    pub fn from_alpha(alpha: &Image<Luma<u8>>) -> Self {
        let binary = map_colors(alpha, |Luma([value])| Luma([if value > 0 { 255u8 } else { 0 }]));
        let labels = if binary.len() == 1 {
            // connected_components cannot label a single-pixel raster
            map_colors(&binary, |Luma([value])| Luma([u32::from(value != 0)]))
        } else {
            connected_components(&binary, Connectivity::Eight, Luma([0u8]))
        };

        let count = labels.iter().copied().max().unwrap_or(0) as usize;
        let mut areas = vec![0u32; count + 1];
        for &label in labels.iter() {
            areas[label as usize] += 1;
        }

        Self { labels, areas }
    }

    /// Number of foreground components.
    pub fn count(&self) -> usize {
        self.areas.len() - 1
    }

    /// The label map, 0 for background.
    pub const fn labels(&self) -> &Image<Luma<u32>> {
        &self.labels
    }

    /// Pixel area of a foreground label, `None` for 0 or unknown labels.
    pub fn area(&self, label: u32) -> Option<u32> {
        if label == 0 {
            return None;
        }
        self.areas.get(label as usize).copied()
    }

    /// The label with the largest area and that area.
    ///
    /// Equal areas resolve to the lowest label, i.e. the component met
    /// first in scan order. `None` when there is no foreground.
    pub fn largest(&self) -> Option<(u32, u32)> {
        self.areas
            .iter()
            .enumerate()
            .skip(1)
            .fold(None, |best, (label, &area)| match best {
                Some((_, best_area)) if best_area >= area => best,
                _ => Some((label as u32, area)),
            })
    }

    /// Mask with 255 on the pixels of `label` and 0 elsewhere.
    pub fn keep_mask(&self, label: u32) -> Image<Luma<u8>> {
        map_colors(&self.labels, |Luma([value])| {
            Luma([if value == label && label != 0 { 255u8 } else { 0 }])
        })
    }
}

/// Result of the component filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentOutcome {
    /// The largest component was kept, every other one cleared
    Kept {
        label: u32,
        area: u32,
        component_count: usize,
    },
    /// The raster has no pixel with non-zero alpha; it was left untouched
    NoComponent,
}

impl ComponentOutcome {
    pub const fn is_kept(&self) -> bool {
        matches!(self, Self::Kept { .. })
    }

    /// Number of components that were cleared.
    pub const fn discarded(&self) -> usize {
        match self {
            Self::Kept {
                component_count, ..
            } => *component_count - 1,
            Self::NoComponent => 0,
        }
    }
}

/// Trait for suppressing disconnected noise in RGBA cutouts
pub trait KeepLargestComponent {
    /// Keeps only the largest 8-connected region of non-zero alpha
    ///
    /// Pixels of the kept region retain their original alpha; all other
    /// pixels get alpha 0. RGB values are never changed. A raster without
    /// any non-transparent pixel is returned untouched with
    /// [`ComponentOutcome::NoComponent`].
    ///
    /// # Errors
    ///
    /// * `AlphaMaskError::DimensionMismatch` - When the rebuilt alpha does not fit the image
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use imageops_cutout::{ComponentOutcome, Image, KeepLargestComponent};
    /// use image::Rgba;
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut image: Image<Rgba<u8>> = Image::new(8, 8);
    /// image.put_pixel(1, 1, Rgba([255, 0, 0, 255]));
    /// let outcome = image.keep_largest_component()?;
    /// assert!(matches!(outcome, ComponentOutcome::Kept { area: 1, .. }));
    /// # Ok(())
    /// # }
    /// ```
    fn keep_largest_component(&mut self) -> Result<ComponentOutcome, AlphaMaskError>;
}

impl KeepLargestComponent for Image<Rgba<u8>> {
    fn keep_largest_component(&mut self) -> Result<ComponentOutcome, AlphaMaskError> {
        let alpha = self.alpha_mask();
        let components = ComponentLabels::from_alpha(&alpha);

        let Some((label, area)) = components.largest() else {
            return Ok(ComponentOutcome::NoComponent);
        };

        let keep = components.keep_mask(label);
        let filtered = map_colors2(&alpha, &keep, |Luma([value]), Luma([flag])| {
            Luma([value & flag])
        });
        self.replace_alpha_mut(&filtered)?;

        debug!(
            components = components.count(),
            label, area, "largest component kept"
        );
        Ok(ComponentOutcome::Kept {
            label,
            area,
            component_count: components.count(),
        })
    }
}
