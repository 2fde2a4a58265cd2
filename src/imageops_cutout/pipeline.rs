//! Orchestration of the three cleanup stages.
//!
//! Stages always run in the order segment, filter, refine. Each one
//! mutates the raster in place and the raster keeps its dimensions
//! throughout.

use image::Rgba;
use imageproc::definitions::Image;
use tracing::{debug, info, warn};

use crate::error::CleanupError;
use crate::imageops_cutout::alpha_channel::ExtractAlpha;
use crate::imageops_cutout::background::{RemoveBackground, SegmentReport};
use crate::imageops_cutout::components::{ComponentOutcome, KeepLargestComponent};
use crate::imageops_cutout::morphology::opaque_area;
use crate::imageops_cutout::refine::{RefineEdges, RefineOptions};
use crate::utils::validate_non_empty_image;

/// Default color distance threshold
///
/// Low enough that light foreground regions next to a light background
/// survive the flood fill.
pub const DEFAULT_THRESHOLD: u32 = 10;

/// Configuration of a cleanup run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanupConfig {
    /// Exclusive bound on the RGB distance to a corner color for background pixels
    pub threshold: u32,
    pub refine: RefineOptions,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            refine: RefineOptions::default(),
        }
    }
}

impl CleanupConfig {
    pub const fn with_threshold(mut self, threshold: u32) -> Self {
        self.threshold = threshold;
        self
    }

    pub const fn with_refine(mut self, refine: RefineOptions) -> Self {
        self.refine = refine;
        self
    }
}

/// A pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    /// Background flood fill from the corners
    Segment,
    /// Largest connected component selection
    Filter,
    /// Erosion and feathering of the alpha channel
    Refine,
}

impl Stage {
    /// Every stage, in execution order.
    pub const ALL: [Self; 3] = [Self::Segment, Self::Filter, Self::Refine];

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Segment => "segment",
            Self::Filter => "filter",
            Self::Refine => "refine",
        }
    }
}

/// Summary of a cleanup run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanupReport {
    pub dimensions: (u32, u32),
    /// Present when the segment stage ran
    pub segment: Option<SegmentReport>,
    /// Present when the filter stage ran
    pub components: Option<ComponentOutcome>,
    /// Pixels with non-zero alpha before the first stage
    pub opaque_before: usize,
    /// Pixels with non-zero alpha after the last stage
    pub opaque_after: usize,
}

/// Runs the selected stages over `image` in place.
///
/// Stages run in the fixed order segment, filter, refine no matter how
/// `stages` is ordered; a stage listed twice runs once.
///
/// # Errors
///
/// * `CleanupError::EmptyImage` - When the image has a zero dimension
pub fn run_stages(
    image: &mut Image<Rgba<u8>>,
    config: &CleanupConfig,
    stages: &[Stage],
) -> Result<CleanupReport, CleanupError> {
    let dimensions = image.dimensions();
    validate_non_empty_image(dimensions.0, dimensions.1)?;

    let opaque_before = opaque_area(&image.alpha_mask());
    let mut report = CleanupReport {
        dimensions,
        segment: None,
        components: None,
        opaque_before,
        opaque_after: opaque_before,
    };

    for stage in Stage::ALL.into_iter().filter(|stage| stages.contains(stage)) {
        debug!(stage = stage.name(), "running stage");
        match stage {
            Stage::Segment => {
                let segment = image.remove_background(config.threshold)?;
                info!(
                    removed = segment.removed,
                    total = segment.total,
                    threshold = config.threshold,
                    "background removed"
                );
                if segment.is_corners_only() {
                    info!("no background reachable beyond the corners");
                } else if segment.is_everything() {
                    warn!("every pixel was classified as background");
                }
                report.segment = Some(segment);
            }
            Stage::Filter => {
                let outcome = image.keep_largest_component()?;
                match outcome {
                    ComponentOutcome::Kept {
                        label,
                        area,
                        component_count,
                    } => {
                        info!(components = component_count, "found components");
                        info!(label, area, "kept largest component");
                    }
                    ComponentOutcome::NoComponent => {
                        warn!("no foreground component found; raster left unchanged");
                    }
                }
                report.components = Some(outcome);
            }
            Stage::Refine => {
                image.refine_edges_mut(&config.refine)?;
                info!(
                    erosion_iterations = config.refine.erosion_iterations,
                    feather = config.refine.feather,
                    "edges refined"
                );
            }
        }
    }

    report.opaque_after = opaque_area(&image.alpha_mask());
    Ok(report)
}

/// Runs the full segment, filter, refine pipeline over `image` in place.
///
/// # Examples
///
/// ```no_run
/// use imageops_cutout::{clean_cutout, CleanupConfig, Image};
/// use image::Rgba;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut image: Image<Rgba<u8>> = Image::from_pixel(32, 32, Rgba([255, 255, 255, 255]));
/// let report = clean_cutout(&mut image, &CleanupConfig::default())?;
/// assert_eq!(report.opaque_after, 0);
/// # Ok(())
/// # }
/// ```
pub fn clean_cutout(
    image: &mut Image<Rgba<u8>>,
    config: &CleanupConfig,
) -> Result<CleanupReport, CleanupError> {
    run_stages(image, config, &Stage::ALL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_framed_image;

    const BG: Rgba<u8> = Rgba([240, 240, 240, 255]);
    const FG: Rgba<u8> = Rgba([30, 60, 90, 255]);

    #[test]
    fn default_config() {
        let config = CleanupConfig::default();
        assert_eq!(config.threshold, 10);
        assert_eq!(config.refine.erosion_iterations, 1);
        assert!(config.refine.feather);

        let config = config.with_threshold(0).with_refine(RefineOptions {
            erosion_iterations: 2,
            feather: false,
        });
        assert_eq!(config.threshold, 0);
        assert_eq!(config.refine.erosion_iterations, 2);
    }

    #[test]
    fn full_run_reports_each_stage() {
        let mut image = create_framed_image(12, 12, 3, BG, FG);
        let report = clean_cutout(&mut image, &CleanupConfig::default()).unwrap();

        assert_eq!(report.dimensions, (12, 12));
        assert_eq!(report.opaque_before, 144);
        assert_eq!(report.segment.map(|s| s.removed), Some(144 - 36));
        assert_eq!(
            report.components,
            Some(ComponentOutcome::Kept {
                label: 1,
                area: 36,
                component_count: 1
            })
        );
        // 4x4 eroded core plus the feathered ring around it
        assert_eq!(report.opaque_after, 36);
        assert_eq!(image.get_pixel(5, 5)[3], 255);
    }

    #[test]
    fn stages_run_in_canonical_order() {
        let mut ordered = create_framed_image(10, 10, 2, BG, FG);
        let mut shuffled = ordered.clone();
        let config = CleanupConfig::default();

        run_stages(&mut ordered, &config, &Stage::ALL).unwrap();
        run_stages(
            &mut shuffled,
            &config,
            &[Stage::Refine, Stage::Filter, Stage::Segment, Stage::Refine],
        )
        .unwrap();

        assert_eq!(ordered, shuffled);
    }

    #[test]
    fn single_stage_leaves_other_reports_empty() {
        let mut image = create_framed_image(10, 10, 2, BG, FG);
        let report = run_stages(&mut image, &CleanupConfig::default(), &[Stage::Segment]).unwrap();

        assert!(report.segment.is_some());
        assert!(report.components.is_none());
        assert_eq!(report.opaque_after, 36);
    }

    #[test]
    fn no_stages_is_a_no_op() {
        let mut image = create_framed_image(6, 6, 1, BG, FG);
        let original = image.clone();
        let report = run_stages(&mut image, &CleanupConfig::default(), &[]).unwrap();

        assert_eq!(image, original);
        assert_eq!(report.opaque_before, report.opaque_after);
    }

    #[test]
    fn empty_image_is_rejected() {
        let mut image: Image<Rgba<u8>> = Image::new(0, 0);
        assert_eq!(
            clean_cutout(&mut image, &CleanupConfig::default()),
            Err(CleanupError::EmptyImage { width: 0, height: 0 })
        );
    }

    #[test]
    fn stage_names() {
        let names: Vec<_> = Stage::ALL.iter().map(Stage::name).collect();
        assert_eq!(names, ["segment", "filter", "refine"]);
    }
}
