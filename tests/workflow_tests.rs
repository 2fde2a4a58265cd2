//! Integration tests for imageops-cutout workflows
//!
//! These tests run the cleanup stages one after another, the way the
//! `cutout-clean` binary does, and check the raster between stages.

use image::Rgba;
use imageops_cutout::{
    clean_cutout, run_stages, CleanupConfig, ComponentOutcome, ExtractAlpha, Image,
    KeepLargestComponent, RefineEdges, RefineOptions, RemoveBackground, Stage,
};

const BACKGROUND: Rgba<u8> = Rgba([245, 245, 245, 255]);
const FOREGROUND: Rgba<u8> = Rgba([40, 90, 160, 255]);

/// 20x20 canvas with a 5x5 block at (7..12, 7..12) and a 1x1 speck at (3, 15)
fn block_and_speck_image() -> Image<Rgba<u8>> {
    Image::from_fn(20, 20, |x, y| {
        let in_block = (7..12).contains(&x) && (7..12).contains(&y);
        if in_block || (x, y) == (3, 15) {
            FOREGROUND
        } else {
            BACKGROUND
        }
    })
}

fn alpha_at(image: &Image<Rgba<u8>>, x: u32, y: u32) -> u8 {
    image.get_pixel(x, y)[3]
}

fn opaque_count(image: &Image<Rgba<u8>>) -> usize {
    image.pixels().filter(|pixel| pixel[3] != 0).count()
}

#[test]
fn uniform_image_is_removed_entirely() {
    let mut image = Image::from_pixel(10, 10, Rgba([120, 80, 40, 255]));
    let config = CleanupConfig::default().with_threshold(10);

    let report = clean_cutout(&mut image, &config).expect("Cleanup should succeed");

    let segment = report.segment.expect("Segment stage should report");
    assert!(segment.is_everything());
    assert_eq!(segment.removed, 100);
    assert_eq!(report.components, Some(ComponentOutcome::NoComponent));
    assert_eq!(report.opaque_after, 0);
    assert!(image.pixels().all(|pixel| pixel[3] == 0));
    // color data survives
    assert!(image.pixels().all(|pixel| pixel.0[..3] == [120, 80, 40]));
}

#[test]
fn block_and_speck_stage_by_stage() {
    let mut image = block_and_speck_image();
    let config = CleanupConfig::default();

    // Stage 1: the frame around the block disappears, the speck stays
    let segment = image
        .remove_background(config.threshold)
        .expect("Segment should succeed");
    assert_eq!(segment.removed, 400 - 26);
    assert_eq!(opaque_count(&image), 26);
    assert_eq!(alpha_at(&image, 0, 0), 0);
    assert_eq!(alpha_at(&image, 19, 10), 0);
    assert_eq!(alpha_at(&image, 3, 15), 255);
    assert_eq!(alpha_at(&image, 9, 9), 255);

    // Stage 2: only the 5x5 block survives
    let outcome = image
        .keep_largest_component()
        .expect("Filter should succeed");
    assert_eq!(
        outcome,
        ComponentOutcome::Kept {
            label: 1,
            area: 25,
            component_count: 2
        }
    );
    assert_eq!(outcome.discarded(), 1);
    assert_eq!(alpha_at(&image, 3, 15), 0);
    assert_eq!(opaque_count(&image), 25);

    // Stage 3: erosion to 3x3, feathered boundary
    image
        .refine_edges_mut(&config.refine)
        .expect("Refine should succeed");
    assert_eq!(alpha_at(&image, 9, 9), 255);
    assert_eq!(alpha_at(&image, 8, 8), 143);
    assert_eq!(alpha_at(&image, 7, 9), 64);
    assert_eq!(alpha_at(&image, 7, 7), 16);
    assert_eq!(alpha_at(&image, 6, 6), 0);
    assert_eq!(opaque_count(&image), 25);

    let soft_edge = image
        .pixels()
        .filter(|pixel| pixel[3] > 0 && pixel[3] < 255)
        .count();
    assert_eq!(soft_edge, 25 - 1);
}

#[test]
fn staged_run_matches_full_pipeline() {
    let config = CleanupConfig::default();

    let mut staged = block_and_speck_image();
    for stage in Stage::ALL {
        run_stages(&mut staged, &config, &[stage]).expect("Stage should succeed");
    }

    let mut full = block_and_speck_image();
    let report = clean_cutout(&mut full, &config).expect("Cleanup should succeed");

    assert_eq!(staged, full);
    assert_eq!(report.opaque_before, 400);
    assert_eq!(report.opaque_after, 25);
}

#[test]
fn transparent_input_has_no_component() {
    let original = Image::from_pixel(8, 8, Rgba([10, 20, 30, 0]));

    let mut filtered = original.clone();
    let outcome = filtered
        .keep_largest_component()
        .expect("Filter should succeed");
    assert_eq!(outcome, ComponentOutcome::NoComponent);
    assert!(!outcome.is_kept());
    assert_eq!(filtered, original);

    let mut cleaned = original.clone();
    let report = clean_cutout(&mut cleaned, &CleanupConfig::default())
        .expect("Pipeline should complete");
    assert_eq!(report.components, Some(ComponentOutcome::NoComponent));
    assert_eq!(cleaned, original);
}

#[test]
fn zero_threshold_removes_exact_matches_only() {
    let background = Rgba([200, 200, 200, 255]);
    let mut image = Image::from_pixel(6, 6, background);
    // anti-aliased edge pixels, one unit away in a single channel
    image.put_pixel(0, 3, Rgba([201, 200, 200, 255]));
    image.put_pixel(4, 5, Rgba([200, 200, 199, 255]));
    let mut lenient = image.clone();

    let strict = image.remove_background(0).expect("Segment should succeed");
    assert_eq!(strict.removed, 34);
    assert_eq!(alpha_at(&image, 0, 3), 255);
    assert_eq!(alpha_at(&image, 4, 5), 255);
    assert_eq!(alpha_at(&image, 0, 2), 0);

    let report = lenient.remove_background(10).expect("Segment should succeed");
    assert!(report.is_everything());
}

#[test]
fn hard_edges_when_feathering_is_disabled() {
    let mut image = block_and_speck_image();
    let config = CleanupConfig::default().with_refine(RefineOptions {
        erosion_iterations: 1,
        feather: false,
    });

    clean_cutout(&mut image, &config).expect("Cleanup should succeed");

    let alpha = image.alpha_mask();
    assert!(alpha.iter().all(|&value| value == 0 || value == 255));
    assert_eq!(opaque_count(&image), 9);
}

#[test]
fn refine_alone_keeps_rgb_and_dimensions() {
    let image = block_and_speck_image();
    let refined = image
        .refine_edges(&RefineOptions {
            erosion_iterations: 2,
            feather: true,
        })
        .expect("Refine should succeed");

    assert_eq!(refined.dimensions(), image.dimensions());
    for (before, after) in image.pixels().zip(refined.pixels()) {
        assert_eq!(before.0[..3], after.0[..3]);
    }
    // the whole canvas is opaque before refinement, erosion ignores the border
    assert!(refined.pixels().all(|pixel| pixel[3] == 255));
}
