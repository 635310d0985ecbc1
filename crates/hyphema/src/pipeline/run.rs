use image::RgbImage;

use crate::boundary::{locate_boundary, CircleDetector, HoughCircleDetector};
use crate::config::AnalysisConfig;
use crate::estimate::hyphema_percentage;
use crate::frame::preprocess;
use crate::postprocess::apply_closing;
use crate::region::grow_region;
use crate::seed::find_seed;
use crate::AnalysisError;

use super::HyphemaAnalysis;

/// Analyse one colour frame with the built-in Hough circle detector.
pub fn analyze_frame(
    color: &RgbImage,
    config: &AnalysisConfig,
) -> Result<HyphemaAnalysis, AnalysisError> {
    let detector = HoughCircleDetector::new(config.hough.clone());
    analyze_frame_with_detector(color, config, &detector)
}

/// Analyse one colour frame with a caller-supplied circle detector.
pub fn analyze_frame_with_detector(
    color: &RgbImage,
    config: &AnalysisConfig,
    detector: &dyn CircleDetector,
) -> Result<HyphemaAnalysis, AnalysisError> {
    let (width, height) = color.dimensions();
    if width == 0 || height == 0 {
        return Err(AnalysisError::EmptyFrame { width, height });
    }

    let intensity = preprocess(color, &config.preprocess);

    let circle = locate_boundary(
        &intensity.smoothed,
        config.min_radius,
        &config.boundary,
        detector,
    )
    .ok_or(AnalysisError::NoCircleFound)?;

    let seed = find_seed(&intensity.plain, &circle, &config.seed).ok_or(AnalysisError::NoSeedFound)?;

    let growth = grow_region(color, seed, &config.region).ok_or(AnalysisError::NoSeedFound)?;
    let percentage = hyphema_percentage(growth.area, &circle);

    let mut annotated = growth.frame;
    apply_closing(&mut annotated, &config.closing, config.region.highlight);

    tracing::debug!(
        "circle ({}, {}) r={}, seed ({}, {}), area {} px -> {}%",
        circle.center_x,
        circle.center_y,
        circle.radius,
        seed.x,
        seed.y,
        growth.area,
        percentage
    );

    Ok(HyphemaAnalysis {
        circle,
        seed,
        region_area: growth.area,
        percentage,
        annotated,
        mask: growth.mask,
    })
}
