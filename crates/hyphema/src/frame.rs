//! Frame conversion, smoothing and file I/O.
//!
//! The intensity conversion uses the fixed-point BT.601 weights
//! (0.299, 0.587, 0.114) so gray values match what common vision toolkits
//! produce for the same colour input.

use std::path::Path;

use image::{GrayImage, Luma, Rgb, RgbImage};

use crate::config::PreprocessConfig;
use crate::AnalysisError;

const LUMA_SHIFT: u32 = 14;
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;

/// BT.601 luma of one RGB pixel, rounded to the nearest integer.
#[inline]
pub fn luma_601(px: Rgb<u8>) -> u8 {
    let [r, g, b] = px.0;
    let acc = r as u32 * LUMA_R + g as u32 * LUMA_G + b as u32 * LUMA_B + (1 << (LUMA_SHIFT - 1));
    (acc >> LUMA_SHIFT) as u8
}

/// Convert a colour frame to a single-channel intensity frame.
pub fn to_intensity(color: &RgbImage) -> GrayImage {
    imageproc::map::map_colors(color, |px| Luma([luma_601(px)]))
}

/// Expand an intensity frame back to three equal channels.
pub fn gray_to_rgb(gray: &GrayImage) -> RgbImage {
    imageproc::map::map_colors(gray, |px| Rgb([px[0], px[0], px[0]]))
}

/// Intensity views of one colour frame.
#[derive(Debug, Clone)]
pub struct IntensityFrames {
    /// Plain BT.601 intensity.
    pub plain: GrayImage,
    /// Median-smoothed intensity fed to the circle search.
    pub smoothed: GrayImage,
}

/// Build the plain and smoothed intensity frames.
pub fn preprocess(color: &RgbImage, config: &PreprocessConfig) -> IntensityFrames {
    let plain = to_intensity(color);
    let smoothed = if config.median_radius == 0 {
        plain.clone()
    } else {
        imageproc::filter::median_filter(&plain, config.median_radius, config.median_radius)
    };
    IntensityFrames { plain, smoothed }
}

/// Decode an image file into an 8-bit RGB frame.
pub fn load_color_frame(path: &Path) -> Result<RgbImage, AnalysisError> {
    let img = image::open(path).map_err(|e| AnalysisError::Decode {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(img.to_rgb8())
}

/// Encode a frame to `path`; the format follows the file extension.
pub fn save_frame(path: &Path, frame: &RgbImage) -> Result<(), AnalysisError> {
    frame.save(path).map_err(|e| AnalysisError::Encode {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}
