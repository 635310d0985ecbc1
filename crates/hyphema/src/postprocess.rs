//! Optional smoothing of the highlighted region boundary.
//!
//! Morphological closing fills pinholes and notches in the painted region.
//! It only changes the annotated frame: the area is always taken from the
//! grown mask before any closing runs.

use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::distance_transform::Norm;

use crate::config::ClosingConfig;

/// Mask (0/255) of pixels painted exactly in `highlight`.
pub fn highlight_mask(frame: &RgbImage, highlight: [u8; 3]) -> GrayImage {
    GrayImage::from_fn(frame.width(), frame.height(), |x, y| {
        Luma([if frame.get_pixel(x, y).0 == highlight { 255 } else { 0 }])
    })
}

/// Close the highlighted region with a square `kernel_size × kernel_size`
/// structuring element and repaint the result.
///
/// Even sizes behave like the next odd size down; sizes below 2 are a no-op.
pub fn close_highlight(frame: &mut RgbImage, kernel_size: u32, highlight: [u8; 3]) {
    let k = (kernel_size / 2).min(u8::MAX as u32) as u8;
    if k == 0 {
        return;
    }
    let mask = highlight_mask(frame, highlight);
    let closed = imageproc::morphology::close(&mask, Norm::LInf, k);
    for (x, y, px) in closed.enumerate_pixels() {
        if px[0] == 255 {
            frame.put_pixel(x, y, Rgb(highlight));
        }
    }
}

/// Run the configured closing sequence when enabled.
pub fn apply_closing(frame: &mut RgbImage, config: &ClosingConfig, highlight: [u8; 3]) {
    if !config.enable {
        return;
    }
    for &size in &config.kernel_sizes {
        close_highlight(frame, size, highlight);
    }
    tracing::debug!("closed highlight with kernels {:?}", config.kernel_sizes);
}
