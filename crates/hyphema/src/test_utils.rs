//! Shared synthetic-eye renderers for unit tests.

use image::{GrayImage, Luma, Rgb, RgbImage};

/// Render a filled disk on a uniform background.
///
/// A pixel belongs to the disk when its centre is within `radius` of `center`.
pub(crate) fn draw_disk_image(
    w: u32,
    h: u32,
    center: [f32; 2],
    radius: f32,
    disk_pix: u8,
    bg_pix: u8,
) -> GrayImage {
    GrayImage::from_fn(w, h, |x, y| {
        let dx = x as f32 - center[0];
        let dy = y as f32 - center[1];
        let pix = if (dx * dx + dy * dy).sqrt() <= radius {
            disk_pix
        } else {
            bg_pix
        };
        Luma([pix])
    })
}

/// Synthetic eye: a bright iris disk with a darker blood layer filling the
/// disk from `hyphema_top_row` downwards.
pub(crate) struct SyntheticEye {
    pub frame: RgbImage,
    /// Number of pixels painted with the hyphema value.
    pub hyphema_area: usize,
}

pub(crate) fn draw_eye_frame(
    size: u32,
    center: [f32; 2],
    radius: f32,
    hyphema_top_row: u32,
    iris_pix: u8,
    hyphema_pix: u8,
    bg_pix: u8,
) -> SyntheticEye {
    let disk = draw_disk_image(size, size, center, radius, iris_pix, bg_pix);
    let mut frame = RgbImage::new(size, size);
    let mut hyphema_area = 0;
    for (x, y, px) in disk.enumerate_pixels() {
        let v = if px[0] == iris_pix && y >= hyphema_top_row {
            hyphema_area += 1;
            hyphema_pix
        } else {
            px[0]
        };
        frame.put_pixel(x, y, Rgb([v, v, v]));
    }
    SyntheticEye {
        frame,
        hyphema_area,
    }
}

/// The reference scenario: 200×200, iris r = 50 at (100, 100), blood layer
/// of roughly 1000 px at the bottom of the iris.
pub(crate) fn reference_eye() -> SyntheticEye {
    draw_eye_frame(200, [100.0, 100.0], 50.0, 132, 200, 100, 60)
}
