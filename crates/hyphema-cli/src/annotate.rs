//! Percentage overlay drawn onto the annotated frame.
//!
//! Glyphs come from a compact 3×5 bitmap font (digits and `%`), scaled up
//! and rendered as filled squares.

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

/// Overlay colour (RGB).
pub const TEXT_COLOR: [u8; 3] = [51, 51, 255];
/// Top-left corner of the text.
pub const TEXT_ORIGIN: (i32, i32) = (10, 10);
/// Pixel size of one font cell.
pub const TEXT_SCALE: u32 = 4;

/// Rows of a 3-wide glyph, bit 2 is the leftmost column.
fn glyph(c: char) -> [u8; 5] {
    match c {
        '0' => [0x7, 0x5, 0x5, 0x5, 0x7],
        '1' => [0x2, 0x6, 0x2, 0x2, 0x7],
        '2' => [0x7, 0x1, 0x7, 0x4, 0x7],
        '3' => [0x7, 0x1, 0x7, 0x1, 0x7],
        '4' => [0x5, 0x5, 0x7, 0x1, 0x1],
        '5' => [0x7, 0x4, 0x7, 0x1, 0x7],
        '6' => [0x7, 0x4, 0x7, 0x5, 0x7],
        '7' => [0x7, 0x1, 0x2, 0x4, 0x4],
        '8' => [0x7, 0x5, 0x7, 0x5, 0x7],
        '9' => [0x7, 0x5, 0x7, 0x1, 0x7],
        '%' => [0x5, 0x1, 0x2, 0x4, 0x5],
        _ => [0x0; 5],
    }
}

/// Draw `text` with its top-left corner at `origin`; pixels outside the frame are clipped.
pub fn draw_text(frame: &mut RgbImage, origin: (i32, i32), text: &str, color: [u8; 3], scale: u32) {
    let step = (4 * scale) as i32;
    for (i, c) in text.chars().enumerate() {
        let x0 = origin.0 + i as i32 * step;
        for (row, bits) in glyph(c).iter().enumerate() {
            for col in 0..3 {
                if (bits >> (2 - col)) & 1 == 0 {
                    continue;
                }
                let x = x0 + (col * scale) as i32;
                let y = origin.1 + (row as u32 * scale) as i32;
                draw_filled_rect_mut(frame, Rect::at(x, y).of_size(scale, scale), Rgb(color));
            }
        }
    }
}

/// Write `"{percentage}%"` in the top-left corner.
pub fn draw_percentage(frame: &mut RgbImage, percentage: u32) {
    draw_text(
        frame,
        TEXT_ORIGIN,
        &format!("{}%", percentage),
        TEXT_COLOR,
        TEXT_SCALE,
    );
}
