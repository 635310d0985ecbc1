//! Hyphema percentage of the boundary circle.

use crate::boundary::Circle;

/// Region area as a percentage of `π·r²`, truncated to an integer.
///
/// Not clamped: a region leaking outside the circle can exceed 100.
pub fn hyphema_percentage(region_area: usize, circle: &Circle) -> u32 {
    let ratio = region_area as f64 / circle.area();
    (ratio * 100.0) as u32
}
