//! Seed selection for region growing.
//!
//! Intensities are sampled down the column through the circle centre, from
//! a few rows below the centre to just above the lower edge of the circle.
//! The hyphema/clear-media boundary shows up as a spike in the
//! central-difference signal; the seed is placed halfway between that spike
//! and the bottom of the circle so it lands inside the blood layer.

use image::GrayImage;

use crate::boundary::Circle;
use crate::config::SeedConfig;

/// Pixel from which region growing starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SeedPoint {
    /// Column.
    pub x: u32,
    /// Row.
    pub y: u32,
}

/// Vertical intensity sample at `column`, rows `[start, end)`, clipped to the frame.
pub fn column_profile(gray: &GrayImage, column: u32, start: u32, end: u32) -> Vec<i32> {
    let end = end.min(gray.height());
    if column >= gray.width() || start >= end {
        return Vec::new();
    }
    (start..end)
        .map(|y| gray.get_pixel(column, y)[0] as i32)
        .collect()
}

/// Absolute central-difference signal of a profile.
///
/// `out[0]` is the sentinel `-1`, the last entry copies its left neighbour.
/// Profiles shorter than two samples produce an empty signal.
pub fn central_difference_signal(profile: &[i32]) -> Vec<i32> {
    let n = profile.len();
    if n < 2 {
        return Vec::new();
    }
    let mut signal = Vec::with_capacity(n);
    signal.push(-1);
    for i in 1..(n - 1) {
        signal.push((profile[i + 1] - profile[i - 1]).abs());
    }
    let last = signal[signal.len() - 1];
    signal.push(last);
    signal
}

/// First index whose value exceeds `coefficient · max(signal)` and rises
/// above its left neighbour.
pub fn transition_index(signal: &[i32], coefficient: f64) -> Option<usize> {
    let peak = *signal.iter().max()?;
    let threshold = peak as f64 * coefficient;
    (1..signal.len()).find(|&i| signal[i] as f64 > threshold && signal[i] > signal[i - 1])
}

/// Find the seed for region growing inside `circle`.
///
/// Returns `None` when the sampled column is too short, no transition
/// qualifies, or the seed would fall outside the frame.
pub fn find_seed(gray: &GrayImage, circle: &Circle, config: &SeedConfig) -> Option<SeedPoint> {
    let scan_start = circle.center_y.checked_add(config.row_offset)?;
    let end_row = circle.center_y.checked_add(circle.radius)?.checked_sub(1)?;

    let profile = column_profile(gray, circle.center_x, scan_start, end_row);
    let signal = central_difference_signal(&profile);
    let index = transition_index(&signal, config.threshold_coefficient)?;

    let start_row = scan_start + index as u32;
    let seed_row = (start_row + end_row) / 2;
    if seed_row >= gray.height() {
        tracing::debug!("seed row {} outside frame height {}", seed_row, gray.height());
        return None;
    }

    tracing::debug!(
        "transition at row {}, seed ({}, {})",
        start_row,
        circle.center_x,
        seed_row
    );
    Some(SeedPoint {
        x: circle.center_x,
        y: seed_row,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn column_image(values: &[u8]) -> GrayImage {
        let mut img = GrayImage::new(3, values.len() as u32);
        for (y, &v) in values.iter().enumerate() {
            for x in 0..3 {
                img.put_pixel(x, y as u32, Luma([v]));
            }
        }
        img
    }

    #[test]
    fn signal_has_sentinel_and_copied_tail() {
        let signal = central_difference_signal(&[10, 10, 50, 90, 90]);
        assert_eq!(signal, vec![-1, 40, 80, 40, 40]);
    }

    #[test]
    fn short_profiles_have_no_signal() {
        assert!(central_difference_signal(&[]).is_empty());
        assert!(central_difference_signal(&[7]).is_empty());
        assert_eq!(central_difference_signal(&[7, 9]), vec![-1, -1]);
    }

    #[test]
    fn transition_is_first_rise_above_threshold() {
        assert_eq!(transition_index(&[-1, 10, 100, 20, 95, 95], 0.9), Some(2));
        assert_eq!(transition_index(&[-1, 0, 100, 100, 100], 0.9), Some(2));
        assert_eq!(transition_index(&[-1, 100, 0, 0], 0.9), Some(1));
        assert_eq!(transition_index(&[-1, 50, 40, 0, 99, 99], 0.9), Some(4));
    }

    #[test]
    fn flat_signals_have_no_transition() {
        assert_eq!(transition_index(&[-1, 0, 0, 0], 0.9), None);
        assert_eq!(transition_index(&[-1, -1], 0.9), None);
        assert_eq!(transition_index(&[], 0.9), None);
    }

    #[test]
    fn seed_lands_between_transition_and_circle_bottom() {
        // Clear media (200) until row 30, hyphema (120) from row 31.
        let mut values = vec![200u8; 31];
        values.extend(std::iter::repeat(120u8).take(29));
        let img = column_image(&values);
        let circle = Circle::new(1, 10, 40);

        // Sample rows [15, 49): edge between rows 30 and 31 peaks at index
        // 15 (row 30); seed = (30 + 49) / 2.
        let seed = find_seed(&img, &circle, &SeedConfig::default()).unwrap();
        assert_eq!(seed, SeedPoint { x: 1, y: 39 });
    }

    #[test]
    fn tiny_radius_reports_none() {
        let img = column_image(&[200; 40]);
        for radius in 1..=6 {
            let circle = Circle::new(1, 10, radius);
            assert_eq!(find_seed(&img, &circle, &SeedConfig::default()), None);
        }
    }

    #[test]
    fn uniform_column_reports_none() {
        let img = column_image(&[90; 80]);
        let circle = Circle::new(1, 20, 40);
        assert_eq!(find_seed(&img, &circle, &SeedConfig::default()), None);
    }

    #[test]
    fn column_outside_frame_reports_none() {
        let img = column_image(&[90; 80]);
        let circle = Circle::new(10, 20, 40);
        assert_eq!(find_seed(&img, &circle, &SeedConfig::default()), None);
    }

    #[test]
    fn seed_below_frame_bottom_reports_none() {
        // Circle bottom (row 50) lies past a 30-row frame. Edge between rows
        // 20 and 21 gives start row 20; seed = (20 + 49) / 2 = 34.
        let mut values = vec![200u8; 21];
        values.extend(std::iter::repeat(120u8).take(9));
        let img = column_image(&values);
        let circle = Circle::new(1, 10, 40);
        assert_eq!(find_seed(&img, &circle, &SeedConfig::default()), None);
    }

    #[test]
    fn profile_is_clipped_to_frame() {
        let img = column_image(&[1, 2, 3, 4, 5]);
        assert_eq!(column_profile(&img, 0, 3, 50), vec![4, 5]);
        assert!(column_profile(&img, 0, 6, 50).is_empty());
    }
}
