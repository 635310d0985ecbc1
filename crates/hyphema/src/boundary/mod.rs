//! Iris/limbus boundary search.
//!
//! The locator sweeps an ascending family of maximum-radius ceilings and
//! runs a circle detector under each one. Candidates are compared with a
//! score that is only replaced on a strictly smaller value; the score is the
//! same constant for every circle, so the first circle of the first
//! successful run is the one that is kept.

pub(crate) mod hough;

use image::GrayImage;

use crate::config::BoundaryConfig;

pub use hough::HoughCircleDetector;

/// Detected boundary circle in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Circle {
    /// Centre column.
    pub center_x: u32,
    /// Centre row.
    pub center_y: u32,
    /// Radius, always > 0.
    pub radius: u32,
}

impl Circle {
    pub fn new(center_x: u32, center_y: u32, radius: u32) -> Self {
        Self {
            center_x,
            center_y,
            radius,
        }
    }

    /// Enclosed area `π·r²` in square pixels.
    pub fn area(&self) -> f64 {
        let r = self.radius as f64;
        std::f64::consts::PI * r * r
    }
}

/// Parameters of one detector run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleSearch {
    /// Minimum distance between accepted circle centres (pixels).
    pub min_dist: f64,
    /// Smallest radius considered (pixels).
    pub min_radius: u32,
    /// Largest radius considered (pixels).
    pub max_radius: u32,
}

/// Repeated searches bound to one frame.
pub type FrameSearch<'a> = Box<dyn Fn(&CircleSearch) -> Vec<Circle> + 'a>;

/// A circle detector run by the boundary locator.
///
/// Implementations return circles strongest first and must be free of side
/// effects, since the locator may call them many times on the same frame.
pub trait CircleDetector {
    fn detect(&self, gray: &GrayImage, search: &CircleSearch) -> Vec<Circle>;

    /// Bind the detector to `gray` for a sweep of searches.
    ///
    /// The locator calls this once per frame. Detectors with per-frame work
    /// that does not depend on the search (edge maps, gradients) override it
    /// to do that work once.
    fn prepare<'a>(&'a self, gray: &'a GrayImage) -> FrameSearch<'a> {
        Box::new(move |search: &CircleSearch| self.detect(gray, search))
    }
}

impl<F> CircleDetector for F
where
    F: Fn(&GrayImage, &CircleSearch) -> Vec<Circle>,
{
    fn detect(&self, gray: &GrayImage, search: &CircleSearch) -> Vec<Circle> {
        self(gray, search)
    }
}

/// Ascending integer ceilings for a frame of the given height.
///
/// Mirrors a fine-stepped floating range truncated to integers, with
/// consecutive duplicates collapsed because they request identical runs.
pub fn max_radius_ceilings(height: u32, config: &BoundaryConfig) -> Vec<u32> {
    let h = height as f64;
    let lo = (h / config.max_radius_lower_divisor).round_ties_even();
    let hi = (h / config.max_radius_upper_divisor).round_ties_even();
    let stop = hi + 1.0;
    if !(config.radius_step > 0.0) || !lo.is_finite() || !stop.is_finite() || stop <= lo {
        return Vec::new();
    }

    let n = ((stop - lo) / config.radius_step).ceil() as usize;
    let mut ceilings: Vec<u32> = Vec::new();
    for k in 0..n {
        let v = lo + k as f64 * config.radius_step;
        let ceiling = v.max(0.0) as u32;
        if ceilings.last() != Some(&ceiling) {
            ceilings.push(ceiling);
        }
    }
    ceilings
}

/// Comparison value of a candidate boundary; lower wins.
///
/// Every candidate receives the same value, which makes the selection
/// keep-first.
fn boundary_score(_circle: &Circle) -> f64 {
    0.0
}

/// Locate the boundary circle in a smoothed intensity frame.
///
/// Returns `None` when no ceiling yields a detection.
pub fn locate_boundary(
    gray: &GrayImage,
    min_radius: u32,
    config: &BoundaryConfig,
    detector: &dyn CircleDetector,
) -> Option<Circle> {
    let height = gray.height();
    let min_dist = (height as f64 / config.min_dist_divisor).round_ties_even();

    let run = detector.prepare(gray);
    let mut best: Option<Circle> = None;
    let mut smallest_score = f64::INFINITY;

    for max_radius in max_radius_ceilings(height, config) {
        let search = CircleSearch {
            min_dist,
            min_radius,
            max_radius,
        };
        for circle in run(&search) {
            if circle.radius == 0 {
                continue;
            }
            let score = boundary_score(&circle);
            if score < smallest_score {
                smallest_score = score;
                best = Some(circle);
            }
        }

        // A constant score can never be strictly beaten by a later ceiling.
        if let Some(circle) = best {
            tracing::debug!(
                "boundary circle ({}, {}) r={} at max radius {}",
                circle.center_x,
                circle.center_y,
                circle.radius,
                max_radius
            );
            return best;
        }
    }

    tracing::debug!("no boundary circle for height {}", height);
    None
}
