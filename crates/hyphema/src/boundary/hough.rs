//! Gradient Hough circle transform.
//!
//! Edge pixels from a Canny map vote for candidate centres along their
//! Sobel gradient direction, at every integer radius of the search range and
//! in both directions. Accumulator local maxima above the vote threshold
//! become centre candidates; each surviving centre then picks the radius
//! best supported by the edge pixels around it.

use image::GrayImage;

use crate::config::HoughConfig;

use super::{Circle, CircleDetector, CircleSearch, FrameSearch};

/// Gaussian σ applied before taking gradient directions. Matches the
/// pre-blur inside imageproc's Canny.
const DIRECTION_SIGMA: f32 = 1.4;

/// Edge pixel with its unit gradient direction.
#[derive(Debug, Clone, Copy)]
struct EdgePoint {
    x: u32,
    y: u32,
    dx: f32,
    dy: f32,
}

/// Edge pixels of one frame. Independent of the radius range, so one set
/// serves every search on the frame.
#[derive(Debug, Clone)]
pub(crate) struct EdgePoints {
    width: u32,
    height: u32,
    points: Vec<EdgePoint>,
}

impl EdgePoints {
    pub(crate) fn from_gray(gray: &GrayImage, config: &HoughConfig) -> Self {
        let (width, height) = gray.dimensions();
        let points = if width < 3 || height < 3 {
            Vec::new()
        } else {
            collect_edge_points(gray, config)
        };
        Self {
            width,
            height,
            points,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.points.len()
    }

    /// Run one circle search over the edge set.
    ///
    /// Returns circles in acceptance order, strongest centre first. Centres
    /// closer than `search.min_dist` to an already accepted circle are dropped.
    pub(crate) fn detect(&self, config: &HoughConfig, search: &CircleSearch) -> Vec<Circle> {
        let (w, h) = (self.width, self.height);
        let min_r = search.min_radius.max(1);
        let max_r = search.max_radius;
        if self.points.is_empty() || max_r < min_r {
            return Vec::new();
        }

        let accum = accumulate_votes(&self.points, w, h, min_r, max_r);
        let centers = find_centers(&accum, w, h, config.acc_threshold);

        let stride = w as usize;
        let min_dist_sq = search.min_dist * search.min_dist;
        let mut hist = vec![0u32; (max_r - min_r + 1) as usize];
        let mut circles: Vec<Circle> = Vec::new();

        for (idx, _votes) in centers {
            let cx = (idx % stride) as u32;
            let cy = (idx / stride) as u32;
            let too_close = circles.iter().any(|c| {
                let dx = c.center_x as f64 - cx as f64;
                let dy = c.center_y as f64 - cy as f64;
                dx * dx + dy * dy < min_dist_sq
            });
            if too_close {
                continue;
            }
            if let Some(radius) = estimate_radius(
                &self.points,
                cx,
                cy,
                min_r,
                max_r,
                config.acc_threshold,
                &mut hist,
            ) {
                circles.push(Circle::new(cx, cy, radius));
            }
        }

        tracing::trace!(
            "hough r=[{}, {}]: {} edge points, {} circles",
            min_r,
            max_r,
            self.points.len(),
            circles.len()
        );
        circles
    }
}

/// Default circle detector of the boundary locator.
#[derive(Debug, Clone, Default)]
pub struct HoughCircleDetector {
    config: HoughConfig,
}

impl HoughCircleDetector {
    pub fn new(config: HoughConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HoughConfig {
        &self.config
    }
}

impl CircleDetector for HoughCircleDetector {
    fn detect(&self, gray: &GrayImage, search: &CircleSearch) -> Vec<Circle> {
        detect_circles(gray, &self.config, search)
    }

    fn prepare<'a>(&'a self, gray: &'a GrayImage) -> FrameSearch<'a> {
        let edges = EdgePoints::from_gray(gray, &self.config);
        tracing::trace!("prepared {} edge points", edges.len());
        Box::new(move |search: &CircleSearch| edges.detect(&self.config, search))
    }
}

/// Canny edge pixels with directions from the Sobel gradient of the
/// pre-blurred frame.
fn collect_edge_points(gray: &GrayImage, config: &HoughConfig) -> Vec<EdgePoint> {
    let edges = imageproc::edges::canny(gray, config.canny_high * 0.5, config.canny_high);
    let blurred = imageproc::filter::gaussian_blur_f32(gray, DIRECTION_SIGMA);
    let gx = imageproc::gradients::horizontal_sobel(&blurred);
    let gy = imageproc::gradients::vertical_sobel(&blurred);

    let mut points = Vec::new();
    for (x, y, px) in edges.enumerate_pixels() {
        if px[0] == 0 {
            continue;
        }
        let gxv = gx.get_pixel(x, y)[0] as f32;
        let gyv = gy.get_pixel(x, y)[0] as f32;
        let mag = (gxv * gxv + gyv * gyv).sqrt();
        if mag < 1e-6 {
            continue;
        }
        points.push(EdgePoint {
            x,
            y,
            dx: gxv / mag,
            dy: gyv / mag,
        });
    }
    points
}

fn accumulate_votes(points: &[EdgePoint], w: u32, h: u32, min_r: u32, max_r: u32) -> Vec<u32> {
    let stride = w as usize;
    let mut accum = vec![0u32; stride * h as usize];
    let (wf, hf) = (w as f32, h as f32);

    for p in points {
        let (xf, yf) = (p.x as f32, p.y as f32);
        for r in min_r..=max_r {
            let rf = r as f32;
            for sign in [1.0f32, -1.0] {
                let vx = (xf + sign * p.dx * rf).round();
                let vy = (yf + sign * p.dy * rf).round();
                if vx < 0.0 || vy < 0.0 || vx >= wf || vy >= hf {
                    continue;
                }
                accum[vy as usize * stride + vx as usize] += 1;
            }
        }
    }
    accum
}

/// Local accumulator maxima above `threshold`, strongest first.
fn find_centers(accum: &[u32], w: u32, h: u32, threshold: u32) -> Vec<(usize, u32)> {
    let stride = w as usize;
    let mut centers = Vec::new();
    for y in 1..(h as usize).saturating_sub(1) {
        for x in 1..stride.saturating_sub(1) {
            let idx = y * stride + x;
            let v = accum[idx];
            if v > threshold
                && v > accum[idx - 1]
                && v >= accum[idx + 1]
                && v > accum[idx - stride]
                && v >= accum[idx + stride]
            {
                centers.push((idx, v));
            }
        }
    }
    centers.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    centers
}

/// Radius maximising edge support per unit radius; ties go to the smaller radius.
fn estimate_radius(
    points: &[EdgePoint],
    cx: u32,
    cy: u32,
    min_r: u32,
    max_r: u32,
    min_support: u32,
    hist: &mut [u32],
) -> Option<u32> {
    hist.fill(0);
    for p in points {
        let dx = p.x as f64 - cx as f64;
        let dy = p.y as f64 - cy as f64;
        let r = (dx * dx + dy * dy).sqrt().round_ties_even();
        if r < min_r as f64 || r > max_r as f64 {
            continue;
        }
        hist[r as usize - min_r as usize] += 1;
    }

    let mut best: Option<(u32, f64)> = None;
    for (i, &count) in hist.iter().enumerate() {
        if count < min_support {
            continue;
        }
        let r = min_r + i as u32;
        let score = count as f64 / r as f64;
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((r, score));
        }
    }
    best.map(|(r, _)| r)
}

/// Run one gradient Hough circle search on a frame.
pub fn detect_circles(gray: &GrayImage, config: &HoughConfig, search: &CircleSearch) -> Vec<Circle> {
    EdgePoints::from_gray(gray, config).detect(config, search)
}
