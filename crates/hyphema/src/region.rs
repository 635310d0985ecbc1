//! Tolerance-band region growing.
//!
//! The colour frame is first normalised to equal-channel gray so the band
//! test compares plain intensities. Growth is an iterative depth-first
//! flood fill over 4-connected neighbours driven by an explicit coordinate
//! stack, so large regions never recurse.

use image::{GrayImage, Luma, Rgb, RgbImage};

use crate::config::RegionConfig;
use crate::frame::{gray_to_rgb, to_intensity};
use crate::seed::SeedPoint;

/// Neighbour offsets `(dy, dx)`: up, down, left, right.
const NEIGHBOURS: [(i64, i64); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Boolean membership grid with the frame's dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionMask {
    width: u32,
    height: u32,
    data: Vec<bool>,
}

impl RegionMask {
    /// Empty mask of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![false; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Membership of `(x, y)`; out-of-bounds coordinates are never members.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.data[self.index(x, y)]
    }

    pub fn set(&mut self, x: u32, y: u32) {
        let idx = self.index(x, y);
        self.data[idx] = true;
    }

    /// Number of member pixels.
    pub fn area(&self) -> usize {
        self.data.iter().filter(|&&m| m).count()
    }

    /// Member coordinates in raster order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let w = self.width as usize;
        self.data
            .iter()
            .enumerate()
            .filter(|(_, &m)| m)
            .map(move |(i, _)| ((i % w) as u32, (i / w) as u32))
    }

    /// 0/255 gray rendering of the mask.
    pub fn to_gray_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| {
            Luma([if self.contains(x, y) { 255 } else { 0 }])
        })
    }
}

/// Output of one region-growing run.
#[derive(Debug, Clone)]
pub struct RegionGrowth {
    /// Normalised frame with the region painted in the highlight colour.
    pub frame: RgbImage,
    /// Grown region.
    pub mask: RegionMask,
    /// Member pixel count.
    pub area: usize,
}

/// Grow the region around `seed` on an intensity frame.
///
/// A pixel joins when it is 4-connected to the region and its value lies in
/// `[ref - tolerance, ref + tolerance]`, `ref` being the seed value.
/// Returns `None` when the seed lies outside the frame.
pub fn grow_mask(gray: &GrayImage, seed: SeedPoint, tolerance: u8) -> Option<RegionMask> {
    let (w, h) = gray.dimensions();
    if seed.x >= w || seed.y >= h {
        return None;
    }

    let mut mask = RegionMask::new(w, h);
    let reference = gray.get_pixel(seed.x, seed.y)[0] as i32;
    let lo = reference - tolerance as i32;
    let hi = reference + tolerance as i32;

    let mut stack: Vec<(u32, u32)> = vec![(seed.x, seed.y)];
    mask.set(seed.x, seed.y);

    while let Some((x, y)) = stack.pop() {
        for (dy, dx) in NEIGHBOURS {
            let ny = y as i64 + dy;
            let nx = x as i64 + dx;
            if ny < 0 || nx < 0 || ny >= h as i64 || nx >= w as i64 {
                continue;
            }
            let (nx, ny) = (nx as u32, ny as u32);
            if mask.contains(nx, ny) {
                continue;
            }
            let v = gray.get_pixel(nx, ny)[0] as i32;
            if v >= lo && v <= hi {
                mask.set(nx, ny);
                stack.push((nx, ny));
            }
        }
    }
    Some(mask)
}

/// Paint every mask member of `frame` with `color`.
pub fn paint_mask(frame: &mut RgbImage, mask: &RegionMask, color: [u8; 3]) {
    for (x, y) in mask.iter() {
        frame.put_pixel(x, y, Rgb(color));
    }
}

/// Normalise `color`, grow the region around `seed` and highlight it.
///
/// Returns `None` when the seed lies outside the frame.
pub fn grow_region(
    color: &RgbImage,
    seed: SeedPoint,
    config: &RegionConfig,
) -> Option<RegionGrowth> {
    let gray = to_intensity(color);
    let mask = grow_mask(&gray, seed, config.tolerance)?;
    let mut frame = gray_to_rgb(&gray);
    let area = mask.area();
    paint_mask(&mut frame, &mask, config.highlight);

    tracing::debug!("region grown from ({}, {}): {} px", seed.x, seed.y, area);
    Some(RegionGrowth { frame, mask, area })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::VecDeque;

    fn seed(x: u32, y: u32) -> SeedPoint {
        SeedPoint { x, y }
    }

    fn random_gray(w: u32, h: u32, rng: &mut StdRng) -> GrayImage {
        // Coarse blocks so regions span more than a handful of pixels.
        let blocks: Vec<u8> = (0..((w / 4 + 1) * (h / 4 + 1)))
            .map(|_| rng.gen_range(0..=255))
            .collect();
        GrayImage::from_fn(w, h, |x, y| {
            let b = blocks[((y / 4) * (w / 4 + 1) + x / 4) as usize];
            Luma([b.saturating_add(rng.gen_range(0..8))])
        })
    }

    /// Every member must be reachable from the seed through members.
    fn is_connected_from(mask: &RegionMask, s: SeedPoint) -> bool {
        let mut seen = RegionMask::new(mask.width(), mask.height());
        let mut queue = VecDeque::from([(s.x, s.y)]);
        seen.set(s.x, s.y);
        while let Some((x, y)) = queue.pop_front() {
            for (dy, dx) in NEIGHBOURS {
                let nx = x as i64 + dx;
                let ny = y as i64 + dy;
                if nx < 0 || ny < 0 {
                    continue;
                }
                let (nx, ny) = (nx as u32, ny as u32);
                if mask.contains(nx, ny) && !seen.contains(nx, ny) {
                    seen.set(nx, ny);
                    queue.push_back((nx, ny));
                }
            }
        }
        seen.area() == mask.area()
    }

    #[test]
    fn fills_uniform_block_only() {
        let mut gray = GrayImage::from_pixel(20, 10, Luma([30]));
        for y in 2..6 {
            for x in 3..9 {
                gray.put_pixel(x, y, Luma([120]));
            }
        }
        let mask = grow_mask(&gray, seed(5, 3), 15).unwrap();
        assert_eq!(mask.area(), 24);
        assert!(mask.contains(3, 2));
        assert!(!mask.contains(2, 2));
    }

    #[test]
    fn tolerance_band_is_inclusive() {
        let mut gray = GrayImage::from_pixel(5, 1, Luma([100]));
        gray.put_pixel(1, 0, Luma([115]));
        gray.put_pixel(2, 0, Luma([85]));
        gray.put_pixel(3, 0, Luma([84]));
        let mask = grow_mask(&gray, seed(0, 0), 15).unwrap();
        assert_eq!(mask.area(), 3);
        assert!(!mask.contains(3, 0));
        assert!(!mask.contains(4, 0));
    }

    #[test]
    fn isolated_seed_has_area_one() {
        let mut gray = GrayImage::from_pixel(7, 7, Luma([0]));
        gray.put_pixel(3, 3, Luma([200]));
        let mask = grow_mask(&gray, seed(3, 3), 15).unwrap();
        assert_eq!(mask.area(), 1);
    }

    #[test]
    fn uniform_frame_fills_everything() {
        let gray = GrayImage::from_pixel(13, 9, Luma([77]));
        let mask = grow_mask(&gray, seed(0, 8), 0).unwrap();
        assert_eq!(mask.area(), 13 * 9);
    }

    #[test]
    fn diagonal_neighbours_do_not_connect() {
        let mut gray = GrayImage::from_pixel(3, 3, Luma([0]));
        gray.put_pixel(0, 0, Luma([200]));
        gray.put_pixel(1, 1, Luma([200]));
        let mask = grow_mask(&gray, seed(0, 0), 10).unwrap();
        assert_eq!(mask.area(), 1);
    }

    #[test]
    fn grow_region_paints_normalised_frame() {
        let mut color = RgbImage::from_pixel(6, 6, Rgb([10, 10, 10]));
        for y in 0..3 {
            for x in 0..3 {
                color.put_pixel(x, y, Rgb([200, 40, 40]));
            }
        }
        let out = grow_region(&color, seed(1, 1), &RegionConfig::default()).unwrap();
        assert_eq!(out.area, 9);
        assert_eq!(out.mask.area(), out.area);
        assert_eq!(*out.frame.get_pixel(0, 0), Rgb([0, 255, 0]));
        let bg = out.frame.get_pixel(5, 5);
        assert_eq!(bg[0], bg[1]);
        assert_eq!(bg[1], bg[2]);
    }

    #[test]
    fn masks_are_connected_and_repeatable() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let gray = random_gray(40, 30, &mut rng);
            let s = seed(rng.gen_range(0..40), rng.gen_range(0..30));
            let tol = rng.gen_range(0..40u8);
            let a = grow_mask(&gray, s, tol).unwrap();
            let b = grow_mask(&gray, s, tol).unwrap();
            assert_eq!(a, b);
            assert!(a.contains(s.x, s.y));
            assert!(is_connected_from(&a, s));
        }
    }

    #[test]
    fn area_grows_with_tolerance() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..10 {
            let gray = random_gray(32, 32, &mut rng);
            let s = seed(rng.gen_range(0..32), rng.gen_range(0..32));
            let mut prev = grow_mask(&gray, s, 0).unwrap();
            for tol in 1..=60u8 {
                let next = grow_mask(&gray, s, tol).unwrap();
                assert!(next.area() >= prev.area());
                assert!(prev.iter().all(|(x, y)| next.contains(x, y)));
                prev = next;
            }
        }
    }

    #[test]
    fn seed_outside_frame_grows_nothing() {
        let gray = GrayImage::from_pixel(8, 6, Luma([50]));
        assert!(grow_mask(&gray, seed(8, 0), 15).is_none());
        assert!(grow_mask(&gray, seed(0, 6), 15).is_none());
        let color = RgbImage::from_pixel(8, 6, Rgb([50, 50, 50]));
        assert!(grow_region(&color, seed(100, 100), &RegionConfig::default()).is_none());
    }

    #[test]
    fn mask_gray_rendering() {
        let mut mask = RegionMask::new(3, 2);
        mask.set(2, 1);
        let img = mask.to_gray_image();
        assert_eq!(img.get_pixel(2, 1)[0], 255);
        assert_eq!(img.get_pixel(0, 0)[0], 0);
        assert_eq!(mask.iter().collect::<Vec<_>>(), vec![(2, 1)]);
    }
}
