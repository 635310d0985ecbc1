use image::RgbImage;

use crate::boundary::Circle;
use crate::region::RegionMask;
use crate::seed::SeedPoint;

/// Full outcome of a successful analysis.
#[derive(Debug, Clone)]
pub struct HyphemaAnalysis {
    /// Boundary circle the percentage refers to.
    pub circle: Circle,
    /// Seed the region was grown from.
    pub seed: SeedPoint,
    /// Grown region size in pixels.
    pub region_area: usize,
    /// `region_area / (π·r²) · 100`, truncated and unclamped.
    pub percentage: u32,
    /// Normalised frame with the region highlighted (and closed, if enabled).
    pub annotated: RgbImage,
    /// Grown region before any closing.
    pub mask: RegionMask,
}

impl HyphemaAnalysis {
    /// Serializable summary without pixel buffers.
    pub fn report(&self) -> AnalysisReport {
        AnalysisReport {
            image_size: [self.annotated.width(), self.annotated.height()],
            circle: self.circle,
            seed: self.seed,
            region_area: self.region_area,
            hyphema_area_percentage: self.percentage,
        }
    }
}

/// Serializable analysis summary.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnalysisReport {
    /// Image dimensions [width, height].
    pub image_size: [u32; 2],
    pub circle: Circle,
    pub seed: SeedPoint,
    pub region_area: usize,
    pub hyphema_area_percentage: u32,
}
