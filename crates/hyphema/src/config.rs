//! Analysis configuration.
//!
//! Every section deserializes with `#[serde(default)]`, so a JSON file only
//! needs to name the fields it overrides.

use std::path::Path;

use crate::AnalysisError;

/// Intensity preprocessing ahead of the boundary search.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    /// Median filter radius; `1` is a 3×3 window, `0` disables smoothing.
    pub median_radius: u32,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self { median_radius: 1 }
    }
}

/// Maximum-radius ceiling sweep used by the boundary locator.
///
/// Ceilings run from `round(height / max_radius_lower_divisor)` up to
/// `round(height / max_radius_upper_divisor)` in steps of `radius_step`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoundaryConfig {
    /// Increment between consecutive ceilings (pixels, before truncation).
    pub radius_step: f64,
    /// Divisor of the frame height giving the largest ceiling.
    pub max_radius_upper_divisor: f64,
    /// Divisor of the frame height giving the smallest ceiling.
    pub max_radius_lower_divisor: f64,
    /// Divisor of the frame height giving the minimum centre separation.
    pub min_dist_divisor: f64,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            radius_step: 0.02,
            max_radius_upper_divisor: 2.0,
            max_radius_lower_divisor: 2.2,
            min_dist_divisor: 2.12,
        }
    }
}

/// Gradient Hough circle transform tunables.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct HoughConfig {
    /// Upper Canny threshold; the lower one is half of it.
    pub canny_high: f32,
    /// Minimum number of votes for a centre, and of edge pixels supporting a radius.
    pub acc_threshold: u32,
}

impl Default for HoughConfig {
    fn default() -> Self {
        Self {
            canny_high: 90.0,
            acc_threshold: 22,
        }
    }
}

/// Seed scan along the vertical ray below the circle centre.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Rows skipped below the centre before sampling starts.
    pub row_offset: u32,
    /// Fraction of the peak edge strength a transition has to exceed.
    pub threshold_coefficient: f64,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            row_offset: 5,
            threshold_coefficient: 0.9,
        }
    }
}

/// Region growing tolerance and highlight colour.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RegionConfig {
    /// Half-width of the inclusive gray-value band around the seed intensity.
    pub tolerance: u8,
    /// RGB colour painted over the grown region.
    pub highlight: [u8; 3],
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            tolerance: 15,
            highlight: [0, 255, 0],
        }
    }
}

/// Optional morphological closing of the highlighted region.
///
/// Only touches the annotated frame; the reported area is never affected.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ClosingConfig {
    /// Run the closing sequence.
    pub enable: bool,
    /// Square kernel sizes applied in order.
    pub kernel_sizes: Vec<u32>,
}

impl Default for ClosingConfig {
    fn default() -> Self {
        Self {
            enable: false,
            kernel_sizes: vec![5, 15, 5, 5],
        }
    }
}

/// Top-level configuration for one hyphema analysis.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Smallest boundary radius the circle search accepts (pixels).
    pub min_radius: u32,
    pub preprocess: PreprocessConfig,
    pub boundary: BoundaryConfig,
    pub hough: HoughConfig,
    pub seed: SeedConfig,
    pub region: RegionConfig,
    pub closing: ClosingConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_radius: 8,
            preprocess: PreprocessConfig::default(),
            boundary: BoundaryConfig::default(),
            hough: HoughConfig::default(),
            seed: SeedConfig::default(),
            region: RegionConfig::default(),
            closing: ClosingConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Load a configuration from a JSON file; missing fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, AnalysisError> {
        let text = std::fs::read_to_string(path).map_err(|e| AnalysisError::Config {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&text).map_err(|e| AnalysisError::Config {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}
