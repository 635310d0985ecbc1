//! hyphema: estimate the share of the iris circle covered by a blood layer.
//!
//! Works on a single still image of an eye. The pipeline stages are:
//!
//! 1. **Preprocess** – BT.601 intensity conversion and median smoothing.
//! 2. **Boundary** – gradient Hough circle search over an ascending sweep of
//!    maximum-radius ceilings; the first detected circle is kept.
//! 3. **Seed** – central-difference edge scan down the column through the
//!    circle centre; the seed sits halfway between the edge and the bottom
//!    of the circle.
//! 4. **Region** – tolerance-band flood fill from the seed, highlighted in
//!    the output frame.
//! 5. **Estimate** – region area over `π·r²`, as an integer percentage.
//!
//! An optional morphological closing smooths the highlighted region in the
//! annotated frame without touching the measured area.
//!
//! # Public API
//! - [`Analyzer`] as the primary entry point
//! - [`AnalysisConfig`] for tuning
//! - stage functions for callers that need a single step

mod api;
pub mod boundary;
pub mod config;
mod error;
pub mod estimate;
pub mod frame;
pub mod pipeline;
pub mod postprocess;
pub mod region;
pub mod seed;

#[cfg(test)]
pub(crate) mod test_utils;

pub use api::Analyzer;
pub use boundary::{
    locate_boundary, Circle, CircleDetector, CircleSearch, FrameSearch, HoughCircleDetector,
};
pub use config::{
    AnalysisConfig, BoundaryConfig, ClosingConfig, HoughConfig, PreprocessConfig, RegionConfig,
    SeedConfig,
};
pub use error::AnalysisError;
pub use estimate::hyphema_percentage;
pub use frame::{load_color_frame, save_frame};
pub use pipeline::{analyze_frame, analyze_frame_with_detector, AnalysisReport, HyphemaAnalysis};
pub use region::{grow_region, RegionGrowth, RegionMask};
pub use seed::{find_seed, SeedPoint};
