//! High-level analysis API.
//!
//! [`Analyzer`] is the primary entry point. It wraps an [`AnalysisConfig`]
//! and runs the full pipeline on a colour frame or an image file. Every call
//! is independent; the analyzer holds no per-image state.

use std::path::Path;

use image::RgbImage;

use crate::boundary::CircleDetector;
use crate::config::AnalysisConfig;
use crate::frame::load_color_frame;
use crate::pipeline::{self, HyphemaAnalysis};
use crate::AnalysisError;

/// Primary analysis interface.
///
/// Create once, analyse many images.
///
/// # Examples
///
/// ```no_run
/// use hyphema::Analyzer;
/// use image::RgbImage;
///
/// let analyzer = Analyzer::new();
/// let frame = RgbImage::new(640, 480);
/// match analyzer.analyze(&frame) {
///     Ok(a) => println!("hyphema covers {}%", a.percentage),
///     Err(e) => println!("{}", e),
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalysisConfig,
}

impl Analyzer {
    /// Create an analyzer with default tunables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with full config control.
    pub fn with_config(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Load a JSON config file and create an analyzer in one step.
    pub fn from_config_file(path: &Path) -> Result<Self, AnalysisError> {
        Ok(Self::with_config(AnalysisConfig::from_json_file(path)?))
    }

    /// Access the current configuration.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Mutable access to configuration for post-construction tuning.
    pub fn config_mut(&mut self) -> &mut AnalysisConfig {
        &mut self.config
    }

    /// Analyse a decoded colour frame.
    pub fn analyze(&self, frame: &RgbImage) -> Result<HyphemaAnalysis, AnalysisError> {
        pipeline::analyze_frame(frame, &self.config)
    }

    /// Analyse with a custom circle detector in place of the Hough transform.
    pub fn analyze_with_detector(
        &self,
        frame: &RgbImage,
        detector: &dyn CircleDetector,
    ) -> Result<HyphemaAnalysis, AnalysisError> {
        pipeline::analyze_frame_with_detector(frame, &self.config, detector)
    }

    /// Decode an image file and analyse it.
    pub fn analyze_file(&self, path: &Path) -> Result<HyphemaAnalysis, AnalysisError> {
        let frame = load_color_frame(path)?;
        self.analyze(&frame)
    }
}
