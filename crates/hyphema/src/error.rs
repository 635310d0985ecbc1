//! Error type shared by the pipeline and the frame I/O helpers.

/// Reasons an analysis produces no percentage.
///
/// `NoCircleFound` and `NoSeedFound` are ordinary, deterministic outcomes
/// for images without a usable boundary or transition; the remaining
/// variants cover frames and files that could not be used at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// No maximum-radius ceiling produced a circle detection.
    NoCircleFound,
    /// The scan below the circle centre produced no transition, or the seed
    /// would fall outside the frame.
    NoSeedFound,
    /// The frame has a zero dimension.
    EmptyFrame {
        /// Frame width in pixels.
        width: u32,
        /// Frame height in pixels.
        height: u32,
    },
    /// The input image could not be read or decoded.
    Decode {
        /// Path that was opened.
        path: String,
        /// Underlying decoder message.
        reason: String,
    },
    /// The annotated image could not be encoded or written.
    Encode {
        /// Path that was written.
        path: String,
        /// Underlying encoder message.
        reason: String,
    },
    /// A configuration file could not be read or parsed.
    Config {
        /// Path of the configuration file.
        path: String,
        /// Underlying I/O or JSON message.
        reason: String,
    },
}

impl std::fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoCircleFound => write!(f, "No circle found."),
            Self::NoSeedFound => write!(f, "Start point for region growing not found."),
            Self::EmptyFrame { width, height } => {
                write!(f, "empty frame: {}x{}", width, height)
            }
            Self::Decode { path, .. } => write!(f, "Image not found: {}", path),
            Self::Encode { path, reason } => {
                write!(f, "failed to write image {}: {}", path, reason)
            }
            Self::Config { path, reason } => {
                write!(f, "invalid config {}: {}", path, reason)
            }
        }
    }
}

impl std::error::Error for AnalysisError {}

impl AnalysisError {
    /// Stable machine-readable code for the error class.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NoCircleFound => "no_circle_found",
            Self::NoSeedFound => "no_seed_found",
            Self::EmptyFrame { .. } => "empty_frame",
            Self::Decode { .. } => "decode_failure",
            Self::Encode { .. } => "encode_failure",
            Self::Config { .. } => "invalid_config",
        }
    }
}
