//! JSON records printed on stdout.

use std::path::Path;

use serde::Serialize;

/// Successful run: where the annotated image went and the estimate.
#[derive(Debug, Serialize)]
pub struct SuccessRecord {
    pub image: String,
    pub hyphema_area_percentage: u32,
}

impl SuccessRecord {
    pub fn new(image: &Path, percentage: u32) -> Self {
        Self {
            image: image.display().to_string(),
            hyphema_area_percentage: percentage,
        }
    }
}

/// Analysis failure reported as data rather than a process error.
#[derive(Debug, Serialize)]
pub struct ErrorRecord {
    pub error: String,
}

impl ErrorRecord {
    pub fn new(err: &hyphema::AnalysisError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}
