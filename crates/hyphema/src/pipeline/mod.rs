//! Analysis pipeline.
//!
//! Wires the stages in their fixed order:
//! preprocess -> boundary search -> seed scan -> region growing -> percentage,
//! followed by the optional closing of the highlighted region.
//!
//! Algorithmic primitives live in `crate::boundary`, `crate::seed`,
//! `crate::region` and `crate::estimate`; this module only owns call order
//! and short-circuiting on missing circles or seeds.

mod result;
mod run;

pub use result::{AnalysisReport, HyphemaAnalysis};
pub use run::{analyze_frame, analyze_frame_with_detector};
