//! Pitch Contour - dominant-frequency analysis for a host process
//!
//! Decodes an audio file, estimates the dominant frequency over time, and
//! summarizes the contour as a single JSON document. The binary wraps
//! [`ContourAnalyzer`] for one-shot subprocess invocation.

pub mod analysis;
pub mod error;
pub mod report;

pub use analysis::{ContourAnalyzer, Strategy};
pub use error::AnalysisError;
pub use report::{AnalysisReport, PitchSample};
