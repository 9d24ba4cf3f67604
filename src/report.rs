//! JSON result model
//!
//! The host process reads a single JSON line from stdout and dispatches on
//! the `success` flag, so the wire schema here is the tool's real interface.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// One retained pitch observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitchSample {
    /// Position in the signal, seconds, rounded to 2 decimals
    pub time_s: f64,

    /// Dominant frequency at that position, Hz, rounded to 2 decimals
    pub dominant_hz: f64,
}

/// Complete analysis outcome, serialized as the tool's stdout line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisReport {
    Success {
        success: bool,

        /// Display name echoed back to the caller
        filename: String,

        /// Whole-signal duration in seconds, independent of frame filtering
        duration: f64,

        /// Always equals `patterns.len()`
        analysis_count: usize,

        /// Chronological pitch observations
        patterns: Vec<PitchSample>,
    },
    Failure {
        success: bool,
        error: String,
        filename: String,
    },
}

impl AnalysisReport {
    /// Build a success report from an already-ordered sample sequence
    pub fn success(filename: String, duration: f64, patterns: Vec<PitchSample>) -> Self {
        Self::Success {
            success: true,
            filename,
            duration: round2(duration),
            analysis_count: patterns.len(),
            patterns,
        }
    }

    /// Build a failure report from a stringified error
    pub fn failure(filename: String, error: String) -> Self {
        Self::Failure {
            success: false,
            error,
            filename,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Round to 2 decimal places, the precision the host displays
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Best-effort display name for a path: base name, or the path itself if it
/// has no final component
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
