//! Estimator trait and per-frame data

use super::decoder::DecodedAudio;
use crate::error::AnalysisError;

/// One voiced analysis frame, prior to rounding and decimation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchFrame {
    /// Frame start position in seconds
    pub time_s: f64,

    /// Estimated dominant frequency in Hz
    pub frequency_hz: f64,
}

/// Pitch estimator trait - allows swapping the peak-magnitude and
/// probabilistic-tracker strategies behind one seam
pub trait PitchEstimator {
    /// Estimate per-frame dominant frequency over the whole signal.
    /// Returns only voiced frames, in chronological order.
    fn estimate(&self, audio: &DecodedAudio) -> Result<Vec<PitchFrame>, AnalysisError>;
}
