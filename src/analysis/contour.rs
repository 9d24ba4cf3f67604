//! Contour analysis orchestration
//!
//! Ties the pipeline together: decode, estimate, decimate, round, report.
//! Every failure past argument parsing is converted into a Failure report
//! here so the binary always emits well-formed JSON.

use super::decoder::decode_to_mono;
use super::peak::PeakMagnitudeEstimator;
use super::tracker::TrackerEstimator;
use super::traits::{PitchEstimator, PitchFrame};
use crate::report::{display_name, round2, AnalysisReport, PitchSample};
use anyhow::{Context, Result};
use clap::ValueEnum;
use std::path::Path;

/// Which pitch-estimation strategy to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// Spectral peak picking with 0.1 s interval decimation
    Peak,
    /// McLeod tracker emitting every voiced frame
    Tracker,
}

impl Strategy {
    /// Default decimation interval for this strategy, in seconds.
    /// The peak strategy historically sampled one observation per 0.1 s;
    /// the tracker emits its native frame rate.
    fn default_interval(self) -> Option<f64> {
        match self {
            Strategy::Peak => Some(0.1),
            Strategy::Tracker => None,
        }
    }
}

/// One-shot pitch contour analyzer
pub struct ContourAnalyzer {
    strategy: Strategy,
    interval_s: Option<f64>,
}

impl ContourAnalyzer {
    pub fn new() -> Self {
        Self {
            strategy: Strategy::Peak,
            interval_s: Strategy::Peak.default_interval(),
        }
    }

    /// Select the estimation strategy, resetting the decimation interval to
    /// that strategy's default
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self.interval_s = strategy.default_interval();
        self
    }

    /// Override the decimation interval. An interval of 0 (or less) disables
    /// decimation and emits the estimator's native frame rate.
    pub fn with_interval(mut self, interval_s: f64) -> Self {
        self.interval_s = (interval_s > 0.0).then_some(interval_s);
        self
    }

    /// Analyze one audio file. Never fails: decode and estimation errors are
    /// folded into a Failure report carrying the stringified cause.
    pub fn analyze(&self, path: &Path, name: Option<&str>) -> AnalysisReport {
        let filename = name
            .map(str::to_owned)
            .unwrap_or_else(|| display_name(path));

        match self.run(path) {
            Ok((duration, patterns)) => {
                log::info!(
                    "Analysis complete: {} samples over {:.2}s for {}",
                    patterns.len(),
                    duration,
                    filename
                );
                AnalysisReport::success(filename, duration, patterns)
            }
            Err(e) => {
                log::warn!("Analysis failed for {:?}: {:#}", path, e);
                AnalysisReport::failure(filename, format!("Analysis failed: {:#}", e))
            }
        }
    }

    fn run(&self, path: &Path) -> Result<(f64, Vec<PitchSample>)> {
        let audio = decode_to_mono(path)
            .with_context(|| format!("could not decode {}", path.display()))?;

        // Duration reflects the whole decoded signal, not the retained frames
        let duration = audio.duration_secs();

        let frames = match self.strategy {
            Strategy::Peak => PeakMagnitudeEstimator::new().estimate(&audio),
            Strategy::Tracker => TrackerEstimator::new().estimate(&audio),
        }
        .context("pitch estimation failed")?;

        log::debug!(
            "{} voiced frames before decimation (strategy {:?})",
            frames.len(),
            self.strategy
        );

        let patterns = decimate(&frames, self.interval_s)
            .map(|frame| PitchSample {
                time_s: round2(frame.time_s),
                dominant_hz: round2(frame.frequency_hz),
            })
            .collect();

        Ok((duration, patterns))
    }
}

impl Default for ContourAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Thin a chronological frame sequence to at most one frame per interval
/// window. `None` keeps every frame.
fn decimate(
    frames: &[PitchFrame],
    interval_s: Option<f64>,
) -> impl Iterator<Item = &PitchFrame> + '_ {
    let mut next_time = f64::NEG_INFINITY;
    frames.iter().filter(move |frame| {
        if let Some(interval) = interval_s {
            if frame.time_s + 1e-9 < next_time {
                return false;
            }
            next_time = frame.time_s + interval;
        }
        true
    })
}
