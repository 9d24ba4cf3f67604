//! Probabilistic pitch tracking
//!
//! Monophonic tracking with the McLeod pitch method. Each 2048-sample window
//! yields a frequency/clarity pair; a frame is voiced when its clarity clears
//! the threshold and the frequency falls in the musical range C2-C6. Unlike
//! the peak-magnitude strategy this emits every voiced frame at the native
//! hop rate.

use super::decoder::DecodedAudio;
use super::traits::{PitchEstimator, PitchFrame};
use crate::error::AnalysisError;
use pitch_detection::detector::mcleod::McLeodDetector;
use pitch_detection::detector::PitchDetector;

/// Lowest retained frequency, C2
const MIN_FREQUENCY_HZ: f64 = 65.41;

/// Highest retained frequency, C6
const MAX_FREQUENCY_HZ: f64 = 1046.5;

/// Analysis window length in samples
const WINDOW_SIZE: usize = 2048;

/// Hop between successive windows
const HOP_SIZE: usize = 1024;

/// Minimum signal power for a window to be considered at all
const POWER_THRESHOLD: f64 = 5.0;

/// Minimum clarity for a detection to count as voiced
const CLARITY_THRESHOLD: f64 = 0.7;

/// McLeod-based monophonic tracker constrained to the C2-C6 range
pub struct TrackerEstimator {
    clarity_threshold: f64,
}

impl TrackerEstimator {
    pub fn new() -> Self {
        Self {
            clarity_threshold: CLARITY_THRESHOLD,
        }
    }
}

impl Default for TrackerEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl PitchEstimator for TrackerEstimator {
    fn estimate(&self, audio: &DecodedAudio) -> Result<Vec<PitchFrame>, AnalysisError> {
        let samples = &audio.samples;
        let sample_rate = audio.sample_rate as f64;

        if samples.len() < WINDOW_SIZE {
            log::debug!(
                "Signal shorter than one analysis window ({} < {})",
                samples.len(),
                WINDOW_SIZE
            );
            return Ok(Vec::new());
        }

        let mut detector = McLeodDetector::new(WINDOW_SIZE, WINDOW_SIZE / 2);
        let mut window = vec![0.0f64; WINDOW_SIZE];
        let mut frames = Vec::new();

        for start in (0..=samples.len() - WINDOW_SIZE).step_by(HOP_SIZE) {
            for (dst, &sample) in window.iter_mut().zip(&samples[start..start + WINDOW_SIZE]) {
                *dst = sample as f64;
            }

            let Some(pitch) = detector.get_pitch(
                &window,
                audio.sample_rate as usize,
                POWER_THRESHOLD,
                self.clarity_threshold,
            ) else {
                continue;
            };

            if pitch.frequency < MIN_FREQUENCY_HZ || pitch.frequency > MAX_FREQUENCY_HZ {
                continue;
            }

            frames.push(PitchFrame {
                time_s: start as f64 / sample_rate,
                frequency_hz: pitch.frequency,
            });
        }

        Ok(frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(freq: f64, sample_rate: u32, secs: f64) -> DecodedAudio {
        let n = (sample_rate as f64 * secs) as usize;
        let samples = (0..n)
            .map(|i| {
                (2.0 * std::f64::consts::PI * freq * i as f64 / sample_rate as f64).sin() as f32
                    * 0.6
            })
            .collect();
        DecodedAudio {
            samples,
            sample_rate,
        }
    }

    #[test]
    fn test_pure_tone_tracks_near_tone() {
        let audio = sine(440.0, 44100, 1.0);
        let frames = TrackerEstimator::new().estimate(&audio).unwrap();
        assert!(!frames.is_empty());
        for frame in &frames {
            assert!(
                (frame.frequency_hz - 440.0).abs() < 10.0,
                "frame at {}s reported {} Hz",
                frame.time_s,
                frame.frequency_hz
            );
        }
    }

    #[test]
    fn test_out_of_range_tone_is_dropped() {
        // 2 kHz is above C6, outside the tracker's range
        let audio = sine(2000.0, 44100, 1.0);
        let frames = TrackerEstimator::new().estimate(&audio).unwrap();
        assert!(frames.is_empty());
    }

    #[test]
    fn test_silence_is_unvoiced() {
        let audio = DecodedAudio {
            samples: vec![0.0; 44100],
            sample_rate: 44100,
        };
        let frames = TrackerEstimator::new().estimate(&audio).unwrap();
        assert!(frames.is_empty());
    }
}
