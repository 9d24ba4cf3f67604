//! Peak-magnitude pitch estimation
//!
//! Short-time FFT over Hann-windowed frames; each frame's dominant frequency
//! is the highest-magnitude spectral bin, refined by parabolic interpolation
//! of the neighboring bin magnitudes. Frames whose peak lands at or below
//! 50 Hz are treated as unvoiced noise and dropped.

use super::decoder::DecodedAudio;
use super::traits::{PitchEstimator, PitchFrame};
use crate::error::AnalysisError;
use realfft::RealFftPlanner;

/// Frequencies at or below this are treated as unvoiced rumble/noise
const NOISE_FLOOR_HZ: f64 = 50.0;

/// Peaks with magnitude below this are silence, not pitch
const SILENCE_MAGNITUDE: f32 = 1e-6;

/// Spectral peak-picking estimator
pub struct PeakMagnitudeEstimator {
    /// FFT frame length in samples
    frame_size: usize,
    /// Hop between successive frames in samples
    hop_size: usize,
}

impl PeakMagnitudeEstimator {
    pub fn new() -> Self {
        Self {
            frame_size: 2048,
            hop_size: 512,
        }
    }
}

impl Default for PeakMagnitudeEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl PitchEstimator for PeakMagnitudeEstimator {
    fn estimate(&self, audio: &DecodedAudio) -> Result<Vec<PitchFrame>, AnalysisError> {
        let samples = &audio.samples;
        let sample_rate = audio.sample_rate as f64;

        if samples.len() < self.frame_size {
            log::debug!(
                "Signal shorter than one analysis frame ({} < {})",
                samples.len(),
                self.frame_size
            );
            return Ok(Vec::new());
        }

        let mut planner = RealFftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(self.frame_size);
        let mut input = fft.make_input_vec();
        let mut spectrum = fft.make_output_vec();

        // Precomputed Hann window
        let window: Vec<f32> = (0..self.frame_size)
            .map(|i| {
                let phase = 2.0 * std::f32::consts::PI * i as f32 / (self.frame_size - 1) as f32;
                0.5 * (1.0 - phase.cos())
            })
            .collect();

        let bin_hz = sample_rate / self.frame_size as f64;
        let mut frames = Vec::new();

        for start in (0..=samples.len() - self.frame_size).step_by(self.hop_size) {
            for (dst, (&sample, &w)) in input
                .iter_mut()
                .zip(samples[start..start + self.frame_size].iter().zip(&window))
            {
                *dst = sample * w;
            }

            fft.process(&mut input, &mut spectrum)
                .map_err(|e| AnalysisError::Estimation(e.to_string()))?;

            // Peak bin, skipping DC
            let mut peak_bin = 1;
            let mut peak_mag = 0.0f32;
            for (bin, value) in spectrum.iter().enumerate().skip(1) {
                let mag = value.norm();
                if mag > peak_mag {
                    peak_mag = mag;
                    peak_bin = bin;
                }
            }

            if peak_mag < SILENCE_MAGNITUDE {
                continue;
            }

            let frequency_hz = (peak_bin as f64 + self.parabolic_offset(&spectrum, peak_bin)) * bin_hz;
            if frequency_hz <= NOISE_FLOOR_HZ {
                continue;
            }

            frames.push(PitchFrame {
                time_s: start as f64 / sample_rate,
                frequency_hz,
            });
        }

        Ok(frames)
    }
}

impl PeakMagnitudeEstimator {
    /// Refine the peak position by fitting a parabola through the magnitudes
    /// of the peak bin and its neighbors. Returns a sub-bin offset in
    /// [-0.5, 0.5], or 0 when the peak sits at a spectrum edge.
    fn parabolic_offset(&self, spectrum: &[realfft::num_complex::Complex<f32>], bin: usize) -> f64 {
        if bin == 0 || bin + 1 >= spectrum.len() {
            return 0.0;
        }
        let a = spectrum[bin - 1].norm() as f64;
        let b = spectrum[bin].norm() as f64;
        let c = spectrum[bin + 1].norm() as f64;
        let denom = a - 2.0 * b + c;
        if denom.abs() < f64::EPSILON {
            0.0
        } else {
            (0.5 * (a - c) / denom).clamp(-0.5, 0.5)
        }
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
    fn test_pure_tone_peaks_near_tone() {
        let audio = sine(440.0, 44100, 1.0);
        let frames = PeakMagnitudeEstimator::new().estimate(&audio).unwrap();
        assert!(!frames.is_empty());
        for frame in &frames {
            assert!(
                (frame.frequency_hz - 440.0).abs() < 15.0,
                "frame at {}s reported {} Hz",
                frame.time_s,
                frame.frequency_hz
            );
        }
    }

    #[test]
    fn test_frames_are_chronological() {
        let audio = sine(330.0, 22050, 1.0);
        let frames = PeakMagnitudeEstimator::new().estimate(&audio).unwrap();
        for pair in frames.windows(2) {
            assert!(pair[0].time_s < pair[1].time_s);
        }
    }

    #[test]
    fn test_silence_yields_no_frames() {
        let audio = DecodedAudio {
            samples: vec![0.0; 44100],
            sample_rate: 44100,
        };
        let frames = PeakMagnitudeEstimator::new().estimate(&audio).unwrap();
        assert!(frames.is_empty());
    }

    #[test]
    fn test_subsonic_tone_is_unvoiced() {
        // 30 Hz sits below the 50 Hz noise floor
        let audio = sine(30.0, 44100, 1.0);
        let frames = PeakMagnitudeEstimator::new().estimate(&audio).unwrap();
        assert!(frames.is_empty());
    }

    #[test]
    fn test_short_signal_yields_no_frames() {
        let audio = DecodedAudio {
            samples: vec![0.1; 100],
            sample_rate: 44100,
        };
        let frames = PeakMagnitudeEstimator::new().estimate(&audio).unwrap();
        assert!(frames.is_empty());
    }
}
