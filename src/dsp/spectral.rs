//! Dominant-frequency extraction for heart rate.
//!
//! Windows the band-limited pulse signal, transforms it, and picks the
//! strongest bin inside the physiological band. Scanning is in increasing
//! frequency order with a strict `>` comparison, so ties resolve to the
//! lowest frequency.

use crate::dsp::fft::{fft_in_place, hann_window};
use num_complex::Complex32;
use ndarray::Array1;

/// Spectral estimation parameters.
#[derive(Debug, Clone)]
pub struct SpectralConfig {
    /// Sample rate in Hz
    pub sample_rate: f32,
    /// Lower band edge in Hz (0.7 Hz = 42 BPM)
    pub lowcut: f32,
    /// Upper band edge in Hz (3.0 Hz = 180 BPM)
    pub highcut: f32,
    /// Apply a Hann window before the transform
    pub apply_hann: bool,
}

impl Default for SpectralConfig {
    fn default() -> Self {
        Self {
            sample_rate: 30.0,
            lowcut: 0.7,
            highcut: 3.0,
            apply_hann: true,
        }
    }
}

/// The strongest in-band spectrum bin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectralPeak {
    pub frequency_hz: f32,
    pub magnitude: f32,
}

impl SpectralPeak {
    /// Dominant frequency expressed as beats per minute.
    pub fn bpm(&self) -> f32 {
        self.frequency_hz * 60.0
    }
}

/// FFT-based dominant-frequency estimator.
pub struct SpectralEstimator {
    config: SpectralConfig,
}

impl SpectralEstimator {
    pub fn new() -> Self {
        Self::with_config(SpectralConfig::default())
    }

    pub fn with_config(config: SpectralConfig) -> Self {
        Self { config }
    }

    /// Find the dominant physiological frequency of `signal`.
    ///
    /// Returns `None` when no bin falls inside the band (series too short
    /// to resolve it, or empty input). Callers must treat that as "no
    /// measurement", never as a zero heart rate.
    ///
    /// # Panics
    /// `signal.len()` must be a power of two (or 0); arbitrary-length
    /// series must be truncated or padded by the caller first.
    pub fn estimate(&self, signal: &Array1<f32>) -> Option<SpectralPeak> {
        let n = signal.len();
        if n == 0 {
            return None;
        }

        let mut buffer: Vec<Complex32> = if self.config.apply_hann {
            let window = hann_window(n);
            signal
                .iter()
                .zip(window.iter())
                .map(|(s, w)| Complex32::new(s * w, 0.0))
                .collect()
        } else {
            signal.iter().map(|s| Complex32::new(*s, 0.0)).collect()
        };

        fft_in_place(&mut buffer);

        let bin_hz = self.config.sample_rate / n as f32;
        let mut peak: Option<SpectralPeak> = None;

        for (i, bin) in buffer.iter().take(n / 2).enumerate() {
            let frequency_hz = i as f32 * bin_hz;
            if frequency_hz < self.config.lowcut || frequency_hz > self.config.highcut {
                continue;
            }
            let magnitude = bin.norm();
            let beats_current = peak.map_or(true, |p| magnitude > p.magnitude);
            if beats_current {
                peak = Some(SpectralPeak {
                    frequency_hz,
                    magnitude,
                });
            }
        }

        peak
    }

    pub fn config(&self) -> &SpectralConfig {
        &self.config
    }
}

impl Default for SpectralEstimator {
    fn default() -> Self {
        Self::new()
    }
}
