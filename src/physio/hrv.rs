//! Beat-to-beat interval variability from the band-limited pulse signal.
//!
//! Time-domain counterpart to the spectral heart-rate path: local maxima
//! are treated as pulse beats and the spread of their spacing is an HRV
//! proxy feeding the stress score.

use crate::dsp::stats;
use ndarray::Array1;

/// Interval extraction parameters.
#[derive(Debug, Clone)]
pub struct IntervalConfig {
    /// Sample rate in Hz
    pub sample_rate: f32,
}

impl Default for IntervalConfig {
    fn default() -> Self {
        Self { sample_rate: 30.0 }
    }
}

/// Peak-interval HRV estimator.
pub struct IntervalEstimator {
    config: IntervalConfig,
}

impl IntervalEstimator {
    pub fn new() -> Self {
        Self::with_config(IntervalConfig::default())
    }

    pub fn with_config(config: IntervalConfig) -> Self {
        Self { config }
    }

    /// Indices of strict local maxima over the interior of `signal`.
    pub fn detect_peaks(&self, signal: &Array1<f32>) -> Vec<usize> {
        let n = signal.len();
        let mut peaks = Vec::new();
        for i in 1..n.saturating_sub(1) {
            if signal[i] > signal[i - 1] && signal[i] > signal[i + 1] {
                peaks.push(i);
            }
        }
        peaks
    }

    /// Standard deviation of consecutive peak intervals, in milliseconds.
    ///
    /// Returns 0.0 with fewer than 2 intervals (< 3 peaks); that is the
    /// "insufficient data" sentinel, not a zero-variance reading.
    pub fn hrv_ms(&self, signal: &Array1<f32>) -> f32 {
        let peaks = self.detect_peaks(signal);
        if peaks.len() < 3 {
            return 0.0;
        }

        let intervals: Array1<f32> = peaks
            .windows(2)
            .map(|w| (w[1] - w[0]) as f32 / self.config.sample_rate)
            .collect();

        stats::std(&intervals) * 1000.0
    }

    pub fn config(&self) -> &IntervalConfig {
        &self.config
    }
}

impl Default for IntervalEstimator {
    fn default() -> Self {
        Self::new()
    }
}
