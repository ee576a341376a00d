//! Windowed-sinc FIR band-limiting and the channel preprocessor.
//!
//! The kernel is a finite impulse response built from a sinc difference,
//! normalized to unit sum. It is linear-phase by symmetry, and convolution
//! is strictly causal (no future samples, no wraparound); the rest of the
//! pipeline's peak indexing depends on those two properties, so an IIR
//! design must not be swapped in here.

use crate::dsp::stats::moving_average;
use crate::error::FilterDesignError;
use ndarray::Array1;
use std::f32::consts::PI;

/// Fixed-length FIR kernel for one (lowcut, highcut, sample_rate) band.
#[derive(Debug, Clone)]
pub struct FilterKernel {
    coefficients: Vec<f32>,
}

impl FilterKernel {
    /// Design a bandpass kernel of length `2 * half_order + 1`.
    ///
    /// With `low` and `high` the cutoffs as fractions of Nyquist and
    /// `x = i - half_order` the tap offset, the center tap is
    /// `2 * (high - low)` and the others follow
    /// `(sin(2*pi*high*x) - sin(2*pi*low*x)) / (pi*x)`. The taps are then
    /// normalized so they sum to 1.
    pub fn design(
        lowcut: f32,
        highcut: f32,
        sample_rate: f32,
        half_order: usize,
    ) -> Result<Self, FilterDesignError> {
        let nyquist = 0.5 * sample_rate;
        if !(lowcut > 0.0 && lowcut < highcut && highcut < nyquist) {
            return Err(FilterDesignError::InvalidBand {
                low: lowcut,
                high: highcut,
                nyquist,
            });
        }

        let low = lowcut / nyquist;
        let high = highcut / nyquist;
        let len = 2 * half_order + 1;

        let mut coefficients = vec![0.0f32; len];
        for (i, c) in coefficients.iter_mut().enumerate() {
            let x = i as f32 - half_order as f32;
            *c = if x == 0.0 {
                2.0 * (high - low)
            } else {
                ((2.0 * PI * high * x).sin() - (2.0 * PI * low * x).sin()) / (PI * x)
            };
        }

        let sum: f32 = coefficients.iter().sum();
        if sum.abs() < 1e-12 {
            return Err(FilterDesignError::DegenerateKernel);
        }
        for c in &mut coefficients {
            *c /= sum;
        }

        Ok(Self { coefficients })
    }

    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    pub fn coefficients(&self) -> &[f32] {
        &self.coefficients
    }

    /// Causal convolution: `out[i] = sum_j k[j] * signal[i - j]` for
    /// `i - j >= 0`. The left edge sees fewer valid taps and is naturally
    /// attenuated; no zero-padding past the right edge, no wraparound.
    pub fn convolve(&self, signal: &Array1<f32>) -> Array1<f32> {
        let n = signal.len();
        let mut out = Array1::zeros(n);
        for i in 0..n {
            let mut acc = 0.0f32;
            for (j, c) in self.coefficients.iter().enumerate() {
                if i >= j {
                    acc += c * signal[i - j];
                }
            }
            out[i] = acc;
        }
        out
    }
}

/// Two-stage channel preprocessor: moving-average smoothing, then the
/// windowed-sinc band limit.
#[derive(Debug, Clone)]
pub struct Preprocessor {
    smoothing_window: usize,
    kernel: FilterKernel,
}

impl Preprocessor {
    pub fn new(
        smoothing_window: usize,
        lowcut: f32,
        highcut: f32,
        sample_rate: f32,
        half_order: usize,
    ) -> Result<Self, FilterDesignError> {
        Ok(Self {
            smoothing_window,
            kernel: FilterKernel::design(lowcut, highcut, sample_rate, half_order)?,
        })
    }

    /// Smooth and band-limit one channel snapshot. Output length equals
    /// input length.
    pub fn process(&self, signal: &Array1<f32>) -> Array1<f32> {
        let smoothed = moving_average(signal, self.smoothing_window);
        self.kernel.convolve(&smoothed)
    }

    pub fn kernel(&self) -> &FilterKernel {
        &self.kernel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn steady_state_amplitude(signal: &Array1<f32>, skip: usize) -> f32 {
        signal
            .iter()
            .skip(skip)
            .fold(0.0f32, |acc, v| acc.max(v.abs()))
    }

    #[test]
    fn test_kernel_sums_to_one() {
        for (low, high, fs) in [(0.7, 3.0, 30.0), (0.5, 2.0, 25.0), (1.0, 5.0, 60.0)] {
            let kernel = FilterKernel::design(low, high, fs, 4).unwrap();
            let sum: f32 = kernel.coefficients().iter().sum();
            assert_relative_eq!(sum, 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_kernel_length() {
        let kernel = FilterKernel::design(0.7, 3.0, 30.0, 4).unwrap();
        assert_eq!(kernel.len(), 9);
    }

    #[test]
    fn test_kernel_rejects_inverted_band() {
        assert!(FilterKernel::design(3.0, 0.7, 30.0, 4).is_err());
        assert!(FilterKernel::design(0.0, 3.0, 30.0, 4).is_err());
        // highcut at/above Nyquist
        assert!(FilterKernel::design(0.7, 15.0, 30.0, 4).is_err());
    }

    #[test]
    fn test_convolve_preserves_length() {
        let kernel = FilterKernel::design(0.7, 3.0, 30.0, 4).unwrap();
        let signal = Array1::from(vec![1.0; 100]);
        assert_eq!(kernel.convolve(&signal).len(), 100);
    }

    #[test]
    fn test_in_band_sinusoid_not_attenuated() {
        let fs = 30.0;
        let kernel = FilterKernel::design(0.7, 3.0, fs, 4).unwrap();
        let signal: Array1<f32> = (0..300)
            .map(|i| (2.0 * PI * 1.2 * i as f32 / fs).sin())
            .collect();

        let filtered = kernel.convolve(&signal);
        // 1.2 Hz is in-band; past the edge transient the amplitude must not
        // have been knocked down (the unit-sum kernel actually has gain > 1
        // inside the band).
        let amp = steady_state_amplitude(&filtered, 50);
        assert!(amp >= 0.9, "in-band amplitude {} too low", amp);
    }

    #[test]
    fn test_out_of_band_sinusoid_attenuated() {
        let fs = 30.0;
        let kernel = FilterKernel::design(0.7, 3.0, fs, 4).unwrap();
        // 10 Hz, far above the 3 Hz highcut
        let signal: Array1<f32> = (0..300)
            .map(|i| (2.0 * PI * 10.0 * i as f32 / fs).sin())
            .collect();

        let filtered = kernel.convolve(&signal);
        let amp = steady_state_amplitude(&filtered, 50);
        assert!(amp < 0.5, "out-of-band amplitude {} not attenuated", amp);
    }

    #[test]
    fn test_preprocessor_output_length() {
        let pre = Preprocessor::new(3, 0.7, 3.0, 30.0, 4).unwrap();
        let signal: Array1<f32> = (0..256).map(|i| (i as f32 * 0.1).sin()).collect();
        assert_eq!(pre.process(&signal).len(), 256);
    }
}
