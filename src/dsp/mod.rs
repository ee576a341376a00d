//! DSP (Digital Signal Processing) module
//!
//! Signal processing for the rPPG pipeline:
//! - `stats` - mean, standard deviation, causal moving average
//! - `filters` - windowed-sinc FIR design and the two-stage preprocessor
//! - `fft` - in-place radix-2 FFT and Hann window
//! - `spectral` - dominant in-band frequency extraction (heart rate)

pub mod fft;
pub mod filters;
pub mod spectral;
pub mod stats;

pub use filters::{FilterKernel, Preprocessor};
pub use spectral::{SpectralConfig, SpectralEstimator, SpectralPeak};
