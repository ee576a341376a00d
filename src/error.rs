//! Error types for construction-time validation.
//!
//! Per the pipeline's error model, nothing on the tick path returns an
//! error: motion rejection, warm-up, and data starvation are silent skips.
//! Typed errors exist only where the host can hand us bad numbers up front
//! (configuration and filter design).

use thiserror::Error;

/// Pipeline configuration rejected at construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("sample rate must be positive, got {0}")]
    NonPositiveSampleRate(f32),

    #[error("buffer capacity must be nonzero")]
    ZeroCapacity,

    #[error("band [{low}, {high}] Hz must satisfy 0 < low < high < Nyquist ({nyquist} Hz)")]
    InvalidBand { low: f32, high: f32, nyquist: f32 },

    #[error("smoothing window must be nonzero")]
    ZeroSmoothingWindow,

    #[error("rolling output window must be nonzero")]
    ZeroRollingWindow,

    #[error("motion threshold must be non-negative, got {0}")]
    NegativeMotionThreshold(f32),

    #[error(transparent)]
    Filter(#[from] FilterDesignError),
}

/// Windowed-sinc kernel design failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterDesignError {
    #[error("band [{low}, {high}] Hz must satisfy 0 < low < high < Nyquist ({nyquist} Hz)")]
    InvalidBand { low: f32, high: f32, nyquist: f32 },

    /// Coefficients summed to ~0, so unit-sum normalization would divide
    /// by zero. Cannot happen for a valid band, kept as a typed error
    /// rather than a NaN kernel.
    #[error("kernel coefficients sum to zero, cannot normalize")]
    DegenerateKernel,
}
