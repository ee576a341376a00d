//! Physiological metric estimation on top of the DSP layer.
//!
//! - `hrv` - beat-to-beat interval variability from the pulse waveform
//! - `metrics` - SpO2 ratio proxy and the composite stress score

pub mod hrv;
pub mod metrics;

pub use hrv::{IntervalConfig, IntervalEstimator};
pub use metrics::{estimate_spo2, spo2_from_ratio, stress_percent};
