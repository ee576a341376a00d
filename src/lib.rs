//! # vitalscan-signals
//!
//! Camera-based vitals signal processing.
//!
//! This crate turns a stream of per-frame forehead-ROI color samples into
//! three physiological estimates:
//! - **Heart rate** (BPM) via bandpass filtering and FFT peak detection
//! - **SpO2 proxy** (%) via red/green amplitude-to-mean ratios
//! - **Stress index** (%) via a heart-rate + HRV heuristic
//!
//! Face detection, landmark extraction, storage, and display are external
//! collaborators: the pipeline consumes a rectangular RGBA patch plus a
//! landmark point set per frame and emits an optional [`Measurement`] per
//! analysis tick.
//!
//! ## Example
//!
//! ```ignore
//! use vitalscan_signals::{RoiPatch, VitalsPipeline};
//!
//! let mut pipeline = VitalsPipeline::new();
//!
//! // Fast tick (camera frame rate): feed ROI pixels + landmarks
//! for frame in video_frames {
//!     let patch = RoiPatch { width: frame.w, height: frame.h, data: &frame.rgba };
//!     pipeline.on_sampling_tick(&patch, &frame.landmarks);
//! }
//!
//! // Slow tick (1 Hz): read vitals once enough signal has accumulated
//! if let Some(m) = pipeline.on_analysis_tick() {
//!     println!("{} BPM, SpO2 {}%, stress {}%", m.heart_rate_bpm, m.spo2_percent, m.stress_percent);
//! }
//! ```

pub mod buffer;
pub mod dsp;
pub mod error;
pub mod physio;
pub mod pipeline;
pub mod vision;

pub use buffer::{ChannelBuffer, RollingWindow};
pub use dsp::{FilterKernel, Preprocessor, SpectralConfig, SpectralEstimator, SpectralPeak};
pub use error::{ConfigError, FilterDesignError};
pub use physio::{estimate_spo2, stress_percent, IntervalConfig, IntervalEstimator};
pub use pipeline::{Channel, Measurement, PipelineConfig, SampleOutcome, VitalsPipeline};
pub use vision::{forehead_region, mean_rgba, MotionDecision, MotionGate, RoiPatch, RoiRect};
