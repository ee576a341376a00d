//! The vitals pipeline: buffers, tick functions, and composite output.
//!
//! One `VitalsPipeline` owns every piece of session state (channel
//! buffers, motion gate, preprocessor, estimators, rolling windows), so an
//! isolated instance can be constructed per session or per test. It has no
//! timers of its own: the host drives [`VitalsPipeline::on_sampling_tick`]
//! at the camera rate and [`VitalsPipeline::on_analysis_tick`] once per
//! second, from real timers, a simulated clock, or a plain loop. Dropping
//! the pipeline cancels everything; there are no callbacks to orphan.
//!
//! Buffers are written only by the sampling tick and read only through
//! snapshots by the analysis tick, so the two cadences never observe a
//! series mid-mutation.

use crate::buffer::{ChannelBuffer, RollingWindow};
use crate::dsp::fft::largest_power_of_two;
use crate::dsp::{Preprocessor, SpectralConfig, SpectralEstimator};
use crate::error::ConfigError;
use crate::physio::{estimate_spo2, stress_percent, IntervalConfig, IntervalEstimator};
use crate::vision::{mean_rgba, MotionGate, RoiPatch};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Color channel selector for raw-series access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

/// One analysis tick's composite vitals estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measurement {
    /// Heart rate in BPM; expected 30-220 in practice.
    pub heart_rate_bpm: u16,
    /// SpO2 proxy, clamped to [80, 100].
    pub spo2_percent: u8,
    /// Stress index, clamped to [0, 100].
    pub stress_percent: u8,
}

/// Outcome of one sampling tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleOutcome {
    /// Frame sampled; per-channel means appended to the buffers.
    Accepted { rgb_mean: [f32; 3] },
    /// Landmark motion over threshold (or mismatched landmark sets);
    /// nothing buffered.
    RejectedMotion { score: f32 },
    /// Zero-pixel region or undersized pixel buffer; nothing buffered.
    RejectedEmptyRegion,
}

/// Pipeline tuning knobs. `Default` is the reference parameter set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Camera sampling rate in Hz
    pub sample_rate: f32,
    /// Per-channel buffer capacity in samples (900 = 30 s at 30 Hz)
    pub buffer_capacity: usize,
    /// Physiological band lower edge in Hz
    pub lowcut: f32,
    /// Physiological band upper edge in Hz
    pub highcut: f32,
    /// Motion-gate threshold in landmark-coordinate units
    pub motion_threshold: f32,
    /// Moving-average smoothing window in samples
    pub smoothing_window: usize,
    /// FIR kernel half-order (kernel length = 2 * half_order + 1)
    pub fir_half_order: usize,
    /// Rolling output window in analysis ticks
    pub rolling_window: usize,
    /// Warm-up grace period in seconds (analysis ticks are 1 Hz)
    pub warmup_secs: u32,
    /// Minimum buffered signal before analysis, in seconds
    pub min_data_secs: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            sample_rate: 30.0,
            buffer_capacity: 900,
            lowcut: 0.7,  // 42 BPM
            highcut: 3.0, // 180 BPM
            motion_threshold: 3.0,
            smoothing_window: 3,
            fir_half_order: 4,
            rolling_window: 5,
            warmup_secs: 5,
            min_data_secs: 10,
        }
    }
}

impl PipelineConfig {
    /// Validate host-supplied parameters before they reach the signal path.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_rate <= 0.0 {
            return Err(ConfigError::NonPositiveSampleRate(self.sample_rate));
        }
        if self.buffer_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        let nyquist = 0.5 * self.sample_rate;
        if !(self.lowcut > 0.0 && self.lowcut < self.highcut && self.highcut < nyquist) {
            return Err(ConfigError::InvalidBand {
                low: self.lowcut,
                high: self.highcut,
                nyquist,
            });
        }
        if self.smoothing_window == 0 {
            return Err(ConfigError::ZeroSmoothingWindow);
        }
        if self.rolling_window == 0 {
            return Err(ConfigError::ZeroRollingWindow);
        }
        if self.motion_threshold < 0.0 {
            return Err(ConfigError::NegativeMotionThreshold(self.motion_threshold));
        }
        Ok(())
    }

    fn min_samples(&self) -> usize {
        (self.sample_rate * self.min_data_secs as f32) as usize
    }
}

/// Camera-to-vitals signal pipeline.
pub struct VitalsPipeline {
    config: PipelineConfig,

    red: ChannelBuffer,
    green: ChannelBuffer,
    blue: ChannelBuffer,

    gate: MotionGate,
    preprocessor: Preprocessor,
    spectral: SpectralEstimator,
    intervals: IntervalEstimator,

    rolling_hr: RollingWindow,
    rolling_spo2: RollingWindow,
    rolling_stress: RollingWindow,

    frame_count: u64,
    analysis_ticks: u64,
}

impl VitalsPipeline {
    /// Create a pipeline with the reference parameter set.
    pub fn new() -> Self {
        Self::with_config(PipelineConfig::default()).expect("default configuration is valid")
    }

    /// Create a pipeline with host-supplied parameters.
    pub fn with_config(config: PipelineConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let preprocessor = Preprocessor::new(
            config.smoothing_window,
            config.lowcut,
            config.highcut,
            config.sample_rate,
            config.fir_half_order,
        )?;
        let spectral = SpectralEstimator::with_config(SpectralConfig {
            sample_rate: config.sample_rate,
            lowcut: config.lowcut,
            highcut: config.highcut,
            apply_hann: true,
        });
        let intervals = IntervalEstimator::with_config(IntervalConfig {
            sample_rate: config.sample_rate,
        });

        Ok(Self {
            red: ChannelBuffer::new(config.buffer_capacity),
            green: ChannelBuffer::new(config.buffer_capacity),
            blue: ChannelBuffer::new(config.buffer_capacity),
            gate: MotionGate::new(config.motion_threshold),
            preprocessor,
            spectral,
            intervals,
            rolling_hr: RollingWindow::new(config.rolling_window),
            rolling_spo2: RollingWindow::new(config.rolling_window),
            rolling_stress: RollingWindow::new(config.rolling_window),
            frame_count: 0,
            analysis_ticks: 0,
            config,
        })
    }

    /// Fast tick: gate the frame on landmark motion and, if accepted,
    /// reduce the ROI patch to per-channel means and buffer them.
    ///
    /// Intended period is `1000 / sample_rate` ms. Ticks must not overlap;
    /// `&mut self` makes that structural within one process.
    pub fn on_sampling_tick(
        &mut self,
        patch: &RoiPatch<'_>,
        landmarks: &[[f32; 2]],
    ) -> SampleOutcome {
        self.frame_count += 1;

        let decision = self.gate.observe(landmarks);
        if !decision.accepted {
            return SampleOutcome::RejectedMotion {
                score: decision.score,
            };
        }

        let Some([r, g, b]) = mean_rgba(patch) else {
            log::debug!("frame rejected: empty or undersized ROI patch");
            return SampleOutcome::RejectedEmptyRegion;
        };

        self.red.push(r);
        self.green.push(g);
        self.blue.push(b);

        SampleOutcome::Accepted { rgb_mean: [r, g, b] }
    }

    /// Slow tick (fixed 1 s period): snapshot the buffers and derive a
    /// smoothed composite [`Measurement`].
    ///
    /// Returns `None` (a silent skip, not an error) while warming up,
    /// while under the minimum-data floor, when no spectral peak lands in
    /// the physiological band, or when the SpO2 ratio is undefined.
    pub fn on_analysis_tick(&mut self) -> Option<Measurement> {
        let tick = self.analysis_ticks;
        self.analysis_ticks += 1;

        if tick < self.config.warmup_secs as u64 {
            log::debug!(
                "analysis skipped: warming up ({}/{} s)",
                tick + 1,
                self.config.warmup_secs
            );
            return None;
        }

        let min_samples = self.config.min_samples();
        if self.green.len() < min_samples {
            log::debug!(
                "analysis skipped: {}/{} samples buffered",
                self.green.len(),
                min_samples
            );
            return None;
        }

        // The one synchronization point: copies taken here, sampling may
        // keep appending behind them.
        let red_raw = self.red.snapshot();
        let green_raw = self.green.snapshot();

        let filtered = self.preprocessor.process(&green_raw);

        // The radix-2 transform needs a power-of-two length; keep the most
        // recent samples.
        let fft_len = largest_power_of_two(filtered.len());
        let tail: Array1<f32> = filtered
            .iter()
            .skip(filtered.len() - fft_len)
            .copied()
            .collect();

        let Some(peak) = self.spectral.estimate(&tail) else {
            log::debug!("analysis skipped: no spectral peak in band");
            return None;
        };
        let heart_rate = peak.bpm();

        let hrv_ms = self.intervals.hrv_ms(&filtered);

        let Some(spo2) = estimate_spo2(&red_raw, &green_raw) else {
            log::debug!("analysis skipped: SpO2 ratio undefined for this window");
            return None;
        };

        let stress = stress_percent(heart_rate, hrv_ms);

        self.rolling_hr.push(heart_rate);
        self.rolling_spo2.push(spo2 as f32);
        self.rolling_stress.push(stress as f32);

        Some(Measurement {
            heart_rate_bpm: self.rolling_hr.rounded_mean()? as u16,
            spo2_percent: self.rolling_spo2.rounded_mean()? as u8,
            stress_percent: self.rolling_stress.rounded_mean()? as u8,
        })
    }

    /// Raw buffered series for one channel (visualization only).
    pub fn channel_snapshot(&self, channel: Channel) -> Array1<f32> {
        match channel {
            Channel::Red => self.red.snapshot(),
            Channel::Green => self.green.snapshot(),
            Channel::Blue => self.blue.snapshot(),
        }
    }

    /// Accepted samples currently buffered per channel.
    pub fn sample_count(&self) -> usize {
        self.green.len()
    }

    /// Buffer fill ratio in [0, 1].
    pub fn buffer_fill(&self) -> f32 {
        self.green.len() as f32 / self.config.buffer_capacity as f32
    }

    /// Whether the warm-up grace period has elapsed.
    pub fn is_warmed_up(&self) -> bool {
        self.analysis_ticks >= self.config.warmup_secs as u64
    }

    /// Sampling ticks observed (accepted or rejected).
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Restore the pipeline to its initial state for a fresh session.
    pub fn reset(&mut self) {
        self.red.clear();
        self.green.clear();
        self.blue.clear();
        self.gate.reset();
        self.rolling_hr.clear();
        self.rolling_spo2.clear();
        self.rolling_stress.clear();
        self.frame_count = 0;
        self.analysis_ticks = 0;
        log::info!("vitals pipeline reset");
    }
}

impl Default for VitalsPipeline {
    fn default() -> Self {
        Self::new()
    }
}
