//! SpO2 ratio proxy and composite stress scoring.
//!
//! Both are screening heuristics, not calibrated clinical models: SpO2
//! approximates the pulse-oximetry ratio-of-ratios with red/green camera
//! channels, and stress linearly combines heart rate with interval
//! variability.

use crate::dsp::stats;
use ndarray::Array1;

/// Map the red/green ratio-of-ratios to a SpO2 percentage.
///
/// `110 - 25 * R`, clamped to [80, 100].
pub fn spo2_from_ratio(r: f32) -> u8 {
    (110.0 - 25.0 * r).clamp(80.0, 100.0).round() as u8
}

/// SpO2 proxy over the raw (unfiltered) red and green windows.
///
/// `R = (std(red)/mean(red)) / (std(green)/mean(green))`. Returns `None`
/// when either channel mean is zero or the green AC/DC ratio is zero:
/// the division is undefined there and a NaN must never reach a displayed
/// measurement.
pub fn estimate_spo2(red: &Array1<f32>, green: &Array1<f32>) -> Option<u8> {
    let red_dc = stats::mean(red);
    let green_dc = stats::mean(green);
    if red_dc == 0.0 || green_dc == 0.0 {
        return None;
    }

    let green_ratio = stats::std(green) / green_dc;
    if green_ratio == 0.0 {
        return None;
    }

    let r = (stats::std(red) / red_dc) / green_ratio;
    Some(spo2_from_ratio(r))
}

/// Composite stress score in [0, 100].
///
/// Heart rate is normalized as `(hr - 60) / 40` and HRV as
/// `(hrv - 20) / 40`; higher heart rate and lower variability both raise
/// the score.
pub fn stress_percent(heart_rate_bpm: f32, hrv_ms: f32) -> u8 {
    let norm_hr = (heart_rate_bpm - 60.0) / 40.0;
    let norm_hrv = (hrv_ms - 20.0) / 40.0;
    let stress = (norm_hr + (1.0 - norm_hrv)) / 2.0;
    (stress * 100.0).clamp(0.0, 100.0).round() as u8
}
