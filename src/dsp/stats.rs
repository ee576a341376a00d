//! Scalar statistics over sampled series.

use ndarray::Array1;

/// Arithmetic mean; 0.0 for an empty series.
pub fn mean(signal: &Array1<f32>) -> f32 {
    signal.mean().unwrap_or(0.0)
}

/// Population standard deviation; 0.0 for an empty series.
pub fn std(signal: &Array1<f32>) -> f32 {
    let m = mean(signal);
    let variance = signal.mapv(|x| (x - m).powi(2)).mean().unwrap_or(0.0);
    variance.sqrt()
}

/// Causal moving average with a shrinking left edge.
///
/// Output length equals input length; sample `i` averages over
/// `[max(0, i - window + 1) ..= i]`, so the first samples use however much
/// history exists rather than zero-padding or wrapping.
pub fn moving_average(signal: &Array1<f32>, window: usize) -> Array1<f32> {
    let w = window.max(1);
    let n = signal.len();
    let mut out = Array1::zeros(n);
    let mut running = 0.0f32;

    for i in 0..n {
        running += signal[i];
        if i >= w {
            running -= signal[i - w];
        }
        let span = (i + 1).min(w);
        out[i] = running / span as f32;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean_single_element() {
        let signal = Array1::from(vec![42.5]);
        assert_relative_eq!(mean(&signal), 42.5);
    }

    #[test]
    fn test_std_constant_sequence() {
        let signal = Array1::from(vec![7.0; 32]);
        assert_relative_eq!(std(&signal), 0.0);
    }

    #[test]
    fn test_std_known_value() {
        let signal = Array1::from(vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        // Population std of 1..=5 is sqrt(2)
        assert_relative_eq!(std(&signal), std::f32::consts::SQRT_2, epsilon = 1e-4);
    }

    #[test]
    fn test_empty_series() {
        let signal = Array1::from(vec![]);
        assert_eq!(mean(&signal), 0.0);
        assert_eq!(std(&signal), 0.0);
    }

    #[test]
    fn test_moving_average_preserves_length() {
        let signal = Array1::from((0..37).map(|i| i as f32).collect::<Vec<_>>());
        for window in [1, 2, 3, 5, 50] {
            assert_eq!(moving_average(&signal, window).len(), signal.len());
        }
    }

    #[test]
    fn test_moving_average_constant_input() {
        let signal = Array1::from(vec![3.5; 20]);
        let out = moving_average(&signal, 3);
        for v in out.iter() {
            assert_relative_eq!(*v, 3.5, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_moving_average_shrinking_edge() {
        let signal = Array1::from(vec![1.0, 2.0, 3.0, 4.0]);
        let out = moving_average(&signal, 3);
        assert_relative_eq!(out[0], 1.0);
        assert_relative_eq!(out[1], 1.5);
        assert_relative_eq!(out[2], 2.0);
        assert_relative_eq!(out[3], 3.0);
    }

    #[test]
    fn test_moving_average_window_one_is_identity() {
        let signal = Array1::from(vec![5.0, -1.0, 2.5]);
        let out = moving_average(&signal, 1);
        assert_eq!(out.to_vec(), signal.to_vec());
    }
}
