//! In-place radix-2 FFT and window functions.
//!
//! The transform length **must be a power of two**; a non-power-of-two
//! length would silently skip butterfly stages and corrupt the spectrum, so
//! it is asserted as a programming error rather than handled. Callers with
//! arbitrary-length series truncate first (see [`largest_power_of_two`]).

use num_complex::Complex32;
use std::f32::consts::PI;

/// In-place radix-2 decimation-in-time FFT.
///
/// Bit-reversal permutation followed by butterfly stages of doubling
/// length. Lengths 0 and 1 are identity transforms.
///
/// # Panics
/// If `data.len()` is not a power of two.
pub fn fft_in_place(data: &mut [Complex32]) {
    let n = data.len();
    if n <= 1 {
        return;
    }
    assert!(n.is_power_of_two(), "FFT length must be a power of two");

    // Bit-reversal permutation
    let mut j = 0usize;
    for i in 0..n {
        if i < j {
            data.swap(i, j);
        }
        let mut m = n >> 1;
        while m >= 1 && j >= m {
            j -= m;
            m >>= 1;
        }
        j += m;
    }

    // Butterfly stages
    let mut len = 2;
    while len <= n {
        let half = len / 2;
        let angle = -2.0 * PI / len as f32;
        for start in (0..n).step_by(len) {
            for k in 0..half {
                let tw = Complex32::new((angle * k as f32).cos(), (angle * k as f32).sin());
                let u = data[start + k];
                let v = data[start + k + half] * tw;
                data[start + k] = u + v;
                data[start + k + half] = u - v;
            }
        }
        len <<= 1;
    }
}

/// Hann window coefficients: `w[i] = 0.5 * (1 - cos(2*pi*i / (n - 1)))`.
///
/// Applied before the FFT to reduce spectral leakage between bins.
/// `n == 1` degenerates to `[1.0]` (the formula's denominator vanishes).
pub fn hann_window(n: usize) -> Vec<f32> {
    if n == 1 {
        return vec![1.0];
    }
    (0..n)
        .map(|i| 0.5 * (1.0 - ((2.0 * PI * i as f32) / (n - 1) as f32).cos()))
        .collect()
}

/// Largest power of two that is `<= n`, or 0 when `n == 0`.
pub fn largest_power_of_two(n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    1 << n.ilog2()
}
