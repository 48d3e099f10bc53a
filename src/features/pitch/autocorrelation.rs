//! Autocorrelation of a time-domain frame
//!
//! The fundamental-frequency search needs, for every candidate lag `L`, the
//! dot product of the signal with itself shifted by `L`:
//!
//! `r[L] = sum(x[i] * x[i + L]) for i in 0..n-L`
//!
//! [`autocorrelate`] computes all lags at once with FFT acceleration using
//! the identity `ACF = IFFT(|FFT(x)|^2)`, O(n log n) instead of O(n^2).
//! Zero-padding to at least `2n` makes the circular correlation equal to the
//! linear one above. [`autocorrelate_naive`] is the direct O(n * lags)
//! reference used to cross-check the FFT path in tests.

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

/// Correlations below this fraction of the zero-lag energy are treated as
/// non-positive (FFT rounding noise on correlation-free signals).
const POSITIVE_CORR_EPSILON: f32 = 1e-4;

/// Compute the autocorrelation function with FFT acceleration
///
/// Returns `r[lag]` for `lag` in `0..signal.len()`. `r[0]` is the signal
/// energy. Values are not clamped: negative correlations are meaningful to
/// the lag search (a band with no positive correlation means no detectable
/// pitch).
pub fn autocorrelate(signal: &[f32]) -> Vec<f32> {
    let n = signal.len();
    if n == 0 {
        return Vec::new();
    }

    // Zero-pad to the next power of two >= 2n so circular wrap-around
    // contributes nothing to lags below n.
    let fft_size = (2 * n).next_power_of_two();

    let mut buffer: Vec<Complex<f32>> = signal.iter().map(|&x| Complex::new(x, 0.0)).collect();
    buffer.resize(fft_size, Complex::new(0.0, 0.0));

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(fft_size);
    fft.process(&mut buffer);

    // |FFT|^2
    for x in &mut buffer {
        *x = *x * x.conj();
    }

    let ifft = planner.plan_fft_inverse(fft_size);
    ifft.process(&mut buffer);

    let scale = 1.0 / (fft_size as f32);
    buffer[..n].iter().map(|x| x.re * scale).collect()
}

/// Direct autocorrelation over a lag band (reference implementation)
///
/// Returns `r[lag]` for `lag` in `min_lag..=max_lag`, computed as the plain
/// shifted dot product.
pub fn autocorrelate_naive(signal: &[f32], min_lag: usize, max_lag: usize) -> Vec<f32> {
    let n = signal.len();
    (min_lag..=max_lag)
        .map(|lag| {
            if lag >= n {
                return 0.0;
            }
            signal[..n - lag]
                .iter()
                .zip(&signal[lag..])
                .map(|(a, b)| a * b)
                .sum()
        })
        .collect()
}

/// Select the lag with maximum positive correlation in `min_lag..=max_lag`
///
/// Returns `None` when no lag in the band correlates positively, which the
/// pitch estimator treats as detection failure. Positivity is judged against
/// a small fraction of the zero-lag energy so FFT rounding noise on a
/// correlation-free signal (e.g. a lone impulse) cannot fake a pitch lock.
pub fn best_positive_lag(acf: &[f32], min_lag: usize, max_lag: usize) -> Option<(usize, f32)> {
    let energy = *acf.first()?;
    if energy <= 0.0 {
        return None;
    }
    let threshold = energy * POSITIVE_CORR_EPSILON;

    let mut best: Option<(usize, f32)> = None;
    for lag in min_lag..=max_lag.min(acf.len().saturating_sub(1)) {
        let corr = acf[lag];
        if corr > threshold && best.map_or(true, |(_, c)| corr > c) {
            best = Some((lag, corr));
        }
    }
    best
}
