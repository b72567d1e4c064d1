//! Numeric helpers shared by both scoring engines.
//!
//! All functions are pure and operate on plain slices. Scores across the
//! engines live on a 0-100 scale, so `clamp_score` is the common exit point
//! for every sub-score and final score.

/// Lower bound of the score scale.
pub const SCORE_MIN: f64 = 0.0;
/// Upper bound of the score scale.
pub const SCORE_MAX: f64 = 100.0;

/// Compute the mean of a data slice.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Compute sample standard deviation.
pub fn std_dev(data: &[f64]) -> f64 {
    if data.len() < 2 {
        return 0.0;
    }
    let m = mean(data);
    let variance = data.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (data.len() - 1) as f64;
    variance.sqrt()
}

/// Clamp `value` into `[lo, hi]`. NaN collapses to `lo`.
pub fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
    if value.is_nan() {
        return lo;
    }
    value.max(lo).min(hi)
}

/// Clamp a score into the 0-100 scale.
pub fn clamp_score(value: f64) -> f64 {
    clamp(value, SCORE_MIN, SCORE_MAX)
}

/// Keep a value only if it is a finite number.
pub fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Fractional growth from `previous` to `current` (0.10 = +10%).
///
/// Returns `None` unless both values are finite and `previous` is strictly
/// positive; a negative or zero base has no meaningful growth rate.
pub fn growth_rate(previous: f64, current: f64) -> Option<f64> {
    if !previous.is_finite() || !current.is_finite() || previous <= 0.0 {
        return None;
    }
    Some((current - previous) / previous)
}

/// Round a 0-100 score to the nearest integer and narrow it to `u8`.
pub fn round_score(value: f64) -> u8 {
    clamp_score(value).round() as u8
}
