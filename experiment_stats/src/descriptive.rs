//! Descriptive statistics.
//!
//! Every function accepts an empty slice and returns zeros rather than NaN.

use getset::Getters;
use serde::{Deserialize, Serialize};

/// Arithmetic mean. Zero for an empty sample.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Variance with denominator `n - correction`.
///
/// `correction = 1` gives the unbiased sample variance, `0` the population
/// variance. Returns 0 when `n <= correction`.
pub fn variance(data: &[f64], correction: usize) -> f64 {
    let n = data.len();
    if n <= correction {
        return 0.0;
    }
    let m = mean(data);
    let ss = data.iter().map(|&x| (x - m).powi(2)).sum::<f64>();
    ss / (n - correction) as f64
}

/// Standard deviation, `sqrt(variance(data, correction))`.
pub fn std_dev(data: &[f64], correction: usize) -> f64 {
    variance(data, correction).sqrt()
}

/// Standard error of the mean, using the sample standard deviation.
pub fn standard_error(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    std_dev(data, 1) / (data.len() as f64).sqrt()
}

/// Linear-interpolation quantile of an ascending-sorted sample.
///
/// The rank is `p * (n - 1)`; the result interpolates between the values at
/// its floor and ceiling. `p` is clamped to [0, 1].
pub fn quantile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let index = p.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;
    let fraction = index - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// Summary of a single sample.
#[derive(Debug, Clone, Default, PartialEq, Getters, Serialize, Deserialize)]
#[getset(get = "pub")]
pub struct DescriptiveSummary {
    n: usize,
    mean: f64,
    /// Sample standard deviation (n - 1 denominator).
    std: f64,
    /// Standard error of the mean.
    sem: f64,
    min: f64,
    max: f64,
    median: f64,
    /// First quartile.
    q1: f64,
    /// Third quartile.
    q3: f64,
}

/// Computes the [`DescriptiveSummary`] of a sample. Empty input yields all zeros.
pub fn describe(data: &[f64]) -> DescriptiveSummary {
    if data.is_empty() {
        return DescriptiveSummary::default();
    }

    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);

    DescriptiveSummary {
        n: data.len(),
        mean: mean(data),
        std: std_dev(data, 1),
        sem: standard_error(data),
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        median: quantile(&sorted, 0.5),
        q1: quantile(&sorted, 0.25),
        q3: quantile(&sorted, 0.75),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_variance() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&data), 5.0);
        assert_eq!(variance(&data, 0), 4.0);
        assert!((variance(&data, 1) - 32.0 / 7.0).abs() < 1e-12);
        assert_eq!(std_dev(&data, 0), 2.0);
        assert!((standard_error(&data) - (32.0_f64 / 7.0).sqrt() / 8.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_variance_guard() {
        assert_eq!(variance(&[], 1), 0.0);
        assert_eq!(variance(&[3.0], 1), 0.0);
        assert_eq!(variance(&[3.0, 5.0], 2), 0.0);
        assert_eq!(standard_error(&[]), 0.0);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_quantile_interpolation() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&sorted, 0.0), 1.0);
        assert_eq!(quantile(&sorted, 1.0), 4.0);
        assert_eq!(quantile(&sorted, 0.5), 2.5);
        assert_eq!(quantile(&sorted, 0.25), 1.75);
        assert_eq!(quantile(&[7.0], 0.3), 7.0);
    }

    #[test]
    fn test_quantile_clamps_probability() {
        let sorted = [1.0, 2.0, 3.0];
        assert_eq!(quantile(&sorted, 1.5), 3.0);
        assert_eq!(quantile(&sorted, -0.5), 1.0);
    }

    #[test]
    fn test_describe() {
        let summary = describe(&[5.0, 1.0, 3.0, 2.0, 4.0]);
        assert_eq!(*summary.n(), 5);
        assert_eq!(*summary.mean(), 3.0);
        assert_eq!(*summary.min(), 1.0);
        assert_eq!(*summary.max(), 5.0);
        assert_eq!(*summary.median(), 3.0);
        assert_eq!(*summary.q1(), 2.0);
        assert_eq!(*summary.q3(), 4.0);
        assert!((summary.std() - 2.5_f64.sqrt()).abs() < 1e-12);
        assert!((summary.sem() - 0.5_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_describe_empty_is_all_zero() {
        assert_eq!(describe(&[]), DescriptiveSummary::default());
        assert_eq!(*describe(&[]).n(), 0);
    }
}
