//! Pearson and Spearman correlation with t-based significance.

use getset::Getters;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::math::distributions::t_two_tailed_p;

/// Correlation coefficient family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CorrelationMethod {
    Pearson,
    Spearman,
}

impl fmt::Display for CorrelationMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CorrelationMethod::Pearson => write!(f, "Pearson"),
            CorrelationMethod::Spearman => write!(f, "Spearman"),
        }
    }
}

/// Result of a correlation test.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
#[getset(get = "pub")]
pub struct Correlation {
    method: CorrelationMethod,
    /// Coefficient in [-1, 1].
    r: f64,
    /// `r · sqrt((n - 2) / (1 - r²))`.
    t: f64,
    /// `n - 2`.
    df: f64,
    /// Two-tailed p-value.
    p_value: f64,
    /// Number of pairs used.
    n: usize,
}

impl Correlation {
    fn neutral(method: CorrelationMethod, n: usize) -> Self {
        Self {
            method,
            r: 0.0,
            t: 0.0,
            df: n.saturating_sub(2) as f64,
            p_value: 1.0,
            n,
        }
    }
}

/// Pearson product-moment correlation of paired samples.
///
/// Pairs beyond the shorter slice are ignored. Fewer than three pairs, or a
/// variable with zero variance, give r = 0, p = 1. A perfect correlation
/// reports an infinite t and p = 0.
pub fn pearson(x: &[f64], y: &[f64]) -> Correlation {
    product_moment(x, y, CorrelationMethod::Pearson)
}

/// Spearman rank correlation: Pearson applied to the ranks of each variable.
///
/// Tied values all take the rank of the first position of their block in
/// ascending order (values 1, 2, 2, 3 rank as 1, 2, 2, 4), not the mid-rank
/// of the textbook definition. With ties this gives a different coefficient
/// than most statistics packages.
pub fn spearman(x: &[f64], y: &[f64]) -> Correlation {
    let n = x.len().min(y.len());
    let rx = first_position_ranks(&x[..n]);
    let ry = first_position_ranks(&y[..n]);
    product_moment(&rx, &ry, CorrelationMethod::Spearman)
}

fn product_moment(x: &[f64], y: &[f64], method: CorrelationMethod) -> Correlation {
    let n = x.len().min(y.len());
    if n < 3 {
        debug!(n, %method, "correlation: fewer than 3 pairs");
        return Correlation::neutral(method, n);
    }
    let (x, y) = (&x[..n], &y[..n]);

    let nf = n as f64;
    let mean_x = x.iter().sum::<f64>() / nf;
    let mean_y = y.iter().sum::<f64>() / nf;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    let denominator = (sxx * syy).sqrt();
    if denominator == 0.0 {
        debug!(%method, "correlation: zero variance");
        return Correlation::neutral(method, n);
    }

    let r = (sxy / denominator).clamp(-1.0, 1.0);
    let df = nf - 2.0;
    let remaining = 1.0 - r * r;

    let (t, p_value) = if remaining <= 0.0 {
        (r.signum() * f64::INFINITY, 0.0)
    } else {
        let t = r * (df / remaining).sqrt();
        (t, t_two_tailed_p(t, df))
    };

    Correlation {
        method,
        r,
        t,
        df,
        p_value,
        n,
    }
}

/// 1-based ranks in input order; a tied block shares the rank of its first
/// sorted position.
fn first_position_ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; values.len()];
    let mut block_rank = 1.0;
    for (position, &index) in order.iter().enumerate() {
        if position == 0 || values[index] != values[order[position - 1]] {
            block_rank = (position + 1) as f64;
        }
        ranks[index] = block_rank;
    }
    ranks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pearson_self_correlation() {
        let x = [1.0, 2.5, 3.0, 4.5, 7.0];
        let result = pearson(&x, &x);
        assert!((result.r() - 1.0).abs() < 1e-12);
        assert!(*result.p_value() < 1e-6);
        assert_eq!(*result.n(), 5);
        assert_eq!(*result.method(), CorrelationMethod::Pearson);
    }

    #[test]
    fn test_pearson_known_value() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 1.0, 4.0, 3.0, 5.0];
        let result = pearson(&x, &y);
        // sxy = 8, sxx = syy = 10
        assert!((result.r() - 0.8).abs() < 1e-12);
        assert!((result.t() - 0.8 * (3.0_f64 / 0.36).sqrt()).abs() < 1e-9);
        assert_eq!(*result.df(), 3.0);
        assert!(*result.p_value() > 0.05 && *result.p_value() < 0.2);
    }

    #[test]
    fn test_pearson_negative() {
        let result = pearson(&[1.0, 2.0, 3.0, 4.0], &[8.0, 6.0, 4.0, 2.0]);
        assert!((result.r() + 1.0).abs() < 1e-12);
        assert_eq!(*result.p_value(), 0.0);
        assert!(result.t().is_infinite() && *result.t() < 0.0);
    }

    #[test]
    fn test_pearson_guards() {
        let short = pearson(&[1.0, 2.0], &[2.0, 4.0]);
        assert_eq!((*short.r(), *short.p_value()), (0.0, 1.0));
        let flat = pearson(&[1.0, 2.0, 3.0], &[5.0, 5.0, 5.0]);
        assert_eq!((*flat.r(), *flat.p_value()), (0.0, 1.0));
    }

    #[test]
    fn test_pearson_uses_shorter_length() {
        let result = pearson(&[1.0, 2.0, 3.0, 100.0], &[1.0, 2.0, 3.0]);
        assert_eq!(*result.n(), 3);
        assert!((result.r() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_first_position_ranks() {
        assert_eq!(
            first_position_ranks(&[3.0, 2.0, 2.0, 1.0]),
            vec![4.0, 2.0, 2.0, 1.0]
        );
        assert_eq!(
            first_position_ranks(&[5.0, 5.0, 5.0]),
            vec![1.0, 1.0, 1.0]
        );
    }

    #[test]
    fn test_spearman_monotonic_relationship() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let y = [1.0, 4.0, 9.0, 16.0, 25.0, 36.0];
        let result = spearman(&x, &y);
        assert!((result.r() - 1.0).abs() < 1e-12);
        assert_eq!(*result.method(), CorrelationMethod::Spearman);
    }

    #[test]
    fn test_spearman_tie_ranks_differ_from_midrank() {
        // Ranks of y: 1, 2, 2, 4 (mid-rank would be 1, 2.5, 2.5, 4).
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [10.0, 20.0, 20.0, 40.0];
        let result = spearman(&x, &y);
        let expected = pearson(&[1.0, 2.0, 3.0, 4.0], &[1.0, 2.0, 2.0, 4.0]);
        assert_eq!(result.r(), expected.r());
        let midrank = pearson(&[1.0, 2.0, 3.0, 4.0], &[1.0, 2.5, 2.5, 4.0]);
        assert!((result.r() - midrank.r()).abs() > 1e-6);
    }
}
