//! Approximate Shapiro-Wilk normality check.
//!
//! This is a quick diagnostic, not a publication-grade test: the
//! coefficients come from expected normal order statistics rather than the
//! exact Shapiro-Wilk weights, and the p-value is read off four fixed bands
//! instead of the W sampling distribution.

use getset::Getters;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::math::special::normal_quantile;

/// (lower W bound, p-value) bands, checked in order.
const P_VALUE_BANDS: [(f64, f64); 3] = [(0.95, 0.5), (0.9, 0.1), (0.85, 0.05)];
const P_VALUE_FLOOR: f64 = 0.01;

/// Result of the approximate Shapiro-Wilk check.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
#[getset(get = "pub")]
pub struct ShapiroWilk {
    /// W statistic in [0, 1]; values near 1 are consistent with normality.
    w: f64,
    /// Banded p-value: 0.5, 0.1, 0.05 or 0.01.
    p_value: f64,
    n: usize,
}

/// Runs the approximate Shapiro-Wilk check on `data`.
///
/// Scores `m_i = Φ⁻¹((i + 0.5) / n)` are correlated with the sorted sample;
/// W is the squared, normalised correlation divided by
/// `1 + 0.221/√n - 0.147/n`, clamped to [0, 1].
///
/// Fewer than three values or a constant sample give W = 1, p = 1.
pub fn shapiro_wilk(data: &[f64]) -> ShapiroWilk {
    let n = data.len();
    let neutral = ShapiroWilk {
        w: 1.0,
        p_value: 1.0,
        n,
    };
    if n < 3 {
        debug!(n, "shapiro_wilk: fewer than 3 values");
        return neutral;
    }

    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);

    let nf = n as f64;
    let scores: Vec<f64> = (0..n)
        .map(|i| normal_quantile((i as f64 + 0.5) / nf))
        .collect();
    let score_ss = scores.iter().map(|m| m * m).sum::<f64>();

    let mean = sorted.iter().sum::<f64>() / nf;
    let ss = sorted.iter().map(|&x| (x - mean).powi(2)).sum::<f64>();

    if ss == 0.0 || score_ss == 0.0 {
        debug!("shapiro_wilk: zero variance");
        return neutral;
    }

    let numerator = scores
        .iter()
        .zip(&sorted)
        .map(|(m, x)| m * x)
        .sum::<f64>()
        .powi(2);
    let normalizer = 1.0 + 0.221 / nf.sqrt() - 0.147 / nf;
    let w = (numerator / (score_ss * ss) / normalizer).clamp(0.0, 1.0);

    ShapiroWilk {
        w,
        p_value: banded_p_value(w),
        n,
    }
}

fn banded_p_value(w: f64) -> f64 {
    P_VALUE_BANDS
        .iter()
        .find(|&&(bound, _)| w > bound)
        .map_or(P_VALUE_FLOOR, |&(_, p)| p)
}
