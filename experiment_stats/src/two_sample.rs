//! Two-sample comparisons: Welch's t-test, Mann-Whitney U and Levene's test.

use getset::Getters;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::anova::one_way_anova;
use crate::descriptive::{mean, variance};
use crate::math::distributions::t_two_tailed_p;
use crate::math::special::normal_cdf;

/// Critical value used for the mean-difference confidence interval.
///
/// This is the large-sample normal value, not a df-adjusted t quantile.
pub const CI_CRITICAL_VALUE: f64 = 1.96;

/// Result of Welch's unequal-variance t-test.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
#[getset(get = "pub")]
pub struct WelchTTest {
    t: f64,
    /// Welch–Satterthwaite degrees of freedom.
    df: f64,
    /// Two-tailed p-value.
    p_value: f64,
    /// Mean difference over the pooled standard deviation.
    cohens_d: f64,
    /// `mean1 - mean2`.
    mean_diff: f64,
    /// Lower bound of the 95% interval for `mean_diff`.
    ci_lower: f64,
    /// Upper bound of the 95% interval for `mean_diff`.
    ci_upper: f64,
    mean1: f64,
    mean2: f64,
    n1: usize,
    n2: usize,
}

/// Welch's t-test for two independent samples.
///
/// Cohen's d uses the pooled standard deviation rather than the Welch
/// standard error. The 95% interval is `mean_diff ± 1.96 · SE`.
///
/// # Returns
///
/// A neutral result (t = 0, df = 0, p = 1, d = 0, interval collapsed onto the
/// mean difference) when either group has fewer than two values. If both
/// groups have zero variance, t = 0 and p = 1.
pub fn welch_t_test(group1: &[f64], group2: &[f64]) -> WelchTTest {
    let n1 = group1.len();
    let n2 = group2.len();
    let mean1 = mean(group1);
    let mean2 = mean(group2);
    let mean_diff = mean1 - mean2;

    let neutral = WelchTTest {
        t: 0.0,
        df: 0.0,
        p_value: 1.0,
        cohens_d: 0.0,
        mean_diff,
        ci_lower: mean_diff,
        ci_upper: mean_diff,
        mean1,
        mean2,
        n1,
        n2,
    };

    if n1 < 2 || n2 < 2 {
        debug!(n1, n2, "welch_t_test: group smaller than 2");
        return neutral;
    }

    let v1 = variance(group1, 1);
    let v2 = variance(group2, 1);
    let (n1f, n2f) = (n1 as f64, n2 as f64);
    let se1 = v1 / n1f;
    let se2 = v2 / n2f;
    let se_sum = se1 + se2;

    if se_sum == 0.0 {
        debug!("welch_t_test: both groups have zero variance");
        return neutral;
    }

    let se = se_sum.sqrt();
    let t = mean_diff / se;
    let df = se_sum.powi(2) / (se1.powi(2) / (n1f - 1.0) + se2.powi(2) / (n2f - 1.0));

    let pooled_sd = (((n1f - 1.0) * v1 + (n2f - 1.0) * v2) / (n1f + n2f - 2.0)).sqrt();
    let cohens_d = if pooled_sd == 0.0 {
        0.0
    } else {
        mean_diff / pooled_sd
    };

    let margin = CI_CRITICAL_VALUE * se;

    WelchTTest {
        t,
        df,
        p_value: t_two_tailed_p(t, df),
        cohens_d,
        mean_diff,
        ci_lower: mean_diff - margin,
        ci_upper: mean_diff + margin,
        mean1,
        mean2,
        n1,
        n2,
    }
}

/// Result of the Mann-Whitney U test.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
#[getset(get = "pub")]
pub struct MannWhitneyU {
    /// `min(U1, U2)`.
    u: f64,
    /// U computed from the rank sum of the first group.
    u1: f64,
    /// Normal-approximation z score of `u1`.
    z: f64,
    /// Two-tailed p-value from the normal approximation.
    p_value: f64,
    /// Rank-biserial correlation, `1 - 2U / (n1 n2)`.
    rank_biserial_r: f64,
    n1: usize,
    n2: usize,
}

/// Mann-Whitney U test with average ranks for ties.
///
/// The normal approximation uses `sd = sqrt(n1 n2 (n1 + n2 + 1) / 12)` with
/// neither a tie correction nor a continuity correction. An empty group gives
/// a neutral result (U = 0, z = 0, p = 1, r = 0).
pub fn mann_whitney_u(group1: &[f64], group2: &[f64]) -> MannWhitneyU {
    let n1 = group1.len();
    let n2 = group2.len();

    if n1 == 0 || n2 == 0 {
        debug!(n1, n2, "mann_whitney_u: empty group");
        return MannWhitneyU {
            u: 0.0,
            u1: 0.0,
            z: 0.0,
            p_value: 1.0,
            rank_biserial_r: 0.0,
            n1,
            n2,
        };
    }

    // Tag each value with whether it came from the first group.
    let mut pooled: Vec<(f64, bool)> = group1
        .iter()
        .map(|&x| (x, true))
        .chain(group2.iter().map(|&x| (x, false)))
        .collect();
    pooled.sort_by(|a, b| a.0.total_cmp(&b.0));

    let values: Vec<f64> = pooled.iter().map(|&(x, _)| x).collect();
    let ranks = average_ranks(&values);
    let r1: f64 = pooled
        .iter()
        .zip(&ranks)
        .filter(|((_, first), _)| *first)
        .map(|(_, &rank)| rank)
        .sum();

    let (n1f, n2f) = (n1 as f64, n2 as f64);
    let n_product = n1f * n2f;
    let u1 = r1 - n1f * (n1f + 1.0) / 2.0;
    let u2 = n_product - u1;
    let u = u1.min(u2);

    let mu = n_product / 2.0;
    let sigma = (n_product * (n1f + n2f + 1.0) / 12.0).sqrt();
    let z = (u1 - mu) / sigma;
    let p_value = (2.0 * (1.0 - normal_cdf(z.abs()))).clamp(0.0, 1.0);

    MannWhitneyU {
        u,
        u1,
        z,
        p_value,
        rank_biserial_r: 1.0 - 2.0 * u / n_product,
        n1,
        n2,
    }
}

/// 1-based ranks of an ascending-sorted slice; each tied block receives the
/// mean of the positions it spans.
fn average_ranks(sorted: &[f64]) -> Vec<f64> {
    let n = sorted.len();
    let mut ranks = vec![0.0; n];
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j + 1 < n && sorted[j + 1] == sorted[i] {
            j += 1;
        }
        let rank = (i + j) as f64 / 2.0 + 1.0;
        for r in &mut ranks[i..=j] {
            *r = rank;
        }
        i = j + 1;
    }
    ranks
}

/// Result of Levene's test for equality of variances.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
#[getset(get = "pub")]
pub struct LeveneTest {
    f: f64,
    /// `k - 1`.
    df1: f64,
    /// `N - k`.
    df2: f64,
    p_value: f64,
}

/// Levene's test on absolute deviations from each group's mean.
///
/// This is the mean-centred variant, not the median-centred Brown–Forsythe
/// form. The deviations go through [`one_way_anova`], so the same guards
/// apply: fewer than two groups or fewer than `k + 1` observations give
/// F = 0, p = 1.
pub fn levene_test(groups: &[&[f64]]) -> LeveneTest {
    let deviations: Vec<Vec<f64>> = groups
        .iter()
        .map(|g| {
            let m = mean(g);
            g.iter().map(|&x| (x - m).abs()).collect()
        })
        .collect();
    let deviation_refs: Vec<&[f64]> = deviations.iter().map(Vec::as_slice).collect();

    let anova = one_way_anova(&deviation_refs);

    LeveneTest {
        f: *anova.f(),
        df1: *anova.df_between(),
        df2: *anova.df_within(),
        p_value: *anova.p_value(),
    }
}
