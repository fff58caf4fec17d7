//! One-way analysis of variance across k independent groups.

use getset::Getters;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::descriptive::mean;
use crate::math::distributions::f_upper_p;

/// Result of a one-way ANOVA.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
#[getset(get = "pub")]
pub struct OneWayAnova {
    /// F statistic, `MS_between / MS_within`.
    f: f64,
    /// `k - 1`.
    df_between: f64,
    /// `N - k`.
    df_within: f64,
    p_value: f64,
    /// `SS_between / SS_total`.
    eta_squared: f64,
    group_means: Vec<f64>,
    group_sizes: Vec<usize>,
}

/// Runs a one-way ANOVA over `groups`.
///
/// With fewer than two groups, or fewer than `k + 1` observations in total,
/// the result is neutral (F = 0, p = 1, eta² = 0) but still reports the
/// group means and sizes. A zero within-group mean square gives F = 0.
pub fn one_way_anova(groups: &[&[f64]]) -> OneWayAnova {
    let k = groups.len();
    let group_means: Vec<f64> = groups.iter().map(|g| mean(g)).collect();
    let group_sizes: Vec<usize> = groups.iter().map(|g| g.len()).collect();
    let total_n: usize = group_sizes.iter().sum();

    if k < 2 || total_n < k + 1 {
        debug!(groups = k, observations = total_n, "anova: too few groups or observations");
        return OneWayAnova {
            f: 0.0,
            df_between: 0.0,
            df_within: 0.0,
            p_value: 1.0,
            eta_squared: 0.0,
            group_means,
            group_sizes,
        };
    }

    let grand_mean = groups.iter().flat_map(|g| g.iter()).sum::<f64>() / total_n as f64;

    let ss_between = group_means
        .iter()
        .zip(&group_sizes)
        .map(|(&m, &n)| n as f64 * (m - grand_mean).powi(2))
        .sum::<f64>();
    let ss_within = groups
        .iter()
        .zip(&group_means)
        .map(|(g, &m)| g.iter().map(|&x| (x - m).powi(2)).sum::<f64>())
        .sum::<f64>();

    let df_between = (k - 1) as f64;
    let df_within = (total_n - k) as f64;
    let ms_between = ss_between / df_between;
    let ms_within = ss_within / df_within;

    let f = if ms_within == 0.0 {
        0.0
    } else {
        ms_between / ms_within
    };
    let ss_total = ss_between + ss_within;
    let eta_squared = if ss_total == 0.0 {
        0.0
    } else {
        ss_between / ss_total
    };

    OneWayAnova {
        f,
        df_between,
        df_within,
        p_value: f_upper_p(f, df_between, df_within),
        eta_squared,
        group_means,
        group_sizes,
    }
}
