//! Chi-square test of independence for two conditions over K categories.

use getset::Getters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

use crate::math::distributions::chi_square_cdf;
use crate::sample::ContingencyTable;

/// Result of a 2×K chi-square test.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
#[getset(get = "pub")]
pub struct ChiSquareTest {
    chi2: f64,
    /// `K - 1`.
    df: f64,
    p_value: f64,
    /// Sorted union of category labels across both conditions.
    categories: Vec<String>,
}

/// Chi-square test of independence between condition and category.
///
/// Categories are the union of labels in `a` and `b`; a label missing from
/// one table counts as zero there. Cells with an expected count of zero are
/// skipped. Zero categories or an empty grand total give chi2 = 0, df = 0,
/// p = 1.
pub fn chi_square_2xk(a: &ContingencyTable, b: &ContingencyTable) -> ChiSquareTest {
    let categories: Vec<String> = a
        .keys()
        .chain(b.keys())
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let total_a: u64 = a.values().sum();
    let total_b: u64 = b.values().sum();
    let grand_total = (total_a + total_b) as f64;

    if categories.is_empty() || grand_total == 0.0 {
        debug!(categories = categories.len(), "chi_square_2xk: empty table");
        return ChiSquareTest {
            chi2: 0.0,
            df: 0.0,
            p_value: 1.0,
            categories,
        };
    }

    let mut chi2 = 0.0;
    for category in &categories {
        let observed_a = a.get(category).copied().unwrap_or(0) as f64;
        let observed_b = b.get(category).copied().unwrap_or(0) as f64;
        let category_total = observed_a + observed_b;

        for (observed, condition_total) in [(observed_a, total_a), (observed_b, total_b)] {
            let expected = condition_total as f64 * category_total / grand_total;
            if expected > 0.0 {
                chi2 += (observed - expected).powi(2) / expected;
            }
        }
    }

    let df = (categories.len() - 1) as f64;
    let p_value = (1.0 - chi_square_cdf(chi2, df)).clamp(0.0, 1.0);
    debug!(chi2, df, p_value, "chi_square_2xk");

    ChiSquareTest {
        chi2,
        df,
        p_value,
        categories,
    }
}
