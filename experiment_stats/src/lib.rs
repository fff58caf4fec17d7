//! Statistical tests for comparing conditions in a between-subjects experiment.
//!
//! Every function takes plain `f64` samples (or category counts) and returns a
//! fresh result record. Statistically degenerate inputs, such as groups that
//! are too small or have zero variance, produce a neutral result (statistic 0,
//! p = 1) instead of an error. Non-finite values are not filtered: callers are
//! expected to drop NaN and infinities before calling in, otherwise results
//! propagate NaN.
//!
//! Some p-values are approximate. The Shapiro-Wilk check reports one of four
//! banded p-values, Mann-Whitney uses a normal approximation without tie
//! correction, and the Welch confidence interval uses a fixed critical value
//! of 1.96.
//!
//! # Example
//!
//! ```
//! use experiment_stats::{classify_cohens_d, holm_bonferroni, welch_t_test};
//!
//! let formal = [10.0, 12.0, 14.0, 16.0, 18.0];
//! let informal = [20.0, 22.0, 24.0, 26.0, 28.0];
//!
//! let result = welch_t_test(&formal, &informal);
//! assert_eq!(*result.mean_diff(), -10.0);
//! assert!(*result.p_value() < 0.01);
//!
//! println!("effect: {}", classify_cohens_d(*result.cohens_d()));
//!
//! let adjusted = holm_bonferroni(&[*result.p_value(), 0.04, 0.3]);
//! assert!(adjusted[0] >= *result.p_value());
//! ```

pub mod anova;
pub mod categorical;
pub mod correction;
pub mod correlation;
pub mod descriptive;
pub mod effect_size;
pub mod math;
pub mod normality;
pub mod sample;
pub mod two_sample;

pub use crate::anova::{one_way_anova, OneWayAnova};
pub use crate::categorical::{chi_square_2xk, ChiSquareTest};
pub use crate::correction::holm_bonferroni;
pub use crate::correlation::{pearson, spearman, Correlation, CorrelationMethod};
pub use crate::descriptive::{describe, mean, std_dev, variance, DescriptiveSummary};
pub use crate::effect_size::{classify_cohens_d, classify_rank_biserial, EffectMagnitude};
pub use crate::normality::{shapiro_wilk, ShapiroWilk};
pub use crate::sample::{ContingencyTable, LabeledGroup};
pub use crate::two_sample::{
    levene_test, mann_whitney_u, welch_t_test, LeveneTest, MannWhitneyU, WelchTTest,
};
