//! Qualitative labels for effect sizes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Conventional magnitude band of an effect size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EffectMagnitude {
    Negligible,
    Small,
    Medium,
    Large,
}

impl fmt::Display for EffectMagnitude {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            EffectMagnitude::Negligible => "negligible",
            EffectMagnitude::Small => "small",
            EffectMagnitude::Medium => "medium",
            EffectMagnitude::Large => "large",
        };
        write!(f, "{}", label)
    }
}

fn classify(value: f64, small: f64, medium: f64, large: f64) -> EffectMagnitude {
    let magnitude = value.abs();
    if magnitude < small {
        EffectMagnitude::Negligible
    } else if magnitude < medium {
        EffectMagnitude::Small
    } else if magnitude < large {
        EffectMagnitude::Medium
    } else {
        EffectMagnitude::Large
    }
}

/// Cohen's d bands: 0.2, 0.5, 0.8.
pub fn classify_cohens_d(d: f64) -> EffectMagnitude {
    classify(d, 0.2, 0.5, 0.8)
}

/// Rank-biserial r bands: 0.1, 0.3, 0.5.
pub fn classify_rank_biserial(r: f64) -> EffectMagnitude {
    classify(r, 0.1, 0.3, 0.5)
}
