use thiserror::Error;

/// Errors for requests that cannot be analyzed as stated.
///
/// Degenerate data (tiny groups, zero variance, empty tables) is not an
/// error: the statistics come back neutral instead.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Variable '{variable}' needs at least 2 groups, got {found}")]
    InsufficientGroups { variable: String, found: usize },
    #[error("Variable '{variable}' has more than one group labeled '{label}'")]
    DuplicateGroupLabel { variable: String, label: String },
    #[error("Categorical variable '{variable}' needs exactly 2 conditions, got {found}")]
    InvalidConditionCount { variable: String, found: usize },
    #[error("Alpha must lie strictly between 0 and 1, got {0}")]
    InvalidAlpha(f64),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
