//! Runs every test an experiment needs in one request.
//!
//! An [`AnalysisRequest`](types::AnalysisRequest) lists numeric variables
//! (one sample per condition), categorical variables (counts per condition)
//! and paired correlations. The engine runs the descriptive statistics,
//! normality and variance checks and the primary test for each entry. It then
//! applies Holm-Bonferroni across all primary p-values and returns an
//! [`AnalysisReport`](types::AnalysisReport).

pub mod analysis;
pub mod error;
mod report;
pub mod types;

pub use crate::analysis::{analyze_inner, AnalysisBuilder};
pub use crate::error::AnalysisError;
use crate::types::*;

/// JSON boundary: parses an [`AnalysisRequest`], analyzes it and returns the
/// report as pretty JSON.
pub fn analyze_json(input: &str) -> Result<String, AnalysisError> {
    let req: AnalysisRequest = serde_json::from_str(input)?;
    let report = analyze_inner(req)?;
    Ok(report.to_json()?)
}
