use experiment_stats::{
    ChiSquareTest, ContingencyTable, Correlation, DescriptiveSummary, EffectMagnitude,
    LabeledGroup, LeveneTest, MannWhitneyU, OneWayAnova, ShapiroWilk, WelchTTest,
};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Correction {
    Holm,
    None,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryTest {
    Parametric,    // Welch t-test, or ANOVA for 3+ groups
    NonParametric, // Mann-Whitney U; ANOVA still used for 3+ groups
    Auto,          // Parametric unless a group fails the normality check
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    pub alpha: f64,
    pub correction: Correction,
    pub primary_test: PrimaryTest,
    pub normality_checks: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            alpha: 0.05,
            correction: Correction::Holm,
            primary_test: PrimaryTest::Auto,
            normality_checks: true,
        }
    }
}

/// Measurements of one variable, one group per condition.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct VariableSamples {
    pub name: String,
    pub groups: Vec<LabeledGroup>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ConditionCounts {
    pub condition: String,
    pub counts: ContingencyTable,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CategoricalVariable {
    pub name: String,
    pub conditions: Vec<ConditionCounts>, // exactly two
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CorrelationRequest {
    pub name: String,
    pub x_label: String,
    pub y_label: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub variables: Vec<VariableSamples>,
    #[serde(default)]
    pub categorical: Vec<CategoricalVariable>,
    #[serde(default)]
    pub correlations: Vec<CorrelationRequest>,
    pub config: Option<AnalysisConfig>,
}

/// The test whose p-value enters the multiple-comparison family.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestKind {
    WelchT,
    MannWhitneyU,
    OneWayAnova,
    ChiSquare,
    Pearson,
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            TestKind::WelchT => "Welch t",
            TestKind::MannWhitneyU => "Mann-Whitney U",
            TestKind::OneWayAnova => "One-way ANOVA",
            TestKind::ChiSquare => "Chi-square",
            TestKind::Pearson => "Pearson r",
        };
        write!(f, "{}", name)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GroupReport {
    pub label: String,
    pub summary: DescriptiveSummary,
    pub normality: Option<ShapiroWilk>, // None when normality checks are off
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct VariableReport {
    pub name: String,
    pub groups: Vec<GroupReport>,
    pub levene: LeveneTest,
    pub welch: Option<WelchTTest>,
    pub mann_whitney: Option<MannWhitneyU>,
    pub anova: Option<OneWayAnova>,
    pub primary_test: TestKind,
    pub statistic: f64,
    pub effect_size: f64, // Cohen's d, rank-biserial r or eta squared
    pub effect_magnitude: Option<EffectMagnitude>,
    pub p_value: f64,
    pub adjusted_p_value: f64,
    pub significant: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CategoricalReport {
    pub name: String,
    pub conditions: Vec<String>,
    pub test: ChiSquareTest,
    pub p_value: f64,
    pub adjusted_p_value: f64,
    pub significant: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CorrelationReport {
    pub name: String,
    pub x_label: String,
    pub y_label: String,
    pub pearson: Correlation,
    pub spearman: Correlation,
    pub p_value: f64,
    pub adjusted_p_value: f64,
    pub significant: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub variables: Vec<VariableReport>,
    pub categorical: Vec<CategoricalReport>,
    pub correlations: Vec<CorrelationReport>,
    pub config: AnalysisConfig,
}
