use crate::error::AnalysisError;
use crate::types::*;
use experiment_stats::{
    chi_square_2xk, classify_cohens_d, classify_rank_biserial, describe, holm_bonferroni,
    levene_test, mann_whitney_u, one_way_anova, pearson, shapiro_wilk, spearman, welch_t_test,
    LabeledGroup,
};
use rayon::prelude::*;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Chained configuration of an analysis, run with [`AnalysisBuilder::run`].
///
/// # Example
///
/// ```
/// use experiment_engine::AnalysisBuilder;
/// use experiment_stats::LabeledGroup;
///
/// let report = AnalysisBuilder::new()
///     .alpha(0.05)
///     .variable(
///         "recall",
///         &[
///             LabeledGroup::new("formal", &[10.0, 12.0, 14.0, 16.0, 18.0]),
///             LabeledGroup::new("informal", &[20.0, 22.0, 24.0, 26.0, 28.0]),
///         ],
///     )
///     .run()
///     .unwrap();
///
/// assert!(report.variables[0].significant);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AnalysisBuilder {
    config: AnalysisConfig,
    variables: Vec<VariableSamples>,
    categorical: Vec<CategoricalVariable>,
    correlations: Vec<CorrelationRequest>,
}

impl AnalysisBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Significance threshold applied to the adjusted p-values.
    pub fn alpha(&mut self, alpha: f64) -> &mut Self {
        self.config.alpha = alpha;
        self
    }

    pub fn correction(&mut self, correction: Correction) -> &mut Self {
        self.config.correction = correction;
        self
    }

    pub fn primary_test(&mut self, primary_test: PrimaryTest) -> &mut Self {
        self.config.primary_test = primary_test;
        self
    }

    /// Turns the per-group Shapiro-Wilk check on or off. With it off,
    /// [`PrimaryTest::Auto`] always picks the parametric test.
    pub fn normality_checks(&mut self, enabled: bool) -> &mut Self {
        self.config.normality_checks = enabled;
        self
    }

    /// Adds a numeric variable measured under each condition in `groups`.
    pub fn variable(&mut self, name: &str, groups: &[LabeledGroup]) -> &mut Self {
        self.variables.push(VariableSamples {
            name: name.to_string(),
            groups: groups.to_vec(),
        });
        self
    }

    /// Adds a categorical variable with per-condition counts.
    pub fn categorical(&mut self, name: &str, conditions: &[ConditionCounts]) -> &mut Self {
        self.categorical.push(CategoricalVariable {
            name: name.to_string(),
            conditions: conditions.to_vec(),
        });
        self
    }

    /// Adds a paired correlation between two measures.
    pub fn correlation(
        &mut self,
        name: &str,
        (x_label, x): (&str, &[f64]),
        (y_label, y): (&str, &[f64]),
    ) -> &mut Self {
        self.correlations.push(CorrelationRequest {
            name: name.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            x: x.to_vec(),
            y: y.to_vec(),
        });
        self
    }

    pub fn run(&self) -> Result<AnalysisReport, AnalysisError> {
        analyze_inner(AnalysisRequest {
            variables: self.variables.clone(),
            categorical: self.categorical.clone(),
            correlations: self.correlations.clone(),
            config: Some(self.config.clone()),
        })
    }
}

pub fn analyze_inner(req: AnalysisRequest) -> Result<AnalysisReport, AnalysisError> {
    let config = req.config.clone().unwrap_or_default();
    validate(&req, &config)?;

    info!(
        variables = req.variables.len(),
        categorical = req.categorical.len(),
        correlations = req.correlations.len(),
        "Running analysis"
    );

    let variables: Vec<VariableReport> = req
        .variables
        .par_iter()
        .map(|v| analyze_variable(v, &config))
        .collect();

    let categorical: Vec<CategoricalReport> = req
        .categorical
        .iter()
        .map(analyze_categorical)
        .collect();

    let correlations: Vec<CorrelationReport> =
        req.correlations.iter().map(analyze_correlation).collect();

    let mut report = AnalysisReport {
        variables,
        categorical,
        correlations,
        config,
    };
    apply_correction(&mut report);
    Ok(report)
}

fn validate(req: &AnalysisRequest, config: &AnalysisConfig) -> Result<(), AnalysisError> {
    // Written so that NaN is rejected too.
    if !(config.alpha > 0.0 && config.alpha < 1.0) {
        return Err(AnalysisError::InvalidAlpha(config.alpha));
    }

    for variable in &req.variables {
        if variable.groups.len() < 2 {
            return Err(AnalysisError::InsufficientGroups {
                variable: variable.name.clone(),
                found: variable.groups.len(),
            });
        }
        let mut seen = HashSet::new();
        for group in &variable.groups {
            if !seen.insert(group.label.as_str()) {
                return Err(AnalysisError::DuplicateGroupLabel {
                    variable: variable.name.clone(),
                    label: group.label.clone(),
                });
            }
        }
    }

    for variable in &req.categorical {
        if variable.conditions.len() != 2 {
            return Err(AnalysisError::InvalidConditionCount {
                variable: variable.name.clone(),
                found: variable.conditions.len(),
            });
        }
    }

    Ok(())
}

fn analyze_variable(variable: &VariableSamples, config: &AnalysisConfig) -> VariableReport {
    for group in variable.groups.iter().filter(|g| g.len() < 2) {
        warn!(
            variable = %variable.name,
            group = %group.label,
            n = group.len(),
            "Group too small for variance-based tests"
        );
    }

    let groups: Vec<GroupReport> = variable
        .groups
        .iter()
        .map(|g| GroupReport {
            label: g.label.clone(),
            summary: describe(g.values()),
            normality: config.normality_checks.then(|| shapiro_wilk(g.values())),
        })
        .collect();

    let samples: Vec<&[f64]> = variable.groups.iter().map(|g| g.values()).collect();
    let levene = levene_test(&samples);

    let looks_normal = groups
        .iter()
        .filter_map(|g| g.normality.as_ref())
        .all(|sw| *sw.p_value() > config.alpha);
    let parametric = match config.primary_test {
        PrimaryTest::Parametric => true,
        PrimaryTest::NonParametric => false,
        PrimaryTest::Auto => looks_normal,
    };

    let report = if let [first, second] = samples.as_slice() {
        let welch = welch_t_test(first, second);
        let mann_whitney = mann_whitney_u(first, second);
        let (primary_test, statistic, effect_size, effect_magnitude, p_value) = if parametric {
            (
                TestKind::WelchT,
                *welch.t(),
                *welch.cohens_d(),
                classify_cohens_d(*welch.cohens_d()),
                *welch.p_value(),
            )
        } else {
            (
                TestKind::MannWhitneyU,
                *mann_whitney.u(),
                *mann_whitney.rank_biserial_r(),
                classify_rank_biserial(*mann_whitney.rank_biserial_r()),
                *mann_whitney.p_value(),
            )
        };
        VariableReport {
            name: variable.name.clone(),
            groups,
            levene,
            welch: Some(welch),
            mann_whitney: Some(mann_whitney),
            anova: None,
            primary_test,
            statistic,
            effect_size,
            effect_magnitude: Some(effect_magnitude),
            p_value,
            adjusted_p_value: p_value,
            significant: false,
        }
    } else {
        let anova = one_way_anova(&samples);
        VariableReport {
            name: variable.name.clone(),
            groups,
            levene,
            welch: None,
            mann_whitney: None,
            primary_test: TestKind::OneWayAnova,
            statistic: *anova.f(),
            effect_size: *anova.eta_squared(),
            effect_magnitude: None,
            p_value: *anova.p_value(),
            adjusted_p_value: *anova.p_value(),
            significant: false,
            anova: Some(anova),
        }
    };

    debug!(
        variable = %report.name,
        test = %report.primary_test,
        p_value = report.p_value,
        "Variable analyzed"
    );
    report
}

fn analyze_categorical(variable: &CategoricalVariable) -> CategoricalReport {
    // Condition count was checked in `validate`.
    let (a, b) = (&variable.conditions[0], &variable.conditions[1]);
    let test = chi_square_2xk(&a.counts, &b.counts);
    let p_value = *test.p_value();
    debug!(variable = %variable.name, chi2 = *test.chi2(), p_value, "Categorical variable analyzed");

    CategoricalReport {
        name: variable.name.clone(),
        conditions: vec![a.condition.clone(), b.condition.clone()],
        test,
        p_value,
        adjusted_p_value: p_value,
        significant: false,
    }
}

fn analyze_correlation(req: &CorrelationRequest) -> CorrelationReport {
    if req.x.len() != req.y.len() {
        warn!(
            correlation = %req.name,
            x = req.x.len(),
            y = req.y.len(),
            "Unequal lengths, extra values ignored"
        );
    }
    let pearson = pearson(&req.x, &req.y);
    let spearman = spearman(&req.x, &req.y);
    let p_value = *pearson.p_value();

    CorrelationReport {
        name: req.name.clone(),
        x_label: req.x_label.clone(),
        y_label: req.y_label.clone(),
        pearson,
        spearman,
        p_value,
        adjusted_p_value: p_value,
        significant: false,
    }
}

/// A report entry that contributes one p-value to the correction family.
trait Adjustable {
    fn raw_p_value(&self) -> f64;
    fn set_adjusted(&mut self, adjusted: f64, alpha: f64);
}

macro_rules! impl_adjustable {
    ($($report:ty),*) => {
        $(impl Adjustable for $report {
            fn raw_p_value(&self) -> f64 {
                self.p_value
            }

            fn set_adjusted(&mut self, adjusted: f64, alpha: f64) {
                self.adjusted_p_value = adjusted;
                self.significant = adjusted < alpha;
            }
        })*
    };
}

impl_adjustable!(VariableReport, CategoricalReport, CorrelationReport);

/// Adjusts the primary p-values of every entry as one family.
fn apply_correction(report: &mut AnalysisReport) {
    let AnalysisReport {
        variables,
        categorical,
        correlations,
        config,
    } = report;

    let mut family: Vec<&mut dyn Adjustable> = variables
        .iter_mut()
        .map(|r| r as &mut dyn Adjustable)
        .chain(categorical.iter_mut().map(|r| r as &mut dyn Adjustable))
        .chain(correlations.iter_mut().map(|r| r as &mut dyn Adjustable))
        .collect();

    let raw: Vec<f64> = family.iter().map(|r| r.raw_p_value()).collect();
    let adjusted = match config.correction {
        Correction::Holm => holm_bonferroni(&raw),
        Correction::None => raw,
    };

    for (entry, p) in family.iter_mut().zip(adjusted) {
        entry.set_adjusted(p, config.alpha);
    }
    info!(tests = family.len(), correction = ?config.correction, "Correction applied");
}
