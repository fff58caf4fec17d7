use experiment_engine::types::{AnalysisRequest, Correction, PrimaryTest, TestKind};
use experiment_engine::{analyze_inner, analyze_json, AnalysisError};
use serde_json::{json, Value};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "debug".into()),
        )
        .with_test_writer()
        .try_init();
}

fn study_request() -> Value {
    json!({
        "variables": [
            {
                "name": "recall",
                "groups": [
                    { "label": "formal", "values": [10.0, 12.0, 14.0, 16.0, 18.0] },
                    { "label": "informal", "values": [20.0, 22.0, 24.0, 26.0, 28.0] }
                ]
            },
            {
                "name": "satisfaction",
                "groups": [
                    { "label": "formal", "values": [3.0, 4.0, 5.0, 4.0, 3.0, 5.0] },
                    { "label": "informal", "values": [4.0, 3.0, 5.0, 4.0, 5.0, 3.0] }
                ]
            }
        ],
        "categorical": [
            {
                "name": "would_return",
                "conditions": [
                    { "condition": "formal", "counts": { "yes": 10, "no": 20 } },
                    { "condition": "informal", "counts": { "yes": 20, "no": 10 } }
                ]
            }
        ],
        "correlations": [
            {
                "name": "age_vs_recall",
                "x_label": "age",
                "y_label": "recall",
                "x": [21.0, 25.0, 30.0, 34.0, 41.0, 47.0],
                "y": [18.0, 17.0, 19.0, 14.0, 15.0, 12.0]
            }
        ],
        "config": { "alpha": 0.05 }
    })
}

#[test]
fn test_json_round_trip() -> anyhow::Result<()> {
    init_tracing();
    let output = analyze_json(&study_request().to_string())?;
    let report: Value = serde_json::from_str(&output)?;

    // Partial config falls back to defaults.
    assert_eq!(report["config"]["correction"], "Holm");
    assert_eq!(report["config"]["primary_test"], "Auto");
    assert_eq!(report["config"]["normality_checks"], true);

    let variables = report["variables"].as_array().expect("variables array");
    assert_eq!(variables.len(), 2);
    assert_eq!(variables[0]["name"], "recall");
    assert_eq!(variables[0]["welch"]["mean_diff"], -10.0);
    assert_eq!(variables[0]["groups"][0]["summary"]["n"], 5);
    assert_eq!(variables[1]["significant"], false);

    let categories = &report["categorical"][0]["test"]["categories"];
    assert_eq!(categories, &json!(["no", "yes"]));
    assert_eq!(report["correlations"][0]["spearman"]["method"], "Spearman");
    Ok(())
}

#[test]
fn test_every_adjusted_p_is_at_least_raw() -> anyhow::Result<()> {
    let req: AnalysisRequest = serde_json::from_value(study_request())?;
    let report = analyze_inner(req)?;

    let pairs = report
        .variables
        .iter()
        .map(|v| (v.p_value, v.adjusted_p_value))
        .chain(report.categorical.iter().map(|c| (c.p_value, c.adjusted_p_value)))
        .chain(report.correlations.iter().map(|c| (c.p_value, c.adjusted_p_value)));
    for (raw, adjusted) in pairs {
        assert!(adjusted >= raw);
        assert!((0.0..=1.0).contains(&adjusted));
    }
    Ok(())
}

#[test]
fn test_config_from_json() -> anyhow::Result<()> {
    let mut request = study_request();
    request["config"] = json!({ "correction": "None", "primary_test": "NonParametric" });
    let report = analyze_inner(serde_json::from_value(request)?)?;

    assert_eq!(report.config.correction, Correction::None);
    assert_eq!(report.config.primary_test, PrimaryTest::NonParametric);
    assert_eq!(report.config.alpha, 0.05);
    for v in &report.variables {
        assert_eq!(v.primary_test, TestKind::MannWhitneyU);
        assert_eq!(v.adjusted_p_value, v.p_value);
    }
    Ok(())
}

#[test]
fn test_missing_sections_default_to_empty() -> anyhow::Result<()> {
    let report = analyze_inner(serde_json::from_str("{}")?)?;
    assert!(report.variables.is_empty());
    assert!(report.categorical.is_empty());
    assert!(report.correlations.is_empty());
    Ok(())
}

#[test]
fn test_malformed_json_is_a_serialization_error() {
    let err = analyze_json("{ \"variables\": 3 }").unwrap_err();
    assert!(matches!(err, AnalysisError::Serialization(_)));
    assert!(err.to_string().starts_with("Serialization error"));
}

#[test]
fn test_degenerate_groups_are_not_errors() -> anyhow::Result<()> {
    init_tracing();
    let request = json!({
        "variables": [{
            "name": "tiny",
            "groups": [
                { "label": "a", "values": [1.0] },
                { "label": "b", "values": [] }
            ]
        }]
    });
    let report = analyze_inner(serde_json::from_value(request)?)?;
    let v = &report.variables[0];
    assert_eq!(v.p_value, 1.0);
    assert!(!v.significant);
    Ok(())
}

#[test]
fn test_rendering() -> anyhow::Result<()> {
    let report = analyze_inner(serde_json::from_value(study_request())?)?;
    report.summary();

    let md = report.to_markdown();
    assert!(md.starts_with("### Experiment Analysis Results"));
    assert!(md.contains("| recall |"));
    assert!(md.contains("| would_return | Chi-square |"));
    assert!(md.contains("| age_vs_recall | Pearson r |"));
    // header, separator and one row per entry
    assert_eq!(md.lines().filter(|l| l.starts_with('|')).count(), 2 + 4);
    Ok(())
}
