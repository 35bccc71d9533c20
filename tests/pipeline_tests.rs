//! End-to-end analysis tests.

mod common;

use approx::assert_relative_eq;
use incident_regress::prelude::*;

#[test]
fn test_full_run() {
    let records = common::generate_seasonal_records(1095, 2024);
    let report = run_analysis(&records, &AnalysisOptions::default());

    assert_eq!(report.total_incidents(), records.len() as u64);
    assert_eq!(report.boroughs.len(), 5);

    let model = report.model.as_ref().expect("three years should fit");
    let summary = model.summary();

    assert_eq!(summary.coefficients.len(), 12);
    assert_eq!(summary.coefficients[0].name, "(Intercept)");
    assert_eq!(summary.coefficients[11].name, "month[12]");
    assert_eq!(summary.residual_df, report.daily.len() - 12);
    // The generator has a strong summer peak
    assert!(summary.f_pvalue < 0.01);
    assert!(model.result().get_coefficient("month[7]").unwrap() > 0.0);
}

#[test]
fn test_scenario_from_records() {
    let records = common::records(&[
        (2020, 1, 1, "A"),
        (2020, 1, 1, "A"),
        (2020, 1, 2, "B"),
        (2020, 2, 1, "A"),
        (2020, 2, 1, "B"),
        (2020, 2, 1, "B"),
        (2020, 2, 2, "A"),
        (2020, 2, 2, "A"),
        (2020, 2, 2, "C"),
    ]);

    let report = run_analysis(&records, &AnalysisOptions::default());
    let counts: Vec<u64> = report.daily.iter().map(|d| d.count).collect();
    assert_eq!(counts, vec![2, 1, 3, 3]);

    let model = report.model.unwrap();
    assert_relative_eq!(model.result().intercept(), 1.5, epsilon = 1e-10);
    assert_relative_eq!(
        model.result().get_coefficient("month[2]").unwrap(),
        1.5,
        epsilon = 1e-10
    );
}

#[test]
fn test_regression_failure_keeps_charts() {
    // Three months with a single day each leave no residual df
    let records = common::records(&[(2020, 1, 5, "A"), (2020, 2, 5, "B"), (2020, 3, 5, "B")]);
    let report = run_analysis(&records, &AnalysisOptions::default());

    assert_eq!(report.daily.len(), 3);
    assert_eq!(report.boroughs[0].borough, "B");
    assert!(matches!(
        report.model,
        Err(RegressionError::DegenerateFit {
            n_observations: 3,
            n_parameters: 3
        })
    ));
}

#[test]
fn test_options_from_toml() {
    let toml_str = r#"
confidence_level = 0.9
reference_month = { fixed = 2 }
"#;
    let options = AnalysisOptions::from_toml_str(toml_str).unwrap();
    let report = run_analysis(
        &common::records(&[
            (2020, 1, 1, "A"),
            (2020, 1, 1, "A"),
            (2020, 1, 2, "A"),
            (2020, 2, 1, "A"),
            (2020, 2, 1, "A"),
            (2020, 2, 1, "A"),
            (2020, 2, 2, "A"),
            (2020, 2, 2, "A"),
            (2020, 2, 2, "A"),
        ]),
        &options,
    );

    let model = report.model.unwrap();
    // February is now the baseline
    assert_eq!(model.encoding().reference(), 2);
    assert_relative_eq!(model.result().intercept(), 3.0, epsilon = 1e-10);
    assert_relative_eq!(
        model.result().get_coefficient("month[1]").unwrap(),
        -1.5,
        epsilon = 1e-10
    );
    assert_relative_eq!(model.summary().confidence_level, 0.9);
}

#[test]
fn test_invalid_options_surface_as_regression_error() {
    let options = AnalysisOptions::builder()
        .rank_tolerance(-1.0)
        .build_unchecked();
    let report = run_analysis(&common::generate_seasonal_records(100, 1), &options);

    assert!(!report.daily.is_empty());
    assert!(matches!(
        report.model,
        Err(RegressionError::InvalidOptions(OptionsError::InvalidRankTolerance(_)))
    ));
}

#[test]
fn test_summary_serializes_camel_case() {
    let report = run_analysis(
        &common::generate_seasonal_records(400, 12),
        &AnalysisOptions::default(),
    );
    let summary = report.model.unwrap().summary();

    let json = serde_json::to_value(&summary).unwrap();
    assert!(json.get("adjRSquared").is_some());
    assert!(json.get("residualDf").is_some());
    let first = &json["coefficients"][0];
    assert_eq!(first["name"], "(Intercept)");
    assert!(first.get("stdError").is_some());
    assert!(first.get("pValue").is_some());
}

#[test]
fn test_daily_series_serializes_for_charting() {
    let report = run_analysis(
        &common::records(&[(2020, 7, 4, "BRONX")]),
        &AnalysisOptions::default(),
    );

    let json = serde_json::to_value(&report.daily).unwrap();
    assert_eq!(json[0]["date"], "2020-07-04");
    assert_eq!(json[0]["count"], 1);
    assert_eq!(json[0]["month"], 7);
}
