//! End-to-end tests for the risk engine.

use claimrisk_analysis::quality::{clean, RangeRule};
use claimrisk_analysis::scoring::{aggregate, AggregatorSettings};
use claimrisk_analysis::RiskEngine;
use claimrisk_core::config::{ColumnRuleConfig, RiskConfig};
use claimrisk_core::constants::SCORED_COLUMNS;
use claimrisk_core::errors::{PipelineError, RiskErrorCode};
use claimrisk_core::types::{Bounds, CleaningPolicy, DuplicateAction, Table, Value};
use statrs::distribution::{ContinuousCDF, Normal};

/// 30 log-normal claim amounts at evenly spaced quantiles, with rows 20
/// and 24 inflated six-fold.
fn claims_with_two_outliers() -> Table {
    let normal = Normal::new(8.5, 0.6).unwrap();
    let rows = (0..30)
        .map(|i| {
            let mut amount = normal.inverse_cdf((i as f64 + 0.5) / 30.0).exp();
            if i == 20 || i == 24 {
                amount *= 6.0;
            }
            vec![
                Value::from(format!("C{i:03}")),
                Value::from("Auto"),
                Value::from(amount),
            ]
        })
        .collect();
    Table::from_rows(["claim_id", "policy_type", "claim_amount"], rows).unwrap()
}

fn flagged_ids(table: &Table) -> Vec<String> {
    table
        .column("claim_id")
        .unwrap()
        .into_iter()
        .map(|v| v.to_string())
        .collect()
}

#[test]
fn test_inflated_claims_are_flagged() {
    let engine = RiskEngine::new(RiskConfig::default()).unwrap();
    let report = engine.run(&claims_with_two_outliers()).unwrap();

    let flagged = flagged_ids(&report.scored.flagged_rows());
    assert!(flagged.contains(&"C020".to_string()));
    assert!(flagged.contains(&"C024".to_string()));

    let mut top_two = report.scored.ranked()[..2].to_vec();
    top_two.sort_unstable();
    assert_eq!(top_two, vec![20, 24]);
    assert_eq!(report.kpis.num_claims, 30);
}

#[test]
fn test_unreachable_thresholds_flag_nothing() {
    let settings = AggregatorSettings {
        z_threshold: f64::INFINITY,
        score_threshold: 1.1,
        ..AggregatorSettings::default()
    };
    let scored = aggregate(&claims_with_two_outliers(), &settings).unwrap();
    assert_eq!(scored.flagged_count(), 0);
    assert!(scored.flagged_rows().is_empty());
}

#[test]
fn test_scoring_is_repeatable() {
    let table = claims_with_two_outliers();
    let settings = AggregatorSettings::default();
    let a = aggregate(&table, &settings).unwrap();
    let b = aggregate(&table, &settings).unwrap();
    assert_eq!(a.assessments, b.assessments);
}

#[test]
fn test_out_of_range_age_imputed_to_mean() {
    let table = Table::from_rows(
        ["claim_id", "age"],
        vec![
            vec!["A".into(), 30.0.into()],
            vec!["B".into(), 150.0.into()],
            vec!["C".into(), 41.0.into()],
            vec!["D".into(), Value::Missing],
        ],
    )
    .unwrap();
    let rule = RangeRule::new(CleaningPolicy::ImputeMean, Bounds::new(18.0, 90.0));

    let exact = clean(&table, "age", &rule).unwrap();
    assert_eq!(exact.affected_count, 1);
    assert_eq!(exact.imputed_value, Some(35.5));
    assert_eq!(exact.table.cell(1, "age"), Some(&Value::Number(35.5)));
    assert_eq!(exact.table.cell(3, "age"), Some(&Value::Missing));

    // 35.5 rounds half to even.
    let rounded = clean(&table, "age", &rule.with_rounding(true)).unwrap();
    assert_eq!(rounded.imputed_value, Some(36.0));
    assert_eq!(rounded.table.cell(1, "age"), Some(&Value::Number(36.0)));
}

#[test]
fn test_engine_cleans_before_scoring() {
    let mut config = RiskConfig::default();
    config.duplicates.action = Some(DuplicateAction::Ignore);
    let engine = RiskEngine::new(config).unwrap();

    let table = Table::from_rows(
        ["Customer ID", "Age", "Salary", "Claim Amount", "State"],
        vec![
            vec!["1".into(), 35.0.into(), 52_000.0.into(), 1200.0.into(), "NY".into()],
            vec!["2".into(), 12.0.into(), 61_000.0.into(), 900.0.into(), "NY".into()],
            vec!["3".into(), 47.0.into(), 9_000.0.into(), 1500.0.into(), "CA".into()],
            vec!["4".into(), 52.0.into(), 75_000.0.into(), 1100.0.into(), "CA".into()],
        ],
    )
    .unwrap();

    let report = engine.run(&table).unwrap();
    // Default policy excludes the minor and the sub-floor income.
    assert_eq!(report.quality.original_rows, 4);
    assert_eq!(report.quality.final_rows, 2);
    assert_eq!(report.scored.len(), 2);
    assert_eq!(report.kpis.total_claims_amount, Some(2300.0));

    let columns = report.scored.table.columns();
    assert_eq!(
        &columns[..5],
        &["claim_id", "age", "annual_income", "claim_amount", "state"]
    );
    assert_eq!(
        &columns[5..],
        &SCORED_COLUMNS
    );
    assert!(report.quality_summary.contains_key("annual_income"));
}

#[test]
fn test_imputed_incomes_in_messages() {
    let mut config = RiskConfig::default();
    config.cleaning.income = ColumnRuleConfig {
        policy: Some(CleaningPolicy::ImputeMean),
        ..ColumnRuleConfig::default()
    };
    let engine = RiskEngine::new(config).unwrap();
    let table = Table::from_rows(
        ["annual_income", "claim_amount"],
        vec![
            vec![40_000.0.into(), 100.0.into()],
            vec![2_000_000.0.into(), 200.0.into()],
            vec![60_000.0.into(), 300.0.into()],
        ],
    )
    .unwrap();

    let report = engine.run(&table).unwrap();
    assert_eq!(report.quality.final_rows, 3);
    let messages = report.quality.messages();
    assert_eq!(
        messages,
        vec!["Income: 1 out-of-range value(s) imputed to mean = 50000".to_string()]
    );
}

#[test]
fn test_scored_rows_serialize_with_output_columns() {
    let engine = RiskEngine::new(RiskConfig::default()).unwrap();
    let report = engine.run(&claims_with_two_outliers()).unwrap();
    let json = serde_json::to_value(&report.scored.table).unwrap();
    let columns: Vec<&str> = json["columns"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|c| c.as_str())
        .collect();
    assert_eq!(
        columns[3..],
        SCORED_COLUMNS
    );
    assert_eq!(json["rows"][24][7], serde_json::json!(true));
}

#[test]
fn test_inverted_bounds_rejected_before_running() {
    let mut config = RiskConfig::default();
    config.cleaning.age.min = Some(90.0);
    config.cleaning.age.max = Some(18.0);
    let err = RiskEngine::new(config).unwrap_err();
    assert!(matches!(err, PipelineError::Config(_)));
    assert_eq!(err.error_code(), "CONFIG_ERROR");
}
