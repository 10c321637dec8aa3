use claimrisk_analysis::quality::{clean, RangeRule};
use claimrisk_analysis::scoring::{aggregate, AggregatorSettings, ForestParams};
use claimrisk_core::constants::REASON_NONE;
use claimrisk_core::types::{Bounds, CleaningPolicy, Table, Value};
use proptest::prelude::*;

const LO: f64 = 18.0;
const HI: f64 = 90.0;

fn ages_table(ages: &[Option<f64>]) -> Table {
    let rows = ages
        .iter()
        .enumerate()
        .map(|(i, age)| vec![Value::from(i as i64), Value::from(*age)])
        .collect();
    Table::from_rows(["claim_id", "age"], rows).unwrap()
}

fn rule(policy: CleaningPolicy) -> RangeRule {
    RangeRule::new(policy, Bounds::new(LO, HI)).with_rounding(true)
}

/// Bounds with fractional ends, often too narrow to hold an integer.
fn fractional_bounds() -> impl Strategy<Value = Bounds> {
    (0.0f64..100.0, 0.05f64..40.0).prop_map(|(lo, width)| Bounds::new(lo, lo + width))
}

fn ages() -> impl Strategy<Value = Vec<Option<f64>>> {
    prop::collection::vec(prop::option::of(-50.0f64..200.0), 0..40)
}

fn in_range(x: f64) -> bool {
    (LO..=HI).contains(&x)
}

proptest! {
    #[test]
    fn exclude_keeps_only_valid_and_missing(ages in ages()) {
        let table = ages_table(&ages);
        let out = clean(&table, "age", &rule(CleaningPolicy::Exclude)).unwrap();

        let invalid = ages.iter().flatten().filter(|x| !in_range(**x)).count();
        prop_assert_eq!(out.affected_count, invalid);
        prop_assert_eq!(out.table.len(), table.len() - invalid);

        let cleaned = out.table.numeric_column("age").unwrap();
        prop_assert!(cleaned.iter().flatten().all(|x| in_range(*x)));
        let missing_before = ages.iter().filter(|a| a.is_none()).count();
        prop_assert_eq!(cleaned.iter().filter(|a| a.is_none()).count(), missing_before);
    }

    #[test]
    fn impute_replaces_invalid_with_single_value(ages in ages()) {
        let table = ages_table(&ages);
        let out = clean(&table, "age", &rule(CleaningPolicy::ImputeMean)).unwrap();
        prop_assert_eq!(out.table.len(), table.len());

        let cleaned = out.table.numeric_column("age").unwrap();
        for (before, after) in ages.iter().zip(&cleaned) {
            match before {
                Some(x) if !in_range(*x) => prop_assert_eq!(*after, out.imputed_value),
                _ => prop_assert_eq!(after, before),
            }
        }
    }

    #[test]
    fn leave_is_identity(ages in ages()) {
        let table = ages_table(&ages);
        let out = clean(&table, "age", &rule(CleaningPolicy::Leave)).unwrap();
        prop_assert_eq!(&out.table, &table);
        prop_assert_eq!(out.imputed_value, None);
    }

    #[test]
    fn cleaning_is_idempotent(ages in ages()) {
        let table = ages_table(&ages);
        for policy in [CleaningPolicy::Exclude, CleaningPolicy::ImputeMean] {
            let once = clean(&table, "age", &rule(policy)).unwrap();
            let twice = clean(&once.table, "age", &rule(policy)).unwrap();
            prop_assert_eq!(twice.affected_count, 0);
            prop_assert_eq!(&twice.table, &once.table);
        }
    }

    #[test]
    fn rounded_impute_respects_fractional_bounds(ages in ages(), bounds in fractional_bounds()) {
        let table = ages_table(&ages);
        let rule = RangeRule::new(CleaningPolicy::ImputeMean, bounds).with_rounding(true);
        let once = clean(&table, "age", &rule).unwrap();
        if let Some(imputed) = once.imputed_value {
            prop_assert!(bounds.contains(imputed));
        }
        let twice = clean(&once.table, "age", &rule).unwrap();
        prop_assert_eq!(twice.affected_count, 0);
        prop_assert_eq!(&twice.table, &once.table);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn flag_matches_thresholds(
        rows in prop::collection::vec((0usize..3, 100.0f64..5000.0), 2..30),
        z_threshold in 0.0f64..4.0,
        score_threshold in 0.0f64..1.2,
    ) {
        let categories = ["Auto", "Home", "Life"];
        let table = Table::from_rows(
            ["claim_type", "claim_amount"],
            rows.iter()
                .map(|(c, amount)| vec![Value::from(categories[*c]), Value::from(*amount)])
                .collect(),
        )
        .unwrap();
        let settings = AggregatorSettings {
            z_threshold,
            score_threshold,
            forest: ForestParams { n_estimators: 20, ..ForestParams::default() },
            ..AggregatorSettings::default()
        };

        let scored = aggregate(&table, &settings).unwrap();
        for a in &scored.assessments {
            let expected = a.outlier_score >= score_threshold || a.deviation >= z_threshold;
            prop_assert_eq!(a.flagged, expected);
            prop_assert_eq!(a.reason_code == REASON_NONE, !a.flagged);
            prop_assert!((0.0..=1.0).contains(&a.outlier_score));
        }
    }
}
