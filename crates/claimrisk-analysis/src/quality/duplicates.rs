//! Suspicious duplicate-value detection.
//!
//! A value that recurs at least `min_occurrences` times is a duplicate
//! candidate, and every row holding a candidate is flagged.
//!
//! Precision is measured and reported through [`DuplicateFinding`] but does
//! not change the mask: frequent values are flagged whether or not they
//! carry `precision_threshold` decimal places. This is inherited behaviour
//! and ambiguous. It may be meant to flag common round values (salary tiers)
//! on purpose, or the precision test may have been meant to suppress them.
//! Callers that only want high-precision repeats can filter the findings.

use claimrisk_core::constants::DECIMAL_RENDER_DIGITS;
use claimrisk_core::types::Table;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

/// One frequently repeated value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicateFinding {
    pub value: f64,
    pub occurrences: usize,
    /// Digits after the decimal point, trailing zeros stripped.
    pub decimal_places: usize,
    /// Whether `decimal_places` reached the precision threshold.
    pub high_precision: bool,
}

/// Boolean mask over rows, `true` where the value is a suspicious duplicate.
///
/// Same length and order as the table. Missing or unparseable cells are
/// never flagged; an absent column yields an all-false mask.
pub fn detect(
    table: &Table,
    column: &str,
    min_occurrences: usize,
    precision_threshold: usize,
) -> Vec<bool> {
    let Some(values) = table.numeric_column(column) else {
        return vec![false; table.len()];
    };

    let findings = find_in(&values, min_occurrences, precision_threshold);
    if findings.is_empty() {
        return vec![false; values.len()];
    }

    let flagged: FxHashSet<u64> = findings.iter().map(|f| value_key(f.value)).collect();
    values
        .iter()
        .map(|v| v.is_some_and(|x| flagged.contains(&value_key(x))))
        .collect()
}

/// Every value recurring at least `min_occurrences` times, most frequent
/// first (ties by ascending value).
pub fn find(
    table: &Table,
    column: &str,
    min_occurrences: usize,
    precision_threshold: usize,
) -> Vec<DuplicateFinding> {
    table
        .numeric_column(column)
        .map(|values| find_in(&values, min_occurrences, precision_threshold))
        .unwrap_or_default()
}

fn find_in(
    values: &[Option<f64>],
    min_occurrences: usize,
    precision_threshold: usize,
) -> Vec<DuplicateFinding> {
    let mut counts: FxHashMap<u64, (f64, usize)> = FxHashMap::default();
    for x in values.iter().flatten() {
        counts.entry(value_key(*x)).or_insert((*x, 0)).1 += 1;
    }

    let mut findings: Vec<DuplicateFinding> = counts
        .into_values()
        .filter(|(_, n)| *n >= min_occurrences)
        .map(|(value, occurrences)| {
            let decimal_places = decimal_places(value);
            DuplicateFinding {
                value,
                occurrences,
                decimal_places,
                high_precision: decimal_places >= precision_threshold,
            }
        })
        .collect();

    findings.sort_by(|a, b| {
        b.occurrences
            .cmp(&a.occurrences)
            .then(a.value.total_cmp(&b.value))
    });
    findings
}

/// Digits after the decimal point in a fixed-precision rendering with
/// trailing zeros stripped. `1234.5` → 1, `1000.0` → 0, `0.123456` → 6.
pub fn decimal_places(value: f64) -> usize {
    let rendered = format!("{:.*}", DECIMAL_RENDER_DIGITS, value);
    let trimmed = rendered.trim_end_matches('0');
    trimmed
        .split_once('.')
        .map_or(0, |(_, fraction)| fraction.len())
}

/// Hash key treating `-0.0` and `0.0` as the same value.
fn value_key(x: f64) -> u64 {
    if x == 0.0 {
        0.0_f64.to_bits()
    } else {
        x.to_bits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimrisk_core::types::Value;

    fn incomes(values: Vec<Value>) -> Table {
        Table::from_rows(["annual_income"], values.into_iter().map(|v| vec![v]).collect()).unwrap()
    }

    #[test]
    fn test_decimal_places() {
        assert_eq!(decimal_places(1234.5), 1);
        assert_eq!(decimal_places(1000.0), 0);
        assert_eq!(decimal_places(52341.12345), 5);
        assert_eq!(decimal_places(-0.25), 2);
    }

    #[test]
    fn test_high_precision_repeats_flagged() {
        let mut values: Vec<Value> = vec![Value::Number(48213.12345); 3];
        values.push(Value::Number(50000.0));
        let t = incomes(values);
        assert_eq!(detect(&t, "annual_income", 3, 4), vec![true, true, true, false]);

        let findings = find(&t, "annual_income", 3, 4);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].occurrences, 3);
        assert!(findings[0].high_precision);
    }

    #[test]
    fn test_low_precision_repeats_still_flagged() {
        let t = incomes(vec![Value::Number(60000.5); 3]);
        assert_eq!(detect(&t, "annual_income", 3, 4), vec![true; 3]);
        assert!(!find(&t, "annual_income", 3, 4)[0].high_precision);
    }

    #[test]
    fn test_below_frequency_not_flagged() {
        let t = incomes(vec![Value::Number(1.23456); 2]);
        assert_eq!(detect(&t, "annual_income", 3, 4), vec![false, false]);
    }

    #[test]
    fn test_missing_and_text_rows_never_flagged() {
        let t = incomes(vec![
            Value::Missing,
            Value::Missing,
            Value::Missing,
            "n/a".into(),
            Value::Number(1.0),
        ]);
        assert_eq!(detect(&t, "annual_income", 2, 4), vec![false; 5]);
    }

    #[test]
    fn test_text_numbers_count_with_numbers() {
        let t = incomes(vec!["75000".into(), Value::Number(75000.0)]);
        assert_eq!(detect(&t, "annual_income", 2, 4), vec![true, true]);
    }

    #[test]
    fn test_absent_column() {
        let t = incomes(vec![Value::Number(1.0)]);
        assert_eq!(detect(&t, "salary", 1, 4), vec![false]);
        assert!(find(&t, "salary", 1, 4).is_empty());
    }
}
