//! Numeric range cleaner: repair or flag out-of-range values in one column.
//!
//! A value is valid iff it coerces to a float and lies in the inclusive
//! bounds. Missing values (including failed coercions) are never counted as
//! affected and never altered. Each call touches exactly one column.

use claimrisk_core::errors::CleaningError;
use claimrisk_core::types::{Bounds, CleaningPolicy, Table, Value};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How to clean one column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeRule {
    pub policy: CleaningPolicy,
    pub bounds: Bounds,
    /// Round the imputed value half-to-even before substitution.
    pub round_to_int: bool,
}

impl RangeRule {
    pub fn new(policy: CleaningPolicy, bounds: Bounds) -> Self {
        Self {
            policy,
            bounds,
            round_to_int: false,
        }
    }

    pub fn with_rounding(mut self, round_to_int: bool) -> Self {
        self.round_to_int = round_to_int;
        self
    }
}

/// Result of cleaning one column.
#[derive(Debug, Clone)]
pub struct CleanOutcome {
    /// The cleaned table. Always a new table; the input is never mutated.
    pub table: Table,
    /// Non-missing values that fell outside the bounds.
    pub affected_count: usize,
    /// The single value substituted for every invalid cell (impute only).
    pub imputed_value: Option<f64>,
    /// Keep mask over the input rows when rows were dropped (exclude only).
    pub kept: Option<Vec<bool>>,
}

impl CleanOutcome {
    fn unchanged(table: &Table, affected_count: usize) -> Self {
        Self {
            table: table.clone(),
            affected_count,
            imputed_value: None,
            kept: None,
        }
    }
}

/// Clean `column` of `table` under `rule`.
///
/// Bounds are validated first; an inverted or NaN range is rejected before
/// anything runs. An absent column, or a column with nothing out of range,
/// returns an unchanged copy with no imputed value whatever the policy.
pub fn clean(table: &Table, column: &str, rule: &RangeRule) -> Result<CleanOutcome, CleaningError> {
    rule.bounds.validate(column)?;

    let Some(values) = table.numeric_column(column) else {
        return Ok(CleanOutcome::unchanged(table, 0));
    };

    let invalid: Vec<usize> = values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| match v {
            Some(x) if !rule.bounds.contains(*x) => Some(i),
            _ => None,
        })
        .collect();
    let affected_count = invalid.len();

    if affected_count == 0 {
        return Ok(CleanOutcome::unchanged(table, 0));
    }

    let outcome = match rule.policy {
        CleaningPolicy::Leave => CleanOutcome::unchanged(table, affected_count),
        CleaningPolicy::Exclude => {
            let keep: Vec<bool> = values
                .iter()
                .map(|v| v.map_or(true, |x| rule.bounds.contains(x)))
                .collect();
            CleanOutcome {
                table: table.retain_rows(&keep),
                affected_count,
                imputed_value: None,
                kept: Some(keep),
            }
        }
        CleaningPolicy::ImputeMean => {
            let imputed = imputed_value(&values, rule);
            CleanOutcome {
                table: table.with_cells_replaced(column, &invalid, Value::Number(imputed)),
                affected_count,
                imputed_value: Some(imputed),
                kept: None,
            }
        }
    };

    debug!(
        column,
        policy = %rule.policy,
        affected = affected_count,
        imputed = ?outcome.imputed_value,
        rows_before = table.len(),
        rows_after = outcome.table.len(),
        "range-cleaned column"
    );

    Ok(outcome)
}

/// Mean of the valid values; falls back to the bounds midpoint, then 0.
/// Always lies inside the bounds, even after rounding.
fn imputed_value(values: &[Option<f64>], rule: &RangeRule) -> f64 {
    let valid: Vec<f64> = values
        .iter()
        .flatten()
        .copied()
        .filter(|x| rule.bounds.contains(*x))
        .collect();

    let value = if valid.is_empty() {
        rule.bounds.midpoint().unwrap_or(0.0)
    } else {
        valid.iter().sum::<f64>() / valid.len() as f64
    };

    let value = if rule.round_to_int {
        value.round_ties_even()
    } else {
        value
    };
    // Rounding can step past a fractional bound; the substitute must itself
    // be valid, so it is pulled back to the nearest bound.
    rule.bounds.clamp(value)
}

/// Rows whose value in `column` is out of range or missing.
///
/// Computed on the raw table, before cleaning, for audit highlighting.
/// An absent column yields an all-false mask.
pub fn issue_mask(table: &Table, column: &str, bounds: &Bounds) -> Vec<bool> {
    match table.numeric_column(column) {
        Some(values) => values
            .iter()
            .map(|v| v.map_or(true, |x| !bounds.contains(x)))
            .collect(),
        None => vec![false; table.len()],
    }
}
