//! Batch outlier scoring: fit one isolation forest over the numeric
//! features of a table and rescale its decisions to `[0, 1]`.

use claimrisk_core::constants::NUMERIC_FEATURE_COLUMNS;
use claimrisk_core::errors::ScoringError;
use claimrisk_core::types::Table;
use tracing::debug;

use super::isolation_forest::{ForestParams, IsolationForest};

/// Numeric feature rows for the forest, one per table row.
///
/// Columns are the present members of the numeric feature set, in their
/// canonical order. Missing or unparseable cells become 0.0.
pub fn feature_matrix(table: &Table) -> Vec<Vec<f64>> {
    let columns: Vec<Vec<Option<f64>>> = NUMERIC_FEATURE_COLUMNS
        .iter()
        .filter_map(|c| table.numeric_column(c))
        .collect();

    (0..table.len())
        .map(|row| columns.iter().map(|col| col[row].unwrap_or(0.0)).collect())
        .collect()
}

/// Per-row outlier score in `[0, 1]`, 1 being the most anomalous row of
/// this batch.
///
/// Scores are relative to the batch they were computed on. With no feature
/// column, fewer than two rows, or a batch where every decision is equal,
/// every score is 0.
pub fn outlier_scores(table: &Table, params: &ForestParams) -> Result<Vec<f64>, ScoringError> {
    params.validate()?;

    let features = feature_matrix(table);
    let width = features.first().map_or(0, Vec::len);
    if features.len() < 2 || width == 0 {
        return Ok(vec![0.0; table.len()]);
    }

    let forest = IsolationForest::fit(&features, params)?;
    let decision = forest.decision_function(&features);

    let (lo, hi) = decision
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &d| {
            (lo.min(d), hi.max(d))
        });
    debug!(
        rows = features.len(),
        features = width,
        trees = forest.n_trees(),
        min_decision = lo,
        max_decision = hi,
        "isolation forest fitted"
    );

    if hi == lo {
        return Ok(vec![0.0; decision.len()]);
    }
    Ok(decision.iter().map(|d| (hi - d) / (hi - lo)).collect())
}
