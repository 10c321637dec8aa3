//! Category deviation: how far a record's amount sits from its peer group.
//!
//! Peer groups are the distinct values of a category column. Within each
//! group the amount is standardized with the population standard deviation.

use claimrisk_core::constants::DEVIATION_CATEGORY_COLUMNS;
use claimrisk_core::types::{CategoryKey, Table};
use rustc_hash::FxHashMap;
use statrs::statistics::Statistics;

/// Per-row population z-score of `amount_column` within its
/// `category_column` group.
///
/// NaN where the inputs are absent: either column missing from the table,
/// a missing category, or a missing amount. Degenerate groups (one member,
/// zero or undefined spread) give exactly 0 to every member with an amount.
pub fn category_zscores(table: &Table, category_column: &str, amount_column: &str) -> Vec<f64> {
    let (Some(categories), Some(amounts)) = (
        table.column(category_column),
        table.numeric_column(amount_column),
    ) else {
        return vec![f64::NAN; table.len()];
    };

    let keys: Vec<Option<CategoryKey>> = categories.iter().map(|v| v.category_key()).collect();

    let mut groups: FxHashMap<&CategoryKey, Vec<f64>> = FxHashMap::default();
    for (key, amount) in keys.iter().zip(&amounts) {
        if let (Some(key), Some(amount)) = (key, amount) {
            groups.entry(key).or_default().push(*amount);
        }
    }

    let stats: FxHashMap<&CategoryKey, (f64, f64)> = groups
        .into_iter()
        .map(|(key, values)| {
            let mean = values.iter().mean();
            let std = values.iter().population_std_dev();
            (key, (mean, std))
        })
        .collect();

    keys.iter()
        .zip(&amounts)
        .map(|(key, amount)| match (key, amount) {
            (Some(key), Some(x)) => match stats.get(key) {
                Some(&(mean, std)) if std > 0.0 && std.is_finite() => (x - mean) / std,
                Some(_) => 0.0,
                None => f64::NAN,
            },
            _ => f64::NAN,
        })
        .collect()
}

/// Mean absolute category z-score across the present pivot columns.
///
/// Each of `claim_type`, `policy_type`, `state`, `region` present in the
/// table contributes `|z|`; a row averages whichever contributions are not
/// NaN, and is NaN if none are. With no pivot column present every row is 0.
pub fn combined_deviation(table: &Table, amount_column: &str) -> Vec<f64> {
    let components: Vec<Vec<f64>> = DEVIATION_CATEGORY_COLUMNS
        .iter()
        .filter(|c| table.has_column(c))
        .map(|c| category_zscores(table, c, amount_column))
        .collect();

    if components.is_empty() {
        return vec![0.0; table.len()];
    }

    (0..table.len())
        .map(|row| {
            let present: Vec<f64> = components
                .iter()
                .map(|z| z[row].abs())
                .filter(|z| !z.is_nan())
                .collect();
            if present.is_empty() {
                f64::NAN
            } else {
                present.iter().sum::<f64>() / present.len() as f64
            }
        })
        .collect()
}
