//! Per-column data-quality summary for audit reporting.

use std::collections::BTreeMap;

use claimrisk_core::constants::QUALITY_SUMMARY_COLUMNS;
use claimrisk_core::types::Table;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnQuality {
    /// Cells that are missing or fail numeric coercion.
    pub missing_count: usize,
    /// `missing_count` as a percentage of rows; 0 for an empty table.
    pub missing_pct: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
}

/// Quality metrics for the key numeric columns that are present.
pub fn quality_summary(table: &Table) -> BTreeMap<String, ColumnQuality> {
    QUALITY_SUMMARY_COLUMNS
        .iter()
        .filter_map(|&column| {
            let values = table.numeric_column(column)?;
            Some((column.to_string(), column_quality(&values)))
        })
        .collect()
}

fn column_quality(values: &[Option<f64>]) -> ColumnQuality {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    let missing_count = values.len() - present.len();
    let missing_pct = if values.is_empty() {
        0.0
    } else {
        missing_count as f64 / values.len() as f64 * 100.0
    };

    let (min, max, mean) = if present.is_empty() {
        (None, None, None)
    } else {
        let min = present.iter().copied().fold(f64::INFINITY, f64::min);
        let max = present.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = present.iter().sum::<f64>() / present.len() as f64;
        (Some(min), Some(max), Some(mean))
    };

    ColumnQuality {
        missing_count,
        missing_pct,
        min,
        max,
        mean,
    }
}
