//! Risk aggregation: blend the outlier score and the category deviation
//! into one ranking score, and flag records that cross either threshold.

use claimrisk_core::config::RiskConfig;
use claimrisk_core::constants::{
    CLAIM_AMOUNT, DEFAULT_IFOREST_WEIGHT, DEFAULT_SCORE_THRESHOLD, DEFAULT_Z_THRESHOLD,
    DEFAULT_ZSCORE_WEIGHT, DEVIATION, FLAGGED, OUTLIER_SCORE, REASON_CATEGORY_Z, REASON_CODE,
    REASON_NONE, REASON_OUTLIER, REASON_SEPARATOR, RISK_SCORE, SCORED_COLUMNS,
};
use claimrisk_core::errors::ScoringError;
use claimrisk_core::types::{Table, Value};
use serde::Serialize;
use tracing::info;

use super::deviation::combined_deviation;
use super::isolation_forest::ForestParams;
use super::outlier::outlier_scores;

/// Thresholds, blend weights and forest parameters for one scoring run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AggregatorSettings {
    /// Raw deviation at or above which a record is flagged.
    pub z_threshold: f64,
    /// Outlier score at or above which a record is flagged.
    pub score_threshold: f64,
    pub iforest_weight: f64,
    pub zscore_weight: f64,
    pub forest: ForestParams,
}

impl Default for AggregatorSettings {
    fn default() -> Self {
        Self {
            z_threshold: DEFAULT_Z_THRESHOLD,
            score_threshold: DEFAULT_SCORE_THRESHOLD,
            iforest_weight: DEFAULT_IFOREST_WEIGHT,
            zscore_weight: DEFAULT_ZSCORE_WEIGHT,
            forest: ForestParams::default(),
        }
    }
}

impl AggregatorSettings {
    pub fn from_config(config: &RiskConfig) -> Self {
        let scoring = &config.scoring;
        Self {
            z_threshold: scoring.effective_z_threshold(),
            score_threshold: scoring.effective_score_threshold(),
            iforest_weight: scoring.effective_iforest_weight(),
            zscore_weight: scoring.effective_zscore_weight(),
            forest: ForestParams {
                n_estimators: scoring.effective_n_estimators(),
                max_samples: scoring.effective_max_samples(),
                seed: scoring.effective_random_seed(),
            },
        }
    }

    /// Weights must be finite and non-negative; thresholds may be infinite
    /// (never flag) but not NaN. The weights need not sum to 1.
    pub fn validate(&self) -> Result<(), ScoringError> {
        for (name, value) in [
            ("iforest_weight", self.iforest_weight),
            ("zscore_weight", self.zscore_weight),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ScoringError::InvalidWeight { name, value });
            }
        }
        for (name, value) in [
            ("z_threshold", self.z_threshold),
            ("score_threshold", self.score_threshold),
        ] {
            if value.is_nan() {
                return Err(ScoringError::InvalidThreshold { name });
            }
        }
        self.forest.validate()
    }
}

/// Scoring result for one record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    /// Batch-relative isolation forest score in `[0, 1]`.
    pub outlier_score: f64,
    /// Mean absolute category z-score; NaN when no group applied.
    pub deviation: f64,
    /// Deviation scaled by the batch maximum (floor 1); NaN counts as 0.
    pub normalized_deviation: f64,
    pub risk_score: f64,
    pub reason_code: String,
    pub flagged: bool,
}

/// The scored batch: the input columns plus the derived score columns,
/// and the per-row assessments in the same order.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredTable {
    pub table: Table,
    pub assessments: Vec<RiskAssessment>,
}

impl ScoredTable {
    pub fn len(&self) -> usize {
        self.assessments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assessments.is_empty()
    }

    /// New table of the flagged rows only, in input order.
    pub fn flagged_rows(&self) -> Table {
        let mask: Vec<bool> = self.assessments.iter().map(|a| a.flagged).collect();
        self.table.retain_rows(&mask)
    }

    pub fn flagged_count(&self) -> usize {
        self.assessments.iter().filter(|a| a.flagged).count()
    }

    /// Row indices ordered by descending risk score; ties keep input order.
    pub fn ranked(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.assessments.len()).collect();
        order.sort_by(|&a, &b| {
            self.assessments[b]
                .risk_score
                .total_cmp(&self.assessments[a].risk_score)
        });
        order
    }
}

/// Score every record of `table`.
///
/// Fits one forest and computes one set of category statistics over the
/// whole batch, so every score is relative to this batch. The same input and
/// settings always give the same output.
pub fn aggregate(table: &Table, settings: &AggregatorSettings) -> Result<ScoredTable, ScoringError> {
    settings.validate()?;

    let outliers = outlier_scores(table, &settings.forest)?;
    let deviations = combined_deviation(table, CLAIM_AMOUNT);

    let batch_max = deviations
        .iter()
        .copied()
        .filter(|d| !d.is_nan())
        .fold(f64::NEG_INFINITY, f64::max);
    let denominator = batch_max.max(1.0);

    let assessments: Vec<RiskAssessment> = outliers
        .iter()
        .zip(&deviations)
        .map(|(&outlier_score, &deviation)| {
            let normalized_deviation = if deviation.is_nan() {
                0.0
            } else {
                deviation / denominator
            };
            let risk_score =
                settings.iforest_weight * outlier_score + settings.zscore_weight * normalized_deviation;

            let by_outlier = outlier_score >= settings.score_threshold;
            let by_category = deviation >= settings.z_threshold;
            let reason_code = reason_code(by_outlier, by_category);

            RiskAssessment {
                outlier_score,
                deviation,
                normalized_deviation,
                risk_score,
                reason_code,
                flagged: by_outlier || by_category,
            }
        })
        .collect();

    let flagged = assessments.iter().filter(|a| a.flagged).count();
    info!(
        rows = table.len(),
        flagged,
        z_threshold = settings.z_threshold,
        score_threshold = settings.score_threshold,
        "risk scoring complete"
    );

    let scored = attach_columns(table, &assessments)?;
    Ok(ScoredTable {
        table: scored,
        assessments,
    })
}

fn reason_code(by_outlier: bool, by_category: bool) -> String {
    let reasons: Vec<&str> = [(by_outlier, REASON_OUTLIER), (by_category, REASON_CATEGORY_Z)]
        .into_iter()
        .filter_map(|(hit, reason)| hit.then_some(reason))
        .collect();
    if reasons.is_empty() {
        REASON_NONE.to_string()
    } else {
        reasons.join(REASON_SEPARATOR)
    }
}

/// Append the derived columns in `SCORED_COLUMNS` order.
fn attach_columns(table: &Table, assessments: &[RiskAssessment]) -> Result<Table, ScoringError> {
    let mut out = table.clone();
    for column in SCORED_COLUMNS {
        let values = assessments.iter().map(|a| scored_cell(column, a)).collect();
        out = out.with_column(column, values)?;
    }
    Ok(out)
}

fn scored_cell(column: &str, a: &RiskAssessment) -> Value {
    match column {
        OUTLIER_SCORE => Value::Number(a.outlier_score),
        DEVIATION if a.deviation.is_nan() => Value::Missing,
        DEVIATION => Value::Number(a.deviation),
        RISK_SCORE => Value::Number(a.risk_score),
        REASON_CODE => Value::Text(a.reason_code.clone()),
        FLAGGED => Value::Bool(a.flagged),
        _ => Value::Missing,
    }
}
