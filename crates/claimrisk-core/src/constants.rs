//! Shared constants for the claimrisk engine.

// ---- Canonical column names ----

pub const CLAIM_ID: &str = "claim_id";
pub const CLAIM_AMOUNT: &str = "claim_amount";
pub const POLICY_PREMIUM: &str = "policy_premium";
pub const ANNUAL_INCOME: &str = "annual_income";
pub const SALARY: &str = "salary";
pub const AGE: &str = "age";
pub const TENURE_MONTHS: &str = "tenure_months";
pub const CLAIM_TYPE: &str = "claim_type";
pub const POLICY_TYPE: &str = "policy_type";
pub const STATE: &str = "state";
pub const REGION: &str = "region";

/// Numeric columns fed jointly into the isolation forest, in feature order.
pub const NUMERIC_FEATURE_COLUMNS: [&str; 5] =
    [CLAIM_AMOUNT, POLICY_PREMIUM, ANNUAL_INCOME, AGE, TENURE_MONTHS];

/// Category columns the deviation scorer pivots on, in evaluation order.
pub const DEVIATION_CATEGORY_COLUMNS: [&str; 4] = [CLAIM_TYPE, POLICY_TYPE, STATE, REGION];

/// Columns covered by the data-quality summary.
pub const QUALITY_SUMMARY_COLUMNS: [&str; 3] = [AGE, ANNUAL_INCOME, CLAIM_AMOUNT];

// ---- Scored output columns (order is part of the export contract) ----

pub const OUTLIER_SCORE: &str = "outlier_score";
pub const DEVIATION: &str = "deviation";
pub const RISK_SCORE: &str = "risk_score";
pub const REASON_CODE: &str = "reason_code";
pub const FLAGGED: &str = "flagged";

/// Derived columns appended by the risk aggregator, in output order.
pub const SCORED_COLUMNS: [&str; 5] = [OUTLIER_SCORE, DEVIATION, RISK_SCORE, REASON_CODE, FLAGGED];

// ---- Reason codes ----

pub const REASON_OUTLIER: &str = "IsolationForest outlier";
pub const REASON_CATEGORY_Z: &str = "Category z-score high";
pub const REASON_SEPARATOR: &str = ", ";
/// Reason code written when no detector triggered.
pub const REASON_NONE: &str = "—";

// ---- Cleaning defaults ----

pub const DEFAULT_AGE_MIN: f64 = 18.0;
pub const DEFAULT_AGE_MAX: f64 = 90.0;
pub const DEFAULT_INCOME_MIN: f64 = 10_000.0;
pub const DEFAULT_INCOME_MAX: f64 = 500_000.0;
pub const DEFAULT_ROUND_TO_INT: bool = true;

// ---- Duplicate detection defaults ----

pub const DEFAULT_MIN_OCCURRENCES: usize = 10;
pub const DEFAULT_PRECISION_THRESHOLD: usize = 4;
/// Fixed digits used when measuring a value's decimal precision.
pub const DECIMAL_RENDER_DIGITS: usize = 10;

// ---- Scoring defaults ----

pub const DEFAULT_Z_THRESHOLD: f64 = 2.5;
pub const DEFAULT_SCORE_THRESHOLD: f64 = 0.65;
pub const DEFAULT_IFOREST_WEIGHT: f64 = 0.6;
pub const DEFAULT_ZSCORE_WEIGHT: f64 = 0.4;

// ---- Isolation forest defaults ----

pub const DEFAULT_N_ESTIMATORS: usize = 200;
pub const DEFAULT_MAX_SAMPLES: usize = 256;
pub const DEFAULT_RANDOM_SEED: u64 = 42;
/// Decision offset used when contamination is left to the model.
pub const AUTO_CONTAMINATION_OFFSET: f64 = -0.5;
