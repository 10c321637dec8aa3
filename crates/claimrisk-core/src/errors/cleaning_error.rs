//! Cleaning policy errors.

use super::error_code::{self, RiskErrorCode};

/// Configuration-level violations detected before any cleaning runs.
/// Per-cell problems (unparseable text, missing values) are never errors.
#[derive(Debug, thiserror::Error)]
pub enum CleaningError {
    #[error("Invalid bounds for {column}: min {min} must be below max {max}")]
    InvalidBounds { column: String, min: f64, max: f64 },

    #[error("Bound for {column} is not a number")]
    NanBound { column: String },

    #[error("Unknown cleaning policy: {0}")]
    UnknownPolicy(String),

    #[error("Unknown duplicate action: {0}")]
    UnknownDuplicateAction(String),

    #[error("Duplicate detector needs min_occurrences >= 1")]
    InvalidMinOccurrences,
}

impl RiskErrorCode for CleaningError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidBounds { .. } | Self::NanBound { .. } => error_code::INVALID_BOUNDS,
            Self::UnknownPolicy(_) | Self::UnknownDuplicateAction(_) => error_code::UNKNOWN_POLICY,
            Self::InvalidMinOccurrences => error_code::CONFIG_ERROR,
        }
    }
}
