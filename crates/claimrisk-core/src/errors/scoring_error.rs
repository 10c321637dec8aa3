//! Scoring parameter errors.

use super::error_code::{self, RiskErrorCode};
use super::TableError;

/// Errors raised when aggregator or forest settings are unusable.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("Weight {name} must be finite and non-negative, got {value}")]
    InvalidWeight { name: &'static str, value: f64 },

    #[error("Threshold {name} must not be NaN")]
    InvalidThreshold { name: &'static str },

    #[error("Isolation forest parameters invalid: {0}")]
    InvalidForestParams(String),

    #[error("Could not attach score columns: {0}")]
    Output(#[from] TableError),
}

impl RiskErrorCode for ScoringError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidWeight { .. } => error_code::INVALID_WEIGHT,
            Self::InvalidThreshold { .. } => error_code::INVALID_THRESHOLD,
            Self::InvalidForestParams(_) => error_code::INVALID_FOREST_PARAMS,
            Self::Output(e) => e.error_code(),
        }
    }
}
