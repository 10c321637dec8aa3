//! Engine-level errors.

use super::error_code::RiskErrorCode;
use super::{CleaningError, ConfigError, ScoringError, TableError};

/// Errors that can occur during an engine run.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Table error: {0}")]
    Table(#[from] TableError),

    #[error("Cleaning error: {0}")]
    Cleaning(#[from] CleaningError),

    #[error("Scoring error: {0}")]
    Scoring(#[from] ScoringError),
}

impl RiskErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Table(e) => e.error_code(),
            Self::Cleaning(e) => e.error_code(),
            Self::Scoring(e) => e.error_code(),
        }
    }
}
