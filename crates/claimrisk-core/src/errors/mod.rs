//! Error handling for claimrisk.
//! One error enum per subsystem, `thiserror` only.

pub mod cleaning_error;
pub mod config_error;
pub mod error_code;
pub mod pipeline_error;
pub mod scoring_error;
pub mod table_error;

pub use cleaning_error::CleaningError;
pub use config_error::ConfigError;
pub use error_code::RiskErrorCode;
pub use pipeline_error::PipelineError;
pub use scoring_error::ScoringError;
pub use table_error::TableError;
