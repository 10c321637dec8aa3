//! Configuration system for claimrisk.
//! TOML-based, layered resolution: CLI > env > project file > defaults.
//! The resolved config is passed explicitly into every engine call.

pub mod cleaning_config;
pub mod duplicate_config;
pub mod risk_config;
pub mod scoring_config;

pub use cleaning_config::{CleaningConfig, ColumnRuleConfig};
pub use duplicate_config::DuplicateConfig;
pub use risk_config::{CliOverrides, RiskConfig};
pub use scoring_config::ScoringConfig;
