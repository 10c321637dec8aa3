//! Top-level claimrisk configuration with layered resolution.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{CleaningConfig, DuplicateConfig, ScoringConfig};
use crate::errors::ConfigError;
use crate::types::{CleaningPolicy, DuplicateAction};

/// Project config file name looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "claimrisk.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`CLAIMRISK_*`)
/// 3. Project config (`claimrisk.toml` in project root)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RiskConfig {
    pub cleaning: CleaningConfig,
    pub duplicates: DuplicateConfig,
    pub scoring: ScoringConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub z_threshold: Option<f64>,
    pub score_threshold: Option<f64>,
    pub age_policy: Option<CleaningPolicy>,
    pub income_policy: Option<CleaningPolicy>,
    pub duplicate_action: Option<DuplicateAction>,
    pub min_occurrences: Option<usize>,
}

impl RiskConfig {
    /// Load configuration with layered resolution, then validate it.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config)?;

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    ///
    /// Catches contract violations before any cleaning or scoring runs:
    /// inverted bounds, NaN thresholds, negative weights, and empty forests.
    pub fn validate(config: &RiskConfig) -> Result<(), ConfigError> {
        for (field, bounds) in [
            ("cleaning.age", config.cleaning.effective_age_bounds()),
            ("cleaning.income", config.cleaning.effective_income_bounds()),
        ] {
            bounds
                .validate(field)
                .map_err(|e| ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: e.to_string(),
                })?;
        }

        for (field, value) in [
            ("scoring.z_threshold", config.scoring.effective_z_threshold()),
            ("scoring.score_threshold", config.scoring.effective_score_threshold()),
        ] {
            if value.is_nan() {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: "must be a number".to_string(),
                });
            }
        }

        for (field, value) in [
            ("scoring.iforest_weight", config.scoring.effective_iforest_weight()),
            ("scoring.zscore_weight", config.scoring.effective_zscore_weight()),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: "must be finite and non-negative".to_string(),
                });
            }
        }

        if config.scoring.effective_n_estimators() == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "scoring.n_estimators".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.scoring.effective_max_samples() == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "scoring.max_samples".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.duplicates.effective_min_occurrences() == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "duplicates.min_occurrences".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut RiskConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: RiskConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        config.merge(&file_config);
        Ok(())
    }

    /// Merge `other` into `self`; `other` wins wherever it has a value.
    pub fn merge(&mut self, other: &RiskConfig) {
        self.cleaning.merge(&other.cleaning);
        self.duplicates.merge(&other.duplicates);
        self.scoring.merge(&other.scoring);
    }

    /// Apply environment variable overrides.
    /// Pattern: `CLAIMRISK_Z_THRESHOLD`, `CLAIMRISK_AGE_POLICY`, etc.
    /// A variable that is set but does not parse is an error.
    fn apply_env_overrides(config: &mut RiskConfig) -> Result<(), ConfigError> {
        if let Some(v) = env_parse::<f64>("CLAIMRISK_Z_THRESHOLD")? {
            config.scoring.z_threshold = Some(v);
        }
        if let Some(v) = env_parse::<f64>("CLAIMRISK_SCORE_THRESHOLD")? {
            config.scoring.score_threshold = Some(v);
        }
        if let Some(v) = env_parse::<u64>("CLAIMRISK_RANDOM_SEED")? {
            config.scoring.random_seed = Some(v);
        }
        if let Some(v) = env_parse::<CleaningPolicy>("CLAIMRISK_AGE_POLICY")? {
            config.cleaning.age.policy = Some(v);
        }
        if let Some(v) = env_parse::<CleaningPolicy>("CLAIMRISK_INCOME_POLICY")? {
            config.cleaning.income.policy = Some(v);
        }
        if let Some(v) = env_parse::<DuplicateAction>("CLAIMRISK_DUPLICATE_ACTION")? {
            config.duplicates.action = Some(v);
        }
        if let Some(v) = env_parse::<usize>("CLAIMRISK_DUPLICATE_MIN_OCCURRENCES")? {
            config.duplicates.min_occurrences = Some(v);
        }
        Ok(())
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut RiskConfig, cli: &CliOverrides) {
        if let Some(v) = cli.z_threshold {
            config.scoring.z_threshold = Some(v);
        }
        if let Some(v) = cli.score_threshold {
            config.scoring.score_threshold = Some(v);
        }
        if let Some(v) = cli.age_policy {
            config.cleaning.age.policy = Some(v);
        }
        if let Some(v) = cli.income_policy {
            config.cleaning.income.policy = Some(v);
        }
        if let Some(v) = cli.duplicate_action {
            config.duplicates.action = Some(v);
        }
        if let Some(v) = cli.min_occurrences {
            config.duplicates.min_occurrences = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// `Ok(None)` when `key` is unset; `InvalidValue` when it is set but
/// does not parse.
fn env_parse<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                field: key.to_string(),
                message: format!("{raw:?}: {e}"),
            }),
        Err(_) => Ok(None),
    }
}
