//! Range-cleaning configuration for the validated columns.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_AGE_MAX, DEFAULT_AGE_MIN, DEFAULT_INCOME_MAX, DEFAULT_INCOME_MIN, DEFAULT_ROUND_TO_INT,
};
use crate::types::{Bounds, CleaningPolicy};

/// Rule for one validated numeric column.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ColumnRuleConfig {
    /// Cleaning policy. Default: exclude.
    pub policy: Option<CleaningPolicy>,
    /// Inclusive lower bound.
    pub min: Option<f64>,
    /// Inclusive upper bound.
    pub max: Option<f64>,
    /// Round imputed values half-to-even. Default: true.
    pub round_to_int: Option<bool>,
}

impl ColumnRuleConfig {
    pub fn effective_policy(&self) -> CleaningPolicy {
        self.policy.unwrap_or(CleaningPolicy::Exclude)
    }

    pub fn effective_round_to_int(&self) -> bool {
        self.round_to_int.unwrap_or(DEFAULT_ROUND_TO_INT)
    }

    fn bounds_or(&self, min: f64, max: f64) -> Bounds {
        Bounds {
            min: Some(self.min.unwrap_or(min)),
            max: Some(self.max.unwrap_or(max)),
        }
    }

    fn merge(&mut self, other: &ColumnRuleConfig) {
        if other.policy.is_some() {
            self.policy = other.policy;
        }
        if other.min.is_some() {
            self.min = other.min;
        }
        if other.max.is_some() {
            self.max = other.max;
        }
        if other.round_to_int.is_some() {
            self.round_to_int = other.round_to_int;
        }
    }
}

/// Cleaning configuration: one rule per validated column.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CleaningConfig {
    pub age: ColumnRuleConfig,
    /// Applies to `annual_income`, or `salary` when only that is present.
    pub income: ColumnRuleConfig,
}

impl CleaningConfig {
    /// Age bounds, defaulting to [18, 90].
    pub fn effective_age_bounds(&self) -> Bounds {
        self.age.bounds_or(DEFAULT_AGE_MIN, DEFAULT_AGE_MAX)
    }

    /// Income bounds, defaulting to [10 000, 500 000].
    pub fn effective_income_bounds(&self) -> Bounds {
        self.income.bounds_or(DEFAULT_INCOME_MIN, DEFAULT_INCOME_MAX)
    }

    pub(crate) fn merge(&mut self, other: &CleaningConfig) {
        self.age.merge(&other.age);
        self.income.merge(&other.income);
    }
}
