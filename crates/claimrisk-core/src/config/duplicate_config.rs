//! Suspicious-duplicate detection configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MIN_OCCURRENCES, DEFAULT_PRECISION_THRESHOLD};
use crate::types::DuplicateAction;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DuplicateConfig {
    /// Default: exclude.
    pub action: Option<DuplicateAction>,
    /// Frequency at which a value becomes a candidate. Default: 10.
    pub min_occurrences: Option<usize>,
    /// Decimal places considered unusual. Default: 4.
    pub precision_threshold: Option<usize>,
}

impl DuplicateConfig {
    pub fn effective_action(&self) -> DuplicateAction {
        self.action.unwrap_or(DuplicateAction::Exclude)
    }

    pub fn effective_min_occurrences(&self) -> usize {
        self.min_occurrences.unwrap_or(DEFAULT_MIN_OCCURRENCES)
    }

    pub fn effective_precision_threshold(&self) -> usize {
        self.precision_threshold.unwrap_or(DEFAULT_PRECISION_THRESHOLD)
    }

    pub(crate) fn merge(&mut self, other: &DuplicateConfig) {
        if other.action.is_some() {
            self.action = other.action;
        }
        if other.min_occurrences.is_some() {
            self.min_occurrences = other.min_occurrences;
        }
        if other.precision_threshold.is_some() {
            self.precision_threshold = other.precision_threshold;
        }
    }
}
