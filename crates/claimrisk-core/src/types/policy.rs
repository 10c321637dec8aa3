//! Cleaning policy and duplicate handling choices.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CleaningError;

/// How out-of-range values in a validated numeric column are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleaningPolicy {
    /// Replace each invalid value with the mean of the valid ones.
    #[serde(alias = "impute-mean")]
    ImputeMean,
    /// Drop rows holding an invalid value.
    Exclude,
    /// Report only; the table is returned unchanged.
    Leave,
}

impl CleaningPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ImputeMean => "impute_mean",
            Self::Exclude => "exclude",
            Self::Leave => "leave",
        }
    }
}

impl fmt::Display for CleaningPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CleaningPolicy {
    type Err = CleaningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "impute_mean" => Ok(Self::ImputeMean),
            "exclude" => Ok(Self::Exclude),
            "leave" => Ok(Self::Leave),
            _ => Err(CleaningError::UnknownPolicy(s.to_string())),
        }
    }
}

/// What to do with rows holding a suspicious duplicate value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateAction {
    /// Mark rows in the report; keep them in the table.
    Flag,
    /// Drop flagged rows before scoring.
    Exclude,
    /// Skip duplicate detection entirely.
    Ignore,
}

impl DuplicateAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Flag => "flag",
            Self::Exclude => "exclude",
            Self::Ignore => "ignore",
        }
    }
}

impl fmt::Display for DuplicateAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DuplicateAction {
    type Err = CleaningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flag" => Ok(Self::Flag),
            "exclude" => Ok(Self::Exclude),
            "ignore" => Ok(Self::Ignore),
            _ => Err(CleaningError::UnknownDuplicateAction(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_parse_variants() {
        assert_eq!("impute_mean".parse::<CleaningPolicy>().unwrap(), CleaningPolicy::ImputeMean);
        assert_eq!("Impute-Mean".parse::<CleaningPolicy>().unwrap(), CleaningPolicy::ImputeMean);
        assert_eq!("exclude".parse::<CleaningPolicy>().unwrap(), CleaningPolicy::Exclude);
        assert!(matches!(
            "drop".parse::<CleaningPolicy>(),
            Err(CleaningError::UnknownPolicy(name)) if name == "drop"
        ));
    }

    #[test]
    fn test_duplicate_action_parse() {
        assert_eq!("FLAG".parse::<DuplicateAction>().unwrap(), DuplicateAction::Flag);
        assert!("remove".parse::<DuplicateAction>().is_err());
    }
}
