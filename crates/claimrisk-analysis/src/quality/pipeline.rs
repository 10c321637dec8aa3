//! Data-quality pipeline: range-clean age and income, then screen income
//! for suspicious duplicates.
//!
//! Order is fixed: age → income (`annual_income`, else `salary`) →
//! duplicates. Each stage consumes the previous stage's table.

use claimrisk_core::config::RiskConfig;
use claimrisk_core::constants::{AGE, ANNUAL_INCOME, SALARY};
use claimrisk_core::errors::CleaningError;
use claimrisk_core::types::{CleaningPolicy, DuplicateAction, Table};
use serde::Serialize;
use tracing::{debug, info};

use super::duplicates::{self, DuplicateFinding};
use super::range_cleaner::{self, RangeRule};

/// Duplicate screening settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DuplicateSettings {
    pub action: DuplicateAction,
    pub min_occurrences: usize,
    pub precision_threshold: usize,
}

/// Resolved settings for one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QualitySettings {
    pub age: RangeRule,
    pub income: RangeRule,
    pub duplicates: DuplicateSettings,
}

impl QualitySettings {
    pub fn from_config(config: &RiskConfig) -> Self {
        let cleaning = &config.cleaning;
        Self {
            age: RangeRule::new(cleaning.age.effective_policy(), cleaning.effective_age_bounds())
                .with_rounding(cleaning.age.effective_round_to_int()),
            income: RangeRule::new(
                cleaning.income.effective_policy(),
                cleaning.effective_income_bounds(),
            )
            .with_rounding(cleaning.income.effective_round_to_int()),
            duplicates: DuplicateSettings {
                action: config.duplicates.effective_action(),
                min_occurrences: config.duplicates.effective_min_occurrences(),
                precision_threshold: config.duplicates.effective_precision_threshold(),
            },
        }
    }

    /// Reject unusable settings before any stage runs.
    pub fn validate(&self) -> Result<(), CleaningError> {
        self.age.bounds.validate(AGE)?;
        self.income.bounds.validate(ANNUAL_INCOME)?;
        if self.duplicates.min_occurrences == 0 {
            return Err(CleaningError::InvalidMinOccurrences);
        }
        Ok(())
    }
}

impl Default for QualitySettings {
    fn default() -> Self {
        Self::from_config(&RiskConfig::default())
    }
}

/// Audit record for one range-cleaned column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnCleaning {
    pub column: String,
    pub policy: CleaningPolicy,
    pub affected_count: usize,
    pub imputed_value: Option<f64>,
}

/// Audit record for the duplicate screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicateScreen {
    pub column: String,
    pub action: DuplicateAction,
    pub flagged_count: usize,
    /// Row mask over the final table; present only when flagging.
    pub mask: Option<Vec<bool>>,
    pub findings: Vec<DuplicateFinding>,
}

/// Everything the pipeline did to a table.
#[derive(Debug, Clone, Serialize)]
pub struct QualityReport {
    #[serde(skip)]
    pub table: Table,
    pub original_rows: usize,
    pub final_rows: usize,
    /// Rows of the input table with an out-of-range or missing age or
    /// income, measured before cleaning. Indexed by input row.
    pub pre_clean_issues: Vec<bool>,
    /// Input row index of each row of `table`, in order.
    pub source_rows: Vec<usize>,
    pub age: Option<ColumnCleaning>,
    pub income: Option<ColumnCleaning>,
    pub duplicates: Option<DuplicateScreen>,
}

impl QualityReport {
    pub fn rows_removed(&self) -> usize {
        self.original_rows - self.final_rows
    }

    /// `pre_clean_issues` carried over to the rows of the cleaned table.
    pub fn final_row_issues(&self) -> Vec<bool> {
        self.source_rows
            .iter()
            .map(|&row| self.pre_clean_issues[row])
            .collect()
    }

    /// Percentage of input rows that survived cleaning.
    pub fn retained_pct(&self) -> f64 {
        if self.original_rows == 0 {
            100.0
        } else {
            self.final_rows as f64 / self.original_rows as f64 * 100.0
        }
    }

    /// Human-readable audit lines, one per stage that changed or found
    /// something.
    pub fn messages(&self) -> Vec<String> {
        let mut messages = Vec::new();
        for (label, noun, cleaning) in [
            ("Age", "ages", &self.age),
            ("Income", "income", &self.income),
        ] {
            let Some(c) = cleaning else { continue };
            if c.affected_count == 0 {
                continue;
            }
            let line = match (c.policy, c.imputed_value) {
                (CleaningPolicy::ImputeMean, Some(v)) => format!(
                    "{label}: {} out-of-range value(s) imputed to mean = {v}",
                    c.affected_count
                ),
                (CleaningPolicy::Exclude, _) => format!(
                    "{label}: {} row(s) excluded (out-of-range {noun})",
                    c.affected_count
                ),
                _ => format!(
                    "{label}: {} out-of-range value(s) detected (no changes applied)",
                    c.affected_count
                ),
            };
            messages.push(line);
        }

        if let Some(d) = self.duplicates.as_ref().filter(|d| d.flagged_count > 0) {
            match d.action {
                DuplicateAction::Exclude => messages.push(format!(
                    "Duplicates: {} row(s) excluded (suspicious duplicate values)",
                    d.flagged_count
                )),
                DuplicateAction::Flag => messages.push(format!(
                    "Duplicates: {} suspicious duplicate value(s) detected",
                    d.flagged_count
                )),
                DuplicateAction::Ignore => {}
            }
        }

        if self.rows_removed() > 0 {
            messages.push(format!(
                "Total rows removed: {} of {} ({:.1}%)",
                self.rows_removed(),
                self.original_rows,
                100.0 - self.retained_pct()
            ));
        }
        messages
    }
}

/// Runs the cleaning stages in order under fixed settings.
#[derive(Debug, Clone)]
pub struct QualityPipeline {
    settings: QualitySettings,
}

impl QualityPipeline {
    pub fn new(settings: QualitySettings) -> Result<Self, CleaningError> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &QualitySettings {
        &self.settings
    }

    /// Clean `table`. The input is left untouched.
    pub fn run(&self, table: &Table) -> Result<QualityReport, CleaningError> {
        let original_rows = table.len();
        let income_column = income_column(table);

        let pre_clean_issues: Vec<bool> = {
            let age = range_cleaner::issue_mask(table, AGE, &self.settings.age.bounds);
            let income = match income_column {
                Some(col) => range_cleaner::issue_mask(table, col, &self.settings.income.bounds),
                None => vec![false; original_rows],
            };
            age.iter().zip(&income).map(|(a, b)| *a || *b).collect()
        };

        let mut current = table.clone();
        let mut source_rows: Vec<usize> = (0..original_rows).collect();

        let age = if current.has_column(AGE) {
            let outcome = range_cleaner::clean(&current, AGE, &self.settings.age)?;
            if let Some(kept) = &outcome.kept {
                source_rows = retain_indices(&source_rows, kept);
            }
            current = outcome.table;
            Some(ColumnCleaning {
                column: AGE.to_string(),
                policy: self.settings.age.policy,
                affected_count: outcome.affected_count,
                imputed_value: outcome.imputed_value,
            })
        } else {
            None
        };

        let income = match income_column {
            Some(col) => {
                let outcome = range_cleaner::clean(&current, col, &self.settings.income)?;
                if let Some(kept) = &outcome.kept {
                    source_rows = retain_indices(&source_rows, kept);
                }
                current = outcome.table;
                Some(ColumnCleaning {
                    column: col.to_string(),
                    policy: self.settings.income.policy,
                    affected_count: outcome.affected_count,
                    imputed_value: outcome.imputed_value,
                })
            }
            None => None,
        };

        let dup = self.settings.duplicates;
        let duplicates = match income_column {
            Some(col) if dup.action != DuplicateAction::Ignore => {
                let mask =
                    duplicates::detect(&current, col, dup.min_occurrences, dup.precision_threshold);
                let findings =
                    duplicates::find(&current, col, dup.min_occurrences, dup.precision_threshold);
                let flagged_count = mask.iter().filter(|m| **m).count();
                debug!(column = col, flagged = flagged_count, action = %dup.action, "duplicate screen");

                let mask = match dup.action {
                    DuplicateAction::Exclude => {
                        let keep: Vec<bool> = mask.iter().map(|m| !m).collect();
                        current = current.retain_rows(&keep);
                        source_rows = retain_indices(&source_rows, &keep);
                        None
                    }
                    _ => Some(mask),
                };
                Some(DuplicateScreen {
                    column: col.to_string(),
                    action: dup.action,
                    flagged_count,
                    mask,
                    findings,
                })
            }
            _ => None,
        };

        info!(
            original_rows,
            final_rows = current.len(),
            "data-quality pipeline complete"
        );

        Ok(QualityReport {
            original_rows,
            final_rows: current.len(),
            table: current,
            pre_clean_issues,
            source_rows,
            age,
            income,
            duplicates,
        })
    }
}

fn retain_indices(rows: &[usize], keep: &[bool]) -> Vec<usize> {
    rows.iter()
        .zip(keep)
        .filter_map(|(&row, &k)| k.then_some(row))
        .collect()
}

/// The income column to validate: `annual_income`, else `salary`.
pub fn income_column(table: &Table) -> Option<&'static str> {
    [ANNUAL_INCOME, SALARY]
        .into_iter()
        .find(|c| table.has_column(c))
}
