//! Fixed alias table mapping raw header variants onto canonical names.
//!
//! Canonical names are the only contract between upstream data and the
//! scoring core. Applied once at ingestion; rename-only.

use tracing::debug;

use crate::constants::{
    ANNUAL_INCOME, CLAIM_AMOUNT, CLAIM_ID, POLICY_PREMIUM, REGION, STATE, TENURE_MONTHS,
};
use crate::types::Table;

/// Raw (normalized) header → canonical column, in precedence order.
pub const COLUMN_ALIASES: &[(&str, &str)] = &[
    ("total_claim_amount", CLAIM_AMOUNT),
    ("total_claim_value", CLAIM_AMOUNT),
    ("claim_value", CLAIM_AMOUNT),
    ("amount", CLAIM_AMOUNT),
    ("coverage_amount", CLAIM_AMOUNT),
    ("premium", POLICY_PREMIUM),
    ("policy_annual_premium", POLICY_PREMIUM),
    ("premium_amount", POLICY_PREMIUM),
    ("education", "customer_education"),
    ("education_level", "customer_education"),
    ("salary", ANNUAL_INCOME),
    ("income", ANNUAL_INCOME),
    ("income_level", ANNUAL_INCOME),
    ("state_code", STATE),
    ("location", STATE),
    ("geographic_information", REGION),
    ("customer_id", CLAIM_ID),
    ("customer_lifetime_value", "lifetime_value"),
    ("customer_value", "lifetime_value"),
    ("months_since_policy_inception", TENURE_MONTHS),
    ("policy_tenure", TENURE_MONTHS),
    ("claim_history", "previous_claims"),
    ("previous_claims_history", "previous_claims"),
];

/// Trim, lowercase, and replace spaces with underscores.
pub fn normalize_header(raw: &str) -> String {
    raw.trim().to_lowercase().replace(' ', "_")
}

/// Normalize every header, then apply the alias table in order.
///
/// A raw header is renamed only when its canonical column is not already
/// present, so the first matching alias wins and an existing canonical
/// column is never overwritten.
pub fn coalesce_columns(table: &Table) -> Table {
    let mut out = table.clone();
    for idx in 0..out.columns().len() {
        let normalized = normalize_header(&out.columns()[idx]);
        out.rename_column(idx, normalized);
    }

    for (raw, canonical) in COLUMN_ALIASES {
        if out.has_column(canonical) {
            continue;
        }
        if let Some(idx) = out.column_index(raw) {
            debug!(from = *raw, to = *canonical, "aliased column");
            out.rename_column(idx, *canonical);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Value;

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("  Total Claim Amount "), "total_claim_amount");
        assert_eq!(normalize_header("AGE"), "age");
    }

    #[test]
    fn test_alias_applied() {
        let t = Table::new(["Total Claim Amount", "Premium", "Salary"]);
        let out = coalesce_columns(&t);
        assert_eq!(out.columns(), &["claim_amount", "policy_premium", "annual_income"]);
    }

    #[test]
    fn test_existing_canonical_not_overwritten() {
        let t = Table::from_rows(
            ["claim_amount", "amount"],
            vec![vec![Value::Number(1.0), Value::Number(2.0)]],
        )
        .unwrap();
        let out = coalesce_columns(&t);
        assert_eq!(out.columns(), &["claim_amount", "amount"]);
        assert_eq!(out.cell(0, "claim_amount"), Some(&Value::Number(1.0)));
    }

    #[test]
    fn test_first_alias_wins() {
        // salary precedes income in the alias table
        let t = Table::new(["income", "salary"]);
        let out = coalesce_columns(&t);
        assert_eq!(out.columns(), &["income", "annual_income"]);
    }
}
