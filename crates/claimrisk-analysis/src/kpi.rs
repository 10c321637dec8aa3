//! Headline portfolio KPIs for a batch of claims.

use claimrisk_core::constants::{CLAIM_AMOUNT, POLICY_PREMIUM};
use claimrisk_core::types::Table;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpis {
    pub num_claims: usize,
    /// Sum of `claim_amount`, missing counted as 0. `None` without the column.
    pub total_claims_amount: Option<f64>,
    /// Mean over present amounts. `None` without the column or any amount.
    pub avg_claim_amount: Option<f64>,
    /// Claims over premiums. Needs both columns and a positive premium total.
    pub loss_ratio_proxy: Option<f64>,
}

pub fn compute_kpis(table: &Table) -> Kpis {
    let amounts = table.numeric_column(CLAIM_AMOUNT);
    let total_claims_amount = amounts.as_deref().map(sum_present);

    let avg_claim_amount = amounts.as_deref().and_then(|values| {
        let present: Vec<f64> = values.iter().flatten().copied().collect();
        (!present.is_empty()).then(|| present.iter().sum::<f64>() / present.len() as f64)
    });

    let loss_ratio_proxy = match (total_claims_amount, table.numeric_column(POLICY_PREMIUM)) {
        (Some(claims), Some(premiums)) => {
            let premiums = sum_present(&premiums);
            (premiums > 0.0).then(|| claims / premiums)
        }
        _ => None,
    };

    Kpis {
        num_claims: table.len(),
        total_claims_amount,
        avg_claim_amount,
        loss_ratio_proxy,
    }
}

fn sum_present(values: &[Option<f64>]) -> f64 {
    values.iter().flatten().sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimrisk_core::types::Value;

    #[test]
    fn test_kpis_with_premiums() {
        let t = Table::from_rows(
            ["claim_amount", "policy_premium"],
            vec![
                vec![100.0.into(), 400.0.into()],
                vec![Value::Missing, 600.0.into()],
                vec![300.0.into(), Value::Missing],
            ],
        )
        .unwrap();
        let k = compute_kpis(&t);
        assert_eq!(k.num_claims, 3);
        assert_eq!(k.total_claims_amount, Some(400.0));
        assert_eq!(k.avg_claim_amount, Some(200.0));
        assert_eq!(k.loss_ratio_proxy, Some(0.4));
    }

    #[test]
    fn test_zero_premiums_have_no_ratio() {
        let t = Table::from_rows(
            ["claim_amount", "policy_premium"],
            vec![vec![100.0.into(), 0.0.into()]],
        )
        .unwrap();
        assert_eq!(compute_kpis(&t).loss_ratio_proxy, None);
    }

    #[test]
    fn test_without_amount_column() {
        let t = Table::from_rows(["state"], vec![vec!["NY".into()]]).unwrap();
        let k = compute_kpis(&t);
        assert_eq!(k.num_claims, 1);
        assert_eq!(k.total_claims_amount, None);
        assert_eq!(k.avg_claim_amount, None);
        assert_eq!(k.loss_ratio_proxy, None);
    }

    #[test]
    fn test_all_missing_amounts() {
        let t = Table::from_rows(["claim_amount"], vec![vec![Value::Missing]; 2]).unwrap();
        let k = compute_kpis(&t);
        assert_eq!(k.total_claims_amount, Some(0.0));
        assert_eq!(k.avg_claim_amount, None);
    }
}
