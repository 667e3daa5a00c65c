use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::schedule::Installment;
use crate::types::{with_metadata, ComputationOutput, LoanStatus, Money};
use crate::{BankerSyncError, BankerSyncResult};

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Outstanding state of a loan at the moment a payment is recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanBalance {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_id: Option<u64>,
    pub pending_total: Money,
    #[serde(default)]
    pub status: LoanStatus,
    /// Repayment schedule, if one was issued. Unpaid rows are settled in
    /// sequence as payments cover them.
    #[serde(default)]
    pub installments: Vec<Installment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentOutcome {
    pub amount_applied: Money,
    /// Portion of the payment beyond the pending total. Never applied.
    pub excess_unapplied: Money,
    pub previous_pending: Money,
    pub new_pending: Money,
    pub status: LoanStatus,
    pub installments_settled: u32,
    pub installments: Vec<Installment>,
}

// ---------------------------------------------------------------------------
// Payment application
// ---------------------------------------------------------------------------

/// Pending amount after a candidate payment, clamped at zero. Pure; this is
/// the live preview shown while the amount field is being typed.
pub fn preview_pending(pending: Money, amount: Money) -> Money {
    (pending - amount.max(Decimal::ZERO)).max(Decimal::ZERO)
}

/// Record a payment against a loan.
///
/// The payment reduces the pending total, never below zero; any excess is
/// reported back rather than applied. Unpaid installments are settled oldest
/// first while the applied amount covers each row in full. A loan whose
/// pending total reaches zero moves to COMPLETED.
pub fn apply_payment(
    balance: &LoanBalance,
    amount: Money,
) -> BankerSyncResult<ComputationOutput<PaymentOutcome>> {
    let start = Instant::now();
    let mut warnings = Vec::new();

    if amount <= Decimal::ZERO {
        return Err(BankerSyncError::InvalidInput {
            field: "amount".into(),
            reason: "Payment amount must be greater than 0.".into(),
        });
    }
    match balance.status {
        LoanStatus::Completed | LoanStatus::Closed => {
            return Err(BankerSyncError::InvalidInput {
                field: "status".into(),
                reason: format!("Loan is {} and cannot accept payments.", balance.status),
            });
        }
        LoanStatus::Active | LoanStatus::Defaulted => {}
    }
    if balance.pending_total < Decimal::ZERO {
        return Err(BankerSyncError::InvalidInput {
            field: "pending_total".into(),
            reason: "Pending total cannot be negative.".into(),
        });
    }

    let amount_applied = amount.min(balance.pending_total);
    let excess_unapplied = amount - amount_applied;
    let new_pending = balance.pending_total - amount_applied;

    if excess_unapplied > Decimal::ZERO {
        warnings.push(format!(
            "Payment exceeds pending total; {excess_unapplied} left unapplied."
        ));
    }

    let mut installments = balance.installments.clone();
    let mut installments_settled = 0;
    let mut cover = amount_applied;
    for row in installments.iter_mut().filter(|r| !r.is_paid) {
        if cover < row.total_due {
            break;
        }
        cover -= row.total_due;
        row.is_paid = true;
        installments_settled += 1;
    }

    let status = if new_pending.is_zero() {
        LoanStatus::Completed
    } else {
        balance.status
    };

    let outcome = PaymentOutcome {
        amount_applied,
        excess_unapplied,
        previous_pending: balance.pending_total,
        new_pending,
        status,
        installments_settled,
        installments,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "overpayment": "clamped at zero pending, excess reported unapplied",
        "installment_settlement": "oldest first, full rows only",
    });

    Ok(with_metadata(
        "Flat-rate loan payment",
        &assumptions,
        warnings,
        elapsed,
        outcome,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn two_installments() -> Vec<Installment> {
        (1..=2)
            .map(|seq| Installment {
                sequence: seq,
                label: format!("EMI {seq}"),
                due_date: NaiveDate::from_ymd_opt(2024, 1 + seq, 10).unwrap(),
                principal_component: dec!(500),
                interest_component: dec!(60),
                total_due: dec!(560),
                is_paid: false,
            })
            .collect()
    }

    fn balance(pending: Decimal) -> LoanBalance {
        LoanBalance {
            loan_id: Some(7),
            pending_total: pending,
            status: LoanStatus::Active,
            installments: two_installments(),
        }
    }

    #[test]
    fn test_partial_payment_reduces_pending() {
        let out = apply_payment(&balance(dec!(1120)), dec!(600)).unwrap();
        let o = &out.result;
        assert_eq!(o.amount_applied, dec!(600));
        assert_eq!(o.new_pending, dec!(520));
        assert_eq!(o.status, LoanStatus::Active);
        // 600 covers the first 560 row in full, not the second
        assert_eq!(o.installments_settled, 1);
        assert!(o.installments[0].is_paid);
        assert!(!o.installments[1].is_paid);
    }

    #[test]
    fn test_full_payment_completes_loan() {
        let out = apply_payment(&balance(dec!(1120)), dec!(1120)).unwrap();
        let o = &out.result;
        assert_eq!(o.new_pending, dec!(0));
        assert_eq!(o.status, LoanStatus::Completed);
        assert_eq!(o.installments_settled, 2);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_overpayment_clamps_and_warns() {
        let out = apply_payment(&balance(dec!(1120)), dec!(1500)).unwrap();
        let o = &out.result;
        assert_eq!(o.amount_applied, dec!(1120));
        assert_eq!(o.excess_unapplied, dec!(380));
        assert_eq!(o.new_pending, dec!(0));
        assert_eq!(o.status, LoanStatus::Completed);
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_zero_amount_rejected() {
        let err = apply_payment(&balance(dec!(1120)), dec!(0)).unwrap_err();
        assert!(matches!(err, BankerSyncError::InvalidInput { .. }));
    }

    #[test]
    fn test_settled_loan_rejects_payment() {
        let mut b = balance(dec!(0));
        b.status = LoanStatus::Completed;
        assert!(apply_payment(&b, dec!(10)).is_err());
    }

    #[test]
    fn test_defaulted_loan_accepts_recovery_payment() {
        let mut b = balance(dec!(1120));
        b.status = LoanStatus::Defaulted;
        let out = apply_payment(&b, dec!(1120)).unwrap();
        assert_eq!(out.result.status, LoanStatus::Completed);
    }

    #[test]
    fn test_preview_pending_clamp() {
        assert_eq!(preview_pending(dec!(1000), dec!(400)), dec!(600));
        assert_eq!(preview_pending(dec!(1000), dec!(1500)), dec!(0));
        assert_eq!(preview_pending(dec!(1000), dec!(-50)), dec!(1000));
    }
}
