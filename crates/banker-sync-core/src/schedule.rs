use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::interest::{preview_loan, LoanTerms};
use crate::types::{round_currency, with_metadata, ComputationOutput, Money, RepaymentType};
use crate::{BankerSyncError, BankerSyncResult};

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleInput {
    #[serde(flatten)]
    pub terms: LoanTerms,
    /// Date the loan was issued; installments fall due monthly after it.
    pub issue_date: NaiveDate,
    /// Agreed return date. Used as the due date of a bullet repayment;
    /// ignored for EMI schedules, which derive due dates from the term.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_date: Option<NaiveDate>,
}

/// One row of a repayment schedule, as shown in receipts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    pub sequence: u32,
    pub label: String,
    pub due_date: NaiveDate,
    pub principal_component: Money,
    pub interest_component: Money,
    pub total_due: Money,
    pub is_paid: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmiSchedule {
    pub installments: Vec<Installment>,
    pub principal: Money,
    pub interest_amount: Money,
    pub total_amount: Money,
    /// Per-installment amount before rounding; absent for bullet repayment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emi_amount: Option<Money>,
}

// ---------------------------------------------------------------------------
// Schedule construction
// ---------------------------------------------------------------------------

/// Build the repayment schedule for an issued loan.
///
/// EMI scheme: one installment per month starting one month after the issue
/// date, each a flat division of the totals. Rows are rounded to 2 dp and the
/// final row absorbs the remainder, so the schedule always foots exactly to
/// `principal + interest`.
///
/// Bullet repayment: a single row for the full total, due at the return date
/// (or the end of the term when no return date was recorded).
pub fn build_emi_schedule(
    input: &ScheduleInput,
) -> BankerSyncResult<ComputationOutput<EmiSchedule>> {
    let start = Instant::now();
    let mut warnings = Vec::new();

    validate_input(input)?;

    let preview = preview_loan(&input.terms);
    let principal = input.terms.principal;
    let interest = preview.interest_amount;
    let total = preview.total_amount;

    if input.terms.rate_percent.is_zero() {
        warnings.push("Interest rate is zero; schedule contains principal only.".into());
    }

    let installments = match input.terms.repayment_type {
        RepaymentType::EmiScheme => {
            emi_rows(input, principal, interest, input.terms.periods)?
        }
        RepaymentType::BulletPayment => {
            let due_date = match input.return_date {
                Some(d) => d,
                None => add_months(input.issue_date, input.terms.periods)?,
            };
            vec![Installment {
                sequence: 1,
                label: "BULLET".into(),
                due_date,
                principal_component: principal,
                interest_component: interest,
                total_due: total,
                is_paid: false,
            }]
        }
    };

    let output = EmiSchedule {
        installments,
        principal,
        interest_amount: interest,
        total_amount: total,
        emi_amount: preview.emi_amount.filter(|_| {
            input.terms.repayment_type == RepaymentType::EmiScheme
        }),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "interest_basis": "flat on full principal, P * R * N / 100",
        "due_dates": "monthly from issue date, clamped to month end",
        "rounding": "2 dp per row, final row absorbs remainder",
    });

    Ok(with_metadata(
        "Flat-rate EMI schedule",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

fn emi_rows(
    input: &ScheduleInput,
    principal: Money,
    interest: Money,
    periods: u32,
) -> BankerSyncResult<Vec<Installment>> {
    let n = Decimal::from(periods);
    let principal_per = round_currency(principal / n);
    let interest_per = round_currency(interest / n);

    let mut rows = Vec::with_capacity(periods as usize);
    let mut principal_left = principal;
    let mut interest_left = interest;

    for seq in 1..=periods {
        let last = seq == periods;
        let principal_component = if last { principal_left } else { principal_per };
        let interest_component = if last { interest_left } else { interest_per };
        principal_left -= principal_component;
        interest_left -= interest_component;

        rows.push(Installment {
            sequence: seq,
            label: format!("EMI {seq}"),
            due_date: add_months(input.issue_date, seq)?,
            principal_component,
            interest_component,
            total_due: principal_component + interest_component,
            is_paid: false,
        });
    }

    Ok(rows)
}

fn add_months(date: NaiveDate, months: u32) -> BankerSyncResult<NaiveDate> {
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| BankerSyncError::DateError(format!("{date} + {months} months overflows")))
}

fn validate_input(input: &ScheduleInput) -> BankerSyncResult<()> {
    if input.terms.principal <= Decimal::ZERO {
        return Err(BankerSyncError::InvalidInput {
            field: "principal".into(),
            reason: "Loan value must be greater than 0.".into(),
        });
    }
    if input.terms.rate_percent < Decimal::ZERO {
        return Err(BankerSyncError::InvalidInput {
            field: "rate_percent".into(),
            reason: "Interest rate cannot be negative.".into(),
        });
    }
    if input.terms.repayment_type == RepaymentType::EmiScheme && input.terms.periods == 0 {
        return Err(BankerSyncError::InvalidInput {
            field: "periods".into(),
            reason: "An EMI schedule needs at least one period.".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_input(repayment_type: RepaymentType) -> ScheduleInput {
        ScheduleInput {
            terms: LoanTerms {
                principal: dec!(10000),
                rate_percent: dec!(2),
                periods: 6,
                repayment_type,
            },
            issue_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            return_date: NaiveDate::from_ymd_opt(2024, 7, 15),
        }
    }

    #[test]
    fn test_emi_schedule_foots_to_totals() {
        let out = build_emi_schedule(&sample_input(RepaymentType::EmiScheme)).unwrap();
        let s = &out.result;
        assert_eq!(s.installments.len(), 6);
        assert_eq!(s.total_amount, dec!(11200));

        let total: Decimal = s.installments.iter().map(|i| i.total_due).sum();
        let principal: Decimal = s.installments.iter().map(|i| i.principal_component).sum();
        let interest: Decimal = s.installments.iter().map(|i| i.interest_component).sum();
        assert_eq!(total, dec!(11200));
        assert_eq!(principal, dec!(10000));
        assert_eq!(interest, dec!(1200));
    }

    #[test]
    fn test_emi_schedule_rounding_remainder_in_final_row() {
        // 10000/6 = 1666.666... -> 1666.67 per row, final row absorbs
        let out = build_emi_schedule(&sample_input(RepaymentType::EmiScheme)).unwrap();
        let rows = &out.result.installments;
        assert_eq!(rows[0].principal_component, dec!(1666.67));
        assert_eq!(rows[0].interest_component, dec!(200));
        assert_eq!(rows[5].principal_component, dec!(1666.65));
    }

    #[test]
    fn test_emi_due_dates_monthly_from_issue() {
        let out = build_emi_schedule(&sample_input(RepaymentType::EmiScheme)).unwrap();
        let rows = &out.result.installments;
        assert_eq!(rows[0].due_date, NaiveDate::from_ymd_opt(2024, 2, 15).unwrap());
        assert_eq!(rows[0].label, "EMI 1");
        assert_eq!(rows[5].due_date, NaiveDate::from_ymd_opt(2024, 7, 15).unwrap());
        assert!(rows.iter().all(|r| !r.is_paid));
    }

    #[test]
    fn test_month_end_clamp() {
        let mut input = sample_input(RepaymentType::EmiScheme);
        input.issue_date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let out = build_emi_schedule(&input).unwrap();
        // Jan 31 + 1 month clamps to Feb 29 (2024 is a leap year)
        assert_eq!(
            out.result.installments[0].due_date,
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }

    #[test]
    fn test_bullet_single_row_at_return_date() {
        let out = build_emi_schedule(&sample_input(RepaymentType::BulletPayment)).unwrap();
        let s = &out.result;
        assert_eq!(s.installments.len(), 1);
        assert_eq!(s.emi_amount, None);
        let row = &s.installments[0];
        assert_eq!(row.label, "BULLET");
        assert_eq!(row.due_date, NaiveDate::from_ymd_opt(2024, 7, 15).unwrap());
        assert_eq!(row.total_due, dec!(11200));
    }

    #[test]
    fn test_emi_zero_periods_rejected() {
        let mut input = sample_input(RepaymentType::EmiScheme);
        input.terms.periods = 0;
        let err = build_emi_schedule(&input).unwrap_err();
        assert!(matches!(err, BankerSyncError::InvalidInput { .. }));
    }

    #[test]
    fn test_zero_rate_warns() {
        let mut input = sample_input(RepaymentType::EmiScheme);
        input.terms.rate_percent = Decimal::ZERO;
        let out = build_emi_schedule(&input).unwrap();
        assert!(!out.warnings.is_empty());
        assert_eq!(out.result.interest_amount, Decimal::ZERO);
    }
}
