use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{round_currency, Money, RatePercent, RepaymentType};

const HUNDRED: Decimal = dec!(100);

/// Terms of a loan as entered in the loan form. Ephemeral input state;
/// nothing here is persisted by this crate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Loan value advanced against the pledged item.
    pub principal: Money,
    /// Flat interest per period, in percent (2 = 2%).
    pub rate_percent: RatePercent,
    /// Term length in months.
    pub periods: u32,
    #[serde(default)]
    pub repayment_type: RepaymentType,
}

/// Live preview derived from [`LoanTerms`]. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanPreview {
    pub interest_amount: Money,
    pub total_amount: Money,
    /// Only present when periods > 0. Flat division of the total, not an
    /// amortized payment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emi_amount: Option<Money>,
}

impl LoanPreview {
    /// Copy with every amount rounded to 2 dp for currency display.
    pub fn rounded(&self) -> LoanPreview {
        LoanPreview {
            interest_amount: round_currency(self.interest_amount),
            total_amount: round_currency(self.total_amount),
            emi_amount: self.emi_amount.map(round_currency),
        }
    }
}

/// Flat-interest loan preview, recomputed on every keystroke in the
/// loan-entry and loan-edit forms.
///
/// Interest is charged once on the full principal for the full term
/// (`P * R * N / 100`), never on a declining balance — the flat-rate
/// convention of pawn/gold lending. Downstream receipts assume
/// `total_amount = principal + interest_amount`, so that identity holds
/// unconditionally.
///
/// Never fails: negative inputs are treated as zero (non-numeric field
/// text is already zeroed by [`parse_amount`](crate::types::parse_amount)),
/// and the EMI is simply absent when there are no periods to divide by.
pub fn preview_loan(terms: &LoanTerms) -> LoanPreview {
    let principal = terms.principal.max(Decimal::ZERO);
    let rate = terms.rate_percent.max(Decimal::ZERO);
    let periods = Decimal::from(terms.periods);

    let interest_amount = principal * rate * periods / HUNDRED;
    let total_amount = principal + interest_amount;

    let emi_amount = if terms.periods > 0 {
        Some(total_amount / periods)
    } else {
        None
    };

    LoanPreview {
        interest_amount,
        total_amount,
        emi_amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn terms(principal: Decimal, rate: Decimal, periods: u32) -> LoanTerms {
        LoanTerms {
            principal,
            rate_percent: rate,
            periods,
            repayment_type: RepaymentType::EmiScheme,
        }
    }

    #[test]
    fn test_preview_standard_loan() {
        let p = preview_loan(&terms(dec!(10000), dec!(2), 6));
        assert_eq!(p.interest_amount, dec!(1200));
        assert_eq!(p.total_amount, dec!(11200));
        // 11200 / 6 = 1866.666..., displayed as 1866.67
        assert_eq!(p.rounded().emi_amount, Some(dec!(1866.67)));
    }

    #[test]
    fn test_preview_zero_rate_still_divides() {
        let p = preview_loan(&terms(dec!(5000), dec!(0), 12));
        assert_eq!(p.interest_amount, dec!(0));
        assert_eq!(p.total_amount, dec!(5000));
        assert_eq!(p.rounded().emi_amount, Some(dec!(416.67)));
    }

    #[test]
    fn test_preview_zero_principal() {
        let p = preview_loan(&terms(dec!(0), dec!(5), 10));
        assert_eq!(p.interest_amount, dec!(0));
        assert_eq!(p.total_amount, dec!(0));
    }

    #[test]
    fn test_preview_zero_periods_suppresses_emi() {
        let p = preview_loan(&terms(dec!(20000), dec!(1.5), 0));
        assert_eq!(p.interest_amount, dec!(0));
        assert_eq!(p.total_amount, dec!(20000));
        assert_eq!(p.emi_amount, None);
    }

    #[test]
    fn test_preview_negative_inputs_coerce_to_zero() {
        let p = preview_loan(&terms(dec!(-500), dec!(3), 6));
        assert_eq!(p.interest_amount, dec!(0));
        assert_eq!(p.total_amount, dec!(0));

        let p = preview_loan(&terms(dec!(500), dec!(-3), 6));
        assert_eq!(p.interest_amount, dec!(0));
        assert_eq!(p.total_amount, dec!(500));
    }

    #[test]
    fn test_preview_total_identity() {
        let p = preview_loan(&terms(dec!(12345.67), dec!(2.25), 9));
        assert_eq!(p.total_amount, dec!(12345.67) + p.interest_amount);
    }

    #[test]
    fn test_preview_idempotent() {
        let t = terms(dec!(9999.99), dec!(1.75), 11);
        assert_eq!(preview_loan(&t), preview_loan(&t));
    }

    #[test]
    fn test_interest_linear_in_each_input() {
        let base = preview_loan(&terms(dec!(1000), dec!(2), 6)).interest_amount;
        let double_p = preview_loan(&terms(dec!(2000), dec!(2), 6)).interest_amount;
        let double_r = preview_loan(&terms(dec!(1000), dec!(4), 6)).interest_amount;
        let double_n = preview_loan(&terms(dec!(1000), dec!(2), 12)).interest_amount;
        assert_eq!(double_p, base * dec!(2));
        assert_eq!(double_r, base * dec!(2));
        assert_eq!(double_n, base * dec!(2));
    }
}
