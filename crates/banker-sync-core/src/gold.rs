use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::types::{round_currency, with_metadata, ComputationOutput, Money};
use crate::{BankerSyncError, BankerSyncResult};

/// Grams per troy ounce, the unit gold quotes arrive in.
const GRAMS_PER_TROY_OUNCE: Decimal = dec!(31.1035);

/// Fine-gold fraction of 22-karat metal (22/24, as quoted by the trade).
const PURITY_22K: Decimal = dec!(0.9167);

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Karat grade of the pledged item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Purity {
    K24,
    #[default]
    K22,
}

impl Purity {
    fn factor(self) -> Decimal {
        match self {
            Purity::K24 => Decimal::ONE,
            Purity::K22 => PURITY_22K,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PledgeValuationInput {
    /// Spot quote for one troy ounce of fine gold.
    pub rate_per_troy_ounce: Money,
    pub purity: Purity,
    pub item_net_weight_grams: Decimal,
    /// Loan value the banker proposes to advance.
    pub loan_value: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PledgeValuation {
    pub rate_per_gram_24k: Money,
    pub rate_per_gram_22k: Money,
    /// Weight times the per-gram rate at the stated purity.
    pub melt_value: Money,
    /// loan_value / melt_value. Above 1 the loan is under-collateralised.
    pub loan_to_value: Decimal,
}

// ---------------------------------------------------------------------------
// Valuation
// ---------------------------------------------------------------------------

/// Value a pledged gold item against the current spot rate.
pub fn value_pledge(
    input: &PledgeValuationInput,
) -> BankerSyncResult<ComputationOutput<PledgeValuation>> {
    let start = Instant::now();
    let mut warnings = Vec::new();

    if input.rate_per_troy_ounce <= Decimal::ZERO {
        return Err(BankerSyncError::InvalidInput {
            field: "rate_per_troy_ounce".into(),
            reason: "Gold rate must be positive.".into(),
        });
    }
    if input.item_net_weight_grams <= Decimal::ZERO {
        return Err(BankerSyncError::InvalidInput {
            field: "item_net_weight_grams".into(),
            reason: "Net weight must be greater than 0.".into(),
        });
    }
    if input.loan_value < Decimal::ZERO {
        return Err(BankerSyncError::InvalidInput {
            field: "loan_value".into(),
            reason: "Loan value cannot be negative.".into(),
        });
    }

    let rate_per_gram_24k = input.rate_per_troy_ounce / GRAMS_PER_TROY_OUNCE;
    let rate_per_gram_22k = rate_per_gram_24k * PURITY_22K;

    let melt_value = input.item_net_weight_grams * rate_per_gram_24k * input.purity.factor();
    if melt_value.is_zero() {
        return Err(BankerSyncError::DivisionByZero {
            context: "loan-to-value (melt value is zero)".into(),
        });
    }
    let loan_to_value = input.loan_value / melt_value;

    if input.loan_value > melt_value {
        warnings.push("Loan value exceeds the melt value of the pledge.".into());
    }

    let output = PledgeValuation {
        rate_per_gram_24k: round_currency(rate_per_gram_24k),
        rate_per_gram_22k: round_currency(rate_per_gram_22k),
        melt_value: round_currency(melt_value),
        loan_to_value: loan_to_value.round_dp(4),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "grams_per_troy_ounce": "31.1035",
        "purity_22k": "0.9167 of fine",
    });

    Ok(with_metadata(
        "Spot melt valuation",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample() -> PledgeValuationInput {
        PledgeValuationInput {
            rate_per_troy_ounce: dec!(217724.5),
            purity: Purity::K22,
            item_net_weight_grams: dec!(10),
            loan_value: dec!(50000),
        }
    }

    #[test]
    fn test_per_gram_rates() {
        let out = value_pledge(&sample()).unwrap();
        let v = &out.result;
        // 217724.5 / 31.1035 = 7000.00 per gram
        assert_eq!(v.rate_per_gram_24k, dec!(7000.00));
        assert_eq!(v.rate_per_gram_22k, dec!(6416.90));
    }

    #[test]
    fn test_melt_value_and_ltv() {
        let out = value_pledge(&sample()).unwrap();
        let v = &out.result;
        // 10 g * 7000 * 0.9167 = 64169.00
        assert_eq!(v.melt_value, dec!(64169.00));
        assert_eq!(v.loan_to_value, dec!(0.7792));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_under_collateralised_warns() {
        let mut input = sample();
        input.loan_value = dec!(70000);
        let out = value_pledge(&input).unwrap();
        assert_eq!(out.warnings.len(), 1);
        assert!(out.result.loan_to_value > Decimal::ONE);
    }

    #[test]
    fn test_zero_weight_rejected() {
        let mut input = sample();
        input.item_net_weight_grams = dec!(0);
        assert!(value_pledge(&input).is_err());
    }
}
