use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Interest rates expressed as percent per period (2 = 2%), matching the
/// loan-entry form. Never pre-divided by 100.
pub type RatePercent = Decimal;

/// How the borrower repays the loan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepaymentType {
    /// Equal installments of totalAmount / periods, one per period.
    #[default]
    #[serde(rename = "EMI_SCHEME")]
    EmiScheme,
    /// Principal and interest settled in one lump sum at term end.
    #[serde(rename = "BULLET_PAYMENT")]
    BulletPayment,
}

/// Lifecycle state of a loan record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoanStatus {
    #[default]
    Active,
    Completed,
    Closed,
    Defaulted,
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Active => "ACTIVE",
            Self::Completed => "COMPLETED",
            Self::Closed => "CLOSED",
            Self::Defaulted => "DEFAULTED",
        };
        write!(f, "{s}")
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

/// Round a monetary amount for display: 2 decimal places, midpoint away
/// from zero (1866.666... -> 1866.67).
pub fn round_currency(amount: Money) -> Money {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Lenient parse for user-editable numeric fields: locale-invariant base-10,
/// anything unparseable becomes zero. The calculator never rejects input.
pub fn parse_amount(raw: &str) -> Money {
    Decimal::from_str(raw.trim()).unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_currency_half_up() {
        assert_eq!(round_currency(dec!(1866.66666)), dec!(1866.67));
        assert_eq!(round_currency(dec!(416.665)), dec!(416.67));
        assert_eq!(round_currency(dec!(100)), dec!(100));
    }

    #[test]
    fn test_parse_amount_lenient() {
        assert_eq!(parse_amount("10000"), dec!(10000));
        assert_eq!(parse_amount(" 1.5 "), dec!(1.5));
        assert_eq!(parse_amount(""), Decimal::ZERO);
        assert_eq!(parse_amount("abc"), Decimal::ZERO);
        assert_eq!(parse_amount("12,000"), Decimal::ZERO);
    }

    #[test]
    fn test_repayment_type_wire_names() {
        let json = serde_json::to_string(&RepaymentType::EmiScheme).unwrap();
        assert_eq!(json, "\"EMI_SCHEME\"");
        let parsed: RepaymentType = serde_json::from_str("\"BULLET_PAYMENT\"").unwrap();
        assert_eq!(parsed, RepaymentType::BulletPayment);
    }

    #[test]
    fn test_loan_status_wire_names() {
        let json = serde_json::to_string(&LoanStatus::Defaulted).unwrap();
        assert_eq!(json, "\"DEFAULTED\"");
        assert_eq!(LoanStatus::Active.to_string(), "ACTIVE");
    }
}
