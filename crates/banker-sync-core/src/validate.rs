use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::interest::LoanTerms;
use crate::types::Money;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// A loan as submitted from the entry form, before the server sees it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoanApplication {
    pub client_id: String,
    pub item_name: String,
    pub item_net_weight_grams: Decimal,
    pub item_actual_value: Money,
    #[serde(flatten)]
    pub terms: LoanTerms,
    pub return_date: String,
}

/// A client registration as submitted from the form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientRegistration {
    pub name: String,
    pub father_name: String,
    /// Login identity; the business mandates a Gmail address.
    pub username: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub contact_primary: String,
    #[serde(default)]
    pub contact_secondary: String,
}

/// One failed field check, keyed for display next to the offending input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: &str) -> Self {
        FieldError {
            field: field.into(),
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Pre-submission checks for a loan entry. Returns every failing field;
/// an empty vec means the form may be submitted. These rules sit in front
/// of the calculator, which itself accepts anything.
pub fn validate_loan_application(app: &LoanApplication) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if app.client_id.trim().is_empty() {
        errors.push(FieldError::new("client_id", "Client is required"));
    }
    if app.item_name.trim().is_empty() {
        errors.push(FieldError::new("item_name", "Item name is required"));
    }
    if app.item_net_weight_grams <= Decimal::ZERO {
        errors.push(FieldError::new(
            "item_net_weight_grams",
            "Net weight must be greater than 0",
        ));
    }
    if app.item_actual_value <= Decimal::ZERO {
        errors.push(FieldError::new(
            "item_actual_value",
            "Actual value must be greater than 0",
        ));
    }
    if app.terms.principal <= Decimal::ZERO {
        errors.push(FieldError::new(
            "principal",
            "Loan value must be greater than 0",
        ));
    }
    if app.terms.rate_percent <= Decimal::ZERO {
        errors.push(FieldError::new(
            "rate_percent",
            "Interest % must be greater than 0",
        ));
    }
    if app.terms.periods == 0 {
        errors.push(FieldError::new(
            "periods",
            "Interest period must be greater than 0",
        ));
    }
    if app.return_date.trim().is_empty() {
        errors.push(FieldError::new("return_date", "Return date is required"));
    }

    errors
}

/// Pre-submission checks for a client registration.
pub fn validate_client(client: &ClientRegistration) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if client.name.trim().is_empty() {
        errors.push(FieldError::new("name", "Name is required"));
    }
    if client.father_name.trim().is_empty() {
        errors.push(FieldError::new("father_name", "Father's name is required"));
    }
    if client.username.trim().is_empty() {
        errors.push(FieldError::new("username", "Username is required"));
    } else if !is_gmail_address(client.username.trim()) {
        errors.push(FieldError::new(
            "username",
            "Username must be a valid Gmail address",
        ));
    }
    if !client.contact_primary.is_empty() && !is_ten_digits(&client.contact_primary) {
        errors.push(FieldError::new(
            "contact_primary",
            "Primary contact must be 10 digits",
        ));
    }
    if !client.contact_secondary.is_empty() && !is_ten_digits(&client.contact_secondary) {
        errors.push(FieldError::new(
            "contact_secondary",
            "Secondary contact must be 10 digits",
        ));
    }

    errors
}

fn is_ten_digits(s: &str) -> bool {
    s.len() == 10 && s.chars().all(|c| c.is_ascii_digit())
}

fn is_gmail_address(s: &str) -> bool {
    let Some(local) = s.strip_suffix("@gmail.com") else {
        return false;
    };
    !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '%' | '+' | '-'))
}
