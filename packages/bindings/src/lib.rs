//! N-API surface for the React console: every entry point takes and returns
//! JSON strings, so the front-end keeps its existing DTO shapes.

use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Loan preview & schedule
// ---------------------------------------------------------------------------

#[napi]
pub fn preview_loan(input_json: String) -> NapiResult<String> {
    let terms: banker_sync_core::interest::LoanTerms =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let preview = banker_sync_core::interest::preview_loan(&terms).rounded();
    serde_json::to_string(&preview).map_err(to_napi_error)
}

#[napi]
pub fn build_emi_schedule(input_json: String) -> NapiResult<String> {
    let input: banker_sync_core::schedule::ScheduleInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        banker_sync_core::schedule::build_emi_schedule(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Payments
// ---------------------------------------------------------------------------

#[napi]
pub fn apply_payment(balance_json: String, amount: String) -> NapiResult<String> {
    let balance: banker_sync_core::payment::LoanBalance =
        serde_json::from_str(&balance_json).map_err(to_napi_error)?;
    let amount = banker_sync_core::types::parse_amount(&amount);
    let output =
        banker_sync_core::payment::apply_payment(&balance, amount).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn preview_pending(pending: String, amount: String) -> NapiResult<String> {
    let pending = banker_sync_core::types::parse_amount(&pending);
    let amount = banker_sync_core::types::parse_amount(&amount);
    let updated = banker_sync_core::payment::preview_pending(pending, amount);
    Ok(banker_sync_core::types::round_currency(updated).to_string())
}

// ---------------------------------------------------------------------------
// Validation & valuation
// ---------------------------------------------------------------------------

#[napi]
pub fn validate_loan_application(input_json: String) -> NapiResult<String> {
    let app: banker_sync_core::validate::LoanApplication =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let errors = banker_sync_core::validate::validate_loan_application(&app);
    serde_json::to_string(&errors).map_err(to_napi_error)
}

#[napi]
pub fn validate_client(input_json: String) -> NapiResult<String> {
    let client: banker_sync_core::validate::ClientRegistration =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let errors = banker_sync_core::validate::validate_client(&client);
    serde_json::to_string(&errors).map_err(to_napi_error)
}

#[napi]
pub fn value_pledge(input_json: String) -> NapiResult<String> {
    let input: banker_sync_core::gold::PledgeValuationInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = banker_sync_core::gold::value_pledge(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
