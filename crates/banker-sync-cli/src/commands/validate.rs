use clap::Args;
use serde_json::{json, Value};

use banker_sync_core::validate::{
    validate_client, validate_loan_application, ClientRegistration, LoanApplication,
};

use crate::input;

/// Arguments for loan application validation
#[derive(Args)]
pub struct ValidateLoanArgs {
    /// Path to JSON file holding the loan application
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for client registration validation
#[derive(Args)]
pub struct ValidateClientArgs {
    /// Path to JSON file holding the client registration
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_validate_loan(args: ValidateLoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let app: LoanApplication = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("provide --input or pipe a loan application on stdin".into());
    };

    let errors = validate_loan_application(&app);
    Ok(json!({ "valid": errors.is_empty(), "errors": errors }))
}

pub fn run_validate_client(args: ValidateClientArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let client: ClientRegistration = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("provide --input or pipe a client registration on stdin".into());
    };

    let errors = validate_client(&client);
    Ok(json!({ "valid": errors.is_empty(), "errors": errors }))
}
