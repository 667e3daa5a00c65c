use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use banker_sync_core::payment::{apply_payment, LoanBalance};
use banker_sync_core::types::LoanStatus;

use crate::input;

/// Arguments for recording a loan payment
#[derive(Args)]
pub struct PayArgs {
    /// Path to a JSON file holding the loan balance (with schedule, if any)
    #[arg(long)]
    pub input: Option<String>,

    /// Pending total before this payment
    #[arg(long)]
    pub pending: Option<Decimal>,

    /// Loan identifier, echoed into the outcome
    #[arg(long)]
    pub loan_id: Option<u64>,

    /// Amount being paid
    #[arg(long)]
    pub amount: Decimal,
}

pub fn run_pay(args: PayArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let balance: LoanBalance = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        LoanBalance {
            loan_id: args.loan_id,
            pending_total: args.pending.ok_or("--pending is required (or provide --input)")?,
            status: LoanStatus::Active,
            installments: Vec::new(),
        }
    };

    let output = apply_payment(&balance, args.amount)?;
    Ok(serde_json::to_value(output)?)
}
