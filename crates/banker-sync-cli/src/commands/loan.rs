use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use banker_sync_core::interest::{preview_loan, LoanTerms};
use banker_sync_core::schedule::{build_emi_schedule, ScheduleInput};

use crate::commands::RepaymentArg;
use crate::input;

/// Arguments for a loan preview
#[derive(Args)]
pub struct PreviewArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan value advanced against the item
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Flat interest per period, in percent (2 = 2%)
    #[arg(long, alias = "interest")]
    pub rate: Option<Decimal>,

    /// Term length in months
    #[arg(long)]
    pub periods: Option<u32>,

    /// Repayment scheme
    #[arg(long, value_enum, default_value = "emi")]
    pub repayment: RepaymentArg,

    /// Report exact decimals instead of 2 dp display rounding
    #[arg(long)]
    pub exact: bool,
}

/// Arguments for schedule generation
#[derive(Args)]
pub struct ScheduleArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan value advanced against the item
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Flat interest per period, in percent
    #[arg(long, alias = "interest")]
    pub rate: Option<Decimal>,

    /// Term length in months
    #[arg(long)]
    pub periods: Option<u32>,

    /// Repayment scheme
    #[arg(long, value_enum, default_value = "emi")]
    pub repayment: RepaymentArg,

    /// Issue date (YYYY-MM-DD); installments fall due monthly after it
    #[arg(long)]
    pub issue_date: Option<NaiveDate>,

    /// Agreed return date (YYYY-MM-DD); due date of a bullet repayment
    #[arg(long)]
    pub return_date: Option<NaiveDate>,
}

pub fn run_preview(args: PreviewArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms: LoanTerms = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        LoanTerms {
            principal: args.principal.ok_or("--principal is required (or provide --input)")?,
            rate_percent: args.rate.ok_or("--rate is required (or provide --input)")?,
            periods: args.periods.ok_or("--periods is required (or provide --input)")?,
            repayment_type: args.repayment.into(),
        }
    };

    let preview = preview_loan(&terms);
    let preview = if args.exact { preview } else { preview.rounded() };
    Ok(serde_json::to_value(preview)?)
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let schedule_input: ScheduleInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        ScheduleInput {
            terms: LoanTerms {
                principal: args.principal.ok_or("--principal is required (or provide --input)")?,
                rate_percent: args.rate.ok_or("--rate is required (or provide --input)")?,
                periods: args.periods.ok_or("--periods is required (or provide --input)")?,
                repayment_type: args.repayment.into(),
            },
            issue_date: args
                .issue_date
                .ok_or("--issue-date is required (or provide --input)")?,
            return_date: args.return_date,
        }
    };

    let output = build_emi_schedule(&schedule_input)?;
    Ok(serde_json::to_value(output)?)
}
