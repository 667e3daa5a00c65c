use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use banker_sync_core::gold::{value_pledge, PledgeValuationInput, Purity};

use crate::input;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum PurityArg {
    #[value(name = "24k")]
    K24,
    #[default]
    #[value(name = "22k")]
    K22,
}

impl From<PurityArg> for Purity {
    fn from(arg: PurityArg) -> Self {
        match arg {
            PurityArg::K24 => Purity::K24,
            PurityArg::K22 => Purity::K22,
        }
    }
}

/// Arguments for pledge valuation
#[derive(Args)]
pub struct GoldValueArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Spot quote for one troy ounce of fine gold
    #[arg(long, alias = "rate")]
    pub rate_per_troy_ounce: Option<Decimal>,

    /// Karat grade of the item
    #[arg(long, value_enum, default_value = "22k")]
    pub purity: PurityArg,

    /// Net weight of the item in grams
    #[arg(long, alias = "weight")]
    pub net_weight: Option<Decimal>,

    /// Proposed loan value
    #[arg(long)]
    pub loan_value: Option<Decimal>,
}

pub fn run_gold_value(args: GoldValueArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let valuation_input: PledgeValuationInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        PledgeValuationInput {
            rate_per_troy_ounce: args
                .rate_per_troy_ounce
                .ok_or("--rate-per-troy-ounce is required (or provide --input)")?,
            purity: args.purity.into(),
            item_net_weight_grams: args
                .net_weight
                .ok_or("--net-weight is required (or provide --input)")?,
            loan_value: args.loan_value.ok_or("--loan-value is required (or provide --input)")?,
        }
    };

    let output = value_pledge(&valuation_input)?;
    Ok(serde_json::to_value(output)?)
}
