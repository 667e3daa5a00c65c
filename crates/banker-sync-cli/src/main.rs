mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::gold::GoldValueArgs;
use commands::loan::{PreviewArgs, ScheduleArgs};
use commands::payment::PayArgs;
use commands::validate::{ValidateClientArgs, ValidateLoanArgs};

/// Gold-loan back-office calculations with decimal precision
#[derive(Parser)]
#[command(
    name = "bsync",
    version,
    about = "Gold-loan back-office calculations with decimal precision",
    long_about = "Banker Sync loan engine: flat-interest previews, EMI schedule \
                  generation, payment recording, form validation, and pledge \
                  valuation against the spot gold rate. All arithmetic uses \
                  decimal precision; nothing here touches the network."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Preview interest, total payable, and EMI for loan terms
    Preview(PreviewArgs),
    /// Build the full EMI (or bullet) repayment schedule
    Schedule(ScheduleArgs),
    /// Record a payment against a loan's pending total
    Pay(PayArgs),
    /// Check a loan application for submission errors
    ValidateLoan(ValidateLoanArgs),
    /// Check a client registration for submission errors
    ValidateClient(ValidateClientArgs),
    /// Value a pledged item against the spot gold rate
    GoldValue(GoldValueArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Preview(args) => commands::loan::run_preview(args),
        Commands::Schedule(args) => commands::loan::run_schedule(args),
        Commands::Pay(args) => commands::payment::run_pay(args),
        Commands::ValidateLoan(args) => commands::validate::run_validate_loan(args),
        Commands::ValidateClient(args) => commands::validate::run_validate_client(args),
        Commands::GoldValue(args) => commands::gold::run_gold_value(args),
        Commands::Version => {
            println!("bsync {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
