mod commands;
mod input;
mod logging;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::amortization::{PaymentArgs, ScheduleArgs};
use commands::evaluation::EvaluateArgs;
use commands::risk::RiskArgs;

/// Mortgage amortisation schedules and loan risk ratios
#[derive(Parser)]
#[command(
    name = "loancalc",
    version,
    about = "Mortgage amortisation schedules and loan risk ratios",
    long_about = "A CLI for evaluating mortgage loans with decimal precision. Computes the \
                  equal-payment monthly amount, LTV and DSR with Good/Caution/Risk tiers, \
                  and 12-month repayment previews with full-term totals for equal-payment, \
                  equal-principal and interest-only loans."
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
    /// Evaluate a loan: payment, LTV/DSR tiers and optional schedule
    Evaluate(EvaluateArgs),
    /// Repayment schedule preview and full-term totals
    Schedule(ScheduleArgs),
    /// LTV and DSR for a known monthly payment
    Risk(RiskArgs),
    /// Equal-payment monthly amount
    Payment(PaymentArgs),
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
    logging::init_tracing();
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Evaluate(args) => commands::evaluation::run_evaluate(args),
        Commands::Schedule(args) => commands::amortization::run_schedule(args),
        Commands::Risk(args) => commands::risk::run_risk(args),
        Commands::Payment(args) => commands::amortization::run_payment(args),
        Commands::Version => {
            println!("loancalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
