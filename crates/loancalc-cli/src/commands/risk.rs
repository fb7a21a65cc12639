use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loancalc_core::risk::{self, RiskInput};

use super::ThresholdArgs;
use crate::input;

/// Arguments for LTV / DSR assessment
#[derive(Args)]
pub struct RiskArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Property value
    #[arg(long)]
    pub property_value: Option<Decimal>,

    /// Loan amount
    #[arg(long)]
    pub loan_amount: Option<Decimal>,

    /// Monthly repayment on the new loan
    #[arg(long)]
    pub monthly_payment: Option<Decimal>,

    /// Existing monthly debt repayments
    #[arg(long, default_value = "0")]
    pub existing_debt: Decimal,

    /// Annual income
    #[arg(long)]
    pub annual_income: Option<Decimal>,

    #[command(flatten)]
    pub thresholds: ThresholdArgs,
}

pub fn run_risk(args: RiskArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let risk_input: RiskInput = if let Some(structured) = input::structured(args.input.as_deref())? {
        structured
    } else {
        RiskInput {
            property_value: args
                .property_value
                .ok_or("--property-value is required (or provide --input)")?,
            loan_amount: args
                .loan_amount
                .ok_or("--loan-amount is required (or provide --input)")?,
            monthly_payment: args
                .monthly_payment
                .ok_or("--monthly-payment is required (or provide --input)")?,
            existing_monthly_debt: args.existing_debt,
            annual_income: args
                .annual_income
                .ok_or("--annual-income is required (or provide --input)")?,
            thresholds: args.thresholds.to_thresholds(),
        }
    };

    let result = risk::assess_risk(&risk_input)?;
    tracing::info!(
        ltv_status = %result.result.ltv_status,
        dsr_status = %result.result.dsr_status,
        "risk assessment complete"
    );
    Ok(serde_json::to_value(result)?)
}
