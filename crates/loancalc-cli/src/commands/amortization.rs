use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loancalc_core::amortization::{self, RepaymentInput, ScheduleKind};

use crate::input;

/// Arguments for a repayment schedule
#[derive(Args)]
pub struct ScheduleArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount borrowed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (3.5 = 3.5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long)]
    pub term: Option<Decimal>,

    /// Repayment type: equal-payment, equal-principal or interest-only
    #[arg(long, default_value = "equal-payment")]
    pub kind: String,
}

/// Arguments for the equal-payment monthly amount
#[derive(Args)]
pub struct PaymentArgs {
    /// Amount borrowed
    #[arg(long)]
    pub principal: Decimal,

    /// Annual interest rate in percent (3.5 = 3.5%)
    #[arg(long)]
    pub rate: Decimal,

    /// Loan term in years
    #[arg(long)]
    pub term: Decimal,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let repayment_input: RepaymentInput =
        if let Some(structured) = input::structured(args.input.as_deref())? {
            structured
        } else {
            RepaymentInput {
                principal: args
                    .principal
                    .ok_or("--principal is required (or provide --input)")?,
                annual_rate_percent: args
                    .rate
                    .ok_or("--rate is required (or provide --input)")?,
                term_years: args.term.ok_or("--term is required (or provide --input)")?,
                kind: args.kind.parse::<ScheduleKind>()?,
            }
        };

    let result = amortization::analyze_repayment(&repayment_input)?;
    tracing::info!(
        kind = %repayment_input.kind,
        rows = result.result.schedule.len(),
        "schedule complete"
    );
    Ok(serde_json::to_value(result)?)
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let monthly_payment = amortization::compute_monthly_payment(args.principal, args.rate, args.term)?;
    let number_of_payments = amortization::number_of_payments(args.term)?;
    tracing::info!(payments = number_of_payments, "payment computed");
    Ok(serde_json::json!({
        "result": {
            "monthly_payment": monthly_payment,
            "number_of_payments": number_of_payments,
            "monthly_rate": amortization::monthly_rate(args.rate),
        }
    }))
}
