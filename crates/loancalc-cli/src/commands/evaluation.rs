use clap::Args;
use serde_json::Value;

use loancalc_core::amortization::ScheduleKind;
use loancalc_core::evaluation::{self, LoanEvaluationInput, RawLoanFields};

use super::ThresholdArgs;
use crate::input;

/// Arguments for a full loan evaluation.
///
/// Amount flags take free text the way a form field does: "1,250,000" and
/// "3.5%" are accepted, blanks and garbage count as 0.
#[derive(Args)]
pub struct EvaluateArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Property value
    #[arg(long, allow_hyphen_values = true)]
    pub property_value: Option<String>,

    /// Loan amount
    #[arg(long, allow_hyphen_values = true)]
    pub loan_amount: Option<String>,

    /// Annual income
    #[arg(long, allow_hyphen_values = true)]
    pub annual_income: Option<String>,

    /// Existing monthly debt repayments
    #[arg(long, allow_hyphen_values = true)]
    pub existing_debt: Option<String>,

    /// Annual interest rate in percent (3.5 = 3.5%)
    #[arg(long, allow_hyphen_values = true)]
    pub rate: Option<String>,

    /// Loan term in years
    #[arg(long, allow_hyphen_values = true)]
    pub term: Option<String>,

    /// Repayment type: equal-payment, equal-principal, interest-only or none
    #[arg(long, default_value = "none")]
    pub schedule: String,

    #[command(flatten)]
    pub thresholds: ThresholdArgs,
}

pub fn run_evaluate(args: EvaluateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let eval_input: LoanEvaluationInput =
        if let Some(structured) = input::structured(args.input.as_deref())? {
            structured
        } else {
            let fields = RawLoanFields {
                property_value: args.property_value.unwrap_or_default(),
                loan_amount: args.loan_amount.unwrap_or_default(),
                annual_income: args.annual_income.unwrap_or_default(),
                existing_monthly_debt: args.existing_debt.unwrap_or_default(),
                annual_rate_percent: args.rate.unwrap_or_default(),
                term_years: args.term.unwrap_or_default(),
            };
            LoanEvaluationInput {
                loan: fields.normalise(),
                schedule_kind: args.schedule.parse::<ScheduleKind>()?,
                thresholds: args.thresholds.to_thresholds(),
            }
        };

    let result = evaluation::evaluate_loan(&eval_input)?;
    tracing::info!(
        kind = %eval_input.schedule_kind,
        warnings = result.warnings.len(),
        "evaluation complete"
    );
    Ok(serde_json::to_value(result)?)
}
