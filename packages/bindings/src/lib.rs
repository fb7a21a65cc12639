use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

use loancalc_core::amortization::ScheduleKind;
use loancalc_core::evaluation::{LoanEvaluationInput, RawLoanFields};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

#[napi]
pub fn evaluate_loan(input_json: String) -> NapiResult<String> {
    let input: LoanEvaluationInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loancalc_core::evaluation::evaluate_loan(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[derive(Deserialize)]
struct FormInput {
    #[serde(flatten)]
    fields: RawLoanFields,
    #[serde(default)]
    schedule_kind: String,
}

/// Evaluate straight from form text: every field is a string and blanks
/// count as 0.
#[napi]
pub fn evaluate_form(input_json: String) -> NapiResult<String> {
    let form: FormInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let input = LoanEvaluationInput {
        loan: form.fields.normalise(),
        schedule_kind: form
            .schedule_kind
            .parse::<ScheduleKind>()
            .map_err(to_napi_error)?,
        thresholds: None,
    };
    let output = loancalc_core::evaluation::evaluate_loan(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Amortisation
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_repayment(input_json: String) -> NapiResult<String> {
    let input: loancalc_core::amortization::RepaymentInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        loancalc_core::amortization::analyze_repayment(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[derive(Deserialize)]
struct PaymentInput {
    principal: Decimal,
    annual_rate_percent: Decimal,
    term_years: Decimal,
}

#[napi]
pub fn monthly_payment(input_json: String) -> NapiResult<String> {
    let input: PaymentInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let payment = loancalc_core::amortization::compute_monthly_payment(
        input.principal,
        input.annual_rate_percent,
        input.term_years,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&serde_json::json!({ "monthly_payment": payment }))
        .map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Risk
// ---------------------------------------------------------------------------

#[napi]
pub fn assess_risk(input_json: String) -> NapiResult<String> {
    let input: loancalc_core::risk::RiskInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loancalc_core::risk::assess_risk(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
