use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::repayment::{repayment_assumptions, summarize_repayment};
use crate::amortization::{RepaymentInput, RepaymentSummary, ScheduleKind};
use crate::error::LoanCalcError;
use crate::risk::metrics::{push_ratio_warnings, thresholds_assumptions};
use crate::risk::{compute_dsr, compute_ltv, RiskSnapshot, RiskThresholds};
use crate::time_value::compute_monthly_payment;
use crate::types::*;
use crate::LoanCalcResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanEvaluationInput {
    pub loan: LoanInput,
    #[serde(default)]
    pub schedule_kind: ScheduleKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<RiskThresholds>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanEvaluation {
    /// Equal-payment monthly amount; used for DSR whatever the schedule kind.
    pub monthly_payment: Money,
    pub risk: RiskSnapshot,
    /// Present only when a repayment type is selected and the term is usable.
    pub repayment: Option<RepaymentSummary>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Evaluate a loan the way the calculator form does on every change:
/// equal-payment monthly amount, LTV/DSR with statuses, and the selected
/// repayment schedule.
///
/// A term that rounds to zero months, or figures too large for the decimal
/// range, do not fail the evaluation: the monthly payment is reported as 0
/// and the schedule is skipped, with a warning. Negative fields are
/// rejected.
pub fn evaluate_loan(
    input: &LoanEvaluationInput,
) -> LoanCalcResult<ComputationOutput<LoanEvaluation>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();
    let loan = &input.loan;

    validate_loan(loan)?;
    let thresholds = input.thresholds.unwrap_or_default();
    thresholds.validate()?;

    let monthly_payment = match compute_monthly_payment(
        loan.loan_amount,
        loan.annual_rate_percent,
        loan.term_years,
    ) {
        Ok(payment) => Some(payment),
        Err(LoanCalcError::InvalidInput { field, reason }) if field == "term_years" => {
            warnings.push(format!("{reason}; monthly payment taken as 0."));
            None
        }
        Err(LoanCalcError::FinancialImpossibility(reason)) => {
            warnings.push(format!("{reason}; monthly payment taken as 0."));
            None
        }
        Err(e) => return Err(e),
    };

    let ltv = compute_ltv(loan.property_value, loan.loan_amount);
    let dsr = compute_dsr(
        monthly_payment.unwrap_or(Decimal::ZERO),
        loan.existing_monthly_debt,
        loan.annual_income,
    );
    push_ratio_warnings(&mut warnings, loan.property_value, loan.annual_income, ltv);
    let risk = RiskSnapshot::from_ratios(ltv, dsr, &thresholds);

    let repayment = match (input.schedule_kind, monthly_payment) {
        (ScheduleKind::None, _) => None,
        (kind, None) => {
            warnings.push(format!("No usable term; {kind} schedule skipped."));
            None
        }
        (kind, Some(_)) => {
            let repayment_input = RepaymentInput {
                principal: loan.loan_amount,
                annual_rate_percent: loan.annual_rate_percent,
                term_years: loan.term_years,
                kind,
            };
            match summarize_repayment(&repayment_input, &mut warnings) {
                Ok(summary) => Some(summary),
                Err(LoanCalcError::FinancialImpossibility(reason)) => {
                    warnings.push(format!("{reason}; {kind} schedule skipped."));
                    None
                }
                Err(e) => return Err(e),
            }
        }
    };

    tracing::debug!(
        kind = %input.schedule_kind,
        ltv_status = %risk.ltv_status,
        dsr_status = %risk.dsr_status,
        "loan evaluated"
    );

    let output = LoanEvaluation {
        monthly_payment: monthly_payment.unwrap_or(Decimal::ZERO),
        risk,
        repayment,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "risk": thresholds_assumptions(&thresholds),
        "repayment": repayment_assumptions(),
        "dsr_payment_basis": "equal-payment monthly amount",
    });

    Ok(with_metadata(
        "Loan Evaluation (LTV / DSR / Amortisation)",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

fn validate_loan(loan: &LoanInput) -> LoanCalcResult<()> {
    let fields = [
        ("property_value", loan.property_value),
        ("loan_amount", loan.loan_amount),
        ("annual_income", loan.annual_income),
        ("existing_monthly_debt", loan.existing_monthly_debt),
        ("annual_rate_percent", loan.annual_rate_percent),
        ("term_years", loan.term_years),
    ];
    for (field, value) in fields {
        if value < Decimal::ZERO {
            return Err(LoanCalcError::InvalidInput {
                field: field.into(),
                reason: "Value cannot be negative".into(),
            });
        }
    }
    Ok(())
}
