use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::tiers::{RiskThresholds, RiskTier};
use crate::error::LoanCalcError;
use crate::types::*;
use crate::LoanCalcResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskInput {
    pub property_value: Money,
    pub loan_amount: Money,
    /// Monthly repayment on the new loan.
    pub monthly_payment: Money,
    #[serde(default)]
    pub existing_monthly_debt: Money,
    pub annual_income: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<RiskThresholds>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskSnapshot {
    pub ltv_percent: Percent,
    pub dsr_percent: Percent,
    pub ltv_status: RiskTier,
    pub dsr_status: RiskTier,
}

impl RiskSnapshot {
    /// Classify already computed ratios.
    pub fn from_ratios(
        ltv_percent: Percent,
        dsr_percent: Percent,
        thresholds: &RiskThresholds,
    ) -> Self {
        RiskSnapshot {
            ltv_percent,
            dsr_percent,
            ltv_status: thresholds.ltv.classify(ltv_percent),
            dsr_status: thresholds.dsr.classify(dsr_percent),
        }
    }

    /// The more severe of the two statuses.
    pub fn overall(&self) -> RiskTier {
        self.ltv_status.max(self.dsr_status)
    }
}

// ---------------------------------------------------------------------------
// Ratios
// ---------------------------------------------------------------------------

/// Loan amount as a percentage of property value; 0 when there is no
/// property value. Not capped at 100%.
pub fn compute_ltv(property_value: Money, loan_amount: Money) -> Percent {
    if property_value <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    percent_of(loan_amount, property_value)
}

/// Monthly debt service (new payment plus existing debt) as a percentage of
/// monthly income; 0 when there is no income.
pub fn compute_dsr(
    monthly_payment: Money,
    existing_monthly_debt: Money,
    annual_income: Money,
) -> Percent {
    if annual_income <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let monthly_income = annual_income / MONTHS_PER_YEAR;
    let debt_service = monthly_payment
        .checked_add(existing_monthly_debt)
        .unwrap_or(Decimal::MAX);
    percent_of(debt_service, monthly_income)
}

/// `numerator / denominator * 100`, saturating instead of overflowing.
fn percent_of(numerator: Money, denominator: Money) -> Percent {
    numerator
        .checked_div(denominator)
        .and_then(|ratio| ratio.checked_mul(dec!(100)))
        .unwrap_or(Decimal::MAX)
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// LTV and DSR with their tier statuses.
pub fn assess_risk(input: &RiskInput) -> LoanCalcResult<ComputationOutput<RiskSnapshot>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input)?;
    let thresholds = input.thresholds.unwrap_or_default();
    thresholds.validate()?;

    let ltv = compute_ltv(input.property_value, input.loan_amount);
    let dsr = compute_dsr(
        input.monthly_payment,
        input.existing_monthly_debt,
        input.annual_income,
    );
    push_ratio_warnings(
        &mut warnings,
        input.property_value,
        input.annual_income,
        ltv,
    );

    let output = RiskSnapshot::from_ratios(ltv, dsr, &thresholds);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Loan Risk Ratios (LTV / DSR)",
        &thresholds_assumptions(&thresholds),
        warnings,
        elapsed,
        output,
    ))
}

/// Warnings shared with the full loan evaluation.
pub(crate) fn push_ratio_warnings(
    warnings: &mut Vec<String>,
    property_value: Money,
    annual_income: Money,
    ltv: Percent,
) {
    if property_value.is_zero() {
        warnings.push("Property value is zero; LTV reported as 0%.".into());
    }
    if annual_income.is_zero() {
        warnings.push("Annual income is zero; DSR reported as 0%.".into());
    }
    if ltv > dec!(100) {
        warnings.push(format!(
            "LTV of {}% exceeds 100%: loan is larger than the property value.",
            ltv.round_dp(2)
        ));
    }
}

pub(crate) fn thresholds_assumptions(thresholds: &RiskThresholds) -> serde_json::Value {
    serde_json::json!({
        "ltv_bands": {
            "good_max": thresholds.ltv.good_max.to_string(),
            "caution_max": thresholds.ltv.caution_max.to_string(),
        },
        "dsr_bands": {
            "good_max": thresholds.dsr.good_max.to_string(),
            "caution_max": thresholds.dsr.caution_max.to_string(),
        },
        "band_edges": "inclusive on the lower tier",
    })
}

fn validate_input(input: &RiskInput) -> LoanCalcResult<()> {
    let fields = [
        ("property_value", input.property_value),
        ("loan_amount", input.loan_amount),
        ("monthly_payment", input.monthly_payment),
        ("existing_monthly_debt", input.existing_monthly_debt),
        ("annual_income", input.annual_income),
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
