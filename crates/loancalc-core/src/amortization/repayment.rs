use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::schedule::{build_schedule, ScheduleKind, ScheduleRow, PREVIEW_MONTHS};
use super::totals::repayment_totals;
use crate::error::LoanCalcError;
use crate::time_value::{annuity_payment, monthly_rate, number_of_payments, overflow};
use crate::types::*;
use crate::LoanCalcResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepaymentInput {
    pub principal: Money,
    pub annual_rate_percent: Percent,
    pub term_years: Years,
    pub kind: ScheduleKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepaymentSummary {
    pub kind: ScheduleKind,
    pub number_of_payments: u32,
    pub monthly_rate: Rate,
    /// Fixed payment (equal payment), first-month payment (equal principal)
    /// or monthly interest (interest only).
    pub headline_payment: Money,
    /// First-year preview, at most 12 rows.
    pub schedule: Vec<ScheduleRow>,
    /// Full-term interest, closed form.
    pub total_interest: Money,
    /// Full-term principal plus interest, closed form.
    pub total_repaid: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Preview schedule, headline payment and lifetime totals for one
/// repayment convention.
pub fn analyze_repayment(
    input: &RepaymentInput,
) -> LoanCalcResult<ComputationOutput<RepaymentSummary>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.kind.is_none() {
        return Err(LoanCalcError::InvalidInput {
            field: "kind".into(),
            reason: "A repayment type is required for repayment analysis".into(),
        });
    }

    let output = summarize_repayment(input, &mut warnings)?;

    tracing::debug!(
        kind = %input.kind,
        payments = output.number_of_payments,
        "repayment analysed"
    );

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        &format!("Amortisation Schedule ({})", input.kind),
        &repayment_assumptions(),
        warnings,
        elapsed,
        output,
    ))
}

pub(crate) fn repayment_assumptions() -> serde_json::Value {
    serde_json::json!({
        "compounding": "simple monthly (annual rate / 12)",
        "payment_count_rounding": "nearest whole month, halves away from zero",
        "schedule_preview_months": PREVIEW_MONTHS,
        "totals": "closed form over the full term",
    })
}

/// Schedule, headline and totals, recording non-fatal conditions in
/// `warnings`. Shared with the full loan evaluation.
pub(crate) fn summarize_repayment(
    input: &RepaymentInput,
    warnings: &mut Vec<String>,
) -> LoanCalcResult<RepaymentSummary> {
    let schedule = build_schedule(
        input.principal,
        input.annual_rate_percent,
        input.term_years,
        input.kind,
    )?;
    let totals = repayment_totals(
        input.principal,
        input.annual_rate_percent,
        input.term_years,
        input.kind,
    )?;
    let n = number_of_payments(input.term_years)?;
    let r = monthly_rate(input.annual_rate_percent);
    let headline_payment = headline_payment(input.principal, r, n, input.kind)?;

    if input.principal.is_zero() {
        warnings.push("Principal is zero; every payment is zero.".into());
    }
    if n < PREVIEW_MONTHS {
        warnings.push(format!(
            "Term of {n} months is shorter than the {PREVIEW_MONTHS}-month preview; schedule covers the whole loan."
        ));
    }
    if input.kind == ScheduleKind::InterestOnly && n > PREVIEW_MONTHS {
        warnings.push(format!(
            "Principal of {} falls due in month {n}, beyond the preview.",
            input.principal
        ));
    }

    let output = RepaymentSummary {
        kind: input.kind,
        number_of_payments: n,
        monthly_rate: r,
        headline_payment,
        schedule,
        total_interest: totals.total_interest,
        total_repaid: totals.total_repaid,
    };

    Ok(output)
}

/// The single payment figure quoted for a convention.
fn headline_payment(
    principal: Money,
    rate: Rate,
    nper: u32,
    kind: ScheduleKind,
) -> LoanCalcResult<Money> {
    let payment = match kind {
        ScheduleKind::EqualPayment => annuity_payment(principal, rate, nper)?,
        ScheduleKind::EqualPrincipal => principal
            .checked_mul(rate)
            .and_then(|interest| interest.checked_add(principal / Decimal::from(nper)))
            .ok_or_else(|| overflow("first payment"))?,
        ScheduleKind::InterestOnly => principal
            .checked_mul(rate)
            .ok_or_else(|| overflow("monthly interest"))?,
        ScheduleKind::None => Decimal::ZERO,
    };
    Ok(payment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_input(kind: ScheduleKind) -> RepaymentInput {
        RepaymentInput {
            principal: dec!(12000),
            annual_rate_percent: dec!(6),
            term_years: dec!(1),
            kind,
        }
    }

    #[test]
    fn test_equal_principal_headline_is_first_payment() {
        let result = analyze_repayment(&sample_input(ScheduleKind::EqualPrincipal)).unwrap();
        let s = &result.result;
        assert_eq!(s.headline_payment, dec!(1060));
        assert_eq!(s.headline_payment, s.schedule[0].payment);
        assert_eq!(s.number_of_payments, 12);
        assert_eq!(s.monthly_rate, dec!(0.005));
    }

    #[test]
    fn test_interest_only_headline_is_monthly_interest() {
        let mut input = sample_input(ScheduleKind::InterestOnly);
        input.term_years = dec!(30);
        let result = analyze_repayment(&input).unwrap();
        assert_eq!(result.result.headline_payment, dec!(60));
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("beyond the preview")));
    }

    #[test]
    fn test_equal_payment_headline_matches_rows() {
        let result = analyze_repayment(&sample_input(ScheduleKind::EqualPayment)).unwrap();
        let s = &result.result;
        assert!(s.schedule.iter().all(|r| r.payment == s.headline_payment));
    }

    #[test]
    fn test_short_term_warning() {
        let mut input = sample_input(ScheduleKind::EqualPayment);
        input.term_years = dec!(0.5);
        let result = analyze_repayment(&input).unwrap();
        assert_eq!(result.result.schedule.len(), 6);
        assert!(result.warnings.iter().any(|w| w.contains("shorter than")));
    }

    #[test]
    fn test_oversized_loan_is_an_error_not_a_panic() {
        for kind in [
            ScheduleKind::EqualPayment,
            ScheduleKind::EqualPrincipal,
            ScheduleKind::InterestOnly,
        ] {
            let input = RepaymentInput {
                principal: Decimal::MAX,
                annual_rate_percent: dec!(1200),
                term_years: dec!(30),
                kind,
            };
            let err = analyze_repayment(&input).unwrap_err();
            assert!(matches!(err, LoanCalcError::FinancialImpossibility(_)), "{kind}");
        }
    }

    #[test]
    fn test_none_kind_rejected() {
        let err = analyze_repayment(&sample_input(ScheduleKind::None)).unwrap_err();
        assert!(matches!(err, LoanCalcError::InvalidInput { .. }));
    }

    #[test]
    fn test_metadata_populated() {
        let result = analyze_repayment(&sample_input(ScheduleKind::EqualPayment)).unwrap();
        assert!(result.methodology.contains("equal-payment"));
        assert_eq!(result.metadata.precision, "rust_decimal_128bit");
    }
}
