use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::error::LoanCalcError;
use crate::types::{Money, Percent, Rate, Years};
use crate::LoanCalcResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Monthly interest rate as a decimal: `annual_rate_percent / 100 / 12`.
pub fn monthly_rate(annual_rate_percent: Percent) -> Rate {
    annual_rate_percent / dec!(100) / MONTHS_PER_YEAR
}

/// Number of monthly payments in a term of `term_years`.
///
/// Fractional terms are rounded to the nearest whole month, halves away from
/// zero (2.5 months becomes 3). A term that rounds to zero months, or a
/// negative term, is rejected.
pub fn number_of_payments(term_years: Years) -> LoanCalcResult<u32> {
    if term_years <= Decimal::ZERO {
        return Err(LoanCalcError::InvalidInput {
            field: "term_years".into(),
            reason: "Loan term must be greater than zero".into(),
        });
    }

    let too_long = || LoanCalcError::InvalidInput {
        field: "term_years".into(),
        reason: format!("Term of {term_years} years exceeds the supported payment count"),
    };
    let months = term_years
        .checked_mul(MONTHS_PER_YEAR)
        .ok_or_else(too_long)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    match months.to_u32() {
        Some(n) if n > 0 => Ok(n),
        Some(_) => Err(LoanCalcError::InvalidInput {
            field: "term_years".into(),
            reason: format!("Term of {term_years} years is shorter than one monthly payment"),
        }),
        None => Err(too_long()),
    }
}

/// Compounding factor `(1 + r)^n`.
///
/// Very large rates over long terms overflow 128-bit decimals; that is
/// reported rather than allowed to panic.
pub fn compounding_factor(rate: Rate, nper: u32) -> LoanCalcResult<Decimal> {
    (Decimal::ONE + rate)
        .checked_powu(u64::from(nper))
        .ok_or_else(|| {
            LoanCalcError::FinancialImpossibility(format!(
                "Compounding factor overflows at monthly rate {rate} over {nper} payments"
            ))
        })
}

/// Level monthly payment that fully amortises `principal` (equal-payment
/// convention).
///
/// `payment = P * r * (1+r)^n / ((1+r)^n - 1)`; an interest-free loan is
/// simply `P / n`.
pub fn compute_monthly_payment(
    principal: Money,
    annual_rate_percent: Percent,
    term_years: Years,
) -> LoanCalcResult<Money> {
    validate_loan_terms(principal, annual_rate_percent)?;
    let n = number_of_payments(term_years)?;
    let r = monthly_rate(annual_rate_percent);
    annuity_payment(principal, r, n)
}

/// Annuity payment for a monthly rate and payment count already derived.
pub(crate) fn annuity_payment(principal: Money, rate: Rate, nper: u32) -> LoanCalcResult<Money> {
    if nper == 0 {
        return Err(LoanCalcError::InvalidInput {
            field: "nper".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }

    if rate.is_zero() {
        return Ok(principal / Decimal::from(nper));
    }

    let factor = compounding_factor(rate, nper)?;
    let denominator = factor - Decimal::ONE;

    if denominator.is_zero() {
        return Err(LoanCalcError::DivisionByZero {
            context: "annuity factor".into(),
        });
    }

    let numerator = principal
        .checked_mul(rate)
        .and_then(|interest| interest.checked_mul(factor))
        .ok_or_else(|| overflow(&format!("monthly payment on {principal} at monthly rate {rate}")))?;

    Ok(numerator / denominator)
}

/// Error for an intermediate amount beyond the 128-bit decimal range.
pub(crate) fn overflow(context: &str) -> LoanCalcError {
    LoanCalcError::FinancialImpossibility(format!("{context} overflows the decimal range"))
}

/// Reject negative principal or rate.
pub(crate) fn validate_loan_terms(principal: Money, annual_rate_percent: Percent) -> LoanCalcResult<()> {
    if principal < Decimal::ZERO {
        return Err(LoanCalcError::InvalidInput {
            field: "principal".into(),
            reason: "Principal cannot be negative".into(),
        });
    }
    if annual_rate_percent < Decimal::ZERO {
        return Err(LoanCalcError::InvalidInput {
            field: "annual_rate_percent".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_monthly_rate() {
        assert_eq!(monthly_rate(dec!(6)), dec!(0.005));
        assert_eq!(monthly_rate(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_number_of_payments_whole_years() {
        assert_eq!(number_of_payments(dec!(30)).unwrap(), 360);
        assert_eq!(number_of_payments(dec!(1)).unwrap(), 12);
    }

    #[test]
    fn test_number_of_payments_rounds_to_nearest_month() {
        // 1.51 years = 18.12 months
        assert_eq!(number_of_payments(dec!(1.51)).unwrap(), 18);
        // 1.54 years = 18.48 months
        assert_eq!(number_of_payments(dec!(1.54)).unwrap(), 18);
        // 1.55 years = 18.6 months
        assert_eq!(number_of_payments(dec!(1.55)).unwrap(), 19);
        // 0.125 years = 1.5 months, half rounds up
        assert_eq!(number_of_payments(dec!(0.125)).unwrap(), 2);
    }

    #[test]
    fn test_number_of_payments_rejects_zero_and_tiny_terms() {
        assert!(number_of_payments(Decimal::ZERO).is_err());
        assert!(number_of_payments(dec!(-1)).is_err());
        // 0.04 years = 0.48 months
        assert!(number_of_payments(dec!(0.04)).is_err());
    }

    #[test]
    fn test_zero_rate_payment() {
        let payment = compute_monthly_payment(dec!(1200), Decimal::ZERO, dec!(10)).unwrap();
        assert_eq!(payment, dec!(10));
    }

    #[test]
    fn test_standard_mortgage_payment() {
        // 35,000 at 3.5% over 30 years ≈ 157.17
        let payment = compute_monthly_payment(dec!(35000), dec!(3.5), dec!(30)).unwrap();
        assert!(
            (payment - dec!(157.17)).abs() < dec!(0.1),
            "Expected ~157.17, got {payment}"
        );
    }

    #[test]
    fn test_one_year_six_percent_payment() {
        // 12,000 at 6% over 12 months ≈ 1032.80
        let payment = compute_monthly_payment(dec!(12000), dec!(6), dec!(1)).unwrap();
        assert!((payment - dec!(1032.80)).abs() < dec!(0.01));
    }

    #[test]
    fn test_zero_principal_payment_is_zero() {
        let payment = compute_monthly_payment(Decimal::ZERO, dec!(5), dec!(10)).unwrap();
        assert_eq!(payment, Decimal::ZERO);
    }

    #[test]
    fn test_negative_inputs_rejected() {
        assert!(matches!(
            compute_monthly_payment(dec!(-1), dec!(5), dec!(10)),
            Err(LoanCalcError::InvalidInput { .. })
        ));
        assert!(matches!(
            compute_monthly_payment(dec!(1000), dec!(-5), dec!(10)),
            Err(LoanCalcError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_zero_term_rejected() {
        let err = compute_monthly_payment(dec!(1000), dec!(5), Decimal::ZERO).unwrap_err();
        match err {
            LoanCalcError::InvalidInput { field, .. } => assert_eq!(field, "term_years"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_term_beyond_decimal_range_is_invalid_input() {
        // 1e28 years * 12 does not fit in a Decimal
        let err = number_of_payments(Decimal::from_scientific("1e28").unwrap()).unwrap_err();
        match err {
            LoanCalcError::InvalidInput { field, .. } => assert_eq!(field, "term_years"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
        assert!(number_of_payments(Decimal::MAX).is_err());
    }

    #[test]
    fn test_payment_numerator_overflow_reported() {
        let err = compute_monthly_payment(Decimal::MAX, dec!(1200), dec!(1)).unwrap_err();
        assert!(matches!(err, LoanCalcError::FinancialImpossibility(_)));
    }

    #[test]
    fn test_overflowing_factor_reported() {
        // 100,000% a year compounded over 50 years
        let err = compute_monthly_payment(dec!(1000), dec!(100000), dec!(50)).unwrap_err();
        assert!(matches!(err, LoanCalcError::FinancialImpossibility(_)));
    }
}
