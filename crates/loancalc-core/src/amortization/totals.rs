use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::schedule::ScheduleKind;
use crate::time_value::{
    annuity_payment, monthly_rate, number_of_payments, overflow, validate_loan_terms,
};
use crate::types::{Money, Percent, Years};
use crate::LoanCalcResult;

/// Lifetime interest and repayment over the full term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepaymentTotals {
    pub total_interest: Money,
    pub total_repaid: Money,
}

impl RepaymentTotals {
    fn zero() -> Self {
        RepaymentTotals {
            total_interest: Decimal::ZERO,
            total_repaid: Decimal::ZERO,
        }
    }
}

/// Closed-form lifetime totals for a repayment convention.
///
/// These cover all `n` payments and are independent of the 12-month
/// schedule preview.
pub fn repayment_totals(
    principal: Money,
    annual_rate_percent: Percent,
    term_years: Years,
    kind: ScheduleKind,
) -> LoanCalcResult<RepaymentTotals> {
    if kind.is_none() {
        return Ok(RepaymentTotals::zero());
    }

    validate_loan_terms(principal, annual_rate_percent)?;
    let n = number_of_payments(term_years)?;
    let r = monthly_rate(annual_rate_percent);
    let n_dec = Decimal::from(n);

    let totals = match kind {
        ScheduleKind::EqualPayment => {
            let total_repaid = annuity_payment(principal, r, n)?
                .checked_mul(n_dec)
                .ok_or_else(|| overflow("total repaid"))?;
            RepaymentTotals {
                total_interest: total_repaid - principal,
                total_repaid,
            }
        }
        ScheduleKind::EqualPrincipal => {
            // Interest falls linearly from P*r to P*r/n
            let total_interest = principal
                .checked_mul(r)
                .and_then(|first| first.checked_mul(n_dec + Decimal::ONE))
                .map(|sum| sum / dec!(2))
                .ok_or_else(|| overflow("total interest"))?;
            with_principal(principal, total_interest)?
        }
        ScheduleKind::InterestOnly => {
            let total_interest = principal
                .checked_mul(r)
                .and_then(|monthly| monthly.checked_mul(n_dec))
                .ok_or_else(|| overflow("total interest"))?;
            with_principal(principal, total_interest)?
        }
        ScheduleKind::None => RepaymentTotals::zero(),
    };

    Ok(totals)
}

fn with_principal(principal: Money, total_interest: Money) -> LoanCalcResult<RepaymentTotals> {
    let total_repaid = principal
        .checked_add(total_interest)
        .ok_or_else(|| overflow("total repaid"))?;
    Ok(RepaymentTotals {
        total_interest,
        total_repaid,
    })
}

/// Lifetime interest paid under `kind`.
pub fn total_interest(
    principal: Money,
    annual_rate_percent: Percent,
    term_years: Years,
    kind: ScheduleKind,
) -> LoanCalcResult<Money> {
    Ok(repayment_totals(principal, annual_rate_percent, term_years, kind)?.total_interest)
}

/// Lifetime principal plus interest repaid under `kind`.
pub fn total_repaid(
    principal: Money,
    annual_rate_percent: Percent,
    term_years: Years,
    kind: ScheduleKind,
) -> LoanCalcResult<Money> {
    Ok(repayment_totals(principal, annual_rate_percent, term_years, kind)?.total_repaid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoanCalcError;
    use rust_decimal_macros::dec;

    #[test]
    fn test_interest_only_totals() {
        let t = repayment_totals(dec!(35000), dec!(3.5), dec!(30), ScheduleKind::InterestOnly)
            .unwrap();
        // 35000 * 0.035 / 12 * 360 = 36750
        assert!((t.total_interest - dec!(36750)).abs() < dec!(0.000001));
        assert!((t.total_repaid - dec!(71750)).abs() < dec!(0.000001));
    }

    #[test]
    fn test_equal_principal_totals() {
        // 12000 * 0.005 * 13 / 2 = 390
        let t = repayment_totals(dec!(12000), dec!(6), dec!(1), ScheduleKind::EqualPrincipal)
            .unwrap();
        assert_eq!(t.total_interest, dec!(390));
        assert_eq!(t.total_repaid, dec!(12390));
    }

    #[test]
    fn test_equal_payment_totals() {
        // 1032.7972 * 12 - 12000 ≈ 393.57
        let t = repayment_totals(dec!(12000), dec!(6), dec!(1), ScheduleKind::EqualPayment)
            .unwrap();
        assert!((t.total_interest - dec!(393.57)).abs() < dec!(0.01));
        assert_eq!(t.total_repaid - t.total_interest, dec!(12000));
    }

    #[test]
    fn test_totals_cover_full_term_not_preview() {
        // 30-year interest-only: 360 months of interest, not 12
        let interest = total_interest(dec!(12000), dec!(6), dec!(30), ScheduleKind::InterestOnly)
            .unwrap();
        assert_eq!(interest, dec!(21600));
    }

    #[test]
    fn test_zero_rate_totals() {
        for kind in [
            ScheduleKind::EqualPayment,
            ScheduleKind::EqualPrincipal,
            ScheduleKind::InterestOnly,
        ] {
            let t = repayment_totals(dec!(1200), Decimal::ZERO, dec!(10), kind).unwrap();
            assert_eq!(t.total_interest, Decimal::ZERO, "{kind}");
            assert_eq!(t.total_repaid, dec!(1200), "{kind}");
        }
    }

    #[test]
    fn test_interest_only_overflow_reported() {
        // 1e27 at 100% over 100 years: 1e27 / 12 * 1200 months
        let principal = Decimal::from_scientific("1e27").unwrap();
        let err = repayment_totals(principal, dec!(100), dec!(100), ScheduleKind::InterestOnly)
            .unwrap_err();
        assert!(matches!(err, LoanCalcError::FinancialImpossibility(_)));
    }

    #[test]
    fn test_equal_principal_overflow_reported() {
        let err = repayment_totals(Decimal::MAX, dec!(12), dec!(10), ScheduleKind::EqualPrincipal)
            .unwrap_err();
        assert!(matches!(err, LoanCalcError::FinancialImpossibility(_)));
    }

    #[test]
    fn test_none_totals_are_zero() {
        let repaid = total_repaid(dec!(1000), dec!(5), dec!(10), ScheduleKind::None).unwrap();
        assert_eq!(repaid, Decimal::ZERO);
    }
}
