use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LoanCalcError;
use crate::time_value::{
    annuity_payment, monthly_rate, number_of_payments, overflow, validate_loan_terms,
};
use crate::types::{Money, Percent, Years};
use crate::LoanCalcResult;

/// Number of months shown in a schedule preview, whatever the term.
pub const PREVIEW_MONTHS: u32 = 12;

/// Repayment convention for a schedule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScheduleKind {
    /// Fixed total payment; the interest/principal mix shifts over time.
    #[serde(alias = "equal_payment")]
    EqualPayment,
    /// Fixed principal portion; the total payment declines over time.
    #[serde(alias = "equal_principal")]
    EqualPrincipal,
    /// Interest every month, the whole principal in the final month.
    #[serde(alias = "interest_only")]
    InterestOnly,
    /// No schedule requested.
    #[default]
    None,
}

impl ScheduleKind {
    pub fn is_none(&self) -> bool {
        matches!(self, ScheduleKind::None)
    }
}

impl fmt::Display for ScheduleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ScheduleKind::EqualPayment => "equal-payment",
            ScheduleKind::EqualPrincipal => "equal-principal",
            ScheduleKind::InterestOnly => "interest-only",
            ScheduleKind::None => "none",
        };
        write!(f, "{s}")
    }
}

impl FromStr for ScheduleKind {
    type Err = LoanCalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "equal-payment" => Ok(ScheduleKind::EqualPayment),
            "equal-principal" => Ok(ScheduleKind::EqualPrincipal),
            "interest-only" => Ok(ScheduleKind::InterestOnly),
            "none" | "" => Ok(ScheduleKind::None),
            other => Err(LoanCalcError::InvalidInput {
                field: "schedule_kind".into(),
                reason: format!(
                    "Unknown repayment type '{other}' (expected equal-payment, equal-principal, interest-only or none)"
                ),
            }),
        }
    }
}

/// One month of a repayment schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub month: u32,
    pub payment: Money,
    pub principal: Money,
    pub interest: Money,
    /// Outstanding balance after this month's payment, never below zero.
    pub balance: Money,
}

/// Build the first-year preview of a repayment schedule.
///
/// Rows cover months `1..=min(12, n)`. `ScheduleKind::None` yields an empty
/// schedule without looking at the loan terms.
pub fn build_schedule(
    principal: Money,
    annual_rate_percent: Percent,
    term_years: Years,
    kind: ScheduleKind,
) -> LoanCalcResult<Vec<ScheduleRow>> {
    if kind.is_none() {
        return Ok(Vec::new());
    }

    validate_loan_terms(principal, annual_rate_percent)?;
    let n = number_of_payments(term_years)?;
    let r = monthly_rate(annual_rate_percent);
    let months = n.min(PREVIEW_MONTHS);

    tracing::debug!(%kind, payments = n, preview = months, "building schedule");

    let mut rows = Vec::with_capacity(months as usize);

    match kind {
        ScheduleKind::EqualPayment => {
            let payment = annuity_payment(principal, r, n)?;
            let mut balance = principal;
            for month in 1..=months {
                let interest = balance * r;
                let principal_paid = payment - interest;
                balance = (balance - principal_paid).max(Decimal::ZERO);
                rows.push(ScheduleRow {
                    month,
                    payment,
                    principal: principal_paid,
                    interest,
                    balance,
                });
            }
        }
        ScheduleKind::EqualPrincipal => {
            let principal_paid = principal / Decimal::from(n);
            let mut balance = principal;
            for month in 1..=months {
                let interest = balance
                    .checked_mul(r)
                    .ok_or_else(|| overflow("monthly interest"))?;
                let payment = principal_paid
                    .checked_add(interest)
                    .ok_or_else(|| overflow("monthly payment"))?;
                balance = (balance - principal_paid).max(Decimal::ZERO);
                rows.push(ScheduleRow {
                    month,
                    payment,
                    principal: principal_paid,
                    interest,
                    balance,
                });
            }
        }
        ScheduleKind::InterestOnly => {
            let interest = principal
                .checked_mul(r)
                .ok_or_else(|| overflow("monthly interest"))?;
            for month in 1..=months {
                let row = if month == n {
                    ScheduleRow {
                        month,
                        payment: principal
                            .checked_add(interest)
                            .ok_or_else(|| overflow("final payment"))?,
                        principal,
                        interest,
                        balance: Decimal::ZERO,
                    }
                } else {
                    ScheduleRow {
                        month,
                        payment: interest,
                        principal: Decimal::ZERO,
                        interest,
                        balance: principal,
                    }
                };
                rows.push(row);
            }
        }
        ScheduleKind::None => {}
    }

    Ok(rows)
}
