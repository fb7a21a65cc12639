use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::types::LoanInput;

/// Loan form fields as typed by the user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawLoanFields {
    pub property_value: String,
    pub loan_amount: String,
    pub annual_income: String,
    pub existing_monthly_debt: String,
    pub annual_rate_percent: String,
    pub term_years: String,
}

impl RawLoanFields {
    /// Parse every field with [`parse_amount`]; blanks and garbage become 0.
    pub fn normalise(&self) -> LoanInput {
        LoanInput {
            property_value: parse_amount(&self.property_value),
            loan_amount: parse_amount(&self.loan_amount),
            annual_income: parse_amount(&self.annual_income),
            existing_monthly_debt: parse_amount(&self.existing_monthly_debt),
            annual_rate_percent: parse_amount(&self.annual_rate_percent),
            term_years: parse_amount(&self.term_years),
        }
    }
}

/// Lenient number parsing for form input.
///
/// Whitespace is trimmed and grouping commas dropped, then the longest
/// leading decimal literal is read (`"3.5%"` is 3.5, `"12abc"` is 12).
/// Empty or unparseable text is 0.
pub fn parse_amount(raw: &str) -> Decimal {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    let Some(literal) = leading_literal(&cleaned) else {
        return Decimal::ZERO;
    };

    let parsed = if literal.contains(['e', 'E']) {
        Decimal::from_scientific(&literal)
    } else {
        Decimal::from_str(&literal)
    };
    parsed.unwrap_or(Decimal::ZERO)
}

/// `[+-]? digits* (. digits*)? ([eE] [+-]? digits+)?` with at least one
/// mantissa digit, rewritten so `Decimal` accepts it (`.5` → `0.5`,
/// `5.` → `5`).
fn leading_literal(s: &str) -> Option<String> {
    let bytes = s.as_bytes();
    let mut i = 0;
    let mut out = String::new();

    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        if bytes[i] == b'-' {
            out.push('-');
        }
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = &s[int_start..i];

    let mut frac_digits = "";
    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        frac_digits = &s[frac_start..j];
        i = j;
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return None;
    }

    out.push_str(if int_digits.is_empty() { "0" } else { int_digits });
    if !frac_digits.is_empty() {
        out.push('.');
        out.push_str(frac_digits);
    }

    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        let mut exponent = String::from("e");
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            if bytes[j] == b'-' {
                exponent.push('-');
            }
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            exponent.push_str(&s[exp_start..j]);
            out.push_str(&exponent);
        }
    }

    Some(out)
}
