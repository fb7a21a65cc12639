use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%), e.g. the monthly interest rate.
pub type Rate = Decimal;

/// Figures expressed as percentages (3.5 = 3.5%): annual rates, LTV, DSR.
pub type Percent = Decimal;

/// Year fractions or counts
pub type Years = Decimal;

/// Loan parameters as collected from the caller.
///
/// Every field is expected to be non-negative; free-text form values are
/// normalised to zero before they get here (see `evaluation::boundary`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanInput {
    /// Value of the collateral property.
    pub property_value: Money,
    /// Amount borrowed.
    pub loan_amount: Money,
    /// Gross annual income of the borrower.
    pub annual_income: Money,
    /// Monthly repayments already owed on other debt.
    #[serde(default)]
    pub existing_monthly_debt: Money,
    /// Nominal annual interest rate in percent (3.5 = 3.5%).
    pub annual_rate_percent: Percent,
    /// Loan term in years; may be fractional.
    pub term_years: Years,
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
