pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "amortization")]
pub mod amortization;

#[cfg(feature = "risk")]
pub mod risk;

#[cfg(all(feature = "amortization", feature = "risk"))]
pub mod evaluation;

pub use error::LoanCalcError;
pub use types::*;

/// Standard result type for all loancalc operations
pub type LoanCalcResult<T> = Result<T, LoanCalcError>;
