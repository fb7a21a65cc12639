//! The request/response entry point a loan form calls on every committed
//! change, and the normalisation of its free-text fields.

pub mod boundary;
pub mod loan;

pub use boundary::{parse_amount, RawLoanFields};
pub use loan::{evaluate_loan, LoanEvaluation, LoanEvaluationInput};
