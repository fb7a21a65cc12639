//! Monthly amortisation under the equal-payment, equal-principal and
//! interest-only conventions.
//!
//! Schedules are a first-year preview (at most 12 rows); lifetime totals are
//! closed-form over the full term and never derived from the preview rows.

pub mod repayment;
pub mod schedule;
pub mod totals;

pub use crate::time_value::{compute_monthly_payment, monthly_rate, number_of_payments};
pub use repayment::{analyze_repayment, RepaymentInput, RepaymentSummary};
pub use schedule::{build_schedule, ScheduleKind, ScheduleRow, PREVIEW_MONTHS};
pub use totals::{repayment_totals, total_interest, total_repaid, RepaymentTotals};
