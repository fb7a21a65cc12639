//! Loan-to-value and debt-service ratios with three-tier classification.

pub mod metrics;
pub mod tiers;

pub use metrics::{assess_risk, compute_dsr, compute_ltv, RiskInput, RiskSnapshot};
pub use tiers::{classify, RiskThresholds, RiskTier, TierBands};
