use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::LoanCalcError;
use crate::types::Percent;
use crate::LoanCalcResult;

/// Three-tier status of a ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskTier {
    Good,
    Caution,
    Risk,
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskTier::Good => "Good",
            RiskTier::Caution => "Caution",
            RiskTier::Risk => "Risk",
        };
        write!(f, "{s}")
    }
}

/// Upper bounds (inclusive) of the `Good` and `Caution` tiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierBands {
    pub good_max: Percent,
    pub caution_max: Percent,
}

impl TierBands {
    pub const fn new(good_max: Percent, caution_max: Percent) -> Self {
        TierBands {
            good_max,
            caution_max,
        }
    }

    pub fn classify(&self, value: Percent) -> RiskTier {
        classify(value, self.good_max, self.caution_max)
    }

    fn validate(&self, field: &str) -> LoanCalcResult<()> {
        if self.good_max < Decimal::ZERO {
            return Err(LoanCalcError::InvalidInput {
                field: format!("{field}.good_max"),
                reason: "Threshold cannot be negative".into(),
            });
        }
        if self.good_max > self.caution_max {
            return Err(LoanCalcError::InvalidInput {
                field: field.into(),
                reason: format!(
                    "good_max ({}) must not exceed caution_max ({})",
                    self.good_max, self.caution_max
                ),
            });
        }
        Ok(())
    }
}

/// LTV and DSR bands used for classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskThresholds {
    pub ltv: TierBands,
    pub dsr: TierBands,
}

impl RiskThresholds {
    /// LTV: good up to 70%, caution up to 80%.
    pub const DEFAULT_LTV: TierBands = TierBands::new(dec!(70), dec!(80));
    /// DSR: good up to 40%, caution up to 60%.
    pub const DEFAULT_DSR: TierBands = TierBands::new(dec!(40), dec!(60));

    pub fn validate(&self) -> LoanCalcResult<()> {
        self.ltv.validate("thresholds.ltv")?;
        self.dsr.validate("thresholds.dsr")
    }
}

impl Default for RiskThresholds {
    fn default() -> Self {
        RiskThresholds {
            ltv: Self::DEFAULT_LTV,
            dsr: Self::DEFAULT_DSR,
        }
    }
}

/// `Good` up to and including `good_max`, `Caution` up to and including
/// `caution_max`, `Risk` above.
pub fn classify(value: Percent, good_max: Percent, caution_max: Percent) -> RiskTier {
    if value <= good_max {
        RiskTier::Good
    } else if value <= caution_max {
        RiskTier::Caution
    } else {
        RiskTier::Risk
    }
}
