pub mod amortization;
pub mod evaluation;
pub mod risk;

use loancalc_core::risk::{RiskThresholds, TierBands};
use rust_decimal::Decimal;

/// Threshold overrides shared by the `evaluate` and `risk` commands.
#[derive(clap::Args, Debug, Default)]
pub struct ThresholdArgs {
    /// Highest LTV (%) still rated Good [default: 70]
    #[arg(long)]
    pub ltv_good_max: Option<Decimal>,

    /// Highest LTV (%) still rated Caution [default: 80]
    #[arg(long)]
    pub ltv_caution_max: Option<Decimal>,

    /// Highest DSR (%) still rated Good [default: 40]
    #[arg(long)]
    pub dsr_good_max: Option<Decimal>,

    /// Highest DSR (%) still rated Caution [default: 60]
    #[arg(long)]
    pub dsr_caution_max: Option<Decimal>,
}

impl ThresholdArgs {
    /// None when no flag was given, so the engine defaults apply.
    pub fn to_thresholds(&self) -> Option<RiskThresholds> {
        if self.ltv_good_max.is_none()
            && self.ltv_caution_max.is_none()
            && self.dsr_good_max.is_none()
            && self.dsr_caution_max.is_none()
        {
            return None;
        }
        let ltv = RiskThresholds::DEFAULT_LTV;
        let dsr = RiskThresholds::DEFAULT_DSR;
        Some(RiskThresholds {
            ltv: TierBands::new(
                self.ltv_good_max.unwrap_or(ltv.good_max),
                self.ltv_caution_max.unwrap_or(ltv.caution_max),
            ),
            dsr: TierBands::new(
                self.dsr_good_max.unwrap_or(dsr.good_max),
                self.dsr_caution_max.unwrap_or(dsr.caution_max),
            ),
        })
    }
}
