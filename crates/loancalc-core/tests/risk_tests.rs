use loancalc_core::risk::{
    assess_risk, classify, compute_dsr, compute_ltv, RiskInput, RiskThresholds, RiskTier,
    TierBands,
};
use loancalc_core::LoanCalcError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// LTV
// ===========================================================================

#[test]
fn test_ltv_exactly_at_good_threshold() {
    let ltv = compute_ltv(dec!(50000), dec!(35000));
    assert_eq!(ltv, dec!(70));
    assert_eq!(classify(ltv, dec!(70), dec!(80)), RiskTier::Good);
}

#[test]
fn test_ltv_one_unit_over_threshold_is_caution() {
    let ltv = compute_ltv(dec!(50000), dec!(35001));
    assert_eq!(classify(ltv, dec!(70), dec!(80)), RiskTier::Caution);
}

#[test]
fn test_ltv_tiers_across_range() {
    let bands = RiskThresholds::DEFAULT_LTV;
    let cases = [
        (dec!(0), RiskTier::Good),
        (dec!(30000), RiskTier::Good),
        (dec!(40000), RiskTier::Caution),
        (dec!(40001), RiskTier::Risk),
        (dec!(75000), RiskTier::Risk),
    ];
    for (loan, expected) in cases {
        assert_eq!(bands.classify(compute_ltv(dec!(50000), loan)), expected, "loan {loan}");
    }
}

// ===========================================================================
// DSR
// ===========================================================================

#[test]
fn test_dsr_known_answer() {
    // (300 + 200) / (12000 / 12) * 100 = 50
    let dsr = compute_dsr(dec!(300), dec!(200), dec!(12000));
    assert_eq!(dsr, dec!(50));
    assert_eq!(RiskThresholds::DEFAULT_DSR.classify(dsr), RiskTier::Caution);
}

#[test]
fn test_dsr_above_sixty_is_risk() {
    let dsr = compute_dsr(dec!(700), Decimal::ZERO, dec!(12000));
    assert_eq!(dsr, dec!(70));
    assert_eq!(RiskThresholds::DEFAULT_DSR.classify(dsr), RiskTier::Risk);
}

#[test]
fn test_ratios_total_on_zero_inputs() {
    assert_eq!(compute_ltv(Decimal::ZERO, Decimal::ZERO), Decimal::ZERO);
    assert_eq!(compute_dsr(Decimal::ZERO, Decimal::ZERO, Decimal::ZERO), Decimal::ZERO);
}

// ===========================================================================
// assess_risk
// ===========================================================================

#[test]
fn test_assess_risk_from_json_with_thresholds() {
    let json = r#"{
        "property_value": "400000",
        "loan_amount": "300000",
        "monthly_payment": "1500",
        "existing_monthly_debt": "500",
        "annual_income": "60000",
        "thresholds": {
            "ltv": { "good_max": "75", "caution_max": "85" },
            "dsr": { "good_max": "35", "caution_max": "50" }
        }
    }"#;
    let input: RiskInput = serde_json::from_str(json).unwrap();
    let result = assess_risk(&input).unwrap();
    let snap = &result.result;
    assert_eq!(snap.ltv_percent, dec!(75));
    assert_eq!(snap.ltv_status, RiskTier::Good);
    assert_eq!(snap.dsr_percent, dec!(40));
    assert_eq!(snap.dsr_status, RiskTier::Caution);
    assert_eq!(snap.overall(), RiskTier::Caution);
}

#[test]
fn test_assess_risk_warns_on_missing_income() {
    let input = RiskInput {
        property_value: dec!(100000),
        loan_amount: dec!(50000),
        monthly_payment: dec!(400),
        existing_monthly_debt: Decimal::ZERO,
        annual_income: Decimal::ZERO,
        thresholds: None,
    };
    let result = assess_risk(&input).unwrap();
    assert_eq!(result.result.dsr_percent, Decimal::ZERO);
    assert_eq!(result.result.dsr_status, RiskTier::Good);
    assert!(result.warnings.iter().any(|w| w.contains("income is zero")));
}

#[test]
fn test_assess_risk_rejects_inverted_bands() {
    let input = RiskInput {
        property_value: dec!(100000),
        loan_amount: dec!(50000),
        monthly_payment: dec!(400),
        existing_monthly_debt: Decimal::ZERO,
        annual_income: dec!(50000),
        thresholds: Some(RiskThresholds {
            ltv: RiskThresholds::DEFAULT_LTV,
            dsr: TierBands::new(dec!(60), dec!(40)),
        }),
    };
    assert!(matches!(
        assess_risk(&input),
        Err(LoanCalcError::InvalidInput { .. })
    ));
}

#[test]
fn test_tier_serialises_by_name() {
    assert_eq!(serde_json::to_string(&RiskTier::Caution).unwrap(), "\"Caution\"");
}
