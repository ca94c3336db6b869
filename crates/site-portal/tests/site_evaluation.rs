use serde_json::json;
use site_portal::evaluation::{
    evaluate, FundSettings, RiskFactorKind, RiskLevel, SiteInputs, FALLBACK_MW,
};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1.0,
        "expected about {expected}, got {actual}"
    );
}

#[test]
fn form_bag_with_formatted_numbers_evaluates_end_to_end() {
    let inputs = SiteInputs::from_attribute_bag(json!({
        "askingPrice": "$2,500,000",
        "gasVolume": "14,400",
        "gasPressure": "600",
        "pipelineDiameter": "24",
        "pipelineDistance": "2",
        "terrain": "Easy"
    }));

    let result = evaluate(&inputs, &FundSettings::default());

    assert_eq!(result.estimated_mw, 107.0);
    assert_eq!(result.tap_cost, 500_000.0);
    assert_eq!(result.lateral_cost, 3_000_000.0);
    assert_eq!(result.total_gas_cost, 3_650_000.0);
    assert_eq!(result.risk_score, 0);
    assert_eq!(result.risk_level, RiskLevel::Low);
    assert_eq!((result.timeline.low, result.timeline.high), (6, 8));

    let returns = &result.fund_returns;
    assert_close(returns.gross_exit, 32_100_000.0);
    assert_close(returns.lp_preferred, 1_066_667.0);
    assert_close(returns.remaining, 21_033_333.0);
    assert_close(returns.lp_share, 12_620_000.0);
    assert_close(returns.total_lp, 23_686_667.0);
    assert!((returns.lp_multiple - 2.3687).abs() < 0.001);
}

#[test]
fn troubled_parcel_lands_in_high_risk_band() {
    let inputs = SiteInputs::from_attribute_bag(json!({
        "phaseIStatus": "Flagged",
        "permitType": "psd",
        "politicalClimate": "HOSTILE",
        "zoning": "rezoning needed",
        "communityOpposition": "organized",
        "floodZone": "true"
    }));

    let result = evaluate(&inputs, &FundSettings::default());

    assert_eq!(result.risk_score, 14);
    assert_eq!(result.risk_level, RiskLevel::High);
    assert!(result
        .risk_factors
        .iter()
        .any(|factor| factor.factor == RiskFactorKind::PhaseI && factor.weight == 3));
    assert_eq!(result.timeline.high, 23);
    assert_eq!(result.timeline.low, 21);
    assert_eq!(result.de_risking_costs.air_permit, 75_000.0);
}

#[test]
fn unusable_payload_still_produces_a_full_result() {
    let garbage = evaluate(
        &SiteInputs::from_attribute_bag(json!(["not", "a", "form"])),
        &FundSettings::default(),
    );
    let empty = evaluate(&SiteInputs::default(), &FundSettings::default());

    assert_eq!(garbage, empty);
    assert_eq!(garbage.fund_returns.mw_basis, FALLBACK_MW);
    assert!(garbage.de_risking_costs.total > 0.0);
}

#[test]
fn empty_fund_reports_zero_multiple() {
    let fund = FundSettings {
        fund_size: 0.0,
        ..FundSettings::default()
    };

    let result = evaluate(&SiteInputs::default(), &fund);

    assert_eq!(result.fund_returns.lp_multiple, 0.0);
    assert_eq!(result.fund_returns.lp_first, 0.0);
    assert_eq!(
        result.fund_returns.remaining,
        result.fund_returns.gross_exit
    );
}
