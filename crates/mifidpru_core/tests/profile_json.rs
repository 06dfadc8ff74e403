//! Persistence contract of the firm profile.

use mifidpru_core::profile::validation::sanitise;
use mifidpru_core::profile::{
    CounterpartyType, FirmActivity, FirmProfile, HarmCategory, RiskRating, StressFactor,
};

const SAMPLE: &str = r#"{
  "classification": { "aum": 500000000, "cmh": 100000000, "annualRevenue": 15000000 },
  "kFactors": { "cmhSegregated": 80000000, "tcdRiskFactor": 1.5, "tcdCVA": 1.2, "kconValue": 1000000 },
  "overheads": { "totalExpenditure": 8000000, "feesPaidToCCPs": 150000 },
  "firmActivity": "holdingClientMoney",
  "identifiedHarms": [
    {
      "id": "harm_1",
      "description": "Loss of client assets due to system failure",
      "category": "client",
      "subcategory": "client_assets",
      "likelihood": 2,
      "impact": 4,
      "controls": "Robust reconciliation processes",
      "additionalOwnFunds": 250000,
      "additionalLiquidAssets": 100000
    }
  ],
  "stressScenarios": [
    {
      "id": "scenario_1",
      "name": "Market Downturn",
      "impacts": [
        { "factor": "aum", "description": "Assets Under Management", "change": -0.3 },
        { "factor": "cyber_attack", "description": "Cyber", "change": 0.4 }
      ],
      "additionalOwnFunds": 500000
    }
  ],
  "exposures": [
    { "id": "exposure_1", "counterpartyName": "Bank A", "counterpartyType": "institution",
      "exposureValue": 300000, "collateral": 50000 }
  ]
}"#;

#[test]
fn test_sample_parses_with_defaults() {
    let profile: FirmProfile = serde_json::from_str(SAMPLE).unwrap();

    assert_eq!(profile.classification.aum, 500_000_000.0);
    assert_eq!(profile.classification.coh_cash, 0.0);
    assert_eq!(profile.k_factors.tcd_cva, 1.2);
    assert_eq!(profile.overheads.fees_paid_to_ccps, 150_000.0);
    assert_eq!(profile.wind_down_period, 3);
    assert_eq!(profile.firm_activity, FirmActivity::HoldingClientMoney);

    let harm = &profile.identified_harms[0];
    assert_eq!(harm.category, HarmCategory::Client);
    assert_eq!(harm.risk_score(), 8);
    assert_eq!(harm.rating(), RiskRating::Medium);
    assert!(harm.is_material());

    let scenario = &profile.stress_scenarios[0];
    assert_eq!(scenario.impacts[0].factor, StressFactor::Aum);
    assert_eq!(
        scenario.impacts[1].factor,
        StressFactor::Other("cyber_attack".to_string())
    );
    assert_eq!(scenario.additional_liquid_assets, 0.0);

    assert_eq!(profile.exposures[0].counterparty_type, CounterpartyType::Institution);
    assert_eq!(profile.exposures[0].net_exposure(), 250_000.0);
}

#[test]
fn test_round_trip_is_stable() {
    let profile: FirmProfile = serde_json::from_str(SAMPLE).unwrap();
    let first = serde_json::to_string_pretty(&profile).unwrap();
    let reparsed: FirmProfile = serde_json::from_str(&first).unwrap();
    let second = serde_json::to_string_pretty(&reparsed).unwrap();

    assert_eq!(profile, reparsed);
    assert_eq!(first, second);
    assert!(first.contains("\"cyber_attack\""));
    assert!(first.contains("\"tcdCVA\""));
}

#[test]
fn test_alternate_field_spellings_accepted() {
    let profile: FirmProfile =
        serde_json::from_str(r#"{ "kFactors": { "tcdCva": 2.0 }, "overheads": { "feesPaidToCcps": 5 } }"#)
            .unwrap();
    assert_eq!(profile.k_factors.tcd_cva, 2.0);
    assert_eq!(profile.overheads.fees_paid_to_ccps, 5.0);
}

#[test]
fn test_out_of_range_scores_are_sanitised_after_parse() {
    let json = r#"{ "identifiedHarms": [
        { "id": "h", "description": "d", "likelihood": 7, "impact": 0 }
    ], "windDownPeriod": 0 }"#;
    let profile: FirmProfile = serde_json::from_str(json).unwrap();
    let (clean, corrections) = sanitise(&profile);

    assert_eq!(clean.identified_harms[0].likelihood, 5);
    assert_eq!(clean.identified_harms[0].impact, 1);
    assert_eq!(clean.wind_down_period, 1);
    assert_eq!(corrections.len(), 3);
}

#[test]
fn test_unknown_enum_value_is_rejected() {
    let result: Result<FirmProfile, _> = serde_json::from_str(r#"{ "firmActivity": "broker" }"#);
    assert!(result.is_err());
}
