//! Export / import and file persistence of complete firm records.

use approx::assert_relative_eq;
use mifidpru_core::profile::{
    CounterpartyType, Exposure, FirmActivity, FirmProfile, Harm, HarmCategory, Impact, StressScenario,
};
use mifidpru_engine::recompute_derived;
use mifidpru_store::{FirmStore, JsonFileStore, StoreError};

fn sample_profile() -> FirmProfile {
    let mut p = FirmProfile::default();
    p.classification.aum = 500_000_000.0;
    p.classification.cmh = 100_000_000.0;
    p.k_factors.cmh_segregated = 80_000_000.0;
    p.k_factors.cmh_non_segregated = 20_000_000.0;
    p.k_factors.tcd_risk_factor = 1.5;
    p.k_factors.tcd_cva = 1.2;
    p.overheads.total_expenditure = 8_000_000.0;
    p.overheads.discretionary_bonuses = 1_000_000.0;
    p.firm_activity = FirmActivity::HoldingClientMoney;
    p.actual_own_funds = 5_000_000.0;
    p.actual_liquid_assets = 1_500_000.0;
    p.identified_harms = vec![
        Harm::new("Loss of client assets", HarmCategory::Client, 2, 4)
            .with_id("harm_1")
            .with_additional_own_funds(250_000.0)
            .with_additional_liquid_assets(100_000.0),
    ];
    p.stress_scenarios = vec![StressScenario::new("Cyber", "Ransomware outage")
        .with_id("scenario_cyber")
        .with_impact(Impact::new("cyber_attack", 0.2))
        .with_impact(Impact::new("revenue", -0.15))];
    p.exposures = vec![
        Exposure::new("Bank A", CounterpartyType::Institution, 3_000_000.0).with_collateral(500_000.0),
    ];
    recompute_derived(&p)
}

fn populated_store() -> (FirmStore, mifidpru_core::types::FirmId) {
    let mut store = FirmStore::new();
    let id = store
        .create_firm("Sample Investment Firm Ltd", sample_profile())
        .unwrap();
    store.save_calculation(&id, "Year end 2024").unwrap();
    (store, id)
}

#[test]
fn test_export_import_reexport_is_byte_identical() {
    let (store, id) = populated_store();
    let exported = store.export_firm(&id).unwrap();

    let mut other = FirmStore::new();
    let outcome = other.import_firm(&exported).unwrap();
    assert!(!outcome.replaced);
    assert!(outcome.corrections.is_empty());

    let reexported = other.export_firm(&id).unwrap();
    assert_eq!(reexported, exported);
    assert_eq!(other.get(&id), store.get(&id));
}

#[test]
fn test_import_preserves_unmapped_factor_and_results() {
    let (store, id) = populated_store();
    let json = store.export_firm(&id).unwrap();
    assert!(json.contains("\"cyber_attack\""));

    let mut other = FirmStore::new();
    other.import_firm(&json).unwrap();
    let firm = other.get(&id).unwrap();
    let calc = firm.latest_calculation().unwrap();
    assert_relative_eq!(
        calc.results.total_own_funds_requirement(),
        store.get(&id).unwrap().calculations[0]
            .results
            .total_own_funds_requirement()
    );
    assert_eq!(calc.input_data.stress_scenarios[0].impacts.len(), 2);
}

#[test]
fn test_import_of_malformed_json_leaves_store_untouched() {
    let (mut store, _) = populated_store();
    let before = store.clone();

    let err = store.import_firm("{\"id\": \"firm_x\", ").unwrap_err();
    assert!(matches!(err, StoreError::InvalidJson(_)));

    let err = store.import_firm(r#"{"id": "firm_x", "name": "X"}"#).unwrap_err();
    assert!(matches!(err, StoreError::Corrupt(_)));
    assert!(err.to_string().contains("profile"));

    let err = store
        .import_firm(r#"{"id": "firm_x", "name": "", "profile": {}}"#)
        .unwrap_err();
    assert!(matches!(err, StoreError::MissingField("name")));

    assert_eq!(store, before);
}

#[test]
fn test_import_sanitises_out_of_range_values() {
    let json = r#"{
        "id": "firm_77",
        "name": "Edge Case Ltd",
        "createdDate": "2025-03-15T10:30:00Z",
        "modifiedDate": "2025-03-15T14:45:00Z",
        "profile": {
            "windDownPeriod": 0,
            "classification": {"aum": -100},
            "identifiedHarms": [
                {"id": "h1", "description": "x", "category": "client", "likelihood": 9, "impact": 0}
            ]
        }
    }"#;
    let mut store = FirmStore::new();
    let outcome = store.import_firm(json).unwrap();
    let fields: Vec<&str> = outcome.corrections.iter().map(|c| c.field.as_str()).collect();
    assert!(fields.contains(&"windDownPeriod"));
    assert!(fields.contains(&"classification.aum"));
    assert!(fields.contains(&"identifiedHarms[0].likelihood"));
    assert!(fields.contains(&"identifiedHarms[0].impact"));

    let firm = store.get(&outcome.firm_id).unwrap();
    assert_eq!(firm.profile.wind_down_period, 1);
    assert_eq!(firm.profile.identified_harms[0].likelihood, 5);
    assert_eq!(firm.profile.identified_harms[0].impact, 1);

    // sanitised import is stable under a second export/import
    let exported = store.export_firm(&outcome.firm_id).unwrap();
    let second = store.import_firm(&exported).unwrap();
    assert!(second.replaced);
    assert!(second.corrections.is_empty());
    assert_eq!(store.export_firm(&outcome.firm_id).unwrap(), exported);
}

#[test]
fn test_file_backend_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let backend = JsonFileStore::new(dir.path().join("firms.json"));
    let (store, id) = populated_store();

    backend.save(&store).unwrap();
    let loaded = backend.load().unwrap();
    assert_eq!(loaded, store);
    assert_eq!(loaded.current().map(|f| &f.id), Some(&id));
}

#[test]
fn test_export_file_helpers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("firm.json");
    let (store, id) = populated_store();
    let json = store.export_firm(&id).unwrap();

    mifidpru_store::write_export(&path, &json).unwrap();
    let read = mifidpru_store::read_export(&path).unwrap();
    assert_eq!(read, json);
}
