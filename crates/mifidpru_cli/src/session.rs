//! Application context shared by every command.
//!
//! The context owns the firm store and the working copy of the selected
//! firm's profile. The profile and the latest result are held behind
//! `Arc` and only ever replaced whole, so a snapshot handed out earlier
//! keeps describing the state it was taken from.

use crate::config::CliConfig;
use crate::error::{CliError, Result};
use mifidpru_core::profile::validation::sanitise;
use mifidpru_core::profile::{Exposure, FirmProfile, Harm, InputCorrection, StressScenario};
use mifidpru_core::types::{CalculationId, FirmId, HarmId};
use mifidpru_engine::derived::concentration_reference;
use mifidpru_engine::monitor::{ComplianceAlert, MetricsHistory, MetricsSnapshot};
use mifidpru_engine::stress::{default_scenarios, record_scenario};
use mifidpru_engine::{
    assess_concentration, recompute_derived, run_calculation, run_stress_suite, CalculationResult,
    ComplianceMetrics, ComplianceMonitor, ConcentrationResult, RiskRegister, StressPreset,
    StressResult,
};
use mifidpru_store::{Firm, FirmStore, ImportOutcome, JsonFileStore};
use std::sync::Arc;
use tracing::{debug, info};

/// Session state for one CLI invocation.
#[derive(Debug)]
pub struct AppContext {
    config: CliConfig,
    backend: JsonFileStore,
    store: FirmStore,
    profile: Arc<FirmProfile>,
    result: Option<Arc<CalculationResult>>,
    monitor: ComplianceMonitor,
}

impl AppContext {
    /// Opens the store named by the configuration and loads the current firm.
    pub fn open(config: CliConfig) -> Result<Self> {
        let backend = JsonFileStore::new(&config.data_file);
        let store = backend.load()?;
        Ok(Self::with_store(config, backend, store))
    }

    fn with_store(config: CliConfig, backend: JsonFileStore, store: FirmStore) -> Self {
        let profile = store
            .current()
            .map(|firm| firm.profile.clone())
            .unwrap_or_default();
        let monitor = ComplianceMonitor::new(config.monitor_thresholds());
        Self {
            config,
            backend,
            store,
            profile: Arc::new(profile),
            result: None,
            monitor,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &CliConfig {
        &self.config
    }

    /// Swaps in new settings. The data file stays the one the context was
    /// opened with.
    pub fn reconfigured(mut self, config: CliConfig) -> Self {
        self.monitor = ComplianceMonitor::new(config.monitor_thresholds());
        self.config = config;
        self
    }

    /// Firm store.
    pub fn store(&self) -> &FirmStore {
        &self.store
    }

    /// Currently selected firm.
    pub fn firm(&self) -> Result<&Firm> {
        self.store.current().ok_or(CliError::NoFirmSelected)
    }

    fn firm_id(&self) -> Result<FirmId> {
        self.firm().map(|f| f.id.clone())
    }

    /// Snapshot of the working profile.
    pub fn profile(&self) -> Arc<FirmProfile> {
        Arc::clone(&self.profile)
    }

    /// Latest calculation result, if one has been run since the last edit.
    pub fn result(&self) -> Option<Arc<CalculationResult>> {
        self.result.clone()
    }

    /// Creates a firm, selects it and makes its profile the working copy.
    pub fn create_firm(&mut self, name: &str, profile: FirmProfile) -> Result<FirmId> {
        let (clean, corrections) = sanitise(&profile);
        let prepared = recompute_derived(&clean);
        let id = self.store.create_firm(name, prepared.clone())?;
        self.profile = Arc::new(prepared);
        self.result = None;
        info!(firm_id = %id, corrections = corrections.len(), "Firm initialised");
        Ok(id)
    }

    /// Selects a firm and loads its profile.
    pub fn select_firm(&mut self, id: &FirmId) -> Result<()> {
        self.store.select(id)?;
        self.profile = Arc::new(self.firm()?.profile.clone());
        self.result = None;
        Ok(())
    }

    /// Renames the selected firm.
    pub fn rename_firm(&mut self, name: &str) -> Result<()> {
        let id = self.firm_id()?;
        self.store.rename_firm(&id, name)?;
        Ok(())
    }

    /// Deletes a firm. Deleting the selected firm clears the working copy.
    pub fn delete_firm(&mut self, id: &FirmId) -> Result<Firm> {
        let was_current = self.store.current().map(|f| &f.id) == Some(id);
        let removed = self.store.delete_firm(id)?;
        if was_current {
            self.profile = Arc::new(FirmProfile::default());
            self.result = None;
        }
        Ok(removed)
    }

    /// Replaces the working profile.
    ///
    /// The new profile is sanitised and its derived fields recomputed before
    /// it is swapped in, and the stored firm is updated to match. Any
    /// previous result is discarded.
    pub fn set_profile(&mut self, profile: FirmProfile) -> Result<Vec<InputCorrection>> {
        let id = self.firm_id()?;
        let (clean, corrections) = sanitise(&profile);
        let prepared = recompute_derived(&clean);
        self.store.update_profile(&id, prepared.clone())?;
        self.profile = Arc::new(prepared);
        self.result = None;
        debug!(firm_id = %id, corrections = corrections.len(), "Working profile replaced");
        Ok(corrections)
    }

    /// Edits a copy of the working profile and swaps it in.
    pub fn update_profile<F>(&mut self, edit: F) -> Result<Vec<InputCorrection>>
    where
        F: FnOnce(&mut FirmProfile),
    {
        let mut next = (*self.profile).clone();
        edit(&mut next);
        self.set_profile(next)
    }

    /// Risk register over the working profile's harms.
    pub fn register(&self) -> RiskRegister {
        RiskRegister::from_profile(&self.profile)
    }

    /// Adds a harm to the register.
    pub fn add_harm(&mut self, harm: Harm) -> Result<()> {
        let mut register = self.register();
        register.add(harm)?;
        self.set_profile(register.apply_to(&self.profile))?;
        Ok(())
    }

    /// Removes a harm from the register.
    pub fn remove_harm(&mut self, id: &HarmId) -> Result<Harm> {
        let mut register = self.register();
        let removed = register.remove(id)?;
        self.set_profile(register.apply_to(&self.profile))?;
        Ok(removed)
    }

    /// Adds a counterparty exposure.
    pub fn add_exposure(&mut self, exposure: Exposure) -> Result<()> {
        self.update_profile(|p| p.exposures.push(exposure))?;
        Ok(())
    }

    /// Runs a calculation pass over the working profile.
    ///
    /// Harm allowances and K-CON are refreshed for the pass, so a profile
    /// that arrived through import or reopen is never calculated with stale
    /// totals. The stored profile is left as it was.
    pub fn calculate(&mut self) -> Arc<CalculationResult> {
        let result = Arc::new(run_calculation(&recompute_derived(&self.profile)));
        info!(
            classification = %result.firm_classification.as_str(),
            oftr = result.total_own_funds_requirement(),
            latr = result.liquid_assets_threshold_requirement(),
            "Calculation complete"
        );
        self.result = Some(Arc::clone(&result));
        result
    }

    /// The latest result, calculating first if there is none.
    pub fn ensure_result(&mut self) -> Arc<CalculationResult> {
        match &self.result {
            Some(result) => Arc::clone(result),
            None => self.calculate(),
        }
    }

    /// Compliance metrics and alerts for the resources held.
    pub fn monitor(&mut self) -> (ComplianceMetrics, Vec<ComplianceAlert>) {
        let result = self.ensure_result();
        let metrics = self.monitor.assess(
            &result,
            self.profile.actual_own_funds,
            self.profile.actual_liquid_assets,
        );
        let alerts = self.monitor.alerts(&metrics);
        (metrics, alerts)
    }

    /// Monthly history built from the selected firm's saved calculations.
    ///
    /// Calculations saved in the same month collapse to the latest one.
    pub fn history(&self) -> Result<MetricsHistory> {
        let mut history = MetricsHistory::new();
        for calc in &self.firm()?.calculations {
            history.record(MetricsSnapshot::from_result(
                calc.timestamp.format("%Y-%m").to_string(),
                &calc.results,
                calc.input_data.actual_own_funds,
                calc.input_data.actual_liquid_assets,
            ));
        }
        Ok(history)
    }

    /// Concentration assessment against the own funds requirement before K-CON.
    pub fn concentration(&self) -> ConcentrationResult {
        let profile = recompute_derived(&self.profile);
        assess_concentration(&profile.exposures, Some(concentration_reference(&profile)))
    }

    /// Scenarios a stress run would use.
    ///
    /// A preset wins; otherwise the profile's scenarios, or the three
    /// built-in scenarios when the profile has none.
    pub fn stress_scenarios(&self, preset: Option<StressPreset>) -> Vec<StressScenario> {
        match preset {
            Some(preset) => vec![preset.scenario()],
            None if self.profile.stress_scenarios.is_empty() => default_scenarios(),
            None => self.profile.stress_scenarios.clone(),
        }
    }

    /// Runs stress scenarios against the working profile.
    pub fn run_stress(&self, preset: Option<StressPreset>) -> Vec<StressResult> {
        let scenarios = self.stress_scenarios(preset);
        run_stress_suite(&scenarios, &self.profile)
    }

    /// Writes a scenario back into the profile, replacing one with the same id.
    pub fn record_scenario(&mut self, scenario: StressScenario) -> Result<()> {
        let next = record_scenario(&self.profile, scenario);
        self.set_profile(next)?;
        Ok(())
    }

    /// Saves a calculation snapshot for the selected firm.
    pub fn save_calculation(&mut self, name: &str) -> Result<CalculationId> {
        let id = self.firm_id()?;
        Ok(self.store.save_calculation(&id, name)?)
    }

    /// Restores a saved calculation as the working profile.
    pub fn load_calculation(&mut self, calculation_id: &CalculationId) -> Result<Arc<CalculationResult>> {
        let id = self.firm_id()?;
        let (profile, result) = self.store.load_calculation(&id, calculation_id)?;
        let result = Arc::new(result);
        self.profile = Arc::new(profile);
        self.result = Some(Arc::clone(&result));
        Ok(result)
    }

    /// Exports the selected firm as JSON.
    pub fn export_firm(&self) -> Result<String> {
        let id = self.firm_id()?;
        Ok(self.store.export_firm(&id)?)
    }

    /// Imports a firm, selecting it when nothing else is selected or when
    /// it replaces the selected firm.
    pub fn import_firm(&mut self, json: &str) -> Result<ImportOutcome> {
        let current = self.store.current().map(|f| f.id.clone());
        let outcome = self.store.import_firm(json)?;
        if current.is_none() || current.as_ref() == Some(&outcome.firm_id) {
            self.select_firm(&outcome.firm_id)?;
        }
        Ok(outcome)
    }

    /// Writes the store to the configured data file.
    pub fn persist(&self) -> Result<()> {
        self.backend.save(&self.store)?;
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{base_profile, context};
    use super::*;
    use mifidpru_core::profile::{CounterpartyType, HarmCategory};
    use mifidpru_engine::ThresholdLevel;

    #[test]
    fn test_requires_firm() {
        let (_dir, mut ctx) = context();
        assert!(matches!(ctx.firm(), Err(CliError::NoFirmSelected)));
        let err = ctx.set_profile(FirmProfile::default()).unwrap_err();
        assert!(matches!(err, CliError::NoFirmSelected));
    }

    #[test]
    fn test_snapshots_survive_replacement() {
        let (_dir, mut ctx) = context();
        ctx.create_firm("Acme", base_profile()).unwrap();

        let before = ctx.profile();
        let first = ctx.calculate();
        ctx.update_profile(|p| p.overheads.total_expenditure = 8_000_000.0)
            .unwrap();

        assert_eq!(before.overheads.total_expenditure, 4_000_000.0);
        assert_eq!(first.fixed_overhead_requirement.for_amount, 1_000_000.0);
        assert!(ctx.result().is_none());
        assert_eq!(ctx.calculate().fixed_overhead_requirement.for_amount, 2_000_000.0);
    }

    #[test]
    fn test_harm_edits_flow_into_next_pass() {
        let (_dir, mut ctx) = context();
        ctx.create_firm("Acme", base_profile()).unwrap();
        let harm = Harm::new("Outage", HarmCategory::Firm, 3, 3)
            .with_id("h1")
            .with_additional_own_funds(100_000.0);
        ctx.add_harm(harm.clone()).unwrap();
        assert_eq!(ctx.profile().additional_own_funds_for_harm, 100_000.0);

        assert!(matches!(ctx.add_harm(harm), Err(CliError::Engine(_))));

        ctx.remove_harm(&HarmId::new("h1")).unwrap();
        assert_eq!(ctx.profile().additional_own_funds_for_harm, 0.0);
    }

    #[test]
    fn test_calculate_refreshes_imported_harm_totals() {
        let mut stale = base_profile();
        stale.additional_own_funds_for_harm = 999_999.0;
        stale.identified_harms.push(
            Harm::new("Minor", HarmCategory::Firm, 1, 2).with_additional_own_funds(999_999.0),
        );
        let mut source = FirmStore::new();
        let id = source.create_firm("Stale", stale).unwrap();
        let json = source.export_firm(&id).unwrap();

        let (_dir, mut ctx) = context();
        ctx.import_firm(&json).unwrap();
        let result = ctx.calculate();

        assert_eq!(result.own_funds_requirement.additional_own_funds_for_harm, 0.0);
        assert_eq!(result.total_own_funds_requirement(), 1_000_000.0);
        assert_eq!(ctx.profile().additional_own_funds_for_harm, 999_999.0);
        assert_eq!(ctx.export_firm().unwrap(), json);
    }

    #[test]
    fn test_unrelated_edit_keeps_kcon_steady() {
        let (_dir, mut ctx) = context();
        let mut dealer = base_profile();
        dealer.firm_activity = mifidpru_core::profile::FirmActivity::Dealing;
        dealer.overheads.total_expenditure = 2_000_000.0;
        dealer
            .exposures
            .push(Exposure::new("Bank A", CounterpartyType::Institution, 10_000_000.0));
        ctx.create_firm("Dealer", dealer).unwrap();
        let before = ctx.calculate().total_own_funds_requirement();

        ctx.add_harm(Harm::new("Minor", HarmCategory::Firm, 1, 1)).unwrap();
        ctx.update_profile(|p| p.actual_own_funds = 12_000_000.0).unwrap();
        let after = ctx.calculate().total_own_funds_requirement();

        assert_eq!(before, 9_812_500.0);
        assert_eq!(after, before);
        assert_eq!(ctx.concentration().kcon, ctx.profile().k_factors.kcon_value);
    }

    #[test]
    fn test_corrections_are_reported() {
        let (_dir, mut ctx) = context();
        ctx.create_firm("Acme", base_profile()).unwrap();
        let corrections = ctx.update_profile(|p| p.actual_own_funds = -1.0).unwrap();
        assert_eq!(corrections.len(), 1);
        assert_eq!(ctx.profile().actual_own_funds, 0.0);
    }

    #[test]
    fn test_monitor_and_concentration() {
        let (_dir, mut ctx) = context();
        ctx.create_firm("Acme", base_profile()).unwrap();
        ctx.add_exposure(Exposure::new("Bank A", CounterpartyType::Institution, 100_000.0))
            .unwrap();

        let (metrics, alerts) = ctx.monitor();
        assert_eq!(metrics.own_funds.requirement, 1_000_000.0);
        assert_eq!(metrics.own_funds.level, ThresholdLevel::Normal);
        assert!(alerts.iter().all(|a| a.level > ThresholdLevel::Normal));

        let concentration = ctx.concentration();
        assert_eq!(concentration.exposures.len(), 1);
        assert_eq!(concentration.exceeding_exposures, 0);
    }

    #[test]
    fn test_stress_defaults_and_recording() {
        let (_dir, mut ctx) = context();
        ctx.create_firm("Acme", base_profile()).unwrap();
        assert_eq!(ctx.run_stress(None).len(), 3);
        assert_eq!(ctx.run_stress(Some(StressPreset::KeyClientLoss)).len(), 1);

        ctx.record_scenario(StressPreset::MarketDownturn.scenario())
            .unwrap();
        ctx.record_scenario(StressPreset::MarketDownturn.scenario())
            .unwrap();
        assert_eq!(ctx.profile().stress_scenarios.len(), 1);
        assert_eq!(ctx.run_stress(None).len(), 1);
    }

    #[test]
    fn test_persist_and_reopen() {
        let (dir, mut ctx) = context();
        let id = ctx.create_firm("Acme", base_profile()).unwrap();
        let calc = ctx.save_calculation("Q1").unwrap();
        ctx.persist().unwrap();

        let config = CliConfig {
            data_file: dir.path().join("firms.json"),
            ..CliConfig::default()
        };
        let mut reopened = AppContext::open(config).unwrap();
        assert_eq!(reopened.firm().unwrap().id, id);
        assert_eq!(reopened.profile().overheads.total_expenditure, 4_000_000.0);

        let result = reopened.load_calculation(&calc).unwrap();
        assert_eq!(result.fixed_overhead_requirement.for_amount, 1_000_000.0);
    }
}
