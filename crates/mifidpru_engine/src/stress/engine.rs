//! Stress test execution.

use super::mapping::factor_mapping;
use crate::fixed_overhead::calculate_for;
use crate::kfactor::calculate_k_factors;
use crate::liquid_assets::calculate_liquid_assets;
use crate::own_funds::calculate_own_funds;
use mifidpru_core::profile::{FirmProfile, StressScenario};
use mifidpru_core::types::{non_negative, ScenarioId};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Baseline and stressed values of one requirement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricDelta {
    /// Value on the baseline profile.
    pub baseline: f64,
    /// Value on the stressed profile.
    pub stressed: f64,
    /// `(stressed / baseline - 1) * 100`; `None` when the baseline is zero.
    pub percent_change: Option<f64>,
}

impl MetricDelta {
    /// Creates a delta, computing the percentage change.
    pub fn new(baseline: f64, stressed: f64) -> Self {
        let percent_change = if baseline == 0.0 {
            None
        } else {
            let pct = (stressed / baseline - 1.0) * 100.0;
            pct.is_finite().then_some(pct)
        };
        Self {
            baseline,
            stressed,
            percent_change,
        }
    }

    /// Absolute change.
    #[inline]
    pub fn difference(&self) -> f64 {
        self.stressed - self.baseline
    }
}

/// Requirement deltas for a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StressImpacts {
    /// Total K-factor requirement.
    pub kfr: MetricDelta,
    /// Fixed overhead requirement.
    #[serde(rename = "for")]
    pub for_amount: MetricDelta,
    /// Liquid assets threshold requirement.
    pub liquid_assets: MetricDelta,
    /// Own funds threshold requirement.
    pub own_funds: MetricDelta,
}

/// Flat additional resources a scenario calls for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalRequirements {
    /// Additional own funds.
    pub own_funds: f64,
    /// Additional liquid assets.
    pub liquid_assets: f64,
}

/// Outcome of running one scenario. Transient until recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StressResult {
    /// Scenario identifier.
    pub scenario_id: ScenarioId,
    /// Scenario name.
    pub scenario_name: String,
    /// Requirement deltas.
    pub impacts: StressImpacts,
    /// Scenario add-ons.
    pub additional_requirements: AdditionalRequirements,
    /// Factors that had no modelled effect.
    pub unmapped_factors: Vec<String>,
}

impl StressResult {
    /// Stressed own funds requirement plus the scenario add-on.
    pub fn stressed_own_funds_total(&self) -> f64 {
        self.impacts.own_funds.stressed + self.additional_requirements.own_funds
    }

    /// Stressed liquid assets requirement plus the scenario add-on.
    pub fn stressed_liquid_assets_total(&self) -> f64 {
        self.impacts.liquid_assets.stressed + self.additional_requirements.liquid_assets
    }
}

/// Returns a stressed copy of `baseline`.
///
/// Each mapped impact is computed from the baseline value of its target, so
/// a later impact on the same field replaces an earlier one. Stressed values
/// are floored at zero.
pub fn apply_scenario(scenario: &StressScenario, baseline: &FirmProfile) -> FirmProfile {
    let mut stressed = baseline.clone();
    for impact in &scenario.impacts {
        if let Some(mapping) = factor_mapping(&impact.factor) {
            let base = mapping.target.read(baseline);
            let value = non_negative(mapping.stressed_value(base, impact.change));
            mapping.target.write(&mut stressed, value);
        }
    }
    stressed
}

struct Requirements {
    kfr: f64,
    for_amount: f64,
    liquid_assets: f64,
    own_funds: f64,
}

fn requirements(profile: &FirmProfile) -> Requirements {
    let kfr = calculate_k_factors(profile).total_kfr;
    let for_amount = calculate_for(&profile.overheads).for_amount;
    let liquid_assets = calculate_liquid_assets(
        for_amount,
        profile.overheads.total_expenditure,
        profile.wind_down_period,
        profile.additional_liquid_assets_for_harm,
    )
    .liquid_assets_threshold_requirement;
    let own_funds = calculate_own_funds(
        profile.firm_activity,
        for_amount,
        kfr,
        profile.additional_own_funds_for_harm,
    )
    .total_own_funds_requirement;
    Requirements {
        kfr,
        for_amount,
        liquid_assets,
        own_funds,
    }
}

/// Runs a scenario against a baseline profile.
///
/// The baseline is not modified and repeated runs give identical results.
///
/// # Examples
///
/// ```
/// use mifidpru_core::profile::{FirmProfile, Impact, StressScenario};
/// use mifidpru_engine::stress::run_stress_test;
///
/// let mut baseline = FirmProfile::default();
/// baseline.overheads.total_expenditure = 8_000_000.0;
///
/// let scenario = StressScenario::new("Cost spike", "")
///     .with_impact(Impact::new("operational_costs", 0.5));
/// let result = run_stress_test(&scenario, &baseline);
///
/// assert_eq!(result.impacts.for_amount.baseline, 2_000_000.0);
/// assert!((result.impacts.for_amount.stressed - 2_300_000.0).abs() < 1e-6);
/// assert_eq!(result.impacts.kfr.percent_change, None);
/// ```
pub fn run_stress_test(scenario: &StressScenario, baseline: &FirmProfile) -> StressResult {
    let stressed_profile = apply_scenario(scenario, baseline);
    let base = requirements(baseline);
    let stressed = requirements(&stressed_profile);

    let unmapped_factors: Vec<String> = scenario
        .impacts
        .iter()
        .filter(|i| factor_mapping(&i.factor).is_none())
        .map(|i| i.factor.to_string())
        .collect();
    if !unmapped_factors.is_empty() {
        debug!(scenario = %scenario.name, factors = ?unmapped_factors, "Factors without a modelled effect");
    }

    let result = StressResult {
        scenario_id: scenario.id.clone(),
        scenario_name: scenario.name.clone(),
        impacts: StressImpacts {
            kfr: MetricDelta::new(base.kfr, stressed.kfr),
            for_amount: MetricDelta::new(base.for_amount, stressed.for_amount),
            liquid_assets: MetricDelta::new(base.liquid_assets, stressed.liquid_assets),
            own_funds: MetricDelta::new(base.own_funds, stressed.own_funds),
        },
        additional_requirements: AdditionalRequirements {
            own_funds: non_negative(scenario.additional_own_funds),
            liquid_assets: non_negative(scenario.additional_liquid_assets),
        },
        unmapped_factors,
    };

    info!(
        scenario = %result.scenario_name,
        baseline_ofr = result.impacts.own_funds.baseline,
        stressed_ofr = result.impacts.own_funds.stressed,
        "Stress test complete"
    );
    result
}

/// Runs several scenarios against one baseline. Results follow input order.
#[cfg(feature = "parallel")]
pub fn run_stress_suite(scenarios: &[StressScenario], baseline: &FirmProfile) -> Vec<StressResult> {
    scenarios
        .par_iter()
        .map(|s| run_stress_test(s, baseline))
        .collect()
}

/// Runs several scenarios against one baseline. Results follow input order.
#[cfg(not(feature = "parallel"))]
pub fn run_stress_suite(scenarios: &[StressScenario], baseline: &FirmProfile) -> Vec<StressResult> {
    scenarios
        .iter()
        .map(|s| run_stress_test(s, baseline))
        .collect()
}

/// Result with the largest stressed own funds total, including add-ons.
pub fn worst_case(results: &[StressResult]) -> Option<&StressResult> {
    results.iter().max_by(|a, b| {
        a.stressed_own_funds_total()
            .total_cmp(&b.stressed_own_funds_total())
    })
}

/// Returns a copy of `profile` with `scenario` stored: replacing the scenario
/// with the same id, or appended when none matches.
pub fn record_scenario(profile: &FirmProfile, scenario: StressScenario) -> FirmProfile {
    let mut next = profile.clone();
    match next.stress_scenarios.iter_mut().find(|s| s.id == scenario.id) {
        Some(existing) => *existing = scenario,
        None => next.stress_scenarios.push(scenario),
    }
    next
}
