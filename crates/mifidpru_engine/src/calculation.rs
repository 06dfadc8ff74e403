//! The calculation pass.
//!
//! Runs every requirement engine over one profile in dependency order and
//! collects the results into an immutable [`CalculationResult`].

use crate::classification::{classify, FirmClassification, SniCriterion};
use crate::fixed_overhead::{calculate_for, FixedOverheadRequirement};
use crate::icara::{summarise_icara, IcaraSummary};
use crate::kfactor::{calculate_k_factors, KFactorRequirement};
use crate::liquid_assets::{calculate_liquid_assets, LiquidAssetsRequirement};
use crate::own_funds::{calculate_own_funds, OwnFundsRequirement};
use mifidpru_core::profile::{FirmProfile, Harm};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Snapshot of one calculation pass.
///
/// A result is never edited. The next pass produces a new one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    /// SNI / Non-SNI classification.
    pub firm_classification: FirmClassification,
    /// Criteria that prevented SNI status.
    #[serde(default)]
    pub classification_breaches: Vec<SniCriterion>,
    /// K-factor requirement.
    pub k_factor_requirements: KFactorRequirement,
    /// Fixed overhead requirement.
    pub fixed_overhead_requirement: FixedOverheadRequirement,
    /// Liquid assets requirement.
    pub liquid_assets_requirement: LiquidAssetsRequirement,
    /// Own funds requirement.
    pub own_funds_requirement: OwnFundsRequirement,
    /// ICARA summary.
    pub icara_summary: IcaraSummary,
    /// Copy of the harm register at calculation time.
    #[serde(default)]
    pub identified_harms: Vec<Harm>,
}

impl CalculationResult {
    /// Own funds threshold requirement.
    #[inline]
    pub fn total_own_funds_requirement(&self) -> f64 {
        self.own_funds_requirement.total_own_funds_requirement
    }

    /// Liquid assets threshold requirement.
    #[inline]
    pub fn liquid_assets_threshold_requirement(&self) -> f64 {
        self.liquid_assets_requirement.liquid_assets_threshold_requirement
    }
}

/// Runs classification, K-factors, FOR, own funds, liquid assets and the
/// ICARA summary.
pub fn run_calculation(profile: &FirmProfile) -> CalculationResult {
    let outcome = classify(&profile.classification);
    let k_factor_requirements = calculate_k_factors(profile);
    let fixed_overhead_requirement = calculate_for(&profile.overheads);
    let own_funds_requirement = calculate_own_funds(
        profile.firm_activity,
        fixed_overhead_requirement.for_amount,
        k_factor_requirements.total_kfr,
        profile.additional_own_funds_for_harm,
    );
    let liquid_assets_requirement = calculate_liquid_assets(
        fixed_overhead_requirement.for_amount,
        profile.overheads.total_expenditure,
        profile.wind_down_period,
        profile.additional_liquid_assets_for_harm,
    );
    let icara_summary = summarise_icara(
        profile,
        outcome.classification,
        own_funds_requirement.total_own_funds_requirement,
        liquid_assets_requirement.liquid_assets_threshold_requirement,
    );

    debug!(
        classification = %outcome.classification,
        total_kfr = k_factor_requirements.total_kfr,
        for_amount = fixed_overhead_requirement.for_amount,
        oftr = own_funds_requirement.total_own_funds_requirement,
        latr = liquid_assets_requirement.liquid_assets_threshold_requirement,
        "Calculation pass complete"
    );

    CalculationResult {
        firm_classification: outcome.classification,
        classification_breaches: outcome.breached,
        k_factor_requirements,
        fixed_overhead_requirement,
        liquid_assets_requirement,
        own_funds_requirement,
        icara_summary,
        identified_harms: profile.identified_harms.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mifidpru_core::profile::{FirmActivity, HarmCategory};

    #[test]
    fn test_default_profile_uses_pmcr() {
        let result = run_calculation(&FirmProfile::default());
        assert_eq!(result.firm_classification, FirmClassification::Sni);
        assert_eq!(result.total_own_funds_requirement(), 75_000.0);
        assert_eq!(result.liquid_assets_threshold_requirement(), 0.0);
    }

    #[test]
    fn test_harms_are_copied() {
        let mut profile = FirmProfile::default();
        profile.firm_activity = FirmActivity::Local;
        profile
            .identified_harms
            .push(Harm::new("Outage", HarmCategory::Firm, 3, 3));

        let result = run_calculation(&profile);
        profile.identified_harms[0].description = "Changed".to_string();

        assert_eq!(result.identified_harms[0].description, "Outage");
        assert_eq!(result.icara_summary.material_harms, 1);
    }

    #[test]
    fn test_result_json_keys() {
        let json = serde_json::to_value(run_calculation(&FirmProfile::default())).unwrap();
        for key in [
            "firmClassification",
            "kFactorRequirements",
            "fixedOverheadRequirement",
            "liquidAssetsRequirement",
            "ownFundsRequirement",
            "icaraSummary",
            "identifiedHarms",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["firmClassification"], "SNI");
    }
}
