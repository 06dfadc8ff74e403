//! ICARA summary.
//!
//! Brings the threshold requirements together with the resources the firm
//! actually holds and the state of the harm register.

use crate::classification::FirmClassification;
use mifidpru_core::profile::FirmProfile;
use mifidpru_core::types::non_negative;
use serde::{Deserialize, Serialize};

/// Headline ICARA figures for one calculation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IcaraSummary {
    /// Firm classification.
    pub classification: FirmClassification,
    /// Own funds threshold requirement.
    pub own_funds_threshold_requirement: f64,
    /// Liquid assets threshold requirement.
    pub liquid_assets_threshold_requirement: f64,
    /// Number of harms in the register.
    pub total_harms: usize,
    /// Number of harms at or above the materiality threshold.
    pub material_harms: usize,
    /// Own funds held.
    pub actual_own_funds: f64,
    /// Liquid assets held.
    pub actual_liquid_assets: f64,
    /// Own funds held minus the requirement. Negative on shortfall.
    pub own_funds_surplus: f64,
    /// Liquid assets held minus the requirement. Negative on shortfall.
    pub liquid_assets_surplus: f64,
    /// Own funds held meet the requirement.
    pub own_funds_adequate: bool,
    /// Liquid assets held meet the requirement.
    pub liquid_assets_adequate: bool,
}

impl IcaraSummary {
    /// Both own funds and liquid assets meet their thresholds.
    pub fn is_adequate(&self) -> bool {
        self.own_funds_adequate && self.liquid_assets_adequate
    }
}

/// Builds the ICARA summary from computed thresholds.
pub fn summarise_icara(
    profile: &FirmProfile,
    classification: FirmClassification,
    own_funds_threshold_requirement: f64,
    liquid_assets_threshold_requirement: f64,
) -> IcaraSummary {
    let actual_own_funds = non_negative(profile.actual_own_funds);
    let actual_liquid_assets = non_negative(profile.actual_liquid_assets);
    IcaraSummary {
        classification,
        own_funds_threshold_requirement,
        liquid_assets_threshold_requirement,
        total_harms: profile.identified_harms.len(),
        material_harms: profile.material_harm_count(),
        actual_own_funds,
        actual_liquid_assets,
        own_funds_surplus: actual_own_funds - own_funds_threshold_requirement,
        liquid_assets_surplus: actual_liquid_assets - liquid_assets_threshold_requirement,
        own_funds_adequate: actual_own_funds >= own_funds_threshold_requirement,
        liquid_assets_adequate: actual_liquid_assets >= liquid_assets_threshold_requirement,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mifidpru_core::profile::{Harm, HarmCategory};

    #[test]
    fn test_surplus_and_adequacy() {
        let mut profile = FirmProfile::default();
        profile.actual_own_funds = 5_000_000.0;
        profile.actual_liquid_assets = 1_500_000.0;
        profile.identified_harms = vec![
            Harm::new("A", HarmCategory::Client, 2, 4),
            Harm::new("B", HarmCategory::Firm, 1, 2),
        ];

        let summary = summarise_icara(&profile, FirmClassification::NonSni, 4_000_000.0, 2_000_000.0);
        assert_eq!(summary.total_harms, 2);
        assert_eq!(summary.material_harms, 1);
        assert_eq!(summary.own_funds_surplus, 1_000_000.0);
        assert_eq!(summary.liquid_assets_surplus, -500_000.0);
        assert!(summary.own_funds_adequate);
        assert!(!summary.liquid_assets_adequate);
        assert!(!summary.is_adequate());
    }

    #[test]
    fn test_exactly_meeting_requirement_is_adequate() {
        let mut profile = FirmProfile::default();
        profile.actual_own_funds = 75_000.0;
        let summary = summarise_icara(&profile, FirmClassification::Sni, 75_000.0, 0.0);
        assert!(summary.is_adequate());
    }
}
