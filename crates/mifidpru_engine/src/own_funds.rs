//! Own funds requirement.
//!
//! The base requirement is the highest of the permanent minimum, the fixed
//! overhead and the K-factor requirements. Harm add-ons sit on top of it.

use mifidpru_core::profile::FirmActivity;
use mifidpru_core::types::non_negative;
use serde::{Deserialize, Serialize};

/// PMCR for firms dealing on own account.
pub const PMCR_DEALING: f64 = 750_000.0;
/// PMCR for firms holding client money or assets.
pub const PMCR_HOLDING_CLIENT_MONEY: f64 = 150_000.0;
/// PMCR for other MiFID firms.
pub const PMCR_OTHER: f64 = 75_000.0;
/// PMCR for local firms.
pub const PMCR_LOCAL: f64 = 50_000.0;

/// Minimum CET1 share of the requirement.
pub const CET1_RATIO: f64 = 0.56;
/// Maximum AT1 share of the requirement.
pub const AT1_RATIO: f64 = 0.44;
/// Maximum T2 share of the requirement.
pub const T2_RATIO: f64 = 0.25;

/// Permanent minimum capital requirement for an activity.
pub fn permanent_minimum_requirement(activity: FirmActivity) -> f64 {
    match activity {
        FirmActivity::Dealing => PMCR_DEALING,
        FirmActivity::HoldingClientMoney => PMCR_HOLDING_CLIENT_MONEY,
        FirmActivity::Other => PMCR_OTHER,
        FirmActivity::Local => PMCR_LOCAL,
    }
}

/// Own funds requirement with its components.
///
/// The tier amounts are informational and overlap; they do not sum to the
/// total.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnFundsRequirement {
    /// Permanent minimum capital requirement.
    pub pmcr: f64,
    /// Fixed overhead requirement.
    #[serde(rename = "FOR")]
    pub for_amount: f64,
    /// Total K-factor requirement.
    #[serde(rename = "totalKFR")]
    pub total_kfr: f64,
    /// Highest of PMCR, FOR and KFR.
    pub base_own_funds_requirement: f64,
    /// Own funds add-on for material harms.
    pub additional_own_funds_for_harm: f64,
    /// Own funds threshold requirement.
    pub total_own_funds_requirement: f64,
    /// CET1 amount at 56% of the total.
    pub cet1_requirement: f64,
    /// AT1 amount at 44% of the total.
    pub at1_requirement: f64,
    /// T2 amount at 25% of the total.
    pub t2_requirement: f64,
}

impl OwnFundsRequirement {
    /// Name of the component that sets the base requirement.
    pub fn binding_component(&self) -> &'static str {
        if self.base_own_funds_requirement == self.total_kfr && self.total_kfr > 0.0 {
            "KFR"
        } else if self.base_own_funds_requirement == self.for_amount && self.for_amount > 0.0 {
            "FOR"
        } else {
            "PMCR"
        }
    }
}

/// Computes the own funds requirement.
///
/// # Examples
///
/// ```
/// use mifidpru_core::profile::FirmActivity;
/// use mifidpru_engine::own_funds::calculate_own_funds;
///
/// let ofr = calculate_own_funds(FirmActivity::Dealing, 500_000.0, 200_000.0, 100_000.0);
/// assert_eq!(ofr.base_own_funds_requirement, 750_000.0);
/// assert_eq!(ofr.total_own_funds_requirement, 850_000.0);
/// assert_eq!(ofr.binding_component(), "PMCR");
/// ```
pub fn calculate_own_funds(
    activity: FirmActivity,
    for_amount: f64,
    total_kfr: f64,
    additional_own_funds_for_harm: f64,
) -> OwnFundsRequirement {
    let pmcr = permanent_minimum_requirement(activity);
    let for_amount = non_negative(for_amount);
    let total_kfr = non_negative(total_kfr);
    let additional = non_negative(additional_own_funds_for_harm);

    let base = pmcr.max(for_amount).max(total_kfr);
    let total = base + additional;

    OwnFundsRequirement {
        pmcr,
        for_amount,
        total_kfr,
        base_own_funds_requirement: base,
        additional_own_funds_for_harm: additional,
        total_own_funds_requirement: total,
        cet1_requirement: total * CET1_RATIO,
        at1_requirement: total * AT1_RATIO,
        t2_requirement: total * T2_RATIO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_pmcr_by_activity() {
        assert_eq!(permanent_minimum_requirement(FirmActivity::Dealing), 750_000.0);
        assert_eq!(
            permanent_minimum_requirement(FirmActivity::HoldingClientMoney),
            150_000.0
        );
        assert_eq!(permanent_minimum_requirement(FirmActivity::Other), 75_000.0);
        assert_eq!(permanent_minimum_requirement(FirmActivity::Local), 50_000.0);
    }

    #[test]
    fn test_kfr_binds() {
        let ofr = calculate_own_funds(FirmActivity::HoldingClientMoney, 1_325_000.0, 7_019_000.0, 750_000.0);
        assert_eq!(ofr.base_own_funds_requirement, 7_019_000.0);
        assert_eq!(ofr.total_own_funds_requirement, 7_769_000.0);
        assert_eq!(ofr.binding_component(), "KFR");
    }

    #[test]
    fn test_tier_ratios() {
        let ofr = calculate_own_funds(FirmActivity::Other, 1_000_000.0, 0.0, 0.0);
        assert_relative_eq!(ofr.cet1_requirement, 560_000.0, epsilon = 1e-6);
        assert_relative_eq!(ofr.at1_requirement, 440_000.0, epsilon = 1e-6);
        assert_relative_eq!(ofr.t2_requirement, 250_000.0, epsilon = 1e-6);
        assert_eq!(ofr.binding_component(), "FOR");
    }

    #[test]
    fn test_serialised_names() {
        let json = serde_json::to_value(calculate_own_funds(FirmActivity::Local, 0.0, 0.0, 0.0)).unwrap();
        assert_eq!(json["pmcr"], 50_000.0);
        assert!(json.get("FOR").is_some());
        assert!(json.get("totalKFR").is_some());
        assert!(json.get("totalOwnFundsRequirement").is_some());
        assert!(json.get("cet1Requirement").is_some());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_total_dominates_components(
            for_amount in 0.0f64..1e9,
            kfr in 0.0f64..1e9,
            harm in 0.0f64..1e8,
            activity_idx in 0usize..4,
        ) {
            let activity = FirmActivity::all()[activity_idx];
            let ofr = calculate_own_funds(activity, for_amount, kfr, harm);
            prop_assert!(ofr.total_own_funds_requirement >= ofr.base_own_funds_requirement);
            prop_assert!(ofr.base_own_funds_requirement >= ofr.pmcr);
            prop_assert!(ofr.base_own_funds_requirement >= ofr.for_amount);
            prop_assert!(ofr.base_own_funds_requirement >= ofr.total_kfr);
        }
    }
}
