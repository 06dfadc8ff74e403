//! Liquid assets threshold requirement.

use mifidpru_core::types::non_negative;
use serde::{Deserialize, Serialize};

/// Liquid assets requirement with its workings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiquidAssetsRequirement {
    /// One third of the fixed overhead requirement.
    #[serde(rename = "oneThirdFOR")]
    pub one_third_for: f64,
    /// Monthly expenditure times the wind-down period.
    pub wind_down_costs: f64,
    /// One third of the wind-down costs.
    pub one_third_fixed_ongoing_costs: f64,
    /// Liquid assets add-on for material harms.
    pub additional_liquid_assets_for_harm: f64,
    /// Liquid assets threshold requirement.
    pub liquid_assets_threshold_requirement: f64,
}

/// Computes the liquid assets threshold requirement.
///
/// # Examples
///
/// ```
/// use mifidpru_engine::liquid_assets::calculate_liquid_assets;
///
/// let latr = calculate_liquid_assets(1_200_000.0, 12_000_000.0, 3, 0.0);
/// assert_eq!(latr.one_third_for, 400_000.0);
/// assert_eq!(latr.wind_down_costs, 3_000_000.0);
/// assert_eq!(latr.liquid_assets_threshold_requirement, 1_400_000.0);
/// ```
pub fn calculate_liquid_assets(
    for_amount: f64,
    total_expenditure: f64,
    wind_down_period: u32,
    additional_liquid_assets_for_harm: f64,
) -> LiquidAssetsRequirement {
    let one_third_for = non_negative(for_amount) / 3.0;
    let wind_down_costs = non_negative(total_expenditure) / 12.0 * f64::from(wind_down_period);
    let one_third_fixed_ongoing_costs = wind_down_costs / 3.0;
    let additional = non_negative(additional_liquid_assets_for_harm);

    LiquidAssetsRequirement {
        one_third_for,
        wind_down_costs,
        one_third_fixed_ongoing_costs,
        additional_liquid_assets_for_harm: additional,
        liquid_assets_threshold_requirement: one_third_for + one_third_fixed_ongoing_costs + additional,
    }
}
