//! Derived profile fields.
//!
//! The harm allowances and K-CON feed back into the next calculation pass.
//! They are refreshed here in two explicit phases:
//!
//! 1. harm allowances from the material harms in the register;
//! 2. K-CON from the exposure list, with limits taken from the own funds
//!    requirement computed using the new allowances and no K-CON.
//!
//! Neither phase reads a value the other writes back, so the refresh is
//! idempotent and can run before every calculation pass.

use crate::calculation::run_calculation;
use crate::concentration::assess_concentration;
use crate::risk_register::HarmAllowances;
use mifidpru_core::profile::FirmProfile;
use tracing::debug;

/// Own funds requirement that concentration limits are measured against.
///
/// Calculated with `kconValue` zeroed, so K-CON never feeds its own limit.
pub fn concentration_reference(profile: &FirmProfile) -> f64 {
    let mut without_kcon = profile.clone();
    without_kcon.k_factors.kcon_value = 0.0;
    run_calculation(&without_kcon).total_own_funds_requirement()
}

/// Returns a copy of `profile` with harm allowances and K-CON refreshed.
///
/// A profile without exposures keeps its entered `kconValue`.
///
/// # Examples
///
/// ```
/// use mifidpru_core::profile::{FirmProfile, Harm, HarmCategory};
/// use mifidpru_engine::derived::recompute_derived;
///
/// let mut profile = FirmProfile::default();
/// profile.identified_harms.push(
///     Harm::new("Outage", HarmCategory::Firm, 3, 3).with_additional_own_funds(300_000.0),
/// );
///
/// let updated = recompute_derived(&profile);
/// assert_eq!(updated.additional_own_funds_for_harm, 300_000.0);
/// ```
pub fn recompute_derived(profile: &FirmProfile) -> FirmProfile {
    let allowances = HarmAllowances::from_harms(&profile.identified_harms);
    let mut next = FirmProfile {
        additional_own_funds_for_harm: allowances.additional_own_funds,
        additional_liquid_assets_for_harm: allowances.additional_liquid_assets,
        ..profile.clone()
    };

    if !next.exposures.is_empty() {
        let concentration =
            assess_concentration(&next.exposures, Some(concentration_reference(&next)));
        next.k_factors.kcon_value = concentration.kcon;
    }

    debug!(
        additional_own_funds = next.additional_own_funds_for_harm,
        additional_liquid_assets = next.additional_liquid_assets_for_harm,
        kcon = next.k_factors.kcon_value,
        "Derived fields recomputed"
    );
    next
}
