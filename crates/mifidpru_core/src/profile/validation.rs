//! Input sanitisation.
//!
//! Profiles arriving from import or from the command line are clamped into
//! their valid domains before any engine sees them. Each adjustment is
//! recorded as an [`InputCorrection`] so callers can surface it.

use super::FirmProfile;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A single field adjusted during sanitisation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputCorrection {
    /// Dotted path of the corrected field, e.g. `overheads.totalExpenditure`.
    pub field: String,
    /// Value as supplied. Non-finite inputs are reported as `NaN` or infinities.
    pub original: f64,
    /// Value after correction.
    pub corrected: f64,
}

struct Corrections {
    items: Vec<InputCorrection>,
}

impl Corrections {
    fn amount(&mut self, field: impl Into<String>, value: &mut f64) {
        if value.is_finite() && *value >= 0.0 {
            return;
        }
        self.record(field.into(), *value, 0.0);
        *value = 0.0;
    }

    fn positive_factor(&mut self, field: impl Into<String>, value: &mut f64) {
        if value.is_finite() && *value >= 0.0 {
            return;
        }
        self.record(field.into(), *value, 1.0);
        *value = 1.0;
    }

    fn change(&mut self, field: impl Into<String>, value: &mut f64) {
        if value.is_finite() {
            return;
        }
        self.record(field.into(), *value, 0.0);
        *value = 0.0;
    }

    fn score(&mut self, field: impl Into<String>, value: &mut u8) {
        let clamped = (*value).clamp(1, 5);
        if clamped == *value {
            return;
        }
        self.record(field.into(), f64::from(*value), f64::from(clamped));
        *value = clamped;
    }

    fn record(&mut self, field: String, original: f64, corrected: f64) {
        warn!(field = %field, original, corrected, "Input corrected");
        self.items.push(InputCorrection {
            field,
            original,
            corrected,
        });
    }
}

/// Returns a sanitised copy of `profile` and the list of corrections applied.
///
/// - negative or non-finite amounts become `0`
/// - non-finite or negative TCD risk factor and CVA become `1`
/// - harm likelihood and impact are clamped to `[1, 5]`
/// - a wind-down period of `0` becomes `1`
/// - non-finite scenario impact changes become `0`
///
/// The input is left untouched; sanitising an already clean profile returns
/// an equal copy and no corrections.
///
/// # Examples
///
/// ```
/// use mifidpru_core::profile::{validation::sanitise, FirmProfile};
///
/// let mut profile = FirmProfile::default();
/// profile.overheads.total_expenditure = -5.0;
/// profile.wind_down_period = 0;
///
/// let (clean, corrections) = sanitise(&profile);
/// assert_eq!(clean.overheads.total_expenditure, 0.0);
/// assert_eq!(clean.wind_down_period, 1);
/// assert_eq!(corrections.len(), 2);
/// ```
pub fn sanitise(profile: &FirmProfile) -> (FirmProfile, Vec<InputCorrection>) {
    let mut p = profile.clone();
    let mut c = Corrections { items: Vec::new() };

    let m = &mut p.classification;
    c.amount("classification.aum", &mut m.aum);
    c.amount("classification.cohCash", &mut m.coh_cash);
    c.amount("classification.cohDerivatives", &mut m.coh_derivatives);
    c.amount("classification.asa", &mut m.asa);
    c.amount("classification.cmh", &mut m.cmh);
    c.amount("classification.dtf", &mut m.dtf);
    c.amount("classification.npr", &mut m.npr);
    c.amount("classification.cmg", &mut m.cmg);
    c.amount("classification.tcd", &mut m.tcd);
    c.amount("classification.balanceSheetTotal", &mut m.balance_sheet_total);
    c.amount("classification.annualRevenue", &mut m.annual_revenue);

    let k = &mut p.k_factors;
    c.amount("kFactors.cmhSegregated", &mut k.cmh_segregated);
    c.amount("kFactors.cmhNonSegregated", &mut k.cmh_non_segregated);
    c.amount("kFactors.cohCashValue", &mut k.coh_cash_value);
    c.amount("kFactors.cohDerivativesValue", &mut k.coh_derivatives_value);
    c.amount("kFactors.nprValue", &mut k.npr_value);
    c.amount("kFactors.cmgValue", &mut k.cmg_value);
    c.amount("kFactors.tcdExposureValue", &mut k.tcd_exposure_value);
    c.positive_factor("kFactors.tcdRiskFactor", &mut k.tcd_risk_factor);
    c.positive_factor("kFactors.tcdCVA", &mut k.tcd_cva);
    c.amount("kFactors.dtfCashValue", &mut k.dtf_cash_value);
    c.amount("kFactors.dtfDerivativesValue", &mut k.dtf_derivatives_value);
    c.amount("kFactors.kconValue", &mut k.kcon_value);

    let o = &mut p.overheads;
    c.amount("overheads.totalExpenditure", &mut o.total_expenditure);
    c.amount("overheads.discretionaryBonuses", &mut o.discretionary_bonuses);
    c.amount("overheads.profitShares", &mut o.profit_shares);
    c.amount(
        "overheads.otherDiscretionaryPayments",
        &mut o.other_discretionary_payments,
    );
    c.amount("overheads.sharedCommissions", &mut o.shared_commissions);
    c.amount("overheads.feesPaidToCCPs", &mut o.fees_paid_to_ccps);
    c.amount("overheads.interestOnClientMoney", &mut o.interest_on_client_money);
    c.amount("overheads.nonRecurringExpenses", &mut o.non_recurring_expenses);
    c.amount("overheads.tiedAgentFees", &mut o.tied_agent_fees);

    if p.wind_down_period == 0 {
        c.record("windDownPeriod".to_string(), 0.0, 1.0);
        p.wind_down_period = 1;
    }

    c.amount(
        "additionalOwnFundsForHarm",
        &mut p.additional_own_funds_for_harm,
    );
    c.amount(
        "additionalLiquidAssetsForHarm",
        &mut p.additional_liquid_assets_for_harm,
    );
    c.amount("actualOwnFunds", &mut p.actual_own_funds);
    c.amount("actualLiquidAssets", &mut p.actual_liquid_assets);

    for (i, harm) in p.identified_harms.iter_mut().enumerate() {
        c.score(format!("identifiedHarms[{i}].likelihood"), &mut harm.likelihood);
        c.score(format!("identifiedHarms[{i}].impact"), &mut harm.impact);
        c.amount(
            format!("identifiedHarms[{i}].additionalOwnFunds"),
            &mut harm.additional_own_funds,
        );
        c.amount(
            format!("identifiedHarms[{i}].additionalLiquidAssets"),
            &mut harm.additional_liquid_assets,
        );
    }

    for (i, scenario) in p.stress_scenarios.iter_mut().enumerate() {
        for (j, impact) in scenario.impacts.iter_mut().enumerate() {
            c.change(
                format!("stressScenarios[{i}].impacts[{j}].change"),
                &mut impact.change,
            );
        }
        c.amount(
            format!("stressScenarios[{i}].additionalOwnFunds"),
            &mut scenario.additional_own_funds,
        );
        c.amount(
            format!("stressScenarios[{i}].additionalLiquidAssets"),
            &mut scenario.additional_liquid_assets,
        );
    }

    // Negative net exposure is legitimate; only the raw inputs are clamped.
    for (i, exposure) in p.exposures.iter_mut().enumerate() {
        c.amount(
            format!("exposures[{i}].exposureValue"),
            &mut exposure.exposure_value,
        );
        c.amount(format!("exposures[{i}].collateral"), &mut exposure.collateral);
    }

    (p, c.items)
}
