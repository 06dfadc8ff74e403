//! The firm profile record.

use super::{Exposure, Harm, StressScenario};
use crate::types::ProfileError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Activity category that determines the permanent minimum capital requirement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FirmActivity {
    /// Dealing on own account or underwriting on a firm commitment basis.
    Dealing,
    /// Holding client money or client assets.
    HoldingClientMoney,
    /// Any other MiFID investment business.
    #[default]
    Other,
    /// Local firm.
    Local,
}

impl FirmActivity {
    /// All activity categories.
    pub fn all() -> [Self; 4] {
        [Self::Dealing, Self::HoldingClientMoney, Self::Other, Self::Local]
    }

    /// Identifier used in the persistence contract.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dealing => "dealing",
            Self::HoldingClientMoney => "holdingClientMoney",
            Self::Other => "other",
            Self::Local => "local",
        }
    }
}

impl fmt::Display for FirmActivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FirmActivity {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dealing" => Ok(Self::Dealing),
            "holdingclientmoney" | "holding_client_money" => Ok(Self::HoldingClientMoney),
            "other" => Ok(Self::Other),
            "local" => Ok(Self::Local),
            _ => Err(ProfileError::UnknownFirmActivity(s.to_string())),
        }
    }
}

/// Business metrics compared against the SNI thresholds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClassificationMetrics {
    /// Assets under management.
    pub aum: f64,
    /// Client orders handled, cash trades (daily).
    pub coh_cash: f64,
    /// Client orders handled, derivative trades (daily).
    pub coh_derivatives: f64,
    /// Assets safeguarded and administered.
    pub asa: f64,
    /// Client money held.
    pub cmh: f64,
    /// Daily trading flow.
    pub dtf: f64,
    /// Net position risk.
    pub npr: f64,
    /// Clearing margin given.
    pub cmg: f64,
    /// Trading counterparty default.
    pub tcd: f64,
    /// On- and off-balance sheet total.
    pub balance_sheet_total: f64,
    /// Total annual gross revenue from investment services.
    pub annual_revenue: f64,
}

/// Exposure measures feeding the K-factor requirement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KFactorInputs {
    /// Client money held in segregated accounts.
    pub cmh_segregated: f64,
    /// Client money held in non-segregated accounts.
    pub cmh_non_segregated: f64,
    /// Client orders handled, cash trades.
    pub coh_cash_value: f64,
    /// Client orders handled, derivatives.
    pub coh_derivatives_value: f64,
    /// Net position risk requirement.
    pub npr_value: f64,
    /// Clearing margin given.
    pub cmg_value: f64,
    /// Trading counterparty default exposure value.
    pub tcd_exposure_value: f64,
    /// Counterparty risk factor applied to the TCD exposure.
    pub tcd_risk_factor: f64,
    /// Credit valuation adjustment multiplier applied to the TCD exposure.
    #[serde(rename = "tcdCVA", alias = "tcdCva")]
    pub tcd_cva: f64,
    /// Daily trading flow, cash trades.
    pub dtf_cash_value: f64,
    /// Daily trading flow, derivatives.
    pub dtf_derivatives_value: f64,
    /// Concentration risk add-on, derived from the exposure list.
    pub kcon_value: f64,
}

impl Default for KFactorInputs {
    fn default() -> Self {
        Self {
            cmh_segregated: 0.0,
            cmh_non_segregated: 0.0,
            coh_cash_value: 0.0,
            coh_derivatives_value: 0.0,
            npr_value: 0.0,
            cmg_value: 0.0,
            tcd_exposure_value: 0.0,
            tcd_risk_factor: 1.0,
            tcd_cva: 1.0,
            dtf_cash_value: 0.0,
            dtf_derivatives_value: 0.0,
            kcon_value: 0.0,
        }
    }
}

/// Annual expenditure and the items deductible from it for the FOR.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverheadInputs {
    /// Total expenditure from the most recent audited accounts.
    pub total_expenditure: f64,
    /// Staff bonuses and other discretionary remuneration.
    pub discretionary_bonuses: f64,
    /// Employees', directors' and partners' shares in profits.
    pub profit_shares: f64,
    /// Other appropriations of profits and variable remuneration.
    pub other_discretionary_payments: f64,
    /// Shared commission and fees payable.
    pub shared_commissions: f64,
    /// Fees, brokerage and charges paid to CCPs.
    #[serde(rename = "feesPaidToCCPs", alias = "feesPaidToCcps")]
    pub fees_paid_to_ccps: f64,
    /// Interest paid to customers on client money.
    pub interest_on_client_money: f64,
    /// Expenses from non-recurring activities.
    pub non_recurring_expenses: f64,
    /// Fees paid to tied agents.
    pub tied_agent_fees: f64,
}

impl OverheadInputs {
    /// Sum of every deductible item.
    pub fn total_deductions(&self) -> f64 {
        self.discretionary_bonuses
            + self.profit_shares
            + self.other_discretionary_payments
            + self.shared_commissions
            + self.fees_paid_to_ccps
            + self.interest_on_client_money
            + self.non_recurring_expenses
            + self.tied_agent_fees
    }
}

/// The input record describing a firm.
///
/// `additional_own_funds_for_harm`, `additional_liquid_assets_for_harm` and
/// `k_factors.kcon_value` are derived fields. They are written by the risk
/// register and the concentration engine and consumed by the next
/// calculation pass; they are never edited on their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FirmProfile {
    /// SNI classification metrics.
    pub classification: ClassificationMetrics,
    /// K-factor inputs.
    pub k_factors: KFactorInputs,
    /// FOR inputs.
    pub overheads: OverheadInputs,
    /// Time needed for an orderly wind-down, in months.
    pub wind_down_period: u32,
    /// Activity category for the PMCR.
    pub firm_activity: FirmActivity,
    /// Additional own funds for material harms (derived).
    pub additional_own_funds_for_harm: f64,
    /// Additional liquid assets for material harms (derived).
    pub additional_liquid_assets_for_harm: f64,
    /// Own funds actually held.
    pub actual_own_funds: f64,
    /// Liquid assets actually held.
    pub actual_liquid_assets: f64,
    /// Risk register entries, in entry order.
    pub identified_harms: Vec<Harm>,
    /// Stress scenarios, in entry order.
    pub stress_scenarios: Vec<StressScenario>,
    /// Counterparty exposures for concentration risk.
    pub exposures: Vec<Exposure>,
}

/// Default wind-down period in months.
pub const DEFAULT_WIND_DOWN_MONTHS: u32 = 3;

impl Default for FirmProfile {
    fn default() -> Self {
        Self {
            classification: ClassificationMetrics::default(),
            k_factors: KFactorInputs::default(),
            overheads: OverheadInputs::default(),
            wind_down_period: DEFAULT_WIND_DOWN_MONTHS,
            firm_activity: FirmActivity::default(),
            additional_own_funds_for_harm: 0.0,
            additional_liquid_assets_for_harm: 0.0,
            actual_own_funds: 0.0,
            actual_liquid_assets: 0.0,
            identified_harms: Vec::new(),
            stress_scenarios: Vec::new(),
            exposures: Vec::new(),
        }
    }
}

impl FirmProfile {
    /// Number of harms with a risk score at or above the materiality threshold.
    pub fn material_harm_count(&self) -> usize {
        self.identified_harms.iter().filter(|h| h.is_material()).count()
    }

    /// Finds a stress scenario by name, ignoring case.
    pub fn scenario_named(&self, name: &str) -> Option<&StressScenario> {
        self.stress_scenarios
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile() {
        let profile = FirmProfile::default();
        assert_eq!(profile.wind_down_period, 3);
        assert_eq!(profile.firm_activity, FirmActivity::Other);
        assert_eq!(profile.k_factors.tcd_risk_factor, 1.0);
        assert_eq!(profile.k_factors.tcd_cva, 1.0);
        assert!(profile.identified_harms.is_empty());
    }

    #[test]
    fn test_total_deductions() {
        let overheads = OverheadInputs {
            total_expenditure: 8_000_000.0,
            discretionary_bonuses: 1_000_000.0,
            profit_shares: 500_000.0,
            other_discretionary_payments: 200_000.0,
            shared_commissions: 300_000.0,
            fees_paid_to_ccps: 150_000.0,
            interest_on_client_money: 50_000.0,
            non_recurring_expenses: 400_000.0,
            tied_agent_fees: 100_000.0,
        };
        assert_eq!(overheads.total_deductions(), 2_700_000.0);
    }

    #[test]
    fn test_firm_activity_parsing() {
        assert_eq!(FirmActivity::from_str("dealing").unwrap(), FirmActivity::Dealing);
        assert_eq!(
            FirmActivity::from_str("holdingClientMoney").unwrap(),
            FirmActivity::HoldingClientMoney
        );
        assert_eq!(FirmActivity::from_str("LOCAL").unwrap(), FirmActivity::Local);
        assert!(FirmActivity::from_str("broker").is_err());
    }

    #[test]
    fn test_firm_activity_round_trips_through_str() {
        for activity in FirmActivity::all() {
            assert_eq!(FirmActivity::from_str(activity.as_str()).unwrap(), activity);
        }
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let json = r#"{ "classification": { "aum": 1000.0 }, "firmActivity": "dealing" }"#;
        let profile: FirmProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.classification.aum, 1000.0);
        assert_eq!(profile.classification.cmh, 0.0);
        assert_eq!(profile.firm_activity, FirmActivity::Dealing);
        assert_eq!(profile.wind_down_period, 3);
        assert_eq!(profile.k_factors.tcd_cva, 1.0);
    }

    #[test]
    fn test_serialised_field_names() {
        let json = serde_json::to_value(FirmProfile::default()).unwrap();
        assert!(json.get("windDownPeriod").is_some());
        assert!(json["kFactors"].get("tcdCVA").is_some());
        assert!(json["overheads"].get("feesPaidToCCPs").is_some());
        assert!(json.get("additionalOwnFundsForHarm").is_some());
    }
}
