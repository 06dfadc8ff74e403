//! K-factor requirement.
//!
//! Each K-factor is a fixed coefficient applied to its exposure measure.
//! K-CON is passed through from the concentration engine via
//! `kFactors.kconValue`.

use mifidpru_core::profile::FirmProfile;
use mifidpru_core::types::non_negative;
use serde::{Deserialize, Serialize};

/// K-AUM coefficient on assets under management.
pub const K_AUM_COEFFICIENT: f64 = 0.0002;
/// K-CMH coefficient on segregated client money.
pub const K_CMH_SEGREGATED_COEFFICIENT: f64 = 0.004;
/// K-CMH coefficient on non-segregated client money.
pub const K_CMH_NON_SEGREGATED_COEFFICIENT: f64 = 0.005;
/// K-ASA coefficient on assets safeguarded and administered.
pub const K_ASA_COEFFICIENT: f64 = 0.0004;
/// K-COH coefficient on cash trades.
pub const K_COH_CASH_COEFFICIENT: f64 = 0.001;
/// K-COH coefficient on derivative trades.
pub const K_COH_DERIVATIVES_COEFFICIENT: f64 = 0.0001;
/// K-TCD capital factor.
pub const K_TCD_COEFFICIENT: f64 = 0.08;
/// K-DTF coefficient on cash trades.
pub const K_DTF_CASH_COEFFICIENT: f64 = 0.001;
/// K-DTF coefficient on derivative trades.
pub const K_DTF_DERIVATIVES_COEFFICIENT: f64 = 0.0001;

/// K-factor requirement broken down by factor and risk group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KFactorRequirement {
    /// Assets under management.
    #[serde(rename = "kAUM")]
    pub k_aum: f64,
    /// Client money held.
    #[serde(rename = "kCMH")]
    pub k_cmh: f64,
    /// Assets safeguarded and administered.
    #[serde(rename = "kASA")]
    pub k_asa: f64,
    /// Client orders handled.
    #[serde(rename = "kCOH")]
    pub k_coh: f64,
    /// Net position risk.
    #[serde(rename = "kNPR")]
    pub k_npr: f64,
    /// Clearing margin given.
    #[serde(rename = "kCMG")]
    pub k_cmg: f64,
    /// Trading counterparty default.
    #[serde(rename = "kTCD")]
    pub k_tcd: f64,
    /// Daily trading flow.
    #[serde(rename = "kDTF")]
    pub k_dtf: f64,
    /// Concentration risk.
    #[serde(rename = "kCON")]
    pub k_con: f64,
    /// Risk-to-client subtotal (AUM, CMH, ASA, COH).
    #[serde(rename = "rtcTotal")]
    pub risk_to_client: f64,
    /// Risk-to-market subtotal (NPR, CMG).
    #[serde(rename = "rtmTotal")]
    pub risk_to_market: f64,
    /// Risk-to-firm subtotal (TCD, DTF, CON).
    #[serde(rename = "rtfTotal")]
    pub risk_to_firm: f64,
    /// Sum of all K-factors.
    #[serde(rename = "totalKFR")]
    pub total_kfr: f64,
}

impl KFactorRequirement {
    /// Named factors in display order.
    pub fn factors(&self) -> [(&'static str, f64); 9] {
        [
            ("K-AUM", self.k_aum),
            ("K-CMH", self.k_cmh),
            ("K-ASA", self.k_asa),
            ("K-COH", self.k_coh),
            ("K-NPR", self.k_npr),
            ("K-CMG", self.k_cmg),
            ("K-TCD", self.k_tcd),
            ("K-DTF", self.k_dtf),
            ("K-CON", self.k_con),
        ]
    }
}

/// Computes the K-factor requirement.
///
/// K-AUM and K-ASA are measured on the classification metrics; the other
/// factors come from the detailed K-factor inputs.
///
/// # Examples
///
/// ```
/// use mifidpru_core::profile::FirmProfile;
/// use mifidpru_engine::kfactor::calculate_k_factors;
///
/// let mut profile = FirmProfile::default();
/// profile.classification.aum = 500_000_000.0;
/// profile.k_factors.npr_value = 5_000_000.0;
///
/// let kfr = calculate_k_factors(&profile);
/// assert!((kfr.k_aum - 100_000.0).abs() < 1e-6);
/// assert_eq!(kfr.risk_to_market, 5_000_000.0);
/// assert!((kfr.total_kfr - 5_100_000.0).abs() < 1e-6);
/// ```
pub fn calculate_k_factors(profile: &FirmProfile) -> KFactorRequirement {
    let m = &profile.classification;
    let k = &profile.k_factors;

    let k_aum = non_negative(m.aum) * K_AUM_COEFFICIENT;
    let k_cmh = non_negative(k.cmh_segregated) * K_CMH_SEGREGATED_COEFFICIENT
        + non_negative(k.cmh_non_segregated) * K_CMH_NON_SEGREGATED_COEFFICIENT;
    let k_asa = non_negative(m.asa) * K_ASA_COEFFICIENT;
    let k_coh = non_negative(k.coh_cash_value) * K_COH_CASH_COEFFICIENT
        + non_negative(k.coh_derivatives_value) * K_COH_DERIVATIVES_COEFFICIENT;
    let k_npr = non_negative(k.npr_value);
    let k_cmg = non_negative(k.cmg_value);
    let k_tcd = non_negative(k.tcd_exposure_value)
        * non_negative(k.tcd_risk_factor)
        * non_negative(k.tcd_cva)
        * K_TCD_COEFFICIENT;
    let k_dtf = non_negative(k.dtf_cash_value) * K_DTF_CASH_COEFFICIENT
        + non_negative(k.dtf_derivatives_value) * K_DTF_DERIVATIVES_COEFFICIENT;
    let k_con = non_negative(k.kcon_value);

    let risk_to_client = k_aum + k_cmh + k_asa + k_coh;
    let risk_to_market = k_npr + k_cmg;
    let risk_to_firm = k_tcd + k_dtf + k_con;

    KFactorRequirement {
        k_aum,
        k_cmh,
        k_asa,
        k_coh,
        k_npr,
        k_cmg,
        k_tcd,
        k_dtf,
        k_con,
        risk_to_client,
        risk_to_market,
        risk_to_firm,
        total_kfr: risk_to_client + risk_to_market + risk_to_firm,
    }
}
