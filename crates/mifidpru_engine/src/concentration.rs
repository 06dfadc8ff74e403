//! Concentration risk and the K-CON add-on.
//!
//! Each counterparty's net exposure is measured against a limit expressed as
//! a share of the firm's own funds requirement. The amount by which exposures
//! exceed their limits becomes K-CON.

use mifidpru_core::profile::{CounterpartyType, Exposure};
use mifidpru_core::types::{percent_of, ExposureId};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Reference own funds used when no requirement has been calculated.
pub const DEFAULT_REFERENCE_OWN_FUNDS: f64 = 1_000_000.0;

/// Limit as a share of own funds. Applied uniformly to every counterparty type.
pub const CONCENTRATION_LIMIT_RATE: f64 = 0.25;

/// Limit for a counterparty type given the reference own funds.
///
/// Every type gets the same [`CONCENTRATION_LIMIT_RATE`]; the type is accepted
/// so per-type limits can be introduced without changing callers.
pub fn concentration_limit(_counterparty_type: CounterpartyType, own_funds: f64) -> f64 {
    own_funds * CONCENTRATION_LIMIT_RATE
}

/// Assessment of one exposure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExposureAssessment {
    /// Exposure identifier.
    pub exposure_id: ExposureId,
    /// Counterparty name.
    pub counterparty_name: String,
    /// Counterparty classification.
    pub counterparty_type: CounterpartyType,
    /// Exposure value less collateral.
    pub net_exposure: f64,
    /// Net exposure as a percentage of own funds; `None` when own funds are zero.
    pub exposure_percent: Option<f64>,
    /// Applicable limit.
    pub limit: f64,
    /// Net exposure strictly above the limit.
    pub exceeds_limit: bool,
    /// Amount above the limit, zero when within it.
    pub excess: f64,
}

/// Result of a concentration assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcentrationResult {
    /// Own funds figure the limits were derived from.
    pub own_funds: f64,
    /// Per-exposure assessments, in input order.
    pub exposures: Vec<ExposureAssessment>,
    /// Number of exposures above their limit.
    pub exceeding_exposures: usize,
    /// Concentration risk add-on.
    pub kcon: f64,
}

impl ConcentrationResult {
    /// Exposures above their limit.
    pub fn breaches(&self) -> impl Iterator<Item = &ExposureAssessment> {
        self.exposures.iter().filter(|e| e.exceeds_limit)
    }

    /// Largest exposure by net value.
    pub fn largest(&self) -> Option<&ExposureAssessment> {
        self.exposures
            .iter()
            .max_by(|a, b| a.net_exposure.total_cmp(&b.net_exposure))
    }
}

/// Assesses a single exposure against `own_funds`.
pub fn assess_exposure(exposure: &Exposure, own_funds: f64) -> ExposureAssessment {
    let net_exposure = exposure.net_exposure();
    let limit = concentration_limit(exposure.counterparty_type, own_funds);
    let exceeds_limit = net_exposure > limit;
    ExposureAssessment {
        exposure_id: exposure.id.clone(),
        counterparty_name: exposure.counterparty_name.clone(),
        counterparty_type: exposure.counterparty_type,
        net_exposure,
        exposure_percent: percent_of(net_exposure, own_funds),
        limit,
        exceeds_limit,
        excess: if exceeds_limit { net_exposure - limit } else { 0.0 },
    }
}

/// Assesses every exposure and computes K-CON.
///
/// `own_funds` is the current own funds requirement; pass `None` to use
/// [`DEFAULT_REFERENCE_OWN_FUNDS`].
///
/// # Examples
///
/// ```
/// use mifidpru_core::profile::{CounterpartyType, Exposure};
/// use mifidpru_engine::concentration::assess_concentration;
///
/// let exposures = vec![
///     Exposure::new("Bank A", CounterpartyType::Institution, 300_000.0).with_collateral(50_000.0),
///     Exposure::new("Fund B", CounterpartyType::Unregulated, 400_000.0),
/// ];
/// let result = assess_concentration(&exposures, Some(1_000_000.0));
/// assert!(!result.exposures[0].exceeds_limit);
/// assert!(result.exposures[1].exceeds_limit);
/// assert_eq!(result.kcon, 150_000.0);
/// ```
pub fn assess_concentration(exposures: &[Exposure], own_funds: Option<f64>) -> ConcentrationResult {
    let own_funds = match own_funds {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => DEFAULT_REFERENCE_OWN_FUNDS,
    };

    let assessed: Vec<ExposureAssessment> = exposures
        .iter()
        .map(|e| assess_exposure(e, own_funds))
        .collect();

    for breach in assessed.iter().filter(|a| a.exceeds_limit) {
        warn!(
            counterparty = %breach.counterparty_name,
            net_exposure = breach.net_exposure,
            limit = breach.limit,
            "Concentration limit exceeded"
        );
    }

    let exceeding_exposures = assessed.iter().filter(|a| a.exceeds_limit).count();
    let kcon: f64 = assessed.iter().map(|a| a.excess).sum();
    debug!(own_funds, exposures = assessed.len(), exceeding_exposures, kcon, "Concentration assessed");

    ConcentrationResult {
        own_funds,
        exposures: assessed,
        exceeding_exposures,
        kcon,
    }
}
