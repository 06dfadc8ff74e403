//! Mapping from stress factors to the profile fields they move.

use mifidpru_core::profile::{FirmProfile, StressFactor};

/// Profile field moved by a stress factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StressTarget {
    /// `classification.aum`.
    Aum,
    /// `overheads.totalExpenditure`.
    TotalExpenditure,
}

impl StressTarget {
    /// Reads the target field.
    pub fn read(&self, profile: &FirmProfile) -> f64 {
        match self {
            Self::Aum => profile.classification.aum,
            Self::TotalExpenditure => profile.overheads.total_expenditure,
        }
    }

    /// Writes the target field.
    pub fn write(&self, profile: &mut FirmProfile, value: f64) {
        match self {
            Self::Aum => profile.classification.aum = value,
            Self::TotalExpenditure => profile.overheads.total_expenditure = value,
        }
    }
}

/// How a factor's change moves its target.
///
/// The stressed value is `baseline * (1 + sensitivity * change)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactorMapping {
    /// Field being moved.
    pub target: StressTarget,
    /// Multiplier applied to the scenario change.
    pub sensitivity: f64,
}

impl FactorMapping {
    /// Stressed value for a baseline value and a signed change.
    #[inline]
    pub fn stressed_value(&self, baseline: f64, change: f64) -> f64 {
        baseline * (1.0 + self.sensitivity * change)
    }
}

/// Mapping for a factor, or `None` when the factor has no modelled effect.
pub fn factor_mapping(factor: &StressFactor) -> Option<FactorMapping> {
    let (target, sensitivity) = match factor {
        StressFactor::Aum => (StressTarget::Aum, 1.0),
        // Lower revenue is modelled as a cut in expenditure.
        StressFactor::Revenue => (StressTarget::TotalExpenditure, -0.5),
        StressFactor::ClientOutflows => (StressTarget::Aum, -0.5),
        StressFactor::OperationalCosts => (StressTarget::TotalExpenditure, 0.3),
        StressFactor::RegulatoryCosts
        | StressFactor::LegalCosts
        | StressFactor::CreditLosses
        | StressFactor::RecruitmentCosts
        | StressFactor::RemediationCosts
        | StressFactor::Other(_) => return None,
    };
    Some(FactorMapping {
        target,
        sensitivity,
    })
}
