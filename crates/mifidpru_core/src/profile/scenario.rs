//! Stress scenario definitions.

use crate::types::ScenarioId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Business factor a stress impact moves.
///
/// Only some factors have a mapping onto profile fields; the rest are carried
/// for documentation and have no effect on the recalculation. Unknown factor
/// names are preserved verbatim in [`StressFactor::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StressFactor {
    /// Assets under management.
    Aum,
    /// Revenue.
    Revenue,
    /// Client outflows.
    ClientOutflows,
    /// Operational costs.
    OperationalCosts,
    /// Regulatory costs.
    RegulatoryCosts,
    /// Legal costs.
    LegalCosts,
    /// Credit losses.
    CreditLosses,
    /// Recruitment costs.
    RecruitmentCosts,
    /// Remediation costs.
    RemediationCosts,
    /// Any other factor name.
    Other(String),
}

impl StressFactor {
    /// Factor key used in the persistence contract.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Aum => "aum",
            Self::Revenue => "revenue",
            Self::ClientOutflows => "client_outflows",
            Self::OperationalCosts => "operational_costs",
            Self::RegulatoryCosts => "regulatory_costs",
            Self::LegalCosts => "legal_costs",
            Self::CreditLosses => "credit_losses",
            Self::RecruitmentCosts => "recruitment_costs",
            Self::RemediationCosts => "remediation_costs",
            Self::Other(name) => name,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &str {
        match self {
            Self::Aum => "Assets Under Management",
            Self::Revenue => "Revenue",
            Self::ClientOutflows => "Client Outflows",
            Self::OperationalCosts => "Operational Costs",
            Self::RegulatoryCosts => "Regulatory Costs",
            Self::LegalCosts => "Legal Costs",
            Self::CreditLosses => "Credit Losses",
            Self::RecruitmentCosts => "Recruitment Costs",
            Self::RemediationCosts => "Remediation Costs",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for StressFactor {
    fn from(s: String) -> Self {
        match s.as_str() {
            "aum" => Self::Aum,
            "revenue" => Self::Revenue,
            "client_outflows" => Self::ClientOutflows,
            "operational_costs" => Self::OperationalCosts,
            "regulatory_costs" => Self::RegulatoryCosts,
            "legal_costs" => Self::LegalCosts,
            "credit_losses" => Self::CreditLosses,
            "recruitment_costs" => Self::RecruitmentCosts,
            "remediation_costs" => Self::RemediationCosts,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for StressFactor {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<StressFactor> for String {
    fn from(factor: StressFactor) -> Self {
        match factor {
            StressFactor::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for StressFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single movement applied by a scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Impact {
    /// Factor being moved.
    pub factor: StressFactor,
    /// Description shown in the stress testing section.
    #[serde(default)]
    pub description: String,
    /// Signed fractional change, e.g. `-0.3` for a 30% fall.
    pub change: f64,
}

impl Impact {
    /// Creates an impact described by the factor's label.
    pub fn new(factor: impl Into<StressFactor>, change: f64) -> Self {
        let factor = factor.into();
        Self {
            description: factor.label().to_string(),
            factor,
            change,
        }
    }

    /// Overrides the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// A named set of impacts plus flat additional requirements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StressScenario {
    /// Scenario identifier.
    pub id: ScenarioId,
    /// Scenario name.
    pub name: String,
    /// Scenario narrative.
    #[serde(default)]
    pub description: String,
    /// Impacts, applied in order.
    #[serde(default)]
    pub impacts: Vec<Impact>,
    /// Own funds the firm would add under this scenario.
    #[serde(default)]
    pub additional_own_funds: f64,
    /// Liquid assets the firm would add under this scenario.
    #[serde(default)]
    pub additional_liquid_assets: f64,
}

impl StressScenario {
    /// Creates an empty scenario with a generated id.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: ScenarioId::generate(),
            name: name.into(),
            description: description.into(),
            impacts: Vec::new(),
            additional_own_funds: 0.0,
            additional_liquid_assets: 0.0,
        }
    }

    /// Sets the identifier.
    pub fn with_id(mut self, id: impl Into<ScenarioId>) -> Self {
        self.id = id.into();
        self
    }

    /// Appends an impact.
    pub fn with_impact(mut self, impact: Impact) -> Self {
        self.impacts.push(impact);
        self
    }

    /// Sets the flat additional requirements.
    pub fn with_additional_requirements(mut self, own_funds: f64, liquid_assets: f64) -> Self {
        self.additional_own_funds = own_funds;
        self.additional_liquid_assets = liquid_assets;
        self
    }
}
