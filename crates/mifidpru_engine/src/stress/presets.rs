//! Preset stress scenarios.
//!
//! Provides ready-to-use scenarios covering the common ICARA stresses:
//! - Market downturn (AUM and revenue fall, clients withdraw)
//! - Operational failure (cost spike and remediation)
//! - Loss of a key client

use crate::error::EngineError;
use mifidpru_core::profile::{Impact, StressFactor, StressScenario};
use std::fmt;
use std::str::FromStr;

/// Built-in stress scenarios.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StressPreset {
    /// Significant market correction.
    MarketDownturn,
    /// Major operational event.
    OperationalFailure,
    /// Departure of the largest client relationship.
    KeyClientLoss,
}

impl StressPreset {
    /// All presets in display order.
    pub fn all() -> [Self; 3] {
        [
            Self::MarketDownturn,
            Self::OperationalFailure,
            Self::KeyClientLoss,
        ]
    }

    /// Scenario name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::MarketDownturn => "Market Downturn",
            Self::OperationalFailure => "Operational Failure",
            Self::KeyClientLoss => "Key Client Loss",
        }
    }

    /// Scenario narrative.
    pub fn description(&self) -> &'static str {
        match self {
            Self::MarketDownturn => "Significant market correction affecting AUM and revenues",
            Self::OperationalFailure => "Major operational event such as system failure",
            Self::KeyClientLoss => "Loss of the firm's largest client relationship",
        }
    }

    fn id(&self) -> &'static str {
        match self {
            Self::MarketDownturn => "scenario_1",
            Self::OperationalFailure => "scenario_2",
            Self::KeyClientLoss => "scenario_3",
        }
    }

    fn impacts(&self) -> Vec<Impact> {
        match self {
            Self::MarketDownturn => vec![
                Impact::new(StressFactor::Aum, -0.3),
                Impact::new(StressFactor::Revenue, -0.25),
                Impact::new(StressFactor::ClientOutflows, 0.2),
            ],
            Self::OperationalFailure => vec![
                Impact::new(StressFactor::OperationalCosts, 0.5),
                Impact::new(StressFactor::ClientOutflows, 0.15),
                Impact::new(StressFactor::RemediationCosts, 1.0),
            ],
            Self::KeyClientLoss => vec![
                Impact::new(StressFactor::Revenue, -0.4),
                Impact::new(StressFactor::ClientOutflows, 0.3),
                Impact::new(StressFactor::LegalCosts, 0.2),
            ],
        }
    }

    /// Flat additional (own funds, liquid assets) held under this scenario.
    fn additional_requirements(&self) -> (f64, f64) {
        match self {
            Self::MarketDownturn => (500_000.0, 300_000.0),
            Self::OperationalFailure => (600_000.0, 400_000.0),
            Self::KeyClientLoss => (400_000.0, 250_000.0),
        }
    }

    /// Builds the scenario.
    pub fn scenario(&self) -> StressScenario {
        let (own_funds, liquid_assets) = self.additional_requirements();
        self.impacts().into_iter().fold(
            StressScenario::new(self.name(), self.description())
                .with_id(self.id())
                .with_additional_requirements(own_funds, liquid_assets),
            StressScenario::with_impact,
        )
    }
}

impl fmt::Display for StressPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StressPreset {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "marketdownturn" => Ok(Self::MarketDownturn),
            "operationalfailure" => Ok(Self::OperationalFailure),
            "keyclientloss" => Ok(Self::KeyClientLoss),
            _ => Err(EngineError::UnknownPreset(s.to_string())),
        }
    }
}

/// The preset scenarios, in display order.
pub fn default_scenarios() -> Vec<StressScenario> {
    StressPreset::all().iter().map(StressPreset::scenario).collect()
}
