//! Counterparty exposures for concentration risk.

use crate::types::{ExposureId, ProfileError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Counterparty classification used for concentration limits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CounterpartyType {
    /// Credit institution or investment firm.
    Institution,
    /// Retail client.
    Retail,
    /// Unregulated entity.
    #[default]
    Unregulated,
    /// Group entity.
    Group,
    /// Exchange.
    Exchange,
    /// Clearing house.
    Clearinghouse,
}

impl CounterpartyType {
    /// All counterparty types.
    pub fn all() -> [Self; 6] {
        [
            Self::Institution,
            Self::Retail,
            Self::Unregulated,
            Self::Group,
            Self::Exchange,
            Self::Clearinghouse,
        ]
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Institution => "Institution",
            Self::Retail => "Retail",
            Self::Unregulated => "Unregulated",
            Self::Group => "Group Entity",
            Self::Exchange => "Exchange",
            Self::Clearinghouse => "Clearing House",
        }
    }
}

impl fmt::Display for CounterpartyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CounterpartyType {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "institution" => Ok(Self::Institution),
            "retail" => Ok(Self::Retail),
            "unregulated" => Ok(Self::Unregulated),
            "group" => Ok(Self::Group),
            "exchange" => Ok(Self::Exchange),
            "clearinghouse" | "clearing_house" => Ok(Self::Clearinghouse),
            _ => Err(ProfileError::UnknownCounterpartyType(s.to_string())),
        }
    }
}

/// Exposure to a single counterparty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exposure {
    /// Exposure identifier.
    pub id: ExposureId,
    /// Counterparty name.
    pub counterparty_name: String,
    /// Counterparty classification.
    #[serde(default)]
    pub counterparty_type: CounterpartyType,
    /// Gross exposure value.
    #[serde(default)]
    pub exposure_value: f64,
    /// Collateral held against the exposure.
    #[serde(default)]
    pub collateral: f64,
}

impl Exposure {
    /// Creates an exposure with a generated id and no collateral.
    pub fn new(
        counterparty_name: impl Into<String>,
        counterparty_type: CounterpartyType,
        exposure_value: f64,
    ) -> Self {
        Self {
            id: ExposureId::generate(),
            counterparty_name: counterparty_name.into(),
            counterparty_type,
            exposure_value,
            collateral: 0.0,
        }
    }

    /// Sets the collateral.
    pub fn with_collateral(mut self, collateral: f64) -> Self {
        self.collateral = collateral;
        self
    }

    /// Exposure value net of collateral.
    #[inline]
    pub fn net_exposure(&self) -> f64 {
        self.exposure_value - self.collateral
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_net_exposure() {
        let exposure =
            Exposure::new("Bank A", CounterpartyType::Institution, 300_000.0).with_collateral(50_000.0);
        assert_relative_eq!(exposure.net_exposure(), 250_000.0);
    }

    #[test]
    fn test_over_collateralised_exposure_is_negative() {
        let exposure =
            Exposure::new("Fund B", CounterpartyType::Retail, 10_000.0).with_collateral(15_000.0);
        assert!(exposure.net_exposure() < 0.0);
    }

    #[test]
    fn test_counterparty_type_parse() {
        assert_eq!(
            CounterpartyType::from_str("clearinghouse").unwrap(),
            CounterpartyType::Clearinghouse
        );
        assert_eq!(CounterpartyType::from_str("Group").unwrap(), CounterpartyType::Group);
        assert!(CounterpartyType::from_str("sovereign").is_err());
    }

    #[test]
    fn test_counterparty_type_serde() {
        let json = serde_json::to_string(&CounterpartyType::Clearinghouse).unwrap();
        assert_eq!(json, "\"clearinghouse\"");
    }
}
