//! Compliance alerts.

use super::thresholds::ThresholdLevel;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Resource being monitored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonitoredMetric {
    /// Own funds against the own funds threshold requirement.
    OwnFunds,
    /// Liquid assets against the liquid assets threshold requirement.
    LiquidAssets,
}

impl MonitoredMetric {
    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::OwnFunds => "Own Funds",
            Self::LiquidAssets => "Liquid Assets",
        }
    }

    /// Stable key.
    pub fn key(&self) -> &'static str {
        match self {
            Self::OwnFunds => "own_funds",
            Self::LiquidAssets => "liquid_assets",
        }
    }
}

impl fmt::Display for MonitoredMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An alert raised for a metric outside the `Normal` band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceAlert {
    /// Metric the alert concerns.
    pub metric: MonitoredMetric,
    /// Severity.
    pub level: ThresholdLevel,
    /// Human-readable message.
    pub message: String,
}

impl fmt::Display for ComplianceAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level, self.message)
    }
}
