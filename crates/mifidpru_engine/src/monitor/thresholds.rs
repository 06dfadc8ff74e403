//! Threshold levels and the percentages they are measured on.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Utilisation bands, lowest to highest severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ThresholdLevel {
    /// Comfortable buffer maintained.
    #[default]
    Normal,
    /// Monitor closely.
    Watch,
    /// Close to threshold.
    Warning,
    /// Threshold breached.
    Critical,
}

impl ThresholdLevel {
    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Watch => "Watch",
            Self::Warning => "Warning",
            Self::Critical => "Critical",
        }
    }

    /// Guidance shown with the level.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Normal => "Comfortable buffer maintained",
            Self::Watch => "Monitor closely - consider precautionary measures",
            Self::Warning => "Close to threshold - prepare mitigation plans",
            Self::Critical => "Threshold breached - immediate action required",
        }
    }
}

impl fmt::Display for ThresholdLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Trigger points for the threshold levels and the early-warning triggers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorThresholds {
    /// Utilisation percentage at which `Watch` starts.
    pub watch: f64,
    /// Utilisation percentage at which `Warning` starts.
    pub warning: f64,
    /// Utilisation percentage at which `Critical` starts.
    pub critical: f64,
    /// Recovery plan trigger as a multiple of the own funds requirement.
    pub recovery_multiplier: f64,
    /// Wind-down trigger as a multiple of the own funds requirement.
    pub wind_down_multiplier: f64,
}

impl Default for MonitorThresholds {
    fn default() -> Self {
        Self {
            watch: 75.0,
            warning: 90.0,
            critical: 100.0,
            recovery_multiplier: 1.1,
            wind_down_multiplier: 1.05,
        }
    }
}

impl MonitorThresholds {
    /// Level for a requirement measured against the resources held.
    ///
    /// Holding nothing against a positive requirement is `Critical`; a zero
    /// requirement is always `Normal`.
    pub fn level(&self, requirement: f64, actual: f64) -> ThresholdLevel {
        if requirement <= 0.0 {
            return ThresholdLevel::Normal;
        }
        match utilisation_percent(requirement, actual) {
            None => ThresholdLevel::Critical,
            Some(pct) if pct >= self.critical => ThresholdLevel::Critical,
            Some(pct) if pct >= self.warning => ThresholdLevel::Warning,
            Some(pct) if pct >= self.watch => ThresholdLevel::Watch,
            Some(_) => ThresholdLevel::Normal,
        }
    }
}

/// Resources held as a percentage of the requirement; `0` when the
/// requirement is zero.
pub fn buffer_percent(actual: f64, requirement: f64) -> f64 {
    if requirement == 0.0 {
        return 0.0;
    }
    let pct = actual / requirement * 100.0;
    if pct.is_finite() {
        pct
    } else {
        0.0
    }
}

/// Requirement as a percentage of resources held; `None` when nothing is held.
pub fn utilisation_percent(requirement: f64, actual: f64) -> Option<f64> {
    if actual <= 0.0 {
        return None;
    }
    let pct = requirement / actual * 100.0;
    pct.is_finite().then_some(pct)
}
