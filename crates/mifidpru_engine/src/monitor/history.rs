//! Monthly metrics history.

use super::thresholds::buffer_percent;
use crate::calculation::CalculationResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Band of a buffer percentage in the history table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BufferBand {
    /// Below 100%.
    Breach,
    /// 100% to below 120%.
    Tight,
    /// 120% to below 150%.
    Adequate,
    /// 150% and above.
    Strong,
}

impl BufferBand {
    /// Band for a buffer percentage.
    pub fn from_buffer(buffer_percent: f64) -> Self {
        if buffer_percent >= 150.0 {
            Self::Strong
        } else if buffer_percent >= 120.0 {
            Self::Adequate
        } else if buffer_percent >= 100.0 {
            Self::Tight
        } else {
            Self::Breach
        }
    }

    /// Band for resources held against a requirement. A zero requirement is
    /// `Strong`.
    pub fn for_position(actual: f64, requirement: f64) -> Self {
        if requirement <= 0.0 {
            Self::Strong
        } else {
            Self::from_buffer(buffer_percent(actual, requirement))
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Breach => "Breach",
            Self::Tight => "Tight",
            Self::Adequate => "Adequate",
            Self::Strong => "Strong",
        }
    }
}

impl fmt::Display for BufferBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One period's requirements and resources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    /// Period label, e.g. `"Jan 2025"`.
    pub period: String,
    /// Own funds threshold requirement.
    pub own_funds_requirement: f64,
    /// Own funds held.
    pub actual_own_funds: f64,
    /// Liquid assets threshold requirement.
    pub liquid_assets_requirement: f64,
    /// Liquid assets held.
    pub actual_liquid_assets: f64,
    /// Total K-factor requirement.
    pub k_factor_requirement: f64,
    /// Fixed overhead requirement.
    pub fixed_overhead_requirement: f64,
}

impl MetricsSnapshot {
    /// Builds a snapshot from a calculation and the resources held.
    pub fn from_result(
        period: impl Into<String>,
        result: &CalculationResult,
        actual_own_funds: f64,
        actual_liquid_assets: f64,
    ) -> Self {
        Self {
            period: period.into(),
            own_funds_requirement: result.total_own_funds_requirement(),
            actual_own_funds,
            liquid_assets_requirement: result.liquid_assets_threshold_requirement(),
            actual_liquid_assets,
            k_factor_requirement: result.k_factor_requirements.total_kfr,
            fixed_overhead_requirement: result.fixed_overhead_requirement.for_amount,
        }
    }

    /// Own funds held as a percentage of the requirement.
    pub fn own_funds_buffer(&self) -> f64 {
        buffer_percent(self.actual_own_funds, self.own_funds_requirement)
    }

    /// Liquid assets held as a percentage of the requirement.
    pub fn liquid_assets_buffer(&self) -> f64 {
        buffer_percent(self.actual_liquid_assets, self.liquid_assets_requirement)
    }

    /// Band of the own funds buffer.
    pub fn own_funds_band(&self) -> BufferBand {
        BufferBand::for_position(self.actual_own_funds, self.own_funds_requirement)
    }

    /// Band of the liquid assets buffer.
    pub fn liquid_assets_band(&self) -> BufferBand {
        BufferBand::for_position(self.actual_liquid_assets, self.liquid_assets_requirement)
    }
}

/// Ordered sequence of period snapshots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsHistory {
    rows: Vec<MetricsSnapshot>,
}

impl MetricsHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a snapshot, replacing any existing row for the same period.
    pub fn record(&mut self, snapshot: MetricsSnapshot) {
        match self.rows.iter_mut().find(|r| r.period == snapshot.period) {
            Some(existing) => *existing = snapshot,
            None => self.rows.push(snapshot),
        }
    }

    /// Rows in recording order.
    pub fn rows(&self) -> &[MetricsSnapshot] {
        &self.rows
    }

    /// Most recent row.
    pub fn latest(&self) -> Option<&MetricsSnapshot> {
        self.rows.last()
    }

    /// Rows where either buffer is in breach.
    pub fn breaches(&self) -> impl Iterator<Item = &MetricsSnapshot> {
        self.rows.iter().filter(|r| {
            r.own_funds_band() == BufferBand::Breach || r.liquid_assets_band() == BufferBand::Breach
        })
    }
}
