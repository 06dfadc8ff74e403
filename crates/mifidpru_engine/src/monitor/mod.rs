//! Compliance monitoring.
//!
//! Compares the resources a firm holds with the thresholds from a
//! calculation pass and raises alerts as the buffer erodes.
//!
//! Levels are measured on utilisation: the requirement as a percentage of
//! resources held. A firm holding 1.5m against a 1m requirement is 66.7%
//! utilised and `Normal`; one holding exactly 1m is `Critical`.

mod alerts;
mod history;
mod thresholds;

pub use alerts::{ComplianceAlert, MonitoredMetric};
pub use history::{BufferBand, MetricsHistory, MetricsSnapshot};
pub use thresholds::{buffer_percent, utilisation_percent, MonitorThresholds, ThresholdLevel};

use crate::calculation::CalculationResult;
use mifidpru_core::types::{format_gbp, format_percent, non_negative};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Position of one resource against its requirement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricStatus {
    /// Threshold requirement.
    pub requirement: f64,
    /// Resources held.
    pub actual: f64,
    /// Resources held as a percentage of the requirement.
    pub buffer_percent: f64,
    /// Requirement as a percentage of resources held.
    pub utilisation_percent: Option<f64>,
    /// Resources held minus the requirement.
    pub surplus: f64,
    /// Threshold level.
    pub level: ThresholdLevel,
}

/// An early-warning trigger on own funds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerStatus {
    /// Own funds level at which the trigger fires.
    pub threshold: f64,
    /// Own funds held are below the trigger.
    pub breached: bool,
}

/// Compliance position for one calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceMetrics {
    /// Own funds position.
    pub own_funds: MetricStatus,
    /// Liquid assets position.
    pub liquid_assets: MetricStatus,
    /// Recovery plan trigger.
    pub recovery_plan_trigger: TriggerStatus,
    /// Wind-down trigger.
    pub wind_down_trigger: TriggerStatus,
}

impl ComplianceMetrics {
    /// Most severe level across both resources.
    pub fn overall_level(&self) -> ThresholdLevel {
        self.own_funds.level.max(self.liquid_assets.level)
    }

    fn status(&self, metric: MonitoredMetric) -> &MetricStatus {
        match metric {
            MonitoredMetric::OwnFunds => &self.own_funds,
            MonitoredMetric::LiquidAssets => &self.liquid_assets,
        }
    }
}

/// Monitor applying a set of thresholds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ComplianceMonitor {
    thresholds: MonitorThresholds,
}

impl ComplianceMonitor {
    /// Creates a monitor with explicit thresholds.
    pub fn new(thresholds: MonitorThresholds) -> Self {
        Self { thresholds }
    }

    /// Thresholds in use.
    pub fn thresholds(&self) -> &MonitorThresholds {
        &self.thresholds
    }

    fn status(&self, requirement: f64, actual: f64) -> MetricStatus {
        MetricStatus {
            requirement,
            actual,
            buffer_percent: buffer_percent(actual, requirement),
            utilisation_percent: utilisation_percent(requirement, actual),
            surplus: actual - requirement,
            level: self.thresholds.level(requirement, actual),
        }
    }

    /// Measures the resources held against a calculation's thresholds.
    ///
    /// # Examples
    ///
    /// ```
    /// use mifidpru_core::profile::FirmProfile;
    /// use mifidpru_engine::calculation::run_calculation;
    /// use mifidpru_engine::monitor::{ComplianceMonitor, ThresholdLevel};
    ///
    /// let result = run_calculation(&FirmProfile::default());
    /// let metrics = ComplianceMonitor::default().assess(&result, 80_000.0, 0.0);
    ///
    /// assert_eq!(metrics.own_funds.level, ThresholdLevel::Warning);
    /// assert!(metrics.recovery_plan_trigger.breached);
    /// assert!(!metrics.wind_down_trigger.breached);
    /// ```
    pub fn assess(
        &self,
        result: &CalculationResult,
        actual_own_funds: f64,
        actual_liquid_assets: f64,
    ) -> ComplianceMetrics {
        let ofr = result.total_own_funds_requirement();
        let latr = result.liquid_assets_threshold_requirement();
        let actual_own_funds = non_negative(actual_own_funds);
        let actual_liquid_assets = non_negative(actual_liquid_assets);

        let recovery = ofr * self.thresholds.recovery_multiplier;
        let wind_down = ofr * self.thresholds.wind_down_multiplier;

        ComplianceMetrics {
            own_funds: self.status(ofr, actual_own_funds),
            liquid_assets: self.status(latr, actual_liquid_assets),
            recovery_plan_trigger: TriggerStatus {
                threshold: recovery,
                breached: actual_own_funds < recovery,
            },
            wind_down_trigger: TriggerStatus {
                threshold: wind_down,
                breached: actual_own_funds < wind_down,
            },
        }
    }

    /// Alerts for every metric outside the `Normal` band.
    pub fn alerts(&self, metrics: &ComplianceMetrics) -> Vec<ComplianceAlert> {
        [MonitoredMetric::OwnFunds, MonitoredMetric::LiquidAssets]
            .into_iter()
            .filter_map(|metric| {
                let status = metrics.status(metric);
                if status.level == ThresholdLevel::Normal {
                    return None;
                }
                let message = format!(
                    "{} at {} of threshold ({} of {})",
                    metric.label(),
                    format_percent(status.buffer_percent),
                    format_gbp(status.actual),
                    format_gbp(status.requirement),
                );
                warn!(metric = metric.key(), level = %status.level, "{}", message);
                Some(ComplianceAlert {
                    metric,
                    level: status.level,
                    message,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::run_calculation;
    use mifidpru_core::profile::{FirmActivity, FirmProfile};

    fn sample_result() -> CalculationResult {
        let mut profile = FirmProfile::default();
        profile.firm_activity = FirmActivity::Dealing;
        profile.additional_own_funds_for_harm = 250_000.0;
        profile.overheads.total_expenditure = 3_600_000.0;
        run_calculation(&profile)
    }

    #[test]
    fn test_comfortable_position_has_no_alerts() {
        let result = sample_result();
        assert_eq!(result.total_own_funds_requirement(), 1_150_000.0);

        let monitor = ComplianceMonitor::default();
        let metrics = monitor.assess(&result, 5_000_000.0, 5_000_000.0);
        assert_eq!(metrics.overall_level(), ThresholdLevel::Normal);
        assert!(monitor.alerts(&metrics).is_empty());
        assert!(!metrics.recovery_plan_trigger.breached);
    }

    #[test]
    fn test_shortfall_raises_critical_alert() {
        let result = sample_result();
        let monitor = ComplianceMonitor::default();
        let metrics = monitor.assess(&result, 1_000_000.0, 5_000_000.0);

        assert_eq!(metrics.own_funds.level, ThresholdLevel::Critical);
        assert!(metrics.own_funds.surplus < 0.0);
        let alerts = monitor.alerts(&metrics);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].metric, MonitoredMetric::OwnFunds);
        assert_eq!(
            alerts[0].message,
            "Own Funds at 87.0% of threshold (£1,000,000 of £1,150,000)"
        );
    }

    #[test]
    fn test_triggers() {
        let result = sample_result();
        let metrics = ComplianceMonitor::default().assess(&result, 1_230_000.0, 0.0);
        assert!((metrics.recovery_plan_trigger.threshold - 1_265_000.0).abs() < 1e-6);
        assert!((metrics.wind_down_trigger.threshold - 1_207_500.0).abs() < 1e-6);
        assert!(metrics.recovery_plan_trigger.breached);
        assert!(!metrics.wind_down_trigger.breached);
    }

    #[test]
    fn test_nothing_held_is_critical() {
        let result = sample_result();
        let metrics = ComplianceMonitor::default().assess(&result, 0.0, 0.0);
        assert_eq!(metrics.own_funds.level, ThresholdLevel::Critical);
        assert_eq!(metrics.own_funds.buffer_percent, 0.0);
        assert_eq!(metrics.own_funds.utilisation_percent, None);
    }
}
