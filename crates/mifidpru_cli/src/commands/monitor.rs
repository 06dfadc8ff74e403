//! Monitor command implementation
//!
//! Compares resources held against the threshold requirements and raises
//! alerts for anything outside the normal band.

use mifidpru_core::types::{format_gbp, format_percent};
use mifidpru_engine::monitor::{ComplianceAlert, MetricStatus, MetricsHistory};
use mifidpru_engine::ComplianceMetrics;
use serde::Serialize;

use super::render;
use crate::session::AppContext;
use crate::Result;

#[derive(Serialize)]
struct MonitorView<'a> {
    metrics: &'a ComplianceMetrics,
    alerts: &'a [ComplianceAlert],
}

/// Run the monitor command
pub fn run(ctx: &mut AppContext) -> Result<String> {
    let (metrics, alerts) = ctx.monitor();

    let view = MonitorView {
        metrics: &metrics,
        alerts: &alerts,
    };
    render(ctx.config().output_format, &view, || table(&metrics, &alerts))
}

/// Show the monthly history of saved calculations
pub fn history(ctx: &AppContext) -> Result<String> {
    let history = ctx.history()?;
    render(ctx.config().output_format, &history, || history_table(&history))
}

fn status_line(label: &str, s: &MetricStatus) -> String {
    let utilisation = s
        .utilisation_percent
        .map(format_percent)
        .unwrap_or_else(|| "n/a".to_string());
    format!(
        "  {:<14} {:>14} {:>14} {:>10} {:>10}  {}\n",
        label,
        format_gbp(s.requirement),
        format_gbp(s.actual),
        utilisation,
        format_percent(s.buffer_percent),
        s.level
    )
}

fn table(metrics: &ComplianceMetrics, alerts: &[ComplianceAlert]) -> String {
    let mut out = format!(
        "  {:<14} {:>14} {:>14} {:>10} {:>10}  {}\n",
        "Metric", "Requirement", "Held", "Used", "Buffer", "Level"
    );
    out.push_str(&status_line("Own funds", &metrics.own_funds));
    out.push_str(&status_line("Liquid assets", &metrics.liquid_assets));

    let trigger = |name: &str, threshold: f64, breached: bool| {
        format!(
            "  {:<28} {:>14}  {}\n",
            name,
            format_gbp(threshold),
            if breached { "TRIGGERED" } else { "clear" }
        )
    };
    out.push('\n');
    out.push_str(&trigger(
        "Recovery plan trigger",
        metrics.recovery_plan_trigger.threshold,
        metrics.recovery_plan_trigger.breached,
    ));
    out.push_str(&trigger(
        "Wind-down trigger",
        metrics.wind_down_trigger.threshold,
        metrics.wind_down_trigger.breached,
    ));

    out.push('\n');
    if alerts.is_empty() {
        out.push_str("No alerts\n");
    }
    for alert in alerts {
        out.push_str(&format!("{}\n", alert));
    }
    out
}

fn history_table(history: &MetricsHistory) -> String {
    if history.rows().is_empty() {
        return "No saved calculations".to_string();
    }
    let mut out = format!(
        "{:<8} {:>14} {:>10} {:>10} {:>14} {:>10} {:>10}\n",
        "Period", "OFTR", "Buffer", "Band", "LATR", "Buffer", "Band"
    );
    for row in history.rows() {
        out.push_str(&format!(
            "{:<8} {:>14} {:>10} {:>10} {:>14} {:>10} {:>10}\n",
            row.period,
            format_gbp(row.own_funds_requirement),
            format_percent(row.own_funds_buffer()),
            row.own_funds_band().label(),
            format_gbp(row.liquid_assets_requirement),
            format_percent(row.liquid_assets_buffer()),
            row.liquid_assets_band().label(),
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::testing::acme;

    #[test]
    fn test_monitor_flags_liquidity_shortfall() {
        // LATR is 666,667 against 600,000 held.
        let (_dir, mut ctx) = acme();
        let out = run(&mut ctx).unwrap();
        assert!(out.contains("[Critical]"));
        assert!(out.contains("Liquid Assets"));
        assert!(out.contains("Recovery plan trigger"));
    }

    #[test]
    fn test_history_from_snapshots() {
        let (_dir, mut ctx) = acme();
        assert_eq!(history(&ctx).unwrap(), "No saved calculations");

        ctx.save_calculation("first").unwrap();
        ctx.save_calculation("second").unwrap();
        let history = ctx.history().unwrap();
        assert_eq!(history.rows().len(), 1);
        assert!(history.breaches().next().is_some());
    }
}
