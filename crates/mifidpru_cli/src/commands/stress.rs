//! Stress command implementation
//!
//! Runs preset or profile scenarios against the working profile.

use mifidpru_core::types::format_gbp;
use mifidpru_engine::stress::{worst_case, MetricDelta};
use mifidpru_engine::{StressPreset, StressResult};
use tracing::info;

use super::{render, row};
use crate::session::AppContext;
use crate::{CliError, Result};

/// Run the stress command
///
/// With a preset only that scenario runs; `record` then stores it in the
/// profile, replacing any earlier copy.
pub fn run(ctx: &mut AppContext, preset: Option<&str>, record: bool) -> Result<String> {
    let preset = preset.map(str::parse::<StressPreset>).transpose()?;
    if record && preset.is_none() {
        return Err(CliError::invalid_argument("--record needs --preset"));
    }

    let results = ctx.run_stress(preset);
    info!(scenarios = results.len(), "Stress run complete");

    let mut out = render(ctx.config().output_format, &results, || table(&results))?;

    if let (true, Some(preset)) = (record, preset) {
        ctx.record_scenario(preset.scenario())?;
        out.push_str(&format!("\nRecorded scenario '{}'", preset.name()));
    }
    Ok(out)
}

/// The built-in presets.
pub fn list_presets() -> String {
    StressPreset::all()
        .iter()
        .map(|p| format!("{:<22} {}\n", p.name(), p.description()))
        .collect()
}

fn delta(label: &str, d: &MetricDelta) -> String {
    let change = match d.percent_change {
        Some(pct) => format!("{:+.1}%", pct),
        None => "n/a".to_string(),
    };
    format!(
        "  {:<34} {:>14} -> {:>14} {:>9}\n",
        label,
        format_gbp(d.baseline),
        format_gbp(d.stressed),
        change
    )
}

fn table(results: &[StressResult]) -> String {
    let mut out = String::new();
    for r in results {
        out.push_str(&format!("{}\n", r.scenario_name));
        out.push_str(&delta("K-factor requirement", &r.impacts.kfr));
        out.push_str(&delta("Fixed overhead requirement", &r.impacts.for_amount));
        out.push_str(&delta("Own funds threshold requirement", &r.impacts.own_funds));
        out.push_str(&delta("Liquid assets threshold requirement", &r.impacts.liquid_assets));
        out.push_str(&row(
            "Stressed own funds incl. add-on",
            format_gbp(r.stressed_own_funds_total()),
        ));
        out.push_str(&row(
            "Stressed liquid assets incl. add-on",
            format_gbp(r.stressed_liquid_assets_total()),
        ));
        if !r.unmapped_factors.is_empty() {
            out.push_str(&format!("  not modelled: {}\n", r.unmapped_factors.join(", ")));
        }
        out.push('\n');
    }
    if let Some(worst) = worst_case(results) {
        out.push_str(&format!(
            "Most severe: {} ({})\n",
            worst.scenario_name,
            format_gbp(worst.stressed_own_funds_total())
        ));
    }
    out
}
