//! Calculate command implementation
//!
//! Runs the full calculation pass over the working profile and optionally
//! saves a snapshot.

use mifidpru_core::types::format_gbp;
use mifidpru_engine::classification::SniThresholds;
use mifidpru_engine::CalculationResult;
use tracing::info;

use super::{render, row};
use crate::session::AppContext;
use crate::Result;

/// Run the calculate command
pub fn run(ctx: &mut AppContext, save_as: Option<&str>) -> Result<String> {
    let result = ctx.calculate();
    let mut out = render(ctx.config().output_format, result.as_ref(), || summary(&result))?;

    if let Some(name) = save_as {
        let id = ctx.save_calculation(name)?;
        info!(calculation_id = %id, name, "Snapshot saved");
        if !out.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(&format!("Saved calculation '{}' ({})", name, id));
    }
    Ok(out)
}

/// Text summary of a calculation result.
pub fn summary(result: &CalculationResult) -> String {
    let kfr = &result.k_factor_requirements;
    let of = &result.own_funds_requirement;
    let la = &result.liquid_assets_requirement;
    let icara = &result.icara_summary;

    let mut out = String::new();
    out.push_str(&format!(
        "Classification: {} ({})\n",
        result.firm_classification,
        result.firm_classification.regime()
    ));
    let thresholds = SniThresholds::default();
    for criterion in &result.classification_breaches {
        out.push_str(&format!("  exceeds: {}\n", criterion.describe(&thresholds)));
    }

    out.push_str("\nK-factor requirement\n");
    for (name, value) in kfr.factors() {
        out.push_str(&row(name, format_gbp(value)));
    }
    out.push_str(&row("Total KFR", format_gbp(kfr.total_kfr)));

    out.push_str("\nOwn funds\n");
    out.push_str(&row("PMCR", format_gbp(of.pmcr)));
    out.push_str(&row("FOR", format_gbp(of.for_amount)));
    out.push_str(&row("KFR", format_gbp(of.total_kfr)));
    out.push_str(&row(
        &format!("Own funds requirement ({})", of.binding_component()),
        format_gbp(of.base_own_funds_requirement),
    ));
    out.push_str(&row("Additional for harm", format_gbp(of.additional_own_funds_for_harm)));
    out.push_str(&row("Own funds threshold requirement", format_gbp(of.total_own_funds_requirement)));

    out.push_str("\nLiquid assets\n");
    out.push_str(&row("One third of FOR", format_gbp(la.one_third_for)));
    out.push_str(&row("Wind-down costs", format_gbp(la.wind_down_costs)));
    out.push_str(&row("Additional for harm", format_gbp(la.additional_liquid_assets_for_harm)));
    out.push_str(&row(
        "Liquid assets threshold requirement",
        format_gbp(la.liquid_assets_threshold_requirement),
    ));

    out.push_str("\nICARA\n");
    out.push_str(&row("Own funds held", format_gbp(icara.actual_own_funds)));
    out.push_str(&row("Own funds surplus", format_gbp(icara.own_funds_surplus)));
    out.push_str(&row("Liquid assets held", format_gbp(icara.actual_liquid_assets)));
    out.push_str(&row("Liquid assets surplus", format_gbp(icara.liquid_assets_surplus)));
    out.push_str(&row(
        "Material harms",
        format!("{} of {}", icara.material_harms, icara.total_harms),
    ));
    out.push_str(&format!(
        "\nOverall: {}\n",
        if icara.is_adequate() { "ADEQUATE" } else { "INADEQUATE" }
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::session::testing::acme;

    #[test]
    fn test_summary_shows_binding_requirement() {
        let (_dir, mut ctx) = acme();
        let out = run(&mut ctx, None).unwrap();
        assert!(out.contains("Own funds requirement (FOR)"));
        assert!(out.contains("£1,000,000"));
        assert!(out.contains("K-AUM"));
        assert!(out.contains("Overall: INADEQUATE"));
    }

    #[test]
    fn test_save_snapshot() {
        let (_dir, mut ctx) = acme();
        let out = run(&mut ctx, Some("Q1 2025")).unwrap();
        assert!(out.contains("Saved calculation 'Q1 2025'"));
        assert_eq!(ctx.firm().unwrap().calculations.len(), 1);
    }

    #[test]
    fn test_json_output() {
        let (_dir, ctx) = acme();
        let mut config = ctx.config().clone();
        config.output_format = OutputFormat::Json;
        let mut ctx = ctx.reconfigured(config);

        let out = run(&mut ctx, None).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["fixedOverheadRequirement"]["FOR"], 1_000_000.0);
    }
}
