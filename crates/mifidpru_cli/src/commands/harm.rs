//! Harm command implementation
//!
//! Maintains the risk register of the working profile.

use mifidpru_core::profile::{impact_label, likelihood_label, Harm, HarmCategory};
use mifidpru_core::types::{format_gbp, HarmId};

use super::render;
use crate::session::AppContext;
use crate::{CliError, Result};

/// Fields of a new harm
#[derive(Debug, Clone, Default)]
pub struct NewHarm {
    /// What could go wrong
    pub description: String,
    /// Who it falls on
    pub category: String,
    /// Likelihood, 1 to 5
    pub likelihood: u8,
    /// Impact, 1 to 5
    pub impact: u8,
    /// Existing controls
    pub controls: Option<String>,
    /// Additional own funds held against the harm
    pub own_funds: f64,
    /// Additional liquid assets held against the harm
    pub liquid_assets: f64,
}

/// Add a harm to the register
pub fn add(ctx: &mut AppContext, new: NewHarm) -> Result<String> {
    if new.description.trim().is_empty() {
        return Err(CliError::invalid_argument("harm description is required"));
    }
    for (name, value) in [("likelihood", new.likelihood), ("impact", new.impact)] {
        if !(1..=5).contains(&value) {
            return Err(CliError::invalid_argument(format!(
                "{} must be between 1 and 5, got {}",
                name, value
            )));
        }
    }
    let category: HarmCategory = new.category.parse()?;

    let mut harm = Harm::new(new.description, category, new.likelihood, new.impact)
        .with_additional_own_funds(new.own_funds)
        .with_additional_liquid_assets(new.liquid_assets);
    if let Some(controls) = new.controls {
        harm = harm.with_controls(controls);
    }
    let id = harm.id.clone();
    let material = harm.is_material();
    ctx.add_harm(harm)?;

    Ok(format!(
        "Added harm {}{}",
        id,
        if material { " (material)" } else { "" }
    ))
}

/// Remove a harm from the register
pub fn remove(ctx: &mut AppContext, id: &str) -> Result<String> {
    let removed = ctx.remove_harm(&HarmId::new(id))?;
    Ok(format!("Removed harm '{}'", removed.description))
}

/// List the register, highest risk score first
pub fn list(ctx: &AppContext) -> Result<String> {
    let register = ctx.register();
    let ranked = register.ranked();
    render(ctx.config().output_format, &ranked, || {
        if ranked.is_empty() {
            return "Risk register is empty".to_string();
        }
        let mut out = String::new();
        for (category, harms) in register.by_category() {
            out.push_str(&format!("{}\n", category.heading()));
            for h in harms {
                out.push_str(&format!(
                    "  {} {}\n    likelihood {} ({}), impact {} ({}), score {} {}{}\n",
                    h.id,
                    h.description,
                    h.likelihood,
                    likelihood_label(h.likelihood),
                    h.impact,
                    impact_label(h.impact),
                    h.risk_score(),
                    h.rating(),
                    if h.is_material() { ", material" } else { "" }
                ));
                if h.is_material() {
                    out.push_str(&format!(
                        "    additional own funds {}, liquid assets {}\n",
                        format_gbp(h.additional_own_funds),
                        format_gbp(h.additional_liquid_assets)
                    ));
                }
            }
        }
        let totals = register.allowances();
        out.push_str(&format!(
            "\n{} material harm(s): own funds {}, liquid assets {}\n",
            totals.material_count,
            format_gbp(totals.additional_own_funds),
            format_gbp(totals.additional_liquid_assets)
        ));
        out
    })
}
