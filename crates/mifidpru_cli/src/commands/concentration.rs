//! Concentration command implementation
//!
//! Records counterparty exposures and assesses them against the
//! concentration limit.

use mifidpru_core::profile::{CounterpartyType, Exposure};
use mifidpru_core::types::{format_gbp, format_percent};
use mifidpru_engine::ConcentrationResult;

use super::render;
use crate::session::AppContext;
use crate::{CliError, Result};

/// Add an exposure to the working profile
pub fn add_exposure(
    ctx: &mut AppContext,
    counterparty: &str,
    counterparty_type: &str,
    value: f64,
    collateral: f64,
) -> Result<String> {
    if counterparty.trim().is_empty() {
        return Err(CliError::invalid_argument("counterparty name is required"));
    }
    let counterparty_type: CounterpartyType = counterparty_type.parse()?;
    let exposure = Exposure::new(counterparty, counterparty_type, value).with_collateral(collateral);
    let id = exposure.id.clone();
    ctx.add_exposure(exposure)?;
    Ok(format!("Added exposure to {} ({})", counterparty, id))
}

/// Run the concentration command
pub fn run(ctx: &mut AppContext) -> Result<String> {
    let result = ctx.concentration();
    render(ctx.config().output_format, &result, || table(&result))
}

fn table(result: &ConcentrationResult) -> String {
    if result.exposures.is_empty() {
        return "No exposures recorded".to_string();
    }
    let mut out = format!("Reference own funds: {}\n\n", format_gbp(result.own_funds));
    out.push_str(&format!(
        "{:<28} {:<14} {:>14} {:>8} {:>14} {:>12}\n",
        "Counterparty", "Type", "Net", "% OF", "Limit", "Excess"
    ));
    for e in &result.exposures {
        out.push_str(&format!(
            "{:<28} {:<14} {:>14} {:>8} {:>14} {:>12}{}\n",
            e.counterparty_name,
            e.counterparty_type.label(),
            format_gbp(e.net_exposure),
            e.exposure_percent
                .map(format_percent)
                .unwrap_or_else(|| "n/a".to_string()),
            format_gbp(e.limit),
            format_gbp(e.excess),
            if e.exceeds_limit { "  !" } else { "" }
        ));
    }
    out.push_str(&format!(
        "\n{} exposure(s) above limit, K-CON {}\n",
        result.exceeding_exposures,
        format_gbp(result.kcon)
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::testing::acme;

    #[test]
    fn test_breach_is_flagged() {
        let (_dir, mut ctx) = acme();
        add_exposure(&mut ctx, "Bank A", "institution", 100_000.0, 0.0).unwrap();
        add_exposure(&mut ctx, "Fund B", "unregulated", 600_000.0, 50_000.0).unwrap();

        let out = run(&mut ctx).unwrap();
        assert!(out.contains("1 exposure(s) above limit"));
        assert!(out.contains("Fund B"));
        assert!(out.contains("£550,000"));
    }

    #[test]
    fn test_unknown_counterparty_type() {
        let (_dir, mut ctx) = acme();
        let err = add_exposure(&mut ctx, "X", "sovereign", 1.0, 0.0).unwrap_err();
        assert!(matches!(err, CliError::Profile(_)));
        assert!(ctx.profile().exposures.is_empty());
    }
}
