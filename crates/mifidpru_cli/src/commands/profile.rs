//! Profile command implementation
//!
//! Shows the working profile and replaces it from a JSON file.

use std::path::Path;

use mifidpru_core::profile::{FirmActivity, FirmProfile, InputCorrection};
use mifidpru_core::types::format_gbp;
use tracing::warn;

use super::{read_json_file, render, row};
use crate::session::AppContext;
use crate::Result;

/// Show the working profile
pub fn show(ctx: &AppContext) -> Result<String> {
    let firm = ctx.firm()?;
    let profile = ctx.profile();
    render(ctx.config().output_format, profile.as_ref(), || {
        let mut out = format!("Profile: {}\n\n", firm.name);
        out.push_str(&row("Firm activity", profile.firm_activity));
        out.push_str(&row("Wind-down period (months)", profile.wind_down_period));
        out.push_str(&row("Total expenditure", format_gbp(profile.overheads.total_expenditure)));
        out.push_str(&row("Own funds held", format_gbp(profile.actual_own_funds)));
        out.push_str(&row("Liquid assets held", format_gbp(profile.actual_liquid_assets)));
        out.push_str(&row("Identified harms", profile.identified_harms.len()));
        out.push_str(&row("Stress scenarios", profile.stress_scenarios.len()));
        out.push_str(&row("Exposures", profile.exposures.len()));
        out
    })
}

/// Replace the working profile with the contents of a JSON file
pub fn load(ctx: &mut AppContext, path: &Path) -> Result<String> {
    let profile: FirmProfile = read_json_file(path)?;
    let corrections = ctx.set_profile(profile)?;
    Ok(describe_corrections("Profile loaded", &corrections))
}

/// Resources held and activity overrides
#[derive(Debug, Default, Clone, Copy)]
pub struct ProfileEdits {
    /// Own funds held
    pub own_funds: Option<f64>,
    /// Liquid assets held
    pub liquid_assets: Option<f64>,
    /// Wind-down period in months
    pub wind_down_months: Option<u32>,
    /// PMCR activity category
    pub activity: Option<FirmActivity>,
}

/// Apply individual edits to the working profile
pub fn set(ctx: &mut AppContext, edits: ProfileEdits) -> Result<String> {
    let corrections = ctx.update_profile(|p| {
        if let Some(v) = edits.own_funds {
            p.actual_own_funds = v;
        }
        if let Some(v) = edits.liquid_assets {
            p.actual_liquid_assets = v;
        }
        if let Some(v) = edits.wind_down_months {
            p.wind_down_period = v;
        }
        if let Some(v) = edits.activity {
            p.firm_activity = v;
        }
    })?;
    Ok(describe_corrections("Profile updated", &corrections))
}

pub(crate) fn describe_corrections(headline: &str, corrections: &[InputCorrection]) -> String {
    if corrections.is_empty() {
        return headline.to_string();
    }
    let mut out = format!("{} with {} correction(s):\n", headline, corrections.len());
    for c in corrections {
        warn!(field = %c.field, original = %c.original, corrected = %c.corrected, "Input corrected");
        out.push_str(&format!("  {}: {} -> {}\n", c.field, c.original, c.corrected));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::testing::acme;

    #[test]
    fn test_set_resources() {
        let (_dir, mut ctx) = acme();
        let out = set(
            &mut ctx,
            ProfileEdits {
                own_funds: Some(5_000_000.0),
                activity: Some(FirmActivity::Dealing),
                ..ProfileEdits::default()
            },
        )
        .unwrap();
        assert_eq!(out, "Profile updated");
        assert_eq!(ctx.profile().actual_own_funds, 5_000_000.0);
        assert_eq!(ctx.firm().unwrap().profile.firm_activity, FirmActivity::Dealing);
    }

    #[test]
    fn test_load_reports_corrections() {
        let (dir, mut ctx) = acme();
        let path = dir.path().join("profile.json");
        std::fs::write(&path, r#"{"actualOwnFunds": -10, "windDownPeriod": 0}"#).unwrap();

        let out = load(&mut ctx, &path).unwrap();
        assert!(out.starts_with("Profile loaded with 2 correction(s)"));
        assert!(out.contains("windDownPeriod"));
        assert_eq!(ctx.profile().wind_down_period, 1);
    }

    #[test]
    fn test_show_lists_counts() {
        let (_dir, ctx) = acme();
        let out = show(&ctx).unwrap();
        assert!(out.contains("Profile: Acme"));
        assert!(out.contains("£4,000,000"));
    }
}
