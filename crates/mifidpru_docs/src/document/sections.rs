//! Markdown text for each ICARA section.

use super::{DocumentContext, DocumentSection};
use mifidpru_core::profile::{impact_label, likelihood_label, Harm, HarmCategory, StressScenario};
use mifidpru_core::types::format_gbp;
use mifidpru_engine::StressResult;
use std::fmt::Write;

/// Generates the Markdown text of one section.
///
/// Pure: the same context always produces the same text. Sections that
/// depend on calculation results fall back to a placeholder paragraph
/// when `ctx.result` is `None`.
///
/// # Examples
///
/// ```
/// use mifidpru_core::profile::FirmProfile;
/// use mifidpru_docs::document::{generate_section, DocumentContext, DocumentSection};
///
/// let profile = FirmProfile::default();
/// let ctx = DocumentContext::new(&profile);
/// let text = generate_section(DocumentSection::CapitalAdequacy, &ctx);
/// assert_eq!(
///     text,
///     "# Capital Adequacy Assessment\n\n[This section should include an assessment of the firm's capital requirements.]"
/// );
/// ```
pub fn generate_section(section: DocumentSection, ctx: &DocumentContext<'_>) -> String {
    match section {
        DocumentSection::ExecutiveSummary => executive_summary(ctx),
        DocumentSection::BusinessModel => BUSINESS_MODEL.to_string(),
        DocumentSection::Governance => GOVERNANCE.to_string(),
        DocumentSection::RiskAssessment => risk_assessment(ctx),
        DocumentSection::CapitalAdequacy => capital_adequacy(ctx),
        DocumentSection::LiquidityAdequacy => liquidity_adequacy(ctx),
        DocumentSection::StressTesting => stress_testing(ctx),
        DocumentSection::WindDown => wind_down(ctx),
        DocumentSection::RecoveryPlan => RECOVERY_PLAN.to_string(),
        DocumentSection::Conclusions => conclusions(ctx),
        DocumentSection::Appendices => {
            "# Appendices\n\n[Include any supporting documentation or detailed calculations here.]"
                .to_string()
        }
    }
}

fn placeholder(section: DocumentSection, text: &str) -> String {
    format!("# {}\n\n[{}]", section.title(), text)
}

fn executive_summary(ctx: &DocumentContext<'_>) -> String {
    let Some(result) = ctx.result else {
        return placeholder(
            DocumentSection::ExecutiveSummary,
            "This section should summarise the firm's classification, threshold requirements and key ICARA conclusions.",
        );
    };
    let name = ctx
        .firm_name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or("The firm");
    let material = result.identified_harms.iter().filter(|h| h.is_material()).count();
    let adequacy = if result.icara_summary.own_funds_adequate {
        "adequate"
    } else {
        "inadequate"
    };

    format!(
        "# Executive Summary

## Firm Overview
{name} is an investment firm subject to the FCA's MIFIDPRU prudential regime. This Internal Capital and Risk Assessment (ICARA) document sets out the firm's assessment of the adequacy of its financial resources relative to the nature, scale, and complexity of its activities.

## Firm Classification
The firm is classified as a {classification} investment firm under the MIFIDPRU regime.

## Key Financial Resources Requirements
The firm has determined the following key financial resources requirements:

* Own Funds Threshold Requirement (OFTR): {oftr}
* Liquid Assets Threshold Requirement (LATR): {latr}

## Material Harms
The firm has identified {material} material harms that could be caused to clients, markets, or the firm itself. These harms have been assessed, and additional financial resources have been allocated where appropriate.

## Key Conclusions
The firm's assessment concludes that the current level of financial resources is {adequacy} to support the business and mitigate potential harms. The firm has developed appropriate wind-down and recovery plans to ensure it can exit the market in an orderly manner or recover from stress events if necessary.

## Board Approval
This ICARA document has been reviewed and approved by the firm's Board of Directors on [INSERT DATE].",
        classification = result.firm_classification.as_str(),
        oftr = format_gbp(result.total_own_funds_requirement()),
        latr = format_gbp(result.liquid_assets_threshold_requirement()),
    )
}

const BUSINESS_MODEL: &str = "# Business Model Analysis

## Overview of Business Activities
[Describe the firm's principal business activities, target clients, and markets served]

## Business Strategy
[Outline the firm's current business strategy and any planned changes]

## Key Dependencies
[Identify critical dependencies such as key clients, suppliers, staff, or systems]

## Group Structure
[If applicable, describe the firm's position within a wider group structure]

## Regulatory Permissions
[List the firm's main regulatory permissions and how they relate to its business activities]

## Financial Projections
[Provide a summary of financial projections for the next 1-3 years]

## Key Business Risks
[Identify the key risks associated with the business model, including market risks, operational risks, and strategic risks]";

const GOVERNANCE: &str = "# Governance Arrangements

## Board and Senior Management
[Describe the composition and responsibilities of the Board and senior management]

## Risk Management Framework
[Outline the firm's risk management framework, including key policies and procedures]

## Three Lines of Defence
[Explain how the three lines of defence model operates within the firm]

## Risk Appetite
[Summarise the firm's risk appetite and how it is applied]

## Oversight and Monitoring
[Describe how compliance with the ICARA is monitored and by whom]

## ICARA Process
[Explain the firm's process for preparing and reviewing the ICARA]

## Documentation and Record-Keeping
[Describe how ICARA documentation and supporting evidence are maintained]";

/// Harms grouped by category, categories in order of first appearance.
fn group_by_category(harms: &[Harm]) -> Vec<(HarmCategory, Vec<&Harm>)> {
    let mut groups: Vec<(HarmCategory, Vec<&Harm>)> = Vec::new();
    for harm in harms {
        match groups.iter_mut().find(|(c, _)| *c == harm.category) {
            Some((_, members)) => members.push(harm),
            None => groups.push((harm.category, vec![harm])),
        }
    }
    groups
}

fn format_harm(harm: &Harm) -> String {
    let controls = if harm.controls.trim().is_empty() {
        "Not specified"
    } else {
        harm.controls.as_str()
    };
    format!(
        "### {}

* **Risk Score**: {} ({})
* **Likelihood**: {} - {}
* **Impact**: {} - {}
* **Controls**: {}
* **Additional Own Funds Required**: {}
* **Additional Liquid Assets Required**: {}",
        harm.description,
        harm.risk_score(),
        harm.rating(),
        harm.likelihood,
        likelihood_label(harm.likelihood),
        harm.impact,
        impact_label(harm.impact),
        controls,
        format_gbp(harm.additional_own_funds),
        format_gbp(harm.additional_liquid_assets),
    )
}

fn risk_assessment(ctx: &DocumentContext<'_>) -> String {
    // a result carries the register as it stood when the pass ran
    let harms = match ctx.result {
        Some(result) => result.identified_harms.as_slice(),
        None => ctx.profile.identified_harms.as_slice(),
    };
    if harms.is_empty() {
        return placeholder(
            DocumentSection::RiskAssessment,
            "No potential harms have been identified. This section should identify and assess potential harms to clients, markets, and the firm.",
        );
    }

    let material = harms.iter().filter(|h| h.is_material()).count();
    let mut out = format!(
        "# Harm Identification and Risk Assessment

## Methodology
The firm has assessed potential harms using a risk-based approach, considering both the likelihood and impact of each harm. The risk score is calculated by multiplying the likelihood (1-5) by the impact (1-5), resulting in a score between 1 and 25. Harms with a risk score of 6 or higher are considered material.

## Summary of Material Harms
The firm has identified {material} material harms out of a total of {total} potential harms.

## Detailed Risk Assessment
",
        total = harms.len(),
    );

    for (category, members) in group_by_category(harms) {
        let _ = write!(out, "\n## {}\n", category.heading());
        for harm in members {
            let _ = write!(out, "\n{}\n", format_harm(harm));
        }
    }
    out
}

fn capital_adequacy(ctx: &DocumentContext<'_>) -> String {
    let Some(result) = ctx.result else {
        return placeholder(
            DocumentSection::CapitalAdequacy,
            "This section should include an assessment of the firm's capital requirements.",
        );
    };
    let of = &result.own_funds_requirement;
    let summary = &result.icara_summary;
    let position = if summary.own_funds_adequate {
        format!(
            "The firm holds own funds of {}, a surplus of {} over the OFTR.",
            format_gbp(summary.actual_own_funds),
            format_gbp(summary.own_funds_surplus)
        )
    } else {
        format!(
            "The firm holds own funds of {}, a shortfall of {} against the OFTR.",
            format_gbp(summary.actual_own_funds),
            format_gbp(-summary.own_funds_surplus)
        )
    };

    format!(
        "# Capital Adequacy Assessment

## Regulatory Capital Requirements

### Permanent Minimum Capital Requirement (PMCR)
The PMCR for the firm is {pmcr} based on its regulatory permissions and activities.

### Fixed Overhead Requirement (FOR)
The FOR is calculated as 25% of the firm's annual fixed overheads, which amounts to {for_amount}.

### K-Factor Requirement (KFR)
The total K-Factor Requirement is {kfr}, based on the firm's client, market, and firm risk exposures.

### Base Own Funds Requirement
The Base Own Funds Requirement is {base}, which is the highest of the PMCR, FOR, and KFR.

## Additional Own Funds for Harm
Based on the firm's risk assessment, an additional {harm} of own funds is required to mitigate potential harms.

## Total Own Funds Threshold Requirement (OFTR)
The firm's Total Own Funds Threshold Requirement is {total}, which is the sum of the Base Own Funds Requirement and the additional own funds for harm.

## Composition of Own Funds
The firm's own funds composition requirements are:

* Common Equity Tier 1 (CET1) capital: at least {cet1} (56%)
* Additional Tier 1 (AT1) capital: up to {at1} (44%)
* Tier 2 (T2) capital: up to {t2} (25%)

## Current Capital Position
{position}

## Capital Planning
[Describe the firm's approach to capital planning, including how it ensures it maintains adequate capital at all times]

## Conclusions
[Provide a conclusion on the adequacy of the firm's capital resources relative to its requirements]",
        pmcr = format_gbp(of.pmcr),
        for_amount = format_gbp(of.for_amount),
        kfr = format_gbp(of.total_kfr),
        base = format_gbp(of.base_own_funds_requirement),
        harm = format_gbp(of.additional_own_funds_for_harm),
        total = format_gbp(of.total_own_funds_requirement),
        cet1 = format_gbp(of.cet1_requirement),
        at1 = format_gbp(of.at1_requirement),
        t2 = format_gbp(of.t2_requirement),
    )
}

fn liquidity_adequacy(ctx: &DocumentContext<'_>) -> String {
    let Some(result) = ctx.result else {
        return placeholder(
            DocumentSection::LiquidityAdequacy,
            "This section should include an assessment of the firm's liquidity requirements.",
        );
    };
    let la = &result.liquid_assets_requirement;
    let summary = &result.icara_summary;
    let position = if summary.liquid_assets_adequate {
        format!(
            "The firm holds liquid assets of {}, a surplus of {} over the LATR.",
            format_gbp(summary.actual_liquid_assets),
            format_gbp(summary.liquid_assets_surplus)
        )
    } else {
        format!(
            "The firm holds liquid assets of {}, a shortfall of {} against the LATR.",
            format_gbp(summary.actual_liquid_assets),
            format_gbp(-summary.liquid_assets_surplus)
        )
    };

    format!(
        "# Liquidity Adequacy Assessment

## Regulatory Liquidity Requirements

### Basic Liquid Assets Requirement
The basic liquid assets requirement consists of:

* One-third of the Fixed Overhead Requirement: {one_third_for}
* One-third of the fixed ongoing costs during wind-down: {one_third_costs}

### Additional Liquid Assets for Harm
Based on the firm's risk assessment, an additional {harm} of liquid assets is required to mitigate potential harms.

## Total Liquid Assets Threshold Requirement (LATR)
The firm's Total Liquid Assets Threshold Requirement is {latr}, which is the sum of the basic requirement and the additional liquid assets for harm.

## Eligible Liquid Assets
[Insert details of the firm's eligible liquid assets, including:
* Cash and cash equivalents
* Assets qualifying under the LCR Regulation
* Short-term deposits at credit institutions
* Trade debtors and fees receivable within 30 days (with haircut)]

## Current Liquidity Position
{position}

## Liquidity Planning
[Describe the firm's approach to liquidity planning, including how it ensures it maintains adequate liquid assets at all times]

## Conclusions
[Provide a conclusion on the adequacy of the firm's liquid assets relative to its requirements]",
        one_third_for = format_gbp(la.one_third_for),
        one_third_costs = format_gbp(la.one_third_fixed_ongoing_costs),
        harm = format_gbp(la.additional_liquid_assets_for_harm),
        latr = format_gbp(la.liquid_assets_threshold_requirement),
    )
}

/// `0.3 -> "30% increase"`, `-0.155 -> "15.5% decrease"`.
fn describe_change(change: f64) -> String {
    let percent = (change.abs() * 1000.0).round() / 10.0;
    let direction = if change >= 0.0 { "increase" } else { "decrease" };
    format!("{}% {}", percent, direction)
}

fn describe_stress_result(result: &StressResult) -> String {
    let mut out = String::new();
    let rows = [
        ("K-Factor Requirement", &result.impacts.kfr),
        ("Fixed Overhead Requirement", &result.impacts.for_amount),
        ("Own Funds Requirement", &result.impacts.own_funds),
        ("Liquid Assets Requirement", &result.impacts.liquid_assets),
    ];
    for (label, delta) in rows {
        let change = match delta.percent_change {
            Some(pct) => format!("{:+.1}%", pct),
            None => "n/a".to_string(),
        };
        let _ = writeln!(
            out,
            "* {}: {} to {} ({})",
            label,
            format_gbp(delta.baseline),
            format_gbp(delta.stressed),
            change
        );
    }
    let _ = write!(
        out,
        "* Stressed own funds including add-on: {}\n* Stressed liquid assets including add-on: {}",
        format_gbp(result.stressed_own_funds_total()),
        format_gbp(result.stressed_liquid_assets_total())
    );
    out
}

fn format_scenario(index: usize, scenario: &StressScenario, result: Option<&StressResult>) -> String {
    let mut out = format!(
        "## Scenario {}: {}\n\n### Description\n{}\n\n### Key Impacts\n",
        index + 1,
        scenario.name,
        scenario.description
    );
    for impact in &scenario.impacts {
        let label = if impact.description.trim().is_empty() {
            impact.factor.label().to_string()
        } else {
            impact.description.clone()
        };
        let _ = writeln!(out, "* {}: {}", label, describe_change(impact.change));
    }
    let prudential = match result {
        Some(r) => describe_stress_result(r),
        None => {
            "[Insert details of the impact on the firm's own funds and liquid assets requirements]"
                .to_string()
        }
    };
    let _ = write!(
        out,
        "
### Additional Resources Required
* Additional Own Funds: {}
* Additional Liquid Assets: {}

### Impact on Prudential Requirements
{}

",
        format_gbp(scenario.additional_own_funds),
        format_gbp(scenario.additional_liquid_assets),
        prudential
    );
    out
}

fn stress_testing(ctx: &DocumentContext<'_>) -> String {
    let scenarios = &ctx.profile.stress_scenarios;
    if scenarios.is_empty() {
        return placeholder(
            DocumentSection::StressTesting,
            "This section should include details of the stress tests performed and their impact on capital and liquidity requirements.",
        );
    }

    let mut out = String::from(
        "# Stress Testing

## Methodology
The firm has conducted stress testing to assess the impact of adverse scenarios on its financial resources. The following scenarios have been tested:

",
    );
    for (i, scenario) in scenarios.iter().enumerate() {
        let result = ctx.stress_result_for(scenario.id.as_str());
        out.push_str(&format_scenario(i, scenario, result));
    }
    out.push_str(
        "## Conclusions\n[Provide a conclusion on the firm's ability to withstand the stress scenarios and the adequacy of its financial resources]",
    );
    out
}

fn wind_down(ctx: &DocumentContext<'_>) -> String {
    let period = ctx.profile.wind_down_period.max(1);
    let costs = match ctx.result {
        Some(result) => format!(
            "Fixed ongoing costs over the wind-down period are estimated at {}.\n\n",
            format_gbp(result.liquid_assets_requirement.wind_down_costs)
        ),
        None => String::new(),
    };
    format!(
        "# Wind-Down Analysis

## Wind-Down Triggers
[Describe the triggers that would initiate the wind-down process]

## Wind-Down Period
The firm estimates that it would take {period} months to wind down its business in an orderly manner.

## Wind-Down Costs
{costs}[Quantify the costs associated with winding down the business, including:
* Fixed costs during the wind-down period
* One-off costs specific to the wind-down
* Staff retention costs
* Legal and professional fees]

## Wind-Down Process
[Outline the key steps in the wind-down process, including:
* Client notification and transfer arrangements
* Staff redundancy process
* Termination of contracts and agreements
* Disposal of assets
* Regulatory notifications]

## Financial Resources for Wind-Down
[Assess whether the firm has sufficient financial resources to fund the wind-down process]

## Governance of Wind-Down
[Describe the governance arrangements for the wind-down process, including roles and responsibilities]

## Potential Obstacles
[Identify potential obstacles to an orderly wind-down and how these would be addressed]

## Conclusions
[Provide a conclusion on the feasibility of the wind-down plan and the adequacy of resources to support it]"
    )
}

const RECOVERY_PLAN: &str = "# Recovery Plan

## Recovery Triggers
[Describe the triggers that would initiate the recovery plan, including:
* Capital-based triggers
* Liquidity-based triggers
* Profitability-based triggers
* Operational event triggers]

## Recovery Options
[Outline the key recovery options available to the firm, such as:
* Capital raising
* Cost reduction
* Business line divestment
* Strategic partnerships
* Reduction in risk-weighted assets]

## Assessment of Recovery Options
[For each recovery option, assess:
* Feasibility
* Expected financial impact
* Implementation timeline
* Potential obstacles
* Dependencies]

## Recovery Plan Implementation
[Describe how the recovery plan would be implemented, including:
* Decision-making process
* Escalation procedures
* Communication strategy
* Regulatory notifications]

## Governance of Recovery
[Describe the governance arrangements for the recovery process, including roles and responsibilities]

## Testing and Maintenance
[Explain how the recovery plan is tested and maintained to ensure it remains effective]

## Conclusions
[Provide a conclusion on the effectiveness of the recovery plan and the firm's ability to recover from stress events]";

fn conclusions(ctx: &DocumentContext<'_>) -> String {
    let overall = match ctx.result {
        Some(result) => {
            let s = &result.icara_summary;
            let verdict = |ok: bool| if ok { "meets" } else { "does not meet" };
            format!(
                "The firm {} its Own Funds Threshold Requirement of {} and {} its Liquid Assets Threshold Requirement of {}.",
                verdict(s.own_funds_adequate),
                format_gbp(s.own_funds_threshold_requirement),
                verdict(s.liquid_assets_adequate),
                format_gbp(s.liquid_assets_threshold_requirement),
            )
        }
        None => "[Provide an overall assessment of the firm's financial resources, considering:
* Capital adequacy
* Liquidity adequacy
* Ability to wind down in an orderly manner
* Ability to recover from stress events]"
            .to_string(),
    };

    format!(
        "# Conclusions and Action Plan

## Overall Assessment
{overall}

## Key Findings
[Summarise the key findings from the ICARA process, including:
* Material harms identified
* Results of stress testing
* Adequacy of financial resources
* Effectiveness of risk management arrangements]

## Action Plan
[Detail the actions the firm will take to address any findings or improvements identified during the ICARA process]

## Timeline for Implementation
[Provide a timeline for the implementation of the action plan]

## Monitoring and Reporting
[Describe how progress against the action plan will be monitored and reported to the Board]

## Next Review
[Specify when the next ICARA review will be conducted]

## Board Approval
This ICARA document, including the conclusions and action plan, was approved by the Board on [INSERT DATE]."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use mifidpru_core::profile::{FirmProfile, Impact};
    use mifidpru_engine::{recompute_derived, run_calculation, run_stress_test};

    fn profile_with_harms() -> FirmProfile {
        let mut profile = FirmProfile::default();
        profile.overheads.total_expenditure = 8_000_000.0;
        profile.actual_own_funds = 5_000_000.0;
        profile.identified_harms = vec![
            Harm::new("Reconciliation failure", HarmCategory::Client, 2, 4)
                .with_additional_own_funds(250_000.0),
            Harm::new("Fine", HarmCategory::Firm, 1, 2),
            Harm::new("Mis-selling", HarmCategory::Client, 3, 3).with_controls("Suitability reviews"),
        ];
        recompute_derived(&profile)
    }

    #[test]
    fn test_describe_change() {
        assert_eq!(describe_change(0.3), "30% increase");
        assert_eq!(describe_change(-0.155), "15.5% decrease");
        assert_eq!(describe_change(0.0), "0% increase");
    }

    #[test]
    fn test_placeholders_without_result() {
        let profile = FirmProfile::default();
        let ctx = DocumentContext::new(&profile);
        assert_eq!(
            generate_section(DocumentSection::LiquidityAdequacy, &ctx),
            "# Liquidity Adequacy Assessment\n\n[This section should include an assessment of the firm's liquidity requirements.]"
        );
        assert_eq!(
            generate_section(DocumentSection::StressTesting, &ctx),
            "# Stress Testing\n\n[This section should include details of the stress tests performed and their impact on capital and liquidity requirements.]"
        );
        assert!(generate_section(DocumentSection::RiskAssessment, &ctx)
            .contains("[No potential harms have been identified."));
    }

    #[test]
    fn test_harms_grouped_in_first_seen_order() {
        let profile = profile_with_harms();
        let ctx = DocumentContext::new(&profile);
        let text = generate_section(DocumentSection::RiskAssessment, &ctx);

        assert!(text.contains("identified 2 material harms out of a total of 3"));
        let clients = text.find("## Harms to Clients").unwrap();
        let firm = text.find("## Harms to the Firm").unwrap();
        assert!(clients < firm);
        assert!(text.find("### Mis-selling").unwrap() < firm);
        assert!(text.contains("* **Risk Score**: 8 (Medium)"));
        assert!(text.contains("* **Likelihood**: 2 - Unlikely"));
        assert!(text.contains("* **Impact**: 4 - Major"));
        assert!(text.contains("* **Controls**: Not specified"));
        assert!(text.contains("* **Controls**: Suitability reviews"));
        assert!(text.contains("* **Additional Own Funds Required**: £250,000"));
    }

    #[test]
    fn test_capital_section_with_result() {
        let profile = profile_with_harms();
        let result = run_calculation(&profile);
        let ctx = DocumentContext::new(&profile).with_result(&result);
        let text = generate_section(DocumentSection::CapitalAdequacy, &ctx);

        assert!(text.contains("The PMCR for the firm is £75,000"));
        assert!(text.contains("which amounts to £2,000,000"));
        assert!(text.contains("an additional £250,000 of own funds"));
        assert!(text.contains("Threshold Requirement is £2,250,000"));
        assert!(text.contains("at least £1,260,000 (56%)"));
        assert!(text.contains("a surplus of £2,750,000"));
    }

    #[test]
    fn test_executive_summary_classification_and_adequacy() {
        let profile = profile_with_harms();
        let result = run_calculation(&profile);
        let ctx = DocumentContext::new(&profile)
            .with_firm_name("Acme Capital")
            .with_result(&result);
        let text = generate_section(DocumentSection::ExecutiveSummary, &ctx);

        assert!(text.starts_with("# Executive Summary"));
        assert!(text.contains("Acme Capital is an investment firm"));
        assert!(text.contains(&format!(
            "The firm is classified as a {} investment firm under the MIFIDPRU regime.",
            result.firm_classification.as_str()
        )));
        assert!(text.contains("identified 2 material harms"));
        assert!(text.contains("financial resources is adequate"));
    }

    #[test]
    fn test_stress_section_uses_matching_result() {
        let mut profile = profile_with_harms();
        profile.stress_scenarios = vec![StressScenario::new("Cost shock", "Costs rise")
            .with_id("s1")
            .with_impact(Impact::new("operational_costs", 0.2))
            .with_impact(Impact::new("revenue", -0.1).with_description("Revenue"))
            .with_additional_requirements(100_000.0, 50_000.0)];
        let stressed = vec![run_stress_test(&profile.stress_scenarios[0], &profile)];
        let ctx = DocumentContext::new(&profile).with_stress_results(&stressed);
        let text = generate_section(DocumentSection::StressTesting, &ctx);

        assert!(text.contains("## Scenario 1: Cost shock"));
        assert!(text.contains("* Revenue: 10% decrease"));
        assert!(text.contains("20% increase"));
        assert!(text.contains("* Additional Own Funds: £100,000"));
        assert!(text.contains("* Fixed Overhead Requirement: £2,000,000 to £2,100,000 (+5.0%)"));
        assert!(text.ends_with("adequacy of its financial resources]"));
    }

    #[test]
    fn test_wind_down_period() {
        let mut profile = FirmProfile::default();
        profile.wind_down_period = 6;
        let ctx = DocumentContext::new(&profile);
        let text = generate_section(DocumentSection::WindDown, &ctx);
        assert!(text.contains("take 6 months to wind down"));
    }

    #[test]
    fn test_generation_is_pure() {
        let profile = profile_with_harms();
        let result = run_calculation(&profile);
        let ctx = DocumentContext::new(&profile).with_result(&result);
        for section in DocumentSection::all() {
            assert_eq!(generate_section(section, &ctx), generate_section(section, &ctx));
        }
    }
}
