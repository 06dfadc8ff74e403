//! ICARA document assembly.
//!
//! A document is a title block, a table of contents and a sequence of
//! Markdown sections. Each section is produced by [`generate_section`]
//! unless the caller supplies its own text.

mod sections;

pub use sections::generate_section;

use crate::error::ReportError;
use chrono::{NaiveDate, Utc};
use mifidpru_core::profile::FirmProfile;
use mifidpru_engine::{CalculationResult, StressResult};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Sections of an ICARA document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DocumentSection {
    /// Overview and key conclusions
    ExecutiveSummary,
    /// Business model and strategy
    BusinessModel,
    /// Governance and risk management framework
    Governance,
    /// Harm identification and assessment
    RiskAssessment,
    /// Own funds requirements
    CapitalAdequacy,
    /// Liquid assets requirements
    LiquidityAdequacy,
    /// Stress test results
    StressTesting,
    /// Orderly wind-down
    WindDown,
    /// Recovery actions
    RecoveryPlan,
    /// Findings and action plan
    Conclusions,
    /// Supporting material
    Appendices,
}

impl DocumentSection {
    /// All sections in document order.
    pub fn all() -> [Self; 11] {
        [
            Self::ExecutiveSummary,
            Self::BusinessModel,
            Self::Governance,
            Self::RiskAssessment,
            Self::CapitalAdequacy,
            Self::LiquidityAdequacy,
            Self::StressTesting,
            Self::WindDown,
            Self::RecoveryPlan,
            Self::Conclusions,
            Self::Appendices,
        ]
    }

    /// Sections that every document must contain.
    pub fn required_sections() -> Vec<Self> {
        Self::all().into_iter().filter(|s| s.required()).collect()
    }

    /// Section identifier, also used as the table-of-contents anchor.
    pub fn id(&self) -> &'static str {
        match self {
            Self::ExecutiveSummary => "executive_summary",
            Self::BusinessModel => "business_model",
            Self::Governance => "governance",
            Self::RiskAssessment => "risk_assessment",
            Self::CapitalAdequacy => "capital_adequacy",
            Self::LiquidityAdequacy => "liquidity_adequacy",
            Self::StressTesting => "stress_testing",
            Self::WindDown => "wind_down",
            Self::RecoveryPlan => "recovery_plan",
            Self::Conclusions => "conclusions",
            Self::Appendices => "appendices",
        }
    }

    /// Section heading.
    pub fn title(&self) -> &'static str {
        match self {
            Self::ExecutiveSummary => "Executive Summary",
            Self::BusinessModel => "Business Model Analysis",
            Self::Governance => "Governance Arrangements",
            Self::RiskAssessment => "Harm Identification and Risk Assessment",
            Self::CapitalAdequacy => "Capital Adequacy Assessment",
            Self::LiquidityAdequacy => "Liquidity Adequacy Assessment",
            Self::StressTesting => "Stress Testing",
            Self::WindDown => "Wind-Down Analysis",
            Self::RecoveryPlan => "Recovery Plan",
            Self::Conclusions => "Conclusions and Action Plan",
            Self::Appendices => "Appendices",
        }
    }

    /// One-line description of what the section covers.
    pub fn description(&self) -> &'static str {
        match self {
            Self::ExecutiveSummary => {
                "Overview of the firm, its business model, and key ICARA conclusions"
            }
            Self::BusinessModel => {
                "Description of the firm's business model, strategy, and activities"
            }
            Self::Governance => {
                "Overview of the firm's governance structure and risk management framework"
            }
            Self::RiskAssessment => "Assessment of potential harms to clients, markets, and the firm",
            Self::CapitalAdequacy => {
                "Analysis of own funds requirements and additional capital needed"
            }
            Self::LiquidityAdequacy => {
                "Analysis of liquid assets requirements and additional liquidity needed"
            }
            Self::StressTesting => "Results of stress tests and their impact on capital and liquidity",
            Self::WindDown => "Plan for orderly wind-down of the firm's business",
            Self::RecoveryPlan => "Actions the firm will take to recover from stress scenarios",
            Self::Conclusions => "Summary of findings and actions to address identified issues",
            Self::Appendices => "Supporting documentation and detailed calculations",
        }
    }

    /// Returns true if the section cannot be left out.
    pub fn required(&self) -> bool {
        !matches!(self, Self::Appendices)
    }
}

impl fmt::Display for DocumentSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for DocumentSection {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace(['-', ' '], "_");
        Self::all()
            .into_iter()
            .find(|section| section.id() == key)
            .ok_or_else(|| ReportError::UnknownSection(s.to_string()))
    }
}

/// Inputs consumed by section generation.
#[derive(Debug, Clone, Copy)]
pub struct DocumentContext<'a> {
    /// Firm name shown in the title block and summary.
    pub firm_name: Option<&'a str>,
    /// Current firm profile.
    pub profile: &'a FirmProfile,
    /// Latest calculation pass, if one has been run.
    pub result: Option<&'a CalculationResult>,
    /// Stress results to report against the profile's scenarios.
    pub stress_results: &'a [StressResult],
}

impl<'a> DocumentContext<'a> {
    /// Creates a context with no results.
    pub fn new(profile: &'a FirmProfile) -> Self {
        Self {
            firm_name: None,
            profile,
            result: None,
            stress_results: &[],
        }
    }

    /// Builder: set the firm name.
    pub fn with_firm_name(mut self, name: &'a str) -> Self {
        self.firm_name = Some(name);
        self
    }

    /// Builder: set the calculation result.
    pub fn with_result(mut self, result: &'a CalculationResult) -> Self {
        self.result = Some(result);
        self
    }

    /// Builder: set the stress results.
    pub fn with_stress_results(mut self, results: &'a [StressResult]) -> Self {
        self.stress_results = results;
        self
    }

    /// Stress result for a scenario, matched by id.
    pub fn stress_result_for(&self, scenario_id: &str) -> Option<&'a StressResult> {
        self.stress_results
            .iter()
            .find(|r| r.scenario_id.as_str() == scenario_id)
    }
}

/// Builder for a complete ICARA document.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use mifidpru_core::profile::FirmProfile;
/// use mifidpru_docs::document::{DocumentContext, DocumentSection, IcaraDocument};
///
/// let profile = FirmProfile::default();
/// let ctx = DocumentContext::new(&profile).with_firm_name("Sample Investment Firm Ltd");
/// let date = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
///
/// let doc = IcaraDocument::new()
///     .with_date(date)
///     .with_custom_section(DocumentSection::Governance, "# Governance Arrangements\n\nBoard of five.")
///     .render(&ctx);
///
/// assert!(doc.starts_with("# Internal Capital and Risk Assessment (ICARA)"));
/// assert!(doc.contains("**Date**: 31/03/2025"));
/// assert!(doc.contains("Board of five."));
/// ```
#[derive(Debug, Clone)]
pub struct IcaraDocument {
    title: String,
    date: NaiveDate,
    sections: Vec<DocumentSection>,
    custom: HashMap<DocumentSection, String>,
}

impl Default for IcaraDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl IcaraDocument {
    /// Default document title.
    pub const DEFAULT_TITLE: &'static str = "Internal Capital and Risk Assessment (ICARA)";

    /// Placeholder shown when no firm name is known.
    pub const FIRM_NAME_PLACEHOLDER: &'static str = "[FIRM NAME]";

    /// Creates a document with all required sections, dated today.
    pub fn new() -> Self {
        Self {
            title: Self::DEFAULT_TITLE.to_string(),
            date: Utc::now().date_naive(),
            sections: DocumentSection::required_sections(),
            custom: HashMap::new(),
        }
    }

    /// Builder: set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Builder: set the document date.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    /// Builder: append a section if not already selected.
    pub fn with_section(mut self, section: DocumentSection) -> Self {
        self.include(section);
        self
    }

    /// Builder: replace the generated text of a section.
    pub fn with_custom_section(mut self, section: DocumentSection, content: impl Into<String>) -> Self {
        self.set_custom_section(section, content);
        self
    }

    /// Selected sections in output order.
    pub fn sections(&self) -> &[DocumentSection] {
        &self.sections
    }

    /// Appends a section if not already selected.
    pub fn include(&mut self, section: DocumentSection) {
        if !self.sections.contains(&section) {
            self.sections.push(section);
        }
    }

    /// Removes an optional section. Returns false for required sections.
    pub fn exclude(&mut self, section: DocumentSection) -> bool {
        if section.required() {
            return false;
        }
        self.sections.retain(|s| *s != section);
        true
    }

    /// Replaces the generated text of a section.
    ///
    /// Empty content clears the override.
    pub fn set_custom_section(&mut self, section: DocumentSection, content: impl Into<String>) {
        let content = content.into();
        if content.is_empty() {
            self.custom.remove(&section);
        } else {
            self.custom.insert(section, content);
        }
    }

    /// Text of one section, honouring custom overrides.
    pub fn section_content(&self, section: DocumentSection, ctx: &DocumentContext<'_>) -> String {
        match self.custom.get(&section) {
            Some(content) => content.clone(),
            None => generate_section(section, ctx),
        }
    }

    /// Renders the full Markdown document.
    pub fn render(&self, ctx: &DocumentContext<'_>) -> String {
        let mut out = String::new();
        out.push_str(&format!("# {}\n\n", self.title));
        out.push_str(&format!(
            "**Firm Name**: {}\n\n",
            ctx.firm_name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or(Self::FIRM_NAME_PLACEHOLDER)
        ));
        out.push_str(&format!("**Date**: {}\n\n", self.date.format("%d/%m/%Y")));
        out.push_str("---\n\n");

        out.push_str("## Table of Contents\n\n");
        for (i, section) in self.sections.iter().enumerate() {
            out.push_str(&format!("{}. [{}](#{})\n", i + 1, section.title(), section.id()));
        }
        out.push_str("\n---\n\n");

        for section in &self.sections {
            out.push_str(&self.section_content(*section, ctx));
            out.push_str("\n\n---\n\n");
        }

        debug!(
            sections = self.sections.len(),
            custom = self.custom.len(),
            size = out.len(),
            "ICARA document rendered"
        );
        out
    }

    /// Suggested file name: `ICARA_<firm>_<yyyy-mm-dd>.md`.
    pub fn file_name(&self, firm_name: Option<&str>) -> String {
        format!(
            "ICARA_{}_{}.md",
            firm_name.filter(|n| !n.trim().is_empty()).unwrap_or("Document"),
            self.date.format("%Y-%m-%d")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()
    }

    #[test]
    fn test_section_metadata() {
        assert_eq!(DocumentSection::all().len(), 11);
        assert_eq!(DocumentSection::required_sections().len(), 10);
        assert!(!DocumentSection::Appendices.required());
        assert_eq!(DocumentSection::WindDown.id(), "wind_down");
        assert_eq!(DocumentSection::WindDown.title(), "Wind-Down Analysis");
    }

    #[test]
    fn test_section_from_str() {
        assert_eq!(
            "capital-adequacy".parse::<DocumentSection>().unwrap(),
            DocumentSection::CapitalAdequacy
        );
        assert_eq!(
            "Recovery Plan".parse::<DocumentSection>().unwrap(),
            DocumentSection::RecoveryPlan
        );
        assert!(matches!(
            "preface".parse::<DocumentSection>(),
            Err(ReportError::UnknownSection(_))
        ));
    }

    #[test]
    fn test_required_sections_cannot_be_excluded() {
        let mut doc = IcaraDocument::new();
        assert!(!doc.exclude(DocumentSection::Governance));
        assert_eq!(doc.sections().len(), 10);

        doc.include(DocumentSection::Appendices);
        doc.include(DocumentSection::Appendices);
        assert_eq!(doc.sections().len(), 11);
        assert!(doc.exclude(DocumentSection::Appendices));
        assert_eq!(doc.sections().len(), 10);
    }

    #[test]
    fn test_render_layout() {
        let profile = FirmProfile::default();
        let ctx = DocumentContext::new(&profile);
        let doc = IcaraDocument::new().with_date(fixed_date()).render(&ctx);

        assert!(doc.contains("**Firm Name**: [FIRM NAME]"));
        assert!(doc.contains("1. [Executive Summary](#executive_summary)\n"));
        assert!(doc.contains("10. [Conclusions and Action Plan](#conclusions)\n"));
        assert!(!doc.contains("(#appendices)"));
        // title block, table of contents, then one separator per section
        assert_eq!(doc.matches("\n---\n").count(), 12);
        assert!(doc.ends_with("---\n\n"));
    }

    #[test]
    fn test_custom_section_overrides_and_clears() {
        let profile = FirmProfile::default();
        let ctx = DocumentContext::new(&profile);
        let mut doc = IcaraDocument::new().with_date(fixed_date());

        doc.set_custom_section(DocumentSection::BusinessModel, "# Business Model Analysis\n\nBrokerage.");
        assert!(doc.render(&ctx).contains("Brokerage."));

        doc.set_custom_section(DocumentSection::BusinessModel, "");
        let rendered = doc.render(&ctx);
        assert!(!rendered.contains("Brokerage."));
        assert!(rendered.contains("## Overview of Business Activities"));
    }

    #[test]
    fn test_file_name() {
        let doc = IcaraDocument::new().with_date(fixed_date());
        assert_eq!(doc.file_name(Some("Acme")), "ICARA_Acme_2025-03-15.md");
        assert_eq!(doc.file_name(None), "ICARA_Document_2025-03-15.md");
    }
}
