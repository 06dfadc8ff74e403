//! MIFIDPRU regulatory returns.
//!
//! Each return is a flat list of coded fields built from one calculation
//! result and the profile it was computed from:
//!
//! | Type | Content |
//! |---|---|
//! | MIF001 | Own funds held against the own funds requirement |
//! | MIF002 | PMCR, FOR and the K-factor breakdown |
//! | MIF005 | Liquid assets held against the liquid assets requirement |
//! | ICARA | ICARA questionnaire summary |

mod export;

pub use export::{export_report, to_csv, to_json, to_xml, ReportFormat};

use crate::error::ReportError;
use chrono::{DateTime, NaiveDate, Utc};
use mifidpru_core::profile::FirmProfile;
use mifidpru_core::types::percent_of;
use mifidpru_engine::CalculationResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::info;

/// Regulatory return types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportType {
    /// Own funds return
    #[serde(rename = "MIF001")]
    Mif001,
    /// Capital requirements return
    #[serde(rename = "MIF002")]
    Mif002,
    /// Liquidity return
    #[serde(rename = "MIF005")]
    Mif005,
    /// ICARA questionnaire
    #[serde(rename = "ICARA")]
    Icara,
}

impl ReportType {
    /// All report types.
    pub fn all() -> [Self; 4] {
        [Self::Mif001, Self::Mif002, Self::Mif005, Self::Icara]
    }

    /// Return code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Mif001 => "MIF001",
            Self::Mif002 => "MIF002",
            Self::Mif005 => "MIF005",
            Self::Icara => "ICARA",
        }
    }

    /// Return title.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Mif001 => "Own Funds",
            Self::Mif002 => "Capital Requirements",
            Self::Mif005 => "Liquidity",
            Self::Icara => "ICARA Questionnaire",
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ReportType {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        Self::all()
            .into_iter()
            .find(|t| t.code() == code)
            .ok_or_else(|| ReportError::UnsupportedReportType(s.to_string()))
    }
}

/// Value of a report field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReportValue {
    /// Whole number (counts, months)
    Integer(i64),
    /// Monetary amount or percentage
    Amount(f64),
    /// Yes / no answer
    Flag(bool),
    /// Free text
    Text(String),
}

impl ReportValue {
    /// Plain-text rendering used by the CSV and XML exports.
    pub fn to_plain_string(&self) -> String {
        match self {
            Self::Integer(v) => v.to_string(),
            Self::Amount(v) => format!("{:.2}", v),
            Self::Flag(v) => v.to_string(),
            Self::Text(v) => v.clone(),
        }
    }
}

impl From<f64> for ReportValue {
    fn from(v: f64) -> Self {
        Self::Amount(v)
    }
}

impl From<bool> for ReportValue {
    fn from(v: bool) -> Self {
        Self::Flag(v)
    }
}

impl From<usize> for ReportValue {
    fn from(v: usize) -> Self {
        Self::Integer(i64::try_from(v).unwrap_or(i64::MAX))
    }
}

impl From<u32> for ReportValue {
    fn from(v: u32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<&str> for ReportValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<Option<f64>> for ReportValue {
    fn from(v: Option<f64>) -> Self {
        match v {
            Some(v) => Self::Amount(v),
            None => Self::Text("n/a".to_string()),
        }
    }
}

/// One coded line of a return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportField {
    /// Grouping within the return
    pub section: String,
    /// Field code
    pub code: String,
    /// Human-readable label
    pub label: String,
    /// Reported value
    pub value: ReportValue,
}

/// A generated regulatory return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegulatoryReport {
    /// Return type
    pub report_type: ReportType,
    /// Return title
    pub title: String,
    /// Reporting firm
    pub firm_name: String,
    /// Reporting period end date
    pub reporting_date: NaiveDate,
    /// Generation timestamp
    pub generated_at: DateTime<Utc>,
    /// Coded fields in return order
    pub fields: Vec<ReportField>,
}

impl RegulatoryReport {
    fn new(report_type: ReportType) -> Self {
        let now = Utc::now();
        Self {
            report_type,
            title: format!("{} - {}", report_type.code(), report_type.title()),
            firm_name: String::new(),
            reporting_date: now.date_naive(),
            generated_at: now,
            fields: Vec::new(),
        }
    }

    /// Builder: set the firm name.
    pub fn with_firm_name(mut self, name: impl Into<String>) -> Self {
        self.firm_name = name.into();
        self
    }

    /// Builder: set the reporting period end date.
    pub fn with_reporting_date(mut self, date: NaiveDate) -> Self {
        self.reporting_date = date;
        self
    }

    /// Looks up a field by code.
    pub fn field(&self, code: &str) -> Option<&ReportField> {
        self.fields.iter().find(|f| f.code == code)
    }

    /// Suggested file name for an export.
    pub fn file_name(&self, format: ReportFormat) -> String {
        format!(
            "{}_{}.{}",
            self.report_type.code(),
            self.reporting_date.format("%Y%m%d"),
            format.extension()
        )
    }

    fn push(&mut self, section: &str, code: &str, label: &str, value: impl Into<ReportValue>) {
        self.fields.push(ReportField {
            section: section.to_string(),
            code: code.to_string(),
            label: label.to_string(),
            value: value.into(),
        });
    }
}

/// Builds a return from a calculation result and its profile.
///
/// # Examples
///
/// ```
/// use mifidpru_core::profile::FirmProfile;
/// use mifidpru_docs::report::{generate_regulatory_report, ReportType, ReportValue};
/// use mifidpru_engine::run_calculation;
///
/// let mut profile = FirmProfile::default();
/// profile.overheads.total_expenditure = 8_000_000.0;
/// let result = run_calculation(&profile);
///
/// let report = generate_regulatory_report(ReportType::Mif001, &result, &profile);
/// assert_eq!(report.field("OF030").unwrap().value, ReportValue::Amount(2_000_000.0));
/// ```
pub fn generate_regulatory_report(
    report_type: ReportType,
    result: &CalculationResult,
    profile: &FirmProfile,
) -> RegulatoryReport {
    let mut report = RegulatoryReport::new(report_type);
    match report_type {
        ReportType::Mif001 => own_funds_return(&mut report, result),
        ReportType::Mif002 => capital_requirements_return(&mut report, result),
        ReportType::Mif005 => liquidity_return(&mut report, result, profile),
        ReportType::Icara => icara_questionnaire(&mut report, result, profile),
    }
    info!(
        report_type = %report_type,
        fields = report.fields.len(),
        "Regulatory report generated"
    );
    report
}

/// Parses `code` and builds the matching return.
///
/// # Errors
/// [`ReportError::UnsupportedReportType`] for an unknown code.
pub fn generate_report_by_code(
    code: &str,
    result: &CalculationResult,
    profile: &FirmProfile,
) -> Result<RegulatoryReport, ReportError> {
    let report_type: ReportType = code.parse()?;
    Ok(generate_regulatory_report(report_type, result, profile))
}

fn own_funds_return(report: &mut RegulatoryReport, result: &CalculationResult) {
    let of = &result.own_funds_requirement;
    let summary = &result.icara_summary;
    report.push("Own funds", "OF010", "Own funds held", summary.actual_own_funds);
    report.push("Requirement", "OF020", "Permanent minimum capital requirement", of.pmcr);
    report.push("Requirement", "OF030", "Fixed overhead requirement", of.for_amount);
    report.push("Requirement", "OF040", "K-factor requirement", of.total_kfr);
    report.push("Requirement", "OF050", "Own funds requirement", of.base_own_funds_requirement);
    report.push("Requirement", "OF055", "Binding requirement", of.binding_component());
    report.push("Threshold", "OF060", "Additional own funds for harm", of.additional_own_funds_for_harm);
    report.push("Threshold", "OF070", "Own funds threshold requirement", of.total_own_funds_requirement);
    report.push("Composition", "OF080", "CET1 requirement", of.cet1_requirement);
    report.push("Composition", "OF090", "AT1 limit", of.at1_requirement);
    report.push("Composition", "OF100", "T2 limit", of.t2_requirement);
    report.push("Position", "OF110", "Surplus / (deficit)", summary.own_funds_surplus);
    report.push(
        "Position",
        "OF120",
        "Own funds as % of own funds requirement",
        percent_of(summary.actual_own_funds, of.base_own_funds_requirement),
    );
}

fn capital_requirements_return(report: &mut RegulatoryReport, result: &CalculationResult) {
    let k = &result.k_factor_requirements;
    let fo = &result.fixed_overhead_requirement;
    let of = &result.own_funds_requirement;
    report.push("Classification", "CR010", "Firm classification", result.firm_classification.as_str());
    report.push("PMCR", "CR020", "Permanent minimum capital requirement", of.pmcr);
    report.push("FOR", "CR030", "Total expenditure", fo.total_expenditure);
    report.push("FOR", "CR040", "Deductions", fo.total_deductions);
    report.push("FOR", "CR050", "Relevant expenditure", fo.relevant_expenditure);
    report.push("FOR", "CR060", "Fixed overhead requirement", fo.for_amount);

    for (i, (name, value)) in k.factors().into_iter().enumerate() {
        let code = format!("CR{}", 100 + i * 10);
        report.push("K-factors", &code, name, value);
    }
    report.push("K-factors", "CR200", "Risk to client", k.risk_to_client);
    report.push("K-factors", "CR210", "Risk to market", k.risk_to_market);
    report.push("K-factors", "CR220", "Risk to firm", k.risk_to_firm);
    report.push("K-factors", "CR230", "Total K-factor requirement", k.total_kfr);
    report.push("Requirement", "CR300", "Own funds requirement", of.base_own_funds_requirement);
    report.push("Requirement", "CR310", "Binding requirement", of.binding_component());
}

fn liquidity_return(report: &mut RegulatoryReport, result: &CalculationResult, profile: &FirmProfile) {
    let la = &result.liquid_assets_requirement;
    let summary = &result.icara_summary;
    report.push("Liquid assets", "LA010", "Liquid assets held", summary.actual_liquid_assets);
    report.push("Requirement", "LA020", "One third of FOR", la.one_third_for);
    report.push("Requirement", "LA030", "Wind-down period (months)", profile.wind_down_period);
    report.push("Requirement", "LA040", "Wind-down costs", la.wind_down_costs);
    report.push("Requirement", "LA050", "One third of fixed ongoing costs", la.one_third_fixed_ongoing_costs);
    report.push("Threshold", "LA060", "Additional liquid assets for harm", la.additional_liquid_assets_for_harm);
    report.push("Threshold", "LA070", "Liquid assets threshold requirement", la.liquid_assets_threshold_requirement);
    report.push("Position", "LA080", "Surplus / (deficit)", summary.liquid_assets_surplus);
    report.push(
        "Position",
        "LA090",
        "Liquid assets as % of threshold requirement",
        percent_of(summary.actual_liquid_assets, la.liquid_assets_threshold_requirement),
    );
}

fn icara_questionnaire(report: &mut RegulatoryReport, result: &CalculationResult, profile: &FirmProfile) {
    let s = &result.icara_summary;
    report.push("Firm", "IC010", "Firm classification", s.classification.as_str());
    report.push("Firm", "IC020", "Firm activity", profile.firm_activity.as_str());
    report.push("Harms", "IC030", "Potential harms identified", s.total_harms);
    report.push("Harms", "IC040", "Material harms", s.material_harms);
    report.push("Own funds", "IC050", "Own funds threshold requirement", s.own_funds_threshold_requirement);
    report.push("Own funds", "IC060", "Own funds held", s.actual_own_funds);
    report.push("Own funds", "IC070", "Own funds adequate", s.own_funds_adequate);
    report.push("Liquidity", "IC080", "Liquid assets threshold requirement", s.liquid_assets_threshold_requirement);
    report.push("Liquidity", "IC090", "Liquid assets held", s.actual_liquid_assets);
    report.push("Liquidity", "IC100", "Liquid assets adequate", s.liquid_assets_adequate);
    report.push("Planning", "IC110", "Wind-down period (months)", profile.wind_down_period);
    report.push("Planning", "IC120", "Stress scenarios assessed", profile.stress_scenarios.len());
    report.push("Conclusion", "IC130", "Financial resources adequate", s.is_adequate());
}
