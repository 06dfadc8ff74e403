//! Report command implementation
//!
//! Builds a regulatory return from the latest calculation and writes it in
//! the requested format.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use mifidpru_docs::{export_report, generate_report_by_code, ReportFormat, ReportType};
use tracing::info;

use super::write_output;
use crate::session::AppContext;
use crate::{CliError, Result};

/// Run the report command
///
/// Returns the path written to. Without `output` the file lands in the
/// configured output directory under the report's default name.
pub fn run(
    ctx: &mut AppContext,
    report_type: &str,
    format: &str,
    reporting_date: Option<&str>,
    output: Option<&Path>,
) -> Result<PathBuf> {
    let format: ReportFormat = format.parse()?;
    let reporting_date = reporting_date.map(parse_date).transpose()?;

    let result = ctx.ensure_result();
    let profile = ctx.profile();
    let mut report = generate_report_by_code(report_type, &result, &profile)?
        .with_firm_name(ctx.firm()?.name.clone());
    if let Some(date) = reporting_date {
        report = report.with_reporting_date(date);
    }

    let content = export_report(&report, format)?;
    let path = match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &content)?;
            path.to_path_buf()
        }
        None => write_output(&ctx.config().output_dir, &report.file_name(format), &content)?,
    };
    info!(
        report_type = %report.report_type,
        format = %format,
        fields = report.fields.len(),
        "Report exported"
    );
    Ok(path)
}

/// The supported report types.
pub fn list_types() -> String {
    ReportType::all()
        .iter()
        .map(|t| format!("{:<8} {}\n", t.code(), t.title()))
        .collect()
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| CliError::invalid_argument(format!("reporting date '{}': {}", s, e)))
}
