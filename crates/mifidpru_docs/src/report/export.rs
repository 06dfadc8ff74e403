//! CSV, XML and JSON export of regulatory returns.

use super::RegulatoryReport;
use crate::error::ReportError;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Export format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// CSV format
    Csv,
    /// XML format
    Xml,
    /// JSON format
    Json,
}

impl ReportFormat {
    /// Get file extension
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Xml => "xml",
            ReportFormat::Json => "json",
        }
    }

    /// Get MIME type
    pub fn mime_type(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "text/csv",
            ReportFormat::Xml => "application/xml",
            ReportFormat::Json => "application/json",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ReportFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "xml" => Ok(Self::Xml),
            "json" => Ok(Self::Json),
            _ => Err(ReportError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Serialises a report in the requested format.
pub fn export_report(report: &RegulatoryReport, format: ReportFormat) -> Result<String, ReportError> {
    let content = match format {
        ReportFormat::Csv => to_csv(report)?,
        ReportFormat::Xml => to_xml(report)?,
        ReportFormat::Json => to_json(report)?,
    };
    debug!(
        report_type = %report.report_type,
        format = %format,
        size = content.len(),
        "Report exported"
    );
    Ok(content)
}

/// CSV with a `section,code,label,value` header.
///
/// The first rows carry the report metadata under the `Report` section.
pub fn to_csv(report: &RegulatoryReport) -> Result<String, ReportError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(["section", "code", "label", "value"])
        .map_err(ReportError::export)?;

    let reporting_date = report.reporting_date.format("%Y-%m-%d").to_string();
    let metadata = [
        ("REPORT", "Report type", report.report_type.code()),
        ("FIRM", "Firm name", report.firm_name.as_str()),
        ("DATE", "Reporting date", reporting_date.as_str()),
    ];
    for (code, label, value) in metadata {
        wtr.write_record(["Report", code, label, value])
            .map_err(ReportError::export)?;
    }

    for field in &report.fields {
        let value = field.value.to_plain_string();
        wtr.write_record([
            field.section.as_str(),
            field.code.as_str(),
            field.label.as_str(),
            value.as_str(),
        ])
        .map_err(ReportError::export)?;
    }

    let bytes = wtr.into_inner().map_err(ReportError::export)?;
    String::from_utf8(bytes).map_err(ReportError::export)
}

fn write_text_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> Result<(), ReportError> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(ReportError::export)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(ReportError::export)?;
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(ReportError::export)?;
    Ok(())
}

/// XML document with a `<Report>` root and one `<Field>` per line.
pub fn to_xml(report: &RegulatoryReport) -> Result<String, ReportError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(ReportError::export)?;

    let root = BytesStart::new("Report").with_attributes([("type", report.report_type.code())]);
    writer
        .write_event(Event::Start(root))
        .map_err(ReportError::export)?;

    write_text_element(&mut writer, "Title", &report.title)?;
    write_text_element(&mut writer, "FirmName", &report.firm_name)?;
    write_text_element(
        &mut writer,
        "ReportingDate",
        &report.reporting_date.format("%Y-%m-%d").to_string(),
    )?;
    write_text_element(&mut writer, "GeneratedAt", &report.generated_at.to_rfc3339())?;

    writer
        .write_event(Event::Start(BytesStart::new("Fields")))
        .map_err(ReportError::export)?;
    for field in &report.fields {
        let start = BytesStart::new("Field").with_attributes([
            ("section", field.section.as_str()),
            ("code", field.code.as_str()),
            ("label", field.label.as_str()),
        ]);
        let value = field.value.to_plain_string();
        writer
            .write_event(Event::Start(start))
            .map_err(ReportError::export)?;
        writer
            .write_event(Event::Text(BytesText::new(&value)))
            .map_err(ReportError::export)?;
        writer
            .write_event(Event::End(BytesEnd::new("Field")))
            .map_err(ReportError::export)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new("Fields")))
        .map_err(ReportError::export)?;
    writer
        .write_event(Event::End(BytesEnd::new("Report")))
        .map_err(ReportError::export)?;

    String::from_utf8(writer.into_inner()).map_err(ReportError::export)
}

/// Pretty-printed JSON.
pub fn to_json(report: &RegulatoryReport) -> Result<String, ReportError> {
    serde_json::to_string_pretty(report).map_err(ReportError::export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{ReportField, ReportType, ReportValue};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn small_report() -> RegulatoryReport {
        RegulatoryReport {
            report_type: ReportType::Mif001,
            title: "MIF001 - Own Funds".to_string(),
            firm_name: "Smith & Jones, LLP".to_string(),
            reporting_date: NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
            generated_at: Utc.with_ymd_and_hms(2025, 4, 1, 9, 0, 0).unwrap(),
            fields: vec![
                ReportField {
                    section: "Requirement".to_string(),
                    code: "OF030".to_string(),
                    label: "Fixed overhead requirement".to_string(),
                    value: ReportValue::Amount(1_325_000.0),
                },
                ReportField {
                    section: "Position".to_string(),
                    code: "OF120".to_string(),
                    label: "Own funds as % of own funds requirement".to_string(),
                    value: ReportValue::Text("n/a".to_string()),
                },
            ],
        }
    }

    #[test]
    fn test_format_metadata() {
        assert_eq!(ReportFormat::Csv.extension(), "csv");
        assert_eq!(ReportFormat::Xml.mime_type(), "application/xml");
        assert_eq!("JSON".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert!(matches!(
            "pdf".parse::<ReportFormat>(),
            Err(ReportError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_csv_quotes_and_rows() {
        let csv = to_csv(&small_report()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "section,code,label,value");
        assert_eq!(lines[1], "Report,REPORT,Report type,MIF001");
        assert_eq!(lines[2], "Report,FIRM,Firm name,\"Smith & Jones, LLP\"");
        assert_eq!(lines[4], "Requirement,OF030,Fixed overhead requirement,1325000.00");
        assert_eq!(lines.len(), 6);

        let mut rdr = csv::Reader::from_reader(csv.as_bytes());
        assert_eq!(rdr.records().count(), 5);
    }

    #[test]
    fn test_xml_structure_and_escaping() {
        let xml = to_xml(&small_report()).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<Report type=\"MIF001\">"));
        assert!(xml.contains("<FirmName>Smith &amp; Jones, LLP</FirmName>"));
        assert!(xml.contains("code=\"OF030\""));
        assert!(xml.contains(">1325000.00</Field>"));
        assert_eq!(xml.matches("<Field ").count(), 2);
        assert!(xml.trim_end().ends_with("</Report>"));
    }

    #[test]
    fn test_json_round_trip() {
        let report = small_report();
        let json = to_json(&report).unwrap();
        assert!(json.contains("\"reportType\": \"MIF001\""));
        let back: RegulatoryReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn test_export_dispatch() {
        let report = small_report();
        for format in [ReportFormat::Csv, ReportFormat::Xml, ReportFormat::Json] {
            assert!(!export_report(&report, format).unwrap().is_empty());
        }
    }
}
