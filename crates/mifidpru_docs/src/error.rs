//! Error types for documents and regulatory reports.

use thiserror::Error;

/// Errors raised while generating or exporting documents and reports.
///
/// # Examples
/// ```
/// use mifidpru_docs::ReportError;
///
/// let err = ReportError::UnsupportedReportType("MIF003".to_string());
/// assert_eq!(format!("{}", err), "Unsupported report type: MIF003");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// Report type not recognised.
    #[error("Unsupported report type: {0}")]
    UnsupportedReportType(String),

    /// Export format not recognised.
    #[error("Unsupported report format: {0}")]
    UnsupportedFormat(String),

    /// Document section not recognised.
    #[error("Unknown document section: {0}")]
    UnknownSection(String),

    /// Writing the export failed.
    #[error("Export error: {0}")]
    Export(String),
}

impl ReportError {
    /// Create an export error
    pub fn export(msg: impl std::fmt::Display) -> Self {
        Self::Export(msg.to_string())
    }
}
