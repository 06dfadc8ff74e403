//! # mifidpru_docs: ICARA Documents and Regulatory Reports
//!
//! ## Outputs Layer Role
//!
//! mifidpru_docs turns calculation results into documents:
//! - ICARA Markdown sections and full documents (`document`)
//! - MIF001 / MIF002 / MIF005 / ICARA returns (`report`)
//! - CSV, XML and JSON export of returns (`report`)
//!
//! ```text
//! FirmProfile ──┐
//!               ├──> DocumentContext ──> generate_section ──> IcaraDocument::render
//! CalculationResult ┤
//!               └──> generate_regulatory_report ──> export_report(Csv | Xml | Json)
//! ```
//!
//! Generation never mutates its inputs. Sections that need results
//! degrade to a placeholder paragraph when none are available.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod document;
pub mod error;
pub mod report;

pub use document::{generate_section, DocumentContext, DocumentSection, IcaraDocument};
pub use error::ReportError;
pub use report::{
    export_report, generate_regulatory_report, generate_report_by_code, RegulatoryReport,
    ReportField, ReportFormat, ReportType, ReportValue,
};
