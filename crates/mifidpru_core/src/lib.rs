//! # mifidpru_core: Data Model for MIFIDPRU Prudential Calculations
//!
//! ## Foundation Layer Role
//!
//! mifidpru_core is the bottom layer of the workspace, providing:
//! - The firm profile record and its input groups (`profile::firm`)
//! - Harms, stress scenarios and counterparty exposures (`profile`)
//! - Strongly-typed identifiers (`types::ids`)
//! - GBP formatting and ratio helpers (`types::money`)
//! - Input sanitisation with recorded corrections (`profile::validation`)
//!
//! ## Zero Dependency Principle
//!
//! This crate has no dependencies on other mifidpru_* crates. Every
//! calculation engine consumes these types; none of them live here.
//!
//! ## Usage Examples
//!
//! ```rust
//! use mifidpru_core::profile::{FirmActivity, FirmProfile, Harm, HarmCategory};
//! use mifidpru_core::types::format_gbp;
//!
//! let mut profile = FirmProfile::default();
//! profile.firm_activity = FirmActivity::HoldingClientMoney;
//! profile.overheads.total_expenditure = 8_000_000.0;
//!
//! let harm = Harm::new("Reconciliation failure", HarmCategory::Client, 2, 4)
//!     .with_additional_own_funds(250_000.0);
//! assert!(harm.is_material());
//!
//! assert_eq!(format_gbp(1_234_567.0), "£1,234,567");
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod profile;
pub mod types;
