//! # mifidpru_store: Firm Records and Persistence
//!
//! ## Outputs Layer Role
//!
//! mifidpru_store keeps firms and their saved calculations:
//! - Firm records and immutable calculation snapshots (`firm`)
//! - An in-memory store with create / select / save / load / delete (`store`)
//! - Single-firm JSON export and validated import (`store`)
//! - A JSON file backend for the whole store (`file`)
//!
//! ## Persistence Contract
//!
//! ```text
//! Firm
//! ├── id, name, createdDate, modifiedDate
//! ├── profile: FirmProfile
//! └── calculations[]
//!     └── id, name, timestamp, inputData: FirmProfile, results: CalculationResult
//! ```
//!
//! Import parses, rejects blank ids and names, sanitises every profile and
//! only then merges. A firm with an existing id is replaced in place.
//! Exporting an imported firm reproduces the import byte for byte.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod error;
pub mod file;
pub mod firm;
pub mod store;

pub use error::StoreError;
pub use file::{read_export, write_export, JsonFileStore};
pub use firm::{Calculation, Firm};
pub use store::{export_firm_json, parse_firm_json, FirmStore, ImportOutcome};
