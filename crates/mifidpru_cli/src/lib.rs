//! # mifidpru_cli: Command-Line Front End
//!
//! ## Service Layer Role
//!
//! mifidpru_cli drives the other crates from the terminal:
//! - Layered configuration: file, `MIFIDPRU_*` environment, flags (`config`)
//! - A session over the firm store holding the working profile (`session`)
//! - One module per command (`commands`)
//!
//! ```text
//! mifidpru ──► config ──► AppContext ──┬──► mifidpru_engine  (calculate, stress, monitor)
//!                            │         └──► mifidpru_docs    (report, document)
//!                            └──────────────► mifidpru_store (firms, export, import)
//! ```
//!
//! The working profile and the latest result are shared snapshots. An edit
//! builds a new profile, sanitises it, refreshes its derived fields and then
//! replaces the old one whole.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod commands;
pub mod config;
pub mod error;
pub mod session;

pub use error::{CliError, Result};
pub use session::AppContext;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
