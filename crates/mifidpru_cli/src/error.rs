//! Error types for the CLI.

use crate::config::ConfigError;
use mifidpru_core::types::ProfileError;
use mifidpru_docs::ReportError;
use mifidpru_engine::EngineError;
use mifidpru_store::StoreError;
use thiserror::Error;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Persistence error
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Report or document error
    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    /// Invalid profile value
    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),

    /// Calculation engine error
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No firm is selected
    #[error("No firm selected. Run `mifidpru init` or `mifidpru firms select <id>` first")]
    NoFirmSelected,

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// JSON could not be read or written
    #[error("JSON error: {0}")]
    Json(String),
}

impl CliError {
    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// Result alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
