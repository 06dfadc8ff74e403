//! Engine error types.
//!
//! Calculations themselves never fail: invalid amounts are clamped before
//! they reach an engine. Errors arise only from edits that reference records
//! that do not exist.

use thiserror::Error;

/// Errors raised by register and scenario edits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// No harm with the given id exists in the register.
    #[error("Harm not found: {0}")]
    HarmNotFound(String),

    /// A harm with the given id is already registered.
    #[error("Duplicate harm ID: {0}")]
    DuplicateHarm(String),

    /// No exposure with the given id exists.
    #[error("Exposure not found: {0}")]
    ExposureNotFound(String),

    /// Preset scenario name not recognised.
    #[error("Unknown stress preset: {0}")]
    UnknownPreset(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EngineError::HarmNotFound("harm_42".to_string());
        assert_eq!(err.to_string(), "Harm not found: harm_42");

        let err = EngineError::UnknownPreset("meteor".to_string());
        assert!(err.to_string().contains("meteor"));
    }
}
