//! Error types for profile enumerations.

use thiserror::Error;

/// Errors raised when parsing profile enumerations from text.
///
/// # Examples
/// ```
/// use mifidpru_core::types::ProfileError;
///
/// let err = ProfileError::UnknownFirmActivity("broker".to_string());
/// assert_eq!(format!("{}", err), "Unknown firm activity: broker");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    /// Firm activity category not recognised.
    #[error("Unknown firm activity: {0}")]
    UnknownFirmActivity(String),

    /// Harm category not recognised.
    #[error("Unknown harm category: {0}")]
    UnknownHarmCategory(String),

    /// Counterparty type not recognised.
    #[error("Unknown counterparty type: {0}")]
    UnknownCounterpartyType(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ProfileError::UnknownHarmCategory("systemic".to_string());
        assert_eq!(err.to_string(), "Unknown harm category: systemic");

        let err = ProfileError::UnknownCounterpartyType("sovereign".to_string());
        assert!(err.to_string().contains("sovereign"));
    }
}
