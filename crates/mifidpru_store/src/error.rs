//! Error types for firm persistence.

use thiserror::Error;

/// Errors raised by the firm store and its file backend.
///
/// # Examples
/// ```
/// use mifidpru_store::StoreError;
///
/// let err = StoreError::FirmNotFound("firm_1".to_string());
/// assert_eq!(format!("{}", err), "Firm not found: firm_1");
/// ```
#[derive(Debug, Error)]
pub enum StoreError {
    /// Input is not well-formed JSON.
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// JSON is well-formed but does not describe a firm record.
    #[error("Corrupt firm record: {0}")]
    Corrupt(String),

    /// A required field is missing or blank.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Firm not found.
    #[error("Firm not found: {0}")]
    FirmNotFound(String),

    /// Calculation snapshot not found.
    #[error("Calculation not found: {0}")]
    CalculationNotFound(String),

    /// Serialisation failed.
    #[error("Serialisation error: {0}")]
    Serialisation(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Classifies a `serde_json` parse failure.
    ///
    /// Syntax errors and truncated input become [`StoreError::InvalidJson`];
    /// type mismatches and missing fields become [`StoreError::Corrupt`].
    pub fn from_parse(err: serde_json::Error) -> Self {
        use serde_json::error::Category;
        match err.classify() {
            Category::Syntax | Category::Eof => Self::InvalidJson(err.to_string()),
            Category::Data => Self::Corrupt(err.to_string()),
            Category::Io => Self::Io(err.into()),
        }
    }

    /// Returns true if the error means the input was rejected as corrupt.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Self::InvalidJson(_) | Self::Corrupt(_) | Self::MissingField(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::MissingField("name");
        assert_eq!(err.to_string(), "Missing required field: name");

        let err = StoreError::CalculationNotFound("calc_9".to_string());
        assert!(err.to_string().contains("calc_9"));
    }

    #[test]
    fn test_from_parse_classifies_syntax_and_data_errors() {
        let syntax = serde_json::from_str::<serde_json::Value>("{ not json").unwrap_err();
        assert!(matches!(StoreError::from_parse(syntax), StoreError::InvalidJson(_)));

        let data = serde_json::from_str::<Vec<u32>>(r#"{"a": 1}"#).unwrap_err();
        let err = StoreError::from_parse(data);
        assert!(matches!(err, StoreError::Corrupt(_)));
        assert!(err.is_corruption());
    }

    #[test]
    fn test_not_found_is_not_corruption() {
        assert!(!StoreError::FirmNotFound("x".into()).is_corruption());
    }
}
