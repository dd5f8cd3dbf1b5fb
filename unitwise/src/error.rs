//! Session errors
//!
//! None of these are fatal. A failed request leaves the session usable and
//! is reported to the user as a structured value.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use unitwise_core::ConversionError;

/// Error codes (machine-readable): conversion codes plus session codes
pub mod codes {
    pub use unitwise_core::codes::*;

    pub const INVALID_VALUE: &str = "INVALID_VALUE";
    pub const NOTHING_TO_EXPORT: &str = "NOTHING_TO_EXPORT";
    pub const IO_ERROR: &str = "IO_ERROR";
}

#[derive(Debug, Error)]
pub enum ShellError {
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Nothing to export: no conversion has been made yet")]
    NothingToExport,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Structured error for the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ShellError {
    pub fn code(&self) -> &'static str {
        match self {
            ShellError::Conversion(e) => e.code(),
            ShellError::InvalidValue(_) => codes::INVALID_VALUE,
            ShellError::NothingToExport => codes::NOTHING_TO_EXPORT,
            ShellError::Io(_) => codes::IO_ERROR,
        }
    }

    pub fn report(&self) -> ErrorReport {
        let suggestion = match self {
            ShellError::Conversion(e) => Some(e.suggestion()),
            ShellError::InvalidValue(_) => Some("Enter a finite, non-negative number".to_string()),
            ShellError::NothingToExport => Some("Run a conversion first".to_string()),
            ShellError::Io(_) => Some(format!("Check that {} is writable", crate::ENV_EXPORT_DIR)),
        };

        ErrorReport {
            code: self.code().to_string(),
            message: self.to_string(),
            suggestion,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_codes() {
        assert_eq!(ShellError::InvalidValue("x".into()).code(), codes::INVALID_VALUE);
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(ShellError::from(io).code(), codes::IO_ERROR);
    }

    #[test]
    fn test_conversion_error_is_transparent() {
        let err = ShellError::from(ConversionError::UnknownCategory("Speed".into()));
        assert_eq!(err.to_string(), "Unknown category: Speed");
        assert_eq!(err.code(), codes::UNKNOWN_CATEGORY);
    }

    #[test]
    fn test_report() {
        let report = ShellError::NothingToExport.report();
        assert_eq!(report.code, codes::NOTHING_TO_EXPORT);
        assert_eq!(report.suggestion.as_deref(), Some("Run a conversion first"));
    }

    #[test]
    fn test_report_serialization_skips_missing_suggestion() {
        let report = ErrorReport {
            code: "X".into(),
            message: "m".into(),
            suggestion: None,
        };
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(json, r#"{"code":"X","message":"m"}"#);
    }
}
