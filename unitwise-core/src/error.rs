//! Conversion errors
//!
//! An undefined conversion is an expected outcome, not a programming error.
//! These values tell the caller which part of the request had no match.

use thiserror::Error;

/// Conversion error codes (machine-readable)
pub mod codes {
    pub const UNKNOWN_CATEGORY: &str = "UNKNOWN_CATEGORY";
    pub const UNKNOWN_UNIT: &str = "UNKNOWN_UNIT";
    pub const NO_RULE: &str = "NO_RULE";
}

/// Why a conversion is undefined
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Unknown unit '{unit}' for category {category}")]
    UnknownUnit { unit: String, category: String },

    #[error("No conversion rule from {from} to {to} in {category}")]
    NoRuleDefined {
        from: String,
        to: String,
        category: String,
    },
}

impl ConversionError {
    pub fn code(&self) -> &'static str {
        match self {
            ConversionError::UnknownCategory(_) => codes::UNKNOWN_CATEGORY,
            ConversionError::UnknownUnit { .. } => codes::UNKNOWN_UNIT,
            ConversionError::NoRuleDefined { .. } => codes::NO_RULE,
        }
    }

    /// Suggestion for fixing the request
    pub fn suggestion(&self) -> String {
        match self {
            ConversionError::UnknownCategory(_) => {
                "Use one of: Length, Weight, Temperature".to_string()
            }
            ConversionError::UnknownUnit { category, .. } => {
                format!("Use list_units('{}') to see valid units", category)
            }
            ConversionError::NoRuleDefined { from, .. } => {
                format!("Only direct conversions are supported; try another target for {}", from)
            }
        }
    }
}
