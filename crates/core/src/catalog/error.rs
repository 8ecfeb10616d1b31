//! Catalog error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while validating registry entries.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// A required text field is blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// A price or balance field is negative where it must not be.
    #[error("{field} cannot be negative: {value}")]
    NegativeAmount {
        /// Field name.
        field: &'static str,
        /// Offending value.
        value: Decimal,
    },

    /// A tax rate is outside 0..=100.
    #[error("{tax} rate must be between 0 and 100, got {rate}")]
    InvalidRate {
        /// Tax name.
        tax: &'static str,
        /// Offending rate.
        rate: Decimal,
    },
}

impl CatalogError {
    /// Returns the error code for callers.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "MISSING_FIELD",
            Self::NegativeAmount { .. } => "NEGATIVE_AMOUNT",
            Self::InvalidRate { .. } => "INVALID_RATE",
        }
    }
}
