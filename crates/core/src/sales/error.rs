//! Sale and quote error types.

use rust_decimal::Decimal;
use thiserror::Error;

use super::quote::QuoteStatus;

/// Errors raised while validating or settling a sale.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SaleError {
    /// A sale needs at least one item.
    #[error("Sale must have at least one item")]
    NoItems,

    /// Item quantity must be at least one.
    #[error("Item quantity must be at least 1")]
    InvalidQuantity,

    /// Unit price cannot be negative.
    #[error("Unit price cannot be negative: {0}")]
    NegativeUnitPrice(Decimal),

    /// Discount cannot be negative.
    #[error("Discount cannot be negative: {0}")]
    NegativeDiscount(Decimal),

    /// Retention amount cannot be negative.
    #[error("Retention amount cannot be negative: {0}")]
    NegativeRetention(Decimal),

    /// At least one installment is required.
    #[error("Installment count must be at least 1")]
    NoInstallments,

    /// Immediate methods settle into a bank account, which is mandatory.
    #[error("Payment method {0} requires a bank account")]
    BankAccountRequired(&'static str),

    /// Stored totals disagree with the items, discount and retention.
    #[error("Sale totals are inconsistent: expected final amount {expected}, got {actual}")]
    TotalsMismatch {
        /// Final amount recomputed from the items.
        expected: Decimal,
        /// Final amount on the sale.
        actual: Decimal,
    },

    /// The client name snapshot is blank.
    #[error("Sale must reference a client")]
    MissingClient,

    /// A receivable due date would fall outside the supported calendar.
    #[error("Installment due date out of range")]
    DueDateOutOfRange,
}

impl SaleError {
    /// Returns the error code for callers.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NoItems => "SALE_NO_ITEMS",
            Self::InvalidQuantity => "INVALID_QUANTITY",
            Self::NegativeUnitPrice(_) => "NEGATIVE_UNIT_PRICE",
            Self::NegativeDiscount(_) => "NEGATIVE_DISCOUNT",
            Self::NegativeRetention(_) => "NEGATIVE_RETENTION",
            Self::NoInstallments => "NO_INSTALLMENTS",
            Self::BankAccountRequired(_) => "BANK_ACCOUNT_REQUIRED",
            Self::TotalsMismatch { .. } => "SALE_TOTALS_MISMATCH",
            Self::MissingClient => "SALE_MISSING_CLIENT",
            Self::DueDateOutOfRange => "DUE_DATE_OUT_OF_RANGE",
        }
    }
}

/// Errors raised by quote operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuoteError {
    /// Item-level problem shared with sales.
    #[error(transparent)]
    Items(#[from] SaleError),

    /// The requested status change is not allowed.
    #[error("Invalid quote status transition from {from} to {to}")]
    InvalidTransition {
        /// Current status.
        from: QuoteStatus,
        /// Requested status.
        to: QuoteStatus,
    },

    /// Finalized quotes are frozen.
    #[error("Quote is already finalized")]
    AlreadyFinalized,

    /// The expiration date precedes the quote date.
    #[error("Quote expires before it was issued")]
    ExpiresBeforeIssue,
}

impl QuoteError {
    /// Returns the error code for callers.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Items(inner) => inner.error_code(),
            Self::InvalidTransition { .. } => "INVALID_QUOTE_TRANSITION",
            Self::AlreadyFinalized => "QUOTE_ALREADY_FINALIZED",
            Self::ExpiresBeforeIssue => "QUOTE_EXPIRES_BEFORE_ISSUE",
        }
    }
}
