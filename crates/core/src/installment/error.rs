//! Installment error types.

use gestor_shared::types::InstallmentId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised by settlement, scheduling and reparceling.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InstallmentError {
    /// Payments must be greater than zero after rounding to cents.
    #[error("Payment amount must be positive, got {0}")]
    NonPositivePayment(Decimal),

    /// The installment is already fully paid.
    #[error("Installment {0} is already settled")]
    AlreadySettled(InstallmentId),

    /// The installment is not in the target collection.
    #[error("Installment not found: {0}")]
    NotFound(InstallmentId),

    /// Installment amounts cannot be negative.
    #[error("Installment amount cannot be negative: {0}")]
    NegativeAmount(Decimal),

    /// Installment amounts are whole cents.
    #[error("Installment amount must be in whole cents: {0}")]
    SubCentAmount(Decimal),

    /// New installments must start Pendente with nothing paid.
    #[error("New installment {0} must be pending with no payments")]
    NotFresh(InstallmentId),

    /// New installments need a description.
    #[error("Installment description is required")]
    MissingDescription,

    /// A schedule needs at least one installment.
    #[error("Installment count must be at least 1")]
    InvalidCount,

    /// Reparceling needs at least one installment to replace.
    #[error("No installments selected for reparceling")]
    NothingToReplace,

    /// A reparceling must produce at least one installment.
    #[error("Replacement schedule is empty")]
    EmptySchedule,

    /// The id is already used in the collection.
    #[error("Duplicate installment id: {0}")]
    DuplicateId(InstallmentId),

    /// A due date would fall outside the supported calendar.
    #[error("Due date out of range")]
    DateOutOfRange,

    /// Installments with recorded payments cannot be deleted.
    #[error("Installment {0} has recorded payments")]
    HasPayments(InstallmentId),
}

impl InstallmentError {
    /// Returns the error code for callers.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositivePayment(_) => "NON_POSITIVE_PAYMENT",
            Self::AlreadySettled(_) => "INSTALLMENT_ALREADY_SETTLED",
            Self::NotFound(_) => "INSTALLMENT_NOT_FOUND",
            Self::NegativeAmount(_) => "NEGATIVE_AMOUNT",
            Self::SubCentAmount(_) => "SUB_CENT_AMOUNT",
            Self::NotFresh(_) => "INSTALLMENT_NOT_FRESH",
            Self::MissingDescription => "MISSING_DESCRIPTION",
            Self::InvalidCount => "INVALID_INSTALLMENT_COUNT",
            Self::NothingToReplace => "NOTHING_TO_REPLACE",
            Self::EmptySchedule => "EMPTY_SCHEDULE",
            Self::DuplicateId(_) => "DUPLICATE_INSTALLMENT_ID",
            Self::DateOutOfRange => "DATE_OUT_OF_RANGE",
            Self::HasPayments(_) => "INSTALLMENT_HAS_PAYMENTS",
        }
    }
}
