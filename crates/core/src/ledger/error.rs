//! Ledger error types.
//!
//! Module errors are wrapped as-is; the ledger adds lookups and
//! cross-entity consistency checks. [`LedgerError::kind`] maps every error
//! onto the three failure classes callers react to.

use gestor_shared::types::{
    AppointmentId, BankAccountId, ClientId, InvoiceId, QuoteId, SaleId, ServiceId,
};
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::installment::InstallmentError;
use crate::invoice::InvoiceError;
use crate::sales::{QuoteError, SaleError};

/// Failure class of a rejected command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input is malformed; re-prompt the user.
    Validation,
    /// Input is well-formed but conflicts with the current state.
    Consistency,
    /// A referenced entity does not exist.
    NotFound,
}

/// Errors returned by [`LedgerState::apply`](super::LedgerState::apply).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    // ========== Module Errors ==========
    /// Registry validation.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Sale validation.
    #[error(transparent)]
    Sale(#[from] SaleError),

    /// Quote validation or transition.
    #[error(transparent)]
    Quote(#[from] QuoteError),

    /// Installment settlement or scheduling.
    #[error(transparent)]
    Installment(#[from] InstallmentError),

    /// Invoice emission.
    #[error(transparent)]
    Invoice(#[from] InvoiceError),

    // ========== Lookups ==========
    /// Client not found.
    #[error("Client not found: {0}")]
    ClientNotFound(ClientId),

    /// Service not found.
    #[error("Service not found: {0}")]
    ServiceNotFound(ServiceId),

    /// Bank account not found.
    #[error("Bank account not found: {0}")]
    BankAccountNotFound(BankAccountId),

    /// Sale not found.
    #[error("Sale not found: {0}")]
    SaleNotFound(SaleId),

    /// Quote not found.
    #[error("Quote not found: {0}")]
    QuoteNotFound(QuoteId),

    /// Invoice not found.
    #[error("Invoice not found: {0}")]
    InvoiceNotFound(InvoiceId),

    /// Appointment not found.
    #[error("Appointment not found: {0}")]
    AppointmentNotFound(AppointmentId),

    // ========== Consistency ==========
    /// An entity with this id already exists.
    #[error("Duplicate {entity} id: {id}")]
    DuplicateId {
        /// Entity kind.
        entity: &'static str,
        /// Offending id.
        id: String,
    },

    /// Installments selected together belong to different clients.
    #[error("Selected installments belong to different clients")]
    MixedClients,

    /// The sale's quote was already turned into another sale.
    #[error("Quote {0} is already finalized")]
    QuoteAlreadyUsed(QuoteId),

    /// The sale imports a quote made out to another client.
    #[error("Quote {0} belongs to another client")]
    QuoteClientMismatch(QuoteId),

    // ========== Validation ==========
    /// Manual cash entry is malformed.
    #[error("Invalid cash entry: {0}")]
    InvalidCashEntry(&'static str),
}

impl LedgerError {
    /// Creates a duplicate-id error.
    pub(crate) fn duplicate(entity: &'static str, id: impl ToString) -> Self {
        Self::DuplicateId {
            entity,
            id: id.to_string(),
        }
    }

    /// Returns the error code for callers.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Catalog(e) => e.error_code(),
            Self::Sale(e) => e.error_code(),
            Self::Quote(e) => e.error_code(),
            Self::Installment(e) => e.error_code(),
            Self::Invoice(e) => e.error_code(),
            Self::ClientNotFound(_) => "CLIENT_NOT_FOUND",
            Self::ServiceNotFound(_) => "SERVICE_NOT_FOUND",
            Self::BankAccountNotFound(_) => "BANK_ACCOUNT_NOT_FOUND",
            Self::SaleNotFound(_) => "SALE_NOT_FOUND",
            Self::QuoteNotFound(_) => "QUOTE_NOT_FOUND",
            Self::InvoiceNotFound(_) => "INVOICE_NOT_FOUND",
            Self::AppointmentNotFound(_) => "APPOINTMENT_NOT_FOUND",
            Self::DuplicateId { .. } => "DUPLICATE_ID",
            Self::MixedClients => "MIXED_CLIENTS",
            Self::QuoteAlreadyUsed(_) => "QUOTE_ALREADY_USED",
            Self::QuoteClientMismatch(_) => "QUOTE_CLIENT_MISMATCH",
            Self::InvalidCashEntry(_) => "INVALID_CASH_ENTRY",
        }
    }

    /// Returns the failure class.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ClientNotFound(_)
            | Self::ServiceNotFound(_)
            | Self::BankAccountNotFound(_)
            | Self::SaleNotFound(_)
            | Self::QuoteNotFound(_)
            | Self::InvoiceNotFound(_)
            | Self::AppointmentNotFound(_)
            | Self::Installment(InstallmentError::NotFound(_)) => ErrorKind::NotFound,

            Self::DuplicateId { .. }
            | Self::MixedClients
            | Self::QuoteAlreadyUsed(_)
            | Self::QuoteClientMismatch(_)
            | Self::Installment(
                InstallmentError::AlreadySettled(_)
                | InstallmentError::DuplicateId(_)
                | InstallmentError::HasPayments(_),
            )
            | Self::Invoice(
                InvoiceError::AlreadyIssued(_)
                | InvoiceError::Cancelled(_)
                | InvoiceError::MixedClients,
            )
            | Self::Quote(QuoteError::AlreadyFinalized | QuoteError::InvalidTransition { .. }) => {
                ErrorKind::Consistency
            }

            _ => ErrorKind::Validation,
        }
    }
}
