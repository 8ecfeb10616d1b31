//! Invoice error types.

use gestor_shared::types::InvoiceId;
use thiserror::Error;

/// Errors raised by invoice emission and the mirror.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvoiceError {
    /// The invoice already has a fiscal number.
    #[error("Invoice {0} is already issued")]
    AlreadyIssued(InvoiceId),

    /// Cancelled invoices cannot change.
    #[error("Invoice {0} is cancelled")]
    Cancelled(InvoiceId),

    /// Emission needs a fiscal number.
    #[error("Invoice number is required")]
    MissingNumber,

    /// A batch needs at least one invoice.
    #[error("No invoices selected")]
    NothingSelected,

    /// The same invoice was selected twice.
    #[error("Invoice {0} selected more than once")]
    DuplicateSelection(InvoiceId),

    /// Grouped sales must share one client.
    #[error("Invoices belong to different clients")]
    MixedClients,

    /// A mirror needs at least one sale.
    #[error("Mirror requires at least one sale")]
    NoSales,
}

impl InvoiceError {
    /// Returns the error code for callers.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyIssued(_) => "INVOICE_ALREADY_ISSUED",
            Self::Cancelled(_) => "INVOICE_CANCELLED",
            Self::MissingNumber => "INVOICE_NUMBER_REQUIRED",
            Self::NothingSelected => "NO_INVOICES_SELECTED",
            Self::DuplicateSelection(_) => "DUPLICATE_INVOICE_SELECTION",
            Self::MixedClients => "MIXED_CLIENTS",
            Self::NoSales => "MIRROR_NO_SALES",
        }
    }
}
