//! Store error types.

use gestor_core::{ErrorKind, LedgerError};
use gestor_shared::AppError;
use thiserror::Error;

/// Errors returned by [`LedgerHandle`](crate::LedgerHandle).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The command was rejected; state is unchanged.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// The actor has stopped.
    #[error("Ledger store is closed")]
    Closed,
}

impl StoreError {
    /// Returns the error code for callers.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Ledger(e) => e.error_code(),
            Self::Closed => "STORE_CLOSED",
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        let message = format!("{}: {err}", err.error_code());
        match err {
            StoreError::Ledger(e) => match e.kind() {
                ErrorKind::Validation => Self::Validation(message),
                ErrorKind::Consistency => Self::BusinessRule(message),
                ErrorKind::NotFound => Self::NotFound(message),
            },
            StoreError::Closed => Self::Unavailable(message),
        }
    }
}
