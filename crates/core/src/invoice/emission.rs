//! Invoice emission and cancellation.

use chrono::NaiveDate;

use super::error::InvoiceError;
use super::types::{Invoice, InvoiceStatus};

/// Stateless invoice transitions.
pub struct InvoiceService;

impl InvoiceService {
    /// Checks that an invoice can be issued.
    pub fn ensure_emittable(invoice: &Invoice) -> Result<(), InvoiceError> {
        match invoice.status {
            InvoiceStatus::Pending => Ok(()),
            InvoiceStatus::Issued => Err(InvoiceError::AlreadyIssued(invoice.id)),
            InvoiceStatus::Cancelled => Err(InvoiceError::Cancelled(invoice.id)),
        }
    }

    /// Normalizes a fiscal number, rejecting blank input.
    pub fn normalize_number(number: &str) -> Result<String, InvoiceError> {
        let trimmed = number.trim();
        if trimmed.is_empty() {
            return Err(InvoiceError::MissingNumber);
        }
        Ok(trimmed.to_string())
    }

    /// Issues a pending invoice with `number` on `date`.
    pub fn emit(invoice: &Invoice, number: &str, date: NaiveDate) -> Result<Invoice, InvoiceError> {
        Self::ensure_emittable(invoice)?;
        let number = Self::normalize_number(number)?;

        let mut issued = invoice.clone();
        issued.status = InvoiceStatus::Issued;
        issued.number = Some(number);
        issued.emission_date = Some(date);
        Ok(issued)
    }

    /// Voids an invoice. The fiscal number, if any, is kept for reference.
    pub fn cancel(invoice: &Invoice) -> Result<Invoice, InvoiceError> {
        if invoice.status == InvoiceStatus::Cancelled {
            return Err(InvoiceError::Cancelled(invoice.id));
        }
        let mut cancelled = invoice.clone();
        cancelled.status = InvoiceStatus::Cancelled;
        Ok(cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gestor_shared::types::{InvoiceId, SaleId};
    use rust_decimal_macros::dec;

    fn pending() -> Invoice {
        Invoice {
            id: InvoiceId::new(),
            sale_id: SaleId::new(),
            client_name: "ACME".into(),
            amount: dec!(900),
            status: InvoiceStatus::Pending,
            number: None,
            emission_date: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()
    }

    #[test]
    fn test_emit_sets_number_and_date() {
        let issued = InvoiceService::emit(&pending(), " 2026/15 ", today()).unwrap();
        assert_eq!(issued.status, InvoiceStatus::Issued);
        assert_eq!(issued.number.as_deref(), Some("2026/15"));
        assert_eq!(issued.emission_date, Some(today()));
    }

    #[test]
    fn test_emit_rejects_blank_number() {
        assert_eq!(
            InvoiceService::emit(&pending(), "   ", today()),
            Err(InvoiceError::MissingNumber)
        );
    }

    #[test]
    fn test_emit_twice_rejected() {
        let issued = InvoiceService::emit(&pending(), "1", today()).unwrap();
        assert_eq!(
            InvoiceService::emit(&issued, "2", today()),
            Err(InvoiceError::AlreadyIssued(issued.id))
        );
    }

    #[test]
    fn test_cancel() {
        let issued = InvoiceService::emit(&pending(), "1", today()).unwrap();
        let cancelled = InvoiceService::cancel(&issued).unwrap();
        assert_eq!(cancelled.status, InvoiceStatus::Cancelled);
        assert_eq!(cancelled.number.as_deref(), Some("1"));

        assert_eq!(
            InvoiceService::cancel(&cancelled),
            Err(InvoiceError::Cancelled(cancelled.id))
        );
        assert_eq!(
            InvoiceService::emit(&cancelled, "2", today()),
            Err(InvoiceError::Cancelled(cancelled.id))
        );
    }
}
