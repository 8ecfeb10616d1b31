//! Quotes and their status machine.

use chrono::NaiveDate;
use gestor_shared::types::{BankAccountId, ClientId, QuoteId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::{QuoteError, SaleError};
use super::types::{PaymentMethod, SaleDraft, SaleItem, SaleTotals};

/// Quote status.
///
/// Valid transitions:
/// - Pendente → Aprovado | Rejeitado
/// - Aprovado ↔ Rejeitado
/// - Aprovado | Rejeitado → Pendente
/// - any non-final → Finalizado (only when an imported sale commits)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuoteStatus {
    /// Awaiting the client's answer.
    #[serde(rename = "Pendente")]
    Pending,
    /// Accepted by the client.
    #[serde(rename = "Aprovado")]
    Approved,
    /// Declined by the client.
    #[serde(rename = "Rejeitado")]
    Rejected,
    /// Converted into a sale.
    #[serde(rename = "Finalizado")]
    Finalized,
}

impl QuoteStatus {
    /// Returns the display name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pendente",
            Self::Approved => "Aprovado",
            Self::Rejected => "Rejeitado",
            Self::Finalized => "Finalizado",
        }
    }

    /// Checks a manual status change. Finalizado is never a manual target.
    #[must_use]
    pub fn can_transition_to(self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::Pending, Self::Approved | Self::Rejected)
                | (Self::Approved, Self::Rejected | Self::Pending)
                | (Self::Rejected, Self::Approved | Self::Pending)
        )
    }
}

impl fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A priced proposal that may later become a sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Unique identifier.
    pub id: QuoteId,
    /// Client.
    pub client_id: ClientId,
    /// Client name snapshot.
    pub client_name: String,
    /// Issue date.
    pub date: NaiveDate,
    /// Last day the quote is valid.
    pub expiration_date: NaiveDate,
    /// Items.
    pub items: Vec<SaleItem>,
    /// Sum of line totals.
    pub subtotal: Decimal,
    /// Absolute discount.
    pub discount: Decimal,
    /// `max(0, subtotal - discount)`.
    pub final_amount: Decimal,
    /// Status.
    pub status: QuoteStatus,
    /// Free-text notes.
    pub notes: Option<String>,
}

impl Quote {
    /// Creates a pending quote with computed totals.
    #[must_use]
    pub fn new(
        client_id: ClientId,
        client_name: impl Into<String>,
        items: Vec<SaleItem>,
        discount: Decimal,
        date: NaiveDate,
        expiration_date: NaiveDate,
    ) -> Self {
        let totals = SaleTotals::compute(&items, discount, None, false);
        Self {
            id: QuoteId::new(),
            client_id,
            client_name: client_name.into(),
            date,
            expiration_date,
            items,
            subtotal: totals.subtotal,
            discount: totals.discount,
            final_amount: totals.final_amount,
            status: QuoteStatus::Pending,
            notes: None,
        }
    }

    /// Validates a quote before it is stored.
    pub fn validate(&self) -> Result<(), QuoteError> {
        if self.items.is_empty() {
            return Err(SaleError::NoItems.into());
        }
        if self.discount < Decimal::ZERO {
            return Err(SaleError::NegativeDiscount(self.discount).into());
        }
        for item in &self.items {
            if item.quantity == 0 {
                return Err(SaleError::InvalidQuantity.into());
            }
            if item.unit_price < Decimal::ZERO {
                return Err(SaleError::NegativeUnitPrice(item.unit_price).into());
            }
        }
        if self.expiration_date < self.date {
            return Err(QuoteError::ExpiresBeforeIssue);
        }
        if self.status == QuoteStatus::Finalized {
            return Err(QuoteError::AlreadyFinalized);
        }

        let expected = SaleTotals::compute(&self.items, self.discount, None, false).final_amount;
        if expected != self.final_amount {
            return Err(SaleError::TotalsMismatch {
                expected,
                actual: self.final_amount,
            }
            .into());
        }
        Ok(())
    }

    /// Returns true once the expiration date has passed.
    #[must_use]
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        today > self.expiration_date
    }

    /// Copies items and discount into a new sale draft.
    ///
    /// The quote's status is not copied; it becomes Finalizado only when
    /// the resulting sale is settled.
    #[must_use]
    pub fn to_sale_draft(
        &self,
        payment_method: PaymentMethod,
        installments_count: u32,
        bank_account_id: Option<BankAccountId>,
    ) -> SaleDraft {
        let mut draft = SaleDraft::new(
            self.client_id,
            self.client_name.clone(),
            self.items.clone(),
            payment_method,
        );
        draft.discount = self.discount;
        draft.installments_count = installments_count;
        draft.bank_account_id = bank_account_id;
        draft.quote_id = Some(self.id);
        draft
    }

    /// Applies a manual status change.
    pub fn transition(&mut self, to: QuoteStatus) -> Result<(), QuoteError> {
        if self.status == QuoteStatus::Finalized {
            return Err(QuoteError::AlreadyFinalized);
        }
        if !self.status.can_transition_to(to) {
            return Err(QuoteError::InvalidTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gestor_shared::types::ServiceId;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn quote() -> Quote {
        Quote::new(
            ClientId::new(),
            "ACME",
            vec![SaleItem {
                service_id: ServiceId::new(),
                service_name: "Auditoria".into(),
                unit_price: dec!(250),
                quantity: 4,
            }],
            dec!(100),
            NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 2, 15).unwrap(),
        )
    }

    #[test]
    fn test_new_quote_totals() {
        let q = quote();
        assert_eq!(q.subtotal, dec!(1000));
        assert_eq!(q.final_amount, dec!(900));
        assert_eq!(q.status, QuoteStatus::Pending);
        assert!(q.validate().is_ok());
    }

    #[rstest]
    #[case(QuoteStatus::Pending, QuoteStatus::Approved, true)]
    #[case(QuoteStatus::Pending, QuoteStatus::Rejected, true)]
    #[case(QuoteStatus::Approved, QuoteStatus::Rejected, true)]
    #[case(QuoteStatus::Rejected, QuoteStatus::Pending, true)]
    #[case(QuoteStatus::Pending, QuoteStatus::Pending, false)]
    #[case(QuoteStatus::Approved, QuoteStatus::Finalized, false)]
    #[case(QuoteStatus::Finalized, QuoteStatus::Pending, false)]
    fn test_transitions(#[case] from: QuoteStatus, #[case] to: QuoteStatus, #[case] ok: bool) {
        assert_eq!(from.can_transition_to(to), ok);
    }

    #[test]
    fn test_finalized_quote_is_frozen() {
        let mut q = quote();
        q.status = QuoteStatus::Finalized;
        assert_eq!(
            q.transition(QuoteStatus::Approved),
            Err(QuoteError::AlreadyFinalized)
        );
    }

    #[test]
    fn test_expiration() {
        let q = quote();
        assert!(!q.is_expired(q.expiration_date));
        assert!(q.is_expired(q.expiration_date.succ_opt().unwrap()));
    }

    #[test]
    fn test_expires_before_issue_rejected() {
        let mut q = quote();
        q.expiration_date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert_eq!(q.validate(), Err(QuoteError::ExpiresBeforeIssue));
    }

    #[test]
    fn test_to_sale_draft_copies_items_and_discount() {
        let q = quote();
        let draft = q.to_sale_draft(PaymentMethod::Boleto, 3, None);
        assert_eq!(draft.items, q.items);
        assert_eq!(draft.discount, q.discount);
        assert_eq!(draft.quote_id, Some(q.id));
        assert_eq!(draft.installments_count, 3);
        assert_eq!(draft.client_id, q.client_id);
    }
}
