//! Installment domain types.

use chrono::NaiveDate;
use gestor_shared::types::{InstallmentId, SaleId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cashflow::RecordType;
use crate::cashflow::categories;

/// Which side of the ledger an installment sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallmentKind {
    /// Money the business expects to receive.
    Receivable,
    /// Money the business owes.
    Payable,
}

impl InstallmentKind {
    /// Direction of the principal record.
    #[must_use]
    pub fn principal_type(self) -> RecordType {
        match self {
            Self::Receivable => RecordType::Income,
            Self::Payable => RecordType::Expense,
        }
    }

    /// Category of the principal record when the installment has none.
    #[must_use]
    pub fn default_category(self) -> &'static str {
        match self {
            Self::Receivable => categories::CUSTOMER_RECEIPT,
            Self::Payable => categories::OPERATING_EXPENSE,
        }
    }

    /// Category of the record offsetting a forgiven shortfall.
    #[must_use]
    pub fn discount_category(self) -> &'static str {
        match self {
            Self::Receivable => categories::DISCOUNT_GRANTED,
            Self::Payable => categories::DISCOUNT_OBTAINED,
        }
    }

    /// Category of the record carrying an overage booked as interest.
    #[must_use]
    pub fn interest_category(self) -> &'static str {
        match self {
            Self::Receivable => categories::INTEREST_RECEIVED,
            Self::Payable => categories::INTEREST_PAID,
        }
    }

    /// Verb used in record descriptions.
    #[must_use]
    pub fn settlement_label(self) -> &'static str {
        match self {
            Self::Receivable => "Recebimento",
            Self::Payable => "Pagamento",
        }
    }
}

/// Installment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstallmentStatus {
    /// Nothing paid yet.
    #[serde(rename = "Pendente")]
    Pending,
    /// Fully settled.
    #[serde(rename = "Pago")]
    Paid,
    /// Partly paid; a balance remains.
    #[serde(rename = "Parcial")]
    Partial,
    /// Past due and unpaid. Usually derived, see [`Installment::effective_status`].
    #[serde(rename = "Atrasado")]
    Overdue,
}

impl InstallmentStatus {
    /// Returns the display name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pendente",
            Self::Paid => "Pago",
            Self::Partial => "Parcial",
            Self::Overdue => "Atrasado",
        }
    }

    /// Returns true if money can still be applied.
    #[must_use]
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Paid)
    }
}

impl fmt::Display for InstallmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A scheduled receivable or payable obligation.
///
/// Invariant: `paid_amount <= amount`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    /// Unique identifier.
    pub id: InstallmentId,
    /// Originating sale, for receivables.
    pub sale_id: Option<SaleId>,
    /// Description.
    pub description: String,
    /// Principal owed. Grows only when an overage is absorbed as principal.
    pub amount: Decimal,
    /// Due date.
    pub due_date: NaiveDate,
    /// Status.
    pub status: InstallmentStatus,
    /// Cumulative amount paid.
    pub paid_amount: Decimal,
    /// Date of the last payment.
    pub payment_date: Option<NaiveDate>,
    /// Statement category (payables).
    pub category: Option<String>,
    /// Supplier document number (payables).
    pub document_number: Option<String>,
}

impl Installment {
    /// Creates a pending installment.
    #[must_use]
    pub fn pending(description: impl Into<String>, amount: Decimal, due_date: NaiveDate) -> Self {
        Self {
            id: InstallmentId::new(),
            sale_id: None,
            description: description.into(),
            amount,
            due_date,
            status: InstallmentStatus::Pending,
            paid_amount: Decimal::ZERO,
            payment_date: None,
            category: None,
            document_number: None,
        }
    }

    /// Links the installment to a sale.
    #[must_use]
    pub fn with_sale(mut self, sale_id: Option<SaleId>) -> Self {
        self.sale_id = sale_id;
        self
    }

    /// Sets the statement category.
    #[must_use]
    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = category;
        self
    }

    /// Balance still owed.
    #[must_use]
    pub fn remaining(&self) -> Decimal {
        self.amount - self.paid_amount
    }

    /// Returns true once fully paid.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.status == InstallmentStatus::Paid
    }

    /// Status as shown to users on `today`: pending installments past their
    /// due date read as Atrasado.
    #[must_use]
    pub fn effective_status(&self, today: NaiveDate) -> InstallmentStatus {
        match self.status {
            InstallmentStatus::Pending if self.due_date < today => InstallmentStatus::Overdue,
            status => status,
        }
    }
}
