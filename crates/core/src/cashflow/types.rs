//! Financial record domain types.

use chrono::NaiveDate;
use gestor_shared::types::{BankAccountId, FinancialRecordId, InstallmentId, SaleId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a cash movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordType {
    /// Money in.
    #[serde(rename = "RECEITA")]
    Income,
    /// Money out.
    #[serde(rename = "DESPESA")]
    Expense,
}

impl RecordType {
    /// Returns the string representation used on statements.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "RECEITA",
            Self::Expense => "DESPESA",
        }
    }

    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Income => Self::Expense,
            Self::Expense => Self::Income,
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An append-only cash-flow line.
///
/// `amount` is never negative; the direction comes from `record_type`.
/// After creation only `document_number` may change, when the invoice of
/// the related sale is emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialRecord {
    /// Unique identifier.
    pub id: FinancialRecordId,
    /// Date the money moved.
    pub date: NaiveDate,
    /// Human-readable description.
    pub description: String,
    /// Amount moved (non-negative).
    pub amount: Decimal,
    /// Income or expense.
    pub record_type: RecordType,
    /// Statement category.
    pub category: String,
    /// Bank or cash account the money moved through.
    pub bank_account_id: Option<BankAccountId>,
    /// Sale this record derives from.
    pub related_sale_id: Option<SaleId>,
    /// Installment this record settles.
    pub related_installment_id: Option<InstallmentId>,
    /// Fiscal document number, back-filled on invoice emission.
    pub document_number: Option<String>,
}

impl FinancialRecord {
    /// Creates a record with no sale, installment or document links.
    #[must_use]
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        amount: Decimal,
        record_type: RecordType,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: FinancialRecordId::new(),
            date,
            description: description.into(),
            amount,
            record_type,
            category: category.into(),
            bank_account_id: None,
            related_sale_id: None,
            related_installment_id: None,
            document_number: None,
        }
    }

    /// Sets the bank account.
    #[must_use]
    pub fn with_bank_account(mut self, bank_account_id: BankAccountId) -> Self {
        self.bank_account_id = Some(bank_account_id);
        self
    }

    /// Links the record to a sale.
    #[must_use]
    pub fn with_sale(mut self, sale_id: Option<SaleId>) -> Self {
        self.related_sale_id = sale_id;
        self
    }

    /// Links the record to an installment.
    #[must_use]
    pub fn with_installment(mut self, installment_id: InstallmentId) -> Self {
        self.related_installment_id = Some(installment_id);
        self
    }

    /// Sets the fiscal document number.
    #[must_use]
    pub fn with_document_number(mut self, document_number: Option<String>) -> Self {
        self.document_number = document_number;
        self
    }

    /// Returns the amount signed by direction (income positive).
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        match self.record_type {
            RecordType::Income => self.amount,
            RecordType::Expense => -self.amount,
        }
    }
}
