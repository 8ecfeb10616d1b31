//! Sale domain types.

use chrono::NaiveDate;
use gestor_shared::types::money::{non_negative, round_money};
use gestor_shared::types::{BankAccountId, ClientId, InvoiceId, QuoteId, SaleId, ServiceId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::retention::RetentionBreakdown;
use crate::catalog::Service;

/// How the client pays for a sale.
///
/// Immediate methods settle on the spot into a bank account; deferred
/// methods generate receivable installments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Cash.
    #[serde(rename = "Dinheiro")]
    Cash,
    /// Instant transfer.
    #[serde(rename = "PIX")]
    Pix,
    /// Debit card.
    #[serde(rename = "Cartão de Débito")]
    DebitCard,
    /// Credit card.
    #[serde(rename = "Cartão de Crédito")]
    CreditCard,
    /// Bank slip.
    #[serde(rename = "Boleto")]
    Boleto,
    /// Bank transfer.
    #[serde(rename = "Transferência")]
    BankTransfer,
}

impl PaymentMethod {
    /// Returns the display name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "Dinheiro",
            Self::Pix => "PIX",
            Self::DebitCard => "Cartão de Débito",
            Self::CreditCard => "Cartão de Crédito",
            Self::Boleto => "Boleto",
            Self::BankTransfer => "Transferência",
        }
    }

    /// Returns true if the money is received at sale time.
    #[must_use]
    pub fn is_immediate(&self) -> bool {
        matches!(self, Self::Cash | Self::Pix | Self::DebitCard)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Snapshot of a catalog service at the time of sale or quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleItem {
    /// Catalog service.
    pub service_id: ServiceId,
    /// Service name when sold.
    pub service_name: String,
    /// Unit price when sold.
    pub unit_price: Decimal,
    /// Quantity.
    pub quantity: u32,
}

impl SaleItem {
    /// Snapshots a catalog service at its base price.
    #[must_use]
    pub fn from_service(service: &Service, quantity: u32) -> Self {
        Self {
            service_id: service.id,
            service_name: service.name.clone(),
            unit_price: service.base_price,
            quantity,
        }
    }

    /// Unit price times quantity, unrounded.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Totals derived from items, discount and retention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleTotals {
    /// Sum of line totals.
    pub subtotal: Decimal,
    /// Absolute discount.
    pub discount: Decimal,
    /// Retention deducted from the receivable (zero when not deducted).
    pub retention_deducted: Decimal,
    /// `max(0, subtotal - discount - retention_deducted)`.
    pub final_amount: Decimal,
}

impl SaleTotals {
    /// Computes totals, rounding every figure to cents.
    #[must_use]
    pub fn compute(
        items: &[SaleItem],
        discount: Decimal,
        retention_amount: Option<Decimal>,
        deduct_retentions: bool,
    ) -> Self {
        let subtotal = round_money(items.iter().map(SaleItem::line_total).sum());
        let discount = round_money(discount);
        let retention_deducted = if deduct_retentions {
            round_money(retention_amount.unwrap_or(Decimal::ZERO))
        } else {
            Decimal::ZERO
        };

        Self {
            subtotal,
            discount,
            retention_deducted,
            final_amount: non_negative(subtotal - discount - retention_deducted),
        }
    }
}

/// Caller-side input for a sale before totals are fixed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleDraft {
    /// Client.
    pub client_id: ClientId,
    /// Client name snapshot.
    pub client_name: String,
    /// Items sold.
    pub items: Vec<SaleItem>,
    /// Absolute discount.
    pub discount: Decimal,
    /// Payment method.
    pub payment_method: PaymentMethod,
    /// Number of installments (deferred methods).
    pub installments_count: u32,
    /// Destination account (immediate methods).
    pub bank_account_id: Option<BankAccountId>,
    /// Total withheld taxes, when retentions apply.
    pub retention_amount: Option<Decimal>,
    /// Whether the retention is deducted from what the client pays.
    pub deduct_retentions: bool,
    /// Quote this sale was imported from.
    pub quote_id: Option<QuoteId>,
    /// Free-text notes.
    pub notes: Option<String>,
}

impl SaleDraft {
    /// Starts a draft paid in one go with the given method.
    #[must_use]
    pub fn new(
        client_id: ClientId,
        client_name: impl Into<String>,
        items: Vec<SaleItem>,
        payment_method: PaymentMethod,
    ) -> Self {
        Self {
            client_id,
            client_name: client_name.into(),
            items,
            discount: Decimal::ZERO,
            payment_method,
            installments_count: 1,
            bank_account_id: None,
            retention_amount: None,
            deduct_retentions: false,
            quote_id: None,
            notes: None,
        }
    }

    /// Fills `retention_amount` from the catalog's withholding rates.
    #[must_use]
    pub fn with_catalog_retentions(mut self, services: &[Service], deduct: bool) -> Self {
        let breakdown = RetentionBreakdown::for_items(&self.items, self.discount, services);
        self.retention_amount = Some(breakdown.rounded().withheld.total());
        self.deduct_retentions = deduct;
        self
    }

    /// Fixes the totals and produces a sale dated `date`.
    #[must_use]
    pub fn into_sale(self, date: NaiveDate) -> Sale {
        let totals = SaleTotals::compute(
            &self.items,
            self.discount,
            self.retention_amount,
            self.deduct_retentions,
        );

        Sale {
            id: SaleId::new(),
            date,
            client_id: self.client_id,
            client_name: self.client_name,
            items: self.items,
            subtotal: totals.subtotal,
            discount: totals.discount,
            final_amount: totals.final_amount,
            payment_method: self.payment_method,
            installments_count: self.installments_count,
            bank_account_id: self.bank_account_id,
            retention_amount: self.retention_amount.map(round_money),
            deducted_retentions: self.deduct_retentions,
            quote_id: self.quote_id,
            invoice_id: None,
            notes: self.notes,
        }
    }
}

/// A committed sale.
///
/// Immutable after settlement except for the client reference, which can
/// only change through an explicit reassignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    /// Unique identifier.
    pub id: SaleId,
    /// Sale date.
    pub date: NaiveDate,
    /// Client.
    pub client_id: ClientId,
    /// Client name snapshot.
    pub client_name: String,
    /// Items sold.
    pub items: Vec<SaleItem>,
    /// Sum of line totals.
    pub subtotal: Decimal,
    /// Absolute discount.
    pub discount: Decimal,
    /// Amount the client owes.
    pub final_amount: Decimal,
    /// Payment method.
    pub payment_method: PaymentMethod,
    /// Number of installments.
    pub installments_count: u32,
    /// Destination account for immediate methods.
    pub bank_account_id: Option<BankAccountId>,
    /// Total withheld taxes.
    pub retention_amount: Option<Decimal>,
    /// Whether `retention_amount` was deducted from `final_amount`.
    pub deducted_retentions: bool,
    /// Source quote.
    pub quote_id: Option<QuoteId>,
    /// Invoice created at settlement.
    pub invoice_id: Option<InvoiceId>,
    /// Free-text notes.
    pub notes: Option<String>,
}

impl Sale {
    /// Recomputes totals from the stored items.
    #[must_use]
    pub fn totals(&self) -> SaleTotals {
        SaleTotals::compute(
            &self.items,
            self.discount,
            self.retention_amount,
            self.deducted_retentions,
        )
    }

    /// Service value after discount, before retentions.
    #[must_use]
    pub fn net_of_discount(&self) -> Decimal {
        non_negative(self.subtotal - self.discount)
    }
}
