//! Invoice domain types.

use chrono::NaiveDate;
use gestor_shared::types::{InvoiceId, SaleId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::sales::Sale;

/// Invoice lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvoiceStatus {
    /// Created with the sale, not yet issued.
    #[serde(rename = "Pendente")]
    Pending,
    /// Issued with a fiscal number.
    #[serde(rename = "Emitida")]
    Issued,
    /// Voided.
    #[serde(rename = "Cancelada")]
    Cancelled,
}

impl InvoiceStatus {
    /// Returns the display name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pendente",
            Self::Issued => "Emitida",
            Self::Cancelled => "Cancelada",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fiscal invoice for one sale. Sales emitted together share a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique identifier.
    pub id: InvoiceId,
    /// Sale invoiced.
    pub sale_id: SaleId,
    /// Client name snapshot.
    pub client_name: String,
    /// Invoiced amount (the sale's final amount).
    pub amount: Decimal,
    /// Lifecycle status.
    pub status: InvoiceStatus,
    /// Fiscal number, set on emission.
    pub number: Option<String>,
    /// Emission date.
    pub emission_date: Option<NaiveDate>,
}

impl Invoice {
    /// Creates the pending invoice for a sale.
    #[must_use]
    pub fn pending_for(sale: &Sale) -> Self {
        Self {
            id: InvoiceId::new(),
            sale_id: sale.id,
            client_name: sale.client_name.clone(),
            amount: sale.final_amount,
            status: InvoiceStatus::Pending,
            number: None,
            emission_date: None,
        }
    }

    /// Returns true once issued.
    #[must_use]
    pub fn is_issued(&self) -> bool {
        self.status == InvoiceStatus::Issued
    }
}
