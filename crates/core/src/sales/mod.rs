//! Sales, quotes, retentions and sale settlement.

pub mod error;
pub mod quote;
pub mod retention;
pub mod settlement;
pub mod types;

#[cfg(test)]
mod settlement_props;

pub use error::{QuoteError, SaleError};
pub use quote::{Quote, QuoteStatus};
pub use retention::{RetentionBreakdown, TaxAmounts};
pub use settlement::{SaleSettlement, SettlementPlan};
pub use types::{PaymentMethod, Sale, SaleDraft, SaleItem, SaleTotals};
