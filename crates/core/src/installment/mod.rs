//! Receivable and payable installments.
//!
//! The same [`Installment`] type backs both collections; the
//! [`InstallmentKind`] decides the direction and categories of the cash
//! records a settlement produces.

pub mod error;
pub mod schedule;
pub mod settlement;
pub mod types;

#[cfg(test)]
mod settlement_props;

pub use error::InstallmentError;
pub use schedule::{InstallmentSchedule, ScheduleRequest};
pub use settlement::{InstallmentSettlement, PaymentInput, SettlementBranch, SettlementOutcome};
pub use types::{Installment, InstallmentKind, InstallmentStatus};
