//! Cash-flow records and the cash statement.
//!
//! Every cash movement the ledger produces (sale receipts, installment
//! settlements, discounts, interest, manual entries) is an append-only
//! [`FinancialRecord`]. Bank balances are never stored; they are derived
//! from these records by [`CashStatement`].

pub mod categories;
pub mod statement;
pub mod types;

pub use statement::{AccountBalance, CashStatement, CategoryTotal, DateRange};
pub use types::{FinancialRecord, RecordType};
