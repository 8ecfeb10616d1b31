//! Core business logic for Gestor.
//!
//! This crate contains pure business logic with ZERO async or I/O dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `catalog` - Clients, services, bank accounts, appointments, settings
//! - `sales` - Sales, quotes, retentions and sale settlement
//! - `installment` - Receivables/payables, payment settlement, reparceling
//! - `invoice` - Invoice emission and the fiscal mirror
//! - `cashflow` - Financial records and the cash statement
//! - `ledger` - The state container and its reducer

pub mod cashflow;
pub mod catalog;
pub mod installment;
pub mod invoice;
pub mod ledger;
pub mod sales;

pub use ledger::{CommandOutcome, ErrorKind, LedgerCommand, LedgerContext, LedgerError, LedgerState};
