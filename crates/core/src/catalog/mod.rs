//! Registries the ledger reads from: clients, services, bank accounts,
//! appointments and company settings.

pub mod error;
pub mod types;
pub mod validation;

pub use error::CatalogError;
pub use types::{
    Address, Appointment, AppointmentStatus, BankAccount, Client, CompanySettings, Service,
    TaxRegime, WithholdingRates,
};
pub use validation::CatalogValidator;
