//! Invoices: creation at sale settlement, emission, cancellation and the
//! read-only mirror handed to the fiscal portal.

pub mod emission;
pub mod error;
pub mod mirror;
pub mod types;

pub use emission::InvoiceService;
pub use error::InvoiceError;
pub use mirror::{InvoiceMirror, MirrorClassification, MirrorTomador};
pub use types::{Invoice, InvoiceStatus};
