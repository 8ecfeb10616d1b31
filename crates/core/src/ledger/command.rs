//! Ledger commands and their outcomes.

use chrono::NaiveDate;
use gestor_shared::types::{
    AppointmentId, ClientId, FinancialRecordId, InstallmentId, InvoiceId, QuoteId, SaleId,
};
use serde::{Deserialize, Serialize};

use crate::cashflow::FinancialRecord;
use crate::catalog::{Appointment, AppointmentStatus, BankAccount, Client, CompanySettings, Service};
use crate::installment::{Installment, PaymentInput, SettlementBranch};
use crate::sales::{Quote, QuoteStatus, Sale};

/// Ambient inputs a command may need but does not carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerContext {
    /// Business date in the configured time zone.
    pub today: NaiveDate,
}

impl LedgerContext {
    /// Creates a context for `today`.
    #[must_use]
    pub const fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

/// A single state transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum LedgerCommand {
    /// Registers a client.
    AddClient(Client),
    /// Replaces a client's data. Sales keep their name snapshot.
    UpdateClient(Client),
    /// Registers a catalog service.
    AddService(Service),
    /// Replaces a catalog service. Sale items keep their snapshot.
    UpdateService(Service),
    /// Registers a bank or cash account.
    AddBankAccount(BankAccount),
    /// Replaces the company settings.
    UpdateSettings(CompanySettings),

    /// Commits and settles a sale.
    SettleSale(Sale),
    /// Moves a sale and its unissued invoices to another client.
    ReassignSaleClient {
        /// Sale to move.
        sale_id: SaleId,
        /// New client.
        client_id: ClientId,
    },
    /// Deletes a sale and everything derived from it.
    DeleteSale(SaleId),

    /// Stores a quote.
    AddQuote(Quote),
    /// Changes a quote's status manually.
    UpdateQuoteStatus {
        /// Quote to change.
        quote_id: QuoteId,
        /// Target status.
        status: QuoteStatus,
    },
    /// Deletes a quote that was never finalized.
    DeleteQuote(QuoteId),

    /// Applies a payment to a receivable.
    PayReceivable(PaymentInput),
    /// Registers one or more payables.
    AddPayables(Vec<Installment>),
    /// Applies a payment to a payable.
    PayPayable(PaymentInput),
    /// Deletes a payable with no payments.
    DeletePayable(InstallmentId),
    /// Replaces receivables of one client with a new schedule.
    ReparcelReceivables {
        /// Installments to remove.
        replaced: Vec<InstallmentId>,
        /// Installments to add.
        schedule: Vec<Installment>,
    },
    /// Replaces payables with a new schedule.
    ReparcelPayables {
        /// Installments to remove.
        replaced: Vec<InstallmentId>,
        /// Installments to add.
        schedule: Vec<Installment>,
    },

    /// Issues one invoice.
    EmitInvoice {
        /// Invoice to issue.
        invoice_id: InvoiceId,
        /// Fiscal number.
        number: String,
    },
    /// Issues several invoices of one client under a shared number.
    EmitInvoiceBatch {
        /// Invoices to issue.
        invoice_ids: Vec<InvoiceId>,
        /// Shared fiscal number.
        number: String,
    },
    /// Voids an invoice.
    CancelInvoice(InvoiceId),

    /// Records a standalone cash movement.
    RecordCashEntry(FinancialRecord),

    /// Books an appointment.
    AddAppointment(Appointment),
    /// Changes an appointment's status.
    UpdateAppointmentStatus {
        /// Appointment to change.
        appointment_id: AppointmentId,
        /// New status.
        status: AppointmentStatus,
    },
    /// Removes an appointment.
    DeleteAppointment(AppointmentId),
}

impl LedgerCommand {
    /// Short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddClient(_) => "add_client",
            Self::UpdateClient(_) => "update_client",
            Self::AddService(_) => "add_service",
            Self::UpdateService(_) => "update_service",
            Self::AddBankAccount(_) => "add_bank_account",
            Self::UpdateSettings(_) => "update_settings",
            Self::SettleSale(_) => "settle_sale",
            Self::ReassignSaleClient { .. } => "reassign_sale_client",
            Self::DeleteSale(_) => "delete_sale",
            Self::AddQuote(_) => "add_quote",
            Self::UpdateQuoteStatus { .. } => "update_quote_status",
            Self::DeleteQuote(_) => "delete_quote",
            Self::PayReceivable(_) => "pay_receivable",
            Self::AddPayables(_) => "add_payables",
            Self::PayPayable(_) => "pay_payable",
            Self::DeletePayable(_) => "delete_payable",
            Self::ReparcelReceivables { .. } => "reparcel_receivables",
            Self::ReparcelPayables { .. } => "reparcel_payables",
            Self::EmitInvoice { .. } => "emit_invoice",
            Self::EmitInvoiceBatch { .. } => "emit_invoice_batch",
            Self::CancelInvoice(_) => "cancel_invoice",
            Self::RecordCashEntry(_) => "record_cash_entry",
            Self::AddAppointment(_) => "add_appointment",
            Self::UpdateAppointmentStatus { .. } => "update_appointment_status",
            Self::DeleteAppointment(_) => "delete_appointment",
        }
    }
}

/// What a successful command did, beyond the new state itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CommandOutcome {
    /// Registry change with nothing further to report.
    Applied,
    /// A sale was settled.
    SaleSettled {
        /// The sale.
        sale_id: SaleId,
        /// Its pending invoice.
        invoice_id: InvoiceId,
        /// Installments created.
        installment_ids: Vec<InstallmentId>,
        /// Cash records created.
        record_ids: Vec<FinancialRecordId>,
    },
    /// A payment was applied.
    InstallmentSettled {
        /// The installment.
        installment_id: InstallmentId,
        /// Resolution applied.
        branch: SettlementBranch,
        /// Cash records created.
        record_ids: Vec<FinancialRecordId>,
    },
    /// Payables were registered.
    PayablesAdded {
        /// Ids added.
        added: Vec<InstallmentId>,
    },
    /// Installments were replaced.
    Reparceled {
        /// Ids removed.
        removed: Vec<InstallmentId>,
        /// Ids added.
        added: Vec<InstallmentId>,
    },
    /// Invoices were issued.
    InvoicesEmitted {
        /// Invoices issued.
        invoice_ids: Vec<InvoiceId>,
        /// Shared fiscal number.
        number: String,
        /// Records whose document number was filled in.
        backfilled_records: usize,
    },
    /// A sale and its dependents were removed.
    SaleDeleted {
        /// The sale.
        sale_id: SaleId,
        /// Invoices removed.
        invoices: usize,
        /// Installments removed.
        installments: usize,
        /// Records removed.
        records: usize,
    },
}
