//! Ledger state.

use gestor_shared::types::{
    AppointmentId, BankAccountId, ClientId, InstallmentId, InvoiceId, QuoteId, SaleId, ServiceId,
};
use serde::{Deserialize, Serialize};

use crate::cashflow::{CashStatement, DateRange, FinancialRecord};
use crate::catalog::{Appointment, BankAccount, Client, CompanySettings, Service};
use crate::installment::{Installment, InstallmentKind};
use crate::invoice::{Invoice, InvoiceError, InvoiceMirror};
use crate::sales::{Quote, Sale};

/// All entity collections. Only [`LedgerState::apply`] mutates them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerState {
    pub(crate) clients: Vec<Client>,
    pub(crate) services: Vec<Service>,
    pub(crate) bank_accounts: Vec<BankAccount>,
    pub(crate) sales: Vec<Sale>,
    pub(crate) quotes: Vec<Quote>,
    pub(crate) invoices: Vec<Invoice>,
    pub(crate) accounts_receivable: Vec<Installment>,
    pub(crate) accounts_payable: Vec<Installment>,
    pub(crate) financial_records: Vec<FinancialRecord>,
    pub(crate) appointments: Vec<Appointment>,
    pub(crate) settings: CompanySettings,
}

impl LedgerState {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clients.
    #[must_use]
    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    /// Catalog services.
    #[must_use]
    pub fn services(&self) -> &[Service] {
        &self.services
    }

    /// Bank and cash accounts.
    #[must_use]
    pub fn bank_accounts(&self) -> &[BankAccount] {
        &self.bank_accounts
    }

    /// Settled sales.
    #[must_use]
    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    /// Quotes.
    #[must_use]
    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    /// Invoices.
    #[must_use]
    pub fn invoices(&self) -> &[Invoice] {
        &self.invoices
    }

    /// Receivable installments.
    #[must_use]
    pub fn accounts_receivable(&self) -> &[Installment] {
        &self.accounts_receivable
    }

    /// Payable installments.
    #[must_use]
    pub fn accounts_payable(&self) -> &[Installment] {
        &self.accounts_payable
    }

    /// Installments of one kind.
    #[must_use]
    pub fn installments(&self, kind: InstallmentKind) -> &[Installment] {
        match kind {
            InstallmentKind::Receivable => &self.accounts_receivable,
            InstallmentKind::Payable => &self.accounts_payable,
        }
    }

    /// Cash-flow records, in insertion order.
    #[must_use]
    pub fn financial_records(&self) -> &[FinancialRecord] {
        &self.financial_records
    }

    /// Appointments.
    #[must_use]
    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    /// Company settings.
    #[must_use]
    pub fn settings(&self) -> &CompanySettings {
        &self.settings
    }

    /// Looks up a client by id.
    #[must_use]
    pub fn find_client(&self, id: ClientId) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == id)
    }

    /// Looks up a service by id.
    #[must_use]
    pub fn find_service(&self, id: ServiceId) -> Option<&Service> {
        self.services.iter().find(|s| s.id == id)
    }

    /// Looks up a bank account by id.
    #[must_use]
    pub fn find_bank_account(&self, id: BankAccountId) -> Option<&BankAccount> {
        self.bank_accounts.iter().find(|b| b.id == id)
    }

    /// Looks up a sale by id.
    #[must_use]
    pub fn find_sale(&self, id: SaleId) -> Option<&Sale> {
        self.sales.iter().find(|s| s.id == id)
    }

    /// Looks up a quote by id.
    #[must_use]
    pub fn find_quote(&self, id: QuoteId) -> Option<&Quote> {
        self.quotes.iter().find(|q| q.id == id)
    }

    /// Looks up a invoice by id.
    #[must_use]
    pub fn find_invoice(&self, id: InvoiceId) -> Option<&Invoice> {
        self.invoices.iter().find(|i| i.id == id)
    }

    /// Looks up a appointment by id.
    #[must_use]
    pub fn find_appointment(&self, id: AppointmentId) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id == id)
    }

    /// Looks up an installment in the collection of `kind`.
    #[must_use]
    pub fn find_installment(&self, kind: InstallmentKind, id: InstallmentId) -> Option<&Installment> {
        self.installments(kind).iter().find(|i| i.id == id)
    }

    /// Fiscal number of the issued invoice of a sale, if any.
    #[must_use]
    pub fn issued_invoice_number(&self, sale_id: SaleId) -> Option<&str> {
        self.invoices
            .iter()
            .filter(|i| i.sale_id == sale_id && i.is_issued())
            .find_map(|i| i.number.as_deref())
    }

    /// Client of a receivable, through its sale.
    #[must_use]
    pub fn receivable_client(&self, installment: &Installment) -> Option<ClientId> {
        installment
            .sale_id
            .and_then(|sale_id| self.find_sale(sale_id))
            .map(|sale| sale.client_id)
    }

    /// Cash statement over `range`.
    #[must_use]
    pub fn cash_statement(&self, range: DateRange) -> CashStatement {
        CashStatement::build(&self.bank_accounts, &self.financial_records, range)
    }

    /// Invoice mirror for the sales behind `invoice_ids`.
    ///
    /// Unknown invoice ids are skipped; the mirror fails if none remain or
    /// the sales belong to different clients.
    pub fn invoice_mirror(&self, invoice_ids: &[InvoiceId]) -> Result<InvoiceMirror, InvoiceError> {
        let sales: Vec<&Sale> = invoice_ids
            .iter()
            .filter_map(|id| self.find_invoice(*id))
            .filter_map(|invoice| self.find_sale(invoice.sale_id))
            .collect();
        let client = sales
            .first()
            .and_then(|sale| self.find_client(sale.client_id))
            .ok_or(InvoiceError::NoSales)?;
        InvoiceMirror::build(client, &sales, &self.services)
    }
}
