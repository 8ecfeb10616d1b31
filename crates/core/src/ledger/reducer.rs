//! The ledger reducer.
//!
//! Every handler validates against the current state first and only then
//! mutates. `apply` works on a clone; a failed handler leaves `self` untouched.

use std::collections::HashSet;

use gestor_shared::types::money::is_whole_cents;
use gestor_shared::types::{
    AppointmentId, ClientId, InstallmentId, InvoiceId, QuoteId, SaleId,
};
use rust_decimal::Decimal;

use super::command::{CommandOutcome, LedgerCommand, LedgerContext};
use super::error::LedgerError;
use super::state::LedgerState;
use crate::cashflow::FinancialRecord;
use crate::catalog::{Appointment, AppointmentStatus, CatalogValidator};
use crate::installment::{
    Installment, InstallmentError, InstallmentKind, InstallmentSchedule, InstallmentSettlement,
    PaymentInput,
};
use crate::invoice::{InvoiceError, InvoiceService, InvoiceStatus};
use crate::sales::{Quote, QuoteError, QuoteStatus, Sale, SaleSettlement};

impl LedgerState {
    /// Applies `command` and returns the next state.
    ///
    /// On error `self` is unchanged and no partial state is observable.
    pub fn apply(
        &self,
        ctx: &LedgerContext,
        command: LedgerCommand,
    ) -> Result<(LedgerState, CommandOutcome), LedgerError> {
        let mut next = self.clone();
        let outcome = next.execute(ctx, command)?;
        Ok((next, outcome))
    }

    fn execute(
        &mut self,
        ctx: &LedgerContext,
        command: LedgerCommand,
    ) -> Result<CommandOutcome, LedgerError> {
        match command {
            LedgerCommand::AddClient(client) => {
                CatalogValidator::validate_client(&client)?;
                if self.find_client(client.id).is_some() {
                    return Err(LedgerError::duplicate("client", client.id));
                }
                self.clients.push(client);
                Ok(CommandOutcome::Applied)
            }
            LedgerCommand::UpdateClient(client) => {
                CatalogValidator::validate_client(&client)?;
                let slot = self
                    .clients
                    .iter_mut()
                    .find(|c| c.id == client.id)
                    .ok_or(LedgerError::ClientNotFound(client.id))?;
                *slot = client;
                Ok(CommandOutcome::Applied)
            }
            LedgerCommand::AddService(service) => {
                CatalogValidator::validate_service(&service)?;
                if self.find_service(service.id).is_some() {
                    return Err(LedgerError::duplicate("service", service.id));
                }
                self.services.push(service);
                Ok(CommandOutcome::Applied)
            }
            LedgerCommand::UpdateService(service) => {
                CatalogValidator::validate_service(&service)?;
                let slot = self
                    .services
                    .iter_mut()
                    .find(|s| s.id == service.id)
                    .ok_or(LedgerError::ServiceNotFound(service.id))?;
                *slot = service;
                Ok(CommandOutcome::Applied)
            }
            LedgerCommand::AddBankAccount(account) => {
                CatalogValidator::validate_bank_account(&account)?;
                if self.find_bank_account(account.id).is_some() {
                    return Err(LedgerError::duplicate("bank account", account.id));
                }
                self.bank_accounts.push(account);
                Ok(CommandOutcome::Applied)
            }
            LedgerCommand::UpdateSettings(settings) => {
                CatalogValidator::validate_settings(&settings)?;
                self.settings = settings;
                Ok(CommandOutcome::Applied)
            }

            LedgerCommand::SettleSale(sale) => self.settle_sale(ctx, sale),
            LedgerCommand::ReassignSaleClient { sale_id, client_id } => {
                self.reassign_sale_client(sale_id, client_id)
            }
            LedgerCommand::DeleteSale(sale_id) => self.delete_sale(sale_id),

            LedgerCommand::AddQuote(quote) => self.add_quote(quote),
            LedgerCommand::UpdateQuoteStatus { quote_id, status } => {
                let quote = self
                    .quotes
                    .iter_mut()
                    .find(|q| q.id == quote_id)
                    .ok_or(LedgerError::QuoteNotFound(quote_id))?;
                quote.transition(status)?;
                Ok(CommandOutcome::Applied)
            }
            LedgerCommand::DeleteQuote(quote_id) => self.delete_quote(quote_id),

            LedgerCommand::PayReceivable(payment) => {
                self.pay_installment(InstallmentKind::Receivable, &payment)
            }
            LedgerCommand::PayPayable(payment) => {
                self.pay_installment(InstallmentKind::Payable, &payment)
            }
            LedgerCommand::AddPayables(payables) => {
                let added: Vec<InstallmentId> = payables.iter().map(|p| p.id).collect();
                self.accounts_payable =
                    InstallmentSchedule::plan_addition(&self.accounts_payable, payables)?;
                Ok(CommandOutcome::PayablesAdded { added })
            }
            LedgerCommand::DeletePayable(id) => {
                let payable = self
                    .find_installment(InstallmentKind::Payable, id)
                    .ok_or(InstallmentError::NotFound(id))?;
                if payable.paid_amount > Decimal::ZERO {
                    return Err(InstallmentError::HasPayments(id).into());
                }
                self.accounts_payable.retain(|p| p.id != id);
                Ok(CommandOutcome::Applied)
            }
            LedgerCommand::ReparcelReceivables { replaced, schedule } => {
                self.ensure_single_client(&replaced, &schedule)?;
                self.reparcel(InstallmentKind::Receivable, replaced, schedule)
            }
            LedgerCommand::ReparcelPayables { replaced, schedule } => {
                self.reparcel(InstallmentKind::Payable, replaced, schedule)
            }

            LedgerCommand::EmitInvoice { invoice_id, number } => {
                self.emit_invoices(ctx, vec![invoice_id], &number)
            }
            LedgerCommand::EmitInvoiceBatch {
                invoice_ids,
                number,
            } => self.emit_invoices(ctx, invoice_ids, &number),
            LedgerCommand::CancelInvoice(invoice_id) => {
                let invoice = self
                    .invoices
                    .iter_mut()
                    .find(|i| i.id == invoice_id)
                    .ok_or(LedgerError::InvoiceNotFound(invoice_id))?;
                *invoice = InvoiceService::cancel(invoice)?;
                Ok(CommandOutcome::Applied)
            }

            LedgerCommand::RecordCashEntry(record) => self.record_cash_entry(record),

            LedgerCommand::AddAppointment(appointment) => self.add_appointment(appointment),
            LedgerCommand::UpdateAppointmentStatus {
                appointment_id,
                status,
            } => self.update_appointment_status(appointment_id, status),
            LedgerCommand::DeleteAppointment(appointment_id) => {
                if self.find_appointment(appointment_id).is_none() {
                    return Err(LedgerError::AppointmentNotFound(appointment_id));
                }
                self.appointments.retain(|a| a.id != appointment_id);
                Ok(CommandOutcome::Applied)
            }
        }
    }

    // =========================================================================
    // Sales
    // =========================================================================

    fn settle_sale(
        &mut self,
        ctx: &LedgerContext,
        sale: Sale,
    ) -> Result<CommandOutcome, LedgerError> {
        if self.find_sale(sale.id).is_some() {
            return Err(LedgerError::duplicate("sale", sale.id));
        }
        if self.find_client(sale.client_id).is_none() {
            return Err(LedgerError::ClientNotFound(sale.client_id));
        }
        if let Some(bank_account_id) = sale.bank_account_id
            && self.find_bank_account(bank_account_id).is_none()
        {
            return Err(LedgerError::BankAccountNotFound(bank_account_id));
        }
        if let Some(quote_id) = sale.quote_id {
            let quote = self
                .find_quote(quote_id)
                .ok_or(LedgerError::QuoteNotFound(quote_id))?;
            if quote.status == QuoteStatus::Finalized {
                return Err(LedgerError::QuoteAlreadyUsed(quote_id));
            }
            if quote.client_id != sale.client_id {
                return Err(LedgerError::QuoteClientMismatch(quote_id));
            }
        }

        let plan = SaleSettlement::plan(&sale, ctx.today)?;
        let outcome = CommandOutcome::SaleSettled {
            sale_id: plan.sale.id,
            invoice_id: plan.invoice.id,
            installment_ids: plan.installments.iter().map(|i| i.id).collect(),
            record_ids: plan.records.iter().map(|r| r.id).collect(),
        };

        if let Some(quote_id) = plan.sale.quote_id
            && let Some(quote) = self.quotes.iter_mut().find(|q| q.id == quote_id)
        {
            quote.status = QuoteStatus::Finalized;
        }
        self.sales.push(plan.sale);
        self.invoices.push(plan.invoice);
        self.accounts_receivable.extend(plan.installments);
        self.financial_records.extend(plan.records);
        Ok(outcome)
    }

    fn reassign_sale_client(
        &mut self,
        sale_id: SaleId,
        client_id: ClientId,
    ) -> Result<CommandOutcome, LedgerError> {
        let client_name = self
            .find_client(client_id)
            .ok_or(LedgerError::ClientNotFound(client_id))?
            .name
            .clone();
        let sale = self
            .sales
            .iter_mut()
            .find(|s| s.id == sale_id)
            .ok_or(LedgerError::SaleNotFound(sale_id))?;

        sale.client_id = client_id;
        sale.client_name.clone_from(&client_name);
        for invoice in self
            .invoices
            .iter_mut()
            .filter(|i| i.sale_id == sale_id && i.status != InvoiceStatus::Issued)
        {
            invoice.client_name.clone_from(&client_name);
        }
        Ok(CommandOutcome::Applied)
    }

    fn delete_sale(&mut self, sale_id: SaleId) -> Result<CommandOutcome, LedgerError> {
        if self.find_sale(sale_id).is_none() {
            return Err(LedgerError::SaleNotFound(sale_id));
        }

        let removed_installments: HashSet<InstallmentId> = self
            .accounts_receivable
            .iter()
            .chain(&self.accounts_payable)
            .filter(|i| i.sale_id == Some(sale_id))
            .map(|i| i.id)
            .collect();

        let invoices_before = self.invoices.len();
        let records_before = self.financial_records.len();

        self.sales.retain(|s| s.id != sale_id);
        self.invoices.retain(|i| i.sale_id != sale_id);
        self.accounts_receivable
            .retain(|i| !removed_installments.contains(&i.id));
        self.accounts_payable
            .retain(|i| !removed_installments.contains(&i.id));
        self.financial_records.retain(|r| {
            r.related_sale_id != Some(sale_id)
                && !r
                    .related_installment_id
                    .is_some_and(|id| removed_installments.contains(&id))
        });

        Ok(CommandOutcome::SaleDeleted {
            sale_id,
            invoices: invoices_before - self.invoices.len(),
            installments: removed_installments.len(),
            records: records_before - self.financial_records.len(),
        })
    }

    // =========================================================================
    // Quotes
    // =========================================================================

    fn add_quote(&mut self, quote: Quote) -> Result<CommandOutcome, LedgerError> {
        quote.validate()?;
        if self.find_quote(quote.id).is_some() {
            return Err(LedgerError::duplicate("quote", quote.id));
        }
        if self.find_client(quote.client_id).is_none() {
            return Err(LedgerError::ClientNotFound(quote.client_id));
        }
        self.quotes.push(quote);
        Ok(CommandOutcome::Applied)
    }

    fn delete_quote(&mut self, quote_id: QuoteId) -> Result<CommandOutcome, LedgerError> {
        let quote = self
            .find_quote(quote_id)
            .ok_or(LedgerError::QuoteNotFound(quote_id))?;
        if quote.status == QuoteStatus::Finalized {
            return Err(QuoteError::AlreadyFinalized.into());
        }
        self.quotes.retain(|q| q.id != quote_id);
        Ok(CommandOutcome::Applied)
    }

    // =========================================================================
    // Installments
    // =========================================================================

    fn pay_installment(
        &mut self,
        kind: InstallmentKind,
        payment: &PaymentInput,
    ) -> Result<CommandOutcome, LedgerError> {
        let installment = self
            .find_installment(kind, payment.installment_id)
            .ok_or(InstallmentError::NotFound(payment.installment_id))?;
        if self.find_bank_account(payment.bank_account_id).is_none() {
            return Err(LedgerError::BankAccountNotFound(payment.bank_account_id));
        }

        let document_number = match kind {
            InstallmentKind::Receivable => installment
                .sale_id
                .and_then(|sale_id| self.issued_invoice_number(sale_id))
                .map(str::to_string),
            InstallmentKind::Payable => installment.document_number.clone(),
        };

        let outcome = InstallmentSettlement::settle(kind, installment, payment, document_number)?;
        let result = CommandOutcome::InstallmentSettled {
            installment_id: outcome.installment.id,
            branch: outcome.branch,
            record_ids: outcome.records.iter().map(|r| r.id).collect(),
        };

        let collection = match kind {
            InstallmentKind::Receivable => &mut self.accounts_receivable,
            InstallmentKind::Payable => &mut self.accounts_payable,
        };
        if let Some(slot) = collection.iter_mut().find(|i| i.id == outcome.installment.id) {
            *slot = outcome.installment;
        }
        self.financial_records.extend(outcome.records);
        Ok(result)
    }

    /// Rejects receivable reparcelings spanning several clients.
    ///
    /// Both the replaced installments and any sale the new schedule links
    /// to must resolve to one client.
    fn ensure_single_client(
        &self,
        replaced: &[InstallmentId],
        schedule: &[Installment],
    ) -> Result<(), LedgerError> {
        let mut clients: HashSet<Option<ClientId>> = HashSet::new();
        for id in replaced {
            let installment = self
                .find_installment(InstallmentKind::Receivable, *id)
                .ok_or(InstallmentError::NotFound(*id))?;
            clients.insert(self.receivable_client(installment));
        }
        for sale_id in schedule.iter().filter_map(|i| i.sale_id) {
            let sale = self
                .find_sale(sale_id)
                .ok_or(LedgerError::SaleNotFound(sale_id))?;
            clients.insert(Some(sale.client_id));
        }
        if clients.len() > 1 {
            return Err(LedgerError::MixedClients);
        }
        Ok(())
    }

    fn reparcel(
        &mut self,
        kind: InstallmentKind,
        replaced: Vec<InstallmentId>,
        schedule: Vec<Installment>,
    ) -> Result<CommandOutcome, LedgerError> {
        let added: Vec<InstallmentId> = schedule.iter().map(|i| i.id).collect();
        let next =
            InstallmentSchedule::plan_replacement(self.installments(kind), &replaced, schedule)?;
        match kind {
            InstallmentKind::Receivable => self.accounts_receivable = next,
            InstallmentKind::Payable => self.accounts_payable = next,
        }
        Ok(CommandOutcome::Reparceled {
            removed: replaced,
            added,
        })
    }

    // =========================================================================
    // Invoices
    // =========================================================================

    fn emit_invoices(
        &mut self,
        ctx: &LedgerContext,
        invoice_ids: Vec<InvoiceId>,
        number: &str,
    ) -> Result<CommandOutcome, LedgerError> {
        if invoice_ids.is_empty() {
            return Err(InvoiceError::NothingSelected.into());
        }

        let mut seen = HashSet::new();
        let mut sale_ids = HashSet::new();
        let mut clients = HashSet::new();
        for id in &invoice_ids {
            if !seen.insert(*id) {
                return Err(InvoiceError::DuplicateSelection(*id).into());
            }
            let invoice = self
                .find_invoice(*id)
                .ok_or(LedgerError::InvoiceNotFound(*id))?;
            InvoiceService::ensure_emittable(invoice)?;
            let sale = self
                .find_sale(invoice.sale_id)
                .ok_or(LedgerError::SaleNotFound(invoice.sale_id))?;
            sale_ids.insert(sale.id);
            clients.insert(sale.client_id);
        }
        if clients.len() > 1 {
            return Err(InvoiceError::MixedClients.into());
        }
        let number = InvoiceService::normalize_number(number)?;

        for invoice in self.invoices.iter_mut().filter(|i| seen.contains(&i.id)) {
            *invoice = InvoiceService::emit(invoice, &number, ctx.today)?;
        }

        let installment_ids: HashSet<InstallmentId> = self
            .accounts_receivable
            .iter()
            .chain(&self.accounts_payable)
            .filter(|i| i.sale_id.is_some_and(|id| sale_ids.contains(&id)))
            .map(|i| i.id)
            .collect();
        let mut backfilled_records = 0;
        for record in self.financial_records.iter_mut().filter(|r| {
            r.related_sale_id.is_some_and(|id| sale_ids.contains(&id))
                || r
                    .related_installment_id
                    .is_some_and(|id| installment_ids.contains(&id))
        }) {
            record.document_number = Some(number.clone());
            backfilled_records += 1;
        }

        Ok(CommandOutcome::InvoicesEmitted {
            invoice_ids,
            number,
            backfilled_records,
        })
    }

    // =========================================================================
    // Cash entries and appointments
    // =========================================================================

    fn record_cash_entry(&mut self, record: FinancialRecord) -> Result<CommandOutcome, LedgerError> {
        if record.amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidCashEntry("amount must be positive"));
        }
        if !is_whole_cents(record.amount) {
            return Err(LedgerError::InvalidCashEntry("amount must be in whole cents"));
        }
        if record.description.trim().is_empty() {
            return Err(LedgerError::InvalidCashEntry("description is required"));
        }
        if record.category.trim().is_empty() {
            return Err(LedgerError::InvalidCashEntry("category is required"));
        }
        if record.related_installment_id.is_some() {
            return Err(LedgerError::InvalidCashEntry(
                "installment payments go through settlement",
            ));
        }
        if let Some(bank_account_id) = record.bank_account_id
            && self.find_bank_account(bank_account_id).is_none()
        {
            return Err(LedgerError::BankAccountNotFound(bank_account_id));
        }
        if let Some(sale_id) = record.related_sale_id
            && self.find_sale(sale_id).is_none()
        {
            return Err(LedgerError::SaleNotFound(sale_id));
        }
        if self.financial_records.iter().any(|r| r.id == record.id) {
            return Err(LedgerError::duplicate("financial record", record.id));
        }
        self.financial_records.push(record);
        Ok(CommandOutcome::Applied)
    }

    fn add_appointment(&mut self, appointment: Appointment) -> Result<CommandOutcome, LedgerError> {
        if self.find_appointment(appointment.id).is_some() {
            return Err(LedgerError::duplicate("appointment", appointment.id));
        }
        if self.find_client(appointment.client_id).is_none() {
            return Err(LedgerError::ClientNotFound(appointment.client_id));
        }
        if self.find_service(appointment.service_id).is_none() {
            return Err(LedgerError::ServiceNotFound(appointment.service_id));
        }
        self.appointments.push(appointment);
        Ok(CommandOutcome::Applied)
    }

    fn update_appointment_status(
        &mut self,
        appointment_id: AppointmentId,
        status: AppointmentStatus,
    ) -> Result<CommandOutcome, LedgerError> {
        let appointment = self
            .appointments
            .iter_mut()
            .find(|a| a.id == appointment_id)
            .ok_or(LedgerError::AppointmentNotFound(appointment_id))?;
        appointment.status = status;
        Ok(CommandOutcome::Applied)
    }
}
