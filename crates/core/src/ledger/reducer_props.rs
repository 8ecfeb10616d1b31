//! Property-based tests for the ledger reducer.
//!
//! - Cascade: after deleting a sale nothing references it
//! - Reparceling: old ids gone, new ids present, pending and unpaid
//! - Bank balances equal initial balance plus cash actually moved

use chrono::NaiveDate;
use gestor_shared::types::InstallmentId;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::command::{LedgerCommand, LedgerContext};
use super::state::LedgerState;
use crate::cashflow::DateRange;
use crate::catalog::{BankAccount, Client, Service};
use crate::installment::{
    InstallmentSchedule, InstallmentStatus, PaymentInput, ScheduleRequest,
};
use crate::sales::{PaymentMethod, Sale, SaleDraft, SaleItem};

/// Strategy to generate positive amounts (0.01 to 5,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..500_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn method_strategy() -> impl Strategy<Value = PaymentMethod> {
    prop_oneof![
        Just(PaymentMethod::Pix),
        Just(PaymentMethod::Cash),
        Just(PaymentMethod::Boleto),
        Just(PaymentMethod::CreditCard),
    ]
}

fn ctx() -> LedgerContext {
    LedgerContext::new(NaiveDate::from_ymd_opt(2026, 5, 2).unwrap())
}

struct World {
    state: LedgerState,
    client: Client,
    service: Service,
    bank: BankAccount,
}

fn world() -> World {
    let client = Client::new("Cliente", "000");
    let service = Service::new("Serviço", Decimal::ONE_HUNDRED);
    let bank = BankAccount::new("Caixa", Decimal::ZERO);
    let mut state = LedgerState::new();
    for command in [
        LedgerCommand::AddClient(client.clone()),
        LedgerCommand::AddService(service.clone()),
        LedgerCommand::AddBankAccount(bank.clone()),
    ] {
        state = state.apply(&ctx(), command).unwrap().0;
    }
    World {
        state,
        client,
        service,
        bank,
    }
}

fn sale(world: &World, method: PaymentMethod, quantity: u32, count: u32) -> Sale {
    let mut draft = SaleDraft::new(
        world.client.id,
        world.client.name.clone(),
        vec![SaleItem::from_service(&world.service, quantity)],
        method,
    );
    draft.installments_count = count;
    draft.bank_account_id = Some(world.bank.id);
    draft.into_sale(ctx().today)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// *For any* mix of settled and partly paid sales, deleting one leaves
    /// no invoice, installment or record that points at it or at one of
    /// its installments.
    #[test]
    fn prop_delete_sale_leaves_no_references(
        methods in prop::collection::vec(method_strategy(), 1..5),
        count in 1u32..5u32,
        payment in positive_amount(),
        victim_index in any::<prop::sample::Index>(),
    ) {
        let mut w = world();
        let mut sales = Vec::new();
        for method in methods {
            let s = sale(&w, method, 3, count);
            w.state = w.state.apply(&ctx(), LedgerCommand::SettleSale(s.clone())).unwrap().0;
            sales.push(s);
        }

        let open: Vec<InstallmentId> = w
            .state
            .accounts_receivable()
            .iter()
            .filter(|i| i.status == InstallmentStatus::Pending)
            .map(|i| i.id)
            .collect();
        for id in open {
            let pay = PaymentInput::new(id, payment, w.bank.id, ctx().today);
            w.state = w.state.apply(&ctx(), LedgerCommand::PayReceivable(pay)).unwrap().0;
        }

        let victim = victim_index.get(&sales).id;
        let doomed: Vec<InstallmentId> = w
            .state
            .accounts_receivable()
            .iter()
            .filter(|i| i.sale_id == Some(victim))
            .map(|i| i.id)
            .collect();

        w.state = w.state.apply(&ctx(), LedgerCommand::DeleteSale(victim)).unwrap().0;

        prop_assert!(w.state.find_sale(victim).is_none());
        prop_assert!(w.state.invoices().iter().all(|i| i.sale_id != victim));
        prop_assert!(w.state.accounts_receivable().iter().all(|i| i.sale_id != Some(victim)));
        let records_detached = w.state.financial_records().iter().all(|r| {
            r.related_sale_id != Some(victim)
                && r.related_installment_id.is_none_or(|id| !doomed.contains(&id))
        });
        prop_assert!(records_detached);
        prop_assert_eq!(w.state.sales().len(), sales.len() - 1);
    }

    /// *For any* reparceling of a sale's open receivables, the old ids are
    /// gone and the new ones are present, pending and unpaid.
    #[test]
    fn prop_reparcel_swaps_ids(
        quantity in 1u32..20u32,
        count in 1u32..6u32,
        new_count in 1u32..12u32,
    ) {
        let mut w = world();
        let s = sale(&w, PaymentMethod::Boleto, quantity, count);
        w.state = w.state.apply(&ctx(), LedgerCommand::SettleSale(s.clone())).unwrap().0;

        let old: Vec<InstallmentId> = w.state.accounts_receivable().iter().map(|i| i.id).collect();
        let request = ScheduleRequest::new("Reparcelamento", s.final_amount, new_count, ctx().today)
            .with_sale(s.id);
        let schedule = InstallmentSchedule::equal_split(&request).unwrap();
        let new_ids: Vec<InstallmentId> = schedule.iter().map(|i| i.id).collect();

        w.state = w
            .state
            .apply(&ctx(), LedgerCommand::ReparcelReceivables { replaced: old.clone(), schedule })
            .unwrap()
            .0;

        let receivables = w.state.accounts_receivable();
        prop_assert!(receivables.iter().all(|i| !old.contains(&i.id)));
        prop_assert_eq!(receivables.len(), new_ids.len());
        for inst in receivables {
            prop_assert!(new_ids.contains(&inst.id));
            prop_assert_eq!(inst.status, InstallmentStatus::Pending);
            prop_assert_eq!(inst.paid_amount, Decimal::ZERO);
        }
        let total: Decimal = receivables.iter().map(|i| i.amount).sum();
        prop_assert_eq!(total, s.final_amount);
    }

    /// *For any* sequence of immediate sales and receivable payments, the
    /// bank balance equals the money that actually came in.
    #[test]
    fn prop_balance_tracks_cash(
        methods in prop::collection::vec(method_strategy(), 1..5),
        payment in positive_amount(),
        as_discount in any::<bool>(),
    ) {
        let mut w = world();
        let mut expected = Decimal::ZERO;
        for method in methods {
            let s = sale(&w, method, 2, 2);
            if method.is_immediate() {
                expected += s.final_amount;
            }
            w.state = w.state.apply(&ctx(), LedgerCommand::SettleSale(s)).unwrap().0;
        }

        let open: Vec<InstallmentId> = w
            .state
            .accounts_receivable()
            .iter()
            .filter(|i| i.status == InstallmentStatus::Pending)
            .map(|i| i.id)
            .collect();
        for id in open {
            let mut pay = PaymentInput::new(id, payment, w.bank.id, ctx().today);
            pay.treat_shortfall_as_discount = as_discount;
            w.state = w.state.apply(&ctx(), LedgerCommand::PayReceivable(pay)).unwrap().0;
            expected += payment;
        }

        let statement = w.state.cash_statement(DateRange::all());
        prop_assert_eq!(statement.account(w.bank.id).unwrap().balance, expected);
    }
}
