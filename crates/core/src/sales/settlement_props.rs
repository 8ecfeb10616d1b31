//! Property-based tests for sale settlement.
//!
//! - Immediate sales: one paid installment for the final amount and one
//!   record for it, unless the final amount is zero
//! - Deferred sales: installments sum to the final amount within one cent
//!   per installment, due i + 1 months after the sale

use chrono::{Months, NaiveDate};
use gestor_shared::types::{BankAccountId, ClientId, ServiceId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::settlement::SaleSettlement;
use super::types::{PaymentMethod, SaleDraft, SaleItem};
use crate::installment::InstallmentStatus;

/// Strategy to generate unit prices (0.01 to 5,000.00).
fn unit_price() -> impl Strategy<Value = Decimal> {
    (1i64..500_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate items.
fn items_strategy() -> impl Strategy<Value = Vec<SaleItem>> {
    prop::collection::vec(
        (unit_price(), 1u32..10u32).prop_map(|(price, quantity)| SaleItem {
            service_id: ServiceId::new(),
            service_name: "Serviço".to_string(),
            unit_price: price,
            quantity,
        }),
        1..5,
    )
}

fn immediate_method() -> impl Strategy<Value = PaymentMethod> {
    prop_oneof![
        Just(PaymentMethod::Cash),
        Just(PaymentMethod::Pix),
        Just(PaymentMethod::DebitCard),
    ]
}

fn deferred_method() -> impl Strategy<Value = PaymentMethod> {
    prop_oneof![
        Just(PaymentMethod::CreditCard),
        Just(PaymentMethod::Boleto),
        Just(PaymentMethod::BankTransfer),
    ]
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 31).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* immediate sale, settlement yields one paid installment for
    /// the final amount and positive records summing to it.
    #[test]
    fn prop_immediate_sale_settles_in_full(
        items in items_strategy(),
        method in immediate_method(),
        discount_cents in 0i64..100_000i64,
    ) {
        let mut draft = SaleDraft::new(ClientId::new(), "Cliente", items, method);
        draft.discount = Decimal::new(discount_cents, 2);
        draft.bank_account_id = Some(BankAccountId::new());
        let sale = draft.into_sale(today());

        let plan = SaleSettlement::plan(&sale, today()).unwrap();

        let expected_records = usize::from(sale.final_amount > Decimal::ZERO);
        prop_assert_eq!(plan.records.len(), expected_records);
        let recorded: Decimal = plan.records.iter().map(|r| r.amount).sum();
        prop_assert_eq!(recorded, sale.final_amount);
        prop_assert!(plan.records.iter().all(|r| r.amount > Decimal::ZERO));
        prop_assert_eq!(plan.installments.len(), 1);
        prop_assert_eq!(plan.installments[0].status, InstallmentStatus::Paid);
        prop_assert_eq!(plan.installments[0].paid_amount, sale.final_amount);
        prop_assert_eq!(plan.invoice.amount, sale.final_amount);
    }

    /// *For any* deferred sale with `n` installments, the schedule sums to
    /// the final amount within `0.01 * n` and installment i is due
    /// `i + 1` months after the sale.
    #[test]
    fn prop_deferred_schedule_sums_to_final(
        items in items_strategy(),
        method in deferred_method(),
        count in 1u32..24u32,
    ) {
        let mut draft = SaleDraft::new(ClientId::new(), "Cliente", items, method);
        draft.installments_count = count;
        let sale = draft.into_sale(today());

        let plan = SaleSettlement::plan(&sale, today()).unwrap();

        prop_assert!(plan.records.is_empty());
        prop_assert_eq!(plan.installments.len(), count as usize);

        let sum: Decimal = plan.installments.iter().map(|i| i.amount).sum();
        let tolerance = Decimal::new(i64::from(count), 2);
        prop_assert!((sum - sale.final_amount).abs() <= tolerance);

        for (i, inst) in plan.installments.iter().enumerate() {
            let months = u32::try_from(i).unwrap() + 1;
            let expected = today().checked_add_months(Months::new(months)).unwrap();
            prop_assert_eq!(inst.due_date, expected);
            prop_assert_eq!(inst.status, InstallmentStatus::Pending);
        }
        for pair in plan.installments.windows(2) {
            prop_assert!(pair[0].due_date < pair[1].due_date);
        }
    }
}
