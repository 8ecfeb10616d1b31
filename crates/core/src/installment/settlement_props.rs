//! Property-based tests for installment settlement.
//!
//! - Paid amount never exceeds the principal after settlement
//! - Status follows the branch taken
//! - Net cash moved equals the payment, except when an overage is absorbed

use chrono::NaiveDate;
use gestor_shared::types::BankAccountId;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::settlement::{InstallmentSettlement, PaymentInput, SettlementBranch};
use super::types::{Installment, InstallmentKind, InstallmentStatus};
use crate::cashflow::FinancialRecord;

/// Strategy to generate positive amounts (0.01 to 10,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate installment kinds.
fn kind_strategy() -> impl Strategy<Value = InstallmentKind> {
    prop_oneof![Just(InstallmentKind::Receivable), Just(InstallmentKind::Payable)]
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()
}

fn payment(inst: &Installment, amount: Decimal, discount: bool, principal: bool) -> PaymentInput {
    let mut input = PaymentInput::new(inst.id, amount, BankAccountId::new(), date());
    input.treat_shortfall_as_discount = discount;
    input.treat_overage_as_principal_increase = principal;
    input
}

fn net_cash(records: &[FinancialRecord]) -> Decimal {
    records.iter().map(FinancialRecord::signed_amount).sum()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// *For any* open installment and positive payment, the settled
    /// installment keeps `paid_amount <= amount` and its status is Pago or
    /// Parcial according to the branch.
    #[test]
    fn prop_paid_never_exceeds_amount(
        kind in kind_strategy(),
        amount in positive_amount(),
        already_paid_cents in 0i64..1_000_000i64,
        pay in positive_amount(),
        discount in any::<bool>(),
        principal in any::<bool>(),
    ) {
        let mut inst = Installment::pending("Parcela", amount, date());
        let already = Decimal::new(already_paid_cents, 2);
        prop_assume!(already < amount);
        if !already.is_zero() {
            inst.paid_amount = already;
            inst.status = InstallmentStatus::Partial;
        }

        let out = InstallmentSettlement::settle(
            kind,
            &inst,
            &payment(&inst, pay, discount, principal),
            None,
        ).unwrap();

        prop_assert!(out.installment.paid_amount <= out.installment.amount);
        match out.branch {
            SettlementBranch::Partial => {
                prop_assert_eq!(out.installment.status, InstallmentStatus::Partial);
                prop_assert!(out.installment.paid_amount < out.installment.amount);
            }
            _ => {
                prop_assert_eq!(out.installment.status, InstallmentStatus::Paid);
                prop_assert_eq!(out.installment.paid_amount, out.installment.amount);
            }
        }
    }

    /// *For any* payment, every generated record is non-negative and linked
    /// to the installment, and the account moves by exactly the payment.
    #[test]
    fn prop_cash_moved_equals_payment(
        kind in kind_strategy(),
        amount in positive_amount(),
        pay in positive_amount(),
        discount in any::<bool>(),
        principal in any::<bool>(),
    ) {
        let inst = Installment::pending("Parcela", amount, date());
        let out = InstallmentSettlement::settle(
            kind,
            &inst,
            &payment(&inst, pay, discount, principal),
            None,
        ).unwrap();

        prop_assert!(out.records.iter().all(|r| r.amount > Decimal::ZERO));
        prop_assert!(out.records.iter().all(|r| r.related_installment_id == Some(inst.id)));

        let expected = match kind {
            InstallmentKind::Receivable => pay,
            InstallmentKind::Payable => -pay,
        };
        prop_assert_eq!(net_cash(&out.records), expected);
    }

    /// *For any* shortfall without the discount flag, a second payment of
    /// the remainder settles the installment exactly.
    #[test]
    fn prop_partial_then_remainder_is_exact(
        amount in positive_amount(),
        fraction in 1u32..100u32,
    ) {
        let first = (amount * Decimal::from(fraction) / Decimal::ONE_HUNDRED).round_dp(2);
        prop_assume!(first > Decimal::ZERO && first < amount);

        let inst = Installment::pending("Parcela", amount, date());
        let partial = InstallmentSettlement::settle(
            InstallmentKind::Receivable,
            &inst,
            &payment(&inst, first, false, false),
            None,
        ).unwrap();
        prop_assert_eq!(partial.branch, SettlementBranch::Partial);

        let rest = partial.installment.remaining();
        let done = InstallmentSettlement::settle(
            InstallmentKind::Receivable,
            &partial.installment,
            &payment(&inst, rest, false, false),
            None,
        ).unwrap();
        prop_assert_eq!(done.branch, SettlementBranch::Exact);
        prop_assert_eq!(done.installment.paid_amount, amount);
    }
}
