//! Installment settlement.
//!
//! Applies one payment to one installment and produces the cash records
//! for it. Receivables and payables share the algorithm; only the record
//! direction and categories differ (see [`InstallmentKind`]).
//!
//! Given `remaining = amount - paid_amount` and `diff = payment - remaining`:
//!
//! | case                        | status  | principal record | extra record         |
//! |-----------------------------|---------|------------------|----------------------|
//! | exact                       | Pago    | remaining        | -                    |
//! | shortfall                   | Parcial | payment          | -                    |
//! | shortfall, as discount      | Pago    | remaining        | discount of `-diff`  |
//! | overage                     | Pago    | remaining        | interest of `diff`   |
//! | overage, as principal       | Pago    | payment          | - (amount += diff)   |
//!
//! Amounts are compared exactly after rounding the payment to cents.

use chrono::NaiveDate;
use gestor_shared::types::money::round_money;
use gestor_shared::types::{BankAccountId, InstallmentId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::InstallmentError;
use super::types::{Installment, InstallmentKind, InstallmentStatus};
use crate::cashflow::FinancialRecord;

/// A payment against an installment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentInput {
    /// Installment being paid.
    pub installment_id: InstallmentId,
    /// Amount paid now.
    pub amount: Decimal,
    /// Account the money moved through.
    pub bank_account_id: BankAccountId,
    /// Payment date.
    pub date: NaiveDate,
    /// Settle a short payment in full, booking the gap as a discount.
    #[serde(default)]
    pub treat_shortfall_as_discount: bool,
    /// Absorb an overpayment into the principal instead of booking interest.
    #[serde(default)]
    pub treat_overage_as_principal_increase: bool,
}

impl PaymentInput {
    /// Creates a payment with both resolution flags off.
    #[must_use]
    pub fn new(
        installment_id: InstallmentId,
        amount: Decimal,
        bank_account_id: BankAccountId,
        date: NaiveDate,
    ) -> Self {
        Self {
            installment_id,
            amount,
            bank_account_id,
            date,
            treat_shortfall_as_discount: false,
            treat_overage_as_principal_increase: false,
        }
    }

    /// Books a shortfall as a discount.
    #[must_use]
    pub fn shortfall_as_discount(mut self) -> Self {
        self.treat_shortfall_as_discount = true;
        self
    }

    /// Absorbs an overage into the principal.
    #[must_use]
    pub fn overage_as_principal(mut self) -> Self {
        self.treat_overage_as_principal_increase = true;
        self
    }
}

/// Which resolution was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementBranch {
    /// Payment matched the balance.
    Exact,
    /// Payment fell short; balance remains.
    Partial,
    /// Payment fell short; the gap was written off as a discount.
    ShortfallDiscounted,
    /// Payment exceeded the balance; the excess was booked as interest.
    OverageAsInterest,
    /// Payment exceeded the balance; the excess became principal.
    OverageAsPrincipal,
}

/// Result of a settlement: the updated installment and the new records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementOutcome {
    /// Installment after the payment.
    pub installment: Installment,
    /// Records to append, principal first. A zero principal (nothing left
    /// to pay) is not recorded.
    pub records: Vec<FinancialRecord>,
    /// Resolution applied.
    pub branch: SettlementBranch,
}

/// Stateless settlement calculator.
pub struct InstallmentSettlement;

impl InstallmentSettlement {
    /// Applies `payment` to `installment`.
    ///
    /// `document_number` is copied onto every generated record (the emitted
    /// invoice number for receivables, the supplier document for payables).
    /// The input installment is not modified.
    pub fn settle(
        kind: InstallmentKind,
        installment: &Installment,
        payment: &PaymentInput,
        document_number: Option<String>,
    ) -> Result<SettlementOutcome, InstallmentError> {
        let paid_now = round_money(payment.amount);
        if paid_now <= Decimal::ZERO {
            return Err(InstallmentError::NonPositivePayment(payment.amount));
        }
        if installment.is_settled() {
            return Err(InstallmentError::AlreadySettled(installment.id));
        }

        let remaining = installment.remaining();
        let diff = paid_now - remaining;

        let mut updated = installment.clone();
        updated.payment_date = Some(payment.date);

        let (branch, principal, extra) = if diff.is_zero() {
            updated.status = InstallmentStatus::Paid;
            updated.paid_amount = updated.amount;
            (SettlementBranch::Exact, remaining, None)
        } else if diff < Decimal::ZERO {
            if payment.treat_shortfall_as_discount {
                updated.status = InstallmentStatus::Paid;
                updated.paid_amount = updated.amount;
                let discount = (
                    kind.principal_type().opposite(),
                    kind.discount_category(),
                    "Desconto",
                    -diff,
                );
                (SettlementBranch::ShortfallDiscounted, remaining, Some(discount))
            } else {
                updated.status = InstallmentStatus::Partial;
                updated.paid_amount += paid_now;
                (SettlementBranch::Partial, paid_now, None)
            }
        } else if payment.treat_overage_as_principal_increase {
            updated.amount += diff;
            updated.status = InstallmentStatus::Paid;
            updated.paid_amount = updated.amount;
            (SettlementBranch::OverageAsPrincipal, paid_now, None)
        } else {
            updated.status = InstallmentStatus::Paid;
            updated.paid_amount = updated.amount;
            let interest = (
                kind.principal_type(),
                kind.interest_category(),
                "Juros/Multa",
                diff,
            );
            (SettlementBranch::OverageAsInterest, remaining, Some(interest))
        };

        let category = match kind {
            InstallmentKind::Payable => installment
                .category
                .clone()
                .unwrap_or_else(|| kind.default_category().to_string()),
            InstallmentKind::Receivable => kind.default_category().to_string(),
        };

        let base = |description: String, amount, record_type, category: String| {
            FinancialRecord::new(payment.date, description, amount, record_type, category)
                .with_bank_account(payment.bank_account_id)
                .with_sale(installment.sale_id)
                .with_installment(installment.id)
                .with_document_number(document_number.clone())
        };

        let mut records = Vec::with_capacity(2);
        if principal > Decimal::ZERO {
            records.push(base(
                format!("{} - {}", kind.settlement_label(), installment.description),
                principal,
                kind.principal_type(),
                category,
            ));
        }
        if let Some((record_type, category, label, amount)) = extra {
            records.push(base(
                format!("{label} - {}", installment.description),
                amount,
                record_type,
                category.to_string(),
            ));
        }

        Ok(SettlementOutcome {
            installment: updated,
            records,
            branch,
        })
    }
}
