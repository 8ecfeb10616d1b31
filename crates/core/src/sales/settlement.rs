//! Sale settlement.
//!
//! Turns a committed sale into its invoice plus either an immediate cash
//! record (with a matching paid installment) or a schedule of pending
//! receivables. Pure: the ledger inserts the plan as one transition.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::SaleError;
use super::types::Sale;
use crate::cashflow::{FinancialRecord, RecordType, categories};
use crate::installment::{
    Installment, InstallmentError, InstallmentSchedule, InstallmentStatus, ScheduleRequest,
};
use crate::invoice::Invoice;

/// Everything a sale settlement inserts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementPlan {
    /// The sale with its invoice attached.
    pub sale: Sale,
    /// The pending invoice.
    pub invoice: Invoice,
    /// One paid installment (immediate) or the receivable schedule.
    pub installments: Vec<Installment>,
    /// The cash record (immediate only).
    pub records: Vec<FinancialRecord>,
}

/// Stateless sale settlement.
pub struct SaleSettlement;

impl SaleSettlement {
    /// Validates a sale before anything is inserted.
    pub fn validate(sale: &Sale) -> Result<(), SaleError> {
        if sale.client_name.trim().is_empty() {
            return Err(SaleError::MissingClient);
        }
        if sale.items.is_empty() {
            return Err(SaleError::NoItems);
        }
        for item in &sale.items {
            if item.quantity == 0 {
                return Err(SaleError::InvalidQuantity);
            }
            if item.unit_price < Decimal::ZERO {
                return Err(SaleError::NegativeUnitPrice(item.unit_price));
            }
        }
        if sale.discount < Decimal::ZERO {
            return Err(SaleError::NegativeDiscount(sale.discount));
        }
        if let Some(retention) = sale.retention_amount.filter(|r| *r < Decimal::ZERO) {
            return Err(SaleError::NegativeRetention(retention));
        }
        if sale.installments_count == 0 {
            return Err(SaleError::NoInstallments);
        }
        if sale.payment_method.is_immediate() && sale.bank_account_id.is_none() {
            return Err(SaleError::BankAccountRequired(sale.payment_method.as_str()));
        }

        let totals = sale.totals();
        if totals.final_amount != sale.final_amount || totals.subtotal != sale.subtotal {
            return Err(SaleError::TotalsMismatch {
                expected: totals.final_amount,
                actual: sale.final_amount,
            });
        }
        Ok(())
    }

    /// Plans the settlement of `sale` on `today`.
    ///
    /// Immediate methods ignore `installments_count`: the whole amount is
    /// received at once. A fully discounted immediate sale posts no cash
    /// record, only the paid installment.
    ///
    /// Deferred installment i is due `today + (i + 1)` months.
    pub fn plan(sale: &Sale, today: NaiveDate) -> Result<SettlementPlan, SaleError> {
        Self::validate(sale)?;

        let invoice = Invoice::pending_for(sale);
        let mut sale = sale.clone();
        sale.invoice_id = Some(invoice.id);

        let description = format!("Venda - {}", sale.client_name);

        let (installments, records) = match sale.bank_account_id {
            Some(bank_account_id) if sale.payment_method.is_immediate() => {
                let records = if sale.final_amount > Decimal::ZERO {
                    vec![
                        FinancialRecord::new(
                            today,
                            description.clone(),
                            sale.final_amount,
                            RecordType::Income,
                            categories::SALES,
                        )
                        .with_bank_account(bank_account_id)
                        .with_sale(Some(sale.id)),
                    ]
                } else {
                    vec![]
                };

                let mut paid = Installment::pending(
                    format!("{description} (à vista)"),
                    sale.final_amount,
                    today,
                )
                .with_sale(Some(sale.id));
                paid.status = InstallmentStatus::Paid;
                paid.paid_amount = sale.final_amount;
                paid.payment_date = Some(today);

                (vec![paid], records)
            }
            _ => {
                let request = ScheduleRequest::new(
                    description,
                    sale.final_amount,
                    sale.installments_count,
                    today,
                )
                .with_month_offset(1)
                .with_sale(sale.id);
                let schedule = InstallmentSchedule::equal_split(&request).map_err(|e| match e {
                    InstallmentError::InvalidCount => SaleError::NoInstallments,
                    _ => SaleError::DueDateOutOfRange,
                })?;
                (schedule, vec![])
            }
        };

        Ok(SettlementPlan {
            sale,
            invoice,
            installments,
            records,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::InvoiceStatus;
    use crate::sales::{PaymentMethod, SaleDraft, SaleItem};
    use gestor_shared::types::{BankAccountId, ClientId, ServiceId};
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 20).unwrap()
    }

    fn item(price: Decimal, quantity: u32) -> SaleItem {
        SaleItem {
            service_id: ServiceId::new(),
            service_name: "Consultoria".into(),
            unit_price: price,
            quantity,
        }
    }

    fn draft(method: PaymentMethod) -> SaleDraft {
        let mut draft = SaleDraft::new(ClientId::new(), "ACME", vec![item(dec!(1000), 1)], method);
        draft.discount = dec!(100);
        draft
    }

    #[test]
    fn test_pix_sale_creates_record_and_paid_installment() {
        let bank = BankAccountId::new();
        let mut draft = draft(PaymentMethod::Pix);
        draft.bank_account_id = Some(bank);
        let sale = draft.into_sale(today());
        assert_eq!(sale.final_amount, dec!(900));

        let plan = SaleSettlement::plan(&sale, today()).unwrap();

        assert_eq!(plan.invoice.status, InvoiceStatus::Pending);
        assert_eq!(plan.invoice.amount, dec!(900));
        assert_eq!(plan.sale.invoice_id, Some(plan.invoice.id));

        assert_eq!(plan.records.len(), 1);
        let record = &plan.records[0];
        assert_eq!(record.record_type, RecordType::Income);
        assert_eq!(record.category, "Vendas");
        assert_eq!(record.amount, dec!(900));
        assert_eq!(record.bank_account_id, Some(bank));
        assert_eq!(record.related_sale_id, Some(sale.id));

        assert_eq!(plan.installments.len(), 1);
        let inst = &plan.installments[0];
        assert_eq!(inst.status, InstallmentStatus::Paid);
        assert_eq!(inst.paid_amount, dec!(900));
        assert_eq!(inst.sale_id, Some(sale.id));
    }

    #[test]
    fn test_boleto_sale_creates_monthly_schedule() {
        let mut draft = draft(PaymentMethod::Boleto);
        draft.installments_count = 3;
        let sale = draft.into_sale(today());

        let plan = SaleSettlement::plan(&sale, today()).unwrap();

        assert!(plan.records.is_empty());
        let amounts: Vec<Decimal> = plan.installments.iter().map(|i| i.amount).collect();
        assert_eq!(amounts, vec![dec!(300), dec!(300), dec!(300)]);
        let dues: Vec<NaiveDate> = plan.installments.iter().map(|i| i.due_date).collect();
        assert_eq!(
            dues,
            vec![
                NaiveDate::from_ymd_opt(2026, 2, 20).unwrap(),
                NaiveDate::from_ymd_opt(2026, 3, 20).unwrap(),
                NaiveDate::from_ymd_opt(2026, 4, 20).unwrap(),
            ]
        );
        assert!(
            plan.installments
                .iter()
                .all(|i| i.status == InstallmentStatus::Pending && i.sale_id == Some(sale.id))
        );
    }

    #[test]
    fn test_immediate_sale_ignores_installment_count() {
        let mut draft = draft(PaymentMethod::Cash);
        draft.bank_account_id = Some(BankAccountId::new());
        draft.installments_count = 4;
        let sale = draft.into_sale(today());

        let plan = SaleSettlement::plan(&sale, today()).unwrap();
        assert_eq!(plan.installments.len(), 1);
        assert_eq!(plan.records.len(), 1);
    }

    #[test]
    fn test_fully_discounted_immediate_sale_posts_no_record() {
        let mut draft = draft(PaymentMethod::Pix);
        draft.discount = dec!(1500);
        draft.bank_account_id = Some(BankAccountId::new());
        let sale = draft.into_sale(today());
        assert_eq!(sale.final_amount, Decimal::ZERO);

        let plan = SaleSettlement::plan(&sale, today()).unwrap();
        assert!(plan.records.is_empty());
        assert_eq!(plan.installments.len(), 1);
        assert_eq!(plan.installments[0].status, InstallmentStatus::Paid);
        assert_eq!(plan.invoice.amount, Decimal::ZERO);
    }

    #[test]
    fn test_month_end_sale_keeps_month_end_due_dates() {
        let jan_31 = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
        let mut draft = draft(PaymentMethod::Boleto);
        draft.installments_count = 3;
        let sale = draft.into_sale(jan_31);

        let plan = SaleSettlement::plan(&sale, jan_31).unwrap();
        let dues: Vec<NaiveDate> = plan.installments.iter().map(|i| i.due_date).collect();
        assert_eq!(
            dues,
            vec![
                NaiveDate::from_ymd_opt(2026, 2, 28).unwrap(),
                NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
                NaiveDate::from_ymd_opt(2026, 4, 30).unwrap(),
            ]
        );
    }

    #[test]
    fn test_rejects_immediate_without_bank_account() {
        let sale = draft(PaymentMethod::DebitCard).into_sale(today());
        assert_eq!(
            SaleSettlement::plan(&sale, today()),
            Err(SaleError::BankAccountRequired("Cartão de Débito"))
        );
    }

    #[test]
    fn test_rejects_empty_and_tampered_sales() {
        let mut empty = draft(PaymentMethod::Boleto).into_sale(today());
        empty.items.clear();
        assert_eq!(SaleSettlement::validate(&empty), Err(SaleError::NoItems));

        let mut tampered = draft(PaymentMethod::Boleto).into_sale(today());
        tampered.final_amount = dec!(950);
        assert_eq!(
            SaleSettlement::validate(&tampered),
            Err(SaleError::TotalsMismatch {
                expected: dec!(900),
                actual: dec!(950),
            })
        );

        let mut zero = draft(PaymentMethod::Boleto).into_sale(today());
        zero.installments_count = 0;
        assert_eq!(SaleSettlement::validate(&zero), Err(SaleError::NoInstallments));
    }

    #[test]
    fn test_deducted_retention_lowers_final_amount() {
        let mut draft = draft(PaymentMethod::Boleto);
        draft.retention_amount = Some(dec!(45));
        draft.deduct_retentions = true;
        let sale = draft.into_sale(today());
        assert_eq!(sale.final_amount, dec!(855));

        let plan = SaleSettlement::plan(&sale, today()).unwrap();
        assert_eq!(plan.invoice.amount, dec!(855));
        assert_eq!(plan.installments[0].amount, dec!(855));
    }
}
