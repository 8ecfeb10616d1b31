//! Cash statement projection.
//!
//! Balances are derived, never stored: each bank account starts at its
//! initial balance and moves by the signed amount of every record that
//! references it up to the end of the requested range.

use chrono::NaiveDate;
use gestor_shared::types::BankAccountId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{FinancialRecord, RecordType};
use crate::catalog::BankAccount;

/// Inclusive date range. Open ends are unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day included.
    pub from: Option<NaiveDate>,
    /// Last day included.
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// A range covering every date.
    #[must_use]
    pub const fn all() -> Self {
        Self { from: None, to: None }
    }

    /// A closed range.
    #[must_use]
    pub const fn between(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    /// Returns true if `date` is inside the range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }

    /// Returns true if `date` is not after the end of the range.
    #[must_use]
    pub fn reaches(&self, date: NaiveDate) -> bool {
        self.to.is_none_or(|to| date <= to)
    }
}

/// Derived balance of one bank account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalance {
    /// The bank account.
    pub bank_account_id: BankAccountId,
    /// Account display name.
    pub name: String,
    /// Baseline configured on the account.
    pub initial_balance: Decimal,
    /// Income inside the range.
    pub income: Decimal,
    /// Expense inside the range.
    pub expense: Decimal,
    /// Balance at the end of the range.
    pub balance: Decimal,
}

/// Total per category and direction inside the range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// Category name.
    pub category: String,
    /// Direction.
    pub record_type: RecordType,
    /// Sum of amounts.
    pub total: Decimal,
}

/// Cash statement over a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashStatement {
    /// Range the period totals cover.
    pub range: DateRange,
    /// One entry per bank account, in registry order.
    pub accounts: Vec<AccountBalance>,
    /// Totals by category, sorted by direction then category.
    pub categories: Vec<CategoryTotal>,
    /// Income inside the range, across all accounts.
    pub total_income: Decimal,
    /// Expense inside the range, across all accounts.
    pub total_expense: Decimal,
}

impl CashStatement {
    /// Builds the statement from the account registry and the record log.
    #[must_use]
    pub fn build(
        bank_accounts: &[BankAccount],
        records: &[FinancialRecord],
        range: DateRange,
    ) -> Self {
        let accounts = bank_accounts
            .iter()
            .map(|account| {
                let mut income = Decimal::ZERO;
                let mut expense = Decimal::ZERO;
                let mut balance = account.initial_balance;

                for record in records
                    .iter()
                    .filter(|r| r.bank_account_id == Some(account.id))
                {
                    if range.reaches(record.date) {
                        balance += record.signed_amount();
                    }
                    if range.contains(record.date) {
                        match record.record_type {
                            RecordType::Income => income += record.amount,
                            RecordType::Expense => expense += record.amount,
                        }
                    }
                }

                AccountBalance {
                    bank_account_id: account.id,
                    name: account.name.clone(),
                    initial_balance: account.initial_balance,
                    income,
                    expense,
                    balance,
                }
            })
            .collect();

        let mut categories: Vec<CategoryTotal> = Vec::new();
        let mut total_income = Decimal::ZERO;
        let mut total_expense = Decimal::ZERO;

        for record in records.iter().filter(|r| range.contains(r.date)) {
            match record.record_type {
                RecordType::Income => total_income += record.amount,
                RecordType::Expense => total_expense += record.amount,
            }
            match categories
                .iter_mut()
                .find(|c| c.category == record.category && c.record_type == record.record_type)
            {
                Some(existing) => existing.total += record.amount,
                None => categories.push(CategoryTotal {
                    category: record.category.clone(),
                    record_type: record.record_type,
                    total: record.amount,
                }),
            }
        }
        categories.sort_by(|a, b| {
            (a.record_type.as_str(), a.category.as_str())
                .cmp(&(b.record_type.as_str(), b.category.as_str()))
        });

        Self {
            range,
            accounts,
            categories,
            total_income,
            total_expense,
        }
    }

    /// Income minus expense inside the range.
    #[must_use]
    pub fn net(&self) -> Decimal {
        self.total_income - self.total_expense
    }

    /// Looks up one account's derived balance.
    #[must_use]
    pub fn account(&self, id: BankAccountId) -> Option<&AccountBalance> {
        self.accounts.iter().find(|a| a.bank_account_id == id)
    }
}
