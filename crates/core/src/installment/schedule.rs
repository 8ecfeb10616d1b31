//! Installment schedules and reparceling plans.
//!
//! A schedule splits a total into `count` equal monthly installments. The
//! per-installment share is `round_money(total / count)` and the last
//! installment absorbs the rounding remainder, so a schedule always sums to
//! the rounded total.

use std::collections::HashSet;

use chrono::{Months, NaiveDate};
use gestor_shared::types::money::{is_whole_cents, split_evenly};
use gestor_shared::types::{InstallmentId, SaleId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::InstallmentError;
use super::types::{Installment, InstallmentStatus};

/// Parameters for an equal-split monthly schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    /// Amount to spread.
    pub total: Decimal,
    /// Number of installments.
    pub count: u32,
    /// Date the monthly steps are counted from.
    pub anchor_date: NaiveDate,
    /// Months between `anchor_date` and the first due date.
    pub month_offset: u32,
    /// Base description; each installment appends `(i/n)`.
    pub description: String,
    /// Sale the installments belong to.
    pub sale_id: Option<SaleId>,
    /// Statement category (payables).
    pub category: Option<String>,
}

impl ScheduleRequest {
    /// Creates a request whose first installment is due on `first_due_date`,
    /// with no sale or category.
    #[must_use]
    pub fn new(
        description: impl Into<String>,
        total: Decimal,
        count: u32,
        first_due_date: NaiveDate,
    ) -> Self {
        Self {
            total,
            count,
            anchor_date: first_due_date,
            month_offset: 0,
            description: description.into(),
            sale_id: None,
            category: None,
        }
    }

    /// Counts due dates from `anchor_date` and makes the first one fall
    /// `months` later.
    #[must_use]
    pub fn with_month_offset(mut self, months: u32) -> Self {
        self.month_offset = months;
        self
    }

    /// Links every installment to a sale.
    #[must_use]
    pub fn with_sale(mut self, sale_id: SaleId) -> Self {
        self.sale_id = Some(sale_id);
        self
    }

    /// Sets the category of every installment.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// Stateless schedule builder.
pub struct InstallmentSchedule;

impl InstallmentSchedule {
    /// Returns `count` due dates, the i-th being `anchor` plus
    /// `offset + i` calendar months.
    ///
    /// Every date is computed from the anchor, so a month-end anchor clamps
    /// in short months and returns to month-end afterwards
    /// (Jan 31 -> Feb 28 -> Mar 31).
    pub fn monthly_due_dates(
        anchor: NaiveDate,
        offset: u32,
        count: u32,
    ) -> Result<Vec<NaiveDate>, InstallmentError> {
        (0..count)
            .map(|i| {
                offset
                    .checked_add(i)
                    .and_then(|months| anchor.checked_add_months(Months::new(months)))
                    .ok_or(InstallmentError::DateOutOfRange)
            })
            .collect()
    }

    /// Builds a pending equal-split schedule.
    pub fn equal_split(request: &ScheduleRequest) -> Result<Vec<Installment>, InstallmentError> {
        if request.count == 0 {
            return Err(InstallmentError::InvalidCount);
        }
        if request.total < Decimal::ZERO {
            return Err(InstallmentError::NegativeAmount(request.total));
        }
        if !is_whole_cents(request.total) {
            return Err(InstallmentError::SubCentAmount(request.total));
        }
        if request.description.trim().is_empty() {
            return Err(InstallmentError::MissingDescription);
        }

        let dates =
            Self::monthly_due_dates(request.anchor_date, request.month_offset, request.count)?;
        let amounts = split_evenly(request.total, request.count as usize);
        let n = request.count;

        Ok(dates
            .into_iter()
            .zip(amounts)
            .zip(1..=n)
            .map(|((due, amount), i)| {
                Installment::pending(format!("{} ({i}/{n})", request.description), amount, due)
                    .with_sale(request.sale_id)
                    .with_category(request.category.clone())
            })
            .collect())
    }

    /// Checks that an installment is fit to enter a collection as new.
    pub fn validate_new(installment: &Installment) -> Result<(), InstallmentError> {
        if installment.description.trim().is_empty() {
            return Err(InstallmentError::MissingDescription);
        }
        if installment.amount < Decimal::ZERO {
            return Err(InstallmentError::NegativeAmount(installment.amount));
        }
        if !is_whole_cents(installment.amount) {
            return Err(InstallmentError::SubCentAmount(installment.amount));
        }
        if installment.status != InstallmentStatus::Pending
            || !installment.paid_amount.is_zero()
            || installment.payment_date.is_some()
        {
            return Err(InstallmentError::NotFresh(installment.id));
        }
        Ok(())
    }

    /// Validates new installments against a collection and returns the
    /// collection with them appended.
    pub fn plan_addition(
        existing: &[Installment],
        additions: Vec<Installment>,
    ) -> Result<Vec<Installment>, InstallmentError> {
        if additions.is_empty() {
            return Err(InstallmentError::EmptySchedule);
        }
        let mut seen: HashSet<InstallmentId> = existing.iter().map(|i| i.id).collect();
        for inst in &additions {
            Self::validate_new(inst)?;
            if !seen.insert(inst.id) {
                return Err(InstallmentError::DuplicateId(inst.id));
            }
        }

        let mut next = existing.to_vec();
        next.extend(additions);
        Ok(next)
    }

    /// Replaces `replaced` with `schedule` and returns the new collection.
    ///
    /// Every replaced id must exist and be unsettled; the schedule must be
    /// non-empty, fresh and free of id collisions with what remains.
    pub fn plan_replacement(
        existing: &[Installment],
        replaced: &[InstallmentId],
        schedule: Vec<Installment>,
    ) -> Result<Vec<Installment>, InstallmentError> {
        if replaced.is_empty() {
            return Err(InstallmentError::NothingToReplace);
        }

        let replaced: HashSet<InstallmentId> = replaced.iter().copied().collect();
        for id in &replaced {
            let inst = existing
                .iter()
                .find(|i| i.id == *id)
                .ok_or(InstallmentError::NotFound(*id))?;
            if inst.is_settled() {
                return Err(InstallmentError::AlreadySettled(*id));
            }
        }

        let kept: Vec<Installment> = existing
            .iter()
            .filter(|i| !replaced.contains(&i.id))
            .cloned()
            .collect();
        Self::plan_addition(&kept, schedule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_monthly_due_dates_clamp_month_end() {
        let dates = InstallmentSchedule::monthly_due_dates(date(2026, 1, 31), 0, 3).unwrap();
        assert_eq!(dates, vec![date(2026, 1, 31), date(2026, 2, 28), date(2026, 3, 31)]);
    }

    #[test]
    fn test_month_offset_counts_from_anchor() {
        let dates = InstallmentSchedule::monthly_due_dates(date(2026, 1, 31), 1, 4).unwrap();
        assert_eq!(
            dates,
            vec![date(2026, 2, 28), date(2026, 3, 31), date(2026, 4, 30), date(2026, 5, 31)]
        );

        let request = ScheduleRequest::new("Venda", dec!(90), 3, date(2026, 1, 31)).with_month_offset(1);
        let schedule = InstallmentSchedule::equal_split(&request).unwrap();
        assert_eq!(schedule[0].due_date, date(2026, 2, 28));
        assert_eq!(schedule[1].due_date, date(2026, 3, 31));
    }

    #[test]
    fn test_sub_cent_amounts_rejected() {
        let request = ScheduleRequest::new("x", dec!(100.005), 2, date(2026, 5, 10));
        assert_eq!(
            InstallmentSchedule::equal_split(&request),
            Err(InstallmentError::SubCentAmount(dec!(100.005)))
        );

        let odd = Installment::pending("Conta", dec!(100.005), date(2026, 5, 10));
        assert_eq!(
            InstallmentSchedule::validate_new(&odd),
            Err(InstallmentError::SubCentAmount(dec!(100.005)))
        );
        let padded = Installment::pending("Conta", dec!(100.010), date(2026, 5, 10));
        assert_eq!(InstallmentSchedule::validate_new(&padded), Ok(()));
    }

    #[test]
    fn test_equal_split_absorbs_remainder_in_last() {
        let request = ScheduleRequest::new("Reparcelamento", dec!(100), 3, date(2026, 5, 10));
        let schedule = InstallmentSchedule::equal_split(&request).unwrap();

        let amounts: Vec<Decimal> = schedule.iter().map(|i| i.amount).collect();
        assert_eq!(amounts, vec![dec!(33.33), dec!(33.33), dec!(33.34)]);
        assert_eq!(schedule[0].description, "Reparcelamento (1/3)");
        assert_eq!(schedule[2].description, "Reparcelamento (3/3)");
        assert_eq!(schedule[2].due_date, date(2026, 7, 10));
        assert!(schedule.iter().all(|i| i.status == InstallmentStatus::Pending));
    }

    #[test]
    fn test_equal_split_carries_sale_and_category() {
        let sale_id = SaleId::new();
        let request = ScheduleRequest::new("Aluguel", dec!(300), 2, date(2026, 5, 10))
            .with_sale(sale_id)
            .with_category("Aluguel");
        let schedule = InstallmentSchedule::equal_split(&request).unwrap();
        assert!(schedule.iter().all(|i| i.sale_id == Some(sale_id)));
        assert!(schedule.iter().all(|i| i.category.as_deref() == Some("Aluguel")));
    }

    #[test]
    fn test_equal_split_rejects_bad_requests() {
        let base = ScheduleRequest::new("x", dec!(10), 0, date(2026, 5, 10));
        assert_eq!(
            InstallmentSchedule::equal_split(&base),
            Err(InstallmentError::InvalidCount)
        );

        let negative = ScheduleRequest::new("x", dec!(-1), 2, date(2026, 5, 10));
        assert_eq!(
            InstallmentSchedule::equal_split(&negative),
            Err(InstallmentError::NegativeAmount(dec!(-1)))
        );

        let blank = ScheduleRequest::new("  ", dec!(1), 2, date(2026, 5, 10));
        assert_eq!(
            InstallmentSchedule::equal_split(&blank),
            Err(InstallmentError::MissingDescription)
        );
    }

    #[test]
    fn test_plan_replacement_swaps_ids() {
        let a = Installment::pending("a", dec!(50), date(2026, 5, 1));
        let b = Installment::pending("b", dec!(50), date(2026, 6, 1));
        let c = Installment::pending("c", dec!(20), date(2026, 6, 1));
        let existing = vec![a.clone(), b.clone(), c.clone()];

        let request = ScheduleRequest::new("novo", dec!(100), 4, date(2026, 7, 1));
        let schedule = InstallmentSchedule::equal_split(&request).unwrap();
        let new_ids: Vec<InstallmentId> = schedule.iter().map(|i| i.id).collect();

        let next =
            InstallmentSchedule::plan_replacement(&existing, &[a.id, b.id], schedule).unwrap();

        assert_eq!(next.len(), 5);
        assert!(next.iter().all(|i| i.id != a.id && i.id != b.id));
        assert!(next.iter().any(|i| i.id == c.id));
        assert!(new_ids.iter().all(|id| next.iter().any(|i| i.id == *id)));
    }

    #[test]
    fn test_plan_replacement_rejects_settled_and_unknown() {
        let mut paid = Installment::pending("a", dec!(50), date(2026, 5, 1));
        paid.status = InstallmentStatus::Paid;
        paid.paid_amount = dec!(50);
        let existing = vec![paid.clone()];
        let fresh = vec![Installment::pending("n", dec!(50), date(2026, 6, 1))];

        assert_eq!(
            InstallmentSchedule::plan_replacement(&existing, &[paid.id], fresh.clone()),
            Err(InstallmentError::AlreadySettled(paid.id))
        );

        let ghost = InstallmentId::new();
        assert_eq!(
            InstallmentSchedule::plan_replacement(&existing, &[ghost], fresh.clone()),
            Err(InstallmentError::NotFound(ghost))
        );

        assert_eq!(
            InstallmentSchedule::plan_replacement(&existing, &[], fresh),
            Err(InstallmentError::NothingToReplace)
        );
    }

    #[test]
    fn test_plan_replacement_rejects_empty_or_dirty_schedule() {
        let old = Installment::pending("a", dec!(50), date(2026, 5, 1));
        let existing = vec![old.clone()];

        assert_eq!(
            InstallmentSchedule::plan_replacement(&existing, &[old.id], vec![]),
            Err(InstallmentError::EmptySchedule)
        );

        let mut dirty = Installment::pending("n", dec!(50), date(2026, 6, 1));
        dirty.paid_amount = dec!(10);
        assert_eq!(
            InstallmentSchedule::plan_replacement(&existing, &[old.id], vec![dirty.clone()]),
            Err(InstallmentError::NotFresh(dirty.id))
        );
    }

    #[test]
    fn test_plan_addition_rejects_duplicate_id() {
        let inst = Installment::pending("a", dec!(50), date(2026, 5, 1));
        assert_eq!(
            InstallmentSchedule::plan_addition(std::slice::from_ref(&inst), vec![inst.clone()]),
            Err(InstallmentError::DuplicateId(inst.id))
        );
    }
}
