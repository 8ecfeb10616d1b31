//! Withholding computation.
//!
//! Retentions are computed per item on the item's prorated net value:
//! the sale discount is spread across items by the ratio
//! `max(0, subtotal - discount) / subtotal`, then each federal rate of the
//! item's catalog service applies to that net value. Sums stay unrounded
//! until [`RetentionBreakdown::rounded`], so aggregating several sales
//! gives the same figures as one sale containing all their items.

use gestor_shared::types::money::{non_negative, percentage_of, round_money};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

use super::types::{Sale, SaleItem};
use crate::catalog::Service;

/// Amount withheld per federal tax.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxAmounts {
    /// PIS.
    pub pis: Decimal,
    /// COFINS.
    pub cofins: Decimal,
    /// CSLL.
    pub csll: Decimal,
    /// IRRF.
    pub ir: Decimal,
    /// INSS.
    pub inss: Decimal,
}

impl TaxAmounts {
    /// Sum of every tax.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.pis + self.cofins + self.csll + self.ir + self.inss
    }

    /// Rounds each tax to cents.
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            pis: round_money(self.pis),
            cofins: round_money(self.cofins),
            csll: round_money(self.csll),
            ir: round_money(self.ir),
            inss: round_money(self.inss),
        }
    }
}

impl AddAssign for TaxAmounts {
    fn add_assign(&mut self, rhs: Self) {
        self.pis += rhs.pis;
        self.cofins += rhs.cofins;
        self.csll += rhs.csll;
        self.ir += rhs.ir;
        self.inss += rhs.inss;
    }
}

/// Gross value, withheld taxes and ISS for one or more sales.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetentionBreakdown {
    /// Service value after discount.
    pub gross: Decimal,
    /// Federal withholdings.
    pub withheld: TaxAmounts,
    /// ISS due on the gross value (informational, not withheld here).
    pub iss: Decimal,
}

impl RetentionBreakdown {
    /// Computes the breakdown for a list of items sharing one discount.
    ///
    /// Items whose service is missing from `services` contribute to the
    /// gross value but withhold nothing.
    #[must_use]
    pub fn for_items(items: &[SaleItem], discount: Decimal, services: &[Service]) -> Self {
        let subtotal = round_money(items.iter().map(SaleItem::line_total).sum());
        let gross = non_negative(subtotal - round_money(discount));
        let ratio = if subtotal > Decimal::ZERO {
            gross / subtotal
        } else {
            Decimal::ZERO
        };

        let mut breakdown = Self {
            gross,
            ..Self::default()
        };
        for item in items {
            let Some(service) = services.iter().find(|s| s.id == item.service_id) else {
                continue;
            };
            let net = item.line_total() * ratio;
            let rates = &service.withholding;
            breakdown.withheld += TaxAmounts {
                pis: percentage_of(net, rates.pis),
                cofins: percentage_of(net, rates.cofins),
                csll: percentage_of(net, rates.csll),
                ir: percentage_of(net, rates.ir),
                inss: percentage_of(net, rates.inss),
            };
            breakdown.iss += percentage_of(net, service.iss_rate);
        }
        breakdown
    }

    /// Computes the breakdown for a committed sale.
    #[must_use]
    pub fn for_sale(sale: &Sale, services: &[Service]) -> Self {
        Self::for_items(&sale.items, sale.discount, services)
    }

    /// Aggregates several sales.
    #[must_use]
    pub fn for_sales<'a>(sales: impl IntoIterator<Item = &'a Sale>, services: &[Service]) -> Self {
        sales.into_iter().fold(Self::default(), |mut acc, sale| {
            acc += Self::for_sale(sale, services);
            acc
        })
    }

    /// Rounds every figure to cents.
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            gross: round_money(self.gross),
            withheld: self.withheld.rounded(),
            iss: round_money(self.iss),
        }
    }

    /// Gross minus federal withholdings.
    #[must_use]
    pub fn liquid(&self) -> Decimal {
        self.gross - self.withheld.total()
    }
}

impl AddAssign for RetentionBreakdown {
    fn add_assign(&mut self, rhs: Self) {
        self.gross += rhs.gross;
        self.withheld += rhs.withheld;
        self.iss += rhs.iss;
    }
}
