//! Money helpers with decimal precision and explicit rounding.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are plain `rust_decimal::Decimal` values in BRL; every helper
//! here rounds half away from zero to two decimal places, which is what
//! the back office prints on receipts and invoices.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places kept for monetary amounts.
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// The smallest representable monetary unit (R$ 0,01).
pub const ONE_CENT: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Rounds an amount to two decimal places, half away from zero.
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns true if `amount` has no fraction of a cent.
#[must_use]
pub fn is_whole_cents(amount: Decimal) -> bool {
    (amount % ONE_CENT).is_zero()
}

/// Clamps negative amounts to zero.
#[must_use]
pub fn non_negative(amount: Decimal) -> Decimal {
    amount.max(Decimal::ZERO)
}

/// Applies a percentage rate (e.g. `4.65` for 4.65%) to a base amount.
///
/// The result is NOT rounded; callers sum several of these before rounding.
#[must_use]
pub fn percentage_of(base: Decimal, rate_percent: Decimal) -> Decimal {
    base * rate_percent / Decimal::ONE_HUNDRED
}

/// Splits `total` into `count` parts of `round_money(total / count)`.
///
/// The last part absorbs the rounding remainder so the parts always sum to
/// the rounded total. When rounding the share up would leave the last part
/// negative (tiny totals over many parts) the share is truncated instead.
#[must_use]
pub fn split_evenly(total: Decimal, count: usize) -> Vec<Decimal> {
    if count == 0 {
        return vec![];
    }

    let total = round_money(total);
    let count_dec = Decimal::from(count as u64);
    let others = Decimal::from((count - 1) as u64);

    let mut share = round_money(total / count_dec);
    if share * others > total {
        share = (total / count_dec)
            .round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::ToZero);
    }

    let mut parts = vec![share; count];
    if let Some(last) = parts.last_mut() {
        *last = total - share * others;
    }
    parts
}

/// Formats an amount as Brazilian currency text, e.g. `R$ 1.234,56`.
#[must_use]
pub fn format_brl(amount: Decimal) -> String {
    let rounded = round_money(amount);
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}R$ {grouped},{frac_part}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_money_half_away_from_zero() {
        assert_eq!(round_money(dec!(1.005)), dec!(1.01));
        assert_eq!(round_money(dec!(1.004)), dec!(1.00));
        assert_eq!(round_money(dec!(-1.005)), dec!(-1.01));
        assert_eq!(round_money(dec!(33.333333)), dec!(33.33));
    }

    #[test]
    fn test_non_negative() {
        assert_eq!(non_negative(dec!(-5)), Decimal::ZERO);
        assert_eq!(non_negative(dec!(5)), dec!(5));
    }

    #[test]
    fn test_percentage_of() {
        assert_eq!(percentage_of(dec!(1000), dec!(4.65)), dec!(46.5));
        assert_eq!(percentage_of(dec!(200), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_one_cent() {
        assert_eq!(ONE_CENT, dec!(0.01));
    }

    #[test]
    fn test_is_whole_cents() {
        assert!(is_whole_cents(dec!(100)));
        assert!(is_whole_cents(dec!(100.01)));
        assert!(is_whole_cents(dec!(100.010)));
        assert!(is_whole_cents(dec!(-3.50)));
        assert!(!is_whole_cents(dec!(100.005)));
        assert!(!is_whole_cents(dec!(0.001)));
    }
}
