//! Reconstruction of missing amounts, percentages and bases.
//!
//! All routines are pure and use commercial rounding (half-up). Money is
//! kept at 2 decimal places, intermediate prices at 4 and percentages at 2.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Scale of monetary amounts in the target document.
pub const SCALE_MONEY: u32 = 2;
/// Scale of intermediate unit prices and derived bases.
pub const SCALE_PRICE: u32 = 4;
/// Scale of derived percentages.
pub const SCALE_PERCENT: u32 = 2;

const HUNDRED: Decimal = dec!(100);

/// Round `value` to `dp` decimal places using half-up (commercial rounding).
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Round a monetary amount to 2 decimal places.
pub fn round_money(value: Decimal) -> Decimal {
    round_half_up(value, SCALE_MONEY)
}

/// An intermediate result left the range of [`Decimal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("decimal arithmetic overflow")]
pub struct Overflow;

pub(crate) fn checked_add(a: Decimal, b: Decimal) -> Result<Decimal, Overflow> {
    a.checked_add(b).ok_or(Overflow)
}

pub(crate) fn checked_sub(a: Decimal, b: Decimal) -> Result<Decimal, Overflow> {
    a.checked_sub(b).ok_or(Overflow)
}

pub(crate) fn checked_mul(a: Decimal, b: Decimal) -> Result<Decimal, Overflow> {
    a.checked_mul(b).ok_or(Overflow)
}

/// `a / b`; the divisor must be non-zero.
pub(crate) fn checked_div(a: Decimal, b: Decimal) -> Result<Decimal, Overflow> {
    a.checked_div(b).ok_or(Overflow)
}

pub(crate) fn checked_sum(values: impl IntoIterator<Item = Decimal>) -> Result<Decimal, Overflow> {
    values.into_iter().try_fold(Decimal::ZERO, checked_add)
}

/// `amount * 100 / taxable_base`, or zero for a zero base.
pub fn percentage_from(amount: Decimal, taxable_base: Decimal) -> Result<Decimal, Overflow> {
    if taxable_base.is_zero() {
        return Ok(Decimal::ZERO);
    }
    let scaled = checked_mul(amount, HUNDRED)?;
    Ok(round_half_up(checked_div(scaled, taxable_base)?, SCALE_PERCENT))
}

/// `base * percentage / 100`, or zero for a zero percentage.
pub fn amount_from_percentage(base: Decimal, percentage: Decimal) -> Result<Decimal, Overflow> {
    if percentage.is_zero() {
        return Ok(Decimal::ZERO);
    }
    let product = checked_mul(base, percentage)?;
    Ok(round_half_up(checked_div(product, HUNDRED)?, SCALE_PRICE))
}

/// `amount * 100 / percentage`.
///
/// A base cannot be recovered from a zero percentage, so that case yields `Ok(None)`.
pub fn base_from_amount_and_percentage(amount: Decimal, percentage: Decimal) -> Result<Option<Decimal>, Overflow> {
    if percentage.is_zero() {
        return Ok(None);
    }
    let scaled = checked_mul(amount, HUNDRED)?;
    Ok(Some(round_half_up(checked_div(scaled, percentage)?, SCALE_PRICE)))
}

/// `line_amount / quantity` at price scale, zero for a zero quantity.
pub fn unit_price_from(line_amount: Decimal, quantity: Decimal) -> Result<Decimal, Overflow> {
    if quantity.is_zero() {
        return Ok(Decimal::ZERO);
    }
    Ok(round_half_up(checked_div(line_amount, quantity)?, SCALE_PRICE))
}

/// Price per single unit when the price refers to `base_quantity` units.
pub fn price_per_unit(price: Decimal, base_quantity: Option<Decimal>) -> Result<Decimal, Overflow> {
    match base_quantity {
        Some(bq) if bq.is_zero() => Ok(Decimal::ZERO),
        Some(bq) => Ok(round_half_up(checked_div(price, bq)?, SCALE_PRICE)),
        None => Ok(price),
    }
}

/// Tax amount, taxable base and percentage of one tax subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaxTriple {
    pub amount: Option<Decimal>,
    pub taxable_base: Option<Decimal>,
    pub percentage: Option<Decimal>,
}

impl TaxTriple {
    pub fn new(
        amount: Option<Decimal>,
        taxable_base: Option<Decimal>,
        percentage: Option<Decimal>,
    ) -> Self {
        Self {
            amount,
            taxable_base,
            percentage,
        }
    }

    /// Fill in the one missing component from the other two.
    ///
    /// The percentage is derived first, so a subtotal that only lacks its
    /// percentage is completed as well. With two or more components missing
    /// the triple is returned as given; the caller reports the problem.
    pub fn derive(self) -> Result<Self, Overflow> {
        let mut out = self;
        if out.percentage.is_none() {
            if let (Some(amount), Some(base)) = (out.amount, out.taxable_base) {
                out.percentage = Some(percentage_from(amount, base)?);
            }
        }
        if let Some(pct) = out.percentage {
            match (out.amount, out.taxable_base) {
                (Some(amount), None) => out.taxable_base = base_from_amount_and_percentage(amount, pct)?,
                (None, Some(base)) => out.amount = Some(amount_from_percentage(base, pct)?),
                _ => {}
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_from_amount_and_base() {
        assert_eq!(percentage_from(dec!(20), dec!(100)), Ok(dec!(20.00)));
        assert_eq!(percentage_from(dec!(1), dec!(3)), Ok(dec!(33.33)));
        assert_eq!(percentage_from(dec!(2), dec!(3)), Ok(dec!(66.67)));
    }

    #[test]
    fn percentage_from_zero_base_is_zero() {
        assert_eq!(percentage_from(dec!(20), Decimal::ZERO), Ok(Decimal::ZERO));
    }

    #[test]
    fn amount_from_base_and_percentage() {
        assert_eq!(amount_from_percentage(dec!(100), dec!(20)), Ok(dec!(20.0000)));
        assert_eq!(amount_from_percentage(dec!(33.33), dec!(10)), Ok(dec!(3.3330)));
        assert_eq!(amount_from_percentage(dec!(100), Decimal::ZERO), Ok(Decimal::ZERO));
    }

    #[test]
    fn base_from_amount() {
        assert_eq!(
            base_from_amount_and_percentage(dec!(20), dec!(20)),
            Ok(Some(dec!(100.0000)))
        );
        assert_eq!(base_from_amount_and_percentage(dec!(20), Decimal::ZERO), Ok(None));
    }

    #[test]
    fn half_up_rounding() {
        assert_eq!(round_money(dec!(0.005)), dec!(0.01));
        assert_eq!(round_money(dec!(-0.005)), dec!(-0.01));
        assert_eq!(round_money(dec!(1.004)), dec!(1.00));
    }

    #[test]
    fn unit_price_division() {
        assert_eq!(unit_price_from(dec!(100.00), dec!(1)), Ok(dec!(100.0000)));
        assert_eq!(unit_price_from(dec!(10), dec!(3)), Ok(dec!(3.3333)));
        assert_eq!(unit_price_from(dec!(10), Decimal::ZERO), Ok(Decimal::ZERO));
    }

    #[test]
    fn per_unit_price_with_base_quantity() {
        assert_eq!(price_per_unit(dec!(50), Some(dec!(10))), Ok(dec!(5.0000)));
        assert_eq!(price_per_unit(dec!(50), Some(Decimal::ZERO)), Ok(Decimal::ZERO));
        assert_eq!(price_per_unit(dec!(50), None), Ok(dec!(50)));
    }

    #[test]
    fn triple_missing_amount() {
        let t = TaxTriple::new(None, Some(dec!(100)), Some(dec!(20))).derive().unwrap();
        assert_eq!(t.amount, Some(dec!(20.0000)));
    }

    #[test]
    fn triple_missing_base() {
        let t = TaxTriple::new(Some(dec!(10)), None, Some(dec!(10))).derive().unwrap();
        assert_eq!(t.taxable_base, Some(dec!(100.0000)));
    }

    #[test]
    fn triple_missing_percentage() {
        let t = TaxTriple::new(Some(dec!(19)), Some(dec!(100)), None).derive().unwrap();
        assert_eq!(t.percentage, Some(dec!(19.00)));
    }

    #[test]
    fn triple_zero_percentage_keeps_base_unknown() {
        let t = TaxTriple::new(Some(dec!(0)), None, Some(dec!(0))).derive().unwrap();
        assert_eq!(t.taxable_base, None);
    }

    #[test]
    fn triple_two_missing_is_untouched() {
        let given = TaxTriple::new(Some(dec!(5)), None, None);
        assert_eq!(given.derive(), Ok(given));
    }

    #[test]
    fn overflow_is_reported_not_panicked() {
        assert_eq!(unit_price_from(Decimal::MAX, Decimal::new(1, 28)), Err(Overflow));
        assert_eq!(percentage_from(Decimal::MAX, dec!(0.0001)), Err(Overflow));
        assert_eq!(amount_from_percentage(Decimal::MAX, dec!(50)), Err(Overflow));
        assert_eq!(price_per_unit(Decimal::MAX, Some(dec!(0.001))), Err(Overflow));
        assert_eq!(
            TaxTriple::new(Some(Decimal::MAX), Some(dec!(0.0001)), None).derive(),
            Err(Overflow)
        );
    }

    #[test]
    fn checked_sum_stops_at_overflow() {
        assert_eq!(checked_sum([dec!(1), dec!(2.5)]), Ok(dec!(3.5)));
        assert_eq!(checked_sum([Decimal::MAX, dec!(1)]), Err(Overflow));
        assert_eq!(checked_sub(Decimal::MIN, dec!(1)), Err(Overflow));
    }
}
