//! Monetary amounts held and moved by the ledger.
//!
//! Amounts are integer base units (the smallest indivisible unit of the
//! settlement currency, e.g. wei). All arithmetic is checked; callers map
//! `None` to an overflow error instead of wrapping.

use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A non-negative amount of base units.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Amount(u128);

impl Amount {
    /// The zero amount.
    pub const ZERO: Self = Self(0);

    /// Create an amount from raw base units.
    #[must_use]
    pub const fn new(base_units: u128) -> Self {
        Self(base_units)
    }

    /// Get the raw base units.
    #[must_use]
    pub const fn base_units(&self) -> u128 {
        self.0
    }

    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    #[must_use]
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Multiply by `numerator / denominator`, flooring the result.
    ///
    /// The intermediate product is never formed, so this only fails when
    /// the result itself exceeds `u128` or the denominator is zero.
    #[must_use]
    pub fn checked_mul_div(self, numerator: u128, denominator: u128) -> Option<Self> {
        if denominator == 0 {
            return None;
        }
        let whole = (self.0 / denominator).checked_mul(numerator)?;
        let part = mul_div_below(self.0 % denominator, numerator, denominator);
        whole.checked_add(part).map(Self)
    }

    /// Convert whole units (e.g. `0.01`) into base units.
    ///
    /// Returns `None` if the value is negative, overflows, or has more
    /// fractional digits than `decimals` can represent.
    #[must_use]
    pub fn from_units(value: Decimal, decimals: u32) -> Option<Self> {
        if value.is_sign_negative() {
            return None;
        }
        let factor = Decimal::from(10u64.checked_pow(decimals)?);
        let scaled = value.checked_mul(factor)?;
        if !scaled.fract().is_zero() {
            return None;
        }
        scaled.to_u128().map(Self)
    }

    /// Convert base units back into whole units.
    ///
    /// Returns `None` if the amount is too large for a `Decimal`.
    #[must_use]
    pub fn to_units(&self, decimals: u32) -> Option<Decimal> {
        let mantissa = i128::try_from(self.0).ok()?;
        Decimal::try_from_i128_with_scale(mantissa, decimals).ok()
    }
}

/// `floor(r * n / d)` for `r < d`, by binary long multiplication modulo `d`.
fn mul_div_below(r: u128, n: u128, d: u128) -> u128 {
    // x + y as (x + y) mod d plus a carry, for x, y < d.
    let add = |x: u128, y: u128| -> (u128, u128) {
        if x >= d - y {
            (x - (d - y), 1)
        } else {
            (x + y, 0)
        }
    };
    let mut quotient = 0u128;
    let mut rem = 0u128;
    for bit in (0..u128::BITS - n.leading_zeros()).rev() {
        let (doubled, carry) = add(rem, rem);
        quotient = quotient * 2 + carry;
        rem = doubled;
        if (n >> bit) & 1 == 1 {
            let (sum, carry) = add(rem, r);
            quotient += carry;
            rem = sum;
        }
    }
    quotient
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u128> for Amount {
    fn from(base_units: u128) -> Self {
        Self::new(base_units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn checked_add_and_sub() {
        let a = Amount::new(70);
        let b = Amount::new(30);
        assert_eq!(a.checked_add(b), Some(Amount::new(100)));
        assert_eq!(a.checked_sub(b), Some(Amount::new(40)));
        assert_eq!(b.checked_sub(a), None);
    }

    #[test]
    fn checked_add_overflow_is_none() {
        assert_eq!(Amount::new(u128::MAX).checked_add(Amount::new(1)), None);
    }

    #[test]
    fn mul_div_floors() {
        // 333 * 150 / 100 = 499.5 -> 499
        assert_eq!(
            Amount::new(333).checked_mul_div(150, 100),
            Some(Amount::new(499))
        );
    }

    #[test]
    fn mul_div_exact_when_product_exceeds_u128() {
        // (2^127 - 1) * 3 / 4 = 3 * 2^125 - 0.75
        assert_eq!(
            Amount::new(u128::MAX / 2).checked_mul_div(3, 4),
            Some(Amount::new(3 * (1u128 << 125) - 1))
        );
        assert_eq!(
            Amount::new(u128::MAX).checked_mul_div(100, 100),
            Some(Amount::new(u128::MAX))
        );
        assert_eq!(
            Amount::new(u128::MAX - 1).checked_mul_div(u128::MAX - 2, u128::MAX),
            Some(Amount::new(u128::MAX - 3))
        );
    }

    #[test]
    fn mul_div_rejects_zero_denominator_and_overflow() {
        assert_eq!(Amount::new(1).checked_mul_div(1, 0), None);
        assert_eq!(Amount::new(u128::MAX).checked_mul_div(2, 1), None);
    }

    #[test]
    fn from_units_scales_to_base_units() {
        let min_bet = Amount::from_units(dec!(0.01), 18).unwrap();
        assert_eq!(min_bet.base_units(), 10_000_000_000_000_000);
    }

    #[test]
    fn from_units_rejects_unrepresentable_values() {
        assert_eq!(Amount::from_units(dec!(0.001), 2), None);
        assert_eq!(Amount::from_units(dec!(-1), 2), None);
        assert_eq!(Amount::from_units(dec!(1), 20), None);
    }

    #[test]
    fn to_units_reverses_from_units() {
        let amount = Amount::new(1_500);
        assert_eq!(amount.to_units(2), Some(dec!(15.00)));
    }

    #[test]
    fn zero_is_default() {
        assert!(Amount::default().is_zero());
        assert_eq!(Amount::default(), Amount::ZERO);
    }
}
