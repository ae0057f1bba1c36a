//! Payout odds and the calculators that lock them in at stake time.
//!
//! Odds are integers scaled by [`ODDS_BASE`]: `100` means 1.00x, `250`
//! means 2.50x. A bet pays `amount * odds / ODDS_BASE`, floored.

use std::fmt;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::event::OutcomePools;
use super::id::OutcomeId;
use super::money::Amount;

/// Scale of [`Odds`]: odds of `ODDS_BASE` return exactly the stake.
pub const ODDS_BASE: u128 = 100;

/// Payout multiplier scaled by [`ODDS_BASE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Odds(u128);

impl Odds {
    /// The minimum odds: the stake is returned and nothing more.
    pub const EVEN: Self = Self(ODDS_BASE);

    #[must_use]
    pub const fn new(scaled: u128) -> Self {
        Self(scaled)
    }

    /// Get the scaled value.
    #[must_use]
    pub const fn value(&self) -> u128 {
        self.0
    }

    /// The multiplier as a decimal (`150` -> `1.50`), `None` past the
    /// range of [`Decimal`].
    #[must_use]
    pub fn as_multiplier(&self) -> Option<Decimal> {
        Decimal::from_u128(self.0)?.checked_div(Decimal::ONE_HUNDRED)
    }

    /// Payout for `stake` at these odds, floored, `None` on overflow.
    #[must_use]
    pub fn payout(&self, stake: Amount) -> Option<Amount> {
        stake.checked_mul_div(self.0, ODDS_BASE)
    }
}

impl fmt::Display for Odds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_multiplier() {
            Some(multiplier) => write!(f, "{multiplier}x"),
            None => write!(f, "{}/{ODDS_BASE}", self.0),
        }
    }
}

/// Computes the odds a new stake is locked in at.
///
/// Implementations must be pure: the same pools, outcome and stake always
/// produce the same odds, so an auditor can reproduce them.
pub trait OddsCalculator: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Odds for `stake` on `outcome`, given the pools *before* the stake.
    ///
    /// Returns `None` if the result does not fit in `u128`.
    fn compute(&self, pools: &OutcomePools, outcome: OutcomeId, stake: Amount) -> Option<Odds>;
}

/// Pari-mutuel odds: total pool over the chosen outcome's pool, both taken
/// after the stake is added.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParimutuelOdds;

impl OddsCalculator for ParimutuelOdds {
    fn name(&self) -> &'static str {
        "parimutuel"
    }

    fn compute(&self, pools: &OutcomePools, outcome: OutcomeId, stake: Amount) -> Option<Odds> {
        compute_odds(pools, outcome, stake)
    }
}

/// Pari-mutuel odds for `stake` on `outcome` given the pools before it.
///
/// An outcome with nothing behind it after the stake (a zero stake on an
/// empty outcome) yields [`Odds::EVEN`] rather than dividing by zero.
#[must_use]
pub fn compute_odds(pools: &OutcomePools, outcome: OutcomeId, stake: Amount) -> Option<Odds> {
    let total = pools.total()?.checked_add(stake)?;
    let backing = pools.get(outcome).checked_add(stake)?;
    if backing.is_zero() {
        return Some(Odds::EVEN);
    }
    let scaled = total.checked_mul_div(ODDS_BASE, backing.base_units())?;
    Some(Odds(scaled.base_units()))
}
