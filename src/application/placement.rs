//! Bet placement: validate a stake, lock its odds, take it into custody.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::domain::{Amount, Bet, EventId, Identity, LedgerError, OddsCalculator, OutcomeId};
use crate::port::LedgerStore;

/// Accepts stakes on open events.
pub struct BetPlacement<'a> {
    minimum_bet: Amount,
    odds: &'a dyn OddsCalculator,
}

impl<'a> BetPlacement<'a> {
    #[must_use]
    pub fn new(minimum_bet: Amount, odds: &'a dyn OddsCalculator) -> Self {
        Self { minimum_bet, odds }
    }

    /// Record `amount`, attached by `bettor`, as a bet on `outcome`.
    ///
    /// Checks run in order: event exists, event open, stake at least the
    /// minimum, no earlier bet by this bettor. Odds are computed from the
    /// pools before the stake and every derived value is computed before
    /// the single store write.
    pub fn place_bet<S: LedgerStore + ?Sized>(
        &self,
        store: &mut S,
        bettor: &Identity,
        event_id: EventId,
        outcome: OutcomeId,
        amount: Amount,
        now: DateTime<Utc>,
    ) -> Result<Bet, LedgerError> {
        let event = store.event(event_id)?;
        if !event.is_open() {
            return Err(LedgerError::EventClosed { event_id });
        }
        if amount.is_zero() || amount < self.minimum_bet {
            debug!(
                event_id = %event_id,
                amount = %amount,
                minimum = %self.minimum_bet,
                "Stake below minimum"
            );
            return Err(LedgerError::BelowMinimum {
                amount,
                minimum: self.minimum_bet,
            });
        }
        match store.bet(event_id, bettor) {
            Ok(_) => {
                return Err(LedgerError::DuplicateBet {
                    event_id,
                    bettor: bettor.clone(),
                })
            }
            Err(LedgerError::BetNotFound { .. }) => {}
            Err(e) => return Err(e),
        }

        let odds = self
            .odds
            .compute(event.pools(), outcome, amount)
            .ok_or(LedgerError::ArithmeticOverflow { context: "odds" })?;
        let pools = event
            .pools()
            .with_stake(outcome, amount)
            .ok_or(LedgerError::ArithmeticOverflow {
                context: "outcome pool",
            })?;
        let custody = event
            .custody()
            .credit(amount)
            .ok_or(LedgerError::ArithmeticOverflow { context: "custody" })?;

        let bet = Bet::new(event_id, bettor.clone(), outcome, amount, odds, now);
        // A bet whose payout cannot be computed could never be claimed.
        bet.payout().ok_or(LedgerError::ArithmeticOverflow {
            context: "potential payout",
        })?;

        store.put_bet(bet.clone(), pools, custody)?;
        info!(
            event_id = %event_id,
            bettor = %bettor,
            outcome = %outcome,
            amount = %amount,
            odds = %odds,
            calculator = self.odds.name(),
            "Bet placed"
        );
        Ok(bet)
    }
}
