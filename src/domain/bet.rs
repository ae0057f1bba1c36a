//! Bets and the payout receipts issued for them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{EventId, Identity, OutcomeId};
use super::money::Amount;
use super::odds::Odds;

/// One bettor's stake on one outcome of one event.
///
/// Outcome, amount and odds are fixed at placement; only the claimed flag
/// ever changes, and only from false to true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bet {
    event_id: EventId,
    bettor: Identity,
    outcome: OutcomeId,
    amount: Amount,
    odds: Odds,
    claimed: bool,
    placed_at: DateTime<Utc>,
}

impl Bet {
    /// Create a new, unclaimed bet.
    #[must_use]
    pub fn new(
        event_id: EventId,
        bettor: Identity,
        outcome: OutcomeId,
        amount: Amount,
        odds: Odds,
        placed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            event_id,
            bettor,
            outcome,
            amount,
            odds,
            claimed: false,
            placed_at,
        }
    }

    #[must_use]
    pub const fn event_id(&self) -> EventId {
        self.event_id
    }

    #[must_use]
    pub const fn bettor(&self) -> &Identity {
        &self.bettor
    }

    #[must_use]
    pub const fn outcome(&self) -> OutcomeId {
        self.outcome
    }

    #[must_use]
    pub const fn amount(&self) -> Amount {
        self.amount
    }

    /// Odds locked in when the bet was placed.
    #[must_use]
    pub const fn odds(&self) -> Odds {
        self.odds
    }

    #[must_use]
    pub const fn is_claimed(&self) -> bool {
        self.claimed
    }

    #[must_use]
    pub const fn placed_at(&self) -> DateTime<Utc> {
        self.placed_at
    }

    /// Amount owed if this bet wins, `None` on overflow.
    #[must_use]
    pub fn payout(&self) -> Option<Amount> {
        self.odds.payout(self.amount)
    }

    pub fn mark_claimed(&mut self) {
        self.claimed = true;
    }
}

/// Receipt for funds released to a winning bettor.
///
/// The dispatcher performs the actual transfer; the ledger keeps the receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    pub event_id: EventId,
    pub bettor: Identity,
    pub amount: Amount,
    pub odds: Odds,
    pub paid_at: DateTime<Utc>,
}
