//! Persistence port for the ledger's events and bets.

use chrono::{DateTime, Utc};

use crate::domain::{
    Bet, Custody, Event, EventId, Identity, LedgerError, OutcomeId, OutcomePools, Payout,
};

/// Storage for events, bets, and payout receipts.
///
/// A pure accessor layer: the only failures are unknown ids. Business rules
/// (authorization, lifecycle, limits, arithmetic) belong to the engines in
/// [`crate::application`], which validate fully before the first write so a
/// rejected operation never reaches the store.
///
/// Records are never deleted. Settlement and claims mutate an event's status
/// and custody and a bet's claimed flag in place; everything else only grows.
pub trait LedgerStore: Send {
    /// Create an open event with empty pools under the next sequential id.
    fn create_event(&mut self, name: String, created_at: DateTime<Utc>) -> EventId;

    /// Get an event by ID.
    fn event(&self, event_id: EventId) -> Result<&Event, LedgerError>;

    /// Number of events ever created.
    fn event_count(&self) -> u64;

    /// Get a bet by event and bettor.
    fn bet(&self, event_id: EventId, bettor: &Identity) -> Result<&Bet, LedgerError>;

    /// All bets on an event, in bettor order.
    fn bets(&self, event_id: EventId) -> Result<Vec<&Bet>, LedgerError>;

    /// All payout receipts issued for an event, in issue order.
    fn payouts(&self, event_id: EventId) -> Result<&[Payout], LedgerError>;

    /// Record a bet together with the pools and custody it produced.
    fn put_bet(
        &mut self,
        bet: Bet,
        pools: OutcomePools,
        custody: Custody,
    ) -> Result<(), LedgerError>;

    /// Settle an event on `outcome`.
    fn set_winning_outcome(
        &mut self,
        event_id: EventId,
        outcome: OutcomeId,
        settled_at: DateTime<Utc>,
    ) -> Result<(), LedgerError>;

    /// Flag a bet as paid and append its receipt, debiting custody.
    fn mark_claimed(&mut self, payout: Payout, custody: Custody) -> Result<(), LedgerError>;

    /// Halt (`Some(reason)`) or resume (`None`) payouts on an event.
    fn set_payout_halt(
        &mut self,
        event_id: EventId,
        reason: Option<String>,
    ) -> Result<(), LedgerError>;
}
