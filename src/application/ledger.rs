//! The ledger service: the boundary the call dispatcher talks to.
//!
//! Every operation takes the store lock for its whole duration, so
//! operations are serialized globally and no reader ever sees a half-applied
//! change. Caller identity and any attached funds are explicit arguments.

use std::path::Path;

use chrono::Utc;
use parking_lot::Mutex;

use super::audit::{AuditReport, LedgerAudit};
use super::lifecycle::EventLifecycle;
use super::placement::BetPlacement;
use super::settlement::Settlement;
use crate::adapter::store::{snapshot, MemoryStore};
use crate::domain::{
    Amount, Bet, Event, EventId, Identity, LedgerError, OddsCalculator, OutcomeId,
    ParimutuelOdds, Payout,
};
use crate::error::Result;
use crate::port::LedgerStore;

/// Construction-time ledger parameters, fixed for the ledger's lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerSettings {
    /// Identity allowed to create and settle events.
    pub administrator: Identity,
    /// Smallest accepted stake, in base units.
    pub minimum_bet: Amount,
}

/// Betting ledger over a [`LedgerStore`].
pub struct Ledger<S: LedgerStore = MemoryStore> {
    settings: LedgerSettings,
    odds: Box<dyn OddsCalculator>,
    store: Mutex<S>,
}

impl Ledger<MemoryStore> {
    /// Create an empty in-memory ledger.
    #[must_use]
    pub fn new(settings: LedgerSettings) -> Self {
        Self::from_store(settings, MemoryStore::new())
    }

    /// Restore a ledger from a snapshot written by [`Ledger::save_snapshot`].
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be read or is inconsistent.
    pub fn load_snapshot<P: AsRef<Path>>(settings: LedgerSettings, path: P) -> Result<Self> {
        Ok(Self::from_store(settings, snapshot::load(path)?))
    }

    /// Write the current state to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub fn save_snapshot<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        snapshot::save(&self.store.lock(), path)
    }
}

impl<S: LedgerStore> Ledger<S> {
    /// Create a ledger over an existing store with pari-mutuel odds.
    pub fn from_store(settings: LedgerSettings, store: S) -> Self {
        Self {
            settings,
            odds: Box::new(ParimutuelOdds),
            store: Mutex::new(store),
        }
    }

    /// Replace the odds formula used for new bets.
    #[must_use]
    pub fn with_odds_calculator(mut self, odds: impl OddsCalculator + 'static) -> Self {
        self.odds = Box::new(odds);
        self
    }

    #[must_use]
    pub const fn settings(&self) -> &LedgerSettings {
        &self.settings
    }

    /// Create an event. Administrator only.
    pub fn add_event(
        &self,
        caller: &Identity,
        name: impl Into<String>,
    ) -> std::result::Result<EventId, LedgerError> {
        let mut store = self.store.lock();
        EventLifecycle::new(&self.settings.administrator).add_event(
            &mut *store,
            caller,
            name,
            Utc::now(),
        )
    }

    /// Stake `attached` on `outcome` as `caller`.
    pub fn place_bet(
        &self,
        caller: &Identity,
        event_id: EventId,
        outcome: OutcomeId,
        attached: Amount,
    ) -> std::result::Result<Bet, LedgerError> {
        let mut store = self.store.lock();
        BetPlacement::new(self.settings.minimum_bet, self.odds.as_ref()).place_bet(
            &mut *store,
            caller,
            event_id,
            outcome,
            attached,
            Utc::now(),
        )
    }

    /// Declare the winning outcome. Administrator only.
    pub fn settle_event(
        &self,
        caller: &Identity,
        event_id: EventId,
        winning_outcome: OutcomeId,
    ) -> std::result::Result<(), LedgerError> {
        let mut store = self.store.lock();
        EventLifecycle::new(&self.settings.administrator).settle_event(
            &mut *store,
            caller,
            event_id,
            winning_outcome,
            Utc::now(),
        )
    }

    /// Claim `caller`'s own payout on `event_id`.
    pub fn claim_payout(
        &self,
        caller: &Identity,
        event_id: EventId,
    ) -> std::result::Result<Payout, LedgerError> {
        let mut store = self.store.lock();
        Settlement.claim_payout(&mut *store, caller, event_id, Utc::now())
    }

    /// Lift a payout halt. Administrator only.
    pub fn resume_payouts(
        &self,
        caller: &Identity,
        event_id: EventId,
    ) -> std::result::Result<(), LedgerError> {
        let mut store = self.store.lock();
        EventLifecycle::new(&self.settings.administrator).resume_payouts(
            &mut *store,
            caller,
            event_id,
        )
    }

    pub fn get_event_data(&self, event_id: EventId) -> std::result::Result<Event, LedgerError> {
        self.store.lock().event(event_id).cloned()
    }

    pub fn get_bet_data(
        &self,
        event_id: EventId,
        bettor: &Identity,
    ) -> std::result::Result<Bet, LedgerError> {
        self.store.lock().bet(event_id, bettor).cloned()
    }

    pub fn bets_for_event(&self, event_id: EventId) -> std::result::Result<Vec<Bet>, LedgerError> {
        let store = self.store.lock();
        Ok(store.bets(event_id)?.into_iter().cloned().collect())
    }

    pub fn payouts_for_event(
        &self,
        event_id: EventId,
    ) -> std::result::Result<Vec<Payout>, LedgerError> {
        Ok(self.store.lock().payouts(event_id)?.to_vec())
    }

    #[must_use]
    pub fn event_count(&self) -> u64 {
        self.store.lock().event_count()
    }

    /// Re-derive an event's books and report any discrepancy.
    pub fn audit_event(&self, event_id: EventId) -> std::result::Result<AuditReport, LedgerError> {
        LedgerAudit.audit_event(&*self.store.lock(), event_id)
    }

    /// Consume the ledger and return its store.
    pub fn into_store(self) -> S {
        self.store.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Odds, OutcomePools};

    fn settings() -> LedgerSettings {
        LedgerSettings {
            administrator: Identity::new("0xowner"),
            minimum_bet: Amount::new(10),
        }
    }

    #[test]
    fn full_round_trip_through_facade() {
        let ledger = Ledger::new(settings());
        let admin = Identity::new("0xowner");
        let bettor = Identity::new("0xbettor");

        let event = ledger.add_event(&admin, "Soccer Match 4").unwrap();
        ledger
            .place_bet(&bettor, event, OutcomeId::new(1), Amount::new(10))
            .unwrap();
        ledger.settle_event(&admin, event, OutcomeId::new(1)).unwrap();

        assert!(ledger.get_event_data(event).unwrap().is_settled());
        let payout = ledger.claim_payout(&bettor, event).unwrap();
        assert_eq!(payout.amount, Amount::new(10));
        assert_eq!(ledger.payouts_for_event(event).unwrap(), vec![payout]);
        assert!(ledger.audit_event(event).unwrap().is_clean());
    }

    struct Flat(u128);

    impl OddsCalculator for Flat {
        fn name(&self) -> &'static str {
            "flat"
        }

        fn compute(&self, _: &OutcomePools, _: OutcomeId, _: Amount) -> Option<Odds> {
            Some(Odds::new(self.0))
        }
    }

    #[test]
    fn custom_odds_calculator_is_used() {
        let ledger = Ledger::new(settings()).with_odds_calculator(Flat(300));
        let admin = Identity::new("0xowner");
        let event = ledger.add_event(&admin, "Derby").unwrap();

        let bet = ledger
            .place_bet(&Identity::new("0xb"), event, OutcomeId::new(1), Amount::new(10))
            .unwrap();
        assert_eq!(bet.odds(), Odds::new(300));
    }

    #[test]
    fn into_store_returns_state() {
        let ledger = Ledger::new(settings());
        ledger.add_event(&Identity::new("0xowner"), "Derby").unwrap();
        assert_eq!(ledger.into_store().event_count(), 1);
    }
}
