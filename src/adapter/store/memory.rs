//! In-memory arena store.
//!
//! Events live in a `Vec` indexed by their sequential id; each slot owns
//! the event's bets (keyed by bettor) and its payout receipts. The whole
//! store serializes with serde so it can be snapshotted to disk.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    Bet, Custody, Event, EventId, Identity, LedgerError, OutcomeId, OutcomePools, Payout,
};
use crate::port::LedgerStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct EventSlot {
    event: Event,
    bets: BTreeMap<Identity, Bet>,
    payouts: Vec<Payout>,
}

/// Ledger store backed by process memory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryStore {
    events: Vec<EventSlot>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, event_id: EventId) -> Result<&EventSlot, LedgerError> {
        usize::try_from(event_id.value())
            .ok()
            .and_then(|index| self.events.get(index))
            .ok_or(LedgerError::EventNotFound { event_id })
    }

    fn slot_mut(&mut self, event_id: EventId) -> Result<&mut EventSlot, LedgerError> {
        usize::try_from(event_id.value())
            .ok()
            .and_then(|index| self.events.get_mut(index))
            .ok_or(LedgerError::EventNotFound { event_id })
    }

    /// Check the arena's structural invariants after deserialization.
    ///
    /// Every event must sit at the index of its id, and every bet and
    /// receipt must belong to the event that holds it.
    pub fn check_structure(&self) -> Result<(), String> {
        for (index, slot) in self.events.iter().enumerate() {
            let id = slot.event.id();
            if usize::try_from(id.value()).ok() != Some(index) {
                return Err(format!("{id} stored at index {index}"));
            }
            for (bettor, bet) in &slot.bets {
                if bet.event_id() != id || bet.bettor() != bettor {
                    return Err(format!("bet by {} misfiled under {id}", bet.bettor()));
                }
            }
            if let Some(payout) = slot.payouts.iter().find(|p| p.event_id != id) {
                return Err(format!("payout to {} misfiled under {id}", payout.bettor));
            }
        }
        Ok(())
    }
}

impl LedgerStore for MemoryStore {
    fn create_event(&mut self, name: String, created_at: DateTime<Utc>) -> EventId {
        let id = EventId::new(self.events.len() as u64);
        self.events.push(EventSlot {
            event: Event::new(id, name, created_at),
            bets: BTreeMap::new(),
            payouts: Vec::new(),
        });
        id
    }

    fn event(&self, event_id: EventId) -> Result<&Event, LedgerError> {
        self.slot(event_id).map(|slot| &slot.event)
    }

    fn event_count(&self) -> u64 {
        self.events.len() as u64
    }

    fn bet(&self, event_id: EventId, bettor: &Identity) -> Result<&Bet, LedgerError> {
        self.slot(event_id)?
            .bets
            .get(bettor)
            .ok_or_else(|| LedgerError::BetNotFound {
                event_id,
                bettor: bettor.clone(),
            })
    }

    fn bets(&self, event_id: EventId) -> Result<Vec<&Bet>, LedgerError> {
        Ok(self.slot(event_id)?.bets.values().collect())
    }

    fn payouts(&self, event_id: EventId) -> Result<&[Payout], LedgerError> {
        Ok(&self.slot(event_id)?.payouts)
    }

    fn put_bet(
        &mut self,
        bet: Bet,
        pools: OutcomePools,
        custody: Custody,
    ) -> Result<(), LedgerError> {
        let slot = self.slot_mut(bet.event_id())?;
        slot.event.record_stake(pools, custody);
        slot.bets.insert(bet.bettor().clone(), bet);
        Ok(())
    }

    fn set_winning_outcome(
        &mut self,
        event_id: EventId,
        outcome: OutcomeId,
        settled_at: DateTime<Utc>,
    ) -> Result<(), LedgerError> {
        self.slot_mut(event_id)?.event.settle(outcome, settled_at);
        Ok(())
    }

    fn mark_claimed(&mut self, payout: Payout, custody: Custody) -> Result<(), LedgerError> {
        let event_id = payout.event_id;
        let slot = self.slot_mut(event_id)?;
        let bet = slot
            .bets
            .get_mut(&payout.bettor)
            .ok_or_else(|| LedgerError::BetNotFound {
                event_id,
                bettor: payout.bettor.clone(),
            })?;
        bet.mark_claimed();
        slot.event.record_payout(custody);
        slot.payouts.push(payout);
        Ok(())
    }

    fn set_payout_halt(
        &mut self,
        event_id: EventId,
        reason: Option<String>,
    ) -> Result<(), LedgerError> {
        let event = &mut self.slot_mut(event_id)?.event;
        match reason {
            Some(reason) => event.halt_payouts(reason),
            None => event.resume_payouts(),
        }
        Ok(())
    }
}
