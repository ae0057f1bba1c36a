//! Winner payouts, claimed one bettor at a time.
//!
//! Settlement itself only records the winner (see
//! [`EventLifecycle::settle_event`](super::lifecycle::EventLifecycle::settle_event));
//! each winner then pulls their payout here, independently of the others.
//! Losing stakes are never paid and simply stay in custody.

use chrono::{DateTime, Utc};
use tracing::{error, info};

use crate::domain::{EventId, Identity, LedgerError, Payout};
use crate::port::LedgerStore;

/// Pays winners from their event's custody.
#[derive(Debug, Clone, Copy, Default)]
pub struct Settlement;

impl Settlement {
    /// Release `bettor`'s payout on `event_id`.
    ///
    /// The payout is `amount * odds / ODDS_BASE` at the odds locked when the
    /// bet was placed. If custody cannot cover it, the claim fails with
    /// `InsufficientPool` and payouts on the event are halted.
    pub fn claim_payout<S: LedgerStore + ?Sized>(
        &self,
        store: &mut S,
        bettor: &Identity,
        event_id: EventId,
        now: DateTime<Utc>,
    ) -> Result<Payout, LedgerError> {
        let event = store.event(event_id)?;
        let bet = store.bet(event_id, bettor)?;
        let winning_outcome = event
            .winning_outcome()
            .ok_or(LedgerError::NotSettled { event_id })?;
        if bet.outcome() != winning_outcome {
            return Err(LedgerError::NotAWinner {
                event_id,
                outcome: bet.outcome(),
                winning_outcome,
            });
        }
        if bet.is_claimed() {
            return Err(LedgerError::AlreadyClaimed {
                event_id,
                bettor: bettor.clone(),
            });
        }
        if let Some(reason) = event.payout_halt() {
            return Err(LedgerError::PayoutsHalted {
                event_id,
                reason: reason.to_owned(),
            });
        }

        let odds = bet.odds();
        let amount = bet
            .payout()
            .ok_or(LedgerError::ArithmeticOverflow { context: "payout" })?;
        let Some(custody) = event.custody().debit(amount) else {
            let balance = event.custody().balance();
            error!(
                event_id = %event_id,
                bettor = %bettor,
                payout = %amount,
                balance = %balance,
                "Custody cannot cover entitled payout, halting payouts"
            );
            store.set_payout_halt(
                event_id,
                Some(format!("custody {balance} short of payout {amount} to {bettor}")),
            )?;
            return Err(LedgerError::InsufficientPool {
                event_id,
                bettor: bettor.clone(),
                payout: amount,
                balance,
            });
        };

        let payout = Payout {
            event_id,
            bettor: bettor.clone(),
            amount,
            odds,
            paid_at: now,
        };
        store.mark_claimed(payout.clone(), custody)?;
        info!(
            event_id = %event_id,
            bettor = %bettor,
            payout = %amount,
            odds = %odds,
            remaining = %custody.balance(),
            "Payout released"
        );
        Ok(payout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::store::MemoryStore;
    use crate::application::placement::BetPlacement;
    use crate::domain::{Amount, OutcomeId, ParimutuelOdds};

    fn id(name: &str) -> Identity {
        Identity::new(name)
    }

    fn stake(store: &mut MemoryStore, event_id: EventId, who: &str, outcome: u32, amount: u128) {
        BetPlacement::new(Amount::new(1), &ParimutuelOdds)
            .place_bet(
                store,
                &id(who),
                event_id,
                OutcomeId::new(outcome),
                Amount::new(amount),
                Utc::now(),
            )
            .unwrap();
    }

    fn settle(store: &mut MemoryStore, event_id: EventId, outcome: u32) {
        store
            .set_winning_outcome(event_id, OutcomeId::new(outcome), Utc::now())
            .unwrap();
    }

    fn claim(store: &mut MemoryStore, event_id: EventId, who: &str) -> Result<Payout, LedgerError> {
        Settlement.claim_payout(store, &id(who), event_id, Utc::now())
    }

    #[test]
    fn winner_is_paid_at_locked_odds() {
        let mut store = MemoryStore::new();
        let event = store.create_event("Final".into(), Utc::now());
        stake(&mut store, event, "0xa", 1, 100);
        stake(&mut store, event, "0xb", 2, 100);
        settle(&mut store, event, 2);

        let payout = claim(&mut store, event, "0xb").unwrap();

        assert_eq!(payout.amount, Amount::new(200));
        assert_eq!(payout.odds.value(), 200);
        assert!(store.bet(event, &id("0xb")).unwrap().is_claimed());
        assert_eq!(store.event(event).unwrap().custody().balance(), Amount::ZERO);
    }

    #[test]
    fn second_claim_is_already_claimed() {
        let mut store = MemoryStore::new();
        let event = store.create_event("Final".into(), Utc::now());
        stake(&mut store, event, "0xa", 1, 100);
        settle(&mut store, event, 1);

        claim(&mut store, event, "0xa").unwrap();
        let before = store.clone();
        let err = claim(&mut store, event, "0xa").unwrap_err();

        assert!(matches!(err, LedgerError::AlreadyClaimed { .. }));
        assert_eq!(store, before);
        assert_eq!(store.payouts(event).unwrap().len(), 1);
    }

    #[test]
    fn loser_is_not_a_winner() {
        let mut store = MemoryStore::new();
        let event = store.create_event("Final".into(), Utc::now());
        stake(&mut store, event, "0xa", 1, 100);
        stake(&mut store, event, "0xb", 2, 100);
        settle(&mut store, event, 1);
        let before = store.clone();

        let err = claim(&mut store, event, "0xb").unwrap_err();

        assert_eq!(
            err,
            LedgerError::NotAWinner {
                event_id: event,
                outcome: OutcomeId::new(2),
                winning_outcome: OutcomeId::new(1),
            }
        );
        assert_eq!(store, before);
    }

    #[test]
    fn claim_before_settlement_is_not_settled() {
        let mut store = MemoryStore::new();
        let event = store.create_event("Final".into(), Utc::now());
        stake(&mut store, event, "0xa", 1, 100);

        let err = claim(&mut store, event, "0xa").unwrap_err();
        assert_eq!(err, LedgerError::NotSettled { event_id: event });
    }

    #[test]
    fn claim_without_bet_is_not_found() {
        let mut store = MemoryStore::new();
        let event = store.create_event("Final".into(), Utc::now());
        settle(&mut store, event, 1);

        let err = claim(&mut store, event, "0xnobody").unwrap_err();
        assert!(matches!(err, LedgerError::BetNotFound { .. }));
    }

    #[test]
    fn shortfall_fails_and_halts_event() {
        // 0xa: 100 on 1 at 1.00x; 0xb: 100 on 2 at 2.00x; 0xc: 100 on 2 at 1.50x.
        // Outcome 2 owes 200 + 150 = 350 against 300 in custody.
        let mut store = MemoryStore::new();
        let event = store.create_event("Final".into(), Utc::now());
        stake(&mut store, event, "0xa", 1, 100);
        stake(&mut store, event, "0xb", 2, 100);
        stake(&mut store, event, "0xc", 2, 100);
        settle(&mut store, event, 2);

        claim(&mut store, event, "0xb").unwrap();
        let err = claim(&mut store, event, "0xc").unwrap_err();

        assert!(err.is_integrity_fault());
        assert_eq!(
            err,
            LedgerError::InsufficientPool {
                event_id: event,
                bettor: id("0xc"),
                payout: Amount::new(150),
                balance: Amount::new(100),
            }
        );
        assert!(!store.bet(event, &id("0xc")).unwrap().is_claimed());
        assert_eq!(store.event(event).unwrap().custody().balance(), Amount::new(100));
        assert!(store.event(event).unwrap().payout_halt().is_some());

        let err = claim(&mut store, event, "0xc").unwrap_err();
        assert!(matches!(err, LedgerError::PayoutsHalted { .. }));
    }
}
