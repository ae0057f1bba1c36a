//! Event lifecycle: creation and the one-way move to `Settled`.
//!
//! Every transition is administrator-only. The caller is checked before the
//! store is touched, so an unauthorized call cannot even learn whether an
//! event exists.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::domain::{EventId, Identity, LedgerError, OutcomeId};
use crate::port::LedgerStore;

/// Administrator-gated event transitions.
#[derive(Debug, Clone, Copy)]
pub struct EventLifecycle<'a> {
    administrator: &'a Identity,
}

impl<'a> EventLifecycle<'a> {
    #[must_use]
    pub const fn new(administrator: &'a Identity) -> Self {
        Self { administrator }
    }

    fn authorize(&self, caller: &Identity, action: &'static str) -> Result<(), LedgerError> {
        if caller != self.administrator {
            warn!(caller = %caller, action, "Rejected administrator action");
            return Err(LedgerError::Unauthorized {
                caller: caller.clone(),
                action,
            });
        }
        Ok(())
    }

    /// Create a new open event.
    pub fn add_event<S: LedgerStore + ?Sized>(
        &self,
        store: &mut S,
        caller: &Identity,
        name: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<EventId, LedgerError> {
        self.authorize(caller, "add events")?;
        let name = name.into();
        let event_id = store.create_event(name.clone(), now);
        info!(event_id = %event_id, name = %name, "Event created");
        Ok(event_id)
    }

    /// Declare the winning outcome and close the event for good.
    ///
    /// Fails with `AlreadySettled` if a winner was already declared, leaving
    /// the original winner in place.
    pub fn settle_event<S: LedgerStore + ?Sized>(
        &self,
        store: &mut S,
        caller: &Identity,
        event_id: EventId,
        winning_outcome: OutcomeId,
        now: DateTime<Utc>,
    ) -> Result<(), LedgerError> {
        self.authorize(caller, "settle events")?;
        let event = store.event(event_id)?;
        if let Some(existing) = event.winning_outcome() {
            return Err(LedgerError::AlreadySettled {
                event_id,
                winning_outcome: existing,
            });
        }
        let winning_pool = event.pools().get(winning_outcome);
        store.set_winning_outcome(event_id, winning_outcome, now)?;
        info!(
            event_id = %event_id,
            winning_outcome = %winning_outcome,
            winning_pool = %winning_pool,
            "Event settled"
        );
        Ok(())
    }

    /// Lift a payout halt once the fault behind it has been investigated.
    pub fn resume_payouts<S: LedgerStore + ?Sized>(
        &self,
        store: &mut S,
        caller: &Identity,
        event_id: EventId,
    ) -> Result<(), LedgerError> {
        self.authorize(caller, "resume payouts")?;
        let reason = store.event(event_id)?.payout_halt().map(str::to_owned);
        store.set_payout_halt(event_id, None)?;
        if let Some(reason) = reason {
            warn!(event_id = %event_id, halted_for = %reason, "Payouts resumed");
        }
        Ok(())
    }
}
