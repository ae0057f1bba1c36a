//! Wagering events, their outcome pools, and the funds held against them.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{EventId, OutcomeId};
use super::money::Amount;

/// Lifecycle state of an event.
///
/// The winning outcome lives inside the `Settled` variant, so an open event
/// cannot carry one and a settled event always does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum EventStatus {
    /// Accepting bets.
    Open,
    /// Terminal. Bets are closed and winners may claim.
    Settled {
        winning_outcome: OutcomeId,
        settled_at: DateTime<Utc>,
    },
}

impl EventStatus {
    /// Returns true if the event accepts bets.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }

    /// Returns true if the event has been settled.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        matches!(self, Self::Settled { .. })
    }

    #[must_use]
    pub const fn winning_outcome(&self) -> Option<OutcomeId> {
        match self {
            Self::Open => None,
            Self::Settled {
                winning_outcome, ..
            } => Some(*winning_outcome),
        }
    }
}

/// Total stake per outcome.
///
/// Outcomes that never received a stake are absent and read as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomePools(BTreeMap<OutcomeId, Amount>);

impl OutcomePools {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stake backing a single outcome.
    #[must_use]
    pub fn get(&self, outcome: OutcomeId) -> Amount {
        self.0.get(&outcome).copied().unwrap_or_default()
    }

    /// Stake across all outcomes, `None` on overflow.
    #[must_use]
    pub fn total(&self) -> Option<Amount> {
        self.0
            .values()
            .try_fold(Amount::ZERO, |acc, amount| acc.checked_add(*amount))
    }

    /// Pools as they would stand after `stake` is added to `outcome`.
    ///
    /// Leaves `self` untouched so callers can validate before committing.
    #[must_use]
    pub fn with_stake(&self, outcome: OutcomeId, stake: Amount) -> Option<Self> {
        let updated = self.get(outcome).checked_add(stake)?;
        let mut pools = self.clone();
        pools.0.insert(outcome, updated);
        Some(pools)
    }

    pub fn iter(&self) -> impl Iterator<Item = (OutcomeId, Amount)> + '_ {
        self.0.iter().map(|(outcome, amount)| (*outcome, *amount))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(OutcomeId, Amount)> for OutcomePools {
    fn from_iter<I: IntoIterator<Item = (OutcomeId, Amount)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Funds the ledger holds for one event.
///
/// `received` grows only with accepted stakes and `paid_out` only with
/// winner payouts, so `paid_out <= received` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Custody {
    received: Amount,
    paid_out: Amount,
}

impl Custody {
    #[must_use]
    pub const fn new(received: Amount, paid_out: Amount) -> Self {
        Self { received, paid_out }
    }

    /// Total stake ever taken into custody.
    #[must_use]
    pub const fn received(&self) -> Amount {
        self.received
    }

    /// Total released to winners.
    #[must_use]
    pub const fn paid_out(&self) -> Amount {
        self.paid_out
    }

    /// Funds still held.
    #[must_use]
    pub fn balance(&self) -> Amount {
        Amount::new(
            self.received
                .base_units()
                .saturating_sub(self.paid_out.base_units()),
        )
    }

    /// Custody after taking in a stake, `None` on overflow.
    #[must_use]
    pub fn credit(&self, amount: Amount) -> Option<Self> {
        Some(Self {
            received: self.received.checked_add(amount)?,
            paid_out: self.paid_out,
        })
    }

    /// Custody after releasing a payout, `None` if the balance cannot cover it.
    #[must_use]
    pub fn debit(&self, amount: Amount) -> Option<Self> {
        if amount > self.balance() {
            return None;
        }
        Some(Self {
            received: self.received,
            paid_out: self.paid_out.checked_add(amount)?,
        })
    }
}

/// A wagering event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    id: EventId,
    name: String,
    status: EventStatus,
    pools: OutcomePools,
    custody: Custody,
    created_at: DateTime<Utc>,
    /// Set when a payout found custody short; blocks further payouts.
    payout_halt: Option<String>,
}

impl Event {
    /// Create a new open event with empty pools.
    pub fn new(id: EventId, name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: name.into(),
            status: EventStatus::Open,
            pools: OutcomePools::new(),
            custody: Custody::default(),
            created_at,
            payout_halt: None,
        }
    }

    #[must_use]
    pub const fn id(&self) -> EventId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn status(&self) -> &EventStatus {
        &self.status
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.status.is_open()
    }

    #[must_use]
    pub const fn is_settled(&self) -> bool {
        self.status.is_settled()
    }

    #[must_use]
    pub const fn winning_outcome(&self) -> Option<OutcomeId> {
        self.status.winning_outcome()
    }

    #[must_use]
    pub const fn pools(&self) -> &OutcomePools {
        &self.pools
    }

    #[must_use]
    pub const fn custody(&self) -> Custody {
        self.custody
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Reason payouts are halted, if they are.
    #[must_use]
    pub fn payout_halt(&self) -> Option<&str> {
        self.payout_halt.as_deref()
    }

    /// Replace pools and custody after a stake has been accepted.
    pub fn record_stake(&mut self, pools: OutcomePools, custody: Custody) {
        self.pools = pools;
        self.custody = custody;
    }

    /// Replace custody after a payout has been released.
    pub fn record_payout(&mut self, custody: Custody) {
        self.custody = custody;
    }

    /// Move to the terminal `Settled` state.
    pub fn settle(&mut self, winning_outcome: OutcomeId, settled_at: DateTime<Utc>) {
        self.status = EventStatus::Settled {
            winning_outcome,
            settled_at,
        };
    }

    pub fn halt_payouts(&mut self, reason: impl Into<String>) {
        self.payout_halt = Some(reason.into());
    }

    pub fn resume_payouts(&mut self) {
        self.payout_halt = None;
    }
}
