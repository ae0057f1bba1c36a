//! Independent re-derivation of an event's books from its bets and receipts.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::domain::{Amount, Custody, EventId, Identity, LedgerError, OutcomeId, OutcomePools};
use crate::port::LedgerStore;

/// A discrepancy between recorded and recomputed state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuditFinding {
    PoolMismatch {
        outcome: OutcomeId,
        recorded: Amount,
        recomputed: Amount,
    },
    ReceivedMismatch {
        recorded: Amount,
        recomputed: Amount,
    },
    PaidOutMismatch {
        recorded: Amount,
        recomputed: Amount,
    },
    ClaimWithoutReceipt {
        bettor: Identity,
    },
    ReceiptWithoutClaim {
        bettor: Identity,
    },
    DuplicateReceipt {
        bettor: Identity,
    },
    /// Custody cannot cover what unclaimed winners are still owed.
    Insolvent {
        balance: Amount,
        outstanding: Amount,
    },
    Overflow {
        context: &'static str,
    },
}

/// Result of auditing one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    pub event_id: EventId,
    pub custody: Custody,
    /// Sum of payouts owed to winners who have not yet claimed.
    pub outstanding: Amount,
    pub findings: Vec<AuditFinding>,
}

impl AuditReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Read-only auditor over a [`LedgerStore`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LedgerAudit;

impl LedgerAudit {
    pub fn audit_event<S: LedgerStore + ?Sized>(
        &self,
        store: &S,
        event_id: EventId,
    ) -> Result<AuditReport, LedgerError> {
        let event = store.event(event_id)?;
        let bets = store.bets(event_id)?;
        let payouts = store.payouts(event_id)?;
        let mut findings = Vec::new();

        let mut pools = OutcomePools::new();
        let mut received = Some(Amount::ZERO);
        for bet in &bets {
            match pools.with_stake(bet.outcome(), bet.amount()) {
                Some(next) => pools = next,
                None => findings.push(AuditFinding::Overflow { context: "pools" }),
            }
            received = received.and_then(|r| r.checked_add(bet.amount()));
        }
        let outcomes: BTreeSet<OutcomeId> = event
            .pools()
            .iter()
            .chain(pools.iter())
            .map(|(outcome, _)| outcome)
            .collect();
        for outcome in outcomes {
            let recorded = event.pools().get(outcome);
            let recomputed = pools.get(outcome);
            if recorded != recomputed {
                findings.push(AuditFinding::PoolMismatch {
                    outcome,
                    recorded,
                    recomputed,
                });
            }
        }
        match received {
            Some(recomputed) if recomputed != event.custody().received() => {
                findings.push(AuditFinding::ReceivedMismatch {
                    recorded: event.custody().received(),
                    recomputed,
                });
            }
            Some(_) => {}
            None => findings.push(AuditFinding::Overflow { context: "received" }),
        }

        let mut receipts: BTreeMap<&Identity, usize> = BTreeMap::new();
        let mut paid_out = Some(Amount::ZERO);
        for payout in payouts {
            *receipts.entry(&payout.bettor).or_default() += 1;
            paid_out = paid_out.and_then(|p| p.checked_add(payout.amount));
        }
        match paid_out {
            Some(recomputed) if recomputed != event.custody().paid_out() => {
                findings.push(AuditFinding::PaidOutMismatch {
                    recorded: event.custody().paid_out(),
                    recomputed,
                });
            }
            Some(_) => {}
            None => findings.push(AuditFinding::Overflow { context: "paid out" }),
        }
        for (bettor, count) in &receipts {
            if *count > 1 {
                findings.push(AuditFinding::DuplicateReceipt {
                    bettor: (*bettor).clone(),
                });
            }
            let claimed = bets
                .iter()
                .any(|bet| bet.bettor() == *bettor && bet.is_claimed());
            if !claimed {
                findings.push(AuditFinding::ReceiptWithoutClaim {
                    bettor: (*bettor).clone(),
                });
            }
        }

        let mut outstanding = Some(Amount::ZERO);
        for bet in &bets {
            if bet.is_claimed() && !receipts.contains_key(bet.bettor()) {
                findings.push(AuditFinding::ClaimWithoutReceipt {
                    bettor: bet.bettor().clone(),
                });
            }
            if !bet.is_claimed() && event.winning_outcome() == Some(bet.outcome()) {
                outstanding = outstanding
                    .zip(bet.payout())
                    .and_then(|(total, owed)| total.checked_add(owed));
            }
        }
        let outstanding = match outstanding {
            Some(outstanding) => outstanding,
            None => {
                findings.push(AuditFinding::Overflow {
                    context: "outstanding",
                });
                Amount::ZERO
            }
        };
        let balance = event.custody().balance();
        if outstanding > balance {
            findings.push(AuditFinding::Insolvent {
                balance,
                outstanding,
            });
        }

        Ok(AuditReport {
            event_id,
            custody: event.custody(),
            outstanding,
            findings,
        })
    }
}
