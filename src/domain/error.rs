//! Errors returned by ledger operations.
//!
//! Every failing operation leaves the ledger exactly as it found it, with
//! one exception: [`LedgerError::InsufficientPool`] also halts payouts on
//! the affected event until the administrator resumes them.
//!
//! # Examples
//!
//! ```
//! use betledger::domain::error::LedgerError;
//! use betledger::domain::{Amount, EventId, Identity};
//!
//! let err = LedgerError::BelowMinimum {
//!     amount: Amount::new(1),
//!     minimum: Amount::new(10),
//! };
//! assert!(!err.is_integrity_fault());
//!
//! let fault = LedgerError::InsufficientPool {
//!     event_id: EventId::new(0),
//!     bettor: Identity::new("0xbettor"),
//!     payout: Amount::new(150),
//!     balance: Amount::new(100),
//! };
//! assert!(fault.is_integrity_fault());
//! ```

use thiserror::Error;

use super::id::{EventId, Identity, OutcomeId};
use super::money::Amount;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Administrator-only action attempted by someone else.
    #[error("{caller} is not authorized to {action}")]
    Unauthorized {
        caller: Identity,
        action: &'static str,
    },

    #[error("{event_id} not found")]
    EventNotFound { event_id: EventId },

    #[error("no bet by {bettor} on {event_id}")]
    BetNotFound { event_id: EventId, bettor: Identity },

    /// Bet placed on an event that no longer accepts bets.
    #[error("{event_id} is closed to new bets")]
    EventClosed { event_id: EventId },

    #[error("{event_id} has not been settled")]
    NotSettled { event_id: EventId },

    #[error("{event_id} already settled on outcome {winning_outcome}")]
    AlreadySettled {
        event_id: EventId,
        winning_outcome: OutcomeId,
    },

    #[error("stake {amount} is below the minimum bet {minimum}")]
    BelowMinimum { amount: Amount, minimum: Amount },

    #[error("{bettor} already has a bet on {event_id}")]
    DuplicateBet { event_id: EventId, bettor: Identity },

    #[error("bet on outcome {outcome} lost; {event_id} settled on {winning_outcome}")]
    NotAWinner {
        event_id: EventId,
        outcome: OutcomeId,
        winning_outcome: OutcomeId,
    },

    #[error("payout for {bettor} on {event_id} already claimed")]
    AlreadyClaimed { event_id: EventId, bettor: Identity },

    /// Custody cannot cover an entitled payout. Integrity fault.
    #[error("custody for {event_id} holds {balance}, cannot pay {payout} to {bettor}")]
    InsufficientPool {
        event_id: EventId,
        bettor: Identity,
        payout: Amount,
        balance: Amount,
    },

    /// Payouts were halted after an integrity fault.
    #[error("payouts on {event_id} are halted: {reason}")]
    PayoutsHalted { event_id: EventId, reason: String },

    #[error("arithmetic overflow while computing {context}")]
    ArithmeticOverflow { context: &'static str },
}

impl LedgerError {
    /// True for faults that mean the ledger's bookkeeping is broken, as
    /// opposed to a request the caller can correct.
    #[must_use]
    pub const fn is_integrity_fault(&self) -> bool {
        matches!(self, Self::InsufficientPool { .. })
    }

    /// True for the "unknown event or bet" family.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::EventNotFound { .. } | Self::BetNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_covers_events_and_bets() {
        let event = LedgerError::EventNotFound {
            event_id: EventId::new(9),
        };
        let bet = LedgerError::BetNotFound {
            event_id: EventId::new(9),
            bettor: Identity::new("0xb"),
        };
        assert!(event.is_not_found());
        assert!(bet.is_not_found());
        assert!(!LedgerError::ArithmeticOverflow { context: "odds" }.is_not_found());
    }

    #[test]
    fn display_includes_context() {
        let err = LedgerError::Unauthorized {
            caller: Identity::new("0xmallory"),
            action: "settle events",
        };
        assert_eq!(err.to_string(), "0xmallory is not authorized to settle events");
    }

    #[test]
    fn event_messages_name_the_event_once() {
        let missing = LedgerError::EventNotFound {
            event_id: EventId::new(3),
        };
        let no_bet = LedgerError::BetNotFound {
            event_id: EventId::new(3),
            bettor: Identity::new("0xb"),
        };
        assert_eq!(missing.to_string(), "event-3 not found");
        assert_eq!(no_bet.to_string(), "no bet by 0xb on event-3");
    }
}
