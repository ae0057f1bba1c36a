//! Ledger domain types: events, bets, money, and odds.

mod bet;
pub mod error;
mod event;
mod id;
mod money;
pub mod odds;

pub use bet::{Bet, Payout};
pub use error::LedgerError;
pub use event::{Custody, Event, EventStatus, OutcomePools};
pub use id::{EventId, Identity, OutcomeId};
pub use money::Amount;
pub use odds::{compute_odds, Odds, OddsCalculator, ParimutuelOdds, ODDS_BASE};
