//! Betledger - a pari-mutuel betting ledger.
//!
//! An administrator registers wagering events; participants stake funds on
//! one outcome of an open event and have their payout odds locked in at that
//! moment; once the administrator declares the winning outcome, each winner
//! claims `amount * odds / ODDS_BASE` from the event's pool while losing
//! stakes stay in it.
//!
//! Transport, authentication and value transfer belong to the caller: every
//! operation takes the caller's identity and any attached amount explicitly,
//! and payouts come back as receipts for the caller to honour.
//!
//! # Modules
//!
//! - [`domain`] - Events, bets, amounts, odds, and the ledger error taxonomy
//! - [`port`] - The [`port::LedgerStore`] persistence trait
//! - [`adapter`] - In-memory store and JSON snapshots
//! - [`application`] - Lifecycle, placement, settlement and audit engines,
//!   and the serialized [`application::Ledger`] service
//! - [`config`] - Configuration loading from TOML files
//! - [`error`] - Crate-level error types
//!
//! # Example
//!
//! ```
//! use betledger::application::{Ledger, LedgerSettings};
//! use betledger::domain::{Amount, Identity, Odds, OutcomeId};
//!
//! let owner = Identity::new("0xowner");
//! let bettor = Identity::new("0xbettor");
//! let ledger = Ledger::new(LedgerSettings {
//!     administrator: owner.clone(),
//!     minimum_bet: Amount::new(10),
//! });
//!
//! let event = ledger.add_event(&owner, "Soccer Match 1")?;
//! let bet = ledger.place_bet(&bettor, event, OutcomeId::new(1), Amount::new(10))?;
//! assert_eq!(bet.odds(), Odds::EVEN);
//!
//! ledger.settle_event(&owner, event, OutcomeId::new(1))?;
//! let payout = ledger.claim_payout(&bettor, event)?;
//! assert_eq!(payout.amount, Amount::new(10));
//! # Ok::<(), betledger::domain::LedgerError>(())
//! ```

pub mod adapter;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;
