//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! # Available Ports
//!
//! - [`LedgerStore`] - Persistence for events, bets, and payout receipts
//!
//! The odds formula is an extension point too, but it is a pure domain
//! calculation and lives at [`crate::domain::OddsCalculator`].

mod store;

pub use store::LedgerStore;
