//! Application services (use cases).
//!
//! Each engine takes the store explicitly and validates completely before
//! its first write. [`Ledger`] wraps them behind a lock and is what callers
//! normally use.

pub mod audit;
pub mod ledger;
pub mod lifecycle;
pub mod placement;
pub mod settlement;

pub use audit::{AuditFinding, AuditReport, LedgerAudit};
pub use ledger::{Ledger, LedgerSettings};
pub use lifecycle::EventLifecycle;
pub use placement::BetPlacement;
pub use settlement::Settlement;
