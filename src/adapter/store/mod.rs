//! Ledger store adapters.

mod memory;
pub mod snapshot;

pub use memory::MemoryStore;
