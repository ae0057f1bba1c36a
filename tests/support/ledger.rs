use betledger::application::{Ledger, LedgerSettings};
use betledger::domain::{Amount, EventId, Identity};

/// 0.01 units at 18 decimals, the minimum bet used throughout the tests.
pub const MINIMUM_BET: u128 = 10_000_000_000_000_000;

pub fn owner() -> Identity {
    Identity::new("0xowner")
}

pub fn bettor(n: u32) -> Identity {
    Identity::new(format!("0xbettor{n}"))
}

pub fn min_bet() -> Amount {
    Amount::new(MINIMUM_BET)
}

pub fn settings() -> LedgerSettings {
    LedgerSettings {
        administrator: owner(),
        minimum_bet: min_bet(),
    }
}

pub fn ledger() -> Ledger {
    Ledger::new(settings())
}

/// A ledger with one open event, named as in the scenario it serves.
pub fn ledger_with_event(name: &str) -> (Ledger, EventId) {
    let ledger = ledger();
    let event = ledger
        .add_event(&owner(), name)
        .expect("owner can add events");
    (ledger, event)
}
