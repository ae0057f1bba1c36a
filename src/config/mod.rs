//! Configuration loading from TOML files.

mod ledger;
mod logging;
mod settings;

pub use ledger::{LedgerConfig, MAX_UNIT_DECIMALS};
pub use logging::LoggingConfig;
pub use settings::{Config, ADMINISTRATOR_ENV};
