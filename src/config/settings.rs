//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all ledger settings.
//! Configuration is loaded from a TOML file; the administrator identity may
//! be overridden with the `BETLEDGER_ADMINISTRATOR` environment variable.
//!
//! # Example
//!
//! ```no_run
//! use betledger::config::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("betledger.toml")?;
//!     config.init_logging();
//!     let ledger = config.open_ledger()?;
//!     println!("{} events", ledger.event_count());
//!     Ok(())
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use super::ledger::LedgerConfig;
use super::logging::LoggingConfig;
use crate::application::Ledger;
use crate::error::{ConfigError, Result};

/// Environment variable overriding `ledger.administrator`.
pub const ADMINISTRATOR_ENV: &str = "BETLEDGER_ADMINISTRATOR";

/// Main ledger configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Where ledger snapshots are read from and written to.
    ///
    /// When unset the ledger lives in memory only.
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,

    /// Ledger construction parameters.
    #[serde(default)]
    pub ledger: LedgerConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.override_administrator(std::env::var(ADMINISTRATOR_ENV).ok());
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is
    /// malformed, or validation fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Replace `ledger.administrator` unless the override is unset or blank.
    fn override_administrator(&mut self, value: Option<String>) {
        if let Some(administrator) = value.filter(|v| !v.trim().is_empty()) {
            self.ledger.administrator = administrator;
        }
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        self.ledger.settings()?;
        match self.logging.format.as_str() {
            "pretty" | "json" => {}
            other => {
                return Err(ConfigError::InvalidValue {
                    field: "logging.format",
                    reason: format!("expected \"pretty\" or \"json\", got {other:?}"),
                }
                .into())
            }
        }
        if let Some(path) = &self.snapshot_path {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "snapshot_path",
                    reason: "must not be empty".to_string(),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Initialize logging based on configuration.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Build a ledger from this configuration.
    ///
    /// Restores the snapshot at `snapshot_path` when one exists, otherwise
    /// starts empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid or an existing snapshot
    /// cannot be loaded.
    pub fn open_ledger(&self) -> Result<Ledger> {
        let settings = self.ledger.settings()?;
        match &self.snapshot_path {
            Some(path) if path.exists() => Ledger::load_snapshot(settings, path),
            _ => {
                info!(
                    administrator = %settings.administrator,
                    minimum_bet = %settings.minimum_bet,
                    "Starting empty ledger"
                );
                Ok(Ledger::new(settings))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        let mut config = Config::default();
        config.ledger.administrator = "0xfile".into();
        config
    }

    #[test]
    fn override_replaces_administrator() {
        let mut config = config();
        config.override_administrator(Some("0xenv".into()));
        assert_eq!(config.ledger.administrator, "0xenv");
    }

    #[test]
    fn blank_or_missing_override_is_ignored() {
        let mut config = config();
        config.override_administrator(Some("   ".into()));
        assert_eq!(config.ledger.administrator, "0xfile");
        config.override_administrator(None);
        assert_eq!(config.ledger.administrator, "0xfile");
    }

    #[test]
    fn empty_snapshot_path_is_rejected() {
        let mut config = config();
        config.snapshot_path = Some(PathBuf::new());
        assert!(matches!(
            config.validate(),
            Err(crate::error::Error::Config(ConfigError::InvalidValue {
                field: "snapshot_path",
                ..
            }))
        ));
    }
}
