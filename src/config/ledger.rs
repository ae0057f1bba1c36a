//! Ledger construction parameters.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::application::LedgerSettings;
use crate::domain::{Amount, Identity};
use crate::error::{ConfigError, Result};

/// Largest supported `unit_decimals`; 10^18 still fits the conversion.
pub const MAX_UNIT_DECIMALS: u32 = 18;

/// Ledger configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Identity allowed to create and settle events.
    ///
    /// Overridden by the `BETLEDGER_ADMINISTRATOR` environment variable.
    #[serde(default)]
    pub administrator: String,
    /// Minimum stake in whole units (e.g., 0.01).
    #[serde(default = "default_minimum_bet")]
    pub minimum_bet: Decimal,
    /// Base units per whole unit, as a power of ten (18 for wei-style units).
    #[serde(default = "default_unit_decimals")]
    pub unit_decimals: u32,
}

fn default_minimum_bet() -> Decimal {
    Decimal::new(1, 2) // 0.01
}

const fn default_unit_decimals() -> u32 {
    18
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            administrator: String::new(),
            minimum_bet: default_minimum_bet(),
            unit_decimals: default_unit_decimals(),
        }
    }
}

impl LedgerConfig {
    /// Minimum bet converted to base units.
    ///
    /// # Errors
    ///
    /// Returns an error if the minimum is not positive or cannot be
    /// represented exactly in base units.
    pub fn minimum_bet_base_units(&self) -> Result<Amount> {
        if self.unit_decimals > MAX_UNIT_DECIMALS {
            return Err(ConfigError::InvalidValue {
                field: "unit_decimals",
                reason: format!("must be at most {MAX_UNIT_DECIMALS}"),
            }
            .into());
        }
        if self.minimum_bet <= Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "minimum_bet",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        Amount::from_units(self.minimum_bet, self.unit_decimals).ok_or_else(|| {
            ConfigError::InvalidValue {
                field: "minimum_bet",
                reason: format!(
                    "{} is not representable with {} decimals",
                    self.minimum_bet, self.unit_decimals
                ),
            }
            .into()
        })
    }

    /// Build the ledger's construction-time settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the administrator is missing or the minimum bet
    /// is invalid.
    pub fn settings(&self) -> Result<LedgerSettings> {
        if self.administrator.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "administrator",
            }
            .into());
        }
        Ok(LedgerSettings {
            administrator: Identity::new(self.administrator.trim()),
            minimum_bet: self.minimum_bet_base_units()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use rust_decimal_macros::dec;

    fn config(minimum_bet: Decimal, unit_decimals: u32) -> LedgerConfig {
        LedgerConfig {
            administrator: "0xowner".into(),
            minimum_bet,
            unit_decimals,
        }
    }

    #[test]
    fn default_minimum_is_one_hundredth() {
        assert_eq!(LedgerConfig::default().minimum_bet, dec!(0.01));
    }

    #[test]
    fn settings_convert_minimum_to_base_units() {
        let settings = config(dec!(0.01), 18).settings().unwrap();
        assert_eq!(settings.administrator.as_str(), "0xowner");
        assert_eq!(settings.minimum_bet, Amount::new(10_000_000_000_000_000));
    }

    #[test]
    fn missing_administrator_is_rejected() {
        let mut config = config(dec!(1), 2);
        config.administrator = "  ".into();
        assert!(matches!(
            config.settings(),
            Err(Error::Config(ConfigError::MissingField {
                field: "administrator"
            }))
        ));
    }

    #[test]
    fn non_positive_minimum_is_rejected() {
        assert!(config(dec!(0), 2).settings().is_err());
        assert!(config(dec!(-1), 2).settings().is_err());
    }

    #[test]
    fn too_precise_minimum_is_rejected() {
        assert!(config(dec!(0.001), 2).settings().is_err());
    }

    #[test]
    fn too_many_decimals_is_rejected() {
        assert!(config(dec!(1), 19).settings().is_err());
    }
}
