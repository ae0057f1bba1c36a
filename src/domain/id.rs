//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sequential event identifier.
///
/// Assigned by the store in creation order, starting at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EventId(u64);

impl EventId {
    /// Create a new `EventId` from a u64 value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the underlying value.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "event-{}", self.0)
    }
}

impl From<u64> for EventId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

/// Identifier of one discrete outcome of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OutcomeId(u32);

impl OutcomeId {
    /// Create a new `OutcomeId` from a u32 value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the underlying value.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for OutcomeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for OutcomeId {
    fn from(id: u32) -> Self {
        Self::new(id)
    }
}

/// Authenticated caller identity, as attached by the call dispatcher.
///
/// Both the administrator and bettors are identities; the ledger never
/// authenticates, it only compares.
///
/// The inner String is private to ensure all construction goes through
/// the defined constructors.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Identity(String);

impl Identity {
    /// Create a new `Identity` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the identity as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Identity {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for Identity {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_id_new_and_value() {
        let id = EventId::new(42);
        assert_eq!(id.value(), 42);
    }

    #[test]
    fn event_id_display() {
        assert_eq!(format!("{}", EventId::new(3)), "event-3");
    }

    #[test]
    fn event_ids_order_by_creation() {
        assert!(EventId::new(0) < EventId::new(1));
    }

    #[test]
    fn outcome_id_from_u32() {
        let id = OutcomeId::from(2);
        assert_eq!(id.value(), 2);
        assert_eq!(format!("{}", id), "2");
    }

    #[test]
    fn identity_from_str() {
        let id = Identity::from("0xbettor");
        assert_eq!(id.as_str(), "0xbettor");
    }

    #[test]
    fn identity_from_string() {
        let id = Identity::from("0xowner".to_string());
        assert_eq!(format!("{}", id), "0xowner");
    }
}
