//! Identifiers used throughout matchbook.
//!
//! Orders have no id of their own: within a price level an order is
//! identified by the composite `(timestamp, user, side)`. The free-standing
//! identifiers are accounts and assets.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier for a user / trading account.
///
/// Stored and serialized as a plain string so callers can use whatever
/// account scheme they already have (names, chain addresses, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Type alias for asset identifiers (e.g. "ETH", "USDT").
pub type Asset = String;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_display() {
        let user = UserId::new("alice");
        assert_eq!(format!("{user}"), "alice");
        assert_eq!(user.as_str(), "alice");
    }

    #[test]
    fn user_id_from_str() {
        let a: UserId = "bob".into();
        let b = UserId::new(String::from("bob"));
        assert_eq!(a, b);
    }

    #[test]
    fn user_id_serializes_as_plain_string() {
        let user = UserId::new("carol");
        let json = serde_json::to_string(&user).unwrap();
        assert_eq!(json, "\"carol\"");
        let back: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(user, back);
    }
}
