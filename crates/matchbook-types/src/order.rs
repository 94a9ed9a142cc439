//! Order records for the matchbook engine.
//!
//! [`Order`] is the stored, fixed-point form; [`OrderRequest`] is what callers
//! submit, in external decimal units. The engine converts between the two with
//! the pair's [`crate::Scale`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::UserId;

/// Which side of the book an order is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// The side this order matches against.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }

    #[must_use]
    pub fn is_buy(self) -> bool {
        self == Self::Buy
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

/// A resting or incoming order with price and amount already scaled to
/// integers (see [`crate::scale`]).
///
/// Within a price level an order is identified by the composite
/// `(timestamp, user, side)`; there is no separate order id. The amount of a
/// resting order is always positive: an order consumed to zero is removed,
/// never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub side: Side,
    /// Remaining quantity, scaled by the pair's amount shift.
    pub amount: i64,
    /// Limit price, scaled by the pair's price shift.
    pub price: i64,
    pub user: UserId,
    /// Submission time in milliseconds; part of the order's identity.
    pub timestamp: i64,
}

impl Order {
    /// The composite identity used to locate this order in its level.
    #[must_use]
    pub fn identity(&self) -> (i64, &UserId, Side) {
        (self.timestamp, &self.user, self.side)
    }

    /// Whether `other` names the same order (amount and price aside).
    #[must_use]
    pub fn matches(&self, other: &Order) -> bool {
        self.identity() == other.identity()
    }
}

/// An order as submitted by a caller, in external decimal units.
///
/// The engine assigns the timestamp; a later cancel or deplete passes the
/// request back together with that timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub side: Side,
    pub amount: Decimal,
    pub price: Decimal,
    pub user: UserId,
}

impl OrderRequest {
    #[must_use]
    pub fn new(side: Side, amount: Decimal, price: Decimal, user: impl Into<UserId>) -> Self {
        Self {
            side,
            amount,
            price,
            user: user.into(),
        }
    }

    /// Convenience constructor for a buy request.
    #[must_use]
    pub fn buy(amount: Decimal, price: Decimal, user: impl Into<UserId>) -> Self {
        Self::new(Side::Buy, amount, price, user)
    }

    /// Convenience constructor for a sell request.
    #[must_use]
    pub fn sell(amount: Decimal, price: Decimal, user: impl Into<UserId>) -> Self {
        Self::new(Side::Sell, amount, price, user)
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Order {
    pub fn dummy(side: Side, amount: i64, price: i64) -> Self {
        Self {
            side,
            amount,
            price,
            user: UserId::new("user-test"),
            timestamp: 0,
        }
    }

    pub fn dummy_for_user(user: impl Into<UserId>, side: Side, amount: i64, price: i64) -> Self {
        Self {
            side,
            amount,
            price,
            user: user.into(),
            timestamp: 0,
        }
    }
}
