//! Trade records produced by the matching engine.

use serde::{Deserialize, Serialize};

use crate::{Order, Side, UserId};

/// A completed match between one maker and one taker order.
///
/// Both embedded orders are copies taken at match time with their amount set
/// to the traded quantity; the taker copy additionally has its price rewritten
/// to the maker's, since the trade executes at the resting price. Immutable
/// once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    /// The resting order that supplied liquidity.
    pub maker_order: Order,
    /// The incoming order that consumed it, re-priced to the maker's price.
    pub taker_order: Order,
    /// Match time in milliseconds.
    pub timestamp: i64,
    /// Per-exchange sequence number assigned at match time; settlement keys
    /// its dedup window on this.
    pub seq: u64,
}

impl Trade {
    /// Quantity traded, scaled by the pair's amount shift.
    #[must_use]
    pub fn quantity(&self) -> i64 {
        self.maker_order.amount
    }

    /// Execution price; the maker's price is authoritative.
    #[must_use]
    pub fn price(&self) -> i64 {
        self.maker_order.price
    }

    /// The party that bought the base asset.
    #[must_use]
    pub fn buyer(&self) -> &UserId {
        match self.maker_order.side {
            Side::Buy => &self.maker_order.user,
            Side::Sell => &self.taker_order.user,
        }
    }

    /// The party that sold the base asset.
    #[must_use]
    pub fn seller(&self) -> &UserId {
        match self.maker_order.side {
            Side::Sell => &self.maker_order.user,
            Side::Buy => &self.taker_order.user,
        }
    }
}
