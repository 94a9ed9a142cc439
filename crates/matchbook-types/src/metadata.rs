//! Book-level bookkeeping persisted alongside the price levels.

use serde::{Deserialize, Serialize};

use crate::order::Side;

/// Best and worst occupied prices per side, plus the tick size.
///
/// Stored under a fixed key in the same store as the levels and kept current
/// by the engine on every insert and removal. `None` means the side is empty.
/// For bids best is the highest price, for asks the lowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookMetadata {
    pub best_bid: Option<i64>,
    pub worst_bid: Option<i64>,
    pub best_ask: Option<i64>,
    pub worst_ask: Option<i64>,
    pub tick_size: i64,
}

impl BookMetadata {
    #[must_use]
    pub fn new(tick_size: i64) -> Self {
        Self {
            best_bid: None,
            worst_bid: None,
            best_ask: None,
            worst_ask: None,
            tick_size,
        }
    }

    #[must_use]
    pub fn best(&self, side: Side) -> Option<i64> {
        match side {
            Side::Buy => self.best_bid,
            Side::Sell => self.best_ask,
        }
    }

    #[must_use]
    pub fn worst(&self, side: Side) -> Option<i64> {
        match side {
            Side::Buy => self.worst_bid,
            Side::Sell => self.worst_ask,
        }
    }

    /// Replace one side's occupied range with `[lowest, highest]`.
    ///
    /// Buys quote best at the highest price, sells at the lowest, so the
    /// same scan result maps onto the two sides differently. Passing `None`
    /// for both clears the side.
    pub fn set_side_range(&mut self, side: Side, lowest: Option<i64>, highest: Option<i64>) {
        match side {
            Side::Buy => {
                self.best_bid = highest;
                self.worst_bid = lowest;
            }
            Side::Sell => {
                self.best_ask = lowest;
                self.worst_ask = highest;
            }
        }
    }
}
