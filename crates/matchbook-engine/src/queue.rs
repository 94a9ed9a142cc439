//! FIFO buffer of produced, not-yet-settled trades.

use std::collections::VecDeque;

use matchbook_types::Trade;

/// Trades wait here in production order until settlement drains them.
///
/// The matcher pushes, the settlement collaborator pops. A popped trade is
/// consumed; there is no redelivery from this queue.
#[derive(Debug, Default)]
pub struct TradeQueue {
    trades: VecDeque<Trade>,
}

impl TradeQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, trade: Trade) {
        self.trades.push_back(trade);
    }

    /// Remove and return the oldest queued trade.
    pub fn pop_next(&mut self) -> Option<Trade> {
        self.trades.pop_front()
    }

    /// The oldest queued trade, without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<&Trade> {
        self.trades.front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.trades.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Trade> {
        self.trades.iter()
    }
}

#[cfg(test)]
mod tests {
    use matchbook_types::{Order, Side, Trade};

    use super::*;

    fn make_trade(seq: u64) -> Trade {
        Trade {
            maker_order: Order::dummy_for_user("maker", Side::Sell, 10, 50),
            taker_order: Order::dummy_for_user("taker", Side::Buy, 10, 50),
            timestamp: 1,
            seq,
        }
    }

    #[test]
    fn pops_in_production_order() {
        let mut queue = TradeQueue::new();
        queue.push(make_trade(0));
        queue.push(make_trade(1));
        queue.push(make_trade(2));

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.pop_next().unwrap().seq, 0);
        assert_eq!(queue.pop_next().unwrap().seq, 1);
        assert_eq!(queue.pop_next().unwrap().seq, 2);
        assert_eq!(queue.pop_next(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn peek_does_not_consume() {
        let mut queue = TradeQueue::new();
        queue.push(make_trade(7));

        assert_eq!(queue.peek().unwrap().seq, 7);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pop_next().unwrap().seq, 7);
        assert_eq!(queue.peek(), None);
    }
}
