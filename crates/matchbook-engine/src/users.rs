//! Per-user pending-order and trade-history indices.
//!
//! Auxiliary views over state the book already holds: `pending` mirrors a
//! user's resting orders, `history` accumulates that user's side of each
//! settled trade. Both lists keep the newest entry first, which is the
//! order a UI presents them in.

use std::collections::HashMap;

use matchbook_types::{Order, UserId};

/// User-keyed indices maintained alongside the book.
#[derive(Debug, Default)]
pub struct UserIndex {
    pending: HashMap<UserId, Vec<Order>>,
    history: HashMap<UserId, Vec<Order>>,
}

impl UserIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =================================================================
    // Pending orders
    // =================================================================

    /// Index a newly rested order, newest first.
    pub fn add_pending(&mut self, order: Order) {
        self.pending
            .entry(order.user.clone())
            .or_default()
            .insert(0, order);
    }

    /// Drop the pending entry matching `target`'s identity.
    ///
    /// Returns whether an entry was found. The book is authoritative; a miss
    /// here means the indices drifted.
    pub fn remove_pending(&mut self, target: &Order) -> bool {
        let Some(orders) = self.pending.get_mut(&target.user) else {
            return false;
        };
        let Some(position) = orders.iter().position(|o| o.matches(target)) else {
            return false;
        };
        orders.remove(position);
        if orders.is_empty() {
            self.pending.remove(&target.user);
        }
        true
    }

    /// Reduce the pending entry matching `target` by `amount`, mirroring an
    /// in-place depletion in the book.
    pub fn deplete_pending(&mut self, target: &Order, amount: i64) -> bool {
        let Some(orders) = self.pending.get_mut(&target.user) else {
            return false;
        };
        let Some(entry) = orders.iter_mut().find(|o| o.matches(target)) else {
            return false;
        };
        entry.amount -= amount;
        true
    }

    /// The user's resting orders, newest first. Empty for unknown users.
    #[must_use]
    pub fn pending_for(&self, user: &UserId) -> &[Order] {
        self.pending.get(user).map_or(&[], Vec::as_slice)
    }

    // =================================================================
    // Trade history
    // =================================================================

    /// Record one party's side of a settled trade, newest first.
    pub fn record_history(&mut self, user: &UserId, entry: Order) {
        self.history.entry(user.clone()).or_default().insert(0, entry);
    }

    /// The user's matched-trade entries, newest first. Empty for unknown users.
    #[must_use]
    pub fn history_for(&self, user: &UserId) -> &[Order] {
        self.history.get(user).map_or(&[], Vec::as_slice)
    }
}
