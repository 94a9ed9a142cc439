//! Settlement replay guard.
//!
//! Each trade sequence number settles exactly once. Re-presenting a settled
//! sequence returns [`MatchbookError::TradeAlreadySettled`]. The window is
//! bounded: at capacity the oldest entry is evicted, so memory stays flat in
//! long-running settlers.

use std::collections::{HashSet, VecDeque};

use matchbook_types::{MatchbookError, Result};

/// Bounded set of settled trade sequence numbers.
#[derive(Debug)]
pub struct SettledWindow {
    /// Sequence numbers that have already been settled.
    settled: HashSet<u64>,
    /// Insertion order for eviction (front = oldest).
    order: VecDeque<u64>,
    /// Maximum number of entries before eviction kicks in.
    capacity: usize,
}

impl SettledWindow {
    /// Create a window remembering up to `capacity` sequence numbers.
    ///
    /// # Panics
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "SettledWindow capacity must be > 0");
        Self {
            settled: HashSet::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Mark a trade sequence as settled.
    ///
    /// # Errors
    /// Returns [`MatchbookError::TradeAlreadySettled`] if `seq` is already in
    /// the window.
    pub fn mark_settled(&mut self, seq: u64) -> Result<()> {
        if self.settled.contains(&seq) {
            return Err(MatchbookError::TradeAlreadySettled(seq));
        }

        // Evict oldest if at capacity.
        if self.settled.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.settled.remove(&oldest);
            }
        }

        self.settled.insert(seq);
        self.order.push_back(seq);
        Ok(())
    }

    /// Whether a trade sequence has already been settled.
    #[must_use]
    pub fn is_settled(&self, seq: u64) -> bool {
        self.settled.contains(&seq)
    }

    /// Number of sequences currently tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.settled.len()
    }

    /// Whether the window is empty (no sequences tracked).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.settled.is_empty()
    }
}
