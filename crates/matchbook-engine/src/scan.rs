//! Tick-by-tick iteration over price levels.
//!
//! The book is sparse: most prices on the tick grid hold no level. Scans
//! therefore step price by price between two bounds and skip absent levels,
//! the same walk the bounds rescan and the matcher both rely on.

use matchbook_store::KeyValueStore;
use matchbook_types::{Order, Result};

use crate::book::LevelBook;

/// Inclusive range of prices stepped by a signed increment.
///
/// A positive step walks ascending (ask-side order), a negative step walks
/// descending (bid-side order). The range is empty when `start` already lies
/// past `end` in the step direction.
#[derive(Debug, Clone)]
pub struct TickRange {
    next: i64,
    end: i64,
    step: i64,
    done: bool,
}

impl TickRange {
    #[must_use]
    pub fn new(start: i64, end: i64, step: i64) -> Self {
        Self {
            next: start,
            end,
            step,
            done: step == 0,
        }
    }
}

impl Iterator for TickRange {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        if self.done {
            return None;
        }
        let current = self.next;
        let past_end = if self.step > 0 {
            current > self.end
        } else {
            current < self.end
        };
        if past_end {
            self.done = true;
            return None;
        }
        match current.checked_add(self.step) {
            Some(next) => self.next = next,
            None => self.done = true,
        }
        Some(current)
    }
}

/// Walks every resting order between two prices, FIFO within each level.
///
/// Yields `Result` because each level is read from the store as the walk
/// reaches it. The walk observes the book as it stood at each read; callers
/// must not mutate the book mid-scan.
pub struct OrderScan<'a, S> {
    book: &'a LevelBook<S>,
    prices: TickRange,
    current: std::vec::IntoIter<Order>,
}

impl<'a, S: KeyValueStore> OrderScan<'a, S> {
    #[must_use]
    pub fn new(book: &'a LevelBook<S>, start: i64, end: i64, step: i64) -> Self {
        Self {
            book,
            prices: TickRange::new(start, end, step),
            current: Vec::new().into_iter(),
        }
    }
}

impl<S: KeyValueStore> Iterator for OrderScan<'_, S> {
    type Item = Result<Order>;

    fn next(&mut self) -> Option<Result<Order>> {
        loop {
            if let Some(order) = self.current.next() {
                return Some(Ok(order));
            }
            let price = self.prices.next()?;
            match self.book.level(price) {
                Ok(Some(queue)) => self.current = queue.into_iter(),
                Ok(None) => {}
                Err(err) => return Some(Err(err)),
            }
        }
    }
}
