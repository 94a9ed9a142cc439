//! The price-level book for a single trading pair.
//!
//! Levels live in the key-value store, one entry per occupied price:
//! - `StoreKey::Metadata` -- the [`BookMetadata`] record (bounds + tick size)
//! - `StoreKey::Level(price)` -- the FIFO order queue at that integer price
//!
//! Every mutation persists the full queue before returning, so a reader of
//! the store always observes a consistent book. A queue may be empty in the
//! store only between a removal and the follow-up [`LevelBook::delete_level`]
//! within the same engine operation.

use matchbook_store::{KeyValueStore, StoreExt, StoreKey};
use matchbook_types::{BookMetadata, MatchbookError, Order, Result};

/// Price-level storage over a [`KeyValueStore`].
#[derive(Debug)]
pub struct LevelBook<S> {
    store: S,
}

impl<S: KeyValueStore> LevelBook<S> {
    /// Create a book in an empty store and persist its initial metadata.
    ///
    /// Fails with `DuplicateKey` if the store already holds a book.
    pub fn init(store: S, metadata: &BookMetadata) -> Result<Self> {
        let mut book = Self { store };
        book.store.put_value(StoreKey::Metadata, metadata)?;
        Ok(book)
    }

    // =================================================================
    // Metadata
    // =================================================================

    /// Read the book's metadata record.
    pub fn metadata(&self) -> Result<BookMetadata> {
        self.store
            .get_value(&StoreKey::Metadata)?
            .ok_or_else(|| MatchbookError::MissingKey(StoreKey::Metadata.to_string()))
    }

    /// Persist an updated metadata record.
    pub fn set_metadata(&mut self, metadata: &BookMetadata) -> Result<()> {
        self.store.set_value(StoreKey::Metadata, metadata)
    }

    // =================================================================
    // Level queries
    // =================================================================

    /// The FIFO queue at `price`, or `None` if the level is absent.
    pub fn level(&self, price: i64) -> Result<Option<Vec<Order>>> {
        self.store.get_value(&StoreKey::Level(price))
    }

    /// Whether `price` holds at least one order.
    pub fn has_orders_at(&self, price: i64) -> Result<bool> {
        Ok(self.level(price)?.is_some_and(|queue| !queue.is_empty()))
    }

    // =================================================================
    // Mutations
    // =================================================================

    /// Append `order` to the queue at its price, creating the level if absent.
    pub fn insert(&mut self, order: &Order) -> Result<()> {
        let key = StoreKey::Level(order.price);
        match self.level(order.price)? {
            Some(mut queue) => {
                queue.push(order.clone());
                self.store.set_value(key, &queue)
            }
            None => self.store.put_value(key, &vec![order.clone()]),
        }
    }

    /// Remove the order matching `target`'s `(timestamp, user, side)` identity
    /// from the queue at `target.price`, preserving the order of the rest.
    ///
    /// Returns the number of orders left at that level. The shortened queue is
    /// persisted even when empty; the caller deletes the level after bounds
    /// are repaired.
    pub fn remove(&mut self, target: &Order) -> Result<usize> {
        let mut queue = self
            .level(target.price)?
            .ok_or_else(|| MatchbookError::invalid_order(target))?;
        let position = queue
            .iter()
            .position(|resting| resting.matches(target))
            .ok_or_else(|| MatchbookError::invalid_order(target))?;
        queue.remove(position);
        self.store.set_value(StoreKey::Level(target.price), &queue)?;
        Ok(queue.len())
    }

    /// Reduce the resting amount of the order matching `target` by `amount`.
    ///
    /// The reduction must leave the order partially resting: `amount` must be
    /// positive and strictly less than the resting amount. Full consumption
    /// goes through [`LevelBook::remove`].
    pub fn deplete(&mut self, target: &Order, amount: i64) -> Result<()> {
        let mut queue = self
            .level(target.price)?
            .ok_or_else(|| MatchbookError::invalid_order(target))?;
        let position = queue
            .iter()
            .position(|resting| resting.matches(target))
            .ok_or_else(|| MatchbookError::invalid_order(target))?;
        let available = queue[position].amount;
        if amount < 1 || amount >= available {
            return Err(MatchbookError::InvalidDepletionAmount {
                requested: amount,
                available,
            });
        }
        queue[position].amount -= amount;
        self.store.set_value(StoreKey::Level(target.price), &queue)
    }

    /// Drop the (empty) level entry at `price` from the store.
    pub fn delete_level(&mut self, price: i64) -> Result<()> {
        self.store.del(&StoreKey::Level(price))
    }
}
