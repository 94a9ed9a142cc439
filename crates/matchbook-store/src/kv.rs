//! The synchronous key-value capability the engine writes through.

use matchbook_types::Result;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::key::StoreKey;

/// Ordered key-value store with create/update distinction.
///
/// `put` creates and fails on an existing key; `set` updates and fails on a
/// missing one. The split catches engine bugs at the storage boundary: a
/// level written twice or metadata updated before initialization surfaces
/// as an error instead of silent overwrite. Reads observe the most recent
/// write made through the same store handle.
pub trait KeyValueStore {
    /// Look up the value at `key`.
    fn get(&self, key: &StoreKey) -> Option<Value>;

    /// Create `key`. Fails with `DuplicateKey` if it already exists.
    fn put(&mut self, key: StoreKey, value: Value) -> Result<()>;

    /// Update `key`. Fails with `MissingKey` if it does not exist.
    fn set(&mut self, key: StoreKey, value: Value) -> Result<()>;

    /// Delete `key`. Fails with `MissingKey` if it does not exist.
    fn del(&mut self, key: &StoreKey) -> Result<()>;

    /// Whether `key` exists.
    fn contains(&self, key: &StoreKey) -> bool;
}

/// Typed access on top of [`KeyValueStore`]'s raw JSON values.
pub trait StoreExt: KeyValueStore {
    fn get_value<T: DeserializeOwned>(&self, key: &StoreKey) -> Result<Option<T>> {
        match self.get(key) {
            Some(raw) => {
                let value = serde_json::from_value(raw)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    fn put_value<T: Serialize>(&mut self, key: StoreKey, value: &T) -> Result<()> {
        self.put(key, serde_json::to_value(value)?)
    }

    fn set_value<T: Serialize>(&mut self, key: StoreKey, value: &T) -> Result<()> {
        self.set(key, serde_json::to_value(value)?)
    }
}

impl<S: KeyValueStore + ?Sized> StoreExt for S {}
