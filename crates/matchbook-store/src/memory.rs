//! In-process store backed by a `BTreeMap`.

use matchbook_types::{MatchbookError, Result};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::key::StoreKey;
use crate::kv::KeyValueStore;

/// In-memory [`KeyValueStore`].
///
/// Holds one book's state for the process lifetime. Used directly by
/// single-node deployments and by every engine test.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<StoreKey, Value>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &StoreKey) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    fn put(&mut self, key: StoreKey, value: Value) -> Result<()> {
        if self.entries.contains_key(&key) {
            return Err(MatchbookError::DuplicateKey(key.to_string()));
        }
        self.entries.insert(key, value);
        Ok(())
    }

    fn set(&mut self, key: StoreKey, value: Value) -> Result<()> {
        if !self.entries.contains_key(&key) {
            return Err(MatchbookError::MissingKey(key.to_string()));
        }
        self.entries.insert(key, value);
        Ok(())
    }

    fn del(&mut self, key: &StoreKey) -> Result<()> {
        if self.entries.remove(key).is_none() {
            return Err(MatchbookError::MissingKey(key.to_string()));
        }
        Ok(())
    }

    fn contains(&self, key: &StoreKey) -> bool {
        self.entries.contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::StoreExt;
    use serde_json::json;

    #[test]
    fn put_then_get() {
        let mut store = MemoryStore::new();
        store.put(StoreKey::Level(50), json!([1, 2, 3])).unwrap();
        assert_eq!(store.get(&StoreKey::Level(50)), Some(json!([1, 2, 3])));
        assert!(store.contains(&StoreKey::Level(50)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn put_rejects_existing_key() {
        let mut store = MemoryStore::new();
        store.put(StoreKey::Metadata, json!({})).unwrap();
        let err = store.put(StoreKey::Metadata, json!({})).unwrap_err();
        assert!(matches!(err, MatchbookError::DuplicateKey(_)));
    }

    #[test]
    fn set_rejects_missing_key() {
        let mut store = MemoryStore::new();
        let err = store.set(StoreKey::Level(10), json!([])).unwrap_err();
        assert!(matches!(err, MatchbookError::MissingKey(_)));
    }

    #[test]
    fn set_replaces_value() {
        let mut store = MemoryStore::new();
        store.put(StoreKey::Level(10), json!([1])).unwrap();
        store.set(StoreKey::Level(10), json!([1, 2])).unwrap();
        assert_eq!(store.get(&StoreKey::Level(10)), Some(json!([1, 2])));
    }

    #[test]
    fn del_removes_and_rejects_missing() {
        let mut store = MemoryStore::new();
        store.put(StoreKey::Level(10), json!([])).unwrap();
        store.del(&StoreKey::Level(10)).unwrap();
        assert!(!store.contains(&StoreKey::Level(10)));
        let err = store.del(&StoreKey::Level(10)).unwrap_err();
        assert!(matches!(err, MatchbookError::MissingKey(_)));
    }

    #[test]
    fn typed_round_trip_through_store_ext() {
        let mut store = MemoryStore::new();
        store.put_value(StoreKey::Level(7), &vec![10_i64, 20]).unwrap();
        let back: Option<Vec<i64>> = store.get_value(&StoreKey::Level(7)).unwrap();
        assert_eq!(back, Some(vec![10, 20]));
        let missing: Option<Vec<i64>> = store.get_value(&StoreKey::Level(8)).unwrap();
        assert_eq!(missing, None);
    }

    #[test]
    fn typed_read_of_wrong_shape_errors() {
        let mut store = MemoryStore::new();
        store.put(StoreKey::Metadata, json!("not a map")).unwrap();
        let result: Result<Option<BTreeMap<String, i64>>> = store.get_value(&StoreKey::Metadata);
        assert!(matches!(result, Err(MatchbookError::Serialization(_))));
    }
}
