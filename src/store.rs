//! Keyed insert-once store
//!
//! A concurrent map where the first value written for a key is kept and every
//! later write for that key is dropped. Backed by a sharded `DashMap`, so
//! writers on different shards never contend.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::hash::Hash;

/// Concurrent first-write-wins map
#[derive(Debug)]
pub struct InsertOnceMap<K, V>
where
    K: Eq + Hash,
{
    entries: DashMap<K, V>,
}

impl<K, V> InsertOnceMap<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    /// Create an empty map
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Create an empty map sized for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: DashMap::with_capacity(capacity),
        }
    }

    /// Insert `value` unless `key` is already present
    ///
    /// Returns `true` if this call stored the value. The check and the write
    /// happen under the same shard lock, so two racing inserts for one key
    /// can never both succeed.
    pub fn insert_if_absent(&self, key: K, value: V) -> bool {
        match self.entries.entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
        }
    }

    /// Get a copy of the value stored for `key`
    pub fn get(&self, key: &K) -> Option<V> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Snapshot of all stored values, in shard iteration order
    pub fn values(&self) -> Vec<V> {
        self.entries.iter().map(|entry| entry.value().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> Default for InsertOnceMap<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
