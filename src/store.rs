//! The two-operation key/value contract and its unordered implementation.
//!
//! [`KvStore`] is the shape shared by [`OrderedIndex`] and [`LockedMap`]:
//! insert-if-absent and copy-out lookup. Callers written against the trait
//! can swap one store for the other; they differ only in ordering and in
//! how finely they lock.

use std::collections::HashMap;
use std::fmt as StdFmt;

use parking_lot::Mutex;

use crate::index::OrderedIndex;

/// Insert-if-absent and lookup over byte-string keys and values.
pub trait KvStore: Send + Sync {
    /// Store `value` under `key` unless `key` is already present.
    ///
    /// Returns `true` if the entry was added, `false` if the key existed.
    /// An existing value is never replaced.
    fn insert(&self, key: &[u8], value: &[u8]) -> bool;

    /// Copy of the value stored under `key`, if any.
    fn find(&self, key: &[u8]) -> Option<Vec<u8>>;
}

impl KvStore for OrderedIndex {
    #[inline]
    fn insert(&self, key: &[u8], value: &[u8]) -> bool {
        Self::insert(self, key, value)
    }

    #[inline]
    fn find(&self, key: &[u8]) -> Option<Vec<u8>> {
        Self::find(self, key)
    }
}

/// Unordered store behind one exclusive lock.
///
/// Both operations take the same `Mutex`, so lookups serialize with each
/// other as well as with inserts.
#[derive(Default)]
pub struct LockedMap {
    map: Mutex<HashMap<Vec<u8>, Vec<u8>>>,
}

impl StdFmt::Debug for LockedMap {
    fn fmt(&self, f: &mut StdFmt::Formatter<'_>) -> StdFmt::Result {
        f.debug_struct("LockedMap")
            .field("len", &self.map.try_lock().map(|m| m.len()))
            .finish()
    }
}

impl LockedMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty map with room for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: Mutex::new(HashMap::with_capacity(capacity)),
        }
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.lock().len()
    }

    /// Check if the map holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.lock().is_empty()
    }
}

impl KvStore for LockedMap {
    fn insert(&self, key: &[u8], value: &[u8]) -> bool {
        let mut map = self.map.lock();
        if map.contains_key(key) {
            return false;
        }
        map.insert(key.to_vec(), value.to_vec());
        true
    }

    fn find(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.map.lock().get(key).cloned()
    }
}
