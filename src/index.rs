//! `OrderedIndex` - the thread-safe front of [`RedBlackTree`].
//!
//! One `parking_lot::RwLock` guards the whole tree. Lookups take it shared,
//! so any number run at once; inserts take it exclusive for the full
//! descent, attach and fixup, so a reader can never see a half-rotated
//! subtree. Values are copied out before the read guard drops; no reference
//! into the node graph outlives a critical section.
//!
//! This serializes all writers and stalls readers during each write. It is
//! a scalability limit of the coarse gate, not a correctness issue.

use std::fmt as StdFmt;

use parking_lot::RwLock;

use crate::tracing_helpers::debug_log;
use crate::tree::{InsertError, InvariantViolation, RedBlackTree, TreeStats};

/// Construction options for [`OrderedIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndexConfig {
    /// Number of entries the node arena holds before its first reallocation.
    pub initial_capacity: usize,
}

impl IndexConfig {
    /// Config with the given initial capacity.
    #[must_use]
    pub const fn with_capacity(initial_capacity: usize) -> Self {
        Self { initial_capacity }
    }
}

/// A concurrent ordered map from byte strings to byte strings.
///
/// Share it between threads with `Arc<OrderedIndex>`; every method takes
/// `&self`.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use std::thread;
///
/// use rbindex::OrderedIndex;
///
/// let index = Arc::new(OrderedIndex::new());
///
/// let writer = {
///     let index = Arc::clone(&index);
///     thread::spawn(move || {
///         for i in 0u32..100 {
///             assert!(index.insert(&i.to_be_bytes(), &i.to_le_bytes()));
///         }
///     })
/// };
/// writer.join().unwrap();
///
/// assert_eq!(index.find(&7u32.to_be_bytes()), Some(7u32.to_le_bytes().to_vec()));
/// assert!(!index.insert(&7u32.to_be_bytes(), b"again"));
/// assert_eq!(index.len(), 100);
/// ```
pub struct OrderedIndex {
    tree: RwLock<RedBlackTree>,
}

impl StdFmt::Debug for OrderedIndex {
    fn fmt(&self, f: &mut StdFmt::Formatter<'_>) -> StdFmt::Result {
        match self.tree.try_read() {
            Some(tree) => f.debug_struct("OrderedIndex").field("tree", &*tree).finish(),
            None => f
                .debug_struct("OrderedIndex")
                .field("tree", &"<locked>")
                .finish(),
        }
    }
}

impl OrderedIndex {
    /// Create an empty index.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tree: RwLock::new(RedBlackTree::new()),
        }
    }

    /// Create an empty index with room for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(IndexConfig::with_capacity(capacity))
    }

    /// Create an empty index from `config`.
    #[must_use]
    pub fn with_config(config: IndexConfig) -> Self {
        debug_log!(capacity = config.initial_capacity, "creating ordered index");
        Self {
            tree: RwLock::new(RedBlackTree::with_capacity(config.initial_capacity)),
        }
    }

    /// Insert `key` with `value` under the exclusive lock.
    ///
    /// Returns `false` if `key` is already present; the stored value is
    /// left as it was.
    pub fn insert(&self, key: &[u8], value: &[u8]) -> bool {
        self.tree.write().insert(key, value)
    }

    /// Like [`insert`](Self::insert), but reports allocation failure.
    ///
    /// # Errors
    ///
    /// Returns [`InsertError::AllocationFailed`] if memory for the entry
    /// cannot be reserved. The index is unchanged in that case.
    pub fn try_insert(&self, key: &[u8], value: &[u8]) -> Result<bool, InsertError> {
        self.tree.write().try_insert(key, value)
    }

    /// Copy out the value stored under `key`, under the shared lock.
    #[must_use]
    pub fn find(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.tree.read().find(key).map(<[u8]>::to_vec)
    }

    /// Check if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.tree.read().contains_key(key)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.read().len()
    }

    /// Check if the index holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.read().is_empty()
    }

    /// Height of the underlying tree.
    #[must_use]
    pub fn height(&self) -> usize {
        self.tree.read().height()
    }

    /// Audit the underlying tree under the shared lock.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found.
    pub fn validate(&self) -> Result<TreeStats, InvariantViolation> {
        self.tree.read().validate()
    }

    /// Take the tree out of the index.
    #[must_use]
    pub fn into_inner(self) -> RedBlackTree {
        self.tree.into_inner()
    }
}

impl Default for OrderedIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl From<RedBlackTree> for OrderedIndex {
    fn from(tree: RedBlackTree) -> Self {
        Self {
            tree: RwLock::new(tree),
        }
    }
}

// ============================================================================
//  Tests
// ============================================================================
