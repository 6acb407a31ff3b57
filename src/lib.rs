//! # `rbindex`
//!
//! A thread-safe, in-memory ordered index from byte strings to byte strings,
//! built on a red-black tree.
//!
//! - [`RedBlackTree`]: the single-threaded core. Insertion attaches a red
//!   leaf and restores balance with an iterative recolor/rotate walk toward
//!   the root, so height stays within `2 * log2(n + 1)`.
//! - [`OrderedIndex`]: the core behind one reader/writer lock. Lookups share
//!   the lock; inserts hold it exclusively for the whole descent and fixup,
//!   so readers never observe a tree mid-rotation.
//! - [`LockedMap`]: an unordered store with the same two-operation
//!   [`KvStore`] contract, behind a single exclusive lock.
//!
//! | Feature | Status |
//! |---------|--------|
//! | Concurrent find | Shared lock |
//! | Concurrent insert | Exclusive lock, insert-if-absent |
//! | Deletion | Not provided |
//! | Ordered iteration / range scans | Not provided |
//!
//! ## Example
//!
//! ```rust
//! use rbindex::{KvStore, OrderedIndex};
//!
//! let index = OrderedIndex::new();
//!
//! assert!(index.insert(b"apple", b"red"));
//! assert!(!index.insert(b"apple", b"green")); // existing keys are kept
//!
//! assert_eq!(index.find(b"apple"), Some(b"red".to_vec()));
//! assert_eq!(index.find(b"pear"), None);
//! ```
//!
//! ## Key Order
//!
//! Keys compare lexicographically by unsigned byte value, and a strict
//! prefix sorts before any longer key it starts (`b"ab" < b"abc"`). This is
//! the standard ordering of `[u8]`.
//!
//! ## Logging
//!
//! Enable the `tracing` feature to emit `tracing` events for root creation,
//! leaf attachment, each fixup case and each rotation.

#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod alloc;
pub mod index;
pub mod node;
pub mod store;
pub mod tree;

mod tracing_helpers;

pub use index::{IndexConfig, OrderedIndex};
pub use node::{Color, NodeId};
pub use store::{KvStore, LockedMap};
pub use tree::{InsertError, InvariantViolation, RedBlackTree, TreeStats};
