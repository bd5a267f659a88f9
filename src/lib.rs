//! linked-hashmap: a single-threaded hash map that iterates in insertion
//! order, with checked bidirectional handles into its entries.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: keep a linked list of entries (the order) and a chained hash
//!   index (the routing) mutually consistent across insert, erase and
//!   resize, with the list as the single source of truth.
//! - Layers:
//!   - `chain`: link/unlink rules for doubly linked chains threaded
//!     through a slotmap arena by key.
//!   - `OrderList<K, V>`: owns every entry, bounded by head and tail
//!     sentinels that never hold data. Oldest entries first.
//!   - `HashIndex`: `capacity` buckets, each a chain of non-owning
//!     references (`NodeKey`s) into the order list. Routes by
//!     `hash % capacity`; scans a bucket comparing keys with `Eq`.
//!   - `ResizePolicy`: doubles the bucket count when
//!     `len >= load_factor * capacity` after an insert, halves it when
//!     `len < capacity * load_factor / 2` after an erase (never below 1).
//!   - `LinkedHashMap<K, V, S>`: public API; mutates the order list first
//!     and the index second.
//!
//! Constraints
//! - Single-threaded: no locking; a debug-only reentrancy guard catches
//!   user `Hash`/`Eq` calling back into the map mid-scan.
//! - Each entry stores its `u64` hash; rebuilding the index never calls
//!   `K: Hash` again.
//! - Resizing rebuilds the index wholesale from the order list and never
//!   touches entries, so handles and references stay valid.
//! - Keys are unique; inserting a present key is a no-op that reports the
//!   existing position.
//! - Keys are immutable post-insert; there is no `key_mut`.
//!
//! Handles
//! - `Handle` is a detached position: an arena key plus the identity tag
//!   of the issuing map. `next`/`prev` fail past either end; `erase`
//!   fails on `end()`, on stale handles and on handles from another map
//!   (including a clone).
//!
//! Notes and non-goals
//! - Not `Sync`; no persistence or serialization.
//! - No weak handles or cursors that borrow the map (could be added later).

mod chain;
mod config;
mod error;
mod hash_index;
mod iter;
mod linked_hash_map;
mod linked_hash_map_proptest;
mod order_list;
mod policy;
mod reentrancy;

// Public surface
pub use config::{Config, DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR};
pub use error::MapError;
pub use hashbrown::hash_map::DefaultHashBuilder;
pub use iter::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut};
pub use linked_hash_map::{Handle, LinkedHashMap};
