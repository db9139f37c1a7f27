//! Standard collection type aliases for Graphwalk.
//!
//! Use these instead of direct HashMap/HashSet so that every crate hashes
//! vertices and edges the same way. The hasher is `ahash` with fixed keys:
//! fast for small keys and deterministic across runs, which keeps traversal
//! orders reproducible.
//!
//! # Type Aliases
//!
//! | Type | Use Case |
//! |------|----------|
//! | [`WalkMap`] | Hash map keyed by vertices or edges |
//! | [`WalkSet`] | Hash set of vertices or edges |
//! | [`WalkIndexMap`] | Insertion-order preserving map (stable vertex indices) |
//! | [`WalkIndexSet`] | Insertion-order preserving set |
//!
//! # Example
//!
//! ```rust
//! use graphwalk_common::collections::{WalkIndexSet, WalkMap};
//!
//! let mut map: WalkMap<&str, i32> = WalkMap::default();
//! map.insert("a", 1);
//!
//! let mut index: WalkIndexSet<&str> = WalkIndexSet::default();
//! let (i, _) = index.insert_full("a");
//! assert_eq!(i, 0);
//! ```

use std::hash::BuildHasherDefault;

use ahash::AHasher;

/// Deterministic build hasher used by every Graphwalk collection.
pub type WalkBuildHasher = BuildHasherDefault<AHasher>;

/// Standard HashMap with a deterministic aHash hasher.
pub type WalkMap<K, V> = hashbrown::HashMap<K, V, WalkBuildHasher>;

/// Standard HashSet with a deterministic aHash hasher.
pub type WalkSet<T> = hashbrown::HashSet<T, WalkBuildHasher>;

/// Ordered map preserving insertion order.
///
/// Useful when iteration order matters, e.g. adjacency storage whose vertex
/// order doubles as the traversal order of whole-graph searches.
pub type WalkIndexMap<K, V> = indexmap::IndexMap<K, V, WalkBuildHasher>;

/// Ordered set preserving insertion order.
pub type WalkIndexSet<T> = indexmap::IndexSet<T, WalkBuildHasher>;

/// Create a new [`WalkMap`] with the specified capacity.
#[inline]
#[must_use]
pub fn walk_map_with_capacity<K, V>(capacity: usize) -> WalkMap<K, V> {
    WalkMap::with_capacity_and_hasher(capacity, WalkBuildHasher::default())
}

/// Create a new [`WalkIndexSet`] with the specified capacity.
#[inline]
#[must_use]
pub fn walk_index_set_with_capacity<T>(capacity: usize) -> WalkIndexSet<T> {
    WalkIndexSet::with_capacity_and_hasher(capacity, WalkBuildHasher::default())
}
