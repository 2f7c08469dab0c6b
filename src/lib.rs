//! # ShardedMap
//!
//! A concurrent map that splits its key space across independently locked
//! shards.
//!
//! Each key is hashed and routed to exactly one shard, and each shard has its
//! own read-write lock. Operations on keys in different shards never block
//! each other, so contention is bounded by how many threads happen to hit the
//! same shard. There is no global lock anywhere.
//!
//! ## Features
//!
//! - **Sharded locking**: one `RwLock` per shard, readers share, writers exclude
//! - **Lock-free counting**: `len()` sums atomic per-shard counters
//! - **Zero-Copy Reads**: values stored as `Arc<T>`
//! - **Deterministic routing**: same key, same shard, for the life of the map
//! - **Per-instance configuration**: shard count and hash function
//!
//! ## Consistency
//!
//! Operations on the same key are linearizable. Whole-map operations (`len`,
//! `keys`, `clear`, `iter_snapshot`) visit shards one at a time and may
//! observe different shards at different moments. `consistent_len` and
//! `consistent_keys` lock all shards at once when a single-instant view is
//! needed.
//!
//! ## Example
//!
//! ```rust
//! use shardedmap::ShardedMap;
//!
//! let map = ShardedMap::new();
//!
//! map.insert("key1", "value1");
//! map.insert("key2", "value2");
//!
//! if let Some(value) = map.get(&"key1") {
//!     println!("Found: {}", *value);
//! }
//!
//! map.remove(&"key2");
//! assert_eq!(map.len(), 1);
//!
//! map.clear();
//! assert!(map.keys().is_empty());
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use shardedmap::{HashFunction, ShardedMapBuilder};
//!
//! let map = ShardedMapBuilder::new()
//!     .shard_count(64)
//!     .hash_function(HashFunction::AHash)
//!     .build::<String, i32>();
//! assert_eq!(map.shard_count(), 64);
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]

/// Configuration and builder types.
pub mod config;
/// Routing hash functions.
pub mod hash;
/// Iterator implementations.
pub mod iter;
/// Internal shard implementation.
mod shard;
/// Main ShardedMap implementation.
pub mod shardedmap;
/// Statistics collection.
pub mod stats;

pub use config::{Config, HashFunction, ShardedMapBuilder, DEFAULT_SHARD_COUNT};
pub use shardedmap::ShardedMap;
pub use stats::{ShardOps, Stats};
