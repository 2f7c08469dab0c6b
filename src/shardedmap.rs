use crate::config::{create_hasher, Config, HashFunction};
use crate::hash::ShardHasher;
use crate::shard::Shard;
use crate::stats::Stats;
use std::hash::Hash;
use std::sync::Arc;
use tracing::debug;

/// Concurrent map split across independently locked shards.
///
/// Every key is routed to exactly one shard by hashing it and reducing the
/// hash modulo the shard count. Per-key operations lock only that shard, so
/// operations on keys in different shards never contend. Values are wrapped
/// in `Arc<V>` so reads can share them without copying.
///
/// # Key contract
///
/// The key's `Hash` impl must agree with its `Eq` impl (equal keys hash
/// equally) and must stay stable while the key is in the map. The map does
/// not check this. A key that breaks it lands in an unpredictable shard and
/// may appear to vanish or collide with an unrelated key.
///
/// # Whole-map operations
///
/// [`len`](Self::len), [`keys`](Self::keys), [`clear`](Self::clear) and
/// [`iter_snapshot`](Self::iter_snapshot) visit the shards one at a time and
/// never hold more than one shard lock. Under concurrent writes their result
/// mixes states from different moments. Use
/// [`consistent_len`](Self::consistent_len) or
/// [`consistent_keys`](Self::consistent_keys) when a single-instant view is
/// required.
///
/// # Example
///
/// ```rust
/// use shardedmap::ShardedMap;
///
/// let map = ShardedMap::new();
/// map.insert("key1", "value1");
///
/// if let Some(value) = map.get(&"key1") {
///     println!("Found: {}", *value);
/// }
/// ```
pub struct ShardedMap<K, V> {
    shards: Vec<Shard<K, V>>,
    hash: ShardHasher,
}

impl<K, V> ShardedMap<K, V>
where
    K: Hash + Eq + Send + Sync,
    V: Send + Sync,
{
    /// Create a new map with defaults (32 shards, FNV).
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a new map with `shard_count` shards. Zero means the default.
    ///
    /// ```rust
    /// use shardedmap::ShardedMap;
    ///
    /// let map: ShardedMap<u64, String> = ShardedMap::with_shard_count(64);
    /// assert_eq!(map.shard_count(), 64);
    /// ```
    pub fn with_shard_count(shard_count: usize) -> Self {
        Self::with_config(Config::new().shard_count(shard_count))
    }

    /// Create a new map with custom config.
    pub fn with_config(config: Config) -> Self {
        // Config setters never let a zero shard count through.
        debug_assert!(config.shard_count > 0);
        let shards = (0..config.shard_count)
            .map(|_| Shard::with_capacity(config.capacity_per_shard))
            .collect();

        debug!(
            shard_count = config.shard_count,
            hash_function = ?config.hash_function,
            capacity_per_shard = ?config.capacity_per_shard,
            "Created sharded map"
        );

        Self {
            shards,
            hash: create_hasher(config.hash_function),
        }
    }

    /// Number of shards, fixed for the life of the map.
    #[inline]
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Figure out which shard this key belongs to.
    #[inline]
    pub(crate) fn shard_index(&self, key: &K) -> usize {
        self.hash.hash_key(key) as usize % self.shards.len()
    }

    #[inline]
    fn shard_for(&self, key: &K) -> &Shard<K, V> {
        &self.shards[self.shard_index(key)]
    }

    /// Insert a key-value pair, overwriting any existing value. Returns the
    /// old value if the key existed.
    ///
    /// # Example
    ///
    /// ```rust
    /// use shardedmap::ShardedMap;
    ///
    /// let map = ShardedMap::new();
    /// assert!(map.insert("key", "value").is_none());
    /// assert_eq!(map.insert("key", "new_value").unwrap().as_ref(), &"value");
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert(&self, key: K, value: V) -> Option<Arc<V>> {
        self.shard_for(&key).insert(key, value)
    }

    /// Get a value by key. Returns an `Arc<V>` so you can share it without
    /// copying. `None` means the key is absent; that is not an error.
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        self.shard_for(key).get(key)
    }

    /// Remove a key-value pair, returning the value if it existed. Removing
    /// an absent key does nothing.
    pub fn remove(&self, key: &K) -> Option<Arc<V>> {
        self.shard_for(key).remove(key)
    }

    /// Check whether a key is present without cloning its value.
    pub fn contains_key(&self, key: &K) -> bool {
        self.shard_for(key).contains_key(key)
    }

    /// Update a value using a closure, returning the new value if the key existed.
    ///
    /// Requires `V: Clone` because if the value is shared (multiple `Arc`
    /// references exist), it is cloned before being modified.
    ///
    /// # Deadlocks
    ///
    /// `f` runs under the shard's write lock. Calling back into this map from
    /// `f` will deadlock if it touches the same shard.
    ///
    /// ```rust
    /// use shardedmap::ShardedMap;
    ///
    /// let map = ShardedMap::new();
    /// map.insert("counter", 0);
    ///
    /// map.update(&"counter", |v| *v += 1);
    /// assert_eq!(*map.get(&"counter").unwrap(), 1);
    /// ```
    pub fn update<F>(&self, key: &K, f: F) -> Option<Arc<V>>
    where
        F: FnOnce(&mut V),
        V: Clone,
    {
        self.shard_for(key).update(key, f)
    }

    /// Total number of entries, summed from the per-shard counters.
    ///
    /// Takes no locks. Each shard's counter is read independently, so under
    /// concurrent writes the total need not match any single instant.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.len()).sum()
    }

    /// Check if the map is empty. Same caveats as [`len`](Self::len).
    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|shard| shard.len() == 0)
    }

    /// All keys, gathered shard by shard under each shard's read lock.
    ///
    /// Order is unspecified. Not an atomic snapshot of the whole map.
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        let mut keys = Vec::with_capacity(self.len());
        for shard in &self.shards {
            keys.extend(shard.keys());
        }
        keys
    }

    /// Remove every entry, one shard at a time.
    ///
    /// Each shard is reset atomically, but a concurrent insert into a shard
    /// that has not been reached yet will be wiped, while one into a shard
    /// already reset will survive.
    pub fn clear(&self) {
        for shard in &self.shards {
            shard.clear();
        }
        debug!(shard_count = self.shards.len(), "Cleared sharded map");
    }

    /// Entry count as of a single instant across all shards.
    ///
    /// Holds every shard's read lock at once, taken in index order, so
    /// writers on any shard wait until the count is done.
    ///
    /// # Deadlocks
    ///
    /// Do not call this from inside an [`update`](Self::update) closure.
    pub fn consistent_len(&self) -> usize {
        let guards: Vec<_> = self.shards.iter().map(|s| s.read_lock()).collect();
        guards.iter().map(|map| map.len()).sum()
    }

    /// Keys as of a single instant across all shards.
    ///
    /// Same locking as [`consistent_len`](Self::consistent_len).
    pub fn consistent_keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        let guards: Vec<_> = self.shards.iter().map(|s| s.read_lock()).collect();
        let total = guards.iter().map(|map| map.len()).sum();
        let mut keys = Vec::with_capacity(total);
        for map in &guards {
            keys.extend(map.keys().cloned());
        }
        keys
    }

    /// Entry count of each shard, in shard order.
    pub fn shard_loads(&self) -> Vec<usize> {
        self.shards.iter().map(|s| s.len()).collect()
    }

    /// Get detailed statistics about the map and its shards.
    pub fn stats(&self) -> Stats {
        let shard_sizes = self.shard_loads();
        let operations = self.shards.iter().map(|s| s.stats()).collect();
        let size = shard_sizes.iter().sum();

        Stats {
            size,
            shard_sizes,
            operations,
        }
    }

    /// Iterate over a per-shard snapshot of all key-value pairs.
    ///
    /// ```rust
    /// use shardedmap::ShardedMap;
    ///
    /// let map = ShardedMap::new();
    /// map.insert("key1", "value1");
    /// map.insert("key2", "value2");
    ///
    /// assert_eq!(map.iter_snapshot().count(), 2);
    /// ```
    pub fn iter_snapshot(&self) -> crate::iter::SnapshotIter<K, V>
    where
        K: Clone,
    {
        crate::iter::SnapshotIter::new(&self.shards)
    }

    /// The hash function this map routes with.
    pub fn hash_function(&self) -> HashFunction {
        match self.hash {
            ShardHasher::Fnv => HashFunction::Fnv,
            ShardHasher::AHash => HashFunction::AHash,
            #[cfg(feature = "fxhash")]
            ShardHasher::FxHash => HashFunction::FxHash,
        }
    }
}

impl<K, V> Default for ShardedMap<K, V>
where
    K: Hash + Eq + Send + Sync,
    V: Send + Sync,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> std::fmt::Debug for ShardedMap<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShardedMap")
            .field("shard_count", &self.shards.len())
            .field("hash", &self.hash)
            .finish_non_exhaustive()
    }
}
