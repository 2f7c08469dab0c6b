use crate::hash::ShardHasher;

/// Shard count used when none is configured, or when zero is requested.
pub const DEFAULT_SHARD_COUNT: usize = 32;

/// Which hash function to use for shard assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashFunction {
    /// FNV-1a (default, cheap for short keys and well-distributed).
    #[default]
    Fnv,
    /// AHash with fixed keys.
    AHash,
    /// FxHash (faster but potentially less distributed).
    #[cfg(feature = "fxhash")]
    FxHash,
}

/// Configuration for a ShardedMap instance.
///
/// Every setting is per instance. Building one map with a custom shard count
/// never changes what another map gets by default.
#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) shard_count: usize,
    pub(crate) hash_function: HashFunction,
    pub(crate) capacity_per_shard: Option<usize>,
}

impl Config {
    /// Create a new config with defaults (32 shards, FNV).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of shards. Zero falls back to [`DEFAULT_SHARD_COUNT`].
    pub fn shard_count(mut self, count: usize) -> Self {
        self.shard_count = if count == 0 {
            DEFAULT_SHARD_COUNT
        } else {
            count
        };
        self
    }

    /// Set the hash function to use.
    pub fn hash_function(mut self, hash_fn: HashFunction) -> Self {
        self.hash_function = hash_fn;
        self
    }

    /// Set initial capacity per shard. Total capacity will be approximately
    /// `capacity_per_shard * shard_count`. Omitted by default (HashMap default).
    pub fn capacity_per_shard(mut self, capacity: usize) -> Self {
        self.capacity_per_shard = Some(capacity);
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            shard_count: DEFAULT_SHARD_COUNT,
            hash_function: HashFunction::Fnv,
            capacity_per_shard: None,
        }
    }
}

/// Builder for creating a ShardedMap with custom configuration.
///
/// ```rust
/// use shardedmap::{HashFunction, ShardedMapBuilder};
///
/// let map = ShardedMapBuilder::new()
///     .shard_count(64)
///     .hash_function(HashFunction::AHash)
///     .build::<String, i32>();
/// assert_eq!(map.shard_count(), 64);
/// ```
#[derive(Debug, Default)]
pub struct ShardedMapBuilder {
    config: Config,
}

impl ShardedMapBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Set the number of shards. Zero falls back to [`DEFAULT_SHARD_COUNT`].
    pub fn shard_count(mut self, count: usize) -> Self {
        self.config = self.config.shard_count(count);
        self
    }

    /// Set the hash function to use.
    pub fn hash_function(mut self, hash_fn: HashFunction) -> Self {
        self.config = self.config.hash_function(hash_fn);
        self
    }

    /// Set initial capacity per shard. Total capacity ≈ `capacity_per_shard * shard_count`.
    pub fn capacity_per_shard(mut self, capacity: usize) -> Self {
        self.config = self.config.capacity_per_shard(capacity);
        self
    }

    /// Build a ShardedMap with the configured settings.
    pub fn build<K, V>(self) -> crate::ShardedMap<K, V>
    where
        K: std::hash::Hash + Eq + Send + Sync,
        V: Send + Sync,
    {
        crate::ShardedMap::with_config(self.config)
    }
}

pub(crate) fn create_hasher(hash_fn: HashFunction) -> ShardHasher {
    match hash_fn {
        HashFunction::Fnv => ShardHasher::Fnv,
        HashFunction::AHash => ShardHasher::AHash,
        #[cfg(feature = "fxhash")]
        HashFunction::FxHash => ShardHasher::FxHash,
    }
}
