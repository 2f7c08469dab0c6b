//! Statistics types.

#[cfg(feature = "metrics")]
use std::sync::atomic::{AtomicU64, Ordering};

/// Per-shard operation statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShardOps {
    /// Number of successful lookups on this shard.
    pub reads: u64,
    /// Number of inserts and in-place updates on this shard.
    pub writes: u64,
    /// Number of removes that found their key.
    pub removes: u64,
    /// Number of times this shard was reset by a clear.
    pub clears: u64,
}

/// Thread-safe statistics tracker for a single shard.
#[cfg(feature = "metrics")]
pub(crate) struct ShardStats {
    reads: AtomicU64,
    writes: AtomicU64,
    removes: AtomicU64,
    clears: AtomicU64,
}

#[cfg(feature = "metrics")]
impl ShardStats {
    pub fn new() -> Self {
        Self {
            reads: AtomicU64::new(0),
            writes: AtomicU64::new(0),
            removes: AtomicU64::new(0),
            clears: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn record_read(&self) {
        self.reads.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_remove(&self) {
        self.removes.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_clear(&self) {
        self.clears.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> ShardOps {
        ShardOps {
            reads: self.reads.load(Ordering::Relaxed),
            writes: self.writes.load(Ordering::Relaxed),
            removes: self.removes.load(Ordering::Relaxed),
            clears: self.clears.load(Ordering::Relaxed),
        }
    }
}

/// Zero-sized placeholder when metrics are disabled.
#[cfg(not(feature = "metrics"))]
pub(crate) struct ShardStats;

#[cfg(not(feature = "metrics"))]
impl ShardStats {
    pub fn new() -> Self {
        ShardStats
    }

    #[inline]
    pub fn record_read(&self) {}

    #[inline]
    pub fn record_write(&self) {}

    #[inline]
    pub fn record_remove(&self) {}

    #[inline]
    pub fn record_clear(&self) {}

    pub fn snapshot(&self) -> ShardOps {
        ShardOps::default()
    }
}

/// Aggregate statistics for a ShardedMap instance.
///
/// Sizes come from the per-shard counters, so under concurrent writes the
/// figures are best-effort, like [`ShardedMap::len`](crate::ShardedMap::len).
#[derive(Debug, Clone)]
pub struct Stats {
    /// Total number of entries across all shards.
    pub size: usize,
    /// Number of entries in each shard.
    pub shard_sizes: Vec<usize>,
    /// Operation counts for each shard (all zero without the `metrics` feature).
    pub operations: Vec<ShardOps>,
}

impl Stats {
    /// Largest shard size divided by the mean shard size.
    ///
    /// Returns 0.0 for an empty map.
    pub fn max_load_ratio(&self) -> f64 {
        if self.size == 0 || self.shard_sizes.is_empty() {
            return 0.0;
        }
        let avg = self.size as f64 / self.shard_sizes.len() as f64;
        let max = self.shard_sizes.iter().copied().max().unwrap_or(0);
        max as f64 / avg
    }
}
