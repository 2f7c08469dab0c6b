use crate::stats::ShardStats;
use hashbrown::HashMap;
use parking_lot::{RwLock, RwLockReadGuard};
use std::hash::Hash;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A single shard: a HashMap behind a read-write lock plus a live-entry counter.
///
/// The counter is only changed while the write lock is held, but it is atomic
/// so [`Shard::len`] can read it without touching the lock at all.
pub(crate) struct Shard<K, V> {
    map: RwLock<HashMap<K, Arc<V>>>,
    count: AtomicUsize,
    capacity: Option<usize>,
    stats: ShardStats,
}

impl<K, V> Shard<K, V>
where
    K: Hash + Eq + Send + Sync,
    V: Send + Sync,
{
    pub fn with_capacity(capacity: Option<usize>) -> Self {
        Self {
            map: RwLock::new(empty_map(capacity)),
            count: AtomicUsize::new(0),
            capacity,
            stats: ShardStats::new(),
        }
    }

    /// Insert or overwrite, returning the previous value if any.
    pub fn insert(&self, key: K, value: V) -> Option<Arc<V>> {
        let mut map = self.map.write();
        if !map.contains_key(&key) {
            self.count.fetch_add(1, Ordering::Release);
        }
        let previous = map.insert(key, Arc::new(value));
        self.stats.record_write();
        previous
    }

    /// Get a value by key, returning an Arc to enable zero-copy access.
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        let map = self.map.read();
        let result = map.get(key).cloned();
        if result.is_some() {
            self.stats.record_read();
        }
        result
    }

    /// Remove a key-value pair, returning the value if it existed.
    pub fn remove(&self, key: &K) -> Option<Arc<V>> {
        let mut map = self.map.write();
        if !map.contains_key(key) {
            return None;
        }
        self.count.fetch_sub(1, Ordering::Release);
        self.stats.record_remove();
        map.remove(key)
    }

    /// Update a value in place, returning the new value if the key existed.
    ///
    /// `Arc::make_mut` clones the value first when readers still hold it.
    pub fn update<F>(&self, key: &K, f: F) -> Option<Arc<V>>
    where
        F: FnOnce(&mut V),
        V: Clone,
    {
        let mut map = self.map.write();
        let arc_value = map.get_mut(key)?;
        f(Arc::make_mut(arc_value));
        self.stats.record_write();
        Some(arc_value.clone())
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.map.read().contains_key(key)
    }

    /// Live entry count, read without taking the lock.
    ///
    /// May land just before or just after an insert or remove that is in
    /// flight on another thread.
    #[inline]
    pub fn len(&self) -> usize {
        self.count.load(Ordering::Acquire)
    }

    /// Copy out every key under the shared lock.
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.map.read().keys().cloned().collect()
    }

    /// Drop every entry and zero the counter under one exclusive lock.
    pub fn clear(&self) {
        let mut map = self.map.write();
        *map = empty_map(self.capacity);
        self.count.store(0, Ordering::Release);
        self.stats.record_clear();
    }

    pub fn stats(&self) -> crate::stats::ShardOps {
        self.stats.snapshot()
    }

    /// Shared guard over the map, for callers that need to hold several shards.
    pub fn read_lock(&self) -> RwLockReadGuard<'_, HashMap<K, Arc<V>>> {
        self.map.read()
    }
}

fn empty_map<K, V>(capacity: Option<usize>) -> HashMap<K, V> {
    match capacity {
        Some(capacity) => HashMap::with_capacity(capacity),
        None => HashMap::new(),
    }
}
