use crate::shard::Shard;
use std::hash::Hash;
use std::sync::Arc;

/// Iterator over a per-shard snapshot of the map's entries.
///
/// Entries are collected shard by shard, each shard under its own read lock,
/// before the first item is yielded. A shard visited early may therefore
/// reflect an older state than a shard visited late; there is no single
/// instant the whole snapshot corresponds to.
pub struct SnapshotIter<K, V> {
    entries: std::vec::IntoIter<(K, Arc<V>)>,
}

impl<K, V> SnapshotIter<K, V>
where
    K: Hash + Eq + Send + Sync + Clone,
    V: Send + Sync,
{
    pub(crate) fn new(shards: &[Shard<K, V>]) -> Self {
        let mut entries = Vec::new();
        for shard in shards {
            let map = shard.read_lock();
            entries.extend(map.iter().map(|(k, v)| (k.clone(), Arc::clone(v))));
        }
        Self {
            entries: entries.into_iter(),
        }
    }
}

impl<K, V> Iterator for SnapshotIter<K, V> {
    type Item = (K, Arc<V>);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<K, V> ExactSizeIterator for SnapshotIter<K, V> {}
