use std::hash::{Hash, Hasher};

/// Routing hasher used to pick a shard for a key.
///
/// Every variant is seedless, so a key hashes to the same value for the whole
/// life of the process. That is what keeps a key in the shard it was inserted
/// into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShardHasher {
    /// FNV-1a (default).
    Fnv,
    /// AHash with fixed keys.
    AHash,
    /// FxHash.
    #[cfg(feature = "fxhash")]
    FxHash,
}

impl ShardHasher {
    /// Hash a key down to the 32-bit value used for shard routing.
    ///
    /// The key is fed through its `Hash` impl, never through a string
    /// rendering, and the 64-bit digest is folded so both halves contribute.
    pub fn hash_key<K: Hash + ?Sized>(&self, key: &K) -> u32 {
        let full = match self {
            ShardHasher::Fnv => {
                let mut hasher = fnv::FnvHasher::default();
                key.hash(&mut hasher);
                hasher.finish()
            }
            ShardHasher::AHash => {
                let mut hasher = ahash::AHasher::default();
                key.hash(&mut hasher);
                hasher.finish()
            }
            #[cfg(feature = "fxhash")]
            ShardHasher::FxHash => {
                let mut hasher = fxhash::FxHasher::default();
                key.hash(&mut hasher);
                hasher.finish()
            }
        };
        fold(full)
    }
}

impl Default for ShardHasher {
    fn default() -> Self {
        ShardHasher::Fnv
    }
}

#[inline]
fn fold(hash: u64) -> u32 {
    (hash ^ (hash >> 32)) as u32
}
