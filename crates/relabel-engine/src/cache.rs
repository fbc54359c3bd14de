//! Caller-owned memoization of expensive backend lookups.

use dashmap::DashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Maps a stable key to a single in-flight or completed result.
///
/// Concurrent callers for the same key share one initialization. A failed
/// initialization leaves the key empty so the next caller retries. Nothing
/// expires on its own; owners call [`KeyedCache::invalidate`] when the
/// underlying buffer changes.
#[derive(Debug)]
pub struct KeyedCache<K, V>
where
    K: Eq + Hash,
{
    entries: DashMap<K, Arc<OnceCell<V>>>,
}

impl<K, V> Default for KeyedCache<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }
}

impl<K, V> KeyedCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached value for `key`, running `init` if no value is present yet
    pub async fn get_or_try_init<F, Fut, E>(&self, key: K, init: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        // Clone the cell out so no map shard stays locked across the await
        let cell = self.entries.entry(key).or_default().value().clone();
        cell.get_or_try_init(init).await.cloned()
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.entries
            .get(key)
            .and_then(|entry| entry.value().get().cloned())
    }

    pub fn invalidate(&self, key: &K) {
        self.entries.remove(key);
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
