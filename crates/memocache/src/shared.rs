//! Thread-safe cache handle
//!
//! One `Mutex` guards the whole façade: index and recency list are never
//! locked separately, and `get` takes the lock exclusively because it
//! reorders recency.

use std::sync::Arc;

use memocore::Result;
use parking_lot::Mutex;

use crate::cache::Cache;
use crate::config::CacheConfig;
use crate::stats::StatsSnapshot;

/// Cloneable handle to a cache shared between threads
pub struct SharedCache<V> {
    inner: Arc<Mutex<Cache<V>>>,
}

impl<V> Clone for SharedCache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> From<Cache<V>> for SharedCache<V> {
    fn from(cache: Cache<V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }
}

impl<V> SharedCache<V> {
    /// Create a new shared cache, see [`Cache::new`]
    pub fn new(capacity: usize, policy: &str) -> Result<Self> {
        Cache::new(capacity, policy).map(Self::from)
    }

    /// Create a new shared cache from explicit settings
    pub fn with_config(config: CacheConfig) -> Result<Self> {
        Cache::with_config(config).map(Self::from)
    }

    /// Insert or update a value, returning the one it replaced
    pub fn set(&self, key: impl Into<String>, value: V) -> Option<V> {
        self.inner.lock().set(key, value)
    }

    /// Remove a value
    pub fn remove(&self, key: &str) -> Option<V> {
        self.inner.lock().remove(key)
    }

    /// Check whether `key` is resident
    pub fn contains(&self, key: &str) -> bool {
        self.inner.lock().contains(key)
    }

    /// Clear all entries and statistics
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Get current number of resident entries
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Get cache capacity
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    /// Resident keys, most recently used first
    pub fn keys(&self) -> Vec<String> {
        self.inner
            .lock()
            .keys()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Copy of the current statistics
    pub fn stats(&self) -> StatsSnapshot {
        self.inner.lock().stats().snapshot()
    }

    /// Run `f` with the lock held, so several calls act as one unit
    pub fn with<R>(&self, f: impl FnOnce(&mut Cache<V>) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

impl<V: Clone> SharedCache<V> {
    /// Get a copy of a value, marking it as used
    pub fn get(&self, key: &str) -> Result<V> {
        self.inner.lock().get(key).cloned()
    }

    /// Get a copy of a value without marking it as used
    pub fn peek(&self, key: &str) -> Option<V> {
        self.inner.lock().peek(key).cloned()
    }

    /// Return the cached value for `key`, computing and storing it on a miss
    ///
    /// The lock is held while `init` runs.
    pub fn get_or_insert_with(&self, key: &str, init: impl FnOnce() -> V) -> V {
        let mut cache = self.inner.lock();
        if let Ok(value) = cache.get(key) {
            return value.clone();
        }

        let value = init();
        cache.set(key, value.clone());
        value
    }
}
