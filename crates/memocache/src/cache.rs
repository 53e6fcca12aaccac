//! Cache façade: picks a policy and forwards to it

use std::fmt;

use memocore::{EvictionPolicy, Policy, PolicyKind, Result, SetOutcome};
use tracing::{debug, trace};

use crate::config::CacheConfig;
use crate::stats::CacheStats;

/// Bounded cache keyed by string, generic over the cached value
pub struct Cache<V> {
    /// Eviction policy owning every entry
    policy: Policy<V>,

    /// Cache statistics
    stats: CacheStats,
}

impl<V> Cache<V> {
    /// Create a new cache
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of resident entries
    /// * `policy` - Eviction policy name; only `"LRU"` is supported
    ///
    /// # Returns
    /// * `Result<Cache<V>>` - `InvalidCapacity`, `CapacityTooLarge` or
    ///   `UnsupportedPolicy` on bad arguments
    pub fn new(capacity: usize, policy: &str) -> Result<Self> {
        Self::with_config(CacheConfig::new(capacity).policy_name(policy)?)
    }

    /// Create a new cache from explicit settings
    pub fn with_config(config: CacheConfig) -> Result<Self> {
        let policy = Policy::new(config.policy, config.capacity, config.min_capacity)?;
        debug!(
            policy = %config.policy,
            capacity = config.capacity,
            "cache created"
        );

        Ok(Self {
            policy,
            stats: CacheStats::new(),
        })
    }

    /// Get a value, marking it as used
    ///
    /// # Returns
    /// * `Result<&V>` - `KeyNotFound` on a miss
    pub fn get(&mut self, key: &str) -> Result<&V> {
        match self.policy.get(key) {
            Ok(value) => {
                self.stats.record_hit();
                trace!(key, "cache hit");
                Ok(value)
            }
            Err(e) => {
                self.stats.record_miss();
                trace!(key, "cache miss");
                Err(e)
            }
        }
    }

    /// Insert or update a value, marking it as used
    ///
    /// # Returns
    /// * `Option<V>` - The value previously stored under `key`
    pub fn set(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        match self.policy.set(key.into(), value) {
            SetOutcome::Inserted => {
                self.stats.record_insert();
                None
            }
            SetOutcome::Updated(previous) => {
                self.stats.record_update();
                Some(previous)
            }
            SetOutcome::Evicted { key, .. } => {
                self.stats.record_insert();
                self.stats.record_eviction();
                debug!(evicted = %key, "evicted least recently used entry");
                None
            }
        }
    }

    /// Evict the entry the policy ranks lowest
    pub fn evict(&mut self) -> Option<(String, V)> {
        let evicted = self.policy.evict();
        if let Some((key, _)) = &evicted {
            self.stats.record_eviction();
            debug!(evicted = %key, "evicted on request");
        }
        evicted
    }

    /// Get a value without marking it as used
    pub fn peek(&self, key: &str) -> Option<&V> {
        self.policy.peek(key)
    }

    /// Check whether `key` is resident
    pub fn contains(&self, key: &str) -> bool {
        self.policy.contains(key)
    }

    /// Remove a value
    pub fn remove(&mut self, key: &str) -> Option<V> {
        self.policy.remove(key)
    }

    /// Clear all entries and statistics
    pub fn clear(&mut self) {
        self.policy.clear();
        self.stats.reset();
    }

    /// Get current number of resident entries
    pub fn len(&self) -> usize {
        self.policy.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.policy.is_empty()
    }

    /// Get cache capacity
    pub fn capacity(&self) -> usize {
        self.policy.capacity()
    }

    /// Get the active eviction policy
    pub fn policy(&self) -> PolicyKind {
        self.policy.kind()
    }

    /// Resident keys, most recently used first
    pub fn keys(&self) -> Vec<&str> {
        self.policy.keys()
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }
}

impl<V: fmt::Display> fmt::Display for Cache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.policy, f)
    }
}

impl<V> fmt::Debug for Cache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("policy", &self.policy.kind())
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("stats", &self.stats)
            .finish()
    }
}
