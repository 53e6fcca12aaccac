//! Cache construction settings

use memocore::{PolicyKind, Result, DEFAULT_MIN_CAPACITY};

/// Default number of resident entries
pub const DEFAULT_CAPACITY: usize = 1024;

/// Settings for building a [`Cache`](crate::Cache)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of resident entries
    pub capacity: usize,
    /// Eviction policy
    pub policy: PolicyKind,
    /// Smallest capacity accepted at construction
    pub min_capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            policy: PolicyKind::default(),
            min_capacity: DEFAULT_MIN_CAPACITY,
        }
    }
}

impl CacheConfig {
    /// Default settings with the given capacity
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    /// Use the policy named `name`
    ///
    /// # Errors
    /// * `UnsupportedPolicy` if `name` is not a known policy
    pub fn policy_name(self, name: &str) -> Result<Self> {
        Ok(self.policy(name.parse()?))
    }

    /// Use `policy`
    pub fn policy(mut self, policy: PolicyKind) -> Self {
        self.policy = policy;
        self
    }

    /// Accept capacities down to `min_capacity`
    pub fn min_capacity(mut self, min_capacity: usize) -> Self {
        self.min_capacity = min_capacity;
        self
    }
}
