//! Eviction policy seam
//!
//! Policies form a closed set: [`PolicyKind`] names them, [`Policy`] holds
//! one, and both dispatch through [`EvictionPolicy`]. A new policy is a new
//! variant in each enum.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::lru::{LruEngine, SetOutcome};

/// Capability every eviction policy provides
pub trait EvictionPolicy<V> {
    /// Look up `key`, recording the access
    fn get(&mut self, key: &str) -> Result<&V>;

    /// Insert or update `key`, evicting if the policy demands it
    fn set(&mut self, key: String, value: V) -> SetOutcome<V>;

    /// Evict the entry the policy ranks lowest
    fn evict(&mut self) -> Option<(String, V)>;

    /// Look up `key` without recording the access
    fn peek(&self, key: &str) -> Option<&V>;

    /// Remove `key` outright
    fn remove(&mut self, key: &str) -> Option<V>;

    /// Drop every entry
    fn clear(&mut self);

    /// Number of resident entries
    fn len(&self) -> usize;

    /// Maximum number of resident entries
    fn capacity(&self) -> usize;

    /// Resident keys, best-ranked first
    fn keys(&self) -> Vec<&str>;

    /// Check if no entries are resident
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check whether `key` is resident
    fn contains(&self, key: &str) -> bool {
        self.peek(key).is_some()
    }
}

/// Supported eviction policy names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PolicyKind {
    /// Least Recently Used
    #[default]
    Lru,
}

impl PolicyKind {
    /// Every supported policy
    pub const ALL: &'static [PolicyKind] = &[PolicyKind::Lru];

    /// Canonical name, as accepted by [`FromStr`]
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyKind::Lru => "LRU",
        }
    }
}

impl FromStr for PolicyKind {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        PolicyKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == name)
            .ok_or_else(|| Error::UnsupportedPolicy(name.to_string()))
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A constructed eviction policy
#[derive(Debug)]
pub enum Policy<V> {
    /// Least Recently Used
    Lru(LruEngine<V>),
}

impl<V> Policy<V> {
    /// Build the policy named by `kind`
    ///
    /// # Errors
    /// * `InvalidCapacity` / `CapacityTooLarge` if `capacity` is out of range
    pub fn new(kind: PolicyKind, capacity: usize, min_capacity: usize) -> Result<Self> {
        match kind {
            PolicyKind::Lru => Ok(Policy::Lru(LruEngine::with_min_capacity(
                capacity,
                min_capacity,
            )?)),
        }
    }

    /// Which policy this is
    pub fn kind(&self) -> PolicyKind {
        match self {
            Policy::Lru(_) => PolicyKind::Lru,
        }
    }
}

impl<V> EvictionPolicy<V> for Policy<V> {
    fn get(&mut self, key: &str) -> Result<&V> {
        match self {
            Policy::Lru(engine) => engine.get(key),
        }
    }

    fn set(&mut self, key: String, value: V) -> SetOutcome<V> {
        match self {
            Policy::Lru(engine) => engine.set(key, value),
        }
    }

    fn evict(&mut self) -> Option<(String, V)> {
        match self {
            Policy::Lru(engine) => engine.evict(),
        }
    }

    fn peek(&self, key: &str) -> Option<&V> {
        match self {
            Policy::Lru(engine) => engine.peek(key),
        }
    }

    fn remove(&mut self, key: &str) -> Option<V> {
        match self {
            Policy::Lru(engine) => engine.remove(key),
        }
    }

    fn clear(&mut self) {
        match self {
            Policy::Lru(engine) => engine.clear(),
        }
    }

    fn len(&self) -> usize {
        match self {
            Policy::Lru(engine) => engine.len(),
        }
    }

    fn capacity(&self) -> usize {
        match self {
            Policy::Lru(engine) => engine.capacity(),
        }
    }

    fn keys(&self) -> Vec<&str> {
        match self {
            Policy::Lru(engine) => engine.keys().collect(),
        }
    }

    fn contains(&self, key: &str) -> bool {
        match self {
            Policy::Lru(engine) => engine.contains(key),
        }
    }
}

impl<V: fmt::Display> fmt::Display for Policy<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Lru(engine) => fmt::Display::fmt(engine, f),
        }
    }
}
