//! LRU (Least Recently Used) eviction engine
//!
//! Fuses an AHash index (key -> slot) with a [`RecencyList`]. Every mutation
//! updates both, so a key is in the index exactly when its entry is linked.

use std::collections::HashMap;
use std::fmt;

use ahash::RandomState;

use crate::error::{Error, Result};
use crate::list::{Entry, RecencyList};

/// Smallest capacity accepted by [`LruEngine::new`]
pub const DEFAULT_MIN_CAPACITY: usize = 3;

/// Largest capacity accepted by any constructor
pub const MAX_CAPACITY: usize = i32::MAX as usize;

/// What a `set` did to the resident entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetOutcome<V> {
    /// Key was new and fit within capacity
    Inserted,
    /// Key existed; carries the value it replaced
    Updated(V),
    /// Key was new and the least recently used entry was evicted for it
    Evicted {
        /// Key of the evicted entry
        key: String,
        /// Value of the evicted entry
        value: V,
    },
}

impl<V> SetOutcome<V> {
    /// Value replaced by an update, if any
    pub fn previous(self) -> Option<V> {
        match self {
            SetOutcome::Updated(value) => Some(value),
            _ => None,
        }
    }
}

/// Fixed-capacity LRU cache keyed by string
pub struct LruEngine<V> {
    index: HashMap<String, usize, RandomState>,
    list: RecencyList<V>,
    capacity: usize,
}

impl<V> LruEngine<V> {
    /// Create an engine holding at most `capacity` entries
    ///
    /// # Errors
    /// * `InvalidCapacity` if `capacity` is below [`DEFAULT_MIN_CAPACITY`]
    /// * `CapacityTooLarge` if `capacity` is above [`MAX_CAPACITY`]
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_min_capacity(capacity, DEFAULT_MIN_CAPACITY)
    }

    /// Create an engine with a custom lower bound on capacity
    ///
    /// A `min_capacity` of 0 is treated as 1: an engine that can hold
    /// nothing is always rejected.
    pub fn with_min_capacity(capacity: usize, min_capacity: usize) -> Result<Self> {
        let minimum = min_capacity.max(1);
        if capacity < minimum {
            return Err(Error::InvalidCapacity {
                requested: capacity,
                minimum,
            });
        }
        if capacity > MAX_CAPACITY {
            return Err(Error::CapacityTooLarge {
                requested: capacity,
                maximum: MAX_CAPACITY,
            });
        }

        // Only pre-size for modest capacities; huge ones grow on demand.
        let reserve = capacity.min(4096);

        Ok(Self {
            index: HashMap::with_capacity_and_hasher(reserve, RandomState::new()),
            list: RecencyList::with_capacity(reserve),
            capacity,
        })
    }

    /// Look up `key` and mark it most recently used
    ///
    /// # Errors
    /// * `KeyNotFound` if `key` is not resident; state is left untouched
    pub fn get(&mut self, key: &str) -> Result<&V> {
        let idx = match self.index.get(key) {
            Some(&idx) => idx,
            None => return Err(Error::KeyNotFound(key.to_string())),
        };

        if self.index.len() >= 2 {
            self.list.move_to_front(idx);
        }

        self.list
            .get(idx)
            .map(Entry::value)
            .ok_or_else(|| Error::KeyNotFound(key.to_string()))
    }

    /// Insert or update `key`, evicting the LRU entry if capacity is exceeded
    pub fn set(&mut self, key: impl Into<String>, value: V) -> SetOutcome<V> {
        let key = key.into();

        if let Some(&idx) = self.index.get(&key) {
            let previous = self
                .list
                .value_mut(idx)
                .map(|slot| std::mem::replace(slot, value));
            self.list.move_to_front(idx);

            return match previous {
                Some(previous) => SetOutcome::Updated(previous),
                None => SetOutcome::Inserted,
            };
        }

        let idx = self.list.insert_front(key.clone(), value);
        self.index.insert(key, idx);

        if self.index.len() > self.capacity {
            if let Some((key, value)) = self.evict() {
                return SetOutcome::Evicted { key, value };
            }
        }

        SetOutcome::Inserted
    }

    /// Remove the least recently used entry
    pub fn evict(&mut self) -> Option<(String, V)> {
        let entry = self.list.remove_tail()?;
        self.index.remove(entry.key());
        Some(entry.into_parts())
    }

    /// Look up `key` without touching recency
    pub fn peek(&self, key: &str) -> Option<&V> {
        self.index
            .get(key)
            .and_then(|&idx| self.list.get(idx))
            .map(Entry::value)
    }

    /// Check whether `key` is resident without touching recency
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Remove `key` and return its value
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let idx = self.index.remove(key)?;
        self.list.remove(idx).map(|entry| entry.into_parts().1)
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.index.clear();
        self.list.clear();
    }

    /// Number of resident entries
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Check if the engine holds no entries
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Maximum number of resident entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Key of the most recently used entry
    pub fn head_key(&self) -> Option<&str> {
        self.list.head().and_then(|idx| self.list.get(idx)).map(Entry::key)
    }

    /// Key of the least recently used entry (next eviction victim)
    pub fn tail_key(&self) -> Option<&str> {
        self.list.tail().and_then(|idx| self.list.get(idx)).map(Entry::key)
    }

    /// Resident keys from most to least recently used
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.list.iter().map(Entry::key)
    }

    /// Resident pairs from most to least recently used
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> + '_ {
        self.list.iter().map(|entry| (entry.key(), entry.value()))
    }
}

impl<V: fmt::Display> fmt::Display for LruEngine<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " <-> ")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        Ok(())
    }
}

impl<V> fmt::Debug for LruEngine<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruEngine")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .field("order", &self.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// Walk the list both ways and compare it to the index
    fn assert_consistent<V>(engine: &LruEngine<V>) {
        let forward: Vec<&str> = engine.list.iter().map(Entry::key).collect();
        let mut backward: Vec<&str> = engine.list.iter_rev().map(Entry::key).collect();
        backward.reverse();

        assert_eq!(forward, backward);
        assert_eq!(forward.len(), engine.index.len());
        assert_eq!(forward.len(), engine.list.len());
        assert!(forward.len() <= engine.capacity);
        assert_eq!(engine.list.head().is_none(), engine.index.is_empty());
        assert_eq!(engine.list.tail().is_none(), engine.index.is_empty());

        let listed: HashSet<&str> = forward.iter().copied().collect();
        assert_eq!(listed.len(), forward.len());
        for (key, &idx) in &engine.index {
            assert!(listed.contains(key.as_str()));
            assert_eq!(engine.list.get(idx).map(Entry::key), Some(key.as_str()));
        }
    }

    fn order<V>(engine: &LruEngine<V>) -> Vec<&str> {
        engine.keys().collect()
    }

    #[test]
    fn test_capacity_validation() {
        assert_eq!(
            LruEngine::<i32>::new(2).unwrap_err(),
            Error::InvalidCapacity { requested: 2, minimum: 3 }
        );
        assert!(LruEngine::<i32>::new(3).is_ok());

        assert!(LruEngine::<i32>::with_min_capacity(1, 1).is_ok());
        assert_eq!(
            LruEngine::<i32>::with_min_capacity(0, 0).unwrap_err(),
            Error::InvalidCapacity { requested: 0, minimum: 1 }
        );
        assert!(matches!(
            LruEngine::<i32>::new(MAX_CAPACITY + 1),
            Err(Error::CapacityTooLarge { .. })
        ));
    }

    #[test]
    fn test_walkthrough() {
        let mut engine = LruEngine::new(3).unwrap();

        engine.set("1", 1);
        engine.set("2", 2);
        engine.set("3", 3);
        let outcome = engine.set("4", 4);

        assert_eq!(outcome, SetOutcome::Evicted { key: "1".to_string(), value: 1 });
        assert_eq!(order(&engine), vec!["4", "3", "2"]);
        assert_eq!(engine.get("1"), Err(Error::KeyNotFound("1".to_string())));
        assert_consistent(&engine);

        assert_eq!(engine.get("2"), Ok(&2));
        assert_eq!(order(&engine), vec!["2", "4", "3"]);

        assert_eq!(engine.set("4", 5), SetOutcome::Updated(4));
        assert_eq!(order(&engine), vec!["4", "2", "3"]);
        assert_eq!(engine.peek("4"), Some(&5));

        engine.set("6", 6);
        assert_eq!(order(&engine), vec!["6", "4", "2"]);
        assert_consistent(&engine);
    }

    #[test]
    fn test_longer_walkthrough() {
        let mut engine = LruEngine::new(3).unwrap();

        for (key, value) in [("1", 1), ("2", 2), ("3", 3), ("4", 4)] {
            engine.set(key, value);
        }
        engine.get("2").unwrap();
        assert!(engine.get("1").is_err());
        engine.set("4", 5);
        engine.get("2").unwrap();
        assert_eq!(order(&engine), vec!["2", "4", "3"]);

        engine.get("3").unwrap();
        assert_eq!(order(&engine), vec!["3", "2", "4"]);

        engine.set("6", 6);
        assert_eq!(order(&engine), vec!["6", "3", "2"]);

        engine.set("7", 7);
        assert_eq!(order(&engine), vec!["7", "6", "3"]);

        engine.get("3").unwrap();
        assert_eq!(order(&engine), vec!["3", "7", "6"]);

        engine.set("8", 8);
        assert_eq!(order(&engine), vec!["8", "3", "7"]);
        assert_consistent(&engine);
    }

    #[test]
    fn test_single_entry_get() {
        let mut engine = LruEngine::with_min_capacity(1, 1).unwrap();

        engine.set("only", "a");
        assert_eq!(engine.get("only"), Ok(&"a"));
        assert_eq!(engine.head_key(), Some("only"));
        assert_eq!(engine.tail_key(), Some("only"));

        assert_eq!(engine.set("next", "b"), SetOutcome::Evicted { key: "only".to_string(), value: "a" });
        assert_eq!(order(&engine), vec!["next"]);
        assert_consistent(&engine);
    }

    #[test]
    fn test_miss_leaves_state_unchanged() {
        let mut engine = LruEngine::new(3).unwrap();

        engine.set("a", 1);
        engine.set("b", 2);
        let before: Vec<String> = engine.keys().map(str::to_string).collect();

        assert!(engine.get("zzz").unwrap_err().is_miss());

        let after: Vec<String> = engine.keys().map(str::to_string).collect();
        assert_eq!(before, after);
        assert_eq!(engine.head_key(), Some("b"));
        assert_eq!(engine.tail_key(), Some("a"));
        assert_consistent(&engine);
    }

    #[test]
    fn test_update_does_not_duplicate() {
        let mut engine = LruEngine::new(3).unwrap();

        engine.set("a", 1);
        engine.set("b", 2);
        engine.set("a", 3);
        engine.set("a", 4);

        assert_eq!(engine.len(), 2);
        assert_eq!(order(&engine), vec!["a", "b"]);
        assert_eq!(engine.peek("a"), Some(&4));
        assert_consistent(&engine);
    }

    #[test]
    fn test_touch_keeps_relative_order() {
        let mut engine = LruEngine::new(5).unwrap();

        for key in ["a", "b", "c", "d", "e"] {
            engine.set(key, 0);
        }
        assert_eq!(order(&engine), vec!["e", "d", "c", "b", "a"]);

        engine.get("c").unwrap();
        assert_eq!(order(&engine), vec!["c", "e", "d", "b", "a"]);

        engine.set("a", 1);
        assert_eq!(order(&engine), vec!["a", "c", "e", "d", "b"]);
        assert_consistent(&engine);
    }

    #[test]
    fn test_capacity_bound_under_churn() {
        let mut engine = LruEngine::new(4).unwrap();

        for i in 0..100 {
            let key = format!("k{}", i % 13);
            if i % 3 == 0 {
                let _ = engine.get(&key);
            } else {
                engine.set(key, i);
            }
            assert!(engine.len() <= engine.capacity());
            assert_consistent(&engine);
        }
    }

    #[test]
    fn test_eviction_takes_exactly_the_tail() {
        let mut engine = LruEngine::new(3).unwrap();

        engine.set("a", 1);
        engine.set("b", 2);
        engine.set("c", 3);
        engine.get("a").unwrap();

        assert_eq!(engine.tail_key(), Some("b"));
        let outcome = engine.set("d", 4);

        assert_eq!(outcome, SetOutcome::Evicted { key: "b".to_string(), value: 2 });
        assert_eq!(engine.len(), 3);
        assert!(engine.contains("a"));
        assert!(engine.contains("c"));
        assert!(!engine.contains("b"));
    }

    #[test]
    fn test_peek_does_not_touch() {
        let mut engine = LruEngine::new(3).unwrap();

        engine.set("a", 1);
        engine.set("b", 2);
        assert_eq!(engine.peek("a"), Some(&1));
        assert_eq!(order(&engine), vec!["b", "a"]);
        assert_eq!(engine.peek("missing"), None);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut engine = LruEngine::new(3).unwrap();

        engine.set("a", 1);
        engine.set("b", 2);
        engine.set("c", 3);

        assert_eq!(engine.remove("b"), Some(2));
        assert_eq!(engine.remove("b"), None);
        assert_eq!(order(&engine), vec!["c", "a"]);
        assert_consistent(&engine);

        engine.clear();
        assert!(engine.is_empty());
        assert_eq!(engine.head_key(), None);
        assert_consistent(&engine);
    }

    #[test]
    fn test_evict_empty() {
        let mut engine = LruEngine::<i32>::new(3).unwrap();
        assert_eq!(engine.evict(), None);
    }

    #[test]
    fn test_display() {
        let mut engine = LruEngine::new(3).unwrap();

        engine.set("1", 1);
        engine.set("2", 2);
        engine.get("1").unwrap();

        assert_eq!(engine.to_string(), "1=1 <-> 2=2");
    }
}
