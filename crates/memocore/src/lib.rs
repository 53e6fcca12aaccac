//! # memocore
//!
//! Eviction engine for bounded in-process memoization.
//!
//! ## Architecture
//! - **Index**: AHash map from key to arena slot (O(1))
//! - **Recency list**: slot-linked doubly linked list, head = most recent (O(1))
//! - **Policy seam**: closed set of policies behind [`EvictionPolicy`]
//!
//! ```
//! use memocore::LruEngine;
//!
//! let mut engine = LruEngine::new(3).unwrap();
//! engine.set("1", 1);
//! engine.set("2", 2);
//! engine.set("3", 3);
//! engine.set("4", 4);
//!
//! assert!(engine.get("1").is_err());
//! assert_eq!(engine.keys().collect::<Vec<_>>(), vec!["4", "3", "2"]);
//! ```

#![warn(missing_docs)]

mod error;
pub mod list;
mod lru;
mod policy;

pub use error::{Error, Result};
pub use lru::{LruEngine, SetOutcome, DEFAULT_MIN_CAPACITY, MAX_CAPACITY};
pub use policy::{EvictionPolicy, Policy, PolicyKind};
